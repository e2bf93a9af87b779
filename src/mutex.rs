//! Locking for the shared Port driver.
//!
//! A `SharedPort` may be reached from thread mode and from interrupt handlers at the same time,
//! and every service is a read-modify-write sequence on a register bank. The lock is held for
//! one such sequence at a time.

/// A mutex that can own the `Port` driver behind a [`SharedPort`](crate::SharedPort).
///
/// Implemented for `std::sync::Mutex` under the `std` feature, and for
/// `cortex_m::interrupt::Mutex<RefCell<_>>` under `cortexm`, where locking masks interrupts.
/// [`DefaultMutex`] names the one matching the enabled features; `cortexm` wins when both are
/// on.
pub trait PortMutex<T> {
    /// Wrap `value`.
    fn new(value: T) -> Self;

    /// Run `f` with exclusive access to the wrapped value and return its result.
    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R;
}

#[cfg(all(feature = "std", not(feature = "cortexm")))]
pub type DefaultMutex<T> = std::sync::Mutex<T>;

#[cfg(feature = "cortexm")]
pub type DefaultMutex<T> = cortex_m::interrupt::Mutex<core::cell::RefCell<T>>;

#[cfg(feature = "std")]
impl<T> PortMutex<T> for std::sync::Mutex<T> {
    fn new(value: T) -> Self {
        std::sync::Mutex::new(value)
    }

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        // Poisoned: take it over. The registers hold whatever was written before the panic.
        let mut guard = match std::sync::Mutex::lock(self) {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

#[cfg(feature = "cortexm")]
impl<T> PortMutex<T> for cortex_m::interrupt::Mutex<core::cell::RefCell<T>> {
    fn new(value: T) -> Self {
        cortex_m::interrupt::Mutex::new(core::cell::RefCell::new(value))
    }

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        cortex_m::interrupt::free(|cs| f(&mut self.borrow(cs).borrow_mut()))
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::PortMutex;
    use std::sync::Mutex;

    #[test]
    fn lock_returns_closure_result() {
        let m = <Mutex<u32> as PortMutex<u32>>::new(41);
        let v = PortMutex::lock(&m, |v| {
            *v += 1;
            *v
        });
        assert_eq!(v, 42);
    }

    #[test]
    fn poisoned_lock_is_taken_over() {
        let m = <Mutex<u32> as PortMutex<u32>>::new(7);
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            PortMutex::lock(&m, |_| panic!("interrupted sequence"))
        }));
        assert!(m.is_poisoned());
        assert_eq!(PortMutex::lock(&m, |v| *v), 7);
    }
}
