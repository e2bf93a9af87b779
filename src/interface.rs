//! This module provides the shim between the driver and the GPIO register space. The driver
//! never touches memory directly; every access goes through a `RegisterInterface`.

use crate::registers::RegisterAddress;

/// A register interface provides 32-bit reads and writes of the GPIO registers at
/// pre-validated addresses.
pub trait RegisterInterface {
    /// Write `value` into the register at `addr`.
    fn write_register(&mut self, addr: RegisterAddress, value: u32);
    /// Fetch the current value of the register at `addr`.
    fn read_register(&mut self, addr: RegisterAddress) -> u32;
}

impl<'a, RI: RegisterInterface + ?Sized> RegisterInterface for &'a mut RI {
    fn write_register(&mut self, addr: RegisterAddress, value: u32) {
        (**self).write_register(addr, value)
    }
    fn read_register(&mut self, addr: RegisterAddress) -> u32 {
        (**self).read_register(addr)
    }
}

// This is here (and has to be pub) for doctests only. It's useless otherwise.
#[doc(hidden)]
pub mod noop {
    use super::RegisterInterface;
    use crate::registers::RegisterAddress;
    pub struct NoopInterface;
    impl RegisterInterface for NoopInterface {
        fn write_register(&mut self, _addr: RegisterAddress, _value: u32) {}
        fn read_register(&mut self, _addr: RegisterAddress) -> u32 {
            0
        }
    }
}

pub mod mmio {
    //! Memory-mapped access to the real GPIO registers.

    use core::ptr;

    use super::{RegisterAddress, RegisterInterface};

    /// A `RegisterInterface` that performs volatile loads and stores at the hardware addresses.
    pub struct MmioInterface {
        _private: (),
    }

    impl MmioInterface {
        /// Create the interface.
        ///
        /// # Safety
        ///
        /// The caller must be running on a TM4C123 with the GPIO port clocks enabled, and must
        /// not create more than one `MmioInterface` or otherwise access the GPIO registers while
        /// it exists.
        pub unsafe fn new() -> Self {
            Self { _private: () }
        }
    }

    impl RegisterInterface for MmioInterface {
        fn write_register(&mut self, addr: RegisterAddress, value: u32) {
            // Addresses can only be built from the register map, so they are aligned and mapped.
            unsafe { ptr::write_volatile(u32::from(addr) as *mut u32, value) }
        }

        fn read_register(&mut self, addr: RegisterAddress) -> u32 {
            unsafe { ptr::read_volatile(u32::from(addr) as *const u32) }
        }
    }
}
