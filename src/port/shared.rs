//! Shared access to the Port driver.

use core::marker::PhantomData;

use crate::config::PinId;
#[cfg(feature = "set-pin-direction-api")]
use crate::config::Direction;
#[cfg(feature = "set-pin-mode-api")]
use crate::config::PinMode;
use crate::diagnostics::DiagnosticSink;
use crate::error::PortError;
use crate::interface::RegisterInterface;
use crate::mutex::PortMutex;
use crate::port::pin::{PinIO, PortPin};
use crate::port::Port;

/// This adapter captures the `Port` in a mutex so its run-time services can be called through a
/// shared reference from several contexts, and hands out `PortPin`s that implement the
/// `embedded-hal` GPIO traits. Every call locks the mutex for the duration of one register
/// sequence.
pub struct SharedPort<'c, M, RI, S>(M, PhantomData<fn() -> (&'c (), RI, S)>)
where
    M: PortMutex<Port<'c, RI, S>>,
    RI: RegisterInterface,
    S: DiagnosticSink;

impl<'c, M, RI, S> SharedPort<'c, M, RI, S>
where
    M: PortMutex<Port<'c, RI, S>>,
    RI: RegisterInterface,
    S: DiagnosticSink,
{
    pub(crate) fn new(port: Port<'c, RI, S>) -> Self {
        SharedPort(M::new(port), PhantomData)
    }

    /// Create a `PortPin` for pin `id`. Using the `OutputPin` or `InputPin` methods on the
    /// returned pin immediately reads or writes that pin's data bit.
    pub fn port_pin<'io>(&'io self, id: PinId) -> PortPin<'io, Self> {
        PortPin::new(self, id)
    }

    /// Run `f` with exclusive access to the driver.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Port<'c, RI, S>) -> R) -> R {
        self.0.lock(f)
    }

    #[cfg(feature = "set-pin-direction-api")]
    pub fn set_pin_direction(&self, pin: u8, direction: Direction) -> Result<(), PortError> {
        self.0.lock(|port| port.set_pin_direction(pin, direction))
    }

    #[cfg(feature = "set-pin-mode-api")]
    pub fn set_pin_mode(&self, pin: u8, mode: PinMode) -> Result<(), PortError> {
        self.0.lock(|port| port.set_pin_mode(pin, mode))
    }

    #[cfg(feature = "refresh-port-direction-api")]
    pub fn refresh_port_direction(&self) -> Result<(), PortError> {
        self.0.lock(|port| port.refresh_port_direction())
    }
}

impl<'c, M, RI, S> PinIO for SharedPort<'c, M, RI, S>
where
    M: PortMutex<Port<'c, RI, S>>,
    RI: RegisterInterface,
    S: DiagnosticSink,
{
    fn write_pin(&self, id: PinId, high: bool) -> Result<(), PortError> {
        self.0.lock(|port| port.write_level(id, high))
    }
    fn read_pin(&self, id: PinId) -> Result<bool, PortError> {
        self.0.lock(|port| port.read_level(id))
    }
}
