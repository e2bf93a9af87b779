//! APIs for driving configured pins through an `embedded-hal` API.

#[cfg(feature = "unproven")]
use hal::digital::v2::{toggleable, InputPin, StatefulOutputPin};
use hal::digital::v2::OutputPin;

use crate::config::PinId;
use crate::error::PortError;

/// An indirection between pin handles and the driver that owns the registers.
pub trait PinIO {
    /// Drive pin `id` high (`true`) or low. Only the pin's own data bit is written.
    fn write_pin(&self, id: PinId, high: bool) -> Result<(), PortError>;

    /// Read the data bit of pin `id`: the external level for an input, the driven level for an
    /// output.
    fn read_pin(&self, id: PinId) -> Result<bool, PortError>;
}

/// A single configured pin. These implement the `embedded-hal` GPIO traits, so drivers written
/// against `embedded-hal` can use the pins the Port driver configured.
pub struct PortPin<'io, IO: PinIO> {
    io: &'io IO,
    id: PinId,
}

impl<'io, IO: PinIO> PortPin<'io, IO> {
    pub(crate) fn new(io: &'io IO, id: PinId) -> Self {
        Self { io, id }
    }

    pub fn id(&self) -> PinId {
        self.id
    }
}

impl<'io, IO: PinIO> OutputPin for PortPin<'io, IO> {
    type Error = PortError;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.io.write_pin(self.id, false)
    }
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.io.write_pin(self.id, true)
    }
}

#[cfg(feature = "unproven")]
impl<'io, IO: PinIO> InputPin for PortPin<'io, IO> {
    type Error = PortError;

    fn is_high(&self) -> Result<bool, Self::Error> {
        self.io.read_pin(self.id)
    }
    fn is_low(&self) -> Result<bool, Self::Error> {
        self.io.read_pin(self.id).map(|b| !b)
    }
}

#[cfg(feature = "unproven")]
impl<'io, IO: PinIO> StatefulOutputPin for PortPin<'io, IO> {
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        self.io.read_pin(self.id)
    }
    fn is_set_low(&self) -> Result<bool, Self::Error> {
        self.io.read_pin(self.id).map(|b| !b)
    }
}

#[cfg(feature = "unproven")]
impl<'io, IO: PinIO> toggleable::Default for PortPin<'io, IO> {}
