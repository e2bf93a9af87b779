//! Development errors detected by the driver.

use core::fmt;

/// An error detected while servicing a driver call. Each variant carries the error code that is
/// passed to the `DiagnosticSink` (see [`u8::from`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError {
    /// The pin index is outside the pin index space.
    ParamPin,
    /// The pin's direction is not configured as changeable.
    DirectionUnchangeable,
    /// No configuration table was supplied to `init`.
    ParamConfig,
    /// The requested mode cannot be selected on the pin.
    ParamInvalidMode,
    /// The pin's mode is not configured as changeable.
    ModeUnchangeable,
    /// The driver has not been initialized.
    Uninit,
    /// No output location was supplied.
    ParamPointer,
}

impl From<PortError> for u8 {
    fn from(err: PortError) -> u8 {
        use self::PortError::*;
        match err {
            ParamPin => 0x0A,
            DirectionUnchangeable => 0x0B,
            ParamConfig => 0x0C,
            ParamInvalidMode => 0x0D,
            ModeUnchangeable => 0x0E,
            Uninit => 0x0F,
            ParamPointer => 0x10,
        }
    }
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::PortError::*;
        let msg = match self {
            ParamPin => "invalid pin",
            DirectionUnchangeable => "pin direction is not changeable",
            ParamConfig => "missing configuration",
            ParamInvalidMode => "mode not available on pin",
            ModeUnchangeable => "pin mode is not changeable",
            Uninit => "driver not initialized",
            ParamPointer => "missing output location",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PortError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(u8::from(PortError::ParamPin), 0x0A);
        assert_eq!(u8::from(PortError::ParamConfig), 0x0C);
        assert_eq!(u8::from(PortError::Uninit), 0x0F);
        assert_eq!(u8::from(PortError::ParamPointer), 0x10);
    }

    #[test]
    fn display() {
        assert_eq!(PortError::Uninit.to_string(), "driver not initialized");
    }
}
