//! Pin multiplexer tables: which `GPIOPCTL` code routes a peripheral to a given pin, which pins
//! can carry analog signals, and which pins are protected by the commit register.

use crate::config::{PinId, PinMode, PortId};

/// The 4-bit `GPIOPCTL` function-select code that routes `mode` to pin `id`.
///
/// The same peripheral role uses different codes on different pins: CAN0 is code 3 on PF0 and
/// PF3 but code 8 on its other pins, and SSI3 on PD0..PD3 is code 1 where the other SSI modules
/// use code 2. `Dio` and `Analog` have no function-select code and yield `None`.
pub fn function_select(id: PinId, mode: PinMode) -> Option<u8> {
    match mode {
        PinMode::Dio | PinMode::Analog => None,
        PinMode::Can => match (id.port(), id.pin()) {
            (PortId::F, 0) | (PortId::F, 3) => Some(0x3),
            _ => Some(0x8),
        },
        PinMode::Gpt => Some(0x7),
        PinMode::I2c => Some(0x3),
        // Motion-control module 0 only.
        PinMode::Pwm => Some(0x4),
        PinMode::Ssi => match (id.port(), id.pin()) {
            (PortId::D, 0..=3) => Some(0x1),
            _ => Some(0x2),
        },
        PinMode::Uart => Some(0x1),
    }
}

/// Whether the ADC can sample pin `id` (AIN0..AIN11).
pub fn is_analog_capable(id: PinId) -> bool {
    match (id.port(), id.pin()) {
        (PortId::B, 4..=5) | (PortId::D, 0..=3) | (PortId::E, 0..=5) => true,
        _ => false,
    }
}

/// Whether `mode` may be selected on pin `id` at run time.
pub fn supports_mode(id: PinId, mode: PinMode) -> bool {
    match mode {
        PinMode::Analog => is_analog_capable(id),
        _ => true,
    }
}

/// How the commit register guards a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protection {
    /// Locked at reset (PD7 and PF0, the NMI pins). Must be unlocked and committed before its
    /// protected registers can be written.
    Locked,
    /// JTAG/SWD pins PC0..PC3. Their lock and commit state is never touched so the debug port
    /// keeps working.
    Debug,
    /// No protection in effect.
    Free,
}

pub fn protection(id: PinId) -> Protection {
    match (id.port(), id.pin()) {
        (PortId::D, 7) | (PortId::F, 0) => Protection::Locked,
        (PortId::C, 0..=3) => Protection::Debug,
        _ => Protection::Free,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(port: PortId, pin: u8) -> PinId {
        PinId::new(port, pin).unwrap()
    }

    #[test]
    fn can_codes_depend_on_location() {
        assert_eq!(function_select(pin(PortId::F, 0), PinMode::Can), Some(3));
        assert_eq!(function_select(pin(PortId::F, 3), PinMode::Can), Some(3));
        for &(port, p) in &[
            (PortId::A, 0),
            (PortId::A, 1),
            (PortId::B, 4),
            (PortId::B, 5),
            (PortId::E, 4),
            (PortId::E, 5),
        ] {
            assert_eq!(function_select(pin(port, p), PinMode::Can), Some(8));
        }
    }

    #[test]
    fn ssi_codes_depend_on_location() {
        for p in 0..4 {
            assert_eq!(function_select(pin(PortId::D, p), PinMode::Ssi), Some(1));
        }
        assert_eq!(function_select(pin(PortId::A, 2), PinMode::Ssi), Some(2));
        assert_eq!(function_select(pin(PortId::B, 4), PinMode::Ssi), Some(2));
    }

    #[test]
    fn fixed_codes() {
        let pb2 = pin(PortId::B, 2);
        assert_eq!(function_select(pb2, PinMode::I2c), Some(3));
        assert_eq!(function_select(pb2, PinMode::Pwm), Some(4));
        assert_eq!(function_select(pb2, PinMode::Gpt), Some(7));
        assert_eq!(function_select(pb2, PinMode::Uart), Some(1));
    }

    #[test]
    fn no_code_without_peripheral() {
        for id in PinId::all() {
            assert_eq!(function_select(id, PinMode::Dio), None);
            assert_eq!(function_select(id, PinMode::Analog), None);
        }
    }

    #[test]
    fn analog_capable_pins() {
        assert_eq!(PinId::all().filter(|id| is_analog_capable(*id)).count(), 12);
        assert!(supports_mode(pin(PortId::E, 3), PinMode::Analog));
        assert!(!supports_mode(pin(PortId::F, 1), PinMode::Analog));
        assert!(supports_mode(pin(PortId::F, 1), PinMode::Pwm));
    }

    #[test]
    fn protection_classes() {
        assert_eq!(protection(pin(PortId::D, 7)), Protection::Locked);
        assert_eq!(protection(pin(PortId::F, 0)), Protection::Locked);
        assert_eq!(
            PinId::all()
                .filter(|id| protection(*id) == Protection::Debug)
                .collect::<Vec<_>>(),
            (0..4).map(|p| pin(PortId::C, p)).collect::<Vec<_>>()
        );
        assert_eq!(protection(pin(PortId::C, 4)), Protection::Free);
        assert_eq!(protection(pin(PortId::D, 6)), Protection::Free);
    }
}
