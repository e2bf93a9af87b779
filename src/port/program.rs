//! The per-pin programming sequence.
//!
//! Programming a pin happens in four steps, always in this order: lock handling, direction with
//! its resistor or initial level, analog/digital buffer selection, and alternate-function
//! routing. Each step only touches the pin's own bits in its port's registers.

use crate::config::{Direction, Level, PinConfig, PinId, PinMode, Resistor};
use crate::interface::RegisterInterface;
use crate::mux::{self, Protection};
use crate::port::bank::RegisterBank;
use crate::registers::{Register, UNLOCK_KEY};

/// How the function-select field is written when a pin is routed to a peripheral.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldWrite {
    /// OR the code into the field. Used at initialization, where the field starts from reset.
    Merge,
    /// Clear the field before writing the code. Used when re-routing a configured pin.
    Replace,
}

/// Run the whole sequence for one pin.
pub(crate) fn program_pin<RI: RegisterInterface>(iface: &mut RI, id: PinId, cfg: &PinConfig) {
    log::debug!(
        "{}: {:?} {:?} {:?} {:?}",
        id,
        cfg.direction,
        cfg.mode,
        cfg.resistor,
        cfg.initial_value
    );
    let mut bank = RegisterBank::new(iface, id.port());
    unlock(&mut bank, id);
    apply_direction(&mut bank, id, cfg);
    apply_buffer(&mut bank, id, cfg.mode);
    apply_routing(&mut bank, id, cfg.mode, FieldWrite::Merge);
}

/// Open the commit register for the pins locked at reset. The JTAG pins and unprotected pins are
/// left alone.
pub(crate) fn unlock<RI: RegisterInterface>(bank: &mut RegisterBank<RI>, id: PinId) {
    match mux::protection(id) {
        Protection::Locked => {
            log::trace!("{}: unlocking commit register", id);
            bank.write(Register::Lock, UNLOCK_KEY);
            bank.set_bit(Register::Commit, id.pin());
        }
        Protection::Debug => log::trace!("{}: debug pin, commit register untouched", id),
        Protection::Free => {}
    }
}

/// Program the direction bit, then the initial level of an output or the resistor of an input.
pub(crate) fn apply_direction<RI: RegisterInterface>(
    bank: &mut RegisterBank<RI>,
    id: PinId,
    cfg: &PinConfig,
) {
    let bit = id.pin();
    match cfg.direction {
        Direction::Output => {
            bank.set_bit(Register::Direction, bit);
            bank.assign_bit(Register::Data, bit, cfg.initial_value == Level::High);
        }
        Direction::Input => {
            bank.clear_bit(Register::Direction, bit);
            match cfg.resistor {
                Resistor::PullUp => bank.set_bit(Register::PullUp, bit),
                Resistor::PullDown => bank.set_bit(Register::PullDown, bit),
                Resistor::Off => {
                    bank.clear_bit(Register::PullUp, bit);
                    bank.clear_bit(Register::PullDown, bit);
                }
            }
        }
    }
}

/// Select the analog or the digital input buffer.
pub(crate) fn apply_buffer<RI: RegisterInterface>(
    bank: &mut RegisterBank<RI>,
    id: PinId,
    mode: PinMode,
) {
    let analog = mode == PinMode::Analog;
    bank.assign_bit(Register::AnalogModeSelect, id.pin(), analog);
    bank.assign_bit(Register::DigitalEnable, id.pin(), !analog);
}

/// Route the pin through the GPIO data path or to a peripheral. A peripheral without a
/// function-select code (analog) gets the alternate function enabled and no code. With
/// `FieldWrite::Replace` the pin's `GPIOPCTL` field always ends up holding exactly the new code,
/// or zero when there is none.
pub(crate) fn apply_routing<RI: RegisterInterface>(
    bank: &mut RegisterBank<RI>,
    id: PinId,
    mode: PinMode,
    write: FieldWrite,
) {
    let bit = id.pin();
    bank.assign_bit(Register::AltFunctionSelect, bit, mode != PinMode::Dio);
    let code = mux::function_select(id, mode);
    match (write, code) {
        (FieldWrite::Merge, Some(code)) => bank.or_function_select(bit, code),
        (FieldWrite::Merge, None) => {}
        (FieldWrite::Replace, code) => bank.replace_function_select(bit, code.unwrap_or(0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortId;
    use crate::interface::test_spy::TestSpyInterface;

    fn pin(port: PortId, pin: u8) -> PinId {
        PinId::new(port, pin).unwrap()
    }

    #[test]
    fn output_high_dio() {
        let ei = TestSpyInterface::new();
        let pa0 = pin(PortId::A, 0);
        program_pin(&mut ei.split(), pa0, &PinConfig::output(Level::High));
        assert!(ei.bit(pa0, Register::Direction));
        assert!(ei.bit(pa0, Register::Data));
        assert!(ei.bit(pa0, Register::DigitalEnable));
        assert!(!ei.bit(pa0, Register::AnalogModeSelect));
        assert!(!ei.bit(pa0, Register::AltFunctionSelect));
    }

    #[test]
    fn locked_pin_is_unlocked_before_protected_writes() {
        let ei = TestSpyInterface::new();
        let pf0 = pin(PortId::F, 0);
        program_pin(
            &mut ei.split(),
            pf0,
            &PinConfig::input(Resistor::PullUp).with_mode(PinMode::Can),
        );
        assert_eq!(ei.writes_to(PortId::F, Register::Lock), vec![UNLOCK_KEY]);
        assert!(ei.bit(pf0, Register::Commit));
        assert!(!ei.bit(pf0, Register::Direction));
        assert!(ei.bit(pf0, Register::PullUp));
        assert!(ei.bit(pf0, Register::AltFunctionSelect));
        assert_eq!(ei.nibble(pf0), 3);
    }

    #[test]
    fn debug_pin_commit_untouched() {
        let ei = TestSpyInterface::new();
        program_pin(
            &mut ei.split(),
            pin(PortId::C, 1),
            &PinConfig::output(Level::High).with_mode(PinMode::Uart),
        );
        assert!(ei.writes_to(PortId::C, Register::Lock).is_empty());
        assert!(ei.writes_to(PortId::C, Register::Commit).is_empty());
        assert_eq!(ei.get(PortId::C, Register::Commit), 0xF0);
    }

    #[test]
    fn free_pin_needs_no_unlock() {
        let ei = TestSpyInterface::new();
        program_pin(
            &mut ei.split(),
            pin(PortId::D, 6),
            &PinConfig::input(Resistor::PullDown),
        );
        assert!(ei.writes_to(PortId::D, Register::Lock).is_empty());
        assert!(ei.bit(pin(PortId::D, 6), Register::PullDown));
    }

    #[test]
    fn analog_disables_digital_and_enables_alt_function() {
        let ei = TestSpyInterface::new();
        let pe3 = pin(PortId::E, 3);
        program_pin(
            &mut ei.split(),
            pe3,
            &PinConfig::input(Resistor::Off).with_mode(PinMode::Analog),
        );
        assert!(ei.bit(pe3, Register::AnalogModeSelect));
        assert!(!ei.bit(pe3, Register::DigitalEnable));
        assert!(ei.bit(pe3, Register::AltFunctionSelect));
        assert!(ei.writes_to(PortId::E, Register::PortControl).is_empty());
    }

    #[test]
    fn input_without_resistor_clears_both_pulls() {
        let mut ei = TestSpyInterface::new();
        ei.set(PortId::B, Register::PullUp, 0xFF);
        ei.set(PortId::B, Register::PullDown, 0x00);
        let pb2 = pin(PortId::B, 2);
        program_pin(&mut ei.split(), pb2, &PinConfig::input(Resistor::Off));
        assert!(!ei.bit(pb2, Register::PullUp));
        assert!(!ei.bit(pb2, Register::PullDown));
        assert_eq!(ei.get(PortId::B, Register::PullUp), 0xFB);
    }

    #[test]
    fn replace_routing_overwrites_previous_code() {
        let ei = TestSpyInterface::new();
        let pb4 = pin(PortId::B, 4);
        let mut iface = ei.split();
        program_pin(&mut iface, pb4, &PinConfig::input(Resistor::Off).with_mode(PinMode::Gpt));
        assert_eq!(ei.nibble(pb4), 7);
        let mut bank = RegisterBank::new(&mut iface, PortId::B);
        apply_routing(&mut bank, pb4, PinMode::Can, FieldWrite::Replace);
        assert_eq!(ei.nibble(pb4), 8);
    }

    #[test]
    fn replace_clears_stale_code_for_modes_without_one() {
        let ei = TestSpyInterface::new();
        let pb4 = pin(PortId::B, 4);
        let mut iface = ei.split();
        program_pin(
            &mut iface,
            pb4,
            &PinConfig::output(Level::Low).with_mode(PinMode::Gpt),
        );
        assert_eq!(ei.nibble(pb4), 7);

        let mut bank = RegisterBank::new(&mut iface, PortId::B);
        apply_routing(&mut bank, pb4, PinMode::Analog, FieldWrite::Replace);
        assert_eq!(ei.nibble(pb4), 0);
        assert!(ei.bit(pb4, Register::AltFunctionSelect));

        apply_routing(&mut bank, pb4, PinMode::Pwm, FieldWrite::Replace);
        assert_eq!(ei.nibble(pb4), 4);
        apply_routing(&mut bank, pb4, PinMode::Dio, FieldWrite::Replace);
        assert_eq!(ei.nibble(pb4), 0);
        assert!(!ei.bit(pb4, Register::AltFunctionSelect));
    }
}
