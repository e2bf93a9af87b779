//! Bit-level access to one port's register bank.

use crate::config::PortId;
use crate::interface::RegisterInterface;
use crate::registers::{Register, RegisterAddress};

/// A view of the register bank of `port` through a borrowed `RegisterInterface`. Every
/// accessor touches only the bits it names; the rest of the register is preserved by a
/// read-modify-write.
pub(crate) struct RegisterBank<'i, RI: RegisterInterface> {
    iface: &'i mut RI,
    port: PortId,
}

impl<'i, RI: RegisterInterface> RegisterBank<'i, RI> {
    pub(crate) fn new(iface: &'i mut RI, port: PortId) -> Self {
        Self { iface, port }
    }

    fn addr(&self, reg: Register) -> RegisterAddress {
        RegisterAddress::new(self.port, reg)
    }

    pub(crate) fn read(&mut self, reg: Register) -> u32 {
        let addr = self.addr(reg);
        self.iface.read_register(addr)
    }

    pub(crate) fn write(&mut self, reg: Register, value: u32) {
        let addr = self.addr(reg);
        self.iface.write_register(addr, value)
    }

    pub(crate) fn modify(&mut self, reg: Register, f: impl FnOnce(u32) -> u32) {
        let addr = self.addr(reg);
        let current = self.iface.read_register(addr);
        self.iface.write_register(addr, f(current))
    }

    pub(crate) fn set_bit(&mut self, reg: Register, bit: u8) {
        self.modify(reg, |v| v | 1 << bit)
    }

    pub(crate) fn clear_bit(&mut self, reg: Register, bit: u8) {
        self.modify(reg, |v| v & !(1 << bit))
    }

    pub(crate) fn assign_bit(&mut self, reg: Register, bit: u8, value: bool) {
        if value {
            self.set_bit(reg, bit)
        } else {
            self.clear_bit(reg, bit)
        }
    }

    /// OR `code` into the 4-bit `GPIOPCTL` field of pin `bit`, leaving every other field
    /// (including any bits already set in this one) untouched.
    pub(crate) fn or_function_select(&mut self, bit: u8, code: u8) {
        self.modify(Register::PortControl, |v| v | ((code as u32) & 0xF) << (bit * 4))
    }

    /// Replace the 4-bit `GPIOPCTL` field of pin `bit` with `code`.
    pub(crate) fn replace_function_select(&mut self, bit: u8, code: u8) {
        let shift = bit * 4;
        self.modify(Register::PortControl, |v| {
            v & !(0xF << shift) | ((code as u32) & 0xF) << shift
        })
    }
}
