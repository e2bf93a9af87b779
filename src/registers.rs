//! The GPIO register map of the TM4C123GH6PM.

use crate::config::PortId;

/// The value that must be written to `GPIOLOCK` before `GPIOCR` accepts writes ("LOCK" in
/// ASCII).
pub const UNLOCK_KEY: u32 = 0x4C4F_434B;

/// Base address of each port's register bank on the APB aperture.
pub fn base_address(port: PortId) -> u32 {
    match port {
        PortId::A => 0x4000_4000,
        PortId::B => 0x4000_5000,
        PortId::C => 0x4000_6000,
        PortId::D => 0x4000_7000,
        PortId::E => 0x4002_4000,
        PortId::F => 0x4002_5000,
    }
}

/// An absolute register address. These are created from a `PortId` and a `Register`, which
/// prevents arbitrary addresses from being forged and handed to a `RegisterInterface`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct RegisterAddress(pub(crate) u32);

impl RegisterAddress {
    pub fn new(port: PortId, reg: Register) -> Self {
        RegisterAddress(base_address(port) + reg.offset())
    }
}

impl From<RegisterAddress> for u32 {
    fn from(addr: RegisterAddress) -> u32 {
        addr.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    /// `GPIODATA` through the all-bits aperture. Reads and writes touch all eight pins.
    Data,

    /// `GPIODATA` through the masked aperture. Address bits `[9:2]` form a mask, and only the
    /// pins whose mask bit is set are read or written, so no read-modify-write is needed.
    MaskedData(u8),

    /// `GPIODIR`: a set bit makes the pin an output.
    Direction,

    /// `GPIOAFSEL`: a set bit hands the pin to the peripheral selected in `GPIOPCTL`.
    AltFunctionSelect,

    /// `GPIOPUR`: weak pull-up enable. Commit-protected.
    PullUp,

    /// `GPIOPDR`: weak pull-down enable. Commit-protected.
    PullDown,

    /// `GPIODEN`: digital buffer enable. Commit-protected.
    DigitalEnable,

    /// `GPIOLOCK`: write `UNLOCK_KEY` to allow writes to `GPIOCR`. Reads 1 while locked.
    Lock,

    /// `GPIOCR`: a clear bit makes the pin's protected bits read-only.
    Commit,

    /// `GPIOAMSEL`: analog mode select.
    AnalogModeSelect,

    /// `GPIOPCTL`: one 4-bit function-select field per pin.
    PortControl,
}

impl Register {
    /// Byte offset of the register from its bank's base address.
    pub fn offset(self) -> u32 {
        use self::Register::*;
        match self {
            Data => 0x3FC,
            MaskedData(mask) => (mask as u32) << 2,
            Direction => 0x400,
            AltFunctionSelect => 0x420,
            PullUp => 0x510,
            PullDown => 0x514,
            DigitalEnable => 0x51C,
            Lock => 0x520,
            Commit => 0x524,
            AnalogModeSelect => 0x528,
            PortControl => 0x52C,
        }
    }

    /// Whether the bits of this register are protected by `GPIOCR`.
    pub fn is_commit_protected(self) -> bool {
        match self {
            Register::AltFunctionSelect
            | Register::PullUp
            | Register::PullDown
            | Register::DigitalEnable => true,
            _ => false,
        }
    }
}
