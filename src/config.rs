//! The pin configuration table and the types it is built from.

use core::fmt;

/// One of the six GPIO ports of the TM4C123GH6PM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortId {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl PortId {
    /// Every port, in register-bank order.
    pub const ALL: [PortId; 6] = [
        PortId::A,
        PortId::B,
        PortId::C,
        PortId::D,
        PortId::E,
        PortId::F,
    ];

    /// Number of pins the device bonds out on this port. Ports E and F are short.
    pub fn pin_count(self) -> u8 {
        match self {
            PortId::E => 6,
            PortId::F => 5,
            _ => 8,
        }
    }

    fn first_index(self) -> u8 {
        match self {
            PortId::A => 0,
            PortId::B => 8,
            PortId::C => 16,
            PortId::D => 24,
            PortId::E => 32,
            PortId::F => 38,
        }
    }
}

impl From<PortId> for u8 {
    fn from(port: PortId) -> u8 {
        port as u8
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letter = match self {
            PortId::A => 'A',
            PortId::B => 'B',
            PortId::C => 'C',
            PortId::D => 'D',
            PortId::E => 'E',
            PortId::F => 'F',
        };
        write!(f, "{}", letter)
    }
}

/// A physical pin, identified by its position in the global pin index space.
///
/// The 43 bonded pins are numbered in port order: PA0..PA7 are `0..=7`, PB is `8..=15`, PC is
/// `16..=23`, PD is `24..=31`, PE0..PE5 are `32..=37` and PF0..PF4 are `38..=42`. A `PinId` can
/// only be created for a pin that exists on the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(u8);

impl PinId {
    /// Number of pins in the index space.
    pub const COUNT: usize = 43;

    /// The pin `pin` of `port`, or `None` if the device does not bond out that pin.
    pub fn new(port: PortId, pin: u8) -> Option<Self> {
        if pin < port.pin_count() {
            Some(PinId(port.first_index() + pin))
        } else {
            None
        }
    }

    /// The pin at `index` in the global pin index space.
    pub fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(PinId(index))
        } else {
            None
        }
    }

    /// Every pin on the device, in index order.
    pub fn all() -> impl Iterator<Item = PinId> {
        (0..Self::COUNT as u8).map(PinId)
    }

    pub fn port(self) -> PortId {
        match self.0 {
            0..=7 => PortId::A,
            8..=15 => PortId::B,
            16..=23 => PortId::C,
            24..=31 => PortId::D,
            32..=37 => PortId::E,
            _ => PortId::F,
        }
    }

    /// Pin number within the port, `0..=7`. This is also the bit position of the pin in every
    /// register of its port's bank.
    pub fn pin(self) -> u8 {
        self.0 - self.port().first_index()
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<PinId> for u8 {
    fn from(id: PinId) -> u8 {
        id.0
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "P{}{}", self.port(), self.pin())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Logic level driven by an output pin right after initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Internal resistor of an input pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resistor {
    Off,
    PullUp,
    PullDown,
}

/// The role a pin plays: plain digital I/O, analog input, or one of the peripheral functions
/// routed through the pin multiplexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Digital I/O through the GPIO data register.
    Dio,
    /// Analog input (ADC). Disables the digital buffer.
    Analog,
    Can,
    /// General-purpose timer capture/compare.
    Gpt,
    I2c,
    /// Motion-control PWM module 0.
    Pwm,
    /// Synchronous serial interface.
    Ssi,
    Uart,
}

/// The configuration of one physical pin.
///
/// `initial_value` only matters for outputs and `resistor` only for inputs; the other field is
/// carried but ignored when the pin is programmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    pub direction: Direction,
    pub initial_value: Level,
    pub resistor: Resistor,
    pub mode: PinMode,
    /// Whether `Port::set_pin_direction` may change this pin at run time.
    pub direction_changeable: bool,
    /// Whether `Port::set_pin_mode` may change this pin at run time.
    pub mode_changeable: bool,
}

impl PinConfig {
    /// A digital input with the given resistor.
    pub const fn input(resistor: Resistor) -> Self {
        Self {
            direction: Direction::Input,
            initial_value: Level::Low,
            resistor,
            mode: PinMode::Dio,
            direction_changeable: false,
            mode_changeable: false,
        }
    }

    /// A digital output driving `initial_value` once configured.
    pub const fn output(initial_value: Level) -> Self {
        Self {
            direction: Direction::Output,
            initial_value,
            resistor: Resistor::Off,
            mode: PinMode::Dio,
            direction_changeable: false,
            mode_changeable: false,
        }
    }

    pub const fn with_mode(self, mode: PinMode) -> Self {
        Self { mode, ..self }
    }

    pub const fn direction_changeable(self, changeable: bool) -> Self {
        Self {
            direction_changeable: changeable,
            ..self
        }
    }

    pub const fn mode_changeable(self, changeable: bool) -> Self {
        Self {
            mode_changeable: changeable,
            ..self
        }
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self::input(Resistor::Off)
    }
}

/// A complete configuration table: one `PinConfig` per physical pin, indexed by `PinId`.
///
/// The table is immutable once built. `Port::init` borrows it for as long as the driver lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigSet {
    pins: [PinConfig; PinId::COUNT],
}

impl ConfigSet {
    /// Build a table directly from its entries, in pin index order.
    pub const fn new(pins: [PinConfig; PinId::COUNT]) -> Self {
        Self { pins }
    }

    /// Start building a table in which every pin is a floating digital input.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn pin(&self, id: PinId) -> &PinConfig {
        &self.pins[id.index()]
    }

    /// Iterate over every pin and its configuration, in pin index order.
    pub fn iter(&self) -> impl Iterator<Item = (PinId, &PinConfig)> {
        PinId::all().zip(self.pins.iter())
    }
}

impl Default for ConfigSet {
    fn default() -> Self {
        Self::new([PinConfig::default(); PinId::COUNT])
    }
}

/// A `ConfigBuilder` assembles a `ConfigSet` by chained calls. Later calls override earlier ones
/// for the same pin.
///
/// ```
/// # use tm4c_port::config::*;
/// let red_led = PinId::new(PortId::F, 1).unwrap();
/// let sw1 = PinId::new(PortId::F, 4).unwrap();
/// let config = ConfigSet::builder()
///     .pin(red_led, PinConfig::output(Level::Low))
///     .pin(sw1, PinConfig::input(Resistor::PullUp))
///     .build();
/// assert_eq!(config.pin(sw1).resistor, Resistor::PullUp);
/// ```
#[must_use = "The table is not usable until built"]
pub struct ConfigBuilder {
    pins: [PinConfig; PinId::COUNT],
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            pins: [PinConfig::default(); PinId::COUNT],
        }
    }

    /// Set the configuration of a single pin.
    pub fn pin(mut self, id: PinId, cfg: PinConfig) -> Self {
        self.pins[id.index()] = cfg;
        self
    }

    /// Set every pin yielded by `pins` to the same configuration.
    pub fn pins<I>(mut self, pins: I, cfg: PinConfig) -> Self
    where
        I: IntoIterator<Item = PinId>,
    {
        for id in pins {
            self.pins[id.index()] = cfg;
        }
        self
    }

    /// Set every bonded pin of `port` to the same configuration.
    pub fn port(self, port: PortId, cfg: PinConfig) -> Self {
        self.pins((0..port.pin_count()).filter_map(|pin| PinId::new(port, pin)), cfg)
    }

    pub fn build(self) -> ConfigSet {
        ConfigSet::new(self.pins)
    }
}
