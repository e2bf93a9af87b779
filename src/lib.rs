//! Port driver for the GPIO pin multiplexer of the TI TM4C123GH6PM.
//!
//! The TM4C123GH6PM has 43 GPIO pins spread across six ports (A through F). Every pin can be a
//! digital input or output, and most can be handed to a peripheral (UART, SSI, I2C, CAN, timers,
//! PWM) or to the ADC instead. Which role a pin plays, and its electrical characteristics, are
//! selected through a bank of memory-mapped registers per port.
//!
//! This driver takes a static table describing the role of every pin and programs the registers
//! accordingly, once, at startup. It is intended to run before any other driver touches the pins.
//!
//! # Construction
//!
//! To set up the driver:
//!
//! - Build a [`ConfigSet`], the table with one [`PinConfig`] per pin. Usually this comes from a
//!   code generator; [`ConfigSet::builder`] is convenient for writing one by hand.
//! - Obtain a [`RegisterInterface`]. On the device this is the [`MmioInterface`], which performs
//!   volatile accesses at the hardware addresses.
//! - Pick a [`DiagnosticSink`] for development errors, for example [`LogSink`].
//! - Construct a [`Port`] and call [`Port::init`] with the table.
//!
//! ```
//! # use tm4c_port::config::*;
//! # use tm4c_port::diagnostics::NoopSink;
//! # let iface = tm4c_port::interface::noop::NoopInterface;
//! let uart0 = PinConfig::input(Resistor::Off).with_mode(PinMode::Uart);
//! let config = ConfigSet::builder()
//!     .pin(PinId::new(PortId::A, 0).unwrap(), uart0)
//!     .pin(PinId::new(PortId::A, 1).unwrap(), uart0)
//!     .pin(PinId::new(PortId::F, 1).unwrap(), PinConfig::output(Level::Low))
//!     .pin(PinId::new(PortId::F, 4).unwrap(), PinConfig::input(Resistor::PullUp))
//!     .build();
//!
//! let mut port = tm4c_port::Port::new(iface, NoopSink);
//! port.init(Some(&config))?;
//! # Ok::<(), tm4c_port::PortError>(())
//! ```
//!
//! # How a pin is programmed
//!
//! For each pin, in index order:
//!
//! 1. PD7 and PF0 are locked at reset. For them the commit register is unlocked and the pin's
//!    commit bit set. The JTAG pins PC0..PC3 are never unlocked, so the debug port survives
//!    whatever the table says about them.
//! 2. The direction is set. Outputs get their initial level, inputs their pull resistor.
//! 3. Analog pins get the analog buffer and lose the digital one; every other pin is digital.
//! 4. Pins routed to a peripheral get the alternate function enabled and the function-select
//!    code for that peripheral on that pin (see [`mux::function_select`]).
//!
//! # Run-time services
//!
//! Once initialized, the driver can change the direction ([`Port::set_pin_direction`]) or the
//! mode ([`Port::set_pin_mode`]) of pins the table marks as changeable, and can re-apply the
//! configured directions ([`Port::refresh_port_direction`]).
//!
//! To use the services from several contexts, or to hand configured pins to `embedded-hal`
//! drivers, convert the driver into a [`SharedPort`]:
//!
//! ```
//! # use tm4c_port::config::*;
//! # use tm4c_port::diagnostics::NoopSink;
//! # let iface = tm4c_port::interface::noop::NoopInterface;
//! # use embedded_hal::digital::v2::OutputPin;
//! let red_led = PinId::new(PortId::F, 1).unwrap();
//! let config = ConfigSet::builder()
//!     .pin(red_led, PinConfig::output(Level::Low))
//!     .build();
//! let mut port = tm4c_port::Port::new(iface, NoopSink);
//! port.init(Some(&config))?;
//!
//! let io = port.into_shared::<tm4c_port::DefaultMutex<_>>();
//! let mut led = io.port_pin(red_led);
//! led.set_high()?;
//! # Ok::<(), tm4c_port::PortError>(())
//! ```
//!
//! # Development errors
//!
//! Every service validates its arguments and the module state. Errors are returned to the caller
//! and, when the `dev-error-detect` feature is enabled, reported to the [`DiagnosticSink`] with
//! the module id, service id and error code.
//!
//! # Cargo features
//!
//! - `dev-error-detect`: report development errors to the diagnostic sink.
//! - `set-pin-direction-api`, `set-pin-mode-api`, `refresh-port-direction-api`,
//!   `version-info-api`: enable the corresponding optional services.
//! - `std` / `cortexm`: select the [`DefaultMutex`] used by [`SharedPort`].
//! - `unproven`: implement the `unproven` `embedded-hal` traits (`InputPin`,
//!   `StatefulOutputPin`, `ToggleableOutputPin`) on [`PortPin`].
//! - `defmt`: derive `defmt::Format` for the public types.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
extern crate proptest;

extern crate embedded_hal as hal;

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interface;
pub mod mutex;
pub mod mux;
pub mod port;
pub mod registers;

pub use config::{ConfigSet, Direction, Level, PinConfig, PinId, PinMode, PortId, Resistor};
pub use diagnostics::{DiagnosticSink, LogSink, NoopSink};
pub use error::PortError;
pub use interface::mmio::MmioInterface;
pub use interface::RegisterInterface;
#[cfg(any(feature = "std", feature = "cortexm"))]
pub use mutex::DefaultMutex;
pub use mutex::PortMutex;
pub use port::pin::{PinIO, PortPin};
pub use port::shared::SharedPort;
pub use port::{ModuleState, Port};
