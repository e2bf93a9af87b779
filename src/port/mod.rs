//! The Port driver. This provides the `Port` type, the context object that owns the register
//! interface and diagnostic sink, holds the module state, and implements every driver service.

#[cfg(feature = "set-pin-direction-api")]
use crate::config::Direction;
use crate::config::{ConfigSet, PinId};
#[cfg(feature = "set-pin-mode-api")]
use crate::config::PinMode;
use crate::diagnostics::{report, DiagnosticSink, ServiceId};
#[cfg(feature = "version-info-api")]
use crate::diagnostics::{VersionInfo, VERSION_INFO};
use crate::error::PortError;
use crate::interface::RegisterInterface;
use crate::mutex::PortMutex;
#[cfg(feature = "set-pin-mode-api")]
use crate::mux;
use crate::port::bank::RegisterBank;
use crate::port::shared::SharedPort;
use crate::registers::Register;

mod bank;
pub mod pin;
mod program;
pub mod shared;

/// Whether `Port::init` has completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModuleState {
    NotInitialized,
    Initialized,
}

/// The Port driver.
///
/// Holds the module state and a reference to the active configuration table. The table is
/// borrowed for `'c` and only ever read after `init`.
pub struct Port<'c, RI: RegisterInterface, S: DiagnosticSink> {
    iface: RI,
    sink: S,
    state: ModuleState,
    config: Option<&'c ConfigSet>,
}

impl<'c, RI: RegisterInterface, S: DiagnosticSink> Port<'c, RI, S> {
    /// Create an uninitialized driver.
    ///
    /// Takes ownership of the `RegisterInterface` used to reach the GPIO registers and of the
    /// `DiagnosticSink` that development errors are reported to.
    pub fn new(iface: RI, sink: S) -> Self {
        Self {
            iface,
            sink,
            state: ModuleState::NotInitialized,
            config: None,
        }
    }

    pub fn state(&self) -> ModuleState {
        self.state
    }

    /// The configuration table published by `init`, if any.
    pub fn config(&self) -> Option<&'c ConfigSet> {
        self.config
    }

    /// Tear the driver down, giving back the interface and the sink.
    pub fn release(self) -> (RI, S) {
        (self.iface, self.sink)
    }

    /// Convert this driver into a [`SharedPort`], which serializes access through the mutex `M`
    /// and hands out `embedded-hal` pins.
    pub fn into_shared<M: PortMutex<Self>>(self) -> SharedPort<'c, M, RI, S> {
        SharedPort::new(self)
    }

    /// Initialize the driver and program every pin according to `config`.
    ///
    /// `None` stands for a missing configuration table: it is reported as
    /// [`PortError::ParamConfig`] and nothing else happens. Otherwise the table is published,
    /// the module becomes initialized, and each pin in the table is programmed in index order.
    /// Calling `init` again with the same table leaves the registers in the same state.
    ///
    /// ```
    /// # use tm4c_port::config::*;
    /// # use tm4c_port::diagnostics::NoopSink;
    /// # use tm4c_port::interface::noop::NoopInterface;
    /// # use tm4c_port::port::{ModuleState, Port};
    /// let config = ConfigSet::builder()
    ///     .pin(PinId::new(PortId::F, 1).unwrap(), PinConfig::output(Level::Low))
    ///     .build();
    /// let mut port = Port::new(NoopInterface, NoopSink);
    /// port.init(Some(&config)).unwrap();
    /// assert_eq!(port.state(), ModuleState::Initialized);
    /// ```
    pub fn init(&mut self, config: Option<&'c ConfigSet>) -> Result<(), PortError> {
        let config = match config {
            Some(config) => config,
            None => return Err(self.fail(ServiceId::Init, PortError::ParamConfig)),
        };
        self.config = Some(config);
        self.state = ModuleState::Initialized;

        for (id, cfg) in config.iter() {
            program::program_pin(&mut self.iface, id, cfg);
        }
        log::info!("initialized {} pins", PinId::COUNT);
        Ok(())
    }

    /// Change the direction of a pin at run time. Only the direction bit is touched; resistor,
    /// level, buffer and routing stay as configured.
    ///
    /// `pin` is an index in the global pin index space (see [`PinId`]). The pin must be
    /// configured as direction-changeable.
    #[cfg(feature = "set-pin-direction-api")]
    pub fn set_pin_direction(&mut self, pin: u8, direction: Direction) -> Result<(), PortError> {
        let service = ServiceId::SetPinDirection;
        let config = self.configured(service)?;
        let id = self.pin_id(service, pin)?;
        if !config.pin(id).direction_changeable {
            return Err(self.fail(service, PortError::DirectionUnchangeable));
        }
        log::debug!("{}: direction -> {:?}", id, direction);
        self.bank(id).assign_bit(
            Register::Direction,
            id.pin(),
            direction == Direction::Output,
        );
        Ok(())
    }

    /// Re-apply the configured direction of every pin, along with the resistor of inputs and the
    /// initial level of outputs. Buffer selection and routing are not touched.
    #[cfg(feature = "refresh-port-direction-api")]
    pub fn refresh_port_direction(&mut self) -> Result<(), PortError> {
        let config = self.configured(ServiceId::RefreshPortDirection)?;
        for (id, cfg) in config.iter() {
            let mut bank = RegisterBank::new(&mut self.iface, id.port());
            program::apply_direction(&mut bank, id, cfg);
        }
        Ok(())
    }

    /// Fill `info` with the identification of this driver.
    #[cfg(feature = "version-info-api")]
    pub fn get_version_info(&mut self, info: Option<&mut VersionInfo>) -> Result<(), PortError> {
        match info {
            Some(info) => {
                *info = VERSION_INFO;
                Ok(())
            }
            None => Err(self.fail(ServiceId::GetVersionInfo, PortError::ParamPointer)),
        }
    }

    /// Change the mode of a pin at run time. The buffer selection and the routing are derived
    /// again from `mode`, replacing the previous function-select code; direction and resistor
    /// stay as configured.
    ///
    /// `pin` is an index in the global pin index space (see [`PinId`]). The pin must be
    /// configured as mode-changeable and `mode` must be available on it.
    #[cfg(feature = "set-pin-mode-api")]
    pub fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), PortError> {
        let service = ServiceId::SetPinMode;
        let config = self.configured(service)?;
        let id = self.pin_id(service, pin)?;
        if !mux::supports_mode(id, mode) {
            return Err(self.fail(service, PortError::ParamInvalidMode));
        }
        if !config.pin(id).mode_changeable {
            return Err(self.fail(service, PortError::ModeUnchangeable));
        }
        log::debug!("{}: mode -> {:?}", id, mode);
        let mut bank = self.bank(id);
        program::apply_buffer(&mut bank, id, mode);
        program::apply_routing(&mut bank, id, mode, program::FieldWrite::Replace);
        Ok(())
    }

    /// Drive the data bit of a pin through the masked data aperture.
    pub(crate) fn write_level(&mut self, id: PinId, high: bool) -> Result<(), PortError> {
        self.configured(ServiceId::PinLevel)?;
        let mask = 1 << id.pin();
        self.bank(id)
            .write(Register::MaskedData(mask), if high { 0xFF } else { 0x00 });
        Ok(())
    }

    /// Read the data bit of a pin through the masked data aperture.
    pub(crate) fn read_level(&mut self, id: PinId) -> Result<bool, PortError> {
        self.configured(ServiceId::PinLevel)?;
        let mask = 1 << id.pin();
        Ok(self.bank(id).read(Register::MaskedData(mask)) != 0)
    }

    fn bank(&mut self, id: PinId) -> RegisterBank<RI> {
        RegisterBank::new(&mut self.iface, id.port())
    }

    fn configured(&mut self, service: ServiceId) -> Result<&'c ConfigSet, PortError> {
        match (self.state, self.config) {
            (ModuleState::Initialized, Some(config)) => Ok(config),
            _ => Err(self.fail(service, PortError::Uninit)),
        }
    }

    #[cfg(any(feature = "set-pin-direction-api", feature = "set-pin-mode-api"))]
    fn pin_id(&mut self, service: ServiceId, pin: u8) -> Result<PinId, PortError> {
        match PinId::from_index(pin) {
            Some(id) => Ok(id),
            None => Err(self.fail(service, PortError::ParamPin)),
        }
    }

    fn fail(&mut self, service: ServiceId, error: PortError) -> PortError {
        report(&mut self.sink, service, error);
        error
    }
}
