//! Module identification and the diagnostic sink that development errors are reported to.

use crate::error::PortError;

/// Module id of the Port driver.
pub const PORT_MODULE_ID: u16 = 124;
/// Vendor id of this implementation.
pub const PORT_VENDOR_ID: u16 = 1000;
/// The driver has a single instance.
pub const PORT_INSTANCE_ID: u8 = 0;

/// The driver services, as identified in error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceId {
    Init,
    SetPinDirection,
    RefreshPortDirection,
    GetVersionInfo,
    SetPinMode,
    /// A data bit read or written through a `PortPin`.
    PinLevel,
}

impl From<ServiceId> for u8 {
    fn from(service: ServiceId) -> u8 {
        match service {
            ServiceId::Init => 0x00,
            ServiceId::SetPinDirection => 0x01,
            ServiceId::RefreshPortDirection => 0x02,
            ServiceId::GetVersionInfo => 0x03,
            ServiceId::SetPinMode => 0x04,
            ServiceId::PinLevel => 0x05,
        }
    }
}

/// Module and version identification, as filled in by `Port::get_version_info`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VersionInfo {
    pub vendor_id: u16,
    pub module_id: u16,
    pub sw_major_version: u8,
    pub sw_minor_version: u8,
    pub sw_patch_version: u8,
}

/// The identification of this build of the driver.
pub const VERSION_INFO: VersionInfo = VersionInfo {
    vendor_id: PORT_VENDOR_ID,
    module_id: PORT_MODULE_ID,
    sw_major_version: 1,
    sw_minor_version: 0,
    sw_patch_version: 0,
};

/// The external collaborator that development errors are reported to. The driver never looks at
/// what the sink does with a report.
pub trait DiagnosticSink {
    fn report_error(&mut self, module_id: u16, instance_id: u8, service_id: u8, error_id: u8);
}

impl<'a, S: DiagnosticSink + ?Sized> DiagnosticSink for &'a mut S {
    fn report_error(&mut self, module_id: u16, instance_id: u8, service_id: u8, error_id: u8) {
        (**self).report_error(module_id, instance_id, service_id, error_id)
    }
}

/// Discards every report.
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report_error(&mut self, _module_id: u16, _instance_id: u8, _service_id: u8, _error_id: u8) {
    }
}

/// Forwards every report to the `log` facade at error level.
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report_error(&mut self, module_id: u16, instance_id: u8, service_id: u8, error_id: u8) {
        log::error!(
            "development error: module {} instance {} service {:#04x} error {:#04x}",
            module_id,
            instance_id,
            service_id,
            error_id
        );
    }
}

/// Report `error` raised by `service` to `sink`, if development error detection is enabled.
pub(crate) fn report<S: DiagnosticSink>(sink: &mut S, service: ServiceId, error: PortError) {
    log::warn!("{:?} failed: {}", service, error);
    #[cfg(feature = "dev-error-detect")]
    sink.report_error(
        PORT_MODULE_ID,
        PORT_INSTANCE_ID,
        service.into(),
        error.into(),
    );
    #[cfg(not(feature = "dev-error-detect"))]
    let _ = sink;
}

#[cfg(test)]
pub(crate) mod test_spy {
    //! A sink for use in unit tests that records every report.

    use super::DiagnosticSink;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Report {
        pub module_id: u16,
        pub instance_id: u8,
        pub service_id: u8,
        pub error_id: u8,
    }

    pub struct RecordingSink {
        reports: Arc<Mutex<Vec<Report>>>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self {
                reports: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn split(&self) -> Self {
            Self {
                reports: self.reports.clone(),
            }
        }

        pub fn reports(&self) -> Vec<Report> {
            self.reports.lock().unwrap().clone()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn report_error(&mut self, module_id: u16, instance_id: u8, service_id: u8, error_id: u8) {
            self.reports.lock().unwrap().push(Report {
                module_id,
                instance_id,
                service_id,
                error_id,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_spy::{RecordingSink, Report};
    use super::*;

    #[test]
    fn service_ids() {
        assert_eq!(u8::from(ServiceId::Init), 0x00);
        assert_eq!(u8::from(ServiceId::RefreshPortDirection), 0x02);
        assert_eq!(u8::from(ServiceId::SetPinMode), 0x04);
        assert_eq!(u8::from(ServiceId::PinLevel), 0x05);
    }

    #[cfg(feature = "dev-error-detect")]
    #[test]
    fn report_reaches_sink() {
        let sink = RecordingSink::new();
        report(&mut sink.split(), ServiceId::SetPinMode, PortError::ModeUnchangeable);
        assert_eq!(
            sink.reports(),
            vec![Report {
                module_id: 124,
                instance_id: 0,
                service_id: 0x04,
                error_id: 0x0E,
            }]
        );
    }

    #[test]
    fn version_info_identifies_module() {
        assert_eq!(VERSION_INFO.module_id, PORT_MODULE_ID);
        assert_eq!(VERSION_INFO.vendor_id, PORT_VENDOR_ID);
        assert_eq!(
            (
                VERSION_INFO.sw_major_version,
                VERSION_INFO.sw_minor_version,
                VERSION_INFO.sw_patch_version
            ),
            (1, 0, 0)
        );
    }

    struct Capture;

    static CAPTURED: std::sync::Mutex<Vec<(log::Level, String)>> =
        std::sync::Mutex::new(Vec::new());

    impl log::Log for Capture {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }
        fn log(&self, record: &log::Record) {
            CAPTURED
                .lock()
                .unwrap()
                .push((record.level(), format!("{}", record.args())));
        }
        fn flush(&self) {}
    }

    #[test]
    fn log_sink_logs_errors() {
        static LOGGER: Capture = Capture;
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);

        LogSink.report_error(PORT_MODULE_ID, PORT_INSTANCE_ID, 0x04, 0x0E);
        let captured = CAPTURED.lock().unwrap();
        assert!(captured.iter().any(|(level, msg)| *level == log::Level::Error
            && msg == "development error: module 124 instance 0 service 0x04 error 0x0e"));
    }
}
