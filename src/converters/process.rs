//! Process conversion, including the Windows process and Windows service
//! extensions.
//!
//! The extensions are built only when the legacy object fills the matching
//! slot ([`Process::windows`], [`WindowsProcess::service`]) and are attached
//! under `extended_properties` only when non-empty.

use super::{non_empty, ConversionContext, ObjectConverter};
use crate::fields::convert_timestamp;
use crate::legacy::{Process, WindowsProcess, WindowsService};
use crate::normalized::NormalizedObject;
use crate::vocab::VocabularyKind;

pub const PROCESS: &str = "process";
pub const WINDOWS_PROCESS_EXT: &str = "windows-process-ext";
pub const WINDOWS_SERVICE_EXT: &str = "windows-service-ext";

impl ObjectConverter for Process {
    fn convert(&self, ctx: &ConversionContext<'_>) -> NormalizedObject {
        let mut object = NormalizedObject::new(PROCESS);

        object.insert_opt("name", non_empty(&self.name));
        object.insert_opt("pid", self.pid.map(|pid| pid.to_string()));

        if let Some(creation_time) = non_empty(&self.creation_time) {
            match convert_timestamp(creation_time) {
                Some(created) => object.insert("created", created),
                None => {
                    ctx.warn(format!(
                        "process creation_time '{}' is not a valid timestamp, passing it through",
                        creation_time
                    ));
                    object.insert("created", creation_time);
                }
            }
        }

        if let Some(windows) = &self.windows {
            let mut extended_properties = NormalizedObject::empty();

            let process_ext = convert_windows_process(windows, ctx);
            if !process_ext.is_empty() {
                extended_properties.insert_object(WINDOWS_PROCESS_EXT, process_ext);
            }

            if let Some(service) = &windows.service {
                let service_ext = convert_windows_service(service, ctx);
                if !service_ext.is_empty() {
                    extended_properties.insert_object(WINDOWS_SERVICE_EXT, service_ext);
                }
            }

            if !extended_properties.is_empty() {
                object.insert_object("extended_properties", extended_properties);
            }
        }

        object
    }
}

/// Build the `windows-process-ext` mapping
pub fn convert_windows_process(
    process: &WindowsProcess,
    ctx: &ConversionContext<'_>,
) -> NormalizedObject {
    let mut ext = NormalizedObject::empty();

    if let Some(handles) = &process.handle_list {
        for _ in handles {
            ctx.warn("Window handles are not a part of CybOX 3.0");
        }
    }

    ext.insert_opt("asl_enabled", process.aslr_enabled);
    ext.insert_opt("dep_enabled", process.dep_enabled);
    ext.insert_opt("priority", non_empty(&process.priority));
    ext.insert_opt("owner_sid", non_empty(&process.security_type));
    ext.insert_opt("window_title", non_empty(&process.window_title));

    if process.startup_info.as_ref().is_some_and(|info| !info.is_null()) {
        ctx.warn("process:startup_info not handled yet");
    }

    ext
}

/// Build the `windows-service-ext` mapping
pub fn convert_windows_service(
    service: &WindowsService,
    ctx: &ConversionContext<'_>,
) -> NormalizedObject {
    let mut ext = NormalizedObject::empty();
    let vocabularies = ctx.vocabularies();

    ext.insert_opt("service_name", non_empty(&service.service_name));

    if let Some(descriptions) = service.description_list.as_ref().filter(|d| !d.is_empty()) {
        ext.insert("descriptions", descriptions.clone());
    }

    ext.insert_opt("display_name", non_empty(&service.display_name));
    ext.insert_opt("startup_command_line", non_empty(&service.startup_command_line));

    let vocab_fields = [
        ("start_type", &service.start_type, VocabularyKind::ServiceStartType),
        ("service_type", &service.service_type, VocabularyKind::ServiceType),
        ("service_status", &service.service_status, VocabularyKind::ServiceStatus),
    ];
    for (key, value, kind) in vocab_fields {
        ext.insert_opt(key, non_empty(value).map(|v| vocabularies.map(kind, v)));
    }

    if non_empty(&service.service_dll).is_some() {
        ctx.warn("WinServiceObject.service_dll is not handled, yet.");
    }

    ext
}
