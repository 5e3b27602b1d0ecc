//! The exported content-plugin entry points.
//!
//! One process-wide [`PluginSession`] sits behind a mutex; the host may
//! call in from several threads, and the interface itself carries no
//! session handle. Every export follows the same shape: view the host's
//! buffers through [`crate::marshal`], delegate to the session, and map
//! the outcome onto an integer code from [`crate::codes`]. No failure of
//! any kind may cross the boundary, so each body runs under a panic
//! containment wrapper that logs and answers the entry point's most
//! conservative code.

#![expect(
    non_snake_case,
    reason = "the host resolves exports by these exact names"
)]

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use libc::{c_char, c_int, c_void};
use once_cell::sync::Lazy;
use tracing::error;

use tagcol_core::{
    FieldKind, FieldRegistry, FieldValue, PluginSession, Reading, SENTINEL_INDEX,
    standard_registry,
};
use tagcol_lofty::LoftySource;

use crate::codes;
use crate::marshal;

/// Log target for boundary tracing.
const WDX_TARGET: &str = "tagcol::wdx";

/// Capacity of the ini path in the host's parameter block.
pub const MAX_PATH: usize = 260;

/// Parameter block the host passes once shortly after loading the plugin.
#[repr(C)]
pub struct ContentDefaultParamStruct {
    /// Size of this block as the host compiled it.
    pub size: c_int,
    /// Minor component of the host's interface version.
    pub plugin_interface_version_low: u32,
    /// Major component of the host's interface version.
    pub plugin_interface_version_hi: u32,
    /// NUL-terminated path of the ini file the host suggests for settings.
    pub default_ini_name: [c_char; MAX_PATH],
}

static SESSION: Lazy<Mutex<PluginSession<LoftySource>>> =
    Lazy::new(|| Mutex::new(build_session()));

fn build_session() -> PluginSession<LoftySource> {
    let registry = standard_registry().unwrap_or_else(|err| {
        error!(target: WDX_TARGET, error = %err, "field catalog failed to initialise");
        FieldRegistry::new()
    });
    PluginSession::new(registry, LoftySource::new())
}

/// Runs `operate` over the shared session.
///
/// A poisoned mutex is recovered rather than propagated: the session holds
/// no invariant that a panicked entry point could have left half-applied
/// in a way later calls cannot tolerate.
fn with_session<R>(operate: impl FnOnce(&mut PluginSession<LoftySource>) -> R) -> R {
    let mut guard = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    operate(&mut guard)
}

/// Runs an entry point body, translating any unwind into `fallback`.
fn contained<R>(entry: &'static str, fallback: R, body: impl FnOnce() -> R) -> R {
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result,
        Err(_) => {
            error!(
                target: WDX_TARGET,
                entry,
                "unexpected failure contained at the boundary"
            );
            fallback
        }
    }
}

fn flags_bits(flags: c_int) -> u32 {
    u32::try_from(flags).unwrap_or_default()
}

/// Writes the detect string the host uses to route files to this plugin.
///
/// # Safety
///
/// `detect_string`, when non-null, must point to `maxlen` writable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn ContentGetDetectString(
    detect_string: *mut c_char,
    maxlen: c_int,
) -> c_int {
    contained("ContentGetDetectString", 0, || {
        // SAFETY: capacity per this export's contract.
        if let Some(buffer) = unsafe { marshal::narrow_out(detect_string, maxlen) } {
            let detect = with_session(|session| session.detect_string());
            marshal::copy_narrow(buffer, &detect);
        }
        0
    })
}

/// Accepts the host's parameter block: ini path and interface version.
///
/// An undersized block is logged and ignored; its tail cannot be trusted.
///
/// # Safety
///
/// `dps`, when non-null, must point to a readable block of at least the
/// size its own `size` member declares.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn ContentSetDefaultParams(dps: *const ContentDefaultParamStruct) {
    contained("ContentSetDefaultParams", (), || {
        if dps.is_null() {
            return;
        }
        // SAFETY: non-null and readable per this export's contract.
        let params = unsafe { &*dps };
        let declared = usize::try_from(params.size).unwrap_or_default();
        if declared < size_of::<ContentDefaultParamStruct>() {
            error!(target: WDX_TARGET, declared, "undersized parameter block ignored");
            return;
        }
        let ini = marshal::narrow_array_to_string(&params.default_ini_name);
        with_session(|session| {
            session.set_interface_version(
                params.plugin_interface_version_hi,
                params.plugin_interface_version_low,
            );
            session.set_ini_name(ini);
        });
    });
}

/// Answers one step of the host's field enumeration loop.
///
/// Returns the field's type code, or "no more fields" past the last index.
///
/// # Safety
///
/// `field_name` and `units`, when non-null, must each point to `maxlen`
/// writable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn ContentGetSupportedField(
    field_index: c_int,
    field_name: *mut c_char,
    units: *mut c_char,
    maxlen: c_int,
) -> c_int {
    contained("ContentGetSupportedField", codes::FT_NOMOREFIELDS, || {
        with_session(|session| {
            let Some(field) = session.supported_field(field_index) else {
                return codes::FT_NOMOREFIELDS;
            };
            // SAFETY: capacity per this export's contract.
            if let Some(buffer) = unsafe { marshal::narrow_out(field_name, maxlen) } {
                marshal::copy_narrow(buffer, field.name());
            }
            // SAFETY: capacity per this export's contract.
            if let Some(buffer) = unsafe { marshal::narrow_out(units, maxlen) } {
                marshal::copy_narrow(buffer, &field.units_text());
            }
            codes::field_kind_code(field.kind())
        })
    })
}

/// Retrieves one field of one file, narrow-path variant.
///
/// # Safety
///
/// `file_name`, when non-null, must be NUL-terminated; `field_value`, when
/// non-null, must point to `maxlen` writable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn ContentGetValue(
    file_name: *const c_char,
    field_index: c_int,
    unit_index: c_int,
    field_value: *mut c_void,
    maxlen: c_int,
    flags: c_int,
) -> c_int {
    contained("ContentGetValue", codes::FT_FILEERROR, || {
        // SAFETY: NUL-terminated or null per this export's contract.
        let Some(path) = (unsafe { marshal::narrow_in(file_name) }) else {
            return codes::FT_FILEERROR;
        };
        // SAFETY: value buffer capacity per this export's contract.
        unsafe {
            retrieve(
                Path::new(&path),
                field_index,
                unit_index,
                field_value,
                maxlen,
                flags,
            )
        }
    })
}

/// Retrieves one field of one file, wide-path variant.
///
/// # Safety
///
/// `file_name`, when non-null, must be a NUL-terminated UTF-16 buffer;
/// `field_value`, when non-null, must point to `maxlen` writable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn ContentGetValueW(
    file_name: *const u16,
    field_index: c_int,
    unit_index: c_int,
    field_value: *mut c_void,
    maxlen: c_int,
    flags: c_int,
) -> c_int {
    contained("ContentGetValueW", codes::FT_FILEERROR, || {
        // SAFETY: NUL-terminated or null per this export's contract.
        let Some(path) = (unsafe { marshal::wide_in(file_name) }) else {
            return codes::FT_FILEERROR;
        };
        // SAFETY: value buffer capacity per this export's contract.
        unsafe {
            retrieve(
                Path::new(&path),
                field_index,
                unit_index,
                field_value,
                maxlen,
                flags,
            )
        }
    })
}

/// Assigns one field of one file, narrow-path variant.
///
/// A null path or the sentinel index acknowledges the end of an edit
/// batch instead of writing anything.
///
/// # Safety
///
/// `file_name` and `field_value`, when non-null, must be NUL-terminated
/// (the latter when `field_type` names a string type) or point to a value
/// of the type `field_type` names.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn ContentSetValue(
    file_name: *const c_char,
    field_index: c_int,
    unit_index: c_int,
    field_type: c_int,
    field_value: *const c_void,
    flags: c_int,
) -> c_int {
    contained("ContentSetValue", codes::FT_FILEERROR, || {
        // SAFETY: NUL-terminated or null per this export's contract.
        let path = unsafe { marshal::narrow_in(file_name) }.map(PathBuf::from);
        // SAFETY: value buffer typed per `field_type`.
        unsafe {
            assign(
                path.as_deref(),
                field_index,
                unit_index,
                field_type,
                field_value,
                flags,
            )
        }
    })
}

/// Assigns one field of one file, wide-path variant.
///
/// # Safety
///
/// As for [`ContentSetValue`], with `file_name` a NUL-terminated UTF-16
/// buffer when non-null.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn ContentSetValueW(
    file_name: *const u16,
    field_index: c_int,
    unit_index: c_int,
    field_type: c_int,
    field_value: *const c_void,
    flags: c_int,
) -> c_int {
    contained("ContentSetValueW", codes::FT_FILEERROR, || {
        // SAFETY: NUL-terminated or null per this export's contract.
        let path = unsafe { marshal::wide_in(file_name) }.map(PathBuf::from);
        // SAFETY: value buffer typed per `field_type`.
        unsafe {
            assign(
                path.as_deref(),
                field_index,
                unit_index,
                field_type,
                field_value,
                flags,
            )
        }
    })
}

/// Answers the host's capability query.
///
/// The sentinel index yields the OR of every field's flags.
#[unsafe(no_mangle)]
pub extern "system" fn ContentGetSupportedFieldFlags(field_index: c_int) -> c_int {
    contained(
        "ContentGetSupportedFieldFlags",
        codes::FT_NOMOREFIELDS,
        || {
            with_session(|session| {
                session
                    .supported_field_flags(field_index)
                    .map_or(codes::FT_NOMOREFIELDS, codes::flags_code)
            })
        },
    )
}

/// Records the host's advisory cancel for a retrieval, narrow variant.
///
/// # Safety
///
/// `file_name`, when non-null, must be NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn ContentStopGetValue(file_name: *const c_char) {
    contained("ContentStopGetValue", (), || {
        // SAFETY: NUL-terminated or null per this export's contract.
        if let Some(path) = unsafe { marshal::narrow_in(file_name) } {
            with_session(|session| session.stop_get_value(path));
        }
    });
}

/// Records the host's advisory cancel for a retrieval, wide variant.
///
/// # Safety
///
/// `file_name`, when non-null, must be a NUL-terminated UTF-16 buffer.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn ContentStopGetValueW(file_name: *const u16) {
    contained("ContentStopGetValueW", (), || {
        // SAFETY: NUL-terminated or null per this export's contract.
        if let Some(path) = unsafe { marshal::wide_in(file_name) } {
            with_session(|session| session.stop_get_value(path));
        }
    });
}

/// Final notification before the host unloads the library.
#[unsafe(no_mangle)]
pub extern "system" fn ContentPluginUnloading() {
    contained("ContentPluginUnloading", (), || {
        with_session(|session| session.plugin_unloading());
    });
}

/// Delegates a retrieval and marshals the reading into the host's buffer.
///
/// # Safety
///
/// `field_value`, when non-null, must point to `maxlen` writable bytes.
unsafe fn retrieve(
    path: &Path,
    field_index: c_int,
    unit_index: c_int,
    field_value: *mut c_void,
    maxlen: c_int,
    flags: c_int,
) -> c_int {
    let outcome =
        with_session(|session| session.get_value(path, field_index, unit_index, flags_bits(flags)));
    match outcome {
        // SAFETY: capacity forwarded per this function's contract.
        Ok(reading) => unsafe { write_reading(&reading, field_value, maxlen) },
        Err(err) => codes::value_error_code(&err),
    }
}

/// Marshals a reading into the host's value buffer.
///
/// Returns the field's type code on success so the host knows how to
/// interpret the buffer.
///
/// # Safety
///
/// `dst`, when non-null, must point to `maxlen` writable bytes.
unsafe fn write_reading(reading: &Reading, dst: *mut c_void, maxlen: c_int) -> c_int {
    let code = codes::field_kind_code(reading.kind());
    match reading.value() {
        FieldValue::Text(text) if reading.kind() == FieldKind::WideText => {
            #[expect(
                clippy::integer_division,
                reason = "byte capacity halves to UTF-16 unit capacity"
            )]
            let units = maxlen / 2;
            // SAFETY: unit count derived from the byte capacity contract.
            let Some(buffer) = (unsafe { marshal::wide_out(dst.cast::<u16>(), units) }) else {
                return codes::FT_FILEERROR;
            };
            marshal::copy_wide(buffer, text);
            code
        }
        FieldValue::Text(text) => {
            // SAFETY: capacity per this function's contract.
            let Some(buffer) = (unsafe { marshal::value_out(dst, maxlen) }) else {
                return codes::FT_FILEERROR;
            };
            marshal::copy_narrow(buffer, text);
            code
        }
        FieldValue::Numeric(value) => {
            // SAFETY: capacity per this function's contract.
            let Some(buffer) = (unsafe { marshal::value_out(dst, maxlen) }) else {
                return codes::FT_FILEERROR;
            };
            if marshal::copy_numeric(buffer, *value) {
                code
            } else {
                codes::FT_FILEERROR
            }
        }
    }
}

/// Delegates an assignment, decoding the host's value buffer first.
///
/// # Safety
///
/// `field_value`, when non-null, must point to a value of the type
/// `field_type` names.
unsafe fn assign(
    path: Option<&Path>,
    field_index: c_int,
    unit_index: c_int,
    field_type: c_int,
    field_value: *const c_void,
    flags: c_int,
) -> c_int {
    let closing = path.is_none() || field_index == SENTINEL_INDEX;
    let value = if closing {
        None
    } else {
        // SAFETY: typed per this function's contract.
        match unsafe { decode_value(field_type, field_value) } {
            Some(value) => Some(value),
            None => return codes::FT_FILEERROR,
        }
    };
    let outcome = with_session(|session| {
        session.set_value(
            path,
            field_index,
            unit_index,
            value.as_ref(),
            flags_bits(flags),
        )
    });
    match outcome {
        Ok(_) => codes::FT_SETSUCCESS,
        Err(err) => codes::set_error_code(&err),
    }
}

/// Decodes the host's value buffer per the type code the host declares.
///
/// The host echoes back the type the field was enumerated with, so an
/// unrecognised code means a miswired call and decodes to nothing.
///
/// # Safety
///
/// `value`, when non-null, must point to a value of the type `field_type`
/// names: NUL-terminated narrow or wide text, or a 32-bit integer.
unsafe fn decode_value(field_type: c_int, value: *const c_void) -> Option<FieldValue> {
    match field_type {
        // SAFETY: NUL-terminated UTF-16 per this function's contract.
        codes::FT_STRINGW => unsafe { marshal::wide_in(value.cast::<u16>()) }.map(FieldValue::Text),
        codes::FT_STRING | codes::FT_FULLTEXT | codes::FT_MULTIPLECHOICE => {
            // SAFETY: NUL-terminated narrow text per this function's contract.
            unsafe { marshal::narrow_in(value.cast::<c_char>()) }.map(FieldValue::Text)
        }
        // SAFETY: four readable bytes per this function's contract.
        codes::FT_NUMERIC_32 => unsafe { marshal::numeric_in(value) }.map(FieldValue::Numeric),
        _ => None,
    }
}
