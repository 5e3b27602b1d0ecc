//! The plugin session: protocol dispatch over registry, abort state, and
//! tag source.
//!
//! One long-lived session serves the whole host conversation. There are no
//! session-level states beyond "initialized"; the interesting state is
//! per-call: every value retrieval clears the advisory abort flag, and the
//! end-of-edit-batch condition arrives as a sentinel `set_value` call
//! rather than a dedicated entry point.
//!
//! The session is synchronous throughout. Hosts that call in from several
//! threads must serialize access externally (the boundary crate wraps the
//! session in a mutex); the registry itself is read-only after
//! construction.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::abort::AbortState;
use crate::error::{SetError, ValueError};
use crate::field::{FieldFlags, FieldKind, FieldValue};
use crate::registry::FieldRegistry;
use crate::source::TagSource;

/// Log target for session-level protocol tracing.
const SESSION_TARGET: &str = "tagcol::session";

/// Sentinel field index carrying protocol-level meaning: "all fields
/// combined" for the flags query, "end of edit batch" for value assignment.
pub const SENTINEL_INDEX: i32 = -1;

/// Host interface version negotiated at session setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceVersion {
    hi: u32,
    low: u32,
}

impl InterfaceVersion {
    /// Creates a version from the host's two integers.
    #[must_use]
    pub const fn new(hi: u32, low: u32) -> Self {
        Self { hi, low }
    }

    /// Returns the major component.
    #[must_use]
    pub const fn hi(self) -> u32 {
        self.hi
    }

    /// Returns the minor component.
    #[must_use]
    pub const fn low(self) -> u32 {
        self.low
    }
}

/// Session-scoped configuration supplied by the host.
///
/// Stored for collaborators to consult; the session itself loads nothing
/// from the ini file and does not alter dispatch based on the version.
#[derive(Debug, Clone, Default)]
struct SessionConfig {
    ini_name: Option<PathBuf>,
    interface_version: Option<InterfaceVersion>,
}

/// A value retrieved for the host, paired with the field's declared kind so
/// the boundary knows how to marshal it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    kind: FieldKind,
    value: FieldValue,
}

impl Reading {
    /// Returns the declared kind of the field that produced this value.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the retrieved value.
    #[must_use]
    pub const fn value(&self) -> &FieldValue {
        &self.value
    }
}

/// Positive outcome of a value-assignment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The end-of-edit-batch sentinel was acknowledged.
    BatchEnd,
    /// The value was written and saved.
    Written,
}

/// The façade combining registry, abort state, configuration, and tag
/// source into the full request/response protocol.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use tagcol_core::{PluginSession, standard_registry};
/// # use tagcol_core::{SourceError, TagRecord, TagSource};
/// # struct Backend;
/// # impl TagSource for Backend {
/// #     fn open(&self, path: &Path) -> Result<Box<dyn TagRecord>, SourceError> {
/// #         Err(SourceError::Open { path: path.into(), message: String::new() })
/// #     }
/// #     fn detect_string(&self) -> String { String::new() }
/// # }
///
/// let registry = standard_registry().expect("catalog is consistent");
/// let mut session = PluginSession::new(registry, Backend);
/// let reading = session.get_value(Path::new("/music/a.mp3"), 0, 0, 0);
/// ```
#[derive(Debug)]
pub struct PluginSession<S> {
    registry: FieldRegistry,
    abort: AbortState,
    config: SessionConfig,
    source: S,
}

impl<S> PluginSession<S> {
    /// Creates a session over an initialized registry and a tag source.
    #[must_use]
    pub fn new(registry: FieldRegistry, source: S) -> Self {
        Self {
            registry,
            abort: AbortState::new(),
            config: SessionConfig::default(),
            source,
        }
    }

    /// Returns the field registry.
    #[must_use]
    pub const fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Returns `true` while an advisory cancel is recorded.
    ///
    /// Exposed for field accessors that choose to observe the cooperative
    /// cancel; ignoring it is not a failure.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        self.abort.is_aborted()
    }

    /// Returns the filename the recorded cancel applies to.
    #[must_use]
    pub const fn aborted_filename(&self) -> &str {
        self.abort.filename()
    }

    /// Stores the host-supplied ini path. A repeated identical value is a
    /// no-op; loading the file is a collaborator's responsibility, so no
    /// I/O happens here.
    pub fn set_ini_name(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if self.config.ini_name.as_ref() == Some(&path) {
            return;
        }
        debug!(target: SESSION_TARGET, ini = %path.display(), "ini name set");
        self.config.ini_name = Some(path);
    }

    /// Returns the stored ini path, if the host supplied one.
    #[must_use]
    pub fn ini_name(&self) -> Option<&Path> {
        self.config.ini_name.as_deref()
    }

    /// Records the negotiated host interface version. Stored
    /// unconditionally; informational only, dispatch does not depend on it.
    pub fn set_interface_version(&mut self, hi: u32, low: u32) {
        debug!(target: SESSION_TARGET, hi, low, "interface version negotiated");
        self.config.interface_version = Some(InterfaceVersion::new(hi, low));
    }

    /// Returns the negotiated interface version, if the host reported one.
    #[must_use]
    pub const fn interface_version(&self) -> Option<InterfaceVersion> {
        self.config.interface_version
    }

    /// Looks up field metadata for the host's enumeration loop.
    ///
    /// The host starts at index 0 and increments per call until `None`
    /// ("no more fields") is observed; there is no separate count call.
    #[must_use]
    pub fn supported_field(&self, index: i32) -> Option<&crate::field::Field> {
        self.registry.get(index)
    }

    /// Answers the host's capability query.
    ///
    /// [`SENTINEL_INDEX`] means "all fields combined" and yields the
    /// aggregate flags; any other out-of-range index yields `None`
    /// ("no more fields").
    #[must_use]
    pub fn supported_field_flags(&self, index: i32) -> Option<FieldFlags> {
        if index == SENTINEL_INDEX {
            return Some(self.registry.aggregate_flags());
        }
        self.registry.get(index).map(crate::field::Field::flags)
    }

    /// Records the host's advisory cancel for `filename`.
    ///
    /// Nothing in flight is preempted; the intent is only recorded so a
    /// cooperating accessor can short-circuit expensive work.
    pub fn stop_get_value(&mut self, filename: impl Into<String>) {
        let filename = filename.into();
        debug!(target: SESSION_TARGET, file = %filename, "retrieval cancel recorded");
        self.abort.set(filename);
    }
}

impl<S: TagSource> PluginSession<S> {
    /// Returns the signature string the host uses to decide which files
    /// this plugin claims. Pure and deterministic.
    #[must_use]
    pub fn detect_string(&self) -> String {
        self.source.detect_string()
    }

    /// Retrieves one field's value from one file.
    ///
    /// A negative `unit_index` is reported as a diagnostic but does not
    /// reject the call; the host's value is used as supplied. Any prior
    /// abort state is cleared before delegation: a new retrieval request
    /// implicitly supersedes a previous cancel.
    ///
    /// # Errors
    ///
    /// [`ValueError::NoSuchField`] when `field_index` names no registered
    /// field, [`ValueError::Source`] when the file cannot be opened, and
    /// [`ValueError::Empty`] when the file opened but carries no data for
    /// this field.
    pub fn get_value(
        &mut self,
        path: &Path,
        field_index: i32,
        unit_index: i32,
        flags: u32,
    ) -> Result<Reading, ValueError> {
        debug!(
            target: SESSION_TARGET,
            file = %path.display(),
            field_index,
            unit_index,
            flags,
            "value requested"
        );

        if unit_index < 0 {
            warn!(target: SESSION_TARGET, unit_index, "negative unit index supplied by host");
        }

        let field = self
            .registry
            .get(field_index)
            .ok_or(ValueError::NoSuchField { index: field_index })?;

        self.abort.clear();

        let record = self.source.open(path)?;
        let value = field.read(record.as_ref()).ok_or(ValueError::Empty)?;
        Ok(Reading {
            kind: field.kind(),
            value,
        })
    }

    /// Assigns one field's value, or acknowledges the end of an edit batch.
    ///
    /// The sentinel shape — no file path **or** `field_index` equal to
    /// [`SENTINEL_INDEX`] — signals end-of-batch: the source's flush hook
    /// runs once and the call reports [`SetOutcome::BatchEnd`]. The OR is
    /// the behavior the reference host drives; see DESIGN notes.
    ///
    /// # Errors
    ///
    /// [`SetError::NoSuchField`] for an unregistered index,
    /// [`SetError::ReadOnly`] for a field without a write accessor,
    /// [`SetError::InvalidValue`] for a type mismatch, and
    /// [`SetError::Source`] when the file cannot be opened or saved.
    pub fn set_value(
        &mut self,
        path: Option<&Path>,
        field_index: i32,
        unit_index: i32,
        value: Option<&FieldValue>,
        flags: u32,
    ) -> Result<SetOutcome, SetError> {
        let path = match path {
            Some(path) if field_index != SENTINEL_INDEX => path,
            _ => {
                debug!(target: SESSION_TARGET, "end of edit batch");
                self.source.end_of_batch();
                return Ok(SetOutcome::BatchEnd);
            }
        };

        debug!(
            target: SESSION_TARGET,
            file = %path.display(),
            field_index,
            unit_index,
            flags,
            "value assignment requested"
        );

        let field = self
            .registry
            .get(field_index)
            .ok_or(SetError::NoSuchField { index: field_index })?;

        let value = value.ok_or_else(|| SetError::InvalidValue {
            name: field.name().to_owned(),
            message: String::from("no value supplied"),
        })?;

        let mut record = self.source.open(path)?;
        field.write(record.as_mut(), value)?;
        record.save()?;
        Ok(SetOutcome::Written)
    }

    /// Invokes the teardown hook. The host must issue no further calls on
    /// this session afterwards.
    pub fn plugin_unloading(&self) {
        debug!(target: SESSION_TARGET, "plugin unloading");
        self.source.unloading();
    }
}
