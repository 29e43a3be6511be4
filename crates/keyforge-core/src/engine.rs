//! Connection lifecycle and configuration write dispatch.
//!
//! [`DeviceEngine`] owns the snapshot store and the boundary instance for
//! exactly one peripheral. Every public operation is serialized through a
//! single-slot in-flight guard; re-entrant calls are rejected with
//! [`KeyforgeError::Busy`] instead of interleaving requests.

use keyforge_boundary::DeviceBoundary;

use crate::config::EngineConfig;
use crate::diff::{config_delta, describe_fields};
use crate::draft::ConfigDraft;
use crate::error::{KeyforgeError, KeyforgeResult};
use crate::presets::find_preset;
use crate::snapshot::{DeviceSnapshot, InterfaceMode};
use crate::workflow::{event, WorkflowEvent, WorkflowLevel};

/// Result of a configuration save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Live edits matched the baseline; nothing was written.
    NoChanges,
    /// The change-set was written and confirmed by the device.
    Applied { confirmation: String },
}

/// Synchronization engine for a single intermittently-present peripheral.
pub struct DeviceEngine<B: DeviceBoundary> {
    pub(crate) boundary: B,
    pub(crate) config: EngineConfig,
    pub(crate) snapshot: DeviceSnapshot,
    pub(crate) journal: Vec<WorkflowEvent>,
    loading: bool,
}

impl<B: DeviceBoundary> DeviceEngine<B> {
    pub fn new(boundary: B, config: EngineConfig) -> Self {
        Self {
            boundary,
            config,
            snapshot: DeviceSnapshot::default(),
            journal: Vec::new(),
            loading: false,
        }
    }

    pub fn snapshot(&self) -> &DeviceSnapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Advisory busy flag for presentation layers. The engine enforces the
    /// matching exclusion itself; this only signals state.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// All events emitted since the last drain.
    pub fn events(&self) -> &[WorkflowEvent] {
        &self.journal
    }

    pub fn drain_events(&mut self) -> Vec<WorkflowEvent> {
        std::mem::take(&mut self.journal)
    }

    /// Seed an edit draft from the current live configuration.
    pub fn draft(&self) -> ConfigDraft {
        ConfigDraft::from_config(&self.snapshot.config)
    }

    /// Normalize `draft` and stage it as the live configuration.
    ///
    /// Local operation; the baseline and the device are untouched until
    /// [`DeviceEngine::save_config`].
    pub fn stage(&mut self, draft: &ConfigDraft) -> KeyforgeResult<()> {
        self.snapshot.config = draft.resolve()?;
        Ok(())
    }

    /// Record the operator's acknowledgement of the permanent-lock warning.
    pub fn confirm_secure_lock(&mut self, confirmed: bool) {
        self.snapshot.security.lock_confirmed = confirmed;
    }

    /// Re-read ground truth from the device and classify the result.
    pub fn refresh(&mut self) -> KeyforgeResult<()> {
        self.with_guard(Self::refresh_inner)
    }

    /// Overwrite the live vid/pid pair from a named vendor preset.
    ///
    /// The "custom" entry records the selection and leaves the pair as
    /// edited.
    pub fn apply_preset(&mut self, name: &str) -> KeyforgeResult<()> {
        if !self.config.allow_presets {
            return Err(KeyforgeError::Validation(
                "vendor presets are disabled by engine configuration".into(),
            ));
        }
        let preset = find_preset(name).ok_or_else(|| {
            KeyforgeError::Validation(format!("unknown vendor preset {name:?}"))
        })?;

        match preset.ids {
            Some((vid, pid)) => {
                self.snapshot.config.vid = vid.to_string();
                self.snapshot.config.pid = pid.to_string();
                self.emit(
                    WorkflowLevel::Info,
                    format!("vendor preset {name:?} selected (vid {vid}, pid {pid})"),
                );
            }
            None => {
                self.emit(
                    WorkflowLevel::Info,
                    "vendor preset \"custom\" selected; vid/pid left as edited",
                );
            }
        }
        Ok(())
    }

    /// Write the minimal change-set between live edits and the baseline.
    pub fn save_config(&mut self) -> KeyforgeResult<SaveOutcome> {
        self.with_guard(Self::save_config_inner)
    }

    fn save_config_inner(&mut self) -> KeyforgeResult<SaveOutcome> {
        if !self.snapshot.connected || self.snapshot.baseline().is_none() {
            return Err(KeyforgeError::NotConnected);
        }

        let baseline = self.snapshot.baseline().cloned().unwrap_or_default();
        let delta = config_delta(&self.snapshot.config, &baseline);
        if delta.is_empty() {
            self.emit(WorkflowLevel::Info, "configuration matches device; nothing to write");
            return Ok(SaveOutcome::NoChanges);
        }

        for line in describe_fields(&delta) {
            self.emit(WorkflowLevel::Info, format!("queued write: {line}"));
        }

        let mode = self.snapshot.mode;
        let written = match mode {
            InterfaceMode::Rescue => self.boundary.write_config_rescue(&delta),
            InterfaceMode::Fido => self.boundary.write_config_fido(&delta),
        };

        match written {
            Ok(confirmation) => {
                self.emit(
                    WorkflowLevel::Success,
                    format!("configuration written ({} mode): {confirmation}", mode.as_str()),
                );
                // Never assume the write applied cleanly; the follow-up
                // refresh re-reads ground truth and recaptures the baseline.
                // Its own failure path already journals and degrades state.
                let _ = self.refresh_inner();
                Ok(SaveOutcome::Applied { confirmation })
            }
            Err(err) => {
                self.emit(
                    WorkflowLevel::Error,
                    format!("configuration write failed: {err}"),
                );
                Err(KeyforgeError::Boundary(err.to_string()))
            }
        }
    }

    pub(crate) fn refresh_inner(&mut self) -> KeyforgeResult<()> {
        self.emit(WorkflowLevel::Info, "refreshing device status");

        match self.boundary.device_status() {
            Ok(payload) => {
                let was_connected = self.snapshot.connected;
                self.snapshot.apply_status(payload);

                // Independent request; failure degrades capabilities, not
                // the refresh.
                match self.boundary.fido_capabilities() {
                    Ok(fido) => {
                        if fido.aaguid_bytes().is_none() {
                            self.emit(
                                WorkflowLevel::Warn,
                                format!("capability record has a malformed AAGUID {:?}", fido.aaguid),
                            );
                        }
                        self.snapshot.fido = Some(fido);
                    }
                    Err(err) => {
                        self.snapshot.fido = None;
                        self.emit(
                            WorkflowLevel::Warn,
                            format!("FIDO capability fetch failed: {err}"),
                        );
                    }
                }

                if !was_connected {
                    let serial = self
                        .snapshot
                        .info
                        .as_ref()
                        .map(|info| info.serial.clone())
                        .unwrap_or_default();
                    self.emit(
                        WorkflowLevel::Success,
                        format!("connected to {serial} ({} mode)", self.snapshot.mode.as_str()),
                    );
                }
                Ok(())
            }
            Err(err) => {
                if self.snapshot.connected {
                    self.emit(WorkflowLevel::Error, format!("connection lost: {err}"));
                } else {
                    self.emit(WorkflowLevel::Warn, format!("device refresh failed: {err}"));
                }
                self.snapshot.mark_disconnected();
                Err(KeyforgeError::Boundary(err.to_string()))
            }
        }
    }

    /// Serialize a public operation through the single in-flight slot and
    /// expose it as the `loading` flag. Cleared on every exit path.
    pub(crate) fn with_guard<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> KeyforgeResult<T>,
    ) -> KeyforgeResult<T> {
        if self.loading {
            return Err(KeyforgeError::Busy);
        }
        self.loading = true;
        let result = op(self);
        self.loading = false;
        result
    }

    pub(crate) fn emit(&mut self, level: WorkflowLevel, message: impl Into<String>) {
        let entry = event(level, message);
        crate::workflow::log_event(&entry);
        self.journal.push(entry);
    }
}
