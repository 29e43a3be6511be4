//! Authenticated PIN procedures: set/change and minimum-length update.
//!
//! Both procedures validate locally before touching the boundary and return
//! the device's confirmation messages verbatim. The minimum-length update is
//! a two-request sequence whose ordering is load-bearing; see
//! [`MinPinLengthChange`].

use keyforge_boundary::DeviceBoundary;
use zeroize::Zeroizing;

use crate::engine::DeviceEngine;
use crate::error::{KeyforgeError, KeyforgeResult};
use crate::workflow::{log_event, event, WorkflowEvent, WorkflowLevel, WorkflowReport};

/// Input for a PIN set or change.
///
/// `current` is absent only when no PIN exists on the device yet.
pub struct PinChange {
    pub current: Option<Zeroizing<String>>,
    pub new_pin: Zeroizing<String>,
    pub confirm: Zeroizing<String>,
}

/// Input for a minimum-PIN-length update.
///
/// The device invalidates the stored PIN when the minimum grows past it, so
/// the procedure always carries a replacement PIN that satisfies the new
/// constraint.
pub struct MinPinLengthChange {
    pub current: Zeroizing<String>,
    pub new_length: u8,
    pub new_pin: Zeroizing<String>,
    pub confirm: Zeroizing<String>,
}

impl<B: DeviceBoundary> DeviceEngine<B> {
    /// Set the first PIN or change the existing one.
    ///
    /// Validation order: length against the device-reported minimum first,
    /// then confirmation match. No request is issued unless both pass.
    /// Failure leaves the workflow retryable; nothing device-side changed.
    pub fn change_pin(&mut self, request: PinChange) -> KeyforgeResult<WorkflowReport> {
        self.with_guard(|engine| engine.change_pin_inner(request))
    }

    fn change_pin_inner(&mut self, request: PinChange) -> KeyforgeResult<WorkflowReport> {
        let minimum = self
            .snapshot
            .min_pin_length(self.config.fallback_min_pin_length);

        if request.new_pin.chars().count() < usize::from(minimum) {
            return Err(KeyforgeError::Validation(format!(
                "new PIN must be at least {minimum} characters"
            )));
        }
        if *request.new_pin != *request.confirm {
            return Err(KeyforgeError::Validation(
                "new PIN and confirmation do not match".into(),
            ));
        }
        if request.current.is_none() && self.snapshot.pin_set() {
            return Err(KeyforgeError::Validation(
                "device already has a PIN; the current PIN is required".into(),
            ));
        }

        let mut events = Vec::new();
        let current = request.current.as_ref().map(|pin| pin.as_str());

        match self.boundary.change_pin(current, request.new_pin.as_str()) {
            Ok(confirmation) => {
                self.record(&mut events, WorkflowLevel::Success, confirmation);
                // Re-sync PIN-presence and retry capability state.
                let _ = self.refresh_inner();
                Ok(WorkflowReport {
                    title: "PIN update".into(),
                    events,
                })
            }
            Err(err) => {
                self.record(
                    &mut events,
                    WorkflowLevel::Error,
                    format!("PIN update rejected: {err}"),
                );
                Err(KeyforgeError::Boundary(err.to_string()))
            }
        }
    }

    /// Raise (or lower) the minimum accepted PIN length, then set a PIN that
    /// satisfies it.
    ///
    /// The length update is issued first; if it fails the whole workflow
    /// aborts with the PIN untouched. If the follow-up PIN change fails, the
    /// new minimum is already active on the device and cannot be rolled back
    /// here; that asymmetry is surfaced as [`KeyforgeError::PinOutOfSync`].
    pub fn change_min_pin_length(
        &mut self,
        request: MinPinLengthChange,
    ) -> KeyforgeResult<WorkflowReport> {
        self.with_guard(|engine| engine.change_min_pin_length_inner(request))
    }

    fn change_min_pin_length_inner(
        &mut self,
        request: MinPinLengthChange,
    ) -> KeyforgeResult<WorkflowReport> {
        if !(4..=63).contains(&request.new_length) {
            return Err(KeyforgeError::Validation(format!(
                "minimum PIN length must be within 4..=63 (got {})",
                request.new_length
            )));
        }
        if request.new_pin.chars().count() < usize::from(request.new_length) {
            return Err(KeyforgeError::Validation(format!(
                "new PIN must be at least {} characters to satisfy the new minimum",
                request.new_length
            )));
        }
        if *request.new_pin != *request.confirm {
            return Err(KeyforgeError::Validation(
                "new PIN and confirmation do not match".into(),
            ));
        }

        let mut events = Vec::new();

        match self
            .boundary
            .set_min_pin_length(request.current.as_str(), request.new_length)
        {
            Ok(confirmation) => {
                self.record(&mut events, WorkflowLevel::Info, confirmation);
            }
            Err(err) => {
                self.record(
                    &mut events,
                    WorkflowLevel::Error,
                    format!("minimum PIN length update rejected: {err}; PIN left unchanged"),
                );
                return Err(KeyforgeError::Boundary(err.to_string()));
            }
        }

        match self
            .boundary
            .change_pin(Some(request.current.as_str()), request.new_pin.as_str())
        {
            Ok(confirmation) => {
                self.record(&mut events, WorkflowLevel::Success, confirmation);
                let _ = self.refresh_inner();
                Ok(WorkflowReport {
                    title: format!("Minimum PIN length set to {}", request.new_length),
                    events,
                })
            }
            Err(err) => {
                self.record(
                    &mut events,
                    WorkflowLevel::Error,
                    format!(
                        "minimum PIN length {} is already active, but the PIN change \
                         failed: {err}",
                        request.new_length
                    ),
                );
                Err(KeyforgeError::PinOutOfSync(err.to_string()))
            }
        }
    }

    /// Emit one event into both the workflow report and the engine journal.
    fn record(
        &mut self,
        events: &mut Vec<WorkflowEvent>,
        level: WorkflowLevel,
        message: impl Into<String>,
    ) {
        let entry = event(level, message);
        log_event(&entry);
        events.push(entry.clone());
        self.journal.push(entry);
    }
}
