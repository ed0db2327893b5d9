// crates/contact-form-client/src/controller.rs
// ============================================================================
// Module: Submission Controller
// Description: In-flight latch, dispatch, and outcome application.
// Purpose: Send exactly one valid snapshot at a time and apply its result.
// Dependencies: contact-form-core, thiserror, crate::{engine, transport}
// ============================================================================

//! ## Overview
//! Submitting is split into [`SubmissionController::begin_submit`], which
//! sets the in-flight latch and snapshots the payload into a
//! [`SubmissionTicket`], and [`SubmissionController::finish_submit`], which
//! applies the authoritative result for that ticket only. While the latch is
//! set the submit control and the inputs are disabled and field events are
//! dropped, so a late response always applies to the values it judged.
//!
//! [`SubmissionController::submit`] chains both halves around a transport.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use contact_form_core::ContactPayload;
use contact_form_core::FieldId;
use contact_form_core::FieldView;
use contact_form_core::FormChange;
use contact_form_core::FormView;
use contact_form_core::MessageKey;
use contact_form_core::SubmissionPhase;
use contact_form_core::SubmissionResult;
use thiserror::Error;

use crate::engine::ClientValidationEngine;
use crate::engine::FieldEvent;
use crate::transport::SubmissionTransport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default time the success confirmation stays visible.
pub const DEFAULT_SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Controller errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// The form is not valid, so the submit control is disabled.
    #[error("form is not ready for submission")]
    FormInvalid,
    /// Another submission is in flight.
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    /// The ticket does not belong to the in-flight submission.
    #[error("stale submission ticket {ticket}")]
    StaleTicket {
        /// Sequence number of the rejected ticket.
        ticket: u64,
    },
}

// ============================================================================
// SECTION: Ticket
// ============================================================================

/// Handle for one in-flight submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    /// Submission sequence number.
    sequence: u64,
    /// Values sent with this submission.
    payload: ContactPayload,
}

impl SubmissionTicket {
    /// Returns the submission sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the submitted values.
    #[must_use]
    pub const fn payload(&self) -> &ContactPayload {
        &self.payload
    }
}

// ============================================================================
// SECTION: Controller
// ============================================================================

/// Scripted-path submission controller.
#[derive(Debug)]
pub struct SubmissionController {
    /// Live validation engine.
    engine: ClientValidationEngine,
    /// Current submission phase.
    phase: SubmissionPhase,
    /// Sequence number of the most recently issued ticket.
    sequence: u64,
    /// Sequence number of the in-flight submission.
    in_flight: Option<u64>,
    /// How long the success confirmation stays visible.
    success_display: Duration,
    /// Cause of the last transport failure, kept for diagnostics.
    transport_failure: Option<String>,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_DISPLAY)
    }
}

impl SubmissionController {
    /// Creates a controller over an empty form.
    #[must_use]
    pub fn new(success_display: Duration) -> Self {
        Self {
            engine: ClientValidationEngine::new(),
            phase: SubmissionPhase::Idle,
            sequence: 0,
            in_flight: None,
            success_display,
            transport_failure: None,
        }
    }

    /// Returns the validation engine.
    #[must_use]
    pub const fn engine(&self) -> &ClientValidationEngine {
        &self.engine
    }

    /// Returns the current submission phase.
    #[must_use]
    pub const fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Returns the cause of the last transport failure, if the most recent
    /// submission failed to reach the server.
    #[must_use]
    pub fn transport_failure(&self) -> Option<&str> {
        self.transport_failure.as_deref()
    }

    /// Returns true while a submission is in flight.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns true when the submit control is enabled.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        !self.is_in_flight() && self.engine.submit_enabled()
    }

    /// Forwards a field event to the engine. Events are dropped while a
    /// submission is in flight.
    pub fn handle(&mut self, event: FieldEvent) -> Option<FormChange> {
        if self.is_in_flight() {
            return None;
        }
        self.engine.handle(event)
    }

    /// Sets the in-flight latch and snapshots the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError`] when a submission is already in flight or
    /// the form is invalid.
    pub fn begin_submit(&mut self) -> Result<SubmissionTicket, ControllerError> {
        if self.is_in_flight() {
            return Err(ControllerError::AlreadySubmitting);
        }
        if !self.engine.submit_enabled() {
            return Err(ControllerError::FormInvalid);
        }
        self.sequence = self.sequence.saturating_add(1);
        self.in_flight = Some(self.sequence);
        self.phase = SubmissionPhase::Submitting;
        self.transport_failure = None;
        self.engine.clear_feedback();
        Ok(SubmissionTicket {
            sequence: self.sequence,
            payload: self.engine.state().snapshot(),
        })
    }

    /// Applies the result for `ticket` and releases the latch.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::StaleTicket`] when `ticket` is not the
    /// in-flight submission; the result is discarded.
    pub fn finish_submit(
        &mut self,
        ticket: &SubmissionTicket,
        result: SubmissionResult,
        now: Instant,
    ) -> Result<SubmissionPhase, ControllerError> {
        if self.in_flight != Some(ticket.sequence) {
            return Err(ControllerError::StaleTicket {
                ticket: ticket.sequence,
            });
        }
        self.in_flight = None;
        self.phase = SubmissionPhase::after(&result);
        match result {
            SubmissionResult::Success => self.engine.show_success(now),
            SubmissionResult::FieldErrors {
                errors,
            } => self.engine.show_errors(errors),
            SubmissionResult::GeneralError {
                message,
            } => self.engine.show_general_error(message),
        }
        Ok(self.phase)
    }

    /// Submits the current form through `transport`.
    ///
    /// Transport failures are applied as a general error; the cause stays
    /// available through [`SubmissionController::transport_failure`].
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError`] when the submission cannot start.
    pub async fn submit<T>(
        &mut self,
        transport: &T,
        now: Instant,
    ) -> Result<SubmissionPhase, ControllerError>
    where
        T: SubmissionTransport + ?Sized,
    {
        let ticket = self.begin_submit()?;
        let result = match transport.send(ticket.payload()).await {
            Ok(result) => result,
            Err(err) => {
                self.transport_failure = Some(err.to_string());
                SubmissionResult::general(MessageKey::TransportFailed.text())
            }
        };
        self.finish_submit(&ticket, result, now)
    }

    /// Hides the success confirmation once its display time has passed.
    /// Returns true when it was hidden by this call.
    pub fn expire(&mut self, now: Instant) -> bool {
        self.engine.expire_success(now, self.success_display)
    }

    /// Builds the view of the form.
    #[must_use]
    pub fn view(&self) -> FormView {
        let pending = self.is_in_flight();
        let field_view = |field: FieldId| FieldView {
            hint: self.engine.hint(field).map(|hint| hint.text),
            error: self.engine.error(field).map(|error| error.message.clone()),
            disabled: pending,
            ..FieldView::plain(field, self.engine.state().value(field))
        };
        FormView {
            message: field_view(FieldId::Message),
            email: field_view(FieldId::Email),
            terms: field_view(FieldId::Terms),
            submit_enabled: self.submit_enabled(),
            submit_label: if pending {
                MessageKey::SubmitPending.text()
            } else {
                MessageKey::SubmitIdle.text()
            },
            success: self.engine.success_visible().then(|| MessageKey::Success.text()),
            general_error: self.engine.general_error().map(str::to_string),
        }
    }
}
