// crates/contact-form-server/src/audit.rs
// ============================================================================
// Module: Contact Form Audit Logging
// Description: Structured audit events for submission handling.
// Purpose: Emit redacted JSON-lines audit logs without hard dependencies.
// Dependencies: contact-form-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events describe what happened to a submission without recording
//! what was submitted: message bodies and email addresses never appear.
//! Sinks write one JSON object per line to stderr or to an append-only file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use contact_form_core::FieldId;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Presentation path a submission arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionChannel {
    /// In-page request expecting a structured result.
    Scripted,
    /// Plain form post expecting a full page.
    NoScript,
}

impl SubmissionChannel {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scripted => "scripted",
            Self::NoScript => "no_script",
        }
    }
}

/// Submission audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Presentation path.
    pub channel: SubmissionChannel,
    /// Outcome label.
    pub outcome: &'static str,
    /// Rejected fields, in field order.
    pub rejected_fields: Vec<FieldId>,
    /// HTTP status returned.
    pub status: u16,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Failure detail for general errors (store or request errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Inputs required to construct a submission audit event.
pub struct SubmissionAuditEventParams {
    /// Presentation path.
    pub channel: SubmissionChannel,
    /// Outcome label.
    pub outcome: &'static str,
    /// Rejected fields.
    pub rejected_fields: Vec<FieldId>,
    /// HTTP status returned.
    pub status: u16,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Failure detail, never derived from submitted content.
    pub error: Option<String>,
}

impl SubmissionAuditEvent {
    /// Creates a new submission audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: SubmissionAuditEventParams) -> Self {
        Self {
            event: "contact_submission",
            timestamp_ms: now_millis(),
            channel: params.channel,
            outcome: params.outcome,
            rejected_fields: params.rejected_fields,
            status: params.status,
            request_bytes: params.request_bytes,
            peer_ip: params.peer_ip,
            error: params.error,
        }
    }
}

/// Server start audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ServerStartAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Bound socket address.
    pub bind: String,
    /// Store backend label.
    pub store: &'static str,
}

impl ServerStartAuditEvent {
    /// Creates a new server start audit event.
    #[must_use]
    pub fn new(bind: String, store: &'static str) -> Self {
        Self {
            event: "server_start",
            timestamp_ms: now_millis(),
            bind,
            store,
        }
    }
}

/// Returns the current time in milliseconds since the Unix epoch.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for contact form events.
pub trait ContactAuditSink: Send + Sync {
    /// Record a submission event.
    fn record(&self, event: &SubmissionAuditEvent);

    /// Record a server start event.
    fn record_start(&self, _event: &ServerStartAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ContactAuditSink for StderrAuditSink {
    fn record(&self, event: &SubmissionAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_start(&self, event: &ServerStartAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized event.
    fn append(&self, payload: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl ContactAuditSink for FileAuditSink {
    fn record(&self, event: &SubmissionAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }

    fn record_start(&self, event: &ServerStartAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ContactAuditSink for NoopAuditSink {
    fn record(&self, _event: &SubmissionAuditEvent) {}
}
