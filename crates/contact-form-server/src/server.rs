// crates/contact-form-server/src/server.rs
// ============================================================================
// Module: Contact Form HTTP Server
// Description: axum routes for the contact page and the submission endpoint.
// Purpose: Serve scripted and no-script clients from one submission service.
// Dependencies: axum, http-body-util, tokio, url, contact-form-{config, core, store-sqlite}
// ============================================================================

//! ## Overview
//! Two routes share one [`ContactService`]:
//!
//! - `GET /` renders the full contact page. The query may carry
//!   `status=success`, repeatable `error=<Rejection>` tokens, or
//!   `error=DatabaseError`.
//! - `POST /api/contact` accepts a JSON or form-encoded body. Requests whose
//!   `Accept` header names `application/json` receive a JSON
//!   [`SubmissionResult`]; plain form posts receive a redirect on success
//!   and a re-rendered page otherwise.
//!
//! The service is the only authority on acceptance; nothing the client sent
//! about validity is trusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::extract::RawQuery;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::ACCEPT;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use contact_form_config::ContactFormConfig;
use contact_form_config::ServerAuditConfig;
use contact_form_config::StoreType;
use contact_form_core::ContactPayload;
use contact_form_core::ContactService;
use contact_form_core::FieldRejection;
use contact_form_core::FormView;
use contact_form_core::InMemoryMessageStore;
use contact_form_core::MessageKey;
use contact_form_core::SharedMessageStore;
use contact_form_core::StoreError;
use contact_form_core::SubmissionResult;
use contact_form_core::store_failure;
use contact_form_store_sqlite::SqliteMessageStore;
use http_body_util::LengthLimitError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::audit::ContactAuditSink;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::ServerStartAuditEvent;
use crate::audit::StderrAuditSink;
use crate::audit::SubmissionAuditEvent;
use crate::audit::SubmissionAuditEventParams;
use crate::audit::SubmissionChannel;
use crate::page::CONTACT_ANCHOR;
use crate::page::FORM_ACTION;
use crate::page::render_page;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Query value announcing a successful no-script submission.
const STATUS_SUCCESS: &str = "success";
/// Error token for a failure no field caused.
const DATABASE_ERROR_TOKEN: &str = "DatabaseError";
/// Media type of scripted requests and responses.
const JSON_MEDIA_TYPE: &str = "application/json";

/// Returns the redirect target after a successful no-script submission.
fn success_location() -> String {
    format!("/?status={STATUS_SUCCESS}#{CONTACT_ANCHOR}")
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contact form server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization error.
    #[error("init error: {0}")]
    Init(String),
    /// Transport error.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Contact form server instance.
pub struct ContactServer {
    /// Server configuration.
    config: ContactFormConfig,
    /// Shared request handling state.
    state: Arc<ServerState>,
}

impl ContactServer {
    /// Builds a server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the configuration is invalid or the store
    /// or audit sink cannot be opened.
    pub fn from_config(config: ContactFormConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let store = build_message_store(&config)?;
        let audit = build_audit_sink(&config.server.audit)?;
        let state = Arc::new(ServerState {
            service: ContactService::new(store),
            audit,
            max_body_bytes: config.server.max_body_bytes,
            success_display: config.form.success_display(),
        });
        Ok(Self {
            config,
            state,
        })
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn config(&self) -> &ContactFormConfig {
        &self.config
    }

    /// Returns the submission service.
    #[must_use]
    pub fn service(&self) -> &ContactService {
        &self.state.service
    }

    /// Returns the axum router for this server.
    #[must_use]
    pub fn router(&self) -> Router {
        router_for(Arc::clone(&self.state))
    }

    /// Binds the configured address and serves until the process stops.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr =
            self.config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        self.serve_listener(listener).await
    }

    /// Serves on an already bound listener.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when serving fails.
    pub async fn serve_listener(self, listener: TcpListener) -> Result<(), ServerError> {
        let bind = listener
            .local_addr()
            .map_or_else(|_| self.config.server.bind.clone(), |addr| addr.to_string());
        self.state.audit.record_start(&ServerStartAuditEvent::new(
            bind,
            store_label(self.config.store.store_type),
        ));
        let app = self.router();
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Builds a router around an existing service.
#[must_use]
pub fn build_router(
    service: ContactService,
    audit: Arc<dyn ContactAuditSink>,
    max_body_bytes: usize,
    success_display: Duration,
) -> Router {
    router_for(Arc::new(ServerState {
        service,
        audit,
        max_body_bytes,
        success_display,
    }))
}

/// Wires routes to shared state.
fn router_for(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(handle_page))
        .route(FORM_ACTION, post(handle_submit))
        .with_state(state)
}

/// Builds the message store from configuration.
fn build_message_store(config: &ContactFormConfig) -> Result<SharedMessageStore, ServerError> {
    let store = match config.store.store_type {
        StoreType::Memory => SharedMessageStore::from_store(InMemoryMessageStore::new()),
        StoreType::Sqlite => {
            let sqlite_config = config
                .store
                .sqlite()
                .ok_or_else(|| ServerError::Config("sqlite store requires path".to_string()))?;
            let store = SqliteMessageStore::new(sqlite_config)
                .map_err(|err| ServerError::Init(err.to_string()))?;
            SharedMessageStore::from_store(store)
        }
    };
    Ok(store)
}

/// Builds the audit sink from configuration.
fn build_audit_sink(config: &ServerAuditConfig) -> Result<Arc<dyn ContactAuditSink>, ServerError> {
    if !config.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &config.path {
        Some(path) => {
            let sink = FileAuditSink::new(Path::new(path))
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

/// Returns the audit label of a store backend.
const fn store_label(store_type: StoreType) -> &'static str {
    match store_type {
        StoreType::Memory => "memory",
        StoreType::Sqlite => "sqlite",
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Shared server state for handlers.
struct ServerState {
    /// Authoritative submission service.
    service: ContactService,
    /// Audit sink for submission events.
    audit: Arc<dyn ContactAuditSink>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
    /// How long scripted clients show the success confirmation.
    success_display: Duration,
}

/// Renders the contact page, reflecting outcome query parameters.
async fn handle_page(State(state): State<Arc<ServerState>>, RawQuery(query): RawQuery) -> Response {
    let result = query.as_deref().and_then(result_from_query);
    let view = FormView::server_rendered(&ContactPayload::default(), result.as_ref());
    Html(render_page(&view, state.success_display)).into_response()
}

/// Submission handled by the service, ready to present and audit.
struct HandledSubmission {
    /// HTTP status for the outcome.
    status: StatusCode,
    /// Decoded values, retained for the no-script page.
    payload: ContactPayload,
    /// Authoritative result.
    result: SubmissionResult,
    /// Request body size in bytes.
    request_bytes: usize,
    /// Failure detail for the audit log.
    error: Option<String>,
}

impl HandledSubmission {
    /// Builds the outcome for a request that never reached the service.
    fn bad_request(status: StatusCode, request_bytes: usize, error: String) -> Self {
        Self {
            status,
            payload: ContactPayload::default(),
            result: SubmissionResult::general(MessageKey::BadRequest.text()),
            request_bytes,
            error: Some(error),
        }
    }
}

/// Handles a submission from either channel.
async fn handle_submit(State(state): State<Arc<ServerState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let peer_ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let channel = channel_for(&parts.headers);
    let handled = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Err(err) => {
            let status = read_failure_status(&err);
            let request_bytes =
                if status == StatusCode::PAYLOAD_TOO_LARGE { state.max_body_bytes } else { 0 };
            HandledSubmission::bad_request(status, request_bytes, err.to_string())
        }
        Ok(bytes) => match decode_payload(&parts.headers, &bytes) {
            Some(payload) => submit_payload(&state.service, payload, bytes.len()),
            None => HandledSubmission::bad_request(
                StatusCode::BAD_REQUEST,
                bytes.len(),
                "request body could not be decoded".to_string(),
            ),
        },
    };
    let response = respond(&state, channel, handled.status, &handled.payload, &handled.result);
    state.audit.record(&SubmissionAuditEvent::new(SubmissionAuditEventParams {
        channel,
        outcome: handled.result.outcome_label(),
        rejected_fields: handled.result.rejected_fields(),
        status: response.status().as_u16(),
        request_bytes: handled.request_bytes,
        peer_ip,
        error: handled.error,
    }));
    response
}

/// Maps a body read failure to its status: 413 for the size limit, 400 otherwise.
fn read_failure_status(err: &axum::Error) -> StatusCode {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(current) = source {
        if current.is::<LengthLimitError>() {
            return StatusCode::PAYLOAD_TOO_LARGE;
        }
        source = current.source();
    }
    StatusCode::BAD_REQUEST
}

/// Submits decoded values, keeping the store error for the audit log.
fn submit_payload(
    service: &ContactService,
    payload: ContactPayload,
    request_bytes: usize,
) -> HandledSubmission {
    let (result, error) = match submit_blocking(service, &payload) {
        Ok(result) => (result, None),
        Err(err) => (store_failure(), Some(err.to_string())),
    };
    HandledSubmission {
        status: status_for(&result),
        payload,
        result,
        request_bytes,
        error,
    }
}

/// Runs the synchronous service call without stalling the async runtime.
fn submit_blocking(
    service: &ContactService,
    payload: &ContactPayload,
) -> Result<SubmissionResult, StoreError> {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| service.try_submit(payload))
        }
        _ => service.try_submit(payload),
    }
}

/// Builds the channel-specific response.
fn respond(
    state: &ServerState,
    channel: SubmissionChannel,
    status: StatusCode,
    payload: &ContactPayload,
    result: &SubmissionResult,
) -> Response {
    match channel {
        SubmissionChannel::Scripted => (status, Json(result.clone())).into_response(),
        SubmissionChannel::NoScript if result.is_success() => {
            Redirect::to(&success_location()).into_response()
        }
        SubmissionChannel::NoScript => {
            let view = FormView::server_rendered(payload, Some(result));
            (status, Html(render_page(&view, state.success_display))).into_response()
        }
    }
}

// ============================================================================
// SECTION: Request Decoding
// ============================================================================

/// Returns true when `value` names the JSON media type.
fn names_json(value: &str) -> bool {
    value.split(',').any(|part| {
        part.split(';').next().is_some_and(|media| media.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
    })
}

/// Picks the response channel from the `Accept` header.
fn channel_for(headers: &HeaderMap) -> SubmissionChannel {
    let scripted = headers.get(ACCEPT).and_then(|value| value.to_str().ok()).is_some_and(names_json);
    if scripted { SubmissionChannel::Scripted } else { SubmissionChannel::NoScript }
}

/// Decodes the body as JSON or as a form post, by `Content-Type`.
fn decode_payload(headers: &HeaderMap, bytes: &Bytes) -> Option<ContactPayload> {
    let is_json =
        headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok()).is_some_and(names_json);
    if is_json {
        return serde_json::from_slice(bytes).ok();
    }
    Some(decode_form(bytes))
}

/// Decodes a form-encoded body. A present, non-blank `terms` means checked.
fn decode_form(bytes: &[u8]) -> ContactPayload {
    let mut payload = ContactPayload::default();
    for (key, value) in url::form_urlencoded::parse(bytes) {
        match key.as_ref() {
            "message" => payload.message = value.into_owned(),
            "email" => payload.email = value.into_owned(),
            "terms" => payload.terms = !value.trim().is_empty(),
            _ => {}
        }
    }
    payload
}

/// Maps a result to its HTTP status.
const fn status_for(result: &SubmissionResult) -> StatusCode {
    match result {
        SubmissionResult::Success => StatusCode::OK,
        SubmissionResult::FieldErrors {
            ..
        } => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionResult::GeneralError {
            ..
        } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Reconstructs a result from the page query, if it names one.
///
/// Unknown error tokens are ignored. A general error token takes precedence
/// over field tokens.
fn result_from_query(query: &str) -> Option<SubmissionResult> {
    let mut success = false;
    let mut general = false;
    let mut rejections = Vec::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match (key.as_ref(), value.as_ref()) {
            ("status", STATUS_SUCCESS) => success = true,
            ("error", DATABASE_ERROR_TOKEN) => general = true,
            ("error", token) => {
                if let Ok(rejection) = token.parse::<FieldRejection>() {
                    rejections.push(rejection);
                }
            }
            _ => {}
        }
    }
    if general {
        return Some(SubmissionResult::general(MessageKey::UnknownDatabaseError.text()));
    }
    if !rejections.is_empty() {
        return Some(SubmissionResult::from_rejections(rejections));
    }
    success.then_some(SubmissionResult::Success)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
