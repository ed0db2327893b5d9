// crates/contact-form-cli/src/main.rs
// ============================================================================
// Module: Contact Form CLI Entry Point
// Description: Command dispatcher for serving and exercising the contact form.
// Purpose: Provide a localized CLI for the server, validation, and the store.
// Dependencies: clap, contact-form-{client, config, core, server}, tokio.
// ============================================================================

//! ## Overview
//! The `contact-form` binary serves the contact page, validates
//! configuration, checks a payload against the authoritative validators,
//! submits a payload to a running server through the scripted client, and
//! lists persisted messages. All user-facing strings are routed through the
//! i18n catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use std::time::Instant;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use contact_form_cli::i18n::Locale;
use contact_form_cli::i18n::set_locale;
use contact_form_cli::t;
use contact_form_client::ControllerError;
use contact_form_client::FieldEvent;
use contact_form_client::HttpSubmissionTransport;
use contact_form_client::SubmissionController;
use contact_form_config::ContactFormConfig;
use contact_form_config::StoreType;
use contact_form_core::ContactPayload;
use contact_form_core::ContactService;
use contact_form_core::FieldId;
use contact_form_core::MessageStore;
use contact_form_core::SubmissionPhase;
use contact_form_core::SubmissionResult;
use contact_form_server::ContactServer;
use contact_form_store_sqlite::SqliteMessageStore;
use thiserror::Error;
use tokio::net::TcpListener;
use url::Url;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "CONTACT_FORM_LANG";
/// Default number of messages listed by `store list`.
const DEFAULT_LIST_LIMIT: usize = 20;
/// Default timeout for `submit` requests.
const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 10_000;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "contact-form", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `CONTACT_FORM_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the contact page and submission endpoint.
    Serve(ServeCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Validate a payload with the authoritative validators and print the result.
    Check(PayloadArgs),
    /// Submit a payload to a running server as the scripted client does.
    Submit(SubmitCommand),
    /// Message store utilities.
    Store {
        /// Selected store subcommand.
        #[command(subcommand)]
        command: StoreCommand,
    },
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to contact-form.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override the configured bind address.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to contact-form.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Form values supplied on the command line.
#[derive(Args, Debug, Clone)]
struct PayloadArgs {
    /// Message body.
    #[arg(long, default_value = "")]
    message: String,
    /// Sender email address.
    #[arg(long, default_value = "")]
    email: String,
    /// Accept the terms.
    #[arg(long, action = ArgAction::SetTrue)]
    terms: bool,
}

impl PayloadArgs {
    /// Converts the arguments into a payload.
    fn to_payload(&self) -> ContactPayload {
        ContactPayload::new(self.message.as_str(), self.email.as_str(), self.terms)
    }
}

/// Arguments for `submit`.
#[derive(Args, Debug)]
struct SubmitCommand {
    /// Base URL of the running server.
    #[arg(long, value_name = "URL", default_value = "http://127.0.0.1:3000/")]
    url: String,
    /// Request timeout in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_SUBMIT_TIMEOUT_MS)]
    timeout_ms: u64,
    /// Form values.
    #[command(flatten)]
    payload: PayloadArgs,
}

/// Store subcommands.
#[derive(Subcommand, Debug)]
enum StoreCommand {
    /// List the most recent persisted messages.
    List(StoreListCommand),
}

/// Arguments for `store list`.
#[derive(Args, Debug)]
struct StoreListCommand {
    /// Optional config file path (defaults to contact-form.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Maximum number of messages to list.
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: usize,
}

/// Output language flag values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LangArg {
    /// English.
    En,
    /// Swedish.
    Sv,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Sv => Self::Sv,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Config {
            command: ConfigCommand::Validate(command),
        } => command_config_validate(&command),
        Commands::Check(payload) => command_check(&payload),
        Commands::Submit(command) => command_submit(command).await,
        Commands::Store {
            command: StoreCommand::List(command),
        } => command_store_list(&command),
    }
}

/// Resolves the output locale from the flag, then the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref(), command.bind)?;
    let addr = config
        .server
        .bind_addr()
        .map_err(|_| CliError::new(t!("serve.bind.invalid", bind = config.server.bind)))?;
    let store = store_label(config.store.store_type);
    let server = tokio::task::spawn_blocking(move || ContactServer::from_config(config))
        .await
        .map_err(|err| {
            CliError::new(t!("serve.init_failed", error = format!("init join failed: {err}")))
        })?
        .map_err(|err| CliError::new(t!("serve.init_failed", error = err)))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| CliError::new(t!("serve.failed", error = err)))?;
    let bound = listener.local_addr().unwrap_or(addr);
    write_stderr_line(&t!("serve.listening", bind = bound, store = store))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    server
        .serve_listener(listener)
        .await
        .map_err(|err| CliError::new(t!("serve.failed", error = err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads configuration and applies the bind override.
fn load_config(
    path: Option<&std::path::Path>,
    bind: Option<String>,
) -> CliResult<ContactFormConfig> {
    let mut config = ContactFormConfig::load(path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    if let Some(bind) = bind {
        config.server.bind = bind;
        config.validate().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    }
    Ok(config)
}

/// Returns the display label of a store backend.
const fn store_label(store_type: StoreType) -> &'static str {
    match store_type {
        StoreType::Memory => "memory",
        StoreType::Sqlite => "sqlite",
    }
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = ContactFormConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Executes the `check` command: prints the authoritative result as JSON.
///
/// Exits with failure when the payload would be rejected.
fn command_check(payload: &PayloadArgs) -> CliResult<ExitCode> {
    let result = ContactService::check(&payload.to_payload());
    let json = serde_json::to_string_pretty(&result)
        .map_err(|err| CliError::new(t!("check.serialize_failed", error = err)))?;
    write_stdout_line(&json)?;
    Ok(exit_code_for(&result))
}

/// Maps a result to the process exit code.
fn exit_code_for(result: &SubmissionResult) -> ExitCode {
    if result.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

// ============================================================================
// SECTION: Submit Command
// ============================================================================

/// Executes the `submit` command through the scripted submission flow.
async fn command_submit(command: SubmitCommand) -> CliResult<ExitCode> {
    let base = Url::parse(&command.url).map_err(|err| {
        CliError::new(t!("submit.url_invalid", url = command.url, error = err))
    })?;
    let transport =
        HttpSubmissionTransport::with_timeout(&base, Duration::from_millis(command.timeout_ms))
            .map_err(|err| CliError::new(t!("submit.transport_failed", error = err)))?;
    let mut controller = fill_controller(&command.payload.to_payload());
    match controller.submit(&transport, Instant::now()).await {
        Ok(phase) => report_phase(&controller, phase),
        Err(ControllerError::FormInvalid) => {
            write_stdout_line(&t!("submit.invalid"))?;
            for (field, message) in client_rejections(&controller) {
                write_stdout_line(&t!("submit.field", field = field.as_str(), message = message))?;
            }
            Ok(ExitCode::FAILURE)
        }
        Err(_) => Err(CliError::new(t!("submit.busy"))),
    }
}

/// Builds a controller holding `payload`, as if typed by a visitor.
fn fill_controller(payload: &ContactPayload) -> SubmissionController {
    let mut controller = SubmissionController::default();
    for field in FieldId::ALL {
        let _ = controller.handle(FieldEvent::Input(field, payload.value(field)));
        let _ = controller.handle(FieldEvent::Blur(field));
    }
    controller
}

/// Returns the client-side rejection text per invalid field.
fn client_rejections(controller: &SubmissionController) -> Vec<(FieldId, &'static str)> {
    let state = controller.engine().state();
    FieldId::ALL
        .into_iter()
        .filter_map(|field| {
            let rejection = state.outcome(field).rejection()?;
            Some((field, rejection.hint_text().unwrap_or_else(|| rejection.error_text())))
        })
        .collect()
}

/// Prints the outcome of a completed submission.
fn report_phase(controller: &SubmissionController, phase: SubmissionPhase) -> CliResult<ExitCode> {
    let engine = controller.engine();
    match phase {
        SubmissionPhase::Succeeded => {
            write_stdout_line(&t!("submit.accepted"))?;
            Ok(ExitCode::SUCCESS)
        }
        SubmissionPhase::Rejected => {
            write_stdout_line(&t!("submit.rejected"))?;
            for field in FieldId::ALL {
                if let Some(error) = engine.error(field) {
                    write_stdout_line(&t!(
                        "submit.field",
                        field = field.as_str(),
                        message = error.message
                    ))?;
                }
            }
            Ok(ExitCode::FAILURE)
        }
        SubmissionPhase::Failed | SubmissionPhase::Idle | SubmissionPhase::Submitting => {
            let message = engine.general_error().unwrap_or_default();
            write_stdout_line(&t!("submit.failed", message = message))?;
            if let Some(cause) = controller.transport_failure() {
                write_stderr_line(&t!("submit.cause", error = cause))
                    .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

// ============================================================================
// SECTION: Store Commands
// ============================================================================

/// Executes `store list`.
fn command_store_list(command: &StoreListCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref(), None)?;
    let Some(sqlite) = config.store.sqlite() else {
        return Err(CliError::new(t!("store.memory_unsupported")));
    };
    let store = SqliteMessageStore::new(sqlite)
        .map_err(|err| CliError::new(t!("store.open_failed", error = err)))?;
    let messages = store
        .recent(command.limit)
        .map_err(|err| CliError::new(t!("store.list.failed", error = err)))?;
    if messages.is_empty() {
        write_stdout_line(&t!("store.list.none"))?;
        return Ok(ExitCode::SUCCESS);
    }
    write_stdout_line(&t!("store.list.header"))?;
    for stored in messages {
        write_stdout_line(&t!(
            "store.list.entry",
            id = stored.id.get(),
            received_at = stored.message.received_at_ms,
            email = stored.message.email
        ))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Prints the generated help text.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stdout_line(help.trim_end())
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
