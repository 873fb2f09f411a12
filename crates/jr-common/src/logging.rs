use std::any::Any;
use std::panic;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

pub const LOG_DIR_ENV: &str = "JR_LOG_DIR";
pub const LOG_BACKTRACE_ENV: &str = "JR_LOG_INCLUDE_BACKTRACE";

const DEFAULT_FILTER: &str = "info";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Logging knobs resolved from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Daily-rotated `<dir>/<app>.log` when set; stderr otherwise.
    pub log_dir: Option<PathBuf>,
    pub include_backtrace: bool,
}

impl LoggingOptions {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_dir = lookup(LOG_DIR_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let include_backtrace = lookup(LOG_BACKTRACE_ENV)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            log_dir,
            include_backtrace,
        }
    }
}

/// What the panic hook records for one panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicReport {
    pub thread: String,
    pub location: Option<String>,
    pub message: String,
}

impl PanicReport {
    pub fn capture(info: &panic::PanicHookInfo<'_>) -> Self {
        Self {
            thread: std::thread::current()
                .name()
                .unwrap_or("unnamed")
                .to_string(),
            location: info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line())),
            message: payload_text(info.payload()),
        }
    }
}

fn payload_text(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        return (*text).to_string();
    }
    if let Some(text) = payload.downcast_ref::<String>() {
        return text.clone();
    }
    "non-string panic payload".to_string()
}

/// Routes panics into the log as a [`PanicReport`]. The default hook still
/// runs when `JR_LOG_INCLUDE_BACKTRACE` is set. Installed once per process.
pub fn install_tracing_panic_hook(app_name: &'static str) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let forward_to_default = LoggingOptions::from_env().include_backtrace;
        let default_hook = panic::take_hook();

        panic::set_hook(Box::new(move |info| {
            let report = PanicReport::capture(info);
            tracing::error!(
                application = app_name,
                thread = %report.thread,
                location = report.location.as_deref().unwrap_or("unknown"),
                message = %report.message,
                "panic"
            );
            if forward_to_default {
                default_hook(info);
            }
        }));
    });
}

fn rotating_file_writer(app_name: &'static str, dir: PathBuf) -> Option<BoxMakeWriter> {
    if let Err(err) = std::fs::create_dir_all(&dir) {
        eprintln!("failed to create {LOG_DIR_ENV} {}: {err}; logging to stderr", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(BoxMakeWriter::new(non_blocking))
}

/// Installs the global subscriber. `RUST_LOG` filters (default `info`).
///
/// Output goes to stderr so stdout stays free for command results, or to a
/// daily-rotated file under `JR_LOG_DIR` when that is set.
pub fn init_tracing_subscriber(app_name: &'static str) {
    let options = LoggingOptions::from_env();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let writer = options
        .log_dir
        .and_then(|dir| rotating_file_writer(app_name, dir));
    let result = match writer {
        Some(writer) => builder.with_ansi(false).with_writer(writer).try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    if result.is_err() {
        tracing::debug!(application = app_name, "tracing subscriber already installed");
    }
}
