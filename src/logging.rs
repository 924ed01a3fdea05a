use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_DIR_ENV: &str = "GOLAYERS_LOG_DIR";

pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> Option<&std::path::Path> {
        self.log_dir.as_deref()
    }
}

fn log_dir_from_env() -> Option<PathBuf> {
    let dir = std::env::var_os(LOG_DIR_ENV)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)?;
    match std::fs::create_dir_all(&dir) {
        Ok(()) => Some(dir),
        Err(err) => {
            eprintln!("golayers: cannot create log dir {}: {}", dir.display(), err);
            None
        }
    }
}

/// Installs the global subscriber. Logs go to a daily file under `GOLAYERS_LOG_DIR` when it is
/// set, to stderr otherwise.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = log_dir_from_env();
    let (non_blocking, guard) = match &log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "golayers.log");
            tracing_appender::non_blocking(file_appender)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("golayers=info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    match &log_dir {
        Some(dir) => tracing::debug!(log_dir = %dir.display(), "tracing initialized"),
        None => tracing::debug!("tracing initialized"),
    }

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}
