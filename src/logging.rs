use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize the logging system.
///
/// Logs go to stderr so stdout stays clean for rendered tables. The
/// `TABLEMINE_LOG` environment variable overrides the level when set.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_env("TABLEMINE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("tablemine={}", default_level)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    Registry::default().with(env_filter).with(console_layer).init();
}

/// Scoped timer for mining steps.
///
/// The timer is a value owned by the caller, started and stopped by scope
/// rather than through shared mutable state. Dropping it logs the elapsed
/// time for the operation.
pub struct PerformanceTimer {
    start: std::time::Instant,
    operation: String,
}

impl PerformanceTimer {
    pub fn start(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    pub fn checkpoint(&self, checkpoint: &str) {
        let elapsed = self.start.elapsed();
        info!(
            "{} - {}: {:.2}ms",
            self.operation,
            checkpoint,
            elapsed.as_secs_f64() * 1000.0
        );
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for PerformanceTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        info!(
            "completed {}: {:.2}ms",
            self.operation,
            elapsed.as_secs_f64() * 1000.0
        );
    }
}
