use std::io;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Default filter when `RUST_LOG` is not set.
pub fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        "aihelper=debug"
    } else {
        "aihelper=warn"
    }
}

/// Lets the log level be raised once the full configuration is known.
pub struct LogHandle {
    handle: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogHandle {
    /// Switch to debug output unless `RUST_LOG` already decided the level.
    pub fn set_verbose(&self, verbose: bool) {
        if let Some(handle) = &self.handle {
            if let Err(e) = handle.reload(EnvFilter::new(filter_directive(verbose))) {
                tracing::warn!("could not change log level: {}", e);
            }
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init(verbose: bool) -> LogHandle {
    let (env_filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(v) => (v, true),
        Err(_) => (EnvFilter::new(filter_directive(verbose)), false),
    };
    let (filter, handle) = reload::Layer::new(env_filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    LogHandle {
        handle: if from_env { None } else { Some(handle) },
    }
}
