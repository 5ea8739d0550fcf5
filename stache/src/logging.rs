//! Wrapper around `tracing_subscriber` for logging.
//!
//! Configures logging to go to stderr at the `INFO` level. Rendering reports
//! missing variables and malformed templates at `DEBUG` and `TRACE`,
//! so set `RUST_LOG=stache=debug` to see them.
//! If your application already has a subscriber, don't initialize the `Logger`.
//!
//! ### Example
//!
//! ```rust
//! use stache::prelude::*;
//!
//! Logger::init();
//! ```
use crate::config::get_config;
use once_cell::sync::OnceCell;
use tracing_subscriber::{filter::LevelFilter, fmt, util::SubscriberInitExt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

pub struct Logger;

impl Logger {
    /// Configure logging application-wide.
    ///
    /// Calling this multiple times is safe. Logger will be initialized only once.
    pub fn init() {
        INITIALIZED.get_or_init(|| {
            setup_logging();
            get_config().log_info();
        });
    }
}

fn setup_logging() {
    // Another subscriber may already be installed by the host.
    let _ = fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(get_config().general.tty)
        .with_file(false)
        .with_target(false)
        .finish()
        .try_init();
}
