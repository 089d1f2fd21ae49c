#![doc(test(attr(deny(warnings))))]

//! Transaction Entry holds the logic behind a transaction form: resolving
//! categories against the default and custom sets, validating the draft and
//! dispatching the finished payload to the host application.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(None);
        tracing::info!("Transaction entry tracing initialized.");
    });
}

/// Initializes tracing with the log filter from `config`, if any.
pub fn init_with_config(config: &config::Config) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(config.log_filter.as_deref());
        tracing::info!(
            data_dir = %config.resolve_data_dir().display(),
            "Transaction entry tracing initialized."
        );
    });
}
