use std::sync::Once;

use tracing_subscriber::filter::Directive;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "transaction_entry=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `filter` accepts an extra directive (e.g. `transaction_entry=debug`) that
/// takes precedence over the built-in default. Invalid directives are ignored.
pub fn init_tracing(filter: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let directive = filter
            .and_then(|raw| raw.parse::<Directive>().ok())
            .or_else(|| DEFAULT_DIRECTIVE.parse::<Directive>().ok());
        let mut env_filter = EnvFilter::from_default_env();
        if let Some(directive) = directive {
            env_filter = env_filter.add_directive(directive);
        }

        // Another subscriber may already be installed by the host.
        let _ = fmt().with_env_filter(env_filter).try_init();
    });
}
