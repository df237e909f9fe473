use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "timesheet_portal=info,odoo_rpc=info";

/// Install a fmt subscriber filtered by `RUST_LOG`. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
    {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}
