use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Sets up stderr logging.
///
/// `SHARESCAN_LOG` takes the usual filter syntax (`sharescan_core=debug`).
/// Without it the level is `info`, or `debug` when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            "sharescan_core=debug,sharescan_cli_lib=debug,sharescan=debug"
        } else {
            "sharescan_core=info,sharescan_cli_lib=info,sharescan=info"
        };
        let filter = EnvFilter::try_from_env("SHARESCAN_LOG")
            .unwrap_or_else(|_| EnvFilter::new(fallback));
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(verbose);

        tracing_subscriber::registry()
            .with(layer)
            .with(filter)
            .init();
    });
}
