use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Directives come from `RHO_LOG`, falling back to `RUST_LOG`; nothing is
/// installed when neither is set. `force_eval_debug` (the `--trace` flag)
/// adds `rho_eval=debug` on top of whatever the environment asked for.
/// Safe to call more than once.
pub fn init_tracing(force_eval_debug: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        let directives = std::env::var("RHO_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok();
        let directives = match (directives, force_eval_debug) {
            (None, false) => return,
            (Some(directives), false) => directives,
            (Some(directives), true) => format!("{directives},rho_eval=debug"),
            (None, true) => "warn,rho_eval=debug".to_string(),
        };

        let layer = HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_bracketed_fields(true);
        let _ = tracing_subscriber::registry()
            .with(layer)
            .with(EnvFilter::new(directives))
            .try_init();
    });
}
