use ctor::ctor;
use tracing::Level;

/// Initializes a global `tracing` subscriber at process start, gated by the
/// `TOURNET_LOG` env var (unset, empty, `"0"`, or `"false"` disables it).
#[ctor]
fn init_tracing() {
    if std::env::var("TOURNET_LOG").map_or(true, |v| v == "0" || v == "false" || v.is_empty()) {
        return;
    }
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();
}
