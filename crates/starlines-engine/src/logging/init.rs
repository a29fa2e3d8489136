use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "starlines_engine=debug,wgpu_core=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Filter used when neither the config nor `RUST_LOG` provides one.
///
/// The wgpu stack is chatty at info level, so it is held at warn.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized ({filter})");
    });
}

/// Explicit config wins over `RUST_LOG`, which wins over [`DEFAULT_FILTER`].
/// Blank filters count as absent at every level.
fn resolve_filter(configured: Option<String>, env: Option<String>) -> String {
    let present = |f: &String| !f.trim().is_empty();
    configured
        .filter(present)
        .or_else(|| env.filter(present))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_wins() {
        let f = resolve_filter(Some("debug".into()), Some("trace".into()));
        assert_eq!(f, "debug");
    }

    #[test]
    fn env_filter_used_when_not_configured() {
        let f = resolve_filter(None, Some("warn".into()));
        assert_eq!(f, "warn");
    }

    #[test]
    fn default_quiets_wgpu() {
        let f = resolve_filter(None, None);
        assert_eq!(f, DEFAULT_FILTER);
        assert!(f.contains("wgpu_core=warn"));
        assert!(f.starts_with("info"));
    }

    #[test]
    fn blank_filter_falls_back_to_default() {
        assert_eq!(resolve_filter(Some("  ".into()), None), DEFAULT_FILTER);
        assert_eq!(resolve_filter(None, Some("".into())), DEFAULT_FILTER);
    }

    #[test]
    fn blank_configured_filter_defers_to_env() {
        let f = resolve_filter(Some("  ".into()), Some("warn".into()));
        assert_eq!(f, "warn");
    }
}
