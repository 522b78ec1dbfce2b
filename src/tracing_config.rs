//! Tracing setup for binaries that embed the merge pipeline.
//!
//! Output format is picked with `IDLX_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans via `tracing-tree`, one level per pipeline phase
//! - `json`: one JSON object per span or event
//!
//! ```bash
//! # Every warning as it is pushed
//! IDLX_LOG=warn generator
//!
//! # Per-pass summaries, grouped by phase
//! IDLX_LOG=debug IDLX_LOG_FORMAT=tree generator
//!
//! # Follow overload folding only
//! IDLX_LOG="idlx_merge::overload=trace" generator
//! ```
//!
//! Nothing is installed unless `IDLX_LOG` or `RUST_LOG` is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("IDLX_LOG_FORMAT").unwrap_or_default())
    }
}

/// `IDLX_LOG` wins over `RUST_LOG`; both use `RUST_LOG` syntax.
fn build_filter() -> EnvFilter {
    match std::env::var("IDLX_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber, writing to stderr.
///
/// Returns whether a subscriber was installed: `false` when neither
/// `IDLX_LOG` nor `RUST_LOG` is set, or when one is already in place.
pub fn init_tracing() -> bool {
    if std::env::var_os("IDLX_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return false;
    }

    let filter = build_filter();
    let installed = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree).try_init()
        }
        LogFormat::Json => {
            let json = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json).try_init()
        }
        LogFormat::Text => {
            let text = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text).try_init()
        }
    };
    // The embedding binary may have installed its own subscriber first.
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
    }

    #[test]
    fn test_init_tracing_installs_at_most_once() {
        init_tracing();
        assert!(!init_tracing());
    }
}
