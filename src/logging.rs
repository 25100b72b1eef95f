//! Log filter shared by the binaries

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVES: &str = "info";

/// Filter from `RUST_LOG` when it parses, otherwise [`DEFAULT_DIRECTIVES`]
pub fn env_filter() -> EnvFilter {
    filter_or_default(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

fn filter_or_default(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}
