// src/trace.rs
//! tracing_subscriber の初期化 (プロセス内で 1 回だけ)

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::TraceError;

static SUB_INIT: OnceCell<()> = OnceCell::new();

/// `filter` は `EnvFilter` 形式 (`"info"`, `"atcoder=debug"` など)。
/// 2 回目以降の呼び出しは何もしない。
pub fn init_tracing(filter: &str) -> Result<(), TraceError> {
    SUB_INIT.get_or_try_init(|| setup_subscriber(filter))?;
    Ok(())
}

/// 初期化済みかどうか
pub fn is_initialized() -> bool {
    SUB_INIT.get().is_some()
}

// 出力は stderr (CLI の stdout を汚さない)
fn setup_subscriber(filter: &str) -> Result<(), TraceError> {
    let env_filter =
        EnvFilter::try_new(filter).map_err(|e| TraceError::Filter(filter.to_string(), e.to_string()))?;
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TraceError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_filter_is_rejected_and_not_latched() {
        assert!(matches!(
            init_tracing("atcoder=notalevel"),
            Err(TraceError::Filter(..))
        ));
        assert!(!is_initialized());
    }
}
