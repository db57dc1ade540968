//! 日志初始化模块

use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 默认级别为 info（开启详细日志时为 debug），可通过 RUST_LOG 环境变量覆盖。
/// 重复初始化是无操作，测试里可以放心多次调用
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
