// ============================================================================
// LingoSync - 日志工具
// ============================================================================
//
// 文件: src/utils/logger.rs
// 职责: 控制台消息输出与 tracing 初始化
// 边界:
//   - ✅ 面向用户的带前缀消息
//   - ✅ tracing 订阅器初始化（输出到 stderr）
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含错误日志文件写入
//
// ============================================================================

use tracing_subscriber::EnvFilter;

use super::colors::Colors;
use super::constants::APP_NAME;

/// 简单的日志工具
pub struct Logger;

impl Logger {
    fn prefix() -> String {
        format!("[{}]", APP_NAME)
    }

    pub fn info<S: AsRef<str>>(msg: S) {
        println!("{} {}", Colors::info(&Self::prefix()), msg.as_ref());
    }

    pub fn warn<S: AsRef<str>>(msg: S) {
        println!("{} {}", Colors::warn("[WARN]"), msg.as_ref());
    }

    pub fn error<S: AsRef<str>>(msg: S) {
        eprintln!("{} {}", Colors::error("[ERROR]"), msg.as_ref());
    }

    pub fn success<S: AsRef<str>>(msg: S) {
        println!("{} {}", Colors::success(&Self::prefix()), msg.as_ref());
    }
}

/// 初始化 tracing 订阅器
///
/// 优先使用 `RUST_LOG`，否则详细模式为 `debug`，默认只输出 `warn` 及以上。
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）时忽略
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
