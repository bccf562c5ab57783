// ============================================================================
// LingoSync - Core 核心模块
// ============================================================================
//
// 文件: src/core/mod.rs
// 职责: 核心业务逻辑模块入口和导出
// 边界:
//   - ✅ 核心子模块导出
//   - ✅ 常用类型重新导出
//   - ❌ 不应包含具体业务实现
//   - ❌ 不应包含 CLI 相关逻辑
//   - ❌ 不应包含终端渲染逻辑
//
// ============================================================================

pub mod cache;
pub mod diff;
pub mod oracle;
pub mod orchestrator;
pub mod pipeline;
pub mod progress;
pub mod publish;
pub mod reporter;
pub mod scheduler;
pub mod store;
pub mod throttle;

#[cfg(test)]
pub mod test_utils;

// 重新导出常用类型
pub use cache::CacheStore;
pub use oracle::{OpenAiOracle, Oracle, OracleError};
pub use pipeline::{Pipeline, RunPlan};
pub use progress::ProgressSink;
pub use reporter::FileErrorReporter;
pub use store::CatalogStore;
