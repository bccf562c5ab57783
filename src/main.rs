// ============================================================================
// LingoSync - 程序入口
// ============================================================================
//
// 文件: src/main.rs
// 职责: 模块声明与异步运行时启动
// 边界:
//   - ✅ 启动 tokio 运行时并调用 CLI
//   - ✅ 顶层错误输出与退出码
//   - ❌ 不应包含命令实现
//
// ============================================================================

mod cli;
mod core;
mod i18n;
mod models;
mod ui;
mod utils;

use utils::logger::Logger;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run_cli().await {
        Logger::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
