// ============================================================================
// LingoSync - 连通性检查命令
// ============================================================================
//
// 文件: src/cli/probe.rs
// 职责: 向翻译模型发送单个问题并打印回答
// 边界:
//   - ✅ 使用与翻译相同的服务配置
//   - ❌ 不应读写任何文案或缓存
//
// ============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use crate::core::{OpenAiOracle, OracleError};
use crate::models::config::Config;
use crate::ui::progress::spinner;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 连通性检查参数
#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Question to send
    pub question: String,
}

/// 处理连通性检查命令
pub async fn handle_probe(args: ProbeArgs) -> Result<()> {
    let config = Config::snapshot()?;
    let oracle = OpenAiOracle::from_config(&config.oracle)
        .with_context(|| tf!("translate.missing_api_key", config.oracle.api_key_env))?;

    let waiting = spinner(tf!("probe.asking", oracle.model()));
    let timeout = Duration::from_secs(config.oracle.request_timeout_secs.max(1));
    let answer = tokio::time::timeout(timeout, oracle.ask(&args.question)).await;
    waiting.finish_and_clear();

    match answer {
        Ok(Ok(answer)) => {
            Logger::info(t!("probe.answer"));
            println!("{}", answer);
            Ok(())
        }
        Ok(Err(e)) => {
            Logger::error(tf!("probe.failed", e));
            Err(e.into())
        }
        Err(_) => {
            let e = OracleError::Timeout(timeout);
            Logger::error(tf!("probe.failed", e));
            Err(e.into())
        }
    }
}
