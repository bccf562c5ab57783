// ============================================================================
// LingoSync - 翻译命令处理
// ============================================================================
//
// 文件: src/cli/translate.rs
// 职责: 处理增量翻译命令
// 边界:
//   - ✅ 目标语言覆盖与预演
//   - ✅ 翻译服务、错误日志与进度条装配
//   - ✅ 结果与汇总显示
//   - ❌ 不应包含差异计算与合并逻辑
//   - ❌ 不应包含调度逻辑
//
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::core::{FileErrorReporter, OpenAiOracle, Oracle, Pipeline, ProgressSink};
use crate::models::config::Config;
use crate::ui::progress::TerminalProgress;
use crate::ui::summary::{render_job_reports, render_plan, render_run_summary};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 翻译命令参数
#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Target languages, overrides [translate].languages (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Only list pending jobs; nothing is requested or written
    #[arg(long)]
    pub dry_run: bool,
}

/// 处理翻译命令
pub async fn handle_translate(args: TranslateArgs) -> Result<()> {
    let mut config = Config::snapshot()?;
    if !args.languages.is_empty() {
        config.translate.languages = args.languages;
    }
    if config.translate.languages.is_empty() {
        bail!(t!("translate.no_languages"));
    }

    Logger::info(tf!(
        "translate.start",
        config.translate.source_language,
        config.translate.languages.len()
    ));

    if args.dry_run {
        let plan = Pipeline::from_config(&config, None).plan().await;
        render_plan(&plan);
        return Ok(());
    }

    let oracle = OpenAiOracle::from_config(&config.oracle)
        .with_context(|| tf!("translate.missing_api_key", config.oracle.api_key_env))?;
    if config.output.verbose {
        Logger::info(tf!("translate.using_model", oracle.model()));
    }
    let oracle: Arc<dyn Oracle> = Arc::new(oracle);
    let reporter = Arc::new(FileErrorReporter::new(&config.output.error_log));

    let pipeline = Pipeline::from_config(&config, Some(oracle))
        .map_translator(|translator| translator.with_reporter(reporter));

    let plan = pipeline.plan().await;
    if plan.jobs.is_empty() {
        Logger::success(t!("translate.nothing_to_do"));
    }

    let started = Instant::now();
    let show_progress = config.output.show_progress
        && !config.output.verbose
        && !plan.jobs.is_empty()
        && atty::is(atty::Stream::Stderr);

    let (summary, reports) = if show_progress {
        let progress = Arc::new(TerminalProgress::new(
            plan.jobs.len(),
            t!("translate.jobs_progress"),
        ));
        let sink: Arc<dyn ProgressSink> = progress.clone();
        let result = pipeline
            .map_translator(|translator| translator.with_progress(sink))
            .with_job_progress(progress.job_callback())
            .run_plan(plan)
            .await;
        progress.finish();
        result
    } else {
        pipeline.run_plan(plan).await
    };

    render_job_reports(&reports);
    render_run_summary(&summary, started.elapsed());

    if summary.failed_keys > 0 || summary.abandoned_jobs > 0 {
        Logger::warn(tf!(
            "translate.error_log_hint",
            config.output.error_log.display()
        ));
    }

    Ok(())
}
