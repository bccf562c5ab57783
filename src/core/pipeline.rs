// ============================================================================
// LingoSync - 增量翻译流水线
// ============================================================================
//
// 文件: src/core/pipeline.rs
// 职责: 串联差异计算、分组调度、任务翻译与合并发布
// 边界:
//   - ✅ 扫描源语言文件并为每个 (目标语言, 文件) 生成任务
//   - ✅ 空源文件直接发布空目录
//   - ✅ 按组调度任务并汇总结果
//   - ✅ 任务级失败上报（key 为空）
//   - ❌ 不包含 CLI 参数处理
//   - ❌ 不包含终端渲染
//
// ============================================================================

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::cache::CacheStore;
use crate::core::diff::compute_pending;
use crate::core::oracle::Oracle;
use crate::core::orchestrator::{JobTranslator, TranslatorSettings};
use crate::core::publish::Publisher;
use crate::core::reporter::{ErrorReporter, FailureReport};
use crate::core::scheduler::{GroupScheduler, ProgressCallback, SchedulerConfig, TaskResult};
use crate::core::store::CatalogStore;
use crate::core::throttle::RandomDelay;
use crate::models::catalog::Catalog;
use crate::models::config::Config;
use crate::models::job::{JobReport, JobStatus, RunSummary, TranslationJob};

/// 已规划的任务及其源目录快照
#[derive(Debug, Clone)]
pub struct PlannedJob {
    pub job: TranslationJob,
    /// 任务开始时的源目录，用于合并兜底与指纹登记
    pub source: Arc<Catalog>,
}

/// 一次运行的规划结果
#[derive(Debug, Clone, Default)]
pub struct RunPlan {
    pub jobs: Vec<PlannedJob>,
    /// 无需翻译的 (语言, 文件) 数
    pub up_to_date: usize,
    /// 源文件缺失或损坏而跳过的 (语言, 文件) 数
    pub skipped_files: usize,
    /// 源目录为空、需要发布空目录的 (语言, 文件)
    pub empty_catalogs: Vec<(String, String)>,
}

/// 增量翻译流水线
#[derive(Clone)]
pub struct Pipeline {
    catalogs: CatalogStore,
    cache: CacheStore,
    targets: Vec<String>,
    group_size: usize,
    translator: JobTranslator,
    job_progress: Option<ProgressCallback>,
}

impl Pipeline {
    pub fn new(
        catalogs: CatalogStore,
        cache: CacheStore,
        targets: Vec<String>,
        translator: JobTranslator,
    ) -> Self {
        Self {
            catalogs,
            cache,
            targets,
            group_size: 8,
            translator,
            job_progress: None,
        }
    }

    /// 按配置构建流水线，进度与错误上报由调用方注入
    pub fn from_config(config: &Config, oracle: Option<Arc<dyn Oracle>>) -> Self {
        let catalogs = CatalogStore::new(
            &config.paths.entry_root,
            config.output_root(),
            &config.translate.source_language,
        );
        let cache = CacheStore::new(&config.paths.cache_root);
        let settings = TranslatorSettings {
            source_language: config.translate.source_language.clone(),
            instructions: config.translate.fine_tune.clone(),
            call_timeout: Duration::from_secs(config.oracle.request_timeout_secs.max(1)),
        };
        let translator = JobTranslator::new(oracle, settings).with_throttle(Arc::new(
            RandomDelay::from_millis(
                config.execution.throttle_min_ms,
                config.execution.throttle_max_ms,
            ),
        ));

        Self::new(catalogs, cache, config.translate.languages.clone(), translator)
            .with_group_size(config.execution.max_concurrency)
    }

    /// 设置每组并发任务数
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size.max(1);
        self
    }

    /// 替换任务翻译器（用于注入进度与错误上报）
    pub fn map_translator(mut self, f: impl FnOnce(JobTranslator) -> JobTranslator) -> Self {
        self.translator = f(self.translator);
        self
    }

    /// 设置任务级进度回调 (completed, total)
    pub fn with_job_progress(mut self, callback: ProgressCallback) -> Self {
        self.job_progress = Some(callback);
        self
    }

    fn publisher(&self) -> Publisher {
        Publisher::new(self.catalogs.clone(), self.cache.clone())
    }

    /// 规划：对每个 (目标语言, 源文件) 计算待翻译集合，不写入任何文件
    pub async fn plan(&self) -> RunPlan {
        let mut plan = RunPlan::default();
        let files = self.catalogs.source_files();
        let source_language = self.catalogs.source_language().to_string();

        info!(files = files.len(), targets = self.targets.len(), "planning translation run");

        // 重复的目标语言只规划一次
        let mut seen = HashSet::new();
        for language in &self.targets {
            if *language == source_language || !seen.insert(language.as_str()) {
                continue;
            }

            for file in &files {
                let source = match self.catalogs.load_source(file).await {
                    Ok(Some(source)) => Arc::new(source),
                    Ok(None) => {
                        info!(file = %file, "source catalog not found, skipping");
                        plan.skipped_files += 1;
                        continue;
                    }
                    Err(e) => {
                        warn!(error = %e, "source catalog unreadable, skipping");
                        plan.skipped_files += 1;
                        continue;
                    }
                };

                let fingerprint = self.cache.load(language, file).await;
                let pending = compute_pending(&fingerprint, &source);

                if pending.is_empty() {
                    if source.is_empty() {
                        plan.empty_catalogs.push((language.clone(), file.clone()));
                    }
                    plan.up_to_date += 1;
                    continue;
                }

                plan.jobs.push(PlannedJob {
                    job: TranslationJob::new(language.clone(), file.clone(), pending),
                    source,
                });
            }
        }

        plan
    }

    /// 为空源目录发布空目录，以区分“有意为空”与“尚未处理”
    async fn publish_empty(&self, empty_catalogs: &[(String, String)]) {
        let publisher = self.publisher();
        let reporter = self.translator.reporter();
        let empty = Catalog::new();

        for (language, file) in empty_catalogs {
            if let Err(e) = publisher.publish(language, file, &empty, &empty).await {
                reporter.report(&FailureReport::for_job(e.to_string(), language, file));
            }
        }
    }

    /// 分组执行已规划的任务
    pub async fn execute(&self, jobs: Vec<PlannedJob>) -> Vec<JobReport> {
        let mut scheduler = GroupScheduler::new(SchedulerConfig {
            group_size: self.group_size,
            progress_callback: None,
        });
        if let Some(callback) = &self.job_progress {
            scheduler = scheduler.with_progress_callback(Arc::clone(callback));
        }

        let tasks: Vec<(String, _)> = jobs
            .into_iter()
            .map(|planned| {
                let label = planned.job.label();
                let translator = self.translator.clone();
                let publisher = self.publisher();
                (label, run_job(translator, publisher, planned))
            })
            .collect();

        let reports: Vec<JobReport> = scheduler
            .execute_groups(tasks)
            .await
            .into_iter()
            .map(|(label, result)| match result {
                TaskResult::Success(report) => report,
                TaskResult::Failed(reason) => JobReport {
                    label,
                    status: JobStatus::Abandoned(reason),
                },
            })
            .collect();

        for report in &reports {
            info!(job = %report.label, status = %report.status, "job finished");
        }
        reports
    }

    /// 规划并执行一次完整运行
    #[cfg(test)]
    pub async fn run(&self) -> (RunSummary, Vec<JobReport>) {
        let plan = self.plan().await;
        self.run_plan(plan).await
    }

    /// 执行已有的规划结果
    pub async fn run_plan(&self, plan: RunPlan) -> (RunSummary, Vec<JobReport>) {
        let mut summary = RunSummary {
            jobs: plan.jobs.len(),
            up_to_date: plan.up_to_date,
            skipped_files: plan.skipped_files,
            ..Default::default()
        };

        self.publish_empty(&plan.empty_catalogs).await;
        let reports = self.execute(plan.jobs).await;
        for report in &reports {
            summary.record(report);
        }

        (summary, reports)
    }
}

/// 执行单个任务：翻译全部 key，然后合并发布
///
/// 任何失败都只影响本任务，并以空 key 上报。
async fn run_job(translator: JobTranslator, publisher: Publisher, planned: PlannedJob) -> JobReport {
    let PlannedJob { job, source } = planned;
    let label = job.label();
    let reporter = translator.reporter();

    let outcome = match translator.translate_job(&job).await {
        Ok(outcome) => outcome,
        Err(e) => {
            reporter.report(&FailureReport::for_job(e.to_string(), &job.language, &job.file));
            return JobReport {
                label,
                status: JobStatus::Abandoned(e.to_string()),
            };
        }
    };

    // 回退为源文案的 key 同样推进指纹
    let results = outcome.result_map();
    if let Err(e) = publisher
        .publish(&job.language, &job.file, &source, &results)
        .await
    {
        reporter.report(&FailureReport::for_job(e.to_string(), &job.language, &job.file));
        return JobReport {
            label,
            status: JobStatus::Abandoned(e.to_string()),
        };
    }

    debug!(job = %label, elapsed_ms = outcome.duration.as_millis() as u64, "job published");
    JobReport {
        label,
        status: JobStatus::Published {
            translated: outcome.translated_count(),
            failed: outcome.failed_count(),
        },
    }
}
