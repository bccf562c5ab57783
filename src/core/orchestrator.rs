// ============================================================================
// LingoSync - 任务翻译器
// ============================================================================
//
// 文件: src/core/orchestrator.rs
// 职责: 单个 (语言, 文件) 任务内逐 key 调用翻译服务
// 边界:
//   - ✅ 任务启动检查（翻译服务、语言代码）
//   - ✅ key 串行翻译与调用前节流
//   - ✅ 单次调用超时与失败回退
//   - ✅ 失败上报与进度通知
//   - ❌ 不包含任务分组调度
//   - ❌ 不包含目录写入与缓存登记
//
// ============================================================================

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use crate::core::oracle::{Oracle, OracleError, TranslationRequest};
use crate::core::progress::{NoProgress, ProgressSink};
use crate::core::reporter::{ErrorReporter, FailureReport, TracingReporter};
use crate::core::throttle::{RandomDelay, Throttle};
use crate::models::job::{JobOutcome, KeyOutcome, TranslationJob};
use crate::models::language::{find_language, Language};

/// 任务级错误：任务在处理任何 key 之前被放弃
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("translation service is not available")]
    OracleUnavailable,
}

/// 翻译参数
#[derive(Debug, Clone)]
pub struct TranslatorSettings {
    /// 源语言代码
    pub source_language: String,
    /// 风格微调指令
    pub instructions: Vec<String>,
    /// 单次调用超时
    pub call_timeout: Duration,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            source_language: "en".to_string(),
            instructions: Vec::new(),
            call_timeout: Duration::from_secs(60),
        }
    }
}

/// 任务翻译器
///
/// 翻译服务句柄以只读方式在所有任务间共享；每个任务内 key 严格串行，
/// 上一个 key 的结果（成功或回退）确定之后才会发起下一次调用。
#[derive(Clone)]
pub struct JobTranslator {
    oracle: Option<Arc<dyn Oracle>>,
    settings: Arc<TranslatorSettings>,
    throttle: Arc<dyn Throttle>,
    reporter: Arc<dyn ErrorReporter>,
    progress: Arc<dyn ProgressSink>,
}

impl JobTranslator {
    pub fn new(oracle: Option<Arc<dyn Oracle>>, settings: TranslatorSettings) -> Self {
        Self {
            oracle,
            settings: Arc::new(settings),
            throttle: Arc::new(RandomDelay::from_millis(200, 300)),
            reporter: Arc::new(TracingReporter),
            progress: Arc::new(NoProgress),
        }
    }

    /// 设置节流策略
    pub fn with_throttle(mut self, throttle: Arc<dyn Throttle>) -> Self {
        self.throttle = throttle;
        self
    }

    /// 设置错误上报
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// 设置进度接收方
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn reporter(&self) -> Arc<dyn ErrorReporter> {
        Arc::clone(&self.reporter)
    }

    /// 启动检查：翻译服务可用，源语言与目标语言均受支持
    fn prepare(
        &self,
        job: &TranslationJob,
    ) -> Result<(&Arc<dyn Oracle>, &'static Language, &'static Language), JobError> {
        let oracle = self.oracle.as_ref().ok_or(JobError::OracleUnavailable)?;
        let source = find_language(&self.settings.source_language)
            .ok_or_else(|| JobError::UnsupportedLanguage(self.settings.source_language.clone()))?;
        let target = find_language(&job.language)
            .ok_or_else(|| JobError::UnsupportedLanguage(job.language.clone()))?;
        Ok((oracle, source, target))
    }

    /// 翻译一个任务的全部待翻译 key
    ///
    /// 单个 key 失败只会回退为源文案并上报，不会中断任务。
    pub async fn translate_job(&self, job: &TranslationJob) -> Result<JobOutcome, JobError> {
        let (oracle, source, target) = self.prepare(job)?;

        let label = job.label();
        let total = job.pending.len();
        let started = Instant::now();
        self.progress.on_start(&label, total);

        let mut outcomes = Vec::with_capacity(total);
        for (index, (key, text)) in job.pending.iter().enumerate() {
            let outcome = self
                .translate_key(oracle.as_ref(), source, target, key, text)
                .await;

            if let Some(error) = &outcome.error {
                self.reporter
                    .report(&FailureReport::for_key(error.as_str(), key, &job.language, &job.file));
            }

            outcomes.push(outcome);
            self.progress.on_step(&label, index + 1, total);
        }

        self.progress.on_finish(&label);
        debug!(job = %label, keys = total, elapsed_ms = started.elapsed().as_millis() as u64, "job translated");

        Ok(JobOutcome {
            outcomes,
            duration: started.elapsed(),
        })
    }

    /// 翻译单个 key：先节流，再在超时限制内调用翻译服务
    async fn translate_key(
        &self,
        oracle: &dyn Oracle,
        source: &Language,
        target: &Language,
        key: &str,
        text: &str,
    ) -> KeyOutcome {
        self.throttle.wait().await;

        let request = TranslationRequest {
            text,
            source_language: source.name,
            target_language: target.name,
            instructions: &self.settings.instructions,
        };

        let timeout = self.settings.call_timeout;
        let result = match tokio::time::timeout(timeout, oracle.translate(request)).await {
            Ok(result) => result,
            Err(_) => Err(OracleError::Timeout(timeout)),
        };

        match result {
            Ok(translated) => KeyOutcome::translated(key, translated),
            Err(e) => KeyOutcome::fallback(key, text, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::{
        catalog, shared, CollectingReporter, ConcurrencyGauge, CountingThrottle, FailingOracle,
        HangingOracle, NoDelay, RecordingProgress, ReverseOracle,
    };

    fn translator(oracle: Option<Arc<dyn Oracle>>, reporter: Arc<CollectingReporter>) -> JobTranslator {
        JobTranslator::new(oracle, TranslatorSettings::default())
            .with_throttle(Arc::new(NoDelay))
            .with_reporter(reporter)
    }

    #[tokio::test]
    async fn translates_every_pending_key_in_order() {
        let reporter = Arc::new(CollectingReporter::default());
        let (_, oracle) = shared(ReverseOracle::default());
        let job = TranslationJob::new("ja", "common.json", catalog(&[("a", "Hello"), ("b", "Bye")]));

        let outcome = translator(Some(oracle), reporter.clone())
            .translate_job(&job)
            .await
            .unwrap();

        assert_eq!(
            outcome.outcomes,
            vec![
                KeyOutcome::translated("a", "olleH"),
                KeyOutcome::translated("b", "eyB"),
            ]
        );
        assert!(reporter.reports().is_empty());
    }

    #[tokio::test]
    async fn failing_key_falls_back_and_is_reported() {
        let reporter = Arc::new(CollectingReporter::default());
        let (_, oracle) = shared(FailingOracle::failing_on(&["Bye"]));
        let job = TranslationJob::new(
            "ja",
            "common.json",
            catalog(&[("a", "Hello"), ("b", "Bye"), ("c", "Cat")]),
        );

        let outcome = translator(Some(oracle), reporter.clone())
            .translate_job(&job)
            .await
            .unwrap();

        let map = outcome.result_map();
        assert_eq!(map.get("a"), Some("olleH"));
        assert_eq!(map.get("b"), Some("Bye"));
        assert_eq!(map.get("c"), Some("taC"));
        assert_eq!(outcome.failed_count(), 1);

        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].key, "b");
        assert_eq!(reports[0].language, "ja");
        assert_eq!(reports[0].file, "common.json");
        assert!(reports[0].error_detail.contains("cannot translate Bye"));
    }

    #[tokio::test]
    async fn missing_oracle_abandons_the_job() {
        let reporter = Arc::new(CollectingReporter::default());
        let job = TranslationJob::new("ja", "common.json", catalog(&[("a", "Hello")]));

        let result = translator(None, reporter).translate_job(&job).await;

        assert_eq!(result.unwrap_err(), JobError::OracleUnavailable);
    }

    #[tokio::test]
    async fn unsupported_target_abandons_before_any_call() {
        let reporter = Arc::new(CollectingReporter::default());
        let (reverse, oracle) = shared(ReverseOracle::default());
        let job = TranslationJob::new("klingon", "common.json", catalog(&[("a", "Hello")]));

        let result = translator(Some(oracle), reporter).translate_job(&job).await;

        assert_eq!(
            result.unwrap_err(),
            JobError::UnsupportedLanguage("klingon".to_string())
        );
        assert_eq!(reverse.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_call_times_out_to_source_value() {
        let reporter = Arc::new(CollectingReporter::default());
        let (_, oracle) = shared(HangingOracle);
        let settings = TranslatorSettings {
            call_timeout: Duration::from_secs(2),
            ..Default::default()
        };
        let translator = JobTranslator::new(Some(oracle), settings)
            .with_throttle(Arc::new(NoDelay))
            .with_reporter(reporter.clone());
        let job = TranslationJob::new("ja", "common.json", catalog(&[("a", "Hello")]));

        let outcome = translator.translate_job(&job).await.unwrap();

        assert_eq!(outcome.outcomes[0].value, "Hello");
        assert!(!outcome.outcomes[0].succeeded);
        assert!(reporter.reports()[0].error_detail.contains("timed out"));
    }

    #[tokio::test]
    async fn progress_is_reported_once_per_key() {
        let reporter = Arc::new(CollectingReporter::default());
        let progress = Arc::new(RecordingProgress::default());
        let (_, oracle) = shared(FailingOracle::failing_on(&["x"]));
        let job = TranslationJob::new("ko", "menu.json", catalog(&[("a", "x"), ("b", "y")]));

        translator(Some(oracle), reporter)
            .with_progress(progress.clone())
            .translate_job(&job)
            .await
            .unwrap();

        assert_eq!(
            *progress.steps.lock().unwrap(),
            vec![
                ("ko:menu.json".to_string(), 1, 2),
                ("ko:menu.json".to_string(), 2, 2),
            ]
        );
    }

    #[tokio::test]
    async fn throttle_waits_before_every_call() {
        let reporter = Arc::new(CollectingReporter::default());
        let throttle = Arc::new(CountingThrottle::default());
        let (_, oracle) = shared(FailingOracle::failing_on(&["Bye"]));
        let translator = JobTranslator::new(Some(oracle), TranslatorSettings::default())
            .with_throttle(throttle.clone())
            .with_reporter(reporter);
        let job = TranslationJob::new(
            "ja",
            "common.json",
            catalog(&[("a", "Hello"), ("b", "Bye"), ("c", "Cat")]),
        );

        translator.translate_job(&job).await.unwrap();

        assert_eq!(throttle.waits(), 3);
    }

    #[tokio::test]
    async fn keys_of_one_job_are_translated_one_at_a_time() {
        let reporter = Arc::new(CollectingReporter::default());
        let (gauge, oracle) = shared(ConcurrencyGauge::default());
        let pending: Vec<(String, String)> = (0..6)
            .map(|i| (format!("k{}", i), format!("text {}", i)))
            .collect();
        let entries: Vec<(&str, &str)> = pending
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let job = TranslationJob::new("ja", "common.json", catalog(&entries));

        let outcome = translator(Some(oracle), reporter)
            .translate_job(&job)
            .await
            .unwrap();

        assert_eq!(outcome.translated_count(), 6);
        assert_eq!(outcome.outcomes[5].value, "TEXT 5");
        assert_eq!(gauge.max_in_flight(), 1);
    }
}
