// ============================================================================
// LingoSync - 翻译错误上报
// ============================================================================
//
// 文件: src/core/reporter.rs
// 职责: key 级与任务级翻译失败的记录
// 边界:
//   - ✅ 错误上报 trait 定义
//   - ✅ 追加写入错误日志文件
//   - ✅ tracing 事件输出
//   - ❌ 上报过程不得向调用方返回错误
//   - ❌ 不应包含重试逻辑
//
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{error, warn};

/// 一次翻译失败
///
/// `key` 为空表示任务级失败（任务在处理任何 key 之前就被放弃）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub error_detail: String,
    pub key: String,
    pub language: String,
    pub file: String,
}

impl FailureReport {
    /// key 级失败
    pub fn for_key(
        error_detail: impl Into<String>,
        key: impl Into<String>,
        language: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            error_detail: error_detail.into(),
            key: key.into(),
            language: language.into(),
            file: file.into(),
        }
    }

    /// 任务级失败
    pub fn for_job(
        error_detail: impl Into<String>,
        language: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self::for_key(error_detail, String::new(), language, file)
    }

    pub fn is_job_level(&self) -> bool {
        self.key.is_empty()
    }
}

/// 错误上报，调用后即忘，不得 panic 也不返回错误
pub trait ErrorReporter: Send + Sync {
    fn report(&self, failure: &FailureReport);
}

/// 只输出 tracing 事件
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, failure: &FailureReport) {
        if failure.is_job_level() {
            error!(
                language = %failure.language,
                file = %failure.file,
                "job abandoned: {}",
                failure.error_detail
            );
            return;
        }
        error!(
            language = %failure.language,
            file = %failure.file,
            key = %failure.key,
            "translation failed: {}",
            failure.error_detail
        );
    }
}

/// 追加写入错误日志文件，同时输出 tracing 事件
#[derive(Debug)]
pub struct FileErrorReporter {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileErrorReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn format_entry(failure: &FailureReport) -> String {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown-time".to_string());

        format!(
            "{} - Error: {}\nLanguage: {}\nFileName: {}\nKey: {}\n\n",
            timestamp, failure.error_detail, failure.language, failure.file, failure.key
        )
    }

    /// 同步追加一条记录，返回时已写入
    ///
    /// 在多线程运行时的工作线程上调用时，经 `block_in_place` 让出该线程再写。
    fn append(&self, entry: &str) -> std::io::Result<()> {
        let write = || {
            let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            file.write_all(entry.as_bytes())
        };

        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(write)
            }
            _ => write(),
        }
    }
}

impl ErrorReporter for FileErrorReporter {
    fn report(&self, failure: &FailureReport) {
        TracingReporter.report(failure);

        if let Err(e) = self.append(&Self::format_entry(failure)) {
            warn!(path = %self.path.display(), error = %e, "failed to write error log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn job_level_reports_have_empty_key() {
        let report = FailureReport::for_job("unsupported language: xx", "xx", "common.json");
        assert!(report.is_job_level());
        assert!(!FailureReport::for_key("boom", "a", "ja", "common.json").is_job_level());
    }

    #[test]
    fn file_reporter_appends_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("error.log");
        let reporter = FileErrorReporter::new(&path);

        reporter.report(&FailureReport::for_key("boom", "greeting", "ja", "common.json"));
        reporter.report(&FailureReport::for_job("no client", "ko", "common.json"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("Error: ").count(), 2);
        assert!(content.contains("Error: boom\nLanguage: ja\nFileName: common.json\nKey: greeting"));
        assert!(content.contains("Language: ko"));
    }

    #[test]
    fn unwritable_log_does_not_panic() {
        let dir = TempDir::new().unwrap();
        let reporter = FileErrorReporter::new(dir.path().join("missing/dir/error.log"));
        reporter.report(&FailureReport::for_key("boom", "a", "ja", "common.json"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn reports_from_runtime_workers_are_on_disk_when_report_returns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("error.log");
        let reporter = Arc::new(FileErrorReporter::new(&path));

        let handles: Vec<_> = ["ja", "ko", "fr", "de"]
            .into_iter()
            .map(|language| {
                let reporter = Arc::clone(&reporter);
                tokio::spawn(async move {
                    reporter.report(&FailureReport::for_key("boom", "a", language, "common.json"));
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("Error: boom\n").count(), 4);
        for language in ["ja", "ko", "fr", "de"] {
            assert!(content.contains(&format!("Language: {}\nFileName: common.json", language)));
        }
    }

    #[tokio::test]
    async fn current_thread_runtime_writes_inline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("error.log");
        let reporter = FileErrorReporter::new(&path);

        reporter.report(&FailureReport::for_job("no client", "ko", "common.json"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Error: no client\nLanguage: ko"));
    }
}
