// ============================================================================
// LingoSync - 翻译任务数据模型
// ============================================================================
//
// 文件: src/models/job.rs
// 职责: 翻译任务及其执行结果的数据结构定义
// 边界:
//   - ✅ 翻译任务（语言 + 文件 + 待翻译集合）定义
//   - ✅ 单个 key 的翻译结果定义
//   - ✅ 任务状态与运行汇总定义
//   - ❌ 不应包含翻译执行逻辑
//   - ❌ 不应包含任务调度逻辑
//   - ❌ 不应包含文件操作逻辑
//
// ============================================================================

use std::fmt;
use std::time::Duration;

use crate::models::catalog::Catalog;

/// 一个 (目标语言, 文件) 翻译单元
#[derive(Debug, Clone)]
pub struct TranslationJob {
    /// 目标语言代码
    pub language: String,
    /// 文案文件名（含扩展名）
    pub file: String,
    /// 待翻译集合：key → 当前源语言文案
    pub pending: Catalog,
}

impl TranslationJob {
    pub fn new(language: impl Into<String>, file: impl Into<String>, pending: Catalog) -> Self {
        Self {
            language: language.into(),
            file: file.into(),
            pending,
        }
    }

    /// 任务标识，形如 `ja:common.json`
    pub fn label(&self) -> String {
        format!("{}:{}", self.language, self.file)
    }
}

/// 单个 key 的翻译结果
///
/// 翻译失败时 `value` 为源语言文案，目录里永远不会出现空洞。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    pub key: String,
    pub value: String,
    pub succeeded: bool,
    pub error: Option<String>,
}

impl KeyOutcome {
    /// 翻译成功
    pub fn translated(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            succeeded: true,
            error: None,
        }
    }

    /// 翻译失败，回退为源文案
    pub fn fallback(key: impl Into<String>, source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: source.into(),
            succeeded: false,
            error: Some(error.into()),
        }
    }
}

/// 单个任务全部 key 处理完成后的结果
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// 按处理顺序排列的 key 结果
    pub outcomes: Vec<KeyOutcome>,
    /// 翻译耗时
    pub duration: Duration,
}

impl JobOutcome {
    /// 本次处理过的全部 key 及其最终文案（包含回退的 key）
    pub fn result_map(&self) -> Catalog {
        self.outcomes
            .iter()
            .map(|outcome| (outcome.key.as_str(), outcome.value.as_str()))
            .collect()
    }

    pub fn translated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded).count()
    }
}

/// 任务最终状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// 已写入目录和缓存
    Published { translated: usize, failed: usize },
    /// 任务在处理 key 之前失败，未写入任何内容
    Abandoned(String),
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Published { translated, failed } => {
                write!(f, "Published ({} translated, {} failed)", translated, failed)
            }
            JobStatus::Abandoned(reason) => write!(f, "Abandoned: {}", reason),
        }
    }
}

/// 单个任务的执行报告
#[derive(Debug, Clone)]
pub struct JobReport {
    pub label: String,
    pub status: JobStatus,
}

/// 一次完整运行的汇总
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 调度的任务数
    pub jobs: usize,
    /// 翻译成功的 key 数
    pub translated_keys: usize,
    /// 回退为源文案的 key 数
    pub failed_keys: usize,
    /// 被放弃的任务数
    pub abandoned_jobs: usize,
    /// 没有待翻译内容的 (语言, 文件) 数
    pub up_to_date: usize,
    /// 源文件缺失而跳过的 (语言, 文件) 数
    pub skipped_files: usize,
}

impl RunSummary {
    /// 累加单个任务的报告
    pub fn record(&mut self, report: &JobReport) {
        match &report.status {
            JobStatus::Published { translated, failed } => {
                self.translated_keys += translated;
                self.failed_keys += failed;
            }
            JobStatus::Abandoned(_) => self.abandoned_jobs += 1,
        }
    }
}
