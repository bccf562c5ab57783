// ============================================================================
// LingoSync - 测试辅助
// ============================================================================
//
// 文件: src/core/test_utils.rs
// 职责: 测试用的翻译服务桩、节流桩、错误收集器与目录夹具
// 边界:
//   - ✅ 只在 cfg(test) 下编译
//   - ✅ 临时目录中的目录文件读写
//   - ❌ 不应被生产代码引用
//
// ============================================================================

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::oracle::{Oracle, OracleError, TranslationRequest};
use crate::core::progress::ProgressSink;
use crate::core::reporter::{ErrorReporter, FailureReport};
use crate::core::throttle::Throttle;
use crate::models::catalog::Catalog;

/// 把文本倒序作为“翻译”
#[derive(Debug, Default)]
pub struct ReverseOracle {
    pub calls: AtomicUsize,
}

impl ReverseOracle {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Oracle for ReverseOracle {
    async fn translate(&self, request: TranslationRequest<'_>) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(request.text.chars().rev().collect())
    }
}

/// 对指定原文失败，其余倒序
#[derive(Debug)]
pub struct FailingOracle {
    failing: HashSet<String>,
}

impl FailingOracle {
    pub fn failing_on(texts: &[&str]) -> Self {
        Self {
            failing: texts.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Oracle for FailingOracle {
    async fn translate(&self, request: TranslationRequest<'_>) -> Result<String, OracleError> {
        if self.failing.contains(request.text) {
            return Err(OracleError::Status {
                status: 500,
                body: format!("cannot translate {}", request.text),
            });
        }
        Ok(request.text.chars().rev().collect())
    }
}

/// 永不返回
#[derive(Debug, Default)]
pub struct HangingOracle;

#[async_trait]
impl Oracle for HangingOracle {
    async fn translate(&self, _request: TranslationRequest<'_>) -> Result<String, OracleError> {
        std::future::pending().await
    }
}

/// 统计同时进行中的调用数
#[derive(Debug, Default)]
pub struct ConcurrencyGauge {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ConcurrencyGauge {
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Oracle for ConcurrencyGauge {
    async fn translate(&self, request: TranslationRequest<'_>) -> Result<String, OracleError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(request.text.to_uppercase())
    }
}

/// 不等待
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Throttle for NoDelay {
    async fn wait(&self) {}
}

/// 只计数、不等待
#[derive(Debug, Default)]
pub struct CountingThrottle {
    waits: AtomicUsize,
}

impl CountingThrottle {
    pub fn waits(&self) -> usize {
        self.waits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Throttle for CountingThrottle {
    async fn wait(&self) {
        self.waits.fetch_add(1, Ordering::SeqCst);
    }
}

/// 收集上报的失败
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub reports: Mutex<Vec<FailureReport>>,
}

impl CollectingReporter {
    pub fn reports(&self) -> Vec<FailureReport> {
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, failure: &FailureReport) {
        self.reports.lock().unwrap().push(failure.clone());
    }
}

/// 记录进度通知
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub steps: Mutex<Vec<(String, usize, usize)>>,
}

impl ProgressSink for RecordingProgress {
    fn on_step(&self, job_id: &str, completed: usize, total: usize) {
        self.steps
            .lock()
            .unwrap()
            .push((job_id.to_string(), completed, total));
    }
}

pub fn catalog(entries: &[(&str, &str)]) -> Catalog {
    entries.iter().copied().collect()
}

/// 写入 `<root>/<language>/<file>`
pub fn write_json(root: &Path, language: &str, file: &str, content: &str) {
    let dir = root.join(language);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(file), content).unwrap();
}

pub fn read_text(root: &Path, language: &str, file: &str) -> String {
    std::fs::read_to_string(root.join(language).join(file)).unwrap()
}

pub fn shared<T: Oracle + 'static>(oracle: T) -> (Arc<T>, Arc<dyn Oracle>) {
    let oracle = Arc::new(oracle);
    let dynamic: Arc<dyn Oracle> = oracle.clone();
    (oracle, dynamic)
}
