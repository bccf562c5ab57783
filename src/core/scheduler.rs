// ============================================================================
// LingoSync - 分组任务调度器
// ============================================================================
//
// 文件: src/core/scheduler.rs
// 职责: 通用异步任务的分组并发调度
// 边界:
//   - ✅ 按固定大小分组，组间串行、组内并发
//   - ✅ 任务完成计数与进度回调
//   - ✅ 执行结果聚合（保持提交顺序）
//   - ✅ 任务 panic 隔离
//   - ❌ 不包含具体翻译逻辑
//   - ❌ 不包含 UI 显示逻辑
//   - ❌ 不包含配置管理
//
// ============================================================================

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{debug, error};

/// 任务执行结果枚举
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult<T> {
    /// 任务执行完成
    Success(T),
    /// 任务异常终止（panic 或被运行时取消）
    Failed(String),
}

/// 进度回调函数类型 (completed, total)
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// 调度器配置
#[derive(Clone)]
pub struct SchedulerConfig {
    /// 每组任务数，同一时刻最多有这么多任务在运行
    pub group_size: usize,
    /// 进度回调函数 (completed, total)
    pub progress_callback: Option<ProgressCallback>,
}

impl std::fmt::Debug for SchedulerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerConfig")
            .field("group_size", &self.group_size)
            .field("has_progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            group_size: 8,
            progress_callback: None,
        }
    }
}

/// 分组任务调度器
///
/// 任务按提交顺序切分为大小固定的组；一组内的任务同时启动，全部结束后才启动下一组。
/// 不做动态补位，换取可预测的并发上限。
pub struct GroupScheduler {
    /// 调度器配置
    config: SchedulerConfig,
    /// 已完成任务计数
    completed_count: Arc<AtomicUsize>,
}

impl GroupScheduler {
    /// 创建新的调度器
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            completed_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// 设置进度回调函数
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.config.progress_callback = Some(callback);
        self
    }

    fn group_size(&self) -> usize {
        self.config.group_size.max(1)
    }

    /// 分组执行全部任务，结果顺序与提交顺序一致
    pub async fn execute_groups<T, F>(&self, tasks: Vec<(String, F)>) -> Vec<(String, TaskResult<T>)>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        if tasks.is_empty() {
            return Vec::new();
        }

        let total = tasks.len();
        let group_size = self.group_size();
        self.completed_count.store(0, Ordering::SeqCst);
        debug!(total, group_size, "scheduling task groups");

        let mut results = Vec::with_capacity(total);
        let mut remaining = tasks.into_iter().peekable();
        let mut group_index = 0;

        while remaining.peek().is_some() {
            group_index += 1;
            let group: Vec<(String, F)> = remaining.by_ref().take(group_size).collect();
            let started = Instant::now();
            debug!(group = group_index, size = group.len(), "group started");

            let handles: Vec<(String, JoinHandle<T>)> = group
                .into_iter()
                .map(|(task_id, task)| (task_id, tokio::spawn(task)))
                .collect();

            for (task_id, handle) in handles {
                let result = match handle.await {
                    Ok(value) => TaskResult::Success(value),
                    Err(e) => {
                        error!(task = %task_id, error = %e, "task aborted");
                        TaskResult::Failed(e.to_string())
                    }
                };
                self.update_progress(total);
                results.push((task_id, result));
            }

            debug!(
                group = group_index,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "group completed"
            );
        }

        results
    }

    /// 已完成任务数
    #[cfg(test)]
    pub fn completed(&self) -> usize {
        self.completed_count.load(Ordering::SeqCst)
    }

    /// 更新计数器并调用进度回调
    fn update_progress(&self, total: usize) {
        let completed = self.completed_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(callback) = &self.config.progress_callback {
            callback(completed, total);
        }
    }
}
