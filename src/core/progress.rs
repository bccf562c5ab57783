// ============================================================================
// LingoSync - 翻译进度
// ============================================================================
//
// 文件: src/core/progress.rs
// 职责: 任务内 key 级进度通知接口
// 边界:
//   - ✅ 进度通知 trait 定义
//   - ❌ 不应包含任何终端渲染逻辑
//
// ============================================================================

/// 任务进度接收方，每完成一个 key 调用一次 `on_step`
pub trait ProgressSink: Send + Sync {
    /// 任务开始处理 key 之前调用
    fn on_start(&self, _job_id: &str, _total: usize) {}

    fn on_step(&self, job_id: &str, completed: usize, total: usize);

    /// 任务全部 key 处理完毕后调用
    fn on_finish(&self, _job_id: &str) {}
}

/// 忽略所有进度
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_step(&self, _job_id: &str, _completed: usize, _total: usize) {}
}
