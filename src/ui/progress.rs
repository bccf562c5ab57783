// ============================================================================
// LingoSync - 翻译进度 UI 组件
// ============================================================================
//
// 文件: src/ui/progress.rs
// 职责: 终端进度条显示
// 边界:
//   - ✅ 每个运行中任务一条 key 级进度条
//   - ✅ 整体任务进度条
//   - ✅ 单次请求的等待动画
//   - ❌ 不应包含任务执行逻辑
//   - ❌ 不应包含文件操作逻辑
//
// ============================================================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::core::scheduler::ProgressCallback;
use crate::core::ProgressSink;
use crate::utils::constants::progress_style;

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(progress_style::JOB_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(progress_style::BAR_CHARS)
}

/// 基于 indicatif 的多任务进度显示
///
/// 任务开始时追加一条进度条，结束后移除，底部保留一条整体任务进度条。
pub struct TerminalProgress {
    multi: MultiProgress,
    overall: ProgressBar,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl TerminalProgress {
    pub fn new(total_jobs: usize, label: String) -> Self {
        Self::with_target(total_jobs, label, ProgressDrawTarget::stderr())
    }

    /// 不向终端绘制
    #[cfg(test)]
    pub fn hidden(total_jobs: usize) -> Self {
        Self::with_target(total_jobs, String::new(), ProgressDrawTarget::hidden())
    }

    fn with_target(total_jobs: usize, label: String, target: ProgressDrawTarget) -> Self {
        let multi = MultiProgress::with_draw_target(target);
        let overall = multi.add(ProgressBar::new(total_jobs as u64));
        overall.set_style(bar_style());
        overall.set_message(label);

        Self {
            multi,
            overall,
            bars: Mutex::new(HashMap::new()),
        }
    }

    /// 供调度器使用的整体进度回调
    pub fn job_callback(self: &Arc<Self>) -> ProgressCallback {
        let this = Arc::clone(self);
        Arc::new(move |completed: usize, _total: usize| {
            this.overall.set_position(completed as u64);
        })
    }

    /// 清除全部进度条
    pub fn finish(&self) {
        let mut bars = self.bars.lock().unwrap_or_else(|e| e.into_inner());
        for (_, bar) in bars.drain() {
            bar.finish_and_clear();
        }
        self.overall.finish_and_clear();
    }

    #[cfg(test)]
    fn running_jobs(&self) -> usize {
        self.bars.lock().unwrap().len()
    }
}

impl ProgressSink for TerminalProgress {
    fn on_start(&self, job_id: &str, total: usize) {
        let bar = self
            .multi
            .insert_before(&self.overall, ProgressBar::new(total as u64));
        bar.set_style(bar_style());
        bar.set_message(job_id.to_string());

        let mut bars = self.bars.lock().unwrap_or_else(|e| e.into_inner());
        bars.insert(job_id.to_string(), bar);
    }

    fn on_step(&self, job_id: &str, completed: usize, _total: usize) {
        let bars = self.bars.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(bar) = bars.get(job_id) {
            bar.set_position(completed as u64);
        }
    }

    fn on_finish(&self, job_id: &str) {
        let mut bars = self.bars.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(bar) = bars.remove(job_id) {
            bar.finish_and_clear();
        }
    }
}

/// 单次等待的动画
pub fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template(progress_style::SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(progress_style::SPINNER_TICKS),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
