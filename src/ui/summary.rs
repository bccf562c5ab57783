// ============================================================================
// LingoSync - 运行结果汇总组件
// ============================================================================
//
// 文件: src/ui/summary.rs
// 职责: 翻译计划与运行结果的终端显示
// 边界:
//   - ✅ 预演计划列表显示
//   - ✅ 任务结果逐条显示
//   - ✅ 汇总统计格式化输出
//   - ✅ 国际化文本支持
//   - ❌ 不应包含任务执行逻辑
//   - ❌ 不应包含文件操作
//
// ============================================================================

use std::io::{self, Write};
use std::time::Duration;

use crate::core::RunPlan;
use crate::models::job::{JobReport, JobStatus, RunSummary};
use crate::utils::colors::Colors;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 渲染预演计划
pub fn render_plan(plan: &RunPlan) {
    if !plan.jobs.is_empty() {
        Logger::info(Colors::bold(&t!("translate.plan_header")));
        for planned in &plan.jobs {
            Logger::info(format!(
                "  {} {}",
                icons::FILE,
                tf!("translate.plan_job", planned.job.label(), planned.job.pending.len())
            ));
        }
    }

    Logger::info(tf!(
        "translate.dry_run_done",
        plan.jobs.len(),
        plan.up_to_date
    ));
}

/// 渲染每个任务的结果
pub fn render_job_reports(reports: &[JobReport]) {
    for report in reports {
        match &report.status {
            JobStatus::Published { translated, failed } => {
                let icon = if *failed == 0 {
                    Colors::success(icons::SUCCESS)
                } else {
                    Colors::warn(icons::WARNING)
                };
                Logger::info(format!(
                    "{} {}",
                    icon,
                    tf!("translate.job_published", report.label, translated, failed)
                ));
            }
            JobStatus::Abandoned(reason) => {
                Logger::warn(format!(
                    "{} {}",
                    Colors::error(icons::ERROR),
                    tf!("translate.job_abandoned", report.label, reason)
                ));
            }
        }
    }
}

/// 汇总行（不含颜色）
pub fn summary_lines(summary: &RunSummary, duration: Duration) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", icons::FILE, tf!("summary.jobs", summary.jobs)),
        format!("{} {}", icons::SUCCESS, tf!("summary.translated", summary.translated_keys)),
        format!("{} {}", icons::WARNING, tf!("summary.failed", summary.failed_keys)),
        format!("{} {}", icons::ERROR, tf!("summary.abandoned", summary.abandoned_jobs)),
        format!("{} {}", icons::SKIP, tf!("summary.up_to_date", summary.up_to_date)),
    ];

    if summary.skipped_files > 0 {
        lines.push(format!(
            "{} {}",
            icons::SKIP,
            tf!("summary.skipped", summary.skipped_files)
        ));
    }

    lines.push(format!(
        "{} {}",
        icons::TIME,
        tf!("summary.duration", format!("{:.2}", duration.as_secs_f64()))
    ));
    lines
}

/// 渲染运行汇总
pub fn render_run_summary(summary: &RunSummary, duration: Duration) {
    Logger::info("");
    Logger::info(format!("{} {}", icons::SUMMARY, Colors::bold(&t!("summary.title"))));
    Logger::info("═══════════════════════════════════════");
    for line in summary_lines(summary, duration) {
        Logger::info(line);
    }

    let _ = io::stdout().flush();
}
