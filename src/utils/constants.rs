// ============================================================================
// LingoSync - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 应用程序常量定义
// 边界:
//   - ✅ 应用名称与文件扩展名
//   - ✅ 终端图标字符定义
//   - ✅ 进度条样式定义
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

/// 应用名称常量
pub const APP_NAME: &str = "LINGOSYNC";

/// 文案目录文件扩展名
pub const CATALOG_EXTENSION: &str = "json";

/// 终端图标
pub mod icons {
    /// 成功图标
    pub const SUCCESS: &str = "✓";
    /// 错误图标
    pub const ERROR: &str = "✗";
    /// 警告图标
    pub const WARNING: &str = "!";
    /// 文件图标
    pub const FILE: &str = "●";
    /// 时间图标
    pub const TIME: &str = "⧖";
    /// 汇总图标
    pub const SUMMARY: &str = "◈";
    /// 跳过图标
    pub const SKIP: &str = "○";
}

/// 进度条样式
pub mod progress_style {
    /// 单个任务的进度条模板
    pub const JOB_TEMPLATE: &str = "{bar:40.cyan/blue} | {percent:>3}% | {msg} {pos}/{len}";
    /// 进度条字符（已完成、当前、未完成）
    pub const BAR_CHARS: &str = "█▓░";
    /// 等待动画模板
    pub const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
    /// 等待动画帧
    pub const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧ ";
}
