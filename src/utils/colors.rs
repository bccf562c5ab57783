// ============================================================================
// LingoSync - 颜色工具
// ============================================================================
//
// 文件: src/utils/colors.rs
// 职责: 终端颜色输出
// 边界:
//   - ✅ 日志级别配色
//   - ✅ 全局彩色开关
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含 UI 组件实现
//
// ============================================================================

use colored::Colorize;

/// 颜色工具函数
pub struct Colors;

impl Colors {
    /// 按配置开启或关闭彩色输出；非终端输出时始终关闭
    pub fn configure(enabled: bool) {
        let is_tty = atty::is(atty::Stream::Stdout);
        colored::control::set_override(enabled && is_tty);
    }

    /// 信息颜色 (青色)
    pub fn info(text: &str) -> String {
        text.cyan().to_string()
    }

    /// 警告颜色 (黄色)
    pub fn warn(text: &str) -> String {
        text.yellow().to_string()
    }

    /// 错误颜色 (红色)
    pub fn error(text: &str) -> String {
        text.red().to_string()
    }

    /// 成功颜色 (绿色)
    pub fn success(text: &str) -> String {
        text.green().to_string()
    }

    /// 加粗
    pub fn bold(text: &str) -> String {
        text.bold().to_string()
    }
}
