// ============================================================================
// LingoSync - 国际化模块
// ============================================================================
//
// 文件: src/i18n/mod.rs
// 职责: 界面消息的多语言支持
// 边界:
//   - ✅ 消息表选择与查找
//   - ✅ 翻译宏定义
//   - ✅ 参数化消息支持
//   - ❌ 不应包含具体消息内容
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod en_us;
pub mod zh_cn;

fn table_for(language: &str) -> &'static [(&'static str, &'static str)] {
    match language {
        "zh_cn" => zh_cn::TRANSLATIONS,
        _ => en_us::TRANSLATIONS,
    }
}

/// 获取翻译文本
pub fn get_translation(key: &str) -> String {
    // 每次都从配置获取语言设置
    let language = get_language_from_config().unwrap_or_else(|| "en_us".to_string());
    lookup(&language, key)
}

fn lookup(language: &str, key: &str) -> String {
    table_for(language)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
        .unwrap_or_else(|| format!("Unknown translation key: {}", key))
}

/// 从配置获取语言设置，配置未初始化时返回 None
fn get_language_from_config() -> Option<String> {
    crate::models::config::Config::get_language().ok()
}

/// 简单翻译宏
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::get_translation($key)
    };
}

/// 依次替换模板中的 `{}` 占位符
pub fn format_with_args(template: String, args: Vec<String>) -> String {
    let mut result = template;
    let mut cursor = 0;
    for arg in args.iter() {
        let Some(offset) = result[cursor..].find("{}") else {
            break;
        };
        let pos = cursor + offset;
        result.replace_range(pos..pos + 2, arg);
        cursor = pos + arg.len();
    }
    result
}

/// 带参数的翻译宏
#[macro_export]
macro_rules! tf {
    ($key:expr, $($arg:expr),*) => {{
        let template = $crate::i18n::get_translation($key);
        let args = vec![$(format!("{}", $arg)),*];
        $crate::i18n::format_with_args(template, args)
    }};
}
