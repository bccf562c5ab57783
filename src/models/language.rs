// ============================================================================
// LingoSync - 支持语言表
// ============================================================================
//
// 文件: src/models/language.rs
// 职责: 支持翻译的语言代码与名称定义
// 边界:
//   - ✅ 语言代码到名称的静态映射
//   - ✅ 语言代码查询
//   - ❌ 不应包含翻译调用逻辑
//
// ============================================================================

/// 支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// 语言代码，同时也是目录名
    pub code: &'static str,
    /// 传给翻译模型的语言名称
    pub name: &'static str,
}

/// 全部支持的语言
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "zh-CN", name: "Simplified Chinese" },
    Language { code: "zh-TW", name: "Traditional Chinese" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "de", name: "German" },
    Language { code: "es-ES", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "id", name: "Indonesian" },
    Language { code: "it", name: "Italian" },
    Language { code: "ko", name: "Korean" },
    Language { code: "ms", name: "Malay" },
    Language { code: "my", name: "Burmese" },
    Language { code: "ne-NP", name: "Nepali" },
    Language { code: "nl", name: "Dutch" },
    Language { code: "pl", name: "Polish" },
    Language { code: "pt-PT", name: "Portuguese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "tl", name: "Filipino" },
    Language { code: "tr", name: "Turkish" },
    Language { code: "vi", name: "Vietnamese" },
    Language { code: "uk", name: "Ukrainian" },
    Language { code: "ur-PK", name: "Urdu" },
];

/// 按代码查找语言
pub fn find_language(code: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES.iter().find(|language| language.code == code)
}
