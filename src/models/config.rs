// ============================================================================
// LingoSync - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置文件数据结构定义和操作
// 边界:
//   - ✅ 配置文件数据结构定义
//   - ✅ 配置序列化/反序列化
//   - ✅ 配置默认值
//   - ✅ 配置文件读写操作
//   - ✅ 运行时参数合并
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含 CLI 参数解析
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// 全局配置管理器
static GLOBAL_CONFIG: std::sync::OnceLock<Arc<RwLock<Config>>> = std::sync::OnceLock::new();

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "lingosync.toml";

/// LingoSync 配置文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 翻译配置
    #[serde(default)]
    pub translate: TranslateConfig,
    /// 路径配置
    #[serde(default)]
    pub paths: PathsConfig,
    /// 翻译服务配置
    #[serde(default)]
    pub oracle: OracleConfig,
    /// 执行配置
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
    /// 国际化配置
    #[serde(default)]
    pub i18n: I18nConfig,
}

/// 翻译配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// 源语言代码
    #[serde(default = "Config::default_source_language")]
    pub source_language: String,
    /// 目标语言代码列表
    #[serde(default)]
    pub languages: Vec<String>,
    /// 风格微调指令，原样转发给翻译模型
    #[serde(default)]
    pub fine_tune: Vec<String>,
}

/// 路径配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// 文案根目录（每种语言一个子目录）
    #[serde(default = "Config::default_entry_root")]
    pub entry_root: PathBuf,
    /// 指纹缓存根目录
    #[serde(default = "Config::default_cache_root")]
    pub cache_root: PathBuf,
    /// 翻译输出根目录，不设置时写回文案根目录
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_root: Option<PathBuf>,
}

/// 翻译服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// OpenAI 兼容接口地址
    #[serde(default = "Config::default_base_url")]
    pub base_url: String,
    /// 模型名称
    #[serde(default = "Config::default_model")]
    pub model: String,
    /// 读取 API key 的环境变量名
    #[serde(default = "Config::default_api_key_env")]
    pub api_key_env: String,
    /// 单次请求超时（秒）
    #[serde(default = "Config::default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// 执行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// 每组并发的任务数
    #[serde(default = "Config::default_max_concurrency")]
    pub max_concurrency: usize,
    /// 每次请求前随机等待的下限（毫秒）
    #[serde(default = "Config::default_throttle_min_ms")]
    pub throttle_min_ms: u64,
    /// 每次请求前随机等待的上限（毫秒）
    #[serde(default = "Config::default_throttle_max_ms")]
    pub throttle_max_ms: u64,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 是否显示进度条
    #[serde(default = "Config::default_show_progress")]
    pub show_progress: bool,
    /// 是否详细输出
    #[serde(default)]
    pub verbose: bool,
    /// 是否彩色输出
    #[serde(default = "Config::default_colored")]
    pub colored: bool,
    /// 翻译错误日志文件
    #[serde(default = "Config::default_error_log")]
    pub error_log: PathBuf,
}

/// 国际化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// 界面语言
    #[serde(default = "Config::default_language")]
    pub language: String,
}

/// CLI 运行时参数（用于覆盖配置文件）
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub show_progress: Option<bool>,
    pub max_concurrency: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub language: Option<String>,
}

/// 配置默认值 trait - 不依赖全局配置初始化
pub trait ConfigDefaults {
    fn default_source_language() -> String {
        "en".to_string()
    }

    fn default_entry_root() -> PathBuf {
        PathBuf::from("./langs")
    }

    fn default_cache_root() -> PathBuf {
        PathBuf::from("./cache")
    }

    fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    fn default_model() -> String {
        "gpt-4o".to_string()
    }

    fn default_api_key_env() -> String {
        "OPENAI_API_KEY".to_string()
    }

    fn default_request_timeout() -> u64 {
        60
    }

    /// 获取默认每组并发数
    fn default_max_concurrency() -> usize {
        8
    }

    fn default_throttle_min_ms() -> u64 {
        200
    }

    fn default_throttle_max_ms() -> u64 {
        300
    }

    fn default_show_progress() -> bool {
        true
    }

    fn default_colored() -> bool {
        true
    }

    fn default_error_log() -> PathBuf {
        PathBuf::from("error.log")
    }

    /// 获取默认界面语言
    fn default_language() -> String {
        "en_us".to_string()
    }
}

impl ConfigDefaults for Config {}

impl Config {
    /// 初始化全局配置（程序启动时调用）
    pub fn initialize(config_path: &Path) -> anyhow::Result<()> {
        let config = Self::load_config(config_path)?;
        GLOBAL_CONFIG
            .set(Arc::new(RwLock::new(config)))
            .map_err(|_| anyhow::anyhow!("Global config already initialized"))?;
        Ok(())
    }

    /// 加载配置文件，不存在时使用默认配置
    pub fn load_config(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 合并运行时参数
    pub fn merge_runtime_args(args: RuntimeArgs) -> anyhow::Result<()> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let mut config = global_config
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config write lock"))?;

        config.apply_runtime_args(args);
        Ok(())
    }

    /// 将运行时参数应用到当前配置
    pub fn apply_runtime_args(&mut self, args: RuntimeArgs) {
        if let Some(verbose) = args.verbose {
            self.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            self.output.colored = colored;
        }
        if let Some(show_progress) = args.show_progress {
            self.output.show_progress = show_progress;
        }
        if let Some(max_concurrency) = args.max_concurrency {
            self.execution.max_concurrency = max_concurrency;
        }
        if let Some(timeout) = args.request_timeout_secs {
            self.oracle.request_timeout_secs = timeout;
        }
        if let Some(language) = args.language {
            self.i18n.language = language;
        }
    }

    /// 获取全局配置快照，供需要完整配置的命令显式传递
    pub fn snapshot() -> anyhow::Result<Config> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let config = global_config
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;

        Ok(config.clone())
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, format!("{}{}", TEMPLATE_HEADER, content))?;
        Ok(())
    }

    /// 生成默认配置模板
    pub fn generate_default_template() -> Self {
        let mut config = Self::default();
        config.translate.languages = vec!["zh-CN".to_string(), "ja".to_string(), "ko".to_string()];
        config.translate.fine_tune = vec![
            "You are a professional software localization assistant".to_string(),
            "Keep the tone and placeholders of the original text".to_string(),
        ];
        config.paths.output_root = Some(PathBuf::from("./output"));
        config
    }

    /// 生成默认配置模板并保存到文件
    pub fn create_default_config_file(config_path: &Path) -> anyhow::Result<()> {
        Self::generate_default_template().save_to_file(config_path)
    }

    /// 翻译结果输出根目录（未配置时为文案根目录）
    pub fn output_root(&self) -> &Path {
        self.paths
            .output_root
            .as_deref()
            .unwrap_or(&self.paths.entry_root)
    }

    /// 获取界面语言
    pub fn get_language() -> anyhow::Result<String> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let config = global_config
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;

        Ok(config.i18n.language.clone())
    }

    /// 获取详细输出设置（带默认值）
    pub fn get_verbose() -> bool {
        match Self::get_verbose_from_config() {
            Ok(verbose) => verbose,
            _ => false,
        }
    }

    fn get_verbose_from_config() -> anyhow::Result<bool> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let config = global_config
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;

        Ok(config.output.verbose)
    }

    /// 获取是否彩色输出（带默认值）
    pub fn get_colored() -> bool {
        GLOBAL_CONFIG
            .get()
            .and_then(|config| config.read().ok().map(|c| c.output.colored))
            .unwrap_or_else(Self::default_colored)
    }
}

/// 配置模板头部注释
const TEMPLATE_HEADER: &str = "\
# LingoSync configuration
#
# [translate]  source language, target languages and style instructions
# [paths]      catalog root (<entry_root>/<language>/<file>.json), cache and output roots
# [oracle]     OpenAI compatible endpoint; the API key is read from `api_key_env`
# [execution]  jobs per concurrent group and the random delay before each request

";

impl Default for Config {
    fn default() -> Self {
        Self {
            translate: TranslateConfig::default(),
            paths: PathsConfig::default(),
            oracle: OracleConfig::default(),
            execution: ExecutionConfig::default(),
            output: OutputConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            source_language: Config::default_source_language(),
            languages: Vec::new(),
            fine_tune: Vec::new(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            entry_root: Config::default_entry_root(),
            cache_root: Config::default_cache_root(),
            output_root: None,
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: Config::default_base_url(),
            model: Config::default_model(),
            api_key_env: Config::default_api_key_env(),
            request_timeout_secs: Config::default_request_timeout(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_concurrency: Config::default_max_concurrency(),
            throttle_min_ms: Config::default_throttle_min_ms(),
            throttle_max_ms: Config::default_throttle_max_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_progress: Config::default_show_progress(),
            verbose: false,
            colored: Config::default_colored(),
            error_log: Config::default_error_log(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: Config::default_language(),
        }
    }
}
