// ============================================================================
// LingoSync - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 全局参数解析与配置合并
//   - ✅ 日志与颜色初始化
//   - ✅ 命令路由分发
//   - ❌ 不应包含具体命令实现逻辑
//   - ❌ 不应包含数据模型定义
//
// ============================================================================

pub mod cache;
pub mod init;
pub mod probe;
pub mod translate;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::models::config::{Config, RuntimeArgs, DEFAULT_CONFIG_FILE};
use crate::utils::colors::Colors;
use crate::utils::logger::init_tracing;
use cache::{handle_cache, CacheArgs};
use init::{handle_init, InitArgs};
use probe::{handle_probe, ProbeArgs};
use translate::{handle_translate, TranslateArgs};

/// LingoSync - Incremental JSON catalog translation
#[derive(Debug, Parser)]
#[command(name = "lingosync")]
#[command(about = "Incrementally translate JSON text catalogs with an LLM")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Global verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interface language (zh_cn, en_us)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Jobs per concurrent group
    #[arg(short = 'j', long, global = true)]
    pub max_concurrency: Option<usize>,

    /// Translation request timeout (seconds)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Translate every pending key into the target languages
    Translate(TranslateArgs),
    /// Manage translation fingerprints
    Cache(CacheArgs),
    /// Initialize configuration file
    Init(InitArgs),
    /// Send a single question to the translation model
    Probe(ProbeArgs),
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    Config::initialize(&cli.config)?;
    // Build runtime args to override config
    Config::merge_runtime_args(build_runtime_args(&cli))?;

    Colors::configure(Config::get_colored());
    init_tracing(Config::get_verbose());

    match cli.command {
        Commands::Translate(args) => handle_translate(args).await,
        Commands::Cache(args) => handle_cache(args).await,
        Commands::Init(args) => handle_init(args, &cli.config),
        Commands::Probe(args) => handle_probe(args).await,
    }
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: if cli.verbose { Some(true) } else { None },
        colored: if cli.no_color { Some(false) } else { None },
        show_progress: if cli.no_progress { Some(false) } else { None },
        max_concurrency: cli.max_concurrency,
        request_timeout_secs: cli.timeout,
        language: cli.language.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_become_runtime_overrides() {
        let cli = Cli::parse_from([
            "lingosync",
            "translate",
            "--languages",
            "ja,ko",
            "-j",
            "4",
            "--no-progress",
            "--language",
            "zh_cn",
        ]);

        let args = build_runtime_args(&cli);

        assert_eq!(args.max_concurrency, Some(4));
        assert_eq!(args.show_progress, Some(false));
        assert_eq!(args.language.as_deref(), Some("zh_cn"));
        assert_eq!(args.verbose, None);
        assert_eq!(args.colored, None);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        match cli.command {
            Commands::Translate(args) => assert_eq!(args.languages, vec!["ja", "ko"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn cache_delete_requires_file_and_keys() {
        assert!(Cli::try_parse_from(["lingosync", "cache", "delete", "--keys", "a"]).is_err());

        let cli = Cli::try_parse_from([
            "lingosync",
            "cache",
            "delete",
            "--file",
            "common.json",
            "--keys",
            "a,b",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Cache(_)));
    }
}
