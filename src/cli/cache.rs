// ============================================================================
// LingoSync - 缓存命令处理
// ============================================================================
//
// 文件: src/cli/cache.rs
// 职责: 处理指纹缓存的生成与删除命令
// 边界:
//   - ✅ 根据已有翻译生成指纹
//   - ✅ 删除指定 key 的指纹以强制重新翻译
//   - ❌ 不应包含指纹文件读写细节
//
// ============================================================================

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::core::{CacheStore, CatalogStore};
use crate::models::config::Config;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 缓存命令参数
#[derive(Debug, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Rebuild fingerprints from catalogs that are already translated
    Generate {
        /// Languages to generate (defaults to [translate].languages)
        #[arg(long, value_delimiter = ',')]
        languages: Vec<String>,
    },
    /// Forget fingerprints so the keys are translated again on the next run
    Delete {
        /// Catalog file name, e.g. common.json
        #[arg(long)]
        file: String,

        /// Keys to forget (comma separated)
        #[arg(long, value_delimiter = ',', required = true)]
        keys: Vec<String>,

        /// Languages to update (defaults to every cached language)
        #[arg(long, value_delimiter = ',')]
        languages: Vec<String>,
    },
}

/// 处理缓存命令
pub async fn handle_cache(args: CacheArgs) -> Result<()> {
    let config = Config::snapshot()?;
    let cache = CacheStore::new(&config.paths.cache_root);

    match args.command {
        CacheCommand::Generate { languages } => {
            let languages = if languages.is_empty() {
                config.translate.languages.clone()
            } else {
                languages
            };
            let catalogs = CatalogStore::new(
                &config.paths.entry_root,
                config.output_root(),
                &config.translate.source_language,
            );

            Logger::info(t!("cache.generate_start"));
            let report = cache
                .generate(&catalogs, &languages)
                .await
                .context("cache generation failed")?;
            Logger::success(tf!("cache.generate_done", report.files, report.entries));
        }
        CacheCommand::Delete {
            file,
            keys,
            languages,
        } => {
            let updated = cache
                .delete_keys(&keys, &languages, &file)
                .await
                .with_context(|| format!("failed to delete keys from {}", file))?;

            if updated.is_empty() {
                Logger::warn(tf!("cache.delete_none", file));
            } else {
                Logger::success(tf!("cache.delete_done", file, updated.join(", ")));
            }
        }
    }

    Ok(())
}
