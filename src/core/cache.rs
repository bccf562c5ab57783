// ============================================================================
// LingoSync - 翻译指纹缓存
// ============================================================================
//
// 文件: src/core/cache.rs
// 职责: 按 (目标语言, 文件) 持久化“翻译时所用的源文案”
// 边界:
//   - ✅ 指纹读取（缺失/损坏视为空）
//   - ✅ 指纹登记（只记录本次处理过的 key）
//   - ✅ 指纹批量删除
//   - ✅ 根据已有翻译生成指纹
//   - ❌ 不应保存翻译结果本身
//   - ❌ 不应包含差异计算逻辑
//
// ============================================================================

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::core::store::{self, CatalogStore, StoreError};
use crate::models::catalog::Catalog;

/// 指纹缓存：`<cache_root>/<language>/<file>`
///
/// 每个 key 的值是该 key 上一次被翻译时的源语言文案，用于判断翻译是否过期。
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

/// 生成缓存的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// 写入的缓存文件数
    pub files: usize,
    /// 写入的指纹条目数
    pub entries: usize,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 缓存文件路径
    pub fn path(&self, language: &str, file: &str) -> PathBuf {
        self.root.join(language).join(file)
    }

    /// 读取指纹，文件不存在或无法解析时返回空表
    pub async fn load(&self, language: &str, file: &str) -> Catalog {
        store::read_catalog_or_empty(&self.path(language, file)).await
    }

    /// 登记指纹：对每个处理过的 key 记录其当前源文案
    ///
    /// 没有处理过任何 key 时不做任何事，连目录也不会创建。
    pub async fn register<'a, I>(
        &self,
        language: &str,
        file: &str,
        source: &Catalog,
        processed_keys: I,
    ) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut keys = processed_keys.into_iter().peekable();
        if keys.peek().is_none() {
            return Ok(());
        }

        let mut fingerprint = self.load(language, file).await;
        for key in keys {
            if let Some(value) = source.get(key) {
                fingerprint.insert(key, value);
            }
        }

        store::write_catalog(&self.path(language, file), &fingerprint).await
    }

    /// 已缓存的语言目录
    pub fn cached_languages(&self) -> Result<Vec<String>, StoreError> {
        store::list_subdirectories(&self.root)
    }

    /// 从指定语言的指纹中删除 key
    ///
    /// `languages` 为空时作用于所有已缓存语言，否则取已缓存语言与请求语言的交集。
    /// 返回实际写回的语言列表。
    pub async fn delete_keys(
        &self,
        keys: &[String],
        languages: &[String],
        file: &str,
    ) -> Result<Vec<String>, StoreError> {
        let cached = self.cached_languages()?;
        let selected: Vec<String> = if languages.is_empty() {
            cached
        } else {
            let requested: HashSet<&str> = languages.iter().map(String::as_str).collect();
            cached
                .into_iter()
                .filter(|language| requested.contains(language.as_str()))
                .collect()
        };

        let mut updated = Vec::new();
        for language in selected {
            let path = self.path(&language, file);
            let Some(mut fingerprint) = store::read_catalog(&path).await? else {
                debug!(language = %language, file = %file, "no cache file to delete from");
                continue;
            };

            let removed = keys.iter().filter(|key| fingerprint.remove(key)).count();
            store::write_catalog(&path, &fingerprint).await?;
            info!(language = %language, file = %file, removed, "cache keys deleted");
            updated.push(language);
        }

        Ok(updated)
    }

    /// 根据文案根目录中已有的翻译生成指纹
    ///
    /// 对每个语言的每个文件，翻译值非空的 key 记录源语言中对应的文案；
    /// 源语言中没有的 key 会被跳过。已存在的缓存文件会被整体覆盖。
    pub async fn generate(
        &self,
        catalogs: &CatalogStore,
        languages: &[String],
    ) -> Result<GenerateReport, StoreError> {
        let mut report = GenerateReport::default();
        if languages.is_empty() {
            return Ok(report);
        }

        for language in languages {
            for file in catalogs.entry_files(language) {
                let Some(source) = catalogs.load_source(&file).await? else {
                    warn!(file = %file, "source catalog missing, cache not generated");
                    continue;
                };
                let translated = match catalogs.load_entry(language, &file).await {
                    Ok(Some(catalog)) => catalog,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!(error = %e, "skipping unreadable translated catalog");
                        continue;
                    }
                };

                let fingerprint: Catalog = translated
                    .iter()
                    .filter(|(_, value)| !value.is_empty())
                    .filter_map(|(key, _)| source.get(key).map(|text| (key, text)))
                    .collect();

                store::write_catalog(&self.path(language, &file), &fingerprint).await?;
                report.files += 1;
                report.entries += fingerprint.len();
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog(entries: &[(&str, &str)]) -> Catalog {
        entries.iter().copied().collect()
    }

    #[tokio::test]
    async fn load_missing_cache_is_empty() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::new(dir.path());
        assert!(cache.load("ja", "common.json").await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_cache_is_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("ja")).unwrap();
        std::fs::write(dir.path().join("ja/common.json"), "[oops").unwrap();

        let cache = CacheStore::new(dir.path());
        assert!(cache.load("ja", "common.json").await.is_empty());
    }

    #[tokio::test]
    async fn register_stores_source_values_for_processed_keys_only() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::new(dir.path());
        let source = catalog(&[("a", "Hello"), ("b", "Bye"), ("c", "Later")]);

        cache.register("ja", "common.json", &source, ["a", "c"]).await.unwrap();

        assert_eq!(
            cache.load("ja", "common.json").await,
            catalog(&[("a", "Hello"), ("c", "Later")])
        );
    }

    #[tokio::test]
    async fn register_appends_and_overwrites_in_place() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::new(dir.path());

        let first = catalog(&[("a", "Hello"), ("b", "Bye")]);
        cache.register("ja", "common.json", &first, ["a", "b"]).await.unwrap();

        let second = catalog(&[("a", "Hello"), ("b", "Goodbye"), ("c", "New")]);
        cache.register("ja", "common.json", &second, ["b", "c"]).await.unwrap();

        let entries: Vec<_> = cache
            .load("ja", "common.json")
            .await
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), "Hello".to_string()),
                ("b".to_string(), "Goodbye".to_string()),
                ("c".to_string(), "New".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn register_without_keys_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("cache");
        let cache = CacheStore::new(&root);

        cache
            .register("ja", "common.json", &catalog(&[("a", "Hello")]), std::iter::empty())
            .await
            .unwrap();

        assert!(!root.exists());
    }

    #[tokio::test]
    async fn delete_keys_uses_intersection_of_cached_and_requested_languages() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::new(dir.path());
        let source = catalog(&[("a", "Hello"), ("b", "Bye")]);
        for language in ["ja", "ko"] {
            cache.register(language, "common.json", &source, ["a", "b"]).await.unwrap();
        }

        let updated = cache
            .delete_keys(&["a".to_string()], &["ko".to_string(), "fr".to_string()], "common.json")
            .await
            .unwrap();

        assert_eq!(updated, vec!["ko"]);
        assert_eq!(cache.load("ko", "common.json").await, catalog(&[("b", "Bye")]));
        assert_eq!(cache.load("ja", "common.json").await, source);
    }

    #[tokio::test]
    async fn delete_keys_defaults_to_all_cached_languages() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::new(dir.path());
        let source = catalog(&[("a", "Hello"), ("b", "Bye")]);
        for language in ["ja", "ko"] {
            cache.register(language, "common.json", &source, ["a", "b"]).await.unwrap();
        }

        let updated = cache
            .delete_keys(&["b".to_string()], &[], "common.json")
            .await
            .unwrap();

        assert_eq!(updated, vec!["ja", "ko"]);
        for language in ["ja", "ko"] {
            assert_eq!(cache.load(language, "common.json").await, catalog(&[("a", "Hello")]));
        }
    }

    #[tokio::test]
    async fn generate_fingerprints_non_empty_translations() {
        let dir = TempDir::new().unwrap();
        let langs = dir.path().join("langs");
        std::fs::create_dir_all(langs.join("en")).unwrap();
        std::fs::create_dir_all(langs.join("ja")).unwrap();
        std::fs::write(
            langs.join("en/common.json"),
            r#"{"a": "Hello", "b": "Bye", "c": "Later"}"#,
        )
        .unwrap();
        std::fs::write(
            langs.join("ja/common.json"),
            r#"{"a": "こんにちは", "b": "", "orphan": "x"}"#,
        )
        .unwrap();

        let catalogs = CatalogStore::new(&langs, &langs, "en");
        let cache = CacheStore::new(dir.path().join("cache"));

        let report = cache.generate(&catalogs, &["ja".to_string()]).await.unwrap();

        assert_eq!(report, GenerateReport { files: 1, entries: 1 });
        assert_eq!(cache.load("ja", "common.json").await, catalog(&[("a", "Hello")]));
    }

    #[tokio::test]
    async fn generate_without_languages_is_noop() {
        let dir = TempDir::new().unwrap();
        let catalogs = CatalogStore::new(dir.path(), dir.path(), "en");
        let cache = CacheStore::new(dir.path().join("cache"));

        let report = cache.generate(&catalogs, &[]).await.unwrap();

        assert_eq!(report, GenerateReport::default());
        assert!(!dir.path().join("cache").exists());
    }
}
