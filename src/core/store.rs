// ============================================================================
// LingoSync - 文案目录存储
// ============================================================================
//
// 文件: src/core/store.rs
// 职责: JSON 文案文件的读写与目录扫描
// 边界:
//   - ✅ JSON 目录文件读取、解析与写入
//   - ✅ 按需创建父目录
//   - ✅ 文案文件与语言目录扫描
//   - ✅ 源语言目录与输出目录的路径约定
//   - ❌ 不应包含差异计算逻辑
//   - ❌ 不应包含缓存指纹逻辑
//   - ❌ 不应包含翻译调用
//
// ============================================================================

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::catalog::Catalog;
use crate::utils::constants::CATALOG_EXTENSION;

/// 存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 读取 JSON 目录文件，文件不存在时返回 `None`
pub async fn read_catalog(path: &Path) -> Result<Option<Catalog>, StoreError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let (catalog, dropped) = Catalog::from_json(value).ok_or_else(|| StoreError::NotAnObject {
        path: path.to_path_buf(),
    })?;

    if !dropped.is_empty() {
        warn!(path = %path.display(), keys = ?dropped, "ignoring non-string catalog values");
    }

    Ok(Some(catalog))
}

/// 读取 JSON 目录文件，缺失或损坏时视为空目录
pub async fn read_catalog_or_empty(path: &Path) -> Catalog {
    match read_catalog(path).await {
        Ok(Some(catalog)) => catalog,
        Ok(None) => Catalog::new(),
        Err(e) => {
            warn!(error = %e, "treating unreadable catalog as empty");
            Catalog::new()
        }
    }
}

/// 以 2 空格缩进写入目录文件，父目录不存在时创建
pub async fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let content = catalog.to_pretty_json()?;
    tokio::fs::write(path, content)
        .await
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), entries = catalog.len(), "catalog written");
    Ok(())
}

/// 列出目录下所有文案文件名（按名称排序），目录不存在时返回空列表
pub fn list_catalog_files(dir: &Path) -> Vec<String> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        CATALOG_EXTENSION
    );

    let mut files: Vec<String> = match glob::glob(&pattern) {
        Ok(paths) => paths
            .flatten()
            .filter(|path| path.is_file())
            .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect(),
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "invalid catalog glob pattern");
            Vec::new()
        }
    };

    files.sort();
    files
}

/// 列出目录下的所有子目录名（按名称排序），目录不存在时返回空列表
pub fn list_subdirectories(dir: &Path) -> Result<Vec<String>, StoreError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|source| StoreError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();

    names.sort();
    Ok(names)
}

/// 文案目录存储：`<root>/<language>/<file>`
#[derive(Debug, Clone)]
pub struct CatalogStore {
    /// 文案根目录
    entry_root: PathBuf,
    /// 输出根目录
    output_root: PathBuf,
    /// 源语言代码
    source_language: String,
}

impl CatalogStore {
    pub fn new(
        entry_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        source_language: impl Into<String>,
    ) -> Self {
        Self {
            entry_root: entry_root.into(),
            output_root: output_root.into(),
            source_language: source_language.into(),
        }
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// 源语言目录
    pub fn source_dir(&self) -> PathBuf {
        self.entry_root.join(&self.source_language)
    }

    /// 源语言文件路径
    pub fn source_path(&self, file: &str) -> PathBuf {
        self.source_dir().join(file)
    }

    /// 文案根目录下指定语言的文件路径
    pub fn entry_path(&self, language: &str, file: &str) -> PathBuf {
        self.entry_root.join(language).join(file)
    }

    /// 输出文件路径
    pub fn output_path(&self, language: &str, file: &str) -> PathBuf {
        self.output_root.join(language).join(file)
    }

    /// 源语言目录下的全部文案文件
    pub fn source_files(&self) -> Vec<String> {
        list_catalog_files(&self.source_dir())
    }

    /// 指定语言在文案根目录下的全部文案文件
    pub fn entry_files(&self, language: &str) -> Vec<String> {
        list_catalog_files(&self.entry_root.join(language))
    }

    /// 读取源语言目录，文件不存在时返回 `None`
    pub async fn load_source(&self, file: &str) -> Result<Option<Catalog>, StoreError> {
        read_catalog(&self.source_path(file)).await
    }

    /// 读取文案根目录下指定语言的已有翻译
    pub async fn load_entry(&self, language: &str, file: &str) -> Result<Option<Catalog>, StoreError> {
        read_catalog(&self.entry_path(language, file)).await
    }

    /// 读取已有输出目录，文件不存在时返回 `None`
    pub async fn load_output(&self, language: &str, file: &str) -> Result<Option<Catalog>, StoreError> {
        read_catalog(&self.output_path(language, file)).await
    }

    /// 写入输出目录
    pub async fn write_output(
        &self,
        language: &str,
        file: &str,
        catalog: &Catalog,
    ) -> Result<(), StoreError> {
        write_catalog(&self.output_path(language, file), catalog).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_catalog_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let result = read_catalog(&dir.path().join("nope.json")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn corrupt_catalog_is_a_parse_error_or_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            read_catalog(&path).await,
            Err(StoreError::Parse { .. })
        ));
        assert!(read_catalog_or_empty(&path).await.is_empty());
    }

    #[tokio::test]
    async fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("ja").join("common.json");
        let catalog: Catalog = [("hello", "こんにちは")].into_iter().collect();

        write_catalog(&path, &catalog).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n  \"hello\": \"こんにちは\"\n}"
        );
        assert_eq!(read_catalog(&path).await.unwrap(), Some(catalog));
    }

    #[test]
    fn lists_only_json_files_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["b.json", "a.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        assert_eq!(list_catalog_files(dir.path()), vec!["a.json", "b.json"]);
        assert!(list_catalog_files(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn store_paths_follow_language_folders() {
        let store = CatalogStore::new("/langs", "/out", "en");

        assert_eq!(store.source_path("common.json"), PathBuf::from("/langs/en/common.json"));
        assert_eq!(
            store.output_path("ja", "common.json"),
            PathBuf::from("/out/ja/common.json")
        );
        assert_eq!(
            store.entry_path("ja", "common.json"),
            PathBuf::from("/langs/ja/common.json")
        );
    }
}
