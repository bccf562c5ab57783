// ============================================================================
// LingoSync - 翻译结果合并与发布
// ============================================================================
//
// 文件: src/core/publish.rs
// 职责: 将本次翻译结果覆盖到输出目录并推进指纹
// 边界:
//   - ✅ 读取已有输出（缺失或损坏时以源目录为底）
//   - ✅ 覆盖合并并写回
//   - ✅ 为本次处理过的 key 登记指纹
//   - ❌ 不应包含翻译调用
//   - ❌ 不应删除任何已有 key
//
// ============================================================================

use tracing::{debug, warn};

use crate::core::cache::CacheStore;
use crate::core::store::{CatalogStore, StoreError};
use crate::models::catalog::Catalog;

/// 合并发布器
#[derive(Debug, Clone)]
pub struct Publisher {
    catalogs: CatalogStore,
    cache: CacheStore,
}

impl Publisher {
    pub fn new(catalogs: CatalogStore, cache: CacheStore) -> Self {
        Self { catalogs, cache }
    }

    /// 合并并写回输出目录，然后登记指纹
    ///
    /// `source` 是任务开始时读取的源目录快照，指纹记录的就是其中的文案。
    /// 只有 `results` 中的 key 推进指纹，合并后其余的 key 保持不变。
    pub async fn publish(
        &self,
        language: &str,
        file: &str,
        source: &Catalog,
        results: &Catalog,
    ) -> Result<Catalog, StoreError> {
        let mut merged = match self.catalogs.load_output(language, file).await {
            Ok(Some(existing)) => existing,
            Ok(None) => source.clone(),
            Err(e) => {
                warn!(error = %e, "existing output unreadable, rebuilding from source catalog");
                source.clone()
            }
        };

        merged.overlay(results);
        self.catalogs.write_output(language, file, &merged).await?;
        self.cache
            .register(language, file, source, results.keys())
            .await?;

        debug!(language = %language, file = %file, updated = results.len(), "catalog published");
        Ok(merged)
    }
}
