// ============================================================================
// LingoSync - 差异计算
// ============================================================================
//
// 文件: src/core/diff.rs
// 职责: 根据缓存指纹计算需要（重新）翻译的 key
// 边界:
//   - ✅ 新增 key 检测
//   - ✅ 源文案变更检测（逐字节比较）
//   - ❌ 不应包含文件读写
//   - ❌ 不应删除缓存中多余的 key
//
// ============================================================================

use crate::models::catalog::Catalog;

/// 计算待翻译集合
///
/// 指纹为空时整个源目录都需要翻译；否则只保留指纹中缺失、或指纹值与当前源文案
/// 不相等的 key。指纹里有而源目录里没有的 key 既不会出现在结果中，也不会被删除。
pub fn compute_pending(fingerprint: &Catalog, source: &Catalog) -> Catalog {
    if fingerprint.is_empty() {
        return source.clone();
    }

    source
        .iter()
        .filter(|(key, value)| fingerprint.get(key) != Some(*value))
        .collect()
}
