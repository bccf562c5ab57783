// ============================================================================
// LingoSync - 文案目录数据模型
// ============================================================================
//
// 文件: src/models/catalog.rs
// 职责: key → 文案字符串映射的数据结构定义
// 边界:
//   - ✅ 保持插入顺序的 key/value 映射
//   - ✅ 覆盖合并（overlay）语义
//   - ✅ JSON 序列化/反序列化
//   - ❌ 不应包含文件读写逻辑
//   - ❌ 不应包含差异计算逻辑
//
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 一个语言下一个文件的文案目录，同时用作指纹表和待翻译集合
///
/// 底层为 `serde_json::Map`（启用 `preserve_order`），key 的顺序即插入顺序，
/// 新 key 追加在末尾，已有 key 被覆盖时保持原位置。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Map<String, Value>);

impl Catalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// 从任意 JSON 值构建目录
    ///
    /// 非对象返回 `None`；对象中非字符串的值会被丢弃，并返回被丢弃的 key。
    pub fn from_json(value: Value) -> Option<(Self, Vec<String>)> {
        let Value::Object(object) = value else {
            return None;
        };

        let mut catalog = Self::new();
        let mut dropped = Vec::new();
        for (key, value) in object {
            match value {
                Value::String(text) => catalog.insert(key, text),
                _ => dropped.push(key),
            }
        }
        Some((catalog, dropped))
    }

    /// 获取 key 对应的文案
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// 写入文案（已存在则原地覆盖）
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Value::String(value.into()));
    }

    /// 删除 key，返回是否存在
    pub fn remove(&mut self, key: &str) -> bool {
        self.0.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(key, value)| value.as_str().map(|text| (key.as_str(), text)))
    }

    /// 按插入顺序遍历 key
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// 将另一个目录覆盖到当前目录上：对方的 key 优先，其余 key 原样保留
    pub fn overlay(&mut self, other: &Catalog) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// 序列化为 2 空格缩进的 JSON 文本
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.0)
    }
}

impl<K, V> FromIterator<(K, V)> for Catalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (key, value) in iter {
            catalog.insert(key, value);
        }
        catalog
    }
}
