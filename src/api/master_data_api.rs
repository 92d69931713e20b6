// ==========================================
// 服装制造资源计划系统 - 固定主数据 API
// ==========================================
// 职责: 历史固定 schema 集合（buyers/suppliers/raw_materials/...）的
//       统一 CRUD。各实体结构见 domain::masters，路由层按集合名分发
// 说明: 固定主数据是 Seeder 的迁移来源，也是 BOM/MRP 流程的查询对象
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::repository::DocumentStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// 固定主数据 API（对实体类型泛化）
pub struct MasterDataApi {
    store: Arc<DocumentStore>,
}

impl MasterDataApi {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// 创建实体（实体自带 id 与 created_at）
    pub fn create<T: Serialize>(&self, collection: &str, entity: &T) -> ApiResult<()> {
        let doc = serde_json::to_value(entity)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        self.store.insert(collection, &doc)?;
        Ok(())
    }

    /// 查询集合全部实体
    pub fn list<T: DeserializeOwned>(&self, collection: &str) -> ApiResult<Vec<T>> {
        let docs = self.store.find_all(collection)?;
        let mut entities = Vec::with_capacity(docs.len());
        for doc in docs {
            entities.push(
                serde_json::from_value(doc)
                    .map_err(|e| ApiError::InternalError(e.to_string()))?,
            );
        }
        Ok(entities)
    }

    /// 按 id 查询单实体
    pub fn get<T: DeserializeOwned>(&self, collection: &str, id: &str) -> ApiResult<T> {
        let doc = self
            .store
            .find_by_id(collection, id)?
            .ok_or_else(|| ApiError::NotFound(format!("{}(id={})不存在", collection, id)))?;
        serde_json::from_value(doc).map_err(|e| ApiError::InternalError(e.to_string()))
    }

    /// 整体替换实体（保持 id 不变）
    pub fn replace<T: Serialize>(&self, collection: &str, id: &str, entity: &T) -> ApiResult<()> {
        let mut doc = serde_json::to_value(entity)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        if let Some(obj) = doc.as_object_mut() {
            obj.insert("id".to_string(), Value::String(id.to_string()));
        }

        let matched = self.store.replace(collection, id, &doc)?;
        if !matched {
            return Err(ApiError::NotFound(format!(
                "{}(id={})不存在",
                collection, id
            )));
        }
        Ok(())
    }

    /// 按 id 删除实体
    pub fn delete(&self, collection: &str, id: &str) -> ApiResult<()> {
        let deleted = self.store.delete_by_id(collection, id)?;
        if !deleted {
            return Err(ApiError::NotFound(format!(
                "{}(id={})不存在",
                collection, id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::masters::Color;
    use crate::repository::collections::COLORS;

    fn api() -> MasterDataApi {
        MasterDataApi::new(Arc::new(DocumentStore::in_memory().unwrap()))
    }

    #[test]
    fn test_typed_roundtrip() {
        let api = api();
        let color = Color::new("Navy", "NVY");
        api.create(COLORS, &color).unwrap();

        let listed: Vec<Color> = api.list(COLORS).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].code, "NVY");

        let fetched: Color = api.get(COLORS, &color.id).unwrap();
        assert_eq!(fetched.name, "Navy");
    }

    #[test]
    fn test_replace_keeps_id() {
        let api = api();
        let color = Color::new("Navy", "NVY");
        api.create(COLORS, &color).unwrap();

        let mut updated = color.clone();
        updated.id = "should-be-ignored".to_string();
        updated.name = "Dark Navy".to_string();
        api.replace(COLORS, &color.id, &updated).unwrap();

        let fetched: Color = api.get(COLORS, &color.id).unwrap();
        assert_eq!(fetched.id, color.id);
        assert_eq!(fetched.name, "Dark Navy");
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let api = api();
        let result = api.delete(COLORS, "ghost");
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
