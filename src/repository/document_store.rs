// ==========================================
// 服装制造资源计划系统 - 文档存储
// ==========================================
// 通用键控集合存储: 每个集合一张表 (id TEXT PRIMARY KEY, doc TEXT)
// 文档为 JSON 字符串，字段过滤经由 JSON1 json_extract
// 红线: 不含业务逻辑，只负责数据访问
// ==========================================

use crate::db::{open_in_memory_connection, open_sqlite_connection};
use crate::repository::error::{StoreError, StoreResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard};

/// 文档存储
///
/// 职责：
/// 1. 按字符串名寻址集合（动态集合与固定集合同构）
/// 2. 单文档 CRUD、等值过滤、计数、整集合删除
/// 3. 条件批量更新（带 changed-count 返回，供原子性校验）
pub struct DocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl DocumentStore {
    /// 打开文件数据库
    pub fn new(db_path: &str) -> StoreResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| StoreError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 打开内存数据库（测试与演示用）
    pub fn in_memory() -> StoreResult<Self> {
        let conn = open_in_memory_connection()
            .map_err(|e| StoreError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（多个上层组件共享同一连接）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 共享底层连接句柄
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    fn get_conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))
    }

    // ==========================================
    // 集合寻址
    // ==========================================

    /// 校验并引用集合名（动态集合名含 UUID 连字符）
    fn quoted_table(name: &str) -> StoreResult<String> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StoreError::InvalidCollectionName(name.to_string()));
        }
        Ok(format!("\"{}\"", name))
    }

    /// 校验 JSON 字段路径段
    fn json_path(field: &str) -> StoreResult<String> {
        if field.is_empty()
            || !field
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(StoreError::InvalidFieldPath(field.to_string()));
        }
        Ok(format!("'$.{}'", field))
    }

    fn table_exists(conn: &Connection, name: &str) -> StoreResult<bool> {
        let exists: Option<bool> = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1 LIMIT 1",
                params![name],
                |_row| Ok(true),
            )
            .optional()?;
        Ok(exists.unwrap_or(false))
    }

    /// 集合是否存在（至少写入过一次）
    pub fn collection_exists(&self, name: &str) -> StoreResult<bool> {
        Self::quoted_table(name)?;
        let conn = self.get_conn()?;
        Self::table_exists(&conn, name)
    }

    /// 确保集合存在（幂等）
    pub fn ensure_collection(&self, name: &str) -> StoreResult<()> {
        let table = Self::quoted_table(name)?;
        let conn = self.get_conn()?;
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, doc TEXT NOT NULL)",
                table
            ),
            [],
        )?;
        Ok(())
    }

    /// 删除整个集合（不可恢复）
    pub fn drop_collection(&self, name: &str) -> StoreResult<()> {
        let table = Self::quoted_table(name)?;
        let conn = self.get_conn()?;
        conn.execute(&format!("DROP TABLE IF EXISTS {}", table), [])?;
        Ok(())
    }

    // ==========================================
    // 写入
    // ==========================================

    /// 插入文档（文档必须带 "id" 字符串字段）
    pub fn insert(&self, name: &str, doc: &Value) -> StoreResult<()> {
        let id = doc
            .get("id")
            .and_then(Value::as_str)
            .ok_or(StoreError::MissingDocumentId)?
            .to_string();
        let table = Self::quoted_table(name)?;
        let text = serde_json::to_string(doc)?;

        let conn = self.get_conn()?;
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, doc TEXT NOT NULL)",
                table
            ),
            [],
        )?;
        conn.execute(
            &format!("INSERT INTO {} (id, doc) VALUES (?1, ?2)", table),
            params![id, text],
        )?;
        Ok(())
    }

    /// 整文档覆盖
    ///
    /// # 返回
    /// - Ok(true): 命中并更新
    /// - Ok(false): id 不存在
    pub fn replace(&self, name: &str, id: &str, doc: &Value) -> StoreResult<bool> {
        let table = Self::quoted_table(name)?;
        let text = serde_json::to_string(doc)?;
        let conn = self.get_conn()?;
        if !Self::table_exists(&conn, name)? {
            return Ok(false);
        }
        let changed = conn.execute(
            &format!("UPDATE {} SET doc = ?1 WHERE id = ?2", table),
            params![text, id],
        )?;
        Ok(changed > 0)
    }

    /// 合并更新：提供的键覆盖既有文档对应键，未提供的键保持不变
    pub fn merge_update(
        &self,
        name: &str,
        id: &str,
        patch: &Map<String, Value>,
    ) -> StoreResult<bool> {
        let table = Self::quoted_table(name)?;
        let conn = self.get_conn()?;
        if !Self::table_exists(&conn, name)? {
            return Ok(false);
        }

        let existing: Option<String> = conn
            .query_row(
                &format!("SELECT doc FROM {} WHERE id = ?1", table),
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(text) = existing else {
            return Ok(false);
        };

        let mut doc: Value = serde_json::from_str(&text)?;
        let Some(obj) = doc.as_object_mut() else {
            return Err(StoreError::SerializationError(format!(
                "集合 {} 文档 {} 不是 JSON 对象",
                name, id
            )));
        };
        for (key, value) in patch {
            obj.insert(key.clone(), value.clone());
        }

        let merged = serde_json::to_string(&doc)?;
        conn.execute(
            &format!("UPDATE {} SET doc = ?1 WHERE id = ?2", table),
            params![merged, id],
        )?;
        Ok(true)
    }

    /// 按 id 删除单文档
    pub fn delete_by_id(&self, name: &str, id: &str) -> StoreResult<bool> {
        let table = Self::quoted_table(name)?;
        let conn = self.get_conn()?;
        if !Self::table_exists(&conn, name)? {
            return Ok(false);
        }
        let changed = conn.execute(&format!("DELETE FROM {} WHERE id = ?1", table), params![id])?;
        Ok(changed > 0)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 全量读取（插入顺序）；集合不存在时返回空列表
    pub fn find_all(&self, name: &str) -> StoreResult<Vec<Value>> {
        let table = Self::quoted_table(name)?;
        let conn = self.get_conn()?;
        if !Self::table_exists(&conn, name)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare(&format!("SELECT doc FROM {} ORDER BY rowid", table))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut docs = Vec::new();
        for row in rows {
            docs.push(serde_json::from_str(&row?)?);
        }
        Ok(docs)
    }

    /// 按 id 查询单文档
    pub fn find_by_id(&self, name: &str, id: &str) -> StoreResult<Option<Value>> {
        let table = Self::quoted_table(name)?;
        let conn = self.get_conn()?;
        if !Self::table_exists(&conn, name)? {
            return Ok(None);
        }
        let text: Option<String> = conn
            .query_row(
                &format!("SELECT doc FROM {} WHERE id = ?1", table),
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// 顶层字段等值过滤（字符串比较）
    pub fn find_eq(&self, name: &str, field: &str, value: &str) -> StoreResult<Vec<Value>> {
        let table = Self::quoted_table(name)?;
        let path = Self::json_path(field)?;
        let conn = self.get_conn()?;
        if !Self::table_exists(&conn, name)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare(&format!(
            "SELECT doc FROM {} WHERE json_extract(doc, {}) = ?1 ORDER BY rowid",
            table, path
        ))?;
        let rows = stmt.query_map(params![value], |row| row.get::<_, String>(0))?;

        let mut docs = Vec::new();
        for row in rows {
            docs.push(serde_json::from_str(&row?)?);
        }
        Ok(docs)
    }

    /// 顶层字段等值查询单文档（自然键去重检查用）
    pub fn find_one_eq(&self, name: &str, field: &str, value: &str) -> StoreResult<Option<Value>> {
        Ok(self.find_eq(name, field, value)?.into_iter().next())
    }

    /// id 集合 + 字段等值的组合查询（MRP 消费前置检查用）
    pub fn find_in_ids_eq(
        &self,
        name: &str,
        ids: &[String],
        field: &str,
        value: &str,
    ) -> StoreResult<Vec<Value>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let table = Self::quoted_table(name)?;
        let path = Self::json_path(field)?;
        let conn = self.get_conn()?;
        if !Self::table_exists(&conn, name)? {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT doc FROM {} WHERE id IN ({}) AND json_extract(doc, {}) = ? ORDER BY rowid",
            table, placeholders, path
        );
        let mut stmt = conn.prepare(&sql)?;

        let mut bindings: Vec<&str> = ids.iter().map(String::as_str).collect();
        bindings.push(value);
        let rows = stmt.query_map(params_from_iter(bindings), |row| row.get::<_, String>(0))?;

        let mut docs = Vec::new();
        for row in rows {
            docs.push(serde_json::from_str(&row?)?);
        }
        Ok(docs)
    }

    /// 集合文档总数；集合不存在时为 0
    pub fn count(&self, name: &str) -> StoreResult<u64> {
        let table = Self::quoted_table(name)?;
        let conn = self.get_conn()?;
        if !Self::table_exists(&conn, name)? {
            return Ok(0);
        }
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count as u64)
    }

    // ==========================================
    // 条件批量更新
    // ==========================================

    /// 对 id 集合内满足守卫条件的文档做单条 SQL 原子更新
    ///
    /// # 参数
    /// - guard: Some((field, value)) 时仅更新该字段等值的文档
    /// - set: 顶层字段 -> 字符串值
    /// - remove: 需要移除的顶层字段
    ///
    /// # 返回
    /// - Ok(usize): 实际更新的文档数（调用方据此校验原子性）
    pub fn update_in_ids_guarded(
        &self,
        name: &str,
        ids: &[String],
        guard: Option<(&str, &str)>,
        set: &[(&str, &str)],
        remove: &[&str],
    ) -> StoreResult<usize> {
        if ids.is_empty() || (set.is_empty() && remove.is_empty()) {
            return Ok(0);
        }
        let table = Self::quoted_table(name)?;
        let conn = self.get_conn()?;
        if !Self::table_exists(&conn, name)? {
            return Ok(0);
        }

        // doc 表达式: json_remove(json_set(doc, '$.a', ?, ...), '$.x', ...)
        let mut expr = String::from("doc");
        if !set.is_empty() {
            let mut parts = Vec::with_capacity(set.len());
            for (field, _) in set {
                parts.push(format!("{}, ?", Self::json_path(field)?));
            }
            expr = format!("json_set({}, {})", expr, parts.join(", "));
        }
        if !remove.is_empty() {
            let mut paths = Vec::with_capacity(remove.len());
            for field in remove {
                paths.push(Self::json_path(field)?);
            }
            expr = format!("json_remove({}, {})", expr, paths.join(", "));
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let mut sql = format!(
            "UPDATE {} SET doc = {} WHERE id IN ({})",
            table, expr, placeholders
        );
        if let Some((guard_field, _)) = guard {
            sql.push_str(&format!(
                " AND json_extract(doc, {}) = ?",
                Self::json_path(guard_field)?
            ));
        }

        let mut bindings: Vec<&str> = set.iter().map(|(_, value)| *value).collect();
        bindings.extend(ids.iter().map(String::as_str));
        if let Some((_, guard_value)) = guard {
            bindings.push(guard_value);
        }

        let changed = conn.execute(&sql, params_from_iter(bindings))?;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> DocumentStore {
        DocumentStore::in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_find_by_id() {
        let store = store();
        store
            .insert("widgets", &json!({"id": "w1", "name": "bolt"}))
            .unwrap();

        let doc = store.find_by_id("widgets", "w1").unwrap().unwrap();
        assert_eq!(doc["name"], "bolt");
        assert!(store.find_by_id("widgets", "w2").unwrap().is_none());
    }

    #[test]
    fn test_find_all_missing_collection_is_empty() {
        let store = store();
        assert!(store.find_all("nothing_here").unwrap().is_empty());
        assert_eq!(store.count("nothing_here").unwrap(), 0);
    }

    #[test]
    fn test_merge_update_keeps_unpatched_keys() {
        let store = store();
        store
            .insert("widgets", &json!({"id": "w1", "name": "bolt", "qty": 3}))
            .unwrap();

        let mut patch = Map::new();
        patch.insert("qty".to_string(), json!(5));
        assert!(store.merge_update("widgets", "w1", &patch).unwrap());

        let doc = store.find_by_id("widgets", "w1").unwrap().unwrap();
        assert_eq!(doc["name"], "bolt");
        assert_eq!(doc["qty"], 5);

        assert!(!store.merge_update("widgets", "missing", &patch).unwrap());
    }

    #[test]
    fn test_find_eq_and_one_eq() {
        let store = store();
        store
            .insert("colors", &json!({"id": "1", "code": "NVY", "name": "Navy"}))
            .unwrap();
        store
            .insert("colors", &json!({"id": "2", "code": "BLK", "name": "Black"}))
            .unwrap();

        let hits = store.find_eq("colors", "code", "NVY").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["name"], "Navy");
        assert!(store.find_one_eq("colors", "code", "RED").unwrap().is_none());
    }

    #[test]
    fn test_drop_collection_removes_data() {
        let store = store();
        store.insert("tmp", &json!({"id": "1"})).unwrap();
        assert!(store.collection_exists("tmp").unwrap());

        store.drop_collection("tmp").unwrap();
        assert!(!store.collection_exists("tmp").unwrap());
        assert!(store.find_all("tmp").unwrap().is_empty());
    }

    #[test]
    fn test_guarded_update_counts_only_matching_docs() {
        let store = store();
        store
            .insert("boms", &json!({"id": "b1", "status": "unassigned"}))
            .unwrap();
        store
            .insert("boms", &json!({"id": "b2", "status": "assigned"}))
            .unwrap();

        let ids = vec!["b1".to_string(), "b2".to_string()];
        let changed = store
            .update_in_ids_guarded(
                "boms",
                &ids,
                Some(("status", "unassigned")),
                &[("status", "assigned"), ("mrp_id", "m1")],
                &[],
            )
            .unwrap();
        assert_eq!(changed, 1);

        let doc = store.find_by_id("boms", "b1").unwrap().unwrap();
        assert_eq!(doc["status"], "assigned");
        assert_eq!(doc["mrp_id"], "m1");
    }

    #[test]
    fn test_guarded_update_remove_field() {
        let store = store();
        store
            .insert("boms", &json!({"id": "b1", "status": "assigned", "mrp_id": "m1"}))
            .unwrap();

        let ids = vec!["b1".to_string()];
        let changed = store
            .update_in_ids_guarded("boms", &ids, None, &[("status", "unassigned")], &["mrp_id"])
            .unwrap();
        assert_eq!(changed, 1);

        let doc = store.find_by_id("boms", "b1").unwrap().unwrap();
        assert_eq!(doc["status"], "unassigned");
        assert!(doc.get("mrp_id").is_none());
    }

    #[test]
    fn test_invalid_collection_name_rejected() {
        let store = store();
        let err = store.insert("bad name; drop", &json!({"id": "1"}));
        assert!(matches!(err, Err(StoreError::InvalidCollectionName(_))));
    }
}
