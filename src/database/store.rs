//! # Key-Value Store
//!
//! عملیات پایه‌ای get/set/remove روی جدول `kv_store`.
//!
//! ## مفاهیم:
//! - این لایه چیزی از JSON نمیدونه - فقط متن ذخیره میکنه
//! - semantics مشابه local storage مرورگر: یک مقدار متنی زیر هر key
//! - upsert با `ON CONFLICT` در SQLite

use chrono::Utc;

use super::Database;
use crate::error::Result;

/// Store سطح پایین برای مقادیر متنی
///
/// # مفاهیم:
/// - Dependency Injection: به جای state سراسری، Database تزریق میشه
/// - Clone ارزونه - فقط Arc داخل Database کپی میشه
#[derive(Debug, Clone)]
pub struct KvStore {
    db: Database,
}

impl KvStore {
    /// ساخت store جدید
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// خوندن مقدار یک key
    ///
    /// # مفاهیم:
    /// - `fetch_optional`: برگردوندن Option (0 یا 1 نتیجه)
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM kv_store WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(value)
    }

    /// نوشتن مقدار زیر یک key (upsert)
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// حذف یک key
    ///
    /// حذف key ناموجود خطا نیست
    pub async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    /// آیا این key وجود داره؟
    ///
    /// برای تشخیص "اولین دسترسی" موقع seed کردن کاتالوگ
    pub async fn contains(&self, key: &str) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i32>(
            "SELECT COUNT(*) FROM kv_store WHERE key = ?",
        )
        .bind(key)
        .fetch_one(self.db.pool())
        .await?;

        Ok(count > 0)
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let db = Database::in_memory().await.unwrap();
        let store = KvStore::new(db);

        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("greeting", "你好").await.unwrap();
        assert_eq!(store.get("greeting").await.unwrap().as_deref(), Some("你好"));

        // upsert
        store.set("greeting", "再见").await.unwrap();
        assert_eq!(store.get("greeting").await.unwrap().as_deref(), Some("再见"));
    }

    #[tokio::test]
    async fn test_remove_and_contains() {
        let db = Database::in_memory().await.unwrap();
        let store = KvStore::new(db);

        store.set("k", "v").await.unwrap();
        assert!(store.contains("k").await.unwrap());

        store.remove("k").await.unwrap();
        assert!(!store.contains("k").await.unwrap());

        // حذف دوباره هم خطا نیست
        store.remove("k").await.unwrap();
    }
}
