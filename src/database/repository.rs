//! # Repository Pattern
//!
//! این فایل الگوی Repository رو روی key-value store پیاده‌سازی میکنه.
//!
//! ## Repository Pattern چیه؟
//! یه لایه انتزاعی بین منطق برنامه و store.
//! - منطق برنامه نمیدونه داده کجا ذخیره میشه
//! - تست کردن راحت‌تر میشه (با `Database::in_memory`)
//!
//! ## قرارداد خوندن/نوشتن
//! - `load`: parse-or-empty - اگه key نباشه یا JSON خراب باشه، لیست خالی
//! - `save`: serialize-then-store - خطای storage به caller میرسه
//!
//! ## مفاهیم Rust:
//! - **Traits**: تعریف interface
//! - **async_trait**: امکان async در traits
//! - **Generic Repository**: یک پیاده‌سازی برای هر نوع entity
//! - **PhantomData**: نگه داشتن نوع generic بدون داده

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use super::KvStore;
use crate::error::Result;
use crate::models::{
    AdminUser, CartItem, HistoryEntry, Order, PaymentMethodConfig, Product, StyleImage,
};

// =====================================
// Storage Keys
// =====================================
/// keyهای اسمی collectionها - هر کدوم یک blob مستقل JSON
pub mod keys {
    pub const CART: &str = "couplet_cart";
    pub const ORDERS: &str = "couplet_orders";
    pub const HISTORY: &str = "couplet_history";
    pub const ADMIN_USERS: &str = "admin_users";
    pub const STYLE_IMAGES: &str = "style_images";
    pub const PRODUCTS: &str = "products";
    pub const PAYMENT_CONFIGS: &str = "payment_configs";
}

/// ظرفیت تاریخچه تولید - قدیمی‌ترین رکورد بعد از این حد حذف میشه
pub const HISTORY_CAPACITY: usize = 10;

// =====================================
// Base Repository Trait
// =====================================
/// Trait پایه برای همه Repository‌ها
///
/// # مفاهیم:
/// - `#[async_trait]`: macro برای async در traits
/// - `Send + Sync`: امکان ارسال بین threads
/// - Associated Type: نوع entity هر repository
#[async_trait]
pub trait Repository: Send + Sync {
    /// نوع Entity که این repository باهاش کار میکنه
    type Entity: Send + Sync;

    /// خوندن کل collection
    async fn load(&self) -> Result<Vec<Self::Entity>>;

    /// نوشتن کل collection
    async fn save(&self, items: &[Self::Entity]) -> Result<()>;

    /// حذف کامل collection
    async fn clear(&self) -> Result<()>;
}

// =====================================
// Generic JSON Collection
// =====================================
/// یک collection از entityها که به شکل آرایه JSON زیر یک key ذخیره میشه
///
/// # مفاهیم:
/// - Generic با bound: `T` باید Serialize + DeserializeOwned باشه
/// - `PhantomData<fn() -> T>`: نوع T رو نگه میداره بدون اینکه
///   Send/Sync رو محدود کنه
#[derive(Debug, Clone)]
pub struct JsonCollection<T> {
    store: KvStore,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// ساخت collection جدید روی یک key
    #[must_use]
    pub fn new(store: KvStore, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    /// key این collection
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// آیا این key قبلا نوشته شده؟
    ///
    /// لیست خالی ذخیره‌شده با key ناموجود فرق داره -
    /// seed کردن فقط برای key ناموجود انجام میشه
    pub async fn is_seeded(&self) -> Result<bool> {
        self.store.contains(self.key).await
    }

    /// خوندن collection - هیچوقت به خاطر داده‌ی خراب fail نمیشه
    pub async fn load_all(&self) -> Result<Vec<T>> {
        let Some(raw) = self.store.get(self.key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                // داده خراب → collection خالی، ولی لاگ میکنیم
                warn!(key = self.key, error = %e, "Corrupt collection, returning empty");
                Ok(Vec::new())
            }
        }
    }

    /// نوشتن collection - خطای serialize یا storage به بالا میره
    pub async fn save_all(&self, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set(self.key, &raw).await
    }

    /// حذف کامل collection
    pub async fn clear_all(&self) -> Result<()> {
        self.store.remove(self.key).await
    }
}

#[async_trait]
impl<T> Repository for JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    type Entity = T;

    async fn load(&self) -> Result<Vec<T>> {
        self.load_all().await
    }

    async fn save(&self, items: &[T]) -> Result<()> {
        self.save_all(items).await
    }

    async fn clear(&self) -> Result<()> {
        self.clear_all().await
    }
}

// =====================================
// Typed Repositories
// =====================================
// هر collection یه alias با helperهای مخصوص خودش

pub type CartRepository = JsonCollection<CartItem>;
pub type OrderRepository = JsonCollection<Order>;
pub type HistoryRepository = JsonCollection<HistoryEntry>;
pub type AdminUserRepository = JsonCollection<AdminUser>;
pub type StyleImageRepository = JsonCollection<StyleImage>;
pub type ProductRepository = JsonCollection<Product>;
pub type PaymentConfigRepository = JsonCollection<PaymentMethodConfig>;

impl JsonCollection<CartItem> {
    /// repository سبد خرید
    #[must_use]
    pub fn cart(store: KvStore) -> Self {
        Self::new(store, keys::CART)
    }
}

impl JsonCollection<Order> {
    /// repository سفارش‌ها
    #[must_use]
    pub fn orders(store: KvStore) -> Self {
        Self::new(store, keys::ORDERS)
    }

    /// پیدا کردن سفارش با شناسه
    pub async fn find(&self, order_id: &str) -> Result<Option<Order>> {
        let orders = self.load_all().await?;
        Ok(orders.into_iter().find(|o| o.id == order_id))
    }
}

impl JsonCollection<HistoryEntry> {
    /// repository تاریخچه تولید
    #[must_use]
    pub fn history(store: KvStore) -> Self {
        Self::new(store, keys::HISTORY)
    }

    /// اضافه کردن رکورد به ابتدای تاریخچه با حفظ ظرفیت
    ///
    /// جدیدترین اول؛ بعد از `HISTORY_CAPACITY` رکورد، قدیمی‌ترین
    /// (انتهای لیست) حذف میشه. eviction فقط بر اساس ترتیب درج هست.
    pub async fn record(&self, entry: HistoryEntry) -> Result<()> {
        let mut history = self.load_all().await?;
        history.insert(0, entry);
        history.truncate(HISTORY_CAPACITY);
        self.save_all(&history).await
    }
}

impl JsonCollection<AdminUser> {
    /// repository کاربرهای ادمین
    #[must_use]
    pub fn admin_users(store: KvStore) -> Self {
        Self::new(store, keys::ADMIN_USERS)
    }

    /// پیدا کردن کاربر با نام کاربری
    pub async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        let users = self.load_all().await?;
        Ok(users.into_iter().find(|u| u.username == username))
    }
}

impl JsonCollection<StyleImage> {
    /// repository سبک‌های چاپ
    #[must_use]
    pub fn style_images(store: KvStore) -> Self {
        Self::new(store, keys::STYLE_IMAGES)
    }
}

impl JsonCollection<Product> {
    /// repository محصولات
    #[must_use]
    pub fn products(store: KvStore) -> Self {
        Self::new(store, keys::PRODUCTS)
    }
}

impl JsonCollection<PaymentMethodConfig> {
    /// repository تنظیمات پرداخت
    #[must_use]
    pub fn payment_configs(store: KvStore) -> Self {
        Self::new(store, keys::PAYMENT_CONFIGS)
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::models::CoupletResult;

    async fn memory_store() -> KvStore {
        let db = Database::in_memory().await.unwrap();
        KvStore::new(db)
    }

    fn sample_couplet(n: usize) -> CoupletResult {
        CoupletResult {
            top: format!("上联{}", n),
            bottom: format!("下联{}", n),
            center: "横批".to_string(),
            explanation: "寓意".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_missing_key_is_empty() {
        let store = memory_store().await;
        let repo = HistoryRepository::history(store);

        assert!(repo.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_collection_degrades_to_empty() {
        let store = memory_store().await;
        store.set(keys::HISTORY, "{not json").await.unwrap();

        let repo = HistoryRepository::history(store);
        assert!(repo.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_capacity_and_order() {
        let store = memory_store().await;
        let repo = HistoryRepository::history(store);

        for n in 0..15 {
            let entry = HistoryEntry::new(sample_couplet(n));
            repo.record(entry).await.unwrap();
        }

        let history = repo.load_all().await.unwrap();
        assert_eq!(history.len(), HISTORY_CAPACITY);

        // جدیدترین اول: 14، 13، ...، 5
        assert_eq!(history[0].couplet.top, "上联14");
        assert_eq!(history[9].couplet.top, "上联5");
    }

    #[tokio::test]
    async fn test_repository_trait_is_object_safe_enough() {
        // سرویس‌ها میتونن روی trait generic باشن
        async fn count<R: Repository>(repo: &R) -> usize {
            repo.load().await.unwrap().len()
        }

        let store = memory_store().await;
        let repo = CartRepository::cart(store);

        assert_eq!(count(&repo).await, 0);
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let store = memory_store().await;
        let repo: JsonCollection<String> = JsonCollection::new(store, "test_key");

        let items = vec!["一".to_string(), "二".to_string()];
        repo.save_all(&items).await.unwrap();

        assert_eq!(repo.load_all().await.unwrap(), items);
        assert!(repo.is_seeded().await.unwrap());

        repo.clear_all().await.unwrap();
        assert!(!repo.is_seeded().await.unwrap());
        assert!(repo.load_all().await.unwrap().is_empty());
    }
}
