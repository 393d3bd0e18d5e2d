//! # سرویس خرید (Commerce Service)
//!
//! منطق سبد خرید، ثبت سفارش و شبیه‌سازی پرداخت
//!
//! ## مفاهیم Rust:
//! - Business Logic: قوانین checkout اینجا اعمال میشن
//! - Read-modify-write: هر تغییر یعنی load، تغییر، save کل collection

use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::{
    database::{CartRepository, KvStore, OrderRepository},
    error::{AppError, Result},
    models::{CartItem, NewCartItem, Order, OrderStatus, ShippingInfo},
};

use super::Service;

/// تاخیر ثابت شبیه‌سازی پرداخت
pub const PAYMENT_DELAY: Duration = Duration::from_secs(2);

// =====================================
// Commerce Service
// =====================================
/// سرویس سبد خرید و سفارش
///
/// # مسئولیت‌ها:
/// - CRUD سبد خرید
/// - اعتبارسنجی checkout و ساخت سفارش
/// - تغییر وضعیت سفارش و شبیه‌سازی پرداخت
#[derive(Debug, Clone)]
pub struct CommerceService {
    cart: CartRepository,
    orders: OrderRepository,
}

impl Service for CommerceService {}

impl CommerceService {
    /// ساخت سرویس جدید
    #[must_use]
    pub fn new(store: KvStore) -> Self {
        Self {
            cart: CartRepository::cart(store.clone()),
            orders: OrderRepository::orders(store),
        }
    }

    // ----------------------------------------
    // Cart
    // ----------------------------------------

    /// محتوای سبد - داده خراب به سبد خالی تبدیل میشه
    pub async fn cart(&self) -> Result<Vec<CartItem>> {
        self.cart.load_all().await
    }

    /// اضافه کردن به سبد
    ///
    /// شناسه و زمان همینجا ساخته میشن؛ قیمت کل قبلا توسط caller
    /// بسته شده و دیگه دست نمیخوره
    #[instrument(skip(self, draft))]
    pub async fn add_to_cart(&self, draft: NewCartItem) -> Result<CartItem> {
        let item = draft.into_cart_item();

        let mut cart = self.cart.load_all().await?;
        cart.push(item.clone());
        self.cart.save_all(&cart).await?;

        info!(item_id = %item.id, "Added item to cart");
        Ok(item)
    }

    /// حذف از سبد - شناسه ناموجود بی‌صدا نادیده گرفته میشه
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, item_id: &str) -> Result<()> {
        let cart = self.cart.load_all().await?;
        let filtered: Vec<CartItem> = cart.into_iter().filter(|i| i.id != item_id).collect();
        self.cart.save_all(&filtered).await?;

        Ok(())
    }

    /// خالی کردن سبد - کل collection حذف میشه
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<()> {
        self.cart.clear_all().await
    }

    // ----------------------------------------
    // Orders
    // ----------------------------------------

    /// لیست سفارش‌ها - جدیدترین اول
    pub async fn orders(&self) -> Result<Vec<Order>> {
        self.orders.load_all().await
    }

    /// پیدا کردن سفارش با شناسه
    pub async fn find_order(&self, order_id: &str) -> Result<Option<Order>> {
        self.orders.find(order_id).await
    }

    /// checkout: اعتبارسنجی، بستن قیمت و ساخت سفارش از سبد فعلی
    ///
    /// # Errors
    /// - `Validation`: اطلاعات ارسال ناقص یا نامعتبر - هیچی ساخته نمیشه
    /// - `BadRequest`: سبد خالی
    #[instrument(skip(self, shipping_info))]
    pub async fn checkout(&self, shipping_info: ShippingInfo) -> Result<Order> {
        // Step 1: اعتبارسنجی - قبل از هر نوشتنی
        shipping_info.validate()?;

        // Step 2: سبد فعلی
        let items = self.cart.load_all().await?;
        if items.is_empty() {
            return Err(AppError::BadRequest("Cart is empty".to_string()));
        }

        // Step 3: جمع قیمت‌های بسته‌شده‌ی آیتم‌ها
        let total: Decimal = items.iter().map(|i| i.total_price).sum();

        self.create_order(items, shipping_info, total).await
    }

    /// ساخت سفارش و اضافه کردن به ابتدای لیست
    ///
    /// invariant لیست: جدیدترین سفارش همیشه اوله
    #[instrument(skip(self, items, shipping_info))]
    pub async fn create_order(
        &self,
        items: Vec<CartItem>,
        shipping_info: ShippingInfo,
        total_price: Decimal,
    ) -> Result<Order> {
        shipping_info.validate()?;

        let order = Order::new(items, shipping_info, total_price);

        let mut orders = self.orders.load_all().await?;
        orders.insert(0, order.clone());
        self.orders.save_all(&orders).await?;

        info!(order_id = %order.id, total = %order.total_price, "Created order");
        Ok(order)
    }

    /// تغییر وضعیت سفارش
    ///
    /// جدول transition اجباری نداریم؛ شناسه ناموجود no-op هست
    #[instrument(skip(self))]
    pub async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> Result<()> {
        let mut orders = self.orders.load_all().await?;

        match orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status;
                order.touch();
                self.orders.save_all(&orders).await?;
                info!(order_id = %order_id, ?status, "Updated order status");
            }
            None => {
                warn!(order_id = %order_id, "Order not found for status update");
            }
        }

        Ok(())
    }

    /// شبیه‌سازی پرداخت
    ///
    /// بعد از تاخیر ثابت، اگه سفارش هنوز موجود باشه paid/processing
    /// میشه و زمان و شناسه تراکنش ثبت میشه. `false` یعنی سفارش موقع
    /// resolve شدن وجود نداشت.
    #[instrument(skip(self))]
    pub async fn simulate_payment(&self, order_id: &str) -> Result<bool> {
        tokio::time::sleep(PAYMENT_DELAY).await;

        let mut orders = self.orders.load_all().await?;

        match orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.mark_paid();
                self.orders.save_all(&orders).await?;

                info!(order_id = %order_id, "Payment completed");
                Ok(true)
            }
            None => {
                warn!(order_id = %order_id, "Order disappeared before payment resolved");
                Ok(false)
            }
        }
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::models::{
        default_size_options, default_style_images, CoupletResult, PaymentStatus,
    };

    async fn service() -> CommerceService {
        let db = Database::in_memory().await.unwrap();
        CommerceService::new(KvStore::new(db))
    }

    fn sample_couplet() -> CoupletResult {
        CoupletResult {
            top: "张灯结彩迎新岁".to_string(),
            bottom: "喜气盈门贺吉年".to_string(),
            center: "新春快乐".to_string(),
            explanation: "节日祝福".to_string(),
        }
    }

    fn sample_draft(quantity: u32) -> NewCartItem {
        let size = default_size_options().remove(0); // 29.9
        let style = default_style_images().remove(1).to_option(); // 19.9
        NewCartItem::new(sample_couplet(), size, style, quantity)
    }

    fn sample_shipping() -> ShippingInfo {
        ShippingInfo {
            name: "王小明".to_string(),
            phone: "13800001111".to_string(),
            address: "中关村大街1号".to_string(),
            city: "北京".to_string(),
            province: "北京市".to_string(),
            zip_code: "100000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_cart_add_remove_clear() {
        let service = service().await;

        let item = service.add_to_cart(sample_draft(2)).await.unwrap();
        service.add_to_cart(sample_draft(1)).await.unwrap();
        assert_eq!(service.cart().await.unwrap().len(), 2);

        service.remove_from_cart(&item.id).await.unwrap();
        assert_eq!(service.cart().await.unwrap().len(), 1);

        // حذف شناسه ناموجود خطا نیست
        service.remove_from_cart("cart_missing").await.unwrap();

        service.clear_cart().await.unwrap();
        assert!(service.cart().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_rejects_bad_phone_without_order() {
        let service = service().await;
        service.add_to_cart(sample_draft(1)).await.unwrap();

        let mut shipping = sample_shipping();
        shipping.phone = "12345".to_string();

        let result = service.checkout(shipping).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        // هیچ سفارشی ساخته نشده
        assert!(service.orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_rejects_empty_cart() {
        let service = service().await;

        let result = service.checkout(sample_shipping()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_checkout_creates_pending_order_with_total() {
        let service = service().await;
        service.add_to_cart(sample_draft(2)).await.unwrap(); // 99.60
        service.add_to_cart(sample_draft(1)).await.unwrap(); // 49.80

        let order = service.checkout(sample_shipping()).await.unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_price, "149.40".parse::<Decimal>().unwrap());
    }

    #[tokio::test]
    async fn test_orders_are_newest_first_with_distinct_ids() {
        let service = service().await;

        let first = service
            .create_order(Vec::new(), sample_shipping(), Decimal::ZERO)
            .await
            .unwrap();
        let second = service
            .create_order(Vec::new(), sample_shipping(), Decimal::ZERO)
            .await
            .unwrap();

        assert_ne!(first.id, second.id);

        let orders = service.orders().await.unwrap();
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);
    }

    #[tokio::test]
    async fn test_update_status_touches_updated_at() {
        let service = service().await;
        let order = service
            .create_order(Vec::new(), sample_shipping(), Decimal::ZERO)
            .await
            .unwrap();

        service
            .update_order_status(&order.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        let stored = service.find_order(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Cancelled);
        assert!(stored.updated_at >= order.updated_at);

        // شناسه ناموجود no-op
        service
            .update_order_status("order_missing", OrderStatus::Shipped)
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulate_payment_waits_full_delay() {
        let service = service().await;
        let order = service
            .create_order(Vec::new(), sample_shipping(), Decimal::ZERO)
            .await
            .unwrap();

        let started = tokio::time::Instant::now();
        let paid = service.simulate_payment(&order.id).await.unwrap();

        assert!(paid);
        // با ساعت مجازی، sleep دقیقا به اندازه PAYMENT_DELAY جلو میره
        assert!(started.elapsed() >= PAYMENT_DELAY);

        let stored = service.find_order(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.payment_status, PaymentStatus::Paid);
        assert_eq!(stored.status, OrderStatus::Processing);
        assert!(stored.payment_time.is_some());
        assert!(stored.transaction_id.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulate_payment_missing_order_resolves_false() {
        let service = service().await;

        let paid = service.simulate_payment("order_missing").await.unwrap();
        assert!(!paid);
    }
}
