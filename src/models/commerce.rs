//! # مدل‌های خرید (Commerce)
//!
//! سبد خرید، اطلاعات ارسال و سفارش
//!
//! ## مفاهیم Rust:
//! - **Validate derive**: قوانین checkout روی خود DTO
//! - **Enum برای وضعیت‌ها**: به جای رشته‌های آزاد

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{CoupletResult, SizeOption, StyleOption};
use crate::utils;

// =====================================
// Product Options
// =====================================
/// انتخاب‌های مشتری برای چاپ یک دوبیتی
///
/// اندازه و سبک به صورت کامل کپی میشن - اگه بعدا قیمت کاتالوگ
/// عوض بشه، آیتم‌های موجود سبد همون قیمت قدیم رو نگه میدارن
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptions {
    pub size: SizeOption,
    pub style: StyleOption,
    pub quantity: u32,
}

// =====================================
// Cart Item
// =====================================
/// آیتم سبد خرید
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub couplet: CoupletResult,
    pub options: ProductOptions,

    /// قیمت کل - موقع اضافه شدن بسته میشه و دیگه حساب نمیشه
    pub total_price: Decimal,

    pub timestamp: DateTime<Utc>,
}

/// پیش‌نویس آیتم سبد - بدون شناسه و زمان
///
/// # مفاهیم:
/// - قیمت کل همینجا و توسط caller محاسبه میشه:
///   `round2((size.price + style.price) * quantity)`
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub couplet: CoupletResult,
    pub options: ProductOptions,
    pub total_price: Decimal,
}

impl NewCartItem {
    /// ساخت پیش‌نویس با محاسبه‌ی قیمت کل
    #[must_use]
    pub fn new(couplet: CoupletResult, size: SizeOption, style: StyleOption, quantity: u32) -> Self {
        let total_price =
            utils::round2((size.price + style.price) * Decimal::from(quantity));

        Self {
            couplet,
            options: ProductOptions {
                size,
                style,
                quantity,
            },
            total_price,
        }
    }

    /// تبدیل به آیتم کامل با شناسه و زمان تازه
    #[must_use]
    pub fn into_cart_item(self) -> CartItem {
        CartItem {
            id: utils::cart_item_id(),
            couplet: self.couplet,
            options: self.options,
            total_price: self.total_price,
            timestamp: Utc::now(),
        }
    }
}

// =====================================
// Shipping Info
// =====================================
/// اطلاعات ارسال - فقط موقع ثبت سفارش اعتبارسنجی میشه
///
/// # قوانین
/// - نام، استان، شهر و آدرس غیرخالی
/// - موبایل ۱۱ رقمی (الگوی `1[3-9]...`)
/// - کد پستی ۶ رقمی
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    #[validate(length(min = 1, message = "Recipient name is required"))]
    pub name: String,

    #[validate(regex(path = *crate::utils::CN_MOBILE, message = "Invalid mobile number"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,

    #[validate(regex(path = *crate::utils::ZIP_CODE, message = "Invalid zip code"))]
    pub zip_code: String,
}

// =====================================
// Order
// =====================================
/// وضعیت چرخه‌ی عمر سفارش
///
/// سیستم جدول transition اجباری نداره - API همون زیرمجموعه‌ای رو
/// expose میکنه که کنسول ادمین استفاده میکرد
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// وضعیت پرداخت
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// روش پرداخت
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Alipay,
    Wechat,
    Online,
}

/// سفارش
///
/// سفارش هیچوقت حذف نمیشه - فقط وضعیتش عوض میشه
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<CartItem>,
    pub shipping_info: ShippingInfo,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub payment_status: PaymentStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl Order {
    /// ساخت سفارش جدید در وضعیت اولیه
    #[must_use]
    pub fn new(items: Vec<CartItem>, shipping_info: ShippingInfo, total_price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: utils::order_id(),
            items,
            shipping_info,
            total_price,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            payment_time: None,
            transaction_id: None,
        }
    }

    /// بروزرسانی زمان آخرین تغییر
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// علامت زدن پرداخت موفق
    ///
    /// وضعیت به processing میره و زمان و شناسه تراکنش ثبت میشه
    pub fn mark_paid(&mut self) {
        self.payment_status = PaymentStatus::Paid;
        self.status = OrderStatus::Processing;
        self.payment_time = Some(Utc::now());
        self.transaction_id = Some(utils::transaction_id());
        self.touch();
    }
}
