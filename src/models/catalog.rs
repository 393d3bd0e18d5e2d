//! # مدل‌های کاتالوگ
//!
//! اندازه‌ها، سبک‌های چاپ، محصولات و تنظیمات پرداخت
//!
//! ## مفاهیم Rust:
//! - **Decimal**: قیمت‌ها با rust_decimal - بدون خطای float
//! - **Tagged Enum**: تنظیمات پرداخت به جای map آزاد، union تفکیک‌شده‌ست

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =====================================
// Size / Style Options
// =====================================
/// گزینه اندازه چاپ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOption {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
}

/// گزینه سبک چاپ - نسخه‌ای که فروشگاه میبینه
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOption {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub preview_url: String,
}

// =====================================
// Style Image (admin-managed)
// =====================================
/// سبک چاپ با متادیتای مدیریتی
///
/// فقط سبک‌های فعال به فروشگاه میرسن
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleImage {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub preview_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StyleImage {
    /// نسخه فروشگاهی بدون فیلدهای مدیریتی
    #[must_use]
    pub fn to_option(&self) -> StyleOption {
        StyleOption {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            preview_url: self.preview_url.clone(),
        }
    }
}

// =====================================
// Product
// =====================================
/// وضعیت محصول در کاتالوگ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
}

/// محصول قابل فروش
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// آیا در فروشگاه نمایش داده میشه؟
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.status, ProductStatus::Active)
    }
}

// =====================================
// Payment Method Config
// =====================================
/// تنظیمات یک روش پرداخت
///
/// # مفاهیم:
/// - `#[serde(flatten)]`: فیلدهای provider هم‌سطح بقیه ذخیره میشن
/// - به جای `Record<string, string>` آزاد، هر نوع provider فیلدهای
///   تایپ‌شده‌ی خودش رو داره
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodConfig {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub description: String,

    #[serde(flatten)]
    pub provider: PaymentProvider,
}

/// Union تفکیک‌شده روی نوع provider پرداخت
///
/// # مفاهیم:
/// - `#[serde(tag = "type")]`: فیلد `type` نوع variant رو مشخص میکنه
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PaymentProvider {
    #[serde(rename_all = "camelCase")]
    Alipay {
        app_id: String,
        merchant_private_key: String,
        alipay_public_key: String,
        gateway_url: String,
    },

    #[serde(rename_all = "camelCase")]
    Wechat {
        app_id: String,
        mch_id: String,
        api_key: String,
        notify_url: String,
    },

    #[serde(rename_all = "camelCase")]
    Online { gateway_url: String },
}

impl PaymentProvider {
    /// برچسب نوع provider
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Alipay { .. } => "alipay",
            Self::Wechat { .. } => "wechat",
            Self::Online { .. } => "online",
        }
    }
}

// =====================================
// Default Catalog Data
// =====================================
/// چهار اندازه‌ی ثابت چاپ
#[must_use]
pub fn default_size_options() -> Vec<SizeOption> {
    vec![
        SizeOption {
            id: "small".to_string(),
            name: "小号".to_string(),
            price: Decimal::new(299, 1),
            description: "适合室内小门框，尺寸约40x120cm".to_string(),
        },
        SizeOption {
            id: "medium".to_string(),
            name: "中号".to_string(),
            price: Decimal::new(499, 1),
            description: "适合标准门框，尺寸约50x150cm".to_string(),
        },
        SizeOption {
            id: "large".to_string(),
            name: "大号".to_string(),
            price: Decimal::new(799, 1),
            description: "适合大门框，尺寸约60x180cm".to_string(),
        },
        SizeOption {
            id: "custom".to_string(),
            name: "定制尺寸".to_string(),
            price: Decimal::new(999, 1),
            description: "联系客服定制特殊尺寸".to_string(),
        },
    ]
}

/// سبک‌های پیش‌فرض - اولین دسترسی با این‌ها seed میشه
#[must_use]
pub fn default_style_images() -> Vec<StyleImage> {
    let now = Utc::now();
    let style = |id: &str, name: &str, price: Decimal, preview_url: &str| StyleImage {
        id: id.to_string(),
        name: name.to_string(),
        price,
        preview_url: preview_url.to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    vec![
        style("classic", "经典红底", Decimal::ZERO, "/assets/styles/classic.png"),
        style("golden", "金边装饰", Decimal::new(199, 1), "/assets/styles/golden.png"),
        style("calligraphy", "名家书法", Decimal::new(299, 1), "/assets/styles/calligraphy.png"),
        style("antique", "古风卷轴", Decimal::new(399, 1), "/assets/styles/antique.png"),
    ]
}

/// محصولات پیش‌فرض
#[must_use]
pub fn default_products() -> Vec<Product> {
    let now = Utc::now();
    let product = |id: &str, name: &str, price: Decimal, description: &str, status| Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        description: description.to_string(),
        status,
        created_at: now,
        updated_at: now,
    };

    vec![
        product(
            "product_1",
            "小号春联",
            Decimal::new(299, 1),
            "适合室内小门框的精美春联，尺寸约40x120cm",
            ProductStatus::Active,
        ),
        product(
            "product_2",
            "中号春联",
            Decimal::new(499, 1),
            "适合标准门框的春联，尺寸约50x150cm",
            ProductStatus::Active,
        ),
        product(
            "product_3",
            "大号春联",
            Decimal::new(799, 1),
            "适合大门框的春联，尺寸约60x180cm",
            ProductStatus::Active,
        ),
        product(
            "product_4",
            "定制尺寸春联",
            Decimal::new(999, 1),
            "联系客服定制特殊尺寸的春联",
            ProductStatus::Active,
        ),
        product(
            "product_5",
            "金边装饰春联",
            Decimal::new(698, 1),
            "带有金色边框装饰的春联",
            ProductStatus::Inactive,
        ),
    ]
}

/// تنظیمات پرداخت پیش‌فرض
#[must_use]
pub fn default_payment_configs() -> Vec<PaymentMethodConfig> {
    vec![
        PaymentMethodConfig {
            id: "alipay".to_string(),
            name: "支付宝支付".to_string(),
            enabled: true,
            description: "通过支付宝进行在线支付".to_string(),
            provider: PaymentProvider::Alipay {
                app_id: "2021000116685919".to_string(),
                merchant_private_key: String::new(),
                alipay_public_key: String::new(),
                gateway_url: "https://openapi.alipaydev.com/gateway.do".to_string(),
            },
        },
        PaymentMethodConfig {
            id: "wechat".to_string(),
            name: "微信支付".to_string(),
            enabled: true,
            description: "通过微信进行在线支付".to_string(),
            provider: PaymentProvider::Wechat {
                app_id: "wx8888888888888888".to_string(),
                mch_id: "1888888888".to_string(),
                api_key: String::new(),
                notify_url: "https://your-server.com/api/pay/notify".to_string(),
            },
        },
    ]
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_provider_tagging() {
        let config = default_payment_configs().remove(0);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["type"], "alipay");
        assert_eq!(json["appId"], "2021000116685919");

        let back: PaymentMethodConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_default_sizes() {
        let sizes = default_size_options();
        assert_eq!(sizes.len(), 4);
        assert_eq!(sizes[0].price, Decimal::new(299, 1));
        assert_eq!(sizes[3].id, "custom");
    }

    #[test]
    fn test_style_to_option_drops_admin_fields() {
        let style = default_style_images().remove(1);
        let option = style.to_option();

        assert_eq!(option.id, "golden");
        assert_eq!(option.price, Decimal::new(199, 1));

        let json = serde_json::to_value(&option).unwrap();
        assert!(json.get("isActive").is_none());
    }

    #[test]
    fn test_product_status() {
        let products = default_products();
        assert_eq!(products.iter().filter(|p| p.is_active()).count(), 4);
    }
}
