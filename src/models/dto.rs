//! # Data Transfer Objects (DTOs)
//!
//! DTO‌های عمومی که در API استفاده میشن
//!
//! ## مفاهیم:
//! - DTO: برای انتقال داده بین لایه‌ها
//! - Request/Response separation: جداسازی ورودی از خروجی

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    AdminUserResponse, CoupletResult, GeneratedCouplet, OrderStatus, PaymentProvider,
};

// =====================================
// Generic API Responses
// =====================================
/// پاسخ موفق عمومی
///
/// # مفاهیم:
/// - Generic: کار با هر نوع داده
/// - `T: Serialize`: T باید قابل تبدیل به JSON باشه
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// ساخت پاسخ موفق
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// اضافه کردن پیام
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// پاسخ خالی برای عملیات‌هایی که داده برنمیگردونن
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyResponse {
    pub success: bool,
    pub message: String,
}

impl EmptyResponse {
    /// ساخت پاسخ خالی موفق
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

// =====================================
// Health Check
// =====================================
/// پاسخ health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: bool,
}

impl HealthResponse {
    /// ساخت پاسخ healthy
    #[must_use]
    pub fn healthy(database_ok: bool) -> Self {
        Self {
            status: if database_ok { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database_ok,
        }
    }
}

// =====================================
// Couplet Generation DTOs
// =====================================
/// طول پیش‌فرض دوبیتی - فرم فعلا فقط همین رو میفرسته
fn default_length() -> u16 {
    7
}

/// درخواست تولید دوبیتی
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCoupletRequest {
    /// کلیدواژه اول - ابتدای مصراع اول
    #[validate(length(min = 1, max = 20, message = "First keyword is required"))]
    pub name1: String,

    /// کلیدواژه دوم (اختیاری) - ابتدای مصراع دوم
    #[validate(length(max = 20, message = "Second keyword is too long"))]
    pub name2: Option<String>,

    /// مناسبت - رشته آزاد؛ ناشناخته به قالب پیش‌فرض میرسه
    #[validate(length(min = 1, message = "Occasion is required"))]
    pub occasion: String,

    /// تعداد حروف هر مصراع
    #[serde(default = "default_length")]
    pub length: u16,

    /// خواسته‌های اضافی (اختیاری)
    #[validate(length(max = 200, message = "Extra requirements are too long"))]
    pub other_requirements: Option<String>,
}

/// پاسخ تولید دوبیتی
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCoupletResponse {
    pub couplet: CoupletResult,

    /// اسم provider یا "template"
    pub source: String,

    /// پیام نرم وقتی قالب محلی استفاده شده
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl From<GeneratedCouplet> for GenerateCoupletResponse {
    fn from(generated: GeneratedCouplet) -> Self {
        let notice = generated
            .source
            .is_template()
            .then(|| "AI 模型暂时不可用，已使用本地模板生成对联".to_string());

        Self {
            source: generated.source.label().to_string(),
            couplet: generated.couplet,
            notice,
        }
    }
}

// =====================================
// Cart / Checkout DTOs
// =====================================
/// درخواست افزودن به سبد
///
/// کلاینت شناسه اندازه/سبک میفرسته؛ handler از کاتالوگ resolve میکنه
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub couplet: CoupletResult,

    #[validate(length(min = 1, message = "Size id is required"))]
    pub size_id: String,

    #[validate(length(min = 1, message = "Style id is required"))]
    pub style_id: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
}

/// درخواست ثبت سفارش (checkout)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[validate(nested)]
    pub shipping_info: super::ShippingInfo,
}

/// درخواست تغییر وضعیت سفارش
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// پاسخ پرداخت
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub paid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

// =====================================
// Admin Auth DTOs
// =====================================
/// پاسخ ورود موفق
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: AdminUserResponse,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// =====================================
// Catalog Admin DTOs
// =====================================
/// درخواست ساخت سبک چاپ
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStyleRequest {
    #[validate(length(min = 1, max = 100, message = "Style name is required"))]
    pub name: String,

    pub price: Decimal,

    #[validate(length(min = 1, message = "Preview url is required"))]
    pub preview_url: String,
}

/// درخواست بروزرسانی سبک چاپ
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStyleRequest {
    #[validate(length(min = 1, max = 100, message = "Style name cannot be empty"))]
    pub name: Option<String>,

    pub price: Option<Decimal>,

    #[validate(length(min = 1, message = "Preview url cannot be empty"))]
    pub preview_url: Option<String>,
}

/// درخواست ساخت محصول
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 100, message = "Product name is required"))]
    pub name: String,

    pub price: Decimal,

    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: String,
}

/// درخواست بروزرسانی محصول
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100, message = "Product name cannot be empty"))]
    pub name: Option<String>,

    pub price: Option<Decimal>,

    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
}

/// درخواست بروزرسانی تنظیمات پرداخت
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentConfigRequest {
    #[validate(length(min = 1, max = 100, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,

    /// فیلدهای provider به صورت کامل جایگزین میشن
    pub provider: Option<PaymentProvider>,
}

// =====================================
// Style Export
// =====================================
/// خروجی JSON سبک‌ها برای دانلود
#[derive(Debug, Clone)]
pub struct StyleExport {
    /// نام فایل با تاریخ روز: `couplet_styles_<YYYY-MM-DD>.json`
    pub filename: String,

    /// محتوای pretty-printed
    pub content: String,
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenerationSource;

    #[test]
    fn test_generate_request_defaults() {
        let json = r#"{"name1": "张", "occasion": "春节"}"#;
        let request: GenerateCoupletRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.length, 7);
        assert!(request.name2.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_generate_request_validation() {
        let json = r#"{"name1": "", "occasion": "春节"}"#;
        let request: GenerateCoupletRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_template_notice() {
        let generated = GeneratedCouplet {
            couplet: CoupletResult {
                top: "上".to_string(),
                bottom: "下".to_string(),
                center: "横".to_string(),
                explanation: "解".to_string(),
            },
            source: GenerationSource::Template,
        };

        let response = GenerateCoupletResponse::from(generated);
        assert_eq!(response.source, "template");
        assert!(response.notice.is_some());
    }

    #[test]
    fn test_provider_source_has_no_notice() {
        let generated = GeneratedCouplet {
            couplet: CoupletResult {
                top: "上".to_string(),
                bottom: "下".to_string(),
                center: "横".to_string(),
                explanation: "解".to_string(),
            },
            source: GenerationSource::Provider("deepseek".to_string()),
        };

        let response = GenerateCoupletResponse::from(generated);
        assert_eq!(response.source, "deepseek");
        assert!(response.notice.is_none());
    }
}
