//! # مدل دوبیتی (Couplet)
//!
//! Entity و نوع‌های مربوط به دوبیتی‌های تولید شده
//!
//! ## قرارداد بالا/پایین
//!
//! در کل سیستم `top` همیشه مصراع اول (上联) و `bottom` همیشه
//! مصراع دوم (下联) هست - در prompt، در parser و در قالب‌ها.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils;

// =====================================
// Couplet Result
// =====================================
/// نتیجه‌ی یک تولید - بعد از ساخت تغییر نمیکنه
///
/// # مفاهیم:
/// - هر چهار فیلد رشته‌ان و همیشه پر برمیگردن
/// - شناسه نداره؛ شناسه فقط موقع ورود به تاریخچه ساخته میشه
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoupletResult {
    /// مصراع اول (上联)
    pub top: String,

    /// مصراع دوم (下联)
    pub bottom: String,

    /// سردر چهار حرفی (横批)
    pub center: String,

    /// شرح مفهوم (寓意)
    pub explanation: String,
}

impl CoupletResult {
    /// آیا هر چهار فیلد پر هستن؟
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.top.is_empty()
            && !self.bottom.is_empty()
            && !self.center.is_empty()
            && !self.explanation.is_empty()
    }
}

// =====================================
// History Entry
// =====================================
/// رکورد تاریخچه: دوبیتی + شناسه + زمان تولید
///
/// # مفاهیم:
/// - `#[serde(flatten)]`: فیلدهای دوبیتی هم‌سطح id/timestamp ذخیره میشن
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,

    #[serde(flatten)]
    pub couplet: CoupletResult,

    /// زمان تولید (RFC 3339)
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// ساخت رکورد جدید با شناسه و زمان فعلی
    #[must_use]
    pub fn new(couplet: CoupletResult) -> Self {
        Self {
            id: utils::history_entry_id(),
            couplet,
            timestamp: Utc::now(),
        }
    }
}

// =====================================
// Occasion
// =====================================
/// مناسبت - دسته‌بندی که قالب محلی و prompt رو جهت میده
///
/// # مفاهیم:
/// - مناسبت در درخواست یه رشته آزاده؛ این enum فقط برای انتخاب
///   قالب محلی به کار میره
/// - مناسبت ناشناخته → پیش‌فرض عید بهار
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occasion {
    /// 春节 - عید بهار
    SpringFestival,
    /// 结婚 - عروسی
    Wedding,
    /// 祝寿 - جشن تولد بزرگان
    Longevity,
    /// 乔迁 - خانه‌ی نو
    Housewarming,
    /// 开业 - افتتاح کسب‌وکار
    Opening,
    /// 搞笑 - طنز
    Humorous,
}

impl Occasion {
    /// برچسب چینی مناسبت - همون چیزی که فرم میفرسته
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::SpringFestival => "春节",
            Self::Wedding => "结婚",
            Self::Longevity => "祝寿",
            Self::Housewarming => "乔迁",
            Self::Opening => "开业",
            Self::Humorous => "搞笑",
        }
    }

    /// تشخیص مناسبت از رشته؛ ناشناخته → None
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "春节" => Some(Self::SpringFestival),
            "结婚" => Some(Self::Wedding),
            "祝寿" => Some(Self::Longevity),
            "乔迁" => Some(Self::Housewarming),
            "开业" => Some(Self::Opening),
            "搞笑" => Some(Self::Humorous),
            _ => None,
        }
    }

    /// مناسبت با fallback به پیش‌فرض
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(Self::SpringFestival)
    }

    /// همه‌ی مناسبت‌ها
    #[must_use]
    pub fn all() -> [Occasion; 6] {
        [
            Self::SpringFestival,
            Self::Wedding,
            Self::Longevity,
            Self::Housewarming,
            Self::Opening,
            Self::Humorous,
        ]
    }
}

// =====================================
// Generation Source
// =====================================
/// منبع یک تولید موفق - provider ریموت یا قالب محلی
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum GenerationSource {
    /// یکی از providerهای ریموت جواب داده
    Provider(String),

    /// همه providerها fail شدن و قالب محلی استفاده شده
    Template,
}

impl GenerationSource {
    /// آیا قالب محلی بوده؟
    #[must_use]
    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template)
    }

    /// اسم قابل نمایش منبع
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Provider(name) => name,
            Self::Template => "template",
        }
    }
}

/// خروجی سرویس تولید: دوبیتی + منبع
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedCouplet {
    pub couplet: CoupletResult,
    pub source: GenerationSource,
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occasion_parse() {
        assert_eq!(Occasion::parse("春节"), Some(Occasion::SpringFestival));
        assert_eq!(Occasion::parse("结婚"), Some(Occasion::Wedding));
        assert_eq!(Occasion::parse("graduation"), None);
        assert_eq!(Occasion::parse_or_default("graduation"), Occasion::SpringFestival);
    }

    #[test]
    fn test_history_entry_flattens_couplet() {
        let entry = HistoryEntry::new(CoupletResult {
            top: "张灯结彩迎新岁".to_string(),
            bottom: "喜气盈门贺吉年".to_string(),
            center: "新春快乐".to_string(),
            explanation: "节日气氛".to_string(),
        });

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("top").is_some());
        assert!(json.get("id").is_some());
        assert!(json.get("couplet").is_none());
    }

    #[test]
    fn test_is_complete() {
        let mut couplet = CoupletResult {
            top: "上".to_string(),
            bottom: "下".to_string(),
            center: "横".to_string(),
            explanation: "解".to_string(),
        };
        assert!(couplet.is_complete());

        couplet.center.clear();
        assert!(!couplet.is_complete());
    }
}
