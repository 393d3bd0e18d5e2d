//! # ماژول توابع کمکی (Utilities)
//!
//! این ماژول توابع و ثابت‌های کمکی رو ارائه میده.
//!
//! ## مفاهیم Rust:
//! - **const**: ثابت‌های compile-time
//! - **static**: متغیرهای با عمر 'static
//! - **once_cell**: مقداردهی اولیه تنبل برای Regex‌ها
//! - **Regex**: عبارات منظم

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

// =====================================
// Constants
// =====================================
/// کاراکترهای مجاز برای پسوند تصادفی ID‌ها
/// حروف کوچک و اعداد (مثل خروجی base36)
pub const ID_SUFFIX_CHARS: [char; 36] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// طول پسوند تصادفی برای آیتم سبد، تاریخچه و تراکنش
pub const DEFAULT_SUFFIX_LENGTH: usize = 9;

/// طول پسوند تصادفی برای شماره سفارش
pub const ORDER_SUFFIX_LENGTH: usize = 6;

// =====================================
// Lazy Statics (Regex patterns)
// =====================================
/// الگوی شماره موبایل ۱۱ رقمی چین
///
/// # مفاهیم:
/// - `Lazy`: مقداردهی اولیه در اولین استفاده
/// - این بهینه‌تر از ساخت Regex هر بار هست
pub static CN_MOBILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^1[3-9]\d{9}$").expect("Invalid regex pattern")
});

/// الگوی کد پستی ۶ رقمی
pub static ZIP_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{6}$").expect("Invalid regex pattern")
});

// =====================================
// ID Generation
// =====================================
/// تولید پسوند تصادفی با طول مشخص
///
/// # مثال
/// ```rust
/// use couplet_shop::utils::random_suffix;
///
/// let suffix = random_suffix(9);
/// assert_eq!(suffix.len(), 9);
/// ```
#[must_use]
pub fn random_suffix(length: usize) -> String {
    nanoid::nanoid!(length, &ID_SUFFIX_CHARS)
}

/// شناسه آیتم سبد خرید: `cart_<millis>_<rand9>`
#[must_use]
pub fn cart_item_id() -> String {
    format!(
        "cart_{}_{}",
        Utc::now().timestamp_millis(),
        random_suffix(DEFAULT_SUFFIX_LENGTH)
    )
}

/// شناسه رکورد تاریخچه: `couplet_<millis>_<rand9>`
#[must_use]
pub fn history_entry_id() -> String {
    format!(
        "couplet_{}_{}",
        Utc::now().timestamp_millis(),
        random_suffix(DEFAULT_SUFFIX_LENGTH)
    )
}

/// شماره سفارش: `order_<YYYYMMDDHHMMSS>_<rand6>`
///
/// بخش تاریخ باعث میشه شماره‌ها برای اپراتور قابل خوندن باشن؛
/// پسوند تصادفی یکتایی رو در ثانیه‌های شلوغ تضمین میکنه.
#[must_use]
pub fn order_id() -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    format!("order_{}_{}", stamp, random_suffix(ORDER_SUFFIX_LENGTH))
}

/// شناسه تراکنش پرداخت: `trans_<millis>_<rand9>`
#[must_use]
pub fn transaction_id() -> String {
    format!(
        "trans_{}_{}",
        Utc::now().timestamp_millis(),
        random_suffix(DEFAULT_SUFFIX_LENGTH)
    )
}

// =====================================
// Validation Functions
// =====================================
/// اعتبارسنجی شماره موبایل
///
/// # مثال
/// ```rust
/// use couplet_shop::utils::is_valid_mobile;
///
/// assert!(is_valid_mobile("13800001111"));
/// assert!(!is_valid_mobile("12345"));
/// ```
#[must_use]
pub fn is_valid_mobile(phone: &str) -> bool {
    CN_MOBILE.is_match(phone)
}

/// اعتبارسنجی کد پستی
#[must_use]
pub fn is_valid_zip_code(zip: &str) -> bool {
    ZIP_CODE.is_match(zip)
}

// =====================================
// Money Utilities
// =====================================
/// گرد کردن مبلغ به ۲ رقم اعشار
///
/// # مفاهیم:
/// - `Decimal`: محاسبات پولی بدون خطای float
/// - قیمت کل سبد با این تابع بسته میشه و بعدا دیگه حساب نمیشه
///
/// # مثال
/// ```rust
/// use couplet_shop::utils::round2;
/// use rust_decimal::Decimal;
///
/// let raw: Decimal = "49.905".parse().unwrap();
/// assert_eq!(round2(raw), "49.90".parse::<Decimal>().unwrap());
/// ```
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

// =====================================
// String Utilities
// =====================================
/// Mask کردن بخشی از متن (برای لاگ‌ها)
///
/// کلیدهای API هیچوقت کامل لاگ نمیشن.
///
/// # مثال
/// ```rust
/// use couplet_shop::utils::mask_string;
///
/// assert_eq!(mask_string("secret123", 3), "sec***");
/// ```
#[must_use]
pub fn mask_string(text: &str, visible_chars: usize) -> String {
    if text.len() <= visible_chars {
        return "*".repeat(text.len());
    }

    let visible: String = text.chars().take(visible_chars).collect();
    format!("{}***", visible)
}

/// تمیز کردن whitespace‌های اضافی
#[must_use]
pub fn clean_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_suffix_length() {
        for len in [6, 9, 12] {
            let suffix = random_suffix(len);
            assert_eq!(suffix.len(), len);
            assert!(suffix.chars().all(|c| ID_SUFFIX_CHARS.contains(&c)));
        }
    }

    #[test]
    fn test_id_prefixes() {
        assert!(cart_item_id().starts_with("cart_"));
        assert!(order_id().starts_with("order_"));
        assert!(transaction_id().starts_with("trans_"));
        assert!(history_entry_id().starts_with("couplet_"));
    }

    #[test]
    fn test_order_id_shape() {
        let id = order_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 14); // YYYYMMDDHHMMSS
        assert_eq!(parts[2].len(), ORDER_SUFFIX_LENGTH);
    }

    #[test]
    fn test_mobile_validation() {
        assert!(is_valid_mobile("13800001111"));
        assert!(is_valid_mobile("19912345678"));
        assert!(!is_valid_mobile("12345"));
        assert!(!is_valid_mobile("12800001111")); // رقم دوم باید 3-9 باشه
        assert!(!is_valid_mobile("138000011112")); // ۱۲ رقم
    }

    #[test]
    fn test_zip_validation() {
        assert!(is_valid_zip_code("100000"));
        assert!(!is_valid_zip_code("1000"));
        assert!(!is_valid_zip_code("10000a"));
    }

    #[test]
    fn test_round2() {
        let a: Decimal = "29.9".parse().unwrap();
        let b: Decimal = "19.9".parse().unwrap();
        let total = round2((a + b) * Decimal::from(3));
        assert_eq!(total, "149.40".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("secret123", 3), "sec***");
        assert_eq!(mask_string("ab", 5), "**");
    }

    #[test]
    fn test_clean_whitespace() {
        assert_eq!(clean_whitespace("  a   b  "), "a b");
    }
}
