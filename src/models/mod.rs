//! # ماژول مدل‌ها (Domain Models)
//!
//! این ماژول مدل‌های داده برنامه رو تعریف میکنه.
//!
//! ## مفاهیم Rust:
//! - **Structs / Enums**: ساختار داده و نوع‌های شمارشی
//! - **Derive Macros**: تولید خودکار کد
//! - **Serialize/Deserialize**: تبدیل JSON
//! - **Validation**: اعتبارسنجی داده
//!
//! ## تفاوت انواع مدل:
//! - **Entity**: داده‌ای که در store ذخیره میشه
//! - **DTO (Data Transfer Object)**: برای ارسال/دریافت از API
//!
//! ## قرارداد نام‌گذاری JSON
//!
//! entityها با `rename_all = "camelCase"` ذخیره میشن تا فرمت
//! داده‌ی ذخیره‌شده (totalPrice، paymentStatus، ...) ثابت بمونه.

mod couplet;
mod commerce;
mod catalog;
mod admin;
mod dto;

// Re-export همه مدل‌ها
pub use couplet::*;
pub use commerce::*;
pub use catalog::*;
pub use admin::*;
pub use dto::*;
