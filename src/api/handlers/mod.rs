//! # HTTP Handlers
//!
//! این ماژول handler‌های HTTP رو تعریف میکنه.
//!
//! ## Handler چیه؟
//! تابعی که request میگیره و response برمیگردونه.
//! در axum، هر handler یک async function هست.
//!
//! handlerها نازک نگه داشته شدن - منطق در سرویس‌هاست.

pub mod couplet;
pub mod cart;
pub mod orders;
pub mod catalog;
pub mod admin;
pub mod health;
