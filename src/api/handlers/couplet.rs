//! # Couplet Handlers
//!
//! Handler‌های تولید دوبیتی و تاریخچه

use axum::{extract::State, Json};

use crate::{
    api::extractors::ValidatedJson,
    error::Result,
    models::{ApiResponse, GenerateCoupletRequest, GenerateCoupletResponse, HistoryEntry},
    services::AppState,
};

// =====================================
// Generate
// =====================================
/// تولید دوبیتی
///
/// این endpoint هیچوقت به خاطر providerها خطا نمیده - بدترین
/// حالت، جواب قالب محلی با یه notice هست.
///
/// # Endpoint
/// `POST /api/couplets/generate`
///
/// # Request Body
/// ```json
/// {
///   "name1": "张",
///   "name2": "王",          // optional
///   "occasion": "春节",
///   "length": 7,             // optional, default 7
///   "otherRequirements": ""  // optional
/// }
/// ```
pub async fn generate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateCoupletRequest>,
) -> Json<ApiResponse<GenerateCoupletResponse>> {
    let generated = state.generator.generate(&request).await;

    Json(ApiResponse::success(GenerateCoupletResponse::from(
        generated,
    )))
}

// =====================================
// History
// =====================================
/// تاریخچه تولید - جدیدترین اول، حداکثر ۱۰ رکورد
///
/// # Endpoint
/// `GET /api/couplets/history`
pub async fn history(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<HistoryEntry>>>> {
    let entries = state.generator.history().await?;

    Ok(Json(ApiResponse::success(entries)))
}
