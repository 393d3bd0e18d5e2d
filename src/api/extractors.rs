//! # Custom Extractors
//!
//! Extractor‌های سفارشی برای استخراج داده از request
//!
//! ## مفاهیم Rust + Axum:
//! - **FromRequestParts**: trait برای ساخت extractor
//! - **Rejection**: نوع خطا برای extractors
//!
//! وقتی یه extractor به عنوان پارامتر handler تعریف میشه،
//! axum قبل از اجرای handler، extractor رو اجرا میکنه.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{
    error::AppError,
    models::{AdminRole, Claims},
    services::AppState,
};

// =====================================
// Bearer Token Extractor
// =====================================
/// استخراج توکن از header Authorization
///
/// # Format
/// `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl FromRequestParts<AppState> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Unauthorized(
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = auth_header[7..].to_string();

        if token.is_empty() {
            return Err(AppError::Unauthorized("Empty token".to_string()));
        }

        Ok(BearerToken(token))
    }
}

// =====================================
// Admin Auth Extractor
// =====================================
/// استخراج ادمین احراز هویت شده
///
/// توکن verify میشه و claims کامل (شامل نقش) برمیگرده.
/// اگه توکن نامعتبر باشه، 401 برمیگرده.
///
/// # استفاده:
/// ```rust,ignore
/// async fn handler(AdminAuth(claims): AdminAuth) -> ... {
///     // claims.sub شناسه کاربره
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminAuth(pub Claims);

impl AdminAuth {
    /// فقط نقش admin - برای عملیات حساس (مدیریت کاربر، پرداخت)
    pub fn require_admin_role(&self) -> Result<(), AppError> {
        if matches!(self.0.role, AdminRole::Admin) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Admin role required".to_string(),
            ))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // اول توکن رو بگیر
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;

        // Verify کردن توکن
        let claims = state.admin.verify_token(&token)?;

        Ok(AdminAuth(claims))
    }
}

// =====================================
// JSON with Validation
// =====================================
use axum::{body::Body, extract::rejection::JsonRejection, extract::FromRequest, http::Request, Json};
use serde::de::DeserializeOwned;
use validator::Validate;

/// استخراج JSON با اعتبارسنجی خودکار
///
/// # استفاده:
/// ```rust,ignore
/// async fn handler(ValidatedJson(data): ValidatedJson<CheckoutRequest>) -> ... {
///     // data حتما valid هست
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        // اول JSON رو parse کن
        let Json(data): Json<T> = Json::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::BadRequest(format!("Invalid JSON: {}", e)))?;

        // بعد validate کن
        data.validate()?;

        Ok(ValidatedJson(data))
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdminUser;

    #[test]
    fn test_require_admin_role() {
        let admin = AdminUser::new("a", "password1", AdminRole::Admin).unwrap();
        let editor = AdminUser::new("e", "password1", AdminRole::Editor).unwrap();

        let admin_auth = AdminAuth(Claims::new(&admin, 1));
        let editor_auth = AdminAuth(Claims::new(&editor, 1));

        assert!(admin_auth.require_admin_role().is_ok());
        assert!(editor_auth.require_admin_role().is_err());
    }
}
