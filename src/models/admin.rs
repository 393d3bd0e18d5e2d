//! # مدل کاربر ادمین (Admin User)
//!
//! Entity و DTO‌های کنسول مدیریت
//!
//! ## نکته امنیتی
//!
//! رمز عبور همیشه با Argon2 هش میشه و هش فقط داخل store میمونه -
//! پاسخ‌های API از `AdminUserResponse` استفاده میکنن که هش نداره.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// =====================================
// Admin Role
// =====================================
/// نقش کاربر ادمین
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    /// دسترسی کامل
    Admin,
    /// فقط مدیریت محتوا
    Editor,
}

// =====================================
// Admin User Entity
// =====================================
/// Entity کاربر ادمین
///
/// # مفاهیم:
/// - `password_hash`: هش Argon2 (نه رمز خام!)
/// - این struct با هش در store ذخیره میشه؛ به کلاینت نمیره
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub username: String,

    /// هش Argon2 رمز عبور
    pub password_hash: String,

    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl AdminUser {
    /// ساخت کاربر جدید با هش کردن رمز عبور
    ///
    /// # مفاهیم:
    /// - Salt خودکار تولید میشه
    ///
    /// # Errors
    /// خطا برمیگردونه اگه hashing fail بشه
    pub fn new(
        username: impl Into<String>,
        password: &str,
        role: AdminRole,
    ) -> crate::error::Result<Self> {
        let now = Utc::now();

        Ok(Self {
            id: format!("admin_{}", uuid::Uuid::new_v4().simple()),
            username: username.into(),
            password_hash: hash_password(password)?,
            role,
            created_at: now,
            updated_at: now,
            last_login: None,
        })
    }

    /// بررسی رمز عبور
    ///
    /// # Errors
    /// خطا برمیگردونه اگه هش ذخیره‌شده خراب باشه
    pub fn verify_password(&self, password: &str) -> crate::error::Result<bool> {
        use argon2::{Argon2, PasswordHash, PasswordVerifier};

        let parsed_hash = PasswordHash::new(&self.password_hash)
            .map_err(|e| crate::error::AppError::Internal(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// تعویض رمز عبور با هش تازه
    pub fn set_password(&mut self, password: &str) -> crate::error::Result<()> {
        self.password_hash = hash_password(password)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// ثبت زمان ورود
    pub fn touch_login(&mut self) {
        let now = Utc::now();
        self.last_login = Some(now);
        self.updated_at = now;
    }
}

/// هش کردن رمز عبور با Argon2
///
/// # Errors
/// خطا برمیگردونه اگه hashing fail بشه
pub fn hash_password(password: &str) -> crate::error::Result<String> {
    use argon2::{
        password_hash::{rand_core::OsRng, SaltString},
        Argon2, PasswordHasher,
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    Ok(argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| crate::error::AppError::Internal(e.to_string()))?
        .to_string())
}

// =====================================
// API Response DTO
// =====================================
/// پاسخ اطلاعات کاربر ادمین
///
/// توجه: password_hash اینجا نیست!
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserResponse {
    pub id: String,
    pub username: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

/// تبدیل AdminUser به AdminUserResponse
///
/// این تضمین میکنه هش هیچوقت leak نشه
impl From<AdminUser> for AdminUserResponse {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

impl From<&AdminUser> for AdminUserResponse {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

// =====================================
// API Request DTOs
// =====================================
/// درخواست ورود
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// درخواست ساخت کاربر ادمین
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdminUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub role: AdminRole,
}

/// درخواست بروزرسانی کاربر ادمین
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAdminUserRequest {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    pub role: Option<AdminRole>,
}

// =====================================
// JWT Claims
// =====================================
/// محتویات توکن JWT ادمین
///
/// # مفاهیم:
/// - `sub`: Subject (شناسه کاربر)
/// - `exp`: Expiration time (Unix timestamp)
/// - `iat`: Issued at (زمان صدور)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// شناسه کاربر
    pub sub: String,

    /// نام کاربری
    pub username: String,

    /// نقش
    pub role: AdminRole,

    /// زمان انقضا (Unix timestamp)
    pub exp: i64,

    /// زمان صدور
    pub iat: i64,
}

impl Claims {
    /// ساخت claims جدید
    #[must_use]
    pub fn new(user: &AdminUser, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + chrono::Duration::hours(expiration_hours as i64);

        Self {
            sub: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }

    /// آیا توکن منقضی شده؟
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let user = AdminUser::new("admin", "admin123", AdminRole::Admin).unwrap();

        // هش نباید رمز خام باشه
        assert_ne!(user.password_hash, "admin123");
        assert!(user.password_hash.starts_with("$argon2"));

        assert!(user.verify_password("admin123").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_response_hides_hash() {
        let user = AdminUser::new("editor1", "secret99", AdminRole::Editor).unwrap();
        let response = AdminUserResponse::from(&user);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["username"], "editor1");
        assert_eq!(json["role"], "editor");
    }

    #[test]
    fn test_claims_expiration() {
        let user = AdminUser::new("admin", "admin123", AdminRole::Admin).unwrap();

        let claims = Claims::new(&user, 1);
        assert!(!claims.is_expired());

        let expired = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            exp: Utc::now().timestamp() - 3600,
            iat: Utc::now().timestamp() - 7200,
        };
        assert!(expired.is_expired());
    }
}
