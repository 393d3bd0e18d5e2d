//! # سرویس ادمین (Admin Service)
//!
//! مدیریت کاربران کنسول، ورود و JWT
//!
//! ## مفاهیم Rust:
//! - Password Hashing: هش Argon2 به جای رمز خام
//! - Bootstrap: اولین دسترسی، کاربر پیش‌فرض رو میسازه
//! - Security: پیام خطای ورود عمومیه تا username قابل حدس نباشه

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::{
    config::Config,
    database::{AdminUserRepository, KvStore},
    error::{AppError, OptionExt, Result},
    models::{
        AdminRole, AdminUser, AdminUserResponse, Claims, CreateAdminUserRequest, LoginRequest,
        LoginResponse, UpdateAdminUserRequest,
    },
};

use super::Service;

/// مشخصات کاربر bootstrap - رمزش موقع ساخت هش میشه
const BOOTSTRAP_USERNAME: &str = "admin";
const BOOTSTRAP_PASSWORD: &str = "admin123";

// =====================================
// Admin Service
// =====================================
/// سرویس احراز هویت و مدیریت کاربران ادمین
#[derive(Debug, Clone)]
pub struct AdminService {
    repo: AdminUserRepository,
    config: Arc<Config>,
}

impl Service for AdminService {}

impl AdminService {
    /// ساخت سرویس جدید
    #[must_use]
    pub fn new(store: KvStore, config: Arc<Config>) -> Self {
        Self {
            repo: AdminUserRepository::admin_users(store),
            config,
        }
    }

    /// لیست کاربرها با تضمین bootstrap
    ///
    /// اگه هیچ کاربری وجود نداشته باشه، کاربر پیش‌فرض ساخته میشه
    async fn ensure_bootstrap(&self) -> Result<Vec<AdminUser>> {
        let users = self.repo.load_all().await?;
        if !users.is_empty() {
            return Ok(users);
        }

        let default_admin =
            AdminUser::new(BOOTSTRAP_USERNAME, BOOTSTRAP_PASSWORD, AdminRole::Admin)?;
        let users = vec![default_admin];
        self.repo.save_all(&users).await?;

        info!("Bootstrap admin user created");
        Ok(users)
    }

    // ----------------------------------------
    // Auth
    // ----------------------------------------

    /// ورود کاربر ادمین
    ///
    /// # مفاهیم:
    /// - پیام عمومی برای جلوگیری از enumeration
    /// - زمان آخرین ورود ثبت میشه
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        request.validate()?;

        let mut users = self.ensure_bootstrap().await?;

        let user = users
            .iter_mut()
            .find(|u| u.username == request.username)
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if !user.verify_password(&request.password)? {
            warn!(username = %request.username, "Failed login attempt");
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        user.touch_login();
        let logged_in = user.clone();
        self.repo.save_all(&users).await?;

        let token = self.generate_token(&logged_in)?;
        let expires_at =
            Utc::now() + chrono::Duration::hours(self.config.jwt_expiration_hours as i64);

        info!(user_id = %logged_in.id, "Admin logged in");

        Ok(LoginResponse {
            user: logged_in.into(),
            token,
            expires_at,
        })
    }

    /// اعتبارسنجی توکن JWT
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.config.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            warn!(error = %e, "Token verification failed");
            AppError::Unauthorized("Invalid token".to_string())
        })?;

        if token_data.claims.is_expired() {
            return Err(AppError::Unauthorized("Token expired".to_string()));
        }

        Ok(token_data.claims)
    }

    /// تولید توکن JWT
    fn generate_token(&self, user: &AdminUser) -> Result<String> {
        let claims = Claims::new(user, self.config.jwt_expiration_hours);
        let encoding_key = EncodingKey::from_secret(self.config.jwt_secret.as_bytes());

        Ok(encode(&Header::default(), &claims, &encoding_key)?)
    }

    // ----------------------------------------
    // User CRUD
    // ----------------------------------------

    /// لیست کاربرها - بدون هش رمز
    pub async fn list_users(&self) -> Result<Vec<AdminUserResponse>> {
        let users = self.ensure_bootstrap().await?;
        Ok(users.iter().map(AdminUserResponse::from).collect())
    }

    /// ساخت کاربر جدید
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_user(&self, request: CreateAdminUserRequest) -> Result<AdminUserResponse> {
        request.validate()?;

        let mut users = self.ensure_bootstrap().await?;

        if users.iter().any(|u| u.username == request.username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        let user = AdminUser::new(&request.username, &request.password, request.role)?;
        let response = AdminUserResponse::from(&user);

        users.push(user);
        self.repo.save_all(&users).await?;

        info!(user_id = %response.id, "Admin user created");
        Ok(response)
    }

    /// بروزرسانی نقش یا رمز کاربر
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: &str,
        request: UpdateAdminUserRequest,
    ) -> Result<AdminUserResponse> {
        request.validate()?;

        let mut users = self.ensure_bootstrap().await?;

        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_not_found(format!("User '{}' not found", user_id))?;

        if let Some(password) = &request.password {
            user.set_password(password)?;
        }

        if let Some(role) = request.role {
            user.role = role;
            user.updated_at = Utc::now();
        }

        let response = AdminUserResponse::from(&*user);
        self.repo.save_all(&users).await?;

        info!(user_id = %user_id, "Admin user updated");
        Ok(response)
    }

    /// حذف کاربر
    ///
    /// آخرین کاربر با نقش admin قابل حذف نیست
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let mut users = self.ensure_bootstrap().await?;

        let position = users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_not_found(format!("User '{}' not found", user_id))?;

        let is_admin = matches!(users[position].role, AdminRole::Admin);
        let admin_count = users
            .iter()
            .filter(|u| matches!(u.role, AdminRole::Admin))
            .count();

        if is_admin && admin_count <= 1 {
            return Err(AppError::Forbidden(
                "Cannot delete the last admin user".to_string(),
            ));
        }

        users.remove(position);
        self.repo.save_all(&users).await?;

        info!(user_id = %user_id, "Admin user deleted");
        Ok(())
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::database::Database;

    async fn service() -> AdminService {
        let db = Database::in_memory().await.unwrap();
        let config = Arc::new(ConfigBuilder::new().jwt_secret("test-secret").build());
        AdminService::new(KvStore::new(db), config)
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_bootstrap_and_login() {
        let service = service().await;

        // اولین ورود، کاربر پیش‌فرض رو میسازه
        let response = service
            .login(login_request("admin", "admin123"))
            .await
            .unwrap();

        assert_eq!(response.user.username, "admin");
        assert!(!response.token.is_empty());

        // توکن معتبره و نقش داخلشه
        let claims = service.verify_token(&response.token).unwrap();
        assert_eq!(claims.username, "admin");
        assert!(matches!(claims.role, AdminRole::Admin));

        // زمان آخرین ورود ثبت شده
        let users = service.list_users().await.unwrap();
        assert!(users[0].last_login.is_some());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let service = service().await;

        let wrong_password = service.login(login_request("admin", "nope")).await;
        assert!(matches!(wrong_password, Err(AppError::Unauthorized(_))));

        let unknown_user = service.login(login_request("ghost", "admin123")).await;
        assert!(matches!(unknown_user, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_verify_rejects_garbage_token() {
        let service = service().await;
        assert!(service.verify_token("not-a-jwt").is_err());
    }

    #[tokio::test]
    async fn test_user_crud() {
        let service = service().await;

        let created = service
            .create_user(CreateAdminUserRequest {
                username: "editor1".to_string(),
                password: "secret99".to_string(),
                role: AdminRole::Editor,
            })
            .await
            .unwrap();

        // username تکراری رد میشه
        let duplicate = service
            .create_user(CreateAdminUserRequest {
                username: "editor1".to_string(),
                password: "secret99".to_string(),
                role: AdminRole::Editor,
            })
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        // تغییر نقش
        service
            .update_user(
                &created.id,
                UpdateAdminUserRequest {
                    password: None,
                    role: Some(AdminRole::Admin),
                },
            )
            .await
            .unwrap();

        // تغییر رمز و ورود با رمز جدید
        service
            .update_user(
                &created.id,
                UpdateAdminUserRequest {
                    password: Some("newpass1".to_string()),
                    role: None,
                },
            )
            .await
            .unwrap();

        service
            .login(login_request("editor1", "newpass1"))
            .await
            .unwrap();

        // حذف
        service.delete_user(&created.id).await.unwrap();
        assert_eq!(service.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cannot_delete_last_admin() {
        let service = service().await;

        let users = service.list_users().await.unwrap();
        let result = service.delete_user(&users[0].id).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
