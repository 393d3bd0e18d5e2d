//! # ماژول تنظیمات (Configuration)
//!
//! این ماژول مسئول خوندن و مدیریت تنظیمات برنامه هست.
//!
//! ## مفاهیم Rust:
//! - **Structs**: ساختار داده‌ای برای نگهداری تنظیمات
//! - **Default Trait**: مقادیر پیش‌فرض
//! - **Builder Pattern**: ساخت تدریجی آبجکت
//! - **Option<String>**: کلیدهای API اختیاری‌ان - بدون کلید، provider
//!   در زنجیره fallback همیشه fail میشه و نوبت به بعدی میرسه

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// تنظیمات اصلی برنامه
///
/// # مثال
/// ```rust
/// use couplet_shop::config::Config;
///
/// let config = Config::default();
/// println!("Port: {}", config.port);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// آدرس هاست سرور
    pub host: String,

    /// پورت سرور
    pub port: u16,

    /// آدرس اتصال به دیتابیس (پشت key-value store)
    pub database_url: String,

    /// کلید مخفی JWT برای session ادمین
    pub jwt_secret: String,

    /// مدت اعتبار توکن JWT (ساعت)
    pub jwt_expiration_hours: u64,

    /// محیط اجرا (development, production)
    pub environment: Environment,

    /// تنظیمات providerهای تولید دوبیتی
    pub providers: ProvidersConfig,
}

/// تنظیمات اتصال به مدل‌های زبانی
///
/// هر provider یه کلید (و گاهی شناسه اضافی) و یه base URL داره.
/// base URLها پیش‌فرض دارن و فقط کلیدها از env خونده میشن.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub deepseek_api_key: Option<String>,
    pub deepseek_base_url: String,

    /// کلید ERNIE (client_id در تبادل OAuth)
    pub ernie_api_key: Option<String>,
    /// secret key برای تبادل توکن ERNIE
    pub ernie_secret_key: Option<String>,
    pub ernie_base_url: String,
    pub ernie_model: String,

    pub tongyi_api_key: Option<String>,
    pub tongyi_base_url: String,

    pub doubao_api_key: Option<String>,
    pub doubao_base_url: String,

    pub spark_api_key: Option<String>,
    pub spark_app_id: Option<String>,
    pub spark_base_url: String,

    /// Kouzi اختیاریه - فقط وقتی کلید داشته باشه به انتهای زنجیره اضافه میشه
    pub kouzi_api_key: Option<String>,
    pub kouzi_base_url: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            deepseek_api_key: None,
            deepseek_base_url: "https://api.deepseek.com/v1/chat/completions".to_string(),
            ernie_api_key: None,
            ernie_secret_key: None,
            ernie_base_url:
                "https://aip.baidubce.com/rpc/2.0/ai_custom/v1/wenxinworkshop/chat".to_string(),
            ernie_model: "ERNIE-Bot".to_string(),
            tongyi_api_key: None,
            tongyi_base_url:
                "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation"
                    .to_string(),
            doubao_api_key: None,
            doubao_base_url: "https://api.doubao.com/chat/completions".to_string(),
            spark_api_key: None,
            spark_app_id: None,
            spark_base_url: "https://spark-api.xf-yun.com/v3.5/chat/completions".to_string(),
            kouzi_api_key: None,
            kouzi_base_url: "https://api.kouzi.ai/v1/chat/completions".to_string(),
        }
    }
}

/// محیط اجرای برنامه
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// محیط توسعه - با قابلیت‌های دیباگ
    #[default]
    Development,

    /// محیط تست
    Testing,

    /// محیط تولید - بهینه‌سازی شده
    Production,
}

impl Environment {
    /// آیا در محیط توسعه هستیم؟
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// آیا در محیط تولید هستیم؟
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// تبدیل String به Environment
impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }
}

/// مقادیر پیش‌فرض برای Config
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "sqlite://data/couplet_shop.db?mode=rwc".to_string(),
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_hours: 24,
            environment: Environment::Development,
            providers: ProvidersConfig::default(),
        }
    }
}

impl Config {
    /// ساخت تنظیمات از متغیرهای محیطی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه مقدارهای خونده شده نامعتبر باشن
    ///
    /// # مثال
    /// ```rust,no_run
    /// use couplet_shop::config::Config;
    ///
    /// let config = Config::from_env().expect("Failed to load config");
    /// ```
    pub fn from_env() -> Result<Self> {
        // helper برای خوندن متغیر محیطی با default
        let get_env = |key: &str, default: &str| -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        };

        // helper برای متغیرهای اختیاری
        let opt_env = |key: &str| -> Option<String> {
            env::var(key).ok().filter(|v| !v.is_empty())
        };

        // helper برای parse کردن عدد
        let parse_env = |key: &str, default: u32| -> u32 {
            env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        };

        let defaults = ProvidersConfig::default();

        Ok(Self {
            host: get_env("HOST", "127.0.0.1"),
            port: parse_env("PORT", 3000) as u16,
            database_url: get_env("DATABASE_URL", "sqlite://data/couplet_shop.db?mode=rwc"),
            jwt_secret: get_env("JWT_SECRET", "change-me-in-production"),
            jwt_expiration_hours: parse_env("JWT_EXPIRATION_HOURS", 24) as u64,
            environment: get_env("ENVIRONMENT", "development").into(),
            providers: ProvidersConfig {
                deepseek_api_key: opt_env("DEEPSEEK_API_KEY"),
                deepseek_base_url: get_env("DEEPSEEK_BASE_URL", &defaults.deepseek_base_url),
                ernie_api_key: opt_env("ERNIE_API_KEY"),
                ernie_secret_key: opt_env("ERNIE_SECRET_KEY"),
                ernie_base_url: get_env("ERNIE_BASE_URL", &defaults.ernie_base_url),
                ernie_model: get_env("ERNIE_MODEL", &defaults.ernie_model),
                tongyi_api_key: opt_env("TONGYI_API_KEY"),
                tongyi_base_url: get_env("TONGYI_BASE_URL", &defaults.tongyi_base_url),
                doubao_api_key: opt_env("DOUBAO_API_KEY"),
                doubao_base_url: get_env("DOUBAO_BASE_URL", &defaults.doubao_base_url),
                spark_api_key: opt_env("SPARK_API_KEY"),
                spark_app_id: opt_env("SPARK_APP_ID"),
                spark_base_url: get_env("SPARK_BASE_URL", &defaults.spark_base_url),
                kouzi_api_key: opt_env("KOUZI_API_KEY"),
                kouzi_base_url: get_env("KOUZI_BASE_URL", &defaults.kouzi_base_url),
            },
        })
    }

    /// اعتبارسنجی تنظیمات
    pub fn validate(&self) -> Result<()> {
        // چک کردن که jwt_secret در production تغییر کرده باشه
        if self.environment.is_production() && self.jwt_secret == "change-me-in-production" {
            return Err(AppError::Config(
                "JWT_SECRET must be changed in production".to_string(),
            ));
        }

        // چک کردن port
        if self.port == 0 {
            return Err(AppError::Config("PORT cannot be 0".to_string()));
        }

        // base URLهای providerها باید قابل parse باشن
        for (name, base) in [
            ("deepseek", &self.providers.deepseek_base_url),
            ("ernie", &self.providers.ernie_base_url),
            ("tongyi", &self.providers.tongyi_base_url),
            ("doubao", &self.providers.doubao_base_url),
            ("spark", &self.providers.spark_base_url),
            ("kouzi", &self.providers.kouzi_base_url),
        ] {
            url::Url::parse(base).map_err(|e| {
                AppError::Config(format!("Invalid base URL for provider '{}': {}", name, e))
            })?;
        }

        Ok(())
    }

    /// آدرس کامل سرور
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =====================================
// Builder Pattern
// =====================================
/// ساخت Config با Builder Pattern
///
/// # مثال
/// ```rust
/// use couplet_shop::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .port(8080)
///     .host("0.0.0.0")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// ساخت builder جدید
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// تنظیم پورت
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// تنظیم هاست
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// تنظیم database_url
    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    /// تنظیم jwt_secret
    #[must_use]
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    /// تنظیم محیط
    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.config.environment = env;
        self
    }

    /// تنظیم کلید DeepSeek (برای تست)
    #[must_use]
    pub fn deepseek_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.providers.deepseek_api_key = Some(key.into());
        self
    }

    /// ساخت Config نهایی
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }

    /// ساخت Config با اعتبارسنجی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اعتبارسنجی fail بشه
    pub fn build_validated(self) -> Result<Config> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    /// تست ساخت config با مقادیر پیش‌فرض
    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.providers.deepseek_api_key.is_none());
    }

    /// تست Builder Pattern
    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .port(8080)
            .host("0.0.0.0")
            .deepseek_api_key("sk-test")
            .build();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.providers.deepseek_api_key.as_deref(), Some("sk-test"));
    }

    /// تست تبدیل Environment
    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from("production".to_string()), Environment::Production);
        assert_eq!(Environment::from("PROD".to_string()), Environment::Production);
        assert_eq!(Environment::from("development".to_string()), Environment::Development);
        assert_eq!(Environment::from("unknown".to_string()), Environment::Development);
    }

    /// تست اعتبارسنجی
    #[test]
    fn test_validation_fails_in_production_with_default_secret() {
        let config = ConfigBuilder::new()
            .environment(Environment::Production)
            .build();

        assert!(config.validate().is_err());
    }

    /// تست اعتبارسنجی base URL
    #[test]
    fn test_validation_rejects_bad_base_url() {
        let mut config = Config::default();
        config.providers.tongyi_base_url = "not a url".to_string();

        assert!(config.validate().is_err());
    }
}
