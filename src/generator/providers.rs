//! # Providerهای تولید
//!
//! هر provider یه استراتژی پشت interface مشترکه: یک POST با
//! احراز هویت و envelope مخصوص خودش، بعد استخراج متن جواب و parse.
//!
//! ## قرارداد زنجیره fallback
//!
//! - هیچ retry و backoff‌ای وجود نداره - شکست یعنی نوبت بعدی
//! - فقط DeepSeek مهلت ۳۰ ثانیه‌ای per-request داره
//! - نبودن کلید API هم فقط یه شکست provider هست، نه خطای برنامه
//!
//! ## مفاهیم Rust:
//! - **Strategy Pattern**: یک trait، چند پیاده‌سازی
//! - **async_trait**: متد async در trait
//! - **thiserror**: enum خطای داخلی که از generator بیرون نمیره

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::parse;
use crate::config::ProvidersConfig;
use crate::models::CoupletResult;

/// مهلت درخواست DeepSeek
const DEEPSEEK_TIMEOUT: Duration = Duration::from_secs(30);

/// آدرس تبادل توکن ERNIE
const ERNIE_TOKEN_URL: &str = "https://aip.baidubce.com/oauth/2.0/token";

// =====================================
// Provider Error
// =====================================
/// خطای داخلی providerها
///
/// این خطا هیچوقت به caller سرویس تولید نمیرسه - همه‌ی حالت‌هاش
/// در زنجیره fallback به "برو سراغ بعدی" ترجمه میشن
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Invalid response envelope: {0}")]
    InvalidResponse(String),

    #[error("Response content could not be parsed as a couplet")]
    Unparseable,

    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(e.to_string())
        }
    }
}

// =====================================
// Provider Trait
// =====================================
/// استراتژی یک provider تولید
///
/// # مفاهیم:
/// - `attempt` یک تلاش کامله: درخواست + استخراج + parse
/// - خروجی موفق همیشه یه دوبیتی کامله
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// اسم provider برای لاگ و پاسخ API
    fn name(&self) -> &'static str;

    /// یک تلاش تولید با prompt داده شده
    async fn attempt(&self, prompt: &str) -> Result<CoupletResult, ProviderError>;
}

// =====================================
// Shared request/response shapes
// =====================================
/// پیام chat - همه providerها یک پیام user میفرستن
#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatMessage {
    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// بدنه درخواست به سبک OpenAI
#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// درخواست صریح خروجی JSON (فقط DeepSeek)
#[derive(Debug, Clone, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ResponseFormat {
    fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

/// envelope جواب به سبک OpenAI
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// متن جواب از `choices[0].message.content`
    fn content(self) -> Result<String, ProviderError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ProviderError::InvalidResponse("no choices in response".to_string()))
    }
}

/// چک کردن status و خوندن بدنه JSON
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

/// parse کردن متن استخراج‌شده به دوبیتی
fn parse_content(content: &str) -> Result<CoupletResult, ProviderError> {
    parse::parse_couplet(content).ok_or(ProviderError::Unparseable)
}

// =====================================
// DeepSeek
// =====================================
/// DeepSeek - provider اصلی زنجیره
///
/// تنها provider با مهلت per-request و `response_format` صریح
#[derive(Debug, Clone)]
pub struct DeepSeekProvider {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl DeepSeekProvider {
    #[must_use]
    pub fn new(http: Client, config: &ProvidersConfig) -> Self {
        Self {
            http,
            api_key: config.deepseek_api_key.clone(),
            base_url: config.deepseek_base_url.clone(),
        }
    }
}

#[async_trait]
impl GenerationProvider for DeepSeekProvider {
    fn name(&self) -> &'static str {
        "deepseek"
    }

    async fn attempt(&self, prompt: &str) -> Result<CoupletResult, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let request = ChatRequest {
            model: "deepseek-chat".to_string(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(0.7),
            max_tokens: Some(1000),
            response_format: Some(ResponseFormat::json_object()),
        };

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(api_key)
            .timeout(DEEPSEEK_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        let content = read_json::<ChatResponse>(response).await?.content()?;
        parse_content(&content)
    }
}

// =====================================
// ERNIE (文心一言)
// =====================================
/// ERNIE - اول توکن OAuth میگیره، بعد توکن رو در query string میفرسته
#[derive(Debug, Clone)]
pub struct ErnieProvider {
    http: Client,
    api_key: Option<String>,
    secret_key: Option<String>,
    base_url: String,
    model: String,
}

/// جواب تبادل توکن
#[derive(Debug, Deserialize)]
struct ErnieTokenResponse {
    access_token: Option<String>,
}

/// envelope جواب ERNIE - متن در `result`
#[derive(Debug, Deserialize)]
struct ErnieResponse {
    result: Option<String>,
}

impl ErnieProvider {
    #[must_use]
    pub fn new(http: Client, config: &ProvidersConfig) -> Self {
        Self {
            http,
            api_key: config.ernie_api_key.clone(),
            secret_key: config.ernie_secret_key.clone(),
            base_url: config.ernie_base_url.clone(),
            model: config.ernie_model.clone(),
        }
    }

    /// تبادل client credentials با access token
    async fn fetch_access_token(&self) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let secret_key = self
            .secret_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey)?;

        let response = self
            .http
            .post(ERNIE_TOKEN_URL)
            .query(&[
                ("grant_type", "client_credentials"),
                ("client_id", api_key),
                ("client_secret", secret_key),
            ])
            .send()
            .await?;

        let token: ErnieTokenResponse = read_json(response).await?;

        token
            .access_token
            .ok_or_else(|| ProviderError::Auth("no access token in response".to_string()))
    }
}

#[async_trait]
impl GenerationProvider for ErnieProvider {
    fn name(&self) -> &'static str {
        "ernie"
    }

    async fn attempt(&self, prompt: &str) -> Result<CoupletResult, ProviderError> {
        let access_token = self.fetch_access_token().await?;

        let body = serde_json::json!({
            "messages": [{ "role": "user", "content": prompt }],
        });

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), self.model);

        let response = self
            .http
            .post(&url)
            .query(&[("access_token", access_token.as_str())])
            .json(&body)
            .send()
            .await?;

        let reply: ErnieResponse = read_json(response).await?;
        let content = reply
            .result
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ProviderError::InvalidResponse("no result in response".to_string()))?;

        parse_content(&content)
    }
}

// =====================================
// Tongyi (通义千问)
// =====================================
/// Tongyi - بدنه‌ی مخصوص dashscope با متن جواب در `output.text`
#[derive(Debug, Clone)]
pub struct TongyiProvider {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct TongyiRequest {
    model: &'static str,
    input: TongyiInput,
    parameters: TongyiParameters,
}

#[derive(Debug, Serialize)]
struct TongyiInput {
    prompt: String,
}

#[derive(Debug, Serialize)]
struct TongyiParameters {
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Deserialize)]
struct TongyiResponse {
    output: Option<TongyiOutput>,
}

#[derive(Debug, Deserialize)]
struct TongyiOutput {
    text: Option<String>,
}

impl TongyiProvider {
    #[must_use]
    pub fn new(http: Client, config: &ProvidersConfig) -> Self {
        Self {
            http,
            api_key: config.tongyi_api_key.clone(),
            base_url: config.tongyi_base_url.clone(),
        }
    }
}

#[async_trait]
impl GenerationProvider for TongyiProvider {
    fn name(&self) -> &'static str {
        "tongyi"
    }

    async fn attempt(&self, prompt: &str) -> Result<CoupletResult, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let request = TongyiRequest {
            model: "qwen-turbo",
            input: TongyiInput {
                prompt: prompt.to_string(),
            },
            parameters: TongyiParameters {
                temperature: 0.7,
                top_p: 0.95,
            },
        };

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let reply: TongyiResponse = read_json(response).await?;
        let content = reply
            .output
            .and_then(|o| o.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ProviderError::InvalidResponse("no output text in response".to_string())
            })?;

        parse_content(&content)
    }
}

// =====================================
// Doubao (豆包)
// =====================================
/// Doubao - envelope سبک OpenAI
#[derive(Debug, Clone)]
pub struct DoubaoProvider {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl DoubaoProvider {
    #[must_use]
    pub fn new(http: Client, config: &ProvidersConfig) -> Self {
        Self {
            http,
            api_key: config.doubao_api_key.clone(),
            base_url: config.doubao_base_url.clone(),
        }
    }
}

#[async_trait]
impl GenerationProvider for DoubaoProvider {
    fn name(&self) -> &'static str {
        "doubao"
    }

    async fn attempt(&self, prompt: &str) -> Result<CoupletResult, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let request = ChatRequest {
            model: "doubao-pro".to_string(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(0.7),
            max_tokens: Some(500),
            response_format: None,
        };

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let content = read_json::<ChatResponse>(response).await?.content()?;
        parse_content(&content)
    }
}

// =====================================
// Spark (讯飞星火)
// =====================================
/// Spark - Bearer به همراه header مخصوص `X-Appid`
#[derive(Debug, Clone)]
pub struct SparkProvider {
    http: Client,
    api_key: Option<String>,
    app_id: Option<String>,
    base_url: String,
}

impl SparkProvider {
    #[must_use]
    pub fn new(http: Client, config: &ProvidersConfig) -> Self {
        Self {
            http,
            api_key: config.spark_api_key.clone(),
            app_id: config.spark_app_id.clone(),
            base_url: config.spark_base_url.clone(),
        }
    }
}

#[async_trait]
impl GenerationProvider for SparkProvider {
    fn name(&self) -> &'static str {
        "spark"
    }

    async fn attempt(&self, prompt: &str) -> Result<CoupletResult, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let request = ChatRequest {
            model: "general".to_string(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(0.7),
            max_tokens: None,
            response_format: None,
        };

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(api_key)
            .header("X-Appid", self.app_id.as_deref().unwrap_or_default())
            .json(&request)
            .send()
            .await?;

        let content = read_json::<ChatResponse>(response).await?.content()?;
        parse_content(&content)
    }
}

// =====================================
// Kouzi (扣子)
// =====================================
/// Kouzi - فقط وقتی کلید تنظیم شده باشه به انتهای زنجیره میاد
#[derive(Debug, Clone)]
pub struct KouziProvider {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

/// envelope جواب Kouzi - متن در `data.content`
#[derive(Debug, Deserialize)]
struct KouziResponse {
    data: Option<KouziData>,
}

#[derive(Debug, Deserialize)]
struct KouziData {
    content: Option<String>,
}

impl KouziProvider {
    #[must_use]
    pub fn new(http: Client, config: &ProvidersConfig) -> Self {
        Self {
            http,
            api_key: config.kouzi_api_key.clone(),
            base_url: config.kouzi_base_url.clone(),
        }
    }
}

#[async_trait]
impl GenerationProvider for KouziProvider {
    fn name(&self) -> &'static str {
        "kouzi"
    }

    async fn attempt(&self, prompt: &str) -> Result<CoupletResult, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let request = ChatRequest {
            model: "moonshot-v1-8k".to_string(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(0.7),
            max_tokens: Some(500),
            response_format: None,
        };

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let reply: KouziResponse = read_json(response).await?;
        let content = reply
            .data
            .and_then(|d| d.content)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                ProviderError::InvalidResponse("no data content in response".to_string())
            })?;

        parse_content(&content)
    }
}

// =====================================
// Chain builder
// =====================================
/// ساخت زنجیره fallback با ترتیب ثابت
///
/// DeepSeek اول، بعد providerهای ثانویه؛ Kouzi فقط با کلید تنظیم‌شده
#[must_use]
pub fn build_chain(config: &ProvidersConfig) -> Vec<std::sync::Arc<dyn GenerationProvider>> {
    let http = Client::new();

    let mut chain: Vec<std::sync::Arc<dyn GenerationProvider>> = vec![
        std::sync::Arc::new(DeepSeekProvider::new(http.clone(), config)),
        std::sync::Arc::new(ErnieProvider::new(http.clone(), config)),
        std::sync::Arc::new(TongyiProvider::new(http.clone(), config)),
        std::sync::Arc::new(DoubaoProvider::new(http.clone(), config)),
        std::sync::Arc::new(SparkProvider::new(http.clone(), config)),
    ];

    if config.kouzi_api_key.is_some() {
        chain.push(std::sync::Arc::new(KouziProvider::new(http, config)));
    }

    chain
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_order_and_kouzi_gate() {
        let config = ProvidersConfig::default();
        let chain = build_chain(&config);

        let names: Vec<&str> = chain.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["deepseek", "ernie", "tongyi", "doubao", "spark"]);

        let config = ProvidersConfig {
            kouzi_api_key: Some("kz-test".to_string()),
            ..ProvidersConfig::default()
        };
        let chain = build_chain(&config);
        assert_eq!(chain.last().map(|p| p.name()), Some("kouzi"));
    }

    #[tokio::test]
    async fn test_missing_key_is_provider_failure() {
        let config = ProvidersConfig::default();
        let provider = DeepSeekProvider::new(Client::new(), &config);

        let result = provider.attempt("prompt").await;
        assert!(matches!(result, Err(ProviderError::MissingApiKey)));
    }

    #[test]
    fn test_chat_response_content() {
        let raw = r#"{"choices": [{"message": {"content": "hello"}}]}"#;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.content().unwrap(), "hello");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            empty.content(),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_chat_request_skips_optional_fields() {
        let request = ChatRequest {
            model: "general".to_string(),
            messages: vec![ChatMessage::user("hi")],
            temperature: Some(0.7),
            max_tokens: None,
            response_format: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("response_format").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
