//! # سرویس تولید دوبیتی (Generation Service)
//!
//! هماهنگ‌کننده‌ی زنجیره fallback: providerها به ترتیب ثابت امتحان
//! میشن و اگه همه fail بشن، قالب محلی جواب میده.
//!
//! ## قرارداد "همیشه موفق"
//!
//! `generate` هیچوقت خطا برنمیگردونه و panic نمیکنه. همه‌ی
//! حالت‌های شکست (خطای شبکه، auth، جواب خراب) به قالب محلی ختم
//! میشن. ثبت تاریخچه هم side effect هست - شکستش فقط لاگ میشه.
//!
//! ## مفاهیم Rust:
//! - **Trait Objects**: `Arc<dyn GenerationProvider>` برای زنجیره
//! - **Injected RNG**: انتخاب قالب زیر تست قطعی میمونه
//! - **tokio::sync::Mutex**: قفل async بدون مشکل poisoning

mod prompt;
mod parse;
mod templates;
mod providers;

pub use parse::{clean_content, parse_couplet};
pub use providers::*;
pub use templates::TemplateLibrary;

use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::config::ProvidersConfig;
use crate::database::HistoryRepository;
use crate::error::Result;
use crate::models::{
    CoupletResult, GenerateCoupletRequest, GeneratedCouplet, GenerationSource, HistoryEntry,
};

// =====================================
// Couplet Generator
// =====================================
/// سرویس تولید دوبیتی
///
/// # مسئولیت‌ها:
/// - ساخت prompt و پیمایش زنجیره providerها
/// - fallback به قالب محلی
/// - ثبت هر تولید موفق در تاریخچه محدود
pub struct CoupletGenerator {
    providers: Vec<Arc<dyn GenerationProvider>>,
    templates: TemplateLibrary,
    history: HistoryRepository,
    rng: Mutex<StdRng>,
}

impl CoupletGenerator {
    /// ساخت سرویس با زنجیره استاندارد
    #[must_use]
    pub fn new(config: &ProvidersConfig, history: HistoryRepository) -> Self {
        Self::with_parts(build_chain(config), history, StdRng::from_entropy())
    }

    /// ساخت سرویس با اجزای تزریق‌شده - برای تست
    #[must_use]
    pub fn with_parts(
        providers: Vec<Arc<dyn GenerationProvider>>,
        history: HistoryRepository,
        rng: StdRng,
    ) -> Self {
        Self {
            providers,
            templates: TemplateLibrary,
            history,
            rng: Mutex::new(rng),
        }
    }

    /// تولید دوبیتی - هیچوقت fail نمیشه
    ///
    /// providerها به ترتیب و بدون retry امتحان میشن؛ ته زنجیره
    /// همیشه قالب محلیه.
    #[instrument(skip(self, request), fields(occasion = %request.occasion))]
    pub async fn generate(&self, request: &GenerateCoupletRequest) -> GeneratedCouplet {
        let prompt = prompt::build_prompt(
            &request.name1,
            request.name2.as_deref(),
            &request.occasion,
            request.length,
            request.other_requirements.as_deref(),
        );

        for provider in &self.providers {
            match provider.attempt(&prompt).await {
                Ok(couplet) => {
                    info!(provider = provider.name(), "Couplet generated by provider");
                    self.record(&couplet).await;

                    return GeneratedCouplet {
                        couplet,
                        source: GenerationSource::Provider(provider.name().to_string()),
                    };
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "Provider failed, trying next");
                }
            }
        }

        // ته زنجیره: قالب محلی
        let couplet = {
            let mut rng = self.rng.lock().await;
            self.templates.render(
                &request.occasion,
                &request.name1,
                request.name2.as_deref(),
                request.other_requirements.as_deref(),
                &mut *rng,
            )
        };

        info!("All providers failed, used local template");
        self.record(&couplet).await;

        GeneratedCouplet {
            couplet,
            source: GenerationSource::Template,
        }
    }

    /// تاریخچه تولید - جدیدترین اول
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        self.history.load_all().await
    }

    /// ثبت در تاریخچه - شکست storage تولید رو خراب نمیکنه
    async fn record(&self, couplet: &CoupletResult) {
        if let Err(e) = self.history.record(HistoryEntry::new(couplet.clone())).await {
            error!(error = %e, "Failed to save generation history");
        }
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Database, KvStore, HISTORY_CAPACITY};

    fn sample_request() -> GenerateCoupletRequest {
        GenerateCoupletRequest {
            name1: "张".to_string(),
            name2: Some("王".to_string()),
            occasion: "春节".to_string(),
            length: 7,
            other_requirements: None,
        }
    }

    fn sample_couplet() -> CoupletResult {
        CoupletResult {
            top: "张灯结彩迎新岁".to_string(),
            bottom: "王语欢歌贺吉年".to_string(),
            center: "新春快乐".to_string(),
            explanation: "节日祝福".to_string(),
        }
    }

    async fn memory_history() -> HistoryRepository {
        let db = Database::in_memory().await.unwrap();
        HistoryRepository::history(KvStore::new(db))
    }

    fn failing_provider(name: &'static str) -> Arc<dyn GenerationProvider> {
        let mut mock = MockGenerationProvider::new();
        mock.expect_name().return_const(name);
        mock.expect_attempt()
            .returning(|_| Err(ProviderError::Http("connection refused".to_string())));
        Arc::new(mock)
    }

    #[tokio::test]
    async fn test_first_successful_provider_wins() {
        let mut first = MockGenerationProvider::new();
        first.expect_name().return_const("first");
        first
            .expect_attempt()
            .times(1)
            .returning(|_| Ok(sample_couplet()));

        let mut second = MockGenerationProvider::new();
        second.expect_name().return_const("second");
        second.expect_attempt().times(0);

        let generator = CoupletGenerator::with_parts(
            vec![Arc::new(first), Arc::new(second)],
            memory_history().await,
            StdRng::seed_from_u64(0),
        );

        let generated = generator.generate(&sample_request()).await;

        assert_eq!(
            generated.source,
            GenerationSource::Provider("first".to_string())
        );
        assert_eq!(generated.couplet, sample_couplet());

        // تاریخچه ثبت شده
        let history = generator.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].couplet, sample_couplet());
    }

    #[tokio::test]
    async fn test_fallback_skips_failed_providers() {
        let mut ok = MockGenerationProvider::new();
        ok.expect_name().return_const("third");
        ok.expect_attempt()
            .times(1)
            .returning(|_| Ok(sample_couplet()));

        let generator = CoupletGenerator::with_parts(
            vec![
                failing_provider("first"),
                failing_provider("second"),
                Arc::new(ok),
            ],
            memory_history().await,
            StdRng::seed_from_u64(0),
        );

        let generated = generator.generate(&sample_request()).await;
        assert_eq!(
            generated.source,
            GenerationSource::Provider("third".to_string())
        );
    }

    #[tokio::test]
    async fn test_all_providers_fail_uses_template() {
        // سه نوع شکست: شبکه، auth، جواب خراب
        let mut network = MockGenerationProvider::new();
        network.expect_name().return_const("network");
        network
            .expect_attempt()
            .returning(|_| Err(ProviderError::Http("connection refused".to_string())));

        let mut auth = MockGenerationProvider::new();
        auth.expect_name().return_const("auth");
        auth.expect_attempt().returning(|_| {
            Err(ProviderError::Api {
                status: 401,
                message: "invalid key".to_string(),
            })
        });

        let mut garbled = MockGenerationProvider::new();
        garbled.expect_name().return_const("garbled");
        garbled
            .expect_attempt()
            .returning(|_| Err(ProviderError::Unparseable));

        let generator = CoupletGenerator::with_parts(
            vec![Arc::new(network), Arc::new(auth), Arc::new(garbled)],
            memory_history().await,
            StdRng::seed_from_u64(7),
        );

        let generated = generator.generate(&sample_request()).await;

        assert_eq!(generated.source, GenerationSource::Template);
        assert!(generated.couplet.is_complete());
        assert!(generated.couplet.top.starts_with('张'));
        assert!(generated.couplet.bottom.starts_with('王'));

        // مسیر قالب هم تاریخچه ثبت میکنه
        assert_eq!(generator.history().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_history_stays_bounded() {
        let generator = CoupletGenerator::with_parts(
            vec![failing_provider("only")],
            memory_history().await,
            StdRng::seed_from_u64(3),
        );

        for _ in 0..(HISTORY_CAPACITY + 5) {
            generator.generate(&sample_request()).await;
        }

        let history = generator.history().await.unwrap();
        assert_eq!(history.len(), HISTORY_CAPACITY);
    }

    #[tokio::test]
    async fn test_empty_chain_goes_straight_to_template() {
        let generator = CoupletGenerator::with_parts(
            Vec::new(),
            memory_history().await,
            StdRng::seed_from_u64(0),
        );

        let generated = generator.generate(&sample_request()).await;
        assert_eq!(generated.source, GenerationSource::Template);
    }
}
