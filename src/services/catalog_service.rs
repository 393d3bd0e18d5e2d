//! # سرویس کاتالوگ (Catalog Service)
//!
//! اندازه‌ها، سبک‌های چاپ، محصولات و تنظیمات پرداخت
//!
//! ## Seed کردن
//!
//! هر collection کاتالوگ در اولین دسترسی با داده پیش‌فرض پر میشه.
//! معیار "اولین دسترسی" وجود نداشتن key هست، نه خالی بودن لیست -
//! اگه ادمین همه چیز رو حذف کنه، لیست خالی میمونه و دوباره seed نمیشه.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    database::{KvStore, PaymentConfigRepository, ProductRepository, StyleImageRepository},
    error::{OptionExt, Result},
    models::{
        default_payment_configs, default_products, default_size_options, default_style_images,
        CreateProductRequest, CreateStyleRequest, PaymentMethodConfig, Product, ProductStatus,
        SizeOption, StyleExport, StyleImage, StyleOption, UpdatePaymentConfigRequest,
        UpdateProductRequest, UpdateStyleRequest,
    },
    utils,
};

use super::Service;

// =====================================
// Catalog Service
// =====================================
/// سرویس کاتالوگ
#[derive(Debug, Clone)]
pub struct CatalogService {
    styles: StyleImageRepository,
    products: ProductRepository,
    payments: PaymentConfigRepository,
}

impl Service for CatalogService {}

impl CatalogService {
    /// ساخت سرویس جدید
    #[must_use]
    pub fn new(store: KvStore) -> Self {
        Self {
            styles: StyleImageRepository::style_images(store.clone()),
            products: ProductRepository::products(store.clone()),
            payments: PaymentConfigRepository::payment_configs(store),
        }
    }

    // ----------------------------------------
    // Sizes (static)
    // ----------------------------------------

    /// اندازه‌های چاپ - جدول ثابت
    #[must_use]
    pub fn size_options(&self) -> Vec<SizeOption> {
        default_size_options()
    }

    /// پیدا کردن اندازه با شناسه
    pub fn find_size(&self, size_id: &str) -> Result<SizeOption> {
        default_size_options()
            .into_iter()
            .find(|s| s.id == size_id)
            .ok_or_not_found(format!("Size '{}' not found", size_id))
    }

    // ----------------------------------------
    // Style Images
    // ----------------------------------------

    /// همه سبک‌ها - با seed در اولین دسترسی
    pub async fn styles(&self) -> Result<Vec<StyleImage>> {
        if !self.styles.is_seeded().await? {
            let defaults = default_style_images();
            self.styles.save_all(&defaults).await?;
            info!(count = defaults.len(), "Seeded default style images");
            return Ok(defaults);
        }

        self.styles.load_all().await
    }

    /// سبک‌های فعال برای فروشگاه
    pub async fn active_styles(&self) -> Result<Vec<StyleOption>> {
        let styles = self.styles().await?;
        Ok(styles
            .iter()
            .filter(|s| s.is_active)
            .map(StyleImage::to_option)
            .collect())
    }

    /// پیدا کردن سبک فعال با شناسه - برای افزودن به سبد
    pub async fn find_active_style(&self, style_id: &str) -> Result<StyleOption> {
        self.active_styles()
            .await?
            .into_iter()
            .find(|s| s.id == style_id)
            .ok_or_not_found(format!("Style '{}' not found", style_id))
    }

    /// ساخت سبک جدید
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_style(&self, request: CreateStyleRequest) -> Result<StyleImage> {
        request.validate()?;

        let now = Utc::now();
        let style = StyleImage {
            id: format!("style_{}_{}", now.timestamp_millis(), utils::random_suffix(6)),
            name: request.name,
            price: request.price,
            preview_url: request.preview_url,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let mut styles = self.styles().await?;
        styles.push(style.clone());
        self.styles.save_all(&styles).await?;

        info!(style_id = %style.id, "Style created");
        Ok(style)
    }

    /// بروزرسانی سبک
    #[instrument(skip(self, request))]
    pub async fn update_style(
        &self,
        style_id: &str,
        request: UpdateStyleRequest,
    ) -> Result<StyleImage> {
        request.validate()?;

        let mut styles = self.styles().await?;
        let style = styles
            .iter_mut()
            .find(|s| s.id == style_id)
            .ok_or_not_found(format!("Style '{}' not found", style_id))?;

        if let Some(name) = request.name {
            style.name = name;
        }
        if let Some(price) = request.price {
            style.price = price;
        }
        if let Some(preview_url) = request.preview_url {
            style.preview_url = preview_url;
        }
        style.updated_at = Utc::now();

        let updated = style.clone();
        self.styles.save_all(&styles).await?;

        Ok(updated)
    }

    /// فعال/غیرفعال کردن سبک
    #[instrument(skip(self))]
    pub async fn toggle_style(&self, style_id: &str) -> Result<StyleImage> {
        let mut styles = self.styles().await?;
        let style = styles
            .iter_mut()
            .find(|s| s.id == style_id)
            .ok_or_not_found(format!("Style '{}' not found", style_id))?;

        style.is_active = !style.is_active;
        style.updated_at = Utc::now();

        let updated = style.clone();
        self.styles.save_all(&styles).await?;

        info!(style_id = %style_id, is_active = updated.is_active, "Style toggled");
        Ok(updated)
    }

    /// حذف سبک
    #[instrument(skip(self))]
    pub async fn delete_style(&self, style_id: &str) -> Result<()> {
        let mut styles = self.styles().await?;
        let position = styles
            .iter()
            .position(|s| s.id == style_id)
            .ok_or_not_found(format!("Style '{}' not found", style_id))?;

        styles.remove(position);
        self.styles.save_all(&styles).await?;

        info!(style_id = %style_id, "Style deleted");
        Ok(())
    }

    /// خروجی JSON سبک‌ها برای دانلود
    ///
    /// نام فایل تاریخ روز رو داره: `couplet_styles_<YYYY-MM-DD>.json`
    pub async fn export_styles(&self) -> Result<StyleExport> {
        let styles = self.styles().await?;

        Ok(StyleExport {
            filename: format!("couplet_styles_{}.json", Utc::now().format("%Y-%m-%d")),
            content: serde_json::to_string_pretty(&styles)?,
        })
    }

    // ----------------------------------------
    // Products
    // ----------------------------------------

    /// همه محصولات - با seed در اولین دسترسی
    pub async fn products(&self) -> Result<Vec<Product>> {
        if !self.products.is_seeded().await? {
            let defaults = default_products();
            self.products.save_all(&defaults).await?;
            info!(count = defaults.len(), "Seeded default products");
            return Ok(defaults);
        }

        self.products.load_all().await
    }

    /// محصولات فعال برای فروشگاه
    pub async fn active_products(&self) -> Result<Vec<Product>> {
        let products = self.products().await?;
        Ok(products.into_iter().filter(Product::is_active).collect())
    }

    /// ساخت محصول جدید
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_product(&self, request: CreateProductRequest) -> Result<Product> {
        request.validate()?;

        let now = Utc::now();
        let product = Product {
            id: format!("product_{}_{}", now.timestamp_millis(), utils::random_suffix(6)),
            name: request.name,
            price: request.price,
            description: request.description,
            status: ProductStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let mut products = self.products().await?;
        products.push(product.clone());
        self.products.save_all(&products).await?;

        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// بروزرسانی محصول
    #[instrument(skip(self, request))]
    pub async fn update_product(
        &self,
        product_id: &str,
        request: UpdateProductRequest,
    ) -> Result<Product> {
        request.validate()?;

        let mut products = self.products().await?;
        let product = products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_not_found(format!("Product '{}' not found", product_id))?;

        if let Some(name) = request.name {
            product.name = name;
        }
        if let Some(price) = request.price {
            product.price = price;
        }
        if let Some(description) = request.description {
            product.description = description;
        }
        product.updated_at = Utc::now();

        let updated = product.clone();
        self.products.save_all(&products).await?;

        Ok(updated)
    }

    /// فعال/غیرفعال کردن محصول
    #[instrument(skip(self))]
    pub async fn toggle_product(&self, product_id: &str) -> Result<Product> {
        let mut products = self.products().await?;
        let product = products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_not_found(format!("Product '{}' not found", product_id))?;

        product.status = match product.status {
            ProductStatus::Active => ProductStatus::Inactive,
            ProductStatus::Inactive => ProductStatus::Active,
        };
        product.updated_at = Utc::now();

        let updated = product.clone();
        self.products.save_all(&products).await?;

        Ok(updated)
    }

    /// حذف محصول
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: &str) -> Result<()> {
        let mut products = self.products().await?;
        let position = products
            .iter()
            .position(|p| p.id == product_id)
            .ok_or_not_found(format!("Product '{}' not found", product_id))?;

        products.remove(position);
        self.products.save_all(&products).await?;

        info!(product_id = %product_id, "Product deleted");
        Ok(())
    }

    // ----------------------------------------
    // Payment Configs
    // ----------------------------------------

    /// تنظیمات پرداخت - با seed در اولین دسترسی
    pub async fn payment_configs(&self) -> Result<Vec<PaymentMethodConfig>> {
        if !self.payments.is_seeded().await? {
            let defaults = default_payment_configs();
            self.payments.save_all(&defaults).await?;
            info!(count = defaults.len(), "Seeded default payment configs");
            return Ok(defaults);
        }

        self.payments.load_all().await
    }

    /// بروزرسانی تنظیمات یک روش پرداخت
    #[instrument(skip(self, request))]
    pub async fn update_payment_config(
        &self,
        config_id: &str,
        request: UpdatePaymentConfigRequest,
    ) -> Result<PaymentMethodConfig> {
        request.validate()?;

        let mut configs = self.payment_configs().await?;
        let config = configs
            .iter_mut()
            .find(|c| c.id == config_id)
            .ok_or_not_found(format!("Payment config '{}' not found", config_id))?;

        if let Some(name) = request.name {
            config.name = name;
        }
        if let Some(description) = request.description {
            config.description = description;
        }
        if let Some(provider) = request.provider {
            config.provider = provider;
        }

        let updated = config.clone();
        self.payments.save_all(&configs).await?;

        info!(config_id = %config_id, "Payment config updated");
        Ok(updated)
    }

    /// فعال/غیرفعال کردن یک روش پرداخت
    #[instrument(skip(self))]
    pub async fn toggle_payment_config(&self, config_id: &str) -> Result<PaymentMethodConfig> {
        let mut configs = self.payment_configs().await?;
        let config = configs
            .iter_mut()
            .find(|c| c.id == config_id)
            .ok_or_not_found(format!("Payment config '{}' not found", config_id))?;

        config.enabled = !config.enabled;

        let updated = config.clone();
        self.payments.save_all(&configs).await?;

        info!(config_id = %config_id, enabled = updated.enabled, "Payment config toggled");
        Ok(updated)
    }
}
