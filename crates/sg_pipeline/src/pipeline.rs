use chrono::Utc;
use sg_core::{
    ArticleMetadata, ArticleRequest, ContentGenerator, Error, GeneratedArticle, ImageGenerator,
    PageFetcher, ProductRecord, Result,
};
use sg_scrapers::ProductExtractor;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{html, images, prompt, AffiliateLinker, SeoOptimizer, SpellNormalizer};

pub const WORDS_PER_MINUTE: usize = 200;

/// Runs one article request from product lookup to the final SEO pass.
pub struct ArticlePipeline {
    fetcher: Arc<dyn PageFetcher>,
    generator: Arc<dyn ContentGenerator>,
    images: Arc<dyn ImageGenerator>,
    extractor: ProductExtractor,
    spelling: SpellNormalizer,
    linker: AffiliateLinker,
    seo: SeoOptimizer,
}

impl ArticlePipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        generator: Arc<dyn ContentGenerator>,
        images: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            fetcher,
            generator,
            images,
            extractor: ProductExtractor::new(),
            spelling: SpellNormalizer::new(),
            linker: AffiliateLinker::new(),
            seo: SeoOptimizer::new(),
        }
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    async fn fetch_product(&self, url: &str) -> Result<ProductRecord> {
        let markup = self.fetcher.fetch(url).await?;
        self.extractor.extract(url, &markup)
    }

    /// Product data for the prompt. Any fetch or parse failure just means
    /// the article is written without it.
    pub async fn product_info(&self, url: &str) -> Option<ProductRecord> {
        info!("🔎 Fetching product information from {}", url);
        match self.fetch_product(url).await {
            Ok(product) => {
                info!("✨ Product found: {}", product.title);
                Some(product)
            }
            Err(e) => {
                warn!("⚠️ Failed to extract product from {}: {}", url, e);
                None
            }
        }
    }

    pub async fn generate(&self, request: &ArticleRequest) -> Result<GeneratedArticle> {
        if request.topic.trim().is_empty() {
            return Err(Error::InvalidRequest("topic is required".to_string()));
        }
        info!("📰 Generating {} article about: {}", request.article_type, request.topic);

        let product = match request.product_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => self.product_info(url).await,
            _ => None,
        };

        let system_prompt = prompt::system_prompt(&request.target_country);
        let user_prompt = prompt::user_prompt(request, product.as_ref())?;

        info!("🤖 Drafting article with {}", self.generator.name());
        let draft = self
            .generator
            .generate(&system_prompt, &user_prompt)
            .await
            .map_err(|e| match e {
                Error::Generation(_) => e,
                other => Error::Generation(other.to_string()),
            })?;

        let mut article = self.spelling.normalize(&draft);

        article = if request.include_images {
            images::illustrate(&article, self.images.as_ref()).await
        } else {
            images::strip_placeholders(&article)
        };

        article = self.linker.insert_links(&article, &request.affiliate_links);

        let word_count = html::word_count(&article);
        let keywords = request.keywords.clone().unwrap_or_default();
        let report = self.seo.optimize(&article, &keywords, &request.target_country);
        info!("✅ Article ready: {} words, SEO score {}", word_count, report.score);

        Ok(GeneratedArticle {
            article: report.content,
            metadata: ArticleMetadata {
                word_count,
                reading_time: reading_time(word_count),
                seo_score: report.score,
                keywords,
                target_country: request.target_country.code().to_string(),
                generated_at: Utc::now(),
            },
        })
    }
}

/// Minutes needed to read `words`, rounded up.
pub fn reading_time(words: usize) -> usize {
    (words + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(reading_time(0), 0);
        assert_eq!(reading_time(1), 1);
        assert_eq!(reading_time(200), 1);
        assert_eq!(reading_time(201), 2);
    }
}
