use scraper::Html;
use sg_core::{Error, ProductRecord, Result};
use tracing::debug;

pub mod amazon;
pub mod generic;
pub mod jsonld;
pub mod mercadolivre;
pub mod shopee;

/// Selector table for one product site. Each field lists selectors tried in
/// order; the first one yielding non-empty text wins.
#[derive(Debug)]
pub struct ProfileRules {
    pub title: &'static [&'static str],
    pub price: &'static [&'static str],
    pub description: &'static [&'static str],
    pub features: Option<&'static str>,
    pub specs: Option<SpecTable>,
    pub rating: &'static [&'static str],
}

/// Key/value rows of a product detail table.
#[derive(Debug)]
pub struct SpecTable {
    pub rows: &'static str,
    pub key: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteProfile {
    Amazon,
    MercadoLivre,
    Shopee,
    Generic,
}

impl SiteProfile {
    pub fn for_url(url: &str) -> Self {
        let url = url.to_lowercase();
        if amazon::can_handle(&url) {
            SiteProfile::Amazon
        } else if mercadolivre::can_handle(&url) {
            SiteProfile::MercadoLivre
        } else if shopee::can_handle(&url) {
            SiteProfile::Shopee
        } else {
            SiteProfile::Generic
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SiteProfile::Amazon => "amazon",
            SiteProfile::MercadoLivre => "mercadolivre",
            SiteProfile::Shopee => "shopee",
            SiteProfile::Generic => "generic",
        }
    }

    pub fn rules(&self) -> &'static ProfileRules {
        match self {
            SiteProfile::Amazon => &amazon::RULES,
            SiteProfile::MercadoLivre => &mercadolivre::RULES,
            SiteProfile::Shopee => &shopee::RULES,
            SiteProfile::Generic => &generic::RULES,
        }
    }
}

const MAX_IMAGES: usize = 5;

/// Turns a product page into a [`ProductRecord`]. Missing fields come back
/// empty; only unreadable markup is an error.
#[derive(Debug, Clone, Default)]
pub struct ProductExtractor;

impl ProductExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, url: &str, markup: &str) -> Result<ProductRecord> {
        if markup.trim().is_empty() {
            return Err(Error::Extraction("Empty product page".to_string()));
        }
        if markup.contains('\0') {
            return Err(Error::Extraction("Product page is not text markup".to_string()));
        }

        let document = Html::parse_document(markup);
        let profile = SiteProfile::for_url(url);
        let rules = profile.rules();
        debug!("Extracting product from {} using the {} profile", url, profile.name());

        let mut product = ProductRecord {
            title: utils::first_text(&document, rules.title)?,
            description: utils::first_text(&document, rules.description)?,
            price: utils::first_text(&document, rules.price)?,
            ..Default::default()
        };

        if let Some(selector) = rules.features {
            product.features = utils::extract_texts(&document, selector)?;
        }
        if let Some(table) = &rules.specs {
            product.specs = utils::extract_specs(&document, table)?;
        }

        let rating = utils::first_text(&document, rules.rating)?;
        if !rating.is_empty() {
            product.rating = Some(rating);
        }

        if let Some(data) = jsonld::find_product(&document) {
            if profile == SiteProfile::Generic {
                jsonld::fill_missing(&mut product, &data);
            }
            if product.rating.is_none() {
                product.rating = jsonld::rating(&data);
            }
        }

        product.images = utils::image_sources(&document, MAX_IMAGES)?;

        Ok(product)
    }
}

/// Common utilities for profiles
pub(crate) mod utils {
    use super::*;
    use scraper::{ElementRef, Selector};
    use std::collections::BTreeMap;
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    pub fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector)
            .map_err(|e| Error::Extraction(format!("Invalid selector {}: {}", selector, e)))
    }

    /// Element text with runs of whitespace collapsed.
    pub fn element_text(element: ElementRef) -> String {
        element
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Text of the first element matched by the first selector that yields
    /// something. Falls back to the `content` attribute for `<meta>`-style nodes.
    pub fn first_text(document: &Html, selectors: &[&str]) -> Result<String> {
        for selector in selectors {
            let selector = parse_selector(selector)?;
            if let Some(element) = document.select(&selector).next() {
                let text = element_text(element);
                if !text.is_empty() {
                    return Ok(text);
                }
                if let Some(content) = element.value().attr("content") {
                    let content = content.trim();
                    if !content.is_empty() {
                        return Ok(content.to_string());
                    }
                }
            }
        }
        Ok(String::new())
    }

    pub fn extract_texts(document: &Html, selector: &str) -> Result<Vec<String>> {
        let selector = parse_selector(selector)?;
        Ok(document
            .select(&selector)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect())
    }

    pub fn extract_specs(document: &Html, table: &SpecTable) -> Result<BTreeMap<String, String>> {
        let rows = parse_selector(table.rows)?;
        let key = parse_selector(table.key)?;
        let value = parse_selector(table.value)?;

        let mut specs = BTreeMap::new();
        for row in document.select(&rows) {
            let k = row.select(&key).next().map(element_text).unwrap_or_default();
            let v = row.select(&value).next().map(element_text).unwrap_or_default();
            if !k.is_empty() && !v.is_empty() {
                specs.insert(k, v);
            }
        }
        Ok(specs)
    }

    pub fn is_absolute_url(src: &str) -> bool {
        Url::parse(src)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }

    pub fn image_sources(document: &Html, limit: usize) -> Result<Vec<String>> {
        let selector = parse_selector("img[src]")?;
        Ok(document
            .select(&selector)
            .filter_map(|img| img.value().attr("src"))
            .map(str::trim)
            .filter(|src| is_absolute_url(src))
            .take(limit)
            .map(str::to_string)
            .collect())
    }
}
