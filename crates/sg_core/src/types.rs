use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Structured data scraped from a product page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub description: String,
    pub price: String,
    pub features: Vec<String>,
    pub specs: BTreeMap<String, String>,
    pub images: Vec<String>,
    pub rating: Option<String>,
}

/// Affiliate platforms known to the linker. Unknown identifiers are kept
/// verbatim so a caller can still get a "where to buy" card for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Amazon,
    MercadoLivre,
    Shopee,
    Magalu,
    ClickBank,
    Hotmart,
    Eduzz,
    Kiwify,
    Braip,
    Other(String),
}

impl Platform {
    pub const KNOWN: [Platform; 9] = [
        Platform::Amazon,
        Platform::MercadoLivre,
        Platform::Shopee,
        Platform::Magalu,
        Platform::ClickBank,
        Platform::Hotmart,
        Platform::Eduzz,
        Platform::Kiwify,
        Platform::Braip,
    ];

    pub fn id(&self) -> &str {
        match self {
            Platform::Amazon => "amazon",
            Platform::MercadoLivre => "mercadolivre",
            Platform::Shopee => "shopee",
            Platform::Magalu => "magalu",
            Platform::ClickBank => "clickbank",
            Platform::Hotmart => "hotmart",
            Platform::Eduzz => "eduzz",
            Platform::Kiwify => "kiwify",
            Platform::Braip => "braip",
            Platform::Other(id) => id,
        }
    }

    /// Name shown on the "where to buy" cards. Identifiers are title-cased,
    /// except for the two platforms whose brand is not a single word.
    pub fn display_name(&self) -> String {
        match self {
            Platform::MercadoLivre => "Mercado Livre".to_string(),
            Platform::Magalu => "Magazine Luiza".to_string(),
            other => title_case(other.id()),
        }
    }

    /// Marketplaces sell physical goods, everything else is a digital product platform.
    pub fn is_marketplace(&self) -> bool {
        matches!(
            self,
            Platform::Amazon | Platform::MercadoLivre | Platform::Shopee | Platform::Magalu
        )
    }

    pub fn icon(&self) -> &'static str {
        if self.is_marketplace() {
            "🛒"
        } else {
            "🔗"
        }
    }
}

fn title_case(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<&str> for Platform {
    fn from(id: &str) -> Self {
        let normalized = id.trim().to_lowercase();
        Platform::KNOWN
            .iter()
            .find(|p| p.id() == normalized)
            .cloned()
            .unwrap_or_else(|| Platform::Other(id.trim().to_string()))
    }
}

impl From<String> for Platform {
    fn from(id: String) -> Self {
        Platform::from(id.as_str())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.id().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Platform to affiliate URL mapping. Keeps the order the caller supplied,
/// which is the order the linker processes platforms in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffiliateLinkMap {
    entries: Vec<(Platform, String)>,
}

impl AffiliateLinkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link for a platform, replacing an earlier value in place.
    pub fn insert(&mut self, platform: Platform, url: impl Into<String>) {
        let url = url.into();
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| *p == platform) {
            entry.1 = url;
        } else {
            self.entries.push((platform, url));
        }
    }

    pub fn get(&self, platform: &Platform) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == platform)
            .map(|(_, url)| url.as_str())
    }

    /// Platforms with a non-blank link, in insertion order.
    pub fn configured(&self) -> impl Iterator<Item = (&Platform, &str)> {
        self.entries
            .iter()
            .map(|(p, url)| (p, url.trim()))
            .filter(|(_, url)| !url.is_empty())
    }

    pub fn has_configured(&self) -> bool {
        self.configured().next().is_some()
    }
}

impl<P: Into<Platform>, U: Into<String>> FromIterator<(P, U)> for AffiliateLinkMap {
    fn from_iter<I: IntoIterator<Item = (P, U)>>(iter: I) -> Self {
        let mut map = AffiliateLinkMap::new();
        for (platform, url) in iter {
            map.insert(platform.into(), url);
        }
        map
    }
}

impl Serialize for AffiliateLinkMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (platform, url) in &self.entries {
            map.serialize_entry(platform.id(), url)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AffiliateLinkMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LinkMapVisitor;

        impl<'de> Visitor<'de> for LinkMapVisitor {
            type Value = AffiliateLinkMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of platform identifiers to affiliate URLs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut links = AffiliateLinkMap::new();
                while let Some((platform, url)) = access.next_entry::<String, Option<String>>()? {
                    links.insert(Platform::from(platform), url.unwrap_or_default());
                }
                Ok(links)
            }
        }

        deserializer.deserialize_map(LinkMapVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Country {
    BR,
    US,
    GB,
    ES,
    PT,
    Other(String),
}

impl Country {
    pub fn code(&self) -> &str {
        match self {
            Country::BR => "BR",
            Country::US => "US",
            Country::GB => "GB",
            Country::ES => "ES",
            Country::PT => "PT",
            Country::Other(code) => code,
        }
    }

    /// Open Graph locale. Unknown countries fall back to `en_US`.
    pub fn locale(&self) -> &'static str {
        match self {
            Country::BR => "pt_BR",
            Country::US => "en_US",
            Country::GB => "en_GB",
            Country::ES => "es_ES",
            Country::PT => "pt_PT",
            Country::Other(_) => "en_US",
        }
    }
}

impl Default for Country {
    fn default() -> Self {
        Country::BR
    }
}

impl From<&str> for Country {
    fn from(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "BR" => Country::BR,
            "US" => Country::US,
            "GB" => Country::GB,
            "ES" => Country::ES,
            "PT" => Country::PT,
            _ => Country::Other(code.trim().to_string()),
        }
    }
}

impl From<String> for Country {
    fn from(code: String) -> Self {
        Country::from(code.as_str())
    }
}

impl From<Country> for String {
    fn from(country: Country) -> Self {
        country.code().to_string()
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleType {
    #[default]
    Review,
    Comparison,
    Guide,
    List,
}

impl ArticleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleType::Review => "review",
            ArticleType::Comparison => "comparison",
            ArticleType::Guide => "guide",
            ArticleType::List => "list",
        }
    }
}

impl fmt::Display for ArticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "review" => Ok(ArticleType::Review),
            "comparison" => Ok(ArticleType::Comparison),
            "guide" => Ok(ArticleType::Guide),
            "list" => Ok(ArticleType::List),
            other => Err(Error::InvalidRequest(format!("unknown article type: {}", other))),
        }
    }
}

fn default_include_images() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRequest {
    pub topic: String,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub article_type: ArticleType,
    #[serde(default)]
    pub target_country: Country,
    #[serde(default = "default_include_images")]
    pub include_images: bool,
    #[serde(default)]
    pub affiliate_links: AffiliateLinkMap,
    #[serde(default)]
    pub custom_reviews: Vec<String>,
}

impl ArticleRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            keywords: None,
            product_url: None,
            article_type: ArticleType::default(),
            target_country: Country::default(),
            include_images: true,
            affiliate_links: AffiliateLinkMap::new(),
            custom_reviews: Vec::new(),
        }
    }
}

/// Output of the SEO stage: the rewritten document and its heuristic score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoReport {
    pub content: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    pub word_count: usize,
    pub reading_time: usize,
    pub seo_score: u8,
    pub keywords: String,
    pub target_country: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedArticle {
    pub article: String,
    pub metadata: ArticleMetadata,
}
