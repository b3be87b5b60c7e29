use lazy_static::lazy_static;
use regex::Regex;
use sg_core::{AffiliateLinkMap, Platform};
use std::collections::HashMap;
use tracing::debug;

use crate::html::{self, escape_attr};

pub const BUY_SECTION_MARKER: &str = "cta-section";
pub const DISCLAIMER_MARKER: &str = "affiliate-disclaimer";

const REL: &str = "nofollow noopener sponsored";

/// Mentions that get linked to a platform. Longer phrases come first so they
/// are wrapped whole before the bare brand name is tried.
static PLATFORM_KEYWORDS: &[(&str, &[&str])] = &[
    ("amazon", &["comprar na Amazon", "buy on Amazon", "available on Amazon", "Amazon"]),
    ("mercadolivre", &["comprar no Mercado Livre", "Mercado Livre", "ML"]),
    ("shopee", &["comprar na Shopee", "Shopee"]),
    ("magalu", &["comprar no Magalu", "Magazine Luiza", "Magalu"]),
    ("clickbank", &["ClickBank", "curso", "treinamento", "training"]),
    ("hotmart", &["produto digital", "digital product", "Hotmart"]),
    ("eduzz", &["infoproduto", "Eduzz"]),
    ("kiwify", &["Kiwify"]),
    ("braip", &["Braip"]),
];

pub static CTA_PHRASES: &[&str] = &[
    "Clique aqui para comprar",
    "Compre agora",
    "Ver produto",
    "Confira o preço",
    "Veja mais detalhes",
    "Click here to buy",
    "Buy now",
    "Check price",
    "View product",
];

lazy_static! {
    static ref PATTERNS: HashMap<&'static str, Regex> = PLATFORM_KEYWORDS
        .iter()
        .flat_map(|(_, keywords)| keywords.iter())
        .chain(CTA_PHRASES.iter())
        .map(|phrase| (*phrase, word_pattern(phrase)))
        .collect();
    static ref H2: Regex = Regex::new(r"(?is)<h2[^>]*>.*?</h2>").unwrap();
}

/// Acronyms such as `ML` match only in capitals, so "100 ml" stays plain text.
fn word_pattern(phrase: &str) -> Regex {
    let flags = if is_acronym(phrase) { "" } else { "(?i)" };
    Regex::new(&format!(r"{}\b{}\b", flags, regex::escape(phrase))).unwrap()
}

fn is_acronym(phrase: &str) -> bool {
    phrase.chars().count() > 1 && phrase.chars().all(|c| c.is_ascii_uppercase())
}

pub fn keywords(platform: &Platform) -> &'static [&'static str] {
    PLATFORM_KEYWORDS
        .iter()
        .find(|(id, _)| *id == platform.id())
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

/// Micro-copy for buttons and cards pointing at a platform.
pub fn button_text(platform: &Platform) -> String {
    match platform {
        Platform::Amazon => "🛒 View on Amazon".to_string(),
        Platform::MercadoLivre => "🛒 View on Mercado Livre".to_string(),
        Platform::Shopee => "🛒 View on Shopee".to_string(),
        Platform::Magalu => "🛒 View on Magalu".to_string(),
        Platform::ClickBank => "🔗 Access on ClickBank".to_string(),
        Platform::Hotmart => "🔗 Access on Hotmart".to_string(),
        Platform::Eduzz => "🔗 Access on Eduzz".to_string(),
        Platform::Kiwify => "🔗 Access on Kiwify".to_string(),
        Platform::Braip => "🔗 Access on Braip".to_string(),
        Platform::Other(_) => format!("{} View on {}", platform.icon(), platform.display_name()),
    }
}

/// Rewrites brand mentions and call-to-action phrases into affiliate links and
/// appends the "where to buy" and disclosure blocks.
#[derive(Debug, Clone, Default)]
pub struct AffiliateLinker;

impl AffiliateLinker {
    pub fn new() -> Self {
        Self
    }

    pub fn insert_links(&self, html: &str, links: &AffiliateLinkMap) -> String {
        let mut content = html.to_string();

        for (platform, url) in links.configured() {
            let title = button_text(platform);
            debug!("🔗 Linking mentions of {}", platform);

            for keyword in keywords(platform) {
                if let Some(pattern) = PATTERNS.get(keyword) {
                    content = wrap_unprotected(&content, pattern, |text| keyword_anchor(url, &title, text));
                }
            }

            for phrase in CTA_PHRASES {
                if let Some(pattern) = PATTERNS.get(phrase) {
                    content = wrap_unprotected(&content, pattern, |text| button_anchor(url, text));
                }
            }
        }

        if links.has_configured() && !html::has_marker(&content, BUY_SECTION_MARKER) {
            let section = buy_section(links);
            content = match conclusion_heading(&content) {
                Some(pos) => format!("{}{}\n{}", &content[..pos], section, &content[pos..]),
                None => format!("{}\n{}", content, section),
            };
        }

        if !html::has_marker(&content, DISCLAIMER_MARKER) {
            content.push_str(DISCLAIMER);
        }

        content
    }
}

/// Wraps every match that does not fall inside a tag or an existing anchor.
fn wrap_unprotected<F>(html: &str, pattern: &Regex, wrap: F) -> String
where
    F: Fn(&str) -> String,
{
    let spans = html::protected_spans(html);
    let mut out = String::with_capacity(html.len());
    let mut last = 0;

    for found in pattern.find_iter(html) {
        if html::overlaps(&spans, &found.range()) {
            continue;
        }
        out.push_str(&html[last..found.start()]);
        out.push_str(&wrap(found.as_str()));
        last = found.end();
    }

    out.push_str(&html[last..]);
    out
}

fn keyword_anchor(url: &str, title: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="{}" title="{}" class="affiliate-link font-semibold text-blue-600 hover:text-blue-800 underline">{}</a>"#,
        escape_attr(url),
        REL,
        escape_attr(title),
        text
    )
}

fn button_anchor(url: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="{}" class="affiliate-button inline-block bg-blue-600 text-white px-6 py-3 rounded-lg font-semibold hover:bg-blue-700 transition-colors no-underline">{} →</a>"#,
        escape_attr(url),
        REL,
        text
    )
}

fn buy_section(links: &AffiliateLinkMap) -> String {
    let mut section = format!(
        r#"<div class="{} my-8 p-6 bg-gradient-to-r from-blue-50 to-indigo-50 rounded-lg border-2 border-blue-200">"#,
        BUY_SECTION_MARKER
    );
    section.push_str(r#"<h3 class="text-2xl font-bold text-gray-900 mb-4">🎯 Where to Buy</h3>"#);
    section.push_str(r#"<div class="grid grid-cols-1 md:grid-cols-2 gap-4">"#);

    for (platform, url) in links.configured() {
        section.push_str(&format!(
            r#"
  <a href="{}" target="_blank" rel="{}" class="block bg-white p-4 rounded-lg shadow-md hover:shadow-lg transition-shadow border-2 border-transparent hover:border-blue-500 text-center no-underline">
    <span class="text-2xl mb-2 block">{}</span>
    <span class="font-semibold text-gray-900 text-lg">{}</span>
    <span class="text-sm text-blue-600 block">{}</span>
  </a>"#,
            escape_attr(url),
            REL,
            platform.icon(),
            platform.display_name(),
            button_text(platform)
        ));
    }

    section.push_str("</div></div>");
    section
}

/// Byte offset of the first `<h2>` that announces the conclusion.
fn conclusion_heading(html: &str) -> Option<usize> {
    H2.find_iter(html)
        .find(|heading| {
            let text = html::strip_tags(heading.as_str()).to_lowercase();
            text.contains("conclusion") || text.contains("conclusão")
        })
        .map(|heading| heading.start())
}

const DISCLAIMER: &str = r#"
<div class="affiliate-disclaimer mt-8 p-4 bg-yellow-50 border-l-4 border-yellow-400 text-sm text-gray-700">
  <p><strong>⚠️ Transparency Notice:</strong> This article contains affiliate links. If you purchase
  through these links we may earn a commission at no extra cost to you. This helps us keep this
  content free and useful. We only recommend items we consider valuable.</p>
</div>
"#;
