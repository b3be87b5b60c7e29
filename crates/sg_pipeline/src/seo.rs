use chrono::{DateTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::json;
use sg_core::{Country, SeoReport};
use tracing::debug;

use crate::html::{self, escape_attr, truncate_chars};

pub const BASE_SCORE: i32 = 70;
pub const DEFAULT_AUTHOR: &str = "Blog Author";
pub const DEFAULT_ALT_TEXT: &str = "Relevant image";

const META_DESCRIPTION_CHARS: usize = 160;
const SCHEMA_DESCRIPTION_CHARS: usize = 200;
const ROBOTS: &str = "index, follow, max-snippet:-1, max-image-preview:large, max-video-preview:-1";

lazy_static! {
    static ref H1_OPEN: Regex = Regex::new(r"(?i)<h1[\s>]").unwrap();
    static ref H1: Regex = Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap();
    static ref H2: Regex = Regex::new(r"(?is)<h2([^>]*)>(.*?)</h2>").unwrap();
    static ref H2_OPEN: Regex = Regex::new(r"(?i)<h2[\s>]").unwrap();
    static ref H3_OPEN: Regex = Regex::new(r"(?i)<h3[\s>]").unwrap();
    static ref LIST_OPEN: Regex = Regex::new(r"(?i)<(?:ul|ol)[\s>]").unwrap();
    static ref IMG: Regex = Regex::new(r"(?i)<img\b[^>]*>").unwrap();
    static ref ALT_ATTR: Regex = Regex::new(r"(?i)\salt\s*=").unwrap();
    static ref HEAD_CLOSE: Regex = Regex::new(r"(?i)</head>").unwrap();
}

/// Heuristic SEO scorer. Starts at a base score, adds bonuses for structural
/// signals and injects the markup search engines look for.
#[derive(Debug, Clone, Default)]
pub struct SeoOptimizer;

impl SeoOptimizer {
    pub fn new() -> Self {
        Self
    }

    pub fn optimize(&self, html: &str, keywords: &str, country: &Country) -> SeoReport {
        self.optimize_at(html, keywords, country, Utc::now())
    }

    /// Same as [`optimize`](Self::optimize) with a fixed timestamp for the structured data.
    pub fn optimize_at(&self, html: &str, keywords: &str, country: &Country, now: DateTime<Utc>) -> SeoReport {
        let mut content = html.to_string();
        let mut score = BASE_SCORE;

        if H1_OPEN.is_match(html) {
            score += 5;
        } else if let Some(promoted) = promote_first_h2(&content) {
            content = promoted;
            score += 5;
        }

        let text = html::strip_tags(html);

        let hits = keyword_hits(&text, keywords);
        score += match hits {
            5..=20 => 10,
            0 => 0,
            _ => 5,
        };

        let h2_count = H2_OPEN.find_iter(html).count();
        let h3_count = H3_OPEN.find_iter(html).count();
        if h2_count >= 3 && h3_count >= 2 {
            score += 5;
        }

        if LIST_OPEN.is_match(html) {
            score += 3;
        }

        let words = html::word_count(html);
        score += match words {
            1500..=3500 => 5,
            n if n >= 800 => 2,
            _ => 0,
        };

        content = patch_missing_alt(&content);
        score += 2;

        let meta = meta_block(&text, keywords, country);
        content = match HEAD_CLOSE.find(&content) {
            Some(head) => format!("{}{}{}", &content[..head.start()], meta, &content[head.start()..]),
            None => format!("{}\n{}", meta, content),
        };

        if !html.contains("schema.org") {
            let headline = H1
                .captures(&content)
                .map(|caps| html::strip_tags(&caps[1]))
                .filter(|headline| !headline.is_empty())
                .unwrap_or_else(|| "Article".to_string());
            content.push_str(&structured_data(&headline, &text, now));
            score += 5;
        }

        debug!(
            "📈 SEO score {} (keyword hits: {}, h2: {}, h3: {}, words: {})",
            score, hits, h2_count, h3_count, words
        );

        SeoReport {
            content,
            score: score.clamp(0, 100) as u8,
        }
    }
}

fn promote_first_h2(html: &str) -> Option<String> {
    let caps = H2.captures(html)?;
    let whole = caps.get(0)?;
    Some(format!(
        "{}<h1{}>{}</h1>{}",
        &html[..whole.start()],
        &caps[1],
        &caps[2],
        &html[whole.end()..]
    ))
}

/// Total case-insensitive occurrences of the comma-separated keywords.
pub fn keyword_hits(text: &str, keywords: &str) -> usize {
    let haystack = text.to_lowercase();
    keywords
        .split(',')
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .map(|keyword| haystack.matches(keyword.as_str()).count())
        .sum()
}

fn patch_missing_alt(html: &str) -> String {
    IMG.replace_all(html, |caps: &Captures| {
        let tag = &caps[0];
        if ALT_ATTR.is_match(tag) {
            return tag.to_string();
        }
        let (body, close) = match tag.strip_suffix("/>") {
            Some(body) => (body.trim_end(), " />"),
            None => (tag[..tag.len() - 1].trim_end(), ">"),
        };
        format!(r#"{} alt="{}"{}"#, body, DEFAULT_ALT_TEXT, close)
    })
    .into_owned()
}

fn meta_block(text: &str, keywords: &str, country: &Country) -> String {
    let mut description = truncate_chars(text, META_DESCRIPTION_CHARS).trim().to_string();
    if text.chars().count() > META_DESCRIPTION_CHARS {
        description.push_str("...");
    }

    format!(
        r#"<meta name="description" content="{}" />
<meta name="keywords" content="{}" />
<meta property="og:type" content="article" />
<meta property="og:locale" content="{}" />
<meta name="robots" content="{}" />
"#,
        escape_attr(&description),
        escape_attr(keywords),
        country.locale(),
        ROBOTS
    )
}

fn structured_data(headline: &str, text: &str, now: DateTime<Utc>) -> String {
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let schema = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": headline,
        "description": truncate_chars(text, SCHEMA_DESCRIPTION_CHARS).trim(),
        "author": {
            "@type": "Person",
            "name": DEFAULT_AUTHOR,
        },
        "datePublished": timestamp,
        "dateModified": timestamp,
    });

    // serde_json's pretty printer cannot fail on a json! value
    let body = serde_json::to_string_pretty(&schema).unwrap_or_default();
    format!(
        "\n<script type=\"application/ld+json\">\n{}\n</script>\n",
        body.replace("</", "<\\/")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn score(html: &str, keywords: &str) -> u8 {
        SeoOptimizer::new().optimize(html, keywords, &Country::US).score
    }

    fn words(n: usize) -> String {
        format!("<p>{}</p>", vec!["lorem"; n].join(" "))
    }

    #[test]
    fn test_minimal_document_score() {
        // base + alt + structured data
        assert_eq!(score("<p>hello</p>", ""), 77);
    }

    #[test]
    fn test_h2_is_promoted_when_h1_missing() {
        let report = SeoOptimizer::new().optimize(r#"<h2 class="t">Best Earbuds</h2><h2>Other</h2>"#, "", &Country::BR);
        assert!(report.content.contains(r#"<h1 class="t">Best Earbuds</h1><h2>Other</h2>"#));
        assert_eq!(report.score, 82);
    }

    #[test]
    fn test_no_heading_no_bonus() {
        assert_eq!(score("<p>plain</p>", ""), 77);
        assert_eq!(score("<h1>Title</h1><p>plain</p>", ""), 82);
    }

    #[test]
    fn test_keyword_bands() {
        assert_eq!(keyword_hits("Rust rust RUST", " rust , "), 3);
        assert_eq!(keyword_hits("anything", ""), 0);

        let base = score("<p>x</p>", "");
        assert_eq!(score("<p>rust</p>", "rust"), base + 5);
        assert_eq!(score("<p>rust rust rust rust rust</p>", "rust"), base + 10);
        assert_eq!(score(&format!("<p>{}</p>", "rust ".repeat(21)), "rust"), base + 5);
    }

    #[test]
    fn test_structure_list_and_length_bonuses() {
        let base = score("<p>x</p>", "");
        assert_eq!(score("<h1>T</h1><h2>a</h2><h2>b</h2><h2>c</h2><h3>d</h3><h3>e</h3>", ""), base + 10);
        assert_eq!(score("<ul><li>a</li></ul>", ""), base + 3);
        assert_eq!(score(&words(900), ""), base + 2);
        assert_eq!(score(&words(1500), ""), base + 5);
        assert_eq!(score(&words(4000), ""), base + 2);
    }

    #[test]
    fn test_missing_alt_is_patched() {
        let report = SeoOptimizer::new().optimize(
            r#"<img src="a.png"><img src="b.png" alt="B"><img src="c.png" />"#,
            "",
            &Country::US,
        );
        assert!(report.content.contains(r#"<img src="a.png" alt="Relevant image">"#));
        assert!(report.content.contains(r#"<img src="b.png" alt="B">"#));
        assert!(report.content.contains(r#"<img src="c.png" alt="Relevant image" />"#));
    }

    #[test]
    fn test_meta_tags_prepended_or_put_in_head() {
        let report = SeoOptimizer::new().optimize("<p>Hello \"world\"</p>", "a, b", &Country::BR);
        assert!(report.content.starts_with(r#"<meta name="description" content="Hello &quot;world&quot;" />"#));
        assert!(report.content.contains(r#"<meta name="keywords" content="a, b" />"#));
        assert!(report.content.contains(r#"<meta property="og:locale" content="pt_BR" />"#));

        let report = SeoOptimizer::new().optimize("<html><head><title>t</title></head><body>b</body></html>", "", &Country::from("JP"));
        let meta = report.content.find("<meta name=\"robots\"").unwrap();
        assert!(meta < report.content.find("</head>").unwrap());
        assert!(report.content.starts_with("<html>"));
        assert!(report.content.contains(r#"content="en_US""#));
    }

    #[test]
    fn test_meta_description_is_truncated() {
        let report = SeoOptimizer::new().optimize(&words(100), "", &Country::US);
        let expected = format!("{}...", truncate_chars(&vec!["lorem"; 100].join(" "), 160).trim());
        assert!(report.content.contains(&format!(r#"content="{}""#, expected)));
    }

    #[test]
    fn test_structured_data() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let report = SeoOptimizer::new().optimize_at("<h2>Best Earbuds</h2><p>Body</p>", "", &Country::US, now);
        assert!(report.content.contains(r#""@type": "Article""#));
        assert!(report.content.contains(r#""headline": "Best Earbuds""#));
        assert!(report.content.contains(r#""name": "Blog Author""#));
        assert!(report.content.contains(r#""datePublished": "2024-05-01T12:00:00.000Z""#));
        assert!(report.content.contains(r#""description": "Best Earbuds Body""#));
    }

    #[test]
    fn test_existing_schema_is_not_duplicated() {
        let html = r#"<h1>T</h1><script type="application/ld+json">{"@context":"https://schema.org"}</script>"#;
        let report = SeoOptimizer::new().optimize(html, "", &Country::US);
        assert_eq!(report.content.matches("schema.org").count(), 1);
        assert_eq!(report.score, 77);
    }

    #[test]
    fn test_headline_falls_back_to_article() {
        let report = SeoOptimizer::new().optimize("<p>No headings</p>", "", &Country::US);
        assert!(report.content.contains(r#""headline": "Article""#));
    }

    #[test]
    fn test_score_grows_with_each_signal_and_stays_bounded() {
        let filler = vec!["lorem"; 1600].join(" ");
        let steps = [
            "<p>x</p>".to_string(),
            "<h1>Rust</h1><p>x</p>".to_string(),
            "<h1>Rust</h1><p>rust rust rust</p>".to_string(),
            "<h1>Rust</h1><p>rust rust rust</p><h2>a</h2><h2>b</h2><h2>c</h2><h3>d</h3><h3>e</h3>".to_string(),
            "<h1>Rust</h1><p>rust rust rust</p><h2>a</h2><h2>b</h2><h2>c</h2><h3>d</h3><h3>e</h3><ul><li>i</li></ul>".to_string(),
            format!("<h1>Rust</h1><p>rust rust rust {}</p><h2>a</h2><h2>b</h2><h2>c</h2><h3>d</h3><h3>e</h3><ul><li>i</li></ul>", filler),
            format!("<h1>Rust</h1><p>rust rust rust {}</p><h2>a</h2><h2>b</h2><h2>c</h2><h3>d</h3><h3>e</h3><ul><li>i</li></ul><img src=\"a.png\" alt=\"A\">", filler),
        ];

        let scores: Vec<u8> = steps.iter().map(|html| score(html, "rust")).collect();
        assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]), "{:?}", scores);
        assert!(scores.iter().all(|s| *s <= 100));
        assert_eq!(*scores.last().unwrap(), 100);
    }
}
