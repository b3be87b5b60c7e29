use futures::future::join_all;
use lazy_static::lazy_static;
use regex::Regex;
use sg_core::ImageGenerator;
use tracing::{info, warn};

use crate::html::escape_attr;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\[IMAGE: ([^\]]+)\]").unwrap();
}

pub fn strip_placeholders(html: &str) -> String {
    PLACEHOLDER.replace_all(html, "").into_owned()
}

/// Replaces every `[IMAGE: description]` placeholder with a generated image.
/// Placeholders whose generation fails are dropped.
pub async fn illustrate(html: &str, images: &dyn ImageGenerator) -> String {
    let placeholders: Vec<_> = PLACEHOLDER
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some((whole.range(), caps[1].trim().to_string()))
        })
        .collect();

    if placeholders.is_empty() {
        return html.to_string();
    }

    info!("🖼️ Generating {} images with {}", placeholders.len(), images.name());
    let results = join_all(
        placeholders
            .iter()
            .map(|(_, description)| images.generate_image(description)),
    )
    .await;

    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for ((range, description), result) in placeholders.iter().zip(results) {
        out.push_str(&html[last..range.start]);
        match result {
            Ok(url) => out.push_str(&image_tag(&url, description)),
            Err(e) => warn!("⚠️ Dropping image \"{}\": {}", description, e),
        }
        last = range.end;
    }
    out.push_str(&html[last..]);
    out
}

fn image_tag(url: &str, description: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" class="w-full rounded-lg shadow-md my-4" />"#,
        escape_attr(url),
        escape_attr(description)
    )
}
