//! Regex-level HTML helpers shared by the text stages.
//!
//! These work on the raw markup string and are best-effort: a stray `<` in
//! running text is treated as the start of a tag.

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref RAW_TEXT: Regex =
        Regex::new(r"(?is)<script\b[^>]*>.*?</script>|<style\b[^>]*>.*?</style>").unwrap();
    static ref TAG_NAME: Regex = Regex::new(r"^<\s*(/?)\s*([a-zA-Z][a-zA-Z0-9]*)").unwrap();
}

/// Elements whose content must never be rewritten.
const OPAQUE_ELEMENTS: [&str; 4] = ["a", "script", "style", "title"];

fn visible_text(html: &str) -> String {
    let without_raw = RAW_TEXT.replace_all(html, " ");
    TAG.replace_all(&without_raw, " ").into_owned()
}

/// Text with scripts and styles dropped, every tag replaced by a space and
/// whitespace collapsed.
pub fn strip_tags(html: &str) -> String {
    visible_text(html)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn word_count(html: &str) -> usize {
    visible_text(html).split_whitespace().count()
}

pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Applies `f` to every run of text between tags. Tags and the contents of
/// script and style elements pass through untouched.
pub fn map_text<'a, F>(html: &'a str, mut f: F) -> String
where
    F: FnMut(&'a str) -> Cow<'a, str>,
{
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for raw in RAW_TEXT.find_iter(html) {
        map_segment(&html[last..raw.start()], &mut f, &mut out);
        out.push_str(raw.as_str());
        last = raw.end();
    }
    map_segment(&html[last..], &mut f, &mut out);
    out
}

fn map_segment<'a, F>(segment: &'a str, f: &mut F, out: &mut String)
where
    F: FnMut(&'a str) -> Cow<'a, str>,
{
    let mut last = 0;
    for tag in TAG.find_iter(segment) {
        out.push_str(&f(&segment[last..tag.start()]));
        out.push_str(tag.as_str());
        last = tag.end();
    }
    out.push_str(&f(&segment[last..]));
}

fn tag_name(tag: &str) -> Option<(bool, String)> {
    TAG_NAME
        .captures(tag)
        .map(|caps| (!caps[1].is_empty(), caps[2].to_lowercase()))
}

/// Byte ranges that text rewriting must leave alone: every tag, plus the
/// whole extent of anchors, scripts, styles and titles.
pub fn protected_spans(html: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut open: Option<(usize, String)> = None;

    for tag in TAG.find_iter(html) {
        let parsed = tag_name(tag.as_str());

        if let Some((start, name)) = &open {
            if let Some((true, closing)) = &parsed {
                if closing == name {
                    spans.push(*start..tag.end());
                    open = None;
                }
            }
            continue;
        }

        match parsed {
            Some((false, name)) if OPAQUE_ELEMENTS.contains(&name.as_str()) => {
                open = Some((tag.start(), name));
            }
            _ => spans.push(tag.range()),
        }
    }

    if let Some((start, _)) = open {
        spans.push(start..html.len());
    }

    spans
}

pub fn overlaps(spans: &[Range<usize>], range: &Range<usize>) -> bool {
    spans.iter().any(|span| span.start < range.end && range.start < span.end)
}

/// Whether a block carrying the given marker class was already inserted.
pub fn has_marker(html: &str, marker: &str) -> bool {
    html.contains(&format!("class=\"{}", marker))
}
