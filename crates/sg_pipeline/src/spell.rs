use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;

use crate::html;

/// Common English misspellings and their corrections.
pub static MISSPELLINGS: &[(&str, &str)] = &[
    ("recieve", "receive"),
    ("definately", "definitely"),
    ("occured", "occurred"),
    ("seperate", "separate"),
    ("necesary", "necessary"),
    ("recomend", "recommend"),
    ("accomodate", "accommodate"),
    ("begining", "beginning"),
    ("beleive", "believe"),
    ("dissapoint", "disappoint"),
    ("existance", "existence"),
    ("goverment", "government"),
    ("independant", "independent"),
    ("maintainance", "maintenance"),
    ("millenium", "millennium"),
    ("occassion", "occasion"),
    ("persistant", "persistent"),
    ("posession", "possession"),
    ("priviledge", "privilege"),
    ("publically", "publicly"),
    ("questionaire", "questionnaire"),
    ("thier", "their"),
    ("tommorrow", "tomorrow"),
    ("untill", "until"),
    ("wich", "which"),
];

lazy_static! {
    static ref CORRECTIONS: HashMap<&'static str, &'static str> =
        MISSPELLINGS.iter().copied().collect();
    static ref MISSPELLING: Regex = {
        let words: Vec<String> = MISSPELLINGS.iter().map(|(wrong, _)| regex::escape(wrong)).collect();
        Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|"))).unwrap()
    };
}

/// Corrects dictionary misspellings in the visible text of an HTML fragment.
/// Tags, including their attribute values, are passed through unchanged.
#[derive(Debug, Clone, Default)]
pub struct SpellNormalizer;

impl SpellNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, text: &str) -> String {
        html::map_text(text, |run| MISSPELLING.replace_all(run, correct))
    }
}

fn correct(caps: &Captures) -> String {
    let found = &caps[0];
    let fixed = CORRECTIONS
        .get(found.to_lowercase().as_str())
        .copied()
        .unwrap_or(found);
    match_case(found, fixed)
}

/// Carries the capitalization of the misspelled word over to its correction.
fn match_case(original: &str, fixed: &str) -> String {
    let mut letters = original.chars().filter(|c| c.is_alphabetic());
    let first_upper = letters.next().map_or(false, char::is_uppercase);

    if first_upper && original.chars().count() > 1 && letters.all(char::is_uppercase) {
        return fixed.to_uppercase();
    }
    if first_upper {
        let mut chars = fixed.chars();
        if let Some(first) = chars.next() {
            return first.to_uppercase().chain(chars).collect();
        }
    }
    fixed.to_string()
}
