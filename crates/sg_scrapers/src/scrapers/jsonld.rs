use scraper::{Html, Selector};
use serde_json::Value;
use sg_core::ProductRecord;

/// Finds the first schema.org `Product` object in the JSON-LD blocks of the
/// document, looking through top-level arrays and `@graph` lists.
pub fn find_product(document: &Html) -> Option<Value> {
    let script_selector = Selector::parse("script[type='application/ld+json']").ok()?;

    for script in document.select(&script_selector) {
        if let Ok(json) = serde_json::from_str::<Value>(script.text().collect::<String>().trim()) {
            if let Some(product) = find_in(&json) {
                return Some(product.clone());
            }
        }
    }

    None
}

fn find_in(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.iter().find_map(find_in),
        Value::Object(obj) => {
            if is_product(value) {
                return Some(value);
            }
            obj.get("@graph").and_then(find_in)
        }
        _ => None,
    }
}

fn is_product(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind == "Product",
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some("Product")),
        _ => false,
    }
}

/// Renders strings and numbers the way they would read on the page.
fn scalar(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

pub fn price(product: &Value) -> Option<String> {
    match product.get("offers")? {
        Value::Array(offers) => offers.iter().find_map(|offer| offer.get("price").and_then(scalar)),
        offer => offer.get("price").and_then(scalar),
    }
}

pub fn rating(product: &Value) -> Option<String> {
    product
        .get("aggregateRating")
        .and_then(|rating| rating.get("ratingValue"))
        .and_then(scalar)
}

/// Copies name, description and price into fields the selectors left empty.
pub fn fill_missing(record: &mut ProductRecord, product: &Value) {
    if record.title.is_empty() {
        if let Some(name) = product.get("name").and_then(scalar) {
            record.title = name;
        }
    }
    if record.description.is_empty() {
        if let Some(description) = product.get("description").and_then(scalar) {
            record.description = description;
        }
    }
    if record.price.is_empty() {
        if let Some(price) = price(product) {
            record.price = price;
        }
    }
}
