use super::ProfileRules;

pub static RULES: ProfileRules = ProfileRules {
    title: &["h1", r#"[itemprop="name"]"#],
    price: &[r#"[itemprop="price"]"#, ".price"],
    description: &[r#"[itemprop="description"]"#, ".description"],
    features: None,
    specs: None,
    rating: &[],
};
