use super::ProfileRules;

pub static RULES: ProfileRules = ProfileRules {
    title: &[r#"[data-testid="product-title"]"#],
    price: &[".product-price"],
    description: &[".product-description"],
    features: None,
    specs: None,
    rating: &[],
};

pub fn can_handle(url: &str) -> bool {
    url.contains("shopee")
}

#[cfg(test)]
mod tests {
    use crate::scrapers::ProductExtractor;

    #[test]
    fn test_extracts_listing_without_features() {
        let page = r#"
            <div data-testid="product-title">Smartwatch S8</div>
            <div class="product-price">R$ 89,90</div>
            <div class="product-description">Relógio inteligente</div>
            <ul><li>not a feature list</li></ul>
        "#;
        let product = ProductExtractor::new()
            .extract("https://shopee.com.br/smartwatch-i.1.2", page)
            .unwrap();

        assert_eq!(product.title, "Smartwatch S8");
        assert_eq!(product.price, "R$ 89,90");
        assert_eq!(product.description, "Relógio inteligente");
        assert!(product.features.is_empty());
    }
}
