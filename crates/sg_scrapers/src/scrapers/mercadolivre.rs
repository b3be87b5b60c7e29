use super::ProfileRules;

pub static RULES: ProfileRules = ProfileRules {
    title: &[".ui-pdp-title"],
    price: &[".price-tag-fraction", ".andes-money-amount__fraction"],
    description: &[".ui-pdp-description"],
    features: Some(".ui-pdp-features li"),
    specs: None,
    rating: &[".ui-pdp-review__rating"],
};

pub fn can_handle(url: &str) -> bool {
    url.contains("mercadolivre") || url.contains("mercadolibre")
}

#[cfg(test)]
mod tests {
    use crate::scrapers::ProductExtractor;

    #[test]
    fn test_extracts_listing() {
        let page = r#"
            <h1 class="ui-pdp-title">Fone Bluetooth XYZ</h1>
            <span class="price-tag-fraction">199</span>
            <div class="ui-pdp-description"><p>Fone sem fio com estojo.</p></div>
            <ul class="ui-pdp-features"><li>Bluetooth 5.3</li><li>30h de bateria</li></ul>
            <table class="prodDetTable"><tr><th>Marca</th><td>XYZ</td></tr></table>
        "#;
        let product = ProductExtractor::new()
            .extract("https://produto.mercadolivre.com.br/MLB-123", page)
            .unwrap();

        assert_eq!(product.title, "Fone Bluetooth XYZ");
        assert_eq!(product.price, "199");
        assert_eq!(product.description, "Fone sem fio com estojo.");
        assert_eq!(product.features, vec!["Bluetooth 5.3", "30h de bateria"]);
        assert!(product.specs.is_empty());
        assert!(product.rating.is_none());
    }
}
