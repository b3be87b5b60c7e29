use super::{ProfileRules, SpecTable};

pub static RULES: ProfileRules = ProfileRules {
    title: &["#productTitle"],
    price: &[".a-price .a-offscreen"],
    description: &["#feature-bullets"],
    features: Some("#feature-bullets li"),
    specs: Some(SpecTable {
        rows: ".prodDetTable tr",
        key: "th",
        value: "td",
    }),
    rating: &[".a-icon-star"],
};

pub fn can_handle(url: &str) -> bool {
    url.contains("amazon")
}

#[cfg(test)]
mod tests {
    use crate::scrapers::ProductExtractor;

    const PAGE: &str = r#"
        <html><body>
          <span id="productTitle">
            Echo Buds (2nd Gen) Wireless Earbuds
          </span>
          <div class="a-price"><span class="a-offscreen">R$ 499,00</span><span aria-hidden="true">499</span></div>
          <div id="feature-bullets">
            <ul>
              <li><span>Active noise cancellation</span></li>
              <li><span>Up to 15 hours of battery</span></li>
              <li> </li>
              <li><span>IPX4 water resistance</span></li>
            </ul>
          </div>
          <table class="prodDetTable">
            <tr><th>Brand</th><td>Amazon</td></tr>
            <tr><th>Connectivity</th><td>Bluetooth 5.0</td></tr>
            <tr><th>Empty</th><td></td></tr>
          </table>
          <i class="a-icon a-icon-star"><span>4.4 out of 5 stars</span></i>
          <img src="https://m.media-amazon.com/images/I/1.jpg">
        </body></html>
    "#;

    #[test]
    fn test_extracts_known_fields() {
        let product = ProductExtractor::new()
            .extract("https://www.amazon.com.br/dp/B08", PAGE)
            .unwrap();

        assert_eq!(product.title, "Echo Buds (2nd Gen) Wireless Earbuds");
        assert_eq!(product.price, "R$ 499,00");
        assert_eq!(
            product.features,
            vec![
                "Active noise cancellation",
                "Up to 15 hours of battery",
                "IPX4 water resistance",
            ]
        );
        assert!(product.description.starts_with("Active noise cancellation"));
        assert_eq!(product.specs.len(), 2);
        assert_eq!(product.specs.get("Connectivity").map(String::as_str), Some("Bluetooth 5.0"));
        assert_eq!(product.rating.as_deref(), Some("4.4 out of 5 stars"));
        assert_eq!(product.images, vec!["https://m.media-amazon.com/images/I/1.jpg"]);
    }

    #[test]
    fn test_can_handle() {
        assert!(super::can_handle("https://www.amazon.com/dp/1"));
        assert!(!super::can_handle("https://shopee.com.br/item"));
    }
}
