use sg_core::{ArticleRequest, Country, ProductRecord, Result};

pub fn system_prompt(country: &Country) -> String {
    format!(
        "You are an expert blog article writer specializing in SEO-optimized content for {}.
Create engaging, informative, and conversion-focused articles that rank well in search engines.
Focus on Google Discover optimization with compelling headlines and structured content.
Write in a natural, conversational tone while maintaining professionalism.
Use proper HTML formatting with semantic tags (h1, h2, h3, p, ul, ol, strong, em).
Include strategic keyword placement without keyword stuffing.",
        country
    )
}

const STRUCTURE_REQUIREMENTS: &str = "Article Structure Requirements:
- Compelling H1 title optimized for clicks and SEO
- Engaging introduction with hook
- Well-structured sections with H2 and H3 headings
- Detailed product analysis (pros, cons, features)
- User review section highlighting experiences
- Comparison with alternatives if relevant
- FAQ section
- Strong conclusion with call-to-action
- Use bullet points and numbered lists for readability
- Include placeholders for images: [IMAGE: description]
- Maintain 2000-3000 word count for optimal SEO
- Write in HTML format with proper semantic tags";

pub fn user_prompt(request: &ArticleRequest, product: Option<&ProductRecord>) -> Result<String> {
    let mut prompt = format!(
        "Write a comprehensive {} article about: {}\n\n",
        request.article_type, request.topic
    );

    if let Some(keywords) = request.keywords.as_deref().filter(|k| !k.trim().is_empty()) {
        prompt.push_str(&format!("SEO Keywords to naturally incorporate: {}\n\n", keywords));
    }

    if let Some(product) = product {
        prompt.push_str(&product_block(product)?);
    }

    let reviews: Vec<&str> = request
        .custom_reviews
        .iter()
        .map(|review| review.trim())
        .filter(|review| !review.is_empty())
        .collect();
    if !reviews.is_empty() {
        prompt.push_str("Include these authentic user reviews in the article:\n");
        for (index, review) in reviews.iter().enumerate() {
            prompt.push_str(&format!("{}. \"{}\"\n", index + 1, review));
        }
        prompt.push('\n');
    }

    prompt.push_str(STRUCTURE_REQUIREMENTS);
    Ok(prompt)
}

fn product_block(product: &ProductRecord) -> Result<String> {
    let mut lines = vec![
        "Product Information:".to_string(),
        format!("- Name: {}", product.title),
        format!("- Description: {}", product.description),
        format!("- Price: {}", product.price),
        format!("- Features: {}", product.features.join(", ")),
    ];
    if let Some(rating) = &product.rating {
        lines.push(format!("- Rating: {}", rating));
    }
    lines.push(format!("- Technical Specs: {}", serde_json::to_string(&product.specs)?));
    Ok(lines.join("\n") + "\n\n")
}
