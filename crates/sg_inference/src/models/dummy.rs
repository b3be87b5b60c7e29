use async_trait::async_trait;
use sg_core::{ContentGenerator, Result};
use std::fmt;

/// Offline generator that writes a fixed article skeleton around the topic.
pub struct DummyGenerator;

impl fmt::Debug for DummyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyGenerator").finish()
    }
}

impl DummyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// The topic from the first prompt line, `... article about: <topic>`.
fn topic(user_prompt: &str) -> &str {
    user_prompt
        .lines()
        .next()
        .and_then(|line| line.split_once("about:"))
        .map(|(_, topic)| topic.trim())
        .filter(|topic| !topic.is_empty())
        .unwrap_or("this product")
}

#[async_trait]
impl ContentGenerator for DummyGenerator {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, _system_prompt: &str, user_prompt: &str) -> Result<String> {
        let topic = topic(user_prompt);
        Ok(format!(
            r#"<h1>{topic}: Complete Review</h1>
<p>Looking for honest information about {topic}? This guide covers what matters before you decide.</p>
[IMAGE: {topic}]
<h2>Main Features</h2>
<ul>
<li>Build quality</li>
<li>Price and value</li>
<li>Everyday use</li>
</ul>
<h3>Pros</h3>
<p>Solid performance for the price.</p>
<h3>Cons</h3>
<p>Availability varies by store.</p>
<h2>What Buyers Say</h2>
<p>Most reviews of {topic} are positive.</p>
<h2>Conclusion</h2>
<p>{topic} is a good pick. Check the best price and buy now.</p>"#
        ))
    }
}
