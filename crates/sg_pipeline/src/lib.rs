pub mod affiliate;
pub mod html;
pub mod images;
pub mod pipeline;
pub mod prompt;
pub mod seo;
pub mod spell;

pub use affiliate::AffiliateLinker;
pub use pipeline::ArticlePipeline;
pub use seo::SeoOptimizer;
pub use spell::SpellNormalizer;

pub mod prelude {
    pub use super::{AffiliateLinker, ArticlePipeline, SeoOptimizer, SpellNormalizer};
    pub use sg_core::{AffiliateLinkMap, ArticleRequest, Country, GeneratedArticle, Platform, Result, Error};
}
