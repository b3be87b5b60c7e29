use clap::Parser;
use sg_core::{AffiliateLinkMap, ArticleRequest, ArticleType, Country, PageFetcher, Result};
use sg_inference::{create_generator, create_image_generator, Config};
use sg_pipeline::ArticlePipeline;
use sg_scrapers::{HttpPageFetcher, ProductExtractor};
use sg_web::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long, global = true, help = "Model used to draft articles. Available models: openai (default), dummy")]
    model: Option<String>,
    /// Overrides OPENAI_API_KEY
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// Overrides OPENAI_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Overrides OPENAI_MODEL
    #[arg(long, global = true)]
    chat_model: Option<String>,
    /// Overrides NANO_BANANA_API_KEY
    #[arg(long, global = true)]
    image_api_key: Option<String>,
    /// Overrides NANO_BANANA_BASE_URL
    #[arg(long, global = true)]
    image_base_url: Option<String>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the article API over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
    /// Generate one article and print the response as JSON
    Generate {
        #[arg(long)]
        topic: String,
        #[arg(long)]
        keywords: Option<String>,
        #[arg(long)]
        product_url: Option<String>,
        #[arg(long, default_value = "review")]
        article_type: ArticleType,
        #[arg(long, default_value = "BR")]
        country: String,
        #[arg(long)]
        no_images: bool,
        /// Affiliate link as platform=url, repeatable
        #[arg(long = "link", value_parser = parse_link)]
        links: Vec<(String, String)>,
        /// User review to quote, repeatable
        #[arg(long = "review")]
        reviews: Vec<String>,
    },
    /// Fetch a product page and print the extracted record as JSON
    Extract { url: String },
}

fn parse_link(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((platform, url)) if !platform.trim().is_empty() => {
            Ok((platform.trim().to_string(), url.trim().to_string()))
        }
        _ => Err(format!("expected platform=url, got '{}'", s)),
    }
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        config.model_name = self.model.clone().or(config.model_name);
        config.api_key = self.api_key.clone().or(config.api_key);
        config.base_url = self.base_url.clone().or(config.base_url);
        config.chat_model = self.chat_model.clone().or(config.chat_model);
        config.image_api_key = self.image_api_key.clone().or(config.image_api_key);
        config.image_base_url = self.image_base_url.clone().or(config.image_base_url);
        config
    }
}

fn create_pipeline(config: &Config) -> Result<ArticlePipeline> {
    let fetcher = Arc::new(HttpPageFetcher::new()?);
    let generator = create_generator(config)?;
    let images = create_image_generator(config)?;
    Ok(ArticlePipeline::new(fetcher, generator, images))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = cli.config();

    match cli.command {
        Commands::Serve { addr } => {
            let pipeline = create_pipeline(&config)?;
            info!("✨ Article pipeline ready (using {})", pipeline.generator_name());
            sg_web::serve(addr, AppState::new(pipeline)).await?;
        }
        Commands::Generate {
            topic,
            keywords,
            product_url,
            article_type,
            country,
            no_images,
            links,
            reviews,
        } => {
            let pipeline = create_pipeline(&config)?;
            let mut request = ArticleRequest::new(topic);
            request.keywords = keywords;
            request.product_url = product_url;
            request.article_type = article_type;
            request.target_country = Country::from(country.as_str());
            request.include_images = !no_images;
            request.affiliate_links = links.into_iter().collect::<AffiliateLinkMap>();
            request.custom_reviews = reviews;

            let article = pipeline.generate(&request).await?;
            println!("{}", serde_json::to_string_pretty(&article)?);
        }
        Commands::Extract { url } => {
            info!("🔎 Extracting product from {}", url);
            let markup = HttpPageFetcher::new()?.fetch(&url).await?;
            let product = ProductExtractor::new().extract(&url, &markup)?;
            println!("{}", serde_json::to_string_pretty(&product)?);
        }
    }

    Ok(())
}
