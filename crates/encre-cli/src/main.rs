use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use encre_core::app::Pipeline;
use encre_core::config::{EnvConfig, PipelineConfig};
use encre_core::domain::{ArticleFilter, ArticleOrder, Keyword};
use encre_core::impls::{HttpArticleStore, HttpWebhooks, InMemoryArticleStore, InMemoryWorkflow};
use encre_core::ports::{IdGenerator, SystemClock, UlidGenerator};
use encre_core::text;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let keyword_arg = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "artificial intelligence".to_string());
    let keyword = Keyword::new(keyword_arg)?;

    // (A) Wire the pipeline: remote endpoints when configured, otherwise the
    // in-process demo workflow with short waits.
    let pipeline = match EnvConfig::detect()? {
        Some(config) => {
            tracing::info!("remote endpoints configured, talking to the real workflow");
            let webhooks = Arc::new(HttpWebhooks::new(&config.remote)?);
            let store = Arc::new(HttpArticleStore::new(&config.remote)?);
            Pipeline::builder()
                .generation_webhook(webhooks.clone())
                .publish_webhook(webhooks)
                .article_store(store)
                .config(config.pipeline)
                .build()?
        }
        None => {
            tracing::info!("no remote configuration found, running the offline demo workflow");
            let clock = Arc::new(SystemClock);
            let ids: Arc<dyn IdGenerator> = Arc::new(UlidGenerator::new(SystemClock));
            let store = Arc::new(InMemoryArticleStore::new());
            let workflow = Arc::new(InMemoryWorkflow::new(
                store.clone(),
                ids.clone(),
                clock.clone(),
            ));
            Pipeline::builder()
                .generation_webhook(workflow.clone())
                .publish_webhook(workflow)
                .article_store(store)
                .clock(clock)
                .id_generator(ids)
                .config(PipelineConfig {
                    generation_wait: Duration::from_millis(300),
                    publish_wait: Duration::from_millis(100),
                })
                .build()?
        }
    };

    // (B) Generate an article for the keyword and show the draft.
    let mut draft = pipeline.generate(keyword.clone()).await?;
    println!("article ready: {}", draft.title);
    println!("  slug:    {}", text::slug(&draft.title));
    println!("  excerpt: {}", text::excerpt(&draft.content, text::DEFAULT_EXCERPT_LEN));
    println!("  length:  {}", text::reading_time(&draft.content));

    // (C) The operator would edit here; stand in for that with a small touch.
    draft.content.push_str("\n\nReviewed before publication.");

    // (D) Publish the edited draft and verify the read-back.
    let report = pipeline.publish(draft).await?;
    println!("publication: {}", report.status_line());

    // (E) What the dashboard panels would show.
    println!("\narticles:");
    let mut slugs: Vec<String> = Vec::new();
    for article in pipeline
        .list_articles(&ArticleFilter::default(), ArticleOrder::NewestFirst)
        .await?
    {
        let flag = if article.published { "published" } else { "draft" };
        let slug = text::unique_slug(&article.title, &slugs);
        println!(
            "  [{flag}] {} ({slug}, {})",
            article.title,
            article.reading_time()
        );
        println!("           {}", article.excerpt(80));
        slugs.push(slug);
    }

    println!("\nrequests:");
    for status in pipeline.recent_requests().await {
        println!("  {}", status.status_line());
    }

    Ok(())
}
