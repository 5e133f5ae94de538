use anyhow::{Context, Result};
use clap::Parser;
use recipe_core::config::DEFAULT_SOURCE_PATH;
use recipe_core::persist::write_json_atomic;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1/search.php?f=";

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Collect every TheMealDB recipe into a JSON array, one request per initial letter")]
struct Cli {
    /// Output JSON file
    #[arg(long, default_value = DEFAULT_SOURCE_PATH)]
    output: PathBuf,
    /// Search endpoint; the letter is appended to it
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Pause between requests (politeness)
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent string sent with every request
    #[arg(long, default_value = "recipe-crawler/0.1")]
    user_agent: String,
}

/// The API answers `{"meals": null}` when no recipe starts with the letter.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    meals: Option<Vec<Value>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
    let args = Cli::parse();

    let client = Client::builder()
        .user_agent(args.user_agent.clone())
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    tracing::info!(base_url = %args.base_url, output = %args.output.display(), "collecting recipes");
    let mut recipes: Vec<Value> = Vec::new();
    for letter in 'a'..='z' {
        let url = format!("{}{}", args.base_url, letter);
        match fetch_letter(&client, &url).await {
            Ok(meals) if meals.is_empty() => tracing::info!(%letter, "no recipes"),
            Ok(meals) => {
                tracing::info!(%letter, count = meals.len(), "recipes found");
                recipes.extend(meals);
            }
            Err(err) => tracing::warn!(%letter, error = %err, "request failed, skipping letter"),
        }
        if letter != 'z' {
            sleep(Duration::from_millis(args.delay_ms)).await;
        }
    }

    tracing::info!(total = recipes.len(), "collection finished");
    write_json_atomic(&args.output, &recipes)
        .with_context(|| format!("failed to save recipes to {}", args.output.display()))?;
    tracing::info!(output = %args.output.display(), "recipes saved");
    Ok(())
}

async fn fetch_letter(client: &Client, url: &str) -> Result<Vec<Value>> {
    let resp = client.get(url).send().await?.error_for_status()?;
    let body = resp.bytes().await?;
    parse_meals(&body)
}

fn parse_meals(body: &[u8]) -> Result<Vec<Value>> {
    let parsed: SearchResponse = serde_json::from_slice(body).context("unexpected response body")?;
    Ok(parsed.meals.unwrap_or_default())
}
