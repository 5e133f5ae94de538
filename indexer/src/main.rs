use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use recipe_core::config::{DEFAULT_INDEX_PATH, DEFAULT_SOURCE_PATH};
use recipe_core::document::{DEFAULT_FIELDS, DEFAULT_ID_FIELD};
use recipe_core::pipeline::{self, BuildReport, Origin};
use recipe_core::staleness::{ArtifactTimes, Freshness};
use recipe_core::{DocumentSchema, IndexerConfig, Language, StaleReason};
use std::path::PathBuf;
use std::time::{Instant, SystemTime};
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and inspect the recipe inverted index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ArtifactArgs {
    /// Raw recipe collection (JSON array)
    #[arg(long, default_value = DEFAULT_SOURCE_PATH)]
    source: PathBuf,
    /// Inverted index artifact
    #[arg(long, default_value = DEFAULT_INDEX_PATH)]
    index: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Reuse the index if it is newer than the source, otherwise rebuild it
    Build {
        #[command(flatten)]
        artifacts: ArtifactArgs,
        /// Language for tokenization, stopwords and stemming (pt, en)
        #[arg(long, default_value_t = Language::Portuguese)]
        language: Language,
        /// Fields to index, in concatenation order
        #[arg(long, value_delimiter = ',', default_values_t = default_fields())]
        fields: Vec<String>,
        /// Field holding the document identifier
        #[arg(long, default_value = DEFAULT_ID_FIELD)]
        id_field: String,
        /// Rebuild even when the index is fresh
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Report whether the index artifact is up to date with the source
    Status {
        #[command(flatten)]
        artifacts: ArtifactArgs,
    },
}

fn default_fields() -> Vec<String> {
    DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { artifacts, language, fields, id_field, force } => {
            let config = IndexerConfig {
                source: artifacts.source,
                index: artifacts.index,
                language,
                schema: DocumentSchema::new(id_field, fields),
            };
            build(&config, force)
        }
        Commands::Status { artifacts } => status(&artifacts),
    }
}

fn build(config: &IndexerConfig, force: bool) -> Result<()> {
    let start = Instant::now();
    let report: BuildReport = if force {
        pipeline::rebuild(config, StaleReason::Forced)
    } else {
        pipeline::run(config)
    }
    .with_context(|| format!("failed to index {}", config.source.display()))?;

    let origin = match report.origin {
        Origin::Reused => "reused".to_string(),
        Origin::Rebuilt(reason) => format!("rebuilt ({reason})"),
    };
    tracing::info!(
        terms = report.index.len(),
        %origin,
        language = %config.language,
        elapsed_s = start.elapsed().as_secs_f64(),
        "done"
    );
    report
        .persisted
        .with_context(|| format!("index built but not saved to {}", config.index.display()))
}

fn status(artifacts: &ArtifactArgs) -> Result<()> {
    let times = ArtifactTimes::read(&artifacts.source, &artifacts.index);
    println!("source: {} ({})", artifacts.source.display(), describe(times.source)?);
    println!("index:  {} ({})", artifacts.index.display(), describe(times.index)?);
    match times.freshness() {
        Freshness::Fresh => println!("status: fresh"),
        Freshness::Stale(reason) => println!("status: stale, {reason}"),
    }
    Ok(())
}

fn describe(modified: Option<SystemTime>) -> Result<String> {
    match modified {
        Some(at) => Ok(format!("modified {}", time::OffsetDateTime::from(at).format(&Rfc3339)?)),
        None => Ok("missing".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_defaults_to_recipe_artifacts() {
        let cli = Cli::parse_from(["indexer", "build"]);
        let Commands::Build { artifacts, language, fields, id_field, force } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(artifacts.source, PathBuf::from("receitas_db.json"));
        assert_eq!(artifacts.index, PathBuf::from("indice_invertido.json"));
        assert_eq!(language, Language::Portuguese);
        assert_eq!(fields, default_fields());
        assert_eq!(id_field, "idMeal");
        assert!(!force);
    }

    #[test]
    fn build_accepts_language_and_field_list() {
        let cli = Cli::parse_from(["indexer", "build", "--language", "en", "--fields", "strMeal,strArea", "--force"]);
        let Commands::Build { language, fields, force, .. } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(language, Language::English);
        assert_eq!(fields, vec!["strMeal", "strArea"]);
        assert!(force);
    }
}
