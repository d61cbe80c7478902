//! moodtrip
//!
//! Offline lexicon building and online mood inference from the command line.

use anyhow::Context;
use clap::Parser;
use moodtrip_cli::cli::{Cli, Commands};
use moodtrip_cli::config::AppConfig;
use moodtrip_cli::fetch::{fetch_corpus, split_path, SPLITS};
use moodtrip_cli::Recommender;
use moodtrip_core::{InMemoryCatalog, TripCatalog};
use moodtrip_lexicon::{build_from_config, MoodAnalyzer, MoodCategory};
use moodtrip_telemetry::{InferenceLog, InferenceQuery, InferenceReader, InferenceSink};
use std::io::Read;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = AppConfig::load(&cli.config)?;

    match cli.command {
        Commands::BuildLexicon {
            input,
            output,
            policy,
            min_count,
            min_ratio,
            sort,
        } => {
            if !input.is_empty() {
                config.builder.inputs = input;
            }
            if let Some(output) = output {
                config.builder.output = output;
            }
            if let Some(policy) = policy {
                config.builder.policy = policy;
            }
            if let Some(min_count) = min_count {
                config.builder.policy.min_count = min_count;
            }
            if let Some(min_ratio) = min_ratio {
                config.builder.policy.min_ratio = min_ratio;
            }
            config.builder.sort_by_confidence |= sort;

            info!(
                "Building lexicon (min_count {}, min_ratio {})",
                config.builder.policy.min_count, config.builder.policy.min_ratio
            );
            let report = build_from_config(&config.builder)?;

            println!(
                "Wrote {} entries to {}",
                report.words_accepted,
                config.builder.output.display()
            );
            println!(
                "  records: {} read, {} malformed, {} without a known emotion",
                report.records_read, report.records_malformed, report.records_uncategorized
            );
            for category in MoodCategory::ALL {
                println!("  {:<15} {}", category.as_str(), report.accepted_for(category));
            }
        }

        Commands::FetchCorpus { dir, force } => {
            let written = fetch_corpus(&dir, force).await?;
            println!("Downloaded {} of {} splits", written.len(), SPLITS.len());
            for split in SPLITS {
                println!("  {}", split_path(&dir, split).display());
            }
        }

        Commands::Analyze { text, explain } => {
            let text = text_or_stdin(text)?;
            let analyzer = MoodAnalyzer::from_config(config.lexicon.clone());
            let analysis = analyzer.handle_detailed(Some(text.as_str()))?;

            let output = if explain {
                serde_json::to_string_pretty(&analysis)?
            } else {
                serde_json::to_string_pretty(&analysis.result())?
            };
            println!("{}", output);
        }

        Commands::Recommend { text, user, limit } => {
            let text = text_or_stdin(text)?;
            let analyzer = MoodAnalyzer::from_config(config.lexicon.clone());
            analyzer.warm_up();

            let catalog: Arc<dyn TripCatalog> = match InMemoryCatalog::from_file(&config.catalog.path) {
                Ok(catalog) => Arc::new(catalog),
                Err(e) => {
                    warn!("{}; recommending without trips", e);
                    Arc::new(InMemoryCatalog::default())
                }
            };

            let mut recommender =
                Recommender::new(analyzer, catalog, limit.unwrap_or(config.catalog.limit));
            if config.telemetry.enabled {
                match InferenceLog::open(&config.telemetry.log_path) {
                    Ok(log) => {
                        let sink: Arc<dyn InferenceSink> = Arc::new(log);
                        recommender = recommender.with_sink(sink);
                    }
                    Err(e) => warn!("Inference history disabled: {}", e),
                }
            }

            let recommendation = recommender.recommend(Some(text.as_str()), user.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&recommendation)?);
        }

        Commands::History {
            mood,
            user,
            limit,
            tally,
        } => {
            let reader = InferenceReader::new(&config.telemetry.log_path);

            if tally {
                for (mood, count) in reader.mood_tally()? {
                    println!("{:<10} {}", mood.as_str(), count);
                }
            } else {
                let mut query = InferenceQuery::new().limit(limit);
                if let Some(mood) = mood {
                    query = query.mood(mood);
                }
                if let Some(user) = user {
                    query = query.user_id(user);
                }
                for record in reader.query(&query)? {
                    println!("{}", serde_json::to_string(&record)?);
                }
            }
        }
    }

    Ok(())
}

/// Use the positional text, or read all of stdin
fn text_or_stdin(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            Ok(buf)
        }
    }
}

/// Initialize tracing/logging on stderr so stdout stays machine-readable
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("moodtrip=debug,moodtrip_cli=debug,moodtrip_lexicon=debug,moodtrip_telemetry=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("moodtrip=info,moodtrip_cli=info,moodtrip_lexicon=info,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
