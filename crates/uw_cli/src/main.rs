use std::net::SocketAddr;

use clap::Parser;
use tracing::info;
use uw_core::constants::topics;
use uw_core::render::{matches_search, Segment, SummaryView};
use uw_core::Leaning;
use uw_inference::aggregate::fetch_all_summaries;
use uw_inference::briefing::Briefer;
use uw_inference::{Config, ModelKind, DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use uw_web::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "AI-generated news briefings on the war in Ukraine", long_about = None)]
pub struct Cli {
    /// Gemini API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, default_value = "gemini", help = "Model to use for inference. Available models: gemini (default), dummy")]
    model: ModelKind,
    #[arg(long, default_value = DEFAULT_TEXT_MODEL)]
    text_model: String,
    #[arg(long, default_value = DEFAULT_IMAGE_MODEL)]
    image_model: String,
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List the configured topics
    Topics,
    /// Fetch a briefing for every topic
    Summaries {
        /// Only show briefings mentioning this term, with matches marked
        #[arg(long)]
        search: Option<String>,
        /// Summarize these topics instead of the configured list
        #[arg(long = "topic")]
        topics: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// What one group of outlets (left, center, right) has been focusing on
    Focus { leaning: Leaning },
    /// Share of US and EU coverage devoted to the war
    Coverage {
        /// Show the daily series instead of the current figures
        #[arg(long)]
        timeline: bool,
    },
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            api_key: self.api_key.clone(),
            model: self.model,
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

fn render_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain { text } => text.clone(),
            Segment::Highlight { text, .. } => format!("[{}]", text),
            Segment::Match { text } => format!("«{}»", text),
        })
        .collect()
}

fn print_summary(view: &SummaryView) {
    let data = &view.data;
    println!("━━ {} ━━", data.topic);
    println!("Summary generated on: {}", data.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    if let Some(quote) = &data.pull_quote {
        println!("\n  \"{}\"", quote);
    }
    for paragraph in &view.paragraphs {
        println!("\n{}", render_segments(paragraph));
    }
    if !data.highlights.is_empty() {
        println!("\nPerspectives:");
        for highlight in &data.highlights {
            println!("  [{}]", highlight.text_to_highlight);
            println!("    left:   {}", highlight.perspectives.left);
            println!("    center: {}", highlight.perspectives.center);
            println!("    right:  {}", highlight.perspectives.right);
        }
    }
    if let Some(credit) = &data.image_credit {
        println!("\nImage: {}", credit);
    }
    if !data.sources.is_empty() {
        println!("\nSources ({}):", data.sources.len());
        for source in &data.sources {
            println!("  ▸ {} <{}>", source.title, source.uri);
        }
    }
    println!();
}

/// Builds the model client; a missing API key is reported here, once.
fn briefer(config: &Config) -> anyhow::Result<Briefer> {
    let model = uw_inference::create_model(config)?;
    info!("🧠 Inference model initialized successfully (using {})", model.name());
    Ok(Briefer::new(model))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    uw_core::logging::init_logging(cli.verbose);
    let config = cli.config();

    match cli.command {
        Commands::Topics => {
            for topic in topics() {
                println!("{}", topic);
            }
        }
        Commands::Summaries { search, topics: requested, json } => {
            let briefer = briefer(&config)?;
            let topics = if requested.is_empty() { topics() } else { requested };
            info!("📰 Fetching {} summaries", topics.len());
            let digest = fetch_all_summaries(&briefer, topics.as_slice()).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&digest)?);
                return Ok(());
            }
            if let Some(error) = digest.error {
                anyhow::bail!(error);
            }

            let term = search.unwrap_or_default();
            let views: Vec<SummaryView> = digest
                .summaries
                .into_iter()
                .filter(|s| matches_search(s, &term))
                .map(|s| SummaryView::new(s, Some(&term)))
                .collect();
            if views.is_empty() {
                println!("No Summaries Available");
                return Ok(());
            }
            for view in &views {
                print_summary(view);
            }
        }
        Commands::Focus { leaning } => {
            let summary = briefer(&config)?.fetch_focus_summary(leaning).await?;
            println!("━━ {} focus ━━\n{}", leaning, summary);
        }
        Commands::Coverage { timeline: true } => {
            let points = briefer(&config)?.fetch_coverage_timeline().await?;
            println!("{:<12} {:>6} {:>6}", "date", "US %", "EU %");
            for point in points {
                println!("{:<12} {:>6.1} {:>6.1}", point.date, point.us, point.eu);
            }
        }
        Commands::Coverage { timeline: false } => {
            let stats = briefer(&config)?.fetch_coverage_stats().await?;
            println!("US Media Coverage: {:.0}% on Ukraine War", stats.us);
            println!("EU Media Coverage: {:.0}% on Ukraine War", stats.eu);
        }
        Commands::Serve { addr } => {
            let model = uw_inference::create_model(&config)?;
            info!("🧠 Inference model initialized successfully (using {})", model.name());
            uw_web::serve(addr, AppState::new(model, topics())).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uw_core::Perspective;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["uw", "--model", "dummy", "focus", "right"]).unwrap();
        assert_eq!(cli.model, ModelKind::Dummy);
        assert!(matches!(cli.command, Commands::Focus { leaning: Leaning::RightLeaning }));

        assert!(Cli::try_parse_from(["uw", "focus", "north"]).is_err());
    }

    #[test]
    fn test_render_segments() {
        let segments = vec![
            Segment::Plain { text: "Aid to ".to_string() },
            Segment::Match { text: "Kyiv".to_string() },
            Segment::Highlight {
                text: " resumed".to_string(),
                perspectives: Perspective {
                    left: String::new(),
                    center: String::new(),
                    right: String::new(),
                },
            },
        ];
        assert_eq!(render_segments(&segments), "Aid to «Kyiv»[ resumed]");
    }
}
