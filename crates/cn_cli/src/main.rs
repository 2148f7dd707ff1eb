use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use cn_analysis::{NlpResources, Pipeline};
use cn_audio::GoogleTtsRenderer;
use cn_core::{PipelineConfig, Result};
use cn_fetch::{FetchArgs, GoogleNewsSource};
use cn_web::AppState;
use tracing::info;

mod render;

#[derive(Debug, Clone, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                match c {
                    's' => total_seconds += num,
                    'm' => total_seconds += num * 60,
                    'h' => total_seconds += num * 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                }
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number is seconds
        if !current_number.is_empty() {
            match current_number.parse::<u64>() {
                Ok(num) => {
                    total_seconds += num;
                    has_unit = true;
                }
                Err(_) => return Err("Invalid number in duration".to_string()),
            }
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Company news summaries, sentiment and comparative reports", long_about = None)]
struct Cli {
    /// JSON file with pipeline settings; missing keys keep their defaults
    #[arg(long, env = "CN_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "CN_MAX_ARTICLES")]
    max_articles: Option<usize>,
    #[arg(long, env = "CN_FEED_URL")]
    feed_url: Option<String>,
    /// HTTP timeout (e.g. 5s, 1m30s)
    #[arg(long, env = "CN_TIMEOUT")]
    timeout: Option<HumanDuration>,
    #[arg(long, env = "CN_LOG", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch, analyze and compare recent coverage of a company
    Report {
        company: String,
        /// Print the full run as JSON instead of markdown
        #[arg(long)]
        json: bool,
        #[arg(long)]
        no_audio: bool,
        /// Directory for the audio summary (defaults to the temp directory)
        #[arg(long)]
        audio_dir: Option<PathBuf>,
    },
    /// Retrieval debugging helpers
    Fetch(FetchArgs),
    /// Summarize a text file, or stdin with `-`
    Summarize {
        input: String,
        #[arg(long, short)]
        sentences: Option<usize>,
    },
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "CN_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
        #[arg(long)]
        no_audio: bool,
    },
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(max_articles) = self.max_articles {
            config = config.with_max_articles(max_articles);
        }
        if let Some(feed_url) = &self.feed_url {
            config.feed_url = feed_url.clone();
        }
        if let Some(timeout) = &self.timeout {
            config.request_timeout_secs = timeout.0.as_secs();
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<PipelineConfig> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

fn build_pipeline(
    resources: Arc<NlpResources>,
    config: PipelineConfig,
    audio_dir: Option<PathBuf>,
) -> Result<Pipeline> {
    let source = Arc::new(GoogleNewsSource::new(&config)?);
    let renderer = if config.audio_enabled {
        let renderer = GoogleTtsRenderer::new(&config)?;
        Some(match audio_dir {
            Some(dir) => renderer.with_output_dir(dir),
            None => renderer,
        })
    } else {
        None
    };

    let pipeline = Pipeline::new(resources, source.clone(), source, config);
    Ok(match renderer {
        Some(renderer) => pipeline.with_audio(Arc::new(renderer)),
        None => pipeline,
    })
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = cli.pipeline_config()?;

    match cli.command {
        Commands::Report {
            company,
            json,
            no_audio,
            audio_dir,
        } => {
            if no_audio {
                config = config.with_audio(false);
            }
            let resources = Arc::new(NlpResources::init()?);
            info!("🧠 NLP resources initialized ({})", resources.classifier().scorer_name());
            let pipeline = build_pipeline(resources, config, audio_dir)?;

            let output = pipeline.run(&company).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!("{}", render::render_markdown(&output));
            }
            for warning in &output.warnings {
                eprintln!("Error: {}", warning);
            }
        }
        Commands::Fetch(args) => {
            let source = GoogleNewsSource::new(&config)?;
            cn_fetch::handle_command(args, &source).await?;
        }
        Commands::Summarize { input, sentences } => {
            let text = read_input(&input)?;
            let resources = NlpResources::init()?;
            let target = sentences.unwrap_or(config.summary_sentences);

            let summary = resources.summarizer().summarize(&text, target);
            println!("{}", summary);
            println!("Sentiment: {}", resources.classifier().classify(&summary).label());
        }
        Commands::Serve { addr, no_audio } => {
            if no_audio {
                config = config.with_audio(false);
            }
            let resources = Arc::new(NlpResources::init()?);
            let pipeline = build_pipeline(resources, config, None)?;
            cn_web::serve(addr, AppState::new(Arc::new(pipeline))).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cn_fetch::init_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_human_duration() {
        assert_eq!("5s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(5));
        assert_eq!("1m30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert_eq!("1h".parse::<HumanDuration>().unwrap().0, Duration::from_secs(3600));
        assert_eq!("12".parse::<HumanDuration>().unwrap().0, Duration::from_secs(12));
        assert!("5x".parse::<HumanDuration>().is_err());
        assert!("".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_parse_report_command() {
        let cli = Cli::parse_from(["cn", "--max-articles", "3", "report", "Tesla", "--json", "--no-audio"]);
        assert_eq!(cli.max_articles, Some(3));
        match cli.command {
            Commands::Report { company, json, no_audio, .. } => {
                assert_eq!(company, "Tesla");
                assert!(json);
                assert!(no_audio);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_pipeline_config_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_articles": 4, "summary_sentences": 3}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::parse_from(["cn", "--config", &path, "--timeout", "1m", "summarize", "-"]);
        let config = cli.pipeline_config().unwrap();
        assert_eq!(config.max_articles, 4);
        assert_eq!(config.summary_sentences, 3);
        assert_eq!(config.request_timeout_secs, 60);

        let cli = Cli::parse_from(["cn", "--config", &path, "--max-articles", "2", "summarize", "-"]);
        assert_eq!(cli.pipeline_config().unwrap().max_articles, 2);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::parse_from(["cn", "--config", "/nonexistent/cn.json", "summarize", "-"]);
        assert!(matches!(cli.pipeline_config(), Err(cn_core::Error::Io(_))));
    }

    #[test]
    fn test_build_pipeline_without_audio() {
        let resources = Arc::new(NlpResources::init().unwrap());
        let pipeline = build_pipeline(resources, PipelineConfig::default().with_audio(false), None).unwrap();
        assert!(!pipeline.config().audio_enabled);
    }
}
