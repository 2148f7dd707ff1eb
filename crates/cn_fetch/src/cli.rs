use clap::{Args, Subcommand};
use cn_core::{ArticleSource, BodyFetcher, Result};

use crate::logging::Logger;

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    #[command(subcommand)]
    pub command: FetchCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FetchCommands {
    /// List the raw feed items retrieved for a company
    Articles {
        /// Company name to search for
        company: String,
    },
    /// Fetch the leading paragraphs of an article page
    Body {
        url: String,
    },
}

pub async fn handle_command<S>(args: FetchArgs, source: &S) -> Result<()>
where
    S: ArticleSource + BodyFetcher,
{
    let logger = Logger::new().with_new_prefixes(format!("🦗 [{}]", source.name()));

    match args.command {
        FetchCommands::Articles { company } => {
            let articles = source.fetch_articles(&company).await?;
            logger.info(&format!("Found {} articles for {}", articles.len(), company));
            for (i, article) in articles.iter().enumerate() {
                println!("{}. {} ({})", i + 1, article.title, article.published_at);
                println!("   {}", article.link);
                if !article.description_text.is_empty() {
                    println!("   {}", article.description_text);
                }
            }
        }
        FetchCommands::Body { url } => {
            let text = source.fetch_body_summary(&url).await?;
            println!("{}", text);
        }
    }
    Ok(())
}
