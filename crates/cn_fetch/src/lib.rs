pub mod cli;
pub mod logging;
pub mod sources;

pub use cli::{handle_command, FetchArgs, FetchCommands};
pub use logging::{init_logging, Logger};
pub use sources::GoogleNewsSource;

pub mod prelude {
    pub use super::sources::GoogleNewsSource;
    pub use cn_core::{ArticleSource, BodyFetcher, Error, RawArticle, Result};
}
