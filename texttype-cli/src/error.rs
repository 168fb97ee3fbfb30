use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("configuration: {0}")]
    Config(#[from] texttype_config::ConfigError),

    #[error("json output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml output: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("slide {requested} is out of range, the document has {available}")]
    SlideOutOfRange { requested: u64, available: usize },

    #[error("unknown log level '{0}'")]
    LogLevel(String),

    #[error("logging: {0}")]
    Logging(String),

    #[error("the player needs an interactive terminal, try --format final")]
    NotATerminal,
}
