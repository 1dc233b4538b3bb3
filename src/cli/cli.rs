use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{ColorMode, LogLevel};

/// Show the files a commit touched inside the surrounding repository tree.
#[derive(Parser, Debug, Clone)]
#[command(name = "git-context-tree", version)]
pub struct Cli {
    /// The commit whose changes are shown
    pub commit: String,

    /// Number of unchanged siblings kept around each change
    #[clap(long, short)]
    pub context: Option<usize>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// The root directory of the repository
    #[clap(long, short, default_value = ".")]
    pub root: PathBuf,

    /// When to color the output
    #[clap(long, value_enum)]
    pub color: Option<ColorMode>,
}
