use clap::Parser;
use std::path::PathBuf;

use crate::core::{DEFAULT_IGNORE, SearchOptions, TreeOptions};

#[derive(Parser, Debug)]
#[command(name = "codetree")]
#[command(about = "Browse and search a project tree", long_about = None)]
pub struct Cli {
    /// Project root to open (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Expand a directory given relative to the root, e.g. src/core (repeatable)
    #[arg(short = 'e', long = "expand", value_name = "DIR")]
    pub expand: Vec<String>,

    /// Search names and contents of visible files (case-insensitive)
    #[arg(short = 's', long = "search", value_name = "TERM")]
    pub search: Option<String>,

    /// Pipe-separated names to hide, globs allowed (e.g. "target|*.log")
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    pub ignore: Option<String>,

    /// Stop hiding node_modules and dist
    #[arg(long = "no-default-ignore")]
    pub no_default_ignore: bool,

    /// Show entries starting with '.'
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Text shown for file name matches
    #[arg(long = "match-label", value_name = "TEXT", default_value = "filename match")]
    pub match_label: String,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    pub fn tree_options(&self) -> TreeOptions {
        let ignore_pattern = match (self.no_default_ignore, self.ignore.as_deref()) {
            (true, pattern) => pattern.map(str::to_owned),
            (false, None) => Some(DEFAULT_IGNORE.to_owned()),
            (false, Some(pattern)) => Some(format!("{DEFAULT_IGNORE}|{pattern}")),
        };

        TreeOptions {
            ignore_pattern,
            show_hidden: self.all,
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            name_match_label: self.match_label.clone(),
        }
    }
}
