use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use codetree::cli::Cli;
use codetree::core::render::{write_nodes, write_results};
use codetree::core::{FileTree, SearchCoordinator};
use codetree::fs::RealFileSystem;
use codetree::models::{Node, SearchResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (root_path, is_current_dir) = match cli.path.as_ref() {
        None => (PathBuf::from("."), true),
        Some(raw) => (raw.clone(), raw.as_path() == Path::new(".")),
    };

    let metadata = match std::fs::metadata(&root_path) {
        Ok(metadata) => metadata,
        Err(err) => {
            eprintln!("codetree: {}: {}", root_path.display(), err);
            return ExitCode::from(1);
        }
    };

    if !metadata.is_dir() {
        eprintln!("codetree: {}: Not a directory", root_path.display());
        return ExitCode::from(1);
    }

    let mut tree = match FileTree::new(RealFileSystem, &cli.tree_options()) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("codetree: {err:#}");
            return ExitCode::from(1);
        }
    };

    tree.open_root(&root_path).await;
    for dir in &cli.expand {
        if tree.expand_path(dir).await.is_none() {
            eprintln!("codetree: {dir}: not found in project tree");
        }
    }

    let results = match &cli.search {
        Some(term) => {
            let coordinator = SearchCoordinator::new();
            let results = coordinator
                .run(tree.fs(), term, tree.nodes(), &cli.search_options())
                .await
                .unwrap_or_default();
            Some((term.as_str(), results))
        }
        None => None,
    };

    let root_name = codetree::root_display_name(&root_path, is_current_dir);
    let stdout = io::stdout();
    match print(&mut stdout.lock(), &root_name, tree.nodes(), results) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("codetree: {err}");
            ExitCode::from(1)
        }
    }
}

fn print<W: Write>(
    out: &mut W,
    root_name: &str,
    nodes: &[Node],
    search: Option<(&str, Vec<SearchResult>)>,
) -> io::Result<()> {
    writeln!(out, "{root_name}")?;
    write_nodes(out, nodes)?;

    if let Some((term, results)) = search {
        writeln!(out)?;
        if results.is_empty() {
            writeln!(out, "no matches for \"{term}\"")?;
        } else {
            write_results(out, &results)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
