use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::fs::FileSystem;
use crate::models::{MatchType, Node, SearchResult};

/// Lines up to this many characters are shown whole.
pub const SNIPPET_WIDTH: usize = 120;
/// Characters kept on each side of a match in a long line.
pub const SNIPPET_CONTEXT: usize = SNIPPET_WIDTH / 2;
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Snippet shown for a file name hit.
    pub name_match_label: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            name_match_label: "filename match".to_owned(),
        }
    }
}

/// Case-insensitive search over the file nodes of a flat list.
///
/// Only files already present in `nodes` are considered; collapsed subtrees
/// are never read. Files are read one at a time, and results keep the
/// order of `nodes`. A file that cannot be read still gets its name match.
pub async fn search<F: FileSystem>(
    fs: &F,
    term: &str,
    nodes: &[Node],
    options: &SearchOptions,
) -> Vec<SearchResult> {
    if term.trim().is_empty() {
        return Vec::new();
    }
    let needle = fold_case(term);

    let mut results = Vec::new();
    let mut seen: HashSet<(&str, usize)> = HashSet::new();

    for node in nodes.iter().filter(|node| node.is_file()) {
        if contains_folded(&fold_case(&node.name), &needle).is_some()
            && seen.insert((node.path.as_str(), 0))
        {
            results.push(SearchResult {
                node: node.clone(),
                match_type: MatchType::Name,
                jump_to_line: 0,
                snippet: options.name_match_label.clone(),
            });
        }

        let text = match fs.read_text(&node.location).await {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %node.path, error = %err, "skipping file content in search");
                continue;
            }
        };

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let chars: Vec<char> = line.chars().collect();
            let folded: Vec<char> = chars.iter().map(|&c| fold_char(c)).collect();
            let Some(at) = contains_folded(&folded, &needle) else {
                continue;
            };
            if !seen.insert((node.path.as_str(), line_number)) {
                continue;
            }
            results.push(SearchResult {
                node: node.clone(),
                match_type: MatchType::Content,
                jump_to_line: line_number,
                snippet: snippet(line, &chars, at, needle.len()),
            });
        }
    }

    results
}

/// Excerpt of `line` around a match of `len` chars starting at char `at`.
///
/// Long lines keep up to [`SNIPPET_CONTEXT`] chars on each side of the
/// match, clipped to the line. A window wider than [`SNIPPET_WIDTH`] is
/// narrowed around the middle of the match.
fn snippet(line: &str, chars: &[char], at: usize, len: usize) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() <= SNIPPET_WIDTH {
        return trimmed.to_owned();
    }

    let mut start = at.saturating_sub(SNIPPET_CONTEXT);
    let mut end = (at + len + SNIPPET_CONTEXT).min(chars.len());
    if end - start > SNIPPET_WIDTH {
        let center = at + len / 2;
        start = center.saturating_sub(SNIPPET_CONTEXT).max(start);
        end = (start + SNIPPET_WIDTH).min(end);
        start = end - SNIPPET_WIDTH;
    }

    let window: String = chars[start..end].iter().collect();
    let mut out = String::with_capacity(window.len() + 2 * ELLIPSIS.len());
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.push_str(window.trim());
    if end < chars.len() {
        out.push_str(ELLIPSIS);
    }
    out
}

/// Single-char lowercase mapping, so folded text keeps char positions.
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn fold_case(s: &str) -> Vec<char> {
    s.chars().map(fold_char).collect()
}

fn contains_folded(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Publishes search results with last-started-wins semantics.
///
/// Each run takes a new generation; when an older run finishes after a newer
/// one has started, its results are dropped instead of overwriting.
#[derive(Default)]
pub struct SearchCoordinator {
    generation: AtomicU64,
    latest: Mutex<Vec<SearchResult>>,
}

impl SearchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a search and returns its results if they became the current set.
    pub async fn run<F: FileSystem>(
        &self,
        fs: &F,
        term: &str,
        nodes: &[Node],
        options: &SearchOptions,
    ) -> Option<Vec<SearchResult>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let results = search(fs, term, nodes, options).await;

        let mut latest = self.latest.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(term, generation, "discarding results of superseded search");
            return None;
        }
        *latest = results.clone();
        Some(results)
    }

    pub async fn results(&self) -> Vec<SearchResult> {
        self.latest.lock().await.clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
