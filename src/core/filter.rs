use std::cmp::Ordering;
use std::collections::HashSet;

use anyhow::Context;
use regex::RegexSet;

use crate::models::FsEntry;

/// Build and dependency directories that never show up in a project tree.
pub const DEFAULT_IGNORE: &str = "node_modules|dist";

/// Pipe-separated names to hide, e.g. `node_modules|*.log|dist`.
///
/// Plain names are matched exactly; `*` and `?` segments become anchored
/// regexes compiled once into a single [`RegexSet`].
pub struct IgnorePatterns {
    names: HashSet<String>,
    globs: Option<RegexSet>,
}

impl IgnorePatterns {
    pub fn new(pattern: &str) -> anyhow::Result<Self> {
        let mut names = HashSet::new();
        let mut globs = Vec::new();

        for segment in pattern.split('|').map(str::trim) {
            if segment.is_empty() {
                continue;
            }
            if segment.contains(['*', '?']) {
                globs.push(glob_to_regex(segment));
            } else {
                names.insert(segment.to_owned());
            }
        }

        let globs = if globs.is_empty() {
            None
        } else {
            Some(RegexSet::new(&globs).with_context(|| format!("Invalid ignore pattern: {pattern}"))?)
        };

        Ok(Self { names, globs })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.names.contains(name)
            || self
                .globs
                .as_ref()
                .is_some_and(|globs| globs.is_match(name))
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() * 2 + 2);
    regex.push('^');

    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '\\' | '|' => {
                regex.push('\\');
                regex.push(c);
            }
            _ => regex.push(c),
        }
    }

    regex.push('$');
    regex
}

/// Decides which listed entries enter the tree and in what order.
pub struct EntryFilter {
    show_hidden: bool,
    ignored: Option<IgnorePatterns>,
}

impl EntryFilter {
    pub fn new(ignore_pattern: Option<&str>, show_hidden: bool) -> anyhow::Result<Self> {
        let ignored = ignore_pattern.map(IgnorePatterns::new).transpose()?;
        Ok(Self {
            show_hidden,
            ignored,
        })
    }

    pub fn allows(&self, entry: &FsEntry) -> bool {
        if !self.show_hidden && entry.is_hidden() {
            return false;
        }
        !self
            .ignored
            .as_ref()
            .is_some_and(|patterns| patterns.matches(&entry.name))
    }

    /// Drops excluded entries and sorts the rest: directories first, then by name.
    pub fn prepare(&self, entries: Vec<FsEntry>) -> Vec<FsEntry> {
        let mut kept: Vec<FsEntry> = entries.into_iter().filter(|e| self.allows(e)).collect();
        kept.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.cmp(&b.name),
        });
        kept
    }
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            show_hidden: false,
            ignored: IgnorePatterns::new(DEFAULT_IGNORE).ok(),
        }
    }
}
