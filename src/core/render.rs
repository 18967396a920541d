use std::io::{self, Write};

use crate::models::{MatchType, Node, NodeKind, SearchResult};

/// Writes the flat list, two spaces of indent per level.
///
/// Directories get a `+` (collapsed) or `-` (expanded) marker and a trailing
/// slash; files are aligned under them.
pub fn write_nodes<W: Write>(writer: &mut W, nodes: &[Node]) -> io::Result<()> {
    for node in nodes {
        for _ in 0..node.depth {
            writer.write_all(b"  ")?;
        }

        match &node.kind {
            NodeKind::Directory(state) => {
                let marker = if state.expanded { "- " } else { "+ " };
                writeln!(writer, "{marker}{}/", node.name)?;
            }
            NodeKind::File => writeln!(writer, "  {}", node.name)?,
        }
    }

    Ok(())
}

/// Writes one line per result: `path` for name hits, `path:line  snippet`
/// for content hits.
pub fn write_results<W: Write>(writer: &mut W, results: &[SearchResult]) -> io::Result<()> {
    for result in results {
        match result.match_type {
            MatchType::Name => {
                writeln!(writer, "{}  ({})", result.node.path, result.snippet)?;
            }
            MatchType::Content => {
                writeln!(
                    writer,
                    "{}:{}  {}",
                    result.node.path, result.jump_to_line, result.snippet
                )?;
            }
        }
    }

    Ok(())
}
