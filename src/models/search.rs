use super::Node;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchType {
    Name,
    Content,
}

/// One hit produced by [`crate::core::search::search`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchResult {
    pub node: Node,
    pub match_type: MatchType,
    /// 0 for a file name hit, otherwise the 1-based line number.
    pub jump_to_line: usize,
    pub snippet: String,
}
