use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the AI backend is asked to do with a piece of code.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Explain,
    Comment,
    Document,
    Rewrite,
    Test,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Explain,
        Operation::Comment,
        Operation::Document,
        Operation::Rewrite,
        Operation::Test,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Explain => "explain",
            Operation::Comment => "comment",
            Operation::Document => "document",
            Operation::Rewrite => "rewrite",
            Operation::Test => "test",
        }
    }

    /// Explain, comment and rewrite act on the selection only.
    pub fn requires_selection(self) -> bool {
        match self {
            Operation::Explain | Operation::Comment | Operation::Rewrite => true,
            Operation::Document | Operation::Test => false,
        }
    }

    /// Heading for the result panel.
    pub fn title(self) -> &'static str {
        match self {
            Operation::Explain => "AI Explanation",
            Operation::Comment => "Generated Comment",
            Operation::Document => "AI Documentation",
            Operation::Rewrite => "Rewrite Preview",
            Operation::Test => "Test Draft",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown operation: {s}"))
    }
}
