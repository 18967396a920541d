/// Positional line diff used to preview a rewrite.
///
/// Lines are compared index by index, not aligned: equal lines are kept with
/// a two-space prefix, differing ones become `- old` / `+ new`, and an empty
/// side is left out.
pub fn line_diff(before: &str, after: &str) -> String {
    let before: Vec<&str> = before.split('\n').collect();
    let after: Vec<&str> = after.split('\n').collect();
    let rows = before.len().max(after.len());

    let mut out = Vec::with_capacity(rows);
    for i in 0..rows {
        let left = before.get(i).copied().unwrap_or("");
        let right = after.get(i).copied().unwrap_or("");
        if left == right {
            out.push(format!("  {left}"));
            continue;
        }
        if !left.is_empty() {
            out.push(format!("- {left}"));
        }
        if !right.is_empty() {
            out.push(format!("+ {right}"));
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_lines_keep_context_prefix() {
        assert_eq!(line_diff("a\nb", "a\nb"), "  a\n  b");
    }

    #[test]
    fn changed_line_shows_both_sides() {
        assert_eq!(line_diff("a\nb\nc", "a\nB\nc"), "  a\n- b\n+ B\n  c");
    }

    #[test]
    fn added_and_removed_tail_lines() {
        assert_eq!(line_diff("a", "a\nnew"), "  a\n+ new");
        assert_eq!(line_diff("a\nold", "a"), "  a\n- old");
    }
}
