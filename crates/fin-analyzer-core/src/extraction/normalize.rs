/// Split text on every line boundary a document text layer may contain:
/// `\n`, `\r\n`, `\r`, vertical tab, form feed (page breaks), the file/group/
/// record separators, NEL and the Unicode line/paragraph separators.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_boundary(ch) {
            continue;
        }
        lines.push(&text[start..idx]);
        let mut end = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next_idx, '\n')) = chars.peek() {
                chars.next();
                end = next_idx + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_boundary(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Trim every line and drop the blank ones.
pub fn normalize_text(text: &str) -> String {
    split_lines(text)
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize each page and join the non-empty ones with a blank line.
pub fn normalize_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| normalize_text(page.as_ref()))
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_lines_mixed_endings() {
        let lines = split_lines("a\r\nb\rc\nd\u{0c}e");
        assert_eq!(lines, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_split_lines_trailing_newline_has_no_empty_tail() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_normalize_text_trims_and_drops_blanks() {
        let text = "  Revenue: 10  \n\n   \n\tEquity: 5\n";
        assert_eq!(normalize_text(text), "Revenue: 10\nEquity: 5");
    }

    #[test]
    fn test_normalize_pages_skips_empty_pages() {
        let pages = ["Total Assets: 1,000\n", "   \n", " Equity: 400 "];
        assert_eq!(normalize_pages(&pages), "Total Assets: 1,000\n\nEquity: 400");
    }
}
