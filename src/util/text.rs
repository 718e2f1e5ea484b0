// src/util/text.rs

/// One-line preview of note content.
///
/// Takes the first non-empty line, trims it, and cuts it to `max_chars`
/// characters, marking the cut with an ellipsis.
///
/// # Examples
///
/// ```
/// use notehub::util::text::preview;
///
/// assert_eq!(preview("\n  Buy milk  \nand bread", 20), "Buy milk");
/// assert_eq!(preview("abcdefgh", 5), "abcd…");
/// ```
pub fn preview(content: &str, max_chars: usize) -> String {
    let line = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    if max_chars == 0 {
        return String::new();
    }
    if line.chars().count() <= max_chars {
        return line.to_string();
    }

    let mut cut: String = line.chars().take(max_chars - 1).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}
