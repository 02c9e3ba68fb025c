//! Excerpts: short plain-text teasers cut from article bodies.

use regex::Regex;
use std::sync::LazyLock;

/// Default teaser length, sized for a meta description.
pub const DEFAULT_EXCERPT_LEN: usize = 160;

static HEADERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#{1,6}\s+").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static LINKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\(.*?\)").unwrap());
static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

/// Cut a teaser of at most `max_length` chars from `content`.
///
/// Markdown decoration (headers, bold, italic, links) and HTML tags are
/// stripped first and newlines collapse to spaces. If the cleaned text is
/// longer than the limit, the cut prefers the last sentence boundary past
/// 70% of the limit; failing that it cuts at the last word boundary and
/// appends `...`. The ellipsis is budgeted inside the limit, so the output
/// never exceeds `max_length`.
pub fn excerpt(content: &str, max_length: usize) -> String {
    let cleaned = HEADERS.replace_all(content, "");
    let cleaned = BOLD.replace_all(&cleaned, "$1");
    let cleaned = ITALIC.replace_all(&cleaned, "$1");
    let cleaned = LINKS.replace_all(&cleaned, "$1");
    let cleaned = TAGS.replace_all(&cleaned, "");
    let cleaned = NEWLINES.replace_all(&cleaned, " ");
    let cleaned = cleaned.trim();

    let chars: Vec<char> = cleaned.chars().collect();
    if chars.len() <= max_length {
        return cleaned.to_string();
    }

    // Too small a budget to fit an ellipsis; hard cut.
    if max_length < 4 {
        return chars[..max_length].iter().collect();
    }

    let truncated = &chars[..max_length];
    if let Some(pos) = truncated.iter().rposition(|&c| c == '.')
        && (pos as f64) > max_length as f64 * 0.7
    {
        return truncated[..=pos].iter().collect();
    }

    let head = &chars[..max_length - 3];
    let cut = head.iter().rposition(|&c| c == ' ').filter(|&pos| pos > 0);
    let mut out: String = match cut {
        Some(pos) => head[..pos].iter().collect(),
        None => head.iter().collect(),
    };
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn short_content_passes_through() {
        assert_eq!(excerpt("A short teaser.", 160), "A short teaser.");
    }

    #[test]
    fn markdown_and_html_are_stripped() {
        let content = "## Heading\n\nSome **bold** and *italic* text with a \
                       [link](https://example.com) and <em>markup</em>.";
        assert_eq!(
            excerpt(content, 160),
            "Heading Some bold and italic text with a link and markup."
        );
    }

    #[test]
    fn cuts_at_a_sentence_boundary_when_one_is_late_enough() {
        let content = "First sentence here. Second sentence is much longer and keeps going.";
        let out = excerpt(content, 26);
        // The last period inside the first 26 chars sits past 70% of the limit.
        assert_eq!(out, "First sentence here.");
    }

    #[test]
    fn falls_back_to_a_word_boundary_with_ellipsis() {
        let content = "word another word and then some more words follow here";
        let out = excerpt(content, 20);
        assert!(out.ends_with("..."));
        assert!(!out[..out.len() - 3].ends_with(' '));
    }

    #[test]
    fn hard_cuts_unbroken_text() {
        let content = "a".repeat(300);
        let out = excerpt(&content, 20);
        assert_eq!(out.chars().count(), 20);
        assert!(out.ends_with("..."));
    }

    #[rstest]
    #[case(10)]
    #[case(40)]
    #[case(160)]
    #[case(3)]
    #[case(0)]
    fn never_exceeds_the_requested_length(#[case] max_length: usize) {
        let contents = [
            "Short.",
            "One sentence that will not fit. Another one after it for good measure.",
            "unbrokenunbrokenunbrokenunbrokenunbrokenunbroken",
            "## Toute l'actualité\n\nDu **contenu** en français, avec des accents élégants répétés partout.",
        ];
        for content in contents {
            let out = excerpt(content, max_length);
            assert!(
                out.chars().count() <= max_length,
                "excerpt too long for {content:?} at {max_length}"
            );
        }
    }
}
