//! SEO slugs from article titles.

/// Slugs are capped at 100 chars, cutting mid-word if needed.
const MAX_SLUG_LEN: usize = 100;

/// Fold an accented Latin letter to its base letter.
///
/// Covers the letters French article titles actually contain. Anything else
/// outside `[a-z0-9 -]` is dropped by the caller, so a character missing
/// here disappears from the slug rather than corrupting it.
fn fold_accent(c: char) -> Option<char> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(folded)
}

/// Build a URL slug from a title.
///
/// Lowercases, strips accents, drops everything outside `[a-z0-9 -]`,
/// collapses whitespace/hyphen runs to single hyphens, trims hyphens at the
/// ends, and caps the result at 100 chars (re-trimming any hyphen the cut
/// exposes). Applying it twice gives the same output.
pub fn slug(title: &str) -> String {
    let mut cleaned = String::with_capacity(title.len());
    for c in title.trim().to_lowercase().chars() {
        let c = fold_accent(c).unwrap_or(c);
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c.is_whitespace() {
            cleaned.push(c);
        }
    }

    // Runs of whitespace and hyphens become a single hyphen; separators at
    // either end vanish.
    let mut out = String::with_capacity(cleaned.len());
    let mut pending_hyphen = false;
    for c in cleaned.chars() {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = !out.is_empty();
        } else {
            if pending_hyphen {
                out.push('-');
                pending_hyphen = false;
            }
            out.push(c);
        }
    }

    // Everything left is ASCII, so the byte cap is a char cap.
    out.truncate(MAX_SLUG_LEN);
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Build a slug that is absent from `existing`, appending `-1`, `-2`, ...
/// after the first collision.
pub fn unique_slug(title: &str, existing: &[String]) -> String {
    let base = slug(title);
    if !existing.iter().any(|s| *s == base) {
        return base;
    }

    let mut counter = 1u32;
    loop {
        let candidate = format!("{base}-{counter}");
        if !existing.iter().any(|s| *s == candidate) {
            return candidate;
        }
        counter += 1;
    }
}
