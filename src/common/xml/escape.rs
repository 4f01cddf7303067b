use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static MARKUP_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build markup escaper")
});

/// Escape markup special characters in text destined for HTML output.
///
/// # Examples
///
/// ```
/// use sheetgrid::common::xml::escape_markup;
/// assert_eq!(escape_markup("a & b"), "a &amp; b");
/// assert_eq!(escape_markup("<b>'x'</b>"), "&lt;b&gt;&#39;x&#39;&lt;/b&gt;");
/// ```
#[inline]
pub fn escape_markup(s: &str) -> String {
    MARKUP_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"])
}

/// Remove anything that looks like a markup tag (`<...>`).
///
/// Rich-text runs occasionally carry tag fragments in their raw text; these
/// are dropped. An unterminated `<` is kept verbatim.
pub fn strip_tags(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;

    while let Some(open) = memchr::memchr(b'<', &bytes[pos..]) {
        let open = pos + open;
        // `[^>]+` requires at least one byte between the brackets
        match memchr::memchr(b'>', &bytes[open + 1..]) {
            Some(close) if close > 0 => {
                out.push_str(&s[pos..open]);
                pos = open + 1 + close + 1;
            },
            Some(_) => {
                out.push_str(&s[pos..open + 1]);
                pos = open + 1;
            },
            None => break,
        }
    }
    out.push_str(&s[pos..]);
    out
}
