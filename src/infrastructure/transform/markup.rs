//! Markup minifier for HTML, SVG and XML
//!
//! Conservative: it only removes things that cannot change how a document
//! renders.
//! - `<!-- ... -->` comments, except conditional comments (`<!--[if ...]>`)
//! - runs of whitespace between tags, which shrink to a single space so
//!   inline siblings such as `<a>One</a> <a>Two</a>` stay apart
//! - whitespace before the first tag and after the last one
//!
//! Tags, attribute values, CDATA sections and the bodies of `pre`, `textarea`,
//! `script` and `style` are copied unchanged.

/// Elements whose content is copied byte for byte
const RAW_TEXT_ELEMENTS: [&str; 4] = ["pre", "textarea", "script", "style"];

pub fn minify(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    // Whitespace seen since the last output, written only if more output follows
    let mut gap = false;

    while !rest.is_empty() {
        if rest.starts_with("<!--") {
            let end = rest[4..]
                .find("-->")
                .map(|i| 4 + i + 3)
                .ok_or_else(|| "unterminated comment".to_string())?;
            if rest[4..].starts_with('[') {
                flush_gap(&mut out, &mut gap);
                out.push_str(&rest[..end]);
            }
            rest = &rest[end..];
        } else if rest.starts_with("<![CDATA[") {
            let end = rest
                .find("]]>")
                .map(|i| i + 3)
                .ok_or_else(|| "unterminated CDATA section".to_string())?;
            flush_gap(&mut out, &mut gap);
            out.push_str(&rest[..end]);
            rest = &rest[end..];
        } else if rest.starts_with('<') {
            let end = tag_end(rest).unwrap_or(rest.len());
            let tag = &rest[..end];
            flush_gap(&mut out, &mut gap);
            out.push_str(tag);
            rest = &rest[end..];

            if let Some(name) = raw_text_element(tag) {
                let close = format!("</{name}");
                let body_end = find_ignore_case(rest, &close).unwrap_or(rest.len());
                out.push_str(&rest[..body_end]);
                rest = &rest[body_end..];
            }
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            let text = &rest[..end];
            if !text.trim().is_empty() {
                flush_gap(&mut out, &mut gap);
                out.push_str(text);
            } else if !out.is_empty() {
                gap = true;
            }
            rest = &rest[end..];
        }
    }

    Ok(out)
}

fn flush_gap(out: &mut String, gap: &mut bool) {
    if std::mem::take(gap) {
        out.push(' ');
    }
}

/// Byte offset just past the `>` closing the tag at the start of `s`.
/// `>` inside quoted attribute values does not count.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i + 1),
            (None, _) => {}
        }
    }
    None
}

/// Name of the raw-text element this tag opens, if it opens one
fn raw_text_element(tag: &str) -> Option<&'static str> {
    let inner = tag.strip_prefix('<')?;
    if inner.starts_with(['/', '!', '?']) || tag.ends_with("/>") {
        return None;
    }
    let name_len = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
        .unwrap_or(inner.len());
    let name = &inner[..name_len];
    RAW_TEXT_ELEMENTS
        .into_iter()
        .find(|raw| raw.eq_ignore_ascii_case(name))
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}
