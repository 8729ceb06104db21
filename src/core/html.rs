// src/core/html.rs
//
// Minimal HTML scanning. No DOM: athletics pages are walked as flat text,
// matching tag blocks and attributes by pattern. Nested same-name tags are
// not balanced — first close wins.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// One matched `<tag …>…</tag>` block. Byte offsets into the source:
/// `start..end` spans the whole block, `open_end` is just past the open
/// tag's '>', `inner_end` is where the close tag begins.
#[derive(Debug, Clone, Copy)]
pub struct TagBlock {
    pub start: usize,
    pub open_end: usize,
    pub inner_end: usize,
    pub end: usize,
}

/// Next `<tag …>…</tag>` at or after `from`, case-insensitive.
/// Tag-name boundary is checked, so `a` won't match `<abbr>`.
pub fn next_tag_block_ci(s: &str, tag: &str, from: usize) -> Option<TagBlock> {
    let lc = to_lower(s);
    let tl = to_lower(tag);
    let open_pat = join!("<", &tl);
    let close_pat = join!("</", &tl, ">");

    let mut at = from;
    loop {
        let rel = lc.get(at..)?.find(&open_pat)?;
        let start = at + rel;
        let after = start + open_pat.len();

        // Reject partial tag-name matches ("<td" inside "<tdata").
        if let Some(b) = lc.as_bytes().get(after) {
            if b.is_ascii_alphanumeric() || *b == b'-' {
                at = start + 1;
                continue;
            }
        } else {
            return None;
        }

        let open_end = s[start..].find('>')? + start + 1;
        let close_rel = lc[open_end..].find(&close_pat)?;
        let inner_end = open_end + close_rel;
        let end = inner_end + close_pat.len();
        return Some(TagBlock { start, open_end, inner_end, end });
    }
}

/// The raw open tag, `<div class="x">` included.
pub fn open_tag<'a>(s: &'a str, b: &TagBlock) -> &'a str {
    &s[b.start..b.open_end]
}

/// Content between the open and close tags.
pub fn inner<'a>(s: &'a str, b: &TagBlock) -> &'a str {
    &s[b.open_end..b.inner_end]
}

/// Visible text of a block: entities normalized, tags stripped, ws collapsed.
pub fn text(s: &str, b: &TagBlock) -> String {
    strip_tags(normalize_entities(inner(s, b)))
}

/// Value of `attr` inside an open tag. Handles quoted and bare values;
/// None for absent or valueless attributes.
pub fn tag_attr(open: &str, attr: &str) -> Option<String> {
    let lc = to_lower(open);
    let pat = to_lower(attr);
    let bytes = open.as_bytes();

    let mut at = 0usize;
    while let Some(rel) = lc.get(at..)?.find(&pat) {
        let i = at + rel;
        at = i + pat.len();

        // Attribute name must stand alone: ws before, then optional ws and '='.
        let pre_ok = i > 0 && bytes[i - 1].is_ascii_whitespace();
        let mut j = i + pat.len();
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if !pre_ok || bytes.get(j) != Some(&b'=') {
            continue;
        }
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }

        let val = match bytes.get(j) {
            Some(&q) if q == b'"' || q == b'\'' => {
                let rest = &open[j + 1..];
                let endq = rest.find(q as char)?;
                &rest[..endq]
            }
            Some(_) => {
                let rest = &open[j..];
                let end = rest
                    .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
                    .unwrap_or(rest.len());
                &rest[..end]
            }
            None => return None,
        };
        return Some(val.to_string());
    }
    None
}

/// True if `attr`'s value contains `needle`, case-insensitive.
pub fn attr_contains_ci(open: &str, attr: &str, needle: &str) -> bool {
    tag_attr(open, attr)
        .map(|v| to_lower(&v).contains(&to_lower(needle)))
        .unwrap_or(false)
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}
