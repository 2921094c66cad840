//! Inline scanning of a span's own text: the `var / concept` head and the
//! `:role value` pairs that are not bracketed.

use crate::model::WikiTitle;

/// `variable / concept` at the start of a span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    pub variable: String,
    pub concept: String,
}

/// One inline `:role value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Role with its colon.
    pub role: String,
    /// Value token; quoted values keep their quotes.
    pub value: String,
    /// Byte offset of the role in the block body.
    pub offset: usize,
}

impl Attribute {
    pub fn is_quoted(&self) -> bool {
        self.value.starts_with('"')
    }

    /// Value without surrounding quotes.
    pub fn unquoted(&self) -> &str {
        self.value.trim_matches('"')
    }
}

/// Read the head of a span, if it has one.
pub fn head(text: &str) -> Option<Head> {
    let caps = regex!(r#"^\(\s*([^\s()/:"]+)\s*/\s*([^\s()]+)"#).captures(text)?;
    Some(Head { variable: caps[1].to_string(), concept: caps[2].to_string() })
}

/// Scan every `:role value` pair in `text`, whose first byte sits at `base`
/// in the block body.
///
/// A role is a `:`-prefixed token starting a word; its value is the next
/// token, read whole through the closing quote when quoted and cut at any
/// parenthesis otherwise. Roles without a value are ignored.
pub fn scan(text: &str, base: usize) -> Vec<Attribute> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let at = |k: usize| chars.get(k).map_or(text.len(), |&(p, _)| p);
    let mut attributes = Vec::new();
    let mut k = 0;

    while k < chars.len() {
        match chars[k].1 {
            '"' => k = skip_quoted(&chars, k),
            ':' if k == 0 || is_boundary(chars[k - 1].1) => {
                let role_start = k;
                while k < chars.len() && !is_boundary(chars[k].1) && chars[k].1 != ')' {
                    k += 1;
                }
                let role = &text[at(role_start)..at(k)];
                while k < chars.len() && chars[k].1.is_whitespace() {
                    k += 1;
                }
                let value_start = k;
                if k < chars.len() && chars[k].1 == '"' {
                    k = skip_quoted(&chars, k);
                } else {
                    while k < chars.len() && !is_boundary(chars[k].1) && chars[k].1 != ')' {
                        k += 1;
                    }
                }
                let value = &text[at(value_start)..at(k)];
                if role.len() > 1 && !value.is_empty() {
                    attributes.push(Attribute {
                        role: role.to_string(),
                        value: value.to_string(),
                        offset: base + at(role_start),
                    });
                }
            }
            _ => k += 1,
        }
    }

    attributes
}

/// `:polarity -` among the attributes.
pub fn has_negative_polarity(attributes: &[Attribute]) -> bool {
    attributes.iter().any(|a| a.role == ":polarity" && a.value == "-")
}

/// Space-joined quoted `:opN` values, `None` when there are none.
pub fn quoted_name(attributes: &[Attribute]) -> Option<String> {
    let parts: Vec<&str> = attributes
        .iter()
        .filter(|a| a.is_quoted() && regex!(r"^:op\d+$").is_match(&a.role))
        .map(Attribute::unquoted)
        .collect();
    if parts.is_empty() { None } else { Some(parts.join(" ")) }
}

/// Wiki state from the first `:wiki` attribute.
pub fn wiki_title(attributes: &[Attribute]) -> WikiTitle {
    match attributes.iter().find(|a| a.role == ":wiki") {
        None => WikiTitle::Absent,
        Some(a) if a.value == "-" => WikiTitle::Unlinked,
        Some(a) => WikiTitle::Title(a.unquoted().to_string()),
    }
}

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || c == '('
}

/// Char index just past the quote closing the one at `open`, or the end of input.
fn skip_quoted(chars: &[(usize, char)], open: usize) -> usize {
    match chars[open + 1..].iter().position(|&(_, c)| c == '"') {
        Some(rel) => open + rel + 2,
        None => chars.len(),
    }
}
