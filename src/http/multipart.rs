//! Lenient field lookup in `multipart/form-data` bodies.
//!
//! This is not a MIME parser. Boundaries and part headers are never
//! interpreted; a field is found by searching for
//! `name="<field>"` followed by a blank line (`\r\n\r\n`) and taking the
//! characters up to the next `\r`, `\n` or `-`.
//!
//! Anything unexpected (invalid UTF-8, missing field, empty value) yields
//! `None`, never an error. The mock must not reject a request because of
//! its body.
//!
//! Known limitations, kept on purpose because game clients depend on the
//! exact behavior:
//! - a value containing `-` is cut at the first `-`
//! - a value folded over several lines is cut at the first line break

/// Characters that end a captured value.
const VALUE_TERMINATORS: [char; 3] = ['\r', '\n', '-'];

/// A named field pulled out of a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedField {
    pub name: String,
    pub value: Option<String>,
}

impl ExtractedField {
    /// Look up `name` in `body`.
    pub fn from_body(body: &[u8], name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: extract_field(body, name),
        }
    }

    /// The value, or `"unknown"` when it could not be extracted.
    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or("unknown")
    }
}

/// Extract the value of `field_name` from a multipart body.
pub fn extract_field(body: &[u8], field_name: &str) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?;
    let marker = format!("name=\"{field_name}\"\r\n\r\n");

    text.match_indices(&marker).find_map(|(start, _)| {
        let rest = &text[start + marker.len()..];
        let end = rest.find(&VALUE_TERMINATORS[..]).unwrap_or(rest.len());
        // An empty run does not count as a match; keep searching.
        (end > 0).then(|| rest[..end].trim().to_string())
    })
}
