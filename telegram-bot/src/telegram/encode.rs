//! Percent-encoding of text for URL query parameters.

/// Percent-encodes `text` for use as a query parameter value.
///
/// Every byte outside the unreserved set (`A-Z a-z 0-9 - . _ ~`) becomes `%XX` of its UTF-8
/// encoding. Empty input yields an empty string.
pub fn encode_text(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}
