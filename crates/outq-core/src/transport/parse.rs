//! Parse raw response header lines collected from libcurl.

use super::Headers;

/// Parse collected header lines into a status code and header map.
///
/// Redirects produce several header blocks; each `HTTP/` status line starts a
/// new block so only the final response's headers are kept.
pub(crate) fn parse_headers(lines: &[String]) -> (Option<u16>, Headers) {
    let mut status = None;
    let mut headers = Headers::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            status = line
                .split_whitespace()
                .nth(1)
                .and_then(|code| code.parse::<u16>().ok());
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    (status, headers)
}
