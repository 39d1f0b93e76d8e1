//! Cookie-string parsing for the CSRF token.
//!
//! The browser hands us the whole `document.cookie` string; the parser pulls
//! one named value out of it and percent-decodes it the way the server wrote
//! it.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Extract a named cookie value from a `document.cookie` string.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')) {
            return Some(percent_decode(value));
        }
    }
    None
}

/// Decode `%XX` escapes. Malformed escapes pass through untouched.
pub(crate) fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3).and_then(|pair| {
                let pair = std::str::from_utf8(pair).ok()?;
                u8::from_str_radix(pair, 16).ok()
            });
            if let Some(byte) = hex {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
