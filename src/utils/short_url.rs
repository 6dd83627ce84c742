//! Building and taking apart short URLs.

use url::Url;

use crate::error::AppError;

/// Formats the public short URL for `code`.
pub fn build_short_url(domain: &str, code: &str) -> String {
    format!("http://{}/{}", domain.trim_end_matches('/'), code)
}

/// Pulls the short code out of a parsed short URL.
///
/// The path must be a single separator followed by at most `max_code_length`
/// characters, with no query and no fragment. An empty code is passed through
/// so the codec can reject it.
///
/// # Errors
///
/// Returns [`AppError::MalformedShortUrl`] when the URL does not have that shape.
pub fn extract_code(url: &Url, max_code_length: usize) -> Result<&str, AppError> {
    let malformed = |reason: String| AppError::MalformedShortUrl {
        url: url.as_str().to_owned(),
        reason,
    };

    if url.query().is_some() {
        return Err(malformed("short URL must not have a query string".into()));
    }
    if url.fragment().is_some() {
        return Err(malformed("short URL must not have a fragment".into()));
    }

    let Some(code) = url.path().strip_prefix('/') else {
        return Err(malformed("short URL has no path".into()));
    };
    if code.contains('/') {
        return Err(malformed("short URL path must be a single segment".into()));
    }

    let length = code.chars().count();
    if length > max_code_length {
        return Err(malformed(format!(
            "short code has {length} characters, at most {max_code_length} allowed"
        )));
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn assert_malformed(s: &str) {
        let url = parse(s);
        assert!(
            matches!(extract_code(&url, 6), Err(AppError::MalformedShortUrl { .. })),
            "{s} should be malformed"
        );
    }

    #[test]
    fn test_build_short_url() {
        assert_eq!(build_short_url("sho.rt", "ms34n2"), "http://sho.rt/ms34n2");
        assert_eq!(build_short_url("sho.rt/", "ms34n2"), "http://sho.rt/ms34n2");
    }

    #[test]
    fn test_extracts_single_segment() {
        let url = parse("http://sho.rt/ms34n2");
        assert_eq!(extract_code(&url, 6).unwrap(), "ms34n2");

        let url = parse("https://elsewhere.example/abc");
        assert_eq!(extract_code(&url, 6).unwrap(), "abc");
    }

    #[test]
    fn test_empty_code_is_passed_through() {
        assert_eq!(extract_code(&parse("http://sho.rt"), 6).unwrap(), "");
        assert_eq!(extract_code(&parse("http://sho.rt/"), 6).unwrap(), "");
    }

    #[test]
    fn test_rejects_query_and_fragment() {
        assert_malformed("http://sho.rt/ms34n2?x=1");
        assert_malformed("http://sho.rt/ms34n2?");
        assert_malformed("http://sho.rt/ms34n2#top");
        assert_malformed("http://sho.rt/ms34n2#");
    }

    #[test]
    fn test_rejects_extra_segments() {
        assert_malformed("http://sho.rt/ms34n2/");
        assert_malformed("http://sho.rt/a/b");
    }

    #[test]
    fn test_rejects_long_codes() {
        assert_malformed("http://sho.rt/ms34n2m");

        let url = parse("http://sho.rt/ms34n2m");
        assert_eq!(extract_code(&url, 7).unwrap(), "ms34n2m");
    }
}
