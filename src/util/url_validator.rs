use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// Errors from validating the catalog API base URL.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// Plain http to a host that is not loopback.
    #[error("HTTPS required for {0} (plain http is only allowed for localhost)")]
    InsecureScheme(String),
    #[error("URL has no host")]
    MissingHost,
}

/// Validates the base URL the catalog client talks to.
///
/// Accepts `https://` for any host, and `http://` only for loopback hosts
/// (`localhost`, `127.0.0.1`, `::1`) so local mock servers work.
///
/// # Examples
///
/// ```
/// use storefront::util::validate_base_url;
///
/// assert!(validate_base_url("https://dummyjson.com").is_ok());
/// assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
/// assert!(validate_base_url("http://shop.example.com").is_err());
/// assert!(validate_base_url("file:///etc/passwd").is_err());
/// ```
pub fn validate_base_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    let host = url
        .host_str()
        .ok_or(UrlValidationError::MissingHost)?
        .to_owned();

    match url.scheme() {
        "https" => {}
        "http" if is_loopback_host(&host) => {
            tracing::warn!(host = %host, "Using plain http catalog URL (loopback only)");
        }
        "http" => return Err(UrlValidationError::InsecureScheme(host)),
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    Ok(url)
}

fn is_loopback_host(host: &str) -> bool {
    if host == "localhost" {
        return true;
    }

    // Strip brackets from IPv6 addresses for parsing
    let host_for_parse = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    host_for_parse
        .parse::<IpAddr>()
        .map(|ip| ip.is_loopback())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_accepted() {
        let url = validate_base_url("https://dummyjson.com").unwrap();
        assert_eq!(url.host_str(), Some("dummyjson.com"));
        assert!(validate_base_url("https://api.example.com:8443/v2").is_ok());
    }

    #[test]
    fn test_http_loopback_accepted() {
        assert!(validate_base_url("http://localhost:3000").is_ok());
        assert!(validate_base_url("http://127.0.0.1:54321").is_ok());
        assert!(validate_base_url("http://[::1]:8080").is_ok());
    }

    #[test]
    fn test_http_remote_rejected() {
        let err = validate_base_url("http://shop.example.com").unwrap_err();
        assert!(matches!(err, UrlValidationError::InsecureScheme(_)));
        assert!(validate_base_url("http://192.168.1.10").is_err());
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert!(matches!(
            validate_base_url("ftp://example.com"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(validate_base_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            validate_base_url("not a url"),
            Err(UrlValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert!(validate_base_url("  https://dummyjson.com  ").is_ok());
    }
}
