//! Header manipulation utilities for redirects

use http::header::{AUTHORIZATION, COOKIE, PROXY_AUTHORIZATION, WWW_AUTHENTICATE};
use http::{HeaderMap, HeaderValue};
use url::Url;

/// Remove sensitive headers when redirecting across different hosts/ports
pub(crate) fn remove_sensitive_headers(headers: &mut HeaderMap, next: &Url, previous: &[Url]) {
    if let Some(previous) = previous.last() {
        let cross_host = next.host_str() != previous.host_str()
            || next.port_or_known_default() != previous.port_or_known_default();
        if cross_host {
            headers.remove(AUTHORIZATION);
            headers.remove(COOKIE);
            headers.remove("cookie2");
            headers.remove(PROXY_AUTHORIZATION);
            headers.remove(WWW_AUTHENTICATE);
        }
    }
}

/// Create a referer header value from previous URL, handling HTTPS->HTTP downgrade
pub(crate) fn make_referer(next: &Url, previous: &Url) -> Option<HeaderValue> {
    if next.scheme() == "http" && previous.scheme() == "https" {
        return None;
    }

    let mut referer = previous.clone();
    let _ = referer.set_username("");
    let _ = referer.set_password(None);
    referer.set_fragment(None);
    referer.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).expect("test URL should parse")
    }

    fn credentials() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        headers.insert(COOKIE, HeaderValue::from_static("session=1"));
        headers.insert("accept", HeaderValue::from_static("*/*"));
        headers
    }

    #[test]
    fn same_host_keeps_credentials() {
        let mut headers = credentials();
        remove_sensitive_headers(&mut headers, &url("http://a.test/next"), &[url("http://a.test/start")]);
        assert!(headers.contains_key(AUTHORIZATION));
        assert!(headers.contains_key(COOKIE));
    }

    #[test]
    fn cross_host_or_port_strips_credentials() {
        let mut headers = credentials();
        remove_sensitive_headers(&mut headers, &url("http://b.test/"), &[url("http://a.test/")]);
        assert!(!headers.contains_key(AUTHORIZATION));
        assert!(!headers.contains_key(COOKIE));
        assert!(headers.contains_key("accept"));

        let mut headers = credentials();
        remove_sensitive_headers(&mut headers, &url("http://a.test:8080/"), &[url("http://a.test/")]);
        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn referer_hides_credentials_and_is_skipped_on_downgrade() {
        let referer = make_referer(&url("https://a.test/next"), &url("https://user:pw@a.test/start#frag"));
        assert_eq!(referer, Some(HeaderValue::from_static("https://a.test/start")));

        assert_eq!(make_referer(&url("http://a.test/"), &url("https://a.test/")), None);
    }
}
