//! Cookie header utilities

/// Format cookie name/value pairs into a `Cookie` header string
#[must_use]
pub fn format_cookie(cookies: &[(String, String)]) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a `Cookie` header string into name/value pairs, keeping their order
#[must_use]
pub fn parse_cookie(cookie_header: &str) -> Vec<(String, String)> {
    cookie_header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Merges `additions` into the cookies of `existing` by name.
///
/// A cookie already present keeps its position and takes the new value;
/// others are appended. Merging the same additions twice is a no-op.
#[must_use]
pub fn merge_cookies(existing: &str, additions: &[(String, String)]) -> String {
    let mut cookies = parse_cookie(existing);

    for (name, value) in additions {
        match cookies.iter_mut().find(|(current, _)| current == name) {
            Some(entry) => entry.1.clone_from(value),
            None => cookies.push((name.clone(), value.clone())),
        }
    }

    format_cookie(&cookies)
}

/// Validate cookie name and value according to RFC 6265
///
/// # Errors
///
/// Returns an error message as a `String` if validation fails:
/// - If the cookie name is empty
/// - If the cookie name contains control characters or RFC 6265 separator characters: `(),/<>@[\\]{}`
/// - If the cookie value contains control characters (except tab character)
pub fn validate_cookie(name: &str, value: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Cookie name cannot be empty".to_string());
    }

    for ch in name.chars() {
        if ch.is_control() || "(),/<>@[\\]{}".contains(ch) {
            return Err(format!("Invalid character '{ch}' in cookie name"));
        }
    }

    for ch in value.chars() {
        if ch.is_control() && ch != '\t' {
            return Err(format!("Invalid character '{ch}' in cookie value"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn parse_keeps_order_and_skips_garbage() {
        assert_eq!(
            parse_cookie("b=2; a=1;; novalue; =x"),
            pairs(&[("b", "2"), ("a", "1")])
        );
    }

    #[test]
    fn merge_replaces_by_name_and_appends_new() {
        let merged = merge_cookies("a=1; b=2", &pairs(&[("b", "3"), ("c", "4")]));
        assert_eq!(merged, "a=1; b=3; c=4");
    }

    #[test]
    fn merge_is_idempotent() {
        let additions = pairs(&[("session", "abc")]);
        let once = merge_cookies("theme=dark", &additions);
        let twice = merge_cookies(&once, &additions);
        assert_eq!(once, twice);
    }

    #[test]
    fn validation_rejects_separators_in_names() {
        assert!(validate_cookie("ok", "value").is_ok());
        assert!(validate_cookie("", "value").is_err());
        assert!(validate_cookie("a,b", "value").is_err());
        assert!(validate_cookie("a", "line\nbreak").is_err());
    }
}
