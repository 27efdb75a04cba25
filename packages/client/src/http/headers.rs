//! Header helpers - using standard http crate types

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{self, Error};

/// Parses a header name, reporting invalid names as configuration errors.
pub fn create_header_name(name: &str) -> Result<HeaderName, Error> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| error::invalid_header(e, name))
}

/// Parses a header value, reporting invalid values as configuration errors.
pub fn create_header_value(name: &str, value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|e| error::invalid_header(e, name))
}

/// Builds a `HeaderMap` from name/value pairs, keeping repeated names as
/// separate values.
pub fn header_map(pairs: &[(&str, &str)]) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::with_capacity(pairs.len());

    for (name, value) in pairs {
        let header_name = create_header_name(name)?;
        let header_value = create_header_value(name, value)?;
        headers.append(header_name, header_value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_map_keeps_repeated_names() {
        let headers = header_map(&[("Accept", "text/html"), ("accept", "application/json")])
            .expect("valid headers");
        let values: Vec<_> = headers.get_all("ACCEPT").iter().collect();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn invalid_header_name_is_configuration_error() {
        let err = header_map(&[("bad header", "x")]).expect_err("space is not a token char");
        assert!(err.is_configuration());
        assert!(err.to_string().contains("bad header"));
    }
}
