//! HTTP cookie storage
//!
//! The [`CookieJar`] contract used by the cookie subscriber, the default
//! [`Jar`] built on `cookie_store`, and `Cookie` header utilities.

pub mod core;
pub mod utils;

pub use self::core::{Cookie, CookieJar, Jar};

pub use utils::{format_cookie, merge_cookies, parse_cookie, validate_cookie};
