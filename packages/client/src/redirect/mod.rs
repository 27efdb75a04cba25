//! Redirect Handling
//!
//! Redirects are followed by [`crate::subscriber::RedirectSubscriber`],
//! which has a maximum redirect chain of 10 hops by default. To customize
//! this behavior, pass a `redirect::Policy` to the subscriber.

mod attempt;
mod headers;
mod policy;

pub(crate) use attempt::ActionKind;
pub use attempt::{Action, Attempt};
pub(crate) use headers::{make_referer, remove_sensitive_headers};
pub use policy::Policy;
