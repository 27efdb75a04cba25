//! Subscribers shipped with the adapter
//!
//! Each one implements a single cross-cutting concern through event
//! handlers. Priorities decide their order on a shared event:
//!
//! | subscriber   | priority |
//! |--------------|----------|
//! | stopwatch    | 10000    |
//! | cookie       | 300      |
//! | basic auth   | 300      |
//! | status code  | 200      |
//! | logger       | 100      |
//! | history      | 100      |
//! | retry        | 0        |
//! | redirect     | 0        |

pub mod basic_auth;
pub mod cookie;
pub mod history;
pub mod logger;
pub mod redirect;
pub mod retry;
pub mod status_code;
pub mod stopwatch;

pub use basic_auth::{BasicAuthSubscriber, basic_auth_header};
pub use cookie::CookieSubscriber;
pub use history::HistorySubscriber;
pub use logger::LoggerSubscriber;
pub use redirect::RedirectSubscriber;
pub use retry::RetrySubscriber;
pub use status_code::StatusCodeSubscriber;
pub use stopwatch::StopwatchSubscriber;
