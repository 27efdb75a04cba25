//! Retry logic with exponential backoff and jitter
//!
//! The policy only decides; re-sending is done by
//! [`crate::subscriber::RetrySubscriber`] through the adapter pipeline.

pub mod policy;

pub use policy::RetryPolicy;
