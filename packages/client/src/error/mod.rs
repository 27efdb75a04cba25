pub mod classification;
pub mod constructors;
pub mod transport;
pub mod types;

pub use constructors::*;
pub use transport::TransportError;
pub use types::{Error, Kind, Result};

pub type HttpAdapterError = Error;
