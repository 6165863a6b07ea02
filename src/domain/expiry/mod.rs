pub mod service;

pub use service::{ExpiryService, SweepReport};
