pub mod artifact;
pub mod expiry;
pub mod speech;
