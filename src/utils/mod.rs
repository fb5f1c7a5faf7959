//! Utility modules for the AptoPlay SDK

pub mod case;

// Re-export commonly used utilities
pub use case::{lower_first, normalize_keys, normalize_keys_owned};
