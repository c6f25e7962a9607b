//! Utility functions for display formatting.

pub mod format;

pub use format::{format_currency, format_date_long, format_date_short};
