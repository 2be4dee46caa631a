//! Utility functions for Courseway Core
//!
//! This module provides common utility functions used across the codebase.

mod markdown;

pub use markdown::{excerpt, plain_text};
