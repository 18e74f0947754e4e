//! Core types for Copper Mango.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod price;
pub mod product;

pub use price::{Currency, Price, UnknownCurrency};
pub use product::ProductName;
