//! Copper Mango cart engine library.
//!
//! Canonical cart state for the storefront pages: line items with their
//! quantities, persistence round-trips against an injected key-value store,
//! and a synchronization contract that pushes derived values (header count,
//! line-item list, price summary) into whichever display sinks exist in the
//! current page context.
//!
//! # Modules
//!
//! - [`store`] - The cart state machine and its persistence round-trip
//! - [`storage`] - Key-value persistence port and backends
//! - [`view`] - Projection of cart state onto optional display sinks
//! - [`notify`] - User-facing confirmation notifications
//! - [`config`] - Engine configuration
//! - [`error`] - Unified error handling

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;
pub mod view;
