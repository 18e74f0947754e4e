//! Integration tests for Copper Mango.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p copper-mango-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart mutations, persistence round-trips, recovery
//! - `view_sync` - View synchronization across page contexts
//!
//! The helper here wires a [`CartStore`] to an in-memory storage fake,
//! buffer sinks for every display surface, and a capturing notifier, so a
//! test can drive the public entry points and observe every output channel.

#![cfg_attr(not(test), forbid(unsafe_code))]

use copper_mango_cart::config::CartConfig;
use copper_mango_cart::notify::BufferNotifier;
use copper_mango_cart::storage::{KeyValueStore, MemoryStore};
use copper_mango_cart::store::CartStore;
use copper_mango_cart::view::{BufferSink, PageSinks, ViewSynchronizer};

/// A fully wired cart engine with observable outputs.
pub struct TestContext {
    pub store: CartStore<MemoryStore>,
    pub header_counter: BufferSink,
    pub item_list: BufferSink,
    pub summary_item_count: BufferSink,
    pub summary_subtotal: BufferSink,
    pub summary_total: BufferSink,
    pub notifier: BufferNotifier,
}

impl TestContext {
    /// Context for the dedicated cart page: every display surface exists.
    #[must_use]
    pub fn cart_page() -> Self {
        Self::build(true, None)
    }

    /// Context for a product page: only the header counter exists.
    #[must_use]
    pub fn product_page() -> Self {
        Self::build(false, None)
    }

    /// Cart-page context whose storage already holds `raw` under the cart
    /// key, as if left behind by an earlier visit.
    #[must_use]
    pub fn cart_page_with_persisted(raw: &str) -> Self {
        Self::build(true, Some(raw))
    }

    fn build(with_list: bool, persisted: Option<&str>) -> Self {
        init_tracing();

        let header_counter = BufferSink::new();
        let item_list = BufferSink::new();
        let summary_item_count = BufferSink::new();
        let summary_subtotal = BufferSink::new();
        let summary_total = BufferSink::new();

        let mut sinks = PageSinks {
            header_counter: Some(Box::new(header_counter.clone())),
            ..PageSinks::default()
        };
        if with_list {
            sinks.item_list = Some(Box::new(item_list.clone()));
            sinks.summary_item_count = Some(Box::new(summary_item_count.clone()));
            sinks.summary_subtotal = Some(Box::new(summary_subtotal.clone()));
            sinks.summary_total = Some(Box::new(summary_total.clone()));
        }

        let config = CartConfig::default();
        let storage = MemoryStore::new();
        if let Some(raw) = persisted {
            storage
                .set(&config.storage_key, raw)
                .unwrap_or_else(|_| unreachable!("memory store writes cannot fail"));
        }

        let notifier = BufferNotifier::new();
        let store = CartStore::with_notifier(
            storage,
            &config,
            ViewSynchronizer::new(sinks, config.currency),
            Box::new(notifier.clone()),
        );

        Self {
            store,
            header_counter,
            item_list,
            summary_item_count,
            summary_subtotal,
            summary_total,
            notifier,
        }
    }
}

/// Install a test subscriber once so `tracing` output lands in test logs.
fn init_tracing() {
    use std::sync::Once;

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}
