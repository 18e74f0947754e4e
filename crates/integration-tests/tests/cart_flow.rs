//! Integration tests for cart mutations and persistence.
//!
//! These drive the public entry points end-to-end: mutate through the
//! store, then assert on the persisted state, the returned values, and the
//! confirmation notifications.

#![allow(clippy::unwrap_used)]

use copper_mango_cart::config::CartConfig;
use copper_mango_cart::storage::FileStore;
use copper_mango_cart::store::{CartStore, RemoveOutcome};
use copper_mango_cart::view::ViewSynchronizer;
use copper_mango_integration_tests::TestContext;
use rust_decimal::Decimal;

// =============================================================================
// Storefront Scenarios
// =============================================================================

#[test]
fn test_first_add_creates_single_row() {
    let mut ctx = TestContext::cart_page();

    let total = ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();
    assert_eq!(total, 1);

    let cart = ctx.store.load().unwrap();
    assert_eq!(cart.items().len(), 1);
    let item = cart.items().first().unwrap();
    assert_eq!(item.name.as_str(), "Wireless Mouse");
    assert_eq!(item.price, Decimal::from(799));
    assert_eq!(item.quantity, 1);
}

#[test]
fn test_repeat_add_increments_quantity() {
    let mut ctx = TestContext::cart_page();
    ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();

    let total = ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();
    assert_eq!(total, 2);

    let cart = ctx.store.load().unwrap();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items().first().unwrap().quantity, 2);
}

#[test]
fn test_removal_leaves_remaining_rows() {
    let mut ctx = TestContext::cart_page();
    ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();
    ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();
    ctx.store.add_item("USB Cable", Decimal::from(199)).unwrap();

    let outcome = ctx.store.remove_item("Wireless Mouse").unwrap();
    assert_eq!(outcome, RemoveOutcome::Removed);

    let cart = ctx.store.load().unwrap();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items().first().unwrap().name.as_str(), "USB Cable");
    assert_eq!(cart.subtotal(), Decimal::from(199));
}

#[test]
fn test_whitespace_variants_merge_into_one_row() {
    let mut ctx = TestContext::cart_page();
    ctx.store.add_item("  Keyboard  ", Decimal::from(1299)).unwrap();

    let cart = ctx.store.load().unwrap();
    assert_eq!(cart.items().first().unwrap().name.as_str(), "Keyboard");

    ctx.store.add_item("Keyboard", Decimal::from(1299)).unwrap();
    let cart = ctx.store.load().unwrap();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items().first().unwrap().quantity, 2);
}

// =============================================================================
// Merge and Removal Properties
// =============================================================================

#[test]
fn test_merge_invariant_over_many_adds() {
    let mut ctx = TestContext::cart_page();
    for _ in 0..25 {
        ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();
    }

    let cart = ctx.store.load().unwrap();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items().first().unwrap().quantity, 25);
    assert_eq!(ctx.store.total_quantity().unwrap(), 25);
}

#[test]
fn test_empty_removal_is_idempotent() {
    let mut ctx = TestContext::cart_page();
    ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();
    ctx.store.add_item("USB Cable", Decimal::from(199)).unwrap();
    let before = ctx.store.load().unwrap();

    let outcome = ctx.store.remove_item("Ghost Item").unwrap();
    assert_eq!(outcome, RemoveOutcome::NotFound);

    // Items and every field unchanged.
    assert_eq!(ctx.store.load().unwrap(), before);
}

#[test]
fn test_removal_notification_and_log_on_absent_item() {
    let mut ctx = TestContext::cart_page();
    ctx.store.remove_item("Ghost Item").unwrap();

    assert_eq!(
        ctx.notifier.messages(),
        vec!["\"Ghost Item\" has been removed."]
    );
}

#[test]
fn test_totals_stay_consistent_with_persisted_state() {
    let mut ctx = TestContext::cart_page();
    ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();
    ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();
    ctx.store.add_item("USB Cable", Decimal::from(199)).unwrap();
    ctx.store.remove_item("USB Cable").unwrap();

    let cart = ctx.store.load().unwrap();
    assert_eq!(ctx.store.total_quantity().unwrap(), cart.total_quantity());
    assert_eq!(ctx.store.subtotal().unwrap(), cart.subtotal());
    assert_eq!(cart.total_quantity(), 2);
    assert_eq!(cart.subtotal(), Decimal::from(1598));
}

// =============================================================================
// Notifications
// =============================================================================

#[test]
fn test_add_confirmation_wording() {
    let mut ctx = TestContext::cart_page();
    ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();
    ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();

    assert_eq!(
        ctx.notifier.messages(),
        vec![
            "1 x Wireless Mouse added to cart. Cart total items: 1",
            "1 x Wireless Mouse added to cart. Cart total items: 2",
        ]
    );
}

#[test]
fn test_add_confirmation_uses_trimmed_name() {
    let mut ctx = TestContext::cart_page();
    ctx.store.add_item("  Keyboard  ", Decimal::from(1299)).unwrap();

    assert_eq!(
        ctx.notifier.messages(),
        vec!["1 x Keyboard added to cart. Cart total items: 1"]
    );
}

// =============================================================================
// Persistence Recovery
// =============================================================================

#[test]
fn test_malformed_persisted_value_recovers_to_empty() {
    let ctx = TestContext::cart_page_with_persisted("{{{ not json");
    assert!(ctx.store.load().unwrap().is_empty());
    assert_eq!(ctx.store.total_quantity().unwrap(), 0);
}

#[test]
fn test_wrong_shape_persisted_value_recovers_to_empty() {
    let ctx = TestContext::cart_page_with_persisted(r#"{"cart":"not a list"}"#);
    assert!(ctx.store.load().unwrap().is_empty());
}

#[test]
fn test_recovered_cart_accepts_new_items() {
    let mut ctx = TestContext::cart_page_with_persisted("corrupt");
    let total = ctx.store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();
    assert_eq!(total, 1);

    let cart = ctx.store.load().unwrap();
    assert_eq!(cart.items().len(), 1);
}

#[test]
fn test_legacy_untrimmed_rows_survive_and_match() {
    // Earlier visits may have persisted names with stray whitespace; they
    // load as-is and both merge and removal still find them.
    let mut ctx = TestContext::cart_page_with_persisted(
        r#"[{"name":" Keyboard ","price":1299,"quantity":1}]"#,
    );

    ctx.store.add_item("Keyboard", Decimal::from(1299)).unwrap();
    let cart = ctx.store.load().unwrap();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items().first().unwrap().quantity, 2);

    assert_eq!(
        ctx.store.remove_item("Keyboard").unwrap(),
        RemoveOutcome::Removed
    );
    assert!(ctx.store.load().unwrap().is_empty());
}

// =============================================================================
// Durable Storage
// =============================================================================

#[test]
fn test_cart_survives_page_loads_via_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = CartConfig::default();

    // First page visit: add two products.
    {
        let mut store = CartStore::new(
            FileStore::new(dir.path()),
            &config,
            ViewSynchronizer::detached(config.currency),
        );
        store.add_item("Wireless Mouse", Decimal::from(799)).unwrap();
        store.add_item("USB Cable", Decimal::from(199)).unwrap();
    }

    // Next page load: a fresh store over the same medium sees the cart.
    let store = CartStore::new(
        FileStore::new(dir.path()),
        &config,
        ViewSynchronizer::detached(config.currency),
    );
    let cart = store.load().unwrap();
    let names: Vec<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Wireless Mouse", "USB Cable"]);
    assert_eq!(cart.total_quantity(), 2);
}
