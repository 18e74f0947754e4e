//! Projection of cart state onto optional display sinks.
//!
//! Every page carries some subset of the cart's display surfaces: the
//! header counter exists (almost) everywhere, the line-item list and the
//! price summary only on the dedicated cart page. The synchronizer takes a
//! set of named, possibly-absent sink handles and writes to each
//! independently; absence of a sink is a normal code path, not an error.
//! The synchronizer only reads derived values - it never mutates cart
//! state.

use std::cell::RefCell;
use std::rc::Rc;

use copper_mango_core::{Currency, Price};
use tracing::warn;

use crate::store::{Cart, LineItem};

/// Message shown by list sinks in place of rows when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty. Start shopping now!";

/// A plain-text display target, e.g. the header counter or one summary
/// field.
pub trait TextSink {
    /// Replace the target's content with `text`.
    fn set_text(&mut self, text: &str);
}

/// The line-item list target on the cart page.
pub trait ListSink {
    /// Replace any previously rendered content with `view`.
    ///
    /// When `view` has no items, implementations show
    /// [`EMPTY_CART_MESSAGE`] instead of rows.
    fn render(&mut self, view: &CartView);
}

/// The display surfaces present in the current page context.
///
/// Each handle is independently optional; the synchronizer writes to
/// whichever ones exist.
#[derive(Default)]
pub struct PageSinks {
    /// Header cart counter, shown on every page of the site.
    pub header_counter: Option<Box<dyn TextSink>>,
    /// Line-item list, present only on the dedicated cart page.
    pub item_list: Option<Box<dyn ListSink>>,
    /// Summary field for the total item count.
    pub summary_item_count: Option<Box<dyn TextSink>>,
    /// Summary field for the subtotal.
    pub summary_subtotal: Option<Box<dyn TextSink>>,
    /// Summary field for the grand total.
    pub summary_total: Option<Box<dyn TextSink>>,
}

/// Line item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemView {
    /// The stored product name, verbatim.
    pub name: String,
    /// Formatted unit price.
    pub unit_price: String,
    pub quantity: u32,
    /// Formatted `unit price x quantity`.
    pub line_total: String,
    /// Identity payload for the row's removal control. Carries the
    /// *original* stored name (possibly un-trimmed) so a removal request
    /// round-trips to the same row.
    pub remove_payload: String,
}

impl LineItemView {
    fn project(item: &LineItem, currency: Currency) -> Self {
        Self {
            name: item.name.as_str().to_owned(),
            unit_price: Price::new(item.price, currency).display(),
            quantity: item.quantity,
            line_total: Price::new(item.line_total(), currency).display(),
            remove_payload: item.name.as_str().to_owned(),
        }
    }
}

/// Cart display data: one row per line item plus the derived summary
/// values, with every amount pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<LineItemView>,
    /// Sum of all quantities.
    pub item_count: u32,
    /// Formatted sum of `price x quantity` over all items.
    pub subtotal: String,
    /// Formatted grand total. Equals the subtotal, since no taxes or
    /// shipping are modeled.
    pub total: String,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty(currency: Currency) -> Self {
        let zero = Price::zero(currency).display();
        Self {
            items: Vec::new(),
            item_count: 0,
            subtotal: zero.clone(),
            total: zero,
        }
    }

    /// Project the cart's current state into display data.
    #[must_use]
    pub fn project(cart: &Cart, currency: Currency) -> Self {
        let subtotal = Price::new(cart.subtotal(), currency).display();
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| LineItemView::project(item, currency))
                .collect(),
            item_count: cart.total_quantity(),
            total: subtotal.clone(),
            subtotal,
        }
    }
}

/// Pushes cart state into the page's display sinks after every mutation.
pub struct ViewSynchronizer {
    sinks: PageSinks,
    currency: Currency,
}

impl ViewSynchronizer {
    /// Create a synchronizer over the given sinks.
    #[must_use]
    pub fn new(sinks: PageSinks, currency: Currency) -> Self {
        Self { sinks, currency }
    }

    /// A synchronizer with no sinks at all, for contexts with no display
    /// surfaces.
    #[must_use]
    pub fn detached(currency: Currency) -> Self {
        Self::new(PageSinks::default(), currency)
    }

    /// Write the `Cart (N)` label into the header counter, if present.
    ///
    /// A missing counter is logged and skipped; not every page carries the
    /// header in this flow, though in practice every page should.
    pub fn update_counter(&mut self, cart: &Cart) {
        let count = cart.total_quantity();
        match self.sinks.header_counter.as_mut() {
            Some(counter) => counter.set_text(&format!("Cart ({count})")),
            None => warn!(count, "header cart counter not present on this page"),
        }
    }

    /// Re-render the line-item list and the summary fields.
    ///
    /// No-op when the list sink is absent; this view exists only on the
    /// dedicated cart page. Summary fields are written individually, each
    /// only if present.
    pub fn render_list(&mut self, cart: &Cart) {
        let Some(list) = self.sinks.item_list.as_mut() else {
            return;
        };

        let view = CartView::project(cart, self.currency);
        list.render(&view);

        if let Some(sink) = self.sinks.summary_item_count.as_mut() {
            sink.set_text(&view.item_count.to_string());
        }
        if let Some(sink) = self.sinks.summary_subtotal.as_mut() {
            sink.set_text(&view.subtotal);
        }
        if let Some(sink) = self.sinks.summary_total.as_mut() {
            sink.set_text(&view.total);
        }
    }
}

/// In-memory sink implementing both ports, for tests and headless demos.
///
/// Clones share the same buffer, so a clone can be boxed into
/// [`PageSinks`] while the original stays available for assertions.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    inner: Rc<RefCell<BufferContents>>,
}

#[derive(Debug, Default)]
struct BufferContents {
    text: Option<String>,
    lines: Vec<String>,
    view: Option<CartView>,
}

impl BufferSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The text last written via [`TextSink::set_text`].
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.inner.borrow().text.clone()
    }

    /// The rendered list lines from the last [`ListSink::render`] call.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.inner.borrow().lines.clone()
    }

    /// The full view from the last [`ListSink::render`] call.
    #[must_use]
    pub fn view(&self) -> Option<CartView> {
        self.inner.borrow().view.clone()
    }
}

impl TextSink for BufferSink {
    fn set_text(&mut self, text: &str) {
        self.inner.borrow_mut().text = Some(text.to_owned());
    }
}

impl ListSink for BufferSink {
    fn render(&mut self, view: &CartView) {
        let mut contents = self.inner.borrow_mut();
        contents.lines = if view.items.is_empty() {
            vec![EMPTY_CART_MESSAGE.to_owned()]
        } else {
            view.items
                .iter()
                .map(|row| {
                    format!(
                        "{} | {} x {} | {}",
                        row.name, row.unit_price, row.quantity, row.line_total
                    )
                })
                .collect()
        };
        contents.view = Some(view.clone());
    }
}
