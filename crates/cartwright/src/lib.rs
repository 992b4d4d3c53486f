//! Cartwright: end-to-end verification harness for a storefront checkout flow.
//!
//! Cartwright drives the login, browse, cart and checkout screens of the
//! demo storefront through typed page models, synchronizes with the page by
//! bounded polling instead of fixed sleeps, and independently recomputes
//! the order's price summary to catch pricing drift.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ scenario code                                            │
//! │   └─► pages (Login/Inventory/Cart/Checkout models)       │
//! │         └─► ui (waits, probes, typed interactions)       │
//! │               └─► session (wire boundary)                │
//! │                     ├─► mock (in-memory store, tests)    │
//! │                     └─► cdp  (live browser, `browser`)   │
//! │   pricing / fixtures / assertion: pure, session-free     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`session::Session`] trait is the only seam touching a real browser;
//! everything above it runs identically against [`mock::MockSession`].

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod assertion;
mod config;
mod locator;
mod pricing;
mod result;
mod ui;
mod wait;

/// Live browser session over the Chrome DevTools Protocol
#[cfg(feature = "browser")]
pub mod cdp;

/// Typed fixture data loaded from JSON files
pub mod fixtures;

/// In-memory storefront session for deterministic offline tests
pub mod mock;

/// Page models for each storefront screen
pub mod pages;

/// The session trait implemented by mock and live backends
pub mod session;

pub use assertion::{ensure, ensure_contains, ensure_eq};
pub use config::{init_test_logging, StoreConfig, DEFAULT_BASE_URL};
pub use fixtures::{
    CheckoutFixture, CheckoutInfo, CheckoutScenarios, PaymentInfo, Product, ProductsFixture,
    SortOption, User, UsersFixture,
};
pub use locator::{
    Locator, LocatorOptions, Selector, DEFAULT_POLL_INTERVAL_MS, DEFAULT_PROBE_TIMEOUT_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};
pub use pricing::{
    compute_summary, parse_labeled_price, parse_price, round_money, summarize_lines, CartLine,
    PriceSummary, ITEM_TOTAL_PREFIX, TAX_PREFIX, TOTAL_PREFIX,
};
pub use result::{CartwrightError, CartwrightResult};
pub use ui::Ui;
pub use wait::{
    probe_outcome, wait_until, Condition, WaitOptions, WaitPredicate, WaitResult, Waiter,
};

/// Commonly used types for scenario code
pub mod prelude {
    pub use crate::pages::{
        CartPage, CheckoutCompletePage, CheckoutInfoPage, CheckoutOverviewPage, InventoryPage,
        LoginPage, PageModel, ProductDetailPage,
    };
    pub use crate::session::Session;
    pub use crate::{
        CartwrightError, CartwrightResult, Condition, Locator, StoreConfig, Ui, WaitOptions,
    };
}
