#![doc(test(attr(deny(warnings))))]

//! Split Core is the ledger computation engine behind shared-expense
//! groups: it converts an expense and a split policy into exact
//! per-participant shares, nets a group's shares, payments, and recorded
//! settlements into one balance per member, and reduces those balances to
//! a short list of transfers that settles the group.
//!
//! The crate is pure and stateless. Callers hand it already-materialized
//! collections, normalized to a single currency, and persist whatever it
//! returns; every contract violation surfaces as a typed error.

pub mod core;
pub mod domain;
pub mod errors;
pub mod money;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Split Core tracing initialized.");
    });
}
