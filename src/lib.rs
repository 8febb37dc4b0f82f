#![doc(test(attr(deny(warnings))))]

//! Fintrack Core offers the transaction ledger, aggregation, and command
//! parsing primitives that power a personal finance tracker front end.

pub mod analytics;
pub mod config;
pub mod currency;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod storage;
pub mod utils;
pub mod voice;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fintrack Core tracing initialized.");
    });
}
