//! Resource records and one async method per REST operation.
//!
//! Every operation is an inherent method on [`ApiClient`](crate::ApiClient) and goes through
//! the same authenticated dispatch path. Records keep PayPal's wire keys; fields PayPal may
//! omit are `Option` and skipped when `None`, while required fields fail decoding when
//! absent.

pub mod billing;
pub mod common;
pub mod experience;
pub mod identity;
pub mod payments;
pub mod payouts;
pub mod transactions;
pub mod vault;

pub use billing::*;
pub use common::*;
pub use experience::*;
pub use identity::*;
pub use payments::*;
pub use payouts::*;
pub use transactions::*;
pub use vault::*;
