//! Bill-splitting computation core.
//!
//! The engine is pure and synchronous: the presentation layer owns a
//! [`Session`] (participant registry, item ledger, tax/tip pools), mutates
//! it on user events and calls [`Session::recompute`] after every change.
//! All money is integer cents ([`Money`]); every distribution reconciles
//! exactly, with remainders landing on the last participant in registry
//! order.

pub use aggregate::{Totals, aggregate};
pub use error::EngineError;
pub use items::{ExpenseItem, PayerMode, SplitSpec};
pub use money::{Money, Percent};
pub use participants::{MIN_PARTICIPANTS, Participant, Registry};
pub use report::{ItemRow, RATIO_LABEL, item_rows};
pub use session::Session;
pub use split::{Allocation, allocate, distribute_proportionally, split_evenly, split_valid};

mod aggregate;
mod error;
mod items;
mod money;
mod participants;
mod report;
mod session;
mod split;
