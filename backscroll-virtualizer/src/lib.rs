//! Headless virtualization math for transcripts that grow at both ends.
//!
//! For the transcript engine (pagination, anchoring, follow mode), see the `backscroll` crate.
//!
//! This crate holds the parts that do not know what an item is:
//! - a sparse measured-size table with a constant estimate for unmeasured positions
//! - two-sided prefix sums over extents: prepends and appends never rebuild the table
//! - overscanned window computation in pixels
//! - a bounded measure-then-correct loop that keeps content at the viewport start still
//!
//! It is UI-agnostic. A rendering layer is expected to provide:
//! - viewport extent and scroll offset
//! - measured extents for the positions it materialized
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod estimator;
mod options;
mod prefix;
mod types;
mod virtualizer;

#[cfg(test)]
mod tests;

pub use estimator::SizeEstimator;
pub use options::VirtualizerOptions;
pub use types::{MeasureOutcome, SettleReport, VirtualItem, VirtualRange, Window};
pub use virtualizer::{Virtualize, Virtualizer};
