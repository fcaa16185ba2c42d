//! An anchored bidirectional virtual list for chat transcripts.
//!
//! Built on `backscroll-virtualizer`, this crate adds what a transcript needs on top of the
//! layout math:
//!
//! - lazy loading of older pages with at-most-one request in flight
//! - scroll anchoring by item identity, so prepending history does not move the reader
//! - follow mode: new arrivals scroll to the live edge only while the reader is near it
//! - a top trigger that requests history when the reader reaches the oldest loaded item
//!
//! Everything runs on one logical thread. The only suspension point is the
//! [`PageSource`] fetch; see [`Session`] for an async `load_more`.
//!
//! This crate is framework-agnostic: it decides which items to materialize and where, a
//! rendering layer draws them and reports measured extents back.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod anchor;
mod error;
mod follow;
mod item;
mod item_set;
mod key;
mod options;
mod pagination;
mod session;
mod source;
mod transcript;
mod trigger;
mod tween;
mod viewport;


pub use anchor::{ScrollAnchor, capture_anchor, restore_anchor};
pub use error::{Error, FetchError, RejectedSnafu, Result, TimedOutSnafu};
pub use follow::{FollowController, FollowState};
pub use item::Item;
pub use item_set::ItemSet;
pub use key::ItemKey;
pub use options::TranscriptOptions;
pub use pagination::{PageRequest, PageState, PaginationController, Ticket};
pub use session::Session;
pub use source::{Cursor, Page, PageSource};
pub use transcript::Transcript;
pub use trigger::TopTrigger;
pub use tween::{Easing, Tween};
pub use viewport::Viewport;

pub use backscroll_virtualizer::{
    MeasureOutcome, SettleReport, SizeEstimator, VirtualItem, VirtualRange, Virtualize,
    Virtualizer, VirtualizerOptions, Window,
};
