use futures::future::LocalBoxFuture;

use crate::{FetchError, Item};

/// How much history has been consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cursor<C> {
    /// Nothing fetched yet.
    Unfetched,
    /// More history is available from this token.
    At(C),
    /// History is exhausted. Terminal.
    Exhausted,
}

impl<C> Default for Cursor<C> {
    fn default() -> Self {
        Self::Unfetched
    }
}

impl<C: Clone> Cursor<C> {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// The token to hand to [`PageSource::fetch`], or `None` when exhausted.
    pub fn request(&self) -> Option<Option<C>> {
        match self {
            Self::Unfetched => Some(None),
            Self::At(c) => Some(Some(c.clone())),
            Self::Exhausted => None,
        }
    }

    pub(crate) fn advance(&mut self, next: Option<C>) {
        *self = match next {
            Some(c) => Self::At(c),
            None => Self::Exhausted,
        };
    }
}

/// One page of older items, newest-first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<K, C> {
    pub items: Vec<Item<K>>,
    /// `None` means history is exhausted.
    pub next_cursor: Option<C>,
}

impl<K, C> Page<K, C> {
    pub fn new(items: Vec<Item<K>>, next_cursor: Option<C>) -> Self {
        Self { items, next_cursor }
    }
}

/// Where older pages come from.
///
/// `fetch(None)` asks for the newest page of history. Pages must be newest-first and must
/// not repeat ids already returned. A source that times out reports it as a [`FetchError`].
///
/// The returned future must not borrow the source: the engine holds no borrow of itself while
/// a page is in flight.
pub trait PageSource<K, C> {
    fn fetch(&self, cursor: Option<C>) -> LocalBoxFuture<'static, Result<Page<K, C>, FetchError>>;
}

impl<K, C, F> PageSource<K, C> for F
where
    F: Fn(Option<C>) -> LocalBoxFuture<'static, Result<Page<K, C>, FetchError>>,
{
    fn fetch(&self, cursor: Option<C>) -> LocalBoxFuture<'static, Result<Page<K, C>, FetchError>> {
        self(cursor)
    }
}
