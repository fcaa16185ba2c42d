use std::cell::{Ref, RefCell, RefMut};
use std::fmt::Debug;
use std::rc::Rc;

use crate::error::Result;
use crate::{Item, ItemKey, PageSource, Transcript};

/// A single-threaded handle that pairs a [`Transcript`] with its [`PageSource`].
///
/// Clones share the same transcript. No borrow of the transcript is held while a page is in
/// flight, so event handlers (scroll, arrivals, a second `load_more`) keep working while a
/// request is pending.
pub struct Session<K, C, S> {
    transcript: Rc<RefCell<Transcript<K, C>>>,
    source: Rc<S>,
}

impl<K, C, S> Clone for Session<K, C, S> {
    fn clone(&self) -> Self {
        Self {
            transcript: Rc::clone(&self.transcript),
            source: Rc::clone(&self.source),
        }
    }
}

impl<K, C, S> Session<K, C, S>
where
    K: ItemKey,
    C: Clone + Debug,
    S: PageSource<K, C>,
{
    pub fn new(transcript: Transcript<K, C>, source: S) -> Self {
        Self {
            transcript: Rc::new(RefCell::new(transcript)),
            source: Rc::new(source),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn transcript(&self) -> Ref<'_, Transcript<K, C>> {
        self.transcript.borrow()
    }

    pub fn transcript_mut(&self) -> RefMut<'_, Transcript<K, C>> {
        self.transcript.borrow_mut()
    }

    /// Fetches and merges the next older page.
    ///
    /// Returns `Ok(false)` without fetching when a request is already in flight or history is
    /// exhausted (observable on the first poll), and also when the session was disposed before
    /// the page arrived.
    pub async fn load_more(&self) -> Result<bool> {
        let request = self.transcript.borrow_mut().begin_load();
        let Some(request) = request else {
            return Ok(false);
        };
        let result = self.source.fetch(request.cursor).await;
        self.transcript
            .borrow_mut()
            .complete_load(request.ticket, result)
    }

    /// Runs `load_more` if the visible range reached the top of the loaded history.
    pub async fn load_older_if_needed(&self) -> Result<bool> {
        let wanted = self.transcript.borrow_mut().wants_older();
        if !wanted {
            return Ok(false);
        }
        self.load_more().await
    }

    pub fn push_live(&self, item: Item<K>, now_ms: u64) -> Result<bool> {
        self.transcript.borrow_mut().push_live(item, now_ms)
    }

    pub fn on_scroll(&self, scroll_offset: u64) {
        self.transcript.borrow_mut().on_scroll(scroll_offset);
    }

    pub fn on_viewport_size(&self, viewport_extent: u32) {
        self.transcript.borrow_mut().on_viewport_size(viewport_extent);
    }

    pub fn tick(&self, now_ms: u64) -> Option<u64> {
        self.transcript.borrow_mut().tick(now_ms)
    }

    pub fn dispose(&self) {
        self.transcript.borrow_mut().dispose();
    }
}
