use crate::Cursor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageState {
    Idle,
    Loading,
    Exhausted,
}

/// Identifies one in-flight request. A resolution is applied only if its ticket is still the
/// one the controller is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    seq: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest<C> {
    pub cursor: Option<C>,
    pub ticket: Ticket,
}

/// The `Idle → Loading → Idle | Exhausted` state machine around older-page fetches.
///
/// At most one request is ever in flight; `begin` while loading or exhausted is a no-op.
/// The cursor only advances on `commit`, so a failed request can be retried as-is.
#[derive(Clone, Debug)]
pub struct PaginationController<C> {
    state: PageState,
    cursor: Cursor<C>,
    in_flight: Option<Ticket>,
    generation: u64,
    seq: u64,
    pages_loaded: usize,
    disposed: bool,
}

impl<C> Default for PaginationController<C> {
    fn default() -> Self {
        Self {
            state: PageState::Idle,
            cursor: Cursor::Unfetched,
            in_flight: None,
            generation: 0,
            seq: 0,
            pages_loaded: 0,
            disposed: false,
        }
    }
}

impl<C: Clone> PaginationController<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn cursor(&self) -> &Cursor<C> {
        &self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.state == PageState::Loading
    }

    pub fn has_more(&self) -> bool {
        !self.cursor.is_exhausted()
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// `Idle → Loading`. Returns `None` (and changes nothing) when already loading, exhausted,
    /// or disposed.
    pub fn begin(&mut self) -> Option<PageRequest<C>> {
        if self.disposed || self.state != PageState::Idle {
            return None;
        }
        let cursor = self.cursor.request()?;
        self.seq = self.seq.wrapping_add(1);
        let ticket = Ticket {
            generation: self.generation,
            seq: self.seq,
        };
        self.in_flight = Some(ticket);
        self.state = PageState::Loading;
        Some(PageRequest { cursor, ticket })
    }

    /// Whether `ticket` is the request currently awaited.
    pub fn owns(&self, ticket: Ticket) -> bool {
        !self.disposed && ticket.generation == self.generation && self.in_flight == Some(ticket)
    }

    /// `Loading → Idle | Exhausted` after the page was merged.
    pub fn commit(&mut self, next_cursor: Option<C>) {
        debug_assert_eq!(self.state, PageState::Loading, "commit without a request");
        self.in_flight = None;
        self.pages_loaded += 1;
        self.cursor.advance(next_cursor);
        self.state = if self.cursor.is_exhausted() {
            PageState::Exhausted
        } else {
            PageState::Idle
        };
    }

    /// `Loading → Idle` without consuming the cursor.
    pub fn fail(&mut self) {
        self.in_flight = None;
        if self.state == PageState::Loading {
            self.state = PageState::Idle;
        }
    }

    /// Invalidates any in-flight request and refuses new ones.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = None;
    }
}
