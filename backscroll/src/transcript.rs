use core::fmt::Debug;

use backscroll_virtualizer::{MeasureOutcome, SettleReport, VirtualItem, Virtualizer, Window};
use snafu::ResultExt;

use crate::error::{FetchSnafu, Result};
use crate::{
    FetchError, FollowController, FollowState, Item, ItemKey, ItemSet, Page, PageRequest,
    PageState, PaginationController, ScrollAnchor, Ticket, TopTrigger, TranscriptOptions, Tween,
    Viewport, capture_anchor, restore_anchor,
};

/// The anchored bidirectional virtual list for one viewport session.
///
/// This type owns every piece of mutable state (items, measured sizes, pagination, follow
/// mode) and is driven by discrete events on a single thread:
/// - `on_viewport_size` / `on_scroll` when the scroll container changes
/// - `begin_load` / `complete_load` around a [`crate::PageSource`] fetch
/// - `push_live` for each arriving item
/// - `layout` (or `measure`) after a render pass
/// - `tick(now_ms)` each frame while a follow animation runs
///
/// For an async `load_more`, wrap it in a [`crate::Session`].
#[derive(Clone, Debug)]
pub struct Transcript<K, C> {
    options: TranscriptOptions,
    items: ItemSet<K>,
    v: Virtualizer,
    pagination: PaginationController<C>,
    follow: FollowController,
    trigger: TopTrigger,
    tween: Option<Tween>,
    disposed: bool,
}

impl<K: ItemKey, C: Clone + Debug> Transcript<K, C> {
    pub fn new(options: TranscriptOptions) -> Self {
        Self {
            items: ItemSet::new(),
            v: Virtualizer::new(options.virtualizer),
            pagination: PaginationController::new(),
            follow: FollowController::new(options.bottom_threshold),
            trigger: TopTrigger::new(options.top_margin),
            tween: None,
            disposed: false,
            options,
        }
    }

    pub fn options(&self) -> &TranscriptOptions {
        &self.options
    }

    pub fn items(&self) -> &ItemSet<K> {
        &self.items
    }

    pub fn virtualizer(&self) -> &Virtualizer {
        &self.v
    }

    pub fn pagination(&self) -> &PaginationController<C> {
        &self.pagination
    }

    pub fn page_state(&self) -> PageState {
        self.pagination.state()
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    pub fn follow_state(&self) -> FollowState {
        self.follow.state()
    }

    pub fn is_following(&self) -> bool {
        self.follow.is_following()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn scroll_offset(&self) -> u64 {
        self.v.scroll_offset()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    pub fn on_viewport_size(&mut self, viewport_extent: u32) {
        self.v.set_viewport_size(viewport_extent);
        self.v.set_scroll_offset_clamped(self.v.scroll_offset());
        self.refresh_follow();
    }

    /// Call this when the UI reports a user scroll (wheel, drag, keyboard).
    ///
    /// Cancels a running follow animation. Offsets produced by `tick` should not be fed back
    /// here.
    pub fn on_scroll(&mut self, scroll_offset: u64) {
        self.cancel_animation();
        self.v.set_scroll_offset_clamped(scroll_offset);
        self.refresh_follow();
    }

    /// Whether the visible range reached the oldest loaded items and an older page should be
    /// requested now.
    pub fn wants_older(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let visible_start = self.v.visible_range().start_index;
        self.trigger
            .should_load(visible_start, self.pagination.state())
    }

    /// Starts an older-page request. `None` while one is in flight, after exhaustion, or after
    /// teardown.
    pub fn begin_load(&mut self) -> Option<PageRequest<C>> {
        if self.disposed {
            return None;
        }
        let request = self.pagination.begin();
        if request.is_some() {
            vdebug!(cursor = ?self.pagination.cursor(), "begin_load");
        } else {
            vtrace!(state = ?self.pagination.state(), "begin_load: no-op");
        }
        request
    }

    /// Applies the resolution of the request identified by `ticket`.
    ///
    /// Returns `Ok(true)` when the page was merged, and `Ok(false)` when the resolution was
    /// discarded because the ticket is stale (teardown). On `Err` nothing was merged and the
    /// cursor was not consumed.
    pub fn complete_load(
        &mut self,
        ticket: Ticket,
        result: core::result::Result<Page<K, C>, FetchError>,
    ) -> Result<bool> {
        if !self.pagination.owns(ticket) {
            vdebug!(?ticket, "complete_load: discarding stale page");
            return Ok(false);
        }

        let cursor = format!("{:?}", self.pagination.cursor());
        let page = match result.context(FetchSnafu { cursor }) {
            Ok(page) => page,
            Err(err) => {
                vwarn!(error = %err, "older page fetch failed");
                self.pagination.fail();
                return Err(err);
            }
        };

        let anchor = self.capture_anchor();
        let merged = match self.items.extend_older(page.items) {
            Ok(n) => n,
            Err(err) => {
                vwarn!(error = %err, "older page rejected");
                self.pagination.fail();
                return Err(err);
            }
        };
        let total_before = self.v.total_size();
        self.v.prepend(merged);
        let grown = self.v.total_size() - total_before;
        // A running follow animation moves into the new coordinates with the content.
        if let Some(tween) = &mut self.tween {
            tween.shift(grown as i64);
        }

        match anchor {
            Some(anchor) => {
                self.apply_anchor(&anchor);
            }
            None if self.follow.is_following() => self.jump_to_live_edge(),
            None => {}
        }

        self.pagination.commit(page.next_cursor);
        self.trigger.record_merge(merged, self.pagination.state());
        vdebug!(
            merged,
            total = self.items.len(),
            state = ?self.pagination.state(),
            "complete_load: page merged"
        );
        Ok(true)
    }

    /// Inserts a newly arrived item at the live edge.
    ///
    /// Returns `Ok(true)` when the arrival started (or retargeted) a follow scroll. After
    /// teardown the item is dropped and `Ok(false)` is returned.
    pub fn push_live(&mut self, item: Item<K>, now_ms: u64) -> Result<bool> {
        if self.disposed {
            vdebug!("push_live after teardown ignored");
            return Ok(false);
        }
        self.items.push_live(item)?;
        self.v.append(1);

        if !self.follow.on_arrival() {
            return Ok(false);
        }
        self.scroll_to_live_edge(now_ms);
        Ok(true)
    }

    /// Smoothly scrolls to the live edge (or jumps when the follow duration is 0).
    pub fn scroll_to_live_edge(&mut self, now_ms: u64) {
        let to = self.v.max_scroll_offset();
        if self.options.follow_duration_ms == 0 {
            self.jump_to_live_edge();
            return;
        }
        match &mut self.tween {
            Some(tween) => tween.retarget(now_ms, to),
            None => {
                self.tween = Some(Tween::new(
                    self.v.scroll_offset(),
                    to,
                    now_ms,
                    self.options.follow_duration_ms,
                    self.options.follow_easing,
                ));
            }
        }
    }

    /// Scrolls to the live edge immediately.
    pub fn jump_to_live_edge(&mut self) {
        self.tween = None;
        self.v.set_scroll_offset(self.v.max_scroll_offset());
    }

    /// Advances the follow animation.
    ///
    /// Returns the new scroll offset while animating, `None` otherwise.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let tween = self.tween.as_mut()?;
        let live_edge = self.v.max_scroll_offset();
        if tween.to != live_edge {
            // Measurements below the viewport moved the live edge; continue from here.
            tween.retarget(now_ms, live_edge);
        }
        if tween.is_done(now_ms) {
            self.tween = None;
            self.v.set_scroll_offset(live_edge);
        } else {
            let offset = tween.sample(now_ms);
            self.v.set_scroll_offset_clamped(offset);
        }
        Some(self.v.scroll_offset())
    }

    /// The overscanned window to materialize.
    pub fn window(&self) -> Window {
        self.v.window()
    }

    /// Iterates the materialized items in layout order with their geometry.
    pub fn for_each_visible(&self, mut f: impl FnMut(VirtualItem, &Item<K>)) {
        self.v.for_each_virtual_item(|vi| {
            if let Some(item) = self.items.at_layout(vi.index) {
                f(vi, item);
            }
        });
    }

    /// Reports one measurement taken from a window of `generation`.
    pub fn measure(&mut self, generation: u64, index: usize, extent: u32) -> MeasureOutcome {
        use backscroll_virtualizer::Virtualize;
        let outcome = self.v.report_measured(generation, index, extent);
        self.shift_animation(outcome.correction());
        outcome
    }

    /// Runs the measure-then-correct loop against `viewport` and writes the resulting scroll
    /// offset back to it.
    pub fn layout(&mut self, viewport: &mut impl Viewport) -> SettleReport {
        self.v.set_viewport_size(viewport.viewport_extent());
        let report = self.v.settle(|index| viewport.measure(index));
        self.shift_animation(report.correction);
        if report.unavailable > 0 {
            vdebug!(unavailable = report.unavailable, "layout: skipped unmounted positions");
        }
        if viewport.scroll_offset() != self.v.scroll_offset() {
            viewport.set_scroll_offset(self.v.scroll_offset());
        }
        report
    }

    pub fn capture_anchor(&self) -> Option<ScrollAnchor<K>> {
        capture_anchor(&self.v, |index| {
            self.items.at_layout(index).map(|it| it.id().clone())
        })
    }

    /// Scrolls so the anchored item is back where it was. Cancels a running follow animation.
    pub fn restore_anchor(&mut self, anchor: &ScrollAnchor<K>) -> bool {
        self.cancel_animation();
        self.apply_anchor(anchor)
    }

    fn apply_anchor(&mut self, anchor: &ScrollAnchor<K>) -> bool {
        let items = &self.items;
        let ok = restore_anchor(&mut self.v, anchor, |key| items.layout_index_of(key));
        vtrace!(?anchor, ok, offset = self.v.scroll_offset(), "restore_anchor");
        ok
    }

    /// Tears the session down. In-flight pages and later arrivals are discarded.
    pub fn dispose(&mut self) {
        vdebug!(loading = self.pagination.is_loading(), "dispose");
        self.disposed = true;
        self.tween = None;
        self.pagination.dispose();
    }

    fn shift_animation(&mut self, correction: i64) {
        if correction == 0 {
            return;
        }
        if let Some(tween) = &mut self.tween {
            tween.shift(correction);
            vtrace!(correction, "follow animation shifted");
        }
    }

    fn refresh_follow(&mut self) {
        self.follow.update(self.v.distance_to_end());
    }
}
