use alloc::vec::Vec;
use core::cmp;

use crate::estimator::SizeEstimator;
use crate::prefix::PrefixSums;
use crate::{MeasureOutcome, SettleReport, VirtualItem, VirtualRange, VirtualizerOptions, Window};

/// The virtualization capability a transcript needs from a layout backend.
///
/// [`Virtualizer`] is the reference implementation; a renderer with its own layout engine can
/// implement this instead and still drive the measure-then-correct loop via
/// [`Virtualize::settle_within`].
pub trait Virtualize {
    /// Bumped whenever positions shift; windows and measurements carry it.
    fn generation(&self) -> u64;

    fn scroll_offset(&self) -> u64;

    fn viewport_size(&self) -> u32;

    fn is_measured(&self, index: usize) -> bool;

    /// Computes the overscanned window to materialize for the given viewport.
    fn compute_visible_range(&self, scroll_offset: u64, viewport_extent: u32) -> Window;

    /// Records the measured extent of a position rendered from a window of `generation`.
    fn report_measured(&mut self, generation: u64, index: usize, extent: u32) -> MeasureOutcome;

    /// Measures unmeasured positions of the current window until none remain or `max_passes`
    /// passes ran.
    ///
    /// `measure(index)` returns `None` when the position is no longer mounted; such positions
    /// are skipped for the rest of the loop.
    fn settle_within(
        &mut self,
        max_passes: usize,
        mut measure: impl FnMut(usize) -> Option<u32>,
    ) -> SettleReport
    where
        Self: Sized,
    {
        let mut report = SettleReport::default();
        let mut unavailable: Vec<usize> = Vec::new();

        for _ in 0..max_passes.max(1) {
            let window = self.compute_visible_range(self.scroll_offset(), self.viewport_size());
            let mut progressed = false;
            for index in window.start_index..window.end_index {
                if self.is_measured(index) || unavailable.contains(&index) {
                    continue;
                }
                match measure(index) {
                    Some(extent) => {
                        let outcome = self.report_measured(window.generation, index, extent);
                        report.correction += outcome.correction();
                        report.measured += 1;
                        progressed = true;
                    }
                    None => {
                        unavailable.push(index);
                        report.unavailable += 1;
                    }
                }
            }
            if !progressed {
                report.converged = true;
                return report;
            }
            report.passes += 1;
        }

        let window = self.compute_visible_range(self.scroll_offset(), self.viewport_size());
        report.converged = (window.start_index..window.end_index)
            .all(|i| self.is_measured(i) || unavailable.contains(&i));
        report
    }
}

/// A headless virtualizer for a list that grows at both ends.
///
/// Positions are laid out top to bottom. Prepending shifts every existing position (and bumps
/// the generation), appending does not. The virtualizer owns the measured-size table and the
/// scroll offset; it holds no UI objects and no item data.
#[derive(Clone, Debug)]
pub struct Virtualizer {
    options: VirtualizerOptions,
    viewport_size: u32,
    scroll_offset: u64,
    estimator: SizeEstimator,
    sums: PrefixSums,
    generation: u64,
}

impl Virtualizer {
    pub fn new(options: VirtualizerOptions) -> Self {
        Self::with_count(options, 0)
    }

    pub fn with_count(options: VirtualizerOptions, count: usize) -> Self {
        vdebug!(
            count,
            estimated_extent = options.estimated_extent,
            overscan_margin = options.overscan_margin,
            "Virtualizer::new"
        );
        let estimator = SizeEstimator::new(count, options.estimated_extent);
        let gap = options.gap as u64;
        let sums = PrefixSums::from_values(estimator.extents().enumerate().map(|(i, extent)| {
            let trailing = if i + 1 < count { gap } else { 0 };
            extent as u64 + trailing
        }));
        Self {
            viewport_size: 0,
            scroll_offset: 0,
            estimator,
            sums,
            generation: 0,
            options,
        }
    }

    pub fn options(&self) -> &VirtualizerOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.estimator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimator.is_empty()
    }

    pub fn estimator(&self) -> &SizeEstimator {
        &self.estimator
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        self.viewport_size = size;
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset;
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        self.scroll_offset = self.clamp_scroll_offset(offset);
    }

    pub fn set_viewport_and_scroll_clamped(&mut self, viewport_size: u32, scroll_offset: u64) {
        self.viewport_size = viewport_size;
        self.set_scroll_offset_clamped(scroll_offset);
    }

    pub fn total_size(&self) -> u64 {
        let padding = self.options.padding_start as u64 + self.options.padding_end as u64;
        padding.saturating_add(self.sums.total())
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_size()
            .saturating_sub(self.viewport_size as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Pixels between the viewport's bottom edge and the end of the content.
    pub fn distance_to_end(&self) -> u64 {
        let bottom = self.scroll_offset.saturating_add(self.viewport_size as u64);
        self.total_size().saturating_sub(bottom)
    }

    /// Inserts `n` unmeasured positions before position 0.
    ///
    /// Existing measurements move to `k + n`. The scroll offset is left untouched; restoring
    /// the reader's position is the caller's job (see the anchor helpers in `backscroll`).
    pub fn prepend(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let was_empty = self.is_empty();
        let gap = self.options.gap as u64;
        let estimate = self.options.estimated_extent as u64;
        for i in 0..n {
            // Into an empty list the first push becomes the last position: no trailing gap.
            let trailing = if was_empty && i == 0 { 0 } else { gap };
            self.sums.push_front(estimate + trailing);
        }
        self.estimator.shift(n);
        self.generation = self.generation.wrapping_add(1);
        vdebug!(
            n,
            count = self.len(),
            generation = self.generation,
            "Virtualizer::prepend"
        );
    }

    /// Appends `n` unmeasured positions after the last one.
    pub fn append(&mut self, n: usize) {
        let gap = self.options.gap as i64;
        let estimate = self.options.estimated_extent as u64;
        for _ in 0..n {
            let len = self.len();
            if gap > 0 && len > 0 {
                self.sums.add(len - 1, gap);
            }
            self.estimator.extend(1);
            self.sums.push_back(estimate);
        }
        vtrace!(n, count = self.len(), "Virtualizer::append");
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.estimator.is_measured(index)
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        (index < self.len()).then(|| self.start_of(index))
    }

    pub fn item_size(&self, index: usize) -> Option<u32> {
        (index < self.len()).then(|| self.estimator.extent(index))
    }

    pub fn item_end(&self, index: usize) -> Option<u64> {
        let start = self.item_start(index)?;
        let size = self.item_size(index)? as u64;
        Some(start.saturating_add(size))
    }

    pub fn item(&self, index: usize) -> Option<VirtualItem> {
        Some(VirtualItem {
            index,
            start: self.item_start(index)?,
            size: self.item_size(index)?,
        })
    }

    /// Returns the position covering `offset` (clamped to the last position).
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some(self.index_at_offset_inner(offset))
    }

    /// Positions intersecting the viewport, without overscan.
    pub fn visible_range(&self) -> VirtualRange {
        self.compute_range(self.scroll_offset, self.viewport_size, 0)
    }

    /// Positions to materialize for the current viewport, including the overscan margin.
    pub fn virtual_range(&self) -> VirtualRange {
        self.compute_range(
            self.scroll_offset,
            self.viewport_size,
            self.options.overscan_margin,
        )
    }

    pub fn window(&self) -> Window {
        self.window_for(self.scroll_offset, self.viewport_size)
    }

    pub fn window_for(&self, scroll_offset: u64, viewport_extent: u32) -> Window {
        let range = self.compute_range(scroll_offset, viewport_extent, self.options.overscan_margin);
        let mut offsets = Vec::with_capacity(range.len());
        let mut extents = Vec::with_capacity(range.len());
        self.for_each_in_range(range, |item| {
            offsets.push(item.start);
            extents.push(item.size);
        });
        Window {
            generation: self.generation,
            start_index: range.start_index,
            end_index: range.end_index,
            offsets,
            extents,
        }
    }

    /// Iterates the current overscanned window without allocating.
    pub fn for_each_virtual_item(&self, f: impl FnMut(VirtualItem)) {
        self.for_each_in_range(self.virtual_range(), f);
    }

    /// Applies a measurement taken at the current generation.
    pub fn measure(&mut self, index: usize, extent: u32) -> MeasureOutcome {
        self.report_measured(self.generation, index, extent)
    }

    /// Runs the measure-then-correct loop with the configured pass cap.
    pub fn settle(&mut self, measure: impl FnMut(usize) -> Option<u32>) -> SettleReport {
        let max_passes = self.options.max_settle_passes;
        let report = self.settle_within(max_passes, measure);
        vtrace!(
            passes = report.passes,
            measured = report.measured,
            correction = report.correction,
            converged = report.converged,
            "Virtualizer::settle"
        );
        report
    }

    fn for_each_in_range(&self, range: VirtualRange, mut f: impl FnMut(VirtualItem)) {
        if range.is_empty() {
            return;
        }
        let count = self.len();
        let gap = self.options.gap as u64;
        let mut start = self.start_of(range.start_index);
        for index in range.start_index..range.end_index {
            let size = self.estimator.extent(index);
            f(VirtualItem { index, start, size });
            start = start.saturating_add(size as u64);
            if gap > 0 && index + 1 < count {
                start = start.saturating_add(gap);
            }
        }
    }

    fn start_of(&self, index: usize) -> u64 {
        self.options.padding_start as u64 + self.sums.start(index)
    }

    fn compute_range(&self, scroll_offset: u64, viewport_size: u32, margin: u32) -> VirtualRange {
        let count = self.len();
        if count == 0 || viewport_size == 0 {
            return VirtualRange::EMPTY;
        }

        let view = viewport_size as u64;
        let max_scroll = self.total_size().saturating_sub(view);
        let scroll_offset = scroll_offset.min(max_scroll);

        let first_px = scroll_offset.saturating_sub(margin as u64);
        let end_px = scroll_offset
            .saturating_add(view)
            .saturating_add(margin as u64);
        let last_px = cmp::max(end_px.saturating_sub(1), first_px);

        let start = self.index_at_offset_inner(first_px);
        let end = cmp::min(count, self.index_at_offset_inner(last_px) + 1);

        VirtualRange {
            start_index: start,
            end_index: end,
        }
    }

    fn index_at_offset_inner(&self, offset: u64) -> usize {
        let count = self.len();
        let ps = self.options.padding_start as u64;
        if offset < ps {
            return 0;
        }
        self.sums
            .position_at(offset - ps)
            .min(count.saturating_sub(1))
    }
}

impl Virtualize for Virtualizer {
    fn generation(&self) -> u64 {
        self.generation
    }

    fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    fn is_measured(&self, index: usize) -> bool {
        self.estimator.is_measured(index)
    }

    fn compute_visible_range(&self, scroll_offset: u64, viewport_extent: u32) -> Window {
        self.window_for(scroll_offset, viewport_extent)
    }

    fn report_measured(&mut self, generation: u64, index: usize, extent: u32) -> MeasureOutcome {
        if generation != self.generation || index >= self.len() {
            vdebug!(
                index,
                generation,
                current = self.generation,
                "report_measured: stale measurement ignored"
            );
            return MeasureOutcome::Stale;
        }
        let start = self.start_of(index);
        let Some(prev) = self.estimator.record(index, extent) else {
            return MeasureOutcome::Stale;
        };
        let delta = extent as i64 - prev as i64;
        if delta == 0 {
            return MeasureOutcome::Unchanged;
        }
        self.sums.add(index, delta);

        // Content above the viewport start grew or shrank: move the offset with it.
        let before = self.scroll_offset;
        if start < before {
            self.scroll_offset = if delta > 0 {
                before.saturating_add(delta as u64)
            } else {
                before.saturating_sub(delta.unsigned_abs())
            };
        }
        let correction = self.scroll_offset as i64 - before as i64;
        vtrace!(index, extent, delta, correction, "report_measured");
        MeasureOutcome::Resized { delta, correction }
    }
}
