/// The scroll container a transcript is rendered into.
///
/// Indexes are layout indexes (0 is the oldest loaded item, at the top).
pub trait Viewport {
    fn scroll_offset(&self) -> u64;

    fn set_scroll_offset(&mut self, offset: u64);

    fn viewport_extent(&self) -> u32;

    /// Measured extent of a materialized position after layout, or `None` if it is not
    /// mounted anymore.
    fn measure(&mut self, index: usize) -> Option<u32>;
}
