/// Configuration for [`crate::Virtualizer`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so adapters can
/// keep it next to their own settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VirtualizerOptions {
    /// Extent assumed for a position until it is measured.
    pub estimated_extent: u32,

    /// Extra pixels above and below the viewport within which items are still materialized.
    pub overscan_margin: u32,

    /// Padding before the first (oldest) item.
    pub padding_start: u32,
    /// Padding after the last (newest) item.
    pub padding_end: u32,

    /// Space between items.
    pub gap: u32,

    /// Upper bound on measure-then-correct passes per layout.
    pub max_settle_passes: usize,
}

impl Default for VirtualizerOptions {
    fn default() -> Self {
        Self {
            estimated_extent: 100,
            overscan_margin: 200,
            padding_start: 0,
            padding_end: 0,
            gap: 0,
            max_settle_passes: 8,
        }
    }
}

impl VirtualizerOptions {
    pub fn new(estimated_extent: u32) -> Self {
        Self {
            estimated_extent,
            ..Self::default()
        }
    }

    pub fn with_overscan_margin(mut self, overscan_margin: u32) -> Self {
        self.overscan_margin = overscan_margin;
        self
    }

    pub fn with_padding(mut self, padding_start: u32, padding_end: u32) -> Self {
        self.padding_start = padding_start;
        self.padding_end = padding_end;
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the pass cap; values below 1 are raised to 1.
    pub fn with_max_settle_passes(mut self, passes: usize) -> Self {
        self.max_settle_passes = passes.max(1);
        self
    }
}
