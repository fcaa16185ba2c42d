use backscroll_virtualizer::VirtualizerOptions;

use crate::Easing;

/// Configuration for [`crate::Transcript`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TranscriptOptions {
    pub virtualizer: VirtualizerOptions,

    /// The viewport follows new arrivals while its bottom edge is closer than this to the
    /// live edge.
    pub bottom_threshold: u32,

    /// Older pages are requested once the visible range starts within this many items of the
    /// oldest loaded item.
    pub top_margin: usize,

    /// Duration of the follow scroll. `0` jumps.
    pub follow_duration_ms: u64,
    pub follow_easing: Easing,
}

impl Default for TranscriptOptions {
    fn default() -> Self {
        Self {
            virtualizer: VirtualizerOptions::default(),
            bottom_threshold: 128,
            top_margin: 3,
            follow_duration_ms: 200,
            follow_easing: Easing::SmoothStep,
        }
    }
}

impl TranscriptOptions {
    pub fn new(virtualizer: VirtualizerOptions) -> Self {
        Self {
            virtualizer,
            ..Self::default()
        }
    }

    pub fn with_bottom_threshold(mut self, bottom_threshold: u32) -> Self {
        self.bottom_threshold = bottom_threshold;
        self
    }

    pub fn with_top_margin(mut self, top_margin: usize) -> Self {
        self.top_margin = top_margin;
        self
    }

    pub fn with_follow_animation(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.follow_duration_ms = duration_ms;
        self.follow_easing = easing;
        self
    }
}
