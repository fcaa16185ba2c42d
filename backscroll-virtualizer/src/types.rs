use alloc::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VirtualRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub index: usize,
    /// Start offset in the scroll axis (includes `padding_start`).
    pub start: u64,
    /// Size in the scroll axis (excludes `gap`).
    pub size: u32,
}

impl VirtualItem {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

/// The overscanned set of positions to materialize for one render pass.
///
/// `offsets[i]` and `extents[i]` describe position `start_index + i`. Measurements taken for
/// this window must be reported with its `generation`; a later prepend invalidates it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Window {
    pub generation: u64,
    pub start_index: usize,
    pub end_index: usize, // exclusive
    pub offsets: Vec<u64>,
    pub extents: Vec<u32>,
}

impl Window {
    pub fn range(&self) -> VirtualRange {
        VirtualRange {
            start_index: self.start_index,
            end_index: self.end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn items(&self) -> impl Iterator<Item = VirtualItem> + '_ {
        self.offsets
            .iter()
            .zip(self.extents.iter())
            .enumerate()
            .map(|(i, (&start, &size))| VirtualItem {
                index: self.start_index + i,
                start,
                size,
            })
    }
}

/// What happened to a reported measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureOutcome {
    /// The measurement matched the extent already used for layout.
    Unchanged,
    /// The extent changed by `delta`; `correction` was added to the scroll offset so content
    /// at the viewport start did not move.
    Resized { delta: i64, correction: i64 },
    /// The position no longer exists or was shifted since the window was computed.
    Stale,
}

impl MeasureOutcome {
    pub fn correction(&self) -> i64 {
        match *self {
            Self::Resized { correction, .. } => correction,
            Self::Unchanged | Self::Stale => 0,
        }
    }
}

/// Summary of one measure-then-correct loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettleReport {
    /// Passes that measured at least one position.
    pub passes: usize,
    pub measured: usize,
    /// Positions the measure hook could not provide (already unmounted).
    pub unavailable: usize,
    /// Total scroll offset correction applied.
    pub correction: i64,
    /// `false` when the pass cap was hit with unmeasured positions still in view.
    pub converged: bool,
}
