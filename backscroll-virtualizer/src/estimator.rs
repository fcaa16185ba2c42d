use alloc::collections::VecDeque;

/// Measured extents by layout position, with a constant estimate for the gaps.
///
/// Positions that were never rendered hold `None` and report `default_extent`. Prepending
/// `n` positions pushes `n` unmeasured slots at the front, so every previously measured key
/// `k` is read back at `k + n` without touching the existing entries.
#[derive(Clone, Debug)]
pub struct SizeEstimator {
    measured: VecDeque<Option<u32>>,
    default_extent: u32,
}

impl SizeEstimator {
    pub fn new(len: usize, default_extent: u32) -> Self {
        let mut measured = VecDeque::with_capacity(len);
        measured.resize(len, None);
        Self {
            measured,
            default_extent,
        }
    }

    pub fn len(&self) -> usize {
        self.measured.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measured.is_empty()
    }

    pub fn default_extent(&self) -> u32 {
        self.default_extent
    }

    /// Returns the measured extent, or `None` if the position was never measured.
    pub fn measured(&self, index: usize) -> Option<u32> {
        self.measured.get(index).copied().flatten()
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured(index).is_some()
    }

    /// The extent used for layout: measured if known, estimated otherwise.
    pub fn extent(&self, index: usize) -> u32 {
        self.measured(index).unwrap_or(self.default_extent)
    }

    /// Number of measured positions.
    pub fn measured_count(&self) -> usize {
        self.measured.iter().filter(|m| m.is_some()).count()
    }

    /// Records a measurement and returns the extent previously used for layout.
    ///
    /// Out-of-range positions are ignored and return `None`.
    pub fn record(&mut self, index: usize, extent: u32) -> Option<u32> {
        let default_extent = self.default_extent;
        let slot = self.measured.get_mut(index)?;
        let prev = slot.unwrap_or(default_extent);
        *slot = Some(extent);
        Some(prev)
    }

    /// Remaps every existing position `k` to `k + n` and opens `n` unmeasured slots at the front.
    pub fn shift(&mut self, n: usize) {
        self.measured.reserve(n);
        for _ in 0..n {
            self.measured.push_front(None);
        }
    }

    /// Opens `n` unmeasured slots at the end.
    pub fn extend(&mut self, n: usize) {
        let len = self.measured.len().saturating_add(n);
        self.measured.resize(len, None);
    }

    pub fn extents(&self) -> impl ExactSizeIterator<Item = u32> + '_ {
        let default_extent = self.default_extent;
        self.measured.iter().map(move |m| m.unwrap_or(default_extent))
    }
}
