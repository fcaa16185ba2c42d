use alloc::vec::Vec;

/// Running extent sums for a layout that grows at both ends.
///
/// Positions are split at a fixed origin: `history` holds the positions above it, nearest
/// first, and `live` holds the origin and everything after it. A prepend pushes onto `history`
/// and an append pushes onto `live`, so neither moves existing entries.
///
/// The value stored per position is its extent plus the trailing gap (the bottom-most position
/// carries none), so `start(p)` is the offset of position `p` relative to the first one.
#[derive(Clone, Debug, Default)]
pub(crate) struct PrefixSums {
    history: GrowTree,
    live: GrowTree,
}

impl PrefixSums {
    /// Lays out `values` top to bottom below the origin.
    pub(crate) fn from_values(values: impl Iterator<Item = u64>) -> Self {
        let mut sums = Self::default();
        for value in values {
            sums.live.push(value);
        }
        sums
    }

    pub(crate) fn total(&self) -> u64 {
        self.history.total.saturating_add(self.live.total)
    }

    /// Inserts a position above the current first one.
    pub(crate) fn push_front(&mut self, value: u64) {
        self.history.push(value);
    }

    /// Inserts a position after the current last one.
    pub(crate) fn push_back(&mut self, value: u64) {
        self.live.push(value);
    }

    pub(crate) fn add(&mut self, position: usize, delta: i64) {
        let above = self.history.len();
        if position < above {
            self.history.add(above - 1 - position, delta);
        } else {
            self.live.add(position - above, delta);
        }
    }

    /// Sum of the values of the first `count` positions.
    pub(crate) fn start(&self, count: usize) -> u64 {
        let above = self.history.len();
        if count <= above {
            self.history.total - self.history.prefix(above - count)
        } else {
            self.history.total.saturating_add(self.live.prefix(count - above))
        }
    }

    /// Largest `count` with `start(count) <= target`: the position containing `target`
    /// (unclamped).
    pub(crate) fn position_at(&self, target: u64) -> usize {
        let above = self.history.len();
        let history_total = self.history.total;
        if target >= history_total {
            return above + self.live.count_within(target - history_total);
        }
        // start(q) = history_total - history.prefix(above - q); the smallest `j = above - q`
        // with history.prefix(j) >= history_total - target gives the largest q.
        let need = history_total - target;
        let j = self.history.count_within(need - 1) + 1;
        above - j.min(above)
    }
}

/// An append-only binary indexed tree.
#[derive(Clone, Debug, Default)]
struct GrowTree {
    // Node `i` (1-based) is stored at `nodes[i - 1]` and covers `(i - lowbit(i), i]`.
    nodes: Vec<u64>,
    total: u64,
}

impl GrowTree {
    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, value: u64) {
        let i = self.nodes.len() + 1;
        let covered = self
            .prefix(i - 1)
            .saturating_sub(self.prefix(i - lowbit(i)));
        self.nodes.push(covered.saturating_add(value));
        self.total = self.total.saturating_add(value);
    }

    fn add(&mut self, index: usize, delta: i64) {
        let n = self.nodes.len();
        if index >= n || delta == 0 {
            return;
        }
        let mut i = index + 1;
        while i <= n {
            self.nodes[i - 1] = shifted(self.nodes[i - 1], delta);
            i += lowbit(i);
        }
        self.total = shifted(self.total, delta);
    }

    fn prefix(&self, count: usize) -> u64 {
        let mut i = count.min(self.nodes.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.nodes[i - 1]);
            i &= i - 1;
        }
        sum
    }

    /// Largest `count` with `prefix(count) <= target`.
    fn count_within(&self, target: u64) -> usize {
        let n = self.nodes.len();
        if n == 0 {
            return 0;
        }
        let mut step = 1usize << (usize::BITS - 1 - n.leading_zeros());
        let mut count = 0usize;
        let mut rest = target;
        while step > 0 {
            let next = count + step;
            if next <= n && self.nodes[next - 1] <= rest {
                rest -= self.nodes[next - 1];
                count = next;
            }
            step >>= 1;
        }
        count
    }
}

fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn shifted(value: u64, delta: i64) -> u64 {
    if delta >= 0 {
        value.saturating_add(delta as u64)
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}
