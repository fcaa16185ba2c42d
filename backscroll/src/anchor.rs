use core::fmt;

use backscroll_virtualizer::Virtualizer;

/// A reference point that preserves visual position across content mutations.
///
/// The anchor is the item whose start is closest to the scroll offset, plus the signed
/// distance from that start to the offset (negative when the item starts below the offset).
/// It is restored by item identity, not by index: a prepend of `k` items moves every index by
/// `k` but leaves identities alone.
#[derive(Clone, PartialEq, Eq)]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// Layout index at capture time. Informational only; `restore_anchor` looks the key up.
    pub reference_index: usize,
    pub offset_within_reference: i64,
}

impl<K: fmt::Debug> fmt::Debug for ScrollAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("key", &self.key)
            .field("reference_index", &self.reference_index)
            .field("offset_within_reference", &self.offset_within_reference)
            .finish()
    }
}

/// Captures an anchor at the current scroll offset.
///
/// `key_at(layout_index)` maps a position to its item identity. Returns `None` when the list is
/// empty.
pub fn capture_anchor<K>(
    v: &Virtualizer,
    key_at: impl FnOnce(usize) -> Option<K>,
) -> Option<ScrollAnchor<K>> {
    let offset = v.scroll_offset();
    let covering = v.index_at_offset(offset)?;
    let start = v.item_start(covering)?;

    let (index, start) = match v.item_start(covering + 1) {
        Some(next) if next > offset && next - offset < offset.saturating_sub(start) => {
            (covering + 1, next)
        }
        _ => (covering, start),
    };

    Some(ScrollAnchor {
        key: key_at(index)?,
        reference_index: index,
        offset_within_reference: offset as i64 - start as i64,
    })
}

/// Moves the scroll offset so the anchored item sits where it was at capture time.
///
/// `index_of(key)` maps an identity to its *current* layout index. Returns `true` when the
/// anchor was applied.
pub fn restore_anchor<K>(
    v: &mut Virtualizer,
    anchor: &ScrollAnchor<K>,
    index_of: impl FnOnce(&K) -> Option<usize>,
) -> bool {
    let Some(index) = index_of(&anchor.key) else {
        return false;
    };
    let Some(start) = v.item_start(index) else {
        return false;
    };
    let target = (start as i64).saturating_add(anchor.offset_within_reference);
    v.set_scroll_offset_clamped(target.max(0) as u64);
    true
}
