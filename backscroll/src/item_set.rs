use std::collections::{HashMap, HashSet};

use snafu::ensure;

use crate::error::{DuplicateItemSnafu, LiveOutOfOrderSnafu, PageOutOfOrderSnafu, Result};
use crate::{Item, ItemKey};

/// The transcript's items: a live range growing at the newest end and a historical range
/// growing at the oldest end.
///
/// Two index spaces exist:
/// - logical, newest-first: `get(0)` is the newest item
/// - layout, top to bottom: `at_layout(0)` is the oldest loaded item
///
/// Every item gets a stable ordinal when inserted (decreasing for history, increasing for
/// live items), so `layout_index_of` stays `O(1)` across prepends.
#[derive(Clone, Debug)]
pub struct ItemSet<K> {
    historical: Vec<Item<K>>, // newest-first
    live: Vec<Item<K>>,       // oldest-first
    ordinals: HashMap<K, i64>,
    top: i64,
    next_live: i64,
}

impl<K> Default for ItemSet<K> {
    fn default() -> Self {
        Self {
            historical: Vec::new(),
            live: Vec::new(),
            ordinals: HashMap::new(),
            top: 0,
            next_live: 0,
        }
    }
}

impl<K: ItemKey> ItemSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.historical.len() + self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.historical.is_empty() && self.live.is_empty()
    }

    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    pub fn historical_len(&self) -> usize {
        self.historical.len()
    }

    /// Item at a logical (newest-first) index.
    pub fn get(&self, index: usize) -> Option<&Item<K>> {
        let live = self.live.len();
        if index < live {
            self.live.get(live - 1 - index)
        } else {
            self.historical.get(index - live)
        }
    }

    /// Item at a layout (oldest-first) index.
    pub fn at_layout(&self, index: usize) -> Option<&Item<K>> {
        let historical = self.historical.len();
        if index < historical {
            self.historical.get(historical - 1 - index)
        } else {
            self.live.get(index - historical)
        }
    }

    pub fn newest(&self) -> Option<&Item<K>> {
        self.get(0)
    }

    pub fn oldest(&self) -> Option<&Item<K>> {
        self.at_layout(0)
    }

    pub fn contains(&self, id: &K) -> bool {
        self.ordinals.contains_key(id)
    }

    pub fn layout_index_of(&self, id: &K) -> Option<usize> {
        let ordinal = *self.ordinals.get(id)?;
        usize::try_from(ordinal - self.top).ok()
    }

    pub fn logical_index_of(&self, id: &K) -> Option<usize> {
        let layout = self.layout_index_of(id)?;
        Some(self.len() - 1 - layout)
    }

    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Item<K>> + '_ {
        self.live.iter().rev().chain(self.historical.iter())
    }

    pub fn iter_oldest_first(&self) -> impl Iterator<Item = &Item<K>> + '_ {
        self.historical.iter().rev().chain(self.live.iter())
    }

    /// Checks that `page` (newest-first) can follow the oldest loaded item.
    pub fn check_page(&self, page: &[Item<K>]) -> Result<()> {
        let mut seen = HashSet::with_capacity(page.len());
        let mut previous = self.oldest().map(|it| it.timestamp_ms());
        for item in page {
            ensure!(
                !self.contains(item.id()) && seen.insert(item.id()),
                DuplicateItemSnafu {
                    id: format!("{:?}", item.id()),
                }
            );
            if let Some(previous_ms) = previous {
                ensure!(
                    item.timestamp_ms() <= previous_ms,
                    PageOutOfOrderSnafu {
                        id: format!("{:?}", item.id()),
                        timestamp_ms: item.timestamp_ms(),
                        previous_ms,
                    }
                );
            }
            previous = Some(item.timestamp_ms());
        }
        Ok(())
    }

    /// Appends an older page (newest-first) to the historical range.
    ///
    /// The page is validated as a whole first; on error nothing is inserted. Returns the number
    /// of items merged, which is also how far every existing layout index moved.
    pub fn extend_older(&mut self, page: Vec<Item<K>>) -> Result<usize> {
        self.check_page(&page)?;
        let n = page.len();
        self.historical.reserve(n);
        for item in page {
            self.top -= 1;
            self.ordinals.insert(item.id().clone(), self.top);
            self.historical.push(item);
        }
        Ok(n)
    }

    /// Inserts a newly arrived item at the newest end.
    ///
    /// Items older than the current newest item are rejected; equal timestamps keep arrival
    /// order.
    pub fn push_live(&mut self, item: Item<K>) -> Result<()> {
        ensure!(
            !self.contains(item.id()),
            DuplicateItemSnafu {
                id: format!("{:?}", item.id()),
            }
        );
        if let Some(newest) = self.newest() {
            ensure!(
                item.timestamp_ms() >= newest.timestamp_ms(),
                LiveOutOfOrderSnafu {
                    id: format!("{:?}", item.id()),
                    timestamp_ms: item.timestamp_ms(),
                    newest_ms: newest.timestamp_ms(),
                }
            );
        }
        self.ordinals.insert(item.id().clone(), self.next_live);
        self.next_live += 1;
        self.live.push(item);
        Ok(())
    }
}
