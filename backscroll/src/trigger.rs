use crate::PageState;

/// Fires `load_more` when the visible range reaches the oldest loaded items.
///
/// A page that merged nothing while more history remains stalls the trigger until the visible
/// range leaves the top margin, so an odd source cannot make it spin.
#[derive(Clone, Debug)]
pub struct TopTrigger {
    margin: usize,
    stalled: bool,
}

impl TopTrigger {
    pub fn new(margin: usize) -> Self {
        Self {
            margin,
            stalled: false,
        }
    }

    pub fn should_load(&mut self, visible_start: usize, state: PageState) -> bool {
        if visible_start > self.margin {
            self.stalled = false;
            return false;
        }
        !self.stalled && state == PageState::Idle
    }

    pub fn record_merge(&mut self, merged: usize, state: PageState) {
        self.stalled = merged == 0 && state != PageState::Exhausted;
        if self.stalled {
            vwarn!("empty page with more history remaining; top trigger stalled");
        }
    }
}
