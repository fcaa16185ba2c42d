#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FollowState {
    Following,
    NotFollowing,
}

/// Decides whether new arrivals scroll the viewport to the live edge.
///
/// The state is re-evaluated from viewport events only (`update`), never from arrivals, so a
/// reader who scrolls away stops following at once and one who comes back resumes on the next
/// arrival.
#[derive(Clone, Debug)]
pub struct FollowController {
    bottom_threshold: u64,
    state: FollowState,
}

impl FollowController {
    /// Starts in `Following`: a fresh transcript opens at the live edge.
    pub fn new(bottom_threshold: u32) -> Self {
        Self {
            bottom_threshold: bottom_threshold as u64,
            state: FollowState::Following,
        }
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn is_following(&self) -> bool {
        self.state == FollowState::Following
    }

    /// Re-evaluates from the distance between the viewport's bottom edge and the live edge.
    pub fn update(&mut self, distance_to_live_edge: u64) -> FollowState {
        let next = if distance_to_live_edge < self.bottom_threshold {
            FollowState::Following
        } else {
            FollowState::NotFollowing
        };
        if next != self.state {
            vdebug!(?next, distance_to_live_edge, "follow state changed");
            self.state = next;
        }
        next
    }

    /// Whether a new arrival should trigger a scroll to the live edge.
    pub fn on_arrival(&self) -> bool {
        self.is_following()
    }
}
