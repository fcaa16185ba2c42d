/// An adapter-driven scroll animation between two offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: u64,
    pub to: u64,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: u64, to: u64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> u64 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);
        let from = self.from as f64;
        let to = self.to as f64;
        (from + (to - from) * eased).round().max(0.0) as u64
    }

    /// Moves both endpoints by `delta` pixels, keeping the clock. Used when content above the
    /// viewport changed size mid-animation.
    pub fn shift(&mut self, delta: i64) {
        self.from = shift_offset(self.from, delta);
        self.to = shift_offset(self.to, delta);
    }

    /// Continues from the current position toward `to`, restarting the clock.
    pub fn retarget(&mut self, now_ms: u64, to: u64) {
        let from = self.sample(now_ms);
        *self = Self::new(from, to, now_ms, self.duration_ms, self.easing);
    }
}

fn shift_offset(offset: u64, delta: i64) -> u64 {
    if delta >= 0 {
        offset.saturating_add(delta as u64)
    } else {
        offset.saturating_sub(delta.unsigned_abs())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    #[default]
    SmoothStep,
    EaseOutCubic,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}
