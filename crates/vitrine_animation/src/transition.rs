//! Style transitions
//!
//! CSS-transition-like progressions: a set of style channels interpolated
//! from a start snapshot to a target over a fixed duration, with an optional
//! delay and fill-forwards semantics. Driven by an external clock via
//! `tick`; nothing here reads wall time.

use crate::easing::Easing;

/// The style channels a transition can carry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransitionValues {
    pub opacity: Option<f32>,
    pub translate_y: Option<f32>,
}

impl TransitionValues {
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    pub fn translate_y(value: f32) -> Self {
        Self {
            translate_y: Some(value),
            ..Default::default()
        }
    }

    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn with_translate_y(mut self, value: f32) -> Self {
        self.translate_y = Some(value);
        self
    }

    /// Interpolate between two channel sets
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            translate_y: lerp_opt(self.translate_y, other.translate_y, t),
        }
    }
}

/// Helper to interpolate optional values
fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// A transition over style channels.
#[derive(Clone, Debug)]
pub struct StyleTransition {
    from: TransitionValues,
    to: TransitionValues,
    duration_ms: u32,
    delay_ms: u32,
    easing: Easing,
    /// Negative while waiting out the delay.
    current_time: f32,
    playing: bool,
}

impl StyleTransition {
    pub fn new(from: TransitionValues, to: TransitionValues, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            delay_ms: 0,
            easing: Easing::default(),
            current_time: 0.0,
            playing: false,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn start(&mut self) {
        self.current_time = -(self.delay_ms as f32);
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn progress(&self) -> f32 {
        if self.current_time < 0.0 || self.duration_ms == 0 {
            return if self.current_time >= 0.0 { 1.0 } else { 0.0 };
        }
        (self.current_time / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated channels. Holds the start values during the
    /// delay and the end values after completion.
    pub fn current(&self) -> TransitionValues {
        self.from.lerp(&self.to, self.easing.apply(self.progress()))
    }

    /// Advance by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        self.current_time += dt_ms;

        if self.current_time >= self.duration_ms as f32 {
            self.current_time = self.duration_ms as f32;
            self.playing = false;
        }
    }
}

/// A single-value eased progression, used for animated scrolling.
#[derive(Clone, Debug)]
pub struct ValueTransition {
    from: f32,
    to: f32,
    duration_ms: u32,
    easing: Easing,
    current_time: f32,
    playing: bool,
}

impl ValueTransition {
    pub fn new(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            current_time: 0.0,
            playing: false,
        }
    }

    pub fn start(&mut self) {
        self.current_time = 0.0;
        self.playing = true;
    }

    /// Redirect the in-flight progression toward a new target, starting from
    /// the current value.
    pub fn retarget(&mut self, to: f32) {
        self.from = self.value();
        self.to = to;
        self.current_time = 0.0;
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.current_time / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn value(&self) -> f32 {
        let progress = self.progress();
        if progress >= 1.0 {
            // Land exactly on the target, no float residue.
            return self.to;
        }
        let eased = self.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }

    /// Advance by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        self.current_time += dt_ms;

        if self.current_time >= self.duration_ms as f32 {
            self.current_time = self.duration_ms as f32;
            self.playing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_transition_holds_start_during_delay() {
        let mut t = StyleTransition::new(
            TransitionValues::opacity(0.0),
            TransitionValues::opacity(1.0),
            500,
        )
        .delay(800)
        .easing(Easing::Linear);

        t.start();
        t.tick(400.0);
        assert_eq!(t.current().opacity, Some(0.0));
        assert!(t.is_playing());

        // Through the delay and halfway into the transition.
        t.tick(650.0);
        let opacity = t.current().opacity.unwrap();
        assert!((opacity - 0.5).abs() < 1e-4);
    }

    #[test]
    fn style_transition_fills_forwards() {
        let mut t = StyleTransition::new(
            TransitionValues::opacity(0.0),
            TransitionValues::opacity(1.0),
            500,
        );
        t.start();
        t.tick(10_000.0);
        assert!(!t.is_playing());
        assert_eq!(t.current().opacity, Some(1.0));

        t.tick(100.0);
        assert_eq!(t.current().opacity, Some(1.0));
    }

    #[test]
    fn value_transition_reaches_target_exactly() {
        let mut t = ValueTransition::new(100.0, 900.0, 480, Easing::EaseInOut);
        t.start();

        let mut prev = 100.0;
        while t.is_playing() {
            t.tick(16.0);
            // Continuous monotone approach, no overshoot.
            assert!(t.value() >= prev - 1e-3);
            prev = t.value();
        }
        assert_eq!(t.value(), 900.0);
    }

    #[test]
    fn value_transition_retargets_from_current_position() {
        let mut t = ValueTransition::new(0.0, 1000.0, 400, Easing::Linear);
        t.start();
        t.tick(200.0);
        assert!((t.value() - 500.0).abs() < 1e-3);

        t.retarget(0.0);
        assert!(t.is_playing());
        assert!((t.value() - 500.0).abs() < 1e-3);
        t.tick(10_000.0);
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn lerp_merges_one_sided_channels() {
        let a = TransitionValues::opacity(0.0);
        let b = TransitionValues::opacity(1.0).with_translate_y(0.0);
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.opacity, Some(0.5));
        assert_eq!(mid.translate_y, Some(0.0));
    }
}
