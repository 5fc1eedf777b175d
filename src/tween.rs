use crate::{
    core::NodeId,
    ease::Ease,
    error::{GardenError, GardenResult},
};

/// Animatable properties of a scene node. One tween may be live per
/// (node, prop) pair at a time; starting another overwrites it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Prop {
    X,
    Y,
    Rotation,
    Scale,
    Opacity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Repeat {
    /// Play once and complete.
    Once,
    /// Ping-pong between `from` and `to` forever; never completes, only
    /// overwritten or canceled.
    Yoyo,
}

/// What the controller does when a tween finishes. Completion effects are
/// plain data so choreography stays an explicit state machine instead of
/// nested callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Effect {
    None,
    /// Entrance finished: the instance becomes idle and starts swaying.
    Settle,
    /// Wind gust finished: restart the instance's sway.
    WindRebound,
    /// Butterfly reached the far edge: remove it.
    Despawn,
    /// First half of a bounce: play the drop back down.
    BounceDown,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    pub node: NodeId,
    pub prop: Prop,
    pub from: f64,
    pub to: f64,
    /// Absolute start time in seconds; starts in the future act as delays.
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
    pub repeat: Repeat,
    pub effect: Effect,
}

impl Tween {
    pub fn once(node: NodeId, prop: Prop, from: f64, to: f64, start: f64, duration: f64) -> Self {
        Self {
            node,
            prop,
            from,
            to,
            start,
            duration,
            ease: Ease::Linear,
            repeat: Repeat::Once,
            effect: Effect::None,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.repeat = Repeat::Yoyo;
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    pub fn validate(&self) -> GardenResult<()> {
        if !(self.from.is_finite() && self.to.is_finite()) {
            return Err(GardenError::animation("tween endpoints must be finite"));
        }
        if !self.start.is_finite() || !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(GardenError::animation(
                "tween start must be finite and duration >= 0",
            ));
        }
        if matches!(self.repeat, Repeat::Yoyo) && self.duration == 0.0 {
            return Err(GardenError::animation(
                "looping tweens need a nonzero duration",
            ));
        }
        Ok(())
    }

    pub fn sample(&self, now: f64) -> f64 {
        if now <= self.start {
            return self.from;
        }
        if self.duration <= 0.0 {
            return self.to;
        }
        let cycles = (now - self.start) / self.duration;
        match self.repeat {
            Repeat::Once => {
                let t = cycles.min(1.0);
                self.from + (self.to - self.from) * self.ease.apply(t)
            }
            Repeat::Yoyo => {
                let phase = cycles.floor() as u64;
                let eased = self.ease.apply(cycles.fract());
                let pos = if phase.is_multiple_of(2) {
                    eased
                } else {
                    1.0 - eased
                };
                self.from + (self.to - self.from) * pos
            }
        }
    }

    pub fn finished(&self, now: f64) -> bool {
        matches!(self.repeat, Repeat::Once) && now >= self.start + self.duration
    }
}

/// Emitted by [`Animator::advance`] for every finished tween, in the order
/// the tweens were started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Completed {
    pub node: NodeId,
    pub prop: Prop,
    pub value: f64,
    pub effect: Effect,
}

/// Animation capability of the scene controller. The real engine tweens
/// values over time; [`StaticAnimator`] degrades every feature to static
/// placement when motion is unavailable, without failing.
pub trait Animator {
    /// Start a tween, overwriting any live tween on the same (node, prop).
    fn play(&mut self, tween: Tween);

    fn cancel(&mut self, node: NodeId, prop: Prop);

    fn cancel_node(&mut self, node: NodeId);

    fn reset(&mut self);

    fn is_active(&self, node: NodeId, prop: Prop) -> bool;

    /// True when the live tween on (node, prop) repeats forever — the shape
    /// of an idle sway or a butterfly flutter.
    fn is_looping(&self, node: NodeId, prop: Prop) -> bool;

    /// Current animated value for a property, if a tween drives it.
    fn value(&self, node: NodeId, prop: Prop, now: f64) -> Option<f64>;

    /// Advance to `now`, dropping finished tweens and reporting them.
    fn advance(&mut self, now: f64) -> Vec<Completed>;
}

#[derive(Debug, Default)]
pub struct TweenAnimator {
    // Start order; also completion-report order.
    active: Vec<Tween>,
}

impl TweenAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }
}

impl Animator for TweenAnimator {
    fn play(&mut self, tween: Tween) {
        if let Err(err) = tween.validate() {
            tracing::warn!(%err, node = ?tween.node, "dropping invalid tween");
            return;
        }
        self.active
            .retain(|t| !(t.node == tween.node && t.prop == tween.prop));
        self.active.push(tween);
    }

    fn cancel(&mut self, node: NodeId, prop: Prop) {
        self.active.retain(|t| !(t.node == node && t.prop == prop));
    }

    fn cancel_node(&mut self, node: NodeId) {
        self.active.retain(|t| t.node != node);
    }

    fn reset(&mut self) {
        self.active.clear();
    }

    fn is_active(&self, node: NodeId, prop: Prop) -> bool {
        self.active.iter().any(|t| t.node == node && t.prop == prop)
    }

    fn is_looping(&self, node: NodeId, prop: Prop) -> bool {
        self.active
            .iter()
            .any(|t| t.node == node && t.prop == prop && t.repeat == Repeat::Yoyo)
    }

    fn value(&self, node: NodeId, prop: Prop, now: f64) -> Option<f64> {
        self.active
            .iter()
            .find(|t| t.node == node && t.prop == prop)
            .map(|t| t.sample(now))
    }

    fn advance(&mut self, now: f64) -> Vec<Completed> {
        let mut done = Vec::new();
        self.active.retain(|t| {
            if t.finished(now) {
                done.push(Completed {
                    node: t.node,
                    prop: t.prop,
                    value: t.to,
                    effect: t.effect,
                });
                false
            } else {
                true
            }
        });
        done
    }
}

/// No-motion fallback: finite tweens complete at the next advance with their
/// end value, infinite ones are ignored entirely. Scene choreography still
/// sequences; nothing moves.
#[derive(Debug, Default)]
pub struct StaticAnimator {
    pending: Vec<Completed>,
}

impl StaticAnimator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Animator for StaticAnimator {
    fn play(&mut self, tween: Tween) {
        if matches!(tween.repeat, Repeat::Once) {
            self.pending.push(Completed {
                node: tween.node,
                prop: tween.prop,
                value: tween.to,
                effect: tween.effect,
            });
        }
    }

    fn cancel(&mut self, node: NodeId, prop: Prop) {
        self.pending
            .retain(|c| !(c.node == node && c.prop == prop));
    }

    fn cancel_node(&mut self, node: NodeId) {
        self.pending.retain(|c| c.node != node);
    }

    fn reset(&mut self) {
        self.pending.clear();
    }

    fn is_active(&self, _node: NodeId, _prop: Prop) -> bool {
        false
    }

    fn is_looping(&self, _node: NodeId, _prop: Prop) -> bool {
        false
    }

    fn value(&self, _node: NodeId, _prop: Prop, _now: f64) -> Option<f64> {
        None
    }

    fn advance(&mut self, _now: f64) -> Vec<Completed> {
        std::mem::take(&mut self.pending)
    }
}
