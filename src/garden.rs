use crate::{
    config::{GardenConfig, Viewport},
    core::{NodeId, Point, Rng, Seconds, Vec2},
    error::GardenResult,
    ease::Ease,
    palette,
    scene::{DecorationKind, FlowerSpec, NodeProps, Phase, Scene, SceneNode},
    templates::{self, FlowerKind},
    tween::{Animator, Completed, Effect, Prop, Tween, TweenAnimator},
};

/// Pointer-to-graphic centering applied when placing a flower at a click.
const CLICK_OFFSET: Vec2 = Vec2::new(40.0, 60.0);

/// Sparkle bursts anchor at this offset from a flower's top-left corner.
const SPARKLE_ANCHOR: Vec2 = Vec2::new(40.0, 30.0);

const SPARKLE_BURST: usize = 5;
const SPARKLE_LIFETIME: Seconds = 1.0;

const ENTRANCE_EASE: Ease = Ease::BackOut { overshoot: 1.7 };
const RELEASE_EASE: Ease = Ease::ElasticOut {
    amplitude: 1.0,
    period: 0.5,
};

/// How a freshly placed flower arrives in the scene.
#[derive(Clone, Copy, Debug)]
pub enum Entrance {
    /// Fall in from above while fading and growing (initial population,
    /// playground generate).
    Drop { height: f64, delay: Seconds },
    /// Pop in from nothing with a half spin (double-click placement).
    Spin,
}

struct DragState {
    node: NodeId,
    grab: Vec2,
    last_x: f64,
}

#[derive(Clone, Copy, Debug)]
struct PendingSparkle {
    at: Seconds,
    point: Point,
}

/// Owns the live scene and drives its choreography: entrances, idle sway,
/// drag, wind gusts, butterflies and sparkles. Single-threaded and clock
/// driven; the host calls [`Garden::advance`] from its timer loop and routes
/// pointer input in.
pub struct Garden {
    config: GardenConfig,
    scene: Scene,
    animator: Box<dyn Animator>,
    rng: Rng,
    now: Seconds,
    next_wind_at: Seconds,
    next_butterfly_at: Seconds,
    pending_sparkles: Vec<PendingSparkle>,
    drag: Option<DragState>,
    ambient_spawns: bool,
}

impl Garden {
    pub fn new(config: GardenConfig) -> GardenResult<Self> {
        Self::with_animator(config, Box::new(TweenAnimator::new()))
    }

    /// Construct with an explicit animation capability. Hosts without a
    /// motion engine pass a [`crate::tween::StaticAnimator`]; everything
    /// still sequences, nothing moves.
    pub fn with_animator(config: GardenConfig, animator: Box<dyn Animator>) -> GardenResult<Self> {
        config.validate()?;
        let mut rng = Rng::labeled(config.seed, "garden");
        let next_wind_at = rng.range(config.wind_interval_secs[0], config.wind_interval_secs[1]);
        let scene = Scene::new(config.viewport.bounds());
        Ok(Self {
            config,
            scene,
            animator,
            rng,
            now: 0.0,
            next_wind_at,
            // The first butterfly appears as soon as the clock starts.
            next_butterfly_at: 0.0,
            pending_sparkles: Vec::new(),
            drag: None,
            ambient_spawns: true,
        })
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn now(&self) -> Seconds {
        self.now
    }

    /// Disable the periodic wind/butterfly timers (playground canvases run
    /// their effects from buttons instead).
    pub fn set_ambient_spawns(&mut self, on: bool) {
        self.ambient_spawns = on;
    }

    /// One draw from the garden's deterministic stream, for callers that
    /// jitter placements with the same replayability as the scene itself.
    pub(crate) fn rng_unit(&mut self) -> f64 {
        self.rng.next_f64()
    }

    /// Committed properties of a node with any live tween values applied.
    pub fn resolved_props(&self, id: NodeId) -> Option<NodeProps> {
        let node = self.scene.nodes().iter().find(|n| n.id() == id)?;
        let mut props = *node.props();
        for (prop, slot) in [
            (Prop::X, &mut props.x),
            (Prop::Y, &mut props.y),
            (Prop::Rotation, &mut props.rotation),
            (Prop::Scale, &mut props.scale),
            (Prop::Opacity, &mut props.opacity),
        ] {
            if let Some(v) = self.animator.value(id, prop, self.now) {
                *slot = v;
            }
        }
        Some(props)
    }

    /// True while the instance's idle sway oscillation is running.
    pub fn is_swaying(&self, id: NodeId) -> bool {
        self.animator.is_looping(id, Prop::Rotation)
    }

    /// Fill the scene with its initial population: one flower per density
    /// step of viewport width, capped, scattered across the upper ground
    /// band with staggered drop entrances.
    #[tracing::instrument(skip(self))]
    pub fn populate(&mut self) -> GardenResult<()> {
        let count = self.config.initial_flower_count();
        let w = self.config.viewport.width;
        let h = self.config.viewport.height;
        let ground_top = self.config.ground_top();

        for i in 0..count {
            let kind = *self.rng.pick(&FlowerKind::ALL);
            let spec = FlowerSpec {
                kind,
                color: palette::pick_color(&mut self.rng, kind).to_hex(),
                scale: self.rng.range(0.7, 1.3),
            };
            let x = 50.0 + self.rng.next_f64() * (w - 150.0);
            let y = ground_top - 50.0 + self.rng.next_f64() * (h * 0.25);
            self.spawn_flower(
                spec,
                Point::new(x, y),
                Entrance::Drop {
                    height: 200.0,
                    delay: i as f64 * 0.1,
                },
            )?;
        }
        tracing::info!(count, "populated garden");
        Ok(())
    }

    /// Place one flower of an explicit spec. Used by the playground and the
    /// double-click path; the initial population goes through
    /// [`Garden::populate`].
    pub fn spawn_flower(
        &mut self,
        spec: FlowerSpec,
        position: Point,
        entrance: Entrance,
    ) -> GardenResult<NodeId> {
        let graphic = templates::generate(spec.kind, Some(&spec.color), spec.scale)?;
        let base_rotation = self.rng.range(-10.0, 10.0);
        let id = self
            .scene
            .insert_flower(spec, position, base_rotation, graphic);

        match entrance {
            Entrance::Drop { height, delay } => {
                let start = self.now + delay;
                self.animator.play(
                    Tween::once(id, Prop::Y, position.y - height, position.y, start, 0.8)
                        .ease(ENTRANCE_EASE)
                        .effect(Effect::Settle),
                );
                self.animator.play(
                    Tween::once(id, Prop::Opacity, 0.0, 1.0, start, 0.8).ease(ENTRANCE_EASE),
                );
                self.animator
                    .play(Tween::once(id, Prop::Scale, 0.5, 1.0, start, 0.8).ease(ENTRANCE_EASE));
            }
            Entrance::Spin => {
                self.animator.play(
                    Tween::once(id, Prop::Rotation, 180.0, base_rotation, self.now, 0.5)
                        .ease(ENTRANCE_EASE)
                        .effect(Effect::Settle),
                );
                self.animator
                    .play(Tween::once(id, Prop::Scale, 0.0, 1.0, self.now, 0.5).ease(ENTRANCE_EASE));
            }
        }
        Ok(id)
    }

    /// Double-click on empty ground: add a random flower centered under the
    /// pointer and celebrate with sparkles. Clicks landing on an existing
    /// flower do nothing.
    pub fn add_at(&mut self, point: Point) -> GardenResult<Option<NodeId>> {
        if self.hit_test(point).is_some() {
            return Ok(None);
        }
        let kind = *self.rng.pick(&FlowerKind::ALL);
        let spec = FlowerSpec {
            kind,
            color: palette::pick_color(&mut self.rng, kind).to_hex(),
            scale: self.rng.range(0.7, 1.3),
        };
        let id = self.spawn_flower(spec, point - CLICK_OFFSET, Entrance::Spin)?;
        self.spawn_sparkles(point);
        Ok(Some(id))
    }

    fn start_sway(&mut self, id: NodeId) {
        let Some(flower) = self.scene.flower(id) else {
            return;
        };
        let base = flower.base_rotation;
        let amount = self.rng.range(3.0, 7.0);
        let period = self.rng.range(2.0, 4.0);
        self.animator.play(
            Tween::once(id, Prop::Rotation, base, base + amount, self.now, period)
                .ease(Ease::InOutSine)
                .yoyo(),
        );
    }

    /// Topmost flower whose rectangle contains the point.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        for node in self.scene.nodes().iter().rev() {
            if let SceneNode::Flower(f) = node {
                let props = self.resolved_props(f.id)?;
                let hit = point.x >= props.x
                    && point.x <= props.x + f.graphic.width
                    && point.y >= props.y
                    && point.y <= props.y + f.graphic.height;
                if hit {
                    return Some(f.id);
                }
            }
        }
        None
    }

    /// Begin dragging the topmost flower under the pointer. Instances still
    /// entering are not draggable; the grab cancels the sway outright.
    pub fn pointer_down(&mut self, point: Point) -> Option<NodeId> {
        let id = self.hit_test(point)?;
        if self.scene.flower(id)?.phase != Phase::Idle {
            return None;
        }
        let props = self.resolved_props(id)?;

        self.drag = Some(DragState {
            node: id,
            grab: point - Point::new(props.x, props.y),
            last_x: point.x,
        });
        if let Some(f) = self.scene.flower_mut(id) {
            f.phase = Phase::Dragging;
        }

        self.animator.cancel(id, Prop::Rotation);
        self.animator.play(
            Tween::once(id, Prop::Scale, props.scale, 1.1, self.now, 0.3).ease(ENTRANCE_EASE),
        );
        self.animator.play(
            Tween::once(id, Prop::Rotation, props.rotation, 0.0, self.now, 0.3)
                .ease(ENTRANCE_EASE),
        );
        Some(id)
    }

    /// Track the pointer: position follows it (clamped to the scene bounds)
    /// and rotation leans into the direction of travel.
    pub fn pointer_move(&mut self, point: Point) {
        let Some(drag) = &self.drag else {
            return;
        };
        let id = drag.node;
        let grab = drag.grab;
        let last_x = drag.last_x;

        let Some(flower) = self.scene.flower(id) else {
            return;
        };
        let (gw, gh) = (flower.graphic.width, flower.graphic.height);
        let b = self.scene.bounds;
        let x = (point.x - grab.x).clamp(b.x0, (b.x1 - gw).max(b.x0));
        let y = (point.y - grab.y).clamp(b.y0, (b.y1 - gh).max(b.y0));

        let current = self.resolved_props(id).map_or(0.0, |p| p.rotation);
        if let Some(f) = self.scene.flower_mut(id) {
            f.props.x = x;
            f.props.y = y;
        }

        let delta = point.x - last_x;
        if delta != 0.0 {
            let lean = if delta > 0.0 { 10.0 } else { -10.0 };
            self.animator.play(
                Tween::once(id, Prop::Rotation, current, lean, self.now, 0.1).ease(Ease::OutQuad),
            );
        }
        if let Some(d) = self.drag.as_mut() {
            d.last_x = point.x;
        }
    }

    /// Release: spring scale and rotation back to rest, burst sparkles at
    /// the release point, then resume swaying with fresh parameters.
    pub fn pointer_up(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let id = drag.node;
        let Some(props) = self.resolved_props(id) else {
            return;
        };
        let Some(flower) = self.scene.flower_mut(id) else {
            return;
        };
        flower.phase = Phase::Idle;
        let base = flower.base_rotation;

        self.animator.play(
            Tween::once(id, Prop::Scale, props.scale, 1.0, self.now, 0.5).ease(RELEASE_EASE),
        );
        self.animator.play(
            Tween::once(id, Prop::Rotation, props.rotation, base, self.now, 0.5)
                .ease(RELEASE_EASE)
                .effect(Effect::Settle),
        );
        self.spawn_sparkles(Point::new(props.x, props.y) + SPARKLE_ANCHOR);
    }

    /// Scene-wide gust: every non-dragging flower leans a random direction
    /// by the gust strength, then resumes swaying as it settles.
    #[tracing::instrument(skip(self))]
    pub fn wind_gust(&mut self) {
        let strength = self.rng.range(8.0, 20.0);
        let targets: Vec<NodeId> = self
            .scene
            .flowers()
            .filter(|f| f.phase != Phase::Dragging)
            .map(|f| f.id)
            .collect();
        tracing::debug!(strength, targets = targets.len(), "wind gust");

        for id in targets {
            let Some(props) = self.resolved_props(id) else {
                continue;
            };
            let offset = strength * self.rng.sign();
            self.animator.play(
                Tween::once(
                    id,
                    Prop::Rotation,
                    props.rotation,
                    props.rotation + offset,
                    self.now,
                    0.5,
                )
                .ease(Ease::OutCubic)
                .effect(Effect::WindRebound),
            );
        }
    }

    /// Burst of short-lived sparkles with small jitter around a focal point.
    pub fn spawn_sparkles(&mut self, focus: Point) {
        for _ in 0..SPARKLE_BURST {
            let jitter = Vec2::new(
                (self.rng.next_f64() - 0.5) * 50.0,
                (self.rng.next_f64() - 0.5) * 50.0,
            );
            self.scene.insert_decoration(
                DecorationKind::Sparkle,
                focus + jitter,
                self.now,
                Some(SPARKLE_LIFETIME),
            );
        }
    }

    /// Queue a sparkle burst for a later moment (staggered showers).
    pub fn schedule_sparkle(&mut self, delay: Seconds, point: Point) {
        self.pending_sparkles.push(PendingSparkle {
            at: self.now + delay,
            point,
        });
    }

    fn spawn_butterfly(&mut self) {
        let color = self.rng.pick(palette::butterfly_palette()).to_hex();
        let w = self.config.viewport.width;
        let h = self.config.viewport.height;
        let start = Point::new(-50.0, 100.0 + self.rng.next_f64() * (h * 0.5));

        let id =
            self.scene
                .insert_decoration(DecorationKind::Butterfly { color }, start, self.now, None);

        let glide = self.rng.range(10.0, 20.0);
        self.animator.play(
            Tween::once(id, Prop::X, start.x, w + 100.0, self.now, glide)
                .ease(Ease::Linear)
                .effect(Effect::Despawn),
        );
        let amplitude = 30.0 + self.rng.next_f64() * 30.0;
        let flutter = 1.0 + self.rng.next_f64();
        self.animator.play(
            Tween::once(id, Prop::Y, start.y, start.y + amplitude, self.now, flutter)
                .ease(Ease::InOutSine)
                .yoyo(),
        );
        tracing::debug!(?start, glide, "butterfly takes off");
    }

    /// Lift every idle flower briefly, staggered, and let it drop back with
    /// a springy settle.
    pub fn bounce(&mut self) {
        let targets: Vec<NodeId> = self
            .scene
            .flowers()
            .filter(|f| f.phase == Phase::Idle)
            .map(|f| f.id)
            .collect();
        for (i, id) in targets.into_iter().enumerate() {
            let Some(props) = self.resolved_props(id) else {
                continue;
            };
            self.animator.play(
                Tween::once(
                    id,
                    Prop::Y,
                    props.y,
                    props.y - 30.0,
                    self.now + i as f64 * 0.05,
                    0.3,
                )
                .ease(Ease::OutCubic)
                .effect(Effect::BounceDown),
            );
        }
    }

    /// Advance the clock: run due timers, settle finished tweens through the
    /// per-instance state machine, expire decorations. Time never runs
    /// backwards; stale timestamps are clamped.
    pub fn advance(&mut self, now: Seconds) {
        let now = now.max(self.now);
        self.now = now;

        let mut due = Vec::new();
        self.pending_sparkles.retain(|p| {
            if p.at <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        for p in due {
            self.spawn_sparkles(p.point);
        }

        if self.ambient_spawns {
            while self.next_butterfly_at <= now {
                self.spawn_butterfly();
                let [lo, hi] = self.config.butterfly_interval_secs;
                self.next_butterfly_at += self.rng.range(lo, hi);
            }
            while self.next_wind_at <= now {
                self.wind_gust();
                let [lo, hi] = self.config.wind_interval_secs;
                self.next_wind_at += self.rng.range(lo, hi);
            }
        }

        for done in self.animator.advance(now) {
            self.apply_completion(done);
        }

        let expired: Vec<NodeId> = self
            .scene
            .decorations()
            .filter(|d| d.expired(now))
            .map(|d| d.id)
            .collect();
        for id in expired {
            self.scene.remove(id);
            self.animator.cancel_node(id);
        }
    }

    fn apply_completion(&mut self, done: Completed) {
        let Completed {
            node,
            prop,
            value,
            effect,
        } = done;

        if let Some(n) = self.scene.node_mut(node) {
            let props = n.props_mut();
            match prop {
                Prop::X => props.x = value,
                Prop::Y => props.y = value,
                Prop::Rotation => props.rotation = value,
                Prop::Scale => props.scale = value,
                Prop::Opacity => props.opacity = value,
            }
        } else {
            return;
        }

        match effect {
            Effect::None => {}
            Effect::Settle | Effect::WindRebound => {
                if let Some(f) = self.scene.flower_mut(node) {
                    if f.phase == Phase::Dragging {
                        return;
                    }
                    f.phase = Phase::Idle;
                    self.start_sway(node);
                }
            }
            Effect::Despawn => {
                self.scene.remove(node);
                self.animator.cancel_node(node);
            }
            Effect::BounceDown => {
                self.animator.play(
                    Tween::once(node, Prop::Y, value, value + 30.0, self.now, 0.5)
                        .ease(RELEASE_EASE),
                );
            }
        }
    }

    /// Update the scene bounds after a host resize; flowers outside the new
    /// bounds are pulled back in.
    pub fn resize(&mut self, viewport: Viewport) {
        self.config.viewport = viewport;
        self.scene.bounds = viewport.bounds();
        let b = self.scene.bounds;
        for node in self
            .scene
            .nodes()
            .iter()
            .map(|n| n.id())
            .collect::<Vec<_>>()
        {
            if let Some(f) = self.scene.flower_mut(node) {
                let (gw, gh) = (f.graphic.width, f.graphic.height);
                f.props.x = f.props.x.clamp(b.x0, (b.x1 - gw).max(b.x0));
                f.props.y = f.props.y.clamp(b.y0, (b.y1 - gh).max(b.y0));
            }
        }
    }

    /// Remove every instance and decoration immediately. No exit animation.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.animator.reset();
        self.pending_sparkles.clear();
        self.drag = None;
    }
}
