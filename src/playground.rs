use crate::{
    config::GardenConfig,
    core::{Point, Seconds},
    error::{GardenError, GardenResult},
    garden::{Entrance, Garden},
    scene::FlowerSpec,
    templates::FlowerKind,
    tween::{Animator, TweenAnimator},
};

pub const SNIPPET_PLACEHOLDER: &str = "// Generate a flower to see the code!";

/// Which interactive controls the host page actually exposes. The two host
/// pages ship different subsets; anything absent is simply never wired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountSet {
    pub canvas: bool,
    pub flower_layer: bool,
    pub wind_button: bool,
    pub bounce_button: bool,
    pub sparkle_button: bool,
}

impl Default for MountSet {
    fn default() -> Self {
        Self {
            canvas: true,
            flower_layer: true,
            wind_button: true,
            bounce_button: true,
            sparkle_button: true,
        }
    }
}

impl MountSet {
    pub fn require(&self, present: bool, name: &str) -> GardenResult<()> {
        if present {
            Ok(())
        } else {
            Err(GardenError::MissingTarget(name.to_owned()))
        }
    }
}

/// The tutorial playground: a kind/color/size selector feeding a private
/// garden canvas, plus effect trigger buttons and a generated code snippet
/// that mirrors the last flower.
pub struct Playground {
    garden: Garden,
    controls: MountSet,
    selected_kind: FlowerKind,
    selected_color: String,
    selected_size: f64,
    snippet: String,
}

impl Playground {
    /// Wire the playground onto a page. A page without the canvas or flower
    /// layer gets no playground at all — a graceful no-op, never a crash.
    pub fn mount(config: GardenConfig, controls: MountSet) -> GardenResult<Option<Self>> {
        Self::mount_with_animator(config, controls, Box::new(TweenAnimator::new()))
    }

    /// Same as [`Playground::mount`] but with a caller-chosen animation
    /// capability (static fallback hosts).
    pub fn mount_with_animator(
        config: GardenConfig,
        controls: MountSet,
        animator: Box<dyn Animator>,
    ) -> GardenResult<Option<Self>> {
        let required = controls
            .require(controls.canvas, "playgroundCanvas")
            .and_then(|()| controls.require(controls.flower_layer, "playgroundFlowers"));
        if let Err(err) = required {
            tracing::warn!(%err, "playground mounts incomplete, skipping init");
            return Ok(None);
        }

        let mut garden = Garden::with_animator(config, animator)?;
        garden.set_ambient_spawns(false);
        Ok(Some(Self {
            garden,
            controls,
            selected_kind: FlowerKind::Daisy,
            selected_color: "#FF69B4".to_owned(),
            selected_size: 1.0,
            snippet: SNIPPET_PLACEHOLDER.to_owned(),
        }))
    }

    pub fn garden(&self) -> &Garden {
        &self.garden
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    pub fn selected(&self) -> (FlowerKind, &str, f64) {
        (self.selected_kind, &self.selected_color, self.selected_size)
    }

    pub fn set_kind(&mut self, kind: FlowerKind) {
        self.selected_kind = kind;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.selected_color = color.into();
    }

    pub fn set_size(&mut self, size: f64) {
        self.selected_size = size;
    }

    pub fn advance(&mut self, now: Seconds) {
        self.garden.advance(now);
    }

    /// The generate button: place the selected flower at a random spot in
    /// the lower canvas band.
    pub fn generate(&mut self) -> GardenResult<()> {
        let w = self.garden.config().viewport.width;
        let h = self.garden.config().viewport.height;
        let x = 50.0 + self.garden_rng_unit() * (w - 150.0);
        let y = h * 0.5 + self.garden_rng_unit() * (h * 0.35);
        self.place_at(Point::new(x, y))
    }

    /// Double-click inside the canvas: place the selected flower centered
    /// under the pointer. Clicks on an existing flower do nothing.
    pub fn place_under_pointer(&mut self, pointer: Point) -> GardenResult<()> {
        if self.garden.hit_test(pointer).is_some() {
            return Ok(());
        }
        self.place_at(pointer - crate::core::Vec2::new(40.0, 60.0))
    }

    fn place_at(&mut self, position: Point) -> GardenResult<()> {
        let spec = FlowerSpec {
            kind: self.selected_kind,
            color: self.selected_color.clone(),
            scale: self.selected_size,
        };
        self.garden.spawn_flower(
            spec,
            position,
            Entrance::Drop {
                height: 150.0,
                delay: 0.0,
            },
        )?;
        self.garden
            .spawn_sparkles(position + crate::core::Vec2::new(40.0, 30.0));
        self.snippet =
            render_snippet(self.selected_kind, &self.selected_color, self.selected_size);
        Ok(())
    }

    /// The clear button: drop every placed flower immediately and put the
    /// snippet box back to its placeholder.
    pub fn clear(&mut self) {
        self.garden.clear();
        self.snippet = SNIPPET_PLACEHOLDER.to_owned();
    }

    pub fn trigger_wind(&mut self) {
        if !self.controls.wind_button {
            return;
        }
        self.garden.wind_gust();
    }

    pub fn trigger_bounce(&mut self) {
        if !self.controls.bounce_button {
            return;
        }
        self.garden.bounce();
    }

    /// Sparkle shower: staggered bursts scattered over the whole canvas.
    pub fn trigger_sparkles(&mut self) {
        if !self.controls.sparkle_button {
            return;
        }
        let w = self.garden.config().viewport.width;
        let h = self.garden.config().viewport.height;
        for i in 0..15 {
            let point = Point::new(self.garden_rng_unit() * w, self.garden_rng_unit() * h);
            self.garden.schedule_sparkle(i as f64 * 0.05, point);
        }
    }

    fn garden_rng_unit(&mut self) -> f64 {
        self.garden.rng_unit()
    }
}

/// The code box under the canvas: a ready-to-paste snippet reproducing the
/// most recent flower.
pub fn render_snippet(kind: FlowerKind, color: &str, size: f64) -> String {
    let kind_variant = match kind {
        FlowerKind::Daisy => "Daisy",
        FlowerKind::Tulip => "Tulip",
        FlowerKind::Sunflower => "Sunflower",
        FlowerKind::Rose => "Rose",
        FlowerKind::Cute => "Cute",
        FlowerKind::Star => "Star",
    };
    format!(
        r#"// Create a {kind} flower
let spec = FlowerSpec {{
    kind: FlowerKind::{kind_variant},
    color: "{color}".into(),
    scale: {size},
}};

// Drop it into the garden; it sways once the entrance settles
let id = garden.spawn_flower(
    spec,
    Point::new(100.0, 200.0),
    Entrance::Drop {{ height: 150.0, delay: 0.0 }},
)?;

// Drive the scene from your timer loop
garden.advance(now);
"#
    )
}
