#![forbid(unsafe_code)]

pub mod color;
pub mod config;
pub mod core;
pub mod ease;
pub mod error;
pub mod garden;
pub mod graphic;
pub mod palette;
pub mod playground;
pub mod progress;
pub mod render;
pub mod scene;
pub mod templates;
pub mod tween;

pub use color::{Rgb8, shade_hex};
pub use config::{GardenConfig, Viewport};
pub use core::{NodeId, Point, Rng, Vec2};
pub use ease::Ease;
pub use error::{GardenError, GardenResult};
pub use garden::{Entrance, Garden};
pub use graphic::FlowerGraphic;
pub use playground::{MountSet, Playground, SNIPPET_PLACEHOLDER};
pub use scene::{FlowerSpec, Phase, Scene};
pub use templates::{FlowerKind, generate};
pub use tween::{Animator, StaticAnimator, TweenAnimator};
