/// Easing curves for property tweens. The parametric variants mirror the
/// springy entrance and release feels used throughout the garden.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    OutCubic,
    InOutSine,
    /// Overshoots past the target before settling. `overshoot` controls how
    /// far (1.7 for flower entrances and drag lifts).
    BackOut { overshoot: f64 },
    /// Decaying oscillation toward the target (drag release snap).
    ElasticOut { amplitude: f64, period: f64 },
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutSine => -(f64::cos(std::f64::consts::PI * t) - 1.0) / 2.0,
            Self::BackOut { overshoot } => {
                let s = overshoot;
                let u = t - 1.0;
                1.0 + (s + 1.0) * u.powi(3) + s * u.powi(2)
            }
            Self::ElasticOut { amplitude, period } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let a = amplitude.max(1.0);
                let p = if period > 0.0 { period } else { 0.3 };
                let s = p / std::f64::consts::TAU * (1.0 / a).asin();
                a * 2f64.powf(-10.0 * t) * (((t - s) * std::f64::consts::TAU) / p).sin() + 1.0
            }
        }
    }
}
