use crate::{
    core::Rect,
    error::{GardenError, GardenResult},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Scene tuning knobs. The defaults reproduce the garden's stock look; hosts
/// override via JSON (the CLI reads this struct directly).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    pub viewport: Viewport,
    /// Determinism seed; identical seeds replay identical gardens.
    pub seed: u64,
    /// Fraction of the viewport height where the ground begins.
    pub ground_fraction: f64,
    /// Hard cap on the initial population.
    pub max_flowers: usize,
    /// One initial flower per this many pixels of viewport width.
    pub flower_density_px: f64,
    /// Min/max seconds between scene-wide wind gusts.
    pub wind_interval_secs: [f64; 2],
    /// Min/max seconds between butterfly spawns.
    pub butterfly_interval_secs: [f64; 2],
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(1280.0, 800.0),
            seed: 0,
            ground_fraction: 0.65,
            max_flowers: 15,
            flower_density_px: 100.0,
            wind_interval_secs: [15.0, 25.0],
            butterfly_interval_secs: [5.0, 10.0],
        }
    }
}

impl GardenConfig {
    pub fn validate(&self) -> GardenResult<()> {
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(GardenError::validation(
                "viewport width/height must be > 0",
            ));
        }
        if !(self.ground_fraction > 0.0 && self.ground_fraction <= 1.0) {
            return Err(GardenError::validation(
                "ground_fraction must be in (0, 1]",
            ));
        }
        if self.max_flowers == 0 {
            return Err(GardenError::validation("max_flowers must be > 0"));
        }
        if !(self.flower_density_px > 0.0) {
            return Err(GardenError::validation("flower_density_px must be > 0"));
        }
        for (name, [lo, hi]) in [
            ("wind_interval_secs", self.wind_interval_secs),
            ("butterfly_interval_secs", self.butterfly_interval_secs),
        ] {
            if !(lo >= 0.0 && hi >= lo) {
                return Err(GardenError::validation(format!(
                    "{name} must satisfy 0 <= min <= max"
                )));
            }
        }
        Ok(())
    }

    /// Initial population for a viewport: one flower per density step,
    /// capped.
    pub fn initial_flower_count(&self) -> usize {
        let by_width = (self.viewport.width / self.flower_density_px).floor() as usize;
        by_width.min(self.max_flowers)
    }

    pub fn ground_top(&self) -> f64 {
        self.viewport.height * self.ground_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        GardenConfig::default().validate().unwrap();
    }

    #[test]
    fn json_round_trip() {
        let config = GardenConfig {
            seed: 7,
            viewport: Viewport::new(900.0, 600.0),
            ..GardenConfig::default()
        };
        let s = serde_json::to_string_pretty(&config).unwrap();
        let de: GardenConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(de, config);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let de: GardenConfig = serde_json::from_str(r#"{ "seed": 3 }"#).unwrap();
        assert_eq!(de.seed, 3);
        assert_eq!(de.max_flowers, 15);
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let mut c = GardenConfig::default();
        c.viewport.width = 0.0;
        assert!(c.validate().is_err());

        let mut c = GardenConfig::default();
        c.ground_fraction = 1.5;
        assert!(c.validate().is_err());

        let mut c = GardenConfig::default();
        c.wind_interval_secs = [10.0, 5.0];
        assert!(c.validate().is_err());
    }

    #[test]
    fn initial_count_follows_width_with_a_cap() {
        let mut c = GardenConfig::default();
        c.viewport = Viewport::new(740.0, 600.0);
        assert_eq!(c.initial_flower_count(), 7);

        c.viewport = Viewport::new(99.0, 600.0);
        assert_eq!(c.initial_flower_count(), 0);

        c.viewport = Viewport::new(4000.0, 600.0);
        assert_eq!(c.initial_flower_count(), 15);
    }
}
