use crate::error::{GardenError, GardenResult};

/// Straight (non-premultiplied) 8-bit RGB, the color space of flower fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse_hex(s: &str) -> GardenResult<Self> {
        let raw = s.trim();
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        if raw.len() != 6 {
            return Err(GardenError::validation(format!(
                "hex color must be #RRGGBB, got \"{s}\""
            )));
        }

        fn hex_byte(pair: &str) -> GardenResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| GardenError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self {
            r: hex_byte(&raw[0..2])?,
            g: hex_byte(&raw[2..4])?,
            b: hex_byte(&raw[4..6])?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Darken (negative percent) or lighten (positive percent) by adding
    /// `round(2.55 * percent)` to each channel, saturating at the channel
    /// bounds. Channels never wrap.
    pub fn shade(self, percent: f64) -> Self {
        let amt = (2.55 * percent).round() as i32;
        fn channel(c: u8, amt: i32) -> u8 {
            (i32::from(c) + amt).clamp(0, 255) as u8
        }
        Self {
            r: channel(self.r, amt),
            g: channel(self.g, amt),
            b: channel(self.b, amt),
        }
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Shade a hex color string. Colors are otherwise passed through the
/// generator unvalidated, so a string that does not parse is returned
/// unchanged rather than rejected.
pub fn shade_hex(color: &str, percent: f64) -> String {
    match Rgb8::parse_hex(color) {
        Ok(c) => c.shade(percent).to_hex(),
        Err(_) => color.to_owned(),
    }
}
