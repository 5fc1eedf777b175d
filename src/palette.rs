use crate::{color::Rgb8, core::Rng, templates::FlowerKind};

/// Candidate fill colors per kind, in the order a host would list swatches.
/// Used only at instance-creation time when no explicit color is supplied.
pub fn palette(kind: FlowerKind) -> &'static [Rgb8] {
    static DAISY: &[Rgb8] = &[
        Rgb8::new(0xFF, 0xFF, 0xFF),
        Rgb8::new(0xFF, 0xE4, 0xE1),
        Rgb8::new(0xE6, 0xE6, 0xFA),
        Rgb8::new(0xFF, 0xF0, 0xF5),
        Rgb8::new(0xF0, 0xFF, 0xF0),
    ];
    static TULIP: &[Rgb8] = &[
        Rgb8::new(0xFF, 0x69, 0xB4),
        Rgb8::new(0xFF, 0x14, 0x93),
        Rgb8::new(0xDC, 0x14, 0x3C),
        Rgb8::new(0xFF, 0x45, 0x00),
        Rgb8::new(0xFF, 0x63, 0x47),
        Rgb8::new(0xFF, 0xD7, 0x00),
    ];
    static SUNFLOWER: &[Rgb8] = &[
        Rgb8::new(0xFF, 0xD7, 0x00),
        Rgb8::new(0xFF, 0xA5, 0x00),
        Rgb8::new(0xFF, 0x8C, 0x00),
        Rgb8::new(0xFF, 0xEF, 0x00),
    ];
    static ROSE: &[Rgb8] = &[
        Rgb8::new(0xFF, 0x14, 0x93),
        Rgb8::new(0xDC, 0x14, 0x3C),
        Rgb8::new(0xFF, 0x69, 0xB4),
        Rgb8::new(0xFF, 0xB6, 0xC1),
        Rgb8::new(0xC7, 0x15, 0x85),
    ];
    static CUTE: &[Rgb8] = &[
        Rgb8::new(0xFF, 0x6B, 0x6B),
        Rgb8::new(0x4E, 0xCD, 0xC4),
        Rgb8::new(0x45, 0xB7, 0xD1),
        Rgb8::new(0x96, 0xCE, 0xB4),
        Rgb8::new(0xFF, 0xEA, 0xA7),
        Rgb8::new(0xDD, 0xA0, 0xDD),
    ];
    static STAR: &[Rgb8] = &[
        Rgb8::new(0x93, 0x70, 0xDB),
        Rgb8::new(0x8A, 0x2B, 0xE2),
        Rgb8::new(0x94, 0x00, 0xD3),
        Rgb8::new(0xBA, 0x55, 0xD3),
        Rgb8::new(0xDA, 0x70, 0xD6),
        Rgb8::new(0x6A, 0x5A, 0xCD),
    ];
    match kind {
        FlowerKind::Daisy => DAISY,
        FlowerKind::Tulip => TULIP,
        FlowerKind::Sunflower => SUNFLOWER,
        FlowerKind::Rose => ROSE,
        FlowerKind::Cute => CUTE,
        FlowerKind::Star => STAR,
    }
}

/// Wing colors for butterfly decorations.
pub fn butterfly_palette() -> &'static [Rgb8] {
    static WINGS: &[Rgb8] = &[
        Rgb8::new(0xFF, 0x69, 0xB4),
        Rgb8::new(0xFF, 0xD7, 0x00),
        Rgb8::new(0x00, 0xCE, 0xD1),
        Rgb8::new(0xFF, 0x63, 0x47),
        Rgb8::new(0x93, 0x70, 0xDB),
    ];
    WINGS
}

pub fn pick_color(rng: &mut Rng, kind: FlowerKind) -> Rgb8 {
    *rng.pick(palette(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_candidates() {
        for kind in FlowerKind::ALL {
            assert!(!palette(kind).is_empty());
        }
    }

    #[test]
    fn daisy_defaults_lead_the_palette() {
        assert_eq!(palette(FlowerKind::Daisy)[0].to_hex(), "#FFFFFF");
        assert_eq!(palette(FlowerKind::Tulip)[0].to_hex(), "#FF69B4");
    }

    #[test]
    fn picks_come_from_the_palette() {
        let mut rng = Rng::new(9);
        for _ in 0..64 {
            let c = pick_color(&mut rng, FlowerKind::Star);
            assert!(palette(FlowerKind::Star).contains(&c));
        }
    }
}
