use std::str::FromStr;

use kurbo::BezPath;

use crate::{
    color::shade_hex,
    core::Vec2,
    error::{GardenError, GardenResult},
    graphic::{FlowerGraphic, Paint, Rotate, Shape, Stroke},
};

const STEM_GREEN: &str = "#228B22";
const LEAF_GREEN: &str = "#32CD32";
const OUTLINE: &str = "#333";

/// Closed set of flower kinds. Unknown names are rejected, never substituted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowerKind {
    Daisy,
    Tulip,
    Sunflower,
    Rose,
    Cute,
    Star,
}

impl FlowerKind {
    pub const ALL: [FlowerKind; 6] = [
        Self::Daisy,
        Self::Tulip,
        Self::Sunflower,
        Self::Rose,
        Self::Cute,
        Self::Star,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Daisy => "daisy",
            Self::Tulip => "tulip",
            Self::Sunflower => "sunflower",
            Self::Rose => "rose",
            Self::Cute => "cute",
            Self::Star => "star",
        }
    }

    /// Unscaled root dimensions of the generated fragment.
    pub fn base_size(self) -> Vec2 {
        match self {
            Self::Daisy => Vec2::new(80.0, 120.0),
            Self::Tulip => Vec2::new(60.0, 110.0),
            Self::Sunflower => Vec2::new(100.0, 140.0),
            Self::Rose => Vec2::new(70.0, 100.0),
            Self::Cute => Vec2::new(70.0, 100.0),
            Self::Star => Vec2::new(80.0, 110.0),
        }
    }

    /// Shapes forming the bloom: radial petal count, or the fixed compound
    /// shape count for the non-radial layouts (tulip cups, rose layers).
    pub fn petal_count(self) -> usize {
        match self {
            Self::Daisy => 8,
            Self::Tulip => 3,
            Self::Sunflower => 18,
            Self::Rose => 1,
            Self::Cute => 6,
            Self::Star => 5,
        }
    }

    pub fn default_color(self) -> &'static str {
        match self {
            Self::Daisy => "#FFFFFF",
            Self::Tulip => "#FF69B4",
            Self::Sunflower => "#FFD700",
            Self::Rose => "#FF1493",
            Self::Cute => "#FF6B6B",
            Self::Star => "#9370DB",
        }
    }
}

impl std::fmt::Display for FlowerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlowerKind {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daisy" => Ok(Self::Daisy),
            "tulip" => Ok(Self::Tulip),
            "sunflower" => Ok(Self::Sunflower),
            "rose" => Ok(Self::Rose),
            "cute" => Ok(Self::Cute),
            "star" => Ok(Self::Star),
            other => Err(GardenError::UnknownKind(other.to_owned())),
        }
    }
}

/// Angles of the radial petal ring, `360/K * i` about the bloom pivot.
/// Tulip and rose lay their bloom out as compound shapes instead.
pub fn petal_angles(kind: FlowerKind) -> Option<Vec<f64>> {
    match kind {
        FlowerKind::Daisy => Some(ring_angles(8)),
        FlowerKind::Sunflower => Some(ring_angles(18)),
        FlowerKind::Cute => Some(ring_angles(6)),
        FlowerKind::Star => Some(ring_angles(5)),
        FlowerKind::Tulip | FlowerKind::Rose => None,
    }
}

fn ring_angles(count: usize) -> Vec<f64> {
    let step = 360.0 / count as f64;
    (0..count).map(|i| step * i as f64).collect()
}

/// Generate the vector fragment for one flower. Pure and deterministic:
/// identical inputs produce a structurally identical fragment. `color` falls
/// back to the kind's default; palette randomization belongs to the caller.
pub fn generate(kind: FlowerKind, color: Option<&str>, scale: f64) -> GardenResult<FlowerGraphic> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(GardenError::validation(format!(
            "flower scale must be a positive finite number, got {scale}"
        )));
    }

    let color = color.unwrap_or(kind.default_color());
    let shapes = match kind {
        FlowerKind::Daisy => daisy(color),
        FlowerKind::Tulip => tulip(color),
        FlowerKind::Sunflower => sunflower(color),
        FlowerKind::Rose => rose(color),
        FlowerKind::Cute => cute(color),
        FlowerKind::Star => star(color),
    };

    let base = kind.base_size();
    Ok(FlowerGraphic {
        width: base.x * scale,
        height: base.y * scale,
        view_box: base,
        shapes,
    })
}

/// Butterfly decoration fragment: two wings and a body, 30x20.
pub fn butterfly(color: &str) -> FlowerGraphic {
    FlowerGraphic {
        width: 30.0,
        height: 20.0,
        view_box: Vec2::new(30.0, 20.0),
        shapes: vec![
            wing(8.0, color),
            wing(22.0, color),
            Shape::ellipse(15.0, 10.0, 2.0, 6.0, Paint::color(OUTLINE)),
        ],
    }
}

fn wing(cx: f64, color: &str) -> Shape {
    Shape::Ellipse {
        center: kurbo::Point::new(cx, 10.0),
        rx: 7.0,
        ry: 8.0,
        fill: Paint::color(color),
        stroke: Some(Stroke::new(OUTLINE, 1.0)),
        rotate: None,
    }
}

fn quad_path(points: &[(f64, f64)]) -> String {
    // points = start, then (control, end) pairs
    let mut path = BezPath::new();
    path.move_to(points[0]);
    for pair in points[1..].chunks_exact(2) {
        path.quad_to(pair[0], pair[1]);
    }
    path.to_svg()
}

fn stem(d: String, width: f64) -> Shape {
    Shape::path(d, Paint::None, Some(Stroke::round(STEM_GREEN, width)))
}

fn leaf_ellipse(cx: f64, cy: f64, rx: f64, ry: f64, degrees: f64) -> Shape {
    Shape::Ellipse {
        center: kurbo::Point::new(cx, cy),
        rx,
        ry,
        fill: Paint::color(LEAF_GREEN),
        stroke: None,
        rotate: Some(Rotate::about(degrees, cx, cy)),
    }
}

fn petal_ring(pivot: Vec2, petal: impl Fn(f64) -> Shape, angles: &[f64]) -> Shape {
    Shape::Group {
        translate: pivot,
        children: angles.iter().map(|&a| petal(a)).collect(),
    }
}

fn daisy(color: &str) -> Vec<Shape> {
    let angles = ring_angles(8);
    vec![
        stem(quad_path(&[(40.0, 120.0), (35.0, 90.0), (40.0, 60.0)]), 4.0),
        leaf_ellipse(30.0, 95.0, 12.0, 6.0, -30.0),
        leaf_ellipse(50.0, 85.0, 12.0, 6.0, 30.0),
        petal_ring(
            Vec2::new(40.0, 35.0),
            |a| Shape::Ellipse {
                center: kurbo::Point::new(0.0, -18.0),
                rx: 8.0,
                ry: 18.0,
                fill: Paint::color(color),
                stroke: Some(Stroke::new(OUTLINE, 1.5)),
                rotate: Some(Rotate::about_origin(a)),
            },
            &angles,
        ),
        Shape::circle(
            40.0,
            35.0,
            12.0,
            Paint::color("#FFD700"),
            Some(Stroke::new(OUTLINE, 2.0)),
        ),
        Shape::circle(37.0, 32.0, 2.0, Paint::color("#FFA500"), None),
        Shape::circle(43.0, 33.0, 1.5, Paint::color("#FFA500"), None),
        Shape::circle(40.0, 38.0, 1.5, Paint::color("#FFA500"), None),
    ]
}

fn tulip(color: &str) -> Vec<Shape> {
    let cup = |points: &[(f64, f64)], opacity: f64| Shape::Path {
        d: quad_path(points),
        fill: Paint::color(color),
        stroke: Some(Stroke::new(OUTLINE, 2.0)),
        opacity,
        rotate: None,
    };
    vec![
        stem(quad_path(&[(30.0, 110.0), (25.0, 80.0), (30.0, 50.0)]), 4.0),
        Shape::path(
            quad_path(&[(28.0, 85.0), (10.0, 75.0), (5.0, 90.0)]),
            Paint::None,
            Some(Stroke::round(LEAF_GREEN, 8.0)),
        ),
        Shape::path(
            quad_path(&[(32.0, 75.0), (50.0, 65.0), (55.0, 80.0)]),
            Paint::None,
            Some(Stroke::round(LEAF_GREEN, 8.0)),
        ),
        cup(
            &[
                (30.0, 50.0),
                (15.0, 35.0),
                (20.0, 15.0),
                (30.0, 5.0),
                (40.0, 15.0),
                (45.0, 35.0),
                (30.0, 50.0),
            ],
            1.0,
        ),
        cup(
            &[
                (30.0, 50.0),
                (10.0, 40.0),
                (8.0, 25.0),
                (20.0, 20.0),
                (30.0, 30.0),
            ],
            0.9,
        ),
        cup(
            &[
                (30.0, 50.0),
                (50.0, 40.0),
                (52.0, 25.0),
                (40.0, 20.0),
                (30.0, 30.0),
            ],
            0.9,
        ),
    ]
}

fn sunflower(color: &str) -> Vec<Shape> {
    let angles = ring_angles(18);
    vec![
        stem(quad_path(&[(50.0, 140.0), (45.0, 100.0), (50.0, 70.0)]), 6.0),
        leaf_ellipse(35.0, 110.0, 18.0, 8.0, -40.0),
        leaf_ellipse(65.0, 100.0, 18.0, 8.0, 40.0),
        petal_ring(
            Vec2::new(50.0, 45.0),
            |a| Shape::Ellipse {
                center: kurbo::Point::new(0.0, -25.0),
                rx: 6.0,
                ry: 15.0,
                fill: Paint::color(color),
                stroke: Some(Stroke::new(OUTLINE, 1.0)),
                rotate: Some(Rotate::about_origin(a)),
            },
            &angles,
        ),
        Shape::circle(
            50.0,
            45.0,
            18.0,
            Paint::color("#8B4513"),
            Some(Stroke::new(OUTLINE, 2.0)),
        ),
        Shape::circle(45.0, 40.0, 2.0, Paint::color("#654321"), None),
        Shape::circle(55.0, 42.0, 2.0, Paint::color("#654321"), None),
        Shape::circle(50.0, 48.0, 2.0, Paint::color("#654321"), None),
        Shape::circle(48.0, 50.0, 1.5, Paint::color("#654321"), None),
        Shape::circle(54.0, 38.0, 1.5, Paint::color("#654321"), None),
    ]
}

fn rose(color: &str) -> Vec<Shape> {
    let shadow = shade_hex(color, -20.0);
    vec![
        stem(quad_path(&[(35.0, 100.0), (30.0, 70.0), (35.0, 45.0)]), 4.0),
        leaf_ellipse(25.0, 75.0, 10.0, 5.0, -30.0),
        leaf_ellipse(45.0, 80.0, 10.0, 5.0, 30.0),
        Shape::Group {
            translate: Vec2::new(35.0, 30.0),
            children: vec![
                Shape::Ellipse {
                    center: kurbo::Point::ZERO,
                    rx: 18.0,
                    ry: 15.0,
                    fill: Paint::color(color),
                    stroke: Some(Stroke::new(OUTLINE, 1.5)),
                    rotate: None,
                },
                Shape::path(
                    quad_path(&[
                        (-12.0, -5.0),
                        (0.0, -20.0),
                        (12.0, -5.0),
                        (5.0, 5.0),
                        (0.0, 0.0),
                        (-5.0, 5.0),
                        (-12.0, -5.0),
                    ]),
                    Paint::color(shadow.clone()),
                    Some(Stroke::new(OUTLINE, 1.0)),
                ),
                Shape::path(
                    quad_path(&[
                        (-8.0, 0.0),
                        (0.0, -15.0),
                        (8.0, 0.0),
                        (3.0, 8.0),
                        (0.0, 3.0),
                        (-3.0, 8.0),
                        (-8.0, 0.0),
                    ]),
                    Paint::color(color),
                    Some(Stroke::new(OUTLINE, 1.0)),
                ),
                Shape::circle(0.0, 3.0, 5.0, Paint::color(shadow), Some(Stroke::new(OUTLINE, 1.0))),
            ],
        },
    ]
}

fn cute(color: &str) -> Vec<Shape> {
    let angles = ring_angles(6);
    vec![
        stem(quad_path(&[(35.0, 100.0), (32.0, 70.0), (35.0, 50.0)]), 4.0),
        Shape::circle(
            25.0,
            75.0,
            8.0,
            Paint::color(LEAF_GREEN),
            Some(Stroke::new(OUTLINE, 1.0)),
        ),
        Shape::circle(
            45.0,
            80.0,
            8.0,
            Paint::color(LEAF_GREEN),
            Some(Stroke::new(OUTLINE, 1.0)),
        ),
        petal_ring(
            Vec2::new(35.0, 30.0),
            |a| Shape::Circle {
                center: kurbo::Point::new(0.0, -15.0),
                radius: 12.0,
                fill: Paint::color(color),
                stroke: Some(Stroke::new(OUTLINE, 2.0)),
                rotate: Some(Rotate::about_origin(a)),
            },
            &angles,
        ),
        Shape::circle(
            35.0,
            30.0,
            10.0,
            Paint::color("#FFE135"),
            Some(Stroke::new(OUTLINE, 2.0)),
        ),
        // Face.
        Shape::circle(32.0, 28.0, 2.0, Paint::color(OUTLINE), None),
        Shape::circle(38.0, 28.0, 2.0, Paint::color(OUTLINE), None),
        Shape::path(
            quad_path(&[(32.0, 33.0), (35.0, 36.0), (38.0, 33.0)]),
            Paint::None,
            Some(Stroke::round(OUTLINE, 1.5)),
        ),
    ]
}

fn star(color: &str) -> Vec<Shape> {
    let angles = ring_angles(5);
    let kite = {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((-8.0, -10.0));
        p.line_to((0.0, -28.0));
        p.line_to((8.0, -10.0));
        p.close_path();
        p.to_svg()
    };
    vec![
        stem(quad_path(&[(40.0, 110.0), (38.0, 80.0), (40.0, 55.0)]), 4.0),
        Shape::path(
            quad_path(&[
                (35.0, 85.0),
                (20.0, 80.0),
                (15.0, 90.0),
                (25.0, 85.0),
                (35.0, 85.0),
            ]),
            Paint::color(LEAF_GREEN),
            Some(Stroke::new(OUTLINE, 1.0)),
        ),
        Shape::path(
            quad_path(&[
                (45.0, 75.0),
                (60.0, 70.0),
                (65.0, 80.0),
                (55.0, 75.0),
                (45.0, 75.0),
            ]),
            Paint::color(LEAF_GREEN),
            Some(Stroke::new(OUTLINE, 1.0)),
        ),
        petal_ring(
            Vec2::new(40.0, 35.0),
            |a| Shape::Path {
                d: kite.clone(),
                fill: Paint::color(color),
                stroke: Some(Stroke::new(OUTLINE, 1.5)),
                opacity: 1.0,
                rotate: Some(Rotate::about_origin(a)),
            },
            &angles,
        ),
        Shape::circle(
            40.0,
            35.0,
            8.0,
            Paint::color("#FFD700"),
            Some(Stroke::new(OUTLINE, 2.0)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "orchid".parse::<FlowerKind>().unwrap_err();
        assert!(matches!(err, GardenError::UnknownKind(name) if name == "orchid"));
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in FlowerKind::ALL {
            assert_eq!(kind.name().parse::<FlowerKind>().unwrap(), kind);
        }
    }

    #[test]
    fn generate_is_deterministic() {
        for kind in FlowerKind::ALL {
            let a = generate(kind, Some("#FF69B4"), 1.3).unwrap();
            let b = generate(kind, Some("#FF69B4"), 1.3).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn radial_kinds_place_petals_at_even_angles() {
        assert_eq!(
            petal_angles(FlowerKind::Daisy).unwrap(),
            vec![0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0]
        );
        assert_eq!(petal_angles(FlowerKind::Sunflower).unwrap().len(), 18);
        assert_eq!(
            petal_angles(FlowerKind::Cute).unwrap(),
            vec![0.0, 60.0, 120.0, 180.0, 240.0, 300.0]
        );
        assert_eq!(
            petal_angles(FlowerKind::Star).unwrap(),
            vec![0.0, 72.0, 144.0, 216.0, 288.0]
        );
        assert!(petal_angles(FlowerKind::Tulip).is_none());
        assert!(petal_angles(FlowerKind::Rose).is_none());
    }

    #[test]
    fn generated_ring_rotations_match_the_angle_set() {
        fn ring_rotations(g: &FlowerGraphic) -> Vec<f64> {
            // The bloom ring is the only group in radial layouts.
            g.shapes
                .iter()
                .find_map(|s| match s {
                    Shape::Group { children, .. } => Some(
                        children
                            .iter()
                            .filter_map(|c| match c {
                                Shape::Path { rotate, .. }
                                | Shape::Ellipse { rotate, .. }
                                | Shape::Circle { rotate, .. } => {
                                    rotate.as_ref().map(|r| r.degrees)
                                }
                                Shape::Group { .. } => None,
                            })
                            .collect(),
                    ),
                    _ => None,
                })
                .unwrap_or_default()
        }

        for kind in [
            FlowerKind::Daisy,
            FlowerKind::Sunflower,
            FlowerKind::Cute,
            FlowerKind::Star,
        ] {
            let g = generate(kind, None, 1.0).unwrap();
            assert_eq!(ring_rotations(&g), petal_angles(kind).unwrap(), "kind {kind}");
            assert_eq!(
                ring_rotations(&g).len(),
                kind.petal_count(),
                "kind {kind}"
            );
        }
    }

    #[test]
    fn scale_multiplies_root_dimensions_only() {
        let g = generate(FlowerKind::Tulip, Some("#FF1493"), 1.2).unwrap();
        assert_eq!(g.width, 72.0);
        assert_eq!(g.height, 132.0);
        assert_eq!(g.view_box, Vec2::new(60.0, 110.0));
    }

    #[test]
    fn rejects_non_positive_scale() {
        assert!(generate(FlowerKind::Daisy, None, 0.0).is_err());
        assert!(generate(FlowerKind::Daisy, None, -1.0).is_err());
        assert!(generate(FlowerKind::Daisy, None, f64::NAN).is_err());
    }

    #[test]
    fn rose_uses_a_darker_shadow_tone() {
        let g = generate(FlowerKind::Rose, Some("#FF1493"), 1.0).unwrap();
        let svg = g.to_svg();
        assert!(svg.contains("#FF1493"));
        assert!(svg.contains("#CC0060"));
    }

    #[test]
    fn butterfly_has_two_wings_and_a_body() {
        let g = butterfly("#FFD700");
        assert_eq!(g.shape_count(), 3);
        assert_eq!(g.width, 30.0);
        assert_eq!(g.height, 20.0);
    }
}
