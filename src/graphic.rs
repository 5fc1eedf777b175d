use std::fmt::Write as _;

use crate::core::{Point, Vec2};

/// A procedurally generated vector fragment: nested shapes positioned in a
/// fixed view box, with root dimensions scaled by the caller's size factor.
///
/// Interior geometry is authored in view-box units and only the root
/// width/height carry the scale, so stroke weights track the overall size
/// through view-box scaling (kept from the source artwork).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FlowerGraphic {
    pub width: f64,
    pub height: f64,
    pub view_box: Vec2,
    pub shapes: Vec<Shape>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum Paint {
    Color(String),
    None,
}

impl Paint {
    pub fn color(c: impl Into<String>) -> Self {
        Self::Color(c.into())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub round_cap: bool,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            round_cap: false,
        }
    }

    pub fn round(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            round_cap: true,
        }
    }
}

/// Rotation in degrees about an origin in the parent's coordinate space.
/// Petals rotate about the ring pivot (the local origin of their group).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Rotate {
    pub degrees: f64,
    pub origin: Point,
}

impl Rotate {
    pub fn about_origin(degrees: f64) -> Self {
        Self {
            degrees,
            origin: Point::ZERO,
        }
    }

    pub fn about(degrees: f64, x: f64, y: f64) -> Self {
        Self {
            degrees,
            origin: Point::new(x, y),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum Shape {
    Path {
        d: String,
        fill: Paint,
        stroke: Option<Stroke>,
        opacity: f64,
        rotate: Option<Rotate>,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        fill: Paint,
        stroke: Option<Stroke>,
        rotate: Option<Rotate>,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Paint,
        stroke: Option<Stroke>,
        rotate: Option<Rotate>,
    },
    Group {
        translate: Vec2,
        children: Vec<Shape>,
    },
}

impl Shape {
    pub fn path(d: String, fill: Paint, stroke: Option<Stroke>) -> Self {
        Self::Path {
            d,
            fill,
            stroke,
            opacity: 1.0,
            rotate: None,
        }
    }

    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64, fill: Paint) -> Self {
        Self::Ellipse {
            center: Point::new(cx, cy),
            rx,
            ry,
            fill,
            stroke: None,
            rotate: None,
        }
    }

    pub fn circle(cx: f64, cy: f64, radius: f64, fill: Paint, stroke: Option<Stroke>) -> Self {
        Self::Circle {
            center: Point::new(cx, cy),
            radius,
            fill,
            stroke,
            rotate: None,
        }
    }
}

impl FlowerGraphic {
    /// Total shape count, groups excluded, nesting flattened.
    pub fn shape_count(&self) -> usize {
        fn count(shapes: &[Shape]) -> usize {
            shapes
                .iter()
                .map(|s| match s {
                    Shape::Group { children, .. } => count(children),
                    _ => 1,
                })
                .sum()
        }
        count(&self.shapes)
    }

    /// Rotation degrees of every directly rotated shape, in document order.
    pub fn rotations(&self) -> Vec<f64> {
        fn walk(shapes: &[Shape], out: &mut Vec<f64>) {
            for s in shapes {
                match s {
                    Shape::Group { children, .. } => walk(children, out),
                    Shape::Path { rotate, .. }
                    | Shape::Ellipse { rotate, .. }
                    | Shape::Circle { rotate, .. } => {
                        if let Some(r) = rotate {
                            out.push(r.degrees);
                        }
                    }
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.shapes, &mut out);
        out
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\">",
            fmt_num(self.width),
            fmt_num(self.height),
            fmt_num(self.view_box.x),
            fmt_num(self.view_box.y),
        );
        for shape in &self.shapes {
            write_shape(&mut out, shape);
        }
        out.push_str("</svg>");
        out
    }
}

fn write_shape(out: &mut String, shape: &Shape) {
    match shape {
        Shape::Path {
            d,
            fill,
            stroke,
            opacity,
            rotate,
        } => {
            let _ = write!(out, "<path d=\"{d}\"");
            write_paint(out, fill);
            write_stroke(out, stroke);
            if *opacity != 1.0 {
                let _ = write!(out, " opacity=\"{}\"", fmt_num(*opacity));
            }
            write_rotate(out, rotate);
            out.push_str("/>");
        }
        Shape::Ellipse {
            center,
            rx,
            ry,
            fill,
            stroke,
            rotate,
        } => {
            let _ = write!(
                out,
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"",
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(*rx),
                fmt_num(*ry),
            );
            write_paint(out, fill);
            write_stroke(out, stroke);
            write_rotate(out, rotate);
            out.push_str("/>");
        }
        Shape::Circle {
            center,
            radius,
            fill,
            stroke,
            rotate,
        } => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(*radius),
            );
            write_paint(out, fill);
            write_stroke(out, stroke);
            write_rotate(out, rotate);
            out.push_str("/>");
        }
        Shape::Group {
            translate,
            children,
        } => {
            let _ = write!(
                out,
                "<g transform=\"translate({}, {})\">",
                fmt_num(translate.x),
                fmt_num(translate.y),
            );
            for child in children {
                write_shape(out, child);
            }
            out.push_str("</g>");
        }
    }
}

fn write_paint(out: &mut String, paint: &Paint) {
    match paint {
        Paint::Color(c) => {
            let _ = write!(out, " fill=\"{c}\"");
        }
        Paint::None => out.push_str(" fill=\"none\""),
    }
}

fn write_stroke(out: &mut String, stroke: &Option<Stroke>) {
    if let Some(s) = stroke {
        let _ = write!(
            out,
            " stroke=\"{}\" stroke-width=\"{}\"",
            s.color,
            fmt_num(s.width)
        );
        if s.round_cap {
            out.push_str(" stroke-linecap=\"round\"");
        }
    }
}

fn write_rotate(out: &mut String, rotate: &Option<Rotate>) {
    if let Some(r) = rotate {
        if r.origin == Point::ZERO {
            let _ = write!(out, " transform=\"rotate({})\"", fmt_num(r.degrees));
        } else {
            let _ = write!(
                out,
                " transform=\"rotate({} {} {})\"",
                fmt_num(r.degrees),
                fmt_num(r.origin.x),
                fmt_num(r.origin.y),
            );
        }
    }
}

pub(crate) fn fmt_num(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e12 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf() -> Shape {
        Shape::Ellipse {
            center: Point::new(30.0, 95.0),
            rx: 12.0,
            ry: 6.0,
            fill: Paint::color("#32CD32"),
            stroke: None,
            rotate: Some(Rotate::about(-30.0, 30.0, 95.0)),
        }
    }

    #[test]
    fn shape_count_flattens_groups() {
        let g = FlowerGraphic {
            width: 80.0,
            height: 120.0,
            view_box: Vec2::new(80.0, 120.0),
            shapes: vec![
                leaf(),
                Shape::Group {
                    translate: Vec2::new(40.0, 35.0),
                    children: vec![leaf(), leaf()],
                },
            ],
        };
        assert_eq!(g.shape_count(), 3);
    }

    #[test]
    fn svg_root_carries_scaled_dims_and_fixed_view_box() {
        let g = FlowerGraphic {
            width: 96.0,
            height: 144.0,
            view_box: Vec2::new(80.0, 120.0),
            shapes: vec![],
        };
        let svg = g.to_svg();
        assert!(svg.starts_with(
            "<svg width=\"96\" height=\"144\" viewBox=\"0 0 80 120\""
        ));
    }

    #[test]
    fn rotate_about_origin_omits_pivot_coordinates() {
        let mut out = String::new();
        write_shape(
            &mut out,
            &Shape::Circle {
                center: Point::new(0.0, -15.0),
                radius: 12.0,
                fill: Paint::color("#FF6B6B"),
                stroke: None,
                rotate: Some(Rotate::about_origin(60.0)),
            },
        );
        assert!(out.contains("transform=\"rotate(60)\""));

        let mut out = String::new();
        write_shape(&mut out, &leaf());
        assert!(out.contains("transform=\"rotate(-30 30 95)\""));
    }

    #[test]
    fn fmt_num_trims_integral_values() {
        assert_eq!(fmt_num(72.0), "72");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(-30.0), "-30");
    }
}
