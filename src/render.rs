use std::fmt::Write as _;

use crate::{
    core::{Affine, Vec2},
    error::{GardenError, GardenResult},
    garden::Garden,
    graphic::fmt_num,
    scene::{DecorationKind, NodeProps, SceneNode},
    templates,
};

const SKY: &str = "#87CEEB";
const GRASS: &str = "#7CFC00";
const SPARKLE_FILL: &str = "#FFD700";

/// Draw transform for a node: translate to its position, then rotate and
/// scale about the graphic's visual center.
pub fn node_transform(props: &NodeProps, width: f64, height: f64) -> Affine {
    let anchor = Vec2::new(width / 2.0, height / 2.0);
    let t_translate = Affine::translate(Vec2::new(props.x, props.y));
    let t_anchor = Affine::translate(anchor);
    let t_unanchor = Affine::translate(-anchor);
    let t_rotate = Affine::rotate(props.rotation.to_radians());
    let t_scale = Affine::scale(props.scale);

    // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
    t_translate * t_anchor * t_rotate * t_scale * t_unanchor
}

fn matrix_attr(t: Affine) -> String {
    let [a, b, c, d, e, f] = t.as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        fmt_num(a),
        fmt_num(b),
        fmt_num(c),
        fmt_num(d),
        fmt_num(e),
        fmt_num(f),
    )
}

/// Serialize the whole scene as one SVG document. Node order in the output
/// follows scene insertion order, which is the paint order.
pub fn scene_to_svg(garden: &Garden) -> String {
    let vp = garden.config().viewport;
    let ground_top = garden.config().ground_top();

    let mut out = String::new();
    let _ = write!(
        out,
        "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">",
        w = fmt_num(vp.width),
        h = fmt_num(vp.height),
    );
    let _ = write!(
        out,
        "<rect width=\"{}\" height=\"{}\" fill=\"{SKY}\"/>",
        fmt_num(vp.width),
        fmt_num(vp.height),
    );
    let _ = write!(
        out,
        "<rect y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{GRASS}\"/>",
        fmt_num(ground_top),
        fmt_num(vp.width),
        fmt_num(vp.height - ground_top),
    );

    for node in garden.scene().nodes() {
        let Some(props) = garden.resolved_props(node.id()) else {
            continue;
        };
        match node {
            SceneNode::Flower(f) => {
                let transform = node_transform(&props, f.graphic.width, f.graphic.height);
                let _ = write!(
                    out,
                    "<g transform=\"{}\" opacity=\"{}\">{}</g>",
                    matrix_attr(transform),
                    fmt_num(props.opacity.clamp(0.0, 1.0)),
                    f.graphic.to_svg(),
                );
            }
            SceneNode::Decoration(d) => match &d.kind {
                DecorationKind::Butterfly { color } => {
                    let graphic = templates::butterfly(color);
                    let transform = node_transform(&props, graphic.width, graphic.height);
                    let _ = write!(
                        out,
                        "<g transform=\"{}\">{}</g>",
                        matrix_attr(transform),
                        graphic.to_svg(),
                    );
                }
                DecorationKind::Sparkle => {
                    let fade = d.lifetime.map_or(1.0, |life| {
                        (1.0 - (garden.now() - d.spawned_at) / life).clamp(0.0, 1.0)
                    });
                    let _ = write!(
                        out,
                        "<circle cx=\"{}\" cy=\"{}\" r=\"4\" fill=\"{SPARKLE_FILL}\" opacity=\"{}\"/>",
                        fmt_num(props.x),
                        fmt_num(props.y),
                        fmt_num(fade),
                    );
                }
            },
        }
    }

    out.push_str("</svg>");
    out
}

/// One rasterized frame, straight (non-premultiplied) RGBA8.
#[derive(Debug)]
pub struct RasterFrame {
    pub width: u32,
    pub height: u32,
    pub rgba8: Vec<u8>,
}

/// Rasterize an SVG document at its intrinsic size.
pub fn rasterize_svg(svg: &str) -> GardenResult<RasterFrame> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| GardenError::render(format!("parse svg: {e}")))?;

    fn to_px(v: f32) -> GardenResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(GardenError::render("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| GardenError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut rgba8 = pixmap.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba8);
    Ok(RasterFrame {
        width,
        height,
        rgba8,
    })
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}
