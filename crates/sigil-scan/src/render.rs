//! Synthetic sigil rasterizer.
//!
//! Renders a canonical-frame grayscale patch of an encoded sigil, as it
//! would look after the external warp collaborator normalized a capture.
//! Tests and demos use this instead of pointing a camera at a printed
//! marker.

use nalgebra::Point2;

use sigil_core::{canon_height, CanonicalLayout, GrayPatch, Rotation, RotationMaps, CANON_WIDTH, CELL_COUNT};
use sigil_decode::{bit, rotate_code};

/// Gray levels used when rasterizing.
#[derive(Clone, Copy, Debug)]
pub struct RenderLevels {
    pub dark: u8,
    pub light: u8,
    pub background: u8,
}

impl Default for RenderLevels {
    fn default() -> Self {
        Self {
            dark: 40,
            light: 220,
            background: 255,
        }
    }
}

/// Rasterize `code` as captured under `rotation`.
///
/// The patch has the canonical dimensions (width [`CANON_WIDTH`], height
/// `ceil(W * sqrt(3) / 2)`); the cell physically shown at `map[i]` carries
/// canonical bit `i`.
pub fn render_sigil_patch(
    layout: &CanonicalLayout,
    maps: &RotationMaps,
    code: u16,
    rotation: Rotation,
    levels: RenderLevels,
) -> GrayPatch {
    let captured = rotate_code(code, maps.map(rotation));
    let width = CANON_WIDTH as usize;
    let height = canon_height().ceil() as usize;
    let mut patch = GrayPatch::filled(width, height, levels.background);

    for i in 0..CELL_COUNT {
        let tri = layout.cell_vertices(i);
        let value = if bit(captured, i) == 1 {
            levels.dark
        } else {
            levels.light
        };
        fill_triangle(&mut patch, &tri, value);
    }

    patch
}

fn fill_triangle(patch: &mut GrayPatch, tri: &[Point2<f32>; 3], value: u8) {
    let min_x = tri.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor().max(0.0) as usize;
    let min_y = tri.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor().max(0.0) as usize;
    let max_x = (tri.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil().max(0.0)
        as usize)
        .min(patch.width);
    let max_y = (tri.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil().max(0.0)
        as usize)
        .min(patch.height);

    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
            if point_in_triangle(p, tri) {
                patch.data[y * patch.width + x] = value;
            }
        }
    }
}

fn point_in_triangle(p: Point2<f32>, tri: &[Point2<f32>; 3]) -> bool {
    let d1 = edge_sign(p, tri[0], tri[1]);
    let d2 = edge_sign(p, tri[1], tri[2]);
    let d3 = edge_sign(p, tri[2], tri[0]);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

#[inline]
fn edge_sign(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}
