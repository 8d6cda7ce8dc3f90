//! Canonical cell layout of the sigil triangle.
//!
//! The canonical frame is an equilateral triangle with its apex at the top,
//! base width [`CANON_WIDTH`] and height `W * sqrt(3) / 2`, subdivided into
//! 4 rows of alternating upward/downward cells (row `r` holds `2r + 1`
//! cells). Cell indices run row-major, left to right; that ordering is the
//! index space every other component references.

use nalgebra::Point2;

use crate::cells::{role_of, CellRole, CELL_COUNT};

/// Base width of the canonical triangle, in canonical pixels.
pub const CANON_WIDTH: f32 = 200.0;

/// Height of the canonical triangle.
#[inline]
pub fn canon_height() -> f32 {
    CANON_WIDTH * 3.0f32.sqrt() / 2.0
}

/// One fixed cell of the canonical layout.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    /// Stable identity, `0..16` in row-major order.
    pub index: usize,
    /// Centroid of the cell's sub-triangle in canonical pixels.
    pub position: Point2<f32>,
    /// Fixed role in the format.
    pub role: CellRole,
}

/// The 16 cell centroids in the canonical frame.
///
/// Computed once at startup and shared read-only thereafter.
#[derive(Clone, Debug)]
pub struct CanonicalLayout {
    cells: [Cell; CELL_COUNT],
}

impl CanonicalLayout {
    pub fn new() -> Self {
        let band = canon_height() / 4.0;
        let mut positions = [Point2::origin(); CELL_COUNT];
        let mut index = 0;
        for r in 0..4usize {
            let y_top = r as f32 * band;
            for k in 0..=(2 * r) {
                let up = k % 2 == 0;
                // upward cells sit 2/3 down their row band, downward 1/3
                let y = y_top + band * if up { 2.0 / 3.0 } else { 1.0 / 3.0 };
                let x = CANON_WIDTH / 2.0 + (k as f32 - r as f32) * (CANON_WIDTH / 8.0);
                positions[index] = Point2::new(x, y);
                index += 1;
            }
        }
        let cells = std::array::from_fn(|i| Cell {
            index: i,
            position: positions[i],
            role: role_of(i),
        });
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Centroid of cell `index`.
    #[inline]
    pub fn centroid(&self, index: usize) -> Point2<f32> {
        self.cells[index].position
    }

    /// Centroid of the whole triangle, the pivot for rotation hypotheses.
    #[inline]
    pub fn pivot(&self) -> Point2<f32> {
        Point2::new(CANON_WIDTH / 2.0, canon_height() * 2.0 / 3.0)
    }

    /// Destination vertices (apex, bottom-left, bottom-right) an external
    /// warp collaborator maps a detected triangle onto.
    pub fn dest_vertices(&self) -> [Point2<f32>; 3] {
        let h = canon_height();
        [
            Point2::new(CANON_WIDTH / 2.0, 0.0),
            Point2::new(0.0, h),
            Point2::new(CANON_WIDTH, h),
        ]
    }

    /// Vertices of cell `index`'s sub-triangle, for overlay and synthetic
    /// rendering.
    pub fn cell_vertices(&self, index: usize) -> [Point2<f32>; 3] {
        debug_assert!(index < CELL_COUNT);
        // row r starts at index r^2
        let r = index.isqrt();
        let k = index - r * r;
        if k % 2 == 0 {
            let i = k / 2;
            [grid_point(r, i), grid_point(r + 1, i), grid_point(r + 1, i + 1)]
        } else {
            let i = (k - 1) / 2;
            [grid_point(r, i), grid_point(r, i + 1), grid_point(r + 1, i + 1)]
        }
    }
}

impl Default for CanonicalLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Subdivision grid vertex `c` on subdivision line `r` (`r` in `0..=4`,
/// `c` in `0..=r`).
fn grid_point(r: usize, c: usize) -> Point2<f32> {
    let x = CANON_WIDTH / 2.0 + (c as f32 - r as f32 / 2.0) * (CANON_WIDTH / 4.0);
    let y = r as f32 * canon_height() / 4.0;
    Point2::new(x, y)
}

/// Fix the warp correspondence for three detected image-space vertices:
/// ascending y first, then the bottom pair ascending x.
pub fn order_vertices(mut v: [Point2<f32>; 3]) -> [Point2<f32>; 3] {
    v.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));
    if v[1].x > v[2].x {
        v.swap(1, 2);
    }
    v
}
