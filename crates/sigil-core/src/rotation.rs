//! Rotation hypotheses and their canonical-index permutations.
//!
//! An equilateral marker can present in any of three 120°-multiple
//! orientations. Each orientation induces a permutation of cell indices:
//! `map[canonical] = sampled` means the bit that belongs at `canonical` in
//! the true layout is physically located at `sampled` in the capture.

use serde::{Deserialize, Serialize};

use crate::layout::CanonicalLayout;
use crate::cells::CELL_COUNT;

/// One of the three physically possible orientations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    Deg0,
    Deg120,
    Deg240,
}

impl Rotation {
    pub const ALL: [Rotation; 3] = [Rotation::Deg0, Rotation::Deg120, Rotation::Deg240];

    /// Physical rotation angle in degrees.
    #[inline]
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg120 => 120,
            Rotation::Deg240 => 240,
        }
    }

    #[inline]
    fn radians(self) -> f32 {
        (self.degrees() as f32).to_radians()
    }
}

/// Precomputed permutations for all three rotation hypotheses.
///
/// Built once from the layout by rotating every centroid around the
/// triangle's pivot and matching the nearest canonical centroid; immutable
/// thereafter.
#[derive(Clone, Debug)]
pub struct RotationMaps {
    maps: [[usize; CELL_COUNT]; 3],
}

impl RotationMaps {
    pub fn from_layout(layout: &CanonicalLayout) -> Self {
        let mut maps = [[0usize; CELL_COUNT]; 3];
        maps[0] = std::array::from_fn(|i| i);
        for rotation in [Rotation::Deg120, Rotation::Deg240] {
            maps[rotation as usize] = permutation_for(layout, rotation);
        }
        Self { maps }
    }

    /// Permutation for one rotation hypothesis.
    #[inline]
    pub fn map(&self, rotation: Rotation) -> &[usize; CELL_COUNT] {
        &self.maps[rotation as usize]
    }
}

fn permutation_for(layout: &CanonicalLayout, rotation: Rotation) -> [usize; CELL_COUNT] {
    let pivot = layout.pivot();
    let (sin, cos) = rotation.radians().sin_cos();
    std::array::from_fn(|i| {
        let p = layout.centroid(i);
        let dx = p.x - pivot.x;
        let dy = p.y - pivot.y;
        let rx = pivot.x + dx * cos - dy * sin;
        let ry = pivot.y + dx * sin + dy * cos;

        // nearest canonical centroid; strict `<` keeps the lowest index on
        // exact ties
        let mut best = 0usize;
        let mut best_d = f32::INFINITY;
        for j in 0..CELL_COUNT {
            let q = layout.centroid(j);
            let d = (q.x - rx).powi(2) + (q.y - ry).powi(2);
            if d < best_d {
                best_d = d;
                best = j;
            }
        }
        best
    })
}
