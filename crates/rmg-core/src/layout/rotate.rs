//! Layout rotation. This completes the onion layouts, making them
//! possibly centered on any wall.

use super::Layout;
use crate::rng::MapRng;

/// A quarter-turn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Clockwise,
    Half,
    CounterClockwise,
}

impl Rotation {
    /// Roll a random rotation.
    pub fn random(rng: &mut MapRng) -> Rotation {
        match rng.rn2(4) {
            0 => Rotation::None,
            1 => Rotation::Clockwise,
            2 => Rotation::Half,
            _ => Rotation::CounterClockwise,
        }
    }
}

/// Rotate a layout. Quarter turns swap the dimensions.
pub fn rotate_layout(layout: Layout, rotation: Rotation) -> Layout {
    let w = layout.width();
    let h = layout.height();

    match rotation {
        Rotation::None => layout,
        Rotation::Half => {
            // A point reflection; dimensions are preserved.
            let mut out = Layout::new(w, h);
            for x in 0..w {
                for y in 0..h {
                    out[(x, y)] = layout[(w - x - 1, h - y - 1)];
                }
            }
            out
        }
        Rotation::Clockwise => {
            let mut out = Layout::new(h, w);
            for x in 0..w {
                for y in 0..h {
                    out[(h - y - 1, x)] = layout[(x, y)];
                }
            }
            out
        }
        Rotation::CounterClockwise => {
            let mut out = Layout::new(h, w);
            for x in 0..w {
                for y in 0..h {
                    out[(y, w - x - 1)] = layout[(x, y)];
                }
            }
            out
        }
    }
}
