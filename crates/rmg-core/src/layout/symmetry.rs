//! Layout mirroring.

use super::spiral::connect_spirals;
use super::{Layout, LayoutCell};
use crate::params::{LayoutStyle, SymmetryMode};

/// Mirror a layout along the requested axes.
///
/// The mirrored map measures `2n-3` along each mirrored axis: the
/// half-layouts overlap by the seam row/column plus its neighbour, so
/// the doubled border collapses back into one wall. Spiral and rogue
/// layouts get a reconnection pass afterwards, since mirroring can
/// leave their passages disjoint.
pub fn symmetrize_layout(layout: Layout, sym: SymmetryMode, style: LayoutStyle) -> Layout {
    if sym == SymmetryMode::NoSym || sym == SymmetryMode::Random {
        return layout;
    }

    let mirror_x = sym == SymmetryMode::MirrorX || sym == SymmetryMode::MirrorXY;
    let mirror_y = sym == SymmetryMode::MirrorY || sym == SymmetryMode::MirrorXY;

    let new_width = if mirror_x { layout.width() * 2 - 3 } else { layout.width() };
    let new_height = if mirror_y { layout.height() * 2 - 3 } else { layout.height() };

    let mut sym_layout = Layout::filled(new_width, new_height, LayoutCell::Open);

    match sym {
        SymmetryMode::MirrorX => {
            for i in 0..new_width / 2 + 1 {
                for j in 0..new_height {
                    let cell = layout[(i, j)];
                    sym_layout[(i, j)] = cell;
                    sym_layout[(new_width - i - 1, j)] = cell;
                }
            }
        }
        SymmetryMode::MirrorY => {
            for i in 0..new_width {
                for j in 0..new_height / 2 + 1 {
                    let cell = layout[(i, j)];
                    sym_layout[(i, j)] = cell;
                    sym_layout[(i, new_height - j - 1)] = cell;
                }
            }
        }
        SymmetryMode::MirrorXY => {
            for i in 0..new_width / 2 + 1 {
                for j in 0..new_height / 2 + 1 {
                    let cell = layout[(i, j)];
                    sym_layout[(i, j)] = cell;
                    sym_layout[(i, new_height - j - 1)] = cell;
                    sym_layout[(new_width - i - 1, j)] = cell;
                    sym_layout[(new_width - i - 1, new_height - j - 1)] = cell;
                }
            }
        }
        SymmetryMode::NoSym | SymmetryMode::Random => unreachable!(),
    }

    // Reconnect disjointed spirals. Rogue maps get the same treatment;
    // the spiral routine does the trick.
    if style == LayoutStyle::Spiral || style == LayoutStyle::Rogue {
        connect_spirals(&mut sym_layout, sym);
    }

    sym_layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::MapRng;

    fn sample_layout() -> Layout {
        let mut rng = MapRng::new(77);
        let mut layout = Layout::walled(12, 10);
        for _ in 0..20 {
            let x = rng.rn2(12) as usize;
            let y = rng.rn2(10) as usize;
            layout[(x, y)] = LayoutCell::Wall;
        }
        layout
    }

    #[test]
    fn test_no_sym_is_identity() {
        let layout = sample_layout();
        let out = symmetrize_layout(layout.clone(), SymmetryMode::NoSym, LayoutStyle::Onion);
        assert_eq!(out, layout);
    }

    #[test]
    fn test_mirror_x_dimensions_and_symmetry() {
        let layout = sample_layout();
        let out = symmetrize_layout(layout, SymmetryMode::MirrorX, LayoutStyle::Onion);
        assert_eq!(out.width(), 12 * 2 - 3);
        assert_eq!(out.height(), 10);
        for x in 0..out.width() {
            for y in 0..out.height() {
                assert_eq!(out[(x, y)], out[(out.width() - x - 1, y)]);
            }
        }
    }

    #[test]
    fn test_mirror_y_dimensions_and_symmetry() {
        let layout = sample_layout();
        let out = symmetrize_layout(layout, SymmetryMode::MirrorY, LayoutStyle::Onion);
        assert_eq!(out.width(), 12);
        assert_eq!(out.height(), 10 * 2 - 3);
        for x in 0..out.width() {
            for y in 0..out.height() {
                assert_eq!(out[(x, y)], out[(x, out.height() - y - 1)]);
            }
        }
    }

    #[test]
    fn test_mirror_xy_dimensions() {
        let layout = sample_layout();
        let out = symmetrize_layout(layout, SymmetryMode::MirrorXY, LayoutStyle::Onion);
        assert_eq!(out.width(), 12 * 2 - 3);
        assert_eq!(out.height(), 10 * 2 - 3);
        for x in 0..out.width() {
            for y in 0..out.height() {
                assert_eq!(out[(x, y)], out[(out.width() - x - 1, out.height() - y - 1)]);
            }
        }
    }

    #[test]
    fn test_spiral_gets_reconnected() {
        // A mirrored spiral must have an open seam corridor; easiest
        // check is that the map center is open afterwards.
        let mut rng = MapRng::new(5);
        let spiral = super::super::spiral::gen_spiral(15, 15, 2, &mut rng);
        let out = symmetrize_layout(spiral, SymmetryMode::MirrorX, LayoutStyle::Spiral);
        let (cx, cy) = (out.width() / 2, out.height() / 2);
        assert_eq!(out[(cx, cy)], LayoutCell::Open);
    }
}
