//! The spiral room generator.
//!
//! Cuts an Archimedean spiral corridor out of a solid block, then
//! drops the up exit at the spiral's outer tip and the down exit next
//! to the center.

use bitflags::bitflags;

use super::{Layout, LayoutCell};
use crate::params::SymmetryMode;
use crate::rng::MapRng;

bitflags! {
    /// Spiral generator options (`layoutoptions1` on the wire).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SpiralOptions: u32 {
        /// Regular spiral: distance increases constantly.
        const REGULAR = 1;
        /// Uses the minimum separation: most coiling.
        const FINE = 2;
        /// Scale to a rectangular region, not square.
        const FIT = 4;
    }
}

/// 2x the last real option; the bound for rolling random options.
const MAX_SPIRAL_OPT: u32 = 8;

/// Tightest pitch that still leaves a wall between coils.
const MAX_FINE: f32 = 0.454545;

/// Generate a spiral layout.
pub fn gen_spiral(xsize: usize, ysize: usize, options: i32, rng: &mut MapRng) -> Layout {
    // Slightly easier to fill and then cut.
    let mut layout = Layout::filled(xsize, ysize, LayoutCell::Wall);

    let ic = (xsize / 2) as i32;
    let jc = (ysize / 2) as i32;
    let size_x = (xsize as i32 / 2 - 2) as f32;
    let size_y = (ysize as i32 / 2 - 2) as f32;

    // Select random options if necessary.
    let mut options = if options == 0 {
        SpiralOptions::from_bits_truncate(rng.rn2(MAX_SPIRAL_OPT))
    } else {
        SpiralOptions::from_bits_truncate(options as u32)
    };

    // The order in which these are evaluated matters.

    // REGULAR and FIT are mutually exclusive; pick one if both are set.
    if options.contains(SpiralOptions::REGULAR | SpiralOptions::FIT) {
        if rng.coin() {
            options.remove(SpiralOptions::REGULAR);
        } else {
            options.remove(SpiralOptions::FIT);
        }
    }

    let mut xscale = MAX_FINE; // fine spiral
    let mut yscale = MAX_FINE;

    // Choose the spiral pitch.
    if !options.contains(SpiralOptions::FINE) {
        let pitch = rng.rn2(5) as f32 / 10.0 + 10.0 / 22.0;
        xscale = pitch;
        yscale = pitch;
    }

    if options.contains(SpiralOptions::FIT) && xsize != ysize {
        if xsize > ysize {
            xscale *= xsize as f32 / ysize as f32;
        } else {
            yscale *= ysize as f32 / xsize as f32;
        }
    }

    if options.contains(SpiralOptions::REGULAR) {
        let scale = xscale.min(yscale);
        xscale = scale;
        yscale = scale;
    }

    // Cut out the spiral.
    let mut parm: f32 = 0.0;
    let mut x: f32 = 0.0;
    let mut y: f32 = 0.0;
    while x.abs().trunc() < size_x && y.abs().trunc() < size_y {
        x = parm * parm.cos() * xscale;
        y = parm * parm.sin() * yscale;
        layout[((ic as f32 + x) as usize, (jc as f32 + y) as usize)] = LayoutCell::Open;
        parm += 0.01;
    }

    // The up exit goes at the spiral's outer tip, the down exit next
    // to the center; the center cell itself stays open for an exit to
    // be placed later.
    layout[((ic as f32 + x + 0.5) as usize, (jc as f32 + y + 0.5) as usize)] =
        LayoutCell::StairsUp;
    layout[(ic as usize, jc as usize + 1)] = LayoutCell::StairsDown;

    layout
}

/// Connect disjoint spirals which may result from symmetrization, by
/// cutting corridors outward from the mirror seams, then erase any door
/// the cutting invalidated.
pub(crate) fn connect_spirals(layout: &mut Layout, sym: SymmetryMode) {
    let xsize = layout.width() as i32;
    let ysize = layout.height() as i32;
    let ic = xsize / 2;
    let jc = ysize / 2;

    let cut = |layout: &mut Layout, x: i32, y: i32| {
        layout[(x as usize, y as usize)] = LayoutCell::Open;
    };
    let is_wall = |layout: &Layout, x: i32, y: i32| layout[(x as usize, y as usize)].is_wall();

    if sym == SymmetryMode::MirrorX {
        cut(layout, ic, jc);
        // Go left from map center, then right.
        let mut i = ic - 1;
        while i > 0 && is_wall(layout, i, jc) {
            cut(layout, i, jc);
            i -= 1;
        }
        let mut i = ic + 1;
        while i < xsize - 1 && is_wall(layout, i, jc) {
            cut(layout, i, jc);
            i += 1;
        }
    }

    if sym == SymmetryMode::MirrorY {
        cut(layout, ic, jc);
        // Go up, then down.
        let mut j = jc - 1;
        while j > 0 && is_wall(layout, ic, j) {
            cut(layout, ic, j);
            j -= 1;
        }
        let mut j = jc + 1;
        while j < ysize - 1 && is_wall(layout, ic, j) {
            cut(layout, ic, j);
            j += 1;
        }
    }

    if sym == SymmetryMode::MirrorXY {
        // Four quadrant centers; cut crosses through both seam lines.
        cut(layout, ic, jc / 2);
        cut(layout, ic / 2, jc);
        cut(layout, ic, jc / 2 + jc);
        cut(layout, ic / 2 + ic, jc);
        // Go left from the upper quadrant center, mirroring into the
        // lower one, then right.
        let mut i = ic - 1;
        while i > 0 && is_wall(layout, i, jc / 2) {
            cut(layout, i, jc / 2 + jc);
            cut(layout, i, jc / 2);
            i -= 1;
        }
        let mut i = ic + 1;
        while i < xsize - 1 && is_wall(layout, i, jc / 2) {
            cut(layout, i, jc / 2 + jc);
            cut(layout, i, jc / 2);
            i += 1;
        }
        // Go up from the left quadrant center, mirroring into the
        // right one, then down.
        let mut j = jc - 1;
        while j > 0 && is_wall(layout, ic / 2, j) {
            cut(layout, ic / 2, j);
            cut(layout, ic / 2 + ic, j);
            j -= 1;
        }
        let mut j = jc + 1;
        while j < ysize - 1 && is_wall(layout, ic / 2, j) {
            cut(layout, ic / 2, j);
            cut(layout, ic / 2 + ic, j);
            j += 1;
        }
    }

    // Get rid of bad doors.
    layout.remove_bad_doors();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spiral_has_exits() {
        for seed in 0..10 {
            let mut rng = MapRng::new(seed);
            let layout = gen_spiral(30, 30, 0, &mut rng);
            assert_eq!(layout.count(|c| c == LayoutCell::StairsUp), 1, "seed {seed}");
            assert_eq!(layout.count(|c| c == LayoutCell::StairsDown), 1, "seed {seed}");
        }
    }

    #[test]
    fn test_spiral_center_open() {
        let mut rng = MapRng::new(4);
        let layout = gen_spiral(30, 30, SpiralOptions::FINE.bits() as i32, &mut rng);
        assert_eq!(layout[(15, 15)], LayoutCell::Open);
    }

    #[test]
    fn test_fit_spiral_rectangular() {
        // Just exercise the FIT path on a non-square map.
        let mut rng = MapRng::new(6);
        let layout = gen_spiral(40, 20, SpiralOptions::FIT.bits() as i32, &mut rng);
        assert!(layout.count(|c| c == LayoutCell::Open) > 0);
    }

    #[test]
    fn test_connect_spirals_opens_seam() {
        // A solid wall map with X symmetry must end up with an open
        // horizontal corridor through the middle row.
        let mut layout = Layout::filled(21, 21, LayoutCell::Wall);
        connect_spirals(&mut layout, SymmetryMode::MirrorX);
        for x in 1..20 {
            assert_eq!(layout[(x, 10)], LayoutCell::Open);
        }
        // The border stays.
        assert_eq!(layout[(0, 10)], LayoutCell::Wall);
        assert_eq!(layout[(20, 10)], LayoutCell::Wall);
    }
}
