//! Square-spiral layout generator.
//!
//! Starts from a doorless centered onion and cuts each layer open on a
//! rotating side, so the nested boxes become one long spiralling
//! corridor of rooms.

use super::post::{WallDir, make_wall};
use super::{Layout, LayoutCell, onion};
use crate::params::LayoutOptions;
use crate::rng::MapRng;

/// Starting from within an onion layer (or between two layers), look
/// up until a wall, then right along it until a vertical wall: the
/// top-right corner of that layer.
fn find_top_left_corner(layout: &Layout, cx: &mut i32, cy: &mut i32) {
    *cy -= 1;
    // Find the top wall.
    while *cy > 0 && !layout[(*cx as usize, *cy as usize)].is_occupied() {
        *cy -= 1;
    }
    // Proceed right until a corner is detected.
    while *cx < layout.width() as i32 - 1
        && !layout[(*cx as usize, *cy as usize + 1)].is_occupied()
    {
        *cx += 1;
    }
}

/// Generate a square-spiral layout.
pub fn gen_square_spiral(xsize: usize, ysize: usize, rng: &mut MapRng) -> Layout {
    // Generate a doorless, centered onion.
    let (mut layout, center) = onion::gen_onion(
        xsize,
        ysize,
        LayoutOptions::CENTERED | LayoutOptions::NO_DOORS,
        0,
        rng,
    );

    // When the map was too small to onionize there is no layer center;
    // the map center does as an exit spot.
    let (cx, cy) = center.unwrap_or(((xsize - 1) / 2, (ysize - 1) / 2));

    let mut tx = cx as i32;
    let mut ty = cy as i32;
    loop {
        find_top_left_corner(&layout, &mut tx, &mut ty);
        if ty < 2 || tx < 2 || tx > xsize as i32 - 2 || ty > ysize as i32 - 2 {
            break;
        }
        let (tx_u, ty_u) = (tx as usize, ty as usize);

        // Seal the corner upward and punch a doorway out of this layer
        // to its left instead.
        make_wall(&mut layout, tx_u, ty_u - 1, WallDir::Vertical);
        layout[(tx_u, ty_u - 1)] = LayoutCell::Wall;
        layout[(tx_u - 1, ty_u)] = LayoutCell::Door;

        // Walk left until we find the top-left corner.
        while tx > 2 && layout[(tx as usize - 1, ty as usize)].is_occupied() {
            tx -= 1;
        }
        make_wall(&mut layout, tx as usize - 1, ty as usize, WallDir::Horizontal);

        // Walk down until we find the bottom-left corner.
        while ty + 1 < ysize as i32 && layout[(tx as usize, ty as usize + 1)].is_occupied() {
            ty += 1;
        }
        make_wall(&mut layout, tx as usize, ty as usize + 1, WallDir::Vertical);

        // Walk right until we find the bottom-right corner.
        while tx + 1 < xsize as i32 && layout[(tx as usize + 1, ty as usize)].is_occupied() {
            tx += 1;
        }
        make_wall(&mut layout, tx as usize + 1, ty as usize, WallDir::Horizontal);
        tx += 1; // set up for next layer
    }

    // Place the exits: one in the center, one in the outermost ring.
    if rng.coin() {
        layout[(cx, cy)] = LayoutCell::StairsDown;
        layout[(xsize - 2, 1)] = LayoutCell::StairsUp;
    } else {
        layout[(cx, cy)] = LayoutCell::StairsUp;
        layout[(xsize - 2, 1)] = LayoutCell::StairsDown;
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_both_exits() {
        for seed in 0..10 {
            let mut rng = MapRng::new(seed);
            let layout = gen_square_spiral(24, 24, &mut rng);
            assert_eq!(layout.count(|c| c == LayoutCell::StairsUp), 1, "seed {seed}");
            assert_eq!(layout.count(|c| c == LayoutCell::StairsDown), 1, "seed {seed}");
        }
    }

    #[test]
    fn test_one_exit_in_outer_ring() {
        let mut rng = MapRng::new(2);
        let layout = gen_square_spiral(24, 24, &mut rng);
        let cell = layout[(22, 1)];
        assert!(cell == LayoutCell::StairsUp || cell == LayoutCell::StairsDown);
    }

    #[test]
    fn test_layers_have_doorways() {
        // The cutting pass must have produced doors out of the onion
        // layers.
        for seed in 0..10 {
            let mut rng = MapRng::new(seed);
            let layout = gen_square_spiral(30, 30, &mut rng);
            assert!(layout.count(|c| c == LayoutCell::Door) > 0, "seed {seed}");
        }
    }
}
