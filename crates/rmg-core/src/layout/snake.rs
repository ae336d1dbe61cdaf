//! Snake-like layout generator: parallel walls with doors at
//! alternating ends, forcing a zigzag path from one corner to the
//! other.

use super::{Layout, LayoutCell};
use crate::rng::MapRng;

/// Generate a snake layout.
pub fn gen_snake(xsize: usize, ysize: usize, rng: &mut MapRng) -> Layout {
    let mut layout = Layout::walled(xsize, ysize);

    // Bail out if the size is too small to make a snake.
    if xsize < 8 || ysize < 8 {
        return layout;
    }

    // Decide snake orientation, vertical or horizontal, and make the
    // walls and place the doors.
    if rng.coin() {
        // Vertical orientation.
        let n_walls = rng.rn2((xsize as u32 - 5) / 3) + 1;
        let spacing = xsize / (n_walls as usize + 1);
        let mut near_end = true;

        let mut i = spacing;
        while i < xsize - 3 {
            if near_end {
                for j in 1..ysize - 2 {
                    layout[(i, j)] = LayoutCell::Wall;
                }
                layout[(i, ysize - 2)] = LayoutCell::Door;
            } else {
                for j in 2..ysize {
                    layout[(i, j)] = LayoutCell::Wall;
                }
                layout[(i, 1)] = LayoutCell::Door;
            }
            near_end = !near_end;
            i += spacing;
        }
    } else {
        // Horizontal orientation.
        let n_walls = rng.rn2((ysize as u32 - 5) / 3) + 1;
        let spacing = ysize / (n_walls as usize + 1);
        let mut near_end = true;

        let mut i = spacing;
        while i < ysize - 3 {
            if near_end {
                for j in 1..xsize - 2 {
                    layout[(j, i)] = LayoutCell::Wall;
                }
                layout[(xsize - 2, i)] = LayoutCell::Door;
            } else {
                for j in 2..xsize {
                    layout[(j, i)] = LayoutCell::Wall;
                }
                layout[(1, i)] = LayoutCell::Door;
            }
            near_end = !near_end;
            i += spacing;
        }
    }

    // Place the exits in opposite corners, up/down at random.
    if rng.coin() {
        layout[(1, 1)] = LayoutCell::StairsUp;
        layout[(xsize - 2, ysize - 2)] = LayoutCell::StairsDown;
    } else {
        layout[(1, 1)] = LayoutCell::StairsDown;
        layout[(xsize - 2, ysize - 2)] = LayoutCell::StairsUp;
    }

    layout
}
