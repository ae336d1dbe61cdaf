//! Expands a layout by 2x in each dimension, taking care to keep
//! walls connected and doors attached to their walls.

use super::{Layout, LayoutCell};

/// Expand the layout by a factor 2; an `n` wide layout becomes
/// `2n - 1` wide. Doors and walls are taken care of.
pub fn expand2x(layout: &Layout) -> Layout {
    let xsize = layout.width();
    let ysize = layout.height();
    let mut out = Layout::new(xsize * 2 - 1, ysize * 2 - 1);

    for i in 0..xsize {
        for j in 0..ysize {
            match layout[(i, j)] {
                LayoutCell::Wall => expand_wall(&mut out, i, j, layout),
                LayoutCell::Door => expand_door(&mut out, i, j, layout),
                cell => {
                    // Copy the old cell into the top-left of its 2x2
                    // block; the rest stays blank.
                    out[(i * 2, j * 2)] = cell;
                }
            }
        }
    }

    out
}

/// Which squares on the right and bottom edges of `(i, j)` hold the
/// given cell: 1 means `(i+1, j)`, 2 means `(i, j+1)`, 4 means
/// `(i+1, j+1)`.
fn calc_pattern(cell: LayoutCell, layout: &Layout, i: usize, j: usize) -> u8 {
    let mut pattern = 0;
    if i + 1 < layout.width() && layout[(i + 1, j)] == cell {
        pattern |= 1;
    }
    if j + 1 < layout.height() {
        if layout[(i, j + 1)] == cell {
            pattern |= 2;
        }
        if i + 1 < layout.width() && layout[(i + 1, j + 1)] == cell {
            pattern |= 4;
        }
    }
    pattern
}

/// Expand a wall, connecting it to adjacent wall squares so the result
/// has no disconnected walls.
fn expand_wall(out: &mut Layout, i: usize, j: usize, layout: &Layout) {
    let wall_pattern = calc_pattern(LayoutCell::Wall, layout, i, j);
    let door_pattern = calc_pattern(LayoutCell::Door, layout, i, j);
    let both_pattern = wall_pattern | door_pattern;

    out[(i * 2, j * 2)] = LayoutCell::Wall;
    if i + 1 < layout.width() && both_pattern & 1 != 0 {
        // Join walls/doors to the right.
        out[(i * 2 + 1, j * 2)] = layout[(i + 1, j)];
    }
    if j + 1 < layout.height() {
        if both_pattern & 2 != 0 {
            // Join walls/doors to the bottom.
            out[(i * 2, j * 2 + 1)] = layout[(i, j + 1)];
        }
        if wall_pattern == 7 {
            // A 2x2 wall block expands to solid wall.
            out[(i * 2 + 1, j * 2 + 1)] = LayoutCell::Wall;
        }
    }
}

/// Expand a door so it meets up with adjacent walls. Doors prefer
/// connecting to walls over other doors; a door with a wall on one
/// side will disconnect from a door on the other.
fn expand_door(out: &mut Layout, i: usize, j: usize, layout: &Layout) {
    let wall_pattern = calc_pattern(LayoutCell::Wall, layout, i, j);
    let door_pattern = calc_pattern(LayoutCell::Door, layout, i, j);
    let join_pattern = if wall_pattern & 3 != 0 {
        wall_pattern
    } else {
        door_pattern
    };

    out[(i * 2, j * 2)] = LayoutCell::Door;
    if i + 1 < layout.width() && join_pattern & 1 != 0 {
        // There is a door/wall to the right.
        out[(i * 2 + 1, j * 2)] = LayoutCell::Door;
    }
    if j + 1 < layout.height() && join_pattern & 2 != 0 {
        // There is a door/wall below.
        out[(i * 2, j * 2 + 1)] = LayoutCell::Door;
    }
}
