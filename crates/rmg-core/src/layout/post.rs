//! Post-processing passes shared by the layout generators: cutting
//! open areas into rooms and dropping doors into wall gaps.

use super::{Layout, LayoutCell};
use crate::rng::MapRng;

/// Wall direction for [`make_wall`] and [`can_make_wall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WallDir {
    Horizontal,
    Vertical,
}

/// Take a layout and make some rooms in it. Works best on onions.
pub fn roomify_layout(layout: &mut Layout, rng: &mut MapRng) {
    let tries = layout.width() * layout.height() / 30;

    for _ in 0..tries {
        // Starting location for looking at creating a door.
        let dx = rng.rn2(layout.width() as u32) as usize;
        let dy = rng.rn2(layout.height() as u32) as usize;

        let cx = can_make_wall(layout, dx, dy, WallDir::Horizontal);
        let cy = can_make_wall(layout, dx, dy, WallDir::Vertical);
        match (cx, cy) {
            (None, Some(_)) => make_wall(layout, dx, dy, WallDir::Vertical),
            (None, None) => {}
            (Some(_), None) => make_wall(layout, dx, dy, WallDir::Horizontal),
            (Some(cx), Some(cy)) => {
                // Prefer the shorter wall.
                if cx < cy {
                    make_wall(layout, dx, dy, WallDir::Horizontal);
                } else {
                    make_wall(layout, dx, dy, WallDir::Vertical);
                }
            }
        }
    }
}

/// Check whether a wall placed at `(dx, dy)` in the given direction
/// would end up on other walls sensibly. Returns the wall length, or
/// `None` when no wall can be made here.
pub(crate) fn can_make_wall(
    layout: &Layout,
    dx: usize,
    dy: usize,
    dir: WallDir,
) -> Option<usize> {
    // Don't make walls if we're on the edge, or ON a wall.
    if dx == 0 || dx == layout.width() - 1 || dy == 0 || dy == layout.height() - 1 {
        return None;
    }
    if layout[(dx, dy)] != LayoutCell::Open {
        return None;
    }

    let mut length = 0;
    match dir {
        WallDir::Horizontal => {
            // Walk left until we hit a wall coming from the left (bit
            // 1); any other wall contact or occupied cell disqualifies
            // the spot.
            let mut i = dx - 1;
            while i > 0 {
                let sindex = layout.wall_flags(i, dy);
                if sindex == 1 {
                    break;
                }
                if sindex != 0 || layout[(i, dy)] != LayoutCell::Open {
                    return None;
                }
                length += 1;
                i -= 1;
            }
            // Then right, expecting a wall on the right (bit 2).
            for i in dx + 1..layout.width() - 1 {
                let sindex = layout.wall_flags(i, dy);
                if sindex == 2 {
                    break;
                }
                if sindex != 0 || layout[(i, dy)] != LayoutCell::Open {
                    return None;
                }
                length += 1;
            }
        }
        WallDir::Vertical => {
            let mut j = dy - 1;
            while j > 0 {
                let sindex = layout.wall_flags(dx, j);
                if sindex == 4 {
                    break;
                }
                if sindex != 0 || layout[(dx, j)] != LayoutCell::Open {
                    return None;
                }
                length += 1;
                j -= 1;
            }
            for j in dy + 1..layout.height() - 1 {
                let sindex = layout.wall_flags(dx, j);
                if sindex == 8 {
                    break;
                }
                if sindex != 0 || layout[(dx, j)] != LayoutCell::Open {
                    return None;
                }
                length += 1;
            }
        }
    }
    Some(length)
}

/// Cut the layout horizontally or vertically by a wall with a door at
/// `(x, y)`. The wall grows both ways until it meets something
/// non-blank.
pub(crate) fn make_wall(layout: &mut Layout, x: usize, y: usize, dir: WallDir) {
    layout[(x, y)] = LayoutCell::Door; // mark a door
    match dir {
        WallDir::Horizontal => {
            let mut i = x as i32 - 1;
            while i >= 0 && layout[(i as usize, y)] == LayoutCell::Open {
                layout[(i as usize, y)] = LayoutCell::Wall;
                i -= 1;
            }
            let mut i = x + 1;
            while i < layout.width() && layout[(i, y)] == LayoutCell::Open {
                layout[(i, y)] = LayoutCell::Wall;
                i += 1;
            }
        }
        WallDir::Vertical => {
            let mut j = y as i32 - 1;
            while j >= 0 && layout[(x, j as usize)] == LayoutCell::Open {
                layout[(x, j as usize)] = LayoutCell::Wall;
                j -= 1;
            }
            let mut j = y + 1;
            while j < layout.height() && layout[(x, j)] == LayoutCell::Open {
                layout[(x, j)] = LayoutCell::Wall;
                j += 1;
            }
        }
    }
}

/// Put doors at appropriate locations in a layout: pick random spots
/// from the list of wall gaps pinched between two walls, until a
/// reasonable number of doors is in.
pub fn doorify_layout(layout: &mut Layout, rng: &mut MapRng) {
    let mut ndoors = layout.width() * layout.height() / 60;

    // Make a list of possible door locations.
    let mut doorlocs: Vec<(usize, usize)> = Vec::new();
    for i in 1..layout.width() - 1 {
        for j in 1..layout.height() - 1 {
            let sindex = layout.occupied_flags(i, j);
            if sindex == 3 || sindex == 12 {
                doorlocs.push((i, j));
            }
        }
    }

    while ndoors > 0 && !doorlocs.is_empty() {
        let di = rng.rn2(doorlocs.len() as u32) as usize;
        let (i, j) = doorlocs[di];
        // Re-check: an earlier door may have changed the surroundings.
        let sindex = layout.occupied_flags(i, j);
        if sindex == 3 || sindex == 12 {
            layout[(i, j)] = LayoutCell::Door;
            ndoors -= 1;
        }
        doorlocs.swap_remove(di);
    }
}
