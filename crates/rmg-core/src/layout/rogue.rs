//! Roguelike room generation.
//!
//! Works by reduction: start from solid wall, hollow out rooms, then
//! carve corridors between consecutive rooms. Doors and stairs are
//! placed here, so no doorify pass runs afterwards.

use super::{Layout, LayoutCell};
use crate::rng::MapRng;

#[derive(Debug, Clone, Copy)]
struct Room {
    /// Center.
    x: i32,
    y: i32,
    /// Size.
    sx: i32,
    sy: i32,
    /// Extrema of the bounding rectangle.
    ax: i32,
    ay: i32,
    zx: i32,
    zy: i32,
}

fn isqrt(n: i32) -> i32 {
    (n as f64).sqrt() as i32
}

/// Try to place one more room. Returns `None` when the trial position
/// is out of bounds, too small or overlaps an existing room.
fn place_room(rooms: &[Room], xsize: i32, ysize: i32, nrooms: i32, rng: &mut MapRng) -> Option<Room> {
    // Decide on the base x and y sizes.
    let x_basesize = xsize / isqrt(nrooms);
    let y_basesize = ysize / isqrt(nrooms);

    let tx = rng.rn2(xsize as u32) as i32;
    let ty = rng.rn2(ysize as u32) as i32;

    // Generate a distribution of sizes centered about basesize.
    let sx = (rng.rn2(x_basesize as u32) + rng.rn2(x_basesize as u32) + rng.rn2(x_basesize as u32))
        as i32;
    let sy = (rng.rn2(y_basesize as u32) + rng.rn2(y_basesize as u32) + rng.rn2(y_basesize as u32))
        as i32;
    let sy = (sy as f32 * 0.5) as i32; // renormalize

    // Find the corners.
    let ax = tx - sx / 2;
    let zx = tx + sx / 2 + sx % 2;
    let ay = ty - sy / 2;
    let zy = ty + sy / 2 + sy % 2;

    // Check to see if it's in the map.
    if zx > xsize - 1 || ax < 1 {
        return None;
    }
    if zy > ysize - 1 || ay < 1 {
        return None;
    }

    // No small fish.
    if sx < 3 || sy < 3 {
        return None;
    }

    // Check overlap with existing rooms.
    for walk in rooms {
        let dx = (tx - walk.x).abs();
        let dy = (ty - walk.y).abs();
        if dx < (walk.sx + sx) / 2 + 2 && dy < (walk.sy + sy) / 2 + 2 {
            return None;
        }
    }

    Some(Room {
        x: tx,
        y: ty,
        sx,
        sy,
        ax,
        ay,
        zx,
        zy,
    })
}

/// Hollow the rooms out of the solid layout.
///
/// `options`: 1 for rectangular rooms, 2 for circular ones, anything
/// else picks circular for roughly a third of the rooms.
fn make_rooms(rooms: &[Room], layout: &mut Layout, options: i32, rng: &mut MapRng) {
    for walk in rooms {
        let making_circle = match options {
            1 => false,
            2 => true,
            _ => rng.rn2(3) == 0,
        };

        let r = walk.sx.min(walk.sy) / 2;

        // Inscribe a rectangle or a circle.
        for i in walk.ax..walk.zx {
            for j in walk.ay..walk.zy {
                let dist = f64::hypot((walk.x - i) as f64, (walk.y - j) as f64);
                if !making_circle || (0.5 + dist) as i32 <= r {
                    layout[(i as usize, j as usize)] = LayoutCell::Floor;
                }
            }
        }
    }
}

/// One step of the corridor state machine: carve through walls,
/// dropping a door on each wall entry and exit.
fn carve(layout: &mut Layout, x: usize, y: usize, in_wall: &mut bool, exit_door: (usize, usize)) {
    let cell = layout[(x, y)];
    if !*in_wall && cell == LayoutCell::Wall {
        *in_wall = true;
        layout[(x, y)] = LayoutCell::Door;
    } else if *in_wall && cell == LayoutCell::Floor {
        *in_wall = false;
        layout[exit_door] = LayoutCell::Door;
    } else if cell != LayoutCell::Door && cell != LayoutCell::Floor {
        layout[(x, y)] = LayoutCell::Open;
    }
}

/// Link each room to the previous one with an L-shaped corridor,
/// horizontal-first or vertical-first at random.
fn link_rooms(rooms: &[Room], layout: &mut Layout, rng: &mut MapRng) {
    if rooms.len() < 2 {
        return; // only 1 room
    }

    for k in 1..rooms.len() {
        let mut x1 = rooms[k].x;
        let mut y1 = rooms[k].y;
        let mut x2 = rooms[k - 1].x;
        let mut y2 = rooms[k - 1].y;
        let mut in_wall = false;

        if rng.coin() {
            // Connect in x direction first; swap so x1 <= x2.
            if x2 < x1 {
                std::mem::swap(&mut x1, &mut x2);
                std::mem::swap(&mut y1, &mut y2);
            }

            let mut i = x1;
            let j = y1;
            while i < x2 {
                carve(layout, i as usize, j as usize, &mut in_wall, (i as usize - 1, j as usize));
                i += 1;
            }

            // Then the vertical leg, from the corner down to the far
            // room's latitude.
            let mut j = y1.min(y2);
            match layout[(i as usize, j as usize)] {
                LayoutCell::Floor => in_wall = false,
                LayoutCell::Open | LayoutCell::Wall => in_wall = true,
                _ => {}
            }
            while j < y1.max(y2) {
                carve(layout, i as usize, j as usize, &mut in_wall, (i as usize, j as usize - 1));
                j += 1;
            }
        } else {
            // Connect in y direction first; swap so y1 <= y2.
            if y2 < y1 {
                std::mem::swap(&mut x1, &mut x2);
                std::mem::swap(&mut y1, &mut y2);
            }

            let i = x1;
            let mut j = y1;
            while j < y2 {
                carve(layout, i as usize, j as usize, &mut in_wall, (i as usize, j as usize - 1));
                j += 1;
            }

            let mut i = x1.min(x2);
            match layout[(i as usize, j as usize)] {
                LayoutCell::Floor => in_wall = false,
                LayoutCell::Open | LayoutCell::Wall => in_wall = true,
                _ => {}
            }
            while i < x1.max(x2) {
                carve(layout, i as usize, j as usize, &mut in_wall, (i as usize - 1, j as usize));
                i += 1;
            }
        }
    }
}

/// Hollow out the whole interior and drop a pair of stairs in the
/// middle; the fallback when the map is too small for rooms or none
/// could be placed.
fn trivial_layout(layout: &mut Layout, xsize: i32, ysize: i32) {
    for i in 1..(xsize - 1) as usize {
        for j in 1..(ysize - 1) as usize {
            layout[(i, j)] = LayoutCell::Open;
        }
    }
    let cx = ((xsize - 1) / 2) as usize;
    let cy = ((ysize - 1) / 2) as usize;
    layout[(cx, cy)] = LayoutCell::StairsDown;
    layout[(cx, cy + 1)] = LayoutCell::StairsUp;
}

/// Generate a rogue layout.
///
/// `options`: 1 for rectangular rooms, 2 for circular ones, anything
/// else mixes them randomly.
pub fn gen_rogue(xsize: usize, ysize: usize, options: i32, rng: &mut MapRng) -> Layout {
    let mut layout = Layout::filled(xsize, ysize, LayoutCell::Wall);
    let xsize = xsize as i32;
    let ysize = ysize as i32;

    // Minimum room size is basically 5x5: if the map is smaller than
    // about 3x that, hollow things out, stick in the stairs, and exit.
    if xsize < 11 || ysize < 11 {
        trivial_layout(&mut layout, xsize, ysize);
        return layout;
    }

    // Decide on the number of rooms.
    let nrooms = (rng.rn2(10) + 6) as i32;
    let mut rooms: Vec<Room> = Vec::with_capacity(nrooms as usize);

    // Actually place the rooms.
    let mut tries = 0;
    while tries < 450 && (rooms.len() as i32) < nrooms {
        match place_room(&rooms, xsize, ysize, nrooms, rng) {
            Some(room) => rooms.push(room),
            None => tries += 1,
        }
    }

    if rooms.is_empty() {
        // No can do!
        trivial_layout(&mut layout, xsize, ysize);
        return layout;
    }

    // Erase the areas occupied by the rooms, then link them.
    make_rooms(&rooms, &mut layout, options, rng);
    link_rooms(&rooms, &mut layout, rng);

    // Put in the stairs: up in the first room, down in the last.
    let first = rooms[0];
    let last = rooms[rooms.len() - 1];
    layout[(first.x as usize, first.y as usize)] = LayoutCell::StairsUp;
    if rooms.len() == 1 {
        // Single room: don't clobber the up exit, put the down exit one
        // space off, whichever side is floor and not wall.
        if layout[(last.x as usize, last.y as usize + 1)] == LayoutCell::Floor {
            layout[(last.x as usize, last.y as usize + 1)] = LayoutCell::StairsDown;
        } else {
            layout[(last.x as usize, last.y as usize - 1)] = LayoutCell::StairsDown;
        }
    } else {
        layout[(last.x as usize, last.y as usize)] = LayoutCell::StairsDown;
    }

    // We're through with the floor marker; room floor becomes plain
    // open space, then badly-placed doors get erased.
    for y in 0..layout.height() {
        for x in 0..layout.width() {
            if layout[(x, y)] == LayoutCell::Floor {
                layout[(x, y)] = LayoutCell::Open;
            }
        }
    }
    layout.remove_bad_doors();

    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(24), 4);
    }

    #[test]
    fn test_degenerate_small_map() {
        let mut rng = MapRng::new(1);
        let layout = gen_rogue(9, 9, 0, &mut rng);
        assert_eq!(layout[(4, 4)], LayoutCell::StairsDown);
        assert_eq!(layout[(4, 5)], LayoutCell::StairsUp);
        // Border stays solid.
        for x in 0..9 {
            assert_eq!(layout[(x, 0)], LayoutCell::Wall);
            assert_eq!(layout[(x, 8)], LayoutCell::Wall);
        }
    }

    #[test]
    fn test_has_both_stairs() {
        for seed in 0..20 {
            let mut rng = MapRng::new(seed);
            let layout = gen_rogue(40, 30, 0, &mut rng);
            assert_eq!(layout.count(|c| c == LayoutCell::StairsUp), 1, "seed {seed}");
            assert_eq!(layout.count(|c| c == LayoutCell::StairsDown), 1, "seed {seed}");
        }
    }

    #[test]
    fn test_no_transient_floor_left() {
        let mut rng = MapRng::new(7);
        let layout = gen_rogue(50, 40, 0, &mut rng);
        assert_eq!(layout.count(|c| c == LayoutCell::Floor), 0);
    }

    #[test]
    fn test_doors_are_valid() {
        let mut rng = MapRng::new(3);
        let layout = gen_rogue(40, 30, 0, &mut rng);
        for (x, y, cell) in layout.iter() {
            if cell == LayoutCell::Door {
                let flags = layout.occupied_flags(x, y);
                assert!(flags == 3 || flags == 12, "bad door at ({x},{y})");
            }
        }
    }

    #[test]
    fn test_stairs_not_walled_in() {
        // Stairs land on room centers, and rooms are at least 3x3, so
        // every stair must have a passable orthogonal neighbour.
        for seed in 0..20 {
            let mut rng = MapRng::new(seed);
            let layout = gen_rogue(40, 30, 0, &mut rng);
            for stairs in [LayoutCell::StairsUp, LayoutCell::StairsDown] {
                let (x, y) = layout.find(stairs).unwrap();
                let open_neighbours = [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)]
                    .iter()
                    .filter(|(dx, dy)| {
                        layout
                            .get(x as i32 + dx, y as i32 + dy)
                            .is_some_and(|c| !c.is_wall())
                    })
                    .count();
                assert!(open_neighbours > 0, "seed {seed}: {stairs:?} walled in");
            }
        }
    }

    #[test]
    fn test_rect_only_option() {
        // With options == 1 every opened cell belongs to a rectangle or
        // corridor; mostly a smoke test that the option is honored.
        let mut rng = MapRng::new(5);
        let layout = gen_rogue(40, 30, 1, &mut rng);
        assert!(layout.count(|c| c == LayoutCell::Open) > 0);
    }
}
