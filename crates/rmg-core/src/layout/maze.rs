//! Perfect maze generator.
//!
//! Grows walls inward from a list of free attachment points on the
//! outer wall, so the result has no trivial circle-the-outer-wall
//! solution. Every open cell stays reachable from every other, and in
//! full mode there is exactly one path between any two cells.

use super::{Layout, LayoutCell};
use crate::rng::MapRng;

/// Spots on the outer wall that a maze wall may still grow out of:
/// the border cells that aren't corners or next to corners.
fn make_wall_free_list(xsize: usize, ysize: usize) -> Vec<(i32, i32)> {
    let mut list = Vec::with_capacity(2 * xsize.saturating_sub(4) + 2 * ysize.saturating_sub(4));

    // Top and bottom wall.
    for i in 2..xsize.saturating_sub(2) {
        list.push((i as i32, 0));
        list.push((i as i32, ysize as i32 - 1));
    }
    // Left and right wall.
    for j in 2..ysize.saturating_sub(2) {
        list.push((0, j as i32));
        list.push((xsize as i32 - 1, j as i32));
    }
    list
}

/// Remove and return a random point from the free wall list.
fn pop_wall_point(free_walls: &mut Vec<(i32, i32)>, rng: &mut MapRng) -> (i32, i32) {
    let index = rng.rn2(free_walls.len() as u32) as usize;
    free_walls.swap_remove(index)
}

/// Randomly look for a square adjacent to `(xc, yc)` where a new wall
/// block can go without closing a path. Only the four cardinal
/// neighbours are considered; a direction qualifies when the six cells
/// ahead of it are all blank.
fn find_free_point(layout: &Layout, xc: i32, yc: i32, rng: &mut MapRng) -> Option<(i32, i32)> {
    let blank = |x: i32, y: i32| layout.get(x, y) == Some(LayoutCell::Open);
    let xsize = layout.width() as i32;
    let ysize = layout.height() as i32;

    let mut dirs: [(i32, i32); 4] = [(0, 0); 4];
    let mut count = 0;

    // Look up.
    if yc < ysize - 2 && xc > 2 && xc < xsize - 2 {
        let clear = blank(xc, yc + 1)
            && blank(xc - 1, yc + 1)
            && blank(xc + 1, yc + 1)
            && blank(xc, yc + 2)
            && blank(xc - 1, yc + 2)
            && blank(xc + 1, yc + 2);
        if clear {
            dirs[count] = (xc, yc + 1);
            count += 1;
        }
    }

    // Look down.
    if yc > 2 && xc > 2 && xc < xsize - 2 {
        let clear = blank(xc, yc - 1)
            && blank(xc - 1, yc - 1)
            && blank(xc + 1, yc - 1)
            && blank(xc, yc - 2)
            && blank(xc - 1, yc - 2)
            && blank(xc + 1, yc - 2);
        if clear {
            dirs[count] = (xc, yc - 1);
            count += 1;
        }
    }

    // Look right.
    if xc < xsize - 2 && yc > 2 && yc < ysize - 2 {
        let clear = blank(xc + 1, yc)
            && blank(xc + 1, yc - 1)
            && blank(xc + 1, yc + 1)
            && blank(xc + 2, yc)
            && blank(xc + 2, yc - 1)
            && blank(xc + 2, yc + 1);
        if clear {
            dirs[count] = (xc + 1, yc);
            count += 1;
        }
    }

    // Look left.
    if xc > 2 && yc > 2 && yc < ysize - 2 {
        let clear = blank(xc - 1, yc)
            && blank(xc - 1, yc - 1)
            && blank(xc - 1, yc + 1)
            && blank(xc - 2, yc)
            && blank(xc - 2, yc - 1)
            && blank(xc - 2, yc + 1);
        if clear {
            dirs[count] = (xc - 1, yc);
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }
    let pick = if count > 1 { rng.rn2(count as u32) as usize } else { 0 };
    Some(dirs[pick])
}

/// Grow a wall run, filling every available space.
fn fill_maze_full(
    layout: &mut Layout,
    x: i32,
    y: i32,
    free_walls: &mut Vec<(i32, i32)>,
    rng: &mut MapRng,
) {
    layout[(x as usize, y as usize)] = LayoutCell::Wall;

    // Sometimes jump to a fresh point from the free wall list instead
    // of continuing this run.
    if rng.rn2(4) != 0 && !free_walls.is_empty() {
        let (xc, yc) = pop_wall_point(free_walls, rng);
        fill_maze_full(layout, xc, yc, free_walls, rng);
    }

    while let Some((xc, yc)) = find_free_point(layout, x, y, rng) {
        fill_maze_full(layout, xc, yc, free_walls, rng);
    }
}

/// Like [`fill_maze_full`] but extends each run at most one step, so
/// sizeable open areas survive toward the center.
fn fill_maze_sparse(
    layout: &mut Layout,
    x: i32,
    y: i32,
    free_walls: &mut Vec<(i32, i32)>,
    rng: &mut MapRng,
) {
    layout[(x as usize, y as usize)] = LayoutCell::Wall;

    if rng.rn2(4) != 0 && !free_walls.is_empty() {
        let (xc, yc) = pop_wall_point(free_walls, rng);
        fill_maze_sparse(layout, xc, yc, free_walls, rng);
    }

    if let Some((xc, yc)) = find_free_point(layout, x, y, rng) {
        fill_maze_sparse(layout, xc, yc, free_walls, rng);
    }
}

/// Generate a maze layout. `full` fills every available space with
/// walls; otherwise the maze is sparse, with sizeable rooms left open.
pub fn gen_maze(xsize: usize, ysize: usize, full: bool, rng: &mut MapRng) -> Layout {
    let mut layout = Layout::walled(xsize, ysize);

    let mut free_walls = make_wall_free_list(xsize, ysize);
    if free_walls.is_empty() {
        // Map too small for interior walls; the empty bordered layout
        // is the maze.
        return layout;
    }

    while !free_walls.is_empty() {
        let (i, j) = pop_wall_point(&mut free_walls, rng);
        if full {
            fill_maze_full(&mut layout, i, j, &mut free_walls, rng);
        } else {
            fill_maze_sparse(&mut layout, i, j, &mut free_walls, rng);
        }
    }

    layout
}
