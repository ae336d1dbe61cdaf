//! Layout grids and the style generators that produce them.
//!
//! A layout is pure topology: which cells are open, walls, doors or
//! stairs. Turning a layout into a populated game map is the
//! orchestrator's business (see [`crate::map`]).

mod expand;
mod maze;
mod onion;
mod post;
mod rogue;
mod rotate;
mod snake;
mod spiral;
mod square_spiral;
mod symmetry;

pub use expand::expand2x;
pub use post::{doorify_layout, roomify_layout};
pub use rotate::{Rotation, rotate_layout};
pub use symmetry::symmetrize_layout;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::errors::{GenError, check_dimensions};
use crate::params::{LayoutOptions, LayoutStyle, MapParams, MIN_MAP_SIZE, SymmetryMode};
use crate::rng::MapRng;

/// One cell of a layout grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum LayoutCell {
    /// Nothing here; passable.
    #[default]
    Open = 0,
    Wall,
    Door,
    StairsUp,
    StairsDown,
    /// Transient carving marker used by the rogue generator while it can
    /// still tell room floor apart from untouched space. Never present
    /// in a finished layout.
    Floor,
}

impl LayoutCell {
    /// Display character, matching the classic dump format.
    pub const fn symbol(&self) -> char {
        match self {
            LayoutCell::Open => '.',
            LayoutCell::Wall => '#',
            LayoutCell::Door => '+',
            LayoutCell::StairsUp => '<',
            LayoutCell::StairsDown => '>',
            LayoutCell::Floor => '.',
        }
    }

    /// Check if this cell blocks movement.
    pub const fn is_wall(&self) -> bool {
        matches!(self, LayoutCell::Wall)
    }

    /// Check if something occupies this cell (anything but blank space).
    pub const fn is_occupied(&self) -> bool {
        !matches!(self, LayoutCell::Open | LayoutCell::Floor)
    }
}

/// A 2D grid of [`LayoutCell`], stored as a flat row-major buffer.
///
/// Indexing is `(x, y)` with `x` running along the width. All access is
/// bounds-checked; out-of-range indexing panics like slice indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    width: usize,
    height: usize,
    cells: Vec<LayoutCell>,
}

impl Layout {
    /// Create an all-open layout.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, LayoutCell::Open)
    }

    /// Create a layout filled with the given cell.
    pub fn filled(width: usize, height: usize, cell: LayoutCell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width * height],
        }
    }

    /// Create an all-open layout with a wall border.
    pub fn walled(width: usize, height: usize) -> Self {
        let mut layout = Self::new(width, height);
        layout.add_border();
        layout
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<LayoutCell> {
        if self.in_bounds(x, y) {
            Some(self[(x as usize, y as usize)])
        } else {
            None
        }
    }

    /// Write the outer border as walls.
    pub fn add_border(&mut self) {
        let (w, h) = (self.width, self.height);
        for x in 0..w {
            self[(x, 0)] = LayoutCell::Wall;
            self[(x, h - 1)] = LayoutCell::Wall;
        }
        for y in 0..h {
            self[(0, y)] = LayoutCell::Wall;
            self[(w - 1, y)] = LayoutCell::Wall;
        }
    }

    /// Which of the four neighbours of `(x, y)` are occupied.
    ///
    /// Bit 1 = left, 2 = right, 4 = above, 8 = below.
    pub fn occupied_flags(&self, x: usize, y: usize) -> u8 {
        let mut index = 0;
        if x > 0 && self[(x - 1, y)].is_occupied() {
            index |= 1;
        }
        if x < self.width - 1 && self[(x + 1, y)].is_occupied() {
            index |= 2;
        }
        if y > 0 && self[(x, y - 1)].is_occupied() {
            index |= 4;
        }
        if y < self.height - 1 && self[(x, y + 1)].is_occupied() {
            index |= 8;
        }
        index
    }

    /// Which of the four neighbours of `(x, y)` are walls proper.
    ///
    /// Same bit assignment as [`Layout::occupied_flags`].
    pub fn wall_flags(&self, x: usize, y: usize) -> u8 {
        let mut index = 0;
        if x > 0 && self[(x - 1, y)].is_wall() {
            index |= 1;
        }
        if x < self.width - 1 && self[(x + 1, y)].is_wall() {
            index |= 2;
        }
        if y > 0 && self[(x, y - 1)].is_wall() {
            index |= 4;
        }
        if y < self.height - 1 && self[(x, y + 1)].is_wall() {
            index |= 8;
        }
        index
    }

    /// Erase doors whose 4-neighbourhood is not one of the two valid
    /// pinch patterns (occupied left+right or occupied above+below).
    ///
    /// Whenever a door is erased the scan restarts from the top-left
    /// corner, so earlier doors invalidated by the erasure get
    /// re-checked. Doors are only ever removed here, which guarantees
    /// termination; worst case is quadratic in the cell count.
    pub fn remove_bad_doors(&mut self) {
        let mut x = 0;
        while x < self.width {
            let mut y = 0;
            while y < self.height {
                if self[(x, y)] == LayoutCell::Door {
                    let index = self.occupied_flags(x, y);
                    if index != 3 && index != 12 {
                        self[(x, y)] = LayoutCell::Open;
                        x = 0;
                        y = 0;
                        continue;
                    }
                }
                y += 1;
            }
            x += 1;
        }
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, LayoutCell)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self[(x, y)])))
    }

    /// Count cells matching a predicate.
    pub fn count(&self, mut pred: impl FnMut(LayoutCell) -> bool) -> usize {
        self.cells.iter().filter(|c| pred(**c)).count()
    }

    /// Find the first cell equal to `cell`, scanning columns first.
    pub fn find(&self, cell: LayoutCell) -> Option<(usize, usize)> {
        for x in 0..self.width {
            for y in 0..self.height {
                if self[(x, y)] == cell {
                    return Some((x, y));
                }
            }
        }
        None
    }
}

impl std::ops::Index<(usize, usize)> for Layout {
    type Output = LayoutCell;

    fn index(&self, (x, y): (usize, usize)) -> &LayoutCell {
        assert!(x < self.width && y < self.height, "layout index out of bounds");
        &self.cells[y * self.width + x]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Layout {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut LayoutCell {
        assert!(x < self.width && y < self.height, "layout index out of bounds");
        &mut self.cells[y * self.width + x]
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self[(x, y)].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Build the raw layout for the resolved parameters.
///
/// Resolves the symmetry mode and layout style, halves dimensions along
/// mirrored axes, runs the style generator with its optional
/// post-process pass, symmetrizes, and expands 2x when requested. The
/// resolved dimensions and modes are written back into `params` once the
/// layout is final.
pub fn layout_gen(params: &mut MapParams, rng: &mut MapRng) -> Result<Layout, GenError> {
    let orig_xsize = params.xsize;
    let orig_ysize = params.ysize;

    let mut sym = match params.symmetry {
        SymmetryMode::Random => SymmetryMode::concrete(rng.rn2(4) + 1),
        mode => mode,
    };

    let mut xsize = params.xsize;
    let mut ysize = params.ysize;
    if sym == SymmetryMode::MirrorY || sym == SymmetryMode::MirrorXY {
        ysize = ysize / 2 + 1;
    }
    if sym == SymmetryMode::MirrorX || sym == SymmetryMode::MirrorXY {
        xsize = xsize / 2 + 1;
    }
    if xsize < MIN_MAP_SIZE {
        xsize = MIN_MAP_SIZE + rng.rn2(5) as i32;
    }
    if ysize < MIN_MAP_SIZE {
        ysize = MIN_MAP_SIZE + rng.rn2(5) as i32;
    }

    let style = match LayoutStyle::from_name(&params.layoutstyle) {
        Some(style) => style,
        None => {
            // No style found, pick one at random.
            LayoutStyle::ALL[rng.rn2(LayoutStyle::ALL.len() as u32) as usize]
        }
    };
    params.map_layout_style = Some(style);

    let (w, h) = check_dimensions(xsize, ysize)?;
    let options = LayoutOptions::from_bits_truncate(params.layoutoptions1 as u32);

    let mut layout = match style {
        LayoutStyle::Onion => {
            let (mut layout, _center) =
                onion::gen_onion(w, h, options, params.layoutoptions2, rng);
            if rng.one_in(3) && !options.contains(LayoutOptions::WALLS_ONLY) {
                roomify_layout(&mut layout, rng);
            }
            layout
        }
        LayoutStyle::Maze => {
            let mut layout = maze::gen_maze(w, h, rng.coin(), rng);
            if rng.one_in(2) {
                doorify_layout(&mut layout, rng);
            }
            layout
        }
        LayoutStyle::Spiral => {
            let mut layout = spiral::gen_spiral(w, h, params.layoutoptions1, rng);
            if rng.one_in(2) {
                doorify_layout(&mut layout, rng);
            }
            layout
        }
        LayoutStyle::Rogue => {
            // No symmetry for rogue maps: the reconnection pass assumes
            // spirals or passage-heavy styles, and mirrored rogue rooms
            // are likely to end up disconnected.
            sym = SymmetryMode::NoSym;
            let (w, h) = check_dimensions(orig_xsize, orig_ysize)?;
            rogue::gen_rogue(w, h, params.layoutoptions1, rng)
            // No doorifying, it is done already.
        }
        LayoutStyle::Snake => {
            let mut layout = snake::gen_snake(w, h, rng);
            if rng.coin() {
                roomify_layout(&mut layout, rng);
            }
            layout
        }
        LayoutStyle::SquareSpiral => {
            let mut layout = square_spiral::gen_square_spiral(w, h, rng);
            if rng.coin() {
                roomify_layout(&mut layout, rng);
            }
            layout
        }
    };

    params.symmetry_used = sym;
    layout = symmetrize_layout(layout, sym, style);
    log::debug!("layout after symmetrize:\n{layout}");

    if params.expand2x != 0 {
        layout = expand2x(&layout);
    }

    params.xsize = layout.width() as i32;
    params.ysize = layout.height() as i32;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let mut layout = Layout::new(7, 5);
        layout[(6, 4)] = LayoutCell::Door;
        layout[(0, 4)] = LayoutCell::Wall;
        assert_eq!(layout[(6, 4)], LayoutCell::Door);
        assert_eq!(layout[(0, 4)], LayoutCell::Wall);
        assert_eq!(layout[(3, 2)], LayoutCell::Open);
    }

    #[test]
    fn test_walled_border() {
        let layout = Layout::walled(6, 4);
        for x in 0..6 {
            assert_eq!(layout[(x, 0)], LayoutCell::Wall);
            assert_eq!(layout[(x, 3)], LayoutCell::Wall);
        }
        for y in 0..4 {
            assert_eq!(layout[(0, y)], LayoutCell::Wall);
            assert_eq!(layout[(5, y)], LayoutCell::Wall);
        }
        assert_eq!(layout[(2, 2)], LayoutCell::Open);
    }

    #[test]
    fn test_occupied_and_wall_flags() {
        let mut layout = Layout::new(5, 5);
        layout[(1, 2)] = LayoutCell::Wall;
        layout[(3, 2)] = LayoutCell::Door;
        // (2,2): wall to the left, door to the right, open above/below.
        assert_eq!(layout.occupied_flags(2, 2), 3);
        assert_eq!(layout.wall_flags(2, 2), 1);
    }

    #[test]
    fn test_remove_bad_doors() {
        let mut layout = Layout::new(5, 5);
        // A valid door: walls left and right, open above and below.
        layout[(1, 2)] = LayoutCell::Wall;
        layout[(2, 2)] = LayoutCell::Door;
        layout[(3, 2)] = LayoutCell::Wall;
        // A dangling door in the open.
        layout[(0, 4)] = LayoutCell::Door;
        layout.remove_bad_doors();
        assert_eq!(layout[(2, 2)], LayoutCell::Door);
        assert_eq!(layout[(0, 4)], LayoutCell::Open);
    }

    #[test]
    fn test_display_symbols() {
        let mut layout = Layout::new(3, 1);
        layout[(0, 0)] = LayoutCell::Wall;
        layout[(1, 0)] = LayoutCell::Door;
        assert_eq!(layout.to_string(), "#+.\n");
    }
}
