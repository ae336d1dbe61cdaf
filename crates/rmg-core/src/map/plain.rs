//! A plain text assembler, used by the CLI harness and the tests.
//!
//! It carries no game-object model: the "map" is the layout itself
//! plus the path and difficulty bookkeeping, and the population phases
//! only log what a real assembler would do.

use super::MapAssembler;
use crate::layout::Layout;
use crate::params::MapParams;
use crate::rng::MapRng;

/// A text-only assembled map.
#[derive(Debug, Clone)]
pub struct PlainMap {
    pub path: String,
    pub difficulty: i32,
    layout: Layout,
}

impl PlainMap {
    /// The map as rows of layout symbols.
    pub fn render(&self) -> String {
        self.layout.to_string()
    }

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn height(&self) -> usize {
        self.layout.height()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

/// Assembler producing [`PlainMap`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAssembler;

impl MapAssembler for PlainAssembler {
    type Map = PlainMap;

    fn make_floor(
        &mut self,
        path: &str,
        layout: &Layout,
        style: &str,
        params: &MapParams,
        _rng: &mut MapRng,
    ) -> PlainMap {
        log::debug!("floor style '{style}' over {}x{}", params.xsize, params.ysize);
        PlainMap {
            path: path.to_string(),
            difficulty: 0,
            layout: layout.clone(),
        }
    }

    fn make_walls(
        &mut self,
        _map: &mut PlainMap,
        layout: &Layout,
        style: &str,
        _params: &MapParams,
        _rng: &mut MapRng,
    ) {
        log::debug!("walls style '{style}': {} wall cells", layout.count(|c| c.is_wall()));
    }

    fn put_doors(
        &mut self,
        _map: &mut PlainMap,
        layout: &Layout,
        style: &str,
        _params: &MapParams,
        _rng: &mut MapRng,
    ) {
        log::debug!(
            "doors style '{style}': {} door cells",
            layout.count(|c| c == crate::layout::LayoutCell::Door)
        );
    }

    fn place_exits(
        &mut self,
        _map: &mut PlainMap,
        _layout: &Layout,
        style: &str,
        orientation: i32,
        params: &MapParams,
        _rng: &mut MapRng,
    ) {
        log::debug!(
            "exits style '{style}', orientation {orientation}, final map '{}'",
            params.final_map
        );
    }

    fn place_specials(
        &mut self,
        _map: &mut PlainMap,
        _layout: &Layout,
        _params: &MapParams,
        _rng: &mut MapRng,
    ) {
        log::debug!("specials pass");
    }

    fn place_monsters(
        &mut self,
        _map: &mut PlainMap,
        style: &str,
        difficulty: i32,
        _params: &MapParams,
        _rng: &mut MapRng,
    ) {
        log::debug!("monsters style '{style}' at difficulty {difficulty}");
    }

    fn calculate_difficulty(&mut self, map: &mut PlainMap) {
        // Nothing on the map contributes here; fall back to size so
        // bigger maps rank a little harder.
        map.difficulty = ((map.width() * map.height()) as f32).sqrt() as i32 / 4 + 1;
    }

    fn place_treasure(
        &mut self,
        _map: &mut PlainMap,
        _layout: &Layout,
        style: &str,
        options: i32,
        _params: &MapParams,
        _rng: &mut MapRng,
    ) {
        log::debug!("treasure style '{style}', options {options}");
    }

    fn put_decor(
        &mut self,
        _map: &mut PlainMap,
        _layout: &Layout,
        style: &str,
        options: i32,
        _params: &MapParams,
        _rng: &mut MapRng,
    ) {
        log::debug!("decor style '{style}', options {options}");
    }
}
