//! Map generation orchestration.
//!
//! The engine produces a [`Layout`] and drives a [`MapAssembler`]
//! through the population phases; what a "map" actually is belongs to
//! the assembler. A plain text assembler for harnesses and tests lives
//! in [`plain`].

mod plain;

pub use plain::{PlainAssembler, PlainMap};

use crate::errors::GenError;
use crate::layout::{Layout, Rotation, layout_gen, rotate_layout};
use crate::params::MapParams;
use crate::rng::MapRng;

/// The collaborator that turns a finished layout into a game map.
///
/// Phase order and the "none" style gates are fixed by the
/// orchestrator; assemblers only decide what each phase means for
/// their map representation.
pub trait MapAssembler {
    /// The assembled map type.
    type Map;

    /// Allocate the map and set the floor.
    fn make_floor(
        &mut self,
        path: &str,
        layout: &Layout,
        style: &str,
        params: &MapParams,
        rng: &mut MapRng,
    ) -> Self::Map;

    /// Create walls.
    fn make_walls(
        &mut self,
        map: &mut Self::Map,
        layout: &Layout,
        style: &str,
        params: &MapParams,
        rng: &mut MapRng,
    );

    /// Place doors.
    fn put_doors(
        &mut self,
        map: &mut Self::Map,
        layout: &Layout,
        style: &str,
        params: &MapParams,
        rng: &mut MapRng,
    );

    /// Create exits to the previous and next maps.
    fn place_exits(
        &mut self,
        map: &mut Self::Map,
        layout: &Layout,
        style: &str,
        orientation: i32,
        params: &MapParams,
        rng: &mut MapRng,
    );

    /// Place any map-special features.
    fn place_specials(
        &mut self,
        map: &mut Self::Map,
        layout: &Layout,
        params: &MapParams,
        rng: &mut MapRng,
    );

    /// Create monsters.
    fn place_monsters(
        &mut self,
        map: &mut Self::Map,
        style: &str,
        difficulty: i32,
        params: &MapParams,
        rng: &mut MapRng,
    );

    /// Compute and store the map's effective difficulty; treasure
    /// placement depends on it.
    fn calculate_difficulty(&mut self, map: &mut Self::Map);

    /// Create treasure.
    fn place_treasure(
        &mut self,
        map: &mut Self::Map,
        layout: &Layout,
        style: &str,
        options: i32,
        params: &MapParams,
        rng: &mut MapRng,
    );

    /// Create decor.
    fn put_decor(
        &mut self,
        map: &mut Self::Map,
        layout: &Layout,
        style: &str,
        options: i32,
        params: &MapParams,
        rng: &mut MapRng,
    );
}

/// The result of one generation call.
#[derive(Debug)]
pub struct GeneratedMap<M> {
    /// The assembled map.
    pub map: M,
    /// Parameter block for the exit leading to the next map in the
    /// chain, serialized before generation mutated the parameters.
    pub next_map_params: String,
}

/// Main random map routine. Generates a random map based on the given
/// parameters and drives `assembler` through the population phases.
///
/// `use_layout` supplies a ready-made layout; when given, size
/// resolution, layout generation and the random rotation are skipped.
pub fn generate_random_map<A: MapAssembler>(
    path: &str,
    params: &mut MapParams,
    assembler: &mut A,
    use_layout: Option<Layout>,
) -> Result<GeneratedMap<A::Map>, GenError> {
    // Pick a random seed, or use the one from the input parameters.
    params.resolve_seed();
    let mut rng = MapRng::new(params.random_seed);

    // Serialize the parameters for the next map in the chain now,
    // before generation mutates them.
    let next_map_params = params.write_to_string();

    params.resolve_difficulty();

    let layout = match use_layout {
        Some(layout) => {
            params.xsize = layout.width() as i32;
            params.ysize = layout.height() as i32;
            layout
        }
        None => {
            params.resolve_size(&mut rng);
            if params.expand2x > 0 {
                // Halve now; expansion will double back to about the
                // requested size.
                params.xsize /= 2;
                params.ysize /= 2;
            }

            let layout = layout_gen(params, &mut rng)?;
            log::debug!(
                "generated {} layout, seed {}:\n{layout}",
                params
                    .map_layout_style
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                params.random_seed,
            );

            // Rotate the layout randomly.
            let layout = rotate_layout(layout, Rotation::random(&mut rng));
            params.xsize = layout.width() as i32;
            params.ysize = layout.height() as i32;
            layout
        }
    };

    // Increment for the current map.
    params.dungeon_level += 1;

    // Allocate the map and set the floor.
    let mut map = assembler.make_floor(path, &layout, &params.floorstyle, params, &mut rng);

    // Create walls unless the wallstyle is "none".
    if params.wallstyle != "none" {
        assembler.make_walls(&mut map, &layout, &params.wallstyle, params, &mut rng);

        // Place doors unless doorstyle or wallstyle is "none".
        if params.doorstyle != "none" {
            assembler.put_doors(&mut map, &layout, &params.doorstyle, params, &mut rng);
        }
    }

    // Create exits unless the exitstyle is "none".
    if params.exitstyle != "none" {
        assembler.place_exits(
            &mut map,
            &layout,
            &params.exitstyle,
            params.orientation,
            params,
            &mut rng,
        );
    }

    assembler.place_specials(&mut map, &layout, params, &mut rng);

    // Create monsters unless the monsterstyle is "none".
    if params.monsterstyle != "none" {
        assembler.place_monsters(&mut map, &params.monsterstyle, params.difficulty, params, &mut rng);
    }

    // Treasure needs a proper difficulty set for the map.
    assembler.calculate_difficulty(&mut map);

    // Create treasure unless the treasurestyle is "none".
    if params.treasurestyle != "none" {
        assembler.place_treasure(
            &mut map,
            &layout,
            &params.treasurestyle,
            params.treasureoptions,
            params,
            &mut rng,
        );
    }

    // Create decor unless the decorstyle is "none".
    if params.decorstyle != "none" {
        assembler.put_decor(
            &mut map,
            &layout,
            &params.decorstyle,
            params.decoroptions,
            params,
            &mut rng,
        );
    }

    Ok(GeneratedMap {
        map,
        next_map_params,
    })
}
