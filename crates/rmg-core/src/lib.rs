//! Random dungeon map layout generation.
//!
//! A deterministic, seed-driven engine that turns a declarative
//! parameter block into a topologically valid grid of rooms,
//! corridors, walls, doors and stairs, in one of six styles (onion,
//! maze, spiral, rogue, snake, square spiral), optionally mirrored,
//! rotated and expanded.
//!
//! The engine stops at the grid: turning it into a populated game map
//! is delegated to a [`MapAssembler`] collaborator, driven by
//! [`generate_random_map`]. A text-only assembler ships in-crate for
//! harnesses and tests.
//!
//! ```
//! use rmg_core::{MapParams, PlainAssembler, generate_random_map};
//!
//! let mut params = MapParams::parse("xsize 40\nysize 30\nlayoutstyle rogue\nrandom_seed 12345\n");
//! let mut assembler = PlainAssembler::default();
//! let out = generate_random_map("/random/example", &mut params, &mut assembler, None).unwrap();
//! println!("{}", out.map.render());
//! ```

pub mod errors;
pub mod layout;
pub mod map;
pub mod params;
pub mod rng;

pub use errors::GenError;
pub use layout::{Layout, LayoutCell, Rotation, layout_gen, rotate_layout};
pub use map::{GeneratedMap, MapAssembler, PlainAssembler, PlainMap, generate_random_map};
pub use params::{LayoutOptions, LayoutStyle, MIN_MAP_SIZE, MapParams, SymmetryMode};
pub use rng::MapRng;
