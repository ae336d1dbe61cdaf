//! Map generation parameters.
//!
//! One [`MapParams`] record carries both the declarative request (style
//! names, sizes, options) and the state resolved during generation
//! (concrete symmetry, concrete layout style). The record travels as a
//! `<key> <value>` text block embedded in exit objects and map files, so
//! it can chain one random map to the next.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};
use strum::{Display, EnumIter};

use crate::rng::MapRng;

/// Minimal size a random map should have to actually be generated.
pub const MIN_MAP_SIZE: i32 = 10;

/// The layout generation algorithms.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum LayoutStyle {
    #[strum(serialize = "onion")]
    Onion,
    #[strum(serialize = "maze")]
    Maze,
    #[strum(serialize = "spiral")]
    Spiral,
    #[strum(serialize = "rogue")]
    Rogue,
    #[strum(serialize = "snake")]
    Snake,
    #[strum(serialize = "squarespiral")]
    SquareSpiral,
}

impl LayoutStyle {
    /// All styles, in vocabulary order.
    pub const ALL: [LayoutStyle; 6] = [
        LayoutStyle::Onion,
        LayoutStyle::Maze,
        LayoutStyle::Spiral,
        LayoutStyle::Rogue,
        LayoutStyle::Snake,
        LayoutStyle::SquareSpiral,
    ];

    /// Resolve a style name by substring search against the vocabulary.
    ///
    /// Each vocabulary word is tried in order and the last match wins,
    /// so "squarespiral" (which also contains "spiral") resolves to
    /// [`LayoutStyle::SquareSpiral`]. Returns `None` when nothing
    /// matches; the caller then picks a style at random.
    pub fn from_name(name: &str) -> Option<LayoutStyle> {
        let mut style = None;
        if name.contains("onion") {
            style = Some(LayoutStyle::Onion);
        }
        if name.contains("maze") {
            style = Some(LayoutStyle::Maze);
        }
        if name.contains("spiral") {
            style = Some(LayoutStyle::Spiral);
        }
        if name.contains("rogue") {
            style = Some(LayoutStyle::Rogue);
        }
        if name.contains("snake") {
            style = Some(LayoutStyle::Snake);
        }
        if name.contains("squarespiral") {
            style = Some(LayoutStyle::SquareSpiral);
        }
        style
    }
}

/// How a layout is mirrored.
///
/// The numeric values are the wire format; don't change them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum SymmetryMode {
    /// Pick one of the concrete modes at generation time.
    #[default]
    Random = 0,
    NoSym = 1,
    MirrorX = 2,
    MirrorY = 3,
    MirrorXY = 4,
}

impl SymmetryMode {
    /// Map a wire integer to a mode. Unknown values resolve to
    /// [`SymmetryMode::Random`] rather than erroring.
    pub fn from_wire(value: i32) -> SymmetryMode {
        match value {
            1 => SymmetryMode::NoSym,
            2 => SymmetryMode::MirrorX,
            3 => SymmetryMode::MirrorY,
            4 => SymmetryMode::MirrorXY,
            _ => SymmetryMode::Random,
        }
    }

    /// Map 1..=4 to the concrete modes; used when resolving `Random`.
    pub fn concrete(value: u32) -> SymmetryMode {
        Self::from_wire(value as i32)
    }
}

bitflags! {
    /// Layout generator options (`layoutoptions1` on the wire).
    ///
    /// Mostly consumed by the onion generator; the rogue generator
    /// instead reads the raw value as a room-shape selector.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayoutOptions: u32 {
        /// Centered.
        const CENTERED = 1;
        /// Linear doors (default is nonlinear).
        const LINEAR = 2;
        /// Bottom-centered.
        const BOTTOM_C = 4;
        /// Bottom-right centered.
        const BOTTOM_R = 8;
        /// Irregularly/randomly spaced layers (default: regular).
        const IRR_SPACE = 16;
        /// No outer wall.
        const WALL_OFF = 32;
        /// Only walls.
        const WALLS_ONLY = 64;
        /// Place walls instead of doors. Produces a broken map.
        const NO_DOORS = 256;
    }
}

/// Parameters for one random map generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapParams {
    /// Wall style name; empty picks randomly, "none" skips walls.
    pub wallstyle: String,
    /// Floor style name; empty picks randomly, "none" skips.
    pub floorstyle: String,
    /// Monster style name; empty picks randomly, "none" skips.
    pub monsterstyle: String,
    /// Treasure style name; empty picks randomly, "none" skips.
    pub treasurestyle: String,
    /// Layout style name, resolved through [`LayoutStyle::from_name`].
    pub layoutstyle: String,
    /// Door style name; empty picks randomly, "none" skips.
    pub doorstyle: String,
    /// Decor style name; empty picks randomly, "none" skips.
    pub decorstyle: String,
    /// Exit style name; empty picks randomly, "none" skips.
    pub exitstyle: String,
    /// Path of the map this random map is generated from.
    pub origin_map: String,
    /// If not empty, the path of the final map this maze leads to.
    pub final_map: String,
    /// If not empty, the archetype of the exit leading to the final map.
    pub final_exit_archetype: String,
    /// If "no", no return exit is made on the final map.
    pub exit_on_final_map: String,
    /// If not empty, used to name generated keys.
    pub dungeon_name: String,

    pub xsize: i32,
    pub ysize: i32,
    pub expand2x: i32,
    pub layoutoptions1: i32,
    pub layoutoptions2: i32,
    pub symmetry: SymmetryMode,
    pub difficulty: i32,
    /// Set when the difficulty was given explicitly rather than derived.
    pub difficulty_given: bool,
    pub difficulty_increase: f32,
    pub dungeon_level: i32,
    pub dungeon_depth: i32,
    pub decoroptions: i32,
    pub orientation: i32,
    pub origin_x: i32,
    pub origin_y: i32,
    pub random_seed: u64,
    pub treasureoptions: i32,
    pub multiple_floors: i32,

    /// Layout style resolved for the current generation call.
    #[serde(skip)]
    pub map_layout_style: Option<LayoutStyle>,
    /// Symmetry mode resolved for the current generation call.
    #[serde(skip)]
    pub symmetry_used: SymmetryMode,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            wallstyle: String::new(),
            floorstyle: String::new(),
            monsterstyle: String::new(),
            treasurestyle: String::new(),
            layoutstyle: String::new(),
            doorstyle: String::new(),
            decorstyle: String::new(),
            exitstyle: String::new(),
            origin_map: String::new(),
            final_map: String::new(),
            final_exit_archetype: String::new(),
            exit_on_final_map: String::new(),
            dungeon_name: String::new(),
            xsize: -1,
            ysize: -1,
            expand2x: 0,
            layoutoptions1: 0,
            layoutoptions2: 0,
            symmetry: SymmetryMode::Random,
            difficulty: 0,
            difficulty_given: false,
            difficulty_increase: 1.0,
            dungeon_level: 0,
            dungeon_depth: 0,
            decoroptions: 0,
            orientation: 0,
            origin_x: 0,
            origin_y: 0,
            random_seed: 0,
            treasureoptions: 0,
            multiple_floors: 0,
            map_layout_style: None,
            symmetry_used: SymmetryMode::NoSym,
        }
    }
}

impl MapParams {
    /// Parse a parameter block, one `<key> <value...>` pair per line.
    ///
    /// Unknown keys and unparsable values are ignored so newer servers
    /// can add keys without breaking older readers.
    pub fn parse(text: &str) -> MapParams {
        let mut params = MapParams::default();
        for line in text.lines() {
            params.set_variable(line);
        }
        params
    }

    /// Apply one `<key> <value...>` line. Returns false when the key is
    /// not recognized.
    pub fn set_variable(&mut self, line: &str) -> bool {
        let line = line.trim();
        let (key, value) = match line.split_once(char::is_whitespace) {
            Some((key, value)) => (key, value.trim()),
            None => (line, ""),
        };

        fn int(value: &str, slot: &mut i32) {
            if let Ok(v) = value.parse::<i32>() {
                *slot = v;
            }
        }

        match key {
            "xsize" => int(value, &mut self.xsize),
            "ysize" => int(value, &mut self.ysize),
            "wallstyle" => self.wallstyle = value.to_string(),
            "floorstyle" => self.floorstyle = value.to_string(),
            "monsterstyle" => self.monsterstyle = value.to_string(),
            "treasurestyle" => self.treasurestyle = value.to_string(),
            "layoutstyle" => self.layoutstyle = value.to_string(),
            "decorstyle" => self.decorstyle = value.to_string(),
            "doorstyle" => self.doorstyle = value.to_string(),
            "exitstyle" => self.exitstyle = value.to_string(),
            "final_map" => self.final_map = value.to_string(),
            "final_exit_archetype" => self.final_exit_archetype = value.to_string(),
            "exit_on_final_map" => self.exit_on_final_map = value.to_string(),
            "origin_map" => self.origin_map = value.to_string(),
            "expand2x" => int(value, &mut self.expand2x),
            "layoutoptions1" => int(value, &mut self.layoutoptions1),
            "layoutoptions2" => int(value, &mut self.layoutoptions2),
            "symmetry" => {
                if let Ok(v) = value.parse::<i32>() {
                    self.symmetry = SymmetryMode::from_wire(v);
                }
            }
            "difficulty" => {
                if let Ok(v) = value.parse::<i32>() {
                    self.difficulty = v;
                }
            }
            "difficulty_increase" => {
                if let Ok(v) = value.parse::<f32>() {
                    self.difficulty_increase = v;
                }
            }
            "dungeon_level" => int(value, &mut self.dungeon_level),
            "dungeon_depth" => int(value, &mut self.dungeon_depth),
            "dungeon_name" => self.dungeon_name = value.to_string(),
            "decoroptions" => int(value, &mut self.decoroptions),
            "orientation" => int(value, &mut self.orientation),
            "origin_x" => int(value, &mut self.origin_x),
            "origin_y" => int(value, &mut self.origin_y),
            "random_seed" => {
                if let Ok(v) = value.parse::<u64>() {
                    self.random_seed = v;
                }
            }
            "treasureoptions" => int(value, &mut self.treasureoptions),
            "multiple_floors" => int(value, &mut self.multiple_floors),
            _ => return false,
        }
        true
    }

    /// Serialize the parameters for the exit leading to the next map.
    ///
    /// Field order is fixed; only non-default fields are emitted, except
    /// `xsize`/`ysize` and `dungeon_level` which always are. The seed is
    /// written incremented by one so the regenerated chain does not
    /// repeat a layout.
    pub fn write_to_string(&self) -> String {
        let mut buf = String::new();
        let _ = writeln!(buf, "xsize {}", self.xsize);
        let _ = writeln!(buf, "ysize {}", self.ysize);

        let strings = [
            ("wallstyle", &self.wallstyle),
            ("floorstyle", &self.floorstyle),
            ("monsterstyle", &self.monsterstyle),
            ("treasurestyle", &self.treasurestyle),
            ("layoutstyle", &self.layoutstyle),
            ("decorstyle", &self.decorstyle),
            ("doorstyle", &self.doorstyle),
            ("exitstyle", &self.exitstyle),
            ("final_map", &self.final_map),
            ("final_exit_archetype", &self.final_exit_archetype),
            ("exit_on_final_map", &self.exit_on_final_map),
            ("origin_map", &self.origin_map),
        ];
        for (key, value) in strings {
            if !value.is_empty() {
                let _ = writeln!(buf, "{key} {value}");
            }
        }

        if self.expand2x != 0 {
            let _ = writeln!(buf, "expand2x {}", self.expand2x);
        }
        if self.layoutoptions1 != 0 {
            let _ = writeln!(buf, "layoutoptions1 {}", self.layoutoptions1);
        }
        if self.layoutoptions2 != 0 {
            let _ = writeln!(buf, "layoutoptions2 {}", self.layoutoptions2);
        }
        if self.symmetry != SymmetryMode::Random {
            let _ = writeln!(buf, "symmetry {}", self.symmetry as u8);
        }
        if self.difficulty != 0 && self.difficulty_given {
            let _ = writeln!(buf, "difficulty {}", self.difficulty);
        }
        if self.difficulty_increase != 1.0 {
            let _ = writeln!(buf, "difficulty_increase {:.6}", self.difficulty_increase);
        }
        // Always written, even when zero: it tracks depth in the chain.
        let _ = writeln!(buf, "dungeon_level {}", self.dungeon_level);
        if self.dungeon_depth != 0 {
            let _ = writeln!(buf, "dungeon_depth {}", self.dungeon_depth);
        }
        if !self.dungeon_name.is_empty() {
            let _ = writeln!(buf, "dungeon_name {}", self.dungeon_name);
        }
        if self.decoroptions != 0 {
            let _ = writeln!(buf, "decoroptions {}", self.decoroptions);
        }
        if self.orientation != 0 {
            let _ = writeln!(buf, "orientation {}", self.orientation);
        }
        if self.origin_x != 0 {
            let _ = writeln!(buf, "origin_x {}", self.origin_x);
        }
        if self.origin_y != 0 {
            let _ = writeln!(buf, "origin_y {}", self.origin_y);
        }
        if self.random_seed != 0 {
            // Add one so that the next map is a bit different.
            let _ = writeln!(buf, "random_seed {}", self.random_seed + 1);
        }
        if self.treasureoptions != 0 {
            let _ = writeln!(buf, "treasureoptions {}", self.treasureoptions);
        }
        if self.multiple_floors != 0 {
            let _ = writeln!(buf, "multiple_floors {}", self.multiple_floors);
        }

        buf
    }

    /// Resolve a zero seed from the wall clock. All randomness after
    /// this point is a deterministic function of the resolved seed.
    pub fn resolve_seed(&mut self) {
        if self.random_seed == 0 {
            self.random_seed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(1)
                .max(1);
        }
    }

    /// Default the difficulty from the dungeon level when not given.
    pub fn resolve_difficulty(&mut self) {
        if self.difficulty == 0 {
            self.difficulty = self.dungeon_level;
            if self.difficulty_increase > 0.001 {
                self.difficulty =
                    ((self.dungeon_level as f32) * self.difficulty_increase) as i32;
                if self.difficulty < 1 {
                    self.difficulty = 1;
                }
            }
        } else {
            self.difficulty_given = true;
        }
    }

    /// Randomize unset or too-small dimensions within bounds.
    pub fn resolve_size(&mut self, rng: &mut MapRng) {
        if self.xsize < MIN_MAP_SIZE {
            self.xsize = MIN_MAP_SIZE + rng.rn2(25) as i32 + 5;
        }
        if self.ysize < MIN_MAP_SIZE {
            self.ysize = MIN_MAP_SIZE + rng.rn2(25) as i32 + 5;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_name() {
        assert_eq!(LayoutStyle::from_name("onion"), Some(LayoutStyle::Onion));
        assert_eq!(LayoutStyle::from_name("rogue"), Some(LayoutStyle::Rogue));
        // "squarespiral" contains "spiral" but the later vocabulary
        // entry wins.
        assert_eq!(
            LayoutStyle::from_name("squarespiral"),
            Some(LayoutStyle::SquareSpiral)
        );
        assert_eq!(
            LayoutStyle::from_name("a_spiral_map"),
            Some(LayoutStyle::Spiral)
        );
        assert_eq!(LayoutStyle::from_name("castle"), None);
        // Case-sensitive.
        assert_eq!(LayoutStyle::from_name("Maze"), None);
    }

    #[test]
    fn test_parse_basic() {
        let params = MapParams::parse(
            "xsize 40\nysize 30\nlayoutstyle rogue\nsymmetry 1\nrandom_seed 777\n",
        );
        assert_eq!(params.xsize, 40);
        assert_eq!(params.ysize, 30);
        assert_eq!(params.layoutstyle, "rogue");
        assert_eq!(params.symmetry, SymmetryMode::NoSym);
        assert_eq!(params.random_seed, 777);
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let mut params = MapParams::default();
        assert!(!params.set_variable("frobnicate 12"));
        assert!(params.set_variable("xsize 25"));
        assert_eq!(params.xsize, 25);
    }

    #[test]
    fn test_parse_ignores_bad_values() {
        let mut params = MapParams::default();
        assert!(params.set_variable("xsize banana"));
        assert_eq!(params.xsize, -1);
    }

    #[test]
    fn test_round_trip_increments_seed() {
        let mut params = MapParams::default();
        params.xsize = 40;
        params.ysize = 30;
        params.wallstyle = "stone".to_string();
        params.layoutstyle = "maze".to_string();
        params.dungeon_level = 3;
        params.dungeon_depth = 10;
        params.random_seed = 1000;
        params.symmetry = SymmetryMode::MirrorX;
        params.expand2x = 1;

        let text = params.write_to_string();
        let reparsed = MapParams::parse(&text);

        assert_eq!(reparsed.xsize, 40);
        assert_eq!(reparsed.ysize, 30);
        assert_eq!(reparsed.wallstyle, "stone");
        assert_eq!(reparsed.layoutstyle, "maze");
        assert_eq!(reparsed.dungeon_level, 3);
        assert_eq!(reparsed.dungeon_depth, 10);
        assert_eq!(reparsed.symmetry, SymmetryMode::MirrorX);
        assert_eq!(reparsed.expand2x, 1);
        assert_eq!(reparsed.random_seed, 1001);
    }

    #[test]
    fn test_dungeon_level_always_emitted() {
        let params = MapParams::default();
        let text = params.write_to_string();
        assert!(text.contains("dungeon_level 0"));
    }

    #[test]
    fn test_resolve_difficulty_scaling() {
        let mut params = MapParams {
            dungeon_level: 4,
            difficulty_increase: 2.0,
            ..MapParams::default()
        };
        params.resolve_difficulty();
        assert_eq!(params.difficulty, 8);
        assert!(!params.difficulty_given);

        let mut explicit = MapParams {
            difficulty: 7,
            ..MapParams::default()
        };
        explicit.resolve_difficulty();
        assert_eq!(explicit.difficulty, 7);
        assert!(explicit.difficulty_given);

        // Scaling never drops below 1.
        let mut low = MapParams {
            dungeon_level: 0,
            difficulty_increase: 0.5,
            ..MapParams::default()
        };
        low.resolve_difficulty();
        assert_eq!(low.difficulty, 1);
    }

    #[test]
    fn test_resolve_size_bounds() {
        let mut rng = MapRng::new(99);
        let mut params = MapParams::default();
        params.resolve_size(&mut rng);
        assert!(params.xsize >= MIN_MAP_SIZE + 5);
        assert!(params.xsize < MIN_MAP_SIZE + 30);
        assert!(params.ysize >= MIN_MAP_SIZE + 5);
        assert!(params.ysize < MIN_MAP_SIZE + 30);
    }
}
