use proptest::prelude::*;

use rmg_core::{
    Layout, LayoutCell, MapParams, MapRng, PlainAssembler, SymmetryMode, generate_random_map,
    layout_gen,
};

fn gen_layout(style: &str, xsize: i32, ysize: i32, symmetry: i32, seed: u64) -> (Layout, MapParams) {
    let mut params = MapParams {
        xsize,
        ysize,
        layoutstyle: style.to_string(),
        symmetry: SymmetryMode::from_wire(symmetry),
        ..MapParams::default()
    };
    let mut rng = MapRng::new(seed);
    let layout = layout_gen(&mut params, &mut rng).unwrap();
    (layout, params)
}

#[test]
fn test_all_styles_produce_finished_layouts() {
    // No transient markers, agreed dimensions, and at least one wall.
    for style in ["onion", "maze", "spiral", "rogue", "snake", "squarespiral"] {
        for seed in [1u64, 42, 999] {
            let (layout, params) = gen_layout(style, 31, 25, 1, seed);
            assert_eq!(layout.width() as i32, params.xsize, "{style} seed {seed}");
            assert_eq!(layout.height() as i32, params.ysize, "{style} seed {seed}");
            assert!(layout.count(|c| c.is_wall()) > 0, "{style} seed {seed}");
            assert_eq!(
                layout.count(|c| c == LayoutCell::Floor),
                0,
                "{style} seed {seed}"
            );
        }
    }
}

#[test]
fn test_unknown_style_falls_back_to_random() {
    let (layout, params) = gen_layout("cathedral", 20, 20, 1, 3);
    assert!(params.map_layout_style.is_some());
    assert!(layout.width() >= 20);
}

#[test]
fn test_mirror_x_layout_is_symmetric() {
    // Maze gets no reconnection pass, so the mirror property holds
    // exactly on the finished layout.
    let (layout, params) = gen_layout("maze", 31, 25, 2, 7);
    assert_eq!(params.symmetry_used, SymmetryMode::MirrorX);
    for x in 0..layout.width() {
        for y in 0..layout.height() {
            assert_eq!(
                layout[(x, y)],
                layout[(layout.width() - x - 1, y)],
                "asymmetry at ({x},{y})"
            );
        }
    }
}

#[test]
fn test_mirror_xy_dimensions() {
    // 31 halves to 16; mirrored back out to 2*16-3 = 29 on both axes.
    let (layout, _) = gen_layout("maze", 31, 31, 4, 11);
    assert_eq!(layout.width(), 29);
    assert_eq!(layout.height(), 29);
}

#[test]
fn test_rogue_ignores_symmetry() {
    let (layout, params) = gen_layout("rogue", 40, 30, 4, 13);
    assert_eq!(params.symmetry_used, SymmetryMode::NoSym);
    assert_eq!(layout.width(), 40);
    assert_eq!(layout.height(), 30);
    assert_eq!(layout.count(|c| c == LayoutCell::StairsUp), 1);
    assert_eq!(layout.count(|c| c == LayoutCell::StairsDown), 1);
}

fn flood_from(layout: &Layout, start: (usize, usize)) -> Vec<bool> {
    let mut seen = vec![false; layout.width() * layout.height()];
    let mut stack = vec![start];
    seen[start.1 * layout.width() + start.0] = true;
    while let Some((x, y)) = stack.pop() {
        for (dx, dy) in [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)] {
            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
            if let Some(cell) = layout.get(nx, ny) {
                let idx = ny as usize * layout.width() + nx as usize;
                if !seen[idx] && !cell.is_wall() {
                    seen[idx] = true;
                    stack.push((nx as usize, ny as usize));
                }
            }
        }
    }
    seen
}

#[test]
fn test_rogue_stairs_have_room_around_them() {
    // Stairs sit on room centers, so the open region around each one
    // covers at least the smallest room interior.
    for seed in [1u64, 5, 12345] {
        let (layout, _) = gen_layout("rogue", 40, 40, 1, seed);
        let start = layout.find(LayoutCell::StairsUp).unwrap();
        let seen = flood_from(&layout, start);
        let reachable = seen.iter().filter(|s| **s).count();
        assert!(reachable >= 5, "seed {seed}: only {reachable} cells");
    }
}

#[test]
fn test_rogue_stairs_connected_for_pinned_seed() {
    // Corridor carving does not guarantee stairs-to-stairs
    // connectivity on every seed, but it holds on this one; pin it so
    // the linking logic cannot silently regress.
    let (layout, _) = gen_layout("rogue", 40, 40, 1, 12345);
    let start = layout.find(LayoutCell::StairsUp).unwrap();
    let goal = layout.find(LayoutCell::StairsDown).unwrap();
    let seen = flood_from(&layout, start);
    assert!(seen[goal.1 * layout.width() + goal.0]);
}

#[test]
fn test_expand2x_dimensions() {
    let mut params = MapParams {
        xsize: 20,
        ysize: 20,
        layoutstyle: "maze".to_string(),
        symmetry: SymmetryMode::NoSym,
        expand2x: 1,
        ..MapParams::default()
    };
    let mut rng = MapRng::new(21);
    let layout = layout_gen(&mut params, &mut rng).unwrap();
    assert_eq!(layout.width(), 39);
    assert_eq!(layout.height(), 39);
    assert_eq!(params.xsize, 39);
}

#[test]
fn test_generate_end_to_end_rogue() {
    let mut params = MapParams::parse(
        "xsize 40\nysize 40\nlayoutstyle rogue\nwallstyle stone\nrandom_seed 12345\n",
    );
    let mut assembler = PlainAssembler::default();
    let out = generate_random_map("/random/endtoend", &mut params, &mut assembler, None).unwrap();

    assert_eq!(out.map.width(), 40);
    assert_eq!(out.map.height(), 40);
    assert_eq!(out.map.path, "/random/endtoend");
    let rendered = out.map.render();
    assert_eq!(rendered.lines().count(), 40);
    assert!(rendered.contains('<'));
    assert!(rendered.contains('>'));
    // The next-map blob chains the seed forward.
    assert!(out.next_map_params.contains("random_seed 12346"));
    assert!(out.next_map_params.contains("wallstyle stone"));
}

#[test]
fn test_generate_randomizes_small_sizes() {
    let mut params = MapParams::parse("layoutstyle snake\nrandom_seed 77\n");
    let mut assembler = PlainAssembler::default();
    let out = generate_random_map("/random/sized", &mut params, &mut assembler, None).unwrap();
    // Unset sizes land in [15, 39] before symmetry adjustments; the
    // finished map is never tiny.
    assert!(out.map.width() >= 10);
    assert!(out.map.height() >= 10);
}

#[test]
fn test_different_seeds_differ() {
    let (a, _) = gen_layout("maze", 31, 25, 1, 1);
    let (b, _) = gen_layout("maze", 31, 25, 1, 2);
    assert_ne!(a, b);
}

proptest! {
    #[test]
    fn prop_layout_gen_is_deterministic(seed in 0u64..1000, style_idx in 0usize..6) {
        let style = ["onion", "maze", "spiral", "rogue", "snake", "squarespiral"][style_idx];
        let (a, pa) = gen_layout(style, 25, 21, 0, seed);
        let (b, pb) = gen_layout(style, 25, 21, 0, seed);
        prop_assert_eq!(a, b);
        prop_assert_eq!(pa.symmetry_used, pb.symmetry_used);
    }

    #[test]
    fn prop_no_transient_cells_escape(seed in 0u64..200) {
        let (layout, _) = gen_layout("", 24, 24, 0, seed);
        prop_assert_eq!(layout.count(|c| c == LayoutCell::Floor), 0);
    }

    #[test]
    fn prop_serialization_survives_round_trip(level in 0i32..50, seed in 1u64..10_000) {
        let params = MapParams {
            xsize: 30,
            ysize: 20,
            layoutstyle: "onion".to_string(),
            dungeon_level: level,
            random_seed: seed,
            ..MapParams::default()
        };
        let reparsed = MapParams::parse(&params.write_to_string());
        prop_assert_eq!(reparsed.dungeon_level, level);
        prop_assert_eq!(reparsed.random_seed, seed + 1);
        prop_assert_eq!(reparsed.layoutstyle.as_str(), "onion");
    }
}
