//! The onion room generator.
//!
//! Onion rooms are nested boxes with doors punched through each layer:
//!
//! ```text
//! regular                       random
//! centered, linear onion        bottom/right centered, nonlinear
//!
//! #########################     #########################
//! #                       #     #                       #
//! # ########  ##########  #     #   #####################
//! # #                  #  #     #   #                   #
//! # # ######  ######## #  #     #   #                   #
//! # # #              # #  #     #   #   ######## ########
//! # # # ####  ###### # #  #     #   #   #               #
//! # # # #          # # #  #     #   #   #               #
//! # # # ############ # #  #     #   #   #  ########### ##
//! # # #              # #  #     #   #   #  #            #
//! # # ################ #  #     #   #   #  #    #########
//! # #                  #  #     #       #  #    #       #
//! # ####################  #     #   #   #  #            #
//! #                       #     #   #   #  #    #       #
//! #########################     #########################
//! ```

use super::{Layout, LayoutCell};
use crate::params::LayoutOptions;
use crate::rng::MapRng;

/// Layer wall positions along one axis: `locations[l]` and
/// `locations[2*layers-l-1]` bound layer `l`.
struct Locations {
    x: Vec<f32>,
    y: Vec<f32>,
}

/// Generate an onion layout.
///
/// Returns the layout and the center of the innermost layer, when the
/// map was big enough to onionize. The center is where an exit to the
/// next map naturally belongs.
pub fn gen_onion(
    xsize: usize,
    ysize: usize,
    options: LayoutOptions,
    layers: i32,
    rng: &mut MapRng,
) -> (Layout, Option<(usize, usize)>) {
    let mut layout = Layout::new(xsize, ysize);

    // Pick some random options if none were given.
    let options = if options.is_empty() {
        let mut picked = match rng.rn2(3) {
            0 => LayoutOptions::CENTERED,
            1 => LayoutOptions::BOTTOM_C,
            _ => LayoutOptions::BOTTOM_R,
        };
        if rng.coin() {
            picked |= LayoutOptions::LINEAR;
        }
        if rng.coin() {
            picked |= LayoutOptions::IRR_SPACE;
        }
        picked
    } else {
        options
    };

    // Write the outer walls, if appropriate.
    if !options.contains(LayoutOptions::WALL_OFF) {
        layout.add_border();
    }

    if options.contains(LayoutOptions::WALLS_ONLY) {
        return (layout, None);
    }

    // Pick off the mutually exclusive options.
    let center = if options.contains(LayoutOptions::BOTTOM_R) {
        bottom_right_centered_onion(&mut layout, xsize, ysize, options, layers, rng)
    } else if options.contains(LayoutOptions::BOTTOM_C) {
        bottom_centered_onion(&mut layout, xsize, ysize, options, layers, rng)
    } else if options.contains(LayoutOptions::CENTERED) {
        centered_onion(&mut layout, xsize, ysize, options, layers, rng)
    } else {
        None
    };

    (layout, center)
}

/// Clamp the requested layer count to what fits, rolling a random one
/// when unset. `None` means the map is too small to onionize.
fn resolve_layers(xsize: usize, ysize: usize, layers: i32, rng: &mut MapRng) -> Option<i32> {
    let maxlayers = (xsize.min(ysize) as i32 - 2) / 5;
    if maxlayers == 0 {
        return None;
    }
    let mut layers = layers.min(maxlayers);
    if layers == 0 {
        layers = rng.rn2(maxlayers as u32) as i32 + 1;
    }
    Some(layers)
}

/// An irregular pitch: 2 plus a strongly centered draw on the space
/// still available.
fn irr_pitch(spaces_available: i32, rng: &mut MapRng) -> f32 {
    if spaces_available > 0 {
        2.0 + rng.centered(spaces_available as u32) as f32
    } else {
        2.0
    }
}

fn centered_onion(
    layout: &mut Layout,
    xsize: usize,
    ysize: usize,
    options: LayoutOptions,
    layers: i32,
    rng: &mut MapRng,
) -> Option<(usize, usize)> {
    let layers = resolve_layers(xsize, ysize, layers, rng)?;
    let n = 2 * layers as usize;
    let mut loc = Locations {
        x: vec![0.0; n],
        y: vec![0.0; n],
    };

    if options.contains(LayoutOptions::IRR_SPACE) {
        // Randomly spaced: the "extra" spaces available for spacing
        // between layers.
        let mut x_spaces_available = (xsize as i32 - 2) - 6 * layers + 1;
        let mut y_spaces_available = (ysize as i32 - 2) - 6 * layers + 1;

        for i in 0..n {
            let xpitch = irr_pitch(x_spaces_available, rng);
            let ypitch = irr_pitch(y_spaces_available, rng);
            loc.x[i] = if i > 0 { loc.x[i - 1] } else { 0.0 } + xpitch;
            loc.y[i] = if i > 0 { loc.y[i - 1] } else { 0.0 } + ypitch;
            x_spaces_available -= xpitch as i32 - 2;
            y_spaces_available -= ypitch as i32 - 2;
        }
    } else {
        // Evenly spaced.
        let xpitch = (xsize as f32 - 2.0) / (2.0 * layers as f32 + 1.0);
        let ypitch = (ysize as f32 - 2.0) / (2.0 * layers as f32 + 1.0);
        loc.x[0] = xpitch;
        loc.y[0] = ypitch;
        for i in 1..n {
            loc.x[i] = loc.x[i - 1] + xpitch;
            loc.y[i] = loc.y[i - 1] + ypitch;
        }
    }

    draw_onion(layout, &loc, layers);
    Some(make_doors(layout, &loc, layers, options, rng))
}

fn bottom_centered_onion(
    layout: &mut Layout,
    xsize: usize,
    ysize: usize,
    options: LayoutOptions,
    layers: i32,
    rng: &mut MapRng,
) -> Option<(usize, usize)> {
    let layers = resolve_layers(xsize, ysize, layers, rng)?;
    let n = 2 * layers as usize;
    let mut loc = Locations {
        x: vec![0.0; n],
        y: vec![0.0; n],
    };

    if options.contains(LayoutOptions::IRR_SPACE) {
        let mut x_spaces_available = (xsize as i32 - 2) - 6 * layers + 1;
        let mut y_spaces_available = (ysize as i32 - 2) - 3 * layers + 1;

        for i in 0..n {
            let xpitch = irr_pitch(x_spaces_available, rng);
            let ypitch = irr_pitch(y_spaces_available, rng);
            loc.x[i] = if i > 0 { loc.x[i - 1] } else { 0.0 } + xpitch;
            // The bottom half of each layer sits on the bottom wall.
            loc.y[i] = if i < layers as usize {
                (if i > 0 { loc.y[i - 1] } else { 0.0 }) + ypitch
            } else {
                ysize as f32 - 1.0
            };
            x_spaces_available -= xpitch as i32 - 2;
            y_spaces_available -= ypitch as i32 - 2;
        }
    } else {
        let xpitch = (xsize as f32 - 2.0) / (2.0 * layers as f32 + 1.0);
        let ypitch = (ysize as f32 - 2.0) / (layers as f32 + 1.0);
        loc.x[0] = xpitch;
        loc.y[0] = ypitch;
        for i in 1..n {
            loc.x[i] = loc.x[i - 1] + xpitch;
            loc.y[i] = if i < layers as usize {
                loc.y[i - 1] + ypitch
            } else {
                ysize as f32 - 1.0
            };
        }
    }

    draw_onion(layout, &loc, layers);
    Some(make_doors(layout, &loc, layers, options, rng))
}

fn bottom_right_centered_onion(
    layout: &mut Layout,
    xsize: usize,
    ysize: usize,
    options: LayoutOptions,
    layers: i32,
    rng: &mut MapRng,
) -> Option<(usize, usize)> {
    let layers = resolve_layers(xsize, ysize, layers, rng)?;
    let n = 2 * layers as usize;
    let mut loc = Locations {
        x: vec![0.0; n],
        y: vec![0.0; n],
    };

    if options.contains(LayoutOptions::IRR_SPACE) {
        let mut x_spaces_available = (xsize as i32 - 2) - 3 * layers + 1;
        let mut y_spaces_available = (ysize as i32 - 2) - 3 * layers + 1;

        for i in 0..n {
            let xpitch = irr_pitch(x_spaces_available, rng);
            let ypitch = irr_pitch(y_spaces_available, rng);
            // Right and bottom halves of each layer sit on the outer
            // walls.
            loc.x[i] = if i < layers as usize {
                (if i > 0 { loc.x[i - 1] } else { 0.0 }) + xpitch
            } else {
                xsize as f32 - 1.0
            };
            loc.y[i] = if i < layers as usize {
                (if i > 0 { loc.y[i - 1] } else { 0.0 }) + ypitch
            } else {
                ysize as f32 - 1.0
            };
            x_spaces_available -= xpitch as i32 - 2;
            y_spaces_available -= ypitch as i32 - 2;
        }
    } else {
        let xpitch = (xsize as f32 - 2.0) / (2.0 * layers as f32 + 1.0);
        let ypitch = (ysize as f32 - 2.0) / (layers as f32 + 1.0);
        loc.x[0] = xpitch;
        loc.y[0] = ypitch;
        for i in 1..n {
            loc.x[i] = if i < layers as usize {
                loc.x[i - 1] + xpitch
            } else {
                xsize as f32 - 1.0
            };
            loc.y[i] = if i < layers as usize {
                loc.y[i - 1] + ypitch
            } else {
                ysize as f32 - 1.0
            };
        }
    }

    draw_onion(layout, &loc, layers);
    Some(make_doors(layout, &loc, layers, options, rng))
}

/// Draw the box walls defining the onion layers.
fn draw_onion(layout: &mut Layout, loc: &Locations, layers: i32) {
    let n = 2 * layers as usize;
    for l in 0..layers as usize {
        // Horizontal segments.
        let y1 = loc.y[l] as usize;
        let y2 = loc.y[n - l - 1] as usize;
        for i in loc.x[l] as usize..=loc.x[n - l - 1] as usize {
            layout[(i, y1)] = LayoutCell::Wall;
            layout[(i, y2)] = LayoutCell::Wall;
        }

        // Vertical segments.
        let x1 = loc.x[l] as usize;
        let x2 = loc.x[n - l - 1] as usize;
        for j in loc.y[l] as usize..=loc.y[n - l - 1] as usize {
            layout[(x1, j)] = LayoutCell::Wall;
            layout[(x2, j)] = LayoutCell::Wall;
        }
    }
}

/// Punch a door through each layer and return the center of the
/// innermost one.
fn make_doors(
    layout: &mut Layout,
    loc: &Locations,
    layers: i32,
    options: LayoutOptions,
    rng: &mut MapRng,
) -> (usize, usize) {
    // Number of different walls on which we could place a door: layers
    // sharing walls with the map edge have fewer.
    let mut freedoms = 4; // centered
    if options.contains(LayoutOptions::BOTTOM_C) {
        freedoms = 3;
    }
    if options.contains(LayoutOptions::BOTTOM_R) {
        freedoms = 2;
    }

    let n = 2 * layers as usize;

    // Pick which wall will have a door: left 1, top 2, right 3,
    // bottom 4.
    let mut which_wall = rng.rn2(freedoms) + 1;
    for l in 0..layers as usize {
        let x1;
        let y1;
        if options.contains(LayoutOptions::LINEAR) {
            // Linear door placement: same wall, at the midpoint.
            match which_wall {
                1 => {
                    x1 = loc.x[l] as i32;
                    y1 = ((loc.y[l] + loc.y[n - l - 1]) / 2.0) as i32;
                }
                2 => {
                    x1 = ((loc.x[l] + loc.x[n - l - 1]) / 2.0) as i32;
                    y1 = loc.y[l] as i32;
                }
                3 => {
                    x1 = loc.x[n - l - 1] as i32;
                    y1 = ((loc.y[l] + loc.y[n - l - 1]) / 2.0) as i32;
                }
                _ => {
                    x1 = ((loc.x[l] + loc.x[n - l - 1]) / 2.0) as i32;
                    y1 = loc.y[n - l - 1] as i32;
                }
            }
        } else {
            // Random door placement: new wall each layer, random spot
            // along it.
            which_wall = rng.rn2(freedoms) + 1;
            match which_wall {
                1 => {
                    x1 = loc.x[l] as i32;
                    let y2 = (loc.y[n - l - 1] - loc.y[l]) as i32 - 1;
                    y1 = if y2 > 0 {
                        (loc.y[l] + (rng.rn2(y2 as u32) + 1) as f32) as i32
                    } else {
                        (loc.y[l] + 1.0) as i32
                    };
                }
                2 => {
                    let x2 = (loc.x[n - l - 1] - loc.x[l]) as i32 - 1;
                    x1 = if x2 > 0 {
                        (loc.x[l] + (rng.rn2(x2 as u32) + 1) as f32) as i32
                    } else {
                        (loc.x[l] + 1.0) as i32
                    };
                    y1 = loc.y[l] as i32;
                }
                3 => {
                    x1 = loc.x[n - l - 1] as i32;
                    let y2 = (loc.y[n - l - 1] - loc.y[l]) as i32 - 1;
                    y1 = if y2 > 0 {
                        (loc.y[l] + (rng.rn2(y2 as u32) + 1) as f32) as i32
                    } else {
                        (loc.y[l] + 1.0) as i32
                    };
                }
                _ => {
                    let x2 = (loc.x[n - l - 1] - loc.x[l]) as i32 - 1;
                    x1 = if x2 > 0 {
                        (loc.x[l] + (rng.rn2(x2 as u32) + 1) as f32) as i32
                    } else {
                        (loc.x[l] + 1.0) as i32
                    };
                    y1 = loc.y[n - l - 1] as i32;
                }
            }
        }

        layout[(x1 as usize, y1 as usize)] = if options.contains(LayoutOptions::NO_DOORS) {
            LayoutCell::Wall // no door
        } else {
            LayoutCell::Door
        };
    }

    // The center of the innermost layer.
    let l = layers as usize - 1;
    let cx = ((loc.x[l] + loc.x[n - l - 1]) as i32 / 2) as usize;
    let cy = ((loc.y[l] + loc.y[n - l - 1]) as i32 / 2) as usize;
    (cx, cy)
}
