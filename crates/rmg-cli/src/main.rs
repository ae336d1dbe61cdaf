//! Command-line interface to the map generator, used to test layouts.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rmg_core::{MapParams, MapRng, PlainAssembler, generate_random_map, layout_gen};

#[derive(Parser, Debug)]
#[command(name = "rmg", version, about = "Random map layout generator test harness")]
struct Args {
    /// Randomly generate the specified map file, reading parameters
    /// from stdin
    #[arg(short = 'g', value_name = "FILE")]
    generate: Option<PathBuf>,

    /// Test a map layout (overridden by -g)
    #[arg(short = 't')]
    test: bool,

    /// Map width
    #[arg(short = 'x', default_value_t = 80, value_name = "WIDTH")]
    width: i32,

    /// Map height
    #[arg(short = 'y', default_value_t = 23, value_name = "HEIGHT")]
    height: i32,
}

fn generate_map(path: &Path) -> ExitCode {
    eprintln!("Reading parameters from stdin...");
    let mut text = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut text) {
        log::error!("could not read parameters: {err}");
        return ExitCode::FAILURE;
    }

    let mut params = MapParams::parse(&text);
    let mut assembler = PlainAssembler::default();
    let out = match generate_random_map(&path.to_string_lossy(), &mut params, &mut assembler, None)
    {
        Ok(out) => out,
        Err(err) => {
            log::error!("map generation failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = fs::write(path, out.map.render()) {
        log::error!("could not save map to {}: {err}", path.display());
        return ExitCode::FAILURE;
    }
    log::info!(
        "saved {}x{} map to {} (seed {})",
        params.xsize,
        params.ysize,
        path.display(),
        params.random_seed
    );
    ExitCode::SUCCESS
}

fn test_layout(width: i32, height: i32) -> ExitCode {
    let mut params = MapParams {
        xsize: width,
        ysize: height,
        layoutstyle: "rogue".to_string(),
        ..MapParams::default()
    };
    let mut rng = MapRng::from_entropy();
    match layout_gen(&mut params, &mut rng) {
        Ok(layout) => {
            print!("{layout}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("layout generation failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = args.generate.as_deref() {
        generate_map(path)
    } else if args.test {
        test_layout(args.width, args.height)
    } else {
        eprintln!("Type 'rmg -h' for usage instructions.");
        ExitCode::FAILURE
    }
}
