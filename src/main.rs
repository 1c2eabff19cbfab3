use std::env;
use std::path::PathBuf;
use std::process;

use rand::Rng;

use lgad_animation::geometry::TrenchMode;
use lgad_animation::params::DetectorPreset;
use lgad_animation::pipeline;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!(
        r#"LGAD cross-section animator

USAGE:
    lgad_animation [OPTIONS]

OPTIONS:
    -h, --help              Print help information
    -V, --version           Print version information
    -p, --preset <NAME>     Sensor variant: planar, lgad, ti-lgad-1, ti-lgad-2
                            (default: lgad)
    -o, --output <PATH>     Output GIF path (default: the preset's name)
    --png <PATH>            Also save the static cross section as a PNG
    -n, --carriers <N>      Electron/hole pairs to animate (default: 15)
    -t, --trenches <N>      Override the preset's trenches per gap (0, 1 or 2)
    -f, --frames <N>        Animation length in frames (default: 100)
    --fps <N>               GIF playback rate (default: 10)
    --scale <N>             Pixels per micrometer (default: 4)
    --seed <N>              Fix the random seed for a reproducible run

EXAMPLES:
    lgad_animation -p ti-lgad-2                  # 2-trench TI-LGAD -> 2TR-LGAD.gif
    lgad_animation -p lgad --seed 7 -o out.gif   # reproducible avalanche run"#
    );
}

fn print_version() {
    println!("lgad_animation {VERSION}");
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> T {
    let raw = value.unwrap_or_else(|| {
        eprintln!("error: {flag} requires a value");
        process::exit(2);
    });
    raw.parse().unwrap_or_else(|_| {
        eprintln!("error: invalid value for {flag}: {raw}");
        process::exit(2);
    })
}

fn main() {
    env_logger::init();

    let mut preset = DetectorPreset::Lgad;
    let mut output: Option<PathBuf> = None;
    let mut png: Option<PathBuf> = None;
    let mut carriers: Option<usize> = None;
    let mut trenches: Option<u32> = None;
    let mut frames: Option<u32> = None;
    let mut fps: Option<u32> = None;
    let mut scale: Option<f64> = None;
    let mut seed: Option<u64> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                print_version();
                return;
            }
            "-p" | "--preset" => {
                let name: String = parse_value(&arg, args.next());
                preset = DetectorPreset::from_name(&name).unwrap_or_else(|| {
                    eprintln!("error: unknown preset: {name}");
                    process::exit(2);
                });
            }
            "-o" | "--output" => output = Some(parse_value(&arg, args.next())),
            "--png" => png = Some(parse_value(&arg, args.next())),
            "-n" | "--carriers" => carriers = Some(parse_value(&arg, args.next())),
            "-t" | "--trenches" => trenches = Some(parse_value(&arg, args.next())),
            "-f" | "--frames" => frames = Some(parse_value(&arg, args.next())),
            "--fps" => fps = Some(parse_value(&arg, args.next())),
            "--scale" => scale = Some(parse_value(&arg, args.next())),
            "--seed" => seed = Some(parse_value(&arg, args.next())),
            other => {
                eprintln!("error: unknown argument: {other} (try --help)");
                process::exit(2);
            }
        }
    }

    let mut params = preset.config();
    if let Some(n) = trenches {
        params.detector.trench_mode = TrenchMode::from_count(n).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(2);
        });
    }
    if let Some(n) = carriers {
        params.kinematics.carrier_pairs = n;
    }
    if let Some(n) = frames {
        params.kinematics.frame_count = n;
    }
    if let Some(n) = fps {
        params.render.fps = n;
    }
    if let Some(s) = scale {
        params.render.scale = s;
    }
    params.kinematics.seed = seed.unwrap_or_else(|| rand::rng().random());

    let gif_path = output.unwrap_or_else(|| PathBuf::from(preset.output_name()));

    match pipeline::run(&params, &gif_path, png.as_deref()) {
        Ok(summary) => {
            println!(
                "{}: {} frames, {:.5} seconds",
                gif_path.display(),
                summary.frames,
                summary.elapsed_seconds
            );
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
