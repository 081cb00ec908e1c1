// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use failure::{err_msg, Error};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use mandel::{
    render_animation, try_find_interesting_point, write_frame, write_image, AnimationPlan,
    ColorScheme, OutputFormat, RenderConfig, Renderer, Viewport,
};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const LIMIT: &str = "limit";
const ANTIALIAS: &str = "antialias";
const COLORS: &str = "colors";
const THREADS: &str = "threads";
const RANDOM: &str = "random";
const SEED: &str = "seed";
const START_CENTER: &str = "start-center";
const START_ZOOM: &str = "start-zoom";
const FRAMES: &str = "frames";

// Candidates tested by --random before giving up.
const MAX_SEARCH_ATTEMPTS: usize = 5_000_000;

fn viewport_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name(SIZE)
            .long(SIZE)
            .short("s")
            .takes_value(true)
            .default_value("1024x768")
            .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
            .help("Size of output image"),
        Arg::with_name(CENTER)
            .long(CENTER)
            .short("c")
            .takes_value(true)
            .allow_hyphen_values(true)
            .default_value("0,0")
            .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
            .help("Point on the complex plane at the centre of the image"),
        Arg::with_name(ZOOM)
            .long(ZOOM)
            .short("z")
            .takes_value(true)
            .default_value("1")
            .validator(|s| {
                validate_range(
                    &s,
                    1.0,
                    std::f64::MAX,
                    "Could not parse zoom",
                    "Zoom must be at least 1",
                )
            })
            .help("Magnification"),
        Arg::with_name(LIMIT)
            .long(LIMIT)
            .short("l")
            .takes_value(true)
            .default_value("1000")
            .validator(|s| {
                validate_range(
                    &s,
                    1,
                    1_000_000,
                    "Could not parse iteration limit",
                    "Iteration limit must be between 1 and 1000000",
                )
            })
            .help("Iterations before a point counts as inside the set"),
        Arg::with_name(ANTIALIAS)
            .long(ANTIALIAS)
            .short("a")
            .takes_value(true)
            .default_value("1")
            .validator(|s| {
                validate_range(
                    &s,
                    1,
                    16,
                    "Could not parse anti-alias level",
                    "Anti-alias level must be between 1 and 16",
                )
            })
            .help("Samples per pixel along each axis"),
        Arg::with_name(COLORS)
            .long(COLORS)
            .takes_value(true)
            .default_value("grayscale")
            .possible_values(ColorScheme::NAMES)
            .help("Color scheme"),
        Arg::with_name(THREADS)
            .long(THREADS)
            .short("t")
            .takes_value(true)
            .validator(|s| {
                validate_range(
                    &s,
                    1,
                    1024,
                    "Could not parse thread count",
                    "Thread count must be between 1 and 1024",
                )
            })
            .help("Number of threads to use in solver [default: one per CPU]"),
        Arg::with_name(RANDOM)
            .long(RANDOM)
            .short("r")
            .help("Look for an interesting point near the border of the set (overrides --center)"),
        Arg::with_name(SEED)
            .long(SEED)
            .takes_value(true)
            .validator(|s| {
                validate_range(
                    &s,
                    0,
                    std::u64::MAX,
                    "Could not parse seed",
                    "Seed out of range",
                )
            })
            .help("Seed for --random, for repeatable runs"),
    ]
}

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .about("Mandelbrot renderer")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("render")
                .about("Render a single image")
                .arg(
                    Arg::with_name(OUTPUT)
                        .required(true)
                        .long(OUTPUT)
                        .short("o")
                        .takes_value(true)
                        .help("Output file (.png, .jpg or .ppm)"),
                )
                .args(&viewport_args()),
        )
        .subcommand(
            SubCommand::with_name("animate")
                .about("Render a zoom animation as numbered JPEG frames")
                .arg(
                    Arg::with_name(OUTPUT)
                        .required(true)
                        .long(OUTPUT)
                        .short("o")
                        .takes_value(true)
                        .help("Output directory"),
                )
                .args(&viewport_args())
                .arg(
                    Arg::with_name(START_CENTER)
                        .long(START_CENTER)
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .validator(|s| {
                            validate_pair::<f64>(&s, ',', "Could not parse start center")
                        })
                        .help("Centre of the first frame [default: --center]"),
                )
                .arg(
                    Arg::with_name(START_ZOOM)
                        .long(START_ZOOM)
                        .takes_value(true)
                        .default_value("1")
                        .validator(|s| {
                            validate_range(
                                &s,
                                1.0,
                                std::f64::MAX,
                                "Could not parse start zoom",
                                "Start zoom must be at least 1",
                            )
                        })
                        .help("Zoom of the first frame"),
                )
                .arg(
                    Arg::with_name(FRAMES)
                        .long(FRAMES)
                        .short("f")
                        .takes_value(true)
                        .default_value("120")
                        .validator(|s| {
                            validate_range(
                                &s,
                                1,
                                100_000,
                                "Could not parse frame count",
                                "Frame count must be between 1 and 100000",
                            )
                        })
                        .help("Number of steps between first and last frame"),
                ),
        )
        .get_matches()
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| err_msg(format!("Missing --{}", name)))?;
    T::from_str(raw).map_err(|_| err_msg(format!("Could not parse --{} {}", name, raw)))
}

fn pair<T: FromStr>(matches: &ArgMatches, name: &str, separator: char) -> Result<(T, T), Error> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| err_msg(format!("Missing --{}", name)))?;
    parse_pair(raw, separator).ok_or_else(|| err_msg(format!("Could not parse --{} {}", name, raw)))
}

/// The viewport, scheme and renderer settings shared by both subcommands.
struct Settings {
    viewport: Viewport,
    limit: usize,
    anti_alias: usize,
    scheme: ColorScheme,
    threads: usize,
}

fn settings(matches: &ArgMatches) -> Result<Settings, Error> {
    let (width, height) = pair::<usize>(matches, SIZE, 'x')?;
    let (mut x, mut y) = pair::<f64>(matches, CENTER, ',')?;
    let zoom = value::<f64>(matches, ZOOM)?;

    if matches.is_present(RANDOM) {
        let mut rng = match matches.value_of(SEED) {
            Some(_) => StdRng::seed_from_u64(value::<u64>(matches, SEED)?),
            None => StdRng::from_entropy(),
        };
        let (rx, ry) = try_find_interesting_point(x, y, &mut rng, MAX_SEARCH_ATTEMPTS)
            .ok_or_else(|| err_msg("Could not find an interesting point"))?;
        info!("Found interesting point {}, {}", rx, ry);
        x = rx;
        y = ry;
    }

    let threads = match matches.value_of(THREADS) {
        Some(_) => value::<usize>(matches, THREADS)?,
        None => num_cpus::get(),
    };

    Ok(Settings {
        viewport: Viewport::new(x, y, zoom, width, height),
        limit: value(matches, LIMIT)?,
        anti_alias: value(matches, ANTIALIAS)?,
        scheme: value(matches, COLORS)?,
        threads,
    })
}

fn run_render(matches: &ArgMatches) -> Result<(), Error> {
    let output = Path::new(matches.value_of(OUTPUT).unwrap_or_default());
    OutputFormat::from_path(output)?;
    let settings = settings(matches)?;

    let colors = settings.scheme.mapper(settings.limit);
    let config = RenderConfig::new(settings.limit, settings.anti_alias, &*colors);
    let renderer = Renderer::new(config).with_workers(settings.threads);
    let buffer = renderer.render(&settings.viewport)?;
    write_image(output, &buffer)?;
    info!(
        "Wrote {} (center {}, {} zoom {})",
        output.display(),
        settings.viewport.center_x,
        settings.viewport.center_y,
        settings.viewport.zoom
    );
    Ok(())
}

fn run_animate(matches: &ArgMatches) -> Result<(), Error> {
    let dir = Path::new(matches.value_of(OUTPUT).unwrap_or_default());
    let settings = settings(matches)?;
    let end = settings.viewport;
    let (start_x, start_y) = match matches.value_of(START_CENTER) {
        Some(_) => pair::<f64>(matches, START_CENTER, ',')?,
        None => (end.center_x, end.center_y),
    };
    let start = Viewport::new(
        start_x,
        start_y,
        value(matches, START_ZOOM)?,
        end.width,
        end.height,
    );
    let plan = AnimationPlan::new(start, end, value(matches, FRAMES)?)?;

    fs::create_dir_all(dir)?;
    let colors = settings.scheme.mapper(settings.limit);
    let config = RenderConfig::new(settings.limit, settings.anti_alias, &*colors);
    let renderer = Renderer::new(config).with_workers(settings.threads);
    render_animation(&renderer, &plan, |i, buffer| {
        let path = write_frame(dir, i, &buffer)?;
        info!("Wrote frame {}/{} to {}", i, plan.frame_count(), path.display());
        Ok(())
    })?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();

    let result = match matches.subcommand() {
        ("render", Some(m)) => run_render(m),
        ("animate", Some(m)) => run_animate(m),
        _ => Err(err_msg("No subcommand given")),
    };

    if let Err(e) = result {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
