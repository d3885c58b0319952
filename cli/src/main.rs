mod commands;
mod resolve;

use clap::{App, Arg, ArgMatches};
use commands::ResolveCmd;
use resolve::ResolveError;

use std::fs::File;
use std::io::{self, stdout};
use std::process;
use std::str::FromStr;
use stroke_widths::profile::{ResolveOptions, StrokeWidthsAttributes};
use stroke_widths::svg::{StyleContext, SvgPathOptions};

fn main() {
    env_logger::init();

    let matches = App::new("stroke-widths command-line interface")
        .version("0.1")
        .about("Resolves stroke-widths attributes into a variable width profile")
        .arg(Arg::with_name("VALUES")
            .long("values")
            .help("The stroke-widths-values attribute, e.g. \"10px, 1px / 2px\"")
            .value_name("VALUES")
            .takes_value(true)
            .allow_hyphen_values(true)
        )
        .arg(Arg::with_name("POSITIONS")
            .long("positions")
            .help("The stroke-widths-positions attribute, e.g. \"0%, 2.5seg\"")
            .value_name("POSITIONS")
            .takes_value(true)
            .allow_hyphen_values(true)
        )
        .arg(Arg::with_name("REPEAT")
            .long("repeat")
            .help("The stroke-widths-repeat attribute (repeat or no-repeat)")
            .value_name("REPEAT")
            .takes_value(true)
        )
        .arg(Arg::with_name("WIDTHS")
            .short("w")
            .long("widths")
            .help("The stroke-widths shorthand, e.g. \"1px 10%, 3px 50% repeat\"")
            .value_name("WIDTHS")
            .takes_value(true)
            .allow_hyphen_values(true)
        )
        .arg(Arg::with_name("PATH")
            .short("d")
            .long("path")
            .help("SVG path data the positions are resolved against")
            .value_name("PATH")
            .takes_value(true)
        )
        .arg(Arg::with_name("STROKE_WIDTH")
            .long("stroke-width")
            .help("The base stroke width, as an SVG length (1 by default)")
            .value_name("LENGTH")
            .takes_value(true)
        )
        .arg(Arg::with_name("FONT_SIZE")
            .long("font-size")
            .help("Size of 1em in pixels (16 by default)")
            .value_name("PX")
            .takes_value(true)
        )
        .arg(Arg::with_name("X_HEIGHT")
            .long("x-height")
            .help("Size of 1ex in pixels (half the font size by default)")
            .value_name("PX")
            .takes_value(true)
        )
        .arg(Arg::with_name("TOLERANCE")
            .short("t")
            .long("tolerance")
            .help("Sets the tolerance threshold for measuring curves (0.01 by default)")
            .value_name("TOLERANCE")
            .takes_value(true)
        )
        .arg(Arg::with_name("MAX_POINTS")
            .long("max-points")
            .help("Maximum number of control points produced by repeat tiling (10000 by default)")
            .value_name("COUNT")
            .takes_value(true)
        )
        .arg(Arg::with_name("JSON")
            .long("json")
            .help("Prints the result as JSON")
        )
        .arg(Arg::with_name("OUTPUT")
            .help("Sets the output file to use")
            .value_name("FILE")
            .short("o")
            .long("output")
            .takes_value(true)
            .required(false)
        )
        .get_matches();

    let result = get_resolve_cmd(&matches).and_then(resolve::resolve);

    if let Err(err) = result {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn get_resolve_cmd(matches: &ArgMatches) -> Result<ResolveCmd, ResolveError> {
    let mut attributes = StrokeWidthsAttributes::new();
    for &(arg, name) in &[
        ("VALUES", "stroke-widths-values"),
        ("POSITIONS", "stroke-widths-positions"),
        ("REPEAT", "stroke-widths-repeat"),
        ("WIDTHS", "stroke-widths"),
    ] {
        if let Some(value) = matches.value_of(arg) {
            attributes.set(name, value);
        }
    }

    let mut style = StyleContext::DEFAULT.with_font_size(get_arg(
        matches,
        "FONT_SIZE",
        "font-size",
        StyleContext::DEFAULT_FONT_SIZE,
    )?)?;
    if matches.is_present("X_HEIGHT") {
        style = style.with_x_height(get_arg(matches, "X_HEIGHT", "x-height", style.x_height)?)?;
    }
    if let Some(stroke_width) = matches.value_of("STROKE_WIDTH") {
        style = style.with_stroke_width_str(stroke_width)?;
    }

    let tolerance = get_arg(
        matches,
        "TOLERANCE",
        "tolerance",
        SvgPathOptions::DEFAULT_TOLERANCE,
    )?;
    let max_points = get_arg(
        matches,
        "MAX_POINTS",
        "max-points",
        ResolveOptions::DEFAULT_MAX_CONTROL_POINTS,
    )?;

    let output: Box<dyn io::Write> = match matches.value_of("OUTPUT") {
        Some(output_file) => Box::new(File::create(output_file)?),
        None => Box::new(stdout()),
    };

    Ok(ResolveCmd {
        attributes,
        path: matches.value_of("PATH").map(str::to_string),
        path_options: SvgPathOptions::tolerance(tolerance),
        style,
        options: ResolveOptions::DEFAULT.with_max_control_points(max_points),
        json: matches.is_present("JSON"),
        output,
    })
}

fn get_arg<T: FromStr>(
    matches: &ArgMatches,
    arg: &str,
    name: &'static str,
    default: T,
) -> Result<T, ResolveError> {
    match matches.value_of(arg) {
        Some(value) => value.parse().map_err(|_| ResolveError::InvalidArgument {
            name,
            value: value.to_string(),
        }),
        None => Ok(default),
    }
}
