//! Command-line interface for texttype
//!
//! Plays typewriter-style markup in the terminal, or dumps what the pipeline
//! makes of it.
//!
//! Usage:
//!   texttype `<path>`                          - Play every slide
//!   texttype `<path>` --slide 3                - Play one slide
//!   texttype `<path>` --format `<format>`      - Print markup, tokens or the final text

mod dump;
mod error;
mod logging;
mod player;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command, ValueHint};
use dump::DumpFormat;
use error::CliError;
use logging::LogTarget;
use std::fs;
use std::path::PathBuf;
use texttype_config::{Loader, TexttypeConfig};
use texttype_core::texttype::{parse_slides, Slide};
use tracing::debug;

const FORMATS: [&str; 6] = [
    "play",
    "markup",
    "token-json",
    "token-yaml",
    "token-simple",
    "final",
];

/// Integer flags that map one-to-one onto `[typing]` config keys.
const TYPING_OVERRIDES: [(&str, &str); 4] = [
    ("typing-speed", "typing.typing_speed"),
    ("deleting-speed", "typing.deleting_speed"),
    ("after-delete-pause", "typing.after_delete_pause"),
    ("seed", "typing.seed"),
];

fn build_command() -> Command {
    Command::new("texttype")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Play typewriter-style markup in the terminal")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the markup file")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Extra configuration file layered over the defaults")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(FORMATS)
                .default_value("play"),
        )
        .arg(
            Arg::new("slide")
                .long("slide")
                .help("Only use the given slide (1-based)")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("typing-speed")
                .long("typing-speed")
                .help("Delay after each typed character, in ms")
                .value_parser(value_parser!(i64).range(0..)),
        )
        .arg(
            Arg::new("deleting-speed")
                .long("deleting-speed")
                .help("Delay after each erased character, in ms")
                .value_parser(value_parser!(i64).range(0..)),
        )
        .arg(
            Arg::new("jitter")
                .long("jitter")
                .help("Random jitter ratio, 0 for none")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("after-delete-pause")
                .long("after-delete-pause")
                .help("Hold before a delete region is erased, in ms")
                .value_parser(value_parser!(i64).range(0..)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for reproducible jitter")
                .value_parser(value_parser!(i64).range(0..)),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write logs to this file")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("More logging (-v debug, -vv trace)")
                .action(ArgAction::Count),
        )
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = build_command().get_matches();

    if let Err(err) = run(&matches).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let config = load_config(matches)?;
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("play");
    let dump = DumpFormat::from_name(format);

    let level = logging::level_filter(&config.log.level, matches.get_count("verbose"))?;
    let target = LogTarget::choose(matches.get_one::<PathBuf>("log-file").cloned(), dump.is_none());
    logging::init(target, level)?;

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: PathBuf::from(path),
        source,
    })?;

    let slides = select_slides(
        parse_slides(&raw, &config.slides.header_marker),
        matches.get_one::<u64>("slide").copied(),
    )?;
    debug!(path = %path, slides = slides.len(), format, "document loaded");

    match dump {
        Some(format) => {
            let output = dump::render(format, &slides, &config.typing).await?;
            print!("{output}");
        }
        None if slides.is_empty() => debug!("nothing to play"),
        None => player::play(&slides, &config.viewer, config.typing.clone()).await?,
    }

    Ok(())
}

/// Defaults, then the user file, then `--config`, then individual flags.
fn load_config(matches: &ArgMatches) -> Result<TexttypeConfig, CliError> {
    let mut loader = Loader::new().with_user_file();
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }

    for (flag, key) in TYPING_OVERRIDES {
        if let Some(&value) = matches.get_one::<i64>(flag) {
            loader = loader.set_override(key, value)?;
        }
    }
    if let Some(&ratio) = matches.get_one::<f64>("jitter") {
        loader = loader.set_override("typing.random_jitter", ratio)?;
    }

    Ok(loader.build()?)
}

fn select_slides(slides: Vec<Slide>, wanted: Option<u64>) -> Result<Vec<Slide>, CliError> {
    let Some(wanted) = wanted else {
        return Ok(slides);
    };
    let available = slides.len();
    usize::try_from(wanted)
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| slides.into_iter().nth(index))
        .map(|slide| vec![slide])
        .ok_or(CliError::SlideOutOfRange {
            requested: wanted,
            available,
        })
}
