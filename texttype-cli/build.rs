use clap::{value_parser, Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;
use std::path::PathBuf;

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    // Mirrors the argument surface declared in src/main.rs.
    let mut cmd = Command::new("texttype")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Play typewriter-style markup in the terminal")
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
                .value_parser([
                    "play",
                    "markup",
                    "token-json",
                    "token-yaml",
                    "token-simple",
                    "final",
                ])
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
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "texttype", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "texttype", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "texttype", &outdir)?;

    Ok(())
}
