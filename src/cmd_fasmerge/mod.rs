//! Subcommand modules for the `fasmerge` binary.

pub mod apply;
pub mod marks;
pub mod merge;
pub mod widen;

use clap::*;

/// `--gap`, shared by all subcommands.
pub fn arg_gap() -> Arg {
    Arg::new("gap")
        .long("gap")
        .num_args(1)
        .default_value("-")
        .help("The gap symbol; every other character is a residue")
}

pub fn arg_outfile() -> Arg {
    Arg::new("outfile")
        .long("outfile")
        .short('o')
        .num_args(1)
        .default_value("stdout")
        .help("Output filename. [stdout] for screen")
}

pub fn merge_opt(args: &ArgMatches) -> anyhow::Result<fasmerge::libs::reconcile::MergeOpt> {
    let gap = args.get_one::<String>("gap").unwrap();
    match gap.as_bytes() {
        [b] => Ok(fasmerge::libs::reconcile::MergeOpt { gap: *b }),
        _ => Err(anyhow::anyhow!(
            "Invalid gap symbol '{}', expected a single character",
            gap
        )),
    }
}

/// `RUST_LOG` takes precedence over `-v`.
pub fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
