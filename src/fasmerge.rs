extern crate clap;
use clap::*;

mod cmd_fasmerge;

fn main() -> anyhow::Result<()> {
    let app = Command::new("fasmerge")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`fasmerge` reconciles differently gapped versions of aligned sequences")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log more details to stderr; repeat for debug output"),
        )
        .subcommand(cmd_fasmerge::apply::make_subcommand())
        .subcommand(cmd_fasmerge::marks::make_subcommand())
        .subcommand(cmd_fasmerge::merge::make_subcommand())
        .subcommand(cmd_fasmerge::widen::make_subcommand())
        .after_help(
            r###"
Subcommand groups:

* marks: marks / apply
* reconcile: widen / merge

A mark `offset:length` means `length` gaps placed before residue `offset`
of the gap-free sequence.

"###,
        );

    let matches = app.get_matches();
    cmd_fasmerge::init_logger(matches.get_count("verbose"));

    // Check which subcommand the user ran...
    match matches.subcommand() {
        // marks
        Some(("marks", sub_matches)) => cmd_fasmerge::marks::execute(sub_matches),
        Some(("apply", sub_matches)) => cmd_fasmerge::apply::execute(sub_matches),
        // reconcile
        Some(("widen", sub_matches)) => cmd_fasmerge::widen::execute(sub_matches),
        Some(("merge", sub_matches)) => cmd_fasmerge::merge::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
