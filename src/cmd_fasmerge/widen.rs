use anyhow::Context;
use clap::*;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("widen")
        .about("Widens sequences with the extra gaps of a second version")
        .after_help(
            r###"
For every record of <infile> that also appears in <target>, inserts the gaps
the target version has in addition, so that the record takes the target's
shape while keeping its own gaps. Both versions must have the same residues.

A gap present in <infile> but missing from the target is an error; nothing is
ever removed. Records absent from <target> are written unchanged.

Examples:
1. Widen sequences with the gaps of another alignment:
   fasmerge widen tests/fasta/seq1.fa tests/fasta/merged.fa

2. Output results to a file:
   fasmerge widen part.fa full.fa -o widened.fa

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input FASTA file to widen"),
        )
        .arg(
            Arg::new("target")
                .required(true)
                .index(2)
                .help("FASTA file with the target versions"),
        )
        .arg(super::arg_gap())
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let opt = super::merge_opt(args)?;
    let infile = args.get_one::<String>("infile").unwrap();
    let target = args.get_one::<String>("target").unwrap();

    //----------------------------
    // Ops
    //----------------------------
    let records = fasmerge::libs::fasta::read_fasta(infile)?;
    let targets = fasmerge::libs::fasta::read_fasta(target)?;

    let widened = fasmerge::libs::reconcile::widen_all(&records, &targets, &opt)
        .with_context(|| format!("can't widen {} with {}", infile, target))?;

    //----------------------------
    // Output
    //----------------------------
    let mut writer = fasmerge::writer(args.get_one::<String>("outfile").unwrap())?;
    fasmerge::libs::fasta::write_fasta(&mut writer, &widened)?;

    Ok(())
}
