use anyhow::Context;
use clap::*;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("merge")
        .about("Merges alignments that share a reference sequence")
        .after_help(
            r###"
Merges two or more alignments into one, using a sequence present in all of
them as the anchor.

Notes:
* Rows of each input alignment must have equal width.
* The anchor rows must have the same residues in every input.
* Each alignment gets the gap columns the others add to the anchor; residues
  are never moved.
* The anchor is written first, then the other rows in input order. A name
  seen in an earlier input is skipped.

Examples:
1. Merge two alignments on sequence `ref`:
   fasmerge merge -r ref tests/fasta/part1.fa tests/fasta/part2.fa

2. Write the merged alignment to a file:
   fasmerge merge -r ref part1.fa part2.fa part3.fa -o merged.fa

"###,
        )
        .arg(
            Arg::new("ref")
                .short('r')
                .long("ref")
                .num_args(1)
                .required(true)
                .help("Anchor sequence name present in all inputs"),
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(2..)
                .index(1)
                .help("Input FASTA alignment(s) to merge"),
        )
        .arg(super::arg_gap())
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let anchor = args.get_one::<String>("ref").unwrap();
    let opt = super::merge_opt(args)?;

    let infiles: Vec<String> = args
        .get_many::<String>("infiles")
        .unwrap()
        .cloned()
        .collect();

    //----------------------------
    // Ops
    //----------------------------
    let alignments = infiles
        .iter()
        .map(|infile| fasmerge::libs::fasta::read_fasta(infile))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let merged = fasmerge::libs::reconcile::merge_alignments(&alignments, anchor, &opt)
        .with_context(|| format!("can't merge {}", infiles.join(", ")))?;

    //----------------------------
    // Output
    //----------------------------
    let mut writer = fasmerge::writer(args.get_one::<String>("outfile").unwrap())?;
    fasmerge::libs::fasta::write_fasta(&mut writer, &merged)?;

    Ok(())
}
