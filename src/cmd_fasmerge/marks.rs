use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("marks")
        .about("Lists the gap runs of each sequence")
        .after_help(
            r###"
Prints one line per record: the sequence name, a tab, and its gap runs as
comma-separated `offset:length` pairs. Offsets count residues, not columns.
A sequence without gaps gets an empty second field.

Input files can be gzipped. If the input file is 'stdin', data is read from standard input.

Examples:
1. List the gap runs of an alignment:
   fasmerge marks tests/fasta/example.fa

2. Use '.' as the gap symbol:
   fasmerge marks input.fa --gap .

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input FASTA file to process"),
        )
        .arg(super::arg_gap())
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let opt = super::merge_opt(args)?;

    //----------------------------
    // Ops
    //----------------------------
    let records = fasmerge::libs::fasta::read_fasta(infile)?;
    let marks_of: Vec<(String, fasmerge::libs::mark::Marks)> = records
        .into_iter()
        .map(|(name, seq)| (name, fasmerge::libs::mark::encode(&seq, opt.gap)))
        .collect();

    //----------------------------
    // Output
    //----------------------------
    let mut writer = fasmerge::writer(args.get_one::<String>("outfile").unwrap())?;
    for (name, marks) in &marks_of {
        writer.write_fmt(format_args!("{}\t{}\n", name, marks))?;
    }
    writer.flush()?;

    Ok(())
}
