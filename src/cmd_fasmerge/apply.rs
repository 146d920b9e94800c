use anyhow::Context;
use clap::*;
use std::collections::HashMap;
use std::io::BufRead;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("apply")
        .about("Inserts gap runs into sequences")
        .after_help(
            r###"
Reads gap runs in the format written by `fasmerge marks` (name, tab,
`offset:length` pairs) and inserts them into the sequences of the same name.

Offsets are positions of the sequence as it is in the input, gaps included,
so for gap-free input this rebuilds the aligned sequence. Records without an
entry in <marks.tsv> are written unchanged.

Examples:
1. Restore an alignment from its residues and gap runs:
   fasmerge marks aln.fa > aln.tsv
   fasmerge apply residues.fa aln.tsv

2. Output results to a file:
   fasmerge apply residues.fa aln.tsv -o aln.fa

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input FASTA file to process"),
        )
        .arg(
            Arg::new("marks.tsv")
                .required(true)
                .index(2)
                .help("Gap runs, one `name<TAB>marks` line per sequence"),
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

    let marks_file = args.get_one::<String>("marks.tsv").unwrap();
    let marks_of = load_marks(marks_file)?;

    //----------------------------
    // Ops
    //----------------------------
    let records = fasmerge::libs::fasta::read_fasta(args.get_one::<String>("infile").unwrap())?;
    let mut out = fasmerge::libs::fasta::SeqMap::with_capacity(records.len());
    for (name, seq) in records {
        let seq = match marks_of.get(&name) {
            Some(marks) => fasmerge::libs::mark::splice(&seq, marks, opt.gap)
                .with_context(|| format!("can't apply marks to '{}'", name))?,
            None => seq,
        };
        out.insert(name, seq);
    }

    //----------------------------
    // Output
    //----------------------------
    let mut writer = fasmerge::writer(args.get_one::<String>("outfile").unwrap())?;
    fasmerge::libs::fasta::write_fasta(&mut writer, &out)?;

    Ok(())
}

fn load_marks(infile: &str) -> anyhow::Result<HashMap<String, fasmerge::libs::mark::Marks>> {
    let reader = fasmerge::reader(infile)?;
    let mut marks_of = HashMap::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let (name, marks) = line.split_once('\t').unwrap_or((line.as_str(), ""));
        let marks = marks
            .parse::<fasmerge::libs::mark::Marks>()
            .with_context(|| format!("{} line {}", infile, i + 1))?;
        if marks_of.insert(name.to_string(), marks).is_some() {
            log::warn!("{}: duplicated marks for '{}', keeping the last one", infile, name);
        }
    }

    Ok(marks_of)
}
