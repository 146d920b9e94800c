//! Record sets: sequence id to sequence, in file order.

use anyhow::Context;
use indexmap::IndexMap;
use std::io::Write;

/// Sequence id to (gapped) sequence, kept in insertion order.
pub type SeqMap = IndexMap<String, Vec<u8>>;

/// Reads every record of a FASTA file.
///
/// Multi-line sequences are concatenated. The id is the first word of the
/// header line; a repeated id replaces the earlier sequence.
///
/// ```
/// let records = fasmerge::libs::fasta::read_fasta("tests/fasta/example.fa").unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records["1"], b"----AA----");
/// assert_eq!(records["2"], b"---AAAAA-A");
/// ```
pub fn read_fasta(input: &str) -> anyhow::Result<SeqMap> {
    let reader = crate::reader(input)?;
    let mut fa_in = noodles_fasta::io::Reader::new(reader);

    let mut records = SeqMap::new();
    for result in fa_in.records() {
        let record = result.with_context(|| format!("invalid FASTA record in {}", input))?;
        let name = String::from_utf8(record.name().into())
            .with_context(|| format!("{}: non-UTF-8 sequence id", input))?;
        let seq = record.sequence().as_ref().to_vec();

        if records.insert(name.clone(), seq).is_some() {
            log::warn!("{}: duplicated sequence id '{}', keeping the last one", input, name);
        }
    }
    log::debug!("{}: {} records", input, records.len());

    Ok(records)
}

/// Writes records as `>id` and the unwrapped sequence, one pair per record.
pub fn write_fasta<W: Write + ?Sized>(writer: &mut W, records: &SeqMap) -> anyhow::Result<()> {
    for (name, seq) in records {
        writer.write_all(format!(">{}\n", name).as_ref())?;
        writer.write_all(seq)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(())
}

/// Records in FASTA text, joined by newlines, without a trailing newline.
///
/// ```
/// # use fasmerge::libs::fasta::{to_fasta_string, SeqMap};
/// let mut records = SeqMap::new();
/// records.insert("1".to_string(), b"----AA----".to_vec());
/// records.insert("2".to_string(), b"---AAAAA-A".to_vec());
/// assert_eq!(to_fasta_string(&records), ">1\n----AA----\n>2\n---AAAAA-A");
/// ```
pub fn to_fasta_string(records: &SeqMap) -> String {
    records
        .iter()
        .map(|(name, seq)| format!(">{}\n{}", name, String::from_utf8_lossy(seq)))
        .collect::<Vec<_>>()
        .join("\n")
}
