//! Gap-run algebra for reconciling independently gapped alignments.
//!
//! * [`libs::mark`] - marks, mark lists and the operations over them
//! * [`libs::reconcile`] - widening sequences and merging whole alignments
//! * [`libs::fasta`] - reading and writing record sets

pub mod libs;

pub use crate::libs::io::*;
