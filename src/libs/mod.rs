pub mod fasta;
pub mod io;
pub mod mark;
pub mod reconcile;
