//! Token resolvers.
//!
//! Each resolver looks at the bytes assembled so far plus its own token
//! configuration and returns the bytes to place. Checksums are spliced at
//! an offset derived from their `end_index`; every other kind is appended.
//! Resolvers never touch the buffer or the counter store themselves; the
//! compiler applies their results.

pub mod auto_increment;
pub mod checksum;
pub mod flag;
pub mod timestamp;

pub use auto_increment::CounterStep;
pub use checksum::ChecksumSplice;
