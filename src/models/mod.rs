//! Domain models for think-tool.
//!
//! - [`Entry`]: one immutable recorded thought with its insertion time.
//! - [`Acknowledgement`]: the short echo returned after recording a thought.

mod entry;

pub use entry::*;
