//! Linear data reduction for a full Mueller polarimeter.
//!
//! A dual-rotating-retarder polarimeter probes a sample with a rotating
//! quarter-wave generator and analyzes the output with a second retarder
//! geared at five times the generator angle. Each detector reading is a
//! linear function of the 16 unknown Mueller elements, so the whole
//! measurement reduces to an (often overdetermined) linear system solved
//! by SVD least squares.

mod mueller;

pub use mueller::*;
