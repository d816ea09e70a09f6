//! Planning pipeline: ring sampling → scoring → selection.

pub mod candidate_ring;
pub mod scorer;
pub mod selector;

pub use candidate_ring::{CandidateRing, RingPoint};
pub use scorer::{score_point, score_ring, Candidate, ReferenceScore};
pub use selector::{select, Selection};
