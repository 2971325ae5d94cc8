pub mod candidate_repository;

pub use candidate_repository::{CandidateStore, MongoCandidateRepository, CANDIDATES_COLLECTION};
