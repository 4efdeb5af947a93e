// Candidate matching: applicant profile, institution catalog, ranking engine.
// The engine is pure; handlers own all I/O.

pub mod catalog;
pub mod engine;
pub mod handlers;
pub mod profile;
pub mod text;
