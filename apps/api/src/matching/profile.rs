use serde::{Deserialize, Serialize};

/// Structured applicant profile consumed by the ranking engine.
///
/// Built by the intake boundary and never mutated afterwards. Empty lists
/// are meaningful: no interests, no city restriction, nothing excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub interests: Vec<String>,
    /// Academic score (ENT points or GPA). The engine applies no range.
    pub score: i64,
    pub portfolio_summary: String,
    /// Portfolio strength, nominally 1–5.
    pub portfolio_strength: i64,
    /// Treated as a set. Empty means any city is acceptable.
    pub desired_cities: Vec<String>,
    /// Exclusion terms matched as substrings of short code or city.
    pub undesired_institutions: Vec<String>,
}
