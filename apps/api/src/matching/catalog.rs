use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One institution the engine can recommend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    pub short_code: String,
    pub city: String,
    pub minimum_admission_score: i64,
    /// Yearly tuition in tenge. Informational only.
    pub price: u64,
    /// Informational only.
    pub has_dormitory: bool,
    pub tags: Vec<String>,
}

/// Fixed, read-only list of institutions. Iteration order is significant:
/// it breaks ties between equal match scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    institutions: Vec<Institution>,
}

impl Catalog {
    pub fn new(institutions: Vec<Institution>) -> Self {
        Self { institutions }
    }

    /// The reference set of five Kazakhstan universities shipped with the service.
    pub fn builtin() -> Self {
        Self::new(vec![
            institution("IITU", "IITU", "Almaty", 105, 1_200_000, true, &["IT", "Code", "AI", "Hackathon"]),
            institution("KBTU", "KBTU", "Almaty", 110, 1_500_000, false, &["Finance", "IT", "Energy", "Business"]),
            institution("Astana IT", "AITU", "Astana", 100, 1_050_000, true, &["AI", "Data", "IT", "Cyber"]),
            institution("Satbayev", "SATBAYEV", "Almaty", 95, 900_000, true, &["Eng", "Geology", "Mining"]),
            institution("KazNU", "KAZNU", "Almaty", 100, 1_000_000, true, &["Law", "Bio", "Humanities"]),
        ])
    }

    /// Parses a catalog from a JSON array of institutions.
    pub fn from_json(raw: &str) -> Result<Self> {
        let institutions: Vec<Institution> =
            serde_json::from_str(raw).context("catalog JSON must be an array of institutions")?;
        Ok(Self::new(institutions))
    }

    /// Loads a catalog file at startup. Any read or parse failure is fatal.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?;
        let catalog = Self::from_json(&raw)
            .with_context(|| format!("invalid catalog file {}", path.display()))?;
        info!(
            "Loaded {} institutions from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn institutions(&self) -> &[Institution] {
        &self.institutions
    }

    pub fn len(&self) -> usize {
        self.institutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.institutions.is_empty()
    }
}

fn institution(
    name: &str,
    short_code: &str,
    city: &str,
    minimum_admission_score: i64,
    price: u64,
    has_dormitory: bool,
    tags: &[&str],
) -> Institution {
    Institution {
        name: name.to_string(),
        short_code: short_code.to_string(),
        city: city.to_string(),
        minimum_admission_score,
        price,
        has_dormitory,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
