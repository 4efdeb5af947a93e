//! Matching & Ranking Engine: filters the catalog for one applicant, scores
//! the survivors, and returns the best few.
//!
//! Pure and synchronous: no I/O, no shared state, safe to call from any
//! number of request tasks against the same `Catalog`.
//!
//! Algorithm, per institution in catalog order:
//! 1. Drop it if any exclusion term occurs (case-insensitively) inside its
//!    short code or its city.
//! 2. Drop it if desired cities are given and none equals its city.
//! 3. +15 for every (interest, tag) pair where one contains the other.
//! 4. +10 per portfolio strength point.
//! 5. +30 at or above the admission threshold, +15 within 15 points below.
//!
//! Survivors are stably sorted by score, highest first, and cut to three.

use serde::Serialize;
use tracing::debug;

use crate::matching::catalog::{Catalog, Institution};
use crate::matching::profile::Profile;
use crate::matching::text::{contains_fold, eq_fold, overlaps_fold};

pub const INTEREST_MATCH_POINTS: i64 = 15;
pub const PORTFOLIO_POINTS_PER_LEVEL: i64 = 10;
pub const HIGH_CHANCE_POINTS: i64 = 30;
pub const MEDIUM_CHANCE_POINTS: i64 = 15;
/// How far below the admission threshold still counts as a medium chance.
pub const MEDIUM_CHANCE_MARGIN: i64 = 15;
pub const MAX_RECOMMENDATIONS: usize = 3;
pub const NORMALIZED_CEILING: i64 = 100;

/// Coarse admission likelihood derived from the score/threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceLabel {
    HighChance,
    MediumChance,
    LowChance,
}

impl ChanceLabel {
    /// Short text shown to applicants next to a recommendation.
    pub fn describe(self) -> &'static str {
        match self {
            ChanceLabel::HighChance => "High chance (grant likely)",
            ChanceLabel::MediumChance => "Medium chance",
            ChanceLabel::LowChance => "Low chance",
        }
    }
}

/// One ranked institution. Borrows the catalog entry it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation<'a> {
    #[serde(flatten)]
    pub institution: &'a Institution,
    pub match_score: i64,
    pub chance_label: ChanceLabel,
    pub chance_text: &'static str,
    pub normalized_chance: i64,
}

/// Ranks `catalog` for `profile`. Never fails; an empty catalog or a profile
/// that filters everything out yields an empty list.
pub fn rank<'a>(profile: &Profile, catalog: &'a Catalog) -> Vec<Recommendation<'a>> {
    let mut recommendations: Vec<Recommendation<'a>> = catalog
        .institutions()
        .iter()
        .filter(|institution| !is_excluded(profile, institution))
        .filter(|institution| is_in_desired_city(profile, institution))
        .map(|institution| score_institution(profile, institution))
        .collect();

    debug!(
        "Ranking {} of {} institutions",
        recommendations.len(),
        catalog.len()
    );

    // `sort_by` is stable: equal scores keep catalog order.
    recommendations.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// An exclusion term must appear within the institution's short code or
/// city. The reverse (institution field within the term) is not checked.
fn is_excluded(profile: &Profile, institution: &Institution) -> bool {
    profile.undesired_institutions.iter().any(|term| {
        contains_fold(&institution.short_code, term) || contains_fold(&institution.city, term)
    })
}

fn is_in_desired_city(profile: &Profile, institution: &Institution) -> bool {
    profile.desired_cities.is_empty()
        || profile
            .desired_cities
            .iter()
            .any(|city| eq_fold(city, &institution.city))
}

fn score_institution<'a>(profile: &Profile, institution: &'a Institution) -> Recommendation<'a> {
    let interest_points = interest_points(&profile.interests, &institution.tags);
    let portfolio_points = profile
        .portfolio_strength
        .saturating_mul(PORTFOLIO_POINTS_PER_LEVEL);
    let (chance_points, chance_label) =
        admission_chance(profile.score, institution.minimum_admission_score);

    let match_score = interest_points
        .saturating_add(portfolio_points)
        .saturating_add(chance_points);

    Recommendation {
        institution,
        match_score,
        chance_label,
        chance_text: chance_label.describe(),
        normalized_chance: normalize(match_score),
    }
}

/// Sums points over every overlapping (interest, tag) pair.
fn interest_points(interests: &[String], tags: &[String]) -> i64 {
    let pairs = interests
        .iter()
        .flat_map(|interest| tags.iter().map(move |tag| (interest, tag)))
        .filter(|(interest, tag)| overlaps_fold(interest, tag))
        .count();
    i64::try_from(pairs)
        .unwrap_or(i64::MAX)
        .saturating_mul(INTEREST_MATCH_POINTS)
}

fn admission_chance(score: i64, minimum: i64) -> (i64, ChanceLabel) {
    if score >= minimum {
        (HIGH_CHANCE_POINTS, ChanceLabel::HighChance)
    } else if score >= minimum.saturating_sub(MEDIUM_CHANCE_MARGIN) {
        (MEDIUM_CHANCE_POINTS, ChanceLabel::MediumChance)
    } else {
        (0, ChanceLabel::LowChance)
    }
}

fn normalize(match_score: i64) -> i64 {
    match_score.clamp(0, NORMALIZED_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn make_profile(interests: &[&str], score: i64, strength: i64) -> Profile {
        Profile {
            interests: strings(interests),
            score,
            portfolio_summary: String::new(),
            portfolio_strength: strength,
            desired_cities: vec![],
            undesired_institutions: vec![],
        }
    }

    fn make_institution(code: &str, city: &str, minimum: i64, tags: &[&str]) -> Institution {
        Institution {
            name: code.to_string(),
            short_code: code.to_string(),
            city: city.to_string(),
            minimum_admission_score: minimum,
            price: 1_000_000,
            has_dormitory: true,
            tags: strings(tags),
        }
    }

    fn codes<'a>(recs: &[Recommendation<'a>]) -> Vec<&'a str> {
        recs.iter()
            .map(|r| r.institution.short_code.as_str())
            .collect()
    }

    #[test]
    fn test_reference_scenario() {
        let catalog = Catalog::builtin();
        let profile = Profile {
            desired_cities: strings(&["Almaty"]),
            undesired_institutions: strings(&["KAZNU"]),
            ..make_profile(&["AI"], 100, 3)
        };

        let recs = rank(&profile, &catalog);

        assert_eq!(codes(&recs), vec!["IITU", "SATBAYEV", "KBTU"]);
        // IITU: AI tag 15 + portfolio 30 + medium 15
        assert_eq!(recs[0].match_score, 60);
        assert_eq!(recs[0].chance_label, ChanceLabel::MediumChance);
        // Satbayev: no tag match, portfolio 30 + high 30
        assert_eq!(recs[1].match_score, 60);
        assert_eq!(recs[1].chance_label, ChanceLabel::HighChance);
        // KBTU: portfolio 30 + medium 15
        assert_eq!(recs[2].match_score, 45);
        assert_eq!(recs[2].chance_label, ChanceLabel::MediumChance);
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let catalog = Catalog::default();
        assert!(rank(&make_profile(&["AI"], 120, 5), &catalog).is_empty());
    }

    #[test]
    fn test_everything_filtered_yields_empty_result() {
        let catalog = Catalog::builtin();
        let profile = Profile {
            desired_cities: strings(&["Shymkent"]),
            ..make_profile(&["AI"], 120, 5)
        };
        assert!(rank(&profile, &catalog).is_empty());
    }

    #[test]
    fn test_fewer_than_three_survivors_returned_whole() {
        let catalog = Catalog::builtin();
        let profile = Profile {
            desired_cities: strings(&["astana"]),
            ..make_profile(&[], 50, 1)
        };
        let recs = rank(&profile, &catalog);
        assert_eq!(codes(&recs), vec!["AITU"]);
    }

    #[test]
    fn test_output_bounded_by_three() {
        let catalog = Catalog::builtin();
        let recs = rank(&make_profile(&["IT"], 200, 5), &catalog);
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_output_bounded_by_catalog_size() {
        let catalog = Catalog::new(vec![make_institution("ONE", "Almaty", 90, &[])]);
        assert_eq!(rank(&make_profile(&[], 100, 1), &catalog).len(), 1);
    }

    #[test]
    fn test_rank_is_deterministic() {
        let catalog = Catalog::builtin();
        let profiles = [
            make_profile(&["AI", "IT", "Data"], 101, 4),
            make_profile(&[], 0, 0),
            make_profile(&["law", "bio"], 95, 2),
            Profile {
                undesired_institutions: strings(&["kbtu"]),
                ..make_profile(&["it"], 110, 5)
            },
        ];
        for profile in &profiles {
            let first = rank(profile, &catalog);
            for _ in 0..5 {
                assert_eq!(rank(profile, &catalog), first);
            }
        }
    }

    #[test]
    fn test_exclusion_by_short_code_substring() {
        let catalog = Catalog::builtin();
        let profile = Profile {
            undesired_institutions: strings(&["satbay"]),
            ..make_profile(&["Mining"], 200, 5)
        };
        let recs = rank(&profile, &catalog);
        assert!(!codes(&recs).contains(&"SATBAYEV"));
    }

    #[test]
    fn test_exclusion_by_city_substring() {
        let catalog = Catalog::builtin();
        let profile = Profile {
            undesired_institutions: strings(&["ALMA"]),
            ..make_profile(&[], 120, 3)
        };
        let recs = rank(&profile, &catalog);
        assert_eq!(codes(&recs), vec!["AITU"]);
    }

    #[test]
    fn test_exclusion_only_checks_term_within_field() {
        // "KazNU University" contains the short code but not the other way
        // around, so KazNU survives.
        let catalog = Catalog::builtin();
        let profile = Profile {
            desired_cities: strings(&["Almaty"]),
            undesired_institutions: strings(&["KazNU University"]),
            ..make_profile(&["Law", "Bio", "Humanities"], 120, 5)
        };
        let recs = rank(&profile, &catalog);
        assert_eq!(recs[0].institution.short_code, "KAZNU");
    }

    #[test]
    fn test_excluded_never_appears_regardless_of_score() {
        let catalog = Catalog::builtin();
        let profile = Profile {
            undesired_institutions: strings(&["iitu"]),
            ..make_profile(&["IT", "Code", "AI", "Hackathon"], 500, 50)
        };
        let recs = rank(&profile, &catalog);
        assert!(recs.iter().all(|r| r.institution.short_code != "IITU"));
    }

    #[test]
    fn test_city_filter_case_insensitive_exact() {
        let catalog = Catalog::builtin();
        let profile = Profile {
            desired_cities: strings(&["ALMATY"]),
            ..make_profile(&[], 100, 1)
        };
        let recs = rank(&profile, &catalog);
        assert!(!recs.is_empty());
        assert!(recs.iter().all(|r| r.institution.city == "Almaty"));
    }

    #[test]
    fn test_city_filter_is_not_substring() {
        let catalog = Catalog::builtin();
        let profile = Profile {
            desired_cities: strings(&["Alma"]),
            ..make_profile(&[], 100, 1)
        };
        assert!(rank(&profile, &catalog).is_empty());
    }

    #[test]
    fn test_no_restrictions_keep_every_institution() {
        let catalog = Catalog::new(vec![
            make_institution("A", "Almaty", 100, &[]),
            make_institution("B", "Astana", 100, &[]),
        ]);
        let recs = rank(&make_profile(&[], 0, 0), &catalog);
        assert_eq!(codes(&recs), vec!["A", "B"]);
    }

    #[test]
    fn test_interest_points_sum_over_all_pairs() {
        // "IT" overlaps "IT" and "Cyber IT"; "Data" overlaps "Data".
        let catalog = Catalog::new(vec![make_institution(
            "X",
            "Almaty",
            1000,
            &["IT", "Cyber IT", "Data", "Law"],
        )]);
        let recs = rank(&make_profile(&["it", "data"], 0, 0), &catalog);
        assert_eq!(recs[0].match_score, 3 * INTEREST_MATCH_POINTS);
    }

    #[test]
    fn test_interest_matches_in_either_direction() {
        let catalog = Catalog::new(vec![make_institution("X", "Almaty", 1000, &["AI"])]);
        let recs = rank(&make_profile(&["AI and robotics"], 0, 0), &catalog);
        assert_eq!(recs[0].match_score, INTEREST_MATCH_POINTS);
    }

    #[test]
    fn test_portfolio_bonus() {
        let catalog = Catalog::new(vec![make_institution("X", "Almaty", 1000, &[])]);
        let recs = rank(&make_profile(&[], 0, 4), &catalog);
        assert_eq!(recs[0].match_score, 40);
        assert_eq!(recs[0].chance_label, ChanceLabel::LowChance);
    }

    #[test]
    fn test_chance_tiers_boundaries() {
        assert_eq!(admission_chance(100, 100), (30, ChanceLabel::HighChance));
        assert_eq!(admission_chance(99, 100), (15, ChanceLabel::MediumChance));
        assert_eq!(admission_chance(85, 100), (15, ChanceLabel::MediumChance));
        assert_eq!(admission_chance(84, 100), (0, ChanceLabel::LowChance));
    }

    #[test]
    fn test_score_monotonicity_from_medium() {
        let catalog = Catalog::new(vec![make_institution("X", "Almaty", 100, &["IT"])]);
        let below = rank(&make_profile(&["IT"], 90, 2), &catalog)[0].match_score;
        let above = rank(&make_profile(&["IT"], 100, 2), &catalog)[0].match_score;
        assert_eq!(above - below, 15);
    }

    #[test]
    fn test_score_monotonicity_from_low() {
        let catalog = Catalog::new(vec![make_institution("X", "Almaty", 100, &["IT"])]);
        let below = rank(&make_profile(&["IT"], 10, 2), &catalog)[0].match_score;
        let above = rank(&make_profile(&["IT"], 150, 2), &catalog)[0].match_score;
        assert_eq!(above - below, 30);
    }

    #[test]
    fn test_normalized_chance_clamped() {
        let catalog = Catalog::new(vec![make_institution(
            "X",
            "Almaty",
            50,
            &["IT", "AI", "Data", "Code"],
        )]);
        let recs = rank(&make_profile(&["IT", "AI", "Data", "Code"], 100, 5), &catalog);
        // 4 * 15 + 50 + 30
        assert_eq!(recs[0].match_score, 140);
        assert_eq!(recs[0].normalized_chance, 100);
    }

    #[test]
    fn test_normalized_chance_matches_score_below_ceiling() {
        let catalog = Catalog::builtin();
        for rec in rank(&make_profile(&["AI"], 100, 1), &catalog) {
            assert_eq!(rec.normalized_chance, rec.match_score.min(100));
            assert!((0..=100).contains(&rec.normalized_chance));
        }
    }

    #[test]
    fn test_negative_inputs_do_not_panic() {
        let catalog = Catalog::builtin();
        let recs = rank(&make_profile(&["AI"], i64::MIN, -3), &catalog);
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| r.chance_label == ChanceLabel::LowChance));
        assert!(recs.iter().all(|r| r.normalized_chance == 0));
    }

    #[test]
    fn test_extreme_inputs_saturate() {
        let catalog = Catalog::new(vec![make_institution("X", "Almaty", i64::MIN, &["IT"])]);
        let recs = rank(&make_profile(&["IT"], i64::MAX, i64::MAX), &catalog);
        assert_eq!(recs[0].match_score, i64::MAX);
        assert_eq!(recs[0].normalized_chance, 100);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            make_institution("FIRST", "Almaty", 100, &["IT"]),
            make_institution("LOW", "Almaty", 200, &[]),
            make_institution("SECOND", "Almaty", 100, &["IT"]),
            make_institution("THIRD", "Almaty", 100, &["IT"]),
            make_institution("FOURTH", "Almaty", 100, &["IT"]),
        ]);
        let recs = rank(&make_profile(&["IT"], 100, 1), &catalog);
        assert_eq!(codes(&recs), vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn test_recommendation_serializes_flat() {
        let catalog = Catalog::builtin();
        let recs = rank(&make_profile(&["AI"], 100, 3), &catalog);
        let json = serde_json::to_value(&recs[0]).unwrap();
        assert_eq!(json["short_code"], "AITU");
        assert_eq!(json["city"], "Astana");
        assert_eq!(json["match_score"], 75);
        assert_eq!(json["chance_label"], "high_chance");
        assert_eq!(json["normalized_chance"], 75);
        assert!(json.get("institution").is_none());
    }
}
