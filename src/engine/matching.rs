// src/engine/matching.rs

use crate::{
    engine::catalog::{CareerCandidate, UniversityCandidate},
    engine::scoring::RankedAptitude,
    models::{career::CareerMatch, university::UniversityMatch},
};

/// How many top aptitudes drive the recommendation matching.
pub const TOP_APTITUDES: usize = 3;

/// Upper bound on each recommendation list.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Selects the ids of the highest-ranked aptitudes with a positive score.
///
/// Fewer than `k` ids are returned when fewer aptitudes scored; an all-zero
/// ranking yields an empty selection.
pub fn top_aptitudes(ranked: &[RankedAptitude], k: usize) -> Vec<i64> {
    ranked
        .iter()
        .filter(|r| r.raw_score > 0.0)
        .take(k)
        .map(|r| r.aptitude_id)
        .collect()
}

/// Ranks career candidates by the share of selected aptitudes they match.
///
/// Candidates arrive in id order; the stable sort keeps that order between
/// equal percentages.
pub fn rank_careers(candidates: Vec<CareerCandidate>, selected_count: usize) -> Vec<CareerMatch> {
    let mut matches: Vec<CareerMatch> = candidates
        .into_iter()
        .filter(|c| !c.matched.is_empty())
        .map(|c| CareerMatch {
            id: c.id,
            name: c.name,
            description: c.description,
            matching_aptitudes: c.matched.len() as i64,
            match_percentage: match_percentage(c.matched.len(), selected_count),
        })
        .collect();

    matches.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    matches.truncate(MAX_RECOMMENDATIONS);
    matches
}

/// Ranks university candidates; equal match percentages fall back to the
/// university rating.
pub fn rank_universities(
    candidates: Vec<UniversityCandidate>,
    selected_count: usize,
) -> Vec<UniversityMatch> {
    let mut matches: Vec<UniversityMatch> = candidates
        .into_iter()
        .filter(|u| !u.matched.is_empty())
        .map(|u| UniversityMatch {
            id: u.id,
            name: u.name,
            city: u.city,
            website: u.website,
            rating: u.rating,
            matching_aptitudes: u.matched.len() as i64,
            match_percentage: match_percentage(u.matched.len(), selected_count),
        })
        .collect();

    matches.sort_by(|a, b| {
        b.match_percentage
            .total_cmp(&a.match_percentage)
            .then(b.rating.total_cmp(&a.rating))
    });
    matches.truncate(MAX_RECOMMENDATIONS);
    matches
}

/// matched / selected as a percentage, rounded to two decimals.
/// The denominator is the number of selected top aptitudes, not the size of
/// the aptitude catalog.
fn match_percentage(matched: usize, selected: usize) -> f64 {
    if selected == 0 {
        return 0.0;
    }
    (matched as f64 / selected as f64 * 10000.0).round() / 100.0
}
