// src/engine/scoring.rs

use std::collections::{HashMap, HashSet};

use crate::{
    engine::catalog::ScoringCatalog,
    error::AppError,
    models::{question::QuestionOption, test_record::AnswerInput},
};

/// How the achievable maximum per aptitude is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringMode {
    /// Every option row of an aptitude adds its question's best weight, so an
    /// aptitude with several options inside one question counts that question
    /// repeatedly. Kept as the default for continuity with historical scores.
    #[default]
    Legacy,

    /// Each (aptitude, question) pair adds the question's best weight once.
    Corrected,
}

/// One aptitude's computed score within a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedAptitude {
    pub aptitude_id: i64,

    /// Sum of the weights of the chosen options mapped to this aptitude.
    pub raw_score: f64,

    /// Achievable ceiling used to normalize the raw score.
    pub max_possible: f64,

    /// raw_score / max_possible as a whole percentage, 0 when nothing is
    /// achievable.
    pub percentage: i32,
}

/// Checks a submitted answer set against the active catalog.
///
/// Runs before anything is written: rejects empty submissions, duplicate
/// answers for one question, questions outside the active questionnaire, and
/// options that do not belong to the question they are claimed for.
pub fn validate_answers(
    catalog: &ScoringCatalog,
    answers: &[AnswerInput],
) -> Result<(), AppError> {
    if answers.is_empty() {
        return Err(AppError::EmptySubmission);
    }

    let questions: HashSet<i64> = catalog.questions.iter().map(|q| q.id).collect();
    let option_owner: HashMap<i64, i64> = catalog
        .options
        .iter()
        .map(|o| (o.id, o.question_id))
        .collect();

    let mut seen = HashSet::new();
    for answer in answers {
        if !seen.insert(answer.question_id) {
            return Err(AppError::Validation(format!(
                "Multiple answers for question {}",
                answer.question_id
            )));
        }
        if !questions.contains(&answer.question_id) {
            return Err(AppError::InvalidAnswer(format!(
                "Question {} is not part of the active questionnaire",
                answer.question_id
            )));
        }
        match option_owner.get(&answer.option_id) {
            Some(owner) if *owner == answer.question_id => {}
            Some(_) => {
                return Err(AppError::InvalidAnswer(format!(
                    "Option {} does not belong to question {}",
                    answer.option_id, answer.question_id
                )));
            }
            None => {
                return Err(AppError::InvalidAnswer(format!(
                    "Option {} does not exist",
                    answer.option_id
                )));
            }
        }
    }

    Ok(())
}

/// Scores an answer set against the catalog snapshot.
///
/// Returns one entry per catalog aptitude, ranked by raw score descending
/// with ties kept in aptitude id order. Answers that no longer resolve
/// against the catalog are skipped, so stored submissions can be re-scored
/// after the questionnaire has changed.
pub fn score_answers(
    catalog: &ScoringCatalog,
    answers: &[AnswerInput],
    mode: ScoringMode,
) -> Vec<RankedAptitude> {
    let options: HashMap<i64, &QuestionOption> =
        catalog.options.iter().map(|o| (o.id, o)).collect();

    // Best weight per question, shared by both accumulation modes.
    let mut question_max: HashMap<i64, f64> = HashMap::new();
    for option in &catalog.options {
        let best = question_max.entry(option.question_id).or_insert(0.0);
        if option.weight > *best {
            *best = option.weight;
        }
    }

    let mut raw: HashMap<i64, f64> = HashMap::new();
    for answer in answers {
        if let Some(option) = options.get(&answer.option_id) {
            if option.question_id == answer.question_id {
                *raw.entry(option.aptitude_id).or_insert(0.0) += option.weight;
            }
        }
    }

    let mut max: HashMap<i64, f64> = HashMap::new();
    match mode {
        ScoringMode::Legacy => {
            // Historical accumulation: every option row contributes its
            // question's best weight, even when the aptitude already counted
            // that question through another of its options.
            for option in &catalog.options {
                *max.entry(option.aptitude_id).or_insert(0.0) +=
                    question_max.get(&option.question_id).copied().unwrap_or(0.0);
            }
        }
        ScoringMode::Corrected => {
            let mut counted: HashSet<(i64, i64)> = HashSet::new();
            for option in &catalog.options {
                if counted.insert((option.aptitude_id, option.question_id)) {
                    *max.entry(option.aptitude_id).or_insert(0.0) +=
                        question_max.get(&option.question_id).copied().unwrap_or(0.0);
                }
            }
        }
    }

    // Base order is aptitude id ascending; the stable sort keeps that order
    // between equal scores.
    let mut ranked: Vec<RankedAptitude> = catalog
        .aptitudes
        .iter()
        .map(|aptitude| {
            let raw_score = raw.get(&aptitude.id).copied().unwrap_or(0.0);
            let max_possible = max.get(&aptitude.id).copied().unwrap_or(0.0);
            RankedAptitude {
                aptitude_id: aptitude.id,
                raw_score,
                max_possible,
                percentage: percentage(raw_score, max_possible),
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));

    ranked
}

/// Half-up integer rounding of raw/max expressed as a percentage.
fn percentage(raw_score: f64, max_possible: f64) -> i32 {
    if max_possible > 0.0 {
        (raw_score / max_possible * 100.0).round() as i32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        aptitude::Aptitude,
        question::{Question, QuestionOption},
    };

    fn aptitude(id: i64) -> Aptitude {
        Aptitude {
            id,
            name: format!("Aptitude {}", id),
            description: String::new(),
        }
    }

    fn question(id: i64) -> Question {
        Question {
            id,
            content: format!("Question {}", id),
            position: id as i32,
            active: true,
        }
    }

    fn option(id: i64, question_id: i64, aptitude_id: i64, weight: f64) -> QuestionOption {
        QuestionOption {
            id,
            question_id,
            content: format!("Option {}", id),
            aptitude_id,
            weight,
        }
    }

    fn answer(question_id: i64, option_id: i64) -> AnswerInput {
        AnswerInput {
            question_id,
            option_id,
        }
    }

    fn entry(ranked: &[RankedAptitude], aptitude_id: i64) -> &RankedAptitude {
        ranked
            .iter()
            .find(|r| r.aptitude_id == aptitude_id)
            .unwrap()
    }

    #[test]
    fn test_legacy_max_counts_question_per_option() {
        // Two options of the same question feed aptitude 1: the question's
        // best weight (3.0) is accumulated once per option row.
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1)],
            questions: vec![question(1)],
            options: vec![option(1, 1, 1, 2.0), option(2, 1, 1, 3.0)],
        };

        let ranked = score_answers(&catalog, &[answer(1, 2)], ScoringMode::Legacy);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].raw_score, 3.0);
        assert_eq!(ranked[0].max_possible, 6.0);
        assert_eq!(ranked[0].percentage, 50);
    }

    #[test]
    fn test_corrected_max_counts_question_once() {
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1)],
            questions: vec![question(1)],
            options: vec![option(1, 1, 1, 2.0), option(2, 1, 1, 3.0)],
        };

        let ranked = score_answers(&catalog, &[answer(1, 2)], ScoringMode::Corrected);

        assert_eq!(ranked[0].max_possible, 3.0);
        assert_eq!(ranked[0].percentage, 100);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 5 / 8 = 62.5% rounds up to 63.
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1)],
            questions: vec![question(1), question(2)],
            options: vec![option(1, 1, 1, 5.0), option(2, 2, 1, 3.0)],
        };

        let ranked = score_answers(&catalog, &[answer(1, 1)], ScoringMode::Legacy);

        assert_eq!(ranked[0].raw_score, 5.0);
        assert_eq!(ranked[0].max_possible, 8.0);
        assert_eq!(ranked[0].percentage, 63);
    }

    #[test]
    fn test_ranking_orders_by_score_with_id_tie_break() {
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1), aptitude(2), aptitude(3)],
            questions: vec![question(1), question(2), question(3)],
            options: vec![
                option(1, 1, 3, 1.0),
                option(2, 2, 1, 2.0),
                option(3, 3, 2, 2.0),
            ],
        };

        let ranked = score_answers(
            &catalog,
            &[answer(1, 1), answer(2, 2), answer(3, 3)],
            ScoringMode::Legacy,
        );

        // Aptitudes 1 and 2 tie on 2.0 and keep id order; aptitude 3 trails.
        let order: Vec<i64> = ranked.iter().map(|r| r.aptitude_id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_every_catalog_aptitude_is_ranked() {
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1), aptitude(2), aptitude(7)],
            questions: vec![question(1)],
            options: vec![option(1, 1, 1, 2.0)],
        };

        let ranked = score_answers(&catalog, &[answer(1, 1)], ScoringMode::Legacy);

        assert_eq!(ranked.len(), 3);
        // Aptitude 7 has no options at all: nothing achievable, percentage 0.
        assert_eq!(entry(&ranked, 7).max_possible, 0.0);
        assert_eq!(entry(&ranked, 7).percentage, 0);
        // Aptitude 2 has no chosen options but a real ceiling.
        assert_eq!(entry(&ranked, 2).raw_score, 0.0);
    }

    #[test]
    fn test_no_answers_scores_everything_zero() {
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1), aptitude(2)],
            questions: vec![question(1)],
            options: vec![option(1, 1, 1, 2.0), option(2, 1, 2, 3.0)],
        };

        let ranked = score_answers(&catalog, &[], ScoringMode::Legacy);

        assert!(ranked.iter().all(|r| r.raw_score == 0.0));
        assert!(ranked.iter().all(|r| r.percentage == 0));
    }

    #[test]
    fn test_stale_answers_are_skipped() {
        // Option 9 is gone from the catalog; re-scoring ignores it instead
        // of failing the whole read.
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1)],
            questions: vec![question(1)],
            options: vec![option(1, 1, 1, 2.0)],
        };

        let ranked = score_answers(
            &catalog,
            &[answer(1, 1), answer(2, 9)],
            ScoringMode::Legacy,
        );

        assert_eq!(ranked[0].raw_score, 2.0);
    }

    #[test]
    fn test_validate_rejects_empty_submission() {
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1)],
            questions: vec![question(1)],
            options: vec![option(1, 1, 1, 2.0)],
        };

        let err = validate_answers(&catalog, &[]).unwrap_err();
        assert!(matches!(err, AppError::EmptySubmission));
    }

    #[test]
    fn test_validate_rejects_duplicate_question() {
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1)],
            questions: vec![question(1)],
            options: vec![option(1, 1, 1, 2.0), option(2, 1, 1, 3.0)],
        };

        let err = validate_answers(&catalog, &[answer(1, 1), answer(1, 2)]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_unknown_question() {
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1)],
            questions: vec![question(1)],
            options: vec![option(1, 1, 1, 2.0)],
        };

        let err = validate_answers(&catalog, &[answer(99, 1)]).unwrap_err();
        assert!(matches!(err, AppError::InvalidAnswer(_)));
    }

    #[test]
    fn test_validate_rejects_option_from_other_question() {
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1)],
            questions: vec![question(1), question(2)],
            options: vec![option(1, 1, 1, 2.0), option(2, 2, 1, 3.0)],
        };

        // Option 2 belongs to question 2, not question 1.
        let err = validate_answers(&catalog, &[answer(1, 2)]).unwrap_err();
        assert!(matches!(err, AppError::InvalidAnswer(_)));
    }

    #[test]
    fn test_validate_rejects_unknown_option() {
        let catalog = ScoringCatalog {
            aptitudes: vec![aptitude(1)],
            questions: vec![question(1)],
            options: vec![option(1, 1, 1, 2.0)],
        };

        let err = validate_answers(&catalog, &[answer(1, 42)]).unwrap_err();
        assert!(matches!(err, AppError::InvalidAnswer(_)));
    }
}
