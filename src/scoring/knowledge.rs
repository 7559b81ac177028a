use crate::types::application::{ApplicationRecord, DESCRIPTIVE_FIELD_COUNT};
use crate::types::scoring::{KnowledgeAssessment, Score};
use chrono::{DateTime, Months, Utc};

use super::{round_score, MAX_SCORE_PER_CATEGORY};

const COMPLETENESS_SHARE: f64 = 0.8;
const FRESHNESS_SHARE: f64 = 0.2;
const FRESHNESS_WINDOW_MONTHS: u32 = 6;

pub fn assess_knowledge(app: &ApplicationRecord, now: DateTime<Utc>) -> KnowledgeAssessment {
    KnowledgeAssessment {
        filled_fields: app.filled_descriptive_fields(),
        total_fields: DESCRIPTIVE_FIELD_COUNT,
        fresh_review: app
            .metadata_last_reviewed
            .map(|reviewed| reviewed_recently(reviewed, now))
            .unwrap_or(false),
    }
}

pub fn knowledge_score(app: &ApplicationRecord, now: DateTime<Utc>) -> Score {
    knowledge_points(&assess_knowledge(app, now))
}

pub(crate) fn knowledge_points(assessment: &KnowledgeAssessment) -> Score {
    let completeness = assessment.filled_fields as f64 / assessment.total_fields as f64
        * (MAX_SCORE_PER_CATEGORY * COMPLETENESS_SHARE);
    let freshness = if assessment.fresh_review {
        MAX_SCORE_PER_CATEGORY * FRESHNESS_SHARE
    } else {
        0.0
    };
    round_score(completeness + freshness)
}

/// Calendar-month window; the day clamps when the target month is shorter.
fn reviewed_recently(reviewed: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.checked_sub_months(Months::new(FRESHNESS_WINDOW_MONTHS))
        .map(|cutoff| reviewed > cutoff)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn filled(count: usize) -> ApplicationRecord {
        let mut app = ApplicationRecord::default();
        let slots = [
            &mut app.description,
            &mut app.owner,
            &mut app.repo_url,
            &mut app.language,
            &mut app.framework,
            &mut app.server_environment,
            &mut app.auth_profiles,
            &mut app.data_types,
        ];
        for slot in slots.into_iter().take(count) {
            *slot = Some("set".to_string());
        }
        app
    }

    #[test]
    fn complete_metadata_without_review_scores_forty() {
        assert_eq!(knowledge_score(&filled(8), now()), 40);
    }

    #[test]
    fn half_metadata_reviewed_today_scores_thirty() {
        let mut app = filled(4);
        app.metadata_last_reviewed = Some(now());
        assert_eq!(knowledge_score(&app, now()), 30);
    }

    #[test]
    fn empty_record_scores_zero() {
        assert_eq!(knowledge_score(&ApplicationRecord::default(), now()), 0);
    }

    #[test]
    fn each_descriptive_field_is_worth_five_points() {
        assert_eq!(knowledge_score(&filled(1), now()), 5);
        assert_eq!(knowledge_score(&filled(3), now()), 15);
    }

    #[test]
    fn filling_a_field_never_lowers_the_score() {
        let mut previous = 0;
        for count in 0..=DESCRIPTIVE_FIELD_COUNT {
            let score = knowledge_score(&filled(count), now());
            assert!(score >= previous);
            assert!(score <= 50);
            previous = score;
        }
    }

    #[test]
    fn freshness_window_is_six_calendar_months() {
        let mut app = filled(8);

        app.metadata_last_reviewed = Some(Utc.with_ymd_and_hms(2026, 4, 20, 0, 0, 0).unwrap());
        assert_eq!(knowledge_score(&app, now()), 50);

        app.metadata_last_reviewed = Some(Utc.with_ymd_and_hms(2026, 4, 19, 12, 0, 0).unwrap());
        assert_eq!(knowledge_score(&app, now()), 40, "cutoff itself is not fresh");

        app.metadata_last_reviewed = Some(Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap());
        assert_eq!(knowledge_score(&app, now()), 40);
    }

    #[test]
    fn freshness_cutoff_clamps_short_months() {
        // 2026-08-31 minus six months clamps to 2026-02-28
        let now = Utc.with_ymd_and_hms(2026, 8, 31, 0, 0, 0).unwrap();
        let mut app = ApplicationRecord::default();

        app.metadata_last_reviewed = Some(Utc.with_ymd_and_hms(2026, 2, 28, 0, 0, 1).unwrap());
        assert!(assess_knowledge(&app, now).fresh_review);

        app.metadata_last_reviewed = Some(Utc.with_ymd_and_hms(2026, 2, 27, 23, 59, 59).unwrap());
        assert!(!assess_knowledge(&app, now).fresh_review);
    }
}
