//! Reverse lookup: observed salary to the most likely (scale, step).

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{MatchSettings, WageScaleTable};
use crate::error::{EngineError, EngineResult};
use crate::models::{CandidateMatch, DetectionResult, SalaryBasis, WageScaleDefinition};

use super::compliance::compliance_status;
use super::confidence::{confidence_score, confidence_tier};
use super::forward::resolve_forward;

/// A (scale, step) whose wage is in force on the lookup date.
struct Candidate<'a> {
    definition: &'a WageScaleDefinition,
    step: u32,
    wage: Decimal,
    difference: Decimal,
    score: Decimal,
    exact: bool,
}

impl Candidate<'_> {
    /// Score descending, then closeness, then (scale, step).
    fn rank(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.difference.abs().cmp(&other.difference.abs()))
            .then_with(|| {
                self.definition
                    .scale_number
                    .cmp(&other.definition.scale_number)
            })
            .then_with(|| self.step.cmp(&other.step))
    }

    fn into_match(self) -> CandidateMatch {
        CandidateMatch {
            scale: self.definition.scale_number,
            step: self.step,
            scale_category: self.definition.scale_category.clone(),
            wage: self.wage,
            salary_difference: self.difference,
            confidence_score: self.score,
        }
    }
}

/// Finds the scale step that best explains an observed salary.
///
/// Every step with a wage in force on `as_of` is a candidate; steps whose
/// rows all lie after `as_of` are skipped. Candidates are scored with
/// [`confidence_score`] and ranked best first. The top candidate becomes the
/// match, and `exact_step` is set when its wage is within
/// `settings.exact_epsilon` of the salary. The next
/// `settings.max_alternatives` candidates are returned as alternatives.
///
/// `category_hint` favours scales of that category (case-insensitive) when
/// scores are close.
///
/// # Returns
///
/// Returns the detection result, or an error if:
/// - `salary` is zero or negative (`AmbiguousInput`)
/// - no wage at all is in force on `as_of` (`NoCandidates`)
pub fn resolve_reverse(
    table: &WageScaleTable,
    settings: &MatchSettings,
    salary: Decimal,
    as_of: NaiveDate,
    basis: SalaryBasis,
    category_hint: Option<&str>,
) -> EngineResult<DetectionResult> {
    if salary <= Decimal::ZERO {
        return Err(EngineError::AmbiguousInput {
            salary,
            message: "salary must be greater than zero".to_string(),
        });
    }

    let mut candidates = Vec::new();
    for (scale, step, _) in table.histories() {
        let resolved = match resolve_forward(table, scale, step, as_of) {
            Ok(resolved) => resolved,
            Err(EngineError::OutOfRange { .. }) => continue,
            Err(err) => return Err(err),
        };
        let definition = table.scale(scale)?;

        let wage = resolved.wage.amount(basis);
        let difference = salary - wage;
        let exact = difference.abs() <= settings.exact_epsilon;
        let category_match =
            category_hint.map(|hint| hint.eq_ignore_ascii_case(&definition.scale_category));
        let score = if exact {
            Decimal::ONE_HUNDRED
        } else {
            confidence_score(difference.abs() / salary, category_match, settings)
        };

        candidates.push(Candidate {
            definition,
            step,
            wage,
            difference,
            score,
            exact,
        });
    }

    candidates.sort_by(|a, b| a.rank(b));
    let candidate_count = candidates.len();
    let mut ranked = candidates.into_iter();
    let primary = ranked
        .next()
        .ok_or(EngineError::NoCandidates { date: as_of })?;
    let alternative_matches: Vec<CandidateMatch> = ranked
        .take(settings.max_alternatives)
        .map(Candidate::into_match)
        .collect();

    debug!(
        salary = %salary,
        as_of = %as_of,
        candidates = candidate_count,
        scale = primary.definition.scale_number,
        step = primary.step,
        score = %primary.score,
        exact = primary.exact,
        "Reverse lookup matched"
    );

    Ok(DetectionResult {
        input_salary: salary,
        input_date: as_of,
        basis,
        scale: primary.definition.scale_number,
        scale_name: primary.definition.scale_name.clone(),
        scale_category: primary.definition.scale_category.clone(),
        exact_step: primary.exact.then_some(primary.step),
        nearest_step: Some(primary.step),
        matched_wage: primary.wage,
        salary_difference: primary.difference,
        confidence_score: primary.score,
        confidence_tier: confidence_tier(primary.score, settings),
        alternative_matches,
        compliance_status: compliance_status(
            primary.difference,
            primary.wage,
            settings.compliance_tolerance_percent,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComplianceStatus, ConfidenceTier};
    use crate::resolution::fixtures::{date, dec, progression_table, rate, scale, table, two_step_table};

    fn settings() -> MatchSettings {
        MatchSettings::default()
    }

    #[test]
    fn test_salary_between_two_steps() {
        let table = two_step_table();

        let result = resolve_reverse(
            &table,
            &settings(),
            dec("2450"),
            date("2024-06-01"),
            SalaryBasis::Monthly,
            None,
        )
        .unwrap();

        assert_eq!(result.scale, 6);
        assert_eq!(result.exact_step, None);
        assert_eq!(result.nearest_step, Some(10));
        assert_eq!(result.salary_difference, dec("50"));
        assert_eq!(result.confidence_score, dec("79.59"));
        assert_eq!(result.confidence_tier, ConfidenceTier::Medium);
        assert_eq!(result.compliance_status, ComplianceStatus::OverCao);

        assert_eq!(result.alternative_matches.len(), 1);
        let alternative = &result.alternative_matches[0];
        assert_eq!(alternative.step, 11);
        assert_eq!(alternative.salary_difference, dec("-50"));
        assert_eq!(alternative.confidence_score, dec("79.59"));
    }

    #[test]
    fn test_exact_match_scores_100() {
        let table = two_step_table();

        let result = resolve_reverse(
            &table,
            &settings(),
            dec("2500.00"),
            date("2024-06-01"),
            SalaryBasis::Monthly,
            None,
        )
        .unwrap();

        assert_eq!(result.exact_step, Some(11));
        assert_eq!(result.nearest_step, Some(11));
        assert_eq!(result.confidence_score, Decimal::ONE_HUNDRED);
        assert_eq!(result.confidence_tier, ConfidenceTier::High);
        assert_eq!(result.compliance_status, ComplianceStatus::Compliant);
        assert!(result.is_exact());
    }

    #[test]
    fn test_difference_within_epsilon_is_exact() {
        let table = two_step_table();

        let result = resolve_reverse(
            &table,
            &settings(),
            dec("2399.995"),
            date("2024-06-01"),
            SalaryBasis::Monthly,
            None,
        )
        .unwrap();

        assert_eq!(result.exact_step, Some(10));
        assert_eq!(result.confidence_score, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_non_positive_salary_is_ambiguous_input() {
        let table = two_step_table();

        for salary in ["0", "-2400"] {
            let result = resolve_reverse(
                &table,
                &settings(),
                dec(salary),
                date("2024-06-01"),
                SalaryBasis::Monthly,
                None,
            );
            assert!(
                matches!(result, Err(EngineError::AmbiguousInput { .. })),
                "salary {} should be rejected",
                salary
            );
        }
    }

    #[test]
    fn test_date_before_all_rates_has_no_candidates() {
        let table = two_step_table();

        let result = resolve_reverse(
            &table,
            &settings(),
            dec("2450"),
            date("2023-06-01"),
            SalaryBasis::Monthly,
            None,
        );

        assert!(matches!(result, Err(EngineError::NoCandidates { .. })));
    }

    #[test]
    fn test_uses_wage_in_force_on_date() {
        let table = progression_table();

        let before = resolve_reverse(
            &table,
            &settings(),
            dec("2470.00"),
            date("2024-03-01"),
            SalaryBasis::Monthly,
            None,
        )
        .unwrap();
        let after = resolve_reverse(
            &table,
            &settings(),
            dec("2470.00"),
            date("2024-08-01"),
            SalaryBasis::Monthly,
            None,
        )
        .unwrap();

        assert_eq!((before.scale, before.exact_step), (6, Some(1)));
        // After the July raise 2470 no longer matches exactly; step 0 (2472) is nearest
        assert_eq!(after.exact_step, None);
        assert_eq!((after.scale, after.nearest_step), (6, Some(0)));
        assert_eq!(after.salary_difference, dec("-2.00"));
        assert_eq!(after.compliance_status, ComplianceStatus::Compliant);
    }

    #[test]
    fn test_category_hint_breaks_near_ties() {
        // 2709.00 is 20.70 above scale 6 and 20.50 below scale 7
        let table = table(
            vec![scale(6, "care", 0, 0), scale(7, "senior_care", 0, 0)],
            vec![
                rate(6, 0, "2024-01-01", "2688.30"),
                rate(7, 0, "2024-01-01", "2729.50"),
            ],
        );
        let salary = dec("2709.00");
        let as_of = date("2024-06-01");

        let unhinted =
            resolve_reverse(&table, &settings(), salary, as_of, SalaryBasis::Monthly, None)
                .unwrap();
        let hinted = resolve_reverse(
            &table,
            &settings(),
            salary,
            as_of,
            SalaryBasis::Monthly,
            Some("CARE"),
        )
        .unwrap();

        assert_eq!(unhinted.scale, 7);
        assert_eq!(unhinted.confidence_score, dec("92.43"));
        assert_eq!(hinted.scale, 6);
        assert_eq!(hinted.nearest_step, Some(0));
        assert_eq!(hinted.confidence_score, dec("94.36"));
        assert_eq!(hinted.alternative_matches[0].scale, 7);
    }

    #[test]
    fn test_category_hint_does_not_override_large_gap() {
        let table = progression_table();

        let result = resolve_reverse(
            &table,
            &settings(),
            dec("2729.50"),
            date("2024-08-01"),
            SalaryBasis::Monthly,
            Some("care"),
        )
        .unwrap();

        assert_eq!(result.scale, 7);
        assert_eq!(result.exact_step, Some(0));
    }

    #[test]
    fn test_alternatives_are_ranked_and_capped() {
        let table = progression_table();
        let settings = MatchSettings {
            max_alternatives: 2,
            ..MatchSettings::default()
        };

        let result = resolve_reverse(
            &table,
            &settings,
            dec("2500.00"),
            date("2024-08-01"),
            SalaryBasis::Monthly,
            None,
        )
        .unwrap();

        assert_eq!(result.alternative_matches.len(), 2);
        assert!(
            result
                .alternative_matches
                .windows(2)
                .all(|pair| pair[0].confidence_score > pair[1].confidence_score)
        );
        assert!(result.confidence_score > result.alternative_matches[0].confidence_score);
        assert!(
            result
                .alternative_matches
                .iter()
                .all(|m| (m.scale, m.step) != (result.scale, result.nearest_step.unwrap()))
        );
    }

    #[test]
    fn test_hourly_basis_compares_hourly_wages() {
        let table = two_step_table();
        // 2500 / 156 = 16.03
        let result = resolve_reverse(
            &table,
            &settings(),
            dec("16.03"),
            date("2024-06-01"),
            SalaryBasis::Hourly,
            None,
        )
        .unwrap();

        assert_eq!(result.basis, SalaryBasis::Hourly);
        assert_eq!(result.exact_step, Some(11));
        assert_eq!(result.matched_wage, dec("16.03"));
    }
}
