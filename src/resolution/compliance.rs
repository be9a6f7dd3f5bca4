//! CAO compliance of an observed salary.

use rust_decimal::Decimal;

use crate::models::ComplianceStatus;

/// Classifies a salary difference against the matched CAO wage.
///
/// A difference within `tolerance_percent` of the matched wage is compliant;
/// outside the band the sign decides between over and under.
///
/// # Examples
///
/// ```
/// use cao_engine::models::ComplianceStatus;
/// use cao_engine::resolution::compliance_status;
/// use rust_decimal::Decimal;
///
/// let wage = Decimal::from(2400);
/// let tolerance = Decimal::ONE;
///
/// assert_eq!(compliance_status(Decimal::from(20), wage, tolerance), ComplianceStatus::Compliant);
/// assert_eq!(compliance_status(Decimal::from(50), wage, tolerance), ComplianceStatus::OverCao);
/// assert_eq!(compliance_status(Decimal::from(-50), wage, tolerance), ComplianceStatus::UnderCao);
/// ```
pub fn compliance_status(
    salary_difference: Decimal,
    matched_wage: Decimal,
    tolerance_percent: Decimal,
) -> ComplianceStatus {
    let tolerance = matched_wage.abs() * tolerance_percent / Decimal::ONE_HUNDRED;

    if salary_difference.abs() <= tolerance {
        ComplianceStatus::Compliant
    } else if salary_difference > Decimal::ZERO {
        ComplianceStatus::OverCao
    } else {
        ComplianceStatus::UnderCao
    }
}
