//! Hand-built wage tables shared by the resolution tests.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::config::{AgreementMetadata, WageScaleTable};
use crate::models::{WageAmounts, WageRate, WageScaleDefinition};

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn scale(number: u32, category: &str, min_step: u32, max_step: u32) -> WageScaleDefinition {
    WageScaleDefinition {
        scale_number: number,
        scale_name: format!("Schaal {}", number),
        scale_category: category.to_string(),
        min_step,
        max_step,
        description: String::new(),
    }
}

/// A row whose hourly and yearly figures derive from the monthly wage.
pub fn rate(scale: u32, step: u32, effective: &str, monthly: &str) -> WageRate {
    let monthly = dec(monthly);
    WageRate {
        scale_number: scale,
        step_number: step,
        effective_date: date(effective),
        wage: WageAmounts {
            hourly_wage: (monthly / Decimal::from(156))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            monthly_wage: monthly,
            yearly_wage: monthly * Decimal::from(12),
        },
    }
}

pub fn table(scales: Vec<WageScaleDefinition>, rates: Vec<WageRate>) -> WageScaleTable {
    WageScaleTable::new(
        AgreementMetadata {
            code: "CAO-TEST".to_string(),
            name: "Test CAO".to_string(),
            version: "2024".to_string(),
            source_url: "https://example.com".to_string(),
        },
        scales,
        rates,
    )
    .unwrap()
}

/// Scale 6 steps 10 and 11, one row each on 2024-01-01.
pub fn two_step_table() -> WageScaleTable {
    table(
        vec![scale(6, "care", 10, 11)],
        vec![
            rate(6, 10, "2024-01-01", "2400.00"),
            rate(6, 11, "2024-01-01", "2500.00"),
        ],
    )
}

/// Two scales in different categories with a raise on 2024-07-01 and a
/// negotiated raise on 2025-01-01.
pub fn progression_table() -> WageScaleTable {
    table(
        vec![scale(6, "care", 0, 2), scale(7, "senior_care", 0, 1)],
        vec![
            rate(6, 0, "2024-01-01", "2400.00"),
            rate(6, 0, "2024-07-01", "2472.00"),
            rate(6, 0, "2025-01-01", "2532.00"),
            rate(6, 1, "2024-01-01", "2470.00"),
            rate(6, 1, "2024-07-01", "2544.10"),
            rate(6, 1, "2025-01-01", "2604.10"),
            rate(7, 0, "2024-01-01", "2650.00"),
            rate(7, 0, "2024-07-01", "2729.50"),
            rate(7, 1, "2024-07-01", "2811.90"),
        ],
    )
}
