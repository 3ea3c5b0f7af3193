use crate::models::{Deal, HealthBand, ManagerFilter};

/// Digit-group separator matching the ru-RU number format.
const GROUP_SEPARATOR: char = '\u{a0}';
const CURRENCY_SUFFIX: &str = "₽";

/// Deals owned by the selected manager, in their original order.
pub fn filter_deals<'a>(deals: &'a [Deal], filter: ManagerFilter) -> Vec<&'a Deal> {
    match filter {
        ManagerFilter::All => deals.iter().collect(),
        ManagerFilter::Id(manager_id) => deals
            .iter()
            .filter(|deal| deal.manager_id == manager_id)
            .collect(),
    }
}

/// Buckets a 0–100 score. Used for both manager health and deal probability.
pub fn health_band(score: u8) -> HealthBand {
    if score >= 75 {
        HealthBand::High
    } else if score >= 50 {
        HealthBand::Medium
    } else {
        HealthBand::Low
    }
}

pub fn format_number(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        let remaining = digits.len() - index;
        if index > 0 && remaining % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_currency(value: i64) -> String {
    format!("{} {}", format_number(value), CURRENCY_SUFFIX)
}

pub fn plan_completion_percent(plan: i64, fact: i64) -> u32 {
    if plan <= 0 {
        return 0;
    }
    ((fact as f64 / plan as f64) * 100.0).round() as u32
}
