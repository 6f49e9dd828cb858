use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{start_of_day, FinancialRecord, PaymentStatus};

/// Payment status selector; `All` matches every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    Pending,
    Overdue,
}

impl StatusFilter {
    pub fn matches(&self, status: PaymentStatus) -> bool {
        match self {
            Self::All => true,
            Self::Paid => status == PaymentStatus::Paid,
            Self::Pending => status == PaymentStatus::Pending,
            Self::Overdue => status == PaymentStatus::Overdue,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Paid => write!(f, "paid"),
            Self::Pending => write!(f, "pending"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            _ => Err(format!(
                "Unknown status filter: {s} (expected all, paid, pending or overdue)"
            )),
        }
    }
}

/// Trailing reporting period measured back from "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    Week,
    Month,
    Quarter,
}

impl Period {
    /// Earliest instant a record may fall on, or `None` for no lower bound.
    ///
    /// Weeks are 7 days; months and quarters step back whole calendar months,
    /// clamping to the last day when the target month is shorter.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let cutoff = match self {
            Self::All => return None,
            Self::Week => now.checked_sub_signed(Duration::days(7)),
            Self::Month => now.checked_sub_months(Months::new(1)),
            Self::Quarter => now.checked_sub_months(Months::new(3)),
        };
        Some(cutoff.unwrap_or(DateTime::<Utc>::MIN_UTC))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            _ => Err(format!(
                "Unknown period: {s} (expected all, week, month or quarter)"
            )),
        }
    }
}

/// Status and period selectors, combined with AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinancialFilter {
    pub status: StatusFilter,
    pub period: Period,
}

impl FinancialFilter {
    pub fn new(status: StatusFilter, period: Period) -> Self {
        Self { status, period }
    }

    /// Matching records in input order. A record's date counts from its
    /// midnight (UTC), so it must begin at or after the period cutoff.
    pub fn apply<'a>(
        &self,
        records: &'a [FinancialRecord],
        now: DateTime<Utc>,
    ) -> Vec<&'a FinancialRecord> {
        let cutoff = self.period.cutoff(now);
        records
            .iter()
            .filter(|r| self.status.matches(r.status))
            .filter(|r| cutoff.map_or(true, |c| start_of_day(r.date) >= c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_timestamp;
    use crate::store::SeedDataset;

    fn ids(records: &[&FinancialRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    fn now() -> DateTime<Utc> {
        parse_timestamp("2025-06-28T12:00:00").unwrap()
    }

    #[test]
    fn test_all_all_keeps_everything() {
        let data = SeedDataset::embedded().unwrap();
        let kept = FinancialFilter::default().apply(&data.financial_records, now());
        assert_eq!(kept.len(), data.financial_records.len());
    }

    #[test]
    fn test_paid_filter_keeps_only_paid_records() {
        let data = SeedDataset::embedded().unwrap();
        let kept = FinancialFilter::new(StatusFilter::Paid, Period::All)
            .apply(&data.financial_records, now());
        assert_eq!(ids(&kept), vec!["f001", "f002", "f004"]);
        let sum: f64 = kept.iter().map(|r| r.amount).sum();
        // 150 + 200 + 150
        assert_eq!(sum, 500.0);
    }

    #[test]
    fn test_week_period_uses_seven_days() {
        let data = SeedDataset::embedded().unwrap();
        // cutoff 2025-06-21T12:00; 06-25, 06-26, 06-27 qualify
        let kept = FinancialFilter::new(StatusFilter::All, Period::Week)
            .apply(&data.financial_records, now());
        assert_eq!(ids(&kept), vec!["f001", "f002", "f003"]);
    }

    #[test]
    fn test_record_on_cutoff_day_counts_from_midnight() {
        let data = SeedDataset::embedded().unwrap();
        // cutoff 2025-06-18T00:00 exactly: f004 (06-18) is included
        let midnight = parse_timestamp("2025-06-25T00:00:00").unwrap();
        let kept = FinancialFilter::new(StatusFilter::All, Period::Week)
            .apply(&data.financial_records, midnight);
        assert!(ids(&kept).contains(&"f004".to_string()));

        // one second later the 06-18 midnight is before the cutoff
        let later = parse_timestamp("2025-06-25T00:00:01").unwrap();
        let kept = FinancialFilter::new(StatusFilter::All, Period::Week)
            .apply(&data.financial_records, later);
        assert!(!ids(&kept).contains(&"f004".to_string()));
    }

    #[test]
    fn test_month_and_quarter_are_calendar_months() {
        let now = parse_timestamp("2025-03-31T08:00:00").unwrap();
        assert_eq!(
            Period::Month.cutoff(now).unwrap().to_rfc3339(),
            "2025-02-28T08:00:00+00:00"
        );
        assert_eq!(
            Period::Quarter.cutoff(now).unwrap().to_rfc3339(),
            "2024-12-31T08:00:00+00:00"
        );
        assert!(Period::All.cutoff(now).is_none());
    }

    #[test]
    fn test_filters_combine_with_and() {
        let data = SeedDataset::embedded().unwrap();
        let kept = FinancialFilter::new(StatusFilter::Overdue, Period::Week)
            .apply(&data.financial_records, now());
        assert!(kept.is_empty());

        let kept = FinancialFilter::new(StatusFilter::Overdue, Period::Month)
            .apply(&data.financial_records, now());
        assert_eq!(ids(&kept), vec!["f005"]);
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("Pending".parse::<StatusFilter>().unwrap(), StatusFilter::Pending);
        assert!("refunded".parse::<StatusFilter>().is_err());

        assert_eq!("quarter".parse::<Period>().unwrap(), Period::Quarter);
        assert!("year".parse::<Period>().is_err());
    }
}
