use serde::Serialize;

use crate::models::{FinancialRecord, PaymentStatus};

/// Totals per payment status over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub total: f64,
    pub paid: f64,
    pub pending: f64,
    pub overdue: f64,
    pub record_count: usize,
    pub paid_count: usize,
    pub pending_count: usize,
    pub overdue_count: usize,
}

impl RevenueSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a FinancialRecord>,
    {
        let mut summary = Self::default();
        for record in records {
            summary.total += record.amount;
            summary.record_count += 1;
            match record.status {
                PaymentStatus::Paid => {
                    summary.paid += record.amount;
                    summary.paid_count += 1;
                }
                PaymentStatus::Pending => {
                    summary.pending += record.amount;
                    summary.pending_count += 1;
                }
                PaymentStatus::Overdue => {
                    summary.overdue += record.amount;
                    summary.overdue_count += 1;
                }
            }
        }
        summary
    }

    /// `amount` as a percentage of the total; 0 when there is no total.
    pub fn share_of_total(&self, amount: f64) -> f64 {
        if self.total == 0.0 || !self.total.is_finite() {
            return 0.0;
        }
        let share = amount / self.total * 100.0;
        if share.is_finite() {
            share
        } else {
            0.0
        }
    }

    pub fn paid_percentage(&self) -> f64 {
        self.share_of_total(self.paid)
    }

    pub fn pending_percentage(&self) -> f64 {
        self.share_of_total(self.pending)
    }

    pub fn overdue_percentage(&self) -> f64 {
        self.share_of_total(self.overdue)
    }
}
