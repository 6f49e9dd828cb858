use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SessionType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BillingType {
    Session,
    Consultation,
    Assessment,
}

impl std::fmt::Display for BillingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session => write!(f, "session"),
            Self::Consultation => write!(f, "consultation"),
            Self::Assessment => write!(f, "assessment"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => write!(f, "paid"),
            Self::Pending => write!(f, "pending"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            _ => Err(format!("Unknown payment status: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialRecord {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub date: NaiveDate,
    /// Currency amount, positive by convention.
    pub amount: f64,
    pub billing_type: BillingType,
    pub status: PaymentStatus,
    pub session_type: SessionType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_parse_and_display() {
        assert_eq!("Paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::Overdue.to_string(), "overdue");
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_billing_type_wire_names() {
        let parsed: BillingType = serde_json::from_str("\"assessment\"").unwrap();
        assert_eq!(parsed, BillingType::Assessment);
        assert_eq!(BillingType::Consultation.to_string(), "consultation");
    }
}
