//! Pure transformations over practice data: filters, totals, trends and
//! countdowns. Nothing here touches the store or the clock.

mod financial;
mod mood;
mod patients;
mod revenue;
mod schedule;

pub use financial::{FinancialFilter, Period, StatusFilter};
pub use mood::{trailing_window, MoodPoint, MoodTrend};
pub use patients::{filter_patients, parse_tags, recent_notes};
pub use revenue::RevenueSummary;
pub use schedule::{sort_appointments, Countdown};
