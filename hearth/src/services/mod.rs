mod countdown;
mod practice;

pub use countdown::{Clock, CountdownTicker, FixedClock, SystemClock};
pub use practice::{
    parse_selectors, AppointmentFocus, FinancialOverview, NewNote, PatientDetail,
    PatientOverview, PracticeService, Schedule, DEFAULT_NOTE_MOOD, SPARKLINE_HEIGHT,
    SPARKLINE_WIDTH, TREND_HEIGHT, TREND_WIDTH,
};
