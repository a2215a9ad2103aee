use chrono::{DateTime, NaiveDate, Utc};

/// A game that is free right now.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameOffer {
    pub title: String,
    pub url: String,
}

/// A game whose free window has not opened yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingOffer {
    pub title: String,
    pub url: String,
    pub start_date: DateTime<Utc>,
}

impl UpcomingOffer {
    /// Calendar day (UTC) on which the free window opens.
    pub fn starts_on(&self) -> NaiveDate {
        self.start_date.date_naive()
    }
}
