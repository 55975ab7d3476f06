use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability text the listing page shows for plans that are full
pub const WAITLIST_STATUS: &str = "Waitlist Available";

/// One advertised floorplan, as extracted from a listing card.
///
/// Every field is best-effort: a card that yields nothing is still a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorplanRecord {
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    /// Monthly price in whole currency units
    pub price: Option<u64>,
    pub link: Option<String>,
    pub title: Option<String>,
    pub availability: Option<String>,
    /// Square footage
    pub size: Option<u64>,
}

impl FloorplanRecord {
    /// A plan is available when it advertises a price and is not waitlisted.
    ///
    /// Only the exact waitlist string excludes a plan; empty, absent, dated or
    /// "Coming Soon" statuses all count as available.
    pub fn is_available(&self) -> bool {
        self.price.is_some() && self.availability.as_deref() != Some(WAITLIST_STATUS)
    }
}

struct Field<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for Field<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("n/a"),
        }
    }
}

impl fmt::Display for FloorplanRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {} - {} bed {} bath - {} sq ft - ${} - {} - {}",
            Field(&self.title),
            Field(&self.beds),
            Field(&self.baths),
            Field(&self.size),
            Field(&self.price),
            Field(&self.availability),
            Field(&self.link),
        )
    }
}
