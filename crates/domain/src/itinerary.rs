use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;

/// A user's trip with an inclusive `[start_date, end_date]` validity
/// window. Owns an ordered collection of `ScheduleItem`s.
#[derive(Debug, Clone)]
pub struct Itinerary {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    pub budget: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Itinerary {
    pub fn new(
        user_id: ID,
        name: impl Into<String>,
        budget: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            name: name.into(),
            budget: budget.into(),
            start_date,
            end_date,
        }
    }

    /// Whether `date` falls inside the trip window, both ends inclusive.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl Entity<ID> for Itinerary {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("Valid date")
    }

    #[test]
    fn trip_window_is_inclusive() {
        let trip = Itinerary::new(
            Default::default(),
            "Paris",
            "mid",
            date("2021-06-10"),
            date("2021-06-14"),
        );
        assert!(trip.is_active_on(date("2021-06-10")));
        assert!(trip.is_active_on(date("2021-06-12")));
        assert!(trip.is_active_on(date("2021-06-14")));
        assert!(!trip.is_active_on(date("2021-06-09")));
        assert!(!trip.is_active_on(date("2021-06-15")));
    }
}
