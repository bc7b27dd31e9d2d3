use super::IItineraryRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::NaiveDate;
use wayfarer_domain::{Itinerary, ID};

pub struct InMemoryItineraryRepo {
    itineraries: std::sync::Mutex<Vec<Itinerary>>,
}

impl InMemoryItineraryRepo {
    pub fn new() -> Self {
        Self {
            itineraries: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IItineraryRepo for InMemoryItineraryRepo {
    async fn insert(&self, itinerary: &Itinerary) -> anyhow::Result<()> {
        insert(itinerary, &self.itineraries);
        Ok(())
    }

    async fn find(&self, itinerary_id: &ID) -> Option<Itinerary> {
        find(itinerary_id, &self.itineraries)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Itinerary>> {
        Ok(find_by(&self.itineraries, |itinerary| {
            itinerary.user_id == *user_id
        }))
    }

    async fn find_active_on(&self, date: NaiveDate) -> anyhow::Result<Vec<Itinerary>> {
        Ok(find_by(&self.itineraries, |itinerary| {
            itinerary.is_active_on(date)
        }))
    }

    async fn delete(&self, itinerary_id: &ID) -> Option<Itinerary> {
        delete(itinerary_id, &self.itineraries)
    }
}
