use super::IScheduleItemRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::NaiveDate;
use wayfarer_domain::{ScheduleItem, ID};

pub struct InMemoryScheduleItemRepo {
    schedule_items: std::sync::Mutex<Vec<ScheduleItem>>,
}

impl InMemoryScheduleItemRepo {
    pub fn new() -> Self {
        Self {
            schedule_items: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduleItemRepo for InMemoryScheduleItemRepo {
    async fn insert(&self, item: &ScheduleItem) -> anyhow::Result<()> {
        insert(item, &self.schedule_items);
        Ok(())
    }

    async fn find(&self, item_id: &ID) -> Option<ScheduleItem> {
        find(item_id, &self.schedule_items)
    }

    async fn find_by_itinerary(&self, itinerary_id: &ID) -> anyhow::Result<Vec<ScheduleItem>> {
        Ok(find_by(&self.schedule_items, |item| {
            item.itinerary_id == *itinerary_id
        }))
    }

    async fn find_by_date(&self, date: NaiveDate) -> anyhow::Result<Vec<ScheduleItem>> {
        Ok(find_by(&self.schedule_items, |item| {
            item.scheduled_date == date
        }))
    }

    async fn find_unnotified_by_date(&self, date: NaiveDate) -> anyhow::Result<Vec<ScheduleItem>> {
        Ok(find_by(&self.schedule_items, |item| {
            item.scheduled_date == date && !item.notification_sent
        }))
    }

    async fn mark_notification_sent(&self, item_id: &ID) -> anyhow::Result<()> {
        let mut updated = match find(item_id, &self.schedule_items) {
            Some(item) => item,
            None => return Ok(()),
        };
        updated.notification_sent = true;
        save(&updated, &self.schedule_items);
        Ok(())
    }

    async fn delete(&self, item_id: &ID) -> Option<ScheduleItem> {
        delete(item_id, &self.schedule_items)
    }
}
