use super::ISentOpportunityRepo;
use crate::repos::shared::inmemory_repo::*;
use anyhow::anyhow;
use std::collections::HashSet;
use wayfarer_domain::{SentOpportunity, ID};

pub struct InMemorySentOpportunityRepo {
    sent_opportunities: std::sync::Mutex<Vec<SentOpportunity>>,
}

impl InMemorySentOpportunityRepo {
    pub fn new() -> Self {
        Self {
            sent_opportunities: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISentOpportunityRepo for InMemorySentOpportunityRepo {
    async fn insert(&self, opportunity: &SentOpportunity) -> anyhow::Result<()> {
        // Mirrors the postgres unique constraint on (user_uid, place_id)
        let duplicates = find_by(&self.sent_opportunities, |existing| {
            existing.user_id == opportunity.user_id && existing.place_id == opportunity.place_id
        });
        if !duplicates.is_empty() {
            return Err(anyhow!(
                "Duplicate sent opportunity for user: {} and place: {}",
                opportunity.user_id,
                opportunity.place_id
            ));
        }
        insert(opportunity, &self.sent_opportunities);
        Ok(())
    }

    async fn find_place_ids_by_user(&self, user_id: &ID) -> anyhow::Result<HashSet<String>> {
        Ok(
            find_by(&self.sent_opportunities, |existing| {
                existing.user_id == *user_id
            })
            .into_iter()
            .map(|opportunity| opportunity.place_id)
            .collect(),
        )
    }
}
