use crate::shared::entity::{Entity, ID};

/// An end user of the travel planner. Notification opt-ins default to
/// enabled and are toggled independently per alert category.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub full_name: Option<String>,
    /// Device push token. At most one user holds a given token at a time.
    pub fcm_token: Option<String>,
    pub allow_smart_alerts: bool,
    pub allow_opportunity_alerts: bool,
    pub allow_real_time_tips: bool,
    pub tourist_type: Vec<String>,
    pub preferred_activities: Vec<String>,
    pub preferred_cuisines: Vec<String>,
    pub preferred_dining: Vec<String>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            email: email.into(),
            full_name: None,
            fcm_token: None,
            allow_smart_alerts: true,
            allow_opportunity_alerts: true,
            allow_real_time_tips: true,
            tourist_type: Vec::new(),
            preferred_activities: Vec::new(),
            preferred_cuisines: Vec::new(),
            preferred_dining: Vec::new(),
        }
    }

    /// Text query for the nearby-places search used by opportunity alerts.
    /// Falls back to a generic query when the user has no activity tags.
    pub fn opportunity_search_query(&self) -> String {
        if self.preferred_activities.is_empty() {
            "tourist_attraction".to_string()
        } else {
            self.preferred_activities.join(" OR ")
        }
    }
}

impl Entity<ID> for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
