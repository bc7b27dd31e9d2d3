use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wayfarer_domain::{
    ForecastHour, GeoPoint, Itinerary, PlaceCandidate, ScheduleItem, User,
};
use wayfarer_infra::{
    IDirectionsApi, IPlacesApi, IScheduleItemRepo, ISys, IWeatherApi, IPushGateway,
    WayfarerContext,
};

/// Sat 2021-06-12 10:00:00 UTC
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 6, 12, 10, 0, 0).unwrap()
}

pub fn test_date(s: &str) -> NaiveDate {
    s.parse().expect("Valid date")
}

pub struct StaticSys(pub DateTime<Utc>);

impl ISys for StaticSys {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct SentPush {
    pub token: String,
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct RecordingPushGateway {
    sent: Arc<Mutex<Vec<SentPush>>>,
}

impl RecordingPushGateway {
    pub fn sent(&self) -> Vec<SentPush> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IPushGateway for RecordingPushGateway {
    async fn send(&self, token: &str, title: &str, body: &str, data: HashMap<String, String>) {
        self.sent.lock().unwrap().push(SentPush {
            token: token.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            data,
        });
    }
}

#[derive(Clone, Default)]
pub struct FakeDirectionsApi {
    travel_time: Arc<Mutex<Option<i64>>>,
}

impl FakeDirectionsApi {
    /// `None` simulates an unreachable or unconfigured directions service
    pub fn set_travel_time(&self, travel_time_secs: Option<i64>) {
        *self.travel_time.lock().unwrap() = travel_time_secs;
    }
}

#[async_trait::async_trait]
impl IDirectionsApi for FakeDirectionsApi {
    async fn travel_time_secs(&self, _origin: &GeoPoint, _place_id: &str) -> Option<i64> {
        *self.travel_time.lock().unwrap()
    }
}

#[derive(Clone, Default)]
pub struct FakePlacesApi {
    coordinates: Arc<Mutex<Option<GeoPoint>>>,
    search_results: Arc<Mutex<Vec<PlaceCandidate>>>,
}

impl FakePlacesApi {
    pub fn set_coordinates(&self, coordinates: Option<GeoPoint>) {
        *self.coordinates.lock().unwrap() = coordinates;
    }

    pub fn set_search_results(&self, results: Vec<PlaceCandidate>) {
        *self.search_results.lock().unwrap() = results;
    }
}

#[async_trait::async_trait]
impl IPlacesApi for FakePlacesApi {
    async fn place_coordinates(&self, _place_id: &str) -> Option<GeoPoint> {
        *self.coordinates.lock().unwrap()
    }

    async fn text_search(
        &self,
        _query: &str,
        _location: &GeoPoint,
        _radius_m: u32,
    ) -> Vec<PlaceCandidate> {
        self.search_results.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
pub struct FakeWeatherApi {
    forecast: Arc<Mutex<Option<Vec<ForecastHour>>>>,
}

impl FakeWeatherApi {
    pub fn set_forecast(&self, forecast: Option<Vec<ForecastHour>>) {
        *self.forecast.lock().unwrap() = forecast;
    }
}

#[async_trait::async_trait]
impl IWeatherApi for FakeWeatherApi {
    async fn hourly_forecast(&self, _location: &GeoPoint) -> Option<Vec<ForecastHour>> {
        self.forecast.lock().unwrap().clone()
    }
}

/// Delegates to an in-memory repo but fails the departure-alert scan,
/// for exercising cycle-level failure isolation.
pub struct FailingScheduleItemRepo {
    inner: wayfarer_infra::Repos,
}

impl FailingScheduleItemRepo {
    pub fn wrapping(repos: wayfarer_infra::Repos) -> Self {
        Self { inner: repos }
    }
}

#[async_trait::async_trait]
impl IScheduleItemRepo for FailingScheduleItemRepo {
    async fn insert(&self, item: &ScheduleItem) -> anyhow::Result<()> {
        self.inner.schedule_items.insert(item).await
    }

    async fn find(&self, item_id: &wayfarer_domain::ID) -> Option<ScheduleItem> {
        self.inner.schedule_items.find(item_id).await
    }

    async fn find_by_itinerary(
        &self,
        itinerary_id: &wayfarer_domain::ID,
    ) -> anyhow::Result<Vec<ScheduleItem>> {
        self.inner.schedule_items.find_by_itinerary(itinerary_id).await
    }

    async fn find_by_date(&self, date: NaiveDate) -> anyhow::Result<Vec<ScheduleItem>> {
        self.inner.schedule_items.find_by_date(date).await
    }

    async fn find_unnotified_by_date(
        &self,
        _date: NaiveDate,
    ) -> anyhow::Result<Vec<ScheduleItem>> {
        Err(anyhow::anyhow!("Simulated storage failure"))
    }

    async fn mark_notification_sent(&self, item_id: &wayfarer_domain::ID) -> anyhow::Result<()> {
        self.inner.schedule_items.mark_notification_sent(item_id).await
    }

    async fn delete(&self, item_id: &wayfarer_domain::ID) -> Option<ScheduleItem> {
        self.inner.schedule_items.delete(item_id).await
    }
}

pub struct TestCtx {
    pub ctx: WayfarerContext,
    pub push: RecordingPushGateway,
    pub directions: FakeDirectionsApi,
    pub places: FakePlacesApi,
    pub weather: FakeWeatherApi,
}

pub fn setup_context(now: DateTime<Utc>) -> TestCtx {
    let mut ctx = WayfarerContext::create_inmemory();
    let push = RecordingPushGateway::default();
    let directions = FakeDirectionsApi::default();
    let places = FakePlacesApi::default();
    let weather = FakeWeatherApi::default();

    ctx.sys = Arc::new(StaticSys(now));
    ctx.services.push = Arc::new(push.clone());
    ctx.services.directions = Arc::new(directions.clone());
    ctx.services.places = Arc::new(places.clone());
    ctx.services.weather = Arc::new(weather.clone());

    TestCtx {
        ctx,
        push,
        directions,
        places,
        weather,
    }
}

pub struct TripFixtures {
    pub user: User,
    pub trip: Itinerary,
}

/// A user with a push token and all opt-ins enabled, on a trip whose
/// window covers `test_now()`
pub async fn insert_user_with_trip(ctx: &WayfarerContext) -> TripFixtures {
    let mut user = User::new("mia@example.com");
    user.fcm_token = Some("ExponentPushToken[test]".to_string());
    ctx.repos.users.insert(&user).await.expect("To insert user");

    let trip = Itinerary::new(
        user.id.clone(),
        "Paris",
        "mid",
        test_date("2021-06-10"),
        test_date("2021-06-14"),
    );
    ctx.repos
        .itineraries
        .insert(&trip)
        .await
        .expect("To insert itinerary");

    TripFixtures { user, trip }
}

pub async fn insert_item(
    ctx: &WayfarerContext,
    fixtures: &TripFixtures,
    place_id: &str,
    place_name: &str,
    scheduled_time: &str,
) -> ScheduleItem {
    insert_item_with_type(
        ctx,
        fixtures,
        place_id,
        place_name,
        Some("museum".to_string()),
        scheduled_time,
    )
    .await
}

pub async fn insert_item_with_type(
    ctx: &WayfarerContext,
    fixtures: &TripFixtures,
    place_id: &str,
    place_name: &str,
    place_type: Option<String>,
    scheduled_time: &str,
) -> ScheduleItem {
    let item = ScheduleItem::new(
        &fixtures.trip,
        place_id,
        place_name,
        place_type,
        test_date("2021-06-12"),
        scheduled_time,
        60,
    )
    .expect("Valid schedule item");
    ctx.repos
        .schedule_items
        .insert(&item)
        .await
        .expect("To insert schedule item");
    item
}

pub fn place(place_id: &str, name: &str, rating: Option<f64>) -> PlaceCandidate {
    PlaceCandidate {
        place_id: place_id.to_string(),
        name: name.to_string(),
        rating,
        types: Vec::new(),
    }
}

pub fn forecast_hour(time: DateTime<Utc>, description: &str) -> ForecastHour {
    ForecastHour {
        date_time: time,
        description: description.to_string(),
    }
}
