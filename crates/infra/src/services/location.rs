use super::ICurrentLocationProvider;
use wayfarer_domain::{GeoPoint, User};

/// Stand-in until a real device location feed exists: every user is
/// assumed to be at a fixed coordinate.
pub struct FixedLocationProvider {
    location: GeoPoint,
}

impl FixedLocationProvider {
    pub fn new(location: GeoPoint) -> Self {
        Self { location }
    }
}

impl Default for FixedLocationProvider {
    fn default() -> Self {
        // Champ de Mars, Paris
        Self::new(GeoPoint::new(48.8584, 2.2945))
    }
}

impl ICurrentLocationProvider for FixedLocationProvider {
    fn current_location(&self, _user: &User) -> GeoPoint {
        self.location
    }
}
