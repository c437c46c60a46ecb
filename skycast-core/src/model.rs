use serde::{Deserialize, Serialize};

/// Measurement system selected by the user.
///
/// Display suffixes and the provider's `unitGroup` vocabulary are derived
/// from this enum alone, never from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn toggle(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    /// Value of the provider's `unitGroup` query parameter.
    pub fn provider_param(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "us",
        }
    }

    pub fn temp_suffix(self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn wind_suffix(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }
}

/// A fetchable (city, units) pair.
///
/// Construction trims the city, and a whitespace-only city never becomes a
/// `Query`, so every fetch carries a usable location.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    city: String,
    units: UnitSystem,
}

impl Query {
    pub fn new(city: &str, units: UnitSystem) -> Option<Self> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }
        Some(Self { city: city.to_string(), units })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Same units, new city. `None` if the city is empty after trimming.
    pub fn with_city(&self, city: &str) -> Option<Self> {
        Query::new(city, self.units)
    }

    /// Same city, new units.
    pub fn with_units(&self, units: UnitSystem) -> Self {
        Self { city: self.city.clone(), units }
    }
}

/// The complete parsed result of one successful fetch. Replaced wholesale on
/// every success, dropped on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub resolved_address: String,
    pub current: CurrentConditions,
    pub days: Vec<DayForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp: f64,
    pub conditions: String,
    pub humidity: f64,
    pub windspeed: f64,
    pub visibility: f64,
    pub icon: String,
}

/// One forecast day. Dates and times are kept as the provider's strings
/// (`YYYY-MM-DD`, `HH:MM[:SS]`); the view formatters parse them and degrade
/// to an empty label on bad input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: String,
    pub icon: String,
    pub temp: f64,
    pub precip_prob: f64,
    pub uv_index: f64,
    pub sunrise: String,
    pub sunset: String,
    pub hours: Vec<HourForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourForecast {
    pub time: String,
    pub icon: String,
    pub temp: f64,
}

/// Lifecycle of the single fetch cell. Exactly one variant holds at a time:
/// entering `Loading` drops a prior error, success drops a prior error, and
/// failure drops a prior snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(WeatherSnapshot),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            RequestState::Succeeded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_system_maps_to_provider_vocabulary() {
        assert_eq!(UnitSystem::Metric.provider_param(), "metric");
        assert_eq!(UnitSystem::Imperial.provider_param(), "us");
    }

    #[test]
    fn unit_system_suffixes() {
        assert_eq!(UnitSystem::Metric.temp_suffix(), "°C");
        assert_eq!(UnitSystem::Imperial.temp_suffix(), "°F");
        assert_eq!(UnitSystem::Metric.wind_suffix(), "km/h");
        assert_eq!(UnitSystem::Imperial.wind_suffix(), "mph");
    }

    #[test]
    fn unit_system_toggle_roundtrips() {
        assert_eq!(UnitSystem::Metric.toggle(), UnitSystem::Imperial);
        assert_eq!(UnitSystem::Metric.toggle().toggle(), UnitSystem::Metric);
    }

    #[test]
    fn query_trims_city() {
        let query = Query::new("  Theni  ", UnitSystem::Metric).expect("non-empty city");
        assert_eq!(query.city(), "Theni");
    }

    #[test]
    fn query_rejects_whitespace_only_city() {
        assert!(Query::new("   ", UnitSystem::Metric).is_none());
        assert!(Query::new("", UnitSystem::Imperial).is_none());
    }

    #[test]
    fn with_units_keeps_city() {
        let query = Query::new("Kyiv", UnitSystem::Metric).unwrap();
        let switched = query.with_units(UnitSystem::Imperial);
        assert_eq!(switched.city(), "Kyiv");
        assert_eq!(switched.units(), UnitSystem::Imperial);
    }

    #[test]
    fn request_state_accessors() {
        assert!(RequestState::Loading.is_loading());
        assert!(RequestState::Idle.snapshot().is_none());
        assert_eq!(RequestState::Failed("oops".into()).error(), Some("oops"));
    }
}
