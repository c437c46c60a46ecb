//! Pure display derivation: icon theme, label formatters, and the
//! [`DashboardView`] view model consumed by the renderer.
//!
//! Everything here is synchronous and total: unknown icon keys resolve to the
//! default entry, and formatters return an empty string instead of failing.

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

use crate::model::{DayForecast, HourForecast, RequestState, UnitSystem, WeatherSnapshot};

/// The hourly grid shows at most one day of hours.
pub const MAX_HOURLY_ENTRIES: usize = 24;

/// The week tab shows at most seven days.
pub const MAX_WEEKLY_ENTRIES: usize = 7;

/// Display assets for one condition category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconAssets {
    pub icon_url: String,
    pub background_url: String,
}

/// Injectable mapping from provider icon keys to display assets.
///
/// The default entry is a dedicated field rather than a map key, so
/// [`IconTheme::resolve`] can never miss.
#[derive(Debug, Clone)]
pub struct IconTheme {
    entries: HashMap<String, IconAssets>,
    default: IconAssets,
}

impl IconTheme {
    pub fn new(entries: HashMap<String, IconAssets>, default: IconAssets) -> Self {
        Self { entries, default }
    }

    /// Look up assets for a provider icon key; unknown or empty keys get the
    /// default entry.
    pub fn resolve(&self, key: &str) -> &IconAssets {
        self.entries.get(key).unwrap_or(&self.default)
    }

    pub fn default_assets(&self) -> &IconAssets {
        &self.default
    }

    /// The stock asset set shipped with the dashboard.
    pub fn builtin() -> Self {
        fn assets(icon_url: &str, background_url: &str) -> IconAssets {
            IconAssets { icon_url: icon_url.into(), background_url: background_url.into() }
        }

        let mut entries = HashMap::new();
        entries.insert(
            "partly-cloudy-day".into(),
            assets("https://i.ibb.co/PZQXH8V/27.png", "https://i.ibb.co/qNv7NxZ/pc.webp"),
        );
        entries.insert(
            "partly-cloudy-night".into(),
            assets("https://i.ibb.co/Kzkk59k/15.png", "https://i.ibb.co/RDfPqXz/pcn.jpg"),
        );
        entries.insert(
            "rain".into(),
            assets("https://i.ibb.co/kBd2NTS/39.png", "https://i.ibb.co/h2p6Yhd/rain.webp"),
        );
        entries.insert(
            "clear-day".into(),
            assets("https://i.ibb.co/rb4rrJL/26.png", "https://i.ibb.co/WGry01m/cd.jpg"),
        );
        entries.insert(
            "clear-night".into(),
            assets("https://i.ibb.co/1nxNGHL/10.png", "https://i.ibb.co/kqtZ1Gx/cn.jpg"),
        );

        let default = assets("https://i.ibb.co/rb4rrJL/26.png", "https://i.ibb.co/qNv7NxZ/pc.webp");
        Self::new(entries, default)
    }
}

impl Default for IconTheme {
    fn default() -> Self {
        Self::builtin()
    }
}

/// First day's hours, truncated to [`MAX_HOURLY_ENTRIES`].
pub fn hourly_forecast(snapshot: &WeatherSnapshot) -> &[HourForecast] {
    match snapshot.days.first() {
        Some(day) => {
            let len = day.hours.len().min(MAX_HOURLY_ENTRIES);
            &day.hours[..len]
        }
        None => &[],
    }
}

/// At most the next [`MAX_WEEKLY_ENTRIES`] days.
pub fn weekly_forecast(snapshot: &WeatherSnapshot) -> &[DayForecast] {
    let len = snapshot.days.len().min(MAX_WEEKLY_ENTRIES);
    &snapshot.days[..len]
}

/// Hour and minute parsed from `HH:MM[:SS]`, optionally carrying a trailing
/// meridiem so re-formatting an already-formatted label is a no-op.
fn parse_clock(time: &str) -> Option<(u32, u32)> {
    let trimmed = time.trim();

    let (body, meridiem) = if let Some(rest) =
        trimmed.strip_suffix("AM").or_else(|| trimmed.strip_suffix("am"))
    {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = trimmed.strip_suffix("PM").or_else(|| trimmed.strip_suffix("pm")) {
        (rest.trim_end(), Some(true))
    } else {
        (trimmed, None)
    };

    let mut parts = body.split(':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    if minute > 59 {
        return None;
    }

    let hour = match meridiem {
        Some(true) if hour == 12 => 12,
        Some(true) => hour.checked_add(12)?,
        Some(false) if hour == 12 => 0,
        _ => hour,
    };

    (hour < 24).then_some((hour, minute))
}

fn twelve_hour(hour: u32) -> (u32, bool) {
    let is_pm = hour >= 12;
    let h = hour % 12;
    (if h == 0 { 12 } else { h }, is_pm)
}

/// `"14:00"` → `"02:00 PM"`. The hourly grid is hour-aligned, so minutes are
/// normalized to `:00`. Empty or malformed input yields `""`.
pub fn format_hour_label(time: &str) -> String {
    match parse_clock(time) {
        Some((hour, _)) => {
            let (h12, is_pm) = twelve_hour(hour);
            format!("{:02}:00 {}", h12, if is_pm { "PM" } else { "AM" })
        }
        None => String::new(),
    }
}

/// `"06:05"` → `"06:05 am"`: minutes kept, lowercase suffix, zero-padded
/// hour. Empty or malformed input yields `""`.
pub fn format_clock_label(time: &str) -> String {
    match parse_clock(time) {
        Some((hour, minute)) => {
            let (h12, is_pm) = twelve_hour(hour);
            format!("{:02}:{:02} {}", h12, minute, if is_pm { "pm" } else { "am" })
        }
        None => String::new(),
    }
}

/// `"2024-01-15"` → `"Monday"` (full English weekday). Empty or malformed
/// input yields `""`.
pub fn format_day_label(date: &str) -> String {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%A").to_string())
        .unwrap_or_default()
}

/// Which forecast grid the main panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Today,
    Week,
}

/// Overall render mode derived from [`RequestState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// Nothing fetched yet; prompt the user to search.
    Prompt,
    Loading,
    Error(String),
    Ready,
}

/// One cell of the forecast grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    /// `"02:00 PM"` on the today tab, `"Monday"` on the week tab.
    pub label: String,
    pub icon_url: String,
    pub temp_label: String,
}

/// Left-hand summary panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    pub icon_url: String,
    pub temp_label: String,
    /// e.g. `"Monday, January 15"`.
    pub date_label: String,
    /// Weekday plus wall-clock time, e.g. `"Monday, 02:15 pm"`.
    pub clock_label: String,
    pub conditions: String,
    pub precip_label: String,
    pub location: String,
}

/// "Today's Highlights" panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlights {
    pub uv_index: String,
    pub wind_value: String,
    pub wind_unit: &'static str,
    pub sunrise: String,
    pub sunset: String,
    pub humidity: String,
    pub visibility: String,
}

/// Presentation-ready values for the whole dashboard, decoupled from any
/// particular rendering technology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub background_url: String,
    pub status: ViewStatus,
    pub sidebar: Option<Sidebar>,
    pub cards: Vec<ForecastCard>,
    pub highlights: Option<Highlights>,
}

impl DashboardView {
    /// Derive the view model. `now` is injected so the header date and clock
    /// labels are testable. `queried_city` backs the location line when no
    /// address resolved.
    pub fn build(
        state: &RequestState,
        tab: Tab,
        units: UnitSystem,
        theme: &IconTheme,
        now: NaiveDateTime,
        queried_city: &str,
    ) -> Self {
        let snapshot = state.snapshot();

        let current_icon = snapshot.map(|s| s.current.icon.as_str()).unwrap_or_default();
        let background_url = theme.resolve(current_icon).background_url.clone();

        let status = match state {
            RequestState::Idle => ViewStatus::Prompt,
            RequestState::Loading => ViewStatus::Loading,
            RequestState::Failed(message) => ViewStatus::Error(message.clone()),
            RequestState::Succeeded(_) => ViewStatus::Ready,
        };

        let (sidebar, cards, highlights) = match snapshot {
            Some(s) => (
                Some(build_sidebar(s, units, theme, now, queried_city)),
                build_cards(s, tab, units, theme),
                Some(build_highlights(s, units)),
            ),
            None => (None, Vec::new(), None),
        };

        Self { background_url, status, sidebar, cards, highlights }
    }
}

fn temp_label(temp: f64, units: UnitSystem) -> String {
    format!("{}{}", temp.round(), units.temp_suffix())
}

fn build_sidebar(
    snapshot: &WeatherSnapshot,
    units: UnitSystem,
    theme: &IconTheme,
    now: NaiveDateTime,
    queried_city: &str,
) -> Sidebar {
    let today = snapshot.days.first();

    let location = if snapshot.resolved_address.trim().is_empty() {
        queried_city.to_string()
    } else {
        snapshot.resolved_address.clone()
    };

    Sidebar {
        icon_url: theme.resolve(&snapshot.current.icon).icon_url.clone(),
        temp_label: temp_label(snapshot.current.temp, units),
        date_label: now.format("%A, %B %-d").to_string(),
        clock_label: format!(
            "{}, {}",
            now.format("%A"),
            format_clock_label(&now.format("%H:%M").to_string())
        ),
        conditions: snapshot.current.conditions.clone(),
        precip_label: format!("Perc - {}%", today.map(|d| d.precip_prob).unwrap_or(0.0)),
        location,
    }
}

fn build_cards(
    snapshot: &WeatherSnapshot,
    tab: Tab,
    units: UnitSystem,
    theme: &IconTheme,
) -> Vec<ForecastCard> {
    match tab {
        Tab::Today => hourly_forecast(snapshot)
            .iter()
            .map(|hour| ForecastCard {
                label: format_hour_label(&hour.time),
                icon_url: theme.resolve(&hour.icon).icon_url.clone(),
                temp_label: temp_label(hour.temp, units),
            })
            .collect(),
        Tab::Week => weekly_forecast(snapshot)
            .iter()
            .map(|day| ForecastCard {
                label: format_day_label(&day.date),
                icon_url: theme.resolve(&day.icon).icon_url.clone(),
                temp_label: temp_label(day.temp, units),
            })
            .collect(),
    }
}

fn build_highlights(snapshot: &WeatherSnapshot, units: UnitSystem) -> Highlights {
    let today = snapshot.days.first();

    Highlights {
        uv_index: today.map(|d| d.uv_index.to_string()).unwrap_or_default(),
        wind_value: snapshot.current.windspeed.round().to_string(),
        wind_unit: units.wind_suffix(),
        sunrise: today.map(|d| format_clock_label(&d.sunrise)).unwrap_or_default(),
        sunset: today.map(|d| format_clock_label(&d.sunset)).unwrap_or_default(),
        humidity: format!("{}%", snapshot.current.humidity.round()),
        visibility: snapshot.current.visibility.to_string(),
    }
}
