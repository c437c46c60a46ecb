//! Text rendering of the derived dashboard view.
//!
//! The renderer only consumes [`DashboardView`]; all formatting decisions
//! (labels, units, truncation) were already made by the deriver.

use skycast_core::Tab;
use skycast_core::view::{DashboardView, ViewStatus};

pub fn render_dashboard(view: &DashboardView, tab: Tab) -> String {
    let mut out = String::new();

    match &view.status {
        ViewStatus::Prompt => {
            out.push_str("Search a city to begin.\n");
            return out;
        }
        ViewStatus::Loading => {
            out.push_str("Loading weather...\n");
            return out;
        }
        ViewStatus::Error(message) => {
            out.push_str(message);
            out.push('\n');
            return out;
        }
        ViewStatus::Ready => {}
    }

    if let Some(sidebar) = &view.sidebar {
        out.push_str(&sidebar.location);
        out.push('\n');
        out.push_str(&format!("{}  {}\n", sidebar.temp_label, sidebar.conditions));
        out.push_str(&format!("{} ({})\n", sidebar.date_label, sidebar.clock_label));
        out.push_str(&sidebar.precip_label);
        out.push_str("\n\n");
    }

    let heading = match tab {
        Tab::Today => "Today",
        Tab::Week => "Week",
    };
    out.push_str(heading);
    out.push('\n');
    for card in &view.cards {
        out.push_str(&format!("  {:<12} {}\n", card.label, card.temp_label));
    }

    if let Some(h) = &view.highlights {
        out.push_str("\nToday's Highlights\n");
        out.push_str(&format!("  UV Index:   {}\n", h.uv_index));
        out.push_str(&format!("  Wind:       {} {}\n", h.wind_value, h.wind_unit));
        out.push_str(&format!("  Sunrise:    {}\n", h.sunrise));
        out.push_str(&format!("  Sunset:     {}\n", h.sunset));
        out.push_str(&format!("  Humidity:   {}\n", h.humidity));
        out.push_str(&format!("  Visibility: {}\n", h.visibility));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use skycast_core::model::{CurrentConditions, DayForecast, HourForecast};
    use skycast_core::view::IconTheme;
    use skycast_core::{RequestState, UnitSystem, WeatherSnapshot};

    fn sample_state() -> RequestState {
        RequestState::Succeeded(WeatherSnapshot {
            resolved_address: "Oslo, Norway".into(),
            current: CurrentConditions {
                temp: -3.2,
                conditions: "Snow".into(),
                humidity: 88.0,
                windspeed: 7.4,
                visibility: 4.1,
                icon: "snow".into(),
            },
            days: vec![DayForecast {
                date: "2024-01-15".into(),
                icon: "snow".into(),
                temp: -2.0,
                precip_prob: 90.0,
                uv_index: 1.0,
                sunrise: "09:12:00".into(),
                sunset: "15:40:00".into(),
                hours: vec![HourForecast {
                    time: "13:00:00".into(),
                    icon: "snow".into(),
                    temp: -1.5,
                }],
            }],
        })
    }

    fn noon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn renders_ready_dashboard() {
        let theme = IconTheme::builtin();
        let view = DashboardView::build(
            &sample_state(),
            Tab::Today,
            UnitSystem::Metric,
            &theme,
            noon(),
            "Oslo",
        );

        let text = render_dashboard(&view, Tab::Today);
        assert!(text.contains("Oslo, Norway"));
        assert!(text.contains("-3°C  Snow"));
        assert!(text.contains("01:00 PM"));
        assert!(text.contains("Sunrise:    09:12 am"));
        assert!(text.contains("Humidity:   88%"));
    }

    #[test]
    fn renders_error_message_only() {
        let theme = IconTheme::builtin();
        let state = RequestState::Failed("Could not load weather. Try another city.".into());
        let view =
            DashboardView::build(&state, Tab::Today, UnitSystem::Metric, &theme, noon(), "X");

        let text = render_dashboard(&view, Tab::Today);
        assert_eq!(text, "Could not load weather. Try another city.\n");
    }

    #[test]
    fn renders_prompt_when_idle() {
        let theme = IconTheme::builtin();
        let view = DashboardView::build(
            &RequestState::Idle,
            Tab::Week,
            UnitSystem::Metric,
            &theme,
            noon(),
            "Oslo",
        );

        let text = render_dashboard(&view, Tab::Week);
        assert_eq!(text, "Search a city to begin.\n");
    }
}
