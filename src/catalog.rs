//! Default widget catalog for a building kiosk.
//!
//! Used when a store has nothing recorded yet. Every widget starts enabled and
//! in the palette.

use kiosk_canvas::grid::GridDimensions;
use kiosk_canvas::widget::{Widget, WidgetCategory};
use serde_json::json;

use crate::store::WidgetConfig;

/// The stock widgets, in palette order.
#[must_use]
pub fn default_widgets() -> Vec<Widget> {
    let mut clock = Widget::new("clock", "Clock", WidgetCategory::Header);
    clock.settings = json!({ "format": "24h", "showDate": true });

    let mut weather = Widget::new("weather", "Weather", WidgetCategory::Sidebar);
    weather.settings = json!({ "units": "metric" });

    let mut ticker = Widget::new("ticker", "News Ticker", WidgetCategory::Footer);
    ticker.settings = json!({ "speed": "normal" });

    vec![
        clock,
        Widget::new("announcements", "Announcements", WidgetCategory::Main),
        Widget::new("maintenance", "Maintenance Notices", WidgetCategory::Main),
        Widget::new("events", "Upcoming Events", WidgetCategory::Main),
        Widget::new("votes", "Open Votes", WidgetCategory::Main),
        weather,
        Widget::new("transit", "Transit Departures", WidgetCategory::Sidebar),
        Widget::new("contacts", "Building Contacts", WidgetCategory::Sidebar),
        ticker,
    ]
}

/// Default catalog on the default grid.
#[must_use]
pub fn default_config() -> WidgetConfig {
    WidgetConfig { grid_size: GridDimensions::default(), widgets: default_widgets() }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
