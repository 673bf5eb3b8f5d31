//! Application service: one function per chat action.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::{
    menu::{
        Action, Command, Screen, ABOUT_BUTTONS, ABOUT_TEXT, HELP_TEXT, MAIN_MENU_BUTTONS,
        REGIONAL_DETAIL_BUTTONS, REPORT_BUTTONS, STATION_DETAIL_BUTTONS, WELCOME_TEXT,
    },
    ports::AirQualitySource,
    report::{render_comparison_report, render_regional_detail, render_station_detail},
};

/// Stateless: every data screen re-fetches from the source.
#[derive(Clone)]
pub struct AirQualityService {
    source: Arc<dyn AirQualitySource>,
    stations: Vec<String>,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl AirQualityService {
    pub fn new(source: Arc<dyn AirQualitySource>, stations: Vec<String>) -> Self {
        Self {
            source,
            stations,
            clock: local_now,
        }
    }

    /// Replace the report timestamp source.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn start(&self) -> Screen {
        Screen::new(WELCOME_TEXT, &MAIN_MENU_BUTTONS)
    }

    pub fn help(&self) -> Screen {
        Screen::new(HELP_TEXT, &[])
    }

    pub fn about(&self) -> Screen {
        Screen::new(ABOUT_TEXT, &ABOUT_BUTTONS)
    }

    /// Jakarta vs Singapore report. Both sources are queried concurrently.
    pub async fn comparison(&self) -> Screen {
        let (stations, regional) = tokio::join!(
            self.source.fetch_city_stations(&self.stations),
            self.source.fetch_regional_index()
        );
        let stations = stations.unwrap_or_default();
        tracing::debug!(
            stations = stations.len(),
            regional = regional.is_some(),
            "rendering comparison report"
        );

        let text = render_comparison_report(&stations, regional.as_ref(), (self.clock)());
        Screen::new(text, &REPORT_BUTTONS)
    }

    pub async fn station_detail(&self) -> Screen {
        let stations = self
            .source
            .fetch_city_stations(&self.stations)
            .await
            .unwrap_or_default();
        Screen::new(render_station_detail(&stations), &STATION_DETAIL_BUTTONS)
    }

    pub async fn regional_detail(&self) -> Screen {
        let regional = self.source.fetch_regional_index().await;
        Screen::new(
            render_regional_detail(regional.as_ref()),
            &REGIONAL_DETAIL_BUTTONS,
        )
    }

    pub async fn handle_action(&self, action: Action) -> Screen {
        match action {
            Action::CheckAqi => self.comparison().await,
            Action::AboutAqi => self.about(),
            Action::DetailedAqi => self.station_detail().await,
            Action::SgDetails => self.regional_detail().await,
            Action::BackToMenu => self.start(),
        }
    }

    pub async fn handle_command(&self, command: Command) -> Screen {
        match command {
            Command::Start => self.start(),
            Command::Air => self.comparison().await,
            Command::Help => self.help(),
        }
    }
}
