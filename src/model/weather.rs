use serde::Deserialize;

use crate::{celsius_to_fahrenheit, one_decimal, DisplayColor, DisplaySettings};

const KMH_TO_MPH: f64 = 0.621_371;

/// Raw outdoor measurements as delivered by a weather source, always metric.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub temperature_celsius: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub carbon_dioxide_ppm: Option<f64>,
    pub icon: Option<String>,
    #[serde(default)]
    pub rain: bool,
    #[serde(default)]
    pub rain_data: String,
}

/// Display-ready weather strings shown next to the home. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature: String,
    pub wind_speed: String,
    pub humidity: String,
    pub carbon_dioxide_level: String,
    pub icon: String,
    pub icon_tint: DisplayColor,
    pub rain: bool,
    pub rain_data: String,
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self {
            temperature: String::new(),
            wind_speed: String::new(),
            humidity: String::new(),
            carbon_dioxide_level: String::new(),
            icon: "sparkles".to_owned(),
            icon_tint: DisplayColor::LightGray,
            rain: false,
            rain_data: String::new(),
        }
    }
}

impl WeatherSnapshot {
    /// Replaces the display strings with the formatted `reading`.
    /// Missing measurements blank their field instead of keeping a stale value.
    pub fn update_from(&mut self, reading: &WeatherReading, settings: &DisplaySettings) {
        self.temperature = reading
            .temperature_celsius
            .map(|c| {
                if settings.imperial_units {
                    format!("{} °F", one_decimal(celsius_to_fahrenheit(c)))
                } else {
                    format!("{} °C", one_decimal(c))
                }
            })
            .unwrap_or_default();
        self.wind_speed = reading
            .wind_speed_kmh
            .map(|kmh| {
                if settings.imperial_units {
                    format!("{} mph", one_decimal(kmh * KMH_TO_MPH))
                } else {
                    format!("{} km/h", one_decimal(kmh))
                }
            })
            .unwrap_or_default();
        self.humidity = reading
            .humidity_percent
            .map(|h| format!("{} %", one_decimal(h)))
            .unwrap_or_default();
        self.carbon_dioxide_level = reading
            .carbon_dioxide_ppm
            .map(|ppm| format!("{} ppm", one_decimal(ppm)))
            .unwrap_or_default();
        if let Some(icon) = &reading.icon {
            self.icon = icon.clone();
        }
        self.rain = reading.rain;
        self.rain_data = reading.rain_data.clone();
        log::trace!("Weather updated: {} {}", self.temperature, self.wind_speed);
    }
}
