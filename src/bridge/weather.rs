use super::types::{ReportLocation, WeatherReport};
use crate::{
    Error, Result,
    config::BridgeConfig,
    tool::{CurrentWeather, WeatherCondition},
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    current_weather: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature: f64,
    windspeed: f64,
    weathercode: u32,
}

/// Geocodes a city and reads its current conditions from upstream providers.
pub struct WeatherService {
    client: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherService {
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    pub async fn get_weather(&self, city: &str) -> Result<WeatherReport> {
        let (lat, lon) = self.geocode(city).await?;
        debug!("Geocoded {} to ({}, {})", city, lat, lon);

        let forecast: Forecast = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current_weather", "true".to_string()),
                ("temperature_unit", "celsius".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let current = forecast.current_weather;
        Ok(WeatherReport {
            location: ReportLocation {
                name: city.to_string(),
                lat,
                lon,
            },
            current: CurrentWeather {
                temp_c: current.temperature,
                wind_kph: current.windspeed,
                condition: WeatherCondition {
                    text: describe_weather_code(current.weathercode).to_string(),
                },
            },
        })
    }

    async fn geocode(&self, city: &str) -> Result<(f64, f64)> {
        let places: Vec<Place> = self
            .client
            .get(&self.geocoding_url)
            .query(&[("format", "json"), ("q", city)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| Error::bridge("City not found"))?;

        let lat = place
            .lat
            .parse()
            .map_err(|_| Error::bridge(format!("Invalid latitude '{}'", place.lat)))?;
        let lon = place
            .lon
            .parse()
            .map_err(|_| Error::bridge(format!("Invalid longitude '{}'", place.lon)))?;

        Ok((lat, lon))
    }
}

/// WMO weather interpretation code to text.
pub fn describe_weather_code(code: u32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        _ => "Unknown",
    }
}
