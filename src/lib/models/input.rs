use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use itertools::Itertools;
use serde_derive::{Deserialize, Serialize};

use crate::helpers::FRCMError;
use crate::io::{readers, writers};

pub const WEATHER_CSV_HEADER: &str = "timestamp,temperature,humidity,wind_speed";

const WEATHER_CSV_FIELDS: usize = 4;

/// naive timestamps (no offset) are read as UTC
const NAIVE_TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A single outdoor weather observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherDataPoint {
    pub timestamp: DateTime<Utc>,
    /// air temperature [°C]
    pub temperature: f64,
    /// relative humidity [%]
    pub humidity: f64,
    /// wind speed [m/s]
    pub wind_speed: f64,
}

impl WeatherDataPoint {
    pub fn new(timestamp: DateTime<Utc>, temperature: f64, humidity: f64, wind_speed: f64) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
            wind_speed,
        }
    }

    pub fn csv_header() -> &'static str {
        WEATHER_CSV_HEADER
    }

    pub fn csv_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.timestamp.to_rfc3339(),
            self.temperature,
            self.humidity,
            self.wind_speed
        )
    }

    /// Parse one CSV row. Any field count other than four is rejected.
    pub fn from_csv_line(line: &str) -> Result<Self, FRCMError> {
        let fields = line.trim().split(',').collect_vec();
        if fields.len() != WEATHER_CSV_FIELDS {
            return Err(FRCMError::Parse(format!(
                "line '{}' has {} fields, expected <timestamp:datetime,temperature:float,humidity:float,wind_speed:float>",
                line.trim(),
                fields.len()
            )));
        }
        let timestamp = parse_timestamp(fields[0])?;
        let temperature = parse_float(fields[1], "temperature")?;
        let humidity = parse_float(fields[2], "humidity")?;
        let wind_speed = parse_float(fields[3], "wind_speed")?;

        Ok(Self::new(timestamp, temperature, humidity, wind_speed))
    }

    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite() && self.humidity.is_finite() && self.wind_speed.is_finite()
    }
}

/// Ordered (ascending by timestamp) weather series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub data: Vec<WeatherDataPoint>,
}

impl WeatherData {
    pub fn new(data: Vec<WeatherDataPoint>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherDataPoint> {
        self.data.iter()
    }

    pub fn to_json(&self) -> Result<String, FRCMError> {
        serde_json::to_string(self)
            .map_err(|err| FRCMError::Parse(format!("could not serialize weather data: {err}")))
    }

    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self, FRCMError> {
        readers::read_weather_csv(path)
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), FRCMError> {
        writers::write_weather_csv(self, path)
    }
}

impl FromIterator<WeatherDataPoint> for WeatherData {
    fn from_iter<I: IntoIterator<Item = WeatherDataPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, FRCMError> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|date| DateTime::from_naive_utc_and_offset(date, Utc))
        .ok_or_else(|| FRCMError::Parse(format!("could not parse timestamp '{}'", value)))
}

fn parse_float(value: &str, name: &str) -> Result<f64, FRCMError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|err| FRCMError::Parse(format!("invalid {} '{}': {err}", name, value.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    #[test]
    fn csv_line_round_trip() {
        let point = WeatherDataPoint::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap(),
            -3.7,
            87.2,
            4.1,
        );
        let parsed = WeatherDataPoint::from_csv_line(&point.csv_line()).unwrap();
        assert_eq!(parsed.timestamp, point.timestamp);
        assert_relative_eq!(parsed.temperature, point.temperature, epsilon = 1e-12);
        assert_relative_eq!(parsed.humidity, point.humidity, epsilon = 1e-12);
        assert_relative_eq!(parsed.wind_speed, point.wind_speed, epsilon = 1e-12);
    }

    #[test]
    fn from_csv_line_rejects_wrong_field_count() {
        let err = WeatherDataPoint::from_csv_line("2024-01-15T06:00:00+00:00,1.0,50.0").unwrap_err();
        match err {
            FRCMError::Parse(msg) => assert!(msg.contains("wind_speed:float")),
            other => panic!("unexpected error {other}"),
        }
        assert!(WeatherDataPoint::from_csv_line("2024-01-15T06:00:00Z,1,2,3,4").is_err());
    }

    #[test]
    fn from_csv_line_rejects_bad_numbers() {
        assert!(WeatherDataPoint::from_csv_line("2024-01-15T06:00:00Z,warm,50,3").is_err());
    }

    #[test]
    fn parse_timestamp_accepts_offsets_and_naive() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-15T06:00:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-15T07:00:00+01:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-15T06:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-15 06:00:00").unwrap(), expected);
        assert!(parse_timestamp("15/01/2024").is_err());
    }

    #[test]
    fn to_json_contains_fields() {
        let data: WeatherData = vec![WeatherDataPoint::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap(),
            1.5,
            60.0,
            2.0,
        )]
        .into_iter()
        .collect();
        let json = data.to_json().unwrap();
        assert!(json.contains("\"temperature\":1.5"));
        assert!(json.contains("\"humidity\":60.0"));
    }
}
