use std::fs::{self, File};
use std::io::{self, BufRead};
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::helpers::FRCMError;
use crate::models::input::{parse_timestamp, WeatherData, WeatherDataPoint, WEATHER_CSV_HEADER};
use crate::modules::frcm::config::SimulationParameters;

/// Read a weather CSV file: a `timestamp,temperature,humidity,wind_speed`
/// header followed by one observation per line. Blank lines are skipped.
pub fn read_weather_csv(path: impl AsRef<Path>) -> Result<WeatherData, FRCMError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = io::BufReader::new(file);
    let data = parse_weather_lines(reader.lines())
        .map_err(|err| match err {
            FRCMError::Parse(msg) => FRCMError::Parse(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
    debug!("Read {} observations from {}", data.len(), path.display());
    Ok(data)
}

pub fn parse_weather_csv(text: &str) -> Result<WeatherData, FRCMError> {
    parse_weather_lines(text.lines().map(|line| Ok(line.to_string())))
}

fn parse_weather_lines<I>(lines: I) -> Result<WeatherData, FRCMError>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut data = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        let line = line.trim();
        if i == 0 {
            let header = line.trim_start_matches('\u{feff}');
            if !header.eq_ignore_ascii_case(WEATHER_CSV_HEADER) {
                return Err(FRCMError::Parse(format!(
                    "unexpected header '{}', expected '{}'",
                    line, WEATHER_CSV_HEADER
                )));
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }
        let point = WeatherDataPoint::from_csv_line(line).map_err(|err| match err {
            FRCMError::Parse(msg) => FRCMError::Parse(format!("line {}: {}", i + 1, msg)),
            other => other,
        })?;
        data.push(point);
    }
    Ok(WeatherData::new(data))
}

/// Convert a MET-style forecast payload
/// (`properties.timeseries[].{time, data.instant.details}`) into weather data.
///
/// Wind speed defaults to 0 when absent; temperature and humidity are mandatory.
pub fn weather_from_met_json(payload: &Value) -> Result<WeatherData, FRCMError> {
    let timeseries = payload
        .pointer("/properties/timeseries")
        .and_then(Value::as_array)
        .ok_or_else(|| FRCMError::Parse("missing properties.timeseries array".into()))?;

    timeseries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let time = entry
                .get("time")
                .and_then(Value::as_str)
                .ok_or_else(|| FRCMError::Parse(format!("timeseries[{i}]: missing time")))?;
            let details = entry
                .pointer("/data/instant/details")
                .ok_or_else(|| FRCMError::Parse(format!("timeseries[{i}]: missing details")))?;
            let mandatory = |key: &str| {
                details.get(key).and_then(Value::as_f64).ok_or_else(|| {
                    FRCMError::Parse(format!("timeseries[{i}]: missing {key}"))
                })
            };

            Ok(WeatherDataPoint::new(
                parse_timestamp(time)?,
                mandatory("air_temperature")?,
                mandatory("relative_humidity")?,
                details
                    .get("wind_speed")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
            ))
        })
        .collect()
}

pub fn read_parameters(path: impl AsRef<Path>) -> Result<SimulationParameters, FRCMError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    debug!("Loading simulation parameters from {}", path.display());
    SimulationParameters::from_yaml_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn parse_weather_csv_skips_header_and_blank_lines() {
        let text = "timestamp,temperature,humidity,wind_speed\n\
                    2024-01-01T00:00:00+00:00,20,50,5\n\
                    \n\
                    2024-01-01T01:00:00+00:00,25,40,10\n";
        let data = parse_weather_csv(text).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.data[1].temperature, 25.0);
        assert_eq!(
            data.data[1].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap()
        );
    }

    #[test]
    fn parse_weather_csv_header_only_is_empty() {
        let data = parse_weather_csv("timestamp,temperature,humidity,wind_speed\n").unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn parse_weather_csv_reports_line_number() {
        let text = "timestamp,temperature,humidity,wind_speed\n\
                    2024-01-01T00:00:00+00:00,20,50,5\n\
                    2024-01-01T01:00:00+00:00,25,40\n";
        match parse_weather_csv(text).unwrap_err() {
            FRCMError::Parse(msg) => assert!(msg.starts_with("line 3")),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn parse_weather_csv_accepts_bom_and_header_case() {
        let text = "\u{feff}Timestamp,Temperature,Humidity,Wind_Speed\n\
                    2024-01-01T00:00:00+00:00,20,50,5\n";
        let data = parse_weather_csv(text).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.data[0].temperature, 20.0);
    }

    #[test]
    fn parse_weather_csv_rejects_unknown_header() {
        assert!(parse_weather_csv("time,t,rh,ws\n").is_err());
    }

    #[test]
    fn met_json_defaults_wind_speed_only() {
        let payload = json!({
            "properties": {"timeseries": [
                {"time": "2024-05-01T12:00:00Z",
                 "data": {"instant": {"details": {"air_temperature": 11.2, "relative_humidity": 63.0}}}},
                {"time": "2024-05-01T13:00:00Z",
                 "data": {"instant": {"details": {"air_temperature": 12.0, "relative_humidity": 58.5, "wind_speed": 3.4}}}}
            ]}
        });
        let data = weather_from_met_json(&payload).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.data[0].wind_speed, 0.0);
        assert_eq!(data.data[1].wind_speed, 3.4);
        assert_eq!(data.data[0].humidity, 63.0);
    }

    #[test]
    fn met_json_requires_temperature_and_humidity() {
        let payload = json!({
            "properties": {"timeseries": [
                {"time": "2024-05-01T12:00:00Z",
                 "data": {"instant": {"details": {"relative_humidity": 63.0}}}}
            ]}
        });
        match weather_from_met_json(&payload).unwrap_err() {
            FRCMError::Parse(msg) => assert!(msg.contains("air_temperature")),
            other => panic!("unexpected error {other}"),
        }
    }
}
