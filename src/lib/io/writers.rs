use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::helpers::FRCMError;
use crate::models::input::{WeatherData, WEATHER_CSV_HEADER};
use crate::models::output::{FireRiskPrediction, FIRE_RISK_CSV_HEADER};

pub fn write_weather_csv(data: &WeatherData, path: impl AsRef<Path>) -> Result<(), FRCMError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", WEATHER_CSV_HEADER)?;
    for point in data.iter() {
        writeln!(writer, "{}", point.csv_line())?;
    }
    writer.flush()?;
    debug!("Wrote {} observations to {}", data.len(), path.display());
    Ok(())
}

pub fn write_prediction_csv(
    prediction: &FireRiskPrediction,
    path: impl AsRef<Path>,
) -> Result<(), FRCMError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", FIRE_RISK_CSV_HEADER)?;
    for risk in prediction.iter() {
        writeln!(writer, "{}", risk.csv_line())?;
    }
    writer.flush()?;
    debug!("Wrote {} fire risks to {}", prediction.len(), path.display());
    Ok(())
}
