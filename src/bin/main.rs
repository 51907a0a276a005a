use std::env::{set_var, var};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{error::ErrorKind, Parser};
use log::info;

use frcm::{compute, version::LONG_VERSION, FRCMError, SimulationParameters, WeatherData};

#[derive(Parser, Debug)]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Fire Risk Computation Model: time to flashover from a weather time series",
    long_about = "Simulates moisture transport between outdoor air, indoor air and the wooden panels of an enclosure, \
and estimates the time to flashover (in minutes, lower means higher risk) for every observation of the input series."
)]
struct Args {
    #[arg(
        required = true,
        help = "Path to the weather CSV file (timestamp,temperature,humidity,wind_speed)",
        index = 1
    )]
    input_path: PathBuf,

    #[arg(help = "Path of the fire risk CSV to write; printed to stdout when omitted", index = 2)]
    output_path: Option<PathBuf>,

    #[arg(short, long, help = "YAML file overriding the default simulation parameters")]
    config: Option<PathBuf>,
}

fn load_parameters(args: &Args) -> Result<SimulationParameters, FRCMError> {
    match &args.config {
        Some(path) => SimulationParameters::from_yaml_file(path),
        None => {
            let params = SimulationParameters::default();
            params.validate()?;
            Ok(params)
        }
    }
}

fn run(args: &Args) -> Result<(), FRCMError> {
    let params = load_parameters(args)?;

    let weather = WeatherData::read_csv(&args.input_path)?;
    if weather.is_empty() {
        return Err(FRCMError::Precondition(format!(
            "'{}' did not contain any data points, please check the input format",
            args.input_path.display()
        )));
    }

    info!(
        "Computing fire risk for '{}' ({} datapoints)",
        args.input_path.display(),
        weather.len()
    );
    let start_time = Utc::now();
    let prediction = compute(&weather, &params)?;
    info!(
        "Elapsed time: {} ms",
        (Utc::now() - start_time).num_milliseconds()
    );

    match &args.output_path {
        Some(output_path) => {
            prediction.write_csv(output_path)?;
            info!("Calculated fire risks written to '{}'", output_path.display());
        }
        None => println!("{}", prediction),
    }
    Ok(())
}

/// main function
fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                eprintln!(
                    "Wrong arguments provided! Please provide one reference to a CSV file with weather data \
to compute the fire risk, and optionally the path of the output CSV.\n\n{}",
                    err
                );
                return ExitCode::from(1);
            }
        },
    };

    if var("RUST_LOG").is_err() {
        set_var("RUST_LOG", "info")
    }
    pretty_env_logger::init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(1)
        }
    }
}
