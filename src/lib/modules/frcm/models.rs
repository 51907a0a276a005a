use chrono::{DateTime, Utc};
use itertools::Itertools;
use log::{debug, trace, warn};
use ndarray::Array1;
use rayon::prelude::*;

use crate::{
    helpers::FRCMError,
    models::{
        input::{WeatherData, WeatherDataPoint},
        output::{FireRisk, FireRiskPrediction},
    },
    modules::functions::{
        actual_water_concentration, equilibrium_fmc, saturation_vapor_pressure,
        saturation_water_concentration,
    },
};

use super::{
    config::SimulationParameters,
    functions::{
        advance_layers, air_change_rate, concentration_delta, next_indoor_concentration,
        supply_term, surface_concentration, ventilation_factor, ventilation_inflow, wall_exchange_flux,
        wall_rh,
    },
};

/// Outdoor conditions driving one integration step
#[derive(Debug, Clone, Copy)]
pub struct Forcing {
    /// air temperature [°C]
    pub temperature: f64,
    /// relative humidity [%]
    pub humidity: f64,
}

impl Forcing {
    /// Linear interpolation between two observations, `frac` in [0, 1]
    pub fn interpolate(from: &WeatherDataPoint, to: &WeatherDataPoint, frac: f64) -> Self {
        Self {
            temperature: from.temperature + frac * (to.temperature - from.temperature),
            humidity: from.humidity + frac * (to.humidity - from.humidity),
        }
    }
}

// STATE
/// Panel moisture profile and indoor climate of one simulation run.
///
/// Owned by a single `compute` call. `layers` holds the water concentration
/// of each panel layer [kg/m3], layer 0 facing the room. `scratch` is the
/// write buffer of the next step, swapped in after every update.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub time: DateTime<Utc>,
    pub layers: Array1<f64>,
    scratch: Array1<f64>,
    /// indoor water concentration [kg/m3]
    pub cw_in: f64,
    /// relative humidity at the panel surface [-], from the latest profile
    pub rh_wall: f64,
    /// saturation water concentration at the indoor temperature [kg/m3]
    cwsat_in: f64,
}

impl SimulationState {
    /// Seed the state from the first observation.
    ///
    /// The indoor air starts from the configured initial RH or, when absent,
    /// from the first outdoor reading carried indoors. The panel starts
    /// uniformly at the equilibrium moisture of that indoor RH.
    pub fn new(first: &WeatherDataPoint, params: &SimulationParameters) -> Result<Self, FRCMError> {
        let cwsat_in = indoor_saturation(params);

        let rh_in = match params.initial_indoor_rh {
            Some(rh) => rh,
            None => {
                let cwsat_out = saturation_water_concentration(
                    saturation_vapor_pressure(first.temperature),
                    first.temperature,
                    params.molar_mass,
                    params.gas_constant,
                );
                let cw_out = actual_water_concentration(first.humidity, cwsat_out);
                ventilation_inflow(1.0, cw_out, first.temperature, params.temp_indoor) / cwsat_in
            }
        };
        if !rh_in.is_finite() {
            return Err(FRCMError::Computation(format!(
                "non-finite initial indoor humidity at {}",
                first.timestamp
            )));
        }
        // indoor air cannot start above saturation
        let rh_in = rh_in.clamp(0.0, 1.0);

        let fmc = equilibrium_fmc(rh_in);
        let layers = Array1::from_elem(params.n_layers, fmc * params.rho_wood);
        let rh_wall = wall_rh(surface_concentration(layers[0], layers[1]), params.rho_wood);
        debug!(
            "Initial indoor RH {:.3}, panel FMC {:.4}, wall RH {:.3}",
            rh_in, fmc, rh_wall
        );

        Ok(Self {
            time: first.timestamp,
            scratch: Array1::zeros(params.n_layers),
            layers,
            cw_in: rh_in * cwsat_in,
            rh_wall,
            cwsat_in,
        })
    }

    /// indoor relative humidity [-]
    pub fn rh_in(&self) -> f64 {
        self.cw_in / self.cwsat_in
    }

    /// extrapolated surface water concentration [kg/m3]
    pub fn surface(&self) -> f64 {
        surface_concentration(self.layers[0], self.layers[1])
    }

    /// surface fuel moisture content [-]
    pub fn surface_fmc(&self, params: &SimulationParameters) -> f64 {
        self.surface() / params.rho_wood
    }

    /// Advance indoor air and panel by one step `dt` [s].
    ///
    /// Both updates read the state of the previous step: the panel boundary
    /// uses the previous indoor RH and wall RH.
    pub fn update(&mut self, forcing: &Forcing, dt: f64, params: &SimulationParameters) {
        let temp_in = params.temp_indoor;

        // outdoor air
        let cwsat_out = saturation_water_concentration(
            saturation_vapor_pressure(forcing.temperature),
            forcing.temperature,
            params.molar_mass,
            params.gas_constant,
        );
        let cw_out = actual_water_concentration(forcing.humidity, cwsat_out);

        // ventilation
        let ach = air_change_rate(forcing.temperature, temp_in, params.ventilation_gamma);
        let beta = ventilation_factor(ach, dt);

        // indoor air
        let rh_in = self.rh_in();
        let delta_c = concentration_delta(rh_in, self.rh_wall, self.cwsat_in);
        let wall_flux = wall_exchange_flux(delta_c, dt, params);
        let inflow = ventilation_inflow(beta, cw_out, forcing.temperature, temp_in);
        let supply = supply_term(params.moisture_supply, dt, params.volume);
        let cw_in = next_indoor_concentration(beta, self.cw_in, inflow, wall_flux, supply);

        // panel
        advance_layers(
            &self.layers,
            &mut self.scratch,
            rh_in,
            self.rh_wall,
            self.cwsat_in,
            dt,
            params,
        );
        std::mem::swap(&mut self.layers, &mut self.scratch);

        self.cw_in = cw_in;
        self.rh_wall = wall_rh(self.surface(), params.rho_wood);
    }

    pub fn is_finite(&self) -> bool {
        self.cw_in.is_finite() && self.rh_wall.is_finite() && self.layers.iter().all(|c| c.is_finite())
    }

    pub fn output(&self, params: &SimulationParameters) -> FireRisk {
        FireRisk {
            timestamp: self.time,
            ttf: params.ttf(self.surface_fmc(params)),
        }
    }
}

fn indoor_saturation(params: &SimulationParameters) -> f64 {
    saturation_water_concentration(
        saturation_vapor_pressure(params.temp_indoor),
        params.temp_indoor,
        params.molar_mass,
        params.gas_constant,
    )
}

/// Reject inputs no simulation step should see
fn check_input(weather: &WeatherData) -> Result<(), FRCMError> {
    if weather.is_empty() {
        return Err(FRCMError::Precondition("weather data contains no observations".into()));
    }
    if let Some(point) = weather.iter().find(|p| !p.is_finite()) {
        return Err(FRCMError::Computation(format!(
            "non-finite weather observation at {}",
            point.timestamp
        )));
    }
    if let Some((prev, next)) = weather
        .iter()
        .tuple_windows()
        .find(|(prev, next)| next.timestamp <= prev.timestamp)
    {
        return Err(FRCMError::Precondition(format!(
            "weather data must be strictly ascending in time: {} follows {}",
            next.timestamp, prev.timestamp
        )));
    }
    Ok(())
}

/// Integrate the interval between two observations in equal sub-steps no
/// longer than `delta_t`, interpolating the forcing linearly.
fn simulate_interval(
    state: &mut SimulationState,
    from: &WeatherDataPoint,
    to: &WeatherDataPoint,
    params: &SimulationParameters,
) -> Result<(), FRCMError> {
    let interval = (to.timestamp - from.timestamp).num_milliseconds() as f64 / 1000.0;
    let n_steps = (interval / params.delta_t).ceil().max(1.0) as usize;
    let dt = interval / n_steps as f64;
    trace!("{} -> {}: {} steps of {:.1} s", from.timestamp, to.timestamp, n_steps, dt);

    for step in 1..=n_steps {
        let forcing = Forcing::interpolate(from, to, step as f64 / n_steps as f64);
        state.update(&forcing, dt, params);
        if !state.is_finite() {
            return Err(FRCMError::Computation(format!(
                "simulation diverged between {} and {} (step {} of {})",
                from.timestamp, to.timestamp, step, n_steps
            )));
        }
    }
    state.time = to.timestamp;
    Ok(())
}

/// Compute one time-to-flashover estimate per observation.
///
/// The first estimate reflects the seeded initial state; every following
/// one is taken after simulating the interval that ends at its observation.
/// Fails without running any step when the series is empty or not ascending,
/// or when the parameters are invalid.
pub fn compute(
    weather: &WeatherData,
    params: &SimulationParameters,
) -> Result<FireRiskPrediction, FRCMError> {
    check_input(weather)?;
    params.validate()?;

    let first = &weather.data[0];
    debug!(
        "Computing fire risk for {} observations from {} ({} layers, dt {} s, ttf model {})",
        weather.len(),
        first.timestamp,
        params.n_layers,
        params.delta_t,
        params.ttf_model
    );

    let mut state = SimulationState::new(first, params)?;
    let mut firerisks = Vec::with_capacity(weather.len());
    firerisks.push(checked_output(&state, params)?);

    for (from, to) in weather.iter().tuple_windows() {
        simulate_interval(&mut state, from, to, params)?;
        let risk = checked_output(&state, params)?;
        trace!(
            "{}: indoor RH {:.3}, surface FMC {:.4}, ttf {:.2}",
            risk.timestamp,
            state.rh_in(),
            state.surface_fmc(params),
            risk.ttf
        );
        firerisks.push(risk);
    }

    Ok(FireRiskPrediction::new(firerisks))
}

fn checked_output(state: &SimulationState, params: &SimulationParameters) -> Result<FireRisk, FRCMError> {
    let risk = state.output(params);
    if !risk.ttf.is_finite() || risk.ttf < 0.0 {
        return Err(FRCMError::Computation(format!(
            "invalid time to flashover {} at {}",
            risk.ttf, risk.timestamp
        )));
    }
    Ok(risk)
}

/// Run independent simulations (e.g. one per zone) in parallel.
///
/// A failing series is logged and reported in its own slot; the others are
/// unaffected.
pub fn compute_batch(
    series: &[WeatherData],
    params: &SimulationParameters,
) -> Vec<Result<FireRiskPrediction, FRCMError>> {
    series
        .par_iter()
        .enumerate()
        .map(|(i, weather)| {
            let result = compute(weather, params);
            if let Err(err) = &result {
                warn!("Fire risk computation failed for series {}: {}", i, err);
            }
            result
        })
        .collect()
}
