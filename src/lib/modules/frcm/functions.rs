use ndarray::Array1;

use crate::constants::*;
use crate::models::output::RiskCategory;

use super::config::SimulationParameters;

// VENTILATION MODULE

/// Air changes per hour [1/h] driven by the indoor/outdoor temperature difference
/// (stack effect). Zero when the two temperatures are equal.
pub fn air_change_rate(
    temp_out: f64, // outdoor temperature [°C]
    temp_in: f64,  // indoor temperature [°C]
    gamma: f64,    // calibration constant
) -> f64 {
    let t_out = temp_out + KELVIN_OFFSET;
    let t_in = temp_in + KELVIN_OFFSET;
    gamma * f64::sqrt(f64::abs(1.0 / t_out - 1.0 / t_in) / t_out)
}

/// Fraction of the indoor air replaced within one step `dt` [s]
pub fn ventilation_factor(ach: f64, dt: f64) -> f64 {
    1.0 - f64::exp(-ach * dt / SECONDS_PER_HOUR)
}

// INDOOR CLIMATE MODULE

/// Relative humidity [-] at the panel surface for a surface water
/// concentration [kg/m3]; inverse of the equilibrium FMC curve
pub fn wall_rh(surface: f64, rho_wood: f64) -> f64 {
    let fmc = surface / rho_wood;
    RHWALL_C0 + RHWALL_C1 * fmc + RHWALL_C2 * fmc.powi(2) + RHWALL_C3 * fmc.powi(3) + RHWALL_C4 * fmc.powi(4)
}

/// Water concentration difference [kg/m3] between the wall boundary layer and
/// the bulk indoor air
pub fn concentration_delta(rh_in: f64, rh_wall: f64, cwsat_in: f64) -> f64 {
    (rh_wall - rh_in) * cwsat_in
}

/// Change of indoor water concentration [kg/m3] from exchange with the panels
/// over one step `dt` [s]
pub fn wall_exchange_flux(delta_c: f64, dt: f64, params: &SimulationParameters) -> f64 {
    (params.area_exposed * params.d_water_air * delta_c * dt / params.boundary_layer) / params.volume
}

/// Water concentration [kg/m3] carried in by ventilation air, rescaled from the
/// outdoor to the indoor temperature
pub fn ventilation_inflow(beta: f64, cw_out: f64, temp_out: f64, temp_in: f64) -> f64 {
    beta * cw_out * ((temp_out + KELVIN_OFFSET) / (temp_in + KELVIN_OFFSET))
}

/// Water concentration [kg/m3] injected by a moisture source [kg/s] over one step `dt` [s]
pub fn supply_term(supply_rate: f64, dt: f64, volume: f64) -> f64 {
    supply_rate * dt / volume
}

/// Single-zone mass balance for the indoor water concentration [kg/m3]
pub fn next_indoor_concentration(
    beta: f64,
    cw_in: f64,
    inflow: f64,
    wall_flux: f64,
    supply: f64,
) -> f64 {
    (1.0 - beta) * cw_in + inflow + wall_flux + supply
}

// PANEL DIFFUSION MODULE

/// Layer facing the room: boundary flux from the indoor air plus exchange with layer 1
pub fn update_inner_layer(
    c0: f64,
    c1: f64,
    rh_in: f64,
    rh_wall: f64,
    cwsat_in: f64,
    dt: f64,
    params: &SimulationParameters,
) -> f64 {
    let boundary_flux = (params.d_water_air / params.boundary_layer) * (rh_in - rh_wall) * cwsat_in;
    let internal_flux = (params.d_water_wood / params.delta_x) * (c1 - c0);
    c0 + (dt / params.delta_x) * (boundary_flux + internal_flux)
}

/// Second order central difference
pub fn update_middle_layer(c: f64, c_prev: f64, c_next: f64, fourier: f64) -> f64 {
    c + fourier * (c_prev - 2.0 * c + c_next)
}

/// Backside layer, insulated
pub fn update_outer_layer(c: f64, c_prev: f64, fourier: f64) -> f64 {
    c + fourier * (c_prev - c)
}

/// Advance the whole layer profile by one step, reading `layers` and writing
/// `next`. Both arrays must have the same length (at least 2).
pub fn advance_layers(
    layers: &Array1<f64>,
    next: &mut Array1<f64>,
    rh_in: f64,
    rh_wall: f64,
    cwsat_in: f64,
    dt: f64,
    params: &SimulationParameters,
) {
    let n = layers.len();
    let fourier = params.fourier(dt);

    next[0] = update_inner_layer(layers[0], layers[1], rh_in, rh_wall, cwsat_in, dt, params);
    for i in 1..n - 1 {
        next[i] = update_middle_layer(layers[i], layers[i - 1], layers[i + 1], fourier);
    }
    next[n - 1] = update_outer_layer(layers[n - 1], layers[n - 2], fourier);
}

/// Linear extrapolation of the first two layers to the panel surface
pub fn surface_concentration(c0: f64, c1: f64) -> f64 {
    c0 - 0.5 * (c1 - c0)
}

// TIME TO FLASHOVER MODULE

/// Exponential time to flashover [min] for a fuel moisture content [-]
pub fn ttf_exponential(fmc: f64, a: f64, b: f64) -> f64 {
    a * f64::exp(b * fmc * 100.0)
}

/// Risk score in [0, 100] (100 = extreme) and category for a time to
/// flashover [min]. The score is piecewise linear between the category
/// breakpoints, rounded to one decimal.
pub fn risk_score(ttf: f64) -> (f64, RiskCategory) {
    if ttf <= 0.0 {
        return (100.0, RiskCategory::Extreme);
    }
    let (score, category) = if ttf < TTF_EXTREME {
        (100.0 - (ttf / TTF_EXTREME) * 20.0, RiskCategory::Extreme)
    } else if ttf < TTF_HIGH {
        (
            80.0 - ((ttf - TTF_EXTREME) / (TTF_HIGH - TTF_EXTREME)) * 20.0,
            RiskCategory::High,
        )
    } else if ttf < TTF_MODERATE {
        (
            60.0 - ((ttf - TTF_HIGH) / (TTF_MODERATE - TTF_HIGH)) * 30.0,
            RiskCategory::Moderate,
        )
    } else {
        // decays to 0 at twice the moderate breakpoint
        (
            f64::max(0.0, 30.0 - ((ttf - TTF_MODERATE) / TTF_MODERATE) * 30.0),
            RiskCategory::Low,
        )
    };
    ((score * 10.0).round() / 10.0, category)
}
