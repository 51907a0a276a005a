use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::constants::*;
use crate::helpers::FRCMError;
use crate::io::readers;

use super::functions::ttf_exponential;

/// Sub-model mapping surface fuel moisture content to time to flashover
#[derive(
    Debug, Default, PartialEq, Eq, Hash, Copy, Clone, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TTFModel {
    /// `ttf = a * exp(b * FMC[%])` [min]
    #[default]
    Exponential,
}

/// Material, geometry and numerical constants of one simulation.
///
/// Never mutated during a run. Every field has a default, so a YAML file
/// only needs to list the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParameters {
    /// molar mass of water [kg/mol]
    pub molar_mass: f64,
    /// universal gas constant [J/(mol K)]
    pub gas_constant: f64,
    /// wood density [kg/m3]
    pub rho_wood: f64,
    /// diffusivity of water vapour in air [m2/s]
    pub d_water_air: f64,
    /// diffusivity of bound water in wood [m2/s]
    pub d_water_wood: f64,
    /// boundary layer thickness at the panel surface [m]
    pub boundary_layer: f64,
    /// layer thickness [m]
    pub delta_x: f64,
    /// number of panel layers, layer 0 faces the room
    pub n_layers: usize,
    /// maximum integration step [s]
    pub delta_t: f64,
    /// enclosure volume [m3]
    pub volume: f64,
    /// exposed panel area [m2]
    pub area_exposed: f64,
    /// stack-effect infiltration calibration constant
    pub ventilation_gamma: f64,
    /// indoor air temperature, held constant [°C]
    pub temp_indoor: f64,
    /// internal moisture supply [kg/s]
    pub moisture_supply: f64,
    /// indoor RH fraction used to seed the panel; derived from the first
    /// observation when absent
    pub initial_indoor_rh: Option<f64>,

    pub ttf_model: TTFModel,
    pub ttf_a: f64,
    pub ttf_b: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            molar_mass: MOLAR_MASS_WATER,
            gas_constant: GAS_CONSTANT,
            rho_wood: RHO_WOOD,
            d_water_air: D_WATER_AIR,
            d_water_wood: D_WATER_WOOD,
            boundary_layer: BOUNDARY_LAYER,
            delta_x: DELTA_X,
            n_layers: N_LAYERS,
            delta_t: DELTA_T,
            volume: VOLUME,
            area_exposed: AREA_EXPOSED,
            ventilation_gamma: VENTILATION_GAMMA,
            temp_indoor: TEMP_INDOOR,
            moisture_supply: MOISTURE_SUPPLY,
            initial_indoor_rh: None,
            ttf_model: TTFModel::default(),
            ttf_a: TTF_A,
            ttf_b: TTF_B,
        }
    }
}

impl SimulationParameters {
    pub fn from_yaml_str(contents: &str) -> Result<Self, FRCMError> {
        let params: SimulationParameters = serde_yaml::from_str(contents)
            .map_err(|err| FRCMError::Configuration(format!("error parsing parameters: {err}")))?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self, FRCMError> {
        readers::read_parameters(path)
    }

    /// Fourier number `D * dt / dx^2` of the bound-water diffusion for a step `dt` [s]
    pub fn fourier(&self, dt: f64) -> f64 {
        self.d_water_wood * dt / self.delta_x.powi(2)
    }

    /// Fraction of the indoor water concentration exchanged with the panels
    /// in one step `dt` [s]
    pub fn wall_exchange_number(&self, dt: f64) -> f64 {
        self.area_exposed * self.d_water_air * dt / (self.boundary_layer * self.volume)
    }

    /// Time to flashover [min] for a surface fuel moisture content [-]
    pub fn ttf(&self, fmc: f64) -> f64 {
        match self.ttf_model {
            TTFModel::Exponential => ttf_exponential(fmc, self.ttf_a, self.ttf_b),
        }
    }

    /// Check the parameters once, before any simulation step.
    ///
    /// The explicit scheme needs `Fo <= 0.5` in the panel and an air/panel
    /// exchange number not above 1. Integration sub-steps never exceed
    /// `delta_t`, so checking at `delta_t` bounds every step.
    pub fn validate(&self) -> Result<(), FRCMError> {
        let positive = [
            ("molar_mass", self.molar_mass),
            ("gas_constant", self.gas_constant),
            ("rho_wood", self.rho_wood),
            ("d_water_air", self.d_water_air),
            ("d_water_wood", self.d_water_wood),
            ("boundary_layer", self.boundary_layer),
            ("delta_x", self.delta_x),
            ("delta_t", self.delta_t),
            ("volume", self.volume),
            ("area_exposed", self.area_exposed),
            ("ttf_a", self.ttf_a),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(FRCMError::Configuration(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }
        let finite = [
            ("ventilation_gamma", self.ventilation_gamma),
            ("moisture_supply", self.moisture_supply),
            ("ttf_b", self.ttf_b),
        ];
        for (name, value) in finite {
            if !value.is_finite() || value < 0.0 {
                return Err(FRCMError::Configuration(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if self.n_layers < 2 {
            return Err(FRCMError::Configuration(format!(
                "n_layers must be at least 2, got {}",
                self.n_layers
            )));
        }
        if !self.temp_indoor.is_finite() || self.temp_indoor <= -KELVIN_OFFSET {
            return Err(FRCMError::Configuration(format!(
                "temp_indoor must be above absolute zero, got {}",
                self.temp_indoor
            )));
        }
        if let Some(rh) = self.initial_indoor_rh {
            if !(rh > 0.0 && rh <= 1.0) {
                return Err(FRCMError::Configuration(format!(
                    "initial_indoor_rh must be a fraction in (0, 1], got {}",
                    rh
                )));
            }
        }

        let fourier = self.fourier(self.delta_t);
        if fourier > MAX_FOURIER {
            return Err(FRCMError::Configuration(format!(
                "unstable panel diffusion: Fourier number {:.4} exceeds {} (reduce delta_t or increase delta_x)",
                fourier, MAX_FOURIER
            )));
        }
        let exchange = self.wall_exchange_number(self.delta_t);
        if exchange > 1.0 {
            return Err(FRCMError::Configuration(format!(
                "unstable indoor air update: wall exchange number {:.4} exceeds 1 (reduce delta_t)",
                exchange
            )));
        }
        Ok(())
    }
}
