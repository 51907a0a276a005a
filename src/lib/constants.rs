/// offset between degrees Celsius and Kelvin
pub const KELVIN_OFFSET: f64 = 273.15;
/// seconds in one hour, used to convert air changes per hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// MAGNUS-TETENS SATURATION VAPOUR PRESSURE
pub const PWSAT_A: f64 = 610.78; // [Pa]
pub const PWSAT_B: f64 = 17.2694;
pub const PWSAT_C: f64 = 238.3; // [°C]

// EQUILIBRIUM FMC POLYNOMIAL (RH fraction -> FMC fraction)
pub const FMC_C0: f64 = 0.0017;
pub const FMC_C1: f64 = 0.2524;
pub const FMC_C2: f64 = -0.1986;
pub const FMC_C3: f64 = 0.0279;
pub const FMC_C4: f64 = 0.167;

// WALL RH POLYNOMIAL (FMC fraction -> RH fraction)
pub const RHWALL_C0: f64 = 0.0698;
pub const RHWALL_C1: f64 = -1.258;
pub const RHWALL_C2: f64 = 125.35;
pub const RHWALL_C3: f64 = -809.43;
pub const RHWALL_C4: f64 = 1583.8;

// DEFAULT SIMULATION PARAMETERS
pub const MOLAR_MASS_WATER: f64 = 0.018; // [kg/mol]
pub const GAS_CONSTANT: f64 = 8.314; // [J/(mol K)]
pub const RHO_WOOD: f64 = 510.0; // [kg/m3]
pub const D_WATER_AIR: f64 = 2.5e-5; // [m2/s]
pub const D_WATER_WOOD: f64 = 1.0e-10; // [m2/s]
pub const BOUNDARY_LAYER: f64 = 0.004; // [m]
pub const DELTA_X: f64 = 0.001; // [m]
pub const N_LAYERS: usize = 10;
pub const DELTA_T: f64 = 30.0; // [s]
pub const VOLUME: f64 = 50.0; // [m3]
pub const AREA_EXPOSED: f64 = 65.0; // [m2]
pub const VENTILATION_GAMMA: f64 = 500.0;
pub const TEMP_INDOOR: f64 = 20.0; // [°C]
pub const MOISTURE_SUPPLY: f64 = 0.0; // [kg/s]

// explicit scheme stability bound
pub const MAX_FOURIER: f64 = 0.5;

// DEFAULT TTF (exponential) COEFFICIENTS
pub const TTF_A: f64 = 2.0; // [min]
pub const TTF_B: f64 = 0.16; // [1/%]

// RISK SCORE TTF BREAKPOINTS [min]
pub const TTF_EXTREME: f64 = 5.0;
pub const TTF_HIGH: f64 = 15.0;
pub const TTF_MODERATE: f64 = 30.0;
