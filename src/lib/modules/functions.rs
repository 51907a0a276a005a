use crate::constants::*;

// PSYCHROMETRIC FUNCTIONS

/// Saturation vapour pressure [Pa] (Magnus-Tetens)
pub fn saturation_vapor_pressure(
    temperature: f64, // air temperature [°C]
) -> f64 {
    PWSAT_A * f64::exp((PWSAT_B * temperature) / (temperature + PWSAT_C))
}

/// Saturation water concentration [kg/m3] from the ideal gas law
pub fn saturation_water_concentration(
    pwsat: f64,        // saturation vapour pressure [Pa]
    temperature: f64,  // air temperature [°C]
    molar_mass: f64,   // molar mass of water [kg/mol]
    gas_constant: f64, // [J/(mol K)]
) -> f64 {
    (pwsat * molar_mass) / (gas_constant * (temperature + KELVIN_OFFSET))
}

/// Actual water concentration [kg/m3]
pub fn actual_water_concentration(
    humidity: f64, // relative humidity [%]
    cwsat: f64,    // saturation water concentration [kg/m3]
) -> f64 {
    humidity / 100.0 * cwsat
}

/// Equilibrium fuel moisture content [-] of wood for a relative humidity
/// given as a fraction (0.35, not 35)
pub fn equilibrium_fmc(rh: f64) -> f64 {
    FMC_C0 + FMC_C1 * rh + FMC_C2 * rh.powi(2) + FMC_C3 * rh.powi(3) + FMC_C4 * rh.powi(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn saturation_vapor_pressure_is_increasing() {
        let mut previous = saturation_vapor_pressure(-40.0);
        for i in -399..=500 {
            let t = i as f64 / 10.0;
            let current = saturation_vapor_pressure(t);
            assert!(current > previous, "not increasing at {t}");
            previous = current;
        }
    }

    #[test]
    fn saturation_vapor_pressure_reference_values() {
        assert_relative_eq!(saturation_vapor_pressure(0.0), 610.78, epsilon = 1e-9);
        // tabulated values: 2339 Pa at 20 °C, 5629 Pa at 35 °C
        assert_relative_eq!(saturation_vapor_pressure(20.0), 2339.0, max_relative = 1e-2);
        assert_relative_eq!(saturation_vapor_pressure(35.0), 5629.0, max_relative = 1.5e-2);
    }

    #[test]
    fn saturation_water_concentration_matches_ideal_gas() {
        // rho_v = p M / (R T), reference densities of saturated vapour
        for (t, expected) in [(0.0, 0.004841), (20.0, 0.017178), (35.0, 0.039180)] {
            let pwsat = saturation_vapor_pressure(t);
            let cwsat = saturation_water_concentration(pwsat, t, MOLAR_MASS_WATER, GAS_CONSTANT);
            let reference = pwsat * MOLAR_MASS_WATER / (GAS_CONSTANT * (t + KELVIN_OFFSET));
            assert_relative_eq!(cwsat, reference, max_relative = 1e-12);
            assert_relative_eq!(cwsat, expected, max_relative = 1e-3);
        }
    }

    #[test]
    fn actual_water_concentration_scales_with_percent() {
        assert_relative_eq!(actual_water_concentration(50.0, 0.0173), 0.00865, epsilon = 1e-12);
        assert_eq!(actual_water_concentration(0.0, 0.0173), 0.0);
    }

    #[test]
    fn equilibrium_fmc_known_points() {
        assert_relative_eq!(equilibrium_fmc(0.0), 0.0017, epsilon = 1e-12);
        assert_relative_eq!(equilibrium_fmc(0.5), 0.092175, epsilon = 1e-9);
        assert!(equilibrium_fmc(0.2) < equilibrium_fmc(0.5));
        assert!(equilibrium_fmc(0.5) < equilibrium_fmc(0.9));
    }
}
