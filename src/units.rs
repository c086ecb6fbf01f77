// Typed scalar quantities used for temperature lookups
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boltzmann constant in MeV per kelvin (CODATA 2010).
pub const BOLTZMANN_CONSTANT_MEV_PER_K: f64 = 8.617_332_478e-11;

/// Neutron rest mass in atomic mass units.
pub const NEUTRON_REST_MASS_AMU: f64 = 1.008_664_915_88;

/// An energy expressed in MeV.
///
/// Evaluation temperatures of nuclear data are stored as energies
/// (`k_B * T`); every temperature lookup in the registry is performed on this
/// MeV-valued key.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Energy(f64);

impl Energy {
    /// Create an energy from a value in MeV
    pub const fn from_mev(mev: f64) -> Self {
        Energy(mev)
    }

    /// Value in MeV
    #[inline]
    pub const fn mev(self) -> f64 {
        self.0
    }

    /// Temperature equivalent of this energy (`E / k_B`)
    #[inline]
    pub fn to_temperature(self) -> Temperature {
        Temperature(self.0 / BOLTZMANN_CONSTANT_MEV_PER_K)
    }

    /// Absolute difference between two energies in MeV
    #[inline]
    pub fn distance(self, other: Energy) -> f64 {
        (self.0 - other.0).abs()
    }

    /// True if the energy can denote an evaluation temperature: finite and
    /// not negative. Zero is allowed.
    #[inline]
    pub fn is_valid_temperature(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }

    /// True if both energies denote the same evaluation temperature.
    ///
    /// Conversions between kelvin and MeV are not exact in floating point, so
    /// two keys match when their relative difference is at most a few ulps.
    #[inline]
    pub fn matches(self, other: Energy) -> bool {
        const RELATIVE_TOLERANCE: f64 = 1e-12;
        const ABSOLUTE_FLOOR: f64 = 1e-300;
        let scale = self.0.abs().max(other.0.abs());
        self.distance(other) <= (scale * RELATIVE_TOLERANCE).max(ABSOLUTE_FLOOR)
    }
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:e} MeV", self.0)
    }
}

impl From<Temperature> for Energy {
    fn from(temperature: Temperature) -> Self {
        temperature.to_energy()
    }
}

/// A thermodynamic temperature expressed in kelvin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Temperature(f64);

impl Temperature {
    /// Create a temperature from a value in kelvin
    pub const fn from_kelvin(kelvin: f64) -> Self {
        Temperature(kelvin)
    }

    /// Value in kelvin
    #[inline]
    pub const fn kelvin(self) -> f64 {
        self.0
    }

    /// Energy equivalent of this temperature (`k_B * T`)
    #[inline]
    pub fn to_energy(self) -> Energy {
        Energy(self.0 * BOLTZMANN_CONSTANT_MEV_PER_K)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} K", self.0)
    }
}

impl From<Energy> for Temperature {
    fn from(energy: Energy) -> Self {
        energy.to_temperature()
    }
}
