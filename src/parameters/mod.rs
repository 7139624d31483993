//! Storage of the scalar physical parameters describing the nanowire
//!
//! The `ParameterStore` is a read-only mapping from parameter name to value. It is built once,
//! either from an in-memory collection or from a `.toml` file:
//!
//! ```toml
//! t0 = 1.0
//! N_D = 100
//! N_int = 2
//! Delta = 0.01
//! phase = 0.0
//! mu1 = 0.1
//! mu2 = 0.1
//! ```
//!
//! and then passed by reference to each stage of the calculation. The store performs no physical
//! validation: it only reports whether a key is present.

/// Deserialization of a `ParameterStore` from file
mod reader;

use crate::error::BuildError;
use nalgebra::RealField;
use std::collections::BTreeMap;
use std::fmt;

/// The parameters understood by the crate, and the keys they are stored under
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parameter {
    /// The tight-binding hopping amplitude `t0`
    HoppingEnergy,
    /// The number of discrete sites in the device `N_D`
    NumberOfSites,
    /// The dimension of the internal space at each site `N_int`
    InternalDimension,
    /// The superconducting order parameter `Delta`
    PairingPotential,
    /// The phase difference between the superconducting contacts
    Phase,
    /// The chemical potential in the source contact `mu1`
    SourceChemicalPotential,
    /// The chemical potential in the drain contact `mu2`
    DrainChemicalPotential,
}

impl Parameter {
    /// Every known parameter
    pub const ALL: [Parameter; 7] = [
        Parameter::HoppingEnergy,
        Parameter::NumberOfSites,
        Parameter::InternalDimension,
        Parameter::PairingPotential,
        Parameter::Phase,
        Parameter::SourceChemicalPotential,
        Parameter::DrainChemicalPotential,
    ];

    /// The key under which the parameter is stored
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::HoppingEnergy => "t0",
            Parameter::NumberOfSites => "N_D",
            Parameter::InternalDimension => "N_int",
            Parameter::PairingPotential => "Delta",
            Parameter::Phase => "phase",
            Parameter::SourceChemicalPotential => "mu1",
            Parameter::DrainChemicalPotential => "mu2",
        }
    }

    /// Find the parameter whose key matches `key`, ignoring ASCII case
    pub(crate) fn from_key_ignoring_case(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|parameter| parameter.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Clone, Debug, PartialEq)]
/// An immutable mapping from parameter name to value
pub struct ParameterStore<T> {
    values: BTreeMap<String, T>,
}

impl<T: Copy + RealField> ParameterStore<T> {
    /// Look up the value stored under `key`
    pub fn get(&self, key: &str) -> Result<T, BuildError> {
        self.values
            .get(key)
            .copied()
            .ok_or_else(|| BuildError::missing(key))
    }

    /// Look up a known parameter
    pub fn get_parameter(&self, parameter: Parameter) -> Result<T, BuildError> {
        self.get(parameter.key())
    }

    /// The superconducting order parameter `Delta`
    pub fn pairing_potential(&self) -> Result<T, BuildError> {
        self.get_parameter(Parameter::PairingPotential)
    }

    /// The phase difference between the two superconducting contacts
    pub fn phase(&self) -> Result<T, BuildError> {
        self.get_parameter(Parameter::Phase)
    }

    /// The chemical potentials in the (source, drain) contacts
    pub fn chemical_potentials(&self) -> Result<(T, T), BuildError> {
        Ok((
            self.get_parameter(Parameter::SourceChemicalPotential)?,
            self.get_parameter(Parameter::DrainChemicalPotential)?,
        ))
    }
}

impl<T> ParameterStore<T> {
    /// Whether a value is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The number of stored parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store holds no parameters
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the stored parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<T> From<BTreeMap<String, T>> for ParameterStore<T> {
    fn from(values: BTreeMap<String, T>) -> Self {
        Self { values }
    }
}

impl<T> FromIterator<(String, T)> for ParameterStore<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> FromIterator<(&'a str, T)> for ParameterStore<T> {
    fn from_iter<I: IntoIterator<Item = (&'a str, T)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::{Parameter, ParameterStore};
    use crate::error::BuildError;

    fn wire() -> ParameterStore<f64> {
        [
            ("t0", 1.0),
            ("N_D", 3.0),
            ("N_int", 2.0),
            ("Delta", 0.05),
            ("phase", std::f64::consts::FRAC_PI_2),
            ("mu1", 0.1),
            ("mu2", -0.1),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn stored_values_are_returned_by_key() {
        let store = wire();
        assert_eq!(store.get("t0").unwrap(), 1.0);
        assert_eq!(store.get_parameter(Parameter::NumberOfSites).unwrap(), 3.0);
        assert_eq!(store.len(), 7);
        assert!(store.contains("N_int"));
    }

    #[test]
    fn absent_key_is_reported_by_name() {
        let store: ParameterStore<f64> = [("t0", 1.0)].into_iter().collect();
        match store.get_parameter(Parameter::InternalDimension) {
            Err(BuildError::MissingParameter { key }) => assert_eq!(key, "N_int"),
            other => panic!("expected a missing parameter error, got {:?}", other),
        }
    }

    #[test]
    fn downstream_parameters_are_carried() {
        let store = wire();
        assert_eq!(store.pairing_potential().unwrap(), 0.05);
        assert_eq!(store.phase().unwrap(), std::f64::consts::FRAC_PI_2);
        assert_eq!(store.chemical_potentials().unwrap(), (0.1, -0.1));
    }

    #[test]
    fn chemical_potentials_require_both_contacts() {
        let store: ParameterStore<f64> = [("mu1", 0.1)].into_iter().collect();
        assert!(matches!(
            store.chemical_potentials(),
            Err(BuildError::MissingParameter { key }) if key == "mu2"
        ));
    }

    #[test]
    fn keys_are_matched_ignoring_case() {
        assert_eq!(
            Parameter::from_key_ignoring_case("n_d"),
            Some(Parameter::NumberOfSites)
        );
        assert_eq!(
            Parameter::from_key_ignoring_case("DELTA"),
            Some(Parameter::PairingPotential)
        );
        assert_eq!(Parameter::from_key_ignoring_case("temperature"), None);
    }
}
