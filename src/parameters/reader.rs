use super::{Parameter, ParameterStore};
use color_eyre::eyre::eyre;
use config::{Config, File};
use nalgebra::RealField;
use serde::de::DeserializeOwned;
use std::{collections::BTreeMap, path::PathBuf};

impl<T: DeserializeOwned + RealField> ParameterStore<T> {
    /// Deserialize a flat table of `name = value` pairs
    ///
    /// The `config` backend does not preserve the case of keys, so keys matching a known
    /// `Parameter` are restored to their canonical spelling. Unknown keys are kept as read.
    pub fn from_file(path: PathBuf) -> color_eyre::Result<Self> {
        let s = Config::builder().add_source(File::from(path)).build()?;
        let values: BTreeMap<String, T> = s
            .try_deserialize()
            .map_err(|e| eyre!("Failed to deserialize parameters: {:?}", e))?;

        Ok(values
            .into_iter()
            .map(|(key, value)| match Parameter::from_key_ignoring_case(&key) {
                Some(parameter) => (parameter.key().to_owned(), value),
                None => (key, value),
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::ParameterStore;
    use crate::parameters::Parameter;
    use std::io::Write;

    #[test]
    fn parameters_are_read_from_toml() {
        let path = std::env::temp_dir()
            .join(format!("nanowire_parameters_{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "t0 = 0.5\nN_D = 4\nN_int = 2\nDelta = 0.01").unwrap();
        drop(file);

        let store: ParameterStore<f64> = ParameterStore::from_file(path.clone()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(store.get_parameter(Parameter::HoppingEnergy).unwrap(), 0.5);
        assert_eq!(store.get_parameter(Parameter::NumberOfSites).unwrap(), 4.0);
        assert_eq!(store.get_parameter(Parameter::InternalDimension).unwrap(), 2.0);
        assert_eq!(store.pairing_potential().unwrap(), 0.01);
        assert!(store.phase().is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("nanowire_parameters_which_do_not_exist.toml");
        assert!(ParameterStore::<f64>::from_file(path).is_err());
    }
}
