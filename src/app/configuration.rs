use color_eyre::eyre::eyre;
use config::{Config, File};
use serde::Deserialize;
use std::{env, path::PathBuf};

#[derive(Debug, Deserialize)]
pub(crate) struct Configuration {
    pub(crate) global: GlobalConfiguration,
    pub(crate) output: OutputConfiguration,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlobalConfiguration {
    /// Directory receiving the json log
    pub(crate) results_directory: PathBuf,
    pub(crate) log_file: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OutputConfiguration {
    /// Print the on-site and coupling blocks
    pub(crate) display_blocks: bool,
    /// How many eigenvalues of the closed system to report from each end of the spectrum
    pub(crate) number_of_eigenvalues: usize,
    /// The largest flattened dimension `N_D * N_int` for which the dense eigen-decomposition is run
    pub(crate) maximum_dense_dimension: usize,
}

impl Configuration {
    pub(crate) fn build() -> color_eyre::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // The default settings, used in the general case
            .add_source(File::with_name(".config/default"))
            // The override settings which may be set by the user, optional
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false))
            .build()?;

        s.try_deserialize()
            .map_err(|e| eyre!(format!("Failed to deserialize the config file: {:?}", e)))
    }
}
