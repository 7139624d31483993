/// This module governs the high-level command line application
mod configuration;
mod styles;
mod telemetry;

pub(crate) use configuration::Configuration;

use crate::{
    hamiltonian::{Hamiltonian, HamiltonianBuilder},
    parameters::ParameterStore,
};
use clap::{ArgEnum, Parser};
use color_eyre::eyre::eyre;
use configuration::OutputConfiguration;
use itertools::Itertools;
use nalgebra::RealField;
use num_traits::ToPrimitive;
use owo_colors::OwoColorize;
use serde::de::DeserializeOwned;
use std::{fmt, path::PathBuf};
use styles::Styles;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// A `.toml` file holding the parameters of the wire
    file_path: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    /// Print the on-site and coupling blocks, regardless of the configuration
    #[clap(short, long)]
    display_blocks: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
pub(crate) enum LogLevel {
    Trace,
    Info,
    Debug,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

/// Run the command line application: assemble the Hamiltonian described by a parameter file and
/// report on it
pub fn run<T>() -> color_eyre::Result<()>
where
    T: Copy + DeserializeOwned + RealField + ToPrimitive,
{
    color_eyre::install()?;
    let cli = App::parse();

    let config: Configuration = Configuration::build()?;
    let (subscriber, _guard) = telemetry::get_subscriber(
        cli.log_level,
        &config.global.results_directory,
        &config.global.log_file,
    );
    telemetry::init_subscriber(subscriber)?;

    let path = cli
        .file_path
        .ok_or(eyre!("A file path needs to be passed."))?;
    tracing::info!("Reading parameters from {}", path.display());
    let parameters: ParameterStore<T> = ParameterStore::from_file(path)?;

    let hamiltonian: Hamiltonian<T> = HamiltonianBuilder::default()
        .with_parameters(&parameters)
        .build()?;

    log_transport_parameters(&parameters);

    let output = OutputConfiguration {
        display_blocks: cli.display_blocks || config.output.display_blocks,
        ..config.output
    };
    report(&hamiltonian, &output, &Styles::for_stdout())
}

/// The remaining parameters are not used in assembly, but are passed on to the transport stages
fn log_transport_parameters<T: Copy + RealField>(parameters: &ParameterStore<T>) {
    match parameters.pairing_potential() {
        Ok(delta) => tracing::info!("Pairing potential: {}", delta),
        Err(e) => tracing::debug!("{}", e),
    }
    match parameters.phase() {
        Ok(phase) => tracing::info!("Superconducting phase difference: {}", phase),
        Err(e) => tracing::debug!("{}", e),
    }
    match parameters.chemical_potentials() {
        Ok((source, drain)) => tracing::info!("Chemical potentials: ({}, {})", source, drain),
        Err(e) => tracing::debug!("{}", e),
    }
}

fn report<T: Copy + RealField>(
    hamiltonian: &Hamiltonian<T>,
    output: &OutputConfiguration,
    styles: &Styles,
) -> color_eyre::Result<()> {
    let csr = hamiltonian.to_csr()?;
    println!("{}", "Nanowire Hamiltonian".style(styles.header_style));
    println!(
        "sites: {}, internal dimension: {}, flattened: {} x {} with {} stored elements",
        hamiltonian.number_of_sites().style(styles.value_style),
        hamiltonian.internal_dimension().style(styles.value_style),
        hamiltonian.num_rows(),
        hamiltonian.num_rows(),
        csr.nnz().style(styles.value_style),
    );

    if output.display_blocks {
        if let Some(alpha) = hamiltonian.block(0, 0) {
            println!("{}{}", "on-site block H[0, 0]".style(styles.block_style), alpha);
        }
        if let Some(beta) = hamiltonian.block(1, 0) {
            println!("{}{}", "coupling block H[1, 0]".style(styles.block_style), beta);
        }
    }

    if let Some((lowest, highest)) = spectral_extremes(hamiltonian, output) {
        let list = |values: &[T]| values.iter().map(|value| format!("{:.6}", value)).join(", ");
        println!(
            "{} {}",
            "lowest eigenvalues:".style(styles.header_style),
            list(lowest.as_slice())
        );
        println!(
            "{} {}",
            "highest eigenvalues:".style(styles.header_style),
            list(highest.as_slice())
        );
    }
    Ok(())
}

/// The lowest and highest `number_of_eigenvalues` eigenvalues of the closed system
///
/// Returns `None` without forming the dense matrix when no eigenvalues are requested, or when the
/// flattened dimension exceeds `maximum_dense_dimension`.
fn spectral_extremes<T: Copy + RealField>(
    hamiltonian: &Hamiltonian<T>,
    output: &OutputConfiguration,
) -> Option<(Vec<T>, Vec<T>)> {
    if output.number_of_eigenvalues == 0 {
        return None;
    }
    if hamiltonian.num_rows() > output.maximum_dense_dimension {
        tracing::warn!(
            "Skipping the eigenvalue report: the flattened dimension {} exceeds the dense limit {}",
            hamiltonian.num_rows(),
            output.maximum_dense_dimension
        );
        return None;
    }

    let eigenvalues = hamiltonian.eigenvalues();
    let values = eigenvalues.as_slice();
    let count = output.number_of_eigenvalues.min(values.len());
    Some((
        values[..count].to_vec(),
        values[values.len() - count..].to_vec(),
    ))
}
