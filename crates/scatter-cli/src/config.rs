mod defaults;
mod file;

use crate::cli::{OutputFormat, PlaceArgs};
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use file::FileConfig;
use ligscatter::core::io::gaussian::GaussianJob;
use ligscatter::core::utils::geometry::CentroidWeighting;
use ligscatter::engine::config::{ScatterConfig, ScatterConfigBuilder};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Everything the `place` command needs, after merging flags, file and defaults.
#[derive(Debug)]
pub struct AppConfig {
    pub base_path: PathBuf,
    pub ligand_path: PathBuf,
    pub base_name: Option<String>,
    pub ligand_name: Option<String>,
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    /// Job settings shared by every output; the title is filled in per structure.
    pub job: GaussianJob,
    /// Whether each Gaussian job gets a `%chk` line named after its title.
    pub checkpoint: bool,
    pub core_config: ScatterConfig,
}

/// Merges command-line flags over the optional config file over built-in defaults.
pub fn build_config(args: &PlaceArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let placement = file_config.placement.unwrap_or_default();
    let retry = file_config.retry.unwrap_or_default();
    let job_file = file_config.job.unwrap_or_default();

    let moiety = args
        .moiety
        .clone()
        .or(placement.moiety)
        .ok_or_else(|| required("--moiety", "placement.moiety"))?;
    let radius = args
        .radius
        .or(placement.radius)
        .ok_or_else(|| required("--radius", "placement.radius"))?;
    let ligand_count = args
        .ligands
        .or(placement.ligands)
        .unwrap_or(defaults.ligands);
    let structure_count = args.count.or(placement.count).unwrap_or(defaults.count);
    let weighted = !args.unweighted && placement.weighted.unwrap_or(defaults.weighted);
    let tolerance = args
        .tolerance
        .or(placement.tolerance)
        .unwrap_or(defaults.tolerance);

    let max_attempts = args
        .max_attempts
        .or(retry.max_attempts)
        .unwrap_or(defaults.max_attempts);
    let timeout = args
        .timeout_secs
        .or(retry.timeout_secs)
        .map(|secs| {
            Duration::try_from_secs_f64(secs).map_err(|e| {
                CliError::Argument(format!("Invalid timeout of {secs} seconds: {e}"))
            })
        })
        .transpose()?;
    let seed = args.seed.or(retry.seed);

    let mut builder = ScatterConfigBuilder::new()
        .moiety_atoms(moiety)
        .moiety_radius(radius)
        .weighting(if weighted {
            CentroidWeighting::CovalentRadius
        } else {
            CentroidWeighting::Unweighted
        })
        .ligand_count(ligand_count)
        .structure_count(structure_count)
        .bond_tolerance(tolerance)
        .max_attempts(max_attempts);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let job = GaussianJob {
        checkpoint: None,
        memory: job_file.memory,
        nproc_shared: job_file.nproc_shared,
        route: job_file.route.unwrap_or(defaults.route),
        title: String::new(),
        charge: job_file.charge.unwrap_or(defaults.charge),
        multiplicity: job_file.multiplicity.unwrap_or(defaults.multiplicity),
    };

    let config = AppConfig {
        base_path: args.base.clone(),
        ligand_path: args.ligand.clone(),
        base_name: args.base_name.clone(),
        ligand_name: args.ligand_name.clone(),
        out_dir: args
            .out_dir
            .clone()
            .or(job_file.out_dir)
            .unwrap_or(defaults.out_dir),
        format: args.format.or(job_file.format).unwrap_or(defaults.format),
        job,
        checkpoint: job_file.checkpoint.unwrap_or(defaults.checkpoint),
        core_config,
    };
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

fn required(flag: &str, key: &str) -> CliError {
    CliError::Config(format!(
        "A value is required, either via '{flag}' or as '{key}' in the config file."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use ligscatter::engine::config::{DEFAULT_BOND_TOLERANCE, DEFAULT_MAX_ATTEMPTS};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn place_args(extra: &[&str]) -> PlaceArgs {
        let mut argv = vec!["scatter", "place", "-b", "base.xyz", "-l", "lig.xyz"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Place(args) => args,
            other => panic!("expected place, got {other:?}"),
        }
    }

    fn write_config(dir: &Path, content: &str) -> String {
        let path = dir.join("scatter.toml");
        fs::write(&path, content).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn flags_alone_use_defaults_for_the_rest() {
        let config = build_config(&place_args(&["-m", "0,2", "-r", "4.0"])).unwrap();
        let core = &config.core_config;
        assert_eq!(core.moiety.atom_indices, vec![0, 2]);
        assert_eq!(core.moiety.radius, 4.0);
        assert_eq!(core.moiety.weighting, CentroidWeighting::CovalentRadius);
        assert_eq!(core.ligand_count, 1);
        assert_eq!(core.structure_count, 1);
        assert_eq!(core.bond_tolerance, DEFAULT_BOND_TOLERANCE);
        assert_eq!(core.retry.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(core.retry.timeout, None);
        assert_eq!(config.format, OutputFormat::Com);
        assert_eq!(config.out_dir, PathBuf::from("."));
        assert!(config.checkpoint);
        assert_eq!(config.job.multiplicity, 1);
    }

    #[test]
    fn file_values_fill_in_and_flags_override() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r##"
            [placement]
            moiety = [1, 4, 2]
            radius = 3.0
            ligands = 3
            count = 8
            weighted = false
            tolerance = 1.25

            [retry]
            max-attempts = 500
            timeout-secs = 2.5
            seed = 11

            [job]
            out-dir = "jobs"
            format = "xyz"
            route = "#p HF/STO-3G SP"
            memory = "4GB"
            nproc-shared = 8
            charge = -1
            multiplicity = 2
            checkpoint = false
            "##,
        );

        let config = build_config(&place_args(&["-c", &path, "-r", "5.0", "-k", "2"])).unwrap();
        let core = &config.core_config;
        assert_eq!(core.moiety.atom_indices, vec![1, 4, 2]);
        assert_eq!(core.moiety.radius, 5.0);
        assert_eq!(core.moiety.weighting, CentroidWeighting::Unweighted);
        assert_eq!(core.ligand_count, 3);
        assert_eq!(core.structure_count, 2);
        assert_eq!(core.bond_tolerance, 1.25);
        assert_eq!(core.retry.max_attempts, 500);
        assert_eq!(core.retry.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(core.seed, Some(11));
        assert_eq!(config.out_dir, PathBuf::from("jobs"));
        assert_eq!(config.format, OutputFormat::Xyz);
        assert_eq!(config.job.route, "#p HF/STO-3G SP");
        assert_eq!(config.job.memory.as_deref(), Some("4GB"));
        assert_eq!(config.job.nproc_shared, Some(8));
        assert_eq!(config.job.charge, -1);
        assert_eq!(config.job.multiplicity, 2);
        assert!(!config.checkpoint);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[placement]\nspread = 2.0\n");
        let result = build_config(&place_args(&["-c", &path, "-m", "0", "-r", "1.0"]));
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_moiety_is_reported() {
        match build_config(&place_args(&["-r", "1.0"])) {
            Err(CliError::Config(msg)) => assert!(msg.contains("--moiety")),
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_values_are_rejected() {
        let result = build_config(&place_args(&["-m", "0", "-r", "1.0", "-t", "0.5"]));
        assert!(matches!(result, Err(CliError::Config(_))));

        let result = build_config(&place_args(&["-m", "0", "-r", "1.0", "--timeout-secs=-1"]));
        assert!(matches!(result, Err(CliError::Argument(_))));
    }
}
