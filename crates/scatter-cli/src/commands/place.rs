use super::load_structure;
use crate::cli::{OutputFormat, PlaceArgs};
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ligscatter::core::io::format::{StructureFormat, write_structure};
use ligscatter::core::io::gaussian::GaussianJob;
use ligscatter::engine::progress::ProgressReporter;
use ligscatter::workflows::scatter::{self, ScatteredStructure};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: PlaceArgs) -> Result<()> {
    let config = build_config(&args)?;
    let written = scatter_to_files(&config, &CliProgressHandler::new())?;

    println!(
        "✓ Wrote {} structure(s) to {}",
        written.len(),
        config.out_dir.display()
    );
    Ok(())
}

/// Runs the workflow and writes every accepted structure as soon as it is produced.
/// Returns the written paths in order.
pub fn scatter_to_files(config: &AppConfig, progress: &CliProgressHandler) -> Result<Vec<PathBuf>> {
    let base = load_structure(&config.base_path, config.base_name.as_deref())?
        .center_on_atom(0)
        .map_err(|e| CliError::Core(e.into()))?;
    let ligand = load_structure(&config.ligand_path, config.ligand_name.as_deref())?
        .center_on_atom(0)
        .map_err(|e| CliError::Core(e.into()))?;
    info!(
        base = base.name(),
        base_atoms = base.len(),
        ligand = ligand.name(),
        ligand_atoms = ligand.len(),
        "Structures loaded and centred on atom 0."
    );

    std::fs::create_dir_all(&config.out_dir)?;
    let format = match config.format {
        OutputFormat::Com => StructureFormat::Gaussian,
        OutputFormat::Xyz => StructureFormat::Xyz,
    };

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let mut written = Vec::with_capacity(config.core_config.structure_count);
    scatter::for_each_structure(
        &base,
        &ligand,
        &config.core_config,
        &reporter,
        |scattered: ScatteredStructure| {
            let path = output_path(&config.out_dir, &scattered.title, format);
            let job = job_for(config, &scattered.title);
            write_structure(&scattered.structure, format, &job, &path)?;
            info!(
                attempts = scattered.attempts,
                "Wrote {} to {:?}", scattered.title, path
            );
            written.push(path);
            Ok::<(), CliError>(())
        },
    )?;
    Ok(written)
}

fn job_for(config: &AppConfig, title: &str) -> GaussianJob {
    let mut job = config.job.titled(title);
    if config.checkpoint {
        job.checkpoint = Some(format!("{}.chk", file_stem(title)));
    }
    job
}

fn output_path(dir: &Path, title: &str, format: StructureFormat) -> PathBuf {
    dir.join(format!("{}.{}", file_stem(title), format.extension()))
}

/// The title with anything unsafe in a file name replaced by `_`.
fn file_stem(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use ligscatter::core::io::format::read_structure;
    use std::fs;
    use tempfile::tempdir;

    const WATER: &str = "3\nWater\nO 0.0 0.0 0.0\nH 0.9572 0.0 0.0\nH -0.2400 0.9266 0.0\n";
    const HELIUM: &str = "1\n\nHe 5.0 5.0 5.0\n";

    fn config_for(dir: &Path, radius: &str, count: &str, extra: &[&str]) -> AppConfig {
        fs::write(dir.join("water.xyz"), WATER).unwrap();
        fs::write(dir.join("helium.xyz"), HELIUM).unwrap();
        let base = dir.join("water.xyz");
        let ligand = dir.join("helium.xyz");
        let out = dir.join("out");
        let mut argv = vec![
            "scatter",
            "place",
            "-b",
            base.to_str().unwrap(),
            "-l",
            ligand.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-m",
            "0,1,2",
            "-r",
            radius,
            "-n",
            "2",
            "-k",
            count,
            "-s",
            "1234",
        ];
        argv.extend_from_slice(extra);
        let Commands::Place(args) = Cli::try_parse_from(argv).unwrap().command else {
            panic!("expected place");
        };
        build_config(&args).unwrap()
    }

    #[test]
    fn writes_one_gaussian_job_per_structure() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path(), "5.0", "3", &[]);
        let written = scatter_to_files(&config, &CliProgressHandler::hidden()).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["Water_2helium_1.com", "Water_2helium_2.com", "Water_2helium_3.com"]);

        let text = fs::read_to_string(&written[0]).unwrap();
        assert!(text.starts_with("%chk=Water_2helium_1.chk\n"));
        assert!(text.contains("\nWater_2helium_1\n"));

        let structure = read_structure(&written[1]).unwrap();
        assert_eq!(structure.len(), 5);
        assert_eq!(structure.atoms()[0].element(), "O");
        assert_eq!(structure.atoms()[3].element(), "He");
        assert!(structure.atoms()[0].position.coords.norm() < 1e-6);
    }

    #[test]
    fn xyz_output_and_explicit_names() {
        let dir = tempdir().unwrap();
        let config = config_for(
            dir.path(),
            "5.0",
            "1",
            &["-f", "xyz", "--base-name", "H2O", "--ligand-name", "He"],
        );
        let written = scatter_to_files(&config, &CliProgressHandler::hidden()).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].file_name().unwrap(), "H2O_2He_1.xyz");

        let structure = read_structure(&written[0]).unwrap();
        assert_eq!(structure.name(), "H2O_2He_1");
        assert_eq!(structure.len(), 5);
    }

    #[test]
    fn same_seed_gives_identical_files() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        let hidden = CliProgressHandler::hidden();
        let a = scatter_to_files(&config_for(first.path(), "5.0", "3", &[]), &hidden).unwrap();
        let b = scatter_to_files(&config_for(second.path(), "5.0", "3", &[]), &hidden).unwrap();
        assert_eq!(a.len(), 3);
        for (a, b) in a.iter().zip(&b) {
            assert_eq!(fs::read_to_string(a).unwrap(), fs::read_to_string(b).unwrap());
        }
    }

    #[test]
    fn impossible_configuration_fails_with_a_bounded_error() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path(), "0.0", "3", &["--max-attempts", "25"]);
        let err = scatter_to_files(&config, &CliProgressHandler::hidden()).unwrap_err();
        assert!(err.to_string().contains("after 25 attempts"));
    }

    #[test]
    fn file_stems_are_sanitised() {
        assert_eq!(file_stem("My base_2a/b_1"), "My_base_2a_b_1");
    }
}
