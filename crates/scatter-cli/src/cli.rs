use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Jackson Elowitt",
    version,
    about = "LigandScatter - Generate starting geometries by scattering randomly oriented ligands around a base structure.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scatter copies of a ligand around a moiety of the base structure and write one job file per structure.
    Place(PlaceArgs),
    /// List the atoms of a structure file with their indices, to help choose a moiety.
    Inspect(InspectArgs),
}

/// Output file format for generated structures.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Gaussian input file (.com)
    Com,
    /// XYZ coordinates (.xyz)
    Xyz,
}

/// Arguments for the `place` subcommand.
#[derive(Args, Debug)]
pub struct PlaceArgs {
    // --- Inputs ---
    /// Base structure file (.xyz, .com or .gjf).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub base: PathBuf,

    /// Ligand structure file (.xyz, .com or .gjf).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub ligand: PathBuf,

    /// Name used for the base in output titles. Defaults to the name stored in the file, then the file stem.
    #[arg(long, value_name = "NAME")]
    pub base_name: Option<String>,

    /// Name used for the ligand in output titles. Defaults to the name stored in the file, then the file stem.
    #[arg(long, value_name = "NAME")]
    pub ligand_name: Option<String>,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Placement ---
    /// Zero-based indices of the base atoms forming the moiety (ex. '1,4,2').
    #[arg(short, long, value_delimiter = ',', value_name = "INDICES")]
    pub moiety: Option<Vec<usize>>,

    /// Radius of the placement sphere around the moiety, in Angstroms.
    #[arg(short, long, value_name = "FLOAT")]
    pub radius: Option<f64>,

    /// Number of ligand copies to add to each structure.
    #[arg(short = 'n', long, value_name = "INT")]
    pub ligands: Option<usize>,

    /// Number of structures (output files) to generate.
    #[arg(short = 'k', long, value_name = "INT")]
    pub count: Option<usize>,

    /// Use the plain mean of the moiety atoms instead of the covalent-radius-weighted centroid.
    #[arg(long)]
    pub unweighted: bool,

    /// Scale factor applied to the sum of covalent radii when detecting clashes.
    #[arg(short, long, value_name = "FLOAT")]
    pub tolerance: Option<f64>,

    // --- Retry ---
    /// Maximum number of candidates tried per structure before giving up.
    #[arg(long, value_name = "INT")]
    pub max_attempts: Option<usize>,

    /// Wall-clock limit per structure, in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<f64>,

    /// Seed for the random number generator, for reproducible output.
    #[arg(short, long, value_name = "INT")]
    pub seed: Option<u64>,

    // --- Output ---
    /// Directory to write the generated files into.
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output file format.
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Structure file to list (.xyz, .com or .gjf).
    #[arg(required = true, value_name = "PATH")]
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_arguments_parse() {
        let cli = Cli::try_parse_from([
            "scatter", "-vv", "place", "-b", "base.xyz", "-l", "water.xyz", "-m", "1,4,2", "-r",
            "3.5", "-n", "2", "-k", "10", "--format", "xyz", "--seed", "7",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Place(args) = cli.command else {
            panic!("expected place");
        };
        assert_eq!(args.moiety, Some(vec![1, 4, 2]));
        assert_eq!(args.radius, Some(3.5));
        assert_eq!(args.ligands, Some(2));
        assert_eq!(args.count, Some(10));
        assert_eq!(args.format, Some(OutputFormat::Xyz));
        assert_eq!(args.seed, Some(7));
        assert!(!args.unweighted);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["scatter", "-q", "-v", "inspect", "a.xyz"]);
        assert!(result.is_err());
    }

    #[test]
    fn inspect_requires_a_file() {
        assert!(Cli::try_parse_from(["scatter", "inspect"]).is_err());
        let cli = Cli::try_parse_from(["scatter", "inspect", "a.xyz"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Inspect(InspectArgs { file }) if file == PathBuf::from("a.xyz")
        ));
    }
}
