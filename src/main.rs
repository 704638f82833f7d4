//! Avatar Compositor CLI
//!
//! Usage:
//!   avatar-compositor [OPTIONS]
//!
//! Options:
//!   --country <COUNTRY>       Country of the avatar [default: china]
//!   --gender <GENDER>         Gender of the avatar [default: male]
//!   -a, --attribute <N=V>     Value for any other configured dimension
//!   --assets <DIR>            Asset root directory
//!   -c, --config <FILE>       Avatar style configuration (TOML format)
//!   -o, --output <DIR>        Directory to save the avatar in [default: output]
//!   --stdout                  Print the SVG instead of saving it
//!   --seed <N>                Seed for reproducible output
//!   -v, --verbose             Log layer resolution to stderr

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::Level;

use avatar_compositor::{
    AvatarConfig, Compositor, ConfigError, FsAssetSource, GenerateError, Selection,
    SelectionError,
};

const DEFAULT_COUNTRY: &str = "china";
const DEFAULT_GENDER: &str = "male";

#[derive(Parser)]
#[command(name = "avatar-compositor")]
#[command(about = "Compose random layered SVG avatars")]
struct Cli {
    /// Country of the avatar (e.g. 'china', 'usa') [default: china]
    #[arg(long)]
    country: Option<String>,

    /// Gender of the avatar (e.g. 'male', 'female') [default: male]
    #[arg(long)]
    gender: Option<String>,

    /// Value for any other configured dimension
    #[arg(short, long = "attribute", value_name = "NAME=VALUE", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Asset root directory (overrides the config file)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Avatar style configuration (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to save the generated avatar in
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Print the SVG to stdout instead of saving it
    #[arg(long)]
    stdout: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Log layer resolution to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("error loading config '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("failed to generate avatar: {0}")]
    Generate(#[from] GenerateError),

    #[error("failed to save avatar to '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => AvatarConfig::from_file(path).map_err(|source| CliError::Config {
            path: path.clone(),
            source,
        })?,
        None => AvatarConfig::default(),
    };
    if let Some(root) = &cli.assets {
        config.assets.root = root.clone();
    }

    let selection = build_selection(&cli, &config.assets.dimensions)?;

    if !cli.stdout {
        println!(
            "Generating SVG avatar for {}",
            selection.describe(&config.assets.common)
        );
    }

    let compositor = Compositor::from_config(FsAssetSource::new(&config.assets.root), &config);
    let svg = match cli.seed {
        Some(seed) => compositor.generate(&selection, &mut StdRng::seed_from_u64(seed))?,
        None => compositor.generate(&selection, &mut rand::rng())?,
    };

    if cli.stdout {
        println!("{}", svg);
        return Ok(());
    }

    let path = save(&cli.output, &selection, &config.assets.common, &svg)?;
    println!("Successfully generated avatar and saved it to {}", path.display());
    Ok(())
}

/// Collect attribute values in configured dimension order
///
/// `--country` and `--gender` fall back to their defaults only when the
/// configuration actually uses those dimensions.
fn build_selection(cli: &Cli, dimensions: &[String]) -> Result<Selection, CliError> {
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    for (name, flag, default) in [
        ("country", &cli.country, DEFAULT_COUNTRY),
        ("gender", &cli.gender, DEFAULT_GENDER),
    ] {
        match flag {
            Some(value) => pairs.push((name, value.as_str())),
            None if dimensions.iter().any(|d| d == name) => pairs.push((name, default)),
            None => {}
        }
    }
    pairs.extend(
        cli.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    );

    Ok(Selection::validated(dimensions, pairs)?)
}

fn save(
    output_dir: &Path,
    selection: &Selection,
    common: &str,
    svg: &str,
) -> Result<PathBuf, CliError> {
    fs::create_dir_all(output_dir).map_err(|source| CliError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(file_name(selection, common, unix_timestamp()));
    fs::write(&path, svg).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn file_name(selection: &Selection, common: &str, timestamp: u64) -> String {
    let mut parts = vec!["avatar".to_string()];
    parts.extend(selection.values(common).map(str::to_string));
    parts.push(timestamp.to_string());
    format!("{}.svg", parts.join("_"))
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Vec<String> {
        vec!["country".to_string(), "gender".to_string()]
    }

    #[test]
    fn test_parse_attribute() {
        assert_eq!(
            parse_attribute("region=north").unwrap(),
            ("region".to_string(), "north".to_string())
        );
        assert!(parse_attribute("region").is_err());
    }

    #[test]
    fn test_defaults_fill_configured_dimensions() {
        let cli = Cli::parse_from(["avatar-compositor"]);
        let selection = build_selection(&cli, &dims()).unwrap();
        assert_eq!(selection.to_string(), "country=china, gender=male");
    }

    #[test]
    fn test_defaults_skipped_without_dimensions() {
        let cli = Cli::parse_from(["avatar-compositor"]);
        let selection = build_selection(&cli, &[]).unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_explicit_flags_and_attributes() {
        let cli = Cli::parse_from([
            "avatar-compositor",
            "--country",
            "USA",
            "-a",
            "gender=female",
        ]);
        let selection = build_selection(&cli, &dims()).unwrap();
        assert_eq!(selection.to_string(), "country=usa, gender=female");
    }

    #[test]
    fn test_empty_country_rejected() {
        let cli = Cli::parse_from(["avatar-compositor", "--country", ""]);
        let err = build_selection(&cli, &dims()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Selection(SelectionError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_file_name() {
        let selection = Selection::new().with("country", "cn").with_common("gender");
        assert_eq!(
            file_name(&selection, "common", 1700000000),
            "avatar_cn_common_1700000000.svg"
        );
        assert_eq!(
            file_name(&selection, "_any", 1700000000),
            "avatar_cn__any_1700000000.svg"
        );
        assert_eq!(file_name(&Selection::new(), "common", 5), "avatar_5.svg");
    }
}
