use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::Parser;

/// The placeholder shown in the help text for `--o`. Passing it literally is
/// the same as omitting the flag.
pub const OUTPUT_PLACEHOLDER: &str = "[input_filename]-[date-time].csv";

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// Path to the CSV input file (header row required)
    #[arg(value_name = "input_filename")]
    pub input: PathBuf,
    /// Name of the input column holding the host or IP to sweep
    #[arg(long = "l", value_name = "lookup_column", default_value = "input_val")]
    pub lookup_column: String,
    /// Output filename. Defaults to `<input>-output-<YYYYMMDD-HHMMSS>.csv`
    #[arg(long = "o", value_name = "output_filename", default_value = OUTPUT_PLACEHOLDER)]
    pub output: String,
    /// Name of an input column to copy through as an extra output field
    #[arg(long = "id", value_name = "id_column_name")]
    pub id_column: Option<String>,
}

/// Resolved configuration for one sweep. Built once at startup and passed by
/// reference from there on.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub lookup_column: String,
    pub output: PathBuf,
    pub id_column: Option<String>,
}

impl Config {
    pub fn from_args(args: Arguments) -> Self {
        let output = if args.output == OUTPUT_PLACEHOLDER {
            derive_output_path(&args.input, Local::now())
        } else {
            PathBuf::from(args.output)
        };

        Self {
            input: args.input,
            lookup_column: args.lookup_column,
            output,
            id_column: args.id_column,
        }
    }
}

/// Build the default output path: the input path minus its final extension,
/// with `-output-<timestamp>.csv` appended.
fn derive_output_path(input: &Path, now: DateTime<Local>) -> PathBuf {
    let mut name = input.with_extension("").into_os_string();

    name.push(format!("-output-{}.csv", now.format("%Y%m%d-%H%M%S")));

    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2021, 8, 26, 13, 5, 9).unwrap()
    }

    #[test]
    fn output_path_derived_from_input_and_timestamp() {
        let path = derive_output_path(Path::new("devices.csv"), fixed_time());

        assert_eq!(path, PathBuf::from("devices-output-20210826-130509.csv"));
    }

    #[test]
    fn only_the_final_extension_is_stripped() {
        let path = derive_output_path(Path::new("lists/devices.v2.csv"), fixed_time());

        assert_eq!(path, PathBuf::from("lists/devices.v2-output-20210826-130509.csv"));
    }

    #[test]
    fn explicit_output_is_used_verbatim() {
        let args = Arguments {
            input: PathBuf::from("devices.csv"),
            lookup_column: "input_val".to_owned(),
            output: "sweep.csv".to_owned(),
            id_column: None,
        };

        let config = Config::from_args(args);

        assert_eq!(config.output, PathBuf::from("sweep.csv"));
    }

    #[test]
    fn placeholder_output_is_treated_as_absent() {
        let args = Arguments {
            input: PathBuf::from("devices.csv"),
            lookup_column: "input_val".to_owned(),
            output: OUTPUT_PLACEHOLDER.to_owned(),
            id_column: None,
        };

        let config = Config::from_args(args);

        let name = config.output.to_string_lossy().into_owned();

        assert!(name.starts_with("devices-output-"));
        assert!(name.ends_with(".csv"));
    }
}
