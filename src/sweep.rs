use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Result;
use csv::StringRecord;
use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};
use thiserror::Error;

use crate::args::Config;
use crate::probe::{Probe, Status};
use crate::resolve::Resolver;

pub const HOSTNAME_HEADER: &str = "ret_nslookup_hn";
pub const ADDRESS_HEADER: &str = "ret_nslookup_ip";
pub const STATUS_HEADER: &str = "ret_ping_stat";

/// Sentinel written to the address field when forward resolution fails.
pub const RESOLVE_ERROR: &str = "gethostbyname error";
/// Sentinel written to the hostname field when the probe reports the target
/// as an unknown host.
pub const UNKNOWN_HOST: &str = "unknown host";

/// Fatal sweep errors. Per-target resolution and probe failures never end up
/// here; they degrade into sentinel values in the output instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },
    #[error("column not found in input header: {column}")]
    MissingColumn { column: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Field indices to pull from each record, resolved against the header once.
struct Columns {
    lookup: usize,
    id: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, config: &Config) -> Result<Self, Error> {
        let position = |column: &str| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| Error::MissingColumn {
                    column: column.to_owned(),
                })
        };

        Ok(Self {
            lookup: position(&config.lookup_column)?,
            id: config.id_column.as_deref().map(position).transpose()?,
        })
    }
}

/// Run the whole sweep: open both files, validate the header, process every
/// record in input order, and report the output path.
pub fn run(config: &Config, probe: &dyn Probe, resolver: &dyn Resolver) -> Result<()> {
    let input = File::open(&config.input).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::InputNotFound {
            path: config.input.clone(),
        },
        _ => Error::Io(err),
    })?;

    let mut reader = csv::Reader::from_reader(input);

    // Both column checks happen against the header, before the first probe,
    // so a bad header never leaves a half-swept output file behind.
    let columns = Columns::resolve(reader.headers().map_err(Error::Csv)?, config)?;

    let records = reader
        .into_records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::Csv)?;

    let mut writer = csv::Writer::from_path(&config.output).map_err(Error::Csv)?;

    writer
        .write_record(output_header(config))
        .map_err(Error::Csv)?;

    let bar = ProgressBar::new(records.len() as u64)
        .with_finish(ProgressFinish::Abandon);

    bar.set_style(
        ProgressStyle::with_template("[{msg:^24}] {wide_bar} [{pos}/{len} / {eta}]")?
    );

    for record in &records {
        let target = record.get(columns.lookup).unwrap_or("");

        bar.set_message(target.to_owned());

        let row = process(target, record, &columns, probe, resolver);

        writer.write_record(&row).map_err(Error::Csv)?;
        bar.inc(1);
    }

    bar.finish_and_clear();
    writer.flush().map_err(Error::Io)?;

    println!("\nOutput file: {}", config.output.display());

    Ok(())
}

/// Produce the output row for one record. Never fails; resolution problems
/// become sentinel strings and ambiguous probes classify as down.
fn process(
    target: &str,
    record: &StringRecord,
    columns: &Columns,
    probe: &dyn Probe,
    resolver: &dyn Resolver,
) -> Vec<String> {
    let address = resolver
        .forward(target)
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| RESOLVE_ERROR.to_owned());

    let status = probe.probe(target);

    let hostname = match status {
        // No point reversing a name the ping utility could not even resolve.
        Status::UnknownHost => UNKNOWN_HOST.to_owned(),
        _ => resolver
            .canonical_name(target)
            .unwrap_or_else(|| target.to_owned()),
    };

    let mut row = vec![target.to_owned(), hostname, address, status.to_string()];

    if let Some(id) = columns.id {
        row.push(record.get(id).unwrap_or("").to_owned());
    }

    row
}

fn output_header(config: &Config) -> Vec<&str> {
    let mut header = vec![
        config.lookup_column.as_str(),
        HOSTNAME_HEADER,
        ADDRESS_HEADER,
        STATUS_HEADER,
    ];

    if let Some(id) = &config.id_column {
        header.push(id.as_str());
    }

    header
}
