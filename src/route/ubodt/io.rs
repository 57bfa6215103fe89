//! Persistence of the table, as `;`-delimited CSV or as packed
//! little-endian binary records.

use crate::network::Network;
use crate::route::ubodt::record::RECORD_SIZE;
use crate::route::ubodt::{Record, Ubodt, UbodtError};

use bytes::{Buf, BufMut, BytesMut};
use log::info;
use measure_time::info_time;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Csv,
    Binary,
}

impl Format {
    fn of(path: &Path) -> Result<Self, UbodtError> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Format::Csv),
            Some("bin") => Ok(Format::Binary),
            _ => Err(UbodtError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> UbodtError + '_ {
    move |source| UbodtError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl Ubodt {
    /// Reads the table at `path`, validating it against `network`.
    pub fn read(path: impl AsRef<Path>, network: &Network) -> Result<Self, UbodtError> {
        let path = path.as_ref();
        info_time!("Read UBODT from {}", path.display());

        let records = match Format::of(path)? {
            Format::Csv => read_csv(path)?,
            Format::Binary => read_binary(path)?,
        };

        let table = Ubodt::from_records(network, records)?;
        info!("UBODT holds {} records", table.len());

        Ok(table)
    }

    /// Writes the table to `path`, in the format its extension names.
    pub fn write(&self, path: impl AsRef<Path>, network: &Network) -> Result<(), UbodtError> {
        let path = path.as_ref();
        info_time!("Wrote UBODT to {}", path.display());

        match Format::of(path)? {
            Format::Csv => {
                let mut writer = csv::WriterBuilder::new()
                    .delimiter(b';')
                    .from_path(path)?;

                for record in self.records(network) {
                    writer.serialize(record)?;
                }

                writer.flush().map_err(io_error(path))
            }
            Format::Binary => {
                let mut buffer = BytesMut::with_capacity(self.len() * RECORD_SIZE);
                for record in self.records(network) {
                    buffer.put_i64_le(record.source);
                    buffer.put_i64_le(record.target);
                    buffer.put_i64_le(record.next_n);
                    buffer.put_i64_le(record.prev_n);
                    buffer.put_i64_le(record.next_e);
                    buffer.put_f64_le(record.distance);
                }

                std::fs::write(path, &buffer).map_err(io_error(path))
            }
        }
    }
}

fn read_csv(path: &Path) -> Result<Vec<Record>, UbodtError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_path(path)?;

    let records = reader
        .deserialize::<Record>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

fn read_binary(path: &Path) -> Result<Vec<Record>, UbodtError> {
    let bytes = std::fs::read(path).map_err(io_error(path))?;

    let trailing = bytes.len() % RECORD_SIZE;
    if trailing != 0 {
        return Err(UbodtError::Truncated(trailing));
    }

    let mut buffer = bytes.as_slice();
    let mut records = Vec::with_capacity(bytes.len() / RECORD_SIZE);

    while buffer.has_remaining() {
        records.push(Record {
            source: buffer.get_i64_le(),
            target: buffer.get_i64_le(),
            next_n: buffer.get_i64_le(),
            prev_n: buffer.get_i64_le(),
            next_e: buffer.get_i64_le(),
            distance: buffer.get_f64_le(),
        });
    }

    Ok(records)
}
