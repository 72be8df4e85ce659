use std::{fs::File, io, path::Path};

use super::Observation;
use crate::prelude::Result;
use serde::Serialize;

/// Read observations from CSV data with `date` and `value` columns.
pub fn read_observations<R: io::Read>(reader: R) -> Result<Vec<Observation>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut out = vec![];
    for res in reader.deserialize() {
        let row: Observation = res?;
        out.push(row);
    }
    Ok(out)
}

pub fn read_observations_path<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>> {
    let file = File::open(path)?;
    read_observations(io::BufReader::new(file))
}

/// Write serializable rows as CSV with a header line.
pub fn write_rows<W, T, I>(writer: W, rows: I) -> Result<()>
where
    W: io::Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
