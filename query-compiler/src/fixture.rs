use crate::{Document, MemoryStore, ReferenceRecord};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
    time::Instant,
};
use tracing::info;

/// Reference objects plus the documents filed under them, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub references: Vec<ReferenceRecord>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Fixture {
    pub fn store(&self) -> MemoryStore {
        self.references.iter().cloned().collect()
    }
}

pub fn read_fixture_from_file(path: &Path) -> Result<Fixture> {
    let decode_time = Instant::now();
    let input = File::open(path)
        .with_context(|| format!("Failed to open fixture file {}", path.display()))?;
    let fixture: Fixture =
        serde_json::from_reader(BufReader::new(input)).context("Failed to decode fixture")?;
    info!(
        "Fixture decode time: {:?}, {} references, {} documents",
        decode_time.elapsed(),
        fixture.references.len(),
        fixture.documents.len()
    );
    Ok(fixture)
}

pub fn write_fixture_to_file(path: &Path, fixture: &Fixture) -> Result<()> {
    let output = File::create(path)
        .with_context(|| format!("Failed to create fixture file {}", path.display()))?;
    let mut output = BufWriter::new(output);
    serde_json::to_writer_pretty(&mut output, fixture).context("Failed to encode fixture")?;
    output.flush().context("Failed to flush fixture")?;
    Ok(())
}
