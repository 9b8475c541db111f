use std::{
    ffi::OsString,
    fmt::Display,
    fs::{self, File},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Trim, Writer, WriterBuilder};
use serde::de::DeserializeOwned;

use crate::{
    errors::{Error, Result},
    models::{
        participant::{Participant, ParticipantRow},
        volunteer_key::VolunteerKey,
    },
    store::{KeyStore, RosterStore, warn_on_duplicate_identifiers},
};

/// Required roster columns, each with the header the legacy spreadsheet export used.
const ROSTER_REQUIRED: [(&str, &str); 4] = [
    ("identifier", "UUID"),
    ("name", "NAME"),
    ("contact", "EMAIL-ID"),
    ("affiliation", "BRANCH"),
];
const STATUS_COLUMNS: [&str; 2] = ["status", "verifyed status"];
const TIME_COLUMN: &str = "time";
const KEY_HEADERS: [&str; 3] = ["key", "owner_id", "active"];

fn unavailable(path: &Path, error: impl Display) -> Error {
    Error::StoreUnavailable(format!("{}: {error}", path.display()))
}

/// Writes a complete table next to `path` and renames it into place, so readers see
/// either the old table or the new one.
fn write_table(path: &Path, write: impl FnOnce(&mut Writer<File>) -> csv::Result<()>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| unavailable(parent, e))?;
    }
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(&tmp)
        .map_err(|e| unavailable(&tmp, e))?;
    write(&mut writer).map_err(|e| unavailable(&tmp, e))?;
    writer.flush().map_err(|e| unavailable(&tmp, e))?;
    drop(writer);

    fs::rename(&tmp, path).map_err(|e| unavailable(path, e))
}

/// A table exactly as stored: header row (trimmed) and raw records.
struct RawTable {
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl RawTable {
    fn read(path: &Path, file: File, required: &[(&str, &str)]) -> Result<Self> {
        let mut reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(file);
        let headers = reader.headers().map_err(|e| unavailable(path, e))?.clone();
        for (column, legacy) in required {
            if !headers.iter().any(|h| h == *column || h == *legacy) {
                return Err(unavailable(path, format!("missing required column `{column}`")));
            }
        }
        let records = reader
            .records()
            .collect::<csv::Result<Vec<_>>>()
            .map_err(|e| unavailable(path, e))?;
        Ok(Self { headers, records })
    }

    fn rows<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        self.records
            .iter()
            .map(|record| record.deserialize(Some(&self.headers)))
            .collect::<csv::Result<Vec<T>>>()
            .map_err(|e| unavailable(path, e))
    }

    /// Index of the first column named any of `names`, appending an empty column named
    /// `names[0]` when there is none.
    fn column(&mut self, names: &[&str]) -> usize {
        if let Some(index) = self.headers.iter().position(|h| names.contains(&h)) {
            return index;
        }
        self.headers.push_field(names[0]);
        for record in &mut self.records {
            record.push_field("");
        }
        self.headers.len() - 1
    }
}

#[derive(Debug, Clone)]
pub struct CsvRosterStore {
    path: PathBuf,
}

impl CsvRosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_table(&self) -> Result<RawTable> {
        let file = File::open(&self.path).map_err(|e| unavailable(&self.path, e))?;
        RawTable::read(&self.path, file, &ROSTER_REQUIRED)
    }
}

impl RosterStore for CsvRosterStore {
    fn load_all(&self) -> Result<Vec<Participant>> {
        let rows: Vec<ParticipantRow> = self.read_table()?.rows(&self.path)?;
        let participants: Vec<Participant> = rows.into_iter().map(Participant::from).collect();
        warn_on_duplicate_identifiers(&participants);
        Ok(participants)
    }

    /// Rewrites the table as stored, touching only the status and time cells of records
    /// whose verification status differs from `participants`. Headers, column order and
    /// any extra columns are kept.
    fn persist(&self, participants: &[Participant]) -> Result<()> {
        let mut table = self.read_table()?;
        let stored: Vec<ParticipantRow> = table.rows(&self.path)?;
        if stored.len() != participants.len() {
            return Err(unavailable(&self.path, "roster changed on disk while it was being updated"));
        }
        let status_column = table.column(&STATUS_COLUMNS);
        let time_column = table.column(&[TIME_COLUMN]);

        for ((record, row), participant) in table.records.iter_mut().zip(stored).zip(participants) {
            if row.identifier != participant.identifier {
                return Err(unavailable(&self.path, "roster changed on disk while it was being updated"));
            }
            if Participant::from(row).status == participant.status {
                continue;
            }
            let updated = ParticipantRow::from(participant);
            *record = record
                .iter()
                .enumerate()
                .map(|(index, cell)| match index {
                    i if i == status_column => updated.status.as_str(),
                    i if i == time_column => updated.time.as_str(),
                    _ => cell,
                })
                .collect();
        }

        write_table(&self.path, |writer| {
            writer.write_record(&table.headers)?;
            for record in &table.records {
                writer.write_record(record)?;
            }
            Ok(())
        })
    }
}

#[derive(Debug, Clone)]
pub struct CsvKeyStore {
    path: PathBuf,
}

impl CsvKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KeyStore for CsvKeyStore {
    fn load_all(&self) -> Result<Vec<VolunteerKey>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(unavailable(&self.path, e)),
        };
        if file.metadata().map_err(|e| unavailable(&self.path, e))?.len() == 0 {
            return Ok(Vec::new());
        }
        let required: Vec<(&str, &str)> = KEY_HEADERS.iter().map(|h| (*h, *h)).collect();
        RawTable::read(&self.path, file, &required)?.rows(&self.path)
    }

    fn persist(&self, keys: &[VolunteerKey]) -> Result<()> {
        write_table(&self.path, |writer| {
            writer.write_record(KEY_HEADERS)?;
            for key in keys {
                writer.serialize(key)?;
            }
            Ok(())
        })
    }
}
