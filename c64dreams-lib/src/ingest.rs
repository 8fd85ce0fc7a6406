//! Spreadsheet ingestion.
//!
//! Reads the collection's metadata sheet (exported as CSV) into [`Game`]
//! records, one game with a single variant per row. The sheet carries a
//! free-form preamble, so the header row is found by looking for a `Title`
//! cell rather than assumed to be first.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use c64dreams_core::util::slugify;
use c64dreams_core::{ContentType, Game, Region, TargetDevice, Variant};

use crate::error::IngestError;

/// Notes columns, in the order they are joined.
const NOTE_COLUMNS: &[&str] = &["game notes", "retroarch notes", "custom notes", "source"];

const NOTES_SEPARATOR: &str = " | ";

/// Load and parse a CSV file from disk.
pub fn load_csv(path: &Path) -> Result<Vec<Game>, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let games = parse_csv(file)?;
    log::debug!("Loaded {} games from {}", games.len(), path.display());
    Ok(games)
}

/// Parse CSV content from any reader.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Game>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut header: Option<HashMap<String, usize>> = None;
    let mut games = Vec::new();

    for (line, result) in reader.records().enumerate() {
        let record = result?;

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let Some(columns) = &header else {
            if record.iter().any(|cell| cell.trim().eq_ignore_ascii_case("title")) {
                log::debug!("Header found on row {}", line + 1);
                header = Some(index_header(&record));
            }
            continue;
        };

        let row = Row {
            record: &record,
            columns,
        };
        match row.to_game() {
            Some(game) => games.push(game),
            None => log::warn!("Skipping row {}: no title", line + 1),
        }
    }

    if header.is_none() {
        log::warn!("No header row with a 'Title' column found");
    }

    Ok(games)
}

fn index_header(record: &csv::StringRecord) -> HashMap<String, usize> {
    record
        .iter()
        .enumerate()
        .filter_map(|(i, cell)| {
            let name = cell.trim().to_lowercase();
            (!name.is_empty()).then_some((name, i))
        })
        .collect()
}

/// A data row viewed through the header index.
struct Row<'a> {
    record: &'a csv::StringRecord,
    columns: &'a HashMap<String, usize>,
}

impl Row<'_> {
    /// Trimmed cell value; empty when the column or cell is missing.
    fn get(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|&i| self.record.get(i))
            .map(str::trim)
            .unwrap_or("")
    }

    fn to_game(&self) -> Option<Game> {
        let title = self.get("title");
        if title.is_empty() {
            return None;
        }

        let type_tag = self.get("type").to_lowercase();
        let content_type = ContentType::from_type_tag(&type_tag);

        let notes: Vec<&str> = NOTE_COLUMNS
            .iter()
            .map(|column| self.get(column))
            .filter(|value| !value.is_empty())
            .collect();

        let variant = Variant {
            label: choose_label(self.get("version"), &type_tag),
            region: Some(Region::Both),
            preferred_target: TargetDevice::Ultimate,
            content_type,
            source_path: Some(choose_source_path(self.get("prg name"), title, content_type)),
            notes: notes.join(NOTES_SEPARATOR),
        };

        Some(Game {
            id: slugify(title),
            title: title.to_string(),
            region: Region::Both,
            variants: vec![variant],
        })
    }
}

/// The Version cell, else the upper-cased type tag, else `"Variant"`.
fn choose_label(version: &str, type_tag: &str) -> String {
    if !version.is_empty() {
        version.to_string()
    } else if !type_tag.is_empty() {
        type_tag.to_uppercase()
    } else {
        "Variant".to_string()
    }
}

/// The PRG Name cell when it looks like a usable file name, else the title,
/// with the content type's canonical extension appended if missing.
fn choose_source_path(prg_name: &str, title: &str, content_type: ContentType) -> String {
    let usable = !prg_name.is_empty()
        && !prg_name.eq_ignore_ascii_case("n/a")
        && !prg_name.contains([' ', '/', '\\']);
    let name = if usable { prg_name } else { title };

    match content_type.canonical_extension() {
        Some(ext) if !name.to_lowercase().ends_with(&format!(".{}", ext)) => {
            format!("{}.{}", name, ext)
        }
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "summary,,,,\n\
        ,,Title,Type,Multi-disk,Joystick Port,TrueDrive Enabled,Autowarp,Autoload State,Genre,Manual,Zzap! Review 1,Zzap! Review 2,Zzap! Review 3,Game Notes,Retroarch Notes,PRG Name,Group,Version,Source,Custom Notes\n\
        c,,Test Game,d64,,2,No,,,Shmup,Yes,70%,,,Note one,Retro note,PRG1,Remember,Test Game +1,CSDb,Custom note\n\
        ,,Second Game,prg,,2,No,,,Shmup,Yes,70%,,, , ,n/a,Group B,,GB64,\n";

    #[test]
    fn test_parse_sheet() {
        let games = parse_csv(SHEET.as_bytes()).unwrap();
        assert_eq!(games.len(), 2);

        let first = &games[0];
        assert_eq!(first.title, "Test Game");
        assert_eq!(first.id, "test-game");
        assert_eq!(first.region, Region::Both);
        assert_eq!(first.variants.len(), 1);

        let variant = &first.variants[0];
        assert_eq!(variant.label, "Test Game +1");
        assert_eq!(variant.content_type, ContentType::Disk);
        assert_eq!(variant.preferred_target, TargetDevice::Ultimate);
        assert_eq!(variant.source_path.as_deref(), Some("PRG1.d64"));
        assert_eq!(variant.notes, "Note one | Retro note | Custom note | CSDb");

        let second = &games[1].variants[0];
        assert_eq!(second.content_type, ContentType::Prg);
        assert_eq!(second.source_path.as_deref(), Some("Second Game.prg"));
        assert_eq!(second.label, "PRG");
        assert_eq!(second.notes, "GB64");
    }

    #[test]
    fn test_rows_before_header_and_blank_rows_are_skipped() {
        let sheet = "Title of the sheet is not a header,x\n\
            ,,\n\
            Type,Title\n\
            tap,Paradroid\n\
            ,,\n\
            crt,\n\
            ,Uridium\n";
        // the first row has a cell that merely contains "Title", not one equal to it
        let games = parse_csv(sheet.as_bytes()).unwrap();
        let titles: Vec<&str> = games.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Paradroid", "Uridium"]);

        assert_eq!(games[0].variants[0].label, "TAP");
        assert_eq!(games[0].variants[0].content_type, ContentType::Tape);
        assert_eq!(games[1].variants[0].label, "Variant");
        assert_eq!(games[1].variants[0].content_type, ContentType::Unknown);
        assert_eq!(games[1].variants[0].source_path.as_deref(), Some("Uridium"));
    }

    #[test]
    fn test_no_header_yields_nothing() {
        let games = parse_csv("a,b,c\n1,2,3\n".as_bytes()).unwrap();
        assert!(games.is_empty());
    }

    #[test]
    fn test_choose_source_path() {
        assert_eq!(choose_source_path("ELITE", "Elite", ContentType::Disk), "ELITE.d64");
        assert_eq!(choose_source_path("elite.D64", "Elite", ContentType::Disk), "elite.D64");
        assert_eq!(choose_source_path("N/A", "Elite", ContentType::Tape), "Elite.tap");
        assert_eq!(choose_source_path("two words", "Elite", ContentType::Cart), "Elite.crt");
        assert_eq!(choose_source_path("dir/file", "Elite", ContentType::Zip), "Elite.zip");
        assert_eq!(choose_source_path("", "Elite", ContentType::Unknown), "Elite");
    }

    #[test]
    fn test_type_tags() {
        let sheet = "Title,Type\nA,D1M\nB,easyflash\nC,t64\nD,zip\nE,mystery\n";
        let types: Vec<ContentType> = parse_csv(sheet.as_bytes())
            .unwrap()
            .iter()
            .map(|g| g.variants[0].content_type)
            .collect();
        assert_eq!(
            types,
            vec![
                ContentType::Disk,
                ContentType::Cart,
                ContentType::Tape,
                ContentType::Zip,
                ContentType::Unknown
            ]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Open { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("games.csv");
        std::fs::write(&path, SHEET).unwrap();
        assert_eq!(load_csv(&path).unwrap().len(), 2);
    }
}
