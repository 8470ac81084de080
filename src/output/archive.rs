//! Zip packaging of harvested images
//!
//! Entries are deflate-compressed and stamped with a fixed modification
//! time, so the same input sequence always yields the same archive bytes.

use crate::crawler::CrawlDate;
use crate::HarvestError;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// A finished archive, held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// Suggested file name, `{slug}_{date}.zip`
    pub file_name: String,

    /// Entries written, after duplicate names collapsed
    pub entries: usize,

    pub bytes: Vec<u8>,
}

/// Archive file name for a publication slug and edition date
pub fn archive_file_name(slug: &str, date: &CrawlDate) -> String {
    format!("{}_{}.zip", slug, date)
}

/// Packages `(name, bytes)` entries into a zip archive
///
/// When a name occurs more than once only the last occurrence is written,
/// matching overwrite semantics. Entry order follows the position of each
/// name's last occurrence.
pub fn package<'a, I>(entries: I) -> Result<Vec<u8>, HarvestError>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let entries: Vec<(&str, &[u8])> = entries.into_iter().collect();

    let mut last_index: HashMap<&str, usize> = HashMap::new();
    for (index, (name, _)) in entries.iter().enumerate() {
        last_index.insert(*name, index);
    }

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (index, (name, bytes)) in entries.iter().enumerate() {
        if last_index.get(name) != Some(&index) {
            tracing::debug!("Entry {} is overwritten by a later image", name);
            continue;
        }
        writer.start_file(*name, options)?;
        writer.write_all(bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Reads every entry of an archive back, in archive order
pub fn read_archive(bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>, HarvestError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        entries.push((entry.name().to_string(), content));
    }

    Ok(entries)
}
