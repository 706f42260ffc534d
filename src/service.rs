//! Accumulating writer for shared resources such as service manifests
//!
//! The environment only lets a destination be created once per pass, but a
//! manifest like `META-INF/services/com.acme.Plugin` receives entries from
//! many unrelated templates and from earlier build rounds. A [`ServiceFile`]
//! therefore only collects lines while the pass runs. At the end of the pass
//! [`ServiceFile::complete`] folds in whatever was committed before, drops
//! comments, blanks and duplicates, and writes the merged manifest once.

use std::io::{Read, Write};

use indexmap::IndexSet;

use crate::error::OutputError;
use crate::key::TargetKey;
use crate::sink::{Location, OutputSink};

/// Line collector for one shared resource
#[derive(Debug)]
pub struct ServiceFile {
    key: TargetKey,
    lines: Vec<String>,
}

impl ServiceFile {
    pub fn new(key: TargetKey) -> Self {
        Self {
            key,
            lines: Vec::new(),
        }
    }

    pub fn key(&self) -> &TargetKey {
        &self.key
    }

    /// Lines contributed so far, duplicates included
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Append one contribution, split on `\n`
    pub fn contribute(&mut self, text: &str) {
        let before = self.lines.len();
        self.lines.extend(
            text.split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string()),
        );
        tracing::debug!(
            key = %self.key,
            lines = self.lines.len() - before,
            "contributed to resource"
        );
    }

    /// Merge prior content with the contributions and write the result
    ///
    /// Returns the entries that were written.
    pub fn complete<S>(&mut self, sink: &mut S) -> Result<Vec<String>, OutputError>
    where
        S: OutputSink + ?Sized,
    {
        let mut entries: IndexSet<String> = IndexSet::new();
        self.read_existing_entries_into(sink, &mut entries);
        entries.extend(self.lines.iter().cloned());
        entries.shift_remove("");

        let mut text = String::new();
        for entry in &entries {
            text.push_str(entry);
            text.push('\n');
        }

        let mut writer = sink.create(
            Location::ClassOutput,
            self.key.namespace(),
            self.key.relative_name(),
        )?;
        writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| OutputError::io(&self.key, e))?;
        tracing::info!(key = %self.key, entries = entries.len(), "committed resource");

        Ok(entries.into_iter().collect())
    }

    fn read_existing_entries_into<S>(&self, sink: &mut S, entries: &mut IndexSet<String>)
    where
        S: OutputSink + ?Sized,
    {
        let mut existing = String::new();
        let read = sink
            .open(
                Location::ClassOutput,
                self.key.namespace(),
                self.key.relative_name(),
            )
            .ok()
            .and_then(|mut reader| reader.read_to_string(&mut existing).ok());
        // Unreadable prior content is treated as absent.
        if read.is_none() {
            return;
        }
        entries.extend(
            existing
                .lines()
                .filter(|line| !is_comment(line))
                .map(str::to_string),
        );
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}
