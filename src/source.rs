//! Single-emission writer for generated source files
//!
//! A [`SourceFile`] collects the text rendered for one `(package, simple
//! name)` pair and commits it exactly once. When the environment refuses the
//! write because the destination already exists, the previously committed
//! copy is read back: identical content is a harmless regeneration (reported
//! as a warning), anything else is a name collision (reported as an error).
//! Neither case is returned as an `Err`; only unexpected I/O failures are.

use std::io::{Read, Write};

use crate::error::{OutputError, SinkError};
use crate::key::TargetKey;
use crate::rewrite::Rewrite;
use crate::sink::{Location, OutputSink, Severity};

/// What happened when a target was committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Content was written to a fresh destination
    Written,
    /// The destination already held identical content
    Regenerated,
    /// The destination already held different content
    Collision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Committed,
}

/// Buffer and commit logic for one generated source file
#[derive(Debug)]
pub struct SourceFile {
    key: TargetKey,
    extension: String,
    buffer: String,
    state: State,
}

impl SourceFile {
    /// Create an open source file target; `extension` locates the committed
    /// copy for the identical-content check
    pub fn new(key: TargetKey, extension: impl Into<String>) -> Self {
        Self {
            key,
            extension: extension.into(),
            buffer: String::new(),
            state: State::Open,
        }
    }

    pub fn key(&self) -> &TargetKey {
        &self.key
    }

    /// Text accumulated so far
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_committed(&self) -> bool {
        self.state == State::Committed
    }

    /// Append rendered text
    pub fn append(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Mutable access to the buffer for renderers writing in place
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    /// Path of the committed copy, relative to the source output root
    pub fn committed_path(&self) -> String {
        format!(
            "{}{}.{}",
            self.key.namespace_path(),
            self.key.relative_name(),
            self.extension
        )
    }

    /// Rewrite the buffer and commit it through `sink`
    ///
    /// A target is written at most once. Completing an already committed
    /// target reports a collision without touching the sink.
    pub fn complete<S, R>(
        &mut self,
        sink: &mut S,
        rewrite: &R,
    ) -> Result<CommitOutcome, OutputError>
    where
        S: OutputSink + ?Sized,
        R: Rewrite + ?Sized,
    {
        if self.state == State::Committed {
            let message = collision_message(&self.key, "already committed in this pass");
            tracing::error!(key = %self.key, "source file completed twice");
            sink.report(Severity::Error, &message);
            return Ok(CommitOutcome::Collision);
        }
        self.state = State::Committed;

        let source = rewrite.rewrite(&self.buffer);
        let file_name = format!("{}.{}", self.key.relative_name(), self.extension);

        match sink.create(Location::SourceOutput, self.key.namespace(), &file_name) {
            Ok(mut writer) => {
                writer
                    .write_all(source.as_bytes())
                    .and_then(|()| writer.flush())
                    .map_err(|e| OutputError::io(&self.key, e))?;
                tracing::info!(key = %self.key, bytes = source.len(), "committed source file");
                Ok(CommitOutcome::Written)
            }
            Err(err @ SinkError::DestinationExists { .. }) => {
                if self.identical_file_is_already_generated(sink, &source) {
                    sink.report(
                        Severity::Warning,
                        &format!("Regenerated file with the same content: {}", self.key),
                    );
                    Ok(CommitOutcome::Regenerated)
                } else {
                    sink.report(Severity::Error, &collision_message(&self.key, &err));
                    Ok(CommitOutcome::Collision)
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    fn identical_file_is_already_generated<S>(&self, sink: &mut S, source: &str) -> bool
    where
        S: OutputSink + ?Sized,
    {
        // Any failure here just means there is nothing to compare against.
        let mut existing = String::new();
        match sink.open(Location::SourceOutput, "", &self.committed_path()) {
            Ok(mut reader) => reader.read_to_string(&mut existing).is_ok() && existing == source,
            Err(_) => false,
        }
    }
}

fn collision_message(key: &TargetKey, cause: impl std::fmt::Display) -> String {
    format!(
        "Generated source file name collision. Attempt to overwrite already generated file: {}, {}",
        key, cause
    )
}
