//! Directory-backed output sink

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use super::{resolve_path, Diagnostics, Location, OutputSink, Severity, SinkResult};
use crate::error::SinkError;

/// Writes outputs below one root directory per [`Location`]
#[derive(Debug)]
pub struct FsSink {
    source_dir: PathBuf,
    class_dir: PathBuf,
    created: HashSet<PathBuf>,
    diagnostics: Diagnostics,
}

impl FsSink {
    pub fn new(source_dir: impl Into<PathBuf>, class_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            class_dir: class_dir.into(),
            created: HashSet::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Root directory of a location
    pub fn root(&self, location: Location) -> &Path {
        match location {
            Location::SourceOutput => &self.source_dir,
            Location::ClassOutput => &self.class_dir,
        }
    }

    /// Absolute path an output resolves to
    pub fn path_of(&self, location: Location, namespace: &str, name: &str) -> PathBuf {
        self.root(location).join(resolve_path(namespace, name))
    }

    /// Start a new pass: every destination may be created once again
    pub fn next_pass(&mut self) {
        self.created.clear();
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

impl OutputSink for FsSink {
    fn create(
        &mut self,
        location: Location,
        namespace: &str,
        name: &str,
    ) -> SinkResult<Box<dyn Write>> {
        let path = self.path_of(location, namespace, name);
        let shown = path.display().to_string();
        if self.created.contains(&path) {
            return Err(SinkError::DestinationExists { path: shown });
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SinkError::io(&shown, e))?;
        }
        let file = File::create(&path).map_err(|e| SinkError::io(&shown, e))?;
        tracing::debug!(%location, path = %shown, "opened destination");
        self.created.insert(path);
        Ok(Box::new(BufWriter::new(file)))
    }

    fn open(
        &mut self,
        location: Location,
        namespace: &str,
        name: &str,
    ) -> SinkResult<Box<dyn Read>> {
        let path = self.path_of(location, namespace, name);
        match File::open(&path) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SinkError::NotFound {
                path: path.display().to_string(),
            }),
            Err(e) => Err(SinkError::io(path.display().to_string(), e)),
        }
    }

    fn report(&mut self, severity: Severity, message: &str) {
        super::trace_diagnostic(severity, message);
        self.diagnostics.push(severity, message);
    }
}
