//! In-memory output sink

use std::cell::RefCell;
use std::collections::HashSet;
use std::io::{self, Cursor, Read, Write};
use std::rc::Rc;

use indexmap::IndexMap;

use super::{resolve_path, Diagnostics, Location, OutputSink, Severity, SinkResult};
use crate::error::SinkError;

type Buffer = Rc<RefCell<Vec<u8>>>;

/// Output table held in memory
///
/// Content stays readable across passes; only the write-once locks are
/// reset by [`MemorySink::next_pass`].
#[derive(Debug, Default)]
pub struct MemorySink {
    files: IndexMap<(Location, String), Buffer>,
    created: HashSet<(Location, String)>,
    diagnostics: Diagnostics,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place content committed by an earlier build
    pub fn seed(&mut self, location: Location, path: &str, contents: &str) {
        self.files.insert(
            (location, path.to_string()),
            Rc::new(RefCell::new(contents.as_bytes().to_vec())),
        );
    }

    /// Place content the environment already generated in this pass
    ///
    /// The destination is readable and refuses a further `create`.
    pub fn seed_generated(&mut self, location: Location, path: &str, contents: &str) {
        self.seed(location, path, contents);
        self.created.insert((location, path.to_string()));
    }

    /// Start a new pass: unlock every destination, keep all content
    pub fn next_pass(&mut self) {
        self.created.clear();
    }

    /// Committed content at a resolved path
    pub fn contents(&self, location: Location, path: &str) -> Option<String> {
        self.files
            .get(&(location, path.to_string()))
            .map(|buffer| String::from_utf8_lossy(&buffer.borrow()).into_owned())
    }

    /// All paths holding content for a location, in first-write order
    pub fn paths(&self, location: Location) -> Vec<&str> {
        self.files
            .keys()
            .filter(|(loc, _)| *loc == location)
            .map(|(_, path)| path.as_str())
            .collect()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

impl OutputSink for MemorySink {
    fn create(
        &mut self,
        location: Location,
        namespace: &str,
        name: &str,
    ) -> SinkResult<Box<dyn Write>> {
        let path = resolve_path(namespace, name);
        if !self.created.insert((location, path.clone())) {
            return Err(SinkError::DestinationExists { path });
        }
        tracing::debug!(%location, path = %path, "opened destination");
        let buffer: Buffer = Rc::default();
        self.files.insert((location, path), Rc::clone(&buffer));
        Ok(Box::new(SharedWriter(buffer)))
    }

    fn open(
        &mut self,
        location: Location,
        namespace: &str,
        name: &str,
    ) -> SinkResult<Box<dyn Read>> {
        let path = resolve_path(namespace, name);
        match self.files.get(&(location, path.clone())) {
            Some(buffer) => Ok(Box::new(Cursor::new(buffer.borrow().clone()))),
            None => Err(SinkError::NotFound { path }),
        }
    }

    fn report(&mut self, severity: Severity, message: &str) {
        super::trace_diagnostic(severity, message);
        self.diagnostics.push(severity, message);
    }
}

struct SharedWriter(Buffer);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
