//! Sink that fails in one chosen way, for exercising error paths

use std::io::{self, Cursor, Read, Write};

use super::{Location, MemorySink, OutputSink, Severity, SinkResult};
use crate::error::SinkError;

/// The single operation a [`FaultySink`] breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    /// `create` fails with an I/O error
    Create,
    /// Writing to a created destination fails
    Write,
    /// Flushing a created destination fails
    Flush,
    /// `open` fails with an I/O error
    Open,
    /// Reading an opened destination fails midway
    Read,
    /// Opened content is not valid UTF-8
    InvalidUtf8,
}

/// [`MemorySink`] with one injected fault
pub(crate) struct FaultySink {
    pub(crate) inner: MemorySink,
    fault: Fault,
}

impl FaultySink {
    pub(crate) fn new(fault: Fault) -> Self {
        Self {
            inner: MemorySink::new(),
            fault,
        }
    }
}

fn disk_full() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "disk full")
}

struct BrokenWriter {
    fail_on_flush: bool,
}

impl Write for BrokenWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_on_flush {
            Ok(buf.len())
        } else {
            Err(disk_full())
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(disk_full())
    }
}

struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
    }
}

impl OutputSink for FaultySink {
    fn create(
        &mut self,
        location: Location,
        namespace: &str,
        name: &str,
    ) -> SinkResult<Box<dyn Write>> {
        match self.fault {
            Fault::Create => Err(SinkError::io(name, disk_full())),
            Fault::Write | Fault::Flush => {
                self.inner.create(location, namespace, name)?;
                Ok(Box::new(BrokenWriter {
                    fail_on_flush: self.fault == Fault::Flush,
                }))
            }
            _ => self.inner.create(location, namespace, name),
        }
    }

    fn open(
        &mut self,
        location: Location,
        namespace: &str,
        name: &str,
    ) -> SinkResult<Box<dyn Read>> {
        match self.fault {
            Fault::Open => Err(SinkError::io(name, disk_full())),
            Fault::Read => {
                self.inner.open(location, namespace, name)?;
                Ok(Box::new(BrokenReader))
            }
            Fault::InvalidUtf8 => {
                self.inner.open(location, namespace, name)?;
                Ok(Box::new(Cursor::new(vec![b'x', 0xff, 0xfe, b'\n'])))
            }
            _ => self.inner.open(location, namespace, name),
        }
    }

    fn report(&mut self, severity: Severity, message: &str) {
        self.inner.report(severity, message);
    }
}
