//! Pass-wide table of output targets

use crate::cache::TargetCache;
use crate::error::OutputError;
use crate::key::TargetKey;
use crate::service::ServiceFile;
use crate::sink::OutputSink;
use crate::source::SourceFile;

/// Every output target created during one generation pass
///
/// Built at pass start, handed by reference to whoever renders, and
/// consumed by [`TargetRegistry::finalize`] at pass end.
#[derive(Debug)]
pub struct TargetRegistry {
    sources: TargetCache<SourceFile>,
    resources: TargetCache<ServiceFile>,
    source_extension: String,
}

/// Resources committed by [`TargetRegistry::finalize`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalizeReport {
    /// Keys of the committed resources, in commit order
    pub committed: Vec<TargetKey>,
    /// Total number of entries written across all resources
    pub entries: usize,
}

impl TargetRegistry {
    /// Create an empty registry; `source_extension` is handed to every
    /// source file target
    pub fn new(source_extension: impl Into<String>) -> Self {
        Self {
            sources: TargetCache::new(),
            resources: TargetCache::new(),
            source_extension: source_extension.into(),
        }
    }

    /// Source file target for `key`, created on first request
    pub fn source_file(&mut self, key: &TargetKey) -> &mut SourceFile {
        let extension = &self.source_extension;
        self.sources
            .get_or_insert_with(key, |k| SourceFile::new(k.clone(), extension.as_str()))
    }

    /// Shared resource target for `key`, created on first request
    ///
    /// A resource name ending in `/` names a directory, not a file, and is
    /// refused before anything is cached.
    pub fn service_file(&mut self, key: &TargetKey) -> Result<&mut ServiceFile, OutputError> {
        self.resources.get_or_try_insert_with(key, |k| {
            if k.relative_name().ends_with('/') {
                return Err(OutputError::construction(k, "resource name is a directory"));
            }
            Ok(ServiceFile::new(k.clone()))
        })
    }

    pub fn sources(&self) -> &TargetCache<SourceFile> {
        &self.sources
    }

    pub fn resources(&self) -> &TargetCache<ServiceFile> {
        &self.resources
    }

    /// Commit every shared resource, in creation order
    ///
    /// Source files commit themselves as soon as they are rendered and are
    /// not touched here. The first failure aborts the remaining commits.
    pub fn finalize<S>(mut self, sink: &mut S) -> Result<FinalizeReport, OutputError>
    where
        S: OutputSink + ?Sized,
    {
        let mut report = FinalizeReport::default();
        for file in self.resources.values_mut() {
            let written = file.complete(sink)?;
            report.entries += written.len();
            report.committed.push(file.key().clone());
        }
        tracing::debug!(
            sources = self.sources.len(),
            resources = report.committed.len(),
            "finalized generation pass"
        );
        Ok(report)
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new("java")
    }
}
