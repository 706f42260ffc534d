//! Operations invoked by the template engine during a generation pass
//!
//! [`Output`] is the only type a template engine needs: it routes rendered
//! bodies to source file and service manifest targets, forwards diagnostics,
//! and hands out the shaping combinators configured for the pass.
//!
//! # Example
//!
//! ```rust
//! use codegen_output::{Location, MemorySink, Output, OutputConfig};
//!
//! let mut sink = MemorySink::new();
//! let mut output = Output::new(&mut sink, OutputConfig::default());
//!
//! output
//!     .bind_source("com.acme", "Foo", |out| out.out("class Foo {}\n"))
//!     .unwrap();
//! output
//!     .bind_service("com.acme.Plugin", |out| out.out("com.acme.FooPlugin"))
//!     .unwrap();
//! let summary = output.finish().unwrap();
//!
//! assert_eq!(summary.sources_written, 1);
//! assert_eq!(
//!     sink.contents(Location::ClassOutput, "META-INF/services/com.acme.Plugin").as_deref(),
//!     Some("com.acme.FooPlugin\n")
//! );
//! ```

use std::io::{self, Write};

use crate::config::OutputConfig;
use crate::error::OutputError;
use crate::key::TargetKey;
use crate::registry::TargetRegistry;
use crate::rewrite::{Identity, Rewrite};
use crate::shaping::{Invocation, Shaping};
use crate::sink::{OutputSink, Severity};
use crate::source::CommitOutcome;

/// Counters collected over one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub sources_written: usize,
    pub sources_regenerated: usize,
    pub source_collisions: usize,
    pub resources_committed: usize,
    pub resource_entries: usize,
}

impl PassSummary {
    fn record(&mut self, outcome: CommitOutcome) {
        match outcome {
            CommitOutcome::Written => self.sources_written += 1,
            CommitOutcome::Regenerated => self.sources_regenerated += 1,
            CommitOutcome::Collision => self.source_collisions += 1,
        }
    }
}

/// Generation-facing façade over one pass's target registry
pub struct Output<'s, S: OutputSink + ?Sized, R = Identity> {
    sink: &'s mut S,
    rewrite: R,
    config: OutputConfig,
    registry: TargetRegistry,
    console: Box<dyn Write>,
    summary: PassSummary,
}

impl<'s, S: OutputSink + ?Sized> Output<'s, S, Identity> {
    /// Start a pass writing through `sink`
    pub fn new(sink: &'s mut S, config: OutputConfig) -> Self {
        let registry = TargetRegistry::new(config.source_extension.as_str());
        Self {
            sink,
            rewrite: Identity,
            config,
            registry,
            console: Box::new(io::stdout()),
            summary: PassSummary::default(),
        }
    }
}

impl<'s, S: OutputSink + ?Sized, R: Rewrite> Output<'s, S, R> {
    /// Use `rewrite` as the post-processing step for source files
    pub fn with_rewrite<R2: Rewrite>(self, rewrite: R2) -> Output<'s, S, R2> {
        Output {
            sink: self.sink,
            rewrite,
            config: self.config,
            registry: self.registry,
            console: self.console,
            summary: self.summary,
        }
    }

    /// Send console messages somewhere other than stdout
    pub fn with_console(mut self, console: Box<dyn Write>) -> Self {
        self.console = console;
        self
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Counters so far; resource counters are filled in by [`Output::finish`]
    pub fn summary(&self) -> PassSummary {
        self.summary
    }

    /// Render `body` into the source file `package.simple_name` and commit it
    ///
    /// Collisions and identical regenerations are reported through the sink
    /// and returned as a [`CommitOutcome`]; only fatal failures are `Err`.
    pub fn bind_source<F>(
        &mut self,
        package: &str,
        simple_name: &str,
        body: F,
    ) -> Result<CommitOutcome, OutputError>
    where
        F: FnOnce(&mut Invocation),
    {
        let key = TargetKey::new(package, simple_name)?;
        let mut invocation = Invocation::new();
        body(&mut invocation);

        let file = self.registry.source_file(&key);
        if !file.is_committed() {
            file.append(invocation.output());
        }
        let outcome = file.complete(&mut *self.sink, &self.rewrite)?;
        self.summary.record(outcome);
        Ok(outcome)
    }

    /// Render `body` into the service manifest for `interface_name`
    ///
    /// Nothing is written until [`Output::finish`].
    pub fn bind_service<F>(&mut self, interface_name: &str, body: F) -> Result<(), OutputError>
    where
        F: FnOnce(&mut Invocation),
    {
        if interface_name.is_empty() {
            return Err(OutputError::invalid_key("service interface name is empty"));
        }
        let key = TargetKey::new(
            "",
            format!("{}{}", self.config.service_prefix, interface_name),
        )?;
        let mut invocation = Invocation::new();
        body(&mut invocation);

        self.registry
            .service_file(&key)?
            .contribute(invocation.output());
        Ok(())
    }

    /// Report an error diagnostic
    pub fn error(&mut self, message: &str) {
        self.sink.report(Severity::Error, message.trim());
    }

    /// Print a message for the developer running the generator
    ///
    /// This does not go through the diagnostic channel.
    pub fn console(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.console, "{}", message.trim())
    }

    /// Line-shortening combinator using the configured width budget
    pub fn lines_shortable(&self) -> Shaping {
        Shaping::LinesShortable {
            limit: self.config.line_limit,
        }
    }

    /// Commit every service manifest and end the pass
    pub fn finish(self) -> Result<PassSummary, OutputError> {
        let mut summary = self.summary;
        let report = self.registry.finalize(&mut *self.sink)?;
        summary.resources_committed = report.committed.len();
        summary.resource_entries = report.entries;
        tracing::info!(
            sources = summary.sources_written,
            regenerated = summary.sources_regenerated,
            collisions = summary.source_collisions,
            resources = summary.resources_committed,
            "generation pass complete"
        );
        Ok(summary)
    }
}
