//! Codegen Output - the output side of a templated code-generation pass
//!
//! This library decides, for every output a generator produces, whether and
//! how it is written, under two constraints imposed by the build environment:
//!
//! - a destination can be opened for writing only once per pass, yet many
//!   templates contribute to the same shared resource (for example a
//!   `META-INF/services` provider list), possibly across several rounds of
//!   the same build
//! - re-running a pass may re-produce a file that is byte-identical to the
//!   one already generated, which must not be mistaken for a name collision
//!
//! # Example
//!
//! ```rust
//! use codegen_output::{CommitOutcome, Location, MemorySink, Output, OutputConfig};
//!
//! let mut sink = MemorySink::new();
//! sink.seed_generated(Location::SourceOutput, "com/acme/Foo.java", "class Foo {}");
//!
//! let mut output = Output::new(&mut sink, OutputConfig::default());
//! let outcome = output
//!     .bind_source("com.acme", "Foo", |out| out.out("class Foo {}"))
//!     .unwrap();
//! output.finish().unwrap();
//!
//! assert_eq!(outcome, CommitOutcome::Regenerated);
//! assert!(!sink.diagnostics().has_errors());
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod key;
pub mod output;
pub mod plan;
pub mod registry;
pub mod rewrite;
pub mod service;
pub mod shaping;
pub mod sink;
pub mod source;

pub use cache::TargetCache;
pub use config::OutputConfig;
pub use error::{LoadError, OutputError, SinkError};
pub use key::TargetKey;
pub use output::{Output, PassSummary};
pub use plan::GenerationPlan;
pub use registry::{FinalizeReport, TargetRegistry};
pub use rewrite::{Identity, Rewrite, TrimTrailingWhitespace};
pub use service::ServiceFile;
pub use shaping::{Invocation, Param, Render, Shaping};
pub use sink::{Diagnostic, Diagnostics, FsSink, Location, MemorySink, OutputSink, Severity};
pub use source::{CommitOutcome, SourceFile};
