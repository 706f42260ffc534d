//! TOML generation plans driven by the CLI
//!
//! A plan stands in for a template engine: it lists finished bodies for
//! source files and service manifests and replays them through an
//! [`Output`].
//!
//! ```toml
//! console = ["generating acme plugins"]
//!
//! [[source]]
//! namespace = "com.acme"
//! name = "FooPlugin"
//! body = "package com.acme;\n\nclass FooPlugin {}\n"
//!
//! [[service]]
//! interface = "com.acme.Plugin"
//! body = "com.acme.FooPlugin"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{LoadError, OutputError};
use crate::output::Output;
use crate::rewrite::Rewrite;
use crate::shaping::{Invocation, Param, Shaping};
use crate::sink::OutputSink;

/// Shaping applied to a plan body before it is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Trim,
    Collapsible,
    LinesShortable,
}

/// One generated source file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceEntry {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    pub body: String,
    #[serde(default)]
    pub shape: Option<ShapeKind>,
}

/// One contribution to a service manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceEntry {
    pub interface: String,
    pub body: String,
}

/// Everything one pass should produce
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationPlan {
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceEntry>,
    #[serde(default, rename = "service")]
    pub services: Vec<ServiceEntry>,
    /// Error diagnostics to report
    #[serde(default)]
    pub errors: Vec<String>,
    /// Console messages to print
    #[serde(default)]
    pub console: Vec<String>,
}

impl GenerationPlan {
    /// Load a plan from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load a plan from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    /// Replay the plan through `output`
    ///
    /// Service manifests are only collected; the caller commits them with
    /// [`Output::finish`].
    pub fn run<S, R>(&self, output: &mut Output<'_, S, R>) -> Result<(), OutputError>
    where
        S: OutputSink + ?Sized,
        R: Rewrite,
    {
        for message in &self.console {
            if let Err(e) = output.console(message) {
                tracing::warn!(error = %e, "could not write console message");
            }
        }

        for entry in &self.sources {
            let body = match entry.shape {
                Some(kind) => {
                    let shaping = match kind {
                        ShapeKind::Trim => Shaping::Trim,
                        ShapeKind::Collapsible => Shaping::Collapsible,
                        ShapeKind::LinesShortable => output.lines_shortable(),
                    };
                    let mut invocation = Invocation::new();
                    shaping.apply(&mut invocation, Param::Text(&entry.body));
                    invocation.into_output()
                }
                None => entry.body.clone(),
            };
            output.bind_source(&entry.namespace, &entry.name, |out| out.out(&body))?;
        }

        for entry in &self.services {
            output.bind_service(&entry.interface, |out| out.out(&entry.body))?;
        }

        for message in &self.errors {
            output.error(message);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use crate::sink::{Location, MemorySink};
    use pretty_assertions::assert_eq;

    const PLAN: &str = r#"
errors = ["  plugin Bar has no name  "]

[[source]]
namespace = "com.acme"
name = "FooPlugin"
body = "class FooPlugin {}"

[[source]]
name = "Banner"
body = "   \n  "
shape = "collapsible"

[[service]]
interface = "com.acme.Plugin"
body = "com.acme.FooPlugin"

[[service]]
interface = "com.acme.Plugin"
body = "com.acme.BarPlugin\ncom.acme.FooPlugin"
"#;

    #[test]
    fn test_parse_plan() {
        let plan = GenerationPlan::from_toml(PLAN).expect("Should parse");
        assert_eq!(plan.sources.len(), 2);
        assert_eq!(plan.sources[1].namespace, "");
        assert_eq!(plan.sources[1].shape, Some(ShapeKind::Collapsible));
        assert_eq!(plan.services.len(), 2);
        assert!(plan.console.is_empty());
    }

    #[test]
    fn test_run_plan() {
        let plan = GenerationPlan::from_toml(PLAN).unwrap();
        let mut sink = MemorySink::new();
        let mut output = Output::new(&mut sink, OutputConfig::default());

        plan.run(&mut output).unwrap();
        let summary = output.finish().unwrap();

        assert_eq!(summary.sources_written, 2);
        assert_eq!(summary.resource_entries, 2);
        assert_eq!(
            sink.contents(Location::SourceOutput, "Banner.java").as_deref(),
            Some("")
        );
        assert_eq!(
            sink.contents(Location::ClassOutput, "META-INF/services/com.acme.Plugin")
                .as_deref(),
            Some("com.acme.FooPlugin\ncom.acme.BarPlugin\n")
        );
        let errors: Vec<_> = sink.diagnostics().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(errors, vec!["plugin Bar has no name"]);
    }

    #[test]
    fn test_unknown_shape_rejected() {
        let result = GenerationPlan::from_toml(
            r#"
[[source]]
name = "Foo"
body = ""
shape = "sparkle"
"#,
        );
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_missing_name_rejected() {
        let result = GenerationPlan::from_toml("[[source]]\nbody = \"x\"\n");
        assert!(result.is_err());
    }
}
