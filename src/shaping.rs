//! Rendering surface and text-shaping combinators
//!
//! Templates write into an [`Invocation`]. A [`Shaping`] post-processes a
//! piece of content before it reaches the enclosing invocation. When the
//! content came from a renderer rather than plain text, that renderer is
//! kept as the "original" so a combinator can re-run it in place instead of
//! emitting the flattened text.

use std::borrow::Cow;

/// Default width budget for [`Shaping::LinesShortable`]
pub const LINE_LIMIT: usize = 100;

/// Output buffer of one template invocation
///
/// The indentation of the line currently being written only narrows the
/// width budget of line-shortening. It is the leading whitespace of the last
/// line written so far; before the first newline the starting indentation
/// given to [`Invocation::with_indentation`] comes first.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    out: String,
    base_indentation: String,
}

impl Invocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an invocation whose current line is indented by `indentation`
    pub fn with_indentation(indentation: impl Into<String>) -> Self {
        Self {
            out: String::new(),
            base_indentation: indentation.into(),
        }
    }

    /// Append text to the output
    pub fn out(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Indentation of the line currently being written
    pub fn indentation(&self) -> Cow<'_, str> {
        match self.out.rfind('\n') {
            Some(newline) => Cow::Borrowed(leading_indentation(&self.out[newline + 1..])),
            None => {
                let leading = leading_indentation(&self.out);
                if self.base_indentation.is_empty() {
                    Cow::Borrowed(leading)
                } else if leading.is_empty() {
                    Cow::Borrowed(&self.base_indentation)
                } else {
                    Cow::Owned(format!("{}{}", self.base_indentation, leading))
                }
            }
        }
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn into_output(self) -> String {
        self.out
    }
}

fn leading_indentation(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

/// Something that writes into an invocation
pub trait Render {
    fn render(&self, invocation: &mut Invocation);
}

impl<F> Render for F
where
    F: Fn(&mut Invocation),
{
    fn render(&self, invocation: &mut Invocation) {
        self(invocation)
    }
}

/// Argument to a shaping combinator
#[derive(Clone, Copy)]
pub enum Param<'a> {
    /// Already rendered text; there is no richer form to fall back to
    Text(&'a str),
    /// A renderer; its flattened output is shaped, and it can be re-run
    Fragment(&'a dyn Render),
}

impl<'a> From<&'a str> for Param<'a> {
    fn from(text: &'a str) -> Self {
        Param::Text(text)
    }
}

impl<'a> Param<'a> {
    fn content(&self) -> Cow<'a, str> {
        match *self {
            Param::Text(text) => Cow::Borrowed(text),
            Param::Fragment(renderer) => {
                let mut scratch = Invocation::new();
                renderer.render(&mut scratch);
                Cow::Owned(scratch.into_output())
            }
        }
    }

    fn original(&self) -> Option<&'a dyn Render> {
        match *self {
            Param::Text(_) => None,
            Param::Fragment(renderer) => Some(renderer),
        }
    }
}

/// Closed set of content-shaping combinators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shaping {
    /// Strip leading and trailing whitespace
    Trim,
    /// Emit nothing for all-whitespace content
    Collapsible,
    /// Collapse whitespace runs onto one line if it fits the width budget
    LinesShortable { limit: usize },
}

impl Shaping {
    /// Line-shortening with the default budget
    pub fn lines_shortable() -> Self {
        Shaping::LinesShortable { limit: LINE_LIMIT }
    }

    /// Shape `param` into `invocation`
    pub fn apply(&self, invocation: &mut Invocation, param: Param<'_>) {
        let content = param.content();
        let original = param.original();

        match *self {
            Shaping::Trim => invocation.out(content.trim()),
            Shaping::Collapsible => {
                if content.chars().any(|c| !c.is_whitespace()) {
                    emit_original(invocation, &content, original);
                }
            }
            Shaping::LinesShortable { limit } => {
                let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
                let budget = limit.saturating_sub(invocation.indentation().chars().count());
                if collapsed.chars().count() < budget {
                    invocation.out(&collapsed);
                } else {
                    emit_original(invocation, &content, original);
                }
            }
        }
    }

    /// Shape plain text into a fresh string
    pub fn apply_to_text(&self, text: &str, indentation: &str) -> String {
        let mut invocation = Invocation::with_indentation(indentation);
        self.apply(&mut invocation, Param::Text(text));
        invocation.into_output()
    }
}

fn emit_original(invocation: &mut Invocation, content: &str, original: Option<&dyn Render>) {
    match original {
        Some(renderer) => renderer.render(invocation),
        None => invocation.out(content),
    }
}
