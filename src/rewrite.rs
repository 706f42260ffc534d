//! Post-processing applied to generated source before it is committed

/// Text transform run over a source file's buffer right before commit
pub trait Rewrite {
    fn rewrite(&self, text: &str) -> String;
}

impl<F> Rewrite for F
where
    F: Fn(&str) -> String,
{
    fn rewrite(&self, text: &str) -> String {
        self(text)
    }
}

/// Leaves text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Rewrite for Identity {
    fn rewrite(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Strips trailing whitespace from every line
///
/// The final line terminator, if any, is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimTrailingWhitespace;

impl Rewrite for TrimTrailingWhitespace {
    fn rewrite(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut lines = text.split('\n').peekable();
        while let Some(line) = lines.next() {
            out.push_str(line.trim_end());
            if lines.peek().is_some() {
                out.push('\n');
            }
        }
        out
    }
}
