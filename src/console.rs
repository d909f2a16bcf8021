use std::io::{self, Write};

use crate::config::ENV_API_KEY;
use crate::error::DeployError;

/// Status markers that prefix progress lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Launch,
    Account,
    Search,
    Package,
    Wait,
    Success,
    Failure,
    Notes,
    Web,
}

impl Glyph {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Launch => "🚀",
            Self::Account => "📋",
            Self::Search => "🔍",
            Self::Package => "📦",
            Self::Wait => "⏳",
            Self::Success => "✅",
            Self::Failure => "❌",
            Self::Notes => "📝",
            Self::Web => "🌐",
        }
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes human-readable progress lines.
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Write `"<glyph> <text>"`.
    pub fn line(&mut self, glyph: Glyph, text: &str) -> io::Result<()> {
        writeln!(self.out, "{glyph} {text}")
    }

    /// Write a success line followed by a blank line.
    pub fn success(&mut self, text: &str) -> io::Result<()> {
        self.line(Glyph::Success, text)?;
        self.blank()
    }

    /// Write an indented detail line.
    pub fn detail(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "   {text}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Describe a failed run.
///
/// A missing API key is flagged on `err_out` with export guidance
/// on `out`. Anything else is reported on `err_out` as a failed
/// deployment.
pub fn report_error(
    out: &mut impl Write,
    err_out: &mut impl Write,
    error: &DeployError,
) -> io::Result<()> {
    match error {
        DeployError::EnvMissing(var) if var == ENV_API_KEY => {
            writeln!(
                err_out,
                "{} Error: {ENV_API_KEY} environment variable not set",
                Glyph::Failure
            )?;
            writeln!(out, "Please set your Vultr API key:")?;
            writeln!(out, "  export {ENV_API_KEY}=your_api_key_here")
        }
        other => report_failure(err_out, &other.to_string()),
    }
}

/// Write `"❌ Deployment failed: <message>"` after a blank line.
pub fn report_failure(err_out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(err_out)?;
    writeln!(err_out, "{} Deployment failed: {message}", Glyph::Failure)
}
