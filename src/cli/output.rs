//! Colored terminal output for release operations
//!
//! Provides consistent, colored CLI output with proper formatting

use std::io::Write;
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose, self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Write `marker message` with the marker in `marker_spec` and the text in `text_spec`.
    fn marked(
        buffer: &mut Buffer,
        marker: &str,
        marker_spec: &ColorSpec,
        text_spec: Option<&ColorSpec>,
        message: &str,
    ) -> std::io::Result<()> {
        buffer.set_color(marker_spec)?;
        write!(buffer, "{}", marker)?;
        buffer.reset()?;
        if let Some(spec) = text_spec {
            buffer.set_color(spec)?;
        }
        writeln!(buffer, " {}", message)?;
        buffer.reset()
    }

    fn emit(
        &self,
        marker: &str,
        marker_spec: ColorSpec,
        text_spec: Option<ColorSpec>,
        message: &str,
    ) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        Self::marked(&mut buffer, marker, &marker_spec, text_spec.as_ref(), message)?;
        self.bufwtr.print(&buffer)
    }

    fn fg(color: Color, bold: bool) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color)).set_bold(bold);
        spec
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.emit("✓", Self::fg(Color::Green, true), None, message)
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.emit(
            "⚠",
            Self::fg(Color::Yellow, true),
            Some(Self::fg(Color::Yellow, false)),
            message,
        )
    }

    /// Print an error message to stderr (always shown)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        let written = Self::marked(
            &mut buffer,
            "✗",
            &Self::fg(Color::Red, true),
            Some(&Self::fg(Color::Red, false)),
            message,
        )
        .and_then(|()| bufwtr.print(&buffer));

        if written.is_err() {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print a verbose/debug message (only in verbose mode)
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.emit(
            "→",
            Self::fg(Color::Blue, false),
            Some(Self::fg(Color::White, false)),
            message,
        )
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.emit("⋯", Self::fg(Color::Magenta, false), None, message)
    }

    /// Echo a subprocess invocation before it runs
    pub fn running(&self, program: &str, args: &[String]) -> std::io::Result<()> {
        let mut line = String::from(program);
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.emit("[running]", Self::fg(Color::Magenta, true), None, &line)
    }

    /// Print a section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer)?;
        buffer.set_color(&Self::fg(Color::Cyan, true))?;
        writeln!(&mut buffer, "═══ {} ═══", title)?;
        buffer.reset()?;
        self.bufwtr.print(&buffer)
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.println(&format!("    {}", message))
    }

    /// Print a plain message (respects quiet mode)
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer, "{}", message)?;
        self.bufwtr.print(&buffer)
    }
}
