use std::io::Write;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::filter::formatter::render_text;
use crate::types::SaleNotification;

/// Separator printed after every text notification.
pub const TEXT_SEPARATOR: &str = "-----";

pub trait NotificationSink {
    fn emit(&mut self, notification: &SaleNotification) -> Result<()>;
}

/// Writes notifications to any `io::Write`, as prose or JSON lines.
pub struct WriterSink<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl<W: Write> NotificationSink for WriterSink<W> {
    fn emit(&mut self, notification: &SaleNotification) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{}", render_text(notification))?;
                writeln!(self.out, "{TEXT_SEPARATOR}")?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, notification)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}
