//! Writers for converted containers.

use std::io::Write;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::normalized::NormalizedContainer;

/// NDJSON (Newline Delimited JSON) writer
///
/// Writes one container per line.
pub struct NdjsonWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Write a single container as an NDJSON line
    pub fn write(&mut self, container: &NormalizedContainer) -> Result<()> {
        let json = serde_json::to_string(container)?;
        writeln!(self.writer, "{}", json)?;
        self.written += 1;
        Ok(())
    }

    /// Number of containers written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.written)
    }
}

/// JSON array writer
///
/// Writes containers as elements of one JSON array.
pub struct JsonArrayWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonArrayWriter<W> {
    /// Create a new JSON array writer and write the opening bracket
    pub fn new(mut writer: W) -> Result<Self> {
        write!(writer, "[")?;
        Ok(Self { writer, written: 0 })
    }

    pub fn write(&mut self, container: &NormalizedContainer) -> Result<()> {
        if self.written > 0 {
            write!(self.writer, ",")?;
        }

        let json = serde_json::to_string(container)?;
        write!(self.writer, "{}", json)?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Close the array and flush
    pub fn finish(mut self) -> Result<usize> {
        writeln!(self.writer, "]")?;
        self.writer.flush()?;
        Ok(self.written)
    }
}

/// Write all containers in the given format, returning how many were written
pub fn write_containers<W: Write>(
    writer: W,
    format: OutputFormat,
    containers: &[NormalizedContainer],
) -> Result<usize> {
    match format {
        OutputFormat::Ndjson => {
            let mut out = NdjsonWriter::new(writer);
            for container in containers {
                out.write(container)?;
            }
            out.finish()
        }
        OutputFormat::Json => {
            let mut out = JsonArrayWriter::new(writer)?;
            for container in containers {
                out.write(container)?;
            }
            out.finish()
        }
    }
}
