//! PltSink - writes records as tab-separated rows to one `.plt` file

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use contracts::{ClassifiedRecord, ConvertError, RecordSink};

/// Sink owning one `.plt` destination file.
///
/// The row transform is selected by record variant: coordinate and header
/// tokens pass through byte-identical, index triples are shifted from
/// 1-based to 0-based. Output is flushed after every row so the destination
/// never holds back a written record.
pub struct PltSink {
    name: String,
    path: PathBuf,
    writer: BufWriter<File>,
}

impl PltSink {
    /// Create the destination file (truncating any existing one) and the
    /// sink that owns it.
    pub fn create(name: impl Into<String>, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;

        Ok(Self {
            name: name.into(),
            path,
            writer: BufWriter::new(file),
        })
    }

    fn render_row(&self, record: &ClassifiedRecord) -> Result<String, ConvertError> {
        match record {
            ClassifiedRecord::Coordinate { x, y, z } => Ok(format!("{x}\t{y}\t{z}\n")),
            ClassifiedRecord::Header { n1, n2 } => Ok(format!("{n1}\t{n2}\n")),
            ClassifiedRecord::IndexTriple { a, b, c } => {
                let a = shift_index(a)?;
                let b = shift_index(b)?;
                let c = shift_index(c)?;
                Ok(format!("{a}\t{b}\t{c}\n"))
            }
            ClassifiedRecord::Singleton | ClassifiedRecord::Unrecognized => Err(
                ConvertError::sink_write(&self.name, "record has no row representation"),
            ),
        }
    }

    fn io_error(&self, e: std::io::Error) -> ConvertError {
        ConvertError::sink_write(
            &self.name,
            format!("{}: {e}", self.path.display()),
        )
    }
}

/// Shift one index token from 1-based to 0-based.
///
/// The token already matched the integer pattern, so failures here are
/// either overflow or the `0` underflow boundary; both are fatal.
fn shift_index(token: &str) -> Result<u64, ConvertError> {
    let n: u64 = token
        .parse()
        .map_err(|e: std::num::ParseIntError| ConvertError::numeric_parse(token, e.to_string()))?;

    n.checked_sub(1).ok_or_else(|| {
        ConvertError::numeric_parse(token, "index 0 underflows the 1-based to 0-based shift")
    })
}

impl RecordSink for PltSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "plt_sink_write", skip(self, record), fields(sink = %self.name))]
    async fn write(&mut self, record: &ClassifiedRecord) -> Result<(), ConvertError> {
        let row = self.render_row(record)?;
        self.writer
            .write_all(row.as_bytes())
            .map_err(|e| self.io_error(e))?;
        // Flush per record: every written row is immediately visible to
        // readers of the destination.
        self.writer.flush().map_err(|e| self.io_error(e))
    }

    #[instrument(name = "plt_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ConvertError> {
        self.writer.flush().map_err(|e| self.io_error(e))
    }

    #[instrument(name = "plt_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ConvertError> {
        self.writer.flush().map_err(|e| self.io_error(e))?;
        debug!(sink = %self.name, path = %self.path.display(), "PltSink closed");
        Ok(())
    }
}
