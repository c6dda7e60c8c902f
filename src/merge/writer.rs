use std::io::{self, Write};
use std::path::Path;

/// Writes file contents framed by Start/End marker comments
///
/// Each block is laid out as
///
/// ```text
/// \n\n<prefix> ====== Start of <path> ======\n
/// <content, byte for byte>
/// \n<prefix> ====== End of <path> ======\n
/// ```
pub struct FramedWriter<W: Write> {
    inner: W,
    comment_prefix: String,
    bytes_written: u64,
}

impl<W: Write> FramedWriter<W> {
    pub fn new(inner: W, comment_prefix: impl Into<String>) -> Self {
        Self {
            inner,
            comment_prefix: comment_prefix.into(),
            bytes_written: 0,
        }
    }

    pub fn header(&self, path: &Path) -> String {
        format!(
            "\n\n{} ====== Start of {} ======\n",
            self.comment_prefix,
            path.display()
        )
    }

    pub fn footer(&self, path: &Path) -> String {
        format!(
            "\n{} ====== End of {} ======\n",
            self.comment_prefix,
            path.display()
        )
    }

    /// Write one framed block; `content` is copied without any decoding
    pub fn write_file(&mut self, path: &Path, content: &[u8]) -> io::Result<()> {
        let header = self.header(path);
        let footer = self.footer(path);

        self.inner.write_all(header.as_bytes())?;
        self.inner.write_all(content)?;
        self.inner.write_all(footer.as_bytes())?;

        self.bytes_written += (header.len() + content.len() + footer.len()) as u64;
        Ok(())
    }

    /// Total bytes handed to the inner writer so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and hand back the inner writer
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
