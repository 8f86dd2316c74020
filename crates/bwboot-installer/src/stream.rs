use std::io::{self, Read, Write};

use anyhow::Result;
use bwboot_core::CancelToken;

const COPY_CHUNK_SIZE: usize = 64 * 1024;

/// Chunked copy that re-checks the cancellation token between chunks, so a
/// cancel lands without waiting for the stream to drain.
pub(crate) fn copy_cancellable(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    token: &CancelToken,
) -> Result<u64> {
    let mut buf = [0u8; COPY_CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        token.ensure_active()?;
        let read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        writer.write_all(&buf[..read])?;
        total += read as u64;
    }
    Ok(total)
}

/// Writer wrapper handed across the unpacker seam so entry extraction stays
/// cancellable even though the seam itself knows nothing about tokens.
pub(crate) struct CancelWriter<'a, W: Write> {
    inner: W,
    token: &'a CancelToken,
}

impl<'a, W: Write> CancelWriter<'a, W> {
    pub(crate) fn new(inner: W, token: &'a CancelToken) -> Self {
        Self { inner, token }
    }

    pub(crate) fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CancelWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.token.is_cancelled() {
            return Err(io::Error::other("write cancelled"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
