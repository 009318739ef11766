//! `AppendBuffer`: Single-write frame accumulator for ANSI output.

use crate::error::AllocError;
use std::io::{self, Write};

/// Factor applied after growing by the needed increment.
pub const ABUF_GROWTH_RATE: usize = 2;

/// Byte accumulator for one rendered frame.
///
/// All output for a frame is appended here and then handed to the terminal
/// in one flush, so the user never sees a half-drawn screen.
///
/// Capacity follows its own schedule: when an append does not fit, the
/// capacity grows by the missing amount and is then multiplied by
/// [`ABUF_GROWTH_RATE`].
#[derive(Default)]
pub struct AppendBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl AppendBuffer {
    /// Create an empty buffer. Nothing is allocated until the first append.
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
        }
    }

    /// Get the buffer contents, `buffer[0..len)`.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical capacity. Always `>= len()`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append raw bytes. Empty input is a no-op.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), AllocError> {
        if bytes.is_empty() {
            return Ok(());
        }
        let needed = self.data.len() + bytes.len();
        if needed > self.capacity {
            let target = (self.capacity + bytes.len()).saturating_mul(ABUF_GROWTH_RATE);
            self.data
                .try_reserve_exact(target - self.data.len())
                .map_err(|source| AllocError {
                    requested: target,
                    source,
                })?;
            self.capacity = target;
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Append a string.
    #[inline]
    pub fn append_str(&mut self, s: &str) -> Result<(), AllocError> {
        self.append(s.as_bytes())
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) -> Result<(), AllocError> {
        self.append(b"\x1b[?25l")
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) -> Result<(), AllocError> {
        self.append(b"\x1b[?25h")
    }

    /// Move the cursor to the top-left corner.
    #[inline]
    pub fn cursor_home(&mut self) -> Result<(), AllocError> {
        self.append(b"\x1b[H")
    }

    /// Clear from the cursor to the end of the line.
    #[inline]
    pub fn clear_line(&mut self) -> Result<(), AllocError> {
        self.append(b"\x1b[K")
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) -> Result<(), AllocError> {
        self.append(b"\x1b[0m")
    }

    /// Drop the contents but keep the storage for the next frame.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Free the storage and zero both length and capacity.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.capacity = 0;
    }

    /// Send the whole buffer to `writer`.
    ///
    /// `write` is called repeatedly until every byte is accepted. A write
    /// that accepts zero bytes is an error; interrupted writes are retried.
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut rest = self.data.as_slice();
        while !rest.is_empty() {
            match writer.write(rest) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "terminal accepted no bytes",
                    ));
                }
                Ok(n) => rest = &rest[n..],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        writer.flush()?;
        tracing::trace!(bytes = self.data.len(), "frame flushed");
        Ok(self.data.len())
    }
}

impl std::fmt::Debug for AppendBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppendBuffer")
            .field("len", &self.data.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
