//! Incremental hasher for the [SHA-256] hash function.
//!
//! [SHA-256]: https://tools.ietf.org/html/rfc6234

use std::cmp::min;
use std::convert::TryInto;
use std::fmt;
use std::io;
use std::str::FromStr;

use log::{debug, trace, warn};

use crate::compress::{Compress, Soft, State, IV};
use crate::error::Error;
use crate::{BLOCK_LEN, DIGEST_LEN};

/// Offset of the 64-bit message length inside the final block.
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// Chunk size used when draining a reader.
const READ_CHUNK: usize = 8192;

/// The output of a SHA-256 invocation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    /// Serializes the state words big-endian, word 0 first.
    fn from_state(state: &State) -> Self {
        let mut out = [0u8; DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Digest(out)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({:x})", self)
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut out).map_err(|_| Error::InvalidHex)?;
        Ok(Digest(out))
    }
}

/// A streaming SHA-256 hasher.
///
/// Input is buffered until a full block is available; complete blocks are handed to the
/// compression function `C` as soon as they are seen, so memory use does not grow with the
/// input. Once [`finalize`](Sha256::finalize) has produced a digest the hasher rejects
/// further input until it is [`reset`](Sha256::reset).
#[derive(Clone, Debug)]
pub struct Sha256<C: Compress = Soft> {
    compressor: C,
    state: State,
    buffer: [u8; BLOCK_LEN],
    buffer_len: usize,
    /// Bits in the blocks already compressed; the buffered tail is not included.
    bit_len: u64,
    finalized: bool,
}

impl Sha256 {
    /// Create a new hasher instance.
    pub fn new() -> Self {
        Self::with_compressor(Soft)
    }
}

impl<C: Compress + Default> Default for Sha256<C> {
    fn default() -> Self {
        Self::with_compressor(C::default())
    }
}

impl<C: Compress> Sha256<C> {
    /// Create a new hasher instance backed by the given compression function.
    pub fn with_compressor(compressor: C) -> Self {
        Sha256 {
            compressor,
            state: IV,
            buffer: [0u8; BLOCK_LEN],
            buffer_len: 0,
            bit_len: 0,
            finalized: false,
        }
    }

    /// Returns the hasher to its initial state, keeping the compressor.
    pub fn reset(&mut self) {
        self.state = IV;
        self.buffer = [0u8; BLOCK_LEN];
        self.buffer_len = 0;
        self.bit_len = 0;
        self.finalized = false;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of message bytes consumed so far.
    pub fn message_len(&self) -> u64 {
        self.bit_len / 8 + self.buffer_len as u64
    }

    /// Total message length in bits if `extra` more bytes were appended, or `None` if that
    /// length no longer fits in the 64-bit length field.
    fn bits_after(&self, extra: usize) -> Option<u64> {
        (self.buffer_len as u64)
            .checked_add(extra as u64)?
            .checked_mul(8)?
            .checked_add(self.bit_len)
    }

    fn process_block(&mut self, block: &[u8; BLOCK_LEN]) {
        self.compressor.compress(&mut self.state, block);
        self.bit_len += (BLOCK_LEN * 8) as u64;
    }

    /// Digest data, updating the internal state.
    ///
    /// Splitting a message across several calls gives the same digest as a single call
    /// with the concatenated input. On error nothing is consumed.
    pub fn update(&mut self, mut data: &[u8]) -> Result<(), Error> {
        if self.finalized {
            warn!("update on a finalized hasher rejected");
            return Err(Error::Finalized);
        }
        if self.bits_after(data.len()).is_none() {
            warn!(
                "update of {} bytes rejected: message length exceeds 2^64 bits",
                data.len()
            );
            return Err(Error::InputTooLarge);
        }
        trace!("update: {} bytes, {} buffered", data.len(), self.buffer_len);

        // Fill the current block, if possible.
        let remaining = BLOCK_LEN - self.buffer_len;
        let (l, r) = data.split_at(min(remaining, data.len()));
        self.buffer[self.buffer_len..self.buffer_len + l.len()].copy_from_slice(l);
        self.buffer_len += l.len();
        data = r;

        // If we still don't have a full block, we are done.
        if self.buffer_len < BLOCK_LEN {
            return Ok(());
        }

        // Process the now-full current block.
        let block = self.buffer;
        self.process_block(&block);
        self.buffer_len = 0;

        // Process any additional full blocks straight from the input.
        let mut chunks_iter = data.chunks_exact(BLOCK_LEN);
        let mut flushed = 1;
        for chunk in &mut chunks_iter {
            self.process_block(chunk.try_into().expect("chunk.len() == BLOCK_LEN"));
            flushed += 1;
        }

        // Cache the remaining partial block, if any.
        let rem = chunks_iter.remainder();
        self.buffer[..rem.len()].copy_from_slice(rem);
        self.buffer_len = rem.len();
        trace!("update: compressed {} blocks, {} buffered", flushed, self.buffer_len);

        Ok(())
    }

    /// Feeds everything `reader` yields into the hasher and returns the number of bytes read.
    pub fn update_reader<R: io::Read>(&mut self, mut reader: R) -> Result<u64, Error> {
        let mut chunk = [0u8; READ_CHUNK];
        let mut total = 0u64;
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.update(&chunk[..n])?;
            total += n as u64;
        }
        Ok(total)
    }

    /// Pads the buffered tail, runs the final compression(s) and returns the digest.
    ///
    /// The hasher is marked finalized; calling this again, or calling
    /// [`update`](Sha256::update), fails with [`Error::Finalized`].
    pub fn finalize(&mut self) -> Result<Digest, Error> {
        if self.finalized {
            warn!("finalize on a finalized hasher rejected");
            return Err(Error::Finalized);
        }
        let tail = self.buffer_len;
        let bit_len = self.bits_after(0).ok_or(Error::InputTooLarge)?;

        let mut first = [0u8; BLOCK_LEN];
        first[..tail].copy_from_slice(&self.buffer[..tail]);
        first[tail] = 0x80;

        // No room for the length after the marker: the marker block goes out on its own
        // and the length travels in a fresh all-zero block.
        let extra_block = tail >= LENGTH_OFFSET;
        let mut last = if extra_block {
            self.compressor.compress(&mut self.state, &first);
            [0u8; BLOCK_LEN]
        } else {
            first
        };
        last[LENGTH_OFFSET..].copy_from_slice(&bit_len.to_be_bytes());
        self.compressor.compress(&mut self.state, &last);

        self.finalized = true;
        debug!(
            "finalize: {} message bits, extra padding block: {}",
            bit_len, extra_block
        );
        Ok(Digest::from_state(&self.state))
    }

    /// Finalizes, then resets the hasher so it can take the next message.
    pub fn finalize_reset(&mut self) -> Result<Digest, Error> {
        let digest = self.finalize()?;
        self.reset();
        Ok(digest)
    }
}

impl<C: Compress> io::Write for Sha256<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Convenience function to compute the hash of `data`. It handles hasher creation, data
/// feeding and finalization.
pub fn digest(data: &[u8]) -> Result<Digest, Error> {
    let mut hasher = Sha256::new();
    hasher.update(data)?;
    hasher.finalize()
}
