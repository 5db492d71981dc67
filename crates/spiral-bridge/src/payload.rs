//! Outbound transfer payload and its wire format.
//!
//! ```text
//! offset  size   field
//! 0       4      to_len   (u32, big-endian)
//! 4       to_len to       (destination identifier, raw bytes)
//! +0      32     amount   (u256, big-endian)
//! +32     20     sender   (canonical account reference)
//! +52     32     sequence (u256, big-endian)
//! ```
//!
//! The variable-width field is length-prefixed and everything else has a
//! fixed width, so a payload decodes in exactly one way. Decoding demands
//! the exact total length and nothing else: amount and sequence come back
//! as full [`U256`] words, and range policy belongs to the receive path.

use spiral_types::{AccountRef, Amount, Result, SpiralError, U256, constants::SHORT_IDENTIFIER_LEN};

const U256_LEN: usize = 32;

/// The message body carried between ledgers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPayload {
    /// Destination identifier, short- or long-form.
    pub to: Vec<u8>,
    pub amount: U256,
    /// Sender account on the originating ledger.
    pub sender: AccountRef,
    /// Sender's outbound sequence on the originating ledger.
    pub sequence: U256,
}

impl TransferPayload {
    /// Outbound payload from local integer widths.
    #[must_use]
    pub fn new(to: impl Into<Vec<u8>>, amount: Amount, sender: AccountRef, sequence: u64) -> Self {
        Self {
            to: to.into(),
            amount: amount.into(),
            sender,
            sequence: sequence.into(),
        }
    }

    /// Serialize to wire bytes.
    ///
    /// # Errors
    /// Returns `MalformedPayload` if `to` is longer than a `u32` can describe.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let to_len = u32::try_from(self.to.len())
            .map_err(|_| SpiralError::malformed("destination identifier too long"))?;

        let mut out = Vec::with_capacity(Self::encoded_len(self.to.len()));
        out.extend_from_slice(&to_len.to_be_bytes());
        out.extend_from_slice(&self.to);
        out.extend_from_slice(self.amount.as_bytes());
        out.extend_from_slice(self.sender.as_bytes());
        out.extend_from_slice(self.sequence.as_bytes());
        Ok(out)
    }

    /// Parse wire bytes.
    ///
    /// # Errors
    /// Returns `MalformedPayload` on a short or over-long buffer.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let to_len = usize::try_from(u32::from_be_bytes(reader.array()?))
            .map_err(|_| SpiralError::malformed("identifier length overflows usize"))?;
        let to = reader.take(to_len)?.to_vec();
        let amount = U256(reader.array::<U256_LEN>()?);
        let sender = AccountRef(reader.array::<SHORT_IDENTIFIER_LEN>()?);
        let sequence = U256(reader.array::<U256_LEN>()?);
        reader.finish()?;
        Ok(Self {
            to,
            amount,
            sender,
            sequence,
        })
    }

    /// Wire length for a payload whose identifier is `to_len` bytes.
    #[must_use]
    pub const fn encoded_len(to_len: usize) -> usize {
        4 + to_len + U256_LEN + SHORT_IDENTIFIER_LEN + U256_LEN
    }
}

/// Bounds-checked cursor over an input buffer.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                SpiralError::malformed(format!(
                    "needed {n} bytes at offset {}, only {} left",
                    self.pos,
                    self.bytes.len() - self.pos
                ))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn finish(self) -> Result<()> {
        let trailing = self.bytes.len() - self.pos;
        if trailing > 0 {
            return Err(SpiralError::malformed(format!("{trailing} trailing bytes")));
        }
        Ok(())
    }
}
