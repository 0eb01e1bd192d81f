use bytes::Bytes;
use data_encoding::HEXLOWER;
use thiserror::Error;

/// A BLAKE3 digest. This is both the identity and the address of every object
/// in the store.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct B3Digest(Bytes);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid digest length: {0}")]
    InvalidDigestLen(usize),

    #[error("invalid digest encoding: {0}")]
    InvalidEncoding(String),
}

pub const B3_LEN: usize = 32;

/// Calculates the digest of the given bytes.
/// This is the single content addressing primitive, everything else reduces
/// "equal content" checks to equality of its output.
pub fn digest(data: &[u8]) -> B3Digest {
    blake3::hash(data).into()
}

impl B3Digest {
    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }

    pub fn to_hex(&self) -> String {
        HEXLOWER.encode(&self.0)
    }
}

impl From<B3Digest> for bytes::Bytes {
    fn from(val: B3Digest) -> Self {
        val.0
    }
}

impl From<blake3::Hash> for B3Digest {
    fn from(value: blake3::Hash) -> Self {
        Self(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl TryFrom<Vec<u8>> for B3Digest {
    type Error = Error;

    // constructs a [B3Digest] from a [Vec<u8>].
    // Returns an error if the digest has the wrong length.
    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        if value.len() != B3_LEN {
            Err(Error::InvalidDigestLen(value.len()))
        } else {
            Ok(Self(value.into()))
        }
    }
}

impl TryFrom<bytes::Bytes> for B3Digest {
    type Error = Error;

    // constructs a [B3Digest] from a [bytes::Bytes].
    // Returns an error if the digest has the wrong length.
    fn try_from(value: bytes::Bytes) -> Result<Self, Self::Error> {
        if value.len() != B3_LEN {
            Err(Error::InvalidDigestLen(value.len()))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<&[u8; B3_LEN]> for B3Digest {
    fn from(value: &[u8; B3_LEN]) -> Self {
        Self(value.to_vec().into())
    }
}

impl std::str::FromStr for B3Digest {
    type Err = Error;

    /// Parses `b3:<hex>` as well as bare lowercase hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix("b3:").unwrap_or(s);
        let decoded = HEXLOWER
            .decode(hex.as_bytes())
            .map_err(|e| Error::InvalidEncoding(e.to_string()))?;
        decoded.try_into()
    }
}

impl Clone for B3Digest {
    fn clone(&self) -> Self {
        Self(self.0.to_owned())
    }
}

impl std::fmt::Display for B3Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b3:{}", HEXLOWER.encode(&self.0))
    }
}

impl std::fmt::Debug for B3Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b3:{}", HEXLOWER.encode(&self.0))
    }
}
