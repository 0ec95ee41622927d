//! Integrity gate for client-submitted page content.
//!
//! Submitted pages arrive base64-encoded with a checksum computed on
//! the client. The gate decodes the transport encoding and recomputes
//! the checksum before the content ever reaches the HTML parser;
//! corrupt or tampered submissions are rejected without parsing
//! anything.
//!
//! Checksum pin: CRC32-C over the decoded bytes, unsigned 32-bit. The
//! submitting side must compute it with the identical definition, so
//! treat any change here as a wire-protocol break.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{GradeDistError, Result};

/// The pinned content checksum function.
///
/// Exposed so the submitting side of a test (or an in-process
/// collaborator) can produce a matching declaration.
pub fn content_checksum(bytes: &[u8]) -> u32 {
    crc32c::crc32c(bytes)
}

/// Decode `encoded` and check it against the checksum declared by the
/// submitting client. Returns the decoded bytes for downstream parsing.
pub fn verify(encoded: &str, declared_checksum: u32) -> Result<Vec<u8>> {
    let bytes = general_purpose::STANDARD.decode(encoded)?;
    let computed = content_checksum(&bytes);
    if computed != declared_checksum {
        tracing::debug!(
            declared = declared_checksum,
            computed,
            len = bytes.len(),
            "integrity_mismatch"
        );
        return Err(GradeDistError::IntegrityMismatch {
            declared: declared_checksum,
            computed,
        });
    }
    Ok(bytes)
}

/// One submitted page: base64 content plus the client-computed
/// checksum. Ephemeral; exists only for the duration of one check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSubmission {
    /// Base64-encoded page content
    pub content: String,
    /// Checksum the client computed over the decoded bytes
    pub checksum: u32,
}

impl ContentSubmission {
    /// Run the integrity gate over this submission.
    pub fn verify(&self) -> Result<Vec<u8>> {
        verify(&self.content, self.checksum)
    }
}
