//! Probe outcome classification and body checksums.

use std::fmt;

use md5::{Digest, Md5};

use crate::release::VersionTag;

/// Lowercase hex MD5 of the bytes received for one probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    /// Digest of a complete byte slice.
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        let mut digest = BodyDigest::new();
        digest.update(bytes);
        digest.finish().0
    }

    /// Hex representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Incremental checksum and byte counter fed chunk by chunk from a body stream.
#[derive(Debug, Clone, Default)]
pub struct BodyDigest {
    hasher: Md5,
    bytes: u64,
}

impl BodyDigest {
    /// Starts an empty digest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk.
    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        self.bytes += chunk.len() as u64;
    }

    /// Finalizes into the checksum and total byte count.
    #[must_use]
    pub fn finish(self) -> (Checksum, u64) {
        (Checksum(format!("{:x}", self.hasher.finalize())), self.bytes)
    }
}

/// Whether a status means the asset exists: 206 (range honored) or 200 (range ignored).
#[must_use]
pub fn is_hit_status(status: u16) -> bool {
    matches!(status, 200 | 206)
}

/// Result of probing one candidate URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The asset exists.
    Hit {
        /// 200 or 206.
        status: u16,
        /// Checksum of the bytes received.
        checksum: Checksum,
        /// Bytes received.
        bytes: u64,
    },
    /// The server answered, but not with the asset.
    Miss {
        /// Any status other than 200/206.
        status: u16,
        /// Checksum of the error body, absent if the body could not be read.
        checksum: Option<Checksum>,
        /// Bytes received.
        bytes: u64,
    },
    /// No HTTP response: DNS, connect, TLS, timeout, or a broken body stream.
    TransportFailure {
        /// Human-readable cause, for diagnostics only.
        reason: String,
    },
}

impl ProbeOutcome {
    /// Classifies a fully read response.
    #[must_use]
    pub fn from_response(status: u16, checksum: Checksum, bytes: u64) -> Self {
        if is_hit_status(status) {
            Self::Hit {
                status,
                checksum,
                bytes,
            }
        } else {
            Self::Miss {
                status,
                checksum: Some(checksum),
                bytes,
            }
        }
    }

    /// Creates a transport failure from any displayable cause.
    pub fn transport_failure(reason: impl Into<String>) -> Self {
        Self::TransportFailure {
            reason: reason.into(),
        }
    }

    /// Whether the asset was found.
    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// HTTP status, or `None` for transport failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Hit { status, .. } | Self::Miss { status, .. } => Some(*status),
            Self::TransportFailure { .. } => None,
        }
    }

    /// Whether the server said "not found".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Body checksum when a body was read.
    #[must_use]
    pub fn checksum(&self) -> Option<&Checksum> {
        match self {
            Self::Hit { checksum, .. } => Some(checksum),
            Self::Miss { checksum, .. } => checksum.as_ref(),
            Self::TransportFailure { .. } => None,
        }
    }

    /// Bytes received (zero for transport failures).
    #[must_use]
    pub fn bytes(&self) -> u64 {
        match self {
            Self::Hit { bytes, .. } | Self::Miss { bytes, .. } => *bytes,
            Self::TransportFailure { .. } => 0,
        }
    }
}

/// Outcome of one probe together with what was probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Version substituted into the template.
    pub version: VersionTag,
    /// Candidate URL requested.
    pub url: String,
    /// Classification.
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    /// Bundles a version, its URL and the outcome.
    #[must_use]
    pub fn new(version: VersionTag, url: String, outcome: ProbeOutcome) -> Self {
        Self {
            version,
            url,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_of_x_matches_md5() {
        assert_eq!(
            Checksum::of(b"x").as_str(),
            "9dd4e461268c8034f5c8564e155c67a6"
        );
    }

    #[test]
    fn test_checksum_of_empty_body() {
        assert_eq!(
            Checksum::of(b"").as_str(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn test_body_digest_is_chunking_independent() {
        let mut chunked = BodyDigest::new();
        chunked.update(b"hello ");
        chunked.update(b"");
        chunked.update(b"world");
        let (checksum, bytes) = chunked.finish();
        assert_eq!(checksum, Checksum::of(b"hello world"));
        assert_eq!(bytes, 11);
    }

    #[test]
    fn test_hit_statuses() {
        assert!(is_hit_status(200));
        assert!(is_hit_status(206));
        for status in [204, 301, 302, 304, 403, 404, 416, 500, 503] {
            assert!(!is_hit_status(status), "{status} must be a miss");
        }
    }

    #[test]
    fn test_from_response_classifies() {
        let hit = ProbeOutcome::from_response(206, Checksum::of(b"a"), 1);
        assert!(hit.is_hit());
        assert_eq!(hit.status(), Some(206));

        let miss = ProbeOutcome::from_response(404, Checksum::of(b"nope"), 4);
        assert!(!miss.is_hit());
        assert!(miss.is_not_found());
        assert_eq!(miss.checksum(), Some(&Checksum::of(b"nope")));
        assert_eq!(miss.bytes(), 4);
    }

    #[test]
    fn test_transport_failure_has_no_status_checksum_or_bytes() {
        let failure = ProbeOutcome::transport_failure("connection refused");
        assert_eq!(failure.status(), None);
        assert_eq!(failure.checksum(), None);
        assert_eq!(failure.bytes(), 0);
        assert!(!failure.is_hit());
        assert!(!failure.is_not_found());
    }
}
