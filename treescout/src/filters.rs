//! Content filters applied to files the walker has already accepted.
//!
//! Binary detection is a bounded-prefix check for NUL bytes, not a charset
//! sniffer. Files that cannot be inspected count as text so they are never
//! dropped just because the probe failed; the later read will skip them if
//! they really are unreadable.
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::trace;

/// Number of leading bytes inspected when classifying a file
pub const BINARY_PROBE_LEN: usize = 512;

/// Returns true if `bytes` contains a NUL within the first `BINARY_PROBE_LEN` bytes
pub fn is_binary_content(bytes: &[u8]) -> bool {
    let probe = &bytes[..bytes.len().min(BINARY_PROBE_LEN)];
    probe.contains(&0)
}

/// Checks if a file is binary by looking for NUL bytes in its first 512 bytes.
///
/// Read failures and empty files are classified as text.
pub fn is_binary_file(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            trace!("Cannot open {} for binary probe: {}", path.display(), e);
            return false;
        }
    };

    let mut buf = [0u8; BINARY_PROBE_LEN];
    let mut filled = 0;
    // A single read may return short on pipes and some filesystems.
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                trace!("Binary probe failed for {}: {}", path.display(), e);
                break;
            }
        }
    }

    is_binary_content(&buf[..filled])
}
