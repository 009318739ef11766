//! Binary-to-text encoding for clipboard transports.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode bytes as standard-alphabet base64 with `=` padding.
pub fn base64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
