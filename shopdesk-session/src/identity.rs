use uuid::Uuid;

/// Stable session id for a chat channel: the first 16 bytes of its blake3 hash as a UUID.
///
/// The same channel maps to the same session across processes.
pub fn session_id_for_channel(channel: &str) -> String {
    let hash = blake3::hash(channel.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash.as_bytes()[..16]);
    Uuid::from_bytes(bytes).to_string()
}
