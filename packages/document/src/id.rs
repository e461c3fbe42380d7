use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Generate a fresh node id: `"<type>-<millis>-<base36 random>"`.
///
/// The type tag makes the node's variant recoverable from the id alone;
/// the timestamp + 9 random base36 chars give practical uniqueness within
/// a session. Ids are never compared across sessions and never used as
/// security tokens.
pub fn new_id(type_tag: &str) -> String {
    format!("{}-{}-{}", type_tag, current_millis(), random_suffix())
}

fn current_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

fn random_suffix() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        out.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    out
}
