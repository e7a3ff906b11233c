use rand::distributions::Alphanumeric;
use rand::Rng;

const ID_LEN: usize = 12;

/// Generate a fresh random identifier for a room, pin, legend or section
/// entry.
///
/// Identifiers are 12 lowercase alphanumerics. They are never reused: a
/// deleted entity's id simply disappears with it.
pub fn fresh_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect()
}
