//! Deterministic image naming
//!
//! Names follow the pattern `SDK` + 3-letter manufacturer code + `0` +
//! section letter + 2-digit number, e.g. `SDKAAB0C42`. The manufacturer
//! code is the roster ordinal in base 26 (A-Z, most-significant letter
//! first); the section letter and number encode the per-manufacturer
//! sequence, 99 images per section across sections A-Z.

/// Fixed tag every generated name starts with
pub const NAME_PREFIX: &str = "SDK";

/// Highest sequence number the encoding can represent (26 sections x 99)
pub const MAX_SEQUENCE: u32 = 26 * 99;

/// Generates the structured name for an image
///
/// Pure and injective over `sequence` in `1..=MAX_SEQUENCE` for a fixed
/// ordinal. Callers must reject sequence numbers past [`MAX_SEQUENCE`]
/// before naming; the job planner stops issuing jobs at the ceiling.
///
/// # Arguments
///
/// * `ordinal` - 0-based manufacturer roster ordinal
/// * `sequence` - 1-based per-manufacturer sequence number
///
/// # Examples
///
/// ```
/// use forager::download::image_name;
///
/// assert_eq!(image_name(0, 1), "SDKAAA0A01");
/// assert_eq!(image_name(1, 1), "SDKAAB0A01");
/// ```
pub fn image_name(ordinal: usize, sequence: u32) -> String {
    debug_assert!(
        (1..=MAX_SEQUENCE).contains(&sequence),
        "sequence {} outside 1..={}",
        sequence,
        MAX_SEQUENCE
    );

    let section = (b'A' + ((sequence - 1) / 99) as u8) as char;
    let number = (sequence - 1) % 99 + 1;

    format!(
        "{}{}0{}{:02}",
        NAME_PREFIX,
        ordinal_code(ordinal),
        section,
        number
    )
}

/// Encodes an ordinal as three base-26 letters, most-significant first
fn ordinal_code(mut ordinal: usize) -> String {
    let mut letters = ['A'; 3];
    for slot in letters.iter_mut().rev() {
        *slot = (b'A' + (ordinal % 26) as u8) as char;
        ordinal /= 26;
    }
    letters.iter().collect()
}
