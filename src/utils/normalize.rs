/// Maps a raw scanned code to the identifier stored in the roster.
///
/// Scanned codes carry a per-seat or per-session suffix after the last underscore
/// (`ABC123_7`); the roster holds only the base (`ABC123`). Whitespace around the
/// raw value is ignored. Blank input yields an empty string, which matches nothing.
pub fn normalize_identifier(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.rsplit_once('_') {
        Some((base, _suffix)) => base.to_string(),
        None => trimmed.to_string(),
    }
}
