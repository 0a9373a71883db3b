//! Local-filesystem-safe file names.

/// Linux `NAME_MAX`.
const NAME_MAX: usize = 255;

/// Replaces characters that cannot appear in a single path component.
///
/// `/`, `\`, NUL and control characters become `_`. Everything else is kept
/// as-is so that ordinary archive names map to identical local names. The
/// result is truncated to 255 bytes on a char boundary.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c == '\0' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if out.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !out.is_char_boundary(take) {
            take -= 1;
        }
        out.truncate(take);
    }
    out
}
