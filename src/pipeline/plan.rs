//! Width matrix planning.

/// One entry of the width list, clamped to the source's native width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthTarget {
    /// Listed width; names the variant.
    pub requested: u32,
    /// Width actually produced.
    pub clamped: u32,
}

/// One target per listed width. A native width of 0 means unbounded.
///
/// Targets that clamp to the same width are kept; each still gets its own
/// variant keys.
pub fn plan(widths: &[u32], native_width: u32) -> Vec<WidthTarget> {
    widths
        .iter()
        .map(|&requested| WidthTarget {
            requested,
            clamped: match native_width {
                0 => requested,
                native => requested.min(native),
            },
        })
        .collect()
}
