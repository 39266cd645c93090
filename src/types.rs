/// Global type definitions
///
/// Integer widths used by the filesystem client contract. They match the
/// C client's `tOffset`/`tSize` so raw return values pass through unchanged.
/// File offset type (signed, 64-bit)
pub type Offset = i64;

/// Transfer size type (signed, 32-bit)
pub type Size = i32;

/// Raw status code returned by non-transfer client calls
pub type Status = std::os::raw::c_int;

/// Let the client pick its configured default
pub const DEFAULT_SETTING: i32 = 0;

/// Clamp a buffer length to the largest transfer a single client call accepts
#[inline]
pub fn clamp_len(len: usize) -> Size {
    Size::try_from(len).unwrap_or(Size::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_len() {
        assert_eq!(clamp_len(0), 0);
        assert_eq!(clamp_len(4096), 4096);
        assert_eq!(clamp_len(usize::MAX), Size::MAX);
    }
}
