//! Resource limits for reading lock files.
//!
//! Lock files come from disk, usually written by this crate, but a corrupt or
//! hostile file must fail with a format error rather than exhaust memory or
//! the stack.

/// Limits enforced by the cursor while tokenizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum total input size in bytes
    pub max_input_size: u64,
    /// Maximum nesting depth for arrays/objects
    pub max_nesting_depth: u64,
    /// Maximum length of a single string or property name, in bytes
    pub max_string_length: u64,
}

impl Limits {
    /// Limits for restore-engine use. Large solutions produce lock files in
    /// the tens of megabytes.
    pub const fn standard() -> Self {
        Self {
            max_input_size: 256 * 1024 * 1024, // 256 MiB
            max_nesting_depth: 64,
            max_string_length: 16 * 1024 * 1024, // 16 MiB
        }
    }

    /// Tighter limits for validating files of unknown origin.
    pub const fn strict() -> Self {
        Self {
            max_input_size: 16 * 1024 * 1024, // 16 MiB
            max_nesting_depth: 32,
            max_string_length: 64 * 1024, // 64 KiB
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_limits() {
        let limits = Limits::standard();
        assert_eq!(limits.max_input_size, 256 * 1024 * 1024);
        assert_eq!(limits.max_nesting_depth, 64);
        assert_eq!(limits.max_string_length, 16 * 1024 * 1024);
        assert_eq!(Limits::default(), limits);
    }

    #[test]
    fn test_strict_limits_are_tighter() {
        let strict = Limits::strict();
        let standard = Limits::standard();
        assert!(strict.max_input_size < standard.max_input_size);
        assert!(strict.max_nesting_depth < standard.max_nesting_depth);
        assert!(strict.max_string_length < standard.max_string_length);
    }
}
