use std::fmt;

/// Proof that at least one error diagnostic was emitted.
///
/// Zero-sized; it carries no data, only the fact of its existence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    /// Only the queue mints these directly.
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Returns a guarantee iff `count` is non-zero.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(ErrorGuaranteed::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}
