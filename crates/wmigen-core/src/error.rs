use thiserror::Error;

/// Core error type shared across wmigen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A character outside the 33-symbol WMI alphabet.
    #[error("'{0}' is not a WMI alphabet symbol")]
    Symbol(char),
    /// A WMI that is not exactly three symbols long.
    #[error("WMI '{0}' is not three symbols long")]
    WmiLength(String),
    /// A country code that cannot be parsed as a range.
    #[error("malformed country code '{code}': {reason}")]
    MalformedCode { code: String, reason: String },
    /// A range whose bounds run backwards in canonical order.
    #[error("country code '{code}' has inverted span '{from}'..'{to}'")]
    InvertedSpan { code: String, from: char, to: char },
    /// A record carrying an empty label.
    #[error("empty label for '{0}'")]
    EmptyLabel(String),
    /// An insertion path that does not match the trie depth.
    #[error("path of length {actual} in a depth-{expected} trie")]
    PathDepth { expected: usize, actual: usize },
}

/// Convenience alias for results returned by wmigen crates.
pub type Result<T> = std::result::Result<T, Error>;
