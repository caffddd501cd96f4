use thiserror::Error;

/// An enum to deal with errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A hash tree needs at least one leaf to have a root.
    #[error("cannot build a hash tree out of nothing")]
    EmptyInput,

    /// The requested leaf is not part of the hash tree.
    #[error("leaf not found in the hash tree")]
    NotFound,

    /// A sibling hash of a raw proof doesn't have the length of the leaf hash it is folded with.
    #[error("malformed hash proof: sibling #{index} is {found} bytes long, expected {expected}")]
    InvalidProof { index: usize, expected: usize, found: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
