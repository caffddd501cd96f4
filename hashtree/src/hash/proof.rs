use log::warn;

use super::{path::Path, Hasher, Side};
use crate::{Error, Result};

/// A single sibling hash in a hash proof.
///
/// It can be either `Sibling::Left(_)` or `Sibling::Right(_)` depending on its position in the hash tree it comes from.
#[derive(Debug)]
pub enum Sibling<H: Hasher> {
    Left(H::Hash),
    Right(H::Hash),
}

impl<H: Hasher> Sibling<H> {
    pub fn new(side: Side, hash: H::Hash) -> Self {
        match side {
            Side::Left => Self::Left(hash),
            Side::Right => Self::Right(hash),
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Self::Left(_) => Side::Left,
            Self::Right(_) => Side::Right,
        }
    }

    pub fn hash(&self) -> &H::Hash {
        match self {
            Self::Left(hash) | Self::Right(hash) => hash,
        }
    }

    /// Compute the parent hash of this sibling hash and the given one depending on its position in the hash tree.
    pub fn fold(&self, other: &H::Hash) -> H::Hash {
        match self {
            Self::Left(hash) => H::hash(hash, other),
            Self::Right(hash) => H::hash(other, hash),
        }
    }
}

// Don't use `#[derive(Clone, PartialEq)]` here as it would require `Hasher` to implement them as well.
impl<H: Hasher> Clone for Sibling<H> {
    fn clone(&self) -> Self {
        Self::new(self.side(), self.hash().clone())
    }
}

impl<H: Hasher> PartialEq for Sibling<H> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Left(hash), Self::Left(other)) => hash.eq(other),
            (Self::Right(hash), Self::Right(other)) => hash.eq(other),
            _ => false,
        }
    }
}

/// A hash proof.
///
/// It is built with all sibling hashes required to compute the root hash for a given leaf hash value,
/// ordered from the leaf level up to the level right below the root. It owns its hashes and can be
/// verified without the hash tree it comes from.
#[derive(Debug)]
pub struct HashProof<H: Hasher> {
    hashes: Vec<Sibling<H>>,
}

impl<H: Hasher> HashProof<H> {
    /// Build a hash proof from all sibling hashes met while walking a path up to the root.
    pub(super) fn new(path: &Path<'_, H>) -> Self {
        let hashes = path
            .siblings()
            .map(|(node, side)| Sibling::new(side, node.hash().clone()))
            .collect();

        Self { hashes }
    }

    pub fn siblings(&self) -> &[Sibling<H>] {
        &self.hashes
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Sibling sides along with raw sibling hashes, eg. to send the proof over the wire.
    pub fn entries(&self) -> impl Iterator<Item = (Side, &[u8])> {
        self.hashes.iter().map(|sibling| (sibling.side(), sibling.hash().as_ref()))
    }

    /// Compute the hash proof wrt. the given leaf hash value.
    pub fn compute(&self, leaf: H::Hash) -> H::Hash {
        self.hashes.iter().fold(leaf, |hash, h| h.fold(&hash))
    }

    /// Compute the hash proof wrt. the given leaf hash value, comparing it to the expected root hash value.
    pub fn verify(&self, leaf: H::Hash, root: &H::Hash) -> bool {
        self.compute(leaf) == *root
    }
}

impl<H: Hasher> Clone for HashProof<H> {
    fn clone(&self) -> Self {
        Self { hashes: self.hashes.clone() }
    }
}

impl<H: Hasher> PartialEq for HashProof<H> {
    fn eq(&self, other: &Self) -> bool {
        self.hashes == other.hashes
    }
}

impl<H: Hasher> FromIterator<Sibling<H>> for HashProof<H> {
    fn from_iter<I: IntoIterator<Item = Sibling<H>>>(hashes: I) -> Self {
        Self { hashes: hashes.into_iter().collect() }
    }
}

/// Check that the given leaf hash value and hash proof lead to the expected root hash value.
pub fn verify<H: Hasher>(leaf: H::Hash, proof: &HashProof<H>, root: &H::Hash) -> bool {
    proof.verify(leaf, root)
}

/// Check a hash proof made of raw hashes, eg. as received from a peer.
///
/// Every sibling hash must be as long as the leaf hash, anything else is a malformed proof.
pub fn try_verify_raw<H, I, B>(leaf: &[u8], entries: I, root: &[u8]) -> Result<bool>
where
    H: Hasher,
    I: IntoIterator<Item = (Side, B)>,
    B: AsRef<[u8]>,
{
    let expected = leaf.len();
    let mut acc: Option<H::Hash> = None;

    for (index, (side, sibling)) in entries.into_iter().enumerate() {
        let sibling = sibling.as_ref();

        if sibling.len() != expected {
            return Err(Error::InvalidProof { index, expected, found: sibling.len() });
        }

        let current = match &acc {
            Some(hash) => hash.as_ref(),
            None => leaf,
        };

        acc = Some(match side {
            Side::Left => H::hash(sibling, current),
            Side::Right => H::hash(current, sibling),
        });
    }

    Ok(match &acc {
        Some(hash) => hash.as_ref() == root,
        None => leaf == root,
    })
}

/// Same as [`try_verify_raw`], a malformed proof simply failing to verify.
pub fn verify_raw<H, I, B>(leaf: &[u8], entries: I, root: &[u8]) -> bool
where
    H: Hasher,
    I: IntoIterator<Item = (Side, B)>,
    B: AsRef<[u8]>,
{
    try_verify_raw::<H, I, B>(leaf, entries, root).unwrap_or_else(|err| {
        warn!("rejecting hash proof: {err}");
        false
    })
}
