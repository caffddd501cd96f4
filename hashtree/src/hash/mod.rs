use std::fmt::{self, Debug, Display};

use log::{debug, trace};

use crate::{Error, Result};

mod path;
mod proof;

use path::Path;
pub use path::Side;
pub use proof::{try_verify_raw, verify, verify_raw, HashProof, Sibling};

/// A hasher trait to produce hash values.
///
/// This is the digest function of a hash tree: leaves hash raw items, branches hash the
/// concatenation of their children's hashes. It is expected to be deterministic and to always
/// produce hashes of the same length.
pub trait Hasher: Default {
    type Hash: AsRef<[u8]> + Clone + PartialEq + Debug;

    fn write(&mut self, bytes: &[u8]);
    fn finish(self) -> Self::Hash;

    /// Hash a single byte sequence, eg. a raw item to turn into a leaf.
    fn hash_one(bytes: impl AsRef<[u8]>) -> Self::Hash
    where
        Self: Sized,
    {
        let mut hasher = Self::default();
        hasher.write(bytes.as_ref());
        hasher.finish()
    }

    /// Hash the concatenation of two byte sequences, left then right.
    fn hash(first: impl AsRef<[u8]>, second: impl AsRef<[u8]>) -> Self::Hash
    where
        Self: Sized,
    {
        let mut hasher = Self::default();
        hasher.write(first.as_ref());
        hasher.write(second.as_ref());
        hasher.finish()
    }
}

/// A hash node in the hash tree.
#[derive(Debug)]
enum HashNode<H: Hasher> {
    Branch(H::Hash, Box<(HashNode<H>, HashNode<H>)>),
    Leaf(H::Hash),
}

// Don't use `#[derive(Clone)]` here as it would require `Hasher` to implement `Clone` as well.
impl<H: Hasher> Clone for HashNode<H> {
    fn clone(&self) -> Self {
        match self {
            Self::Branch(hash, nodes) => Self::Branch(hash.clone(), nodes.clone()),
            Self::Leaf(hash) => Self::Leaf(hash.clone()),
        }
    }
}

impl<H: Hasher> HashNode<H> {
    fn branch(left: Self, right: Self) -> Self {
        Self::Branch(H::hash(left.hash(), right.hash()), Box::new((left, right)))
    }

    fn leaf(hash: impl Into<H::Hash>) -> Self {
        Self::Leaf(hash.into())
    }

    /// Fold a level of nodes pairwise, level after level, up to a single root node.
    ///
    /// An odd level gets its last node duplicated so that every node has a sibling.
    fn fold(mut level: Vec<Self>) -> Option<Self> {
        while level.len() > 1 {
            if level.len() % 2 != 0 {
                let last = level.last()?.clone();
                level.push(last);
            }

            let mut nodes = level.into_iter();
            let mut next = Vec::with_capacity(nodes.len() / 2);

            while let (Some(left), Some(right)) = (nodes.next(), nodes.next()) {
                next.push(Self::branch(left, right));
            }

            level = next;
        }

        level.pop()
    }

    fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    fn match_leaf(&self, hash: &H::Hash) -> bool {
        matches!(self, Self::Leaf(h) if h == hash)
    }

    #[cfg(test)]
    fn match_branch(&self, hash: &H::Hash) -> bool {
        matches!(self, Self::Branch(h, _) if h == hash)
    }

    fn match_node(&self, hash: &H::Hash) -> bool {
        self.hash() == hash
    }

    /// Number of levels below this node, all leaves lying at the same depth.
    fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Branch(_, nodes) => 1 + nodes.0.depth(),
        }
    }

    fn hash(&self) -> &H::Hash {
        match self {
            Self::Branch(hash, _) | Self::Leaf(hash) => hash,
        }
    }

    fn nodes(&self) -> Option<(&Self, &Self)> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(_, nodes) => Some((&nodes.0, &nodes.1)),
        }
    }

    /// Visit nodes depth first, left before right, along with their depth wrt. this node.
    fn visit_nodes(&self) -> impl Iterator<Item = (usize, &Self)> {
        let mut rights = Vec::with_capacity(self.depth());

        std::iter::successors(Some((0, self)), move |&(depth, node)| {
            if let Some((left, right)) = node.nodes() {
                rights.push((depth + 1, right));
                Some((depth + 1, left))
            } else {
                rights.pop()
            }
        })
    }

    fn leaves(&self) -> impl Iterator<Item = &Self> {
        self.visit_nodes().map(|(_, node)| node).filter(|node| node.is_leaf())
    }
}

/// A hash tree.
///
/// It is built once from a non-empty collection of items and never altered afterwards.
#[derive(Debug)]
pub struct HashTree<H: Hasher> {
    root: HashNode<H>,
    len: usize,
}

impl<H: Hasher> HashTree<H> {
    /// Build a hash tree by hashing every item into a leaf.
    pub fn build<I>(items: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        Self::from_leaves(items.into_iter().map(|item| H::hash_one(item)))
    }

    /// Build a hash tree out of already computed leaf hashes.
    pub fn from_leaves<I>(hashes: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<H::Hash>,
    {
        let leaves: Vec<HashNode<H>> = hashes.into_iter().map(HashNode::leaf).collect();
        let len = leaves.len();

        let root = HashNode::fold(leaves).ok_or(Error::EmptyInput)?;
        debug!("built a hash tree of {len} leaves and depth {}", root.depth());

        Ok(Self { root, len })
    }

    /// The root hash.
    pub fn hash(&self) -> &H::Hash {
        self.root.hash()
    }

    /// Number of items the hash tree was built from, padding excluded.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of fold levels between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Leaf hashes from left to right, padding included.
    pub fn leaves(&self) -> impl Iterator<Item = &H::Hash> {
        self.root.leaves().map(HashNode::hash)
    }

    /// Whether the given item is one of the leaves.
    pub fn contains(&self, item: impl AsRef<[u8]>) -> bool {
        self.contains_hash(&H::hash_one(item))
    }

    /// Whether the given hash is one of the leaf hashes.
    pub fn contains_hash(&self, hash: &H::Hash) -> bool {
        self.root.locate(|node| node.match_leaf(hash)).is_some()
    }

    /// Whether the given hash is the hash of any node, be it a leaf or a branch.
    pub fn contains_node(&self, hash: &H::Hash) -> bool {
        self.root.locate(|node| node.match_node(hash)).is_some()
    }

    /// Build the hash proof of the first leaf matching the given item.
    pub fn prove_membership(&self, item: impl AsRef<[u8]>) -> Result<HashProof<H>> {
        self.prove_hash(&H::hash_one(item))
    }

    /// Build the hash proof of the first leaf matching the given hash.
    pub fn prove_hash(&self, hash: &H::Hash) -> Result<HashProof<H>> {
        Self::prove(self.root.locate(|node| node.match_leaf(hash)))
    }

    /// Build the hash proof of the leaf at the given position in the items the tree was built from.
    pub fn prove_index(&self, index: usize) -> Result<HashProof<H>> {
        if index >= self.len {
            trace!("leaf #{index} out of a hash tree of {} leaves", self.len);
            return Err(Error::NotFound);
        }

        Self::prove(self.root.descend(index))
    }

    fn prove(path: Option<Path<'_, H>>) -> Result<HashProof<H>> {
        let Some(path) = path else {
            trace!("no matching leaf in the hash tree");
            return Err(Error::NotFound);
        };

        trace!("proving leaf {:?} with {} sibling(s)", path.target().hash(), path.len());

        Ok(HashProof::new(&path))
    }

    /// Render the hash tree, one node per line, indenting each level by two spaces.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl<H: Hasher> Display for HashTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, node) in self.root.visit_nodes() {
            writeln!(f, "{:indent$}Node: {}", "", hex::encode(node.hash()), indent = 2 * depth)?;
        }

        Ok(())
    }
}
