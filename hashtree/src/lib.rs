//! A simple crate providing hash tree features (aka. Merkle tree and Merkle proof).
//!
//! A hash tree is built once out of an ordered collection of items: each item is hashed into a
//! leaf, then pairs of nodes are hashed together level after level until a single root remains.
//! The root hash commits to the whole collection, and a [`HashProof`] lets anyone holding only the
//! root hash check that a given item belongs to it.
//!
//! ```
//! use hashtree::{HashTree, Hasher};
//! # #[derive(Default)]
//! # struct Concat(Vec<u8>);
//! # impl Hasher for Concat {
//! #     type Hash = Vec<u8>;
//! #     fn write(&mut self, bytes: &[u8]) { self.0.extend_from_slice(bytes) }
//! #     fn finish(self) -> Self::Hash { self.0 }
//! # }
//!
//! let tree = HashTree::<Concat>::build(["a", "b", "c"])?;
//! assert_eq!(tree.hash(), b"abcc");
//!
//! let proof = tree.prove_membership("c")?;
//! assert!(hashtree::verify(Concat::hash_one("c"), &proof, tree.hash()));
//! # Ok::<(), hashtree::Error>(())
//! ```
//!
//! # Pros of the current implementation
//! - No need for smart pointers to link parents and children together, eg. using `Rc` / `Weak` pointers.
//! - A hash tree is immutable once built, so it can be shared across threads without any lock.
//! - Proofs own their hashes and outlive the hash tree they come from.
//!
//! # Known limitations of the current implementation
//! - Looking a leaf up by its hash walks the whole tree, there is no index from hashes to leaves.
//! - Odd levels are padded by cloning their last node, which duplicates its whole subtree.

mod error;
mod hash;

pub use error::{Error, Result};
pub use hash::{try_verify_raw, verify, verify_raw, HashProof, HashTree, Hasher, Side, Sibling};

#[cfg(feature = "digest_compat")]
pub mod compat;
