pub use digest::{Digest, Output};

impl<D: Digest + Default> crate::Hasher for D {
    type Hash = Output<D>;

    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    fn finish(self) -> Self::Hash {
        self.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hex_literal::hex;

    fn assert_root_hash<D: Digest + Default, const N: usize>(data: &[&str], hashes: &[[u8; N]])
    where
        Output<D>: std::fmt::LowerHex,
    {
        assert_eq!(data.len(), hashes.len());

        for (len, hash) in (1..=data.len()).zip(hashes) {
            let tree = crate::HashTree::<D>::build(&data[..len]).unwrap();
            let root_hash = tree.hash();
            assert_eq!(
                root_hash[..],
                *hash,
                "Hash doesn't match when building from {len} block(s) -> {root_hash:x}"
            );
        }
    }

    fn assert_proofs<D: Digest + Default + std::fmt::Debug>(data: &[&str]) {
        let tree = crate::HashTree::<D>::build(data).unwrap();

        for (index, block) in data.iter().enumerate() {
            let proof = tree.prove_membership(block).unwrap();

            assert_eq!(proof.len(), tree.depth());
            assert!(proof.verify(D::digest(block), tree.hash()));
            assert!(crate::verify_raw::<D, _, _>(&D::digest(block), proof.entries(), tree.hash()));

            assert_eq!(proof, tree.prove_index(index).unwrap());
            assert!(!proof.verify(D::digest(format!("{block}!")), tree.hash()));
        }

        assert!(!tree.contains("not a block"));
    }

    const DATA: &[&str] = &[
        "hello world",
        "my name is Yoann",
        "I'm applying for a position at Zama",
        "I hope you enjoy my proposal for solving the challenge",
        "and I really hope I can touch the stars",
    ];

    #[test]
    fn md5() {
        assert_root_hash::<md5::Md5, 16>(
            DATA,
            &[
                hex!("5eb63bbbe01eeed093cb22bb8f5acdc3"),
                hex!("1429868119701c8c70582d23e454ce71"),
                hex!("76aba5a91b93f9272f771f553476e97f"),
                hex!("d0497fbe39eec0be6a8008f15081c79e"),
                hex!("d4dae065cbdc9595a4905c8efcaad527"),
            ],
        );
        assert_proofs::<md5::Md5>(DATA);
    }

    #[test]
    fn sha1() {
        assert_root_hash::<sha1::Sha1, 20>(
            DATA,
            &[
                hex!("2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"),
                hex!("c15a8812635053b976d6396379ebcef585ba69aa"),
                hex!("8668f3a8bb8a4cde24f6b7830fa8871ba612d340"),
                hex!("482495507c628ea29772d33c3f4b5c1c233996dd"),
                hex!("78a58ac2b07754c7b706b6f9fd36b59db8340ecc"),
            ],
        );
        assert_proofs::<sha1::Sha1>(DATA);
    }

    #[test]
    fn sha2() {
        assert_root_hash::<sha2::Sha256, 32>(
            DATA,
            &[
                hex!("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"),
                hex!("ca80bb29f3508b82ef163e9babe3f23f7346fddab2c44178efa7ddb5245accdd"),
                hex!("997fdd79088fd328d47e2d5369843ffd4953a6e442e48605bb61148ba5c8148a"),
                hex!("53dee74c8b82faa37fa5177e595f3756701a0126a89409c9a0c35fa67b920d97"),
                hex!("ec05f18235845eb976fca242a143c0bfa50129a4bef57aa415af28ff2d700f4a"),
            ],
        );
        assert_proofs::<sha2::Sha256>(DATA);
    }

    #[test]
    fn sha2_odd_tree() {
        use sha2::Sha256;

        let tree = crate::HashTree::<Sha256>::build(["a", "b", "c"]).unwrap();

        let (a, b, c) = (Sha256::digest("a"), Sha256::digest("b"), Sha256::digest("c"));
        let ab = Sha256::new().chain_update(a).chain_update(b).finalize();
        let cc = Sha256::new().chain_update(c).chain_update(c).finalize();
        let root = Sha256::new().chain_update(ab).chain_update(cc).finalize();

        assert_eq!(*tree.hash(), root);

        let proof = tree.prove_membership("c").unwrap();
        assert_eq!(proof.siblings(), [crate::Sibling::Right(c), crate::Sibling::Left(ab)]);
        assert!(crate::verify(c, &proof, &root));
    }
}
