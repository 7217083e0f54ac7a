use ethereum_types::H256;
use once_cell::sync::Lazy;
use sha2::{Digest as _, Sha256};

/// Maximum depth of the Merkle trees built over `BeaconState` fields and their subtrees.
pub const MAX_DEPTH: usize = 40;

/// Roots of empty subtrees indexed by depth, starting with the zero leaf.
pub static ZERO_HASHES: Lazy<[H256; MAX_DEPTH + 1]> = Lazy::new(|| {
    let mut hashes = [H256::zero(); MAX_DEPTH + 1];

    for depth in 1..=MAX_DEPTH {
        hashes[depth] = hash_256_256(hashes[depth - 1], hashes[depth - 1]);
    }

    hashes
});

#[inline]
#[must_use]
pub fn hash(bytes: impl AsRef<[u8]>) -> H256 {
    H256(Sha256::digest(bytes.as_ref()).into())
}

#[inline]
#[must_use]
pub fn hash_256_256(left: H256, right: H256) -> H256 {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    H256(hasher.finalize().into())
}

/// Used to hash 96 byte BLS signatures when checking aggregator selection.
#[inline]
#[must_use]
pub fn hash_768(bytes: [u8; 96]) -> H256 {
    hash(bytes)
}
