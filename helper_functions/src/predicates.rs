use bls::SignatureBytes;
use typenum::Unsigned as _;
use types::{
    altair::consts::{SyncCommitteeSubnetCount, TARGET_AGGREGATORS_PER_SYNC_SUBCOMMITTEE},
    phase0::primitives::H256,
    preset::Preset,
};

#[must_use]
pub fn is_sync_committee_aggregator<P: Preset>(selection_proof: SignatureBytes) -> bool {
    let modulo = (P::SyncCommitteeSize::U64
        / SyncCommitteeSubnetCount::U64
        / TARGET_AGGREGATORS_PER_SYNC_SUBCOMMITTEE.get())
    .max(1);

    let hash = hashing::hash_768(selection_proof.to_fixed_bytes());

    let mut prefix = [0; size_of::<u64>()];
    prefix.copy_from_slice(&hash[..size_of::<u64>()]);

    u64::from_le_bytes(prefix) % modulo == 0
}

/// Checks a Merkle branch from `leaf` up to `root`.
///
/// `index` may be either the index of `leaf` within its layer or its generalized index.
/// Only the lowest `branch.len()` bits are used, and those are the same for both.
#[must_use]
pub fn is_valid_merkle_branch<'node>(
    leaf: H256,
    branch: impl IntoIterator<Item = &'node H256>,
    index: u64,
    root: H256,
) -> bool {
    let computed_root = branch
        .into_iter()
        .enumerate()
        .fold(leaf, |node, (height, sibling)| {
            if (index >> height) & 1 == 1 {
                hashing::hash_256_256(*sibling, node)
            } else {
                hashing::hash_256_256(node, *sibling)
            }
        });

    computed_root == root
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use types::preset::{Mainnet, Minimal};

    use super::*;

    #[test_case(SignatureBytes::empty() => true)]
    #[test_case(SignatureBytes::repeat_byte(1) => false)]
    #[test_case(SignatureBytes::repeat_byte(2) => true)]
    #[test_case(SignatureBytes::repeat_byte(9) => false)]
    fn is_sync_committee_aggregator_on_mainnet(selection_proof: SignatureBytes) -> bool {
        is_sync_committee_aggregator::<Mainnet>(selection_proof)
    }

    // Minimal subcommittees are too small for selection to be meaningful.
    #[test_case(SignatureBytes::repeat_byte(1))]
    #[test_case(SignatureBytes::repeat_byte(9))]
    fn every_selection_proof_is_an_aggregator_on_minimal(selection_proof: SignatureBytes) {
        assert!(is_sync_committee_aggregator::<Minimal>(selection_proof));
    }

    #[test_case(2; "index within layer")]
    #[test_case(6; "generalized index")]
    fn is_valid_merkle_branch_accepts_correct_branch(index: u64) {
        let [a, b, c, d] = [1, 2, 3, 4].map(H256::repeat_byte);
        let left = hashing::hash_256_256(a, b);
        let root = hashing::hash_256_256(left, hashing::hash_256_256(c, d));

        assert!(is_valid_merkle_branch(c, &[d, left], index, root));
        assert!(!is_valid_merkle_branch(d, &[d, left], index, root));
        assert!(!is_valid_merkle_branch(c, &[left, d], index, root));
        assert!(!is_valid_merkle_branch(c, &[d, left], index + 1, root));
    }
}
