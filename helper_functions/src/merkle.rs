use anyhow::{ensure, Result};
use itertools::Itertools as _;
use ssz_types::FixedVector;
use tree_hash::TreeHash as _;
use types::{
    altair::consts::{
        FinalityBranchLength, SyncCommitteeBranchLength, FINALIZED_ROOT_INDEX,
        NEXT_SYNC_COMMITTEE_INDEX,
    },
    phase0::primitives::H256,
    preset::Preset,
    traits::{BeaconState, PostAltairBeaconState},
};

use crate::error::Error;

/// Depth of the tree formed by the top-level fields of every supported `BeaconState`.
pub const BEACON_STATE_FIELD_DEPTH: usize = 5;

const BEACON_STATE_FIELD_COUNT_LIMIT: u64 = 1 << BEACON_STATE_FIELD_DEPTH;

/// Builds the branch proving the node at `generalized_index` against the root of `state`.
///
/// Supported indices are those of top-level fields and [`FINALIZED_ROOT_INDEX`].
pub fn prove<P: Preset>(
    state: &(impl BeaconState<P> + ?Sized),
    generalized_index: u64,
) -> Result<Vec<H256>> {
    let leaves = state.field_roots();

    if generalized_index == FINALIZED_ROOT_INDEX {
        // The root of `finalized_checkpoint` is one level above the proven node.
        let finalized_epoch_root = state.finalized_checkpoint().epoch.tree_hash_root();
        let mut branch = vec![finalized_epoch_root];
        branch.extend(field_branch(&leaves, generalized_index / 2)?);
        return Ok(branch);
    }

    field_branch(&leaves, generalized_index)
}

pub fn finality_branch<P: Preset>(
    state: &(impl BeaconState<P> + ?Sized),
) -> Result<FixedVector<H256, FinalityBranchLength>> {
    prove(state, FINALIZED_ROOT_INDEX).map(FixedVector::from)
}

pub fn next_sync_committee_branch<P: Preset>(
    state: &(impl PostAltairBeaconState<P> + ?Sized),
) -> Result<FixedVector<H256, SyncCommitteeBranchLength>> {
    prove(state, NEXT_SYNC_COMMITTEE_INDEX).map(FixedVector::from)
}

fn field_branch(leaves: &[H256], generalized_index: u64) -> Result<Vec<H256>> {
    let field_count = u64::try_from(leaves.len())?;

    ensure!(
        (BEACON_STATE_FIELD_COUNT_LIMIT..BEACON_STATE_FIELD_COUNT_LIMIT + field_count)
            .contains(&generalized_index),
        Error::GeneralizedIndexNotSupported { generalized_index },
    );

    let field_index = usize::try_from(generalized_index - BEACON_STATE_FIELD_COUNT_LIMIT)?;

    Ok(merkle_branch(leaves, field_index, BEACON_STATE_FIELD_DEPTH))
}

// Missing nodes are roots of empty subtrees, so layers are padded only up to an even length.
fn merkle_branch(leaves: &[H256], mut index: usize, depth: usize) -> Vec<H256> {
    let mut layer = leaves.to_vec();
    let mut branch = Vec::with_capacity(depth);

    for zero_hash in hashing::ZERO_HASHES.iter().take(depth).copied() {
        branch.push(layer.get(index ^ 1).copied().unwrap_or(zero_hash));

        if layer.len() % 2 == 1 {
            layer.push(zero_hash);
        }

        layer = layer
            .into_iter()
            .tuples()
            .map(|(left, right)| hashing::hash_256_256(left, right))
            .collect();

        index /= 2;
    }

    branch
}
