//! Integration test: channel lifecycle across ledger, tree builder and
//! in-memory ownership/custody.

use orchard_core::{Entry, Hash, NATIVE_TOKEN, U256};
use orchard_crypto::ChannelMerkleTree;
use orchard_integration_tests::{account, Orchard};
use orchard_ledger::{ErrorKind, LedgerError, OwnershipRegistry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn amount(n: u64) -> U256 {
    U256::from(n)
}

// =========================================================================
// Reference scenarios
// =========================================================================

#[test]
fn test_full_claim() {
    let a = account(0xa);
    let b = account(0xb);
    let x = account(0x100);
    let mut orchard = Orchard::new();
    orchard.fund_account(b, &[x]);

    let entry = Entry::new(a, x, 100u64);
    let tree = ChannelMerkleTree::new([&entry]);

    let id = orchard.ledger.open_channel(a).unwrap();
    assert_eq!(id, 0);
    orchard.ledger.set_merkle_root(a, id, tree.root()).unwrap();
    orchard.ledger.fund_channel(b, id, x, amount(100)).unwrap();

    let proof = tree.proof_for_entry(&entry).unwrap();
    let receipt = orchard.ledger.claim(id, a, x, amount(100), &proof).unwrap();

    assert_eq!(receipt.payout, amount(100));
    assert_eq!(orchard.balance(a, x), amount(100));
    assert_eq!(orchard.ledger.get_channel_reserves_by_token(id, x), U256::zero());
}

#[test]
fn test_partial_fill_and_top_up() {
    let a = account(0xa);
    let b = account(0xb);
    let x = account(0x100);
    let mut orchard = Orchard::new();
    orchard.fund_account(b, &[x]);

    let entry = Entry::new(a, x, 100u64);
    let tree = ChannelMerkleTree::new([&entry]);
    let proof = tree.proof_for_entry(&entry).unwrap();

    let id = orchard.ledger.open_channel(a).unwrap();
    orchard.ledger.set_merkle_root(a, id, tree.root()).unwrap();
    orchard.ledger.fund_channel(b, id, x, amount(50)).unwrap();

    orchard.ledger.claim(id, a, x, amount(100), &proof).unwrap();
    assert_eq!(orchard.balance(a, x), amount(50));
    assert_eq!(orchard.ledger.get_channel_reserves_by_token(id, x), U256::zero());
    assert_eq!(orchard.ledger.get_claimed(id, a, x), amount(50));

    orchard.ledger.fund_channel(b, id, x, amount(60)).unwrap();
    orchard.ledger.claim(id, a, x, amount(100), &proof).unwrap();
    assert_eq!(orchard.balance(a, x), amount(100));
    assert_eq!(orchard.ledger.get_channel_reserves_by_token(id, x), amount(10));
    assert_eq!(orchard.ledger.get_claimed(id, a, x), amount(100));
}

#[test]
fn test_lowered_entitlement_reverts() {
    let a = account(0xa);
    let b = account(0xb);
    let x = account(0x100);
    let mut orchard = Orchard::new();
    orchard.fund_account(b, &[x]);

    let entry = Entry::new(a, x, 100u64);
    let tree = ChannelMerkleTree::new([&entry]);
    let id = orchard.ledger.open_channel(a).unwrap();
    orchard.ledger.set_merkle_root(a, id, tree.root()).unwrap();
    orchard.ledger.fund_channel(b, id, x, amount(200)).unwrap();
    orchard
        .ledger
        .claim(id, a, x, amount(100), &tree.proof_for_entry(&entry).unwrap())
        .unwrap();

    let lowered = Entry::new(a, x, 50u64);
    let lowered_tree = ChannelMerkleTree::new([&lowered]);
    orchard.ledger.set_merkle_root(a, id, lowered_tree.root()).unwrap();

    let err = orchard
        .ledger
        .claim(id, a, x, amount(50), &lowered_tree.proof_for_entry(&lowered).unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Accounting);
    assert_eq!(orchard.balance(a, x), amount(100));
    assert_eq!(orchard.ledger.get_channel_reserves_by_token(id, x), amount(100));
}

#[test]
fn test_proof_is_bound_to_its_channel() {
    let a = account(0xa);
    let b = account(0xb);
    let x = account(0x100);
    let mut orchard = Orchard::new();
    orchard.fund_account(b, &[x]);

    let entries0 = [Entry::new(a, x, 100u64), Entry::new(b, x, 10u64)];
    let entries1 = [Entry::new(a, x, 100u64), Entry::new(b, x, 20u64)];
    let tree0 = ChannelMerkleTree::new(&entries0);
    let tree1 = ChannelMerkleTree::new(&entries1);

    let c0 = orchard.ledger.open_channel(a).unwrap();
    let c1 = orchard.ledger.open_channel(a).unwrap();
    orchard.ledger.set_merkle_root(a, c0, tree0.root()).unwrap();
    orchard.ledger.set_merkle_root(a, c1, tree1.root()).unwrap();
    orchard.ledger.fund_channel(b, c0, x, amount(100)).unwrap();
    orchard.ledger.fund_channel(b, c1, x, amount(100)).unwrap();

    // Same leaf in both trees, but the proof only reaches channel 0's root.
    let proof = tree0.proof_for_entry(&entries0[0]).unwrap();
    assert_eq!(
        orchard.ledger.claim(c1, a, x, amount(100), &proof),
        Err(LedgerError::MerkleProof(c1))
    );
    orchard.ledger.claim(c0, a, x, amount(100), &proof).unwrap();
    assert_eq!(orchard.ledger.get_channel_reserves_by_token(c1, x), amount(100));
}

#[test]
fn test_single_leaf_empty_proof() {
    let a = account(0xa);
    let b = account(0xb);
    let x = account(0x100);
    let mut orchard = Orchard::new();
    orchard.fund_account(b, &[x]);

    let entry = Entry::new(a, x, 100u64);
    let tree = ChannelMerkleTree::new([&entry]);
    assert!(tree.proof_for_entry(&entry).unwrap().is_empty());

    let id = orchard.ledger.open_channel(a).unwrap();
    orchard.ledger.set_merkle_root(a, id, tree.root()).unwrap();
    orchard.ledger.fund_channel(b, id, x, amount(100)).unwrap();
    orchard.ledger.claim(id, a, x, amount(100), &[]).unwrap();
    assert_eq!(orchard.balance(a, x), amount(100));
}

// =========================================================================
// Native currency
// =========================================================================

#[test]
fn test_native_channel() {
    let owner = account(0x1);
    let funder = account(0x2);
    let recipients = [account(0x10), account(0x11), account(0x12)];
    let mut orchard = Orchard::new();
    orchard.fund_account(funder, &[NATIVE_TOKEN]);

    let entries: Vec<Entry> = recipients
        .iter()
        .zip([100u64, 200, 300])
        .map(|(r, v)| Entry::new(*r, NATIVE_TOKEN, v))
        .collect();
    let tree = ChannelMerkleTree::new(&entries);

    let id = orchard.ledger.open_channel(owner).unwrap();
    orchard.ledger.set_merkle_root(owner, id, tree.root()).unwrap();
    orchard.ledger.fund_channel_with_eth(funder, id, amount(600)).unwrap();

    // Native funds are not a token contract.
    assert!(matches!(
        orchard.ledger.fund_channel(funder, id, NATIVE_TOKEN, amount(1)),
        Err(LedgerError::Transfer(_))
    ));

    for entry in &entries {
        let proof = tree.proof_for_entry(entry).unwrap();
        orchard
            .ledger
            .claim(id, entry.recipient, NATIVE_TOKEN, entry.cumulative_amount, &proof)
            .unwrap();
        assert_eq!(
            orchard.bank.native_balance_of(entry.recipient),
            entry.cumulative_amount
        );
    }
    assert_eq!(
        orchard.ledger.get_channel_reserves_by_token(id, NATIVE_TOKEN),
        U256::zero()
    );
}

// =========================================================================
// Properties
// =========================================================================

#[test]
fn test_channel_ids_dense_and_owned_by_opener() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut orchard = Orchard::new();

    let openers: Vec<_> = (0..40).map(|_| account(rng.gen_range(1..8))).collect();
    for (expected, opener) in openers.iter().enumerate() {
        let id = orchard.ledger.open_channel(*opener).unwrap();
        assert_eq!(id, expected as u64);
    }
    for (id, opener) in openers.iter().enumerate() {
        assert_eq!(orchard.ledger.owner_of(id as u64).unwrap(), *opener);
    }
    assert_eq!(orchard.ledger.channel_count(), 40);
}

#[test]
fn test_only_owner_sets_root() {
    let mut orchard = Orchard::new();
    let owners: Vec<_> = (1..=4).map(account).collect();
    for owner in &owners {
        orchard.ledger.open_channel(*owner).unwrap();
    }

    for (id, owner) in owners.iter().enumerate() {
        let id = id as u64;
        for caller in &owners {
            let result = orchard.ledger.set_merkle_root(*caller, id, [id as u8 + 1; 32]);
            if caller == owner {
                assert!(result.is_ok());
            } else {
                assert_eq!(
                    result,
                    Err(LedgerError::NotOwner {
                        channel_id: id,
                        caller: *caller
                    })
                );
            }
        }
    }

    // Authority follows the NFT.
    orchard.registry.transfer(owners[0], owners[1], 0).unwrap();
    assert!(orchard.ledger.set_merkle_root(owners[0], 0, [9u8; 32]).is_err());
    orchard.ledger.set_merkle_root(owners[1], 0, [9u8; 32]).unwrap();
    assert_eq!(orchard.ledger.get_merkle_root(0), [9u8; 32]);
}

#[test]
fn test_random_trees_are_claimable() {
    let mut rng = StdRng::seed_from_u64(0x0c4a4d);
    let owner = account(0x1);
    let funder = account(0x2);
    let tokens = [account(0x100), account(0x101)];

    for size in [2usize, 3, 7, 16, 33] {
        let mut orchard = Orchard::new();
        orchard.fund_account(funder, &tokens);

        let entries: Vec<Entry> = (0..size)
            .map(|i| {
                Entry::new(
                    account(0x1000 + i as u64),
                    tokens[i % tokens.len()],
                    rng.gen_range(1..1_000u64),
                )
            })
            .collect();
        let tree = ChannelMerkleTree::new(&entries);

        let id = orchard.ledger.open_channel(owner).unwrap();
        orchard.ledger.set_merkle_root(owner, id, tree.root()).unwrap();
        for token in &tokens {
            orchard.ledger.fund_channel(funder, id, *token, amount(500_000)).unwrap();
        }

        for entry in &entries {
            let proof = tree.proof_for_entry(entry).unwrap();

            // Any single-bit corruption is rejected.
            if !proof.is_empty() {
                let mut corrupted: Vec<Hash> = proof.clone();
                let element = rng.gen_range(0..corrupted.len());
                corrupted[element][rng.gen_range(0..32)] ^= 1u8 << rng.gen_range(0..8u32);
                assert_eq!(
                    orchard.ledger.claim(
                        id,
                        entry.recipient,
                        entry.token,
                        entry.cumulative_amount,
                        &corrupted
                    ),
                    Err(LedgerError::MerkleProof(id))
                );
            }

            let receipt = orchard
                .ledger
                .claim(id, entry.recipient, entry.token, entry.cumulative_amount, &proof)
                .unwrap();
            assert_eq!(receipt.payout, entry.cumulative_amount);

            // Repeating is a no-op.
            let again = orchard
                .ledger
                .claim(id, entry.recipient, entry.token, entry.cumulative_amount, &proof)
                .unwrap();
            assert!(again.is_noop());
            assert_eq!(
                orchard.balance(entry.recipient, entry.token),
                entry.cumulative_amount
            );
        }
    }
}
