//! # Governmint Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | gm-01 State Store | tree insert, inclusion proof |
//! | gm-02 Governance | CheckTx on a vote, DeliverTx on a proposal |
//! | shared-crypto | Ed25519 verify |

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use gm_01_state_store::{verify_proof, MerkleTree};
use gm_02_governance::test_utils::*;
use gm_02_governance::{AppContext, Application, Genesis, GovConfig, GovernanceApi};
use rand::Rng;
use shared_types::VOTE_YES;
use std::time::Duration;

// ============================================================================
// GM-01: State Store
// ============================================================================

fn random_tree(size: usize) -> (MerkleTree, Vec<[u8; 32]>) {
    let mut rng = rand::thread_rng();
    let mut tree = MerkleTree::new();
    let keys: Vec<[u8; 32]> = (0..size).map(|_| rng.gen()).collect();
    for key in &keys {
        tree.set(key, key.to_vec());
    }
    (tree, keys)
}

fn bench_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("gm-01-state-store");
    group.measurement_time(Duration::from_secs(5));

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("insert", size), &size, |b, &size| {
            b.iter(|| black_box(random_tree(size).0.root_hash()))
        });

        let (tree, keys) = random_tree(size);
        let root = tree.root_hash();
        let key = keys[size / 2];
        group.bench_with_input(BenchmarkId::new("prove_and_verify", size), &size, |b, _| {
            b.iter(|| {
                let proof = tree.prove(&key);
                black_box(proof.is_some_and(|p| verify_proof(&root, &key, &key, &p)))
            })
        });
    }

    group.finish();
}

// ============================================================================
// GM-02: Governance
// ============================================================================

const HEIGHT: u64 = 10;

fn session() -> (Application, AppContext) {
    let app = Application::new(GovConfig::default());
    let mut ctx = app.open().unwrap();
    let genesis = Genesis::new(["a", "b", "c", "d", "e"].into_iter().map(entity).collect());
    ctx.apply_genesis(&genesis).unwrap();
    ctx.deliver_tx(&encode(proposal_tx("a", "p1", "validators", 0, 100, text_info("bench"))))
        .unwrap();
    ctx.begin_block(HEIGHT).unwrap();
    ctx.end_block(HEIGHT).unwrap();
    ctx.commit().unwrap();
    ctx.begin_block(HEIGHT).unwrap();
    (app, ctx)
}

fn bench_transactions(c: &mut Criterion) {
    let mut group = c.benchmark_group("gm-02-governance");
    group.measurement_time(Duration::from_secs(5));
    let (app, ctx) = session();

    let vote = encode(vote_tx("a", HEIGHT, "p1", VOTE_YES));
    group.bench_function("check_tx_vote", |b| {
        b.iter(|| black_box(ctx.check_tx(&vote).unwrap().code))
    });

    let proposal = encode(proposal_tx("b", "p2", "validators", 0, 100, text_info("bench")));
    group.bench_function("deliver_tx_proposal", |b| {
        b.iter_batched(
            || {
                let mut fresh = app.open().unwrap();
                fresh.begin_block(HEIGHT).unwrap();
                fresh
            },
            |mut fresh| black_box(fresh.deliver_tx(&proposal).unwrap().code),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// SHARED-CRYPTO: Signatures
// ============================================================================

fn bench_signatures(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-crypto");
    let pair = keypair("bench");
    let key = pair.public_key();
    let message = b"governance transaction sign bytes";
    let signature = pair.sign(message);

    group.bench_function("ed25519_verify", |b| {
        b.iter(|| black_box(key.verify_bytes(message, &signature)))
    });
    group.finish();
}

criterion_group!(benches, bench_tree, bench_transactions, bench_signatures);
criterion_main!(benches);
