use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use indicatif::ProgressBar;
use tempfile::TempDir;

use super::support::{ setup, write_proof, FakeConfigurer, SharedBuffer };
use crate::errors::RunnerError;
use crate::implementations::discovery::discover_proofs;
use crate::implementations::scheduler::ProofScheduler;
use crate::models::progress::ProgressCounter;
use crate::models::proof::{ ProofUnit, UnitOutcome };

fn proof_tree(names: &[&str]) -> (TempDir, Vec<ProofUnit>) {
    let root = TempDir::new().unwrap();
    for name in names {
        write_proof(root.path(), &format!("proofs/{}", name), Some(name));
    }
    let units = discover_proofs(root.path(), "cbmc-proof.txt", None).unwrap();
    (root, units)
}

#[test]
fn progress_line_is_right_aligned_to_total_width() {
    let mut counter = ProgressCounter::new(12);
    assert_eq!(counter.width, 2);
    assert_eq!(counter.render(), "Configuring CBMC proofs:  0 / 12");

    counter.record(PathBuf::from("a"), UnitOutcome::Succeeded);
    counter.record(PathBuf::from("b"), UnitOutcome::Failed);
    assert_eq!(counter.render(), "Configuring CBMC proofs:  2 / 12");
    assert_eq!(counter.succeeded, vec![PathBuf::from("a")]);
    assert_eq!(counter.failed, vec![PathBuf::from("b")]);
    assert!(!counter.is_drained());
}

#[tokio::test]
async fn configures_every_unit_exactly_once() {
    setup();
    let (_root, units) = proof_tree(&["a", "b", "c", "d", "e", "f", "g"]);
    let expected: HashSet<PathBuf> = units.iter().map(|u| u.path.clone()).collect();
    let configurer = Arc::new(FakeConfigurer::failing(&["c", "f"]));

    let scheduler = ProofScheduler::new(Arc::clone(&configurer), 3, false);
    let counter = scheduler.configure_all(units, &ProgressBar::hidden()).await.unwrap();

    let configured = configurer.configured();
    assert_eq!(configured.len(), 7);
    assert_eq!(configured.iter().cloned().collect::<HashSet<_>>(), expected);
    assert!(counter.is_drained());
    assert_eq!(counter.succeeded.len() + counter.failed.len(), counter.total);
    assert_eq!(counter.failed.len(), 2);
}

#[tokio::test]
async fn never_exceeds_worker_bound() {
    setup();
    let (_root, units) = proof_tree(&["a", "b", "c", "d", "e", "f"]);
    let configurer = Arc::new(FakeConfigurer::new().with_delay(Duration::from_millis(20)));

    let scheduler = ProofScheduler::new(Arc::clone(&configurer), 3, false);
    scheduler.configure_all(units, &ProgressBar::hidden()).await.unwrap();

    assert_eq!(configurer.max_in_flight(), 3);
}

#[tokio::test]
async fn pool_flag_reaches_every_unit() {
    let (_root, units) = proof_tree(&["a", "b"]);
    let configurer = Arc::new(FakeConfigurer::new());

    let scheduler = ProofScheduler::new(Arc::clone(&configurer), 2, true);
    scheduler.configure_all(units, &ProgressBar::hidden()).await.unwrap();

    assert_eq!(configurer.pool_flags(), vec![true, true]);
}

#[tokio::test]
async fn collision_stops_further_scheduling() {
    setup();
    let root = TempDir::new().unwrap();
    write_proof(root.path(), "proofs/a", Some("a"));
    let bar = write_proof(root.path(), "proofs/bar", Some("X"));
    let foo = write_proof(root.path(), "proofs/foo", Some("X"));
    write_proof(root.path(), "proofs/zed", Some("zed"));
    let units = discover_proofs(root.path(), "cbmc-proof.txt", None).unwrap();
    let configurer = Arc::new(FakeConfigurer::new());

    let scheduler = ProofScheduler::new(Arc::clone(&configurer), 1, false);
    let err = scheduler.configure_all(units, &ProgressBar::hidden()).await.unwrap_err();

    match err {
        RunnerError::DuplicateProofUid { dir, first, .. } => {
            assert_eq!(dir, foo);
            assert_eq!(first, bar);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(configurer.configured(), vec![root.path().join("proofs/a"), bar]);
}

#[tokio::test]
async fn registry_does_not_outlive_a_run() {
    let (_root, units) = proof_tree(&["a", "b"]);
    let configurer = Arc::new(FakeConfigurer::new());
    let scheduler = ProofScheduler::new(Arc::clone(&configurer), 2, false);

    scheduler.configure_all(units.clone(), &ProgressBar::hidden()).await.unwrap();
    let second = scheduler.configure_all(units, &ProgressBar::hidden()).await.unwrap();

    assert_eq!(second.succeeded.len(), 2);
    assert_eq!(configurer.configured().len(), 4);
}

#[tokio::test]
async fn unit_whose_command_cannot_start_is_a_failure() {
    setup();
    let (root, units) = proof_tree(&["a", "b", "c"]);
    let configurer = Arc::new(FakeConfigurer::unlaunchable(&["b"]));

    let scheduler = ProofScheduler::new(Arc::clone(&configurer), 2, false);
    let counter = scheduler.configure_all(units, &ProgressBar::hidden()).await.unwrap();

    assert!(counter.is_drained());
    assert_eq!(counter.failed, vec![root.path().join("proofs/b")]);
    assert_eq!(counter.succeeded.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn no_unit_after_a_collision_is_configured() {
    setup();
    let root = TempDir::new().unwrap();
    for i in 0..10 {
        write_proof(root.path(), &format!("proofs/a{}", i), Some(&format!("a{}", i)));
        write_proof(root.path(), &format!("proofs/z{}", i), Some(&format!("z{}", i)));
    }
    write_proof(root.path(), "proofs/bar", Some("X"));
    write_proof(root.path(), "proofs/foo", Some("X"));
    let units = discover_proofs(root.path(), "cbmc-proof.txt", None).unwrap();
    let configurer = Arc::new(FakeConfigurer::new().with_delay(Duration::from_millis(5)));

    let scheduler = ProofScheduler::new(Arc::clone(&configurer), 4, false);
    let err = scheduler.configure_all(units, &ProgressBar::hidden()).await.unwrap_err();

    assert!(matches!(err, RunnerError::DuplicateProofUid { ref uid, .. } if uid == "X"));
    let configured = configurer.configured();
    assert!(configured.contains(&root.path().join("proofs/bar")));
    assert!(!configured.contains(&root.path().join("proofs/foo")));
    assert!(
        configured.iter().all(|p| !p.file_name().unwrap().to_string_lossy().starts_with('z')),
        "configured after collision: {:?}",
        configured
    );
}

#[tokio::test]
async fn hidden_bar_writes_plain_progress_lines() {
    let (_root, units) = proof_tree(&["a", "b"]);
    let out = SharedBuffer::default();

    let scheduler = ProofScheduler::new(Arc::new(FakeConfigurer::new()), 1, false)
        .with_fallback_output(out.clone());
    scheduler.configure_all(units, &ProgressBar::hidden()).await.unwrap();

    let text = out.contents();
    assert!(text.starts_with("\rConfiguring CBMC proofs: 0 / 2"), "{:?}", text);
    assert!(text.contains("\rConfiguring CBMC proofs: 1 / 2"), "{:?}", text);
    assert!(text.ends_with("\rConfiguring CBMC proofs: 2 / 2\n"), "{:?}", text);
    assert_eq!(text.matches('\n').count(), 1);
}

#[tokio::test]
async fn progress_line_is_terminated_after_a_collision() {
    let root = TempDir::new().unwrap();
    write_proof(root.path(), "proofs/bar", Some("X"));
    write_proof(root.path(), "proofs/foo", Some("X"));
    let units = discover_proofs(root.path(), "cbmc-proof.txt", None).unwrap();
    let out = SharedBuffer::default();

    let scheduler = ProofScheduler::new(Arc::new(FakeConfigurer::new()), 1, false)
        .with_fallback_output(out.clone());
    scheduler.configure_all(units, &ProgressBar::hidden()).await.unwrap_err();

    assert!(out.contents().ends_with("\rConfiguring CBMC proofs: 1 / 2\n"));
}
