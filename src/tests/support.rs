//! Fakes and proof-tree builders shared by the tests.

use std::collections::HashSet;
use std::fs;
use std::io::{ self, Write };
use std::path::{ Path, PathBuf };
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::sync::{ Arc, Mutex };
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{ RunConfig, DEFAULT_PROOF_MARKER };
use crate::errors::{ RunnerError, RunnerResult };
use crate::models::capability::{ CapabilitySet, PoolDeclaration, RestrictMode };
use crate::models::proof::UnitOutcome;
use crate::traits::build_tool::BuildTool;
use crate::traits::proof_configurer::ProofConfigurer;

/// In-memory writer whose contents stay readable after it is handed off
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create `root/rel` as a proof directory with a marker and a Makefile
pub fn write_proof(root: &Path, rel: &str, uid: Option<&str>) -> PathBuf {
    let dir = root.join(rel);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(DEFAULT_PROOF_MARKER), "").unwrap();

    let mut makefile = String::from("HARNESS_ENTRY = harness\nHARNESS_FILE = harness.c\n");
    if let Some(uid) = uid {
        makefile.push_str(&format!("PROOF_UID = {}\n", uid));
    }
    makefile.push_str("include ../Makefile.common\n");
    fs::write(dir.join("Makefile"), makefile).unwrap();
    dir
}

pub fn test_config(root: &Path) -> RunConfig {
    RunConfig {
        proof_root: root.to_path_buf(),
        proof_marker: DEFAULT_PROOF_MARKER.to_string(),
        proofs: None,
        standalone: true,
        project_name: Some("test-project".to_string()),
        restrict_expensive_jobs: RestrictMode::Auto,
        expensive_jobs_parallelism: 1,
        configure_jobs: 1,
        parallel_jobs: None,
        litani: None,
    }
}

/// Records every call instead of running Litani
#[derive(Default)]
pub struct FakeBuildTool {
    caps: CapabilitySet,
    fail_build: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeBuildTool {
    pub fn with_capabilities(caps: &[&str]) -> Self {
        Self {
            caps: caps.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn failing_build(mut self) -> Self {
        self.fail_build = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn push(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BuildTool for FakeBuildTool {
    fn describe(&self) -> String {
        "fake litani".to_string()
    }

    async fn capabilities(&self) -> CapabilitySet {
        self.push("print-capabilities".to_string());
        self.caps.clone()
    }

    async fn init(&self, project: &str, pools: &[PoolDeclaration]) -> RunnerResult<()> {
        let pools: Vec<String> = pools.iter().map(ToString::to_string).collect();
        self.push(format!("init {} [{}]", project, pools.join(",")));
        Ok(())
    }

    async fn run_build(&self, jobs: Option<usize>) -> RunnerResult<()> {
        self.push(format!("run-build {:?}", jobs));
        if self.fail_build {
            return Err(RunnerError::BuildToolFailed {
                tool: "litani run-build".to_string(),
                message: "exited with status 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Succeeds for every proof except those whose directory name is listed
#[derive(Default)]
pub struct FakeConfigurer {
    failing: HashSet<String>,
    unlaunchable: HashSet<String>,
    delay: Duration,
    calls: Mutex<Vec<(PathBuf, bool)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeConfigurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Proofs whose configuration command cannot even be started
    pub fn unlaunchable(names: &[&str]) -> Self {
        Self {
            unlaunchable: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn configured(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }

    pub fn pool_flags(&self) -> Vec<bool> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, pools)| *pools)
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProofConfigurer for FakeConfigurer {
    async fn configure(&self, dir: &Path, enable_pools: bool) -> RunnerResult<UnitOutcome> {
        self.calls.lock().unwrap().push((dir.to_path_buf(), enable_pools));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let name = dir.file_name().unwrap().to_string_lossy().into_owned();
        if self.unlaunchable.contains(&name) {
            return Err(RunnerError::Io(io::Error::new(io::ErrorKind::NotFound, "no such program")));
        }
        Ok(if self.failing.contains(&name) {
            UnitOutcome::Failed
        } else {
            UnitOutcome::Succeeded
        })
    }
}
