//! Stub connection targets for routing and executor tests.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use switchyard_routing::{BoxError, ConnectionSource, Session};

/// An error injected by the stub target or session.
#[derive(Debug, PartialEq, Eq)]
pub struct StubError(pub &'static str);

impl fmt::Display for StubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StubError {}

/// Recorded session activity for one target.
#[derive(Debug, Default)]
pub struct SessionLog {
    pub acquires: AtomicUsize,
    pub begins: AtomicUsize,
    pub commits: AtomicUsize,
    pub rollbacks: AtomicUsize,
    pub releases: AtomicUsize,
}

impl SessionLog {
    pub fn acquires(&self) -> usize {
        self.acquires.load(Ordering::SeqCst)
    }

    pub fn begins(&self) -> usize {
        self.begins.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

/// A stub connection target with failure injection.
pub struct StubTarget {
    pub name: &'static str,
    pub log: Arc<SessionLog>,
    fail_acquire: AtomicBool,
    fail_commit: AtomicBool,
}

impl StubTarget {
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            log: Arc::new(SessionLog::default()),
            fail_acquire: AtomicBool::new(false),
            fail_commit: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent `acquire` fail.
    pub fn fail_acquires(self) -> Self {
        self.fail_acquire.store(true, Ordering::SeqCst);
        self
    }

    /// Makes every subsequent `commit` fail.
    pub fn fail_commits(self) -> Self {
        self.fail_commit.store(true, Ordering::SeqCst);
        self
    }
}

/// A stub session recording its transaction activity.
pub struct StubSession {
    pub target_name: &'static str,
    log: Arc<SessionLog>,
    fail_commit: bool,
}

impl Drop for StubSession {
    fn drop(&mut self) {
        self.log.releases.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Session for StubSession {
    async fn begin(&mut self) -> Result<(), BoxError> {
        self.log.begins.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), BoxError> {
        self.log.commits.fetch_add(1, Ordering::SeqCst);
        if self.fail_commit {
            return Err(Box::new(StubError("commit failed")));
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), BoxError> {
        self.log.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl ConnectionSource for StubTarget {
    type Session = StubSession;

    async fn acquire(&self) -> Result<Self::Session, BoxError> {
        self.log.acquires.fetch_add(1, Ordering::SeqCst);
        if self.fail_acquire.load(Ordering::SeqCst) {
            return Err(Box::new(StubError("pool exhausted")));
        }
        Ok(StubSession {
            target_name: self.name,
            log: Arc::clone(&self.log),
            fail_commit: self.fail_commit.load(Ordering::SeqCst),
        })
    }
}
