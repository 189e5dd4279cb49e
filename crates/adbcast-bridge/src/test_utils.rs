//! Test utilities for bridge consumers
//!
//! [`FakeRunner`] stands in for the process layer: responses are queued up
//! front and every invocation is recorded for later assertions.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use adbcast_core::prelude::*;

use crate::runner::{CommandRunner, ProcessOutput};

/// One recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

#[derive(Debug, Clone)]
enum FakeResponse {
    Output(ProcessOutput),
    Exit { code: Option<i32>, stderr: String },
    Spawn(String),
}

#[derive(Debug, Default)]
struct FakeRunnerInner {
    responses: VecDeque<FakeResponse>,
    calls: Vec<RecordedCall>,
}

/// Scripted [`CommandRunner`]
///
/// Clones share the same queue and call log. When the queue is empty a run
/// succeeds with empty output.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    inner: Arc<Mutex<FakeRunnerInner>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeRunnerInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a successful run with the given stdout
    pub fn push_stdout(&self, stdout: &str) {
        self.lock()
            .responses
            .push_back(FakeResponse::Output(ProcessOutput::from_stdout(stdout)));
    }

    /// Queue a run that exits non-zero
    pub fn push_exit_failure(&self, code: Option<i32>, stderr: &str) {
        self.lock().responses.push_back(FakeResponse::Exit {
            code,
            stderr: stderr.to_string(),
        });
    }

    /// Queue a run that fails to start
    pub fn push_spawn_failure(&self, reason: &str) {
        self.lock()
            .responses
            .push_back(FakeResponse::Spawn(reason.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, program: &Path, args: &[String], cwd: &Path) -> Result<ProcessOutput> {
        let response = {
            let mut inner = self.lock();
            inner.calls.push(RecordedCall {
                program: program.to_path_buf(),
                args: args.to_vec(),
                cwd: cwd.to_path_buf(),
            });
            inner.responses.pop_front()
        };

        match response {
            None => Ok(ProcessOutput::default()),
            Some(FakeResponse::Output(output)) => Ok(output),
            Some(FakeResponse::Exit { code, stderr }) => Err(Error::process_exit(code, stderr)),
            Some(FakeResponse::Spawn(reason)) => Err(Error::process_spawn(reason)),
        }
    }
}

/// Typical `adb devices` output listing the given serials
pub fn devices_output(serials: &[&str]) -> String {
    let mut output = String::from("List of devices attached\n");
    for serial in serials {
        output.push_str(serial);
        output.push_str("\tdevice\n");
    }
    output
}
