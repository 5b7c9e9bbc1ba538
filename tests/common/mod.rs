//! Scripted launcher for driving the controller without real processes

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use streamctl::{Channel, ExitOutcome, ProcessLauncher, StreamProcess};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct State {
    next_pid: AtomicU32,
    launches: AtomicUsize,
    cancellations: AtomicUsize,
    fail_next: AtomicBool,
    tokens: Mutex<Vec<CancellationToken>>,
    args: Mutex<Vec<(Channel, Vec<String>)>>,
    exits: Mutex<HashMap<u32, oneshot::Sender<i32>>>,
}

/// Launcher whose processes run until cancelled or told to exit
#[derive(Clone, Default)]
pub struct ScriptedLauncher {
    state: Arc<State>,
}

impl ScriptedLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next launch fail with `NotFound`
    pub fn fail_next_launch(&self) {
        self.state.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn launches(&self) -> usize {
        self.state.launches.load(Ordering::SeqCst)
    }

    /// Processes that observed their cancellation
    pub fn cancellations(&self) -> usize {
        self.state.cancellations.load(Ordering::SeqCst)
    }

    /// Token handed to the n-th launch
    pub fn token(&self, n: usize) -> CancellationToken {
        self.state.tokens.lock().unwrap()[n].clone()
    }

    /// Arguments of the n-th launch
    pub fn args(&self, n: usize) -> (Channel, Vec<String>) {
        self.state.args.lock().unwrap()[n].clone()
    }

    /// Make a running process exit on its own with the given status
    pub fn exit(&self, pid: u32, code: i32) -> bool {
        match self.state.exits.lock().unwrap().remove(&pid) {
            Some(tx) => tx.send(code).is_ok(),
            None => false,
        }
    }
}

pub struct ScriptedProcess {
    pid: u32,
    cancel: CancellationToken,
    exit_rx: oneshot::Receiver<i32>,
    state: Arc<State>,
}

impl StreamProcess for ScriptedProcess {
    fn id(&self) -> Option<u32> {
        Some(self.pid)
    }

    fn wait(mut self) -> impl Future<Output = ExitOutcome> + Send {
        async move {
            let exited = tokio::select! {
                _ = self.cancel.cancelled() => None,
                code = &mut self.exit_rx => code.ok(),
            };

            match exited {
                Some(0) => ExitOutcome::Completed,
                Some(code) => ExitOutcome::Failed { code: Some(code) },
                None => {
                    self.cancel.cancelled().await;
                    self.state.cancellations.fetch_add(1, Ordering::SeqCst);
                    ExitOutcome::Cancelled
                }
            }
        }
    }
}

impl ProcessLauncher for ScriptedLauncher {
    type Process = ScriptedProcess;

    fn launch(
        &self,
        channel: Channel,
        args: &[String],
        cancel: CancellationToken,
    ) -> std::io::Result<ScriptedProcess> {
        if self.state.fail_next.swap(false, Ordering::SeqCst) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "scripted launch failure",
            ));
        }

        let pid = 1000 + self.state.next_pid.fetch_add(1, Ordering::SeqCst);
        let (tx, exit_rx) = oneshot::channel();

        self.state.launches.fetch_add(1, Ordering::SeqCst);
        self.state.tokens.lock().unwrap().push(cancel.clone());
        self.state.args.lock().unwrap().push((channel, args.to_vec()));
        self.state.exits.lock().unwrap().insert(pid, tx);

        Ok(ScriptedProcess {
            pid,
            cancel,
            exit_rx,
            state: Arc::clone(&self.state),
        })
    }
}

/// Poll `check` until it holds or two seconds pass
pub async fn eventually<F: FnMut() -> bool>(mut check: F) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    check()
}
