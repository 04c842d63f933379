//! Test utilities: a scripted command runner
//!
//! Stands in for the real execution facility so session logic can be
//! driven without an Android SDK. Responses are consumed in push order
//! regardless of the command; every invocation is recorded for
//! assertions.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::exec::{CommandOutput, CommandRunner, ProcessHandle};
use avdctl_core::prelude::*;

/// Successful command output with the given stdout.
pub fn output_ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        success: true,
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// Failed command output with the given exit code and stderr.
pub fn output_exit(code: i32, stderr: &str) -> CommandOutput {
    CommandOutput {
        success: false,
        code: Some(code),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

/// A [`CommandRunner`] that replays scripted responses.
///
/// When the `run` queue is empty, commands succeed with empty output —
/// the shape of a boot probe against a device that is not booted yet.
/// When the `spawn` queue is empty, spawns succeed with a fixed pid.
#[derive(Default)]
pub struct ScriptedRunner {
    run_responses: Mutex<VecDeque<Result<CommandOutput>>>,
    spawn_responses: Mutex<VecDeque<Result<ProcessHandle>>>,
    run_calls: Mutex<Vec<Vec<String>>>,
    spawn_calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next `run` response.
    pub fn push_run(&self, response: Result<CommandOutput>) {
        self.run_responses.lock().unwrap().push_back(response);
    }

    /// Queue the next `spawn_detached` response.
    pub fn push_spawn(&self, response: Result<ProcessHandle>) {
        self.spawn_responses.lock().unwrap().push_back(response);
    }

    /// Recorded `run` invocations as `[program, args...]` lines.
    pub fn run_calls(&self) -> Vec<Vec<String>> {
        self.run_calls.lock().unwrap().clone()
    }

    /// Recorded `spawn_detached` invocations as `[program, args...]` lines.
    pub fn spawn_calls(&self) -> Vec<Vec<String>> {
        self.spawn_calls.lock().unwrap().clone()
    }

    pub fn run_call_count(&self) -> usize {
        self.run_calls.lock().unwrap().len()
    }

    pub fn spawn_call_count(&self) -> usize {
        self.spawn_calls.lock().unwrap().len()
    }

    /// Forget recorded invocations (not queued responses).
    pub fn clear_calls(&self) {
        self.run_calls.lock().unwrap().clear();
        self.spawn_calls.lock().unwrap().clear();
    }
}

fn record(calls: &Mutex<Vec<Vec<String>>>, program: &str, args: &[&str]) {
    let mut line = Vec::with_capacity(args.len() + 1);
    line.push(program.to_string());
    line.extend(args.iter().map(|a| a.to_string()));
    calls.lock().unwrap().push(line);
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        record(&self.run_calls, program, args);
        match self.run_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(output_ok("")),
        }
    }

    async fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<ProcessHandle> {
        record(&self.spawn_calls, program, args);
        match self.spawn_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(ProcessHandle { pid: Some(4242) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_responses_replay_in_order() {
        let runner = ScriptedRunner::new();
        runner.push_run(Ok(output_ok("first")));
        runner.push_run(Ok(output_exit(1, "second")));

        let out = runner.run("adb", &["shell", "x"]).await.unwrap();
        assert_eq!(out.stdout, "first");

        let out = runner.run("adb", &["shell", "y"]).await.unwrap();
        assert!(!out.success);
        assert_eq!(out.stderr, "second");

        // Queue exhausted: empty success
        let out = runner.run("adb", &["shell", "z"]).await.unwrap();
        assert!(out.success);
        assert!(out.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let runner = ScriptedRunner::new();
        runner.run("adb", &["devices"]).await.unwrap();
        runner
            .spawn_detached("emulator", &["-avd", "test"])
            .await
            .unwrap();

        assert_eq!(runner.run_calls(), vec![vec!["adb", "devices"]]);
        assert_eq!(
            runner.spawn_calls(),
            vec![vec!["emulator", "-avd", "test"]]
        );

        runner.clear_calls();
        assert_eq!(runner.run_call_count(), 0);
        assert_eq!(runner.spawn_call_count(), 0);
    }
}
