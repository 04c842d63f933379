//! Lifecycle of one managed emulator session
//!
//! `launch → (boot wait) → install/query → shutdown`, expressed as an
//! explicit state machine. Install and query fail fast outside `Ready`;
//! shutdown is idempotent-terminal and always lands in `Stopped`.

use std::path::Path;
use std::time::Duration;

use crate::config::SessionConfig;
use crate::exec::CommandRunner;
use crate::interpret::{self, OutputInterpreter};
use crate::poll::{await_predicate, PollConfig};
use crate::probes::{
    ProbeOutcome, PropertyReading, PropertySnapshot, BOOT_COMPLETED_PROP, PROPERTY_PROBES,
};
use avdctl_core::prelude::*;

/// Fixed pause between boot probes. Responsiveness traded against
/// spawning an external adb process per attempt.
pub const BOOT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Stateful controller over one externally-hosted virtual device.
///
/// Exactly one `DeviceSession` is assumed live per device; concurrent
/// sessions against the same AVD are not arbitrated here.
pub struct DeviceSession<R> {
    runner: R,
    config: SessionConfig,
    state: SessionState,
    last_properties: Option<PropertySnapshot>,
    boot_interpreter: OutputInterpreter,
    install_interpreter: OutputInterpreter,
}

impl<R: CommandRunner> DeviceSession<R> {
    pub fn new(runner: R, config: SessionConfig) -> Self {
        Self {
            runner,
            config,
            state: SessionState::Unstarted,
            last_properties: None,
            boot_interpreter: interpret::boot_completed,
            install_interpreter: interpret::install_succeeded,
        }
    }

    /// Swap the boot readiness heuristic (testing seam).
    pub fn with_boot_interpreter(mut self, interpreter: OutputInterpreter) -> Self {
        self.boot_interpreter = interpreter;
        self
    }

    /// Swap the install success heuristic (testing seam).
    pub fn with_install_interpreter(mut self, interpreter: OutputInterpreter) -> Self {
        self.install_interpreter = interpreter;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Access the underlying execution facility.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Properties from the most recent successful query batch, if any.
    pub fn last_properties(&self) -> Option<&PropertySnapshot> {
        self.last_properties.as_ref()
    }

    /// Spawn the emulator and wait for the device to finish booting.
    ///
    /// Valid only from `Unstarted`. The spawn itself is fire-and-forget;
    /// readiness is then polled via the boot-completed probe. Any failure
    /// leaves the session in `Failed` with no automatic retry.
    pub async fn launch(&mut self) -> Result<()> {
        if self.state != SessionState::Unstarted {
            return Err(Error::not_ready(self.state));
        }

        self.state = SessionState::Launching;
        info!("Launching AVD: {}", self.config.avd);

        let handle = match self
            .runner
            .spawn_detached(
                &self.config.emulator_command,
                &["-avd", &self.config.avd, "-no-snapshot-load"],
            )
            .await
        {
            Ok(handle) => handle,
            Err(e) => {
                self.state = SessionState::Failed;
                error!("Emulator spawn failed: {}", e);
                return Err(e);
            }
        };
        debug!("Emulator process requested, pid: {:?}", handle.pid);

        self.state = SessionState::AwaitingBoot;
        match self.await_ready().await {
            Ok(()) => {
                self.state = SessionState::Ready;
                info!("Device is ready");
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Failed;
                error!("Boot wait failed: {}", e);
                Err(e)
            }
        }
    }

    /// Boot-wait protocol: poll the boot-completed probe under the
    /// configured deadline.
    ///
    /// Probe errors are swallowed while polling; only the deadline ends
    /// the wait unsuccessfully.
    pub async fn await_ready(&self) -> Result<()> {
        let runner = &self.runner;
        let adb = self.config.adb_command.as_str();
        let interpret = self.boot_interpreter;

        await_predicate(
            PollConfig::new(self.config.boot_timeout(), BOOT_POLL_INTERVAL),
            move || async move {
                let out = runner
                    .run(adb, &["shell", "getprop", BOOT_COMPLETED_PROP])
                    .await?;
                Ok(interpret(&out.stdout))
            },
        )
        .await
    }

    /// Install one application package on the ready device.
    ///
    /// The path is checked locally before any external command is run.
    /// Success is inferred from the install marker in captured stdout.
    pub async fn install_package(&self, package: &Path) -> Result<()> {
        if self.state != SessionState::Ready {
            return Err(Error::not_ready(self.state));
        }
        if !package.exists() {
            return Err(Error::package_not_found(package));
        }

        let package_arg = package.to_string_lossy();
        info!("Installing package: {}", package_arg);

        let out = self
            .runner
            .run(&self.config.adb_command, &["install", &package_arg])
            .await?;

        if (self.install_interpreter)(&out.stdout) {
            info!("Installed {}", package_arg);
            Ok(())
        } else {
            let detail = if out.stderr.trim().is_empty() {
                out.stdout.trim().to_string()
            } else {
                out.stderr.trim().to_string()
            };
            warn!("Install rejected for {}: {}", package_arg, detail);
            Err(Error::install_rejected(detail))
        }
    }

    /// Read the fixed property set from the ready device.
    ///
    /// A probe whose command runs but fails is retained in the snapshot as
    /// a per-label failure. A probe that cannot be executed at all aborts
    /// the whole batch, leaving the last snapshot untouched. On completion
    /// the snapshot atomically replaces the previous one.
    pub async fn query_properties(&mut self) -> Result<PropertySnapshot> {
        if self.state != SessionState::Ready {
            return Err(Error::not_ready(self.state));
        }

        let mut readings = Vec::with_capacity(PROPERTY_PROBES.len());
        for probe in PROPERTY_PROBES {
            let out = self
                .runner
                .run(&self.config.adb_command, &["shell", probe.shell_command])
                .await?;

            let outcome = if out.success {
                ProbeOutcome::Value(out.stdout.trim().to_string())
            } else {
                let detail = if out.stderr.trim().is_empty() {
                    format!("exit code {:?}", out.code)
                } else {
                    out.stderr.trim().to_string()
                };
                debug!("Probe '{}' failed: {}", probe.label, detail);
                ProbeOutcome::Failed(detail)
            };

            readings.push(PropertyReading {
                label: probe.label,
                outcome,
            });
        }

        let snapshot = PropertySnapshot::new(readings);
        self.last_properties = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Render the last-known properties, querying first when none are
    /// cached.
    pub async fn display_properties(&mut self) -> Result<String> {
        let snapshot = match self.last_properties.clone() {
            Some(snapshot) => snapshot,
            None => self.query_properties().await?,
        };
        Ok(snapshot.to_string())
    }

    /// Best-effort termination of the emulator.
    ///
    /// The session lands in `Stopped` no matter what the termination
    /// instruction reports; a failure is still returned to the caller.
    /// From `Unstarted` or `Stopped` this is a no-op transition.
    pub async fn shutdown(&mut self) -> Result<()> {
        if matches!(self.state, SessionState::Unstarted | SessionState::Stopped) {
            self.state = SessionState::Stopped;
            return Ok(());
        }

        self.state = SessionState::ShuttingDown;
        info!("Shutting down emulator");

        let result = self
            .runner
            .run(&self.config.adb_command, &["emu", "kill"])
            .await;
        self.state = SessionState::Stopped;

        match result {
            Ok(out) if out.success => Ok(()),
            Ok(out) => {
                let detail = if out.stderr.trim().is_empty() {
                    out.stdout.trim().to_string()
                } else {
                    out.stderr.trim().to_string()
                };
                warn!("Emulator kill reported failure: {}", detail);
                Err(Error::bridge(format!("adb emu kill failed: {}", detail)))
            }
            Err(e) => {
                warn!("Emulator kill could not run: {}", e);
                Err(e)
            }
        }
    }
}
