//! Device property probes and the snapshot they produce

use std::fmt;

/// Property read used as the boot-wait readiness predicate.
pub const BOOT_COMPLETED_PROP: &str = "sys.boot_completed";

/// One entry of the fixed label → probe table.
#[derive(Debug, Clone, Copy)]
pub struct PropertyProbe {
    /// Human-readable label, also the lookup key in a snapshot
    pub label: &'static str,
    /// Shell command passed to `adb shell`
    pub shell_command: &'static str,
}

/// The fixed set of descriptive properties read from a ready device.
///
/// Order matters: snapshots preserve it for deterministic display.
pub const PROPERTY_PROBES: &[PropertyProbe] = &[
    PropertyProbe {
        label: "Android Version",
        shell_command: "getprop ro.build.version.release",
    },
    PropertyProbe {
        label: "Device Model",
        shell_command: "getprop ro.product.model",
    },
    PropertyProbe {
        label: "Device Manufacturer",
        shell_command: "getprop ro.product.manufacturer",
    },
    PropertyProbe {
        label: "Total Memory",
        shell_command: "cat /proc/meminfo | grep MemTotal",
    },
    PropertyProbe {
        label: "CPU Info",
        shell_command: "cat /proc/cpuinfo | grep Processor",
    },
];

/// Result of one property probe.
///
/// A probe that ran but failed is retained with its error text; callers
/// choose whether to treat that as an empty value or a hard failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Trimmed probe output (may be empty)
    Value(String),
    /// The probe command ran but reported failure
    Failed(String),
}

/// One label with its observed outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyReading {
    pub label: &'static str,
    pub outcome: ProbeOutcome,
}

/// Label-ordered device properties from one query batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySnapshot {
    readings: Vec<PropertyReading>,
}

impl PropertySnapshot {
    pub fn new(readings: Vec<PropertyReading>) -> Self {
        Self { readings }
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// All readings in probe-table order.
    pub fn readings(&self) -> &[PropertyReading] {
        &self.readings
    }

    /// Labels in probe-table order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.readings.iter().map(|r| r.label)
    }

    /// Successful value for a label, if the probe produced one.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.readings.iter().find(|r| r.label == label).and_then(|r| {
            match &r.outcome {
                ProbeOutcome::Value(v) => Some(v.as_str()),
                ProbeOutcome::Failed(_) => None,
            }
        })
    }

    /// Whether every probe in the batch produced a value.
    pub fn is_complete(&self) -> bool {
        self.readings
            .iter()
            .all(|r| matches!(r.outcome, ProbeOutcome::Value(_)))
    }
}

impl fmt::Display for PropertySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Device Properties ===")?;
        for reading in &self.readings {
            match &reading.outcome {
                ProbeOutcome::Value(v) => writeln!(f, "{}: {}", reading.label, v)?,
                ProbeOutcome::Failed(e) => {
                    writeln!(f, "{}: (unavailable: {})", reading.label, e)?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PropertySnapshot {
        PropertySnapshot::new(vec![
            PropertyReading {
                label: "Android Version",
                outcome: ProbeOutcome::Value("11".to_string()),
            },
            PropertyReading {
                label: "CPU Info",
                outcome: ProbeOutcome::Failed("exit code 1".to_string()),
            },
        ])
    }

    #[test]
    fn test_probe_table_has_five_ordered_entries() {
        let labels: Vec<_> = PROPERTY_PROBES.iter().map(|p| p.label).collect();
        assert_eq!(
            labels,
            vec![
                "Android Version",
                "Device Model",
                "Device Manufacturer",
                "Total Memory",
                "CPU Info",
            ]
        );
    }

    #[test]
    fn test_get_returns_values_not_failures() {
        let snapshot = sample();
        assert_eq!(snapshot.get("Android Version"), Some("11"));
        assert_eq!(snapshot.get("CPU Info"), None);
        assert_eq!(snapshot.get("No Such Label"), None);
    }

    #[test]
    fn test_is_complete() {
        assert!(!sample().is_complete());

        let complete = PropertySnapshot::new(vec![PropertyReading {
            label: "Device Model",
            outcome: ProbeOutcome::Value("sdk_gphone_x86".to_string()),
        }]);
        assert!(complete.is_complete());
    }

    #[test]
    fn test_display_renders_labels_in_order() {
        let rendered = sample().to_string();
        let version_at = rendered.find("Android Version: 11").unwrap();
        let cpu_at = rendered.find("CPU Info: (unavailable: exit code 1)").unwrap();
        assert!(rendered.starts_with("=== Device Properties ==="));
        assert!(version_at < cpu_at);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = PropertySnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert!(snapshot.is_complete());
    }
}
