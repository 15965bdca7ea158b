/// Best-effort probe of the host process's resident memory.
///
/// Solves are bracketed by a before/after reading to estimate the memory
/// cost of one model. Readings are instrumentation only: a `None` simply
/// leaves the sample's memory field empty and never affects control flow.
pub trait ResourceMonitor {
    /// Current resident set size in bytes, if the platform exposes it.
    fn resident_memory_bytes(&self) -> Option<u64>;
}

/// Monitor that never reports a reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl ResourceMonitor for NoopMonitor {
    fn resident_memory_bytes(&self) -> Option<u64> {
        None
    }
}

/// Monitor backed by `/proc/self/statm` on Linux.
///
/// Reports `None` on other platforms and on any read or parse failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcfsMonitor;

impl ResourceMonitor for ProcfsMonitor {
    #[cfg(target_os = "linux")]
    fn resident_memory_bytes(&self) -> Option<u64> {
        // Second field of statm is the resident page count.
        let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
        let pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
        let page_size = 4096;
        Some(pages * page_size)
    }

    #[cfg(not(target_os = "linux"))]
    fn resident_memory_bytes(&self) -> Option<u64> {
        None
    }
}
