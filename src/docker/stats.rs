use bollard::container::{MemoryStatsStats, Stats};

/// One rendered usage snapshot for a running container.
pub struct StatsSnapshot {
    pub id: String,
    pub name: String,
    pub cpu_percent: f64,
    pub memory: String,
    pub net_io: String,
    pub block_io: String,
    pub pids: u64,
}

impl StatsSnapshot {
    /// Build a snapshot from the daemon's raw stats response, using the
    /// same derivations the `docker stats` command applies.
    pub fn from_stats(stats: &Stats) -> Self {
        let cpu_delta = stats
            .cpu_stats
            .cpu_usage
            .total_usage
            .saturating_sub(stats.precpu_stats.cpu_usage.total_usage);
        let system_delta = stats
            .cpu_stats
            .system_cpu_usage
            .unwrap_or(0)
            .saturating_sub(stats.precpu_stats.system_cpu_usage.unwrap_or(0));
        let online_cpus = stats.cpu_stats.online_cpus.unwrap_or(1);

        let mem_usage = memory_usage(stats);
        let mem_limit = stats.memory_stats.limit.unwrap_or(0);

        let (rx, tx) = stats
            .networks
            .as_ref()
            .map(|nets| {
                nets.values()
                    .fold((0u64, 0u64), |(rx, tx), n| (rx + n.rx_bytes, tx + n.tx_bytes))
            })
            .unwrap_or((0, 0));

        let (blk_read, blk_write) = stats
            .blkio_stats
            .io_service_bytes_recursive
            .as_ref()
            .map(|entries| {
                entries.iter().fold((0u64, 0u64), |(r, w), e| {
                    match e.op.to_ascii_lowercase().as_str() {
                        "read" => (r + e.value, w),
                        "write" => (r, w + e.value),
                        _ => (r, w),
                    }
                })
            })
            .unwrap_or((0, 0));

        Self {
            id: stats.id.chars().take(12).collect(),
            name: stats.name.trim_start_matches('/').to_string(),
            cpu_percent: cpu_percent(cpu_delta, system_delta, online_cpus),
            memory: format!("{} / {}", format_bytes(mem_usage), format_bytes(mem_limit)),
            net_io: format!("{} / {}", format_bytes(rx), format_bytes(tx)),
            block_io: format!("{} / {}", format_bytes(blk_read), format_bytes(blk_write)),
            pids: stats.pids_stats.current.unwrap_or(0),
        }
    }
}

/// Container memory usage, excluding page cache the way `docker stats` does.
fn memory_usage(stats: &Stats) -> u64 {
    let usage = stats.memory_stats.usage.unwrap_or(0);
    let cache = match &stats.memory_stats.stats {
        Some(MemoryStatsStats::V1(v1)) => v1.total_inactive_file,
        Some(MemoryStatsStats::V2(v2)) => v2.inactive_file,
        None => 0,
    };
    usage.saturating_sub(cache)
}

/// CPU usage as a percentage of the host, scaled by the number of online
/// CPUs (the `docker stats` formula).
pub fn cpu_percent(cpu_delta: u64, system_delta: u64, online_cpus: u64) -> f64 {
    if cpu_delta == 0 || system_delta == 0 {
        return 0.0;
    }
    (cpu_delta as f64 / system_delta as f64) * online_cpus as f64 * 100.0
}

pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    if bytes >= GIB {
        format!("{:.2} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.2} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_percent_scales_by_online_cpus() {
        // A quarter of total system time on a 4-cpu host reads as 100%
        let pct = cpu_percent(250_000, 1_000_000, 4);
        assert!((pct - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn cpu_percent_handles_missing_deltas() {
        assert_eq!(cpu_percent(0, 1_000_000, 4), 0.0);
        assert_eq!(cpu_percent(250_000, 0, 4), 0.0);
    }

    #[test]
    fn byte_formatting() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KiB");
        assert_eq!(format_bytes(256 * 1024 * 1024), "256.00 MiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GiB");
    }
}
