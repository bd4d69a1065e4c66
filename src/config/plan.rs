use std::fmt;

use anyhow::{Context, Result};

/// Subscription plan selected at startup. The plan decides the default
/// resource-limit profile for the launched container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plan {
    Free,
    Paid,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Paid => "paid",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU/memory limits passed to the container runtime at creation.
///
/// The raw values are kept exactly as entered so the rendered flag string
/// matches what the user chose; the parsed forms feed the Docker API.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceLimits {
    cpus: String,
    memory: String,
    nano_cpus: i64,
    memory_bytes: i64,
}

impl ResourceLimits {
    /// Fixed limits for the free plan.
    pub fn free() -> Self {
        Self::custom("0.5", "256m").expect("free plan limits are valid")
    }

    /// Default limits for the paid plan.
    pub fn paid_default() -> Self {
        Self::custom("1", "512m").expect("paid default limits are valid")
    }

    /// Validate user-entered limits. CPU must parse as a positive number,
    /// memory must follow Docker's suffix grammar (e.g. `512m`, `1g`).
    pub fn custom(cpus: &str, memory: &str) -> Result<Self> {
        let cpus = cpus.trim();
        let parsed: f64 = cpus
            .parse()
            .with_context(|| format!("Invalid CPU limit: '{}'", cpus))?;
        if !parsed.is_finite() || parsed <= 0.0 {
            anyhow::bail!("CPU limit must be a positive number, got '{}'", cpus);
        }

        let memory = memory.trim();
        let memory_bytes = parse_memory_bytes(memory)?;

        Ok(Self {
            cpus: cpus.to_string(),
            memory: memory.to_string(),
            nano_cpus: (parsed * 1_000_000_000.0) as i64,
            memory_bytes,
        })
    }

    /// Render the limits as the runtime flags they correspond to. This is
    /// the recorded/displayed form of the limits.
    pub fn flag_string(&self) -> String {
        format!(r#"--cpus="{}" --memory="{}""#, self.cpus, self.memory)
    }

    /// CPU limit in Docker's NanoCPUs unit.
    pub fn nano_cpus(&self) -> i64 {
        self.nano_cpus
    }

    /// Memory limit in bytes.
    pub fn memory_bytes(&self) -> i64 {
        self.memory_bytes
    }
}

/// Parse a Docker memory string (`256m`, `1g`, `1024`, `512MB`) into bytes.
/// Suffixes are binary multiples, case-insensitive, with an optional
/// trailing `b`.
fn parse_memory_bytes(input: &str) -> Result<i64> {
    const KB: i64 = 1024;
    const MB: i64 = KB * 1024;
    const GB: i64 = MB * 1024;

    if input.is_empty() {
        anyhow::bail!("Memory limit is empty");
    }

    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, suffix) = input.split_at(split);

    let value: i64 = digits
        .parse()
        .with_context(|| format!("Invalid memory limit: '{}'", input))?;

    let multiplier = match suffix.to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kb" => KB,
        "m" | "mb" => MB,
        "g" | "gb" => GB,
        other => anyhow::bail!(
            "Unknown memory suffix '{}' in '{}'. Expected b, k, m or g",
            other,
            input
        ),
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Memory limit out of range: '{}'", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_limits_are_fixed() {
        let limits = ResourceLimits::free();
        assert_eq!(limits.flag_string(), r#"--cpus="0.5" --memory="256m""#);
        assert_eq!(limits.nano_cpus(), 500_000_000);
        assert_eq!(limits.memory_bytes(), 256 * 1024 * 1024);
    }

    #[test]
    fn custom_limits_render_verbatim() {
        let limits = ResourceLimits::custom("2", "1g").unwrap();
        assert_eq!(limits.flag_string(), r#"--cpus="2" --memory="1g""#);
        assert_eq!(limits.nano_cpus(), 2_000_000_000);
        assert_eq!(limits.memory_bytes(), 1024 * 1024 * 1024);
    }

    #[test]
    fn paid_default_limits() {
        let limits = ResourceLimits::paid_default();
        assert_eq!(limits.flag_string(), r#"--cpus="1" --memory="512m""#);
    }

    #[test]
    fn memory_suffixes() {
        assert_eq!(parse_memory_bytes("1024").unwrap(), 1024);
        assert_eq!(parse_memory_bytes("512b").unwrap(), 512);
        assert_eq!(parse_memory_bytes("64k").unwrap(), 64 * 1024);
        assert_eq!(parse_memory_bytes("256MB").unwrap(), 256 * 1024 * 1024);
        assert_eq!(parse_memory_bytes("2G").unwrap(), 2 * 1024 * 1024 * 1024);
    }

    #[test]
    fn fractional_cpus_are_accepted() {
        let limits = ResourceLimits::custom("1.5", "512m").unwrap();
        assert_eq!(limits.nano_cpus(), 1_500_000_000);
    }

    #[test]
    fn invalid_limits_are_rejected() {
        assert!(ResourceLimits::custom("zero", "256m").is_err());
        assert!(ResourceLimits::custom("-1", "256m").is_err());
        assert!(ResourceLimits::custom("0", "256m").is_err());
        assert!(ResourceLimits::custom("1", "lots").is_err());
        assert!(ResourceLimits::custom("1", "256x").is_err());
        assert!(ResourceLimits::custom("1", "").is_err());
    }
}
