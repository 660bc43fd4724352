use std::collections::BTreeSet;
use std::time::Duration;

use crate::error::ScanError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_CONCURRENT_PORTS: usize = 100;
/// Upper bound applied to the host-level concurrency when it is derived from
/// the port-level one.
pub const HOST_CONCURRENCY_CAP: usize = 50;

pub const DEFAULT_BANNER_PORTS: [u16; 8] = [21, 22, 23, 25, 80, 110, 143, 443];
pub const DEFAULT_BANNER_MAX_CHARS: usize = 100;

/// Immutable settings for one scan invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Budget for the TCP connect, and again for the banner read.
    pub timeout: Duration,
    /// Probes in flight against a single host.
    pub max_concurrent_ports: usize,
    /// Hosts probed at once when the target is a block.
    pub max_concurrent_hosts: usize,
    pub banner: BannerPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_concurrent_ports: DEFAULT_MAX_CONCURRENT_PORTS,
            max_concurrent_hosts: DEFAULT_MAX_CONCURRENT_PORTS.min(HOST_CONCURRENCY_CAP),
            banner: BannerPolicy::default(),
        }
    }
}

impl ScanConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the per-host probe bound and re-derives the host bound as
    /// `min(ports, 50)`. Call [`ScanConfig::with_max_concurrent_hosts`]
    /// afterwards to override it.
    pub fn with_max_concurrent_ports(mut self, max: usize) -> Self {
        self.max_concurrent_ports = max;
        self.max_concurrent_hosts = max.min(HOST_CONCURRENCY_CAP);
        self
    }

    pub fn with_max_concurrent_hosts(mut self, max: usize) -> Self {
        self.max_concurrent_hosts = max;
        self
    }

    pub fn with_banner(mut self, banner: BannerPolicy) -> Self {
        self.banner = banner;
        self
    }

    /// Builds a timeout from fractional seconds, the unit the CLI accepts.
    pub fn timeout_from_secs_f64(secs: f64) -> Result<Duration, ScanError> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(ScanError::InvalidConfig(format!(
                "timeout must be a positive number of seconds, got {secs}"
            )));
        }
        Duration::try_from_secs_f64(secs)
            .map_err(|e| ScanError::InvalidConfig(format!("timeout {secs}: {e}")))
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.timeout.is_zero() {
            return Err(ScanError::InvalidConfig("timeout must be greater than zero".into()));
        }
        if self.max_concurrent_ports == 0 {
            return Err(ScanError::InvalidConfig(
                "max concurrent ports must be at least 1".into(),
            ));
        }
        if self.max_concurrent_hosts == 0 {
            return Err(ScanError::InvalidConfig(
                "max concurrent hosts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Which open ports get a banner read, and how much of it is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerPolicy {
    pub ports: BTreeSet<u16>,
    pub max_chars: usize,
}

impl Default for BannerPolicy {
    fn default() -> Self {
        Self {
            ports: BTreeSet::from(DEFAULT_BANNER_PORTS),
            max_chars: DEFAULT_BANNER_MAX_CHARS,
        }
    }
}

impl BannerPolicy {
    /// Never read banners.
    pub fn disabled() -> Self {
        Self {
            ports: BTreeSet::new(),
            max_chars: DEFAULT_BANNER_MAX_CHARS,
        }
    }

    pub fn applies_to(&self, port: u16) -> bool {
        self.ports.contains(&port)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_cli_defaults() {
        let cfg = ScanConfig::default();
        assert_eq!(cfg.timeout, Duration::from_secs(2));
        assert_eq!(cfg.max_concurrent_ports, 100);
        assert_eq!(cfg.max_concurrent_hosts, 50);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn host_bound_follows_port_bound_until_cap() {
        let cfg = ScanConfig::default().with_max_concurrent_ports(8);
        assert_eq!(cfg.max_concurrent_hosts, 8);

        let cfg = ScanConfig::default().with_max_concurrent_ports(500);
        assert_eq!(cfg.max_concurrent_hosts, 50);

        let cfg = ScanConfig::default()
            .with_max_concurrent_ports(500)
            .with_max_concurrent_hosts(3);
        assert_eq!(cfg.max_concurrent_hosts, 3);
    }

    #[test]
    fn validate_rejects_zero_values() {
        let zero_timeout = ScanConfig::default().with_timeout(Duration::ZERO);
        assert!(matches!(zero_timeout.validate(), Err(ScanError::InvalidConfig(_))));

        let zero_ports = ScanConfig::default().with_max_concurrent_ports(0);
        assert!(zero_ports.validate().is_err());

        let zero_hosts = ScanConfig::default().with_max_concurrent_hosts(0);
        assert!(zero_hosts.validate().is_err());
    }

    #[test]
    fn timeout_from_secs_f64_rejects_non_positive() {
        assert_eq!(
            ScanConfig::timeout_from_secs_f64(1.5),
            Ok(Duration::from_millis(1500))
        );
        assert!(ScanConfig::timeout_from_secs_f64(0.0).is_err());
        assert!(ScanConfig::timeout_from_secs_f64(-2.0).is_err());
        assert!(ScanConfig::timeout_from_secs_f64(f64::NAN).is_err());
    }

    #[test]
    fn banner_policy_defaults() {
        let policy = BannerPolicy::default();
        assert!(policy.applies_to(22));
        assert!(policy.applies_to(443));
        assert!(!policy.applies_to(3306));
        assert_eq!(policy.max_chars, 100);
        assert!(!BannerPolicy::disabled().applies_to(22));
    }
}
