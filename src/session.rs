use colored::Colorize;
use uuid::Uuid;

use crate::config::plan::{Plan, ResourceLimits};
use crate::docker::client::DockerClient;
use crate::docker::config::ContainerConfig;

const BASE_IMAGE: &str = "alpine";

/// Synthetic CPU load so the container has something to report.
const WORKLOAD: &str = "apk add --no-cache stress-ng && stress-ng --cpu 1 --timeout 0";

/// In-memory state for the one container this process manages. Owned by the
/// session orchestrator for the whole process lifetime.
pub struct Session {
    container_name: Option<String>,
    plan: Plan,
    limits: ResourceLimits,
}

impl Session {
    pub fn new(plan: Plan, limits: ResourceLimits) -> Self {
        Self {
            container_name: None,
            plan,
            limits,
        }
    }

    pub fn plan(&self) -> Plan {
        self.plan
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn container_name(&self) -> Option<&str> {
        self.container_name.as_deref()
    }

    fn record_container(&mut self, name: String) {
        self.container_name = Some(name);
    }

    /// Pull the base image and start the detached workload container with
    /// the session's resource limits. Failures are reported and left for
    /// the caller to observe through the stats poller; no retry.
    pub async fn create(&mut self, client: &DockerClient) {
        let name = generate_container_name(self.plan);
        self.record_container(name.clone());

        if let Err(e) = client.pull_image(BASE_IMAGE).await {
            tracing::warn!("Failed to pull image '{}': {:#}", BASE_IMAGE, e);
        }

        let config = ContainerConfig {
            image: BASE_IMAGE.to_string(),
            command: Some(vec![
                "/bin/sh".to_string(),
                "-c".to_string(),
                WORKLOAD.to_string(),
            ]),
            name: name.clone(),
            limits: self.limits.clone(),
        };

        match client.run_container_detached(&config).await {
            Ok(_) => {
                println!(
                    "{} Container created with plan: {}",
                    "✓".green().bold(),
                    self.plan.to_string().cyan()
                );
                println!("{} Container Name: {}", "✓".green().bold(), name.cyan());
                println!(
                    "{} Resource Limits: {}",
                    "✓".green().bold(),
                    self.limits.flag_string().cyan()
                );
            }
            Err(e) => {
                eprintln!(
                    "{} Error creating container: {:#}",
                    "✗".red().bold(),
                    e
                );
            }
        }
    }

    /// Stop and remove the recorded container, best-effort. With no
    /// container recorded this makes no runtime call, so repeated calls
    /// are harmless.
    pub async fn teardown(&mut self, client: &DockerClient) {
        let Some(name) = self.container_name.take() else {
            return;
        };

        if let Err(e) = client.stop_container(&name).await {
            eprintln!(
                "{} Error stopping container '{}': {:#}",
                "✗".red().bold(),
                name,
                e
            );
        }
        if let Err(e) = client.remove_container(&name, false).await {
            eprintln!(
                "{} Error removing container '{}': {:#}",
                "✗".red().bold(),
                name,
                e
            );
        }

        println!(
            "{} Stopped and removed container: {}",
            "=>".blue().bold(),
            name.cyan()
        );
    }
}

/// Unique per run: the plan for readability, a v4 uuid for uniqueness.
fn generate_container_name(plan: Plan) -> String {
    format!("planbox-{}-{}", plan, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_unique() {
        let a = generate_container_name(Plan::Free);
        let b = generate_container_name(Plan::Free);
        assert_ne!(a, b);
        assert!(a.starts_with("planbox-free-"));
    }

    #[test]
    fn fresh_session_records_no_container() {
        let session = Session::new(Plan::Free, ResourceLimits::free());
        assert!(session.container_name().is_none());
    }

    #[test]
    fn recorded_container_is_taken_once() {
        let mut session = Session::new(Plan::Paid, ResourceLimits::paid_default());
        session.record_container("planbox-paid-test".to_string());
        assert_eq!(session.container_name(), Some("planbox-paid-test"));

        // teardown consumes the name; model that directly here
        assert!(session.container_name.take().is_some());
        assert!(session.container_name.take().is_none());
    }
}
