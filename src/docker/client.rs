use anyhow::{Context, Result};
use bollard::container::{Config, CreateContainerOptions, StartContainerOptions, StatsOptions};
use bollard::image::CreateImageOptions;
use bollard::Docker;
use futures::StreamExt;

use super::config::ContainerConfig;
use super::stats::StatsSnapshot;

/// Docker client wrapper for planbox operations
pub struct DockerClient {
    docker: Docker,
}

impl DockerClient {
    /// Create a new Docker client
    pub async fn new() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults()
            .context("Failed to connect to Docker daemon. Is Docker running?")?;

        // Verify connection
        docker
            .ping()
            .await
            .context("Failed to ping Docker daemon")?;

        Ok(Self { docker })
    }

    /// Pull a Docker image from a registry
    pub async fn pull_image(&self, image: &str) -> Result<()> {
        let options = Some(CreateImageOptions {
            from_image: image,
            ..Default::default()
        });

        let mut stream = self.docker.create_image(options, None, None);

        while let Some(result) = stream.next().await {
            match result {
                Ok(info) => {
                    if let Some(status) = info.status {
                        tracing::debug!("Pull status: {}", status);
                    }
                }
                Err(e) => {
                    return Err(anyhow::anyhow!("Pull failed: {}", e));
                }
            }
        }

        Ok(())
    }

    /// Run a container in detached mode, returning its id
    pub async fn run_container_detached(&self, config: &ContainerConfig) -> Result<String> {
        let container_id = self.create_container(config).await?;

        self.docker
            .start_container(&container_id, None::<StartContainerOptions<String>>)
            .await?;

        Ok(container_id)
    }

    /// Create a container (helper method)
    async fn create_container(&self, config: &ContainerConfig) -> Result<String> {
        let host_config = bollard::models::HostConfig {
            nano_cpus: Some(config.limits.nano_cpus()),
            memory: Some(config.limits.memory_bytes()),
            ..Default::default()
        };

        let container_config = Config {
            image: Some(config.image.clone()),
            cmd: config.command.clone(),
            host_config: Some(host_config),
            ..Default::default()
        };

        let options = CreateContainerOptions {
            name: config.name.clone(),
            platform: None,
        };

        let response = self
            .docker
            .create_container(Some(options), container_config)
            .await?;

        Ok(response.id)
    }

    /// Fetch a single usage snapshot for a container
    pub async fn container_stats(&self, container_name: &str) -> Result<StatsSnapshot> {
        let options = StatsOptions {
            stream: false,
            one_shot: false,
        };

        let mut stream = self.docker.stats(container_name, Some(options));

        match stream.next().await {
            Some(Ok(stats)) => Ok(StatsSnapshot::from_stats(&stats)),
            Some(Err(e)) => Err(anyhow::anyhow!("Stats fetch failed: {}", e)),
            None => Err(anyhow::anyhow!(
                "No stats reported for container '{}'",
                container_name
            )),
        }
    }

    /// Stop a running container
    pub async fn stop_container(&self, container_id: &str) -> Result<()> {
        self.docker
            .stop_container(container_id, None)
            .await?;
        Ok(())
    }

    /// Remove a container
    pub async fn remove_container(&self, container_id: &str, force: bool) -> Result<()> {
        let options = bollard::container::RemoveContainerOptions {
            force,
            ..Default::default()
        };
        self.docker.remove_container(container_id, Some(options)).await?;
        Ok(())
    }
}
