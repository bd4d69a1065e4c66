use crate::config::plan::ResourceLimits;

pub struct ContainerConfig {
    pub image: String,
    pub command: Option<Vec<String>>,
    pub name: String,
    pub limits: ResourceLimits,
}
