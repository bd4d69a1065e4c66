use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::config::plan::{Plan, ResourceLimits};

/// Ask the user which plan to run under.
pub fn select_plan() -> Result<Plan> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a plan")
        .items(&["1. Free", "2. Paid"])
        .default(0)
        .interact()?;

    Ok(match choice {
        0 => Plan::Free,
        _ => Plan::Paid,
    })
}

/// Resolve the resource limits for a plan. The free plan is fixed; the
/// paid plan offers a default profile or custom input.
pub fn select_limits(plan: Plan) -> Result<ResourceLimits> {
    match plan {
        Plan::Free => Ok(ResourceLimits::free()),
        Plan::Paid => prompt_paid_limits(),
    }
}

fn prompt_paid_limits() -> Result<ResourceLimits> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select resource limits")
        .items(&["1. Default (1 CPU, 512 MB)", "2. Custom Input"])
        .default(0)
        .interact()?;

    if choice == 0 {
        return Ok(ResourceLimits::paid_default());
    }

    loop {
        let cpu: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter CPU limit (e.g., 1.5)")
            .interact_text()?;
        let memory: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter Memory limit (e.g., 512m)")
            .interact_text()?;

        match ResourceLimits::custom(&cpu, &memory) {
            Ok(limits) => return Ok(limits),
            Err(e) => eprintln!("{} {:#}", "✗".red().bold(), e),
        }
    }
}
