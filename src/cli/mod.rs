pub mod monitor;
pub mod prompt;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::docker::client::DockerClient;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "planbox")]
#[command(author = "Planbox Team")]
#[command(version)]
#[command(about = "Plan-based Docker container launcher with live resource monitoring", long_about = None)]
pub struct Cli {}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        println!("{}", "Planbox - Docker Resource Manager".blue().bold());
        println!();

        let plan = prompt::select_plan()?;
        println!();
        println!(
            "{}",
            format!("You have selected the {} plan.", plan).yellow()
        );

        let limits = prompt::select_limits(plan)?;
        println!(
            "{}",
            "Creating container with appropriate resource limits...".cyan()
        );
        println!();

        let client = DockerClient::new().await?;
        let mut session = Session::new(plan, limits);
        session.create(&client).await;

        if let Some(name) = session.container_name() {
            println!();
            println!(
                "{}",
                format!("Container named \"{}\" is being created.", name).green()
            );
            println!(
                "{}",
                "You can monitor the stats of your container once it is up.".green()
            );
            println!(
                "{}",
                "Type \"stop\" at any time to stop and remove the container.".magenta()
            );
            println!();
        }

        monitor::run(&mut session, &client).await
    }
}
