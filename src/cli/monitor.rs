use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, MissedTickBehavior};

use crate::docker::client::DockerClient;
use crate::session::Session;
use crate::utils::display;

const POLL_INTERVAL: Duration = Duration::from_secs(10);
const STOP_KEYWORD: &str = "stop";

/// Recognize the typed teardown command.
pub fn is_stop_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(STOP_KEYWORD)
}

/// Poll container stats on a fixed interval while listening for the stop
/// keyword on stdin. All exit paths (stop keyword, stdin closing, Ctrl-C)
/// run teardown before returning.
pub async fn run(session: &mut Session, client: &DockerClient) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Loading container stats...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    // Spinner stays up until the first successful render
    let mut waiting_first_render = true;

    let mut interval = time::interval(POLL_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let Some(name) = session.container_name().map(str::to_string) else {
                    continue;
                };
                match client.container_stats(&name).await {
                    Ok(snapshot) => {
                        if waiting_first_render {
                            spinner.finish_and_clear();
                            waiting_first_render = false;
                        }
                        display::render(session, &snapshot);
                    }
                    // Container may not be running yet; skip this tick
                    Err(e) => tracing::warn!("Error fetching container stats: {:#}", e),
                }
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(input)) if is_stop_command(&input) => break,
                    Ok(Some(_)) => {}
                    Ok(None) => {
                        println!("{}", "Exiting program.".green());
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("{}", "Exiting program.".green());
                break;
            }
        }
    }

    if waiting_first_render {
        spinner.finish_and_clear();
    }

    session.teardown(client).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_command_is_case_insensitive() {
        assert!(is_stop_command("stop"));
        assert!(is_stop_command("Stop"));
        assert!(is_stop_command("STOP"));
        assert!(is_stop_command("  stop\n"));
    }

    #[test]
    fn other_input_is_ignored() {
        assert!(!is_stop_command(""));
        assert!(!is_stop_command("stopp"));
        assert!(!is_stop_command("halt"));
    }
}
