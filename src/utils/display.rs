use colored::Colorize;

use crate::docker::stats::StatsSnapshot;
use crate::session::Session;

/// Clear the terminal and redraw the session and live-stats tables.
pub fn render(session: &Session, stats: &StatsSnapshot) {
    clear_screen();

    println!("{}", "Container Stats:".cyan().bold());

    let session_rows = [
        ("User Plan", session.plan().to_string()),
        ("Resource Limits", session.limits().flag_string()),
        (
            "Container Name",
            session.container_name().unwrap_or("-").to_string(),
        ),
    ];
    print_table("SESSION", &session_rows);

    let stats_rows = [
        ("Container ID", stats.id.clone()),
        ("Name", stats.name.clone()),
        ("CPU %", format!("{:.2}%", stats.cpu_percent)),
        ("Memory Usage", stats.memory.clone()),
        ("Network I/O", stats.net_io.clone()),
        ("Block I/O", stats.block_io.clone()),
        ("PIDs", stats.pids.to_string()),
    ];
    print_table("LIVE STATS", &stats_rows);

    println!();
    println!(
        "{}",
        "Type \"stop\" to stop and remove the container.".green()
    );
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}

fn print_table(title: &str, rows: &[(&str, String)]) {
    let metric_w = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(6).max(6);
    let value_w = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(5).max(5);
    let total_width = metric_w + value_w + 3;

    println!();
    println!("{:^total_width$}", title.bold(), total_width = total_width);
    println!(
        "{:<metric_w$} | {:<value_w$}",
        "Metric".bold(),
        "Value".bold(),
        metric_w = metric_w,
        value_w = value_w
    );
    println!("{}-+-{}", "-".repeat(metric_w), "-".repeat(value_w));

    for (metric, value) in rows {
        println!("{:<metric_w$} | {}", metric, value, metric_w = metric_w);
    }
}
