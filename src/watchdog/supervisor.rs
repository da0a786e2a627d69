use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::{error, info};

use crate::error::{Error, Result};

// Splits a command line into the program and its arguments.
pub fn parse_command(command: &str) -> Result<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts
        .next()
        .ok_or_else(|| Error::Config("BOT_COMMAND can't be empty".to_string()))?;
    Ok((program, parts.collect()))
}

// Runs the command once and waits for it to exit. The child inherits the
// watchdog's stdio and is killed if the future is dropped.
pub async fn run_once(command: &str) -> Result<ExitStatus> {
    let (program, args) = parse_command(command)?;
    let mut child = Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    info!(pid = child.id(), command, "Bot process started");
    Ok(child.wait().await?)
}

// Keeps the bot running: restarts it after every exit or failed spawn.
pub async fn supervise(command: String, restart_delay: Duration) {
    loop {
        match run_once(&command).await {
            Ok(status) if status.success() => {
                info!(command = %command, "Bot process exited cleanly, restarting");
            }
            Ok(status) => {
                error!(command = %command, exit_code = ?status.code(), "Bot process crashed, restarting");
            }
            Err(err) => {
                error!(command = %command, error = %err, "Can't start the bot process");
            }
        }

        tokio::time::sleep(restart_delay).await;
    }
}
