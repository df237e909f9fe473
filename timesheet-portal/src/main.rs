use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use timesheet_portal::adapters::outbound::TerminalPrompt;
use timesheet_portal::console::{self, Command};
use timesheet_portal::{bootstrap, config, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let settings = config::read_config().context("Failed to read configuration")?;
    info!(?settings, "Configuration loaded");

    let prompt = Arc::new(TerminalPrompt::stdin());
    let mut portal = bootstrap::connect(&settings, prompt.clone()).await?;

    println!("{}", portal.render());
    println!("{}", console::HELP);

    while let Some(line) = prompt.next_line().await? {
        match console::parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => println!("{}", console::HELP),
            Ok(Some(Command::Show)) => println!("{}", portal.render()),
            Ok(Some(Command::Gesture(gesture))) => {
                let outcome = portal.handle(gesture).await;
                debug!(?outcome, "Gesture handled");
                println!("{}", portal.render());
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}
