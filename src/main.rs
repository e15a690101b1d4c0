use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use scan_dashboard::api::HttpScanApi;
use scan_dashboard::config::Config;
use scan_dashboard::session::{FormState, SessionController, SessionEvent};
use scan_dashboard::terminal::{is_help, parse_command, TerminalTarget, HELP};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Logs go to stderr so the table on stdout stays readable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    info!("Scan dashboard starting against {}", cfg.api_url);

    let api = Arc::new(HttpScanApi::new(&cfg));
    let (mut controller, mut rx) = SessionController::new(
        api,
        TerminalTarget::stdout(),
        FormState::from_config(&cfg),
    );

    // An init failure is shown on the status line; the session stays usable.
    if let Err(e) = controller.init().await {
        warn!("{}", e);
    }
    if cfg.auto_start {
        controller.start_auto();
    }

    let events = controller.events();
    let input = events.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("{}", HELP);
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if is_help(&line) => println!("{}", HELP),
                Ok(Some(line)) => match parse_command(&line) {
                    Ok(Some(event)) => {
                        if input.send(event).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => println!("{}", e),
                },
                // stdin closed: keep running (auto refresh may be on) until ctrl-c
                Ok(None) | Err(_) => break,
            }
        }
    });

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = events.send(SessionEvent::Quit);
        }
    });

    controller.run(&mut rx).await;
    Ok(())
}
