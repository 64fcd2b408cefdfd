//! `serve` subcommand: JSON request loop over stdin and stdout.

use std::io;

use super::{Config, Result, open_controller, service};

pub(super) fn cmd_serve(config: &Config) -> Result<()> {
    let controller = open_controller(config)?;
    log::info!(
        "serving {} roles on stdin",
        controller.supported_roles().len()
    );

    let answered = service::serve(&controller, io::stdin().lock(), io::stdout().lock())?;
    log::info!("input closed after {answered} requests");
    Ok(())
}
