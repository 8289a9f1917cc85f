//! Command handlers. Each module owns one top-level subcommand.

pub mod config_cmd;
pub mod devices;
pub mod profiles;
pub mod system;
pub mod util;

use enoman_core::RegistryClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a command that needs the add-on to its handler.
pub async fn dispatch(
    cmd: Command,
    client: &RegistryClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(client, args, global).await,
        Command::Profiles(args) => profiles::handle(client, args, global).await,
        Command::Paths => system::paths(client, global).await,
        Command::Export => system::export(client, global).await,
        Command::Import => system::import(client, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
