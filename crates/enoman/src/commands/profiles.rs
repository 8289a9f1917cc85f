//! EEP profile command handlers.

use tabled::Tabled;

use enoman_core::{ChannelSuggestion, Profile, RegistryClient, SuggestedChannel, suggest_channels};

use crate::cli::{GlobalOpts, ProfilesArgs, ProfilesCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "EEP")]
    eep: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Channels")]
    channels: String,
}

impl From<&Profile> for ProfileRow {
    fn from(p: &Profile) -> Self {
        Self {
            eep: p.eep.clone(),
            title: p.title.clone(),
            channels: p
                .channel_range()
                .map_or_else(|| "-".into(), |(min, max)| format!("{min}..={max}")),
        }
    }
}

#[derive(Tabled)]
struct ChannelRow {
    #[tabled(rename = "Channel")]
    channel: u32,
    #[tabled(rename = "Label")]
    label: String,
}

impl From<&SuggestedChannel> for ChannelRow {
    fn from(c: &SuggestedChannel) -> Self {
        Self {
            channel: c.channel,
            label: c.label.clone(),
        }
    }
}

pub async fn handle(
    client: &RegistryClient,
    args: ProfilesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProfilesCommand::List => {
            let catalog = client.profiles().await;
            let profiles: Vec<Profile> = catalog.iter().cloned().collect();
            let out = output::render_list(
                global.output,
                &profiles,
                "(no profiles)",
                |p| ProfileRow::from(p),
                |p| p.eep.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProfilesCommand::Suggest { eep, remote } => {
            let suggestion = if remote {
                client.suggest_channels_remote(&eep).await?
            } else {
                suggest_channels(&client.profiles().await, &eep)
            };
            render_suggestion(&suggestion, global);
            Ok(())
        }
    }
}

fn render_suggestion(suggestion: &ChannelSuggestion, global: &GlobalOpts) {
    let empty = format!("(no channel suggestions for {})", suggestion.profile);
    let out = output::render_list(
        global.output,
        &suggestion.channels,
        &empty,
        |c| ChannelRow::from(c),
        |c| c.channel.to_string(),
    );
    output::print_output(&out, global.quiet);
}
