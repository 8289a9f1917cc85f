//! Device command handlers.

use std::sync::Arc;

use dialoguer::{Input, Select};
use serde::Serialize;
use strum::VariantNames;
use tabled::Tabled;

use enoman_core::{
    Device, DeviceKey, EditorState, FormFields, HaType, RegistryClient, suggest_channels,
};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts, SaveArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Type")]
    ha_type: String,
    #[tabled(rename = "EEP")]
    eep: String,
    #[tabled(rename = "Channels")]
    channels: usize,
    #[tabled(rename = "Emitters")]
    emitters: usize,
}

/// A device with the key the add-on files it under.
#[derive(Serialize)]
struct DeviceEntry {
    key: DeviceKey,
    #[serde(flatten)]
    device: Arc<Device>,
}

impl From<&DeviceEntry> for DeviceRow {
    fn from(entry: &DeviceEntry) -> Self {
        let d = &entry.device;
        Self {
            key: entry.key.to_string(),
            label: d.label.clone(),
            ha_type: d.ha_type.to_string(),
            eep: d.eep.clone().unwrap_or_default(),
            channels: d.channels.len(),
            emitters: d.channels.iter().filter(|c| c.emitter.is_some()).count(),
        }
    }
}

fn detail(d: &Device) -> String {
    let mut lines = vec![
        format!("Key:      {}", d.key()),
        format!("ID:       {}", if d.id_hex.is_empty() { "-" } else { &d.id_hex }),
        format!("Label:    {}", d.label),
        format!("Type:     {}", d.ha_type),
        format!("EEP:      {}", d.eep.as_deref().unwrap_or("-")),
    ];

    if d.channels.is_empty() {
        lines.push("Channels: -".into());
    } else {
        lines.push("Channels:".into());
        for ch in &d.channels {
            let mut line = format!("  {:>3}  {}", ch.channel, ch.label);
            if let Some(ref em) = ch.emitter {
                line.push_str(&format!("  -> {} ({})", em.id, em.kind));
                if let Some(ref label) = em.label {
                    line.push_str(&format!(" \"{label}\""));
                }
            }
            lines.push(line);
        }
    }

    if let Some(ref so) = d.sensor_options {
        lines.push(format!("Class:    {}", so.device_class));
        if let Some(ref unit) = so.unit_of_measurement {
            lines.push(format!("Unit:     {unit}"));
        }
        if let (Some(min), Some(max)) = (so.min_temp, so.max_temp) {
            lines.push(format!("Temp:     {min} .. {max}"));
        }
        if let (Some(from), Some(to)) = (so.range_from, so.range_to) {
            lines.push(format!("Range:    {from} .. {to}"));
        }
    }
    if let Some(ref ls) = d.light_sender {
        lines.push(format!("Sender:   {}", ls.sender_id));
    }
    lines.join("\n")
}

fn fields_detail(fields: &FormFields) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{k} = {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &RegistryClient,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let registry = client.list().await?;
            let entries: Vec<DeviceEntry> = registry
                .iter()
                .map(|(key, device)| DeviceEntry {
                    key: key.clone(),
                    device: Arc::clone(device),
                })
                .collect();
            let out = output::render_list(
                global.output,
                &entries,
                output::EMPTY_DEVICES,
                |e| DeviceRow::from(e),
                |e| e.key.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { key } => {
            let device = client.get(&DeviceKey::new(key)).await?;
            let out = output::render_single(global.output, &device, detail, |d| d.key().to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Fields { key } => {
            let device = client.get(&DeviceKey::new(key)).await?;
            let editor = EditorState::load(&device);
            let out =
                output::render_single(global.output, editor.fields(), fields_detail, fields_detail);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Save(save) => {
            let device = build_device(client, &save).await?;
            let registry = client.upsert(&device).await?;

            let key = device.key();
            let saved = registry
                .get(&key)
                .map_or_else(|| device.clone(), |d| d.as_ref().clone());
            let out = output::render_single(global.output, &saved, detail, |d| d.key().to_string());
            output::print_output(&out, global.quiet);
            output::success(global, &format!("Saved device {key}"));
            Ok(())
        }

        DevicesCommand::Delete { key } => {
            let key = DeviceKey::new(key);
            if !util::confirm(&format!("Delete device {key}?"), "devices delete", global.yes)? {
                if !global.quiet {
                    eprintln!("Aborted, nothing deleted");
                }
                return Ok(());
            }
            client.delete(&key).await?;
            output::success(global, &format!("Deleted device {key}"));
            Ok(())
        }
    }
}

// ── Save ────────────────────────────────────────────────────────────

/// Assemble the device to save: start state, channel suggestions, then the
/// user's fields on top.
async fn build_device(client: &RegistryClient, args: &SaveArgs) -> Result<Device, CliError> {
    let mut editor = match args.edit {
        Some(ref key) => EditorState::load(&client.get(&DeviceKey::new(key)).await?),
        None => EditorState::new(),
    };

    let mut user = FormFields::new();
    if let Some(ref path) = args.from_file {
        user.overlay(&util::json_to_fields(&util::read_json_file(path)?)?);
    }
    for raw in &args.fields {
        let (key, value) = FormFields::parse_assignment(raw)?;
        user.set(key, value);
    }
    if args.interactive {
        prompt_fields(&editor, &mut user)?;
    }

    if args.suggest_channels {
        let eep = current(&editor, &user, "eep");
        if eep.trim().is_empty() {
            return Err(CliError::Validation {
                field: "eep".into(),
                reason: "--suggest-channels needs an EEP profile (set --field eep=...)".into(),
            });
        }
        let catalog = client.profiles().await;
        let suggestion = suggest_channels(&catalog, eep.trim());
        if suggestion.is_empty() {
            tracing::warn!(eep = %eep.trim(), "no channel suggestions, keeping existing rows");
        } else {
            editor.apply_suggestion(&suggestion);
        }
    }

    editor.overlay(&user);
    let device = editor.submit()?;

    if let Some(target) = editor.target() {
        if *target != device.key() {
            tracing::warn!(
                from = %target,
                to = %device.key(),
                "device key changed; the previous entry is kept"
            );
        }
    }
    Ok(device)
}

/// The value a field will have once `user` is applied.
fn current(editor: &EditorState, user: &FormFields, key: &str) -> String {
    user.get(key)
        .or_else(|| editor.fields().get(key))
        .unwrap_or_default()
        .to_owned()
}

fn prompt_fields(editor: &EditorState, user: &mut FormFields) -> Result<(), CliError> {
    for (key, prompt) in [("id_hex", "Device ID (hex)"), ("label", "Label")] {
        let value: String = Input::new()
            .with_prompt(prompt)
            .with_initial_text(current(editor, user, key))
            .allow_empty(true)
            .interact_text()
            .map_err(util::prompt_err)?;
        user.set(key, value);
    }

    let selected = current(editor, user, "ha_type")
        .parse::<HaType>()
        .unwrap_or_default();
    let default_index = HaType::VARIANTS
        .iter()
        .position(|v| *v == <&str>::from(selected))
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Home Assistant type")
        .items(HaType::VARIANTS)
        .default(default_index)
        .interact()
        .map_err(util::prompt_err)?;
    if let Some(ha_type) = HaType::VARIANTS.get(choice) {
        user.set("ha_type", *ha_type);
    }

    let eep: String = Input::new()
        .with_prompt("EEP profile (empty for none)")
        .with_initial_text(current(editor, user, "eep"))
        .allow_empty(true)
        .interact_text()
        .map_err(util::prompt_err)?;
    user.set("eep", eep);
    Ok(())
}
