//! Output paths and YAML import/export.

use enoman_core::{ExportOutcome, OutputPaths, RegistryClient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn paths_detail(p: &OutputPaths) -> String {
    let mut lines = vec![
        format!("Package:        {}", p.auto_output_path),
        format!("Add-on config:  {}", p.config_output_path),
    ];
    if let Some(ref backup) = p.auto_backup_path {
        lines.push(format!("Package backup: {backup}"));
    }
    if let Some(ref backup) = p.config_backup_path {
        lines.push(format!("Config backup:  {backup}"));
    }
    lines.join("\n")
}

fn paths_plain(p: &OutputPaths) -> String {
    format!("{}\n{}", p.auto_output_path, p.config_output_path)
}

fn export_detail(e: &ExportOutcome) -> String {
    format!(
        "Package:        {}\nAdd-on config:  {}",
        e.auto_output_path, e.config_output_path
    )
}

#[allow(clippy::unnecessary_wraps)]
pub async fn paths(client: &RegistryClient, global: &GlobalOpts) -> Result<(), CliError> {
    let paths = client.paths().await;
    let out = output::render_single(global.output, &paths, paths_detail, paths_plain);
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn export(client: &RegistryClient, global: &GlobalOpts) -> Result<(), CliError> {
    let outcome = client.export_all().await?;
    let out = output::render_single(global.output, &outcome, export_detail, |e| {
        format!("{}\n{}", e.auto_output_path, e.config_output_path)
    });
    output::print_output(&out, global.quiet);
    output::success(global, "Registry exported");
    Ok(())
}

pub async fn import(client: &RegistryClient, global: &GlobalOpts) -> Result<(), CliError> {
    let outcome = client.import_all().await?;
    let out = output::render_single(
        global.output,
        &outcome,
        |o| format!("Imported {} devices", o.imported_count),
        |o| o.imported_count.to_string(),
    );
    output::print_output(&out, global.quiet);
    output::success(global, "Registry imported");
    Ok(())
}
