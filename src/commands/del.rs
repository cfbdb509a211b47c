//! `spool del`: build a removal script for a unit.

use anyhow::Result;
use tracing::info;

use crate::clipboard::copy_to_clipboard;
use crate::config::Config;
use crate::models::{normalize_unit_name, Scope};
use crate::script::{delete_script, GeneratedScript};

/// Entry point for `spool del`.
pub fn execute(unit: String, system_wide: Option<bool>, no_copy: bool) -> Result<()> {
    let config = Config::load()?;
    let script = generate(&unit, system_wide, &config)?;
    let text = script.to_string();

    println!("{text}");

    if config.copy_to_clipboard && !no_copy {
        copy_to_clipboard(&text);
    }

    Ok(())
}

pub fn generate(unit: &str, system_wide: Option<bool>, config: &Config) -> Result<GeneratedScript> {
    let name = normalize_unit_name(unit)?;
    let scope = Scope::from_system_wide(system_wide.unwrap_or(config.system_wide));

    let script = delete_script(&name, scope, &config.sudo);

    info!(unit = %name, scope = %scope, "generated removal script");
    Ok(script)
}
