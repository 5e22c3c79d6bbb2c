//! `floorwatch init`: write a starter config file.
//!
//! Creates `.floorwatch.yaml` in the current directory from one of the
//! built-in templates, with the venue filled in when given.

use crate::config::defaults::{self, VENUE_PLACEHOLDER};
use crate::utils::paths::PROJECT_CONFIG_NAME;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Run the `floorwatch init` command.
pub fn run_init(
    template: Option<&str>,
    venue_id: Option<&str>,
    output_path: Option<&Path>,
    force: bool,
) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let output_file = output_path
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.join(PROJECT_CONFIG_NAME));

    let template_name = template.unwrap_or("standard");
    let written = write_config(template_name, venue_id, &output_file, force)?;
    if !written {
        println!(
            "{} A config file already exists at {}",
            "⚠".yellow(),
            output_file.display()
        );
        println!("  Use --force to overwrite it, or edit it directly.");
        return Ok(());
    }

    println!();
    println!(
        "  {} Created {}",
        "✓".green().bold(),
        output_file.display().to_string().bold()
    );
    println!("  Template: {}", template_name.cyan());
    if venue_id.is_none() {
        println!(
            "  {} Set {} before running floorwatch",
            "!".yellow().bold(),
            "venue_id".bold()
        );
    }
    println!();
    println!("  {} Next steps:", "→".blue());
    println!(
        "    1. Check the config: {}",
        "floorwatch check".dimmed()
    );
    println!(
        "    2. Start watching for requests: {}",
        "floorwatch watch".dimmed()
    );
    println!();

    Ok(())
}

/// Render a template to `output_file`. Returns false if the file exists and `force` is off.
pub fn write_config(
    template_name: &str,
    venue_id: Option<&str>,
    output_file: &Path,
    force: bool,
) -> Result<bool> {
    if output_file.exists() && !force {
        return Ok(false);
    }

    let yaml = defaults::get_template(template_name).ok_or_else(|| {
        let available: Vec<String> = defaults::available_templates()
            .iter()
            .map(|(name, desc)| format!("  {} — {}", name.bold(), desc))
            .collect();
        anyhow::anyhow!(
            "Unknown template '{}'. Available templates:\n{}",
            template_name,
            available.join("\n")
        )
    })?;

    let content = match venue_id {
        Some(venue) => yaml.replace(VENUE_PLACEHOLDER, venue),
        None => yaml.to_string(),
    };

    std::fs::write(output_file, content)
        .with_context(|| format!("Failed to write config file: {}", output_file.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config_str;
    use tempfile::TempDir;

    #[test]
    fn test_written_template_parses() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(PROJECT_CONFIG_NAME);

        assert!(write_config("fast", Some("24477"), &path, false).unwrap());
        let config = parse_config_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(config.venue_id, "24477");
        assert_eq!(config.poll_interval, std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_existing_file_needs_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(PROJECT_CONFIG_NAME);
        std::fs::write(&path, "venue_id: keep-me\n").unwrap();

        assert!(!write_config("standard", Some("v"), &path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "venue_id: keep-me\n");

        assert!(write_config("standard", Some("v"), &path, true).unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("venue_id: \"v\""));
    }

    #[test]
    fn test_unknown_template() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(PROJECT_CONFIG_NAME);
        assert!(write_config("turbo", None, &path, false).is_err());
    }

    #[test]
    fn test_template_without_venue_fails_validation() {
        let config = parse_config_str(defaults::STANDARD_YAML);
        assert!(config.is_err());
    }
}
