//! termdialog - Run a dialog described in a JSON or YAML file
//!
//! The result and the dialog's values are printed as JSON once the
//! terminal has been restored.

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use termdialog::{Config, CrosstermScreen, DialogDescriptor};

#[derive(Parser)]
#[command(name = "termdialog", about = "Run a terminal dialog from a description file")]
struct Args {
    /// Dialog description (.json, .yaml or .yml)
    #[arg(required_unless_present = "init_config")]
    file: Option<PathBuf>,

    /// Keep the dialog open until every field is valid or it is cancelled
    #[arg(long)]
    validate: bool,

    /// Key values by control name instead of display text
    #[arg(long)]
    names: bool,

    /// Write a debug log to termdialog.log
    #[arg(long)]
    log: bool,

    /// Write the default config to ~/.termdialog/config.json and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.log {
        let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
        if let Ok(log_file) = File::create("termdialog.log") {
            let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
        }
    }

    if args.init_config {
        Config::default().save()?;
        log::info!("wrote default config");
        return Ok(());
    }
    let Some(file) = args.file else {
        anyhow::bail!("no dialog file given");
    };

    let config = Config::load().unwrap_or_default();
    let mut dialog = DialogDescriptor::from_path(&file)?.build(config)?;
    log::info!("termdialog starting with {}", file.display());

    // Setup terminal
    let mut screen = CrosstermScreen::new()?;
    screen.enter()?;

    let result = if args.validate {
        dialog.invoke_validating(&mut screen, false)
    } else {
        dialog.invoke(&mut screen, false)
    };

    // Cleanup terminal
    screen.exit()?;
    let result = result?;

    let mut output = json!({
        "result": result.to_json(),
        "values": dialog.get_value(args.names),
        "valid": dialog.is_valid_form(),
    });
    if let Some(selection) = dialog.selection() {
        output["selection"] = json!(selection.items());
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
