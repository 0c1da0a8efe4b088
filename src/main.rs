use clap::Parser;
use microsys_autofill::cli::commands::{
    cmd_details, cmd_end_session, cmd_last_entry, cmd_load, cmd_submit, cmd_toggle,
};
use microsys_autofill::cli::config::{Cli, Commands, load_config, log_filter, resolve_settings};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref());
    let settings = resolve_settings(&cli, &config);

    match cli.command {
        Commands::Load { page, output } => {
            cmd_load(&settings, &page, output.as_deref(), cli.verbose)?;
        }
        Commands::Submit { page } => {
            cmd_submit(&settings, &page, cli.verbose)?;
        }
        Commands::Toggle {
            page,
            enabled,
            output,
        } => {
            cmd_toggle(&settings, &page, enabled, output.as_deref(), cli.verbose)?;
        }
        Commands::LastEntry {
            app,
            model,
            before_id,
        } => {
            cmd_last_entry(&settings, &app, &model, before_id.as_deref())?;
        }
        Commands::Details { app, model, pk } => {
            cmd_details(&settings, &app, &model, &pk)?;
        }
        Commands::EndSession => {
            cmd_end_session(&settings)?;
        }
    }

    Ok(())
}
