use clap::Parser;
use dom_testgen::cli::commands::{
    cmd_capture, cmd_generate, cmd_match, cmd_patch, cmd_prompt, cmd_serve, cmd_watch, open_store,
};
use dom_testgen::cli::config::{Cli, Commands, load_config};
use dom_testgen::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let mut store = open_store(cli.store.as_deref(), &config);

    match cli.command {
        Commands::Capture { page, output } => {
            cmd_capture(&page, &output, &config, &mut store)?;
        }
        Commands::Watch {
            page,
            poll_ms,
            max_scans,
        } => {
            cmd_watch(&page, poll_ms, max_scans, &config, &mut store)?;
        }
        Commands::Match { text } => {
            if cmd_match(&text, &store)?.is_none() {
                std::process::exit(1);
            }
        }
        Commands::Patch { code } => {
            cmd_patch(&code, &store)?;
        }
        Commands::Prompt { kind, vars, list } => {
            cmd_prompt(kind.as_deref(), &vars, list)?;
        }
        Commands::Generate {
            scenario,
            output_type,
            provider,
            model,
        } => {
            let outcome = cmd_generate(
                &scenario,
                &output_type,
                provider,
                model.as_deref(),
                &config,
                &store,
            )?;
            if outcome.failed {
                std::process::exit(1);
            }
        }
        Commands::Serve { page } => {
            cmd_serve(&page, &config, store)?;
        }
    }

    Ok(())
}
