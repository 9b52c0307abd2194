//! `fo` -- form builder CLI.
//!
//! This is the entry point. It parses CLI arguments with clap, resolves
//! the runtime context, and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Build runtime context from global args
    let ctx = RuntimeContext::from_global_args(&cli.global);

    // Set up logging based on verbosity
    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("fo=debug,forma_storage=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    // Dispatch to command handler
    let result = match cli.command {
        Some(Commands::Init) => commands::init::run(&ctx),
        Some(Commands::Field(args)) => commands::field::run(&ctx, &args.command),
        Some(Commands::Form(args)) => commands::form::run(&ctx, &args.command),
        Some(Commands::Preview(args)) => commands::preview::run(&ctx, &args),
        Some(Commands::Submit(args)) => commands::submit::run(&ctx, &args),
        Some(Commands::Version) => commands::version::run(&ctx),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        // For JSON mode, output error as JSON
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
