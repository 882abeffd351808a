mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use commands::Context;
use event_planner::config::{discover_config, load_config_from_path};
use event_planner::prelude::*;
use event_planner::shared::logging;
use std::process;
use std::sync::Arc;

fn main() {
    // clap exits with status 2 on invalid arguments
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = match run(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            print_error(&e);
            ExitCode::for_error(&e)
        }
    };
    process::exit(code.as_i32());
}

fn run(cli: Cli) -> Result<()> {
    let file = match &cli.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&std::env::current_dir()?)?,
    };
    let config = ResolvedConfig::from_env(
        file,
        CliOverrides {
            api_url: cli.api_url.clone(),
            format: cli.format,
            locale: cli.locale,
            session_file: None,
        },
    )?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let ctx = Context::new(&cli, config)?;
        let renderer = Arc::new(ConsoleToastRenderer::new());
        let toast_task = Arc::clone(&renderer).spawn(ctx.toasts.subscribe());
        let prompt_task = ConsolePrompt::new(cli.yes).spawn(Arc::clone(&ctx.confirmations));

        let result = commands::run(&ctx, cli.command).await;
        if let Err(error) = &result {
            ctx.reporter().report(error);
        }

        toast_task.abort();
        prompt_task.abort();
        // Toasts raised after the renderer last woke up
        renderer.print_new(&ctx.toasts.toasts());
        result
    })
}

fn print_error(e: &anyhow::Error) {
    eprintln!("\n❌ An error occurred:\n");
    eprintln!("{}", e);

    let mut source = e.source();
    while let Some(err) = source {
        eprintln!("\nCaused by: {}", err);
        source = err.source();
    }

    eprintln!();
}
