use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use condprob::cli::{CalcArgs, Cli, Commands, SessionArgs};
use condprob::graph::EnvironmentReady;
use condprob::io;
use condprob::session::Session;
use condprob::sink::format_fixed;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Calc(args) => run_calc(args),
        Commands::Session(args) => run_session(args),
    }
}

fn run_calc(args: CalcArgs) -> Result<()> {
    let config = args.inputs.to_config();
    if config.mirrors == 0 {
        anyhow::bail!("--mirrors must be at least 1");
    }
    let session = Session::start(config, EnvironmentReady::signal());

    print!("{}", io::summary::format_summary(&session));
    if let Some(path) = args.json {
        io::json_writer::write_json(&path, &session)?;
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(())
}

fn run_session(args: SessionArgs) -> Result<()> {
    let config = args.inputs.to_config();
    if config.mirrors == 0 {
        anyhow::bail!("--mirrors must be at least 1");
    }
    let script = io::script::read_script(&args.script)?;
    let mut session = Session::start(config, EnvironmentReady::signal());

    for line in script {
        let step = session
            .apply(line.edit)
            .with_context(|| format!("script line {}", line.line))?;
        println!(
            "[{}] {} ({})",
            line.line,
            step.edit.describe(),
            step.status.as_str()
        );
        if args.trace_glitches && !step.broadcasts.is_empty() {
            let seen: Vec<String> = step.broadcasts.iter().map(|v| format_fixed(*v)).collect();
            println!("    broadcasts: {}", seen.join(" -> "));
        }
        println!(
            "    condition probability {}  ppv {}  npv {}",
            session.graph.displays.condition_probability.text(),
            session.graph.displays.ppv.text(),
            session.graph.displays.npv.text()
        );
    }

    print!("{}", io::summary::format_summary(&session));
    if !session.warnings.is_empty() {
        println!("warnings:");
        for warning in &session.warnings {
            println!("- {}", warning);
        }
    }
    if let Some(path) = args.json {
        io::json_writer::write_json(&path, &session)?;
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(())
}
