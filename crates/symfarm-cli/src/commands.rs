use anyhow::Context;
use colored::Colorize;
use symfarm_sdk::{ActionKind, FarmPlan, FarmReport};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Create(args) => cmd_create(args, &cli.format),
        Command::Plan(args) => cmd_plan(args, &cli.format),
    }
}

fn cmd_create(args: CreateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let settings = args.farm.settings()?;
    tracing::debug!(?settings, "resolved farm settings");
    let config = settings.into_config();

    if args.dry_run {
        symfarm_sdk::check_target(&args.target)
            .with_context(|| format!("cannot create farm at {}", args.target.display()))?;
        let plan = symfarm_sdk::plan(&config, &args.sources).context("failed to plan farm")?;
        return print_plan(&plan, format);
    }

    let report = symfarm_sdk::create(&config, &args.target, &args.sources)
        .with_context(|| format!("failed to create farm at {}", args.target.display()))?;
    print_report(&report, &args.target.display().to_string(), format)
}

fn cmd_plan(args: PlanArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = args.farm.settings()?.into_config();
    let plan = symfarm_sdk::plan(&config, &args.sources).context("failed to plan farm")?;
    print_plan(&plan, format)
}

fn print_plan(plan: &FarmPlan, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(plan)?),
        OutputFormat::Text => {
            for action in plan {
                match (action.kind, &action.link_target) {
                    (ActionKind::MakeLink, Some(origin)) => println!(
                        "{} {} {} {}",
                        "link ".cyan(),
                        action.path,
                        "->".dimmed(),
                        origin.display()
                    ),
                    _ => println!("{} {}", "mkdir".green(), action.path.to_string().bold()),
                }
            }
            println!(
                "{} directories, {} links",
                plan.directory_count().to_string().bold(),
                plan.link_count().to_string().bold()
            );
        }
    }
    Ok(())
}

fn print_report(report: &FarmReport, target: &str, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            println!("{} Created farm in {}", "✓".green().bold(), target.bold());
            println!("  Directories: {}", report.directories);
            println!("  Links: {}", report.links);
        }
    }
    Ok(())
}
