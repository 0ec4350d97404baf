use anyhow::{Context, Result};
use clap::Parser;

use ghostjob_core::lists::{ListChange, ListManager};
use ghostjob_core::report::{model::ToolInfo, render};
use ghostjob_core::rules::catalog::Profile;
use ghostjob_core::rules::classify::Threshold;
use ghostjob_core::scan_file;
use ghostjob_core::settings::Settings;

use crate::args::{Command, ListCommand, OutputFormat, ProfileArg, ScoreArgs};
use crate::store::JsonFileStore;

mod args;
mod store;
mod telemetry;

fn main() -> Result<()> {
    let args = args::Args::parse();
    telemetry::init(&args.log_level)?;

    let store = JsonFileStore::open(&args.settings)?;

    let exit_code = match args.command {
        Command::Score(score) => run_score(score, store)?,
        Command::Lists(command) => {
            run_lists(command, ListManager::load(store))?;
            0
        }
    };

    std::process::exit(exit_code);
}

fn run_score(args: ScoreArgs, store: JsonFileStore) -> Result<i32> {
    let tool = ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: args.commit.clone(),
    };

    let mut ctx = Settings::load(&store).scan_context();
    if let Some(t) = args.threshold.and_then(Threshold::new) {
        ctx = ctx.with_threshold(t);
    }
    if let Some(profile) = args.profile {
        ctx = ctx.with_profile(match profile {
            ProfileArg::Standard => Profile::standard(),
            ProfileArg::Basic => Profile::basic(),
        });
    }

    let report = scan_file(&args.listing_path, args.company.as_deref(), tool, &ctx)?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Text => render::render_text(&report),
    };

    match args.out {
        Some(path) => std::fs::write(&path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{output}"),
    }

    Ok(report.exit_code())
}

fn report_change(change: ListChange, name: &str, list: &str) {
    match change {
        ListChange::Added => println!("added '{name}' to {list} list"),
        ListChange::AlreadyPresent => println!("'{name}' already in {list} list"),
        ListChange::Removed => println!("removed '{name}' from {list} list"),
        ListChange::NotPresent => println!("'{name}' not in {list} list"),
    }
}

fn run_lists(command: ListCommand, mut manager: ListManager<JsonFileStore>) -> Result<()> {
    match command {
        ListCommand::Trust { name } => report_change(manager.add_trusted(&name)?, &name, "trusted"),
        ListCommand::Untrust { name } => {
            report_change(manager.remove_trusted(&name)?, &name, "trusted")
        }
        ListCommand::Block { name } => report_change(manager.add_blocked(&name)?, &name, "blocked"),
        ListCommand::Unblock { name } => {
            report_change(manager.remove_blocked(&name)?, &name, "blocked")
        }
        ListCommand::Show => {
            let lists = manager.lists();
            println!("Trusted ({}):", lists.trusted().len());
            for name in lists.trusted() {
                println!("  - {name}");
            }
            println!("Blocked ({}):", lists.blocked().len());
            for name in lists.blocked() {
                println!("  - {name}");
            }
            println!("Threshold: {}", manager.threshold());
        }
        ListCommand::Export { out } => {
            let json = manager.export_snapshot().to_json()?;
            match out {
                Some(path) => std::fs::write(&path, json + "\n")
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{json}"),
            }
        }
        ListCommand::Import { path } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let summary = manager
                .import_snapshot(&text)
                .with_context(|| format!("failed to import {}", path.display()))?;
            println!(
                "imported {} trusted, {} blocked ({} skipped)",
                summary.trusted_added, summary.blocked_added, summary.skipped
            );
            if let Some(t) = summary.threshold {
                println!("threshold set to {t}");
            }
        }
        ListCommand::Threshold { value: None } => println!("{}", manager.threshold()),
        ListCommand::Threshold { value: Some(input) } => {
            let threshold = Threshold::parse_input(&input);
            manager.set_threshold(threshold)?;
            println!("threshold set to {threshold}");
        }
    }
    Ok(())
}
