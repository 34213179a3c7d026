// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod render;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use opsdeck_app::{RecordId, SessionCommand};
use opsdeck_feed::Snapshot;
use runtime::{Board, ReviewScript, ReviewStep};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    if options.export_demo {
        println!(
            "{}",
            opsdeck_feed::export_snapshot(&opsdeck_feed::demo_snapshot_file())?
        );
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `opsdeck --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    logging::init_subscriber(config.log_level(), options.verbose);

    let snapshot_path = match &options.snapshot_path {
        Some(path) => path.clone(),
        None => config.snapshot_path()?,
    };
    if options.print_snapshot_path {
        println!("{}", snapshot_path.display());
        return Ok(());
    }

    let snapshot = if options.demo {
        Snapshot::demo()?
    } else {
        opsdeck_feed::load_snapshot(&snapshot_path).with_context(|| {
            format!(
                "open snapshot {} -- if this path is wrong, set [feed].snapshot_path, {} or --snapshot; use --demo for built-in data",
                snapshot_path.display(),
                opsdeck_feed::SNAPSHOT_PATH_ENV,
            )
        })?
    };
    if options.check_only {
        tracing::info!(
            alerts = snapshot.alerts.len(),
            kpis = snapshot.kpis.len(),
            "check passed"
        );
        return Ok(());
    }

    let report = runtime::run_review(snapshot, &options.script, config.default_team())?;
    print!("{report}");
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    snapshot_path: Option<PathBuf>,
    print_config_path: bool,
    print_snapshot_path: bool,
    print_example: bool,
    export_demo: bool,
    demo: bool,
    check_only: bool,
    verbose: bool,
    show_help: bool,
    script: ReviewScript,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        snapshot_path: None,
        print_config_path: false,
        print_snapshot_path: false,
        print_example: false,
        export_demo: false,
        demo: false,
        check_only: false,
        verbose: false,
        show_help: false,
        script: ReviewScript::default(),
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let path = next_value(&mut iter, "--config", "a file path")?;
                options.config_path = PathBuf::from(path);
            }
            "--snapshot" => {
                let path = next_value(&mut iter, "--snapshot", "a file path")?;
                opsdeck_feed::validate_snapshot_path(&path).context("invalid --snapshot value")?;
                options.snapshot_path = Some(PathBuf::from(path));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-snapshot-path" => {
                options.print_snapshot_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--export-demo" => {
                options.export_demo = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--kpis" => {
                options.script.board = Board::Kpis;
            }
            "--filter" => {
                let label = next_value(&mut iter, "--filter", "a label")?;
                options
                    .script
                    .push_command(SessionCommand::SetClassificationFilter(label));
            }
            "--category" => {
                let category = next_value(&mut iter, "--category", "a category name")?;
                options
                    .script
                    .push_command(SessionCommand::SetCategoryFilter(category));
            }
            "--search" => {
                let text = next_value(&mut iter, "--search", "search text")?;
                options.script.push_command(SessionCommand::SetSearchText(text));
            }
            "--select" => {
                let record_id = next_value(&mut iter, "--select", "a record id")?;
                options
                    .script
                    .push_command(SessionCommand::Select(RecordId::new(record_id)));
            }
            "--dispatch" => {
                let target = next_value(&mut iter, "--dispatch", "<record>/<action>")?;
                let (record_id, action_id) = runtime::parse_dispatch_target(&target)?;
                options.script.push_command(SessionCommand::Dispatch {
                    record_id,
                    action_id,
                });
            }
            "--ack" => {
                let record_id = next_value(&mut iter, "--ack", "a record id")?;
                options
                    .script
                    .push(ReviewStep::Acknowledge(RecordId::new(record_id)));
            }
            "--resolve" => {
                let record_id = next_value(&mut iter, "--resolve", "a record id")?;
                options
                    .script
                    .push(ReviewStep::Resolve(RecordId::new(record_id)));
            }
            "--verbose" | "-v" => {
                options.verbose = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.script.board == Board::Kpis && options.script.changes_status() {
        bail!("--ack and --resolve apply to alerts only; drop --kpis");
    }

    Ok(options)
}

fn next_value<I, S>(iter: &mut I, flag: &str, what: &str) -> Result<String>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    iter.next()
        .map(|value| value.as_ref().to_owned())
        .ok_or_else(|| anyhow!("{flag} requires {what}"))
}

fn print_help() {
    println!("opsdeck: operations alert and KPI review");
    println!("  Review flags run in the order given.");
    println!("  --config <path>              Use a specific config path");
    println!("  --print-config-path          Print resolved config path");
    println!("  --print-snapshot-path        Print resolved snapshot path");
    println!("  --print-example-config       Print a v1 config template");
    println!("  --export-demo                Print the built-in demo snapshot as JSON");
    println!("  --snapshot <path>            Review a specific snapshot file");
    println!("  --demo                       Review the built-in demo snapshot");
    println!("  --check                      Validate config and snapshot, then exit");
    println!("  --kpis                       Review KPI records instead of alerts");
    println!("  --filter <label>             Severity, status or KPI status (default all)");
    println!("  --category <name>            Category or tag (default all)");
    println!("  --search <text>              Case-insensitive text search");
    println!("  --select <id>                Open a record with its insight");
    println!("  --dispatch <record>/<action> Dispatch an action (repeatable)");
    println!("  --ack <id>                   Acknowledge an alert (repeatable)");
    println!("  --resolve <id>               Resolve an alert (repeatable)");
    println!("  -v, --verbose                Debug logging on stderr");
    println!("  -h, --help                   Show this help");
}
