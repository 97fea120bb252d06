// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network protocol shell binary entry point.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};

use clap::Parser;

use nsh::cli::Cli;
use nsh::config::ShellConfig;
use nsh::connector::ConnectorRegistry;
use nsh::history::HistoryLog;
use nsh::output_diagnostic::{print_error, print_warning};
use nsh::session::Session;
use nsh::{logging, repl};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match ShellConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            print_error(e);
            std::process::exit(1);
        }
    };

    let registry = ConnectorRegistry::with_builtins().with_settings(config.connectors.clone());

    if cli.list_connectors {
        for name in registry.list() {
            println!("{}", name);
        }
        return Ok(());
    }

    let history = match &config.journal {
        Some(path) => HistoryLog::with_journal(path).unwrap_or_else(|e| {
            print_warning(format!("cannot open journal '{}': {}", path.display(), e));
            HistoryLog::new()
        }),
        None => HistoryLog::new(),
    };

    let mut session = Session::new(registry, history).with_save_path(config.save_path());

    if let Some(name) = &config.default_connector {
        match session.load(name) {
            Ok(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            Err(e) => print_error(e),
        }
    }

    let result: Result<(), Box<dyn std::error::Error>> = if let Some(path) = &cli.script {
        match File::open(path) {
            Ok(file) => repl::run_lines(&mut session, BufReader::new(file), &mut io::stdout())
                .map_err(Into::into),
            Err(e) => {
                print_error(format!("cannot open script '{}': {}", path.display(), e));
                session.shutdown();
                std::process::exit(1);
            }
        }
    } else if io::stdin().is_terminal() {
        let history_file = if cli.no_history {
            None
        } else {
            config.history_file()
        };
        repl::run_interactive(&mut session, history_file.as_deref()).map_err(Into::into)
    } else {
        repl::run_lines(&mut session, io::stdin().lock(), &mut io::stdout()).map_err(Into::into)
    };

    session.shutdown();
    result
}
