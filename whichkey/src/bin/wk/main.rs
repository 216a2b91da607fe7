//! Entry point for the wk binary.

mod args;
mod console;
mod tracing_setup;

use anyhow::{Context, Result};
use serde::Serialize;
use whichkey::{KeyOutcome, WhichKey, WhichKeyConfig};
use whichkey_core::{format_sequence, Binding, CommandTrie, KeySequence};

use crate::args::Command;
use crate::console::{ConsoleDisplay, DryRunHost};

#[derive(Serialize)]
struct BindingRow<'a> {
    keys: KeySequence,
    id: String,
    name: &'a str,
}

fn binding_rows(trie: &CommandTrie) -> Vec<BindingRow<'_>> {
    trie.actions()
        .into_iter()
        .map(|(keys, id)| {
            let name = trie
                .node(&keys)
                .and_then(|node| node.binding())
                .map_or("", Binding::name);
            BindingRow { keys, id, name }
        })
        .collect()
}

#[allow(clippy::print_stdout)]
fn run(which_key: &mut WhichKey, command: Command) -> Result<()> {
    let trie = which_key.trie();
    match command {
        Command::Bindings { json } => {
            let rows = binding_rows(&trie);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in rows {
                    println!("{:<12} {:<40} {}", format_sequence(&row.keys), row.id, row.name);
                }
            }
        }
        Command::Menu { keys } => {
            let options = trie.possible_commands(&keys);
            if options.is_empty() {
                println!("nothing follows [{}]", format_sequence(&keys));
            }
            for option in options {
                let target = option.command.id.as_deref().unwrap_or("...");
                println!("{:>5}  {:<40} {target}", option.key.to_string(), option.command.name);
            }
        }
        Command::Press { keys } => {
            let (mut host, mut display) = (DryRunHost::default(), ConsoleDisplay);
            for key in keys {
                let outcome = which_key.handle_key(key, &mut host, &mut display);
                log::debug!("{key}: {outcome:?}");
                if outcome == KeyOutcome::Ignored && !which_key.session().is_recording() {
                    println!("{key} ignored (leader is {})", which_key.session().leader());
                }
            }
            if host.executed.is_empty() {
                println!("no command ran");
            }
        }
        Command::Unassigned => {
            for command in which_key.unassigned() {
                println!("{:<40} {}", command.id, command.name);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = args::parse_args();

    let mut config = match &cli.config {
        Some(path) => WhichKeyConfig::load_from(path)?,
        None => WhichKeyConfig::load_default().unwrap_or_else(|err| {
            eprintln!("Warning: failed to load config: {err:#}");
            eprintln!("Using default configuration");
            WhichKeyConfig::default()
        }),
    };
    if let Some(strategy) = cli.strategy {
        config = config.with_strategy(strategy.into());
    }

    tracing_setup::init(&config.logging);
    log::info!("Starting wk with {} curation", config.curation.strategy);

    let mut which_key = WhichKey::from_registry_file(&cli.registry, &config)
        .context("could not build bindings")?;
    run(&mut which_key, cli.command)
}
