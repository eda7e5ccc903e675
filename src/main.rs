mod cli;
mod deletion;
mod error;
mod models;
mod output;
mod registry;
mod stats;
mod store;
mod view;

use std::io::{self, Write};
use std::process;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command, DeleteArgs, ListArgs};
use deletion::Confirmation;
use registry::RegistryClient;
use store::CatalogStore;
use view::UiIntent;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let client = RegistryClient::new(&cli.registry, cli.verbose);
    let store = CatalogStore::new(client);

    match cli.command {
        Command::Stats => run_stats(&store, cli.verbose).await,
        Command::List(args) => run_list(&store, &args, cli.verbose).await,
        Command::Delete(args) => run_delete(&store, &args, cli.verbose).await,
    }
}

async fn run_stats(store: &CatalogStore<RegistryClient>, verbose: bool) -> Result<()> {
    let healthy = store.api().health().await;
    let snapshot = store.refresh().await?;
    if verbose {
        eprintln!(
            "[DEBUG] Snapshot revision {} with {} repositories",
            snapshot.revision,
            snapshot.repositories.len()
        );
    }
    output::print_summary(&snapshot, healthy);
    Ok(())
}

async fn run_list(
    store: &CatalogStore<RegistryClient>,
    args: &ListArgs,
    verbose: bool,
) -> Result<()> {
    let snapshot = store.refresh().await?;
    if verbose {
        eprintln!(
            "[DEBUG] Snapshot revision {} with {} repositories",
            snapshot.revision,
            snapshot.repositories.len()
        );
    }

    if snapshot.repositories.is_empty() && args.search.is_empty() {
        output::print_quick_start(args.registry_host.as_deref());
        return Ok(());
    }

    let intent = UiIntent {
        search_term: args.search.clone(),
        filter: args.filter,
        sort: args.sort,
        expanded: args.expand.clone(),
    };
    let projected = view::project(&snapshot, &intent);
    output::print_repositories(&projected, &intent, args.registry_host.as_deref());

    Ok(())
}

async fn run_delete(
    store: &CatalogStore<RegistryClient>,
    args: &DeleteArgs,
    verbose: bool,
) -> Result<()> {
    if !args.yes && !prompt_for_confirmation(&args.repository, &args.tag)? {
        println!("Aborted.");
        return Ok(());
    }
    // only reachable with operator consent
    let confirmation = Confirmation::operator_acknowledged();

    if verbose {
        eprintln!("[DEBUG] Deleting {}:{}", args.repository, args.tag);
    }

    let receipt = deletion::delete_tag(store, &args.repository, &args.tag, confirmation).await?;
    output::print_receipt(&receipt);

    Ok(())
}

fn prompt_for_confirmation(repository: &str, tag: &str) -> Result<bool> {
    print!(
        "Delete {}:{}? Garbage collection is needed afterwards to free disk space. [y/N] ",
        repository, tag
    );
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
