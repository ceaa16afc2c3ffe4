//! Command dispatch: one handler per subcommand

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::LineageService;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    if let Commands::Completion { shell } = command {
        return completion(*shell);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let service = LineageService::from_settings(&settings)?;
    debug!("lineage ready: {} vampires", service.lineage().len());

    match command {
        Commands::Tree => tree(&service),
        Commands::Creator { name } => creator(&service, name),
        Commands::Offspring { name } => offspring(&service, name),
        Commands::Depth { name } => depth(&service, name),
        Commands::Senior { first, second } => senior(&service, first, second),
        Commands::Ancestor { first, second } => ancestor(&service, first, second),
        Commands::Descendants { name } => descendants(&service, name),
        Commands::Find { name, from } => find(&service, name, from.as_deref()),
        Commands::After { name, year } => after(&service, name, *year),
        Commands::Path { name } => path(&service, name),
        Commands::Stats { name } => stats(&service, name),
        Commands::Info => info(&service, cli),
        Commands::Completion { shell } => completion(*shell),
    }
}

#[instrument(skip(service))]
fn tree(service: &LineageService) -> CliResult<()> {
    let forest = service.render();
    if forest.is_empty() {
        output::warning("lineage is empty");
    }
    for tree in forest {
        output::info(&tree);
    }
    Ok(())
}

#[instrument(skip(service))]
fn creator(service: &LineageService, name: &str) -> CliResult<()> {
    match service.creator_of(name)? {
        Some(creator) => output::action("creator", creator),
        None => output::detail(&format!("{} is an original", name)),
    }
    Ok(())
}

#[instrument(skip(service))]
fn offspring(service: &LineageService, name: &str) -> CliResult<()> {
    let offspring = service.offspring_of(name)?;
    output::header(&format!("Offspring of {} ({})", name, offspring.len()));
    for vampire in offspring {
        output::detail(vampire);
    }
    Ok(())
}

#[instrument(skip(service))]
fn depth(service: &LineageService, name: &str) -> CliResult<()> {
    output::info(&service.depth_of(name)?);
    Ok(())
}

#[instrument(skip(service))]
fn senior(service: &LineageService, first: &str, second: &str) -> CliResult<()> {
    if service.is_more_senior(first, second)? {
        output::success(&format!("{} is more senior than {}", first, second));
    } else {
        output::failure(&format!("{} is not more senior than {}", first, second));
    }
    Ok(())
}

#[instrument(skip(service))]
fn ancestor(service: &LineageService, first: &str, second: &str) -> CliResult<()> {
    let ancestor = service.closest_common_ancestor(first, second)?;
    output::action("closest common ancestor", ancestor);
    Ok(())
}

#[instrument(skip(service))]
fn descendants(service: &LineageService, name: &str) -> CliResult<()> {
    output::info(&service.total_descendants(name)?);
    Ok(())
}

#[instrument(skip(service))]
fn find(service: &LineageService, name: &str, from: Option<&str>) -> CliResult<()> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidArgs("name must not be empty".into()));
    }
    match service.find(name, from)? {
        Some(vampire) => output::success(&format!("found {}", vampire)),
        None => output::warning(&format!("no vampire named {}", name)),
    }
    Ok(())
}

#[instrument(skip(service))]
fn after(service: &LineageService, name: &str, year: Option<i32>) -> CliResult<()> {
    let (heading, lines) = after_report(service, name, year)?;
    output::header(&heading);
    for line in lines {
        output::detail(&line);
    }
    Ok(())
}

fn after_report(
    service: &LineageService,
    name: &str,
    year: Option<i32>,
) -> CliResult<(String, Vec<String>)> {
    let (year, vampires) = service.converted_after(name, year)?;
    let heading = format!(
        "Converted after {} below {} ({})",
        year,
        name,
        vampires.len()
    );
    Ok((heading, vampires.iter().map(ToString::to_string).collect()))
}

#[instrument(skip(service))]
fn path(service: &LineageService, name: &str) -> CliResult<()> {
    let chain = service.path_to(name)?;
    output::info(&chain.iter().map(|vampire| vampire.name()).join(" -> "));
    Ok(())
}

#[instrument(skip(service))]
fn stats(service: &LineageService, name: &str) -> CliResult<()> {
    let stats = service.stats(name)?;
    output::header(&format!("Subtree of {}", name));
    output::detail(&format!("original: {}", stats.original));
    output::detail(&format!("height: {}", stats.height));
    output::detail(&format!(
        "leaves: {}",
        stats.leaves.iter().map(|vampire| vampire.name()).join(", ")
    ));
    Ok(())
}

fn info(service: &LineageService, cli: &Cli) -> CliResult<()> {
    let lineage = service.lineage();
    output::header("bloodline");
    output::detail(&format!("vampires: {}", lineage.len()));
    output::detail(&format!(
        "originals: {}",
        lineage
            .roots()
            .iter()
            .map(|&root| lineage.name_of(root))
            .join(", ")
    ));
    output::detail(&format!("millennial year: {}", service.millennial_year()));
    if let Some(global) = global_config_path() {
        output::detail(&format!("global config: {}", global.display()));
    }
    if let Some(config) = &cli.config {
        output::detail(&format!("config: {}", config.display()));
    }
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
