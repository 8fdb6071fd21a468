//! # CLI Layer
//!
//! This module is **one possible UI client** for tagpix. It is the only place
//! that parses arguments, writes to the terminal or sets up logging.
//!
//! Every invocation follows the same steps:
//!
//! 1. Parse arguments and initialise `env_logger` (`-v` lowers the filter to debug)
//! 2. Locate the data directory (`TAGPIX_HOME`, or the platform data dir)
//! 3. Open the API and change to the viewing directory, which rescans it
//!    (the core resolves it to an absolute path)
//! 4. Dispatch the command and print its `CmdResult`

use super::print::{
    print_config, print_history, print_log, print_messages, print_pictures, print_suggestions,
    print_tags,
};
use super::setup::{Cli, Commands, TagsCommands};
use clap::Parser;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use tagpix::api::{CmdResult, ConfigAction, TagpixApi};
use tagpix::error::{Result, TagpixError};
use tagpix::store::fs::FileStore;

const HOME_ENV: &str = "TAGPIX_HOME";

struct AppContext {
    api: TagpixApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { tags, top_level }) => handle_list(&mut ctx, tags, top_level),
        Some(Commands::Add { picture, tags }) => handle_add(&mut ctx, &picture, tags),
        Some(Commands::Remove { picture, tags }) => handle_remove(&mut ctx, &picture, tags),
        Some(Commands::History { picture }) => handle_history(&ctx, &picture),
        Some(Commands::Revert { picture, name }) => handle_revert(&mut ctx, &picture, &name),
        Some(Commands::Move { picture, target }) => handle_move(&mut ctx, &picture, target),
        Some(Commands::Tags { action, sort }) => handle_tags(&mut ctx, action, sort),
        Some(Commands::Log) => handle_log(&ctx),
        Some(Commands::Suggest { picture, accept }) => handle_suggest(&mut ctx, &picture, accept),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, Vec::new(), false),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = data_dir()?;
    fs::create_dir_all(&data_dir)?;
    log::debug!("Using data directory {}", data_dir.display());

    let view_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let mut api = TagpixApi::new(FileStore::new(), data_dir)?;
    api.change_directory(view_dir)?;
    Ok(AppContext { api })
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "tagpix", "tagpix")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TagpixError::Store("Could not determine data directory".to_string()))
}

fn handle_list(ctx: &mut AppContext, tags: Vec<String>, top_level: bool) -> Result<()> {
    if top_level {
        ctx.api.hide_subdirectories()?;
    }
    let result = ctx.api.hide_without_tags(&tags)?;
    print_pictures(&result.listed_pictures, ctx.api.viewing_directory());
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, picture: &str, tags: Vec<String>) -> Result<()> {
    let result = ctx.api.add_tags(picture, &tags)?;
    print_outcome(&result);
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, picture: &str, tags: Vec<String>) -> Result<()> {
    let result = ctx.api.remove_tags(picture, &tags)?;
    print_outcome(&result);
    Ok(())
}

fn handle_history(ctx: &AppContext, picture: &str) -> Result<()> {
    let result = ctx.api.history(picture)?;
    if let Some(pic) = result.affected_pictures.first() {
        print_history(&pic.name, &result.history);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_revert(ctx: &mut AppContext, picture: &str, name: &str) -> Result<()> {
    let result = ctx.api.revert_name(picture, name)?;
    print_outcome(&result);
    Ok(())
}

fn handle_move(ctx: &mut AppContext, picture: &str, target: PathBuf) -> Result<()> {
    let result = ctx.api.move_picture(picture, &target)?;
    print_outcome(&result);
    Ok(())
}

fn handle_tags(
    ctx: &mut AppContext,
    action: Option<TagsCommands>,
    sort: Option<String>,
) -> Result<()> {
    let result = match (action, sort) {
        (Some(TagsCommands::Add { tags }), _) => ctx.api.add_vocabulary_tags(&tags)?,
        (Some(TagsCommands::Remove { tags }), _) => ctx.api.remove_vocabulary_tags(&tags)?,
        (None, Some(keyword)) => ctx.api.sort_vocabulary(&keyword)?,
        (None, None) => ctx.api.vocabulary()?,
    };
    print_tags(&result.tags);
    print_messages(&result.messages);
    Ok(())
}

fn handle_log(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.log()?;
    print_log(&result.log_entries);
    Ok(())
}

fn handle_suggest(ctx: &mut AppContext, picture: &str, accept: Vec<String>) -> Result<()> {
    if !accept.is_empty() {
        let result = ctx.api.accept_suggestions(picture, &accept)?;
        print_outcome(&result);
        return Ok(());
    }
    let result = ctx.api.suggest(picture)?;
    print_suggestions(&result.suggestions);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}

/// Messages first, then where the picture ended up.
fn print_outcome(result: &CmdResult) {
    print_messages(&result.messages);
    for picture in &result.affected_pictures {
        println!("{}", picture.path.display());
    }
}
