use super::render::{
    print_categories, print_config, print_messages, print_quote_list, print_shown,
};
use super::session;
use super::setup::{
    command_name, print_grouped_help, print_help_for_command, Cli, Commands, CoreCommands,
    DataCommands, MiscCommands,
};
use clap::Parser;
use quip::api::{CmdResult, ConfigAction, QuipApi};
use quip::config::QuipConfig;
use quip::error::{QuipError, Result};
use quip::init::initialize;
use quip::logging::init_logging;
use quip::store::fs_backend::FsBackend;
use quip::sync::http::HttpRemote;
use quip::sync::SyncEngine;
use std::path::{Path, PathBuf};
use tracing::debug;

pub(super) type Engine = SyncEngine<HttpRemote>;

pub(super) struct AppContext {
    pub(super) api: QuipApi<FsBackend>,
    pub(super) config: QuipConfig,
}

impl AppContext {
    /// The sync engine for the configured remote, if there is one.
    pub(super) fn remote_engine(&self) -> Result<Option<Engine>> {
        match &self.config.remote_url {
            Some(url) => {
                let remote = HttpRemote::new(url.clone(), self.config.request_timeout())?;
                Ok(Some(SyncEngine::new(remote)))
            }
            None => Ok(None),
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        match command_name(&cli.command) {
            Some(name) => print_help_for_command(name),
            None => print_grouped_help(),
        }
        return Ok(());
    }

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        match command {
            Some(name) => print_help_for_command(name),
            None => print_grouped_help(),
        }
        return Ok(());
    }

    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        None => handle_random(&mut ctx),
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::Random => handle_random(&mut ctx),
            CoreCommands::Filter { category } => handle_filter(&mut ctx, &category),
            CoreCommands::Add { text, category } => {
                let engine = ctx.remote_engine()?;
                handle_add(&mut ctx, engine.as_ref(), &text, &category).await
            }
            CoreCommands::List { category } => handle_list(&ctx, category.as_deref()),
            CoreCommands::Categories => handle_categories(&ctx),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Export { output } => handle_export(&ctx, output.as_deref()),
            DataCommands::Import { path } => handle_import(&mut ctx, &path),
            DataCommands::Sync => handle_sync(&mut ctx).await,
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Watch => session::run(&mut ctx).await,
            MiscCommands::Config { key, value } => handle_config(&ctx, key, value),
            MiscCommands::Init => handle_init(&ctx),
            MiscCommands::Help { .. } => Ok(()),
        },
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.local)?;
    debug!(scope = ?ctx.scope, "context ready");
    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
    })
}

fn print_result(result: &CmdResult) {
    if let Some(shown) = &result.shown {
        print_shown(shown);
    }
    print_messages(&result.messages);
}

pub(super) fn handle_random(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.random_quote()?;
    print_result(&result);
    Ok(())
}

pub(super) fn handle_filter(ctx: &mut AppContext, category: &str) -> Result<()> {
    let result = ctx.api.filter_quotes(category)?;
    print_result(&result);
    Ok(())
}

/// Adds a quote, then pushes it when a remote is configured and pushing is on.
pub(super) async fn handle_add(
    ctx: &mut AppContext,
    engine: Option<&Engine>,
    text: &str,
    category: &str,
) -> Result<()> {
    let result = ctx.api.add_quote(text, category)?;
    print_messages(&result.messages);

    if let (Some(engine), true) = (engine, ctx.config.push_on_add) {
        for quote in &result.affected_quotes {
            let pushed = ctx.api.push_quote(engine, quote).await;
            print_messages(&pushed.messages);
        }
    }
    Ok(())
}

pub(super) fn handle_list(ctx: &AppContext, category: Option<&str>) -> Result<()> {
    let result = ctx.api.list_quotes(category)?;
    print_quote_list(&result.listed_quotes);
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn handle_categories(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.categories()?;
    print_categories(&result.categories);
    Ok(())
}

pub(super) fn handle_last(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.last_viewed()?;
    print_result(&result);
    Ok(())
}

fn handle_export(ctx: &AppContext, output: Option<&Path>) -> Result<()> {
    let result = ctx.api.export_quotes(output)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: &Path) -> Result<()> {
    let result = ctx.api.import_quotes(path)?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_sync(ctx: &mut AppContext) -> Result<()> {
    let mut engine = ctx.remote_engine()?.ok_or_else(no_remote)?;
    let result = ctx.api.sync(&mut engine).await;
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn no_remote() -> QuipError {
    QuipError::Config(
        "No remote configured. Set one with `quip config remote-url <url>`".to_string(),
    )
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}
