use crate::{
    db::catalog::Catalog,
    libs::{config::Config, messages::Message, view::View},
    models::schedule::Schedule,
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct StoreArgs {
    #[command(subcommand)]
    command: StoreCommand,
}

#[derive(Debug, Subcommand)]
enum StoreCommand {
    /// List schedules
    List,
    /// Create an empty schedule
    Create {
        /// Schedule name
        name: String,
    },
    /// Delete a schedule
    Delete {
        /// Schedule name
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Rename a schedule
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },
}

pub fn cmd(args: StoreArgs) -> Result<()> {
    let config = Config::read()?;
    let catalog = Catalog::from_config(&config)?;

    match args.command {
        StoreCommand::List => handle_list(&catalog, &config),
        StoreCommand::Create { name } => handle_create(&catalog, &config, name),
        StoreCommand::Delete { name, yes } => handle_delete(&catalog, &config, name, yes),
        StoreCommand::Rename { old, new } => handle_rename(&catalog, &config, old, new),
    }
}

fn handle_list(catalog: &Catalog, config: &Config) -> Result<()> {
    let names = Schedule::all(catalog, config)?;

    if names.is_empty() {
        msg_info!(Message::NoStoresFound);
        return Ok(());
    }

    msg_print!(Message::StoreListHeader, true);
    View::stores(&names)?;
    Ok(())
}

fn handle_create(catalog: &Catalog, config: &Config, name: String) -> Result<()> {
    if !Catalog::validate_name(&name) {
        msg_error!(Message::InvalidStoreName(name));
        return Ok(());
    }
    if name == config.main_store || !Schedule::create(catalog, &name)? {
        msg_error!(Message::StoreAlreadyExists(name));
        return Ok(());
    }

    msg_success!(Message::StoreCreated(name));
    Ok(())
}

fn handle_delete(catalog: &Catalog, config: &Config, name: String, yes: bool) -> Result<()> {
    if name == config.main_store {
        msg_error!(Message::MainStoreProtected(name));
        return Ok(());
    }
    if !catalog.exists(&name) {
        msg_error!(Message::StoreNotFound(name));
        return Ok(());
    }

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteStore(name.clone()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    Schedule::delete(catalog, &name)?;
    msg_success!(Message::StoreDeleted(name));
    Ok(())
}

fn handle_rename(catalog: &Catalog, config: &Config, old: String, new: String) -> Result<()> {
    if old == config.main_store || new == config.main_store {
        msg_error!(Message::MainStoreProtected(config.main_store.clone()));
        return Ok(());
    }
    if !Schedule::rename(catalog, &old, &new)? {
        msg_error!(Message::StoreRenameRefused(old, new));
        return Ok(());
    }

    msg_success!(Message::StoreRenamed(old, new));
    Ok(())
}
