//! Generic list/info/add/edit/delete commands for the main-store entities.
//!
//! Forms are driven entirely by each type's field descriptors: labels become
//! prompts and column headers, read-only fields are never offered for input,
//! and typed input is parsed per field kind.

use crate::{
    db::catalog::Catalog,
    libs::{config::Config, messages::Message, view::View},
    models::structure::Structure,
    msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success,
    orm::{
        field::FieldKind,
        model::{Handle, Model},
        value::Record,
    },
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct EntityArgs {
    #[command(subcommand)]
    command: EntityCommand,
}

#[derive(Debug, Subcommand)]
enum EntityCommand {
    /// List all records
    List,
    /// Show one record
    Info {
        /// Record ID
        id: i64,
    },
    /// Create a record from field=value pairs
    Add {
        /// Field assignments, e.g. name=Math teacher=2
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Change a record; prompts for every editable field when no pairs are given
    Edit {
        /// Record ID
        id: i64,
        /// Field assignments, e.g. name=Physics
        fields: Vec<String>,
    },
    /// Delete a record
    Delete {
        /// Record ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd<E: Model>(args: EntityArgs) -> Result<()> {
    let config = Config::read()?;
    let catalog = Catalog::from_config(&config)?;
    Structure::open(&catalog, &config)?;

    match args.command {
        EntityCommand::List => handle_list::<E>(),
        EntityCommand::Info { id } => handle_info::<E>(id),
        EntityCommand::Add { fields } => handle_add::<E>(&config, &fields),
        EntityCommand::Edit { id, fields } => handle_edit::<E>(id, &fields),
        EntityCommand::Delete { id, yes } => handle_delete::<E>(id, yes),
    }
}

/// Turn `field=value` arguments into a record, refusing unknown and
/// read-only fields.
pub fn parse_assignments<E: Model>(pairs: &[String]) -> Result<Record> {
    let mut record = Record::new();
    for pair in pairs {
        let Some((name, input)) = pair.split_once('=') else {
            msg_bail_anyhow!(Message::InvalidFieldAssignment(pair.clone()));
        };
        let name = name.trim();
        let descriptor = match E::field(name) {
            Some(descriptor) if !descriptor.read_only => descriptor,
            _ => msg_bail_anyhow!(Message::FieldNotEditable(E::TABLE.to_string(), name.to_string())),
        };
        record.set(name, descriptor.parse_input(input)?);
    }
    Ok(record)
}

fn find<E: Model>(id: i64) -> Option<Handle<E>> {
    let found = E::get(id);
    if found.is_none() {
        msg_error!(Message::EntityNotFound(E::TITLE.to_string(), id));
    }
    found
}

fn handle_list<E: Model>() -> Result<()> {
    let entities = E::all();

    if entities.is_empty() {
        msg_info!(Message::NoEntitiesFound(E::TITLE.to_string()));
        return Ok(());
    }

    msg_print!(Message::EntityListHeader(E::TITLE.to_string()), true);
    View::entities(&entities)?;
    Ok(())
}

fn handle_info<E: Model>(id: i64) -> Result<()> {
    let Some(entity) = find::<E>(id) else {
        return Ok(());
    };
    View::entity(&*entity.read())?;
    Ok(())
}

fn handle_add<E: Model>(config: &Config, pairs: &[String]) -> Result<()> {
    let mut record = parse_assignments::<E>(pairs)?;

    // Image fields left out take the configured default
    for field in E::fields() {
        if field.kind == FieldKind::Image && record.get(field.name).is_none() {
            record.set(field.name, config.default_teacher_image.as_str());
        }
    }

    let entity = E::new(record)?;
    let id = entity.read().id();
    msg_success!(Message::EntityCreated(E::TITLE.to_string(), id));
    View::entity(&*entity.read())?;
    Ok(())
}

fn handle_edit<E: Model>(id: i64, pairs: &[String]) -> Result<()> {
    let Some(entity) = find::<E>(id) else {
        return Ok(());
    };

    let record = if pairs.is_empty() {
        prompt_fields(&*entity.read())?
    } else {
        parse_assignments::<E>(pairs)?
    };

    let mut entity = entity.write();
    entity.set_values(&record)?;
    entity.save()?;

    msg_success!(Message::EntityUpdated(E::TITLE.to_string(), id));
    Ok(())
}

/// Ask for every editable field, starting from its current value.
fn prompt_fields<E: Model>(entity: &E) -> Result<Record> {
    msg_print!(Message::EditingEntity(E::TITLE.to_string(), entity.id()), true);

    let theme = ColorfulTheme::default();
    let mut record = Record::new();
    for field in E::fields().iter().filter(|f| !f.read_only) {
        let current = entity.value(field.name).map(|v| v.to_input()).unwrap_or_default();
        let input: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptFieldValue(field.label.to_string()).to_string())
            .default(current)
            .allow_empty(true)
            .interact_text()?;
        record.set(field.name, field.parse_input(&input)?);
    }
    Ok(record)
}

fn handle_delete<E: Model>(id: i64, yes: bool) -> Result<()> {
    let Some(entity) = find::<E>(id) else {
        return Ok(());
    };

    let name = entity.read().to_string();
    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteEntity(E::TITLE.to_string(), name).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    entity.read().delete()?;
    msg_success!(Message::EntityDeleted(E::TITLE.to_string(), id));
    Ok(())
}
