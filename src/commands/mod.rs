pub mod entity;
pub mod export;
pub mod init;
pub mod schedule;
pub mod store;

use crate::models::structure::{Classroom, Group, Lesson, Teacher};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage schedule stores")]
    Store(store::StoreArgs),
    #[command(about = "Manage groups")]
    Group(entity::EntityArgs),
    #[command(about = "Manage teachers")]
    Teacher(entity::EntityArgs),
    #[command(about = "Manage classrooms")]
    Classroom(entity::EntityArgs),
    #[command(about = "Manage lessons")]
    Lesson(entity::EntityArgs),
    #[command(about = "Edit the week of a group", arg_required_else_help = true)]
    Schedule(schedule::ScheduleArgs),
    #[command(about = "Export a schedule to xlsx, csv or json", arg_required_else_help = true)]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Store(args) => store::cmd(args),
            Commands::Group(args) => entity::cmd::<Group>(args),
            Commands::Teacher(args) => entity::cmd::<Teacher>(args),
            Commands::Classroom(args) => entity::cmd::<Classroom>(args),
            Commands::Lesson(args) => entity::cmd::<Lesson>(args),
            Commands::Schedule(args) => schedule::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}
