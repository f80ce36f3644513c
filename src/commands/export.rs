use crate::{
    db::catalog::Catalog,
    libs::{
        config::Config,
        export::{ExportFormat, Exporter, ScheduleExport},
        messages::Message,
    },
    models::{schedule::Schedule, structure::Structure},
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Schedule to export
    store: String,

    /// Output file; the format's extension is added when missing
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: ExportFormat,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let catalog = Catalog::from_config(&config)?;
    if args.store == config.main_store || !catalog.exists(&args.store) {
        msg_bail_anyhow!(Message::StoreNotFound(args.store));
    }

    msg_info!(Message::ExportingSchedule(args.store.clone(), args.format.extension().to_string()));

    Structure::open(&catalog, &config)?;
    Schedule::open(&catalog, &args.store)?;
    let schedule = ScheduleExport::gather()?;

    let exporter = Exporter::new(args.format, args.path);
    exporter.export(&schedule)?;

    msg_success!(Message::ExportSuccess(exporter.output_path().display().to_string()));
    Ok(())
}
