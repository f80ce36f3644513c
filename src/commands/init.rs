use crate::{
    db::catalog::Catalog,
    libs::{config::Config, messages::Message},
    models::structure::Structure,
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for schedule stores
    #[arg(long)]
    store_dir: Option<PathBuf>,
    /// Name of the main store
    #[arg(long)]
    main_store: Option<String>,
    /// Default teacher image
    #[arg(long)]
    teacher_image: Option<String>,
}

impl InitArgs {
    fn is_empty(&self) -> bool {
        self.store_dir.is_none() && self.main_store.is_none() && self.teacher_image.is_none()
    }
}

pub fn cmd(args: InitArgs) -> Result<()> {
    let config = if args.is_empty() {
        Config::init()?
    } else {
        let mut config = Config::read()?;
        if let Some(store_dir) = args.store_dir {
            config.store_dir = Some(store_dir);
        }
        if let Some(main_store) = args.main_store {
            if !Catalog::validate_name(&main_store) {
                msg_bail_anyhow!(Message::InvalidStoreName(main_store));
            }
            config.main_store = main_store;
        }
        if let Some(teacher_image) = args.teacher_image {
            config.default_teacher_image = teacher_image;
        }
        config
    };
    config.save()?;

    let catalog = Catalog::from_config(&config)?;
    Structure::open(&catalog, &config)?;
    Structure::close();

    msg_success!(Message::ConfigSaved);
    msg_info!(Message::ConfigLocation(catalog.dir().display().to_string()));
    Ok(())
}
