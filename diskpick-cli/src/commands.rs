// SPDX-License-Identifier: GPL-3.0-only

use anyhow::{Context, Result, bail};
use diskpick_core::{BlockMap, Importance};
use diskpick_udisks::{BlockSource, DiskManager, SnapshotSource};

use crate::cli::{Cli, Commands, ListArgs};
use crate::config::Config;
use crate::format::{self, LineFormatter, OutputFormat};
use crate::menu;

/// Options of a listing after merging flags over the config file
#[derive(Debug)]
pub struct Listing {
    pub format: OutputFormat,
    pub min_importance: Importance,
}

impl Listing {
    /// Flags win over config values. The importance level is validated here,
    /// before any data source is touched.
    pub fn from_args(args: &ListArgs, config: &Config, default_format: &str) -> Result<Self> {
        let min_importance = match args.min_importance {
            Some(level) => Importance::try_from(level).context("invalid --min-importance")?,
            None => config.min_importance()?,
        };
        let format = OutputFormat::resolve(
            args.format.as_deref().unwrap_or(default_format),
            config,
        );

        Ok(Self {
            format,
            min_importance,
        })
    }
}

pub async fn run(cli: Cli, config: &Config) -> Result<()> {
    match cli.command {
        Commands::Blockdevs { list } => {
            let listing = Listing::from_args(&list, config, &config.format)?;
            let source = open_source(&list).await?;
            let output = blockdevs(source.as_ref(), &listing).await?;
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Commands::Menu { list, command } => {
            let listing = Listing::from_args(&list, config, &config.menu_format)?;
            let command = menu::menu_command(&command, &config.menu)?.to_vec();
            let source = open_source(&list).await?;
            println!("{}", pick(source.as_ref(), &listing, &command).await?);
        }
        Commands::Snapshot => {
            let manager = connect().await?;
            println!("{}", snapshot(&manager).await?);
        }
    }
    Ok(())
}

async fn open_source(args: &ListArgs) -> Result<Box<dyn BlockSource>> {
    if let Some(path) = &args.snapshot {
        return Ok(Box::new(SnapshotSource::new(path)));
    }
    Ok(Box::new(connect().await?))
}

async fn connect() -> Result<DiskManager> {
    let manager = DiskManager::new()
        .await
        .context("could not connect to UDisks2")?;
    match manager.daemon_version().await {
        Ok(version) => tracing::debug!("Connected to UDisks2 {version}"),
        Err(e) => tracing::debug!("Could not read the UDisks2 version: {e}"),
    }
    Ok(manager)
}

/// Read every raw record from `source` and resolve them into a block map.
pub async fn load_map(source: &dyn BlockSource) -> Result<BlockMap> {
    let devices = source
        .block_devices()
        .await
        .context("could not enumerate block devices")?;
    let map = BlockMap::from_devices(devices).context("could not resolve block devices")?;
    tracing::debug!("Resolved {} block devices", map.len());
    Ok(map)
}

/// Ordered, filtered listing of `map` in the requested format.
pub fn render_listing(map: &BlockMap, listing: &Listing) -> Result<String> {
    let devices = map.listing(listing.min_importance.level())?;

    match &listing.format {
        OutputFormat::Json => Ok(format::to_pretty_json(&devices)?),
        OutputFormat::Template(template) => {
            let formatter = LineFormatter::new(template)?;
            Ok(formatter.render_all(&devices, false)?.lines.join("\n"))
        }
    }
}

pub async fn blockdevs(source: &dyn BlockSource, listing: &Listing) -> Result<String> {
    let map = load_map(source).await?;
    render_listing(&map, listing)
}

/// Let the user pick a device through `command` and return it as pretty JSON.
pub async fn pick(
    source: &dyn BlockSource,
    listing: &Listing,
    command: &[String],
) -> Result<String> {
    let OutputFormat::Template(template) = &listing.format else {
        bail!("the json format cannot be shown in a menu; use a line template");
    };

    let map = load_map(source).await?;
    let devices = map.listing(listing.min_importance.level())?;
    if devices.is_empty() {
        bail!("no block devices to choose from");
    }

    let formatter = LineFormatter::new(template)?;
    let rendered = formatter.render_all(&devices, true)?;
    let device = menu::pick(command, &rendered)?;

    tracing::info!("Selected {}", device.object_path());
    Ok(format::to_pretty_json(device)?)
}

/// Raw records as the source reports them, before resolution.
pub async fn snapshot(source: &dyn BlockSource) -> Result<String> {
    let devices = source
        .block_devices()
        .await
        .context("could not enumerate block devices")?;
    Ok(format::to_pretty_json(&devices)?)
}
