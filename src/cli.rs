// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Listing and selecting film filters
//! - Adjusting grain
//! - Developing photos into the Lab
//! - Browsing, deleting, saving and sharing Lab photos

use kontax_cam::app::lab::PhotoViewerDataSource;
use kontax_cam::app::{Alert, AlertStyle, FilterList, FilterName, Lab, LabTask};
use kontax_cam::config::Config;
use kontax_cam::pipelines::photo::{EncodingFormat, PhotoPipeline, Picture, PostProcessingConfig};
use kontax_cam::storage::{DocumentsStore, PhotoStore, PicturesAlbum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Loaded config plus where it came from
pub struct Context {
    pub config: Config,
    config_path: Option<PathBuf>,
    lab_dir: PathBuf,
}

impl Context {
    /// Load the config and resolve the Lab directory (flag > config > default)
    pub fn load(
        config_path: Option<PathBuf>,
        lab_dir: Option<PathBuf>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = config_path.or_else(Config::default_path);
        let config = config_path
            .as_deref()
            .map(Config::load_or_default)
            .unwrap_or_default();
        let lab_dir = lab_dir.unwrap_or_else(|| config.lab_dir());

        debug!(config = ?config_path, lab = %lab_dir.display(), "CLI context loaded");

        Ok(Self {
            config,
            config_path,
            lab_dir,
        })
    }

    fn save_config(&self) -> Result<(), Box<dyn std::error::Error>> {
        match &self.config_path {
            Some(path) => Ok(self.config.save(path)?),
            None => Err("No config directory available on this system".into()),
        }
    }

    fn store(&self) -> Result<Arc<dyn PhotoStore>, Box<dyn std::error::Error>> {
        let store: Arc<dyn PhotoStore> = Arc::new(DocumentsStore::open(&self.lab_dir)?);
        Ok(store)
    }

    fn open_lab(&self) -> Result<Lab, Box<dyn std::error::Error>> {
        Ok(Lab::open(self.store()?)?)
    }
}

/// List the filter catalog, marking the selected filter
pub fn list_filters(context: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let list = FilterList::new(context.config.clone(), Some(context.config.selected_filter));

    println!("Filters:");
    println!();
    for row in list.rows() {
        let marker = if row.is_selected { "*" } else { " " };
        println!(" {} {}", marker, row.filter.title());
        println!("      {}", row.filter.subtitle);
    }

    Ok(())
}

/// Select a filter through the filter list and persist it
pub fn select_filter(context: &mut Context, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let name: FilterName = name.parse()?;

    let mut list = FilterList::new(context.config.clone(), Some(context.config.selected_filter));
    list.select_name(name)?;
    context.config = list.into_delegate();
    context.save_config()?;

    println!("Selected filter: {}", context.config.selected_filter);
    Ok(())
}

/// Show or change grain settings
pub fn grain(
    context: &mut Context,
    strength: Option<f32>,
    off: bool,
    on: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let changed = strength.is_some() || off || on;

    if let Some(strength) = strength {
        context.config.set_grain_strength(strength);
        context.config.grain_enabled = true;
    }
    if off {
        context.config.grain_enabled = false;
    }
    if on {
        context.config.grain_enabled = true;
    }

    if changed {
        context.save_config()?;
    }

    if context.config.grain_enabled {
        println!("Grain: {:.2}", context.config.grain_strength);
    } else {
        println!("Grain: off");
    }
    Ok(())
}

/// Options for `develop`
pub struct DevelopOptions {
    pub input: PathBuf,
    pub filter: Option<String>,
    pub grain: Option<f32>,
    pub no_grain: bool,
    pub png: bool,
    pub output: Option<PathBuf>,
}

/// Develop one photo into the Lab (or to an explicit output file)
pub fn develop(context: &Context, options: DevelopOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut processing: PostProcessingConfig = context.config.post_processing();
    if let Some(filter) = options.filter.as_deref() {
        processing.filter = filter.parse()?;
    }
    if let Some(strength) = options.grain {
        processing.grain_strength = Some(strength);
    }
    if options.no_grain {
        processing.grain_strength = None;
    }

    let format = if options.png {
        EncodingFormat::Png
    } else {
        context.config.photo_output_format
    };

    // Building the pipeline loads the grain texture; a missing asset stops here
    let pipeline = PhotoPipeline::new(processing, format, context.config.photo_quality)?;

    println!("Developing {} with {}...", options.input.display(), processing.filter);

    let rt = tokio::runtime::Runtime::new()?;
    let output_path = rt.block_on(async {
        match options.output {
            Some(output) => {
                let input = options.input.clone();
                let picture = tokio::task::spawn_blocking(move || Picture::open(&input)).await??;
                Ok::<_, Box<dyn std::error::Error>>(pipeline.develop_to(picture, &output).await?)
            }
            None => Ok(pipeline.develop_file(&options.input, context.store()?).await?),
        }
    })?;

    info!(path = %output_path.display(), "Develop finished");
    println!("Photo saved: {}", output_path.display());
    Ok(())
}

/// Print the Lab as a grid
pub fn lab_list(context: &Context, width: f32) -> Result<(), Box<dyn std::error::Error>> {
    let mut lab = context.open_lab()?;
    lab.set_viewport(width, 0.0, 0.0);

    if lab.shows_empty_view() {
        println!("The Lab is empty. Developed photos show up here.");
        return Ok(());
    }

    println!("Lab ({} photos):", lab.number_of_items());
    println!();

    let layout = *lab.layout();
    for index in 0..lab.number_of_items() {
        let Some(photo) = lab.photo_at(index) else {
            continue;
        };
        let (row, column) = layout.position(index);
        println!(
            "  [{}] row {} col {}  {}  {}x{}",
            index,
            row,
            column,
            photo.identifier,
            photo.image.width(),
            photo.image.height()
        );
    }

    Ok(())
}

/// Delete one Lab photo
pub fn lab_delete(context: &Context, index: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut lab = context.open_lab()?;
    lab.select_item(index)?;

    let (notice, task) = lab.delete(index)?;
    print_alert(&notice);

    run_task(&mut lab, task)
}

/// Copy one Lab photo into the album
pub fn lab_save(context: &Context, index: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut lab = context.open_lab()?;
    lab.select_item(index)?;

    let album = Arc::new(PicturesAlbum::new(context.config.album_dir()));
    let task = lab.save(index, album)?;

    run_task(&mut lab, task)
}

/// Hand one Lab photo to the system
pub fn lab_share(context: &Context, index: usize) -> Result<(), Box<dyn std::error::Error>> {
    let lab = context.open_lab()?;
    let path = lab.share(index)?;

    println!("Opening {}", path.display());
    open::that(path)?;
    Ok(())
}

/// Run a Lab task to completion and report its outcome
fn run_task(lab: &mut Lab, task: LabTask) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let message = rt.block_on(task);

    if let Some(alert) = lab.update(message) {
        print_alert(&alert);
        if alert.style == AlertStyle::Error {
            return Err(alert.title.into());
        }
    }
    Ok(())
}

fn print_alert(alert: &Alert) {
    match &alert.message {
        Some(message) => println!("{}\n{}", alert.title, message),
        None => println!("{}", alert.title),
    }
}
