// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "kontax-cam")]
#[command(about = "Film filters, grain and the photo Lab")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    /// Lab directory (default: from config, else ~/Documents/Kontax Cam)
    #[arg(long, global = true)]
    lab_dir: Option<PathBuf>,

    /// Config file (default: ~/.config/kontax-cam/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the film filters
    Filters,

    /// Choose the film filter for new photos
    Select {
        /// Filter name (KC01, KC02, KC03)
        name: String,
    },

    /// Show or set the grain strength
    Grain {
        /// New strength between 0.0 and 1.0
        strength: Option<f32>,

        /// Turn grain off for new photos
        #[arg(long, conflicts_with_all = ["strength", "on"])]
        off: bool,

        /// Turn grain back on
        #[arg(long)]
        on: bool,
    },

    /// Develop a photo with the selected filter and grain
    Develop {
        /// Input image
        input: PathBuf,

        /// Filter to use instead of the selected one
        #[arg(short, long)]
        filter: Option<String>,

        /// Grain strength to use instead of the configured one
        #[arg(short, long)]
        grain: Option<f32>,

        /// Skip grain
        #[arg(long, conflicts_with = "grain")]
        no_grain: bool,

        /// Write PNG instead of JPEG
        #[arg(long)]
        png: bool,

        /// Output file (default: new photo in the Lab)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Browse the Lab
    Lab {
        #[command(subcommand)]
        command: Option<LabCommand>,
    },
}

#[derive(Subcommand)]
enum LabCommand {
    /// List photos as a 3-column grid
    List {
        /// Grid width in points
        #[arg(short, long, default_value = "390")]
        width: f32,
    },

    /// Delete a photo
    Delete {
        /// Photo index (from 'lab list')
        index: usize,
    },

    /// Save a photo to the album
    Save {
        /// Photo index (from 'lab list')
        index: usize,
    },

    /// Open a photo with the system handler
    Share {
        /// Photo index (from 'lab list')
        index: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=kontax_cam=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let mut context = cli::Context::load(cli.config, cli.lab_dir)?;

    match cli.command {
        Commands::Filters => cli::list_filters(&context),
        Commands::Select { name } => cli::select_filter(&mut context, &name),
        Commands::Grain { strength, off, on } => cli::grain(&mut context, strength, off, on),
        Commands::Develop {
            input,
            filter,
            grain,
            no_grain,
            png,
            output,
        } => cli::develop(
            &context,
            cli::DevelopOptions {
                input,
                filter,
                grain,
                no_grain,
                png,
                output,
            },
        ),
        Commands::Lab { command } => match command.unwrap_or(LabCommand::List { width: 390.0 }) {
            LabCommand::List { width } => cli::lab_list(&context, width),
            LabCommand::Delete { index } => cli::lab_delete(&context, index),
            LabCommand::Save { index } => cli::lab_save(&context, index),
            LabCommand::Share { index } => cli::lab_share(&context, index),
        },
    }
}
