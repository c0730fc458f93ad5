/// Drip - content drip schedule planner
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use drip_cli::{commands, config::DripConfig};
use drip_core::types::{CourseId, TimelineItemId};
use drip_schedule::GroupId;
use drip_sync::ImportOptions;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "drip")]
#[command(about = "Plan when course content unlocks for a batch", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./drip.toml when present)
    #[arg(short, long, global = true, env = "DRIP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show groups with deploy dates and unlock status
    Preview {
        /// Batch snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Evaluate unlocks as of this date (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Import a course's recordings after the current schedule
    Import {
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Course id
        #[arg(long)]
        course: String,
        /// Offset of the first imported recording
        #[arg(long)]
        base: Option<u32>,
        /// Days between imported recordings
        #[arg(long)]
        interval: Option<u32>,
        /// Save the result back to the snapshot
        #[arg(long)]
        write: bool,
    },
    /// Drag a group onto another group's position
    ReorderGroups {
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Group to move (`course:<id>`, `uncategorized` or `live`)
        #[arg(long)]
        group: GroupId,
        /// Group whose position it takes
        #[arg(long)]
        over: GroupId,
        #[arg(long)]
        write: bool,
    },
    /// Move one item in the flat schedule and print the new sequence
    Reindex {
        #[arg(short, long)]
        snapshot: PathBuf,
        /// 1-based position to move from
        #[arg(long)]
        from: usize,
        /// 1-based position to move to
        #[arg(long)]
        to: usize,
    },
    /// Schedule a live session on a date
    AddLive {
        #[arg(short, long)]
        snapshot: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        write: bool,
    },
    /// Delete an item, or every item of a group
    Remove {
        #[arg(short, long)]
        snapshot: PathBuf,
        #[arg(long, conflicts_with = "group", required_unless_present = "group")]
        item: Option<String>,
        #[arg(long)]
        group: Option<GroupId>,
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = DripConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Configuration: {:?}", config);

    let output = match cli.command {
        Commands::Preview { snapshot, today } => {
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            commands::preview(&snapshot, Some(today), &config).await?
        }
        Commands::Import {
            snapshot,
            course,
            base,
            interval,
            write,
        } => {
            let options = ImportOptions {
                base_offset_days: base,
                interval_days: interval,
            };
            commands::import(&snapshot, &CourseId::new(course), options, write, &config).await?
        }
        Commands::ReorderGroups {
            snapshot,
            group,
            over,
            write,
        } => commands::reorder_groups(&snapshot, &group, &over, write, &config).await?,
        Commands::Reindex { snapshot, from, to } => {
            commands::reindex(&snapshot, from, to, &config).await?
        }
        Commands::AddLive {
            snapshot,
            title,
            date,
            write,
        } => commands::add_live(&snapshot, &title, date, write, &config).await?,
        Commands::Remove {
            snapshot,
            item,
            group,
            write,
        } => match (item, group) {
            (Some(item), _) => {
                commands::remove_item(&snapshot, &TimelineItemId::new(item), write, &config)
                    .await?
            }
            (None, Some(group)) => commands::remove_group(&snapshot, &group, write, &config).await?,
            (None, None) => anyhow::bail!("pass --item or --group"),
        },
    };

    print!("{}", output);
    Ok(())
}
