mod render;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use api::{ApiConfig, Credentials};
use services::{
    AppServices, Clock, Dashboard, Profile, RoadmapDetail, RoadmapResources, ServiceError, UserInfo,
};
use tracker_core::model::{Catalog, Category, RoadmapId, SubtopicId};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Track progress through learning roadmaps")]
struct Cli {
    /// Base URL of the roadmap API
    #[arg(long, env = "TRACKER_API_URL", default_value = api::http::DEFAULT_BASE_URL)]
    api_url: String,

    /// Bearer token of the signed-in user
    #[arg(long, env = "TRACKER_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "TRACKER_API_TIMEOUT_SECS", default_value_t = api::http::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Overall progress plus both roadmap grids
    Dashboard {
        /// Case-insensitive filter on title and description
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Roadmaps of one category (`academic` or `non-academic`)
    List { category: Category },
    /// One roadmap with per-subtopic status and notes
    Show { roadmap: RoadmapId },
    /// Flip completion of a subtopic (`<topic>-sub-<index>`)
    Toggle {
        roadmap: RoadmapId,
        subtopic: SubtopicId,
    },
    /// Save a note on a subtopic; an empty note clears it
    Note {
        roadmap: RoadmapId,
        subtopic: SubtopicId,
        text: String,
    },
    /// Mark every subtopic of a roadmap complete
    CompleteAll { roadmap: RoadmapId },
    /// Delete all progress on a roadmap
    Reset { roadmap: RoadmapId },
    /// Statistics, goals, achievements and recent activity
    Profile,
    /// Write progress and statistics to a JSON file
    Export {
        /// Output file; defaults to `learning-progress-<date>.json`
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// PDF notes and videos attached to a roadmap
    Resources { roadmap: RoadmapId },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn api_config(cli: &Cli) -> Result<ApiConfig, api::ApiError> {
    let credentials = cli.token.clone().and_then(Credentials::bearer);
    if credentials.is_none() {
        tracing::warn!("no API token configured; requests will be unauthenticated");
    }
    Ok(ApiConfig::new(&cli.api_url)?
        .with_credentials(credentials)
        .with_timeout(Duration::from_secs(cli.timeout_secs.max(1))))
}

/// Read screens render empty content on fetch failure; an expired session
/// still aborts so the user knows to sign in again.
fn or_empty<T>(
    result: Result<T, ServiceError>,
    what: &'static str,
    empty: impl FnOnce() -> T,
) -> Result<T, ServiceError> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if err.is_unauthorized() => Err(err),
        Err(err) => {
            tracing::error!(error = %err, "failed to load {what}");
            Ok(empty())
        }
    }
}

/// `None` when the detail could not be fetched.
async fn fetch_detail(
    services: &AppServices,
    roadmap: &RoadmapId,
) -> Result<Option<RoadmapDetail>, ServiceError> {
    or_empty(
        services.roadmaps().detail(roadmap).await.map(Some),
        "roadmap",
        || None,
    )
}

/// Outer `None` when the fetch failed, inner `None` when there are no resources.
async fn fetch_resources(
    services: &AppServices,
    roadmap: &RoadmapId,
) -> Result<Option<Option<RoadmapResources>>, ServiceError> {
    or_empty(
        services.resources().load(roadmap).await.map(Some),
        "resources",
        || None,
    )
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let clock = Clock::system();
    let services = AppServices::http(api_config(&cli)?, clock)?;

    match cli.command {
        Command::Dashboard { search } => {
            let dashboard = or_empty(
                services.dashboard().load(&search).await,
                "dashboard",
                Dashboard::default,
            )?;
            render::dashboard(&dashboard);
        }
        Command::List { category } => {
            let cards = or_empty(
                services.roadmaps().category_cards(category).await,
                "roadmaps",
                Vec::new,
            )?;
            println!("{}", category.label());
            render::cards(&cards);
        }
        Command::Show { roadmap } => {
            if let Some(detail) = fetch_detail(&services, &roadmap).await? {
                render::detail(&detail);
            }
        }
        Command::Toggle { roadmap, subtopic } => {
            let roadmaps = services.roadmaps();
            let record = roadmaps.toggle(&roadmap, &subtopic).await?;
            let state = if record.is_completed(&subtopic) {
                "completed"
            } else {
                "not completed"
            };
            println!("{subtopic}: {state}");
            let detail = roadmaps.detail(&roadmap).await?;
            println!("{}: {}%", detail.roadmap.title, detail.percent);
        }
        Command::Note {
            roadmap,
            subtopic,
            text,
        } => {
            let record = services
                .roadmaps()
                .save_note(&roadmap, &subtopic, &text)
                .await?;
            match record.note(&subtopic) {
                Some(_) => println!("note saved for {subtopic}"),
                None => println!("note cleared for {subtopic}"),
            }
        }
        Command::CompleteAll { roadmap } => {
            let roadmaps = services.roadmaps();
            let detail = roadmaps.detail(&roadmap).await?;
            let record = roadmaps.mark_all_complete(&detail.roadmap).await?;
            let detail = detail.with_progress(record);
            println!("{}: {}%", detail.roadmap.title, detail.percent);
        }
        Command::Reset { roadmap } => {
            services.roadmaps().reset(&roadmap).await?;
            println!("progress on {roadmap} reset");
        }
        Command::Profile => {
            let profile = or_empty(services.profile().load().await, "profile", || {
                Profile::from_snapshot(&Catalog::default(), &[], clock.now())
            })?;
            render::profile(&profile);
        }
        Command::Export { out, name, email } => {
            let user = UserInfo {
                name,
                email,
                joined_date: None,
            };
            let export = services.profile().export(&user).await?;
            let path = out.unwrap_or_else(|| PathBuf::from(&export.file_name));
            std::fs::write(&path, export.contents)?;
            tracing::info!(path = %path.display(), "export written");
            println!("{}", path.display());
        }
        Command::Resources { roadmap } => match fetch_resources(&services, &roadmap).await? {
            Some(Some(resources)) => render::resources(&resources),
            Some(None) => println!("{roadmap} has no learning resources"),
            None => {}
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
