#[macro_use]
extern crate log;

use clap::{Parser, Subcommand};
use kaizen::{
    domain::{
        entities::chapter::ChapterRecord,
        services::{catalog::CatalogService, navigation, state::ReadingStateService},
    },
    infrastructure::{
        config::Config,
        database,
        domain::repositories::{
            catalog::CatalogRepositoryImpl, storage::StorageRepositoryImpl,
        },
    },
};

#[derive(Parser)]
struct Opts {
    /// Path to config file
    #[clap(long)]
    config: Option<String>,
    #[clap(subcommand)]
    subcmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Toggle a manga in the library
    Follow { manga_id: String },
    /// List followed manga with their scanlation gap
    Library,
    /// Show the chapter feed of a manga with read markers
    Chapters { manga_id: String },
    /// Mark a chapter read and show where to go next
    Read {
        manga_id: String,
        chapter_id: String,
    },
    /// Show read chapters of a manga in read order
    History { manga_id: String },
    /// Wipe read history for every manga
    ClearHistory,
}

fn chapter_label(chapter: &ChapterRecord) -> String {
    let number = chapter.number.as_deref().unwrap_or("-");
    if chapter.title.is_empty() {
        format!("Chapter {number}")
    } else {
        format!("Chapter {number}: {}", chapter.title)
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let filters = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var("KAIZEN_LOG").map(|level| format!("kaizen={level}")))
        .unwrap_or_else(|_| "warn".to_string());
    env_logger::Builder::new().parse_filters(&filters).init();

    let opts: Opts = Opts::parse();
    let config = Config::open(opts.config)?;

    debug!("config: {:?}", config);

    let pool = database::establish_connection(&config.database_path, config.create_database).await?;

    let storage_repo = StorageRepositoryImpl::new(pool.clone());
    let mut state_svc = ReadingStateService::new(storage_repo);
    state_svc.hydrate().await;

    let catalog_repo = CatalogRepositoryImpl::new(&config.api_url, &config.language);
    let catalog_svc = CatalogService::new(catalog_repo);

    match opts.subcmd {
        Command::Follow { manga_id } => {
            if state_svc.toggle_follow(&manga_id).await {
                println!("followed {manga_id}");
            } else {
                println!("unfollowed {manga_id}");
            }
        }
        Command::Library => {
            let followed = state_svc.followed();
            if followed.is_empty() {
                println!("library is empty");
                return Ok(());
            }
            for manga_id in followed {
                match catalog_svc.fetch_manga(manga_id).await {
                    Ok(manga) => {
                        let feed = catalog_svc.fetch_chapter_feed(manga_id).await;
                        let gap = catalog_svc.gap(&manga, &feed);
                        if gap > 0.0 {
                            println!("{} [{}] behind raw by {gap:.1}", manga.title, manga.status);
                        } else {
                            println!("{} [{}] up to date", manga.title, manga.status);
                        }
                    }
                    Err(e) => {
                        warn!("failed to fetch {manga_id}: {e}");
                        println!("{manga_id} (metadata unavailable)");
                    }
                }
            }
        }
        Command::Chapters { manga_id } => {
            let manga = catalog_svc.fetch_manga(&manga_id).await?;
            let feed = catalog_svc.fetch_chapter_feed(&manga_id).await;

            println!("{} [{}]", manga.title, manga.status);
            let gap = catalog_svc.gap(&manga, &feed);
            if gap > 0.0 {
                println!("behind raw release by {gap:.1} chapters");
            }
            for chapter in &feed {
                let marker = if state_svc.is_chapter_read(&manga_id, &chapter.id) {
                    "x"
                } else {
                    " "
                };
                let group = chapter.scan_group.as_deref().unwrap_or("unknown group");
                println!(
                    "[{marker}] {}  {}  {}  {}",
                    chapter.id,
                    chapter_label(chapter),
                    chapter.published_at.format("%Y-%m-%d"),
                    group,
                );
            }
        }
        Command::Read {
            manga_id,
            chapter_id,
        } => {
            state_svc.mark_chapter_read(&manga_id, &chapter_id).await;

            let feed = catalog_svc.fetch_chapter_feed(&manga_id).await;
            let index = navigation::locate(&feed, &chapter_id);
            if index.is_none() {
                println!("chapter {chapter_id} is not in the current feed");
            }
            let neighbors = navigation::neighbors(&feed, index);
            match neighbors.predecessor {
                Some(chapter) => println!("previous: {}  {}", chapter.id, chapter_label(chapter)),
                None => println!("previous: none, this is the oldest chapter"),
            }
            match neighbors.successor {
                Some(chapter) => println!("next: {}  {}", chapter.id, chapter_label(chapter)),
                None => println!("next: none, you are caught up"),
            }
        }
        Command::History { manga_id } => {
            let chapters = state_svc.chapters_read(&manga_id);
            if chapters.is_empty() {
                println!("no chapters read for {manga_id}");
            }
            for chapter_id in chapters {
                println!("{chapter_id}");
            }
        }
        Command::ClearHistory => {
            state_svc.clear_history().await;
            println!("history cleared");
        }
    }

    Ok(())
}
