//! Command-line shell over the cinelog clients: account lifecycle,
//! watchlist CRUD, and TMDB browsing.

use clap::{Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;

use cinelog_api::backend::BackendClient;
use cinelog_api::tmdb::TmdbClient;
use cinelog_app::{ListState, RouteDecision, RouteGuard, WatchlistModel};
use cinelog_core::config::AppConfig;
use cinelog_core::models::{ItemDraft, ItemFilter, MediaKind, PosterFile, TrendWindow};
use cinelog_core::session::FileTokenStore;
use cinelog_core::Session;

#[derive(Parser)]
#[command(name = "cinelog", about = "Track movies and TV shows", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Movie,
    Tv,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => MediaKind::Movie,
            KindArg::Tv => MediaKind::Tv,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum WindowArg {
    Day,
    Week,
}

impl From<WindowArg> for TrendWindow {
    fn from(window: WindowArg) -> Self {
        match window {
            WindowArg::Day => TrendWindow::Day,
            WindowArg::Week => TrendWindow::Week,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Create an account.
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Log in and store the session token.
    Login { email: String, password: String },
    /// Clear the stored session.
    Logout,
    /// Show whether a session is active.
    Whoami,
    /// List the watchlist, optionally filtered.
    List {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        genre: Option<String>,
    },
    /// Show one watchlist entry.
    Show { id: i64 },
    /// Add a watchlist entry.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        /// Path to a poster image to upload.
        #[arg(long)]
        poster: Option<std::path::PathBuf>,
    },
    /// Replace the editable fields of an entry.
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        poster: Option<std::path::PathBuf>,
    },
    /// Delete an entry.
    Remove { id: i64 },
    /// Trending titles.
    Trending {
        #[arg(long, value_enum, default_value = "movie")]
        kind: KindArg,
        #[arg(long, value_enum, default_value = "week")]
        window: WindowArg,
    },
    /// Popular titles.
    Popular {
        #[arg(long, value_enum, default_value = "movie")]
        kind: KindArg,
    },
    /// Available genres.
    Genres {
        #[arg(long, value_enum, default_value = "movie")]
        kind: KindArg,
    },
    /// Supported languages.
    Languages,
    /// Search titles.
    Search {
        query: String,
        #[arg(long, value_enum, default_value = "movie")]
        kind: KindArg,
    },
    /// Full details for one title, with cast and trailers.
    Details {
        id: u64,
        #[arg(long, value_enum, default_value = "movie")]
        kind: KindArg,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "cinelog=info".into()))
        .init();

    let cli = Cli::parse();
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => fail(&format!("could not load config: {e}")),
    };

    let session = Session::new(FileTokenStore::new());
    let backend = BackendClient::new(config.backend.base_url.clone(), session.clone());
    let guard = RouteGuard::new(session.clone());
    let cancel = CancellationToken::new();

    match cli.command {
        Command::Register {
            username,
            email,
            password,
        } => match backend.register(&username, &email, &password).await {
            Ok(()) => println!("registered; you can now log in"),
            Err(e) => fail(&e.user_message()),
        },
        Command::Login { email, password } => match backend.login(&email, &password).await {
            Ok(token) => {
                session.login(token);
                println!("logged in as {email}");
            }
            Err(e) => fail(&e.user_message()),
        },
        Command::Logout => {
            session.logout();
            println!("logged out");
        }
        Command::Whoami => {
            if session.is_authenticated() {
                println!("logged in");
            } else {
                println!("not logged in");
            }
        }
        Command::List { name, genre } => {
            require_session(&guard);
            let mut model = WatchlistModel::new(backend);
            model.load(ItemFilter { name, genre }, &cancel).await;
            match model.state() {
                ListState::Loaded(items) if items.is_empty() => println!("watchlist is empty"),
                ListState::Loaded(items) => {
                    for item in items {
                        let genre = item.genre.as_deref().unwrap_or("-");
                        println!("{:>4}  {}  [{}]", item.id, item.name, genre);
                    }
                }
                ListState::Failed(msg) => fail(msg),
                _ => unreachable!("load always leaves Loaded or Failed"),
            }
        }
        Command::Show { id } => {
            require_session(&guard);
            match backend.get_item(id).await {
                Ok(item) => {
                    println!("{}  (#{})", item.name, item.id);
                    println!("{}", item.description);
                    if let Some(genre) = &item.genre {
                        println!("genre: {genre}");
                    }
                    if let Some(link) = &item.link {
                        println!("link: {link}");
                    }
                    if let Some(poster) = &item.poster_url {
                        println!("poster: {poster}");
                    }
                }
                Err(e) => fail(&e.user_message()),
            }
        }
        Command::Add {
            name,
            description,
            link,
            genre,
            poster,
        } => {
            require_session(&guard);
            let draft = draft_from_args(name, description, link, genre, poster);
            let model = WatchlistModel::new(backend);
            match model.add(&draft).await {
                Ok(item) => println!("added #{}: {}", item.id, item.name),
                Err(msg) => fail(&msg),
            }
        }
        Command::Update {
            id,
            name,
            description,
            link,
            genre,
            poster,
        } => {
            require_session(&guard);
            let draft = draft_from_args(name, description, link, genre, poster);
            let model = WatchlistModel::new(backend);
            match model.update(id, &draft).await {
                Ok(item) => println!("updated #{}: {}", item.id, item.name),
                Err(msg) => fail(&msg),
            }
        }
        Command::Remove { id } => {
            require_session(&guard);
            let mut model = WatchlistModel::new(backend);
            match model.remove(id, &cancel).await {
                Ok(()) => println!("removed #{id}"),
                Err(msg) => fail(&msg),
            }
        }
        Command::Trending { kind, window } => {
            let tmdb = TmdbClient::new(&config.tmdb);
            match tmdb.trending(kind.into(), window.into()).await {
                Ok(results) => print_summaries(&results),
                Err(e) => fail(&e.user_message()),
            }
        }
        Command::Popular { kind } => {
            let tmdb = TmdbClient::new(&config.tmdb);
            match tmdb.popular(kind.into()).await {
                Ok(results) => print_summaries(&results),
                Err(e) => fail(&e.user_message()),
            }
        }
        Command::Genres { kind } => {
            let tmdb = TmdbClient::new(&config.tmdb);
            match tmdb.genres(kind.into()).await {
                Ok(genres) => {
                    for genre in genres {
                        println!("{:>6}  {}", genre.id, genre.name);
                    }
                }
                Err(e) => fail(&e.user_message()),
            }
        }
        Command::Languages => {
            let tmdb = TmdbClient::new(&config.tmdb);
            match tmdb.languages().await {
                Ok(languages) => {
                    for lang in languages {
                        println!("{}  {}", lang.iso_639_1, lang.english_name);
                    }
                }
                Err(e) => fail(&e.user_message()),
            }
        }
        Command::Search { query, kind } => {
            let tmdb = TmdbClient::new(&config.tmdb);
            match tmdb.search(kind.into(), &query).await {
                Ok(results) => print_summaries(&results),
                Err(e) => fail(&e.user_message()),
            }
        }
        Command::Details { id, kind } => {
            let tmdb = TmdbClient::new(&config.tmdb);
            let kind: MediaKind = kind.into();
            match tmdb.details(kind, id).await {
                Ok(detail) => {
                    println!("{}  ({})", detail.display_title(), kind);
                    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
                        println!("“{tagline}”");
                    }
                    if let Some(overview) = &detail.overview {
                        println!("{overview}");
                    }
                    if !detail.genres.is_empty() {
                        let names: Vec<_> =
                            detail.genres.iter().map(|g| g.name.as_str()).collect();
                        println!("genres: {}", names.join(", "));
                    }
                }
                Err(e) => fail(&e.user_message()),
            }
            // Cast and trailers are independent fetches; either may fail
            // without taking the details down with it.
            if let Ok(cast) = tmdb.credits(kind, id).await {
                let top: Vec<_> = cast.iter().take(5).map(|c| c.name.as_str()).collect();
                if !top.is_empty() {
                    println!("cast: {}", top.join(", "));
                }
            }
            if let Ok(videos) = tmdb.videos(kind, id).await {
                for video in videos.iter().filter(|v| v.is_youtube_trailer()) {
                    println!("trailer: https://www.youtube.com/watch?v={}", video.key);
                }
            }
        }
    }
}

fn draft_from_args(
    name: String,
    description: String,
    link: Option<String>,
    genre: Option<String>,
    poster: Option<std::path::PathBuf>,
) -> ItemDraft {
    let poster = poster.map(|path| {
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => fail(&format!("could not read poster {}: {e}", path.display())),
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "poster".into());
        PosterFile { file_name, bytes }
    });
    ItemDraft {
        name,
        description,
        link,
        genre,
        poster,
    }
}

fn print_summaries(results: &[cinelog_api::tmdb::MediaSummary]) {
    for summary in results {
        let year = summary.release_year().unwrap_or("----");
        let rating = summary
            .vote_average
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| "-".into());
        println!(
            "{:>8}  {}  ({year})  ★ {rating}",
            summary.id,
            summary.display_title()
        );
    }
}

/// Protected commands go through the guard first; unauthenticated use
/// lands back on the login hint instead of hitting the backend.
fn require_session(guard: &RouteGuard) {
    if guard.decide() == RouteDecision::RedirectToLanding {
        fail("not logged in; run `cinelog login <email> <password>` first");
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}
