use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gamestack::net::types::NewUserGame;
use gamestack::router::{RouteError, RouteName};
use gamestack::{ApiError, ClientConfig, GameStack};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not logged in; run `gamestack login` first")]
    LoginRequired,
    #[error("already logged in; run `gamestack logout` first")]
    AlreadyLoggedIn,
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("[{code}] {0}", code = .0.error_code())]
    Api(#[from] ApiError),
    #[error("invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gamestack", about = "GameStack game library client")]
struct Cli {
    #[arg(long, env = "GAMESTACK_API_URL")]
    base_url: Option<String>,

    #[arg(long, env = "GAMESTACK_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account.
    Register(CredentialArgs),
    /// Sign in and persist the session.
    Login(CredentialArgs),
    /// Drop the persisted session.
    Logout,
    /// Show whether a session is active.
    Status,
    /// Run the route guard for a path and print where it lands.
    Navigate { path: String },
    /// Search the catalog.
    Search { query: String },
    Game(GameCommand),
    Library(LibraryCommand),
}

#[derive(Args, Debug)]
struct CredentialArgs {
    username: String,
    #[arg(long, env = "GAMESTACK_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct GameCommand {
    #[command(subcommand)]
    command: GameSubcommand,
}

#[derive(Subcommand, Debug)]
enum GameSubcommand {
    Details { id: i64 },
    Trailers { id: i64 },
    Screenshots { id: i64 },
}

#[derive(Args, Debug)]
struct LibraryCommand {
    #[command(subcommand)]
    command: LibrarySubcommand,
}

#[derive(Subcommand, Debug)]
enum LibrarySubcommand {
    List,
    Add {
        api_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        release_date: Option<String>,
        #[arg(long)]
        image_path: Option<String>,
        #[arg(long)]
        platform_id: Option<i64>,
    },
    Remove {
        id: i64,
    },
    Platforms,
    SetPlatform {
        id: i64,
        platform_id: i64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.base_url {
        config = config.with_api_url(url);
    }
    if let Some(path) = cli.session_file {
        config = config.with_session_file(path);
    }
    let mut app = GameStack::from_config(&config)?;

    match cli.command {
        Command::Register(args) => {
            enter(&mut app, "/register", RouteName::Register)?;
            let user = app.auth.register(&args.username, &args.password).await?;
            print_json(&user)
        }
        Command::Login(args) => {
            enter(&mut app, "/login", RouteName::Login)?;
            app.auth.login(&args.username, &args.password).await?;
            println!("logged in as {} (user id {})", args.username, app.session().user_id().unwrap_or_default());
            Ok(())
        }
        Command::Logout => {
            app.logout();
            println!("logged out");
            Ok(())
        }
        Command::Status => {
            let session = app.session().snapshot();
            print_json(&serde_json::json!({
                "authenticated": session.is_authenticated(),
                "userId": session.user_id,
            }))
        }
        Command::Navigate { path } => {
            let nav = app.navigate(&path)?;
            print_json(&serde_json::json!({
                "requested": nav.requested,
                "route": nav.location.name.as_str(),
                "path": nav.location.path,
                "params": nav.location.params,
                "redirected": nav.redirected,
            }))
        }
        Command::Search { query } => {
            enter(&mut app, "/search", RouteName::Search)?;
            print_json(&app.games.search_games(&query).await?)
        }
        Command::Game(game) => run_game(&mut app, game).await,
        Command::Library(library) => run_library(&mut app, library).await,
    }
}

async fn run_game(app: &mut GameStack, game: GameCommand) -> Result<(), CliError> {
    match game.command {
        GameSubcommand::Details { id } => {
            enter(app, &format!("/games/{id}"), RouteName::GameDetails)?;
            print_json(&app.games.game_details(id).await?)
        }
        GameSubcommand::Trailers { id } => {
            enter(app, &format!("/games/{id}"), RouteName::GameDetails)?;
            print_json(&app.games.game_trailers(id).await?)
        }
        GameSubcommand::Screenshots { id } => {
            enter(app, &format!("/games/{id}"), RouteName::GameDetails)?;
            print_json(&app.games.game_screenshots(id).await?)
        }
    }
}

async fn run_library(app: &mut GameStack, library: LibraryCommand) -> Result<(), CliError> {
    enter(app, "/library", RouteName::Library)?;
    match library.command {
        LibrarySubcommand::List => print_json(&app.collection.user_collection().await?),
        LibrarySubcommand::Add { api_id, title, release_date, image_path, platform_id } => {
            let game = NewUserGame { api_id, title, release_date, image_path, platform_id };
            print_json(&app.collection.add_game(&game).await?)
        }
        LibrarySubcommand::Remove { id } => {
            app.collection.remove_game(id).await?;
            println!("removed {id}");
            Ok(())
        }
        LibrarySubcommand::Platforms => print_json(&app.collection.all_platforms().await?),
        LibrarySubcommand::SetPlatform { id, platform_id } => {
            print_json(&app.collection.update_game_platform(id, platform_id).await?)
        }
    }
}

/// Navigate to the view backing a command; refuse if the guard sends the
/// user elsewhere.
fn enter(app: &mut GameStack, path: &str, expected: RouteName) -> Result<(), CliError> {
    let nav = app.navigate(path)?;
    if nav.location.name == expected {
        return Ok(());
    }
    match nav.location.name {
        RouteName::Login => Err(CliError::LoginRequired),
        _ => Err(CliError::AlreadyLoggedIn),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
