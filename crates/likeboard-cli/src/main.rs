use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use likeboard_core::marketer::DirectoryFilter;
use std::path::PathBuf;
use std::process::ExitCode;

mod app;
mod commands;
mod render;
mod terminal;

use app::App;

#[derive(Parser)]
#[command(name = "likeboard")]
#[command(about = "Likeboard CLI - browse marketers and hand out your likes", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/likeboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, overrides config and LIKEBOARD_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account with an invitation code
    Register {
        #[arg(long)]
        invitation_code: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long, default_value = "")]
        bio: String,
        /// Image file used as profile picture
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
    /// Check an invitation code before registering
    ValidateInvitation { code: String },
    /// End the current session
    Logout,
    /// Show the signed-in profile
    Whoami,
    /// List marketers
    Marketers {
        #[arg(long, default_value = "all")]
        filter: DirectoryFilter,
        #[arg(long)]
        search: Option<String>,
        /// Like this marketer before listing
        #[arg(long, value_name = "ID")]
        like: Option<i64>,
    },
    /// Show one marketer's profile
    Show { id: i64 },
    /// Give a like
    Like { id: i64 },
    /// Withdraw a like
    Unlike { id: i64 },
    /// List the likes you have given
    Likes,
    /// Show detailed like statistics
    Stats,
    /// Show the marketer ranking
    Ranking {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Reset every like (admin only)
    Reset,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", format!("Error: {:#}", err).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = app::load_config(cli.config, cli.api_url)?;
    app::init_logging(&config.logging.level);
    let app = App::build(config)?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&app, email, password).await,
        Commands::Register {
            invitation_code,
            first_name,
            last_name,
            email,
            password,
            confirm_password,
            bio,
            avatar,
        } => {
            let form = commands::auth::RegisterArgs {
                invitation_code,
                first_name,
                last_name,
                email,
                password,
                confirm_password,
                bio,
                avatar,
            };
            commands::auth::register(&app, form).await
        }
        Commands::ValidateInvitation { code } => {
            commands::auth::validate_invitation(&app, &code).await
        }
        Commands::Logout => commands::auth::logout(&app).await,
        Commands::Whoami => commands::auth::whoami(&app).await,
        Commands::Marketers {
            filter,
            search,
            like,
        } => commands::directory::list(&app, filter, search, like).await,
        Commands::Show { id } => commands::directory::show(&app, id).await,
        Commands::Like { id } => commands::likes::like(&app, id).await,
        Commands::Unlike { id } => commands::likes::unlike(&app, id).await,
        Commands::Likes => commands::likes::given(&app).await,
        Commands::Stats => commands::likes::stats(&app).await,
        Commands::Ranking { limit } => commands::likes::ranking(&app, limit).await,
        Commands::Reset => commands::likes::reset(&app).await,
    }
}
