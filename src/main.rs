use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskpro::api::ApiClient;
use taskpro::commands;
use taskpro::config::Config;
use taskpro::session;

#[derive(Parser)]
#[command(name = "taskpro")]
#[command(about = "A command-line client for the TaskPro task manager")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, env = "TASKPRO_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with an existing account
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create a new account
    Register {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Confirm the emailed 4-digit verification code
    Verify {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// 4-digit verification code
        #[arg(short, long)]
        code: String,
    },

    /// Resend the verification code
    Resend {
        /// Account email
        #[arg(short, long)]
        email: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(short, long)]
        description: Option<String>,
        /// Priority (high, medium, low)
        #[arg(short, long, default_value = "medium")]
        priority: String,
        /// Due date (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        due: Option<String>,
        /// Generate an AI roadmap and attach it to the task
        #[arg(long)]
        roadmap: bool,
    },

    /// List tasks
    List {
        /// Filter by status (pending, completed, all)
        #[arg(short, long, default_value = "all")]
        status: String,
    },

    /// Show task details, including any stored roadmap
    Show {
        /// Task ID
        id: i64,
    },

    /// Update a task
    Update {
        /// Task ID
        id: i64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New priority
        #[arg(short, long)]
        priority: Option<String>,
        /// New due date (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        due: Option<String>,
    },

    /// Mark a task as completed
    Complete {
        /// Task ID
        id: i64,
    },

    /// Move a completed task back to pending
    Reopen {
        /// Task ID
        id: i64,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Generate an AI roadmap without creating a task
    Roadmap {
        /// Task title
        title: String,
        /// Task description
        #[arg(short, long)]
        description: String,
        /// Target date shown to the generator
        #[arg(long)]
        due: Option<String>,
    },

    /// Poll for tasks due within 24 hours and send reminders
    Watch {
        /// Poll interval in seconds (overrides the config file)
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

fn build_client(api_url: &str) -> Result<ApiClient> {
    let mut client = ApiClient::new(api_url);
    if let Some(s) = session::load()? {
        client = client.with_token(s.token);
    }
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let api_url = cli.api_url.as_deref().unwrap_or(&config.api_url);

    match cli.command {
        Commands::Login { email, password } => {
            let api = build_client(api_url)?;
            commands::auth::login(&api, &email, password.as_deref()).await
        }

        Commands::Register {
            username,
            email,
            password,
        } => {
            let api = build_client(api_url)?;
            commands::auth::register(&api, &username, &email, password.as_deref()).await
        }

        Commands::Verify { email, code } => {
            let api = build_client(api_url)?;
            commands::auth::verify(&api, &email, &code).await
        }

        Commands::Resend { email } => {
            let api = build_client(api_url)?;
            commands::auth::resend(&api, &email).await
        }

        Commands::Logout => commands::auth::logout(),

        Commands::Whoami => commands::auth::whoami(),

        Commands::Create {
            title,
            description,
            priority,
            due,
            roadmap,
        } => {
            let api = build_client(api_url)?;
            commands::create::run(
                &api,
                &title,
                description.as_deref(),
                &priority,
                due.as_deref(),
                roadmap,
            )
            .await
        }

        Commands::List { status } => {
            let api = build_client(api_url)?;
            commands::list::run(&api, &status).await
        }

        Commands::Show { id } => {
            let api = build_client(api_url)?;
            commands::show::run(&api, id).await
        }

        Commands::Update {
            id,
            title,
            description,
            priority,
            due,
        } => {
            let api = build_client(api_url)?;
            commands::update::run(
                &api,
                id,
                title.as_deref(),
                description.as_deref(),
                priority.as_deref(),
                due.as_deref(),
            )
            .await
        }

        Commands::Complete { id } => {
            let api = build_client(api_url)?;
            commands::status::complete(&api, id).await
        }

        Commands::Reopen { id } => {
            let api = build_client(api_url)?;
            commands::status::reopen(&api, id).await
        }

        Commands::Delete { id, force } => {
            let api = build_client(api_url)?;
            commands::delete::run(&api, id, force).await
        }

        Commands::Roadmap {
            title,
            description,
            due,
        } => {
            let api = build_client(api_url)?;
            commands::roadmap::run(&api, &title, &description, due.as_deref()).await
        }

        Commands::Watch { interval } => {
            let api = build_client(api_url)?;
            commands::watch::run(api, interval.unwrap_or(config.poll_interval_secs)).await
        }
    }
}
