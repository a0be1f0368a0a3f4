use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use nido::api::ApiClient;
use nido::commands;
use nido::config::Config;
use nido::consts;
use nido::nursery::NurseryApi;
use nido::session::SqliteSessionStore;

#[derive(Parser)]
#[command(name = "nido", version, about = "Your nursery, on the console.")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// SQLite database path for session and config (use :memory: for ephemeral)
    #[arg(long)]
    db: Option<String>,

    /// Override the API base URL for this invocation
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with a parent or admin account
    Login {
        #[arg(short, long)]
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Create a parent account
    Signup {
        name: String,
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Show the current session
    Whoami,
    /// Children enrolled at the nursery
    Children {
        #[command(subcommand)]
        action: ChildrenCmd,
    },
    /// Classrooms and their teachers
    Classrooms {
        #[command(subcommand)]
        action: ClassroomsCmd,
    },
    /// Teaching staff
    Teachers {
        #[command(subcommand)]
        action: TeachersCmd,
    },
    /// Tuition payments
    Payments {
        #[command(subcommand)]
        action: PaymentsCmd,
    },
    /// Daily, progress, and attendance reports
    Reports {
        #[command(subcommand)]
        action: ReportsCmd,
    },
    /// Upload a document, optionally attached to a child
    Upload {
        file: PathBuf,
        #[arg(long)]
        child: Option<i64>,
    },
    /// Get or set a config value (base_url, per_page)
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}

#[derive(Subcommand)]
enum ChildrenCmd {
    /// List children (first page unless --all)
    List {
        #[arg(long)]
        classroom: Option<i64>,
        #[arg(long)]
        all: bool,
    },
    /// Show one child
    Show { id: i64 },
    /// Enroll a child
    Enroll {
        name: String,
        #[arg(long)]
        birth_date: Option<String>,
        #[arg(long)]
        classroom: Option<i64>,
    },
    /// Remove a child
    Remove { id: i64 },
}

#[derive(Subcommand)]
enum ClassroomsCmd {
    List,
    Create {
        name: String,
        #[arg(long)]
        capacity: Option<u32>,
    },
    /// Put a teacher in charge of a classroom
    Assign { classroom: i64, teacher: i64 },
    Remove { id: i64 },
}

#[derive(Subcommand)]
enum TeachersCmd {
    List,
    Add {
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
    Remove { id: i64 },
}

#[derive(Subcommand)]
enum PaymentsCmd {
    /// List payments, optionally for one child
    List {
        #[arg(long)]
        child: Option<i64>,
    },
    /// Record a payment (amount in dollars, e.g. 450.00)
    Record {
        child: i64,
        amount: String,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
enum ReportsCmd {
    /// Daily reports for a child
    Daily {
        child: i64,
        #[arg(long)]
        date: Option<String>,
    },
    /// Progress reports for a child
    Progress { child: i64 },
    /// Attendance for a child in an optional date range
    Attendance {
        child: i64,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("✗ {}", commands::describe(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => {
            let path = consts::default_db_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            path.to_string_lossy().into_owned()
        }
    };

    let config = Config::open(&db_path)?;
    let session = Arc::new(SqliteSessionStore::open(&db_path)?);
    let client = ApiClient::new(config.base_url(cli.base_url.as_deref()), session);
    let api = NurseryApi::new(client.clone());
    let per_page = config.per_page();

    match cli.command {
        Command::Login { email, password } => {
            commands::auth::login(&client, &email, password).await
        }
        Command::Logout => commands::auth::logout(&client).await,
        Command::Signup {
            name,
            email,
            password,
            phone,
        } => commands::auth::signup(&client, name, email, password, phone).await,
        Command::Whoami => {
            commands::auth::whoami(&client, &db_path);
            Ok(())
        }
        Command::Children { action } => match action {
            ChildrenCmd::List { classroom, all } => {
                commands::children::list(&api, classroom, all, per_page).await
            }
            ChildrenCmd::Show { id } => commands::children::show(&api, id).await,
            ChildrenCmd::Enroll {
                name,
                birth_date,
                classroom,
            } => commands::children::enroll(&api, name, birth_date, classroom).await,
            ChildrenCmd::Remove { id } => commands::children::remove(&api, id).await,
        },
        Command::Classrooms { action } => match action {
            ClassroomsCmd::List => commands::classrooms::list(&api, per_page).await,
            ClassroomsCmd::Create { name, capacity } => {
                commands::classrooms::create(&api, name, capacity).await
            }
            ClassroomsCmd::Assign { classroom, teacher } => {
                commands::classrooms::assign(&api, classroom, teacher).await
            }
            ClassroomsCmd::Remove { id } => commands::classrooms::remove(&api, id).await,
        },
        Command::Teachers { action } => match action {
            TeachersCmd::List => commands::teachers::list(&api, per_page).await,
            TeachersCmd::Add { name, email } => commands::teachers::add(&api, name, email).await,
            TeachersCmd::Remove { id } => commands::teachers::remove(&api, id).await,
        },
        Command::Payments { action } => match action {
            PaymentsCmd::List { child } => commands::payments::list(&api, child, per_page).await,
            PaymentsCmd::Record {
                child,
                amount,
                note,
            } => commands::payments::record(&api, child, &amount, note).await,
        },
        Command::Reports { action } => match action {
            ReportsCmd::Daily { child, date } => commands::reports::daily(&api, child, date).await,
            ReportsCmd::Progress { child } => commands::reports::progress(&api, child).await,
            ReportsCmd::Attendance { child, from, to } => {
                commands::reports::attendance(&api, child, from, to).await
            }
        },
        Command::Upload { file, child } => commands::upload::upload(&api, &file, child).await,
        Command::Config { key, value } => show_or_set_config(&config, key, value),
    }
}

fn show_or_set_config(
    config: &Config,
    key: Option<String>,
    value: Option<String>,
) -> anyhow::Result<()> {
    match (key, value) {
        (None, _) => {
            for key in ["base_url", "per_page"] {
                if let Some(value) = config.get(key)? {
                    println!("  {key:<9} {value}");
                }
            }
            Ok(())
        }
        (Some(key), None) => {
            match config.get(&key)? {
                Some(value) => println!("{value}"),
                None => println!("(unset)"),
            }
            Ok(())
        }
        (Some(key), Some(value)) => config.set(&key, &value),
    }
}
