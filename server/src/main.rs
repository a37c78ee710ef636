use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use directory_server::{AppConfig, AppState, ServeConfig, http};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::{EmployeeId, EmployeePatch, NewEmployee, Patch};
use products_hr_client::EmployeeClient;
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "directory-server", version, about = "Employee directory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API.
    Serve(ServeCommand),
    /// Manage employees on a running server.
    Employees(EmployeesCommand),
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,
    #[arg(long, help = "Start with an empty directory instead of the demo employees")]
    empty: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[derive(Args, Debug)]
struct EmployeesCommand {
    #[arg(
        long,
        env = "DIRECTORY_API_URL",
        default_value = "http://localhost:3001"
    )]
    api_url: String,
    #[command(subcommand)]
    action: EmployeeAction,
}

#[derive(Subcommand, Debug)]
enum EmployeeAction {
    /// List employees, optionally filtered by name, position, department or email.
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one employee.
    Get { id: EmployeeId },
    /// Add an employee.
    Create(CreateArgs),
    /// Change fields of an employee; omitted flags keep their value.
    Update {
        id: EmployeeId,
        #[command(flatten)]
        fields: UpdateArgs,
    },
    /// Remove an employee.
    Delete { id: EmployeeId },
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    position: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    hire_date: Option<String>,
}

impl From<CreateArgs> for NewEmployee {
    fn from(args: CreateArgs) -> Self {
        NewEmployee {
            phone: args.phone,
            hire_date: args.hire_date,
            ..NewEmployee::new(args.name, args.email, args.position, args.department)
        }
    }
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long, help = "Pass an empty string to clear the phone number")]
    phone: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    hire_date: Option<String>,
}

impl From<UpdateArgs> for EmployeePatch {
    fn from(args: UpdateArgs) -> Self {
        EmployeePatch {
            name: Patch::from(args.name),
            email: Patch::from(args.email),
            position: Patch::from(args.position),
            department: Patch::from(args.department),
            phone: Patch::from(args.phone),
            hire_date: Patch::from(args.hire_date),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(cmd) => {
            let _obs = init_tracing(ObsConfig::default())?;
            run_server(cmd).await
        }
        Command::Employees(cmd) => {
            let _obs = init_tracing(ObsConfig {
                ansi: false,
                ..ObsConfig::new("directory-cli").with_env_filter("warn")
            })?;
            run_employees(cmd).await
        }
    }
}

async fn run_server(cmd: ServeCommand) -> Result<()> {
    let mut config = AppConfig::load()?;
    if cmd.empty {
        config.seed_demo_data = false;
    }
    info!(seeded = config.seed_demo_data, "initializing employee directory");
    let state = AppState::from_config(config);
    http::serve((&cmd).into(), state).await
}

async fn run_employees(cmd: EmployeesCommand) -> Result<()> {
    let client = EmployeeClient::new(&cmd.api_url);
    match cmd.action {
        EmployeeAction::List { search } => {
            let employees = match search {
                Some(term) => client.search(&term).await?,
                None => client.list().await?,
            };
            print_json(&employees)
        }
        EmployeeAction::Get { id } => print_json(&client.get(id).await?),
        EmployeeAction::Create(args) => print_json(&client.create(&args.into()).await?),
        EmployeeAction::Update { id, fields } => {
            print_json(&client.update(id, &fields.into()).await?)
        }
        EmployeeAction::Delete { id } => print_json(&client.delete(id).await?),
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
