//! Taskline CLI binary entry point.

use clap::Parser;
use taskline::cli::{AuthCommands, Cli, Commands, TaskCommands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "taskline=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Auth(auth_args) => match auth_args.command {
            AuthCommands::Login(args) => {
                taskline::cli::auth::handle_login(&args.email, &args.password).await
            }
            AuthCommands::Status => taskline::cli::auth::handle_status().await,
            AuthCommands::Logout => taskline::cli::auth::handle_logout().await,
        },
        Commands::Tasks(task_args) => match task_args.command {
            TaskCommands::List => taskline::cli::tasks::handle_list().await,
            TaskCommands::Add(args) => {
                taskline::cli::tasks::handle_add(
                    &args.title,
                    args.description.as_deref(),
                    args.priority,
                )
                .await
            }
            TaskCommands::Done(args) => taskline::cli::tasks::handle_done(&args.id).await,
            TaskCommands::Rm(args) => taskline::cli::tasks::handle_rm(&args.id).await,
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
