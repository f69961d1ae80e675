//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Recipe API - accounts, tags, ingredients and recipes over HTTP
#[derive(Parser, Debug)]
#[command(name = "recipe-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Create a superuser account
    CreateSuperuser(CreateSuperuserArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (defaults to SERVER_HOST)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Keep all data in process memory instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the create-superuser command
#[derive(Parser, Debug)]
pub struct CreateSuperuserArgs {
    /// Login email
    #[arg(short, long)]
    pub email: String,

    /// Password; without one the account can only be used after a reset
    #[arg(short, long, env = "SUPERUSER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Display name
    #[arg(short, long, default_value = "")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["recipe-api", "serve", "--port", "8080", "--in-memory"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
                assert!(args.in_memory);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_create_superuser() {
        let cli = Cli::parse_from([
            "recipe-api",
            "-v",
            "create-superuser",
            "--email",
            "admin@example.com",
            "--name",
            "Admin",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::CreateSuperuser(args) => {
                assert_eq!(args.email, "admin@example.com");
                assert_eq!(args.name, "Admin");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
