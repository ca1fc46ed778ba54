use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "regcache",
    about = "regcache — schema registry client with a resolution cache",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to a regcache.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Registry base URL (overrides [registry].url)
    #[arg(long, global = true)]
    url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all subjects
    Subjects,
    /// List the versions registered under a subject
    Versions { subject: String },
    /// Register a schema file under a subject
    Register {
        subject: String,
        /// File holding the schema definition
        schema: PathBuf,
        /// Schema type: AVRO, JSON or PROTOBUF
        #[arg(short = 't', long, default_value = "AVRO")]
        schema_type: String,
        /// Ask the registry to normalize the schema
        #[arg(long)]
        normalize: bool,
    },
    /// Show the latest version of a subject
    Latest { subject: String },
    /// Show one version of a subject
    Get {
        subject: String,
        version: i32,
        /// Include soft-deleted versions
        #[arg(long)]
        deleted: bool,
    },
    /// Delete a subject
    DeleteSubject {
        subject: String,
        /// Hard delete instead of soft delete
        #[arg(long)]
        permanent: bool,
    },
    /// Delete one version of a subject
    DeleteVersion {
        subject: String,
        version: i32,
        #[arg(long)]
        permanent: bool,
    },
    /// Check a schema file against the latest version of a subject
    Compat {
        subject: String,
        schema: PathBuf,
        #[arg(short = 't', long, default_value = "AVRO")]
        schema_type: String,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,regcache=debug"))?,
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref(), cli.url.as_deref())?;

    if let Commands::Config = cli.command {
        return commands::show_config(&config);
    }

    let client = commands::connect(&config)?;
    match cli.command {
        Commands::Subjects => commands::subjects::list(&client).await,
        Commands::Versions { subject } => commands::subjects::versions(&client, &subject).await,
        Commands::Register {
            subject,
            schema,
            schema_type,
            normalize,
        } => commands::schema::register(&client, &subject, &schema, &schema_type, normalize).await,
        Commands::Latest { subject } => commands::schema::latest(&client, &subject).await,
        Commands::Get {
            subject,
            version,
            deleted,
        } => commands::schema::get(&client, &subject, version, deleted).await,
        Commands::DeleteSubject { subject, permanent } => {
            commands::subjects::delete(&client, &subject, permanent).await
        }
        Commands::DeleteVersion {
            subject,
            version,
            permanent,
        } => commands::subjects::delete_version(&client, &subject, version, permanent).await,
        Commands::Compat {
            subject,
            schema,
            schema_type,
        } => commands::schema::compat(&client, &subject, &schema, &schema_type).await,
        Commands::Config => commands::show_config(&config),
    }
}
