use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use vanslot::cli::{self, OutputFormat};
use vanslot::DEFAULT_SLOT_INTERVAL_MINUTES;

#[derive(Parser)]
#[command(name = "vanslot")]
#[command(about = "Van rental availability engine", version)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show an office's effective opening hours on a date
    Hours {
        /// Path to the office document (JSON)
        #[arg(long)]
        office: PathBuf,
        /// Date to query (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// List selectable pickup or return times for a date
    Slots {
        /// Path to the office document (JSON)
        #[arg(long)]
        office: PathBuf,
        /// Date to query (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Booking side: pickup or return
        #[arg(long, default_value = "pickup")]
        role: String,
        /// Path to existing reservations (JSON array)
        #[arg(long)]
        reservations: Option<PathBuf>,
        /// Slot interval in minutes
        #[arg(long, default_value_t = DEFAULT_SLOT_INTERVAL_MINUTES)]
        interval: u32,
    },
    /// Validate a prospective booking and report extension fees
    Check {
        /// Path to the office document (JSON)
        #[arg(long)]
        office: PathBuf,
        /// Pickup date (YYYY-MM-DD)
        #[arg(long)]
        pickup_date: String,
        /// Pickup time (HH:MM)
        #[arg(long)]
        pickup_time: String,
        /// Return date (YYYY-MM-DD)
        #[arg(long)]
        return_date: String,
        /// Return time (HH:MM)
        #[arg(long)]
        return_time: String,
        /// Driver age in years
        #[arg(long)]
        age: u8,
        /// Path to existing reservations (JSON array)
        #[arg(long)]
        reservations: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vanslot=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Hours { office, date } => {
            cli::run_hours(&office, &date, format)?;
        }
        Commands::Slots {
            office,
            date,
            role,
            reservations,
            interval,
        } => {
            cli::run_slots(
                &office,
                &date,
                &role,
                reservations.as_deref(),
                interval,
                format,
            )
            .await?;
        }
        Commands::Check {
            office,
            pickup_date,
            pickup_time,
            return_date,
            return_time,
            age,
            reservations,
        } => {
            cli::run_check(
                &office,
                &pickup_date,
                &pickup_time,
                &return_date,
                &return_time,
                age,
                reservations.as_deref(),
                format,
            )?;
        }
    }

    Ok(())
}
