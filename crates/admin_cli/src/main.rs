use std::error::Error;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{BankNew, DepositNew, Engine, MasjidGetQuery, MasjidNew};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "minar_admin")]
#[command(about = "Admin utilities for Minar (seed/browse the masjid directory)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./minar.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert the sample directory rows. Safe to run repeatedly.
    Seed,
    Masjid(Masjid),
    Bank(Bank),
    Deposit(Deposit),
}

#[derive(Args, Debug)]
struct Masjid {
    #[command(subcommand)]
    command: MasjidCommand,
}

#[derive(Subcommand, Debug)]
enum MasjidCommand {
    Create(MasjidCreateArgs),
    Show(MasjidShowArgs),
}

#[derive(Args, Debug)]
struct MasjidCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    zip_code: String,
    #[arg(long, default_value = "USA")]
    country: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    website: Option<String>,
}

#[derive(Args, Debug)]
struct MasjidShowArgs {
    #[arg(long)]
    id: String,
}

#[derive(Args, Debug)]
struct Bank {
    #[command(subcommand)]
    command: BankCommand,
}

#[derive(Subcommand, Debug)]
enum BankCommand {
    Add(BankAddArgs),
}

#[derive(Args, Debug)]
struct BankAddArgs {
    #[arg(long)]
    masjid_id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    account_number: String,
    #[arg(long)]
    routing_number: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    zip_code: String,
    #[arg(long, default_value = "USA")]
    country: String,
}

#[derive(Args, Debug)]
struct Deposit {
    #[command(subcommand)]
    command: DepositCommand,
}

#[derive(Subcommand, Debug)]
enum DepositCommand {
    Add(DepositAddArgs),
}

#[derive(Args, Debug)]
struct DepositAddArgs {
    #[arg(long)]
    bank_id: String,
    /// Amount in minor units (cents).
    #[arg(long)]
    amount_minor: i64,
    #[arg(long)]
    description: Option<String>,
    /// Deposit date as YYYY-MM-DD.
    #[arg(long)]
    date: String,
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| format!("invalid date {raw}: {err}"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("invalid date {raw}"))?;
    Ok(midnight.and_utc())
}

fn format_amount_minor(amount_minor: i64) -> String {
    format!("${}.{:02}", amount_minor / 100, (amount_minor % 100).abs())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build();

    match cli.command {
        Command::Seed => {
            let report = engine.seed().await?;
            println!(
                "seeded: {} masjids, {} banks, {} deposits",
                report.masjids, report.banks, report.deposits
            );
        }
        Command::Masjid(Masjid {
            command: MasjidCommand::Create(args),
        }) => {
            let masjid = engine
                .create_masjid(MasjidNew {
                    name: args.name,
                    address: args.address,
                    city: args.city,
                    state: args.state,
                    zip_code: args.zip_code,
                    country: args.country,
                    phone: args.phone,
                    email: args.email,
                    website: args.website,
                })
                .await?;
            println!("created masjid: {} ({})", masjid.name, masjid.id);
        }
        Command::Masjid(Masjid {
            command: MasjidCommand::Show(args),
        }) => {
            let Some(masjid) = engine
                .masjid_with_banks(&MasjidGetQuery::by_id(args.id.clone()))
                .await?
            else {
                eprintln!("masjid not found: {}", args.id);
                std::process::exit(1);
            };

            println!("{} ({})", masjid.name, masjid.id);
            for bank in &masjid.banks {
                match &bank.latest_deposit {
                    Some(deposit) => println!(
                        "  {} ({}) - last deposit {} on {}",
                        bank.name,
                        bank.account_number,
                        format_amount_minor(deposit.amount_minor),
                        deposit.deposit_date.format("%Y-%m-%d")
                    ),
                    None => println!("  {} ({}) - no deposits yet", bank.name, bank.account_number),
                }
            }
        }
        Command::Bank(Bank {
            command: BankCommand::Add(args),
        }) => {
            let bank = engine
                .create_bank(BankNew {
                    masjid_id: args.masjid_id,
                    name: args.name,
                    account_number: args.account_number,
                    routing_number: args.routing_number,
                    address: args.address,
                    city: args.city,
                    state: args.state,
                    zip_code: args.zip_code,
                    country: args.country,
                })
                .await?;
            println!("created bank: {} ({})", bank.name, bank.id);
        }
        Command::Deposit(Deposit {
            command: DepositCommand::Add(args),
        }) => {
            let deposit_date = match parse_date(&args.date) {
                Ok(date) => date,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };

            let deposit = engine
                .create_deposit(DepositNew {
                    bank_id: args.bank_id,
                    amount_minor: args.amount_minor,
                    description: args.description,
                    deposit_date,
                })
                .await?;
            println!(
                "created deposit: {} on {} ({})",
                format_amount_minor(deposit.amount_minor),
                deposit.deposit_date.format("%Y-%m-%d"),
                deposit.id
            );
        }
    }

    Ok(())
}
