use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use spendlens_analytics::{
    category_frequency, category_totals, daily_pattern, monthly_category_breakdown,
    monthly_totals, search, top_merchants, top_spending_categories,
};
use spendlens_core::FinancialData;
use spendlens_ingest::ingest_csv_path;

mod config;
mod llm;

#[derive(Parser, Debug)]
#[command(name = "spendlens", version, about = "Bank-statement dashboard in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Income/expense totals for a statement
    Summary {
        /// Path to statement CSV
        csv: PathBuf,
    },

    /// Spending totals and transaction counts by category
    Categories {
        csv: PathBuf,
    },

    /// Month-by-month spending trend
    Monthly {
        csv: PathBuf,

        /// Break each month down by category
        #[arg(long)]
        by_category: bool,
    },

    /// Weekday and day-of-month spending pattern
    Pattern {
        csv: PathBuf,
    },

    /// Top merchants by total across the whole statement
    Merchants {
        csv: PathBuf,
    },

    /// Transactions matching a query string (case-insensitive)
    Search {
        csv: PathBuf,
        query: String,
    },

    /// Ask a hosted model a question about the statement
    Ask {
        csv: PathBuf,
        question: String,

        /// Overrides OPENAI_API_KEY and the config file
        #[arg(long)]
        api_key: Option<String>,

        /// Overrides the configured model
        #[arg(long)]
        model: Option<String>,
    },

    /// Manage ~/.spendlens/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the active config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Summary { csv } => {
            let data = load_statement(&csv)?;
            println!("Transactions: {}", data.transactions.len());
            println!("Income:   {:>12.2}", data.income);
            println!("Expenses: {:>12.2}", data.expenses);
            println!("Net:      {:>12.2}", data.net());
        }

        Command::Categories { csv } => {
            let data = load_statement(&csv)?;
            let totals = category_totals(&data.transactions);
            let counts = category_frequency(&data.transactions);

            println!("Spending by category:");
            for ((category, total), (_, count)) in totals.iter().zip(counts.iter()) {
                println!("  {category:<30} {total:>10.2}  ({count} txns)");
            }

            println!("\nTop spending categories:");
            for (rank, (category, total)) in top_spending_categories(&data.transactions)
                .iter()
                .enumerate()
            {
                println!("  {:>2}. {category:<30} {total:>10.2}", rank + 1);
            }
        }

        Command::Monthly { csv, by_category } => {
            let data = load_statement(&csv)?;
            if by_category {
                for month in monthly_category_breakdown(&data.transactions)? {
                    println!("{}", month.month);
                    for (category, total) in &month.categories {
                        println!("  {category:<30} {total:>10.2}");
                    }
                }
            } else {
                for month in monthly_totals(&data.transactions)? {
                    println!("{}  {:>10.2}", month.month, month.total);
                }
            }
        }

        Command::Pattern { csv } => {
            let data = load_statement(&csv)?;
            let pattern = daily_pattern(&data.transactions)?;
            const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
            for (row, label) in pattern.rows().iter().zip(WEEKDAYS) {
                let cells: Vec<String> = row
                    .iter()
                    .enumerate()
                    .filter(|(_, total)| **total != 0.0)
                    .map(|(i, total)| format!("day {:>2}: {total:.2}", i + 1))
                    .collect();
                if !cells.is_empty() {
                    println!("{label}  {}", cells.join("  "));
                }
            }
        }

        Command::Merchants { csv } => {
            let data = load_statement(&csv)?;
            for (rank, (merchant, total)) in top_merchants(&data.transactions).iter().enumerate() {
                println!("{:>2}. {merchant:<40} {total:>10.2}", rank + 1);
            }
        }

        Command::Search { csv, query } => {
            let data = load_statement(&csv)?;
            let hits = search(&data.transactions, &query);
            for t in &hits {
                println!(
                    "{}  {:<40} {:>10.2}  {}",
                    t.trans_date, t.description, t.amount, t.category
                );
            }
            println!("\n{} of {} transactions matched", hits.len(), data.transactions.len());
        }

        Command::Ask {
            csv,
            question,
            api_key,
            model,
        } => {
            let data = load_statement(&csv)?;
            let cfg = config::load_config()?;

            let key = api_key
                .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                .or(cfg.llm.api_key)
                .context(
                    "no API key: pass --api-key, set OPENAI_API_KEY, or add it to the config",
                )?;
            let model = model.unwrap_or(cfg.llm.model);

            let answer = llm::ask(
                &key,
                &cfg.llm.base_url,
                &model,
                &question,
                &data.document_text(),
            )
            .await?;
            println!("{answer}");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("model:    {}", cfg.llm.model);
                println!("base_url: {}", cfg.llm.base_url);
                println!(
                    "api_key:  {}",
                    if cfg.llm.api_key.is_some() { "(set)" } else { "(unset)" }
                );
            }
        },
    }

    Ok(())
}

fn load_statement(csv: &Path) -> Result<FinancialData> {
    if !csv.exists() {
        bail!("CSV not found: {}", csv.display());
    }
    ingest_csv_path(csv).with_context(|| format!("parsing {}", csv.display()))
}
