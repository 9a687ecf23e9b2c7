use clap::{Parser, ValueEnum};

/// Which screen the binary renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Screen {
    Dashboard,
    Claims,
    Invoices,
    Inventory,
    Templates,
    Profile,
}

/// Practice administration screens over an in-memory mock dataset
#[derive(Debug, Clone, Parser)]
#[command(name = "practiceadmin")]
pub struct Config {
    /// Screen to render
    #[arg(value_enum, default_value_t = Screen::Dashboard)]
    pub screen: Screen,

    /// JSONL file of invoices to load instead of generated data
    #[arg(long)]
    pub invoices: Option<String>,

    /// JSONL file of claims to load instead of generated data
    #[arg(long)]
    pub claims: Option<String>,

    /// Show one invoice by id (invoices screen)
    #[arg(long)]
    pub invoice_id: Option<String>,

    /// Records to generate per collection when nothing is loaded
    #[arg(long, default_value_t = 12)]
    pub seed_count: usize,

    /// Write the generated invoices to a JSONL file before rendering
    #[arg(long)]
    pub export: Option<String>,

    /// Enable detailed event logging
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn config() -> Config {
    Config::parse()
}
