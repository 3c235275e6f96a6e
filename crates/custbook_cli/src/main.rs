//! Command-line front end for the customer store.
//!
//! # Responsibility
//! - Map subcommands onto `CustomerStore` operations.
//! - Pre-validate form-style input with the core predicates before writing.

use clap::{Args, Parser, Subcommand};
use custbook_core::{
    default_log_level, email_error, init_logging, is_valid_address, is_valid_name,
    is_valid_phone, normalize_phone, Customer, CustomerStore, SqliteCustomerRepository,
    StoreConfig, DB_PATH_ENV,
};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_FAILED: u8 = 1;
const EXIT_FATAL: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "custbook", version)]
#[command(about = "Manage customer records in a local SQLite file")]
struct Cli {
    /// SQLite database file to open (created when missing).
    #[arg(long, global = true, env = DB_PATH_ENV)]
    db: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true, env = "CUSTBOOK_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true, env = "CUSTBOOK_LOG_DIR")]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check an email address against the store's rules.
    CheckEmail { email: String },
    #[command(flatten)]
    Store(StoreCommand),
}

/// Subcommands that operate on an open store.
#[derive(Debug, Subcommand)]
enum StoreCommand {
    /// Add a new customer.
    Add(CustomerArgs),
    /// Replace name, address and email of an existing customer.
    Update(CustomerArgs),
    /// Delete a customer by phone.
    Delete { phone: String },
    /// Show one customer by phone.
    Get { phone: String },
    /// List customers ordered by name.
    List {
        /// Only show rows where any field contains this text (case-insensitive).
        #[arg(long)]
        contains: Option<String>,
    },
    /// Import customers from a CSV file (phone,name,address,email per line).
    Import { file: PathBuf },
    /// Export all customers to a CSV file.
    Export { file: PathBuf },
}

#[derive(Debug, Args)]
struct CustomerArgs {
    #[arg(long)]
    phone: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    email: Option<String>,
}

impl CustomerArgs {
    fn into_customer(self) -> Customer {
        Customer::new(self.phone, self.name, self.address, self.email)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("error: {err}");
            return ExitCode::from(EXIT_FATAL);
        }
    }

    let command = match cli.command {
        Command::CheckEmail { email } => return check_email(&email),
        Command::Store(command) => command,
    };

    let store = match StoreConfig::resolve(cli.db).map_err(|err| err.to_string()).and_then(
        |config| CustomerStore::open(config).map_err(|err| err.to_string()),
    ) {
        Ok(store) => store,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    if run(&store, command) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILED)
    }
}

fn check_email(email: &str) -> ExitCode {
    match email_error(email) {
        None => {
            println!("ok");
            ExitCode::SUCCESS
        }
        Some(message) => {
            println!("{message}");
            ExitCode::from(EXIT_FAILED)
        }
    }
}

fn run(store: &CustomerStore<SqliteCustomerRepository>, command: StoreCommand) -> bool {
    match command {
        StoreCommand::Add(args) => {
            let customer = args.into_customer();
            if let Some(problem) = form_problem(&customer) {
                eprintln!("{problem}");
                return false;
            }
            if store.get_by_phone(&customer.phone).is_some() {
                eprintln!("Phone already exists.");
                return false;
            }
            report(store.insert(&customer), "Customer added.", "Insert failed.")
        }
        StoreCommand::Update(args) => {
            let customer = args.into_customer();
            if let Some(problem) = form_problem(&customer) {
                eprintln!("{problem}");
                return false;
            }
            report(store.update(&customer), "Customer updated.", "Update failed.")
        }
        StoreCommand::Delete { phone } => {
            report(store.delete(&phone), "Customer deleted.", "Delete failed.")
        }
        StoreCommand::Get { phone } => match store.get_by_phone(&phone) {
            Some(customer) => {
                print_customer(&customer);
                true
            }
            None => {
                eprintln!("No customer with phone {}.", normalize_phone(&phone));
                false
            }
        },
        StoreCommand::List { contains } => {
            let needle = contains.map(|text| text.to_lowercase());
            let rows = store
                .list_all()
                .into_iter()
                .filter(|customer| match needle.as_deref() {
                    Some(needle) => matches_filter(customer, needle),
                    None => true,
                })
                .collect::<Vec<_>>();
            for customer in &rows {
                print_customer(customer);
            }
            println!("{} customer(s).", rows.len());
            true
        }
        StoreCommand::Import { file } => {
            let message = store.import_csv(&file);
            println!("{message}");
            !message.starts_with("Import error")
        }
        StoreCommand::Export { file } => report(
            store.save_to_csv(&file),
            &format!("Exported to {}.", file.display()),
            "Export failed.",
        ),
    }
}

fn form_problem(customer: &Customer) -> Option<&'static str> {
    if !is_valid_phone(&customer.phone) {
        return Some("Phone must have 7-11 digits.");
    }
    if !is_valid_name(&customer.name) {
        return Some("Name is required.");
    }
    if !is_valid_address(&customer.address) {
        return Some("Address is required.");
    }
    email_error(customer.email.as_deref().unwrap_or(""))
}

fn matches_filter(customer: &Customer, needle: &str) -> bool {
    [
        customer.phone.as_str(),
        customer.name.as_str(),
        customer.address.as_str(),
        customer.email_or_empty(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn print_customer(customer: &Customer) {
    println!(
        "{}\t{}\t{}\t{}",
        customer.phone,
        customer.name,
        customer.address,
        customer.email_or_empty()
    );
}

fn report(ok: bool, success: &str, failure: &str) -> bool {
    if ok {
        println!("{success}");
    } else {
        eprintln!("{failure}");
    }
    ok
}
