use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use cashflow_rs::{
    initialize_db,
    transaction::{NewTransaction, TransactionKind, create_transaction},
};

/// A utility for creating a test database for the REST API server of cashflow-rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test records...");

    let incomes = [
        ("Salary", 2600.0, date!(2026 - 07 - 01), "salary"),
        ("Invoice #42", 450.0, date!(2026 - 07 - 08), "freelancing"),
        ("Dividends", 120.5, date!(2026 - 07 - 15), "investments"),
    ];
    for (title, amount, date, category) in incomes {
        create_transaction(
            TransactionKind::Income,
            NewTransaction {
                title: title.to_owned(),
                amount,
                date,
                category: category.to_owned(),
                description: String::new(),
            },
            &conn,
        )?;
    }

    let expenses = [
        ("Weekly shop", 85.3, date!(2026 - 07 - 02), "groceries"),
        ("Streaming", 13.99, date!(2026 - 07 - 05), "subscriptions"),
        ("Friday pizza", 24.5, date!(2026 - 07 - 10), "takeaways"),
        ("Dentist", 160.0, date!(2026 - 07 - 21), "health"),
    ];
    for (title, amount, date, category) in expenses {
        create_transaction(
            TransactionKind::Expense,
            NewTransaction {
                title: title.to_owned(),
                amount,
                date,
                category: category.to_owned(),
                description: String::new(),
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
