use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use token_tracker::{
    NewGoal, NewResident, PostTransaction, create_goal, create_resident, initialize_db,
    post_transaction,
};

/// A utility for creating a test database for the REST API server of token_tracker.
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
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test resident...");
    let resident = create_resident(
        NewResident {
            first_name: "Alice".to_owned(),
            last_name: "Smith".to_owned(),
            display_name: Some("Ali".to_owned()),
        },
        &conn,
    )?;

    println!("Creating test goals...");
    let chores = create_goal(
        NewGoal {
            title: "Chores".to_owned(),
            description: Some("Tidy the common room after dinner.".to_owned()),
            points: 5,
            active: true,
            resident_id: None,
        },
        &conn,
    )?;
    create_goal(
        NewGoal {
            title: "Homework".to_owned(),
            description: None,
            points: 3,
            active: true,
            resident_id: Some(resident.id),
        },
        &conn,
    )?;

    println!("Posting test transactions...");
    post_transaction(
        PostTransaction {
            resident_id: resident.id,
            goal_id: Some(chores.id),
            points: None,
            timestamp: None,
            staff_name: "Sam".to_owned(),
            note: None,
        },
        &conn,
    )?;
    post_transaction(
        PostTransaction {
            resident_id: resident.id,
            goal_id: None,
            points: Some(-2),
            timestamp: None,
            staff_name: "Sam".to_owned(),
            note: Some("Late for curfew.".to_owned()),
        },
        &conn,
    )?;

    println!("Success!");

    Ok(())
}
