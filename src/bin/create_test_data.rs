use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;

use social_sim::UserStore;

/// A utility for creating a user data file for manual testing of social_sim.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the user data to.
    #[arg(long, short)]
    output_path: String,
}

const TEST_USERS: [(&str, &str, &str); 3] = [
    ("Alice", "alice@example.com", "test"),
    ("Bob", "bob@example.com", "test"),
    ("Carol", "carol@example.com", "test"),
];

/// Create and populate a user data file for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let output_path = Path::new(&args.output_path);

    println!("Creating test users...");

    let store = match write_test_data(output_path) {
        Ok(store) => store,
        Err(error) => {
            eprintln!("{error}");
            exit(1);
        }
    };

    for user in store.users() {
        println!("  {}: {} <{}>", user.id, user.name, user.email);
    }
    println!("Saved users to {output_path:#?}");

    Ok(())
}

/// Register the test users and save them to `output_path`.
///
/// Refuses to touch a file that already exists.
fn write_test_data(output_path: &Path) -> Result<UserStore, Box<dyn Error>> {
    if output_path.exists() {
        return Err(format!("File already exists at {output_path:#?}!").into());
    }

    let mut store = UserStore::new();

    for (name, email, password) in TEST_USERS {
        store.register(name, email, password)?;
    }

    store.save(output_path)?;

    Ok(store)
}
