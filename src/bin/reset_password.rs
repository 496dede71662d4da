use std::{error::Error, path::Path, process::exit};

use clap::Parser;

use social_sim::{
    Console, LineConsole, UserStore, menu::prompt_new_password, user_file::DEFAULT_DATA_PATH,
};

/// A utility for changing the password for a registered user.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the user data file.
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data_path: String,

    /// Email address of the user whose password should be reset.
    #[arg(long)]
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let data_path = Path::new(&args.data_path);
    let mut console = LineConsole::stdio();

    let mut store = UserStore::new();
    match store.load(data_path) {
        Ok(summary) => {
            for skipped in &summary.skipped {
                eprintln!("{}", skipped.console_message());
            }
        }
        Err(error) => {
            eprintln!("{}", error.console_message());
            exit(1);
        }
    }

    let Some(user) = store.get_by_email(&args.email) else {
        eprintln!("No user with the email {} in {}.", args.email, data_path.display());
        exit(1);
    };
    let user_id = user.id;
    console.print(&format!("Resetting password for {} (ID {user_id})", user.email))?;

    let Some(password) = prompt_new_password(&mut console)? else {
        return Ok(());
    };

    if let Err(error) = store
        .set_password(user_id, &password)
        .and_then(|()| store.save(data_path).map(|_| ()))
    {
        eprintln!("{}", error.console_message());
        exit(1);
    }

    console.print("Password updated successfully!")?;

    Ok(())
}
