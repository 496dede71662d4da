//! The interactive menus and the loop that drives them.
//!
//! There are two menus: one for when nobody is logged in and one for the logged-in user. Every
//! choice is a single number and anything else prints "Invalid choice!" and shows the menu again.

use std::io;

use crate::{AppState, Error, console::Console, user::User};

/// The choices on the menu shown when nobody is logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuChoice {
    /// Create a new account.
    Register,
    /// Log in to an existing account.
    LogIn,
    /// List every registered user.
    ShowAllUsers,
    /// Write all users to the data file.
    SaveData,
    /// Replace the users with the contents of the data file.
    LoadData,
    /// Quit the application.
    Exit,
}

impl MainMenuChoice {
    /// Parse a menu choice, returning `None` if `input` is not one of the listed numbers.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(Self::Register),
            2 => Some(Self::LogIn),
            3 => Some(Self::ShowAllUsers),
            4 => Some(Self::SaveData),
            5 => Some(Self::LoadData),
            0 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// The choices on the menu shown to a logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserMenuChoice {
    /// Show the logged-in user's details.
    ViewProfile,
    /// Change the logged-in user's name.
    EditProfile,
    /// List every registered user.
    ShowAllUsers,
    /// Write all users to the data file.
    SaveData,
    /// End the session.
    LogOut,
    /// Quit the application.
    Exit,
}

impl UserMenuChoice {
    /// Parse a menu choice, returning `None` if `input` is not one of the listed numbers.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(Self::ViewProfile),
            2 => Some(Self::EditProfile),
            3 => Some(Self::ShowAllUsers),
            4 => Some(Self::SaveData),
            5 => Some(Self::LogOut),
            0 => Some(Self::Exit),
            _ => None,
        }
    }
}

const MAIN_MENU: &str = "
=== Social Media Simulation ===
1. Register
2. Login
3. Show All Users
4. Save Data
5. Load Data
0. Exit";

const USER_MENU: &str = "
=== User Menu ===
1. View Profile
2. Edit Profile
3. Show All Users
4. Save Data
5. Logout
0. Exit";

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Exit,
}

/// Show the menus until the user chooses to exit or the input ends.
///
/// # Errors
///
/// Returns an error only if reading from or writing to `console` fails.
pub fn run(state: &mut AppState, console: &mut impl Console) -> io::Result<()> {
    loop {
        let flow = if state.session().is_authenticated() {
            show_user_menu(state, console)?
        } else {
            show_main_menu(state, console)?
        };

        if flow == Flow::Exit {
            console.print("Goodbye!")?;
            return Ok(());
        }
    }
}

fn show_main_menu(state: &mut AppState, console: &mut impl Console) -> io::Result<Flow> {
    console.print(MAIN_MENU)?;

    let Some(input) = console.read_line("Choice: ")? else {
        return Ok(Flow::Exit);
    };

    match MainMenuChoice::parse(&input) {
        Some(MainMenuChoice::Register) => register(state, console),
        Some(MainMenuChoice::LogIn) => log_in(state, console),
        Some(MainMenuChoice::ShowAllUsers) => show_all_users(state, console),
        Some(MainMenuChoice::SaveData) => save_data(state, console),
        Some(MainMenuChoice::LoadData) => load_data(state, console),
        Some(MainMenuChoice::Exit) => Ok(Flow::Exit),
        None => invalid_choice(console),
    }
}

fn show_user_menu(state: &mut AppState, console: &mut impl Console) -> io::Result<Flow> {
    console.print(USER_MENU)?;

    let Some(input) = console.read_line("Choice: ")? else {
        return Ok(Flow::Exit);
    };

    match UserMenuChoice::parse(&input) {
        Some(UserMenuChoice::ViewProfile) => view_profile(state, console),
        Some(UserMenuChoice::EditProfile) => edit_profile(state, console),
        Some(UserMenuChoice::ShowAllUsers) => show_all_users(state, console),
        Some(UserMenuChoice::SaveData) => save_data(state, console),
        Some(UserMenuChoice::LogOut) => log_out(state, console),
        Some(UserMenuChoice::Exit) => Ok(Flow::Exit),
        None => invalid_choice(console),
    }
}

fn invalid_choice(console: &mut impl Console) -> io::Result<Flow> {
    console.print("Invalid choice!")?;

    Ok(Flow::Continue)
}

fn register(state: &mut AppState, console: &mut impl Console) -> io::Result<Flow> {
    console.print("=== Register New User ===")?;

    let Some(name) = console.read_line("Enter name: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(email) = console.read_line("Enter email: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(password) = console.read_password("Enter password: ")? else {
        return Ok(Flow::Exit);
    };

    match state.register(name.trim(), email.trim(), &password) {
        Ok(id) => console.print(&format!("User registered successfully with ID: {id}"))?,
        Err(error) => console.print(&error.console_message())?,
    }

    Ok(Flow::Continue)
}

fn log_in(state: &mut AppState, console: &mut impl Console) -> io::Result<Flow> {
    console.print("=== Login ===")?;

    let Some(email) = console.read_line("Enter email: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(password) = console.read_password("Enter password: ")? else {
        return Ok(Flow::Exit);
    };

    match state.log_in(email.trim(), &password) {
        Ok(user) => console.print(&format!("Login successful! Welcome, {}!", user.name))?,
        Err(error) => console.print(&error.console_message())?,
    }

    Ok(Flow::Continue)
}

fn log_out(state: &mut AppState, console: &mut impl Console) -> io::Result<Flow> {
    match state.log_out() {
        Ok(_) => console.print("Logged out successfully!")?,
        Err(Error::NotLoggedIn) => console.print("No user is currently logged in!")?,
        Err(error) => console.print(&error.console_message())?,
    }

    Ok(Flow::Continue)
}

fn view_profile(state: &AppState, console: &mut impl Console) -> io::Result<Flow> {
    match state.current_user() {
        Ok(user) => console.print(&format_profile(user))?,
        Err(error) => console.print(&error.console_message())?,
    }

    Ok(Flow::Continue)
}

fn edit_profile(state: &mut AppState, console: &mut impl Console) -> io::Result<Flow> {
    let current_name = match state.current_user() {
        Ok(user) => user.name.clone(),
        Err(error) => {
            console.print(&error.console_message())?;
            return Ok(Flow::Continue);
        }
    };

    console.print("=== Edit Profile ===")?;
    console.print(&format!("Current name: {current_name}"))?;

    let Some(new_name) = console.read_line("Enter new name (or press Enter to keep current): ")?
    else {
        return Ok(Flow::Exit);
    };

    match state.edit_profile(&new_name) {
        Ok(true) => console.print("Name updated successfully!")?,
        Ok(false) => {}
        Err(error) => console.print(&error.console_message())?,
    }

    Ok(Flow::Continue)
}

fn show_all_users(state: &AppState, console: &mut impl Console) -> io::Result<Flow> {
    console.print("\n=== All Users ===")?;

    if state.users().is_empty() {
        console.print("No users registered yet.")?;
    }

    for user in state.users() {
        console.print(&format_user(user))?;
    }

    Ok(Flow::Continue)
}

fn save_data(state: &AppState, console: &mut impl Console) -> io::Result<Flow> {
    match state.save() {
        Ok(_) => console.print("Users saved successfully!")?,
        Err(error) => {
            tracing::error!("Could not save users: {error}");
            console.print(&error.console_message())?;
        }
    }

    Ok(Flow::Continue)
}

/// Reload the users from the data file and tell the user how it went.
///
/// A missing data file is reported as a fresh start rather than an error.
///
/// # Errors
///
/// Returns an error only if writing to `console` fails.
pub fn load_users(state: &mut AppState, console: &mut impl Console) -> io::Result<()> {
    match state.load() {
        Ok(report) => {
            for skipped in &report.summary.skipped {
                console.print(&skipped.console_message())?;
            }

            console.print(&format!(
                "Loaded {} users from {}.",
                report.summary.loaded,
                state.data_path().display()
            ))?;

            if report.ended_session.is_some() {
                console.print("Your account is not in the loaded data, you have been logged out.")?;
            }
        }
        Err(error @ Error::FileNotFound(_)) => {
            tracing::info!("{error}");
            console.print(&error.console_message())?;
        }
        Err(error) => {
            tracing::error!("Could not load users: {error}");
            console.print(&error.console_message())?;
        }
    }

    Ok(())
}

fn load_data(state: &mut AppState, console: &mut impl Console) -> io::Result<Flow> {
    load_users(state, console)?;

    Ok(Flow::Continue)
}

/// Ask for a new password twice until both entries match and are not empty.
///
/// Returns `None` if the input ends before a password is accepted.
///
/// # Errors
///
/// Returns an error only if reading from or writing to `console` fails.
pub fn prompt_new_password(console: &mut impl Console) -> io::Result<Option<String>> {
    loop {
        let Some(password) = console.read_password("Enter a new password: ")? else {
            return Ok(None);
        };

        if password.is_empty() {
            console.print("Password cannot be empty, try again.")?;
            continue;
        }

        let Some(confirmation) = console.read_password("Enter the same password again: ")? else {
            return Ok(None);
        };

        if password == confirmation {
            return Ok(Some(password));
        }

        console.print("Passwords must match, try again.")?;
    }
}

fn format_user(user: &User) -> String {
    format!("ID: {}, Name: {}, Email: {}", user.id, user.name, user.email)
}

fn format_profile(user: &User) -> String {
    format!(
        "\n=== User Profile ===\nID: {}\nName: {}\nEmail: {}\n===================",
        user.id, user.name, user.email
    )
}

#[cfg(test)]
mod menu_tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::{AppState, console::LineConsole, session::Session, user::UserID};

    use super::{MainMenuChoice, UserMenuChoice, load_users, prompt_new_password, run};

    /// Run the menus with `input` as the typed lines and return everything that was printed.
    fn run_script(state: &mut AppState, input: &str) -> String {
        let mut console = LineConsole::new(input.as_bytes(), Vec::new());
        run(state, &mut console).unwrap();

        String::from_utf8(console.into_output()).unwrap()
    }

    fn get_state(dir: &TempDir) -> AppState {
        AppState::new(dir.path().join("users.txt"))
    }

    #[test]
    fn parse_main_menu_choices() {
        assert_eq!(MainMenuChoice::parse("1"), Some(MainMenuChoice::Register));
        assert_eq!(MainMenuChoice::parse(" 5 "), Some(MainMenuChoice::LoadData));
        assert_eq!(MainMenuChoice::parse("0"), Some(MainMenuChoice::Exit));
        assert_eq!(MainMenuChoice::parse("6"), None);
        assert_eq!(MainMenuChoice::parse("-1"), None);
        assert_eq!(MainMenuChoice::parse("one"), None);
        assert_eq!(MainMenuChoice::parse(""), None);
    }

    #[test]
    fn parse_user_menu_choices() {
        assert_eq!(UserMenuChoice::parse("1"), Some(UserMenuChoice::ViewProfile));
        assert_eq!(UserMenuChoice::parse("5"), Some(UserMenuChoice::LogOut));
        assert_eq!(UserMenuChoice::parse("0"), Some(UserMenuChoice::Exit));
        assert_eq!(UserMenuChoice::parse("9"), None);
    }

    #[test]
    fn exit_says_goodbye() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);

        let output = run_script(&mut state, "0\n");

        assert!(output.contains("=== Social Media Simulation ==="));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn end_of_input_exits() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);

        let output = run_script(&mut state, "");

        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn invalid_choice_shows_menu_again() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);

        let output = run_script(&mut state, "7\nabc\n0\n");

        assert_eq!(output.matches("Invalid choice!").count(), 2);
        assert_eq!(output.matches("=== Social Media Simulation ===").count(), 3);
    }

    #[test]
    fn register_and_show_all_users() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);

        let output = run_script(
            &mut state,
            "3\n1\nAlice\na@x.com\npw1\n1\nAlicia\na@x.com\npw\n3\n0\n",
        );

        assert!(output.contains("No users registered yet."));
        assert!(output.contains("User registered successfully with ID: 1"));
        assert!(output.contains("Email already exists! Please use a different email."));
        assert!(output.contains("ID: 1, Name: Alice, Email: a@x.com"));
        assert!(!output.contains("pw1\n"));
        assert_eq!(state.users().len(), 1);
        assert_eq!(state.session(), Session::Anonymous);
    }

    #[test]
    fn log_in_switches_to_user_menu() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "pw1").unwrap();

        let output = run_script(&mut state, "2\na@x.com\nwrong\n2\na@x.com\npw1\n1\n0\n");

        assert!(output.contains("Invalid email or password!"));
        assert!(output.contains("Login successful! Welcome, Alice!"));
        assert!(output.contains("=== User Menu ==="));
        assert!(output.contains("=== User Profile ===\nID: 1\nName: Alice\nEmail: a@x.com"));
        assert_eq!(state.session(), Session::Authenticated(UserID::new(1)));
    }

    #[test]
    fn edit_profile_and_log_out() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "pw1").unwrap();
        state.log_in("a@x.com", "pw1").unwrap();

        let output = run_script(&mut state, "2\n\n2\nAlicia\n5\n0\n");

        assert!(output.contains("Current name: Alice"));
        assert_eq!(output.matches("Name updated successfully!").count(), 1);
        assert!(output.contains("Logged out successfully!"));
        assert_eq!(state.users()[0].name, "Alicia");
        assert_eq!(state.session(), Session::Anonymous);
    }

    #[test]
    fn save_and_load_from_menu() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "pw1").unwrap();

        let output = run_script(&mut state, "4\n1\nBob\nb@x.com\npw2\n5\n0\n");

        assert!(output.contains("Users saved successfully!"));
        assert!(output.contains("Loaded 1 users from"));
        assert_eq!(state.users().len(), 1);
        assert_eq!(
            fs::read_to_string(state.data_path()).unwrap(),
            "1,Alice,a@x.com,pw1\n"
        );
    }

    #[test]
    fn save_reports_unwritable_file() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::new(dir.path().join("missing").join("users.txt"));

        let output = run_script(&mut state, "4\n0\n");

        assert!(output.contains("Error: Could not open file for saving!"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn load_users_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "pw1").unwrap();
        let mut console = LineConsole::new("".as_bytes(), Vec::new());

        load_users(&mut state, &mut console).unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "No existing user file found. Starting fresh.\n");
        assert_eq!(state.users().len(), 1);
    }

    #[test]
    fn load_users_reports_skipped_lines() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        fs::write(state.data_path(), "1,Alice,a@x.com,pw1\nbroken\n").unwrap();
        let mut console = LineConsole::new("".as_bytes(), Vec::new());

        load_users(&mut state, &mut console).unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.starts_with("Warning: skipped line 2"));
        assert!(output.contains("Loaded 1 users from"));
    }

    #[test]
    fn prompt_new_password_retries_until_entries_match() {
        let mut console = LineConsole::new("\nfirst\nsecond\nfinal\nfinal\n".as_bytes(), Vec::new());

        let password = prompt_new_password(&mut console).unwrap();

        assert_eq!(password.as_deref(), Some("final"));
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Password cannot be empty, try again."));
        assert!(output.contains("Passwords must match, try again."));
    }

    #[test]
    fn prompt_new_password_stops_at_end_of_input() {
        let mut console = LineConsole::new("only once\n".as_bytes(), Vec::new());

        assert_eq!(prompt_new_password(&mut console).unwrap(), None);
    }
}
