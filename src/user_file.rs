//! Reading and writing the user data file.
//!
//! The file holds one user per line with the fields `id,name,email,password` separated by a
//! single comma. There is no header and no quoting, so a field that contains a comma is written
//! verbatim and the line will be rejected on the next load.

use std::{
    collections::HashSet,
    fs::{self, File},
    io,
    path::Path,
};

use csv::{ByteRecord, QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::{
    Error,
    user::{User, UserID},
};

/// The default location of the data file, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "users.txt";

/// The field delimiter used in the data file.
pub const DELIMITER: u8 = b',';

/// The number of fields in each line of the data file.
const FIELD_COUNT: usize = 4;

/// The users found in a data file and the lines that had to be skipped.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedUsers {
    /// The valid users in file order.
    pub users: Vec<User>,
    /// One [Error::MalformedRecord] per skipped line.
    pub skipped: Vec<Error>,
}

/// Write `users` to the file at `path`, replacing any existing content.
///
/// Returns the number of users written.
///
/// # Errors
///
/// Returns [Error::FileOpen] if the file could not be created, or [Error::FileWrite] if writing
/// a record failed.
pub fn write_users(path: &Path, users: &[User]) -> Result<usize, Error> {
    let file = File::create(path).map_err(|error| Error::file_open(path, error))?;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);

    for user in users {
        if contains_delimiter(user) {
            tracing::warn!(
                "User {} has a comma in their details and will not load back correctly",
                user.id
            );
        }

        writer
            .serialize(user)
            .map_err(|error| Error::file_write(path, error))?;
    }

    writer
        .flush()
        .map_err(|error| Error::file_write(path, error))?;

    Ok(users.len())
}

/// Read the users from the file at `path`.
///
/// Lines that cannot be parsed are skipped and reported in [ParsedUsers::skipped].
///
/// # Errors
///
/// Returns [Error::FileNotFound] if there is no file at `path`, or [Error::FileRead] if the file
/// exists but could not be read.
pub fn read_users(path: &Path) -> Result<ParsedUsers, Error> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        Err(error) => return Err(Error::file_read(path, error)),
    };

    Ok(parse_users(&bytes))
}

/// Parse the contents of a data file.
///
/// Empty lines are ignored. A line is skipped if it is not valid UTF-8, if it does not have
/// exactly four fields, if the ID is not a positive integer below [i64::MAX], or if the ID was
/// already seen earlier in the same data.
pub fn parse_users(data: &[u8]) -> ParsedUsers {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .flexible(true)
        .quoting(false)
        .from_reader(data);

    let mut parsed = ParsedUsers::default();
    let mut seen_ids = HashSet::new();

    for result in reader.byte_records() {
        let record = match result {
            Ok(record) => record,
            Err(error) => {
                let line = error.position().map_or(0, |position| position.line());
                parsed.skipped.push(Error::MalformedRecord {
                    line,
                    reason: error.to_string(),
                });
                continue;
            }
        };

        let line = record.position().map_or(0, |position| position.line());

        match parse_record(record) {
            Ok(user) if !seen_ids.insert(user.id) => {
                parsed.skipped.push(Error::MalformedRecord {
                    line,
                    reason: format!("duplicate ID {}", user.id),
                });
            }
            Ok(user) => parsed.users.push(user),
            Err(reason) => parsed
                .skipped
                .push(Error::MalformedRecord { line, reason }),
        }
    }

    parsed
}

fn parse_record(record: ByteRecord) -> Result<User, String> {
    let record = StringRecord::from_byte_record(record)
        .map_err(|error| format!("not valid UTF-8: {}", error.utf8_error()))?;

    if record.len() != FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} fields but found {}",
            record.len()
        ));
    }

    let user: User = record
        .deserialize(None)
        .map_err(|error| format!("could not parse ID '{}': {error}", &record[0]))?;

    if user.id < UserID::new(1) {
        return Err(format!("ID must be positive, got {}", user.id));
    }

    // The next ID handed out must be larger than every stored ID.
    if user.id.as_i64() == i64::MAX {
        return Err(format!("ID {} is too large", user.id));
    }

    Ok(user)
}

fn contains_delimiter(user: &User) -> bool {
    let delimiter = char::from(DELIMITER);

    [&user.name, &user.email, &user.password]
        .iter()
        .any(|field| field.contains(delimiter))
}
