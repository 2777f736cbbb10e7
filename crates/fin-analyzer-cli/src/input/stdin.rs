use std::io::{self, Read};

/// Attempt to read document text from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive). An empty pipe yields
/// `Some("")`.
pub fn read_stdin() -> Result<Option<String>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    Ok(Some(buffer))
}
