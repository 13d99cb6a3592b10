use std::io::{self, Write};

/// Writes one line to stdout, treating a closed pipe as success.
pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    tolerate_broken_pipe(
        stdout
            .write_all(text.as_bytes())
            .and_then(|()| stdout.write_all(b"\n"))
            .and_then(|()| stdout.flush()),
    )
}

fn tolerate_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::tolerate_broken_pipe;

    #[test]
    fn broken_pipe_is_swallowed_but_other_errors_are_not() {
        let broken = tolerate_broken_pipe(Err(io::Error::from(io::ErrorKind::BrokenPipe)));
        assert!(broken.is_ok());
        let denied = tolerate_broken_pipe(Err(io::Error::from(io::ErrorKind::PermissionDenied)));
        assert!(denied.is_err());
    }
}
