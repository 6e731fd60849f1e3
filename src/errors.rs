//! Error mapping guide:
//! - Map io::ErrorKind::NotFound to exit code 127; all others to 1.
//! - Fatal paths resolve where they are detected: print the user-facing
//!   message, log the cause, halt. No error values cross the
//!   supervisor/bridge boundary.
use std::io;

/// Map an io::Error to a process exit code:
/// - 127 for NotFound (command not found)
/// - 1 for all other errors
pub fn exit_code_for_io_error(e: &io::Error) -> u8 {
    if e.kind() == io::ErrorKind::NotFound {
        127
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_127() {
        let e = io::Error::new(io::ErrorKind::NotFound, "no such file");
        assert_eq!(exit_code_for_io_error(&e), 127);
    }

    #[test]
    fn other_errors_map_to_1() {
        let e = io::Error::other("boom");
        assert_eq!(exit_code_for_io_error(&e), 1);
    }
}
