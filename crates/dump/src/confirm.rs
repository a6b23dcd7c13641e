//! Confirmation policy for destructive steps.
//!
//! Unattended scheduled runs answer every prompt with yes; manual
//! runs can swap in the interactive policy to be asked on stdin
//! before a non-empty destination is reused or an existing archive is
//! removed.

use std::io::{BufRead, Write};

/// Answers yes/no questions raised mid-run.
pub trait ConfirmPolicy: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Unattended policy: every prompt is approved.
pub struct AlwaysConfirm;

impl ConfirmPolicy for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Interactive policy: asks on stdin, accepts `y`/`Y` as approval.
pub struct InteractiveConfirm;

impl ConfirmPolicy for InteractiveConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_confirm_approves() {
        assert!(AlwaysConfirm.confirm("Remove existing file?"));
    }
}
