// src/exit.rs
//! Process exit codes for `plotstat`.
//!
//! Provides a stable contract for CI scripts.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PlotExit {
    /// Points were produced.
    Success = 0,
    /// Generic error (IO writing output).
    Error = 1,
    /// Patterns, formats, encoding or config file are invalid.
    InvalidConfig = 2,
    /// `--fail-on-failures` was given and the build has failed or errored tests.
    TestsFailed = 3,
}

impl PlotExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for PlotExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
