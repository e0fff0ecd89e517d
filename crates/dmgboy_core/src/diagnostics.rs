//! Non-fatal emulation diagnostics.
//!
//! Several real programs probe undefined I/O registers or unmapped memory.
//! Those accesses never stop emulation; they are turned into a
//! [`Diagnostic`] and handed to whatever sink the machine was built with.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// Read from an address with no backing store. The read returned 0.
    UnmappedRead { addr: u16 },
    /// Write to an address with no backing store. The value was dropped.
    UnmappedWrite { addr: u16, value: u8 },
    /// Read from a write-only I/O register. The read returned 0.
    WriteOnlyRead { addr: u16 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmappedRead { addr } => {
                write!(f, "read from unmapped address 0x{addr:04X}")
            }
            Diagnostic::UnmappedWrite { addr, value } => {
                write!(f, "write of 0x{value:02X} to unmapped address 0x{addr:04X}")
            }
            Diagnostic::WriteOnlyRead { addr } => {
                write!(f, "read from write-only register 0x{addr:04X}")
            }
        }
    }
}

/// Receiver for recoverable emulation diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Default sink: forwards every diagnostic to `log::warn!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("GB bus: {diagnostic}");
    }
}
