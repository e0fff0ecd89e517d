use std::fmt;

/// Errors that stop emulation or prevent a machine from being built.
///
/// Recoverable conditions such as unmapped memory accesses are not errors;
/// they are reported through a [`crate::DiagnosticSink`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The ROM image handed to the machine was empty.
    EmptyRom,
    /// The CPU fetched an opcode that has no defined behaviour.
    ///
    /// `pc` is the address the opcode was fetched from.
    UnknownOpcode { opcode: u8, pc: u16 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyRom => write!(f, "ROM image is empty"),
            Error::UnknownOpcode { opcode, pc } => {
                write!(f, "unknown opcode 0x{opcode:02X} at PC=0x{pc:04X}")
            }
        }
    }
}

impl std::error::Error for Error {}
