/// Serial port reduced to what test ROMs rely on.
///
/// There is no link partner. A transfer started with the internal clock
/// (SC bits 7 and 0 set) completes at once: the byte in SB is captured into
/// `output`, the start bit is cleared and the serial interrupt is raised.
#[derive(Default)]
pub(crate) struct Serial {
    pub(crate) output: Vec<u8>,
}

impl Serial {
    /// Handle a write to SC. Returns the value SC should hold afterwards and
    /// whether a transfer completed.
    pub(super) fn write_sc(&mut self, sb: u8, value: u8) -> (u8, bool) {
        if value & 0x81 == 0x81 {
            self.output.push(sb);
            (value & !0x80, true)
        } else {
            (value, false)
        }
    }
}
