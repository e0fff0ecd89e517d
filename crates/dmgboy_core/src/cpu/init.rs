use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            halted: false,
            stopped: false,
            halt_bug: false,
            ime_enable_pending: false,
        };
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// Reset the CPU to the state the boot ROM leaves behind.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.halted = false;
        self.stopped = false;
        self.halt_bug = false;
        self.ime_enable_pending = false;
        self.apply_dmg_boot_state();
    }

    /// Initialize registers to match the DMG boot ROM's state after it
    /// hands control to cartridge code at 0x0100.
    fn apply_dmg_boot_state(&mut self) {
        self.regs.a = 0x01;
        self.regs.f = 0xB0; // Z, N, H, C = 1,0,1,1
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
    }
}
