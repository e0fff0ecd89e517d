use super::*;
use crate::machine::{Interrupt, InterruptController, InterruptFlags};
use crate::Error;

/// Flat 64 KiB memory with IF/IE routed to a real interrupt controller.
struct TestBus {
    memory: Box<[u8; 0x10000]>,
    interrupts: InterruptController,
}

impl Default for TestBus {
    fn default() -> Self {
        let mut interrupts = InterruptController::new();
        interrupts.write_if(0);
        Self {
            memory: Box::new([0; 0x10000]),
            interrupts,
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        match addr {
            0xFF0F => self.interrupts.read_if(),
            0xFFFF => self.interrupts.read_ie(),
            _ => self.memory[addr as usize],
        }
    }

    fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF0F => self.interrupts.write_if(value),
            0xFFFF => self.interrupts.write_ie(value),
            _ => self.memory[addr as usize] = value,
        }
    }

    fn interrupts(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }
}

/// CPU at 0xC000 with `program` loaded there.
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    bus.memory[0xC000..0xC000 + program.len()].copy_from_slice(program);
    let mut cpu = Cpu::new();
    cpu.regs.pc = 0xC000;
    (cpu, bus)
}

fn run(cpu: &mut Cpu, bus: &mut TestBus, steps: usize) -> u32 {
    (0..steps).map(|_| cpu.step(bus).unwrap()).sum()
}

#[test]
fn boot_state_matches_dmg() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn ld_immediate_and_store() {
    // LD A,0x42; LD (0xC100),A
    let (mut cpu, mut bus) = setup(&[0x3E, 0x42, 0xEA, 0x00, 0xC1]);
    let cycles = run(&mut cpu, &mut bus, 2);
    assert_eq!(cycles, 8 + 16);
    assert_eq!(bus.memory[0xC100], 0x42);
    assert_eq!(cpu.regs.pc, 0xC005);
}

/// Result the accumulator ALU should produce (CP reports A - operand).
fn expected_alu(family: u8, a: u8, b: u8, carry: bool) -> u8 {
    let c = carry as u8;
    match family {
        0 => a.wrapping_add(b),
        1 => a.wrapping_add(b).wrapping_add(c),
        2 | 7 => a.wrapping_sub(b),
        3 => a.wrapping_sub(b).wrapping_sub(c),
        4 => a & b,
        5 => a ^ b,
        6 => a | b,
        _ => unreachable!(),
    }
}

#[test]
fn zero_flag_tracks_result_across_alu_families() {
    let operands = [(0x00, 0x00), (0x00, 0xFF), (0xFF, 0xFF), (0x0F, 0x01), (0xFF, 0x01)];
    for family in 0..8u8 {
        for &(a, b) in &operands {
            for carry in [false, true] {
                // OP A,B and OP A,d8
                let programs = [vec![0x80 | (family << 3)], vec![0xC6 | (family << 3), b]];
                for program in &programs {
                    let (mut cpu, mut bus) = setup(program);
                    cpu.regs.a = a;
                    cpu.regs.b = b;
                    cpu.regs.f = if carry { 0x10 } else { 0 };
                    cpu.step(&mut bus).unwrap();

                    let result = expected_alu(family, a, b, carry);
                    assert_eq!(
                        cpu.get_flag(Flag::Z),
                        result == 0,
                        "Z for {program:02X?} A={a:02X} B={b:02X} carry={carry}"
                    );
                    let a_after = if family == 7 { a } else { result };
                    assert_eq!(cpu.regs.a, a_after, "A for {program:02X?}");
                }
            }
        }
    }
}

#[test]
fn add_half_and_full_carry() {
    // ADD A,B with 0x0F + 0x01
    let (mut cpu, mut bus) = setup(&[0x80, 0x80]);
    cpu.regs.a = 0x0F;
    cpu.regs.b = 0x01;
    cpu.regs.f = 0;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x10);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));

    // 0xFF + 0x01
    cpu.regs.a = 0xFF;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn zero_flag_from_inc_dec_and_cb() {
    // Each case: B before, expected Z after.
    let cases: &[(&[u8], u8, bool)] = &[
        (&[0x05], 0x01, true),        // DEC B
        (&[0x05], 0x00, false),       // DEC B
        (&[0x04], 0xFF, true),        // INC B
        (&[0x04], 0x0F, false),       // INC B
        (&[0xCB, 0x10], 0x80, true),  // RL B (carry clear)
        (&[0xCB, 0x38], 0x01, true),  // SRL B
        (&[0xCB, 0x38], 0x02, false), // SRL B
        (&[0xCB, 0x30], 0x00, true),  // SWAP B
        (&[0xCB, 0x30], 0xF0, false), // SWAP B
        (&[0xCB, 0x40], 0xFE, true),  // BIT 0,B
        (&[0xCB, 0x40], 0x01, false), // BIT 0,B
    ];
    for &(program, b, zero) in cases {
        let (mut cpu, mut bus) = setup(program);
        cpu.regs.b = b;
        cpu.regs.f = 0;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.get_flag(Flag::Z), zero, "Z for {program:02X?} B={b:02X}");
    }
}

#[test]
fn add_hl_sets_half_and_full_carry_and_keeps_zero() {
    // ADD HL,BC
    let (mut cpu, mut bus) = setup(&[0x09, 0x09]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.regs.f = 0x80 | 0x40;
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert!(cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));

    cpu.regs.set_hl(0xF000);
    cpu.regs.set_bc(0x1000);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert!(cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn sub_and_sbc_borrows() {
    // SBC A,B with carry in.
    let (mut cpu, mut bus) = setup(&[0x98]);
    cpu.regs.a = 0x10;
    cpu.regs.b = 0x0F;
    cpu.regs.f = 0x10;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, 0x80 | 0x40 | 0x20);

    // CP d8 leaves A alone.
    let (mut cpu, mut bus) = setup(&[0xFE, 0x50]);
    cpu.regs.a = 0x40;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x40);
    assert!(cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::N));
}

#[test]
fn daa_after_bcd_add() {
    // ADD A,B; DAA: 0x45 + 0x38 = 0x83 in BCD.
    let (mut cpu, mut bus) = setup(&[0x80, 0x27]);
    cpu.regs.a = 0x45;
    cpu.regs.b = 0x38;
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn add_sp_signed_offset_flags() {
    // ADD SP,-1
    let (mut cpu, mut bus) = setup(&[0xE8, 0xFF]);
    cpu.regs.sp = 0x0001;
    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.sp, 0x0000);
    assert_eq!(cpu.regs.f, 0x20 | 0x10);
}

#[test]
fn rotate_a_always_clears_zero() {
    // RLCA with A = 0
    let (mut cpu, mut bus) = setup(&[0x07]);
    cpu.regs.a = 0x00;
    cpu.regs.f = 0xF0;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.f, 0x00);
}

#[test]
fn jr_sign_extends_displacement() {
    // JR -2 loops on itself.
    let (mut cpu, mut bus) = setup(&[0x18, 0xFE]);
    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.pc, 0xC000);

    // JR +5
    let (mut cpu, mut bus) = setup(&[0x18, 0x05]);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0xC007);
}

#[test]
fn conditional_branches_cost_less_when_not_taken() {
    // JR NZ, JP NZ, CALL NZ, RET NZ with Z set: none taken.
    let (mut cpu, mut bus) = setup(&[0x20, 0x10, 0xC2, 0x00, 0xD0, 0xC4, 0x00, 0xD0, 0xC0]);
    cpu.regs.f = 0x80;
    let costs: Vec<u32> = (0..4).map(|_| cpu.step(&mut bus).unwrap()).collect();
    assert_eq!(costs, [8, 12, 12, 8]);
    assert_eq!(cpu.regs.pc, 0xC009);

    // Same with Z clear: all taken.
    let (mut cpu, mut bus) = setup(&[0xC4, 0x00, 0xD0]);
    bus.memory[0xD000] = 0xC0; // RET NZ
    cpu.regs.f = 0x00;
    cpu.regs.sp = 0xDFFE;
    assert_eq!(cpu.step(&mut bus).unwrap(), 24);
    assert_eq!(cpu.regs.pc, 0xD000);
    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(cpu.regs.pc, 0xC003);
}

#[test]
fn push_pop_af_masks_low_flag_bits() {
    // PUSH BC; POP AF
    let (mut cpu, mut bus) = setup(&[0xC5, 0xF1]);
    cpu.regs.sp = 0xDFFE;
    cpu.regs.set_bc(0x12FF);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f, 0xF0);
    assert_eq!(cpu.regs.sp, 0xDFFE);
}

#[test]
fn cb_hl_forms_cost_more() {
    // SET 3,(HL); BIT 3,(HL); RES 3,(HL)
    let (mut cpu, mut bus) = setup(&[0xCB, 0xDE, 0xCB, 0x5E, 0xCB, 0x9E]);
    cpu.regs.set_hl(0xC100);
    let costs: Vec<u32> = (0..3).map(|_| cpu.step(&mut bus).unwrap()).collect();
    assert_eq!(costs, [16, 12, 16]);
    assert_eq!(bus.memory[0xC100], 0x00);
    assert!(!cpu.get_flag(Flag::Z));
}

#[test]
fn unknown_opcode_is_fatal() {
    let (mut cpu, mut bus) = setup(&[0x00, 0xD3]);
    cpu.step(&mut bus).unwrap();
    assert_eq!(
        cpu.step(&mut bus),
        Err(Error::UnknownOpcode {
            opcode: 0xD3,
            pc: 0xC001
        })
    );
    assert_eq!(cpu.regs.pc, 0xC002);
}

#[test]
fn interrupt_dispatch_pushes_pc_and_jumps() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    bus.memory[0x0050] = 0x00; // NOP at the timer vector
    cpu.regs.sp = 0xDFFE;
    bus.interrupts.set_master_enable(true);
    bus.interrupts.write_ie(0x1F);
    bus.interrupts.request(Interrupt::Timer);

    let cycles = cpu.step(&mut bus).unwrap();
    assert_eq!(cycles, 20 + 4);
    assert_eq!(cpu.regs.pc, 0x0051);
    assert_eq!(cpu.regs.sp, 0xDFFC);
    assert_eq!(bus.memory[0xDFFD], 0xC0);
    assert_eq!(bus.memory[0xDFFC], 0x00);
    assert!(!bus.interrupts.master_enabled());
    assert!(bus.interrupts.requested().is_empty());
}

#[test]
fn vblank_wins_over_timer() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.regs.sp = 0xDFFE;
    bus.interrupts.set_master_enable(true);
    bus.interrupts.write_ie(0x1F);
    bus.interrupts.request(Interrupt::Timer);
    bus.interrupts.request(Interrupt::VBlank);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0041);
    assert_eq!(bus.interrupts.requested(), InterruptFlags::TIMER);
}

#[test]
fn ime_clear_blocks_dispatch() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    bus.interrupts.write_ie(0x1F);
    bus.interrupts.request(Interrupt::VBlank);

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.pc, 0xC001);
    assert_eq!(bus.interrupts.requested(), InterruptFlags::VBLANK);
}

#[test]
fn ei_takes_effect_after_next_instruction() {
    // EI; NOP; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00, 0x00]);
    cpu.regs.sp = 0xDFFE;
    bus.interrupts.write_ie(0x01);
    bus.interrupts.request(Interrupt::VBlank);

    cpu.step(&mut bus).unwrap();
    assert!(!bus.interrupts.master_enabled());
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0xC002);
    assert!(bus.interrupts.master_enabled());

    // Serviced at the start of the third step.
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0041);
}

#[test]
fn di_cancels_pending_ei() {
    // EI; DI; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3, 0x00]);
    run(&mut cpu, &mut bus, 3);
    assert!(!bus.interrupts.master_enabled());
}

#[test]
fn reti_enables_immediately() {
    let (mut cpu, mut bus) = setup(&[0xD9]);
    cpu.regs.sp = 0xDFFC;
    bus.memory[0xDFFC] = 0x34;
    bus.memory[0xDFFD] = 0x12;
    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert!(bus.interrupts.master_enabled());
}

#[test]
fn halt_idles_until_interrupt_pending() {
    // HALT; INC A
    let (mut cpu, mut bus) = setup(&[0x76, 0x3C]);
    bus.interrupts.write_ie(0x04);
    cpu.regs.a = 0;

    cpu.step(&mut bus).unwrap();
    assert!(cpu.halted);
    assert_eq!(run(&mut cpu, &mut bus, 3), 12);
    assert_eq!(cpu.regs.pc, 0xC001);

    // IME is off: waking resumes after HALT without dispatch.
    bus.interrupts.request(Interrupt::Timer);
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.a, 1);
    assert_eq!(cpu.regs.pc, 0xC002);
}

#[test]
fn halt_bug_repeats_next_byte() {
    // HALT with IME off and an interrupt already pending; INC A runs twice.
    let (mut cpu, mut bus) = setup(&[0x76, 0x3C, 0x00]);
    bus.interrupts.write_ie(0x01);
    bus.interrupts.request(Interrupt::VBlank);
    cpu.regs.a = 0;

    run(&mut cpu, &mut bus, 3);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.a, 2);
    assert_eq!(cpu.regs.pc, 0xC002);
}

#[test]
fn ei_halt_services_pending_interrupt_once() {
    // EI; HALT; NOP with VBlank already pending. Handler: INC A; RETI.
    let (mut cpu, mut bus) = setup(&[0xFB, 0x76, 0x00]);
    bus.memory[0x0040] = 0x3C;
    bus.memory[0x0041] = 0xD9;
    cpu.regs.sp = 0xDFFE;
    cpu.regs.a = 0;
    bus.interrupts.write_ie(0x01);
    bus.interrupts.request(Interrupt::VBlank);

    run(&mut cpu, &mut bus, 2);
    assert!(bus.interrupts.master_enabled());

    // Dispatch plus the handler's INC A.
    assert_eq!(cpu.step(&mut bus).unwrap(), 20 + 4);
    assert_eq!(cpu.regs.pc, 0x0041);
    assert_eq!(cpu.regs.a, 1);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 1);
    assert_eq!(cpu.regs.pc, 0xC002);
    assert_eq!(cpu.regs.sp, 0xDFFE);
    assert!(!cpu.halted);
}

#[test]
fn stop_waits_for_joypad() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x3C]);
    cpu.regs.a = 0;
    cpu.step(&mut bus).unwrap();
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0xC002);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0);

    bus.interrupts.request(Interrupt::Joypad);
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.is_stopped());
    assert_eq!(cpu.regs.a, 1);
}
