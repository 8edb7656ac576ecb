//! 6502 core: register file, cycle-stepped execution, interrupts.

use crate::addressing::AddrMode;
use crate::bus::Bus;
use crate::irq::IrqLine;
use crate::opcodes::{Mnemonic, OPCODE_TABLE};
use crate::status::Status;
use crate::vectors;

/// Interrupt kinds, in priority order (RESET is handled out of band).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    Nmi,
    Irq,
    Brk,
}

/// NES 6502 CPU.
///
/// [`Cpu::step`] advances exactly one cycle. The first cycle of an
/// instruction performs the whole instruction; the remaining documented
/// cycles drain through `skip_cycles`. DMA engines extend the drain via
/// [`Cpu::stall`], which delays the next opcode fetch.
#[derive(Debug)]
pub struct Cpu {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Program counter.
    pub pc: u16,
    /// Stack pointer (offset into $0100-$01FF).
    pub sp: u8,
    /// Status flags.
    pub status: Status,
    cycles: u64,
    skip_cycles: u32,
    nmi_pending: bool,
    irq: IrqLine,
}

impl Cpu {
    /// Create a CPU in power-on state. `reset` must run before stepping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0xFD,
            status: Status::POWER_ON,
            cycles: 0,
            skip_cycles: 0,
            nmi_pending: false,
            irq: IrqLine::new(),
        }
    }

    /// Clone a handle on the shared IRQ line for a peripheral.
    #[must_use]
    pub fn irq_line(&self) -> IrqLine {
        self.irq.clone()
    }

    /// RESET: S=$FD, I set, PC from $FFFC. Clears any pending NMI;
    /// RESET outranks both NMI and IRQ.
    pub fn reset(&mut self, bus: &mut impl Bus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = Status::POWER_ON;
        self.cycles = 0;
        self.skip_cycles = 0;
        self.nmi_pending = false;
        self.pc = bus.read_u16(vectors::RESET);
    }

    /// Latch the NMI edge; taken at the start of the next instruction.
    pub fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Inject DMA stall cycles before the next opcode fetch.
    pub fn stall(&mut self, cycles: u32) {
        self.skip_cycles += cycles;
    }

    /// Total cycles ticked since reset.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Cycles left before the next instruction fetch.
    #[must_use]
    pub fn skip_cycles(&self) -> u32 {
        self.skip_cycles
    }

    /// Advance one CPU cycle.
    pub fn step(&mut self, bus: &mut impl Bus) {
        self.cycles += 1;

        if self.skip_cycles > 0 {
            self.skip_cycles -= 1;
            return;
        }

        if self.nmi_pending {
            self.nmi_pending = false;
            self.interrupt_sequence(bus, Interrupt::Nmi);
            self.skip_cycles += 6;
            return;
        }

        if !self.status.contains(Status::I) && self.irq.asserted() {
            self.interrupt_sequence(bus, Interrupt::Irq);
            self.skip_cycles += 6;
            return;
        }

        let opcode = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);

        let entry = OPCODE_TABLE[opcode as usize];
        let extra = self.execute(bus, entry.mnemonic, entry.mode, entry.page_penalty);

        self.skip_cycles += u32::from(entry.cycles) + extra - 1;
    }

    /// Push PC and flags, set I, load the vector. BRK pushes PC+1 with
    /// B=1 and shares the IRQ vector.
    fn interrupt_sequence(&mut self, bus: &mut impl Bus, kind: Interrupt) {
        if kind == Interrupt::Brk {
            self.pc = self.pc.wrapping_add(1);
        }

        self.push(bus, (self.pc >> 8) as u8);
        self.push(bus, self.pc as u8);
        self.push(bus, self.status.to_pushed(kind == Interrupt::Brk));

        self.status.insert(Status::I);

        let vector = match kind {
            Interrupt::Nmi => vectors::NMI,
            Interrupt::Irq | Interrupt::Brk => vectors::IRQ,
        };
        self.pc = bus.read_u16(vector);
    }

    /// Resolve the effective address for a memory addressing mode.
    /// Returns the address and whether indexing crossed a page.
    fn resolve(&mut self, bus: &mut impl Bus, mode: AddrMode) -> (u16, bool) {
        match mode {
            AddrMode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                (addr, false)
            }
            AddrMode::ZeroPage => {
                let addr = u16::from(bus.read(self.pc));
                self.pc = self.pc.wrapping_add(1);
                (addr, false)
            }
            AddrMode::ZeroPageX => {
                let base = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                (u16::from(base.wrapping_add(self.x)), false)
            }
            AddrMode::ZeroPageY => {
                let base = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                (u16::from(base.wrapping_add(self.y)), false)
            }
            AddrMode::Absolute => {
                let addr = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                (addr, false)
            }
            AddrMode::AbsoluteX => {
                let base = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let addr = base.wrapping_add(u16::from(self.x));
                (addr, page_crossed(base, addr))
            }
            AddrMode::AbsoluteY => {
                let base = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let addr = base.wrapping_add(u16::from(self.y));
                (addr, page_crossed(base, addr))
            }
            AddrMode::Indirect => {
                // JMP ($xxxx): the pointer high byte never carries out of
                // the page, reproducing the 6502 wrap bug.
                let ptr = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let lo = u16::from(bus.read(ptr));
                let hi = u16::from(bus.read(ptr & 0xFF00 | ptr.wrapping_add(1) & 0x00FF));
                (hi << 8 | lo, false)
            }
            AddrMode::IndirectX => {
                let zp = bus.read(self.pc).wrapping_add(self.x);
                self.pc = self.pc.wrapping_add(1);
                let lo = u16::from(bus.read(u16::from(zp)));
                let hi = u16::from(bus.read(u16::from(zp.wrapping_add(1))));
                (hi << 8 | lo, false)
            }
            AddrMode::IndirectY => {
                let zp = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let lo = u16::from(bus.read(u16::from(zp)));
                let hi = u16::from(bus.read(u16::from(zp.wrapping_add(1))));
                let base = hi << 8 | lo;
                let addr = base.wrapping_add(u16::from(self.y));
                (addr, page_crossed(base, addr))
            }
            AddrMode::Implied | AddrMode::Accumulator | AddrMode::Relative => (0, false),
        }
    }

    /// Execute one instruction; returns extra cycles beyond the base cost.
    #[allow(clippy::too_many_lines)] // One arm per mnemonic.
    fn execute(
        &mut self,
        bus: &mut impl Bus,
        mnemonic: Mnemonic,
        mode: AddrMode,
        page_penalty: bool,
    ) -> u32 {
        use Mnemonic::*;

        // Branches manage PC and penalties themselves.
        match mnemonic {
            Bpl => return self.branch(bus, !self.status.contains(Status::N)),
            Bmi => return self.branch(bus, self.status.contains(Status::N)),
            Bvc => return self.branch(bus, !self.status.contains(Status::V)),
            Bvs => return self.branch(bus, self.status.contains(Status::V)),
            Bcc => return self.branch(bus, !self.status.contains(Status::C)),
            Bcs => return self.branch(bus, self.status.contains(Status::C)),
            Bne => return self.branch(bus, !self.status.contains(Status::Z)),
            Beq => return self.branch(bus, self.status.contains(Status::Z)),
            _ => {}
        }

        let (addr, crossed) = self.resolve(bus, mode);
        let penalty = u32::from(page_penalty && crossed);

        match mnemonic {
            Lda => {
                self.a = bus.read(addr);
                self.status.set_zn(self.a);
            }
            Ldx => {
                self.x = bus.read(addr);
                self.status.set_zn(self.x);
            }
            Ldy => {
                self.y = bus.read(addr);
                self.status.set_zn(self.y);
            }
            Sta => bus.write(addr, self.a),
            Stx => bus.write(addr, self.x),
            Sty => bus.write(addr, self.y),

            Adc => {
                let operand = bus.read(addr);
                self.add_with_carry(operand);
            }
            Sbc => {
                let operand = bus.read(addr);
                self.add_with_carry(!operand);
            }
            Cmp => {
                let operand = bus.read(addr);
                self.compare(self.a, operand);
            }
            Cpx => {
                let operand = bus.read(addr);
                self.compare(self.x, operand);
            }
            Cpy => {
                let operand = bus.read(addr);
                self.compare(self.y, operand);
            }

            And => {
                self.a &= bus.read(addr);
                self.status.set_zn(self.a);
            }
            Ora => {
                self.a |= bus.read(addr);
                self.status.set_zn(self.a);
            }
            Eor => {
                self.a ^= bus.read(addr);
                self.status.set_zn(self.a);
            }
            Bit => {
                let operand = bus.read(addr);
                self.status.set(Status::Z, self.a & operand == 0);
                self.status.set(Status::V, operand & 0x40 != 0);
                self.status.set(Status::N, operand & 0x80 != 0);
            }

            Asl => self.read_modify_write(bus, addr, mode, |status, v| {
                status.set(Status::C, v & 0x80 != 0);
                v << 1
            }),
            Lsr => self.read_modify_write(bus, addr, mode, |status, v| {
                status.set(Status::C, v & 0x01 != 0);
                v >> 1
            }),
            Rol => {
                let carry_in = u8::from(self.status.contains(Status::C));
                self.read_modify_write(bus, addr, mode, |status, v| {
                    status.set(Status::C, v & 0x80 != 0);
                    v << 1 | carry_in
                });
            }
            Ror => {
                let carry_in = u8::from(self.status.contains(Status::C)) << 7;
                self.read_modify_write(bus, addr, mode, |status, v| {
                    status.set(Status::C, v & 0x01 != 0);
                    v >> 1 | carry_in
                });
            }
            Inc => {
                let value = bus.read(addr).wrapping_add(1);
                self.status.set_zn(value);
                bus.write(addr, value);
            }
            Dec => {
                let value = bus.read(addr).wrapping_sub(1);
                self.status.set_zn(value);
                bus.write(addr, value);
            }

            Inx => {
                self.x = self.x.wrapping_add(1);
                self.status.set_zn(self.x);
            }
            Iny => {
                self.y = self.y.wrapping_add(1);
                self.status.set_zn(self.y);
            }
            Dex => {
                self.x = self.x.wrapping_sub(1);
                self.status.set_zn(self.x);
            }
            Dey => {
                self.y = self.y.wrapping_sub(1);
                self.status.set_zn(self.y);
            }

            Tax => {
                self.x = self.a;
                self.status.set_zn(self.x);
            }
            Tay => {
                self.y = self.a;
                self.status.set_zn(self.y);
            }
            Txa => {
                self.a = self.x;
                self.status.set_zn(self.a);
            }
            Tya => {
                self.a = self.y;
                self.status.set_zn(self.a);
            }
            Tsx => {
                self.x = self.sp;
                self.status.set_zn(self.x);
            }
            Txs => self.sp = self.x,

            Jmp => self.pc = addr,
            Jsr => {
                // addr was fetched through PC, so PC now sits one past
                // the last instruction byte; push PC-1.
                let ret = self.pc.wrapping_sub(1);
                self.push(bus, (ret >> 8) as u8);
                self.push(bus, ret as u8);
                self.pc = addr;
            }
            Rts => {
                let lo = u16::from(self.pull(bus));
                let hi = u16::from(self.pull(bus));
                self.pc = (hi << 8 | lo).wrapping_add(1);
            }
            Rti => {
                let flags = self.pull(bus);
                self.status.from_pulled(flags);
                let lo = u16::from(self.pull(bus));
                let hi = u16::from(self.pull(bus));
                self.pc = hi << 8 | lo;
            }
            Brk => self.interrupt_sequence(bus, Interrupt::Brk),

            Pha => self.push(bus, self.a),
            Php => {
                let flags = self.status.to_pushed(true);
                self.push(bus, flags);
            }
            Pla => {
                self.a = self.pull(bus);
                self.status.set_zn(self.a);
            }
            Plp => {
                let flags = self.pull(bus);
                self.status.from_pulled(flags);
            }

            Clc => self.status.remove(Status::C),
            Sec => self.status.insert(Status::C),
            Cli => self.status.remove(Status::I),
            Sei => self.status.insert(Status::I),
            Cld => self.status.remove(Status::D),
            Sed => self.status.insert(Status::D),
            Clv => self.status.remove(Status::V),

            Nop => {}

            Bpl | Bmi | Bvc | Bvs | Bcc | Bcs | Bne | Beq => unreachable!(),
        }

        penalty
    }

    /// Shifts and rotates, shared between accumulator and memory forms.
    fn read_modify_write(
        &mut self,
        bus: &mut impl Bus,
        addr: u16,
        mode: AddrMode,
        f: impl FnOnce(&mut Status, u8) -> u8,
    ) {
        if mode == AddrMode::Accumulator {
            self.a = f(&mut self.status, self.a);
            self.status.set_zn(self.a);
        } else {
            let value = f(&mut self.status, bus.read(addr));
            self.status.set_zn(value);
            bus.write(addr, value);
        }
    }

    /// Conditional branch: +1 cycle when taken, +1 more on page cross.
    fn branch(&mut self, bus: &mut impl Bus, taken: bool) -> u32 {
        let offset = bus.read(self.pc) as i8;
        self.pc = self.pc.wrapping_add(1);

        if !taken {
            return 0;
        }

        let target = self.pc.wrapping_add_signed(i16::from(offset));
        let extra = 1 + u32::from(page_crossed(self.pc, target));
        self.pc = target;
        extra
    }

    fn add_with_carry(&mut self, operand: u8) {
        let carry = u16::from(self.status.contains(Status::C));
        let sum = u16::from(self.a) + u16::from(operand) + carry;
        self.status.set(Status::C, sum & 0x100 != 0);
        let result = sum as u8;
        self.status
            .set(Status::V, (self.a ^ result) & (operand ^ result) & 0x80 != 0);
        self.a = result;
        self.status.set_zn(result);
    }

    fn compare(&mut self, register: u8, operand: u8) {
        let diff = register.wrapping_sub(operand);
        self.status.set(Status::C, register >= operand);
        self.status.set_zn(diff);
    }

    fn push(&mut self, bus: &mut impl Bus, value: u8) {
        bus.write(0x0100 | u16::from(self.sp), value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pull(&mut self, bus: &mut impl Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(0x0100 | u16::from(self.sp))
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn page_crossed(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IrqSource;
    use proptest::prelude::*;

    struct TestBus {
        memory: Vec<u8>,
    }

    impl TestBus {
        fn new() -> Self {
            Self {
                memory: vec![0; 0x10000],
            }
        }

        fn with_program(program: &[u8]) -> Self {
            let mut bus = Self::new();
            bus.memory[0x8000..0x8000 + program.len()].copy_from_slice(program);
            bus.memory[0xFFFC] = 0x00;
            bus.memory[0xFFFD] = 0x80;
            bus
        }
    }

    impl Bus for TestBus {
        fn read(&mut self, addr: u16) -> u8 {
            self.memory[addr as usize]
        }

        fn write(&mut self, addr: u16, value: u8) {
            self.memory[addr as usize] = value;
        }
    }

    /// Step until the current instruction has fully drained.
    fn run_instruction(cpu: &mut Cpu, bus: &mut TestBus) -> u64 {
        let start = cpu.cycles();
        cpu.step(bus);
        while cpu.skip_cycles() > 0 {
            cpu.step(bus);
        }
        cpu.cycles() - start
    }

    #[test]
    fn reset_loads_vector() {
        let mut bus = TestBus::with_program(&[0xEA]);
        bus.memory[0xFFFC] = 0x00;
        bus.memory[0xFFFD] = 0xC0;

        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        assert_eq!(cpu.pc, 0xC000);
        assert_eq!(cpu.sp, 0xFD);
        assert!(cpu.status.contains(Status::I));
    }

    #[test]
    fn lda_sta_zero_page() {
        // LDA #$80 / STA $00 — 2 + 3 = 5 cycles.
        let mut bus = TestBus::with_program(&[0xA9, 0x80, 0x85, 0x00]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        for _ in 0..5 {
            cpu.step(&mut bus);
        }

        assert_eq!(cpu.a, 0x80);
        assert!(cpu.status.contains(Status::N));
        assert!(!cpu.status.contains(Status::Z));
        assert_eq!(bus.memory[0x00], 0x80);
        assert_eq!(cpu.skip_cycles(), 0);
        assert_eq!(cpu.cycles(), 5);
    }

    #[test]
    fn instruction_cycle_counts() {
        let cases: &[(&[u8], u64)] = &[
            (&[0xEA], 2),             // NOP
            (&[0xA9, 0x01], 2),       // LDA #
            (&[0xA5, 0x10], 3),       // LDA zp
            (&[0xAD, 0x00, 0x02], 4), // LDA abs
            (&[0x4C, 0x00, 0x90], 3), // JMP abs
            (&[0x00], 7),             // BRK
        ];

        for (program, expected) in cases {
            let mut bus = TestBus::with_program(program);
            let mut cpu = Cpu::new();
            cpu.reset(&mut bus);
            assert_eq!(run_instruction(&mut cpu, &mut bus), *expected);
        }
    }

    #[test]
    fn page_cross_penalty_on_reads_only() {
        // LDA $80FF,X with X=1 crosses into $8100: 4 + 1 cycles.
        let mut bus = TestBus::with_program(&[0xBD, 0xFF, 0x80]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.x = 1;
        assert_eq!(run_instruction(&mut cpu, &mut bus), 5);

        // STA $80FF,X always takes 5, no read penalty.
        let mut bus = TestBus::with_program(&[0x9D, 0xFF, 0x80]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.x = 1;
        assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    }

    #[test]
    fn branch_penalties() {
        // BEQ not taken: 2 cycles.
        let mut bus = TestBus::with_program(&[0xF0, 0x10]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        assert_eq!(run_instruction(&mut cpu, &mut bus), 2);

        // BEQ taken, same page: 3 cycles.
        let mut bus = TestBus::with_program(&[0xF0, 0x10]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.status.insert(Status::Z);
        assert_eq!(run_instruction(&mut cpu, &mut bus), 3);
        assert_eq!(cpu.pc, 0x8012);

        // BEQ taken across a page: 4 cycles.
        let mut bus = TestBus::with_program(&[0xF0, 0x7F]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.status.insert(Status::Z);
        assert_eq!(run_instruction(&mut cpu, &mut bus), 4);
    }

    #[test]
    fn jmp_indirect_page_wrap_bug() {
        let mut bus = TestBus::with_program(&[0x6C, 0xFF, 0x30]);
        bus.memory[0x30FF] = 0x34;
        bus.memory[0x3100] = 0xFF; // Would be the high byte without the bug.
        bus.memory[0x3000] = 0x12; // Actual high byte source.

        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        run_instruction(&mut cpu, &mut bus);

        assert_eq!(cpu.pc, 0x1234);
    }

    #[test]
    fn adc_overflow_and_carry() {
        // 0x7F + 0x01 = 0x80: V set, C clear.
        let mut bus = TestBus::with_program(&[0xA9, 0x7F, 0x69, 0x01]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        run_instruction(&mut cpu, &mut bus);
        run_instruction(&mut cpu, &mut bus);
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.status.contains(Status::V));
        assert!(!cpu.status.contains(Status::C));

        // 0xFF + 0x02 = 0x01 carry out, no signed overflow.
        let mut bus = TestBus::with_program(&[0xA9, 0xFF, 0x69, 0x02]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        run_instruction(&mut cpu, &mut bus);
        run_instruction(&mut cpu, &mut bus);
        assert_eq!(cpu.a, 0x01);
        assert!(!cpu.status.contains(Status::V));
        assert!(cpu.status.contains(Status::C));
    }

    #[test]
    fn sbc_borrow() {
        // SEC / LDA #$10 / SBC #$08 = 0x08, C set.
        let mut bus = TestBus::with_program(&[0x38, 0xA9, 0x10, 0xE9, 0x08]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        for _ in 0..3 {
            run_instruction(&mut cpu, &mut bus);
        }
        assert_eq!(cpu.a, 0x08);
        assert!(cpu.status.contains(Status::C));
    }

    #[test]
    fn jsr_rts_round_trip() {
        let mut bus = TestBus::with_program(&[0x20, 0x10, 0x80]);
        bus.memory[0x8010] = 0x60; // RTS
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        let sp = cpu.sp;
        run_instruction(&mut cpu, &mut bus);
        assert_eq!(cpu.pc, 0x8010);
        assert_eq!(cpu.sp, sp.wrapping_sub(2));

        run_instruction(&mut cpu, &mut bus);
        assert_eq!(cpu.pc, 0x8003);
        assert_eq!(cpu.sp, sp);
    }

    #[test]
    fn brk_pushes_return_past_padding() {
        let mut bus = TestBus::with_program(&[0x00, 0xFF]);
        bus.memory[0xFFFE] = 0x00;
        bus.memory[0xFFFF] = 0x90;
        bus.memory[0x9000] = 0x40; // RTI

        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        run_instruction(&mut cpu, &mut bus); // BRK
        assert_eq!(cpu.pc, 0x9000);
        assert!(cpu.status.contains(Status::I));

        run_instruction(&mut cpu, &mut bus); // RTI
        assert_eq!(cpu.pc, 0x8002); // Past opcode and padding byte.
    }

    #[test]
    fn nmi_takes_seven_cycles_and_vectors() {
        let mut bus = TestBus::with_program(&[0xEA]);
        bus.memory[0xFFFA] = 0x00;
        bus.memory[0xFFFB] = 0xA0;

        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.trigger_nmi();

        assert_eq!(run_instruction(&mut cpu, &mut bus), 7);
        assert_eq!(cpu.pc, 0xA000);
        assert!(cpu.status.contains(Status::I));
    }

    #[test]
    fn irq_masked_by_i_flag() {
        let mut bus = TestBus::with_program(&[0xEA, 0xEA]);
        bus.memory[0xFFFE] = 0x00;
        bus.memory[0xFFFF] = 0xB0;

        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        let irq = cpu.irq_line();
        irq.pull(IrqSource::Mapper);

        // I is set after reset: IRQ is held off.
        run_instruction(&mut cpu, &mut bus);
        assert_eq!(cpu.pc, 0x8001);

        cpu.status.remove(Status::I);
        run_instruction(&mut cpu, &mut bus);
        assert_eq!(cpu.pc, 0xB000);
    }

    #[test]
    fn stall_delays_next_fetch() {
        let mut bus = TestBus::with_program(&[0xA9, 0x42]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.stall(3);

        cpu.step(&mut bus);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(cpu.a, 0, "stall cycles must pass before the fetch");

        cpu.step(&mut bus);
        assert_eq!(cpu.a, 0x42);
    }

    #[test]
    fn unofficial_opcode_is_a_sized_nop() {
        // $04 (NOP zp) is 2 bytes, 3 cycles, touches nothing.
        let mut bus = TestBus::with_program(&[0x04, 0x10, 0xA9, 0x05]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        assert_eq!(run_instruction(&mut cpu, &mut bus), 3);
        assert_eq!(cpu.pc, 0x8002);

        run_instruction(&mut cpu, &mut bus);
        assert_eq!(cpu.a, 0x05);
    }

    proptest! {
        #[test]
        fn stack_push_pull_round_trip(value: u8, sp in 0x10u8..=0xFD) {
            let mut bus = TestBus::new();
            let mut cpu = Cpu::new();
            cpu.sp = sp;

            cpu.push(&mut bus, value);
            prop_assert_eq!(cpu.sp, sp.wrapping_sub(1));
            prop_assert_eq!(cpu.pull(&mut bus), value);
            prop_assert_eq!(cpu.sp, sp);
        }

        #[test]
        fn compare_carry_matches_ordering(register: u8, operand: u8) {
            let mut cpu = Cpu::new();
            cpu.compare(register, operand);
            prop_assert_eq!(cpu.status.contains(Status::C), register >= operand);
            prop_assert_eq!(cpu.status.contains(Status::Z), register == operand);
        }
    }
}
