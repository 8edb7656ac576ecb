//! Opcode decode table.
//!
//! All 151 official instructions are decoded through a 256-entry lookup
//! table carrying the mnemonic, addressing mode, base cycle count and
//! whether a page-cross read penalty applies. Unofficial opcodes decode
//! to [`Mnemonic::Nop`] with their documented cycle cost and operand
//! width, so ROMs that stumble into them keep correct timing and PC
//! advancement without any unofficial semantics.

use crate::addressing::AddrMode;

/// Instruction mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)] // The 6502 mnemonics are their own documentation.
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

/// One decode table entry.
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,
    /// Addressing mode.
    pub mode: AddrMode,
    /// Base cycle count.
    pub cycles: u8,
    /// Extra cycle when an indexed read crosses a page boundary.
    pub page_penalty: bool,
}

const fn op(mnemonic: Mnemonic, mode: AddrMode, cycles: u8, page_penalty: bool) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
        page_penalty,
    }
}

use AddrMode::{
    Absolute as Abs, AbsoluteX as Abx, AbsoluteY as Aby, Accumulator as Acc, Immediate as Imm,
    Implied as Imp, Indirect as Ind, IndirectX as Izx, IndirectY as Izy, Relative as Rel,
    ZeroPage as Zp, ZeroPageX as Zpx, ZeroPageY as Zpy,
};
use Mnemonic::*;

/// 256-entry decode table indexed by opcode byte.
#[rustfmt::skip]
pub const OPCODE_TABLE: [Opcode; 256] = [
    /* 0x00 */ op(Brk, Imp, 7, false),
    /* 0x01 */ op(Ora, Izx, 6, false),
    /* 0x02 */ op(Nop, Imp, 2, false),
    /* 0x03 */ op(Nop, Izx, 8, false),
    /* 0x04 */ op(Nop, Zp,  3, false),
    /* 0x05 */ op(Ora, Zp,  3, false),
    /* 0x06 */ op(Asl, Zp,  5, false),
    /* 0x07 */ op(Nop, Zp,  5, false),
    /* 0x08 */ op(Php, Imp, 3, false),
    /* 0x09 */ op(Ora, Imm, 2, false),
    /* 0x0A */ op(Asl, Acc, 2, false),
    /* 0x0B */ op(Nop, Imm, 2, false),
    /* 0x0C */ op(Nop, Abs, 4, false),
    /* 0x0D */ op(Ora, Abs, 4, false),
    /* 0x0E */ op(Asl, Abs, 6, false),
    /* 0x0F */ op(Nop, Abs, 6, false),
    /* 0x10 */ op(Bpl, Rel, 2, false),
    /* 0x11 */ op(Ora, Izy, 5, true),
    /* 0x12 */ op(Nop, Imp, 2, false),
    /* 0x13 */ op(Nop, Izy, 8, false),
    /* 0x14 */ op(Nop, Zpx, 4, false),
    /* 0x15 */ op(Ora, Zpx, 4, false),
    /* 0x16 */ op(Asl, Zpx, 6, false),
    /* 0x17 */ op(Nop, Zpx, 6, false),
    /* 0x18 */ op(Clc, Imp, 2, false),
    /* 0x19 */ op(Ora, Aby, 4, true),
    /* 0x1A */ op(Nop, Imp, 2, false),
    /* 0x1B */ op(Nop, Aby, 7, false),
    /* 0x1C */ op(Nop, Abx, 4, true),
    /* 0x1D */ op(Ora, Abx, 4, true),
    /* 0x1E */ op(Asl, Abx, 7, false),
    /* 0x1F */ op(Nop, Abx, 7, false),
    /* 0x20 */ op(Jsr, Abs, 6, false),
    /* 0x21 */ op(And, Izx, 6, false),
    /* 0x22 */ op(Nop, Imp, 2, false),
    /* 0x23 */ op(Nop, Izx, 8, false),
    /* 0x24 */ op(Bit, Zp,  3, false),
    /* 0x25 */ op(And, Zp,  3, false),
    /* 0x26 */ op(Rol, Zp,  5, false),
    /* 0x27 */ op(Nop, Zp,  5, false),
    /* 0x28 */ op(Plp, Imp, 4, false),
    /* 0x29 */ op(And, Imm, 2, false),
    /* 0x2A */ op(Rol, Acc, 2, false),
    /* 0x2B */ op(Nop, Imm, 2, false),
    /* 0x2C */ op(Bit, Abs, 4, false),
    /* 0x2D */ op(And, Abs, 4, false),
    /* 0x2E */ op(Rol, Abs, 6, false),
    /* 0x2F */ op(Nop, Abs, 6, false),
    /* 0x30 */ op(Bmi, Rel, 2, false),
    /* 0x31 */ op(And, Izy, 5, true),
    /* 0x32 */ op(Nop, Imp, 2, false),
    /* 0x33 */ op(Nop, Izy, 8, false),
    /* 0x34 */ op(Nop, Zpx, 4, false),
    /* 0x35 */ op(And, Zpx, 4, false),
    /* 0x36 */ op(Rol, Zpx, 6, false),
    /* 0x37 */ op(Nop, Zpx, 6, false),
    /* 0x38 */ op(Sec, Imp, 2, false),
    /* 0x39 */ op(And, Aby, 4, true),
    /* 0x3A */ op(Nop, Imp, 2, false),
    /* 0x3B */ op(Nop, Aby, 7, false),
    /* 0x3C */ op(Nop, Abx, 4, true),
    /* 0x3D */ op(And, Abx, 4, true),
    /* 0x3E */ op(Rol, Abx, 7, false),
    /* 0x3F */ op(Nop, Abx, 7, false),
    /* 0x40 */ op(Rti, Imp, 6, false),
    /* 0x41 */ op(Eor, Izx, 6, false),
    /* 0x42 */ op(Nop, Imp, 2, false),
    /* 0x43 */ op(Nop, Izx, 8, false),
    /* 0x44 */ op(Nop, Zp,  3, false),
    /* 0x45 */ op(Eor, Zp,  3, false),
    /* 0x46 */ op(Lsr, Zp,  5, false),
    /* 0x47 */ op(Nop, Zp,  5, false),
    /* 0x48 */ op(Pha, Imp, 3, false),
    /* 0x49 */ op(Eor, Imm, 2, false),
    /* 0x4A */ op(Lsr, Acc, 2, false),
    /* 0x4B */ op(Nop, Imm, 2, false),
    /* 0x4C */ op(Jmp, Abs, 3, false),
    /* 0x4D */ op(Eor, Abs, 4, false),
    /* 0x4E */ op(Lsr, Abs, 6, false),
    /* 0x4F */ op(Nop, Abs, 6, false),
    /* 0x50 */ op(Bvc, Rel, 2, false),
    /* 0x51 */ op(Eor, Izy, 5, true),
    /* 0x52 */ op(Nop, Imp, 2, false),
    /* 0x53 */ op(Nop, Izy, 8, false),
    /* 0x54 */ op(Nop, Zpx, 4, false),
    /* 0x55 */ op(Eor, Zpx, 4, false),
    /* 0x56 */ op(Lsr, Zpx, 6, false),
    /* 0x57 */ op(Nop, Zpx, 6, false),
    /* 0x58 */ op(Cli, Imp, 2, false),
    /* 0x59 */ op(Eor, Aby, 4, true),
    /* 0x5A */ op(Nop, Imp, 2, false),
    /* 0x5B */ op(Nop, Aby, 7, false),
    /* 0x5C */ op(Nop, Abx, 4, true),
    /* 0x5D */ op(Eor, Abx, 4, true),
    /* 0x5E */ op(Lsr, Abx, 7, false),
    /* 0x5F */ op(Nop, Abx, 7, false),
    /* 0x60 */ op(Rts, Imp, 6, false),
    /* 0x61 */ op(Adc, Izx, 6, false),
    /* 0x62 */ op(Nop, Imp, 2, false),
    /* 0x63 */ op(Nop, Izx, 8, false),
    /* 0x64 */ op(Nop, Zp,  3, false),
    /* 0x65 */ op(Adc, Zp,  3, false),
    /* 0x66 */ op(Ror, Zp,  5, false),
    /* 0x67 */ op(Nop, Zp,  5, false),
    /* 0x68 */ op(Pla, Imp, 4, false),
    /* 0x69 */ op(Adc, Imm, 2, false),
    /* 0x6A */ op(Ror, Acc, 2, false),
    /* 0x6B */ op(Nop, Imm, 2, false),
    /* 0x6C */ op(Jmp, Ind, 5, false),
    /* 0x6D */ op(Adc, Abs, 4, false),
    /* 0x6E */ op(Ror, Abs, 6, false),
    /* 0x6F */ op(Nop, Abs, 6, false),
    /* 0x70 */ op(Bvs, Rel, 2, false),
    /* 0x71 */ op(Adc, Izy, 5, true),
    /* 0x72 */ op(Nop, Imp, 2, false),
    /* 0x73 */ op(Nop, Izy, 8, false),
    /* 0x74 */ op(Nop, Zpx, 4, false),
    /* 0x75 */ op(Adc, Zpx, 4, false),
    /* 0x76 */ op(Ror, Zpx, 6, false),
    /* 0x77 */ op(Nop, Zpx, 6, false),
    /* 0x78 */ op(Sei, Imp, 2, false),
    /* 0x79 */ op(Adc, Aby, 4, true),
    /* 0x7A */ op(Nop, Imp, 2, false),
    /* 0x7B */ op(Nop, Aby, 7, false),
    /* 0x7C */ op(Nop, Abx, 4, true),
    /* 0x7D */ op(Adc, Abx, 4, true),
    /* 0x7E */ op(Ror, Abx, 7, false),
    /* 0x7F */ op(Nop, Abx, 7, false),
    /* 0x80 */ op(Nop, Imm, 2, false),
    /* 0x81 */ op(Sta, Izx, 6, false),
    /* 0x82 */ op(Nop, Imm, 2, false),
    /* 0x83 */ op(Nop, Izx, 6, false),
    /* 0x84 */ op(Sty, Zp,  3, false),
    /* 0x85 */ op(Sta, Zp,  3, false),
    /* 0x86 */ op(Stx, Zp,  3, false),
    /* 0x87 */ op(Nop, Zp,  3, false),
    /* 0x88 */ op(Dey, Imp, 2, false),
    /* 0x89 */ op(Nop, Imm, 2, false),
    /* 0x8A */ op(Txa, Imp, 2, false),
    /* 0x8B */ op(Nop, Imm, 2, false),
    /* 0x8C */ op(Sty, Abs, 4, false),
    /* 0x8D */ op(Sta, Abs, 4, false),
    /* 0x8E */ op(Stx, Abs, 4, false),
    /* 0x8F */ op(Nop, Abs, 4, false),
    /* 0x90 */ op(Bcc, Rel, 2, false),
    /* 0x91 */ op(Sta, Izy, 6, false),
    /* 0x92 */ op(Nop, Imp, 2, false),
    /* 0x93 */ op(Nop, Izy, 6, false),
    /* 0x94 */ op(Sty, Zpx, 4, false),
    /* 0x95 */ op(Sta, Zpx, 4, false),
    /* 0x96 */ op(Stx, Zpy, 4, false),
    /* 0x97 */ op(Nop, Zpy, 4, false),
    /* 0x98 */ op(Tya, Imp, 2, false),
    /* 0x99 */ op(Sta, Aby, 5, false),
    /* 0x9A */ op(Txs, Imp, 2, false),
    /* 0x9B */ op(Nop, Aby, 5, false),
    /* 0x9C */ op(Nop, Abx, 5, false),
    /* 0x9D */ op(Sta, Abx, 5, false),
    /* 0x9E */ op(Nop, Aby, 5, false),
    /* 0x9F */ op(Nop, Aby, 5, false),
    /* 0xA0 */ op(Ldy, Imm, 2, false),
    /* 0xA1 */ op(Lda, Izx, 6, false),
    /* 0xA2 */ op(Ldx, Imm, 2, false),
    /* 0xA3 */ op(Nop, Izx, 6, false),
    /* 0xA4 */ op(Ldy, Zp,  3, false),
    /* 0xA5 */ op(Lda, Zp,  3, false),
    /* 0xA6 */ op(Ldx, Zp,  3, false),
    /* 0xA7 */ op(Nop, Zp,  3, false),
    /* 0xA8 */ op(Tay, Imp, 2, false),
    /* 0xA9 */ op(Lda, Imm, 2, false),
    /* 0xAA */ op(Tax, Imp, 2, false),
    /* 0xAB */ op(Nop, Imm, 2, false),
    /* 0xAC */ op(Ldy, Abs, 4, false),
    /* 0xAD */ op(Lda, Abs, 4, false),
    /* 0xAE */ op(Ldx, Abs, 4, false),
    /* 0xAF */ op(Nop, Abs, 4, false),
    /* 0xB0 */ op(Bcs, Rel, 2, false),
    /* 0xB1 */ op(Lda, Izy, 5, true),
    /* 0xB2 */ op(Nop, Imp, 2, false),
    /* 0xB3 */ op(Nop, Izy, 5, true),
    /* 0xB4 */ op(Ldy, Zpx, 4, false),
    /* 0xB5 */ op(Lda, Zpx, 4, false),
    /* 0xB6 */ op(Ldx, Zpy, 4, false),
    /* 0xB7 */ op(Nop, Zpy, 4, false),
    /* 0xB8 */ op(Clv, Imp, 2, false),
    /* 0xB9 */ op(Lda, Aby, 4, true),
    /* 0xBA */ op(Tsx, Imp, 2, false),
    /* 0xBB */ op(Nop, Aby, 4, true),
    /* 0xBC */ op(Ldy, Abx, 4, true),
    /* 0xBD */ op(Lda, Abx, 4, true),
    /* 0xBE */ op(Ldx, Aby, 4, true),
    /* 0xBF */ op(Nop, Aby, 4, true),
    /* 0xC0 */ op(Cpy, Imm, 2, false),
    /* 0xC1 */ op(Cmp, Izx, 6, false),
    /* 0xC2 */ op(Nop, Imm, 2, false),
    /* 0xC3 */ op(Nop, Izx, 8, false),
    /* 0xC4 */ op(Cpy, Zp,  3, false),
    /* 0xC5 */ op(Cmp, Zp,  3, false),
    /* 0xC6 */ op(Dec, Zp,  5, false),
    /* 0xC7 */ op(Nop, Zp,  5, false),
    /* 0xC8 */ op(Iny, Imp, 2, false),
    /* 0xC9 */ op(Cmp, Imm, 2, false),
    /* 0xCA */ op(Dex, Imp, 2, false),
    /* 0xCB */ op(Nop, Imm, 2, false),
    /* 0xCC */ op(Cpy, Abs, 4, false),
    /* 0xCD */ op(Cmp, Abs, 4, false),
    /* 0xCE */ op(Dec, Abs, 6, false),
    /* 0xCF */ op(Nop, Abs, 6, false),
    /* 0xD0 */ op(Bne, Rel, 2, false),
    /* 0xD1 */ op(Cmp, Izy, 5, true),
    /* 0xD2 */ op(Nop, Imp, 2, false),
    /* 0xD3 */ op(Nop, Izy, 8, false),
    /* 0xD4 */ op(Nop, Zpx, 4, false),
    /* 0xD5 */ op(Cmp, Zpx, 4, false),
    /* 0xD6 */ op(Dec, Zpx, 6, false),
    /* 0xD7 */ op(Nop, Zpx, 6, false),
    /* 0xD8 */ op(Cld, Imp, 2, false),
    /* 0xD9 */ op(Cmp, Aby, 4, true),
    /* 0xDA */ op(Nop, Imp, 2, false),
    /* 0xDB */ op(Nop, Aby, 7, false),
    /* 0xDC */ op(Nop, Abx, 4, true),
    /* 0xDD */ op(Cmp, Abx, 4, true),
    /* 0xDE */ op(Dec, Abx, 7, false),
    /* 0xDF */ op(Nop, Abx, 7, false),
    /* 0xE0 */ op(Cpx, Imm, 2, false),
    /* 0xE1 */ op(Sbc, Izx, 6, false),
    /* 0xE2 */ op(Nop, Imm, 2, false),
    /* 0xE3 */ op(Nop, Izx, 8, false),
    /* 0xE4 */ op(Cpx, Zp,  3, false),
    /* 0xE5 */ op(Sbc, Zp,  3, false),
    /* 0xE6 */ op(Inc, Zp,  5, false),
    /* 0xE7 */ op(Nop, Zp,  5, false),
    /* 0xE8 */ op(Inx, Imp, 2, false),
    /* 0xE9 */ op(Sbc, Imm, 2, false),
    /* 0xEA */ op(Nop, Imp, 2, false),
    /* 0xEB */ op(Nop, Imm, 2, false),
    /* 0xEC */ op(Cpx, Abs, 4, false),
    /* 0xED */ op(Sbc, Abs, 4, false),
    /* 0xEE */ op(Inc, Abs, 6, false),
    /* 0xEF */ op(Nop, Abs, 6, false),
    /* 0xF0 */ op(Beq, Rel, 2, false),
    /* 0xF1 */ op(Sbc, Izy, 5, true),
    /* 0xF2 */ op(Nop, Imp, 2, false),
    /* 0xF3 */ op(Nop, Izy, 8, false),
    /* 0xF4 */ op(Nop, Zpx, 4, false),
    /* 0xF5 */ op(Sbc, Zpx, 4, false),
    /* 0xF6 */ op(Inc, Zpx, 6, false),
    /* 0xF7 */ op(Nop, Zpx, 6, false),
    /* 0xF8 */ op(Sed, Imp, 2, false),
    /* 0xF9 */ op(Sbc, Aby, 4, true),
    /* 0xFA */ op(Nop, Imp, 2, false),
    /* 0xFB */ op(Nop, Aby, 7, false),
    /* 0xFC */ op(Nop, Abx, 4, true),
    /* 0xFD */ op(Sbc, Abx, 4, true),
    /* 0xFE */ op(Inc, Abx, 7, false),
    /* 0xFF */ op(Nop, Abx, 7, false),
];
