use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Instruction forms, as per "nX-U8/100 Core Instruction Manual", Ch.4
/// Appendix. Discriminants double as indices into [`TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum InsnId {
    // Arithmetic instructions
    AddR = 0,
    AddO,
    AddEr,
    AddErO,
    AddcR,
    AddcO,
    AndR,
    AndO,
    CmpR,
    CmpO,
    CmpcR,
    CmpcO,
    MovEr,
    MovErO,
    MovR,
    MovO,
    OrR,
    OrO,
    XorR,
    XorO,
    CmpEr,
    SubR,
    SubcR,
    // Shift instructions
    SllR,
    SllO,
    SllcR,
    SllcO,
    SraR,
    SraO,
    SrlR,
    SrlO,
    SrlcR,
    SrlcO,
    // Load/store instructions
    LErEa,
    LErEap,
    LErEr,
    LErD16Er,
    LErD6Bp,
    LErD6Fp,
    LErDa,
    LREa,
    LREap,
    LREr,
    LRD16Er,
    LRD6Bp,
    LRD6Fp,
    LRDa,
    LXrEa,
    LXrEap,
    LQrEa,
    LQrEap,
    StErEa,
    StErEap,
    StErEr,
    StErD16Er,
    StErD6Bp,
    StErD6Fp,
    StErDa,
    StREa,
    StREap,
    StREr,
    StRD16Er,
    StRD6Bp,
    StRD6Fp,
    StRDa,
    StXrEa,
    StXrEap,
    StQrEa,
    StQrEap,
    // Control register access instructions
    AddSpO,
    MovEcsrR,
    MovElrEr,
    MovEpswR,
    MovErElr,
    MovErSp,
    MovPswR,
    MovPswO,
    MovREcsr,
    MovREpsw,
    MovRPsw,
    MovSpEr,
    // Push/pop instructions
    PushEr,
    PushQr,
    PushR,
    PushXr,
    PushRl,
    PopEr,
    PopQr,
    PopR,
    PopXr,
    PopRl,
    // Coprocessor data transfer instructions
    MovCrR,
    MovCerEa,
    MovCerEap,
    MovCrEa,
    MovCrEap,
    MovCxrEa,
    MovCxrEap,
    MovCqrEa,
    MovCqrEap,
    MovRCr,
    MovEaCer,
    MovEapCer,
    MovEaCr,
    MovEapCr,
    MovEaCxr,
    MovEapCxr,
    MovEaCqr,
    MovEapCqr,
    // EA register data transfer instructions
    LeaEr,
    LeaD16Er,
    LeaDa,
    // ALU instructions
    DaaR,
    DasR,
    NegR,
    // Bit access instructions
    SbR,
    SbDbit,
    RbR,
    RbDbit,
    TbR,
    TbDbit,
    // PSW access instructions
    Ei,
    Di,
    Sc,
    Rc,
    Cplc,
    // Conditional relative branch instructions
    Bge,
    Blt,
    Bgt,
    Ble,
    Bges,
    Blts,
    Bgts,
    Bles,
    Bne,
    Beq,
    Bnv,
    Bov,
    Bps,
    Bns,
    Bal,
    // Sign extension instruction
    ExtbwEr,
    // Software interrupt instructions
    SwiO,
    Brk,
    // Branch instructions
    BAd,
    BEr,
    BlAd,
    BlEr,
    // Multiplication and division instructions
    MulEr,
    DivEr,
    // Miscellaneous
    IncEa,
    DecEa,
    Rt,
    Rti,
    Nop,
    // DSR prefix 'instructions'
    PrePseg,
    PreDsr,
    PreR,
    // Undefined
    Ill,
}

/// 155 real forms + 3 DSR prefix forms + the illegal sentinel.
pub const INS_COUNT: usize = 159;

bitflags! {
    /// Condition flags an instruction may modify (informational only).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Flags: u8 {
        const C   = 1 << 5; // carry
        const Z   = 1 << 4; // zero
        const S   = 1 << 3; // sign
        const OV  = 1 << 2; // overflow
        const MIE = 1 << 1; // master interrupt enable
        const HC  = 1 << 0; // half carry
    }
}

/// One catalog entry. A 16-bit word matches iff `word & mask == pattern`.
#[derive(Debug, Clone, Copy)]
pub struct InsnDesc {
    pub id: InsnId,
    pub mnemonic: &'static str,
    /// Instruction length in 16-bit words (1 or 2), excluding any prefix.
    pub words: u8,
    /// Number of operands carried by the first word (0, 1 or 2).
    pub ops: u8,
    pub flags: Flags,
    pub pattern: u16,
    pub mask: u16,
    pub op1_mask: u16,
    pub op2_mask: u16,
}

#[allow(clippy::too_many_arguments)]
const fn ins(
    id: InsnId,
    mnemonic: &'static str,
    words: u8,
    ops: u8,
    flags: u8,
    pattern: u16,
    mask: u16,
    op1_mask: u16,
    op2_mask: u16,
) -> InsnDesc {
    InsnDesc {
        id,
        mnemonic,
        words,
        ops,
        flags: Flags::from_bits_retain(flags),
        pattern,
        mask,
        op1_mask,
        op2_mask,
    }
}

/// Master instruction table. Scan order is load-bearing: several patterns
/// overlap and decoding takes the first match, so entries must stay exactly
/// in this order. Two entries (`l r,Dadr` and `rb/tb Dbitadr`) deliberately
/// widen the mask given in the core manual to match the SDK disassembler.
#[rustfmt::skip]
pub const TABLE: [InsnDesc; INS_COUNT] = [
    // Arithmetic instructions
    ins(InsnId::AddR,      "add",   1, 2, 0b111101, 0x8001, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::AddO,      "add",   1, 2, 0b111101, 0x1000, 0xf000, 0x0f00, 0x00ff),
    ins(InsnId::AddEr,     "add",   1, 2, 0b111101, 0xf006, 0xf11f, 0x0f00, 0x00f0),
    ins(InsnId::AddErO,    "add",   1, 2, 0b111101, 0xe080, 0xf180, 0x0f00, 0x007f),
    ins(InsnId::AddcR,     "addc",  1, 2, 0b111101, 0x8006, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::AddcO,     "addc",  1, 2, 0b111101, 0x6000, 0xf000, 0x0f00, 0x00ff),
    ins(InsnId::AndR,      "and",   1, 2, 0b011000, 0x8002, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::AndO,      "and",   1, 2, 0b011000, 0x2000, 0xf000, 0x0f00, 0x00ff),
    ins(InsnId::CmpR,      "cmp",   1, 2, 0b111101, 0x8007, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::CmpO,      "cmp",   1, 2, 0b111101, 0x7000, 0xf000, 0x0f00, 0x00ff),
    ins(InsnId::CmpcR,     "cmpc",  1, 2, 0b111101, 0x8005, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::CmpcO,     "cmpc",  1, 2, 0b111101, 0x5000, 0xf000, 0x0f00, 0x00ff),
    ins(InsnId::MovEr,     "mov",   1, 2, 0b011000, 0xf005, 0xf11f, 0x0f00, 0x00f0),
    ins(InsnId::MovErO,    "mov",   1, 2, 0b011000, 0xe000, 0xf180, 0x0f00, 0x007f),
    ins(InsnId::MovR,      "mov",   1, 2, 0b011000, 0x8000, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::MovO,      "mov",   1, 2, 0b011000, 0x0000, 0xf000, 0x0f00, 0x00ff),
    ins(InsnId::OrR,       "or",    1, 2, 0b011000, 0x8003, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::OrO,       "or",    1, 2, 0b011000, 0x3000, 0xf000, 0x0f00, 0x00ff),
    ins(InsnId::XorR,      "xor",   1, 2, 0b011000, 0x8004, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::XorO,      "xor",   1, 2, 0b011000, 0x4000, 0xf000, 0x0f00, 0x00ff),
    ins(InsnId::CmpEr,     "cmp",   1, 2, 0b111101, 0xf007, 0xf11f, 0x0f00, 0x00f0),
    ins(InsnId::SubR,      "sub",   1, 2, 0b111101, 0x8008, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::SubcR,     "subc",  1, 2, 0b111101, 0x8009, 0xf00f, 0x0f00, 0x00f0),
    // Shift instructions
    ins(InsnId::SllR,      "sll",   1, 2, 0b100000, 0x800a, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::SllO,      "sll",   1, 2, 0b100000, 0x900a, 0xf08f, 0x0f00, 0x0070),
    ins(InsnId::SllcR,     "sllc",  1, 2, 0b100000, 0x800b, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::SllcO,     "sllc",  1, 2, 0b100000, 0x900b, 0xf08f, 0x0f00, 0x0070),
    ins(InsnId::SraR,      "sra",   1, 2, 0b100000, 0x800e, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::SraO,      "sra",   1, 2, 0b100000, 0x900e, 0xf08f, 0x0f00, 0x0070),
    ins(InsnId::SrlR,      "srl",   1, 2, 0b100000, 0x800c, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::SrlO,      "srl",   1, 2, 0b100000, 0x900c, 0xf08f, 0x0f00, 0x0070),
    ins(InsnId::SrlcR,     "srlc",  1, 2, 0b100000, 0x800d, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::SrlcO,     "srlc",  1, 2, 0b100000, 0x900d, 0xf08f, 0x0f00, 0x0070),
    // Load/store instructions
    ins(InsnId::LErEa,     "l",     1, 1, 0b011000, 0x9032, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::LErEap,    "l",     1, 1, 0b011000, 0x9052, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::LErEr,     "l",     1, 2, 0b011000, 0x9002, 0xf11f, 0x0f00, 0x00f0),
    ins(InsnId::LErD16Er,  "l",     2, 2, 0b011000, 0xa008, 0xf11f, 0x0f00, 0x00f0),
    ins(InsnId::LErD6Bp,   "l",     1, 2, 0b011000, 0xb000, 0xf1c0, 0x0f00, 0x003f),
    ins(InsnId::LErD6Fp,   "l",     1, 2, 0b011000, 0xb040, 0xf1c0, 0x0f00, 0x003f),
    ins(InsnId::LErDa,     "l",     2, 1, 0b011000, 0x9012, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::LREa,      "l",     1, 1, 0b011000, 0x9030, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::LREap,     "l",     1, 1, 0b011000, 0x9050, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::LREr,      "l",     1, 2, 0b011000, 0x9000, 0xf01f, 0x0f00, 0x00f0),
    ins(InsnId::LRD16Er,   "l",     2, 2, 0b011000, 0x9008, 0xf01f, 0x0f00, 0x00f0),
    ins(InsnId::LRD6Bp,    "l",     1, 2, 0b011000, 0xd000, 0xf0c0, 0x0f00, 0x003f),
    ins(InsnId::LRD6Fp,    "l",     1, 2, 0b011000, 0xd040, 0xf0c0, 0x0f00, 0x003f),
    // Core manual says mask 0xf0ff here; the SDK disassembler ignores the
    // third nibble and so do we.
    ins(InsnId::LRDa,      "l",     2, 1, 0b011000, 0x9010, 0xf01f, 0x0f00, 0x0000),
    ins(InsnId::LXrEa,     "l",     1, 1, 0b011000, 0x9034, 0xf3ff, 0x0f00, 0x0000),
    ins(InsnId::LXrEap,    "l",     1, 1, 0b011000, 0x9054, 0xf3ff, 0x0f00, 0x0000),
    ins(InsnId::LQrEa,     "l",     1, 1, 0b011000, 0x9036, 0xf7ff, 0x0f00, 0x0000),
    ins(InsnId::LQrEap,    "l",     1, 1, 0b011000, 0x9056, 0xf7ff, 0x0f00, 0x0000),
    ins(InsnId::StErEa,    "st",    1, 1, 0b000000, 0x9033, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::StErEap,   "st",    1, 1, 0b000000, 0x9053, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::StErEr,    "st",    1, 2, 0b000000, 0x9003, 0xf11f, 0x0f00, 0x00f0),
    ins(InsnId::StErD16Er, "st",    2, 2, 0b000000, 0xa009, 0xf11f, 0x0f00, 0x00f0),
    ins(InsnId::StErD6Bp,  "st",    1, 2, 0b000000, 0xb080, 0xf1c0, 0x0f00, 0x003f),
    ins(InsnId::StErD6Fp,  "st",    1, 2, 0b000000, 0xb0c0, 0xf1c0, 0x0f00, 0x003f),
    ins(InsnId::StErDa,    "st",    2, 1, 0b000000, 0x9013, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::StREa,     "st",    1, 1, 0b000000, 0x9031, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::StREap,    "st",    1, 1, 0b000000, 0x9051, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::StREr,     "st",    1, 2, 0b000000, 0x9001, 0xf01f, 0x0f00, 0x00f0),
    ins(InsnId::StRD16Er,  "st",    2, 2, 0b000000, 0x9009, 0xf01f, 0x0f00, 0x00f0),
    ins(InsnId::StRD6Bp,   "st",    1, 2, 0b000000, 0xd080, 0xf0c0, 0x0f00, 0x003f),
    ins(InsnId::StRD6Fp,   "st",    1, 2, 0b000000, 0xd0c0, 0xf0c0, 0x0f00, 0x003f),
    ins(InsnId::StRDa,     "st",    2, 1, 0b000000, 0x9011, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::StXrEa,    "st",    1, 1, 0b000000, 0x9035, 0xf3ff, 0x0f00, 0x0000),
    ins(InsnId::StXrEap,   "st",    1, 1, 0b000000, 0x9055, 0xf3ff, 0x0f00, 0x0000),
    ins(InsnId::StQrEa,    "st",    1, 1, 0b000000, 0x9037, 0xf7ff, 0x0f00, 0x0000),
    ins(InsnId::StQrEap,   "st",    1, 1, 0b000000, 0x9057, 0xf7ff, 0x0f00, 0x0000),
    // Control register access instructions
    ins(InsnId::AddSpO,    "add",   1, 1, 0b000000, 0xe100, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::MovEcsrR,  "mov",   1, 1, 0b000000, 0xa00f, 0xff0f, 0x00f0, 0x0000),
    ins(InsnId::MovElrEr,  "mov",   1, 1, 0b000000, 0xa00d, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::MovEpswR,  "mov",   1, 1, 0b000000, 0xa00c, 0xff0f, 0x00f0, 0x0000),
    ins(InsnId::MovErElr,  "mov",   1, 1, 0b000000, 0xa005, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::MovErSp,   "mov",   1, 1, 0b000000, 0xa01a, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::MovPswR,   "mov",   1, 1, 0b111111, 0xa00b, 0xff0f, 0x00f0, 0x0000),
    ins(InsnId::MovPswO,   "mov",   1, 1, 0b111111, 0xa00b, 0xff0f, 0x00f0, 0x0000),
    ins(InsnId::MovREcsr,  "mov",   1, 1, 0b000000, 0xa007, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::MovREpsw,  "mov",   1, 1, 0b000000, 0xa004, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::MovRPsw,   "mov",   1, 1, 0b000000, 0xa003, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::MovSpEr,   "mov",   1, 1, 0b000000, 0xa10a, 0xff1f, 0x00f0, 0x0000),
    // Push/pop instructions
    ins(InsnId::PushEr,    "push",  1, 1, 0b000000, 0xf05e, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::PushQr,    "push",  1, 1, 0b000000, 0xf07e, 0xf7ff, 0x0f00, 0x0000),
    ins(InsnId::PushR,     "push",  1, 1, 0b000000, 0xf04e, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::PushXr,    "push",  1, 1, 0b000000, 0xf06e, 0xf3ff, 0x0f00, 0x0000),
    ins(InsnId::PushRl,    "push",  1, 1, 0b000000, 0xf0ce, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::PopEr,     "pop",   1, 1, 0b000000, 0xf01e, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::PopQr,     "pop",   1, 1, 0b000000, 0xf03e, 0xf7ff, 0x0f00, 0x0000),
    ins(InsnId::PopR,      "pop",   1, 1, 0b000000, 0xf00e, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::PopXr,     "pop",   1, 1, 0b000000, 0xf02e, 0xf3ff, 0x0f00, 0x0000),
    ins(InsnId::PopRl,     "pop",   1, 1, 0b111111, 0xf08e, 0xf0ff, 0x0f00, 0x0000),
    // Coprocessor data transfer instructions
    ins(InsnId::MovCrR,    "mov",   1, 2, 0b000000, 0xa00e, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::MovCerEa,  "mov",   1, 1, 0b000000, 0xf02d, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::MovCerEap, "mov",   1, 1, 0b000000, 0xf03d, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::MovCrEa,   "mov",   1, 1, 0b000000, 0xf00d, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::MovCrEap,  "mov",   1, 1, 0b000000, 0xf01d, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::MovCxrEa,  "mov",   1, 1, 0b000000, 0xf04d, 0xf3ff, 0x0f00, 0x0000),
    ins(InsnId::MovCxrEap, "mov",   1, 1, 0b000000, 0xf05d, 0xf3ff, 0x0f00, 0x0000),
    ins(InsnId::MovCqrEa,  "mov",   1, 1, 0b000000, 0xf06d, 0xf7ff, 0x0f00, 0x0000),
    ins(InsnId::MovCqrEap, "mov",   1, 1, 0b000000, 0xf07d, 0xf7ff, 0x0f00, 0x0000),
    ins(InsnId::MovRCr,    "mov",   1, 2, 0b000000, 0xa006, 0xf00f, 0x0f00, 0x00f0),
    ins(InsnId::MovEaCer,  "mov",   1, 1, 0b000000, 0xf0ad, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::MovEapCer, "mov",   1, 1, 0b000000, 0xf0bd, 0xf1ff, 0x0f00, 0x0000),
    ins(InsnId::MovEaCr,   "mov",   1, 1, 0b000000, 0xf08d, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::MovEapCr,  "mov",   1, 1, 0b000000, 0xf09d, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::MovEaCxr,  "mov",   1, 1, 0b000000, 0xf0cd, 0xf3ff, 0x0f00, 0x0000),
    ins(InsnId::MovEapCxr, "mov",   1, 1, 0b000000, 0xf0dd, 0xf3ff, 0x0f00, 0x0000),
    ins(InsnId::MovEaCqr,  "mov",   1, 1, 0b000000, 0xf0ed, 0xf7ff, 0x0f00, 0x0000),
    ins(InsnId::MovEapCqr, "mov",   1, 1, 0b000000, 0xf0fd, 0xf7ff, 0x0f00, 0x0000),
    // EA register data transfer instructions
    ins(InsnId::LeaEr,     "lea",   1, 1, 0b000000, 0xf00a, 0xf01f, 0x00f0, 0x0000),
    ins(InsnId::LeaD16Er,  "lea",   2, 1, 0b000000, 0xf00b, 0xf01f, 0x00f0, 0x0000),
    ins(InsnId::LeaDa,     "lea",   2, 1, 0b000000, 0xf00c, 0xffff, 0x0000, 0x0000),
    // ALU instructions
    ins(InsnId::DaaR,      "daa",   1, 1, 0b111001, 0x801f, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::DasR,      "das",   1, 1, 0b111001, 0x803f, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::NegR,      "neg",   1, 1, 0b111101, 0x805f, 0xf0ff, 0x0f00, 0x0000),
    // Bit access instructions
    ins(InsnId::SbR,       "sb",    1, 2, 0b010000, 0xa000, 0xf08f, 0x0f00, 0x0070),
    ins(InsnId::SbDbit,    "sb",    2, 1, 0b010000, 0xa080, 0xff8f, 0x0070, 0x0000),
    ins(InsnId::RbR,       "rb",    1, 2, 0b010000, 0xa002, 0xf08f, 0x0f00, 0x0070),
    // Core manual says mask 0xff8f for rb/tb Dbitadr; the SDK disassembler
    // ignores the second nibble and so do we.
    ins(InsnId::RbDbit,    "rb",    2, 1, 0b010000, 0xa082, 0xf08f, 0x0070, 0x0000),
    ins(InsnId::TbR,       "tb",    1, 2, 0b010000, 0xa001, 0xf08f, 0x0f00, 0x0070),
    ins(InsnId::TbDbit,    "tb",    2, 1, 0b010000, 0xa081, 0xf08f, 0x0070, 0x0000),
    // PSW access instructions
    ins(InsnId::Ei,        "ei",    1, 0, 0b000010, 0xed08, 0xffff, 0x0000, 0x0000),
    ins(InsnId::Di,        "di",    1, 0, 0b000010, 0xebf7, 0xffff, 0x0000, 0x0000),
    ins(InsnId::Sc,        "sc",    1, 0, 0b100000, 0xed80, 0xffff, 0x0000, 0x0000),
    ins(InsnId::Rc,        "rc",    1, 0, 0b100000, 0xeb7f, 0xffff, 0x0000, 0x0000),
    ins(InsnId::Cplc,      "cplc",  1, 0, 0b100000, 0xfecf, 0xffff, 0x0000, 0x0000),
    // Conditional relative branch instructions
    ins(InsnId::Bge,       "bge",   1, 1, 0b000000, 0xc000, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Blt,       "blt",   1, 1, 0b000000, 0xc100, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Bgt,       "bgt",   1, 1, 0b000000, 0xc200, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Ble,       "ble",   1, 1, 0b000000, 0xc130, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Bges,      "bges",  1, 1, 0b000000, 0xc400, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Blts,      "blts",  1, 1, 0b000000, 0xc500, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Bgts,      "bgts",  1, 1, 0b000000, 0xc600, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Bles,      "bles",  1, 1, 0b000000, 0xc700, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Bne,       "bne",   1, 1, 0b000000, 0xc800, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Beq,       "beq",   1, 1, 0b000000, 0xc900, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Bnv,       "bnv",   1, 1, 0b000000, 0xca00, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Bov,       "bov",   1, 1, 0b000000, 0xcb00, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Bps,       "bps",   1, 1, 0b000000, 0xcc00, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Bns,       "bns",   1, 1, 0b000000, 0xcd00, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::Bal,       "bal",   1, 1, 0b000000, 0xce00, 0xff00, 0x00ff, 0x0000),
    // Sign extension instruction
    ins(InsnId::ExtbwEr,   "extbw", 1, 2, 0b011000, 0x810f, 0xf11f, 0x0f00, 0x00f0),
    // Software interrupt instructions
    ins(InsnId::SwiO,      "swi",   1, 1, 0b000010, 0xe500, 0xffc0, 0x003f, 0x0000),
    ins(InsnId::Brk,       "brk",   1, 0, 0b000000, 0xffff, 0xffff, 0x0000, 0x0000),
    // Branch instructions
    ins(InsnId::BAd,       "b",     2, 1, 0b000000, 0xf000, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::BEr,       "b",     1, 1, 0b000000, 0xf002, 0xff1f, 0x00f0, 0x0000),
    ins(InsnId::BlAd,      "bl",    2, 1, 0b000000, 0xf001, 0xf0ff, 0x0f00, 0x0000),
    ins(InsnId::BlEr,      "bl",    1, 1, 0b000000, 0xf003, 0xf00f, 0x00f0, 0x0000),
    // Multiplication and division instructions
    ins(InsnId::MulEr,     "mul",   1, 2, 0b010000, 0xf004, 0xf10f, 0x0f00, 0x00f0),
    ins(InsnId::DivEr,     "div",   1, 2, 0b110000, 0xf009, 0xf10f, 0x0f00, 0x00f0),
    // Miscellaneous
    ins(InsnId::IncEa,     "inc",   1, 0, 0b011101, 0xfe2f, 0xffff, 0x0000, 0x0000),
    ins(InsnId::DecEa,     "dec",   1, 0, 0b011101, 0xfe3f, 0xffff, 0x0000, 0x0000),
    ins(InsnId::Rt,        "rt",    1, 0, 0b000000, 0xfe1f, 0xffff, 0x0000, 0x0000),
    ins(InsnId::Rti,       "rti",   1, 0, 0b111111, 0xfe0f, 0xffff, 0x0000, 0x0000),
    ins(InsnId::Nop,       "nop",   1, 0, 0b000000, 0xfe8f, 0xffff, 0x0000, 0x0000),
    // DSR prefix 'instructions' for load/store
    ins(InsnId::PrePseg,   "dsr",   2, 1, 0b011000, 0xe300, 0xff00, 0x00ff, 0x0000),
    ins(InsnId::PreDsr,    "dsr",   2, 0, 0b011000, 0xfe9f, 0xffff, 0x0000, 0x0000),
    ins(InsnId::PreR,      "dsr",   2, 1, 0b011000, 0x900f, 0xff0f, 0x00f0, 0x0000),
    // Undefined; the mask/pattern pair can never match, so this entry is only
    // reached through the lookup fallback
    ins(InsnId::Ill,       "dw",    1, 0, 0b000000, 0xffff, 0x0000, 0x0000, 0x0000),
];

/// Descriptor for a given instruction id.
pub fn desc(id: InsnId) -> &'static InsnDesc {
    &TABLE[id as usize]
}

/// First-match scan of the catalog. Unrecognized words resolve to the
/// illegal sentinel rather than an error.
pub fn lookup(word: u16) -> &'static InsnDesc {
    TABLE
        .iter()
        .find(|e| word & e.mask == e.pattern)
        .unwrap_or(desc(InsnId::Ill))
}
