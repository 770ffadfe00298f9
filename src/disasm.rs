//! Operand text rendering, one template per instruction family.
//!
//! The templates reproduce the SDK disassembler's output byte for byte,
//! including which load/store forms carry the DSR prefix qualifier and which
//! do not. Numbers are lowercase hex with an `h` suffix; 16-bit data words
//! are zero-padded to 4 digits, relative branch offsets to 2.

use std::fmt::Write as _;

use crate::bits::{abs6, abs7, is_neg6, is_neg7};
use crate::catalog::InsnId;
use crate::decoder::{Decoded, Prefix};
use crate::strbuf::FixedStr;

/// Register-list names for `push`, indexed by the 4-bit list field.
/// Index 0 cannot be produced by a well-formed encoder and renders as `?`.
const PUSH_LIST: [&str; 16] = [
    "?",
    "ea",
    "elr",
    "ea, elr",
    "epsw",
    "epsw, ea",
    "epsw, elr",
    "epsw, elr, ea",
    "lr",
    "lr, ea",
    "lr, elr",
    "lr, ea, elr",
    "lr, epsw",
    "lr, epsw, ea",
    "lr, epsw, elr",
    "lr, epsw, elr, ea",
];

/// Register-list names for `pop`. Same bit positions as `PUSH_LIST` but a
/// different name set: on pop, bit 1 restores pc and bit 2 psw.
const POP_LIST: [&str; 16] = [
    "?",
    "ea",
    "pc",
    "ea, pc",
    "psw",
    "ea, psw",
    "pc, psw",
    "ea, pc, psw",
    "lr",
    "ea, lr",
    "pc, lr",
    "ea, pc, lr",
    "lr, psw",
    "ea, psw, lr",
    "pc, psw, lr",
    "ea, pc, psw, lr",
];

/// Render the operand text for a resolved instruction. Pure; output beyond
/// the fixed width is silently dropped.
pub(crate) fn operand_text(
    id: InsnId,
    opcode: u16,
    op1: u16,
    op2: u16,
    s_word: u16,
    prefix: Prefix,
) -> FixedStr<19> {
    use InsnId::*;

    let mut s = FixedStr::new();
    let _ = match id {
        // 8-bit register instructions
        AddR | AndR | AddcR | CmpR | CmpcR | MovR | OrR | XorR | SubR | SubcR | SllR | SllcR
        | SraR | SrlR | SrlcR => write!(s, "r{op1}, r{op2}"),

        // 8-bit register/object instructions
        AddO | AndO | AddcO | CmpO | CmpcO | MovO | OrO | XorO | SllO | SllcO | SraO | SrlO
        | SrlcO => write!(s, "r{op1}, #{op2:x}h"),

        // 16-bit extended register instructions
        AddEr | MovEr | CmpEr => write!(s, "er{op1}, er{op2}"),

        // Extended register/object instructions, signed #imm7
        AddErO | MovErO => {
            if is_neg7(op2) {
                write!(s, "er{op1}, #-{:x}h", abs7(op2))
            } else {
                write!(s, "er{op1}, #{:x}h", abs7(op2))
            }
        }

        // Extended register load/store instructions
        LErEa | StErEa => write!(s, "er{op1}, {prefix}[ea]"),
        LErEap | StErEap => write!(s, "er{op1}, {prefix}[ea+]"),
        LErEr | StErEr => write!(s, "er{op1}, {prefix}[er{op2}]"),
        LErD16Er | StErD16Er => write!(s, "er{op1}, {s_word:04x}h[er{op2}]"),
        LErD6Bp | StErD6Bp => {
            if is_neg6(op2) {
                write!(s, "er{op1}, -{:x}h[bp]", abs6(op2))
            } else {
                write!(s, "er{op1}, {:x}h[bp]", abs6(op2))
            }
        }
        LErD6Fp | StErD6Fp => {
            if is_neg6(op2) {
                write!(s, "er{op1}, -{:x}h[fp]", abs6(op2))
            } else {
                write!(s, "er{op1}, {:x}h[fp]", abs6(op2))
            }
        }
        LErDa | StErDa => write!(s, "er{op1}, {s_word:04x}h"),

        // Register load/store instructions
        LREa | StREa => write!(s, "r{op1}, [ea]"),
        LREap | StREap => write!(s, "r{op1}, [ea+]"),
        LREr | StREr => write!(s, "r{op1}, [er{op2}]"),
        LRD16Er | StRD16Er => write!(s, "r{op1}, {prefix}{s_word:04x}h[er{op2}]"),
        LRD6Bp | StRD6Bp => {
            if is_neg6(op2) {
                write!(s, "r{op1}, {prefix}-{:x}h[bp]", abs6(op2))
            } else {
                write!(s, "r{op1}, {prefix}{:x}h[bp]", abs6(op2))
            }
        }
        LRD6Fp | StRD6Fp => {
            if is_neg6(op2) {
                write!(s, "r{op1}, {prefix}-{:x}h[fp]", abs6(op2))
            } else {
                write!(s, "r{op1}, {prefix}{:x}h[fp]", abs6(op2))
            }
        }
        LRDa | StRDa => write!(s, "r{op1}, {prefix}{s_word:04x}h"),

        // Double/quad word register load/store instructions
        LXrEa | StXrEa => write!(s, "xr{op1}, {prefix}[ea]"),
        LXrEap | StXrEap => write!(s, "xr{op1}, {prefix}[ea+]"),
        LQrEa | StQrEa => write!(s, "qr{op1}, {prefix}[ea]"),
        LQrEap | StQrEap => write!(s, "qr{op1}, {prefix}[ea+]"),

        // Control register access instructions
        AddSpO => write!(s, "sp, #{op1:x}h"),
        MovEcsrR => write!(s, "ecsr, r{op1}"),
        MovElrEr => write!(s, "elr, er{op1}"),
        MovEpswR => write!(s, "epsw, r{op1}"),
        MovErElr => write!(s, "er{op1}, elr"),
        MovErSp => write!(s, "er{op1}, sp"),
        MovPswR => write!(s, "psw, r{op1}"),
        MovPswO => write!(s, "psw, #{op1:x}h"),
        MovREcsr => write!(s, "r{op1}, ecsr"),
        MovREpsw => write!(s, "r{op1}, epsw"),
        MovRPsw => write!(s, "r{op1}, psw"),
        MovSpEr => write!(s, "sp, er{op1}"),

        // Push/pop instructions
        PushEr | PopEr => write!(s, "er{op1}"),
        PushQr | PopQr => write!(s, "qr{op1}"),
        PushR | PopR => write!(s, "r{op1}"),
        PushXr | PopXr => write!(s, "xr{op1}"),
        PushRl => s.write_str(PUSH_LIST[(op1 & 0xf) as usize]),
        PopRl => s.write_str(POP_LIST[(op1 & 0xf) as usize]),

        // Coprocessor data transfer instructions
        MovCrR => write!(s, "cr{op1}, r{op2}"),
        MovCerEa => write!(s, "cer{op1}, [ea]"),
        MovCerEap => write!(s, "cer{op1}, [ea+]"),
        MovCrEa => write!(s, "cr{op1}, [ea]"),
        MovCrEap => write!(s, "cr{op1}, [ea+]"),
        MovCxrEa => write!(s, "cxr{op1}, [ea]"),
        MovCxrEap => write!(s, "cxr{op1}, [ea+]"),
        MovCqrEa => write!(s, "cqr{op1}, [ea]"),
        MovCqrEap => write!(s, "cqr{op1}, [ea+]"),
        MovRCr => write!(s, "r{op1}, cr{op2}"),
        MovEaCer => write!(s, "[ea], cer{op1}"),
        MovEapCer => write!(s, "[ea+], cer{op1}"),
        MovEaCr => write!(s, "[ea], cr{op1}"),
        MovEapCr => write!(s, "[ea+], cr{op1}"),
        MovEaCxr => write!(s, "[ea], cxr{op1}"),
        MovEapCxr => write!(s, "[ea+], cxr{op1}"),
        MovEaCqr => write!(s, "[ea], cqr{op1}"),
        MovEapCqr => write!(s, "[ea+], cqr{op1}"),

        // EA register data transfer instructions
        LeaEr => write!(s, "[er{op1}]"),
        LeaD16Er => write!(s, "{s_word:04x}h[er{op1}]"),
        LeaDa => write!(s, "{s_word:04x}h"),

        // ALU instructions
        DaaR | DasR | NegR => write!(s, "r{op1}"),

        // Bit access instructions
        SbR | RbR | TbR => write!(s, "r{op1}.{op2}"),
        SbDbit | RbDbit | TbDbit => write!(s, "{s_word:04x}h.{op1}"),

        // PSW access instructions have no operands
        Ei | Di | Sc | Rc | Cplc => Ok(()),

        // Conditional relative branch instructions; offset is a signed
        // 8-bit word count
        Bge | Blt | Bgt | Ble | Bges | Blts | Bgts | Bles | Bne | Beq | Bnv | Bov | Bps | Bns
        | Bal => {
            let disp = op1 as u8 as i8;
            if disp < 0 {
                write!(s, "-{:02x}h", -(disp as i16))
            } else {
                write!(s, "+{disp:02x}h")
            }
        }

        // Sign extension names only the destination pair
        ExtbwEr => write!(s, "er{op2}"),

        // Software interrupt instructions
        SwiO => write!(s, "#{op1:x}h"),
        Brk => Ok(()),

        // Branch instructions
        BAd | BlAd => write!(s, "{op1:x}h:{s_word:04x}h"),
        BEr | BlEr => write!(s, "er{op1}"),

        // Multiplication and division instructions
        MulEr | DivEr => write!(s, "er{op1}, r{op2}"),

        // Miscellaneous, no operands
        IncEa | DecEa | Rt | Rti | Nop => Ok(()),

        // Illegal sentinel and stray prefix words render the raw word so
        // listings can show it as inline data
        Ill | PrePseg | PreDsr | PreR => write!(s, "{opcode:04x}h"),
    };
    s
}

/// Mnemonic and operand text of a decoded instruction.
pub fn format(d: &Decoded) -> (&str, &str) {
    (d.mnemonic.as_str(), d.operands.as_str())
}

/// One-line assembly rendering, `"<mnemonic> <operands>"`.
pub fn fmt_decoded(d: &Decoded) -> String {
    format!("{} {}", d.mnemonic, d.operands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;
    use pretty_assertions::assert_eq;

    #[test]
    fn register_list_tables_cover_all_values() {
        for v in 1..16u16 {
            assert_ne!(PUSH_LIST[v as usize], "?");
            assert_ne!(POP_LIST[v as usize], "?");
        }
        // same bit, different name set on the two directions
        assert_eq!(PUSH_LIST[2], "elr");
        assert_eq!(POP_LIST[2], "pc");
    }

    #[test]
    fn fmt_decoded_joins_mnemonic_and_operands() {
        let d = decode(&[0x01, 0x80]).unwrap();
        assert_eq!(fmt_decoded(&d), "add r0, r0");
        let (m, o) = format(&d);
        assert_eq!(m, "add");
        assert_eq!(o, "r0, r0");
    }
}
