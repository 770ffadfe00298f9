//! Control-flow classification and signature-mask generation.
//!
//! [`classify`] maps a decoded instruction to a coarse operation category
//! plus resolved jump/fallthrough targets where the encoding pins them down.
//! Callers building a flow graph treat a missing jump target on a call or
//! indirect branch as an unknown successor.

use serde::Serialize;

use crate::catalog::{self, InsnId};
use crate::decoder::Decoded;

/// Coarse operation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OpCategory {
    /// Arithmetic, logic, compare and shift forms.
    Arith,
    /// Register and coprocessor moves.
    Mov,
    Load,
    Store,
    Push,
    Pop,
    Lea,
    /// Unconditional relative branch.
    Jmp,
    /// Conditional relative branch.
    CondJmp,
    /// Direct subroutine call.
    Call,
    /// Call through a register pair.
    IndirectCall,
    Ret,
    /// Software interrupt or break.
    Trap,
    Mul,
    Div,
    Nop,
    /// Executes without any control-flow relevance (bit ops, PSW access,
    /// decimal adjust and friends).
    Null,
    Ill,
}

/// Direction of the stack pointer move, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StackEffect {
    #[default]
    None,
    Push,
    Pop,
}

/// Classification of one instruction at a known address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpInfo {
    pub category: OpCategory,
    /// Bytes consumed, copied from the decode.
    pub size: usize,
    /// Branch or call destination when the encoding resolves it.
    pub jump: Option<u32>,
    /// Fallthrough address of conditional branches.
    pub fail: Option<u32>,
    pub stack: StackEffect,
}

/// Target of a relative branch: next word, plus a signed word displacement.
fn rel_target(addr: u32, disp: u16) -> u32 {
    let words = (disp as u8 as i8) as i32;
    addr.wrapping_add(2).wrapping_add((words as u32).wrapping_mul(2))
}

/// Classify `d`, decoded at `addr`.
pub fn classify(d: &Decoded, addr: u32) -> OpInfo {
    use InsnId::*;

    let mut info = OpInfo {
        category: OpCategory::Ill,
        size: d.size,
        jump: None,
        fail: None,
        stack: StackEffect::None,
    };

    info.category = match d.kind {
        AddR | AddO | AddEr | AddErO | AddcR | AddcO | AndR | AndO | CmpR | CmpO | CmpcR
        | CmpcO | OrR | OrO | XorR | XorO | CmpEr | SubR | SubcR | SllR | SllO | SllcR | SllcO
        | SraR | SraO | SrlR | SrlO | SrlcR | SrlcO | AddSpO => OpCategory::Arith,

        MovEr | MovErO | MovR | MovO | MovEcsrR | MovElrEr | MovEpswR | MovErElr | MovErSp
        | MovPswR | MovPswO | MovREcsr | MovREpsw | MovRPsw | MovSpEr | MovCrR | MovCerEa
        | MovCerEap | MovCrEa | MovCrEap | MovCxrEa | MovCxrEap | MovCqrEa | MovCqrEap
        | MovRCr | MovEaCer | MovEapCer | MovEaCr | MovEapCr | MovEaCxr | MovEapCxr
        | MovEaCqr | MovEapCqr => OpCategory::Mov,

        LErEa | LErEap | LErEr | LErD16Er | LErD6Bp | LErD6Fp | LErDa | LREa | LREap | LREr
        | LRD16Er | LRD6Bp | LRD6Fp | LRDa | LXrEa | LXrEap | LQrEa | LQrEap => OpCategory::Load,

        StErEa | StErEap | StErEr | StErD16Er | StErD6Bp | StErD6Fp | StErDa | StREa | StREap
        | StREr | StRD16Er | StRD6Bp | StRD6Fp | StRDa | StXrEa | StXrEap | StQrEa
        | StQrEap => OpCategory::Store,

        PushEr | PushQr | PushR | PushXr | PushRl => {
            info.stack = StackEffect::Push;
            OpCategory::Push
        }
        PopEr | PopQr | PopR | PopXr => {
            info.stack = StackEffect::Pop;
            OpCategory::Pop
        }
        PopRl => {
            info.stack = StackEffect::Pop;
            // list values restoring pc together with psw/lr act as returns;
            // other pc-bearing values are left as plain pops pending a
            // survey of real firmware (core manual return types A-2, B-*,
            // C-*)
            match d.op1 & 0xf {
                0x2 | 0x6 | 0xe => OpCategory::Ret,
                _ => OpCategory::Pop,
            }
        }

        LeaEr | LeaD16Er | LeaDa => OpCategory::Lea,

        DaaR | DasR | NegR | SbR | SbDbit | RbR | RbDbit | TbR | TbDbit | Ei | Di | Sc | Rc
        | Cplc | ExtbwEr | IncEa | DecEa => OpCategory::Null,

        Bge | Blt | Bgt | Ble | Bges | Blts | Bgts | Bles | Bne | Beq | Bnv | Bov | Bps
        | Bns => {
            info.jump = Some(rel_target(addr, d.op1));
            info.fail = Some(addr.wrapping_add(2));
            OpCategory::CondJmp
        }
        Bal => {
            info.jump = Some(rel_target(addr, d.op1));
            OpCategory::Jmp
        }

        SwiO | Brk => OpCategory::Trap,

        // destination segment of a plain `b` is held in CSR at run time,
        // so no static target
        BAd => OpCategory::Call,
        BlAd => {
            info.jump =
                Some((d.op1 as u32) * 0x10000 + u32::from(d.s_word.unwrap_or(0)));
            OpCategory::Call
        }
        BEr | BlEr => OpCategory::IndirectCall,

        MulEr => OpCategory::Mul,
        DivEr => OpCategory::Div,

        Rt | Rti => OpCategory::Ret,
        Nop => OpCategory::Nop,

        Ill | PrePseg | PreDsr | PreR => OpCategory::Ill,
    };

    info
}

/// Byte-level signature mask over a code region, for fuzzy function
/// matching. Operand bits are zeroed so two instances of the same routine
/// with different register allocations or literals still compare equal.
///
/// Walks the region instruction by instruction: opcode bytes take the
/// catalog mask of their form, the trailing word of 2-word forms is all
/// data and masked out entirely. Bytes past a truncated tail keep 0xff.
pub fn build_mask(data: &[u8]) -> Vec<u8> {
    let mut mask = vec![0xffu8; data.len()];
    let mut i = 0usize;
    while i + 1 < data.len() {
        let Ok(d) = crate::decoder::decode(&data[i..]) else {
            break;
        };
        if d.size == 4 {
            mask[i + 2] = 0;
            mask[i + 3] = 0;
        }
        let m = catalog::desc(d.kind).mask;
        mask[i] = m as u8;
        mask[i + 1] = (m >> 8) as u8;
        i += d.size;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;
    use pretty_assertions::assert_eq;

    fn classify_bytes(bytes: &[u8], addr: u32) -> OpInfo {
        classify(&decode(bytes).unwrap(), addr)
    }

    #[test]
    fn forward_conditional_branch_targets() {
        // beq +05h at 0x1000
        let info = classify_bytes(&[0x05, 0xc9], 0x1000);
        assert_eq!(info.category, OpCategory::CondJmp);
        assert_eq!(info.jump, Some(0x100c));
        assert_eq!(info.fail, Some(0x1002));
    }

    #[test]
    fn backward_unconditional_branch_has_no_fail() {
        // bal -02h at 0x2000
        let info = classify_bytes(&[0xfe, 0xce], 0x2000);
        assert_eq!(info.category, OpCategory::Jmp);
        assert_eq!(info.jump, Some(0x1ffe));
        assert_eq!(info.fail, None);
    }

    #[test]
    fn far_call_combines_segment_and_offset() {
        // bl 2h:3456h
        let info = classify_bytes(&[0x01, 0xf2, 0x56, 0x34], 0);
        assert_eq!(info.category, OpCategory::Call);
        assert_eq!(info.jump, Some(0x2_3456));
    }

    #[test]
    fn near_branch_and_register_calls_stay_unresolved() {
        let b = classify_bytes(&[0x00, 0xf0, 0x00, 0x10], 0); // b 0h:1000h
        assert_eq!(b.category, OpCategory::Call);
        assert_eq!(b.jump, None);
        let bl = classify_bytes(&[0x23, 0xf0], 0); // bl er2
        assert_eq!(bl.category, OpCategory::IndirectCall);
        assert_eq!(bl.jump, None);
    }

    #[test]
    fn pop_lists_with_return_shape_reclassify() {
        for (list, cat) in [
            (0x2u8, OpCategory::Ret),
            (0x6, OpCategory::Ret),
            (0xe, OpCategory::Ret),
            (0x1, OpCategory::Pop),
            (0x3, OpCategory::Pop), // pc bit set, still a pop
            (0xf, OpCategory::Pop),
        ] {
            let word = 0xf08e | (u16::from(list) << 8);
            let info = classify_bytes(&word.to_le_bytes(), 0);
            assert_eq!(info.category, cat, "list {list:#x}");
            assert_eq!(info.stack, StackEffect::Pop);
        }
    }

    #[test]
    fn stack_effects_follow_direction() {
        let push = classify_bytes(&[0x5e, 0xf0], 0); // push er0
        assert_eq!(push.category, OpCategory::Push);
        assert_eq!(push.stack, StackEffect::Push);
        let ret = classify_bytes(&[0x1f, 0xfe], 0); // rt
        assert_eq!(ret.category, OpCategory::Ret);
        assert_eq!(ret.stack, StackEffect::None);
    }

    #[test]
    fn mask_zeroes_operand_and_data_bytes() {
        // add r0, r0; l er0, 8000h; rt
        let data = [0x01, 0x80, 0x12, 0x90, 0x00, 0x80, 0x1f, 0xfe];
        let mask = build_mask(&data);
        assert_eq!(mask.len(), data.len());
        assert_eq!(&mask[0..2], &[0x0f, 0xf0]); // add r,r mask 0xf00f
        assert_eq!(&mask[2..4], &[0xff, 0xf1]); // l er,Dadr mask 0xf1ff
        assert_eq!(&mask[4..6], &[0x00, 0x00]); // trailing data word
        assert_eq!(&mask[6..8], &[0xff, 0xff]); // rt mask 0xffff
    }

    #[test]
    fn mask_keeps_truncated_tail() {
        let data = [0x01, 0x80, 0x32];
        let mask = build_mask(&data);
        assert_eq!(mask, vec![0x0f, 0xf0, 0xff]);
    }
}
