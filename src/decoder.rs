use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::bits::extract_field;
use crate::catalog::{self, InsnId};
use crate::disasm;
use crate::strbuf::FixedStr;

/// Decoding fails only on truncated input; unrecognized words decode as the
/// illegal sentinel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated instruction: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },
}

/// DSR addressing override carried by at most one prefix word. Lives only
/// for the duration of a single decode call and qualifies the operand text
/// of the instruction that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prefix {
    #[default]
    None,
    /// Page segment override with an 8-bit segment value.
    Seg(u8),
    /// Data segment register override.
    Dsr,
    /// Register override through r0..r15.
    Reg(u8),
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::None => Ok(()),
            Prefix::Seg(seg) => write!(f, "{seg:02x}h:"),
            Prefix::Dsr => f.write_str("dsr:"),
            Prefix::Reg(r) => write!(f, "r{r}:"),
        }
    }
}

/// One decoded instruction. Transient, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decoded {
    /// Catalog entry the instruction word resolved to.
    pub kind: InsnId,
    /// The matched instruction word (after any prefix word).
    pub opcode: u16,
    pub op1: u16,
    pub op2: u16,
    /// Trailing data word of 2-word forms.
    pub s_word: Option<u16>,
    /// Total bytes consumed including any prefix word: 2, 4 or 6.
    pub size: usize,
    pub mnemonic: FixedStr<5>,
    pub operands: FixedStr<19>,
}

fn read_word(buf: &[u8], word_index: usize) -> Result<u16, DecodeError> {
    let need = (word_index + 1) * 2;
    if buf.len() < need {
        return Err(DecodeError::Truncated {
            need,
            have: buf.len(),
        });
    }
    let at = word_index * 2;
    Ok(u16::from_le_bytes([buf[at], buf[at + 1]]))
}

/// Decode one instruction from the start of `buf`.
///
/// Words are read little-endian. A DSR prefix word is folded into the
/// following instruction: the result describes that instruction, with the
/// prefix visible only as an operand-text qualifier and in `size`.
/// `size` is always at least 2, so a caller walking a buffer by repeatedly
/// adding it makes progress even across data regions.
pub fn decode(buf: &[u8]) -> Result<Decoded, DecodeError> {
    let mut words = 1usize;
    let mut word = read_word(buf, 0)?;
    let mut entry = catalog::lookup(word);

    let prefix = match entry.id {
        InsnId::PrePseg => Prefix::Seg(extract_field(word, entry.op1_mask) as u8),
        InsnId::PreDsr => Prefix::Dsr,
        InsnId::PreR => Prefix::Reg(extract_field(word, entry.op1_mask) as u8),
        _ => Prefix::None,
    };
    if prefix != Prefix::None {
        // the word after the prefix selects the instruction actually decoded
        word = read_word(buf, words)?;
        words += 1;
        entry = catalog::lookup(word);
    }

    let s_word = if entry.words == 2 {
        let w = read_word(buf, words)?;
        words += 1;
        Some(w)
    } else {
        None
    };

    let op1 = if entry.ops >= 1 {
        extract_field(word, entry.op1_mask)
    } else {
        0
    };
    let op2 = if entry.ops == 2 {
        extract_field(word, entry.op2_mask)
    } else {
        0
    };

    Ok(Decoded {
        kind: entry.id,
        opcode: word,
        op1,
        op2,
        s_word,
        size: words * 2,
        mnemonic: FixedStr::from_str_lossy(entry.mnemonic),
        operands: disasm::operand_text(entry.id, word, op1, op2, s_word.unwrap_or(0), prefix),
    })
}
