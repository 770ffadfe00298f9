pub mod anal;
pub mod bits;
pub mod catalog;
pub mod decoder;
pub mod disasm;
pub mod strbuf;

pub use anal::{classify, build_mask, OpCategory, OpInfo, StackEffect};
pub use catalog::{Flags, InsnDesc, InsnId};
pub use decoder::{decode, DecodeError, Decoded};
pub use disasm::fmt_decoded;
pub use strbuf::FixedStr;
