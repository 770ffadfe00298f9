use nxu8_rs::{classify, decode, fmt_decoded, OpCategory};

fn classified(bytes: &[u8], addr: u32) -> (String, nxu8_rs::OpInfo) {
    let d = decode(bytes).unwrap();
    (fmt_decoded(&d), classify(&d, addr))
}

#[test]
fn forward_conditional_branch() {
    let (text, info) = classified(&[0x05, 0xc9], 0x1000);
    assert_eq!(text, "beq +05h");
    assert_eq!(info.category, OpCategory::CondJmp);
    assert_eq!(info.jump, Some(0x100c));
    assert_eq!(info.fail, Some(0x1002));
}

#[test]
fn backward_unconditional_branch() {
    let (text, info) = classified(&[0xfe, 0xce], 0x2000);
    assert_eq!(text, "bal -02h");
    assert_eq!(info.category, OpCategory::Jmp);
    assert_eq!(info.jump, Some(0x1ffe));
    assert_eq!(info.fail, None);
}

#[test]
fn far_call_resolves_segment_and_offset() {
    let (text, info) = classified(&[0x01, 0xf2, 0x56, 0x34], 0x100);
    assert_eq!(text, "bl 2h:3456h");
    assert_eq!(info.category, OpCategory::Call);
    assert_eq!(info.jump, Some(0x2_3456));
}

#[test]
fn near_branch_target_stays_unresolved() {
    // destination segment comes from csr at run time
    let (text, info) = classified(&[0x00, 0xf0, 0x00, 0x10], 0);
    assert_eq!(text, "b 0h:1000h");
    assert_eq!(info.category, OpCategory::Call);
    assert_eq!(info.jump, None);
}

#[test]
fn register_branches_are_indirect_calls() {
    let (text, info) = classified(&[0x22, 0xf0], 0);
    assert_eq!(text, "b er2");
    assert_eq!(info.category, OpCategory::IndirectCall);
    assert_eq!(info.jump, None);

    let (text, info) = classified(&[0x23, 0xf0], 0);
    assert_eq!(text, "bl er2");
    assert_eq!(info.category, OpCategory::IndirectCall);
}

#[test]
fn traps_and_returns() {
    let (_, swi) = classified(&[0x05, 0xe5], 0);
    assert_eq!(swi.category, OpCategory::Trap);
    let (_, rt) = classified(&[0x1f, 0xfe], 0);
    assert_eq!(rt.category, OpCategory::Ret);
    let (_, rti) = classified(&[0x0f, 0xfe], 0);
    assert_eq!(rti.category, OpCategory::Ret);
}

#[test]
fn displacement_covers_the_full_signed_range() {
    // +7f reaches addr+0x100, -80 reaches addr-0xfe
    let (_, fwd) = classified(&[0x7f, 0xce], 0x1000);
    assert_eq!(fwd.jump, Some(0x1100));
    let (_, back) = classified(&[0x80, 0xce], 0x1000);
    assert_eq!(back.jump, Some(0x0f02));
}
