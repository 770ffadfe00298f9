use nxu8_rs::build_mask;

#[test]
fn mask_length_matches_input() {
    let data = [0x01, 0x80, 0x1f, 0xfe];
    assert_eq!(build_mask(&data).len(), data.len());
}

#[test]
fn operand_and_data_bytes_are_masked_out() {
    let data = [
        0x05, 0xc9, // beq +05h, form mask 0xff00
        0x01, 0xf2, 0x56, 0x34, // bl 2h:3456h, form mask 0xf0ff + data word
        0x1f, 0xfe, // rt, fully fixed encoding
    ];
    let mask = build_mask(&data);
    assert_eq!(mask, vec![0x00, 0xff, 0xff, 0xf0, 0x00, 0x00, 0xff, 0xff]);
}

#[test]
fn unrecognized_words_match_anything() {
    // an illegal word gets a zero mask and the walk continues past it
    let data = [0x1f, 0xf0, 0x8f, 0xfe];
    assert_eq!(build_mask(&data), vec![0x00, 0x00, 0xff, 0xff]);
}

#[test]
fn odd_trailing_byte_keeps_full_mask() {
    let data = [0x01, 0x80, 0x12];
    assert_eq!(build_mask(&data), vec![0x0f, 0xf0, 0xff]);
}

#[test]
fn same_routine_with_different_registers_compares_equal() {
    // add rN, rM; st rN, [erM]; rt
    let a = [0x01, 0x80, 0x21, 0x90, 0x1f, 0xfe];
    let b = [0x51, 0x84, 0x61, 0x92, 0x1f, 0xfe];
    let (ma, mb) = (build_mask(&a), build_mask(&b));
    assert_eq!(ma, mb);
    for i in 0..a.len() {
        assert_eq!(a[i] & ma[i], b[i] & mb[i], "byte {i}");
    }
}
