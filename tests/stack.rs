use nxu8_rs::{classify, decode, OpCategory, StackEffect};

fn info_for_word(word: u16) -> nxu8_rs::OpInfo {
    classify(&decode(&word.to_le_bytes()).unwrap(), 0)
}

#[test]
fn single_register_push_and_pop() {
    let push = info_for_word(0xf05e); // push er0
    assert_eq!(push.category, OpCategory::Push);
    assert_eq!(push.stack, StackEffect::Push);

    let pop = info_for_word(0xf01e); // pop er0
    assert_eq!(pop.category, OpCategory::Pop);
    assert_eq!(pop.stack, StackEffect::Pop);
}

#[test]
fn register_list_push_is_never_a_return() {
    for list in 1..16u16 {
        let info = info_for_word(0xf0ce | (list << 8));
        assert_eq!(info.category, OpCategory::Push);
        assert_eq!(info.stack, StackEffect::Push);
    }
}

#[test]
fn return_shaped_pop_lists_reclassify() {
    // pc, then psw+pc, then pc+psw+lr
    for list in [0x2u16, 0x6, 0xe] {
        let info = info_for_word(0xf08e | (list << 8));
        assert_eq!(info.category, OpCategory::Ret, "list {list:#x}");
        assert_eq!(info.stack, StackEffect::Pop);
    }
}

#[test]
fn other_pop_lists_stay_pops() {
    // 0x3, 0x7, 0xa, 0xb and 0xf also restore pc but keep the pop class
    for list in [0x1u16, 0x3, 0x7, 0xa, 0xb, 0xf] {
        let info = info_for_word(0xf08e | (list << 8));
        assert_eq!(info.category, OpCategory::Pop, "list {list:#x}");
        assert_eq!(info.stack, StackEffect::Pop);
    }
}

#[test]
fn plain_returns_have_no_stack_tag() {
    let rt = info_for_word(0xfe1f);
    assert_eq!(rt.category, OpCategory::Ret);
    assert_eq!(rt.stack, StackEffect::None);
}
