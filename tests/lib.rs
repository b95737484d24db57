extern crate iforth;

use iforth::core::Core;
use iforth::vm::VM;

fn run(source: &str) -> VM {
    let mut vm = VM::new();
    vm.set_source(source);
    vm.evaluate();
    vm
}

fn output(vm: &mut VM) -> Vec<u8> {
    vm.output_buffer().clone().unwrap_or_default()
}

#[test]
fn test_operand_order() {
    let mut vm = run("2 1 - .");
    assert_eq!(vm.last_error(), None);
    assert_eq!(output(&mut vm).as_slice(), b"1\n");
}

#[test]
fn test_definition_call_and_return() {
    let mut vm = run(": foo 1 + ; 41 foo .");
    assert_eq!(vm.last_error(), None);
    assert_eq!(output(&mut vm).as_slice(), b"42\n");
}

#[test]
fn test_conditional_true_branch() {
    let mut vm = run("1 if .\"yes\" else .\"no\" then cr");
    assert_eq!(vm.last_error(), None);
    assert_eq!(output(&mut vm).as_slice(), b"yes\n");
}

#[test]
fn test_conditional_false_branch() {
    let mut vm = run("0 if .\"yes\" else .\"no\" then cr");
    assert_eq!(vm.last_error(), None);
    assert_eq!(output(&mut vm).as_slice(), b"no\n");
}

#[test]
fn test_counting_loop_through_word_reentry() {
    let mut vm = run(": count dup . 1 - dup 0 > if branch count then drop ; 3 count");
    assert_eq!(vm.last_error(), None);
    assert_eq!(output(&mut vm).as_slice(), b"3\n2\n1\n");
    assert!(vm.s_stack().is_empty());
}

#[test]
fn test_label_loop_bounded_by_stepping() {
    let mut vm = VM::new();
    vm.set_source("[top] 1 . branch top");
    for _ in 0..20 {
        vm.step();
    }
    assert_eq!(vm.last_error(), None);
    assert_eq!(output(&mut vm).as_slice(), b"1\n1\n1\n1\n1\n");
}

#[test]
fn test_string_escape_deescapes_to_newline() {
    let mut vm = run(".\"hello\\nworld\" cr");
    assert_eq!(vm.last_error(), None);
    assert_eq!(output(&mut vm).as_slice(), b"hello\nworld\n");
}

#[test]
fn test_string_round_trip() {
    let mut vm = run("\"The quick brown fox.\" .s");
    assert_eq!(vm.last_error(), None);
    assert_eq!(output(&mut vm).as_slice(), b"The quick brown fox.");
}

#[test]
fn test_dot_quote_matches_push_then_drain() {
    let mut a = run(".\"lorem ipsum\"");
    let mut b = run("\"lorem ipsum\" .s");
    assert_eq!(a.last_error(), None);
    assert_eq!(output(&mut a), output(&mut b));
}

#[test]
fn test_quotient_remainder_reconstruction() {
    for &(a, b) in &[(17, 5), (-17, 5), (17, 1), (0, 3), (100, 7)] {
        let source = format!("{} {} / {} * {} {} % +", a, b, b, a, b);
        let mut vm = run(&source);
        assert_eq!(vm.last_error(), None);
        assert_eq!(vm.s_stack().as_slice(), [a]);
    }
}

#[test]
fn test_isize_boundary_values_cannot_panic() {
    let mut vm = run("9223372036854775807 1 +");
    assert_eq!(vm.last_error(), None);
    assert_eq!(vm.s_stack().as_slice(), [isize::min_value()]);
    let mut vm = run("branch 9223372036854775807 7");
    assert_eq!(vm.last_error(), None);
    assert!(vm.s_stack().is_empty());
}

#[test]
fn test_noop_word_is_idempotent() {
    let mut vm = run("1 2 : noop ; noop");
    assert_eq!(vm.last_error(), None);
    assert_eq!(vm.s_stack().as_slice(), [1, 2]);
}

#[test]
fn test_stack_word_heights() {
    let mut vm = run("1 2 dup");
    assert_eq!(vm.s_stack().len(), 3);
    let mut vm = run("1 2 drop");
    assert_eq!(vm.s_stack().len(), 1);
    let mut vm = run("1 2 swap swap");
    assert_eq!(vm.s_stack().as_slice(), [1, 2]);
    let mut vm = run("1 2 over");
    assert_eq!(vm.s_stack().len(), 3);
}

#[test]
fn test_exit_codes() {
    let mut vm = VM::new();
    vm.set_source("7");
    assert_eq!(vm.run(), 7);
    let mut vm = VM::new();
    vm.set_source("1 2 3");
    assert_eq!(vm.run(), 3);
    let mut vm = VM::new();
    vm.set_source(": foo 1 ; foo drop");
    assert_eq!(vm.run(), 0);
}

#[test]
fn test_instruction_pointer_stays_in_range() {
    let mut vm = VM::new();
    vm.set_source("branch 99 : foo 1 ; foo foo");
    loop {
        let ip = vm.ip();
        assert!(ip <= vm.tokens().len());
        if vm.at_end() || vm.last_error().is_some() {
            break;
        }
        vm.step();
    }
}

#[test]
fn test_demo_program_shape() {
    let mut vm = run(": hello \"hello world\\n\" .s ; hello 1 2 + .");
    assert_eq!(vm.last_error(), None);
    assert_eq!(output(&mut vm).as_slice(), b"hello world\n3\n");
}
