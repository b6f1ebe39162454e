use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;

fn stream(indentation_size: usize) -> TextStream {
    TextStream::with_options(TextStreamOptions::new().with_indentation_size(indentation_size))
}

#[test]
fn write_at_depth_zero_is_verbatim() {
    let cs = stream(2);
    cs.write("plain\n");
    assert_eq!(cs.value().unwrap(), "plain\n");
}

#[test]
fn write_block_indents_body() {
    let cs = stream(2);
    cs.write_block("A{\n", || cs.write("B\n"), "}\n");
    assert_eq!(cs.value().unwrap(), "A{\n  B\n}\n");
}

#[test]
fn nested_indent_block_doubles_indent() {
    let cs = stream(2);
    cs.write_block(
        "A{\n",
        || {
            cs.indent_block(|| cs.write("B\n"));
        },
        "}\n",
    );
    assert_eq!(cs.value().unwrap(), "A{\n    B\n}\n");
}

#[test]
fn indent_block_returns_closure_value() {
    let cs = stream(2);
    let depth = cs.indent_block(|| cs.depth());
    assert_eq!(depth, 1);
    assert_eq!(cs.depth(), 0);
}

#[test]
fn depth_restored_after_panic() {
    let cs = stream(2);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        cs.indent_block(|| panic!("inside block"));
    }));
    assert!(result.is_err());
    assert_eq!(cs.depth(), 0);
}

#[test]
fn multi_line_write_indents_each_line() {
    let cs = stream(2);
    cs.indent_block(|| cs.write("a\nb\n"));
    assert_eq!(cs.value().unwrap(), "  a\n  b\n");
}

#[test]
fn blank_lines_are_padded() {
    let cs = stream(2);
    cs.indent_block(|| cs.write("a\n\nb\n"));
    assert_eq!(cs.value().unwrap(), "  a\n  \n  b\n");
}

#[test]
fn lone_newline_write_is_padded_inside_block() {
    let fragments = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&fragments);
    let cs = TextStream::with_sink(
        move |text: &str| seen.borrow_mut().push(text.to_owned()),
        TextStreamOptions::new().with_indentation_size(2),
    );

    cs.write_block(
        "A{\n",
        || {
            cs.write("x\n");
            cs.write("\n");
            cs.write("y\n");
        },
        "}\n",
    );

    assert_eq!(
        *fragments.borrow(),
        vec!["A{\n", "  x\n", "  \n", "  y\n", "}\n"]
    );
}

#[test]
fn continuation_of_a_line_is_not_indented() {
    let cs = stream(4);
    cs.indent_block(|| {
        cs.write("let x = ");
        cs.write("1;\n");
    });
    assert_eq!(cs.value().unwrap(), "    let x = 1;\n");
}

#[test]
fn append_skips_indentation() {
    let cs = stream(2);
    cs.indent_block(|| {
        cs.append("raw\n");
        cs.write("cooked\n");
    });
    assert_eq!(cs.value().unwrap(), "raw\n  cooked\n");
}

#[test]
fn value_clears_buffer() {
    let cs = TextStream::new();
    cs.write("once\n");
    assert_eq!(cs.value().unwrap(), "once\n");
    assert_eq!(cs.value().unwrap(), "");
}

#[test]
fn child_shares_depth_and_output() {
    let parent = stream(2);
    let child = parent.child();
    parent.indent_block(|| {
        assert_eq!(child.depth(), 1);
        child.write("from child\n");
    });
    assert_eq!(child.indentation_size(), 2);
    assert_eq!(parent.value().unwrap(), "  from child\n");
}

#[test]
fn string_sink_binds_stream() {
    let cs = TextStream::with_sink(String::new(), TextStreamOptions::new());
    cs.write("x\n");
    assert!(cs.is_bound_to_sink());
    assert_eq!(cs.value(), Err(TextStreamError::BoundToSink));
}

#[test]
fn fmt_write_respects_indentation() {
    let mut cs = stream(2);
    let scope = cs.child();
    scope.indent_block(|| {
        writeln!(cs, "value = {}", 42).unwrap();
    });
    assert_eq!(cs.value().unwrap(), "  value = 42\n");
}

#[test]
fn debug_reports_configuration() {
    let cs = stream(3);
    let debug = format!("{cs:?}");
    assert!(debug.contains("indentation_size: 3"));
    assert!(debug.contains("bound_to_sink: false"));
}

proptest! {
    #[test]
    fn every_line_gets_exact_padding(
        lines in proptest::collection::vec("[a-z]{0,6}", 1..8),
        depth in 0usize..4,
        size in 0usize..5,
    ) {
        let cs = stream(size);
        let text: String = lines.iter().map(|line| format!("{line}\n")).collect();

        fn nest(cs: &TextStream, depth: usize, text: &str) {
            if depth == 0 {
                cs.write(text);
            } else {
                cs.indent_block(|| nest(cs, depth - 1, text));
            }
        }
        nest(&cs, depth, &text);

        let output = cs.value().unwrap();
        let padding = " ".repeat(depth * size);
        for (produced, original) in output.lines().zip(&lines) {
            prop_assert_eq!(produced, format!("{padding}{original}"));
        }
        prop_assert_eq!(output.lines().count(), lines.len());
    }
}
