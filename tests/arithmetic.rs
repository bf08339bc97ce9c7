//! Literal arithmetic: precedence, associativity, folding and wrapping.

#[macro_use]
mod cases;

test_case!(
    single_literal,
    input: "123",
    ast: "123",
    value: 123,
);

test_case!(
    multiplication_binds_tighter,
    input: "1 + 2 * 3",
    ast: "7",
    value: 7,
);

test_case!(
    parentheses_override_precedence,
    input: "(1 + 2) * 3",
    ast: "9",
    value: 9,
);

test_case!(
    subtraction_is_left_associative,
    input: "7 - 2 - 1",
    value: 4,
);

test_case!(
    division_is_left_associative,
    input: "100 / 10 / 5",
    value: 2,
);

test_case!(
    mixed_multiplicative_chain,
    input: "2 * 3 / 4",
    value: 1,
);
// 6 / 4 truncates

test_case!(
    division_truncates_toward_zero,
    input: "-7 / 2",
    ast: "-3",
    value: -3,
);

test_case!(
    sign_runs,
    input: "--+-5",
    ast: "-5",
    value: -5,
);

test_case!(
    negated_group,
    input: "-(2 - 9)",
    value: 7,
);

test_case!(
    whitespace_is_ignored,
    input: "  \t 42 \n",
    value: 42,
);

test_case!(
    comments_run_to_end_of_line,
    input: "1 + # one more\n 2 # done",
    value: 3,
);

test_case!(
    addition_wraps,
    input: "9223372036854775807 + 1",
    value: i64::MIN,
);

test_case!(
    multiplication_wraps,
    input: "4611686018427387904 * 2",
    value: i64::MIN,
);

test_case!(
    largest_literal,
    input: "9223372036854775807",
    value: i64::MAX,
);

test_case!(
    smallest_value_via_subtraction,
    input: "-9223372036854775807 - 1",
    value: i64::MIN,
);

test_case!(
    deeply_nested_parentheses,
    input: "((((((((((1 + 1))))))))))",
    value: 2,
);
