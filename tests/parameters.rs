//! Expressions over named parameters.

#[macro_use]
mod cases;

test_case!(
    single_parameter,
    input: "foo",
    params: { foo = 123 },
    ast: "foo",
    value: 123,
);

test_case!(
    sign_run_on_parameter,
    input: "--+ -x",
    params: { x = 123 },
    ast: "-x",
    value: -123,
);

test_case!(
    self_subtraction,
    input: "x-x",
    params: { x = 123 },
    ast: "(x - x)",
    optimized: "0",
    value: 0,
);

test_case!(
    long_mixed_expression,
    input: "3 + (x - 5) - (3 - 0 + (1 - y) - -3) + 0 + (x + x) + 10 - z",
    params: { x = 123, y = 456, z = -99 },
    value: 925,
);

test_case!(
    product_of_sum,
    input: "x * (y + 1)",
    params: { x = 6, y = 6 },
    ast: "(x * (y + 1))",
    value: 42,
);

test_case!(
    identifier_characters,
    input: "_a1 + B_2",
    params: { _a1 = 1, B_2 = 2 },
    value: 3,
);

test_case!(
    unused_parameter,
    input: "1",
    params: { x = 5 },
    value: 1,
);

test_case!(
    parameter_division_truncates,
    input: "x / y",
    params: { x = 7, y = -2 },
    value: -3,
);

test_case!(
    minimum_divided_by_minus_one_wraps,
    input: "x / -1",
    params: { x = i64::MIN },
    value: i64::MIN,
);

test_case!(
    literals_gathered,
    input: "x + 1 + 2",
    params: { x = 4 },
    optimized: "(x + 3)",
    value: 7,
);

test_case!(
    matching_literals_cancel,
    input: "(x + 1) - (y + 1)",
    params: { x = 10, y = 3 },
    optimized: "(x - y)",
    value: 7,
);

test_case!(
    identities_removed,
    input: "x * 1 + 0 * y",
    params: { x = 9, y = 4 },
    optimized: "x",
    value: 9,
);

test_case!(
    multiplication_by_zero_parameter,
    input: "x * 0",
    params: { x = 77 },
    optimized: "0",
    value: 0,
);

test_case!(
    parameters_in_order,
    input: "a - b",
    params: { b = 1, a = 10 },
    value: 9,
);
