use pretty_assertions::assert_eq;

use super::run;

// Arithmetic and printing

#[test]
fn arithmetic_scenario() {
    assert_eq!(
        run("1+2\n2*3.1\n5-1\n7/8\n11%%2\n3^2"),
        "[1] 3\n[1] 6.2\n[1] 4\n[1] 0.875\n[1] 1\n[1] 9\n"
    );
}

#[test]
fn vectors_recycle() {
    assert_eq!(run("c(1,2,3,4) + c(10,20)"), "[1] 11 22 13 24\n");
    assert_eq!(run("c(1,2,3) * 2"), "[1] 2 4 6\n");
}

#[test]
fn integer_arithmetic_yields_double() {
    assert_eq!(run("typeof(1L + 1L)"), "[1] \"double\"\n");
    assert_eq!(run("typeof(1L)"), "[1] \"integer\"\n");
}

#[test]
fn na_propagates() {
    assert_eq!(run("NA + 1"), "[1] NA\n");
}

#[test]
fn sequences_ascend_only() {
    assert_eq!(run("1:5"), "[1] 1 2 3 4 5\n");
    assert_eq!(run("3:1"), "numeric(0)\n");
    assert_eq!(run("1:1e15"), "Error: result would be too long a vector\n");
    assert_eq!(
        run("x <- c(1, 2)\nx[1:1e15]"),
        "Error: result would be too long a vector\n"
    );
}

#[test]
fn comparison_returns_right_operand() {
    assert_eq!(run("1 < 2"), "[1] 2\n");
    assert_eq!(run("2 < 1"), "NULL\n");
}

#[test]
fn logical_operators_return_operands() {
    assert_eq!(run("3 && 4"), "[1] 4\n");
    assert_eq!(run("NULL || 5"), "[1] 5\n");
    assert_eq!(run("NULL && undefined_name"), "NULL\n");
}

#[test]
fn not_inverts_truthiness() {
    assert_eq!(run("!NULL"), "[1] 1\n");
    assert_eq!(run("!0"), "NULL\n");
}

// Truthiness and if

#[test]
fn scalar_zero_is_true() {
    assert_eq!(run("if (0) \"zero\" else \"other\""), "[1] \"zero\"\n");
    assert_eq!(run("if (NaN) 1 else 2"), "[1] 2\n");
}

#[test]
fn vector_starting_with_zero_is_false() {
    assert_eq!(run("if (c(0, 1)) 1 else 2"), "[1] 2\n");
    assert_eq!(run("if (c(1, 0)) 1 else 2"), "[1] 1\n");
}

#[test]
fn false_if_without_else_is_invisible() {
    assert_eq!(run("if (FALSE) 1"), "");
    assert_eq!(run("if (FALSE) 1 else 2"), "[1] 2\n");
}

// Visibility

#[test]
fn assignment_is_invisible() {
    assert_eq!(run("x <- 5"), "");
    assert_eq!(run("x <- 5\nx"), "[1] 5\n");
    assert_eq!(run("5 -> y\ny"), "[1] 5\n");
}

#[test]
fn print_and_invisible() {
    assert_eq!(run("print(1)"), "[1] 1\n");
    assert_eq!(run("invisible(3)"), "");
    assert_eq!(run("x <- print(2)\nx"), "[1] 2\n[1] 2\n");
}

#[test]
fn block_value_is_last_statement() {
    assert_eq!(run("{ 1; 2 }"), "[1] 2\n");
    assert_eq!(run("{ 1; x <- 2 }"), "");
}

// Calls and argument matching

#[test]
fn named_and_positional_arguments() {
    assert_eq!(
        run("b<-function(c,d){c+d}\nb(c=1,d=2)\nb(3,4)"),
        "[1] 3\n[1] 7\n"
    );
}

#[test]
fn exact_tag_wins_over_position() {
    assert_eq!(run("f<-function(a,b){a-b}\nf(b=2, 1)"), "[1] -1\n");
}

#[test]
fn unique_partial_tag_binds() {
    assert_eq!(run("f<-function(value, other){value}\nf(val=5, 1)"), "[1] 5\n");
}

#[test]
fn ambiguous_partial_tag_is_an_error() {
    assert_eq!(
        run("f<-function(mean, median){1}\nf(me=3)"),
        "Error in f() : argument me matches multiple formal arguments\n"
    );
}

#[test]
fn unused_arguments_are_numbered_after_formals() {
    assert_eq!(
        run("f<-function(x){1}\nf(1,2)"),
        "Error in f() : unused argument (pos 2)\n"
    );
    assert_eq!(
        run("f<-function(x){1}\nf(1,2,3)"),
        "Error in f() : unused arguments (pos 2, pos 3)\n"
    );
    assert_eq!(
        run("f<-function(x){1}\nf(1, y=2)"),
        "Error in f() : unused argument (y =)\n"
    );
}

#[test]
fn defaults_evaluate_in_callee_frame() {
    assert_eq!(run("f<-function(a, b=4){a+b}\nf(1)"), "[1] 5\n");
    assert_eq!(run("g<-function(a, b=a*2){b}\ng(3)"), "[1] 6\n");
}

#[test]
fn missing_argument_without_default() {
    assert_eq!(
        run("f<-function(a, b){a}\nf(1)"),
        "Error in f() : argument \"b\" is missing, with no default\n"
    );
}

#[test]
fn ellipsis_forwards_in_order() {
    assert_eq!(
        run("g<-function(a, b, c){c(a, b, c)}\nf<-function(...){g(...)}\nf(1, 2, 3)"),
        "[1] 1 2 3\n"
    );
}

#[test]
fn ellipsis_keeps_tags() {
    assert_eq!(
        run("g<-function(x, y){x-y}\nf<-function(...){g(...)}\nf(y=1, x=5)"),
        "[1] 4\n"
    );
}

#[test]
fn ellipsis_through_two_levels() {
    assert_eq!(
        run("h<-function(...){c(...)}\ng<-function(...){h(0, ...)}\nf<-function(...){g(...)}\nf(1, 2)"),
        "[1] 0 1 2\n"
    );
}

#[test]
fn formals_after_ellipsis_need_exact_tags() {
    assert_eq!(
        run("f<-function(..., sep=\"-\"){sep}\nf(1, se=2)"),
        "[1] \"-\"\n"
    );
    assert_eq!(run("f<-function(..., sep=\"-\"){sep}\nf(1, sep=2)"), "[1] 2\n");
}

#[test]
fn ellipsis_outside_function_is_an_error() {
    assert_eq!(
        run("g<-function(x){x}\ng(...)"),
        "Error: '...' used in an incorrect context\n"
    );
}

#[test]
fn anonymous_function_call() {
    assert_eq!(run("(function(x) x * 2)(4)"), "[1] 8\n");
}

#[test]
fn calling_a_non_function_value() {
    assert_eq!(run("(1)(2)"), "Error: attempt to apply non-function\n");
}

#[test]
fn recursion() {
    assert_eq!(
        run("fact <- function(n) if (n == 1) 1 else n * fact(n - 1)\nfact(5)"),
        "[1] 120\n"
    );
}

// Scoping

#[test]
fn free_variables_resolve_through_caller() {
    assert_eq!(
        run("f <- function() y\ng <- function() { y <- 5; f() }\ng()"),
        "[1] 5\n"
    );
}

#[test]
fn local_assignment_does_not_leak() {
    assert_eq!(run("x <- 1\nf <- function() { x <- 2 }\nf()\nx"), "[1] 1\n");
}

#[test]
fn super_assignment_rebinds_outer() {
    assert_eq!(
        run("x <- 1\nf <- function() { x <<- 2; x }\nf()\nx"),
        "[1] 2\n[1] 2\n"
    );
}

#[test]
fn closures_shadow_builtins_but_values_do_not() {
    assert_eq!(run("length <- function(x) 99\nlength(1)"), "[1] 99\n");
    assert_eq!(run("print <- 5\nprint(2)"), "[1] 2\n");
}

// Errors

#[test]
fn errors_name_the_innermost_call() {
    assert_eq!(
        run("f <- function(x) x + y\nf(1)"),
        "Error in f() : object 'y' not found\n"
    );
    assert_eq!(
        run("g <- function() nothing\nf <- function() g()\nf()"),
        "Error in g() : object 'nothing' not found\n"
    );
}

#[test]
fn evaluation_continues_after_an_error() {
    assert_eq!(run("x\n1"), "Error: object 'x' not found\n[1] 1\n");
}

#[test]
fn unknown_function() {
    assert_eq!(run("foo(1)"), "Error: could not find function \"foo\"\n");
}

#[test]
fn builtin_arity_is_checked() {
    assert_eq!(
        run("length(1, 2)"),
        "Error in length() : 2 arguments passed to 'length' which requires 1\n"
    );
}

#[test]
fn text_in_arithmetic() {
    assert_eq!(
        run("\"a\" + 1"),
        "Error: non-numeric argument to binary operator\n"
    );
}

// Loops

#[test]
fn next_skips_one_iteration() {
    assert_eq!(
        run("for (x in c(1,2,3,4,5)) {\n  if (x == 4) next\n  print(x)\n}"),
        "[1] 1\n[1] 2\n[1] 3\n[1] 5\n"
    );
}

#[test]
fn break_ends_repeat() {
    assert_eq!(
        run("i <- 0\nrepeat {\n  i <- i + 1\n  if (i == 3) break\n}\ni"),
        "[1] 3\n"
    );
}

#[test]
fn while_loop() {
    assert_eq!(run("i <- 0\nwhile (i < 5) i <- i + 2\ni"), "[1] 6\n");
}

#[test]
fn loops_are_invisible() {
    assert_eq!(run("for (i in 1:3) i"), "");
    assert_eq!(run("for (i in 1:3) i\ni"), "[1] 3\n");
}

#[test]
fn for_over_lists_and_null() {
    assert_eq!(
        run("for (v in list(1, \"a\")) print(v)"),
        "[1] 1\n[1] \"a\"\n"
    );
    assert_eq!(run("for (v in NULL) print(v)"), "");
    assert_eq!(
        run("for (v in function() 1) v"),
        "Error: invalid for() loop sequence\n"
    );
}

#[test]
fn loop_control_outside_loop() {
    assert_eq!(
        run("break"),
        "Error: no loop for break/next, jumping to top level\n"
    );
    assert_eq!(
        run("f <- function() next\nfor (i in 1:2) f()"),
        "Error in f() : no loop for break/next, jumping to top level\n"
    );
}

// Subscripts

#[test]
fn vector_subscripts() {
    let program = "x <- c(10,20,30,40)\nx[c(3,1)]\nx[-1]\nx[0]\nx[2:3]\nx[6]";
    assert_eq!(
        run(program),
        "[1] 30 10\n[1] 20 30 40\nnumeric(0)\n[1] 20 30\n[1] NA\n"
    );
}

#[test]
fn mixed_sign_subscripts() {
    assert_eq!(
        run("x <- c(1,2)\nx[c(-1, 2)]"),
        "Error: can't mix positive and negative subscripts\n"
    );
}

#[test]
fn length_of_an_index_expression() {
    assert_eq!(run("x <- c(5,6,7,8)\nlength(x[2:3])"), "[1] 2\n");
    assert_eq!(run("x <- c(5,6,7,8)\nlength(x)"), "[1] 4\n");
}

#[test]
fn list_items() {
    assert_eq!(
        run("l <- list(a=1, b=\"x\")\nl[[\"b\"]]\nl[[1]]\nnames(l)"),
        "[1] \"x\"\n[1] 1\n[1] \"a\" \"b\"\n"
    );
    assert_eq!(
        run("l <- list(1)\nl[[3]]"),
        "Error: subscript out of bounds\n"
    );
}

#[test]
fn matrix_subscripts() {
    let program = "m <- c(1,2,3,4,5,6)\ndim(m) <- c(2,3)\nm[2,3]\nm[1,]\nm[,2:3]";
    assert_eq!(
        run(program),
        "[1] 6\n[1] 1 3 5\n     [,1] [,2]\n[1,]    3    5\n[2,]    4    6\n"
    );
}

#[test]
fn oversized_dims_print_and_index_safely() {
    assert_eq!(
        run("x <- c(1, 2)\ndim(x) <- c(4e9, 4e9, 4e9)\nx"),
        "[1] 1 2\n"
    );
    assert_eq!(
        run("x <- c(1, 2)\ndim(x) <- c(4e9, 4e9)\nx[1, 1]"),
        "Error: subscript out of bounds\n"
    );
}

#[test]
fn null_is_not_subsettable() {
    assert_eq!(
        run("x <- NULL\nx[[1]]"),
        "Error: object of type 'NULL' is not subsettable\n"
    );
}

// Replacement forms

#[test]
fn element_replacement() {
    assert_eq!(run("x <- c(1,2,3)\nx[2] <- 10\nx"), "[1]  1 10  3\n");
    assert_eq!(run("x <- c(1,2)\nx[4] <- 9\nx"), "[1]  1  2 NA  9\n");
}

#[test]
fn item_replacement_on_lists() {
    assert_eq!(
        run("l <- list(a=1)\nl[[\"b\"]] <- 2\nl"),
        "$a\n[1] 1\n\n$b\n[1] 2\n\n"
    );
    assert_eq!(run("l <- list(1, 2)\nl[[1]] <- NULL\nlength(l)"), "[1] 1\n");
}

#[test]
fn dim_and_dimnames() {
    let program = "x <- c(1,2,3,4,5,6)\ndim(x) <- c(2,3)\n\
                   dimnames(x) <- list(c(\"a1\",\"a2\"),c(\"b1\",\"b2\",\"b3\"))\nx\ndim(x)";
    assert_eq!(
        run(program),
        "   b1 b2 b3\na1  1  3  5\na2  2  4  6\n[1] 2 3\n"
    );
}

#[test]
fn failed_dimnames_leave_value_unchanged() {
    let setup = "x <- c(1,2,3,4,5,6)\ndim(x) <- c(2,3)\n";
    assert_eq!(
        run(&format!("{setup}dimnames(x) <- list(c(\"a\",\"b\"))\ndimnames(x)")),
        "Error: length of 'dimnames' [1] must match that of 'dims' [2]\nNULL\n"
    );
    assert_eq!(
        run(&format!(
            "{setup}dimnames(x) <- list(c(\"a\"), c(\"p\",\"q\",\"r\"))\ndimnames(x)"
        )),
        "Error: length of 'dimnames' [1] not equal to array extent\nNULL\n"
    );
    assert_eq!(
        run("x <- c(1,2)\ndimnames(x) <- list(c(\"a\",\"b\"))"),
        "Error: 'dimnames' applied to non-array\n"
    );
}

#[test]
fn dim_rejects_text() {
    assert_eq!(
        run("x <- 1\ndim(x) <- \"a\""),
        "Error: invalid second argument, must be vector or NULL\n"
    );
}

#[test]
fn class_replacement() {
    assert_eq!(run("x <- 1\nclass(x) <- \"money\"\nclass(x)"), "[1] \"money\"\n");
    assert_eq!(
        run("x <- c(1,2,3,4)\ndim(x) <- c(2,2)\nclass(x)"),
        "[1] \"matrix\" \"array\"\n"
    );
    assert_eq!(run("x <- 1\nclass(x) <- NULL\nclass(x)"), "[1] \"numeric\"\n");
}

#[test]
fn attribute_replacement_inside_function_is_local() {
    assert_eq!(
        run("x <- c(1,2)\nf <- function() { class(x) <- \"k\"; class(x) }\nf()\nclass(x)"),
        "[1] \"k\"\n[1] \"numeric\"\n"
    );
}

#[test]
fn attribute_replacement_on_unknown_object() {
    assert_eq!(
        run("dim(nope) <- c(1,1)"),
        "Error: object 'nope' not found\n"
    );
}

#[test]
fn unknown_replacement_function() {
    assert_eq!(
        run("x <- 1\nfoo(x) <- 2"),
        "Error: could not find function \"foo<-\"\n"
    );
}

// Builtins

#[test]
fn type_and_class_queries() {
    assert_eq!(
        run("typeof(1)\nclass(list())\nclass(function(x) x)\ntypeof(pairlist(a=1, 2))"),
        "[1] \"double\"\n[1] \"list\"\n[1] \"function\"\n[1] \"pairlist\"\n"
    );
}

#[test]
fn concatenation() {
    assert_eq!(run("c(1, c(2, 3), NULL)"), "[1] 1 2 3\n");
    assert_eq!(run("c(\"a\", \"b\")"), "[1] \"a\" \"b\"\n");
    assert_eq!(run("c()"), "NULL\n");
    assert_eq!(
        run("c(\"a\", 1)"),
        "Error: cannot combine character and numeric values\n"
    );
    assert_eq!(
        run("c(1, list(2))"),
        "[[1]]\n[1] 1\n\n[[2]]\n[1] 2\n\n"
    );
    assert_eq!(run("length(c(list(1, 2), 3:4))"), "[1] 4\n");
}

#[test]
fn cat_writes_without_newline() {
    assert_eq!(run("cat(1, \"a\", 2.5)"), "1 a 2.5");
    assert_eq!(run("cat(1, 2, sep=\"-\")"), "1-2");
}

#[test]
fn remove_unbinds() {
    assert_eq!(run("x <- 1\nrm(x)\nx"), "Error: object 'x' not found\n");
    assert_eq!(run("rm(y)"), "Error in rm() : object 'y' not found\n");
    assert_eq!(run("x <- 1\nremove(\"x\")\nx"), "Error: object 'x' not found\n");
}

#[test]
fn quit_stops_evaluation() {
    assert_eq!(run("1\nquit()\n2"), "[1] 1\n");
}
