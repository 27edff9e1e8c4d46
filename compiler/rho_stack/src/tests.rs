use super::*;

#[test]
fn test_nested_sum_recursion() {
    fn sum_to(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { n + sum_to(n - 1) })
    }

    assert_eq!(sum_to(100), 5050);
}

#[test]
fn test_deep_recursion_grows_stack() {
    fn depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }

    assert_eq!(depth(200_000), 200_000);
}

#[test]
fn test_passes_result_through() {
    let result: Result<&str, String> = ensure_sufficient_stack(|| Ok("done"));
    assert_eq!(result, Ok("done"));
}
