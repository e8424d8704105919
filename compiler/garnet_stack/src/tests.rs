use super::*;

#[test]
fn passes_through_the_closure_value() {
    assert_eq!(ensure_sufficient_stack(|| "ok"), "ok");
    let parsed: Result<u8, String> =
        ensure_sufficient_stack(|| "7".parse().map_err(|_| String::new()));
    assert_eq!(parsed, Ok(7));
}

#[test]
fn nested_expression_depth_does_not_overflow() {
    // Mirrors a parser descending through `((((...))))`.
    fn depth(remaining: u32) -> u32 {
        ensure_sufficient_stack(|| {
            let padding = [0u8; 256];
            if remaining == 0 {
                u32::from(std::hint::black_box(padding)[0])
            } else {
                depth(remaining - 1) + 1
            }
        })
    }

    assert_eq!(depth(200_000), 200_000);
}
