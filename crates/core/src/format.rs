/// Render an amount with at least 2 and at most 5 fraction digits, no
/// thousands grouping.
pub fn format_amount(value: f64) -> String {
    let mut s = format!("{value:.5}");
    if let Some(dot) = s.find('.') {
        let min_len = dot + 3;
        while s.len() > min_len && s.ends_with('0') {
            s.pop();
        }
    }
    s
}
