/// Drop everything up to and including the leading `|` of each line.
///
/// Lines without a leading `|` are skipped; `\|` yields a literal pipe.
/// Use through [`trim_margin!`](crate::trim_margin).
pub fn strip_margin(s: &str) -> String {
    let kept: Vec<String> = s
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix('|'))
        .map(|rest| rest.replace("\\|", "|"))
        .collect();
    kept.join("\n")
}

/// `format!` followed by [`strip_margin`], for multi-line expected output.
///
/// ```ignore
/// let rows = 8;
/// let expected = trim_margin!(
///     "|recipes: {rows}
///      |"
/// );
/// assert_eq!(expected, "recipes: 8\n");
/// ```
#[macro_export]
macro_rules! trim_margin {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::text::strip_margin(&format!($fmt $(, $arg)*))
    };
}
