//! `${VAR}` expansion for string settings.

/// Replace every `${NAME}` in `value` with `lookup(NAME)`, or nothing when the
/// variable is unset. An unclosed `${` is kept literally.
pub fn expand_vars(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &after[..end];
        if !name.is_empty()
            && let Some(replacement) = lookup(name)
        {
            out.push_str(&replacement);
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
