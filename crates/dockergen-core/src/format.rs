//! `%s` format strings used by the image and path settings.
//!
//! Only two directives exist: `%s` consumes the next argument and `%%` emits a
//! literal percent sign. Anything else is copied through unchanged.

/// Number of `%s` placeholders in `format`.
pub fn placeholder_count(format: &str) -> usize {
    let mut count = 0;
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.next() {
                Some('s') => count += 1,
                Some(_) | None => {}
            }
        }
    }
    count
}

/// Check that `format` carries exactly `expected` placeholders.
///
/// # Errors
///
/// [`Error::FormatArity`](crate::Error::FormatArity) on any other count.
pub fn check_arity(format: &str, expected: usize) -> crate::Result<()> {
    let found = placeholder_count(format);
    if found != expected {
        return Err(crate::Error::FormatArity {
            format: format.to_owned(),
            expected,
            found,
        });
    }
    Ok(())
}

/// Fill every `%s` in `format` with `args`, in order.
///
/// # Errors
///
/// [`Error::FormatArity`](crate::Error::FormatArity) when the number of
/// placeholders differs from the number of arguments.
pub fn fill(format: &str, args: &[&str]) -> crate::Result<String> {
    check_arity(format, args.len())?;
    Ok(substitute(format, args))
}

/// Fill `format` when it carries exactly one `%s`, otherwise use it verbatim.
///
/// Builder images may be configured either as a pattern or as a plain value.
pub fn fill_optional(format: &str, arg: &str) -> String {
    if placeholder_count(format) == 1 {
        substitute(format, &[arg])
    } else {
        format.to_owned()
    }
}

/// Expand directives; surplus placeholders expand to nothing.
fn substitute(format: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(format.len() + args.iter().map(|a| a.len()).sum::<usize>());
    let mut args = args.iter();
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => {
                if let Some(arg) = args.next() {
                    out.push_str(arg);
                }
            }
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}
