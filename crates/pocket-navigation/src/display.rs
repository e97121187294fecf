//! Address bar display label

const SCHEMES: [&str; 2] = ["https://", "http://"];
const WWW: &str = "www.";

/// Short host label shown while the address bar is not being edited.
///
/// Strips an optional `http(s)://` and an optional `www.`, then keeps
/// everything up to the next `/` or `:`. Input with no such host part is
/// returned unchanged.
pub fn display_label(url: &str) -> &str {
    let after_scheme = SCHEMES
        .iter()
        .find_map(|scheme| strip_prefix_ignore_case(url, scheme));

    // Prefixed forms first, then progressively fewer prefixes stripped
    let candidates = [
        after_scheme.and_then(|rest| strip_prefix_ignore_case(rest, WWW)),
        after_scheme,
        strip_prefix_ignore_case(url, WWW),
        Some(url),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(host_part)
        .find(|host| !host.is_empty())
        .unwrap_or(url)
}

fn host_part(input: &str) -> &str {
    let end = input.find(['/', ':']).unwrap_or(input.len());
    &input[..end]
}

pub(crate) fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&input[prefix.len()..])
    } else {
        None
    }
}
