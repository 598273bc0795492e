//! Masking of personal data in public responses.

/// Mask an email address for display to other users.
///
/// The local part keeps its first and last characters, the domain name keeps
/// its first character, and the top-level domain is left intact.
///
/// ```
/// use reviewniverse_core::masking::mask_email;
///
/// assert_eq!(mask_email("test@example.com"), "t**t@e******.com");
/// assert_eq!(mask_email("ab@mail.co.kr"), "a*@m******.kr");
/// ```
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return mask_segment(email, 1, 0);
    };

    let masked_domain = match domain.rsplit_once('.') {
        Some((name, tld)) => format!("{}.{tld}", mask_segment(name, 1, 0)),
        None => mask_segment(domain, 1, 0),
    };

    format!("{}@{masked_domain}", mask_local(local))
}

fn mask_local(local: &str) -> String {
    if local.chars().count() <= 2 {
        // Too short to keep both ends visible.
        return local.chars().take(1).chain(['*']).collect();
    }
    mask_segment(local, 1, 1)
}

/// Replace every character of `value` except the first `head` and last
/// `tail` with `*`.
fn mask_segment(value: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < head || i + tail >= len { *c } else { '*' })
        .collect()
}
