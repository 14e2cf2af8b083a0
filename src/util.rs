pub(crate) fn is_http_token(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|byte| {
            matches!(
                byte,
                b'0'..=b'9'
                    | b'A'..=b'Z'
                    | b'a'..=b'z'
                    | b'!'
                    | b'#'
                    | b'$'
                    | b'%'
                    | b'&'
                    | b'\''
                    | b'*'
                    | b'+'
                    | b'-'
                    | b'.'
                    | b'^'
                    | b'_'
                    | b'`'
                    | b'|'
                    | b'~'
            )
        })
}

/// `Upgrade` comparison is ASCII case-insensitive and ignores surrounding spaces.
pub(crate) fn is_websocket_upgrade(value: &str) -> bool {
    value
        .trim()
        .eq_ignore_ascii_case(crate::constants::upstream::WEBSOCKET)
}

#[cfg(test)]
#[path = "util_test.rs"]
mod util_test;
