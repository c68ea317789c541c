//! Quick-reply button payloads.
//!
//! Button payloads arrive shaped like `/intent{"arg": 1}`: a slash-prefixed
//! intent name optionally followed by a JSON argument blob. Activating a
//! button transmits the payload verbatim; the extracted intent name is for
//! display and logging only.

/// Extracts the intent name from a button payload.
///
/// Everything from the first `{` onward is dropped, then the first `/` is
/// removed. `"/intent{\"x\":1}"` becomes `"intent"`, a bare `"/"` becomes
/// the empty string.
pub fn process_button_payload(payload: &str) -> String {
    let head = payload.split('{').next().unwrap_or("");
    head.replacen('/', "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_slash_and_json_args() {
        assert_eq!(process_button_payload("/intent{\"x\":1}"), "intent");
    }

    #[test]
    fn bare_slash_yields_empty() {
        assert_eq!(process_button_payload("/"), "");
    }

    #[test]
    fn empty_payload_yields_empty() {
        assert_eq!(process_button_payload(""), "");
    }

    #[test]
    fn plain_command_keeps_name() {
        assert_eq!(process_button_payload("/simple"), "simple");
    }

    #[test]
    fn only_first_slash_is_removed() {
        assert_eq!(process_button_payload("/a/b"), "a/b");
    }

    #[test]
    fn unprefixed_payload_passes_through() {
        assert_eq!(process_button_payload("hello"), "hello");
    }
}
