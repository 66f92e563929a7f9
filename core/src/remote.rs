//! Pure wire-shape helpers for a remote HTTP-backed variant of this filesystem.
//!
//! The `__WEB_VERSION__` branch of the source implements an entire RPC client
//! (`vtfs_http_call`) talking to a remote service holding the real state; that transport is
//! explicitly out of scope here (see spec §1's external collaborators — this crate holds the
//! namespace state locally, in memory). What is in scope is the request-body encoding that
//! variant uses, since it has no dependency on a transport and is cheap to get right once: HTTP
//! form bodies are ASCII-safe, so raw file bytes are percent-encoded before being placed in one,
//! matching the source's non-printable-byte escaping loop in its `write` path.

/// Percent-encode every byte of `data` that is not an ASCII printable character (0x20..=0x7e),
/// matching the source's `write` path escaping non-printable bytes before placing file content in
/// an HTTP form field. Printable bytes that are reserved in `application/x-www-form-urlencoded`
/// bodies (`%`, `&`, `=`, `+`) are also escaped so the encoding round-trips unambiguously.
pub fn percent_encode_non_printable(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    for &b in data {
        let printable = (0x20..=0x7e).contains(&b);
        let reserved = matches!(b, b'%' | b'&' | b'=' | b'+');
        if printable && !reserved {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

/// Decode a string produced by [`percent_encode_non_printable`] back into raw bytes.
pub fn percent_decode(encoded: &str) -> Vec<u8> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Ok(v) = u8::from_str_radix(std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or(""), 16) {
                out.push(v);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

/// Encode a single directory entry into the packed wire shape the source's
/// `struct YUFS_packed_dirent` sends over the wire: `id`, `type` (see [`crate::host::DirentType`]),
/// and `name`, as one delimited line.
pub fn encode_packed_dirent(id: u32, is_dir: bool, name: &str) -> String {
    format!("{}\t{}\t{}", id, if is_dir { 'd' } else { 'f' }, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_ascii_passes_through_unescaped() {
        assert_eq!(percent_encode_non_printable(b"hello"), "hello");
    }

    #[test]
    fn non_printable_bytes_are_escaped() {
        assert_eq!(percent_encode_non_printable(b"a\0b\nc"), "a%00b%0Ac");
    }

    #[test]
    fn reserved_form_characters_are_escaped() {
        assert_eq!(percent_encode_non_printable(b"50%+1=2&x"), "50%25%2B1%3D2%26x");
    }

    #[test]
    fn encode_then_decode_round_trips() {
        let data = b"mixed\0binary\xffcontent\n";
        let encoded = percent_encode_non_printable(data);
        assert_eq!(percent_decode(&encoded), data);
    }

    #[test]
    fn packed_dirent_shape() {
        assert_eq!(encode_packed_dirent(42, true, "sub"), "42\td\tsub");
        assert_eq!(encode_packed_dirent(7, false, "f.txt"), "7\tf\tf.txt");
    }
}
