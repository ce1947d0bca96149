// SPDX-License-Identifier: GPL-3.0-only

//! UDisks2 exposes paths as NUL-terminated byte arrays (D-Bus type `ay`).

/// Decode a C string byte array, stopping at the first NUL.
pub(crate) fn decode_c_string_bytes(bytes: &[u8]) -> String {
    let raw = bytes.split(|b| *b == 0).next().unwrap_or(bytes);
    String::from_utf8_lossy(raw).to_string()
}

/// Decode a list of C string byte arrays, dropping empty entries.
pub(crate) fn decode_c_string_list(list: Vec<Vec<u8>>) -> Vec<String> {
    list.iter()
        .map(|bytes| decode_c_string_bytes(bytes))
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_first_nul() {
        assert_eq!(decode_c_string_bytes(b"/dev/sda1\0"), "/dev/sda1");
        assert_eq!(decode_c_string_bytes(b"/dev/sda1\0garbage"), "/dev/sda1");
        assert_eq!(decode_c_string_bytes(b"/dev/sdb"), "/dev/sdb");
        assert_eq!(decode_c_string_bytes(b""), "");
    }

    #[test]
    fn list_drops_empty_entries() {
        let decoded = decode_c_string_list(vec![
            b"/run/media/usb\0".to_vec(),
            b"\0".to_vec(),
            b"/mnt\0".to_vec(),
        ]);
        assert_eq!(decoded, vec!["/run/media/usb", "/mnt"]);
    }
}
