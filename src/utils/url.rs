use std::borrow::Cow;
use std::collections::HashMap;

/// Characters `decode_uri` leaves escaped because they carry URI structure.
const RESERVED: &[u8] = b";/?:@&=+$,#";

/// Splits a raw query string into `key -> value` without decoding.
/// A key without `=` maps to an empty value; the last occurrence wins.
pub(crate) fn raw_query_pairs(query: &str) -> HashMap<&str, &str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .collect()
}

/// Percent-decodes a query component once, keeping the raw text if the
/// escapes do not form valid UTF-8.
pub(crate) fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// URI-level decoding: escapes of reserved characters stay as they are.
pub(crate) fn decode_uri(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0;

    while idx < bytes.len() {
        if bytes[idx] == b'%' && idx + 2 < bytes.len() {
            if let Some(byte) = hex_pair(bytes[idx + 1], bytes[idx + 2]) {
                if RESERVED.contains(&byte) {
                    out.extend_from_slice(&bytes[idx..idx + 3]);
                } else {
                    out.push(byte);
                }
                idx += 3;
                continue;
            }
        }
        out.push(bytes[idx]);
        idx += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}
