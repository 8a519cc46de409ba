use {
    crate::RawKey,
    tollgate_types::{StdError, StdResult},
};

/// Given a byte slice, return two bytes in big endian representing its length.
/// Panics if the slice is longer than `u16::MAX` (65535) bytes.
pub fn encode_length<B>(bytes: B) -> [u8; 2]
where
    B: AsRef<[u8]>,
{
    let len = bytes.as_ref().len();
    if len > usize::from(u16::MAX) {
        panic!("can't encode length of a key longer than `u16::MAX`");
    }

    (len as u16).to_be_bytes()
}

/// Combine a namespace and one or more raw keys into a full byte path.
///
/// The namespace and all keys other than the last one are prefixed with
/// their lengths (2 bytes big endian), so that during decoding we can tell
/// where one key ends and the next one starts.
///
/// E.g. if the keys are `[key1, key2, key3]`, the resulting byte path is:
///
/// ```plain
/// len(namespace) | namespace | len(key1) | key1 | len(key2) | key2 | key3
/// ```
pub fn nested_namespaces_with_key(
    maybe_namespace: Option<&[u8]>,
    prefixes: &[RawKey],
    maybe_key: Option<&RawKey>,
) -> Vec<u8> {
    let mut size = 0;
    if let Some(namespace) = maybe_namespace {
        size += namespace.len() + 2;
    }
    for prefix in prefixes {
        size += prefix.as_ref().len() + 2;
    }
    if let Some(key) = maybe_key {
        size += key.as_ref().len();
    }

    let mut out = Vec::with_capacity(size);
    if let Some(namespace) = maybe_namespace {
        out.extend_from_slice(&encode_length(namespace));
        out.extend_from_slice(namespace);
    }
    for prefix in prefixes {
        out.extend_from_slice(&encode_length(prefix));
        out.extend_from_slice(prefix.as_ref());
    }
    if let Some(key) = maybe_key {
        out.extend_from_slice(key.as_ref());
    }
    out
}

/// Split off the first length-prefixed segment of an encoded compound key;
/// return the segment and the remainder.
pub(crate) fn split_first_key(bytes: &[u8]) -> StdResult<(&[u8], &[u8])> {
    if bytes.len() < 2 {
        return Err(StdError::deserialize::<&[u8], _>(
            "key",
            "byte slice too short to hold a length prefix",
        ));
    }

    let len = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    let rest = &bytes[2..];

    if rest.len() < len {
        return Err(StdError::deserialize::<&[u8], _>(
            "key",
            "byte slice shorter than its declared length",
        ));
    }

    Ok((&rest[..len], &rest[len..]))
}

/// Split an encoded compound key into `elems` segments. The first `elems - 1`
/// segments are length-prefixed; the last is whatever remains.
pub(crate) fn split_keys(mut bytes: &[u8], elems: u8) -> StdResult<Vec<&[u8]>> {
    let mut segments = Vec::with_capacity(elems as usize);

    for _ in 1..elems {
        let (segment, rest) = split_first_key(bytes)?;
        segments.push(segment);
        bytes = rest;
    }
    segments.push(bytes);

    Ok(segments)
}

/// Re-join raw key segments into the canonical encoding, for handing a
/// sub-range of a compound key's segments back to its own decoder.
pub(crate) fn join_keys(segments: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();

    for segment in &segments[..segments.len() - 1] {
        out.extend_from_slice(&encode_length(segment));
        out.extend_from_slice(segment);
    }
    if let Some(last) = segments.last() {
        out.extend_from_slice(last);
    }
    out
}

/// The smallest byte string strictly greater than every string starting with
/// `prefix`, to use as the exclusive upper bound of a prefix scan. `None` if
/// no such string exists (the prefix is all `0xff`).
pub(crate) fn prefix_upper_bound(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut out = prefix.to_vec();

    while let Some(last) = out.last_mut() {
        if *last == u8::MAX {
            out.pop();
        } else {
            *last += 1;
            return Some(out);
        }
    }

    None
}

// ----------------------------------- tests -----------------------------------
