//! Helpers for digging structured payloads out of free-form model output.

/// Strip surrounding markdown code-fence markers from a completion so the
/// remainder can be handed to a JSON parser.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let body = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };
    let body = body.trim_start();
    match body.strip_suffix("```") {
        Some(inner) => inner.trim_end(),
        None => body.trim_end(),
    }
}

/// Locate the first top-level `{...}` span in mixed prose and return it.
///
/// Brace matching is string- and escape-aware, so braces inside JSON string
/// literals do not confuse the scan. Returns `None` when no balanced object
/// is present.
pub fn first_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
