//! # Certificate Data String
//!
//! Documents carry their display fields as one delimited string:
//!
//! ```text
//! name|Ana||course|Rust||course_load|12 horas||...
//! ```
//!
//! `|` separates a field from its value and `||` separates pairs. A `|` or
//! `\` inside a value is escaped with `\`. Decoding also accepts a lone
//! backslash before any other character as a literal backslash.

use std::collections::BTreeMap;

use kcert_core::KcertError;

use crate::certificate::{CertificateData, CertificateField};

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '|' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Encode the display fields of `data` in schema order.
pub fn encode_certificate_data(data: &CertificateData) -> String {
    CertificateField::DISPLAY
        .iter()
        .map(|field| format!("{}|{}", field.as_str(), escape(data.value_of(*field))))
        .collect::<Vec<_>>()
        .join("||")
}

/// Decode a delimited certificate data string into a field → value map.
///
/// Unknown fields are kept. An empty string decodes to an empty map.
///
/// # Errors
///
/// [`KcertError::Codec`] for a segment without a `|` separator or with an
/// empty field name.
pub fn decode_certificate_data(encoded: &str) -> Result<BTreeMap<String, String>, KcertError> {
    let mut out = BTreeMap::new();
    if encoded.is_empty() {
        return Ok(out);
    }

    let mut field = String::new();
    let mut value = String::new();
    let mut in_value = false;
    let mut chars = encoded.chars().peekable();

    while let Some(c) = chars.next() {
        let target = if in_value { &mut value } else { &mut field };
        match c {
            '\\' => match chars.peek() {
                Some(&next) if next == '|' || next == '\\' => {
                    target.push(next);
                    chars.next();
                }
                _ => target.push('\\'),
            },
            '|' if !in_value => in_value = true,
            '|' if chars.peek() == Some(&'|') => {
                chars.next();
                finish_segment(&mut out, &mut field, &mut value, in_value)?;
                in_value = false;
            }
            _ => target.push(c),
        }
    }
    finish_segment(&mut out, &mut field, &mut value, in_value)?;

    Ok(out)
}

fn finish_segment(
    out: &mut BTreeMap<String, String>,
    field: &mut String,
    value: &mut String,
    in_value: bool,
) -> Result<(), KcertError> {
    if !in_value {
        return Err(KcertError::Codec(format!(
            "segment `{field}` has no `|` separator"
        )));
    }
    if field.is_empty() {
        return Err(KcertError::Codec("empty field name".to_string()));
    }
    out.insert(std::mem::take(field), std::mem::take(value));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample;
    use proptest::prelude::*;

    #[test]
    fn test_encode_layout() {
        let encoded = encode_certificate_data(&sample());
        assert!(encoded.starts_with("name|Fernando Sobreira||course|Klever Blockchain"));
        assert!(encoded.ends_with("||issuer|Klever"));
        assert!(!encoded.contains("nft_id"));
        assert!(!encoded.contains("pdf_hash"));
    }

    #[test]
    fn test_decode_recovers_display_fields() {
        let data = sample();
        let decoded = decode_certificate_data(&encode_certificate_data(&data)).unwrap();
        assert_eq!(decoded, data.display_fields());
    }

    #[test]
    fn test_pipes_and_backslashes_in_values() {
        let mut data = sample();
        data.course = "Rust | Parte 2".to_string();
        data.location = "C:\\sala\\".to_string();
        data.issuer = "||".to_string();

        let encoded = encode_certificate_data(&data);
        assert!(encoded.contains("course|Rust \\| Parte 2"));

        let decoded = decode_certificate_data(&encoded).unwrap();
        assert_eq!(decoded["course"], "Rust | Parte 2");
        assert_eq!(decoded["location"], "C:\\sala\\");
        assert_eq!(decoded["issuer"], "||");
    }

    #[test]
    fn test_empty_values() {
        let decoded = decode_certificate_data("course_load|||issuer|").unwrap();
        assert_eq!(decoded["course_load"], "");
        assert_eq!(decoded["issuer"], "");
    }

    #[test]
    fn test_lone_backslash_is_literal() {
        let decoded = decode_certificate_data("name|a\\b").unwrap();
        assert_eq!(decoded["name"], "a\\b");
    }

    #[test]
    fn test_unknown_fields_kept() {
        let decoded = decode_certificate_data("grade|A||name|Ana").unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded["grade"], "A");
    }

    #[test]
    fn test_malformed_segments() {
        assert!(decode_certificate_data("").unwrap().is_empty());
        assert!(matches!(
            decode_certificate_data("name"),
            Err(KcertError::Codec(_))
        ));
        assert!(matches!(
            decode_certificate_data("name|Ana||"),
            Err(KcertError::Codec(_))
        ));
        assert!(matches!(
            decode_certificate_data("|Ana"),
            Err(KcertError::Codec(_))
        ));
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(name in ".*", course in ".*", issuer in ".*") {
            let mut data = sample();
            data.name = name;
            data.course = course;
            data.issuer = issuer;
            let decoded = decode_certificate_data(&encode_certificate_data(&data)).unwrap();
            prop_assert_eq!(decoded, data.display_fields());
        }
    }
}
