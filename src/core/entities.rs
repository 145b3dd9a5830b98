//! HTML character reference decoding with the lenient HTML5 rules
//!
//! Rich-text editors and browsers emit references that XML unescaping
//! rejects: legacy names without a semicolon (`&gt`, `&amp`), C1 code points
//! meant as windows-1252, and out-of-range numbers. These decode the way an
//! HTML5 parser reads them.

use crate::error::{QuizgramError, QuizgramResult};
use quick_xml::escape::resolve_html5_entity;
use regex::{Captures, Regex};
use std::borrow::Cow;

const REPLACEMENT: &str = "\u{FFFD}";

/// Named references that also decode without a trailing semicolon. Sorted.
const LEGACY_NAMES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Numeric references 0x80..=0x9F, read as windows-1252
const WINDOWS_1252: [char; 32] = [
    '\u{20AC}', '\u{81}', '\u{201A}', '\u{192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{2C6}', '\u{2030}', '\u{160}', '\u{2039}', '\u{152}', '\u{8D}', '\u{17D}', '\u{8F}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{2DC}', '\u{2122}', '\u{161}', '\u{203A}', '\u{153}', '\u{9D}', '\u{17E}', '\u{178}',
];

/// Decodes named and numeric character references in free text
#[derive(Debug, Clone)]
pub struct EntityDecoder {
    reference: Regex,
}

impl EntityDecoder {
    pub fn new() -> QuizgramResult<Self> {
        let reference = Regex::new(r"&(#[0-9]+;?|#[xX][0-9a-fA-F]+;?|[^\t\n\x0C <&#;]{1,32};?)")
            .map_err(|e| QuizgramError::Config(format!("Regex error: {}", e)))?;
        Ok(Self { reference })
    }

    /// Decode every reference; anything unrecognised stays literal
    pub fn decode<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains('&') {
            return Cow::Borrowed(text);
        }
        self.reference
            .replace_all(text, |caps: &Captures| decode_reference(&caps[1]))
    }
}

fn decode_reference(body: &str) -> String {
    match body.strip_prefix('#') {
        Some(number) => decode_numeric(number),
        None => decode_named(body),
    }
}

fn decode_numeric(number: &str) -> String {
    let digits = number.trim_end_matches(';');
    let parsed = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => digits.parse::<u32>(),
    };
    // Only overflow fails here; the pattern guarantees digits
    let Ok(code) = parsed else {
        return REPLACEMENT.to_string();
    };

    match code {
        0x00 => REPLACEMENT.to_string(),
        0x0D => "\r".to_string(),
        0x80..=0x9F => WINDOWS_1252[(code - 0x80) as usize].to_string(),
        0xD800..=0xDFFF | 0x11_0000..=u32::MAX => REPLACEMENT.to_string(),
        _ if is_disallowed(code) => String::new(),
        _ => char::from_u32(code)
            .map(String::from)
            .unwrap_or_else(|| REPLACEMENT.to_string()),
    }
}

/// Control characters and noncharacters, which decode to nothing
fn is_disallowed(code: u32) -> bool {
    matches!(code, 0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F..=0x9F | 0xFDD0..=0xFDEF)
        || code & 0xFFFE == 0xFFFE
}

fn decode_named(body: &str) -> String {
    match body.strip_suffix(';') {
        Some(name) => {
            if let Some(value) = resolve_html5_entity(name) {
                return value.to_string();
            }
        }
        None => {
            if let Some(value) = legacy_value(body) {
                return value.to_string();
            }
        }
    }

    // Longest legacy prefix of at least two characters: "&notit;" → "¬it;"
    let boundaries: Vec<usize> = body.char_indices().map(|(i, _)| i).skip(2).collect();
    boundaries
        .into_iter()
        .rev()
        .find_map(|end| legacy_value(&body[..end]).map(|value| format!("{}{}", value, &body[end..])))
        .unwrap_or_else(|| format!("&{}", body))
}

fn legacy_value(name: &str) -> Option<&'static str> {
    LEGACY_NAMES
        .binary_search(&name)
        .ok()
        .and_then(|_| resolve_html5_entity(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> String {
        EntityDecoder::new().unwrap().decode(text).into_owned()
    }

    #[test]
    fn test_legacy_names_sorted() {
        assert!(LEGACY_NAMES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_terminated_references() {
        assert_eq!(decode("A --&gt; B &amp; C"), "A --> B & C");
        assert_eq!(decode("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode("&hellip;"), "\u{2026}");
    }

    #[test]
    fn test_legacy_names_without_semicolon() {
        assert_eq!(decode("A --&gt B&lt;br&gtC"), "A --> B<br>C");
        assert_eq!(decode("&quot;x&quot &amp"), "\"x\" &");
        assert_eq!(decode("&#60br&#62"), "<br>");
    }

    #[test]
    fn test_longest_legacy_prefix() {
        assert_eq!(decode("&notit;"), "\u{AC}it;");
        assert_eq!(decode("&ampersand"), "&ersand");
    }

    #[test]
    fn test_non_legacy_names_need_semicolon() {
        assert_eq!(decode("&hellip and"), "&hellip and");
        assert_eq!(decode("&unknownthing;"), "&unknownthing;");
        assert_eq!(decode("Cats & Dogs"), "Cats & Dogs");
        assert_eq!(decode("&#;"), "&#;");
    }

    #[test]
    fn test_numeric_replacement_rules() {
        assert_eq!(decode("x&#0;y"), "x\u{FFFD}y");
        assert_eq!(decode("x&#13;y"), "x\ry");
        assert_eq!(decode("x&#128;y"), "x\u{20AC}y");
        assert_eq!(decode("x&#x81;y"), "x\u{81}y");
        assert_eq!(decode("x&#x9F;y"), "x\u{178}y");
        assert_eq!(decode("x&#xD800;y"), "x\u{FFFD}y");
        assert_eq!(decode("x&#x110000;y"), "x\u{FFFD}y");
        assert_eq!(decode("x&#99999999999999;y"), "x\u{FFFD}y");
    }

    #[test]
    fn test_disallowed_code_points_removed() {
        assert_eq!(decode("x&#1;y"), "xy");
        assert_eq!(decode("x&#x7F;y"), "xy");
        assert_eq!(decode("x&#xFFFE;y"), "xy");
        assert_eq!(decode("x&#x1FFFF;y"), "xy");
        assert_eq!(decode("x&#10;y"), "x\ny");
    }

    #[test]
    fn test_plain_text_borrowed() {
        let decoder = EntityDecoder::new().unwrap();
        assert!(matches!(decoder.decode("A --> B"), Cow::Borrowed(_)));
    }
}
