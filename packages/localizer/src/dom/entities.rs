//! Character entity decoding and markup escaping.
//!
//! Decoding covers numeric references and a curated table of named entities
//! (structural characters plus the Latin accents that show up in translation
//! strings). Unrecognized or malformed references pass through as literal
//! text, matching lenient browser behavior.

/// Decode `&name;`, `&#N;` and `&#xH;` references in `input`.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match decode_one(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Try to decode a single reference at the start of `input` (which begins
/// with `&`). Returns the character and the number of bytes consumed.
fn decode_one(input: &str) -> Option<(char, usize)> {
    let body = &input[1..];
    let end = body.find(';')?;
    // references are short; anything long is almost certainly a bare '&'
    if end == 0 || end > 10 {
        return None;
    }
    let name = &body[..end];
    let consumed = end + 2;

    if let Some(digits) = name.strip_prefix('#') {
        let code = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            digits.parse::<u32>().ok()?
        };
        return char::from_u32(code).map(|ch| (ch, consumed));
    }

    named_entity(name).map(|ch| (ch, consumed))
}

fn named_entity(name: &str) -> Option<char> {
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "deg" => '\u{b0}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "times" => '\u{d7}',
        "divide" => '\u{f7}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "trade" => '\u{2122}',
        "agrave" => 'à',
        "aacute" => 'á',
        "acirc" => 'â',
        "auml" => 'ä',
        "ccedil" => 'ç',
        "egrave" => 'è',
        "eacute" => 'é',
        "ecirc" => 'ê',
        "euml" => 'ë',
        "igrave" => 'ì',
        "iacute" => 'í',
        "ntilde" => 'ñ',
        "ograve" => 'ò',
        "oacute" => 'ó',
        "ocirc" => 'ô',
        "ouml" => 'ö',
        "szlig" => 'ß',
        "ugrave" => 'ù',
        "uacute" => 'ú',
        "uuml" => 'ü',
        "Agrave" => 'À',
        "Eacute" => 'É',
        "Egrave" => 'È',
        "Ouml" => 'Ö',
        "Uuml" => 'Ü',
        _ => return None,
    };
    Some(ch)
}

/// Escape text-node content for serialization.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape an attribute value for serialization (double-quoted context).
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_decode_named_and_numeric_references() {
        assert_eq!(decode_entities("Ci&ograve; &egrave; qualcosa"), "Ciò è qualcosa");
        assert_eq!(decode_entities("&#36;1 &amp; &#x41;"), "$1 & A");
    }

    #[test]
    fn should_pass_through_bare_ampersands() {
        assert_eq!(decode_entities("Fish & Chips"), "Fish & Chips");
        assert_eq!(decode_entities("a &unknownref; b"), "a &unknownref; b");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }

    #[test]
    fn should_escape_round_trip() {
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_attr("say \"hi\" & go"), "say &quot;hi&quot; &amp; go");
    }
}
