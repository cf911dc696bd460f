//! Tolerant HTML lexer.
//!
//! Produces a flat token stream for the tree builder. The dialect is the
//! pragmatic subset real pages are written in, not the full WHATWG state
//! machine. Known simplifications:
//!
//! - tag and attribute names are runs of `[A-Za-z0-9_:-]` and are lowercased
//! - a `<` not followed by `/`, `!` or an ASCII letter is literal text
//! - `<script>` and `<style>` bodies are raw text up to the matching close tag
//! - `<![CDATA[...]]>` and processing instructions are discarded
//! - character references are decoded in text and attribute values
//!
//! Nothing here ever fails; malformed input degrades to text tokens.

use super::entities::decode_entities;
use super::tree::Attr;

/// One lexical unit of the input markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attrs: Vec<Attr>,
        self_closing: bool,
    },
    EndTag(String),
    Text(String),
    Comment(String),
}

pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.bytes.len() {
            match self.input[self.pos..].find('<') {
                Some(offset) => {
                    if offset > 0 {
                        self.emit_text(self.pos, self.pos + offset);
                    }
                    self.pos += offset;
                    self.lex_markup();
                }
                None => {
                    self.emit_text(self.pos, self.bytes.len());
                    self.pos = self.bytes.len();
                }
            }
        }
        log::trace!(target: "localizer.dom", "lexed {} tokens", self.tokens.len());
        self.tokens
    }

    fn emit_text(&mut self, start: usize, end: usize) {
        if start < end {
            self.tokens.push(Token::Text(decode_entities(&self.input[start..end])));
        }
    }

    /// `self.pos` sits on a `<`. Dispatch on what follows it.
    fn lex_markup(&mut self) {
        match self.bytes.get(self.pos + 1) {
            Some(b'!') => self.lex_declaration(),
            Some(b'/') => self.lex_end_tag(),
            Some(b) if b.is_ascii_alphabetic() => self.lex_start_tag(),
            _ => {
                // literal '<'
                self.tokens.push(Token::Text("<".to_string()));
                self.pos += 1;
            }
        }
    }

    fn lex_declaration(&mut self) {
        let rest = &self.input[self.pos..];
        if rest.starts_with("<!--") {
            let body_start = self.pos + 4;
            match self.input[body_start..].find("-->") {
                Some(offset) => {
                    self.tokens
                        .push(Token::Comment(self.input[body_start..body_start + offset].to_string()));
                    self.pos = body_start + offset + 3;
                }
                None => {
                    self.tokens.push(Token::Comment(self.input[body_start..].to_string()));
                    self.pos = self.bytes.len();
                }
            }
            return;
        }

        // <!DOCTYPE ...>, <![CDATA[...]]> and anything else up to '>'
        let body_start = self.pos + 2;
        let end = self.input[body_start..]
            .find('>')
            .map(|offset| body_start + offset)
            .unwrap_or(self.bytes.len());
        let body = self.input[body_start..end].trim();
        if let Some(doctype) = strip_prefix_ignore_case(body, "doctype") {
            self.tokens.push(Token::Doctype(doctype.trim().to_string()));
        }
        self.pos = (end + 1).min(self.bytes.len());
    }

    fn lex_end_tag(&mut self) {
        let name_start = self.pos + 2;
        let name_end = self.scan_name(name_start);
        if name_end == name_start {
            // '</' with no name, swallow through '>'
            self.skip_past_gt(name_start);
            return;
        }
        let name = self.input[name_start..name_end].to_ascii_lowercase();
        self.skip_past_gt(name_end);
        self.tokens.push(Token::EndTag(name));
    }

    fn lex_start_tag(&mut self) {
        let name_start = self.pos + 1;
        let name_end = self.scan_name(name_start);
        let name = self.input[name_start..name_end].to_ascii_lowercase();
        self.pos = name_end;

        let mut attrs: Vec<Attr> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.bytes.get(self.pos) {
                None => break,
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') => {
                    if self.bytes.get(self.pos + 1) == Some(&b'>') {
                        self_closing = true;
                        self.pos += 2;
                        break;
                    }
                    self.pos += 1;
                }
                _ => {
                    let attr_start = self.pos;
                    let attr_end = self.scan_name(attr_start);
                    if attr_end == attr_start {
                        // junk byte inside the tag, step over it
                        self.pos += 1;
                        continue;
                    }
                    let attr_name = self.input[attr_start..attr_end].to_ascii_lowercase();
                    self.pos = attr_end;
                    let value = self.lex_attr_value();
                    attrs.push(Attr::new(attr_name, value));
                }
            }
        }

        let rawtext = matches!(name.as_str(), "script" | "style");
        self.tokens.push(Token::StartTag {
            name: name.clone(),
            attrs,
            self_closing,
        });
        if rawtext && !self_closing {
            self.lex_rawtext(&name);
        }
    }

    /// Value part of an attribute, after the name. Empty string when the
    /// attribute is bare (`disabled`).
    fn lex_attr_value(&mut self) -> String {
        self.skip_whitespace();
        if self.bytes.get(self.pos) != Some(&b'=') {
            return String::new();
        }
        self.pos += 1;
        self.skip_whitespace();

        match self.bytes.get(self.pos) {
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = self.pos + 1;
                let value_end = self.input[value_start..]
                    .find(quote as char)
                    .map(|offset| value_start + offset)
                    .unwrap_or(self.bytes.len());
                let value = decode_entities(&self.input[value_start..value_end]);
                self.pos = (value_end + 1).min(self.bytes.len());
                value
            }
            _ => {
                let value_start = self.pos;
                while self
                    .bytes
                    .get(self.pos)
                    .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'>')
                {
                    self.pos += 1;
                }
                decode_entities(&self.input[value_start..self.pos])
            }
        }
    }

    /// Consume the body of a rawtext element up to `</name`, emitting the
    /// body as a single undecoded text token followed by the end tag.
    fn lex_rawtext(&mut self, name: &str) {
        let lower = self.input[self.pos..].to_ascii_lowercase();
        let needle = format!("</{name}");
        match lower.find(&needle) {
            Some(offset) => {
                if offset > 0 {
                    self.tokens
                        .push(Token::Text(self.input[self.pos..self.pos + offset].to_string()));
                }
                self.pos += offset;
                self.skip_past_gt(self.pos + needle.len());
                self.tokens.push(Token::EndTag(name.to_string()));
            }
            None => {
                if self.pos < self.bytes.len() {
                    self.tokens.push(Token::Text(self.input[self.pos..].to_string()));
                }
                self.pos = self.bytes.len();
                self.tokens.push(Token::EndTag(name.to_string()));
            }
        }
    }

    fn scan_name(&self, start: usize) -> usize {
        let mut end = start;
        while self
            .bytes
            .get(end)
            .is_some_and(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':'))
        {
            end += 1;
        }
        end
    }

    fn skip_whitespace(&mut self) {
        while self.bytes.get(self.pos).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn skip_past_gt(&mut self, from: usize) {
        self.pos = self.input[from.min(self.bytes.len())..]
            .find('>')
            .map(|offset| from + offset + 1)
            .unwrap_or(self.bytes.len());
    }
}

fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    if input.len() >= prefix.len() && input[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&input[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_lex_tags_text_and_comments() {
        let tokens = tokenize("<p id=\"x\">hi <b>there</b></p><!-- note -->");
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "p".to_string(),
                    attrs: vec![Attr::new("id".to_string(), "x".to_string())],
                    self_closing: false,
                },
                Token::Text("hi ".to_string()),
                Token::StartTag {
                    name: "b".to_string(),
                    attrs: vec![],
                    self_closing: false,
                },
                Token::Text("there".to_string()),
                Token::EndTag("b".to_string()),
                Token::EndTag("p".to_string()),
                Token::Comment(" note ".to_string()),
            ]
        );
    }

    #[test]
    fn should_treat_stray_angle_bracket_as_text() {
        let tokens = tokenize("a < b");
        assert_eq!(
            tokens,
            vec![
                Token::Text("a ".to_string()),
                Token::Text("<".to_string()),
                Token::Text(" b".to_string()),
            ]
        );
    }

    #[test]
    fn should_keep_script_bodies_raw() {
        let tokens = tokenize("<script>if (a < b && c) {}</script>");
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "script".to_string(),
                    attrs: vec![],
                    self_closing: false,
                },
                Token::Text("if (a < b && c) {}".to_string()),
                Token::EndTag("script".to_string()),
            ]
        );
    }

    #[test]
    fn should_decode_entities_in_text_and_attributes() {
        let tokens = tokenize("<a title=\"Fish &amp; Chips\">Ci&ograve;</a>");
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "a".to_string(),
                    attrs: vec![Attr::new("title".to_string(), "Fish & Chips".to_string())],
                    self_closing: false,
                },
                Token::Text("Ciò".to_string()),
                Token::EndTag("a".to_string()),
            ]
        );
    }
}
