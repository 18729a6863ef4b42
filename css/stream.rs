/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::CSSParserError;

// --------- //
// Structure //
// --------- //

/// Flux de points de code CSS, avec retour arrière libre : les analyseurs
/// de sélecteurs et de feuilles de style consomment ce flux caractère par
/// caractère.
#[derive(Debug)]
pub(crate) struct CSSInputStream {
    chars: Vec<char>,
    position: usize,
}

// -------------- //
// Implémentation //
// -------------- //

impl CSSInputStream {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.position >= self.chars.len()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.position + n).copied()
    }

    pub(crate) fn consume(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Consomme le caractère attendu, ou échoue.
    pub(crate) fn expect(&mut self, expected: char) -> Result<(), CSSParserError> {
        match self.peek() {
            | Some(ch) if ch == expected => {
                self.position += 1;
                Ok(())
            }
            | Some(ch) => Err(self.unexpected(ch)),
            | None => Err(CSSParserError::UnexpectedEOF),
        }
    }

    pub(crate) fn unexpected(&self, ch: char) -> CSSParserError {
        CSSParserError::UnexpectedCharacter {
            ch,
            position: self.position,
        }
    }

    /// Consomme les espaces blancs. Renvoie `true` si au moins un espace
    /// a été consommé.
    pub(crate) fn skip_whitespace(&mut self) -> bool {
        let start = self.position;
        while matches!(self.peek(), Some(ch) if is_whitespace(ch)) {
            self.position += 1;
        }
        self.position != start
    }

    /// Consomme les espaces blancs et les commentaires `/* ... */`. Un
    /// commentaire non terminé s'étend jusqu'à la fin du flux.
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.skip_whitespace();

            if self.peek() == Some('/') && self.peek_nth(1) == Some('*') {
                self.position += 2;
                while !self.is_eof()
                    && !(self.peek() == Some('*')
                        && self.peek_nth(1) == Some('/'))
                {
                    self.position += 1;
                }
                self.position = (self.position + 2).min(self.chars.len());
                continue;
            }

            break;
        }
    }

    /// Un identifiant peut-il commencer ici ?
    pub(crate) fn starts_ident(&self) -> bool {
        match (self.peek(), self.peek_nth(1)) {
            | (Some('-'), Some(next)) => {
                is_name_start(next) || next == '-' || next == '\\'
            }
            | (Some('\\'), Some(_)) => true,
            | (Some(ch), _) => is_name_start(ch),
            | _ => false,
        }
    }

    /// Consomme un identifiant CSS, séquences d'échappement comprises.
    pub(crate) fn consume_ident(&mut self) -> Result<String, CSSParserError> {
        if !self.starts_ident() {
            return Err(match self.peek() {
                | Some(ch) => self.unexpected(ch),
                | None => CSSParserError::UnexpectedEOF,
            });
        }

        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\\' {
                self.position += 1;
                name.push(self.consume_escape()?);
            } else if is_name(ch) {
                self.position += 1;
                name.push(ch);
            } else {
                break;
            }
        }
        Ok(name)
    }

    /// Consomme une chaîne entre guillemets simples ou doubles.
    pub(crate) fn consume_string(&mut self) -> Result<String, CSSParserError> {
        let quote = match self.consume() {
            | Some(quote @ ('"' | '\'')) => quote,
            | Some(ch) => {
                self.position -= 1;
                return Err(self.unexpected(ch));
            }
            | None => return Err(CSSParserError::UnexpectedEOF),
        };

        let mut value = String::new();
        loop {
            match self.consume() {
                | Some(ch) if ch == quote => return Ok(value),
                | Some('\\') => value.push(self.consume_escape()?),
                | Some(ch) => value.push(ch),
                | None => return Err(CSSParserError::UnexpectedEOF),
            }
        }
    }

    /// Le `\` vient d'être consommé. Jusqu'à six chiffres hexadécimaux,
    /// suivis d'un espace optionnel, ou un caractère littéral.
    fn consume_escape(&mut self) -> Result<char, CSSParserError> {
        let first = self.consume().ok_or(CSSParserError::UnexpectedEOF)?;

        if !first.is_ascii_hexdigit() {
            return Ok(first);
        }

        let mut hex = String::from(first);
        while hex.len() < 6 {
            match self.peek() {
                | Some(ch) if ch.is_ascii_hexdigit() => {
                    self.position += 1;
                    hex.push(ch);
                }
                | _ => break,
            }
        }
        if matches!(self.peek(), Some(ch) if is_whitespace(ch)) {
            self.position += 1;
        }

        let code_point = u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD);
        Ok(match char::from_u32(code_point) {
            | Some(ch) if code_point != 0 => ch,
            | _ => '\u{FFFD}',
        })
    }

    /// Consomme jusqu'à l'un des caractères d'arrêt (exclu), en tenant
    /// compte des chaînes et des blocs imbriqués `()`, `[]` et `{}`.
    pub(crate) fn consume_until(&mut self, stops: &[char]) -> String {
        let mut output = String::new();
        let mut depth = 0usize;

        while let Some(ch) = self.peek() {
            if depth == 0 && stops.contains(&ch) {
                break;
            }

            match ch {
                | '"' | '\'' => {
                    let start = self.position;
                    if self.consume_string().is_err() {
                        self.position = self.chars.len();
                    }
                    output.extend(&self.chars[start..self.position]);
                    continue;
                }
                | '(' | '[' | '{' => depth += 1,
                | ')' | ']' | '}' => depth = depth.saturating_sub(1),
                | _ => {}
            }

            output.push(ch);
            self.position += 1;
        }

        output
    }
}

// -------- //
// Fonction //
// -------- //

pub(crate) fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\u{000C}')
}

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || !ch.is_ascii()
}

fn is_name(ch: char) -> bool {
    is_name_start(ch) || ch.is_ascii_digit() || ch == '-'
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_ident() {
        let mut stream = CSSInputStream::new("fake-body.x");
        assert_eq!(stream.consume_ident(), Ok("fake-body".into()));
        assert_eq!(stream.peek(), Some('.'));

        let mut stream = CSSInputStream::new(r"\31 0x");
        assert_eq!(stream.consume_ident(), Ok("10x".into()));

        let mut stream = CSSInputStream::new("1abc");
        assert!(stream.consume_ident().is_err());
    }

    #[test]
    fn test_skip_comments() {
        let mut stream = CSSInputStream::new("  /* a */ /* b */x");
        stream.skip_whitespace_and_comments();
        assert_eq!(stream.peek(), Some('x'));
    }

    #[test]
    fn test_consume_until_respects_nesting() {
        let mut stream = CSSInputStream::new("url(a;b) 'c;d'; e");
        assert_eq!(stream.consume_until(&[';']), "url(a;b) 'c;d'");
        assert_eq!(stream.consume(), Some(';'));
    }
}
