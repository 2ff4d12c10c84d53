//! Tuple literal grammar.
//!
//! ```text
//! tuple   := '(' [ element ( ',' element )* [ ',' ] ] ')'
//! element := number | string | tuple      (tuples nest one level)
//! number  := [+-]? digits [ '.' digits ] [ (e|E) [+-]? digits ]
//! string  := '\'' chars '\'' | '"' chars '"'
//! ```

use super::TypedValue;

/// Deepest tuple nesting the grammar accepts, counting the outer tuple.
const MAX_DEPTH: usize = 2;

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

/// Parses a complete tuple literal, rejecting trailing text.
pub(super) fn parse_tuple(input: &str) -> Result<Vec<TypedValue>, String> {
    let mut cursor = Cursor { input, pos: 0 };

    cursor.skip_ws();
    if !cursor.eat_char('(') {
        return Err("expected '('".to_owned());
    }
    let items = cursor.tuple_body(1)?;
    cursor.skip_ws();

    if let Some(ch) = cursor.peek_char() {
        return Err(format!(
            "unexpected '{ch}' after closing ')' at offset {}",
            cursor.pos
        ));
    }

    Ok(items)
}

impl<'a> Cursor<'a> {
    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn eat_char(&mut self, ch: char) -> bool {
        if self.peek_char() == Some(ch) {
            self.advance(ch.len_utf8());
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance(ch.len_utf8());
        }
    }

    /// Parses elements after an opening paren, through the closing one.
    fn tuple_body(&mut self, depth: usize) -> Result<Vec<TypedValue>, String> {
        let mut items = Vec::new();

        self.skip_ws();
        if self.eat_char(')') {
            return Ok(items);
        }

        loop {
            items.push(self.element(depth)?);
            self.skip_ws();

            if self.eat_char(',') {
                self.skip_ws();
                // Trailing comma: `(1,)`
                if self.eat_char(')') {
                    return Ok(items);
                }
            } else if self.eat_char(')') {
                return Ok(items);
            } else {
                return Err(match self.peek_char() {
                    None => "unbalanced parentheses: missing ')'".to_owned(),
                    Some(ch) => format!("expected ',' or ')' but found '{ch}' at offset {}", self.pos),
                });
            }
        }
    }

    fn element(&mut self, depth: usize) -> Result<TypedValue, String> {
        match self.peek_char() {
            None => Err("unbalanced parentheses: missing ')'".to_owned()),
            Some('(') => {
                if depth >= MAX_DEPTH {
                    return Err(format!(
                        "tuples nest at most {} level deep",
                        MAX_DEPTH - 1
                    ));
                }
                self.advance(1);
                self.tuple_body(depth + 1).map(TypedValue::Tuple)
            }
            Some(quote @ ('\'' | '"')) => {
                self.advance(1);
                self.string(quote).map(TypedValue::String)
            }
            Some(ch) if ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.') => self.number(),
            Some(ch) => Err(format!("unexpected '{ch}' at offset {}", self.pos)),
        }
    }

    fn number(&mut self) -> Result<TypedValue, String> {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E') {
                self.advance(1);
            } else {
                break;
            }
        }

        let text = &self.input[start..self.pos];
        let is_float = text.contains(['.', 'e', 'E']);

        if is_float {
            text.parse::<f64>()
                .map(TypedValue::Float)
                .map_err(|_| format!("invalid number '{text}'"))
        } else {
            text.parse::<i64>()
                .map(TypedValue::Integer)
                .map_err(|_| format!("invalid number '{text}'"))
        }
    }

    /// Parses string contents after the opening quote.
    fn string(&mut self, quote: char) -> Result<String, String> {
        let mut out = String::new();

        while let Some(ch) = self.peek_char() {
            self.advance(ch.len_utf8());

            if ch == quote {
                return Ok(out);
            }
            if ch != '\\' {
                out.push(ch);
                continue;
            }

            let escaped = self
                .peek_char()
                .ok_or_else(|| "unterminated string".to_owned())?;
            self.advance(escaped.len_utf8());
            match escaped {
                '\\' | '\'' | '"' => out.push(escaped),
                'n' => out.push('\n'),
                't' => out.push('\t'),
                other => return Err(format!("unsupported escape '\\{other}'")),
            }
        }

        Err("unterminated string".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<TypedValue> {
        values.iter().copied().map(TypedValue::Integer).collect()
    }

    #[test]
    fn test_empty_and_singleton() {
        assert!(parse_tuple("()").unwrap().is_empty());
        assert_eq!(parse_tuple(" ( 7 , ) ").unwrap(), ints(&[7]));
    }

    #[test]
    fn test_mixed_elements() {
        let items = parse_tuple("(-3, 4.5, 'door', \"big \\\"gate\\\"\", 1e2)").unwrap();
        assert_eq!(
            items,
            vec![
                TypedValue::Integer(-3),
                TypedValue::Float(4.5),
                TypedValue::String("door".into()),
                TypedValue::String("big \"gate\"".into()),
                TypedValue::Float(100.0),
            ]
        );
    }

    #[test]
    fn test_one_level_of_nesting() {
        let items = parse_tuple("((0, 1), (2, 3))").unwrap();
        assert_eq!(
            items,
            vec![
                TypedValue::Tuple(ints(&[0, 1])),
                TypedValue::Tuple(ints(&[2, 3])),
            ]
        );
        assert!(parse_tuple("(((1,),),)").unwrap_err().contains("nest"));
    }

    #[test]
    fn test_unbalanced() {
        assert!(parse_tuple("(1, 2").unwrap_err().contains("missing ')'"));
        assert!(parse_tuple("(1, (2, 3)").is_err());
        assert!(parse_tuple("(1, 2))").unwrap_err().contains("after closing"));
        assert!(parse_tuple("1, 2").is_err());
    }

    #[test]
    fn test_rejects_non_literals() {
        assert!(parse_tuple("(x, 1)").is_err());
        assert!(parse_tuple("(1 2)").is_err());
        assert!(parse_tuple("(1,,2)").is_err());
        assert!(parse_tuple("('open)").unwrap_err().contains("unterminated"));
        assert!(parse_tuple("(1-2)").unwrap_err().contains("invalid number"));
    }
}
