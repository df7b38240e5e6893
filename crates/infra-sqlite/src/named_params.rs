//! Named-parameter SQL.
//!
//! Statements are written with `:name` placeholders and rewritten to SQLite
//! positional `?` placeholders once, at bootstrap. The parameter names are
//! kept in placeholder order so values can be bound by name later.

use std::fmt;

/// A statement rewritten to positional placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSql {
    original: String,
    sql: String,
    names: Vec<String>,
}

impl ParsedSql {
    /// Rewrite `:name` placeholders to `?`.
    ///
    /// Single-quoted literals, double-quoted identifiers, `--` line comments
    /// and `::` are copied verbatim. A name repeated in the statement
    /// produces one placeholder per occurrence.
    pub fn parse(sql: &str) -> Self {
        let chars: Vec<char> = sql.chars().collect();
        let mut out = String::with_capacity(sql.len());
        let mut names = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match c {
                '\'' | '"' => {
                    let end = skip_quoted(&chars, i, c);
                    out.extend(&chars[i..end]);
                    i = end;
                }
                '-' if chars.get(i + 1) == Some(&'-') => {
                    let end = chars[i..]
                        .iter()
                        .position(|&ch| ch == '\n')
                        .map_or(chars.len(), |p| i + p);
                    out.extend(&chars[i..end]);
                    i = end;
                }
                ':' if chars.get(i + 1) == Some(&':') => {
                    out.push_str("::");
                    i += 2;
                }
                ':' if chars.get(i + 1).is_some_and(|&ch| is_name_start(ch)) => {
                    let start = i + 1;
                    let mut end = start;
                    while end < chars.len() && is_name_char(chars[end]) {
                        end += 1;
                    }
                    names.push(chars[start..end].iter().collect());
                    out.push('?');
                    i = end;
                }
                _ => {
                    out.push(c);
                    i += 1;
                }
            }
        }

        Self {
            original: sql.to_string(),
            sql: out,
            names,
        }
    }

    /// Statement with positional placeholders
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Statement as written
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Parameter names in placeholder order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl fmt::Display for ParsedSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Index just past the closing quote (doubled quotes are escapes)
fn skip_quoted(chars: &[char], start: usize, quote: char) -> usize {
    let mut i = start + 1;
    while i < chars.len() {
        if chars[i] == quote {
            if chars.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    chars.len()
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
