//! Script loading and statement splitting.
//!
//! Scripts are plain text. Two splitting strategies are supported:
//!
//! - [`SplitMode::Delimiter`] splits on every occurrence of a single
//!   character (`#` by default). It is not SQL-aware: a delimiter inside a
//!   string literal or comment still splits. Segments are kept verbatim,
//!   including empty and whitespace-only ones, so N segments always yield
//!   N statements.
//! - [`SplitMode::Sql`] terminates statements on `;` while skipping over
//!   string literals, quoted identifiers, comments and trigger bodies.

use std::fmt;
use std::path::Path;

use spatial_init_common::{Error, Result};

/// Default statement delimiter for delimiter-separated scripts.
pub const DEFAULT_DELIMITER: char = '#';

/// How a script is split into statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Literal split on a single delimiter character.
    Delimiter(char),
    /// SQL-aware split on `;` terminators.
    Sql,
}

impl Default for SplitMode {
    fn default() -> Self {
        Self::Delimiter(DEFAULT_DELIMITER)
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delimiter(c) => write!(f, "delimiter '{}'", c),
            Self::Sql => write!(f, "sql"),
        }
    }
}

/// Read a whole script file as UTF-8 text.
///
/// A leading byte order mark is dropped; everything else is returned as-is.
pub fn read_script(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::script(path, e))?;

    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Split script text into statements according to `mode`.
///
/// # Examples
///
/// ```
/// use spatial_init_db::script::{split_script, SplitMode};
///
/// let parts = split_script("CREATE TABLE t(id INTEGER);#\nINSERT INTO t VALUES(1);", SplitMode::default());
/// assert_eq!(parts, vec!["CREATE TABLE t(id INTEGER);", "\nINSERT INTO t VALUES(1);"]);
///
/// let parts = split_script("SELECT '#;'; SELECT 2;", SplitMode::Sql);
/// assert_eq!(parts, vec!["SELECT '#;'", "SELECT 2"]);
/// ```
pub fn split_script(script: &str, mode: SplitMode) -> Vec<String> {
    match mode {
        SplitMode::Delimiter(delimiter) => split_on_delimiter(script, delimiter),
        SplitMode::Sql => split_sql(script),
    }
}

fn split_on_delimiter(script: &str, delimiter: char) -> Vec<String> {
    script.split(delimiter).map(str::to_string).collect()
}

/// Lexical state while scanning SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lex {
    Code,
    /// Inside a quoted string or identifier, closed by the given char.
    Quoted(char),
    LineComment,
    BlockComment,
}

/// Tracks the keywords that decide whether a `;` ends the statement.
///
/// Only `CREATE [TEMP|TEMPORARY] TRIGGER` statements need this: their body
/// holds `;`-terminated statements and the trigger itself ends at `END;`.
/// `CASE ... END` expressions inside the body are counted so their `END`
/// does not close the trigger early.
#[derive(Debug, Default)]
struct Keywords {
    leading: Vec<String>,
    in_trigger_body: bool,
    case_depth: usize,
    trigger_closed: bool,
}

impl Keywords {
    fn push(&mut self, word: &str) {
        let upper = word.to_ascii_uppercase();

        if self.leading.len() < 3 {
            self.leading.push(upper.clone());
        }

        if !self.is_trigger() {
            return;
        }

        match upper.as_str() {
            "BEGIN" if !self.in_trigger_body => self.in_trigger_body = true,
            "CASE" if self.in_trigger_body => self.case_depth += 1,
            "END" if self.in_trigger_body => {
                if self.case_depth > 0 {
                    self.case_depth -= 1;
                } else {
                    self.trigger_closed = true;
                }
            }
            _ => {}
        }
    }

    fn is_trigger(&self) -> bool {
        match self.leading.as_slice() {
            [create, trigger, ..] if create == "CREATE" && trigger == "TRIGGER" => true,
            [create, temp, trigger]
                if create == "CREATE"
                    && (temp == "TEMP" || temp == "TEMPORARY")
                    && trigger == "TRIGGER" =>
            {
                true
            }
            _ => false,
        }
    }

    fn terminator_ends_statement(&self) -> bool {
        !self.is_trigger() || self.trigger_closed
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn push_trimmed(statements: &mut Vec<String>, current: &str) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}

fn split_sql(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut word = String::new();
    let mut keywords = Keywords::default();
    let mut lex = Lex::Code;
    let mut chars = script.chars().peekable();

    while let Some(c) = chars.next() {
        let next = chars.peek().copied();

        match lex {
            Lex::LineComment => {
                current.push(c);
                if c == '\n' {
                    lex = Lex::Code;
                }
                continue;
            }
            Lex::BlockComment => {
                current.push(c);
                if c == '*' && next == Some('/') {
                    current.push('/');
                    chars.next();
                    lex = Lex::Code;
                }
                continue;
            }
            Lex::Quoted(close) => {
                current.push(c);
                if c == close {
                    // Doubled closing quote is an escaped quote, except for `]`
                    if close != ']' && next == Some(close) {
                        current.push(close);
                        chars.next();
                    } else {
                        lex = Lex::Code;
                    }
                }
                continue;
            }
            Lex::Code => {}
        }

        if is_word_char(c) {
            word.push(c);
            current.push(c);
            continue;
        }

        if !word.is_empty() {
            keywords.push(&word);
            word.clear();
        }

        match c {
            '-' if next == Some('-') => {
                lex = Lex::LineComment;
                current.push(c);
            }
            '/' if next == Some('*') => {
                lex = Lex::BlockComment;
                current.push(c);
                current.push('*');
                chars.next();
            }
            '\'' | '"' | '`' => {
                lex = Lex::Quoted(c);
                current.push(c);
            }
            '[' => {
                lex = Lex::Quoted(']');
                current.push(c);
            }
            ';' if keywords.terminator_ends_statement() => {
                push_trimmed(&mut statements, &current);
                current.clear();
                keywords = Keywords::default();
            }
            _ => current.push(c),
        }
    }

    push_trimmed(&mut statements, &current);
    statements
}
