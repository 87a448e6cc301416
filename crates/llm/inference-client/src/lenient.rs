//! Lenient parsing for near-JSON lines (Python-literal style dict reprs).
//!
//! The line is rewritten token by token into strict JSON and handed to serde_json; nothing is
//! evaluated. Accepted deviations: single-quoted strings, `True` / `False` / `None`, and trailing
//! commas before `}` or `]`. Anything else still fails.

use serde_json::Value;

/// Lines longer than this are not rewritten.
pub(crate) const MAX_LENIENT_LINE: usize = 64 * 1024;

pub(crate) fn parse_lenient(line: &str) -> Option<Value> {
    if line.len() > MAX_LENIENT_LINE {
        return None;
    }
    let rewritten = to_strict_json(line)?;
    serde_json::from_str(&rewritten).ok()
}

fn to_strict_json(input: &str) -> Option<String> {
    let mut out = String::with_capacity(input.len() + 8);
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push('"');
                copy_double_quoted(&mut chars, &mut out)?;
            }
            '\'' => {
                out.push('"');
                copy_single_quoted(&mut chars, &mut out)?;
            }
            '}' | ']' => {
                drop_trailing_comma(&mut out);
                out.push(c);
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        word.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    _ => word.as_str(),
                });
            }
            _ => out.push(c),
        }
    }
    Some(out)
}

/// Copies the rest of a `"…"` string including the closing quote. None if unterminated.
fn copy_double_quoted<I>(chars: &mut I, out: &mut String) -> Option<()>
where
    I: Iterator<Item = char>,
{
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => out.push(chars.next()?),
            '"' => return Some(()),
            _ => {}
        }
    }
    None
}

/// Rewrites the rest of a `'…'` string as a double-quoted one. None if unterminated.
fn copy_single_quoted<I>(chars: &mut I, out: &mut String) -> Option<()>
where
    I: Iterator<Item = char>,
{
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                '\'' => out.push('\''),
                escaped => {
                    out.push('\\');
                    out.push(escaped);
                }
            },
            '"' => out.push_str("\\\""),
            '\'' => {
                out.push('"');
                return Some(());
            }
            _ => out.push(c),
        }
    }
    None
}

fn drop_trailing_comma(out: &mut String) {
    let trimmed_len = out.trim_end().len();
    if out[..trimmed_len].ends_with(',') {
        out.truncate(trimmed_len - 1);
    }
}
