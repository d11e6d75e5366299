use once_cell::sync::Lazy;
use regex::Regex;

use crate::{parrot38::delimiter::Delimiter, utility::str::trim_line_break};

// "::keyword::value"
static REGEX_METADATA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^::(\w+)::(.*)$").unwrap());

#[derive(Debug, PartialEq, Eq)]
pub enum LineClass<'a> {
    Separator,

    Metadata { keyword: &'a str, value: &'a str },

    // 先頭の '\' を取り除いた残り (改行を含む)
    Escaped(&'a str),

    Body,
}

// '\' → 区切り → メタデータ → 本文 の順に判定する
pub fn classify_line<'a>(line: &'a str, delimiter: &Delimiter) -> LineClass<'a> {
    let content = trim_line_break(line);

    if let Some(unescaped) = parse_escaped(line, delimiter) {
        return LineClass::Escaped(unescaped);
    }

    if delimiter.is_separator(content) {
        return LineClass::Separator;
    }

    if let Some((keyword, value)) = parse_metadata(content) {
        return LineClass::Metadata { keyword, value };
    }

    LineClass::Body
}

// content は末尾の改行を含まないこと
pub fn parse_metadata(content: &str) -> Option<(&str, &str)> {
    let captures = REGEX_METADATA.captures(content)?;
    let keyword = captures.get(1)?.as_str();
    let value = captures.get(2)?.as_str();
    Some((keyword, value))
}

pub fn is_markup(content: &str, delimiter: &Delimiter) -> bool {
    delimiter.is_separator(content) || REGEX_METADATA.is_match(content)
}

fn parse_escaped<'a>(line: &'a str, delimiter: &Delimiter) -> Option<&'a str> {
    let unescaped = line.strip_prefix('\\')?;
    if is_markup(trim_line_break(unescaped), delimiter) {
        Some(unescaped)
    } else {
        None
    }
}
