use regex::Regex;

use crate::parrot38::error::DelimiterError;

pub const DEFAULT_DELIMITER_CHAR: char = ':';
pub const DEFAULT_MIN_LENGTH: usize = 7;

// 正規の区切り行の長さ
const DEFAULT_LINE_LENGTH: usize = 38;

#[derive(Debug, Clone)]
pub struct Delimiter {
    char: char,
    min_length: usize,
    pattern: Regex,
}

impl Delimiter {
    pub fn new(char: char, min_length: usize) -> Result<Self, DelimiterError> {
        if min_length == 0 {
            return Err(DelimiterError::ZeroMinLength);
        }
        if char.is_whitespace() || char == '\\' {
            return Err(DelimiterError::UnusableChar(char));
        }

        let pattern = Regex::new(&format!(
            r"^{}{{{},}}$",
            regex::escape(&char.to_string()),
            min_length
        ))?;

        Ok(Delimiter {
            char,
            min_length,
            pattern,
        })
    }

    // コマンドライン等から文字列で受け取る場合
    pub fn from_str_with_min_length(char: &str, min_length: usize) -> Result<Self, DelimiterError> {
        let mut chars = char.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c, min_length),
            _ => Err(DelimiterError::NotSingleChar(char.to_owned())),
        }
    }

    pub fn default_line(&self) -> String {
        std::iter::repeat(self.char)
            .take(DEFAULT_LINE_LENGTH.max(self.min_length))
            .collect()
    }

    // line は末尾の改行を含まないこと
    pub fn is_separator(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER_CHAR, DEFAULT_MIN_LENGTH).expect("default delimiter is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("::::::", false)]
    #[case(":::::::", true)]
    #[case("::::::::::::::::::::::::::::::::::::::", true)]
    #[case("::::::::::::::::::: ::::::::::::::::::", false)]
    #[case(":::::::::::::::::::::::::::::::::::::: ", false)]
    #[case(" :::::::", false)]
    #[case("::::::;", false)]
    #[case("", false)]
    fn detects_default_separator(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(Delimiter::default().is_separator(line), expected);
    }

    #[test]
    fn escaped_separator_is_not_a_separator() {
        let delimiter = Delimiter::default();
        assert!(!delimiter.is_separator(r"\:::::::"));
        assert!(!delimiter.is_separator(r"\\:::::::"));
    }

    #[test]
    fn regex_special_chars_are_matched_literally() {
        let delimiter = Delimiter::new('*', 3).unwrap();
        assert!(delimiter.is_separator("***"));
        assert!(!delimiter.is_separator("**"));
        assert!(!delimiter.is_separator("abc"));

        let delimiter = Delimiter::new('.', 7).unwrap();
        assert!(delimiter.is_separator("......."));
        assert!(!delimiter.is_separator("abcdefg"));
    }

    #[test]
    fn default_line_has_38_chars() {
        let line = Delimiter::default().default_line();
        assert_eq!(line.len(), 38);
        assert!(Delimiter::default().is_separator(&line));

        let long = Delimiter::new('=', 40).unwrap();
        assert!(long.is_separator(&long.default_line()));
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert_eq!(
            Delimiter::from_str_with_min_length("::", 7).unwrap_err(),
            DelimiterError::NotSingleChar("::".to_owned())
        );
        assert_eq!(
            Delimiter::from_str_with_min_length("", 7).unwrap_err(),
            DelimiterError::NotSingleChar(String::new())
        );
        assert_eq!(
            Delimiter::new(':', 0).unwrap_err(),
            DelimiterError::ZeroMinLength
        );
        assert_eq!(
            Delimiter::new(' ', 7).unwrap_err(),
            DelimiterError::UnusableChar(' ')
        );
        assert!(Delimiter::from_str_with_min_length("#", 7).is_ok());
    }
}
