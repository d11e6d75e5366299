// 改行は "\n" と "\r\n" のどちらもありうる
pub fn trim_line_break(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

pub fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

// 改行を含めたまま行に分ける
pub fn split_lines_inclusive(txt: &str) -> impl Iterator<Item = &str> {
    txt.split_inclusive('\n')
}
