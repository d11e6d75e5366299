use crate::{
    parrot38::{delimiter::Delimiter, line::is_markup, post_parser::Post},
    utility::str::{split_lines_inclusive, trim_line_break},
};

// 記事を parrot38 の書式に戻す
//
// - メタデータは "::key:: value" として本文の前に書く
// - 書式と同じ形の本文の行には '\' を付ける
// - 記事の間には正規の区切り行を置く
//
// parse で得た記事は、本文が改行で終わっていれば読み戻すと一致する
// 手で作った記事は一致するとは限らない (値の前後の空白は落ち、改行を含む値や
// 単語でないキーはメタデータとして読めない)
pub fn dump(posts: &[Post], delimiter: &Delimiter) -> String {
    let separator = delimiter.default_line();

    let mut txt = String::new();
    for (i, post) in posts.iter().enumerate() {
        if 0 < i {
            txt.push_str(&separator);
            txt.push('\n');
        }

        for (key, value) in post.metadata.iter() {
            txt.push_str(&format!("::{}:: {}\n", key, value));
        }

        for line in split_lines_inclusive(&post.body) {
            if is_markup(trim_line_break(line), delimiter) {
                txt.push('\\');
            }
            txt.push_str(line);
        }

        if !post.body.is_empty() && !post.body.ends_with('\n') {
            txt.push('\n');
        }
    }

    txt
}
