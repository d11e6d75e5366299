use serde::{Deserialize, Serialize};

use crate::{
    parrot38::{
        delimiter::Delimiter,
        error::{BlockError, InvalidMetadataError},
        line::{classify_line, LineClass},
        metadata::Metadata,
        splitter::{split, RawBlock},
    },
    utility::str::trim_line_break,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub metadata: Metadata,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub delimiter: Delimiter,

    // 下から上に読んだ行が渡される (本文は読む順に戻す)
    pub backwards: bool,

    pub trim_body: bool,
}

// 空でないブロックごとに結果を返す
// 失敗したブロックがあっても他のブロックは続けて読む
pub fn parse(document: &str, options: &ParseOptions) -> Vec<Result<Post, BlockError>> {
    split(document, &options.delimiter)
        .iter()
        .map(|block| {
            parse_block(block, options).map_err(|source| BlockError {
                block_index: block.index,
                first_line: block.first_line,
                source,
            })
        })
        .collect()
}

// 最初の不正な記事で止める
pub fn parse_all(document: &str, options: &ParseOptions) -> Result<Vec<Post>, BlockError> {
    parse(document, options).into_iter().collect()
}

pub fn parse_block(block: &RawBlock, options: &ParseOptions) -> Result<Post, InvalidMetadataError> {
    let mut metadata = Metadata::new();
    let mut body_lines = Vec::with_capacity(block.lines.len());

    for (i, &line) in block.lines.iter().enumerate() {
        match classify_line(line, &options.delimiter) {
            LineClass::Escaped(unescaped) => body_lines.push(unescaped),

            LineClass::Metadata { keyword, value } => {
                metadata
                    .insert_once(keyword, value.trim())
                    .map_err(|existing_value| InvalidMetadataError {
                        key: keyword.to_lowercase(),
                        existing_value: existing_value.to_owned(),
                        line_number: block.first_line + i,
                    })?;
            }

            // split を通していれば来ない
            LineClass::Separator => {
                log::trace!("Dropping separator at line {}", block.first_line + i);
            }

            LineClass::Body => body_lines.push(line),
        }
    }

    let mut body = if options.backwards {
        concat_backwards(&body_lines)
    } else {
        body_lines.concat()
    };
    if options.trim_body {
        body = body.trim().to_owned();
    }

    Ok(Post { metadata, body })
}

// 文書の最後の行は改行で終わらないことがある
// 逆順にすると先頭に来るので改行を補い、代わりに新しい最後の行の改行を落とす
fn concat_backwards(lines: &[&str]) -> String {
    let mut body = String::new();
    let mut missing_line_break = false;

    for line in lines.iter().rev() {
        body.push_str(line);
        if !line.ends_with('\n') {
            body.push('\n');
            missing_line_break = true;
        }
    }

    if missing_line_break {
        let len = trim_line_break(&body).len();
        body.truncate(len);
    }

    body
}
