use std::path::Path;

use anyhow::{Context, Result};

use crate::{
    parrot38::{
        error::BlockError,
        post_parser::{parse, ParseOptions, Post},
    },
    utility::file::read_text_file,
};

// 記事ごとの結果をすべて返す
pub fn load_file(
    path: &Path,
    options: &ParseOptions,
    encoding_label: Option<&str>,
) -> Result<Vec<Result<Post, BlockError>>> {
    let txt = read_text_file(path, encoding_label)?;
    Ok(parse(&txt, options))
}

// ファイルの順に読み、最初の不正な記事で止める
pub fn load<P: AsRef<Path>>(
    paths: &[P],
    options: &ParseOptions,
    encoding_label: Option<&str>,
) -> Result<Vec<Post>> {
    let mut posts = Vec::new();

    for path in paths {
        let path = path.as_ref();

        for result in load_file(path, options, encoding_label)? {
            let post = result.with_context(|| format!("Failed to parse {}", path.display()))?;
            posts.push(post);
        }
    }

    Ok(posts)
}
