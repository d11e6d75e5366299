use thiserror::Error;

// 同じ記事の中でキーワードが 2 回現れた (値が同じでもエラー)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("metadata {key:?} at line {line_number} is already set to {existing_value:?}")]
pub struct InvalidMetadataError {
    pub key: String,
    pub existing_value: String,
    pub line_number: usize, // 文書全体での行番号 (1 始まり)
}

// 記事 1 つ分の失敗 (どのブロックかを持つ)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid post #{block_index} starting at line {first_line}")]
pub struct BlockError {
    pub block_index: usize, // 空でないブロックの中での順番 (0 始まり)
    pub first_line: usize,  // ブロック先頭の行番号 (1 始まり)
    #[source]
    pub source: InvalidMetadataError,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DelimiterError {
    #[error("delimiter has to be a single character, got {0:?}")]
    NotSingleChar(String),

    #[error("delimiter cannot be built from {0:?}")]
    UnusableChar(char),

    #[error("minimum delimiter length has to be at least 1")]
    ZeroMinLength,

    #[error("failed to build delimiter pattern")]
    Pattern(#[from] regex::Error),
}
