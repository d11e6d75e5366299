// parrot38: 1 つのテキストファイルに複数のブログ記事を書くための書式
//
// - 記事の区切りは同じ文字 (既定は ':') を 7 個以上並べただけの行
//   - 正規の区切りは 38 個並べたもの
// - "::key:: value" の行はメタデータ
// - 書式と同じ形の行を本文に書く場合は先頭に '\' を付ける

pub mod delimiter;
pub mod error;
pub mod line;
pub mod loader;
pub mod metadata;
pub mod post_parser;
pub mod splitter;
pub mod writer;

pub use delimiter::{Delimiter, DEFAULT_DELIMITER_CHAR, DEFAULT_MIN_LENGTH};
pub use error::{BlockError, DelimiterError, InvalidMetadataError};
pub use loader::{load, load_file};
pub use metadata::Metadata;
pub use post_parser::{parse, parse_all, parse_block, ParseOptions, Post};
pub use splitter::{split, RawBlock};
pub use writer::dump;
