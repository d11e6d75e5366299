use crate::{
    parrot38::delimiter::Delimiter,
    utility::str::{is_blank, split_lines_inclusive, trim_line_break},
};

// 区切り行の間の行 (各行は改行を含む)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub index: usize,      // 空でないブロックの中での順番 (0 始まり)
    pub first_line: usize, // lines[0] の行番号 (1 始まり)
    pub lines: Vec<&'a str>,
}

impl RawBlock<'_> {
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| is_blank(line))
    }

    pub fn text(&self) -> String {
        self.lines.concat()
    }
}

// 区切り行はどちらのブロックにも含めない
// 空白だけのブロックは記事にならないので捨てる
pub fn split<'a>(document: &'a str, delimiter: &Delimiter) -> Vec<RawBlock<'a>> {
    let mut runs: Vec<(usize, Vec<&str>)> = vec![(1, vec![])];

    for (i, line) in split_lines_inclusive(document).enumerate() {
        let line_number = i + 1;

        if delimiter.is_separator(trim_line_break(line)) {
            runs.push((line_number + 1, vec![]));
            continue;
        }

        if let Some((_, lines)) = runs.last_mut() {
            lines.push(line);
        }
    }

    let mut blocks = Vec::with_capacity(runs.len());
    for (first_line, lines) in runs {
        let block = RawBlock {
            index: blocks.len(),
            first_line,
            lines,
        };

        if block.is_blank() {
            log::trace!("Skipping blank block at line {}", first_line);
            continue;
        }

        blocks.push(block);
    }

    log::debug!("Found {} blocks", blocks.len());

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(blocks: &[RawBlock]) -> Vec<String> {
        blocks.iter().map(RawBlock::text).collect()
    }

    #[test]
    fn document_without_separator_is_one_block() {
        let document = "::title:: one\n\nbody\n:::::: not a separator\n::::::\n";
        let blocks = split(document, &Delimiter::default());

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), document);
        assert_eq!(blocks[0].index, 0);
        assert_eq!(blocks[0].first_line, 1);
    }

    #[test]
    fn separators_are_removed() {
        let document = "first\n:::::::\nsecond\n::::::::::::::::::::::::::::::::::::::\nthird";
        let blocks = split(document, &Delimiter::default());

        assert_eq!(texts(&blocks), vec!["first\n", "second\n", "third"]);
        assert_eq!(
            blocks.iter().map(|b| b.first_line).collect::<Vec<_>>(),
            vec![1, 3, 5]
        );
    }

    #[test]
    fn blank_blocks_are_skipped() {
        let document = concat!(
            "::::::::::::::::::::::::::::::::::::::\n",
            "\n",
            "first\n",
            ":::::::\n",
            "  \n",
            "\t\n",
            ":::::::\n",
            ":::::::\n",
            "second\n",
            "::::::::::::::::::::::::::::::::::::::\n",
        );
        let blocks = split(document, &Delimiter::default());

        assert_eq!(texts(&blocks), vec!["\nfirst\n", "second\n"]);
        assert_eq!(blocks[0].index, 0);
        assert_eq!(blocks[0].first_line, 2);
        assert_eq!(blocks[1].index, 1);
        assert_eq!(blocks[1].first_line, 9);
    }

    #[test]
    fn escaped_or_dirty_separators_stay_in_block() {
        let document = concat!(
            "first\n",
            "\\::::::::::::::::::::::::::::::::::::::\n",
            "::::::::::::::::::: ::::::::::::::::::\n",
            ":::::: \n",
            "still first\n",
        );
        let blocks = split(document, &Delimiter::default());

        assert_eq!(texts(&blocks), vec![document]);
    }

    #[test]
    fn crlf_separators() {
        let document = "first\r\n:::::::\r\nsecond\r\n";
        let blocks = split(document, &Delimiter::default());

        assert_eq!(texts(&blocks), vec!["first\r\n", "second\r\n"]);
    }

    #[test]
    fn custom_delimiter() {
        let delimiter = Delimiter::new('%', 3).unwrap();
        let document = "first\n%%%\nsecond\n:::::::\nstill second\n";
        let blocks = split(document, &delimiter);

        assert_eq!(
            texts(&blocks),
            vec!["first\n", "second\n:::::::\nstill second\n"]
        );
    }

    #[test]
    fn empty_document() {
        assert!(split("", &Delimiter::default()).is_empty());
        assert!(split("\n\n", &Delimiter::default()).is_empty());
    }
}
