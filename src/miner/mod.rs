pub mod classify;
pub mod detector;
pub mod splitter;
pub mod view;

use std::ops::Index;

use tracing::debug;

use crate::error::MineResult;
use detector::BlockDetector;
use splitter::ColumnSplitter;
pub use view::TableView;

/// End-of-line marker in text produced by the external extractor.
pub const EOL: &str = "\r\n";
/// End-of-page marker in text produced by the external extractor.
pub const EOP: char = '\x0c';

/// Split extracted text into pages at the end-of-page marker, dropping
/// empty segments such as the one after a trailing marker. Useful for
/// mining one page at a time; mining the whole document works too.
pub fn pages(text: &str) -> Vec<&str> {
    text.split(EOP).filter(|page| !page.is_empty()).collect()
}

/// Knobs for one mining run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MineOptions {
    /// Minimum run of consecutive spaces counted as a column separator
    pub space: usize,
    /// Consecutive non-matching interior lines tolerated before a block closes
    pub patience: usize,
    /// Force the first column to start at offset 0
    pub start_0: bool,
}

impl Default for MineOptions {
    fn default() -> Self {
        Self {
            space: 3,
            patience: 0,
            start_0: false,
        }
    }
}

/// Summary counters for one mining run.
#[derive(Debug, Default)]
pub struct MineStats {
    pub blocks_detected: usize,
    pub tables_kept: usize,
    pub blocks_dropped: usize,
}

impl MineStats {
    pub fn summary(&self) -> String {
        format!(
            "Detected {} candidate blocks: {} tables kept, {} dropped as empty.",
            self.blocks_detected, self.tables_kept, self.blocks_dropped
        )
    }
}

/// The tables mined from one text input, in source order, together with
/// the text they came from.
#[derive(Debug, Clone)]
pub struct Tables {
    tables: Vec<TableView>,
    text: String,
}

impl Tables {
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TableView> {
        self.tables.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TableView> {
        self.tables.iter()
    }

    /// The source text these tables were mined from.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Index<usize> for Tables {
    type Output = TableView;

    fn index(&self, index: usize) -> &TableView {
        &self.tables[index]
    }
}

impl<'a> IntoIterator for &'a Tables {
    type Item = &'a TableView;
    type IntoIter = std::slice::Iter<'a, TableView>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

/// Mines tables out of raw text extracted by a layout-preserving tool.
///
/// Detection and splitting are pure computations over the held text; each
/// call to [`TableMiner::mine`] works on its own buffers, so re-running
/// with the same options yields an identical result.
pub struct TableMiner {
    text: String,
}

impl TableMiner {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Run detection and splitting, keeping only views with at least one
    /// data row. Tables appear in the order their blocks appear in the
    /// text.
    pub fn mine(&self, options: &MineOptions) -> MineResult<Tables> {
        let (tables, _stats) = self.mine_with_stats(options)?;
        Ok(tables)
    }

    /// Like [`TableMiner::mine`], also reporting what was detected and
    /// dropped.
    pub fn mine_with_stats(&self, options: &MineOptions) -> MineResult<(Tables, MineStats)> {
        let detector = BlockDetector::new(options.space, options.patience)?;
        let splitter = ColumnSplitter::new(options.space, options.start_0)?;

        let blocks = detector.detect(&self.text);
        let mut stats = MineStats {
            blocks_detected: blocks.len(),
            ..Default::default()
        };

        let mut tables = Vec::new();
        for block in &blocks {
            let table = splitter.parse_block(block)?;
            if table.nrow() > 0 {
                stats.tables_kept += 1;
                tables.push(table);
            } else {
                stats.blocks_dropped += 1;
                debug!(
                    "dropped block with header {:?}: no parseable rows",
                    block.first()
                );
            }
        }

        Ok((
            Tables {
                tables,
                text: self.text.clone(),
            },
            stats,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Quarterly figures follow.

Name      Age      City
Alice     30       Paris
Bob       25       Berlin

That concludes the listing.
And some more closing prose.
";

    #[test]
    fn test_mine_sample_text() {
        let miner = TableMiner::new(SAMPLE);
        let tables = miner.mine(&MineOptions::default()).unwrap();

        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.headers(), &["Name", "Age", "City"]);
        assert_eq!(table.nrow(), 2);
        assert_eq!(table.data()[0], vec!["Alice", "30", "Paris"]);
        assert_eq!(table.data()[1], vec!["Bob", "25", "Berlin"]);
    }

    #[test]
    fn test_mine_keeps_source_text() {
        let miner = TableMiner::new(SAMPLE);
        let tables = miner.mine(&MineOptions::default()).unwrap();
        assert_eq!(tables.text(), SAMPLE);
    }

    #[test]
    fn test_prose_only_input_yields_empty_collection() {
        let miner = TableMiner::new("one sentence.\nand another one.\n");
        let tables = miner.mine(&MineOptions::default()).unwrap();
        assert!(tables.is_empty());
        assert_eq!(tables.len(), 0);
    }

    #[test]
    fn test_header_only_block_is_dropped() {
        let text = "\
Name      Age
a closing sentence here
another closing sentence
";
        let miner = TableMiner::new(text);
        let (tables, stats) = miner
            .mine_with_stats(&MineOptions::default())
            .unwrap();
        assert!(tables.is_empty());
        assert_eq!(stats.blocks_detected, 1);
        assert_eq!(stats.blocks_dropped, 1);
    }

    #[test]
    fn test_mining_is_deterministic() {
        let miner = TableMiner::new(SAMPLE);
        let options = MineOptions::default();
        let first = miner.mine(&options).unwrap();
        let second = miner.mine(&options).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_pages_split_on_form_feed() {
        let text = "page one text\x0cpage two text\x0c";
        let split = pages(text);
        assert_eq!(split, vec!["page one text", "page two text"]);
    }

    #[test]
    fn test_whole_document_header_opens_a_page() {
        // Whole-document input: the table's header line directly follows a
        // page break. The marker must not shift the split points.
        let text = "\
prose closing out the first page.
\x0cName      Age
Alice     30
Bob       25

prose after the table.
more prose after the table.
";
        let miner = TableMiner::new(text);
        let tables = miner.mine(&MineOptions::default()).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers(), &["Name", "Age"]);
        assert_eq!(tables[0].data()[0], vec!["Alice", "30"]);
        assert_eq!(tables[0].data()[1], vec!["Bob", "25"]);
    }

    #[test]
    fn test_crlf_input_mines_identically() {
        let crlf = SAMPLE.replace('\n', EOL);
        let miner = TableMiner::new(crlf);
        let tables = miner.mine(&MineOptions::default()).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].data()[1], vec!["Bob", "25", "Berlin"]);
    }
}
