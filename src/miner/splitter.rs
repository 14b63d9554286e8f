use regex::Regex;

use super::view::TableView;
use crate::error::{MineError, MineResult};

/// Splits a candidate block into columns at offsets derived from its
/// header line.
///
/// Offsets are character offsets, not byte offsets: the extractor aligned
/// the layout by visual columns, and byte offsets would drift on any
/// multibyte character.
pub struct ColumnSplitter {
    separator: Regex,
    start_0: bool,
}

impl ColumnSplitter {
    pub fn new(space: usize, start_0: bool) -> MineResult<Self> {
        if space < 1 {
            return Err(MineError::configuration(format!(
                "space must be >= 1, got {}",
                space
            )));
        }
        let separator = Regex::new(&format!(r"[ ]{{{},}}", space))
            .map_err(|e| MineError::configuration(format!("invalid separator pattern: {}", e)))?;
        Ok(Self { separator, start_0 })
    }

    /// Parse one block into a table view. The block's first line is the
    /// header; every remaining line is sliced into cells at the header's
    /// column offsets. The returned view may have zero rows (header-only
    /// block, or a header with fewer than two tokens); the caller decides
    /// whether to keep it.
    pub fn parse_block(&self, block: &[String]) -> MineResult<TableView> {
        let header = match block.first() {
            Some(line) => line.as_str(),
            None => return TableView::new(Vec::new(), Vec::new()),
        };

        let (headers, mut splits) = self.header_columns(header);

        if self.start_0 {
            if let Some(first) = splits.first_mut() {
                *first = 0;
            }
        }

        let mut data = Vec::new();
        if splits.len() > 1 {
            for row in &block[1..] {
                let mut cells = Vec::with_capacity(splits.len());
                for pair in splits.windows(2) {
                    cells.push(slice_chars(row, pair[0], Some(pair[1])).trim().to_string());
                }
                let last = splits[splits.len() - 1];
                cells.push(slice_chars(row, last, None).trim().to_string());
                data.push(cells);
            }
        }

        TableView::new(headers, data)
    }

    /// Tokenize the header line and derive one split point per token.
    ///
    /// Tokens are the trimmed segments between separator gaps; each split
    /// point is the character offset where the token's text begins. Deriving
    /// offsets from the segment spans keeps them strictly increasing even
    /// when two header tokens carry identical text, where a leftmost
    /// substring search would collapse both onto the first occurrence.
    fn header_columns(&self, header: &str) -> (Vec<String>, Vec<usize>) {
        let mut headers = Vec::new();
        let mut splits = Vec::new();

        let mut segment_start = 0;
        let mut push_segment = |start: usize, end: usize| {
            let segment = &header[start..end];
            let token = segment.trim();
            if token.is_empty() {
                return;
            }
            let leading = segment.len() - segment.trim_start().len();
            let token_byte_offset = start + leading;
            headers.push(token.to_string());
            splits.push(header[..token_byte_offset].chars().count());
        };

        for gap in self.separator.find_iter(header) {
            push_segment(segment_start, gap.start());
            segment_start = gap.end();
        }
        push_segment(segment_start, header.len());

        (headers, splits)
    }
}

/// Slice a string by character offsets, clamped to its length. `None` for
/// the end means "to end of line".
fn slice_chars(s: &str, start: usize, end: Option<usize>) -> &str {
    let mut indices = s.char_indices().map(|(i, _)| i);
    let byte_start = match indices.nth(start) {
        Some(i) => i,
        None => return "",
    };
    let byte_end = match end {
        Some(end) if end > start => s
            .char_indices()
            .map(|(i, _)| i)
            .nth(end)
            .unwrap_or(s.len()),
        Some(_) => return "",
        None => s.len(),
    };
    &s[byte_start..byte_end]
}
