use super::classify::{GapClassifier, LineClass};
use super::EOP;
use crate::error::MineResult;

/// Detector state while scanning the line sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectorState {
    /// No open block.
    Idle,
    /// An open block with the misses counted since the last matching line.
    Accumulating {
        lines: Vec<String>,
        last_matched: bool,
        misses: usize,
    },
}

/// Feed one classified line through the detector.
///
/// Finalization is lazy: an open block is emitted when the next countable
/// line arrives and the previous line failed to match with more than
/// `patience` misses accumulated. A buffer still open at end of input is
/// therefore never emitted. Non-matching lines inside an open block are
/// counted but never appended, so tolerated noise is swallowed.
pub fn step(
    state: DetectorState,
    class: LineClass,
    line: &str,
    patience: usize,
) -> (DetectorState, Option<Vec<String>>) {
    if class == LineClass::Skip {
        return (state, None);
    }

    let (state, emitted) = match state {
        DetectorState::Accumulating {
            lines,
            last_matched: false,
            misses,
        } if misses > patience => (DetectorState::Idle, Some(lines)),
        other => (other, None),
    };

    let next = match (state, class) {
        (DetectorState::Idle, LineClass::Tabular) => DetectorState::Accumulating {
            lines: vec![line.to_string()],
            last_matched: true,
            misses: 0,
        },
        (DetectorState::Idle, _) => DetectorState::Idle,
        (DetectorState::Accumulating { mut lines, .. }, LineClass::Tabular) => {
            lines.push(line.to_string());
            DetectorState::Accumulating {
                lines,
                last_matched: true,
                misses: 0,
            }
        }
        (DetectorState::Accumulating { lines, misses, .. }, _) => DetectorState::Accumulating {
            lines,
            last_matched: false,
            misses: misses + 1,
        },
    };

    (next, emitted)
}

/// Scans an ordered line sequence into contiguous candidate blocks.
pub struct BlockDetector {
    classifier: GapClassifier,
    patience: usize,
}

impl BlockDetector {
    pub fn new(space: usize, patience: usize) -> MineResult<Self> {
        Ok(Self {
            classifier: GapClassifier::new(space)?,
            patience,
        })
    }

    /// Partition `text` into candidate blocks, in source order.
    ///
    /// Each block's first line is its header line. One-line blocks are
    /// still emitted here; the splitter filters them out when they parse
    /// to zero rows. The end-of-page marker is a line break too: a header
    /// that opens a page must not carry the marker into its column
    /// offsets.
    pub fn detect(&self, text: &str) -> Vec<Vec<String>> {
        let mut blocks = Vec::new();
        let mut state = DetectorState::Idle;

        for line in text.split(EOP).flat_map(str::lines) {
            let class = self.classifier.classify(line);
            let (next, emitted) = step(state, class, line, self.patience);
            state = next;
            if let Some(block) = emitted {
                blocks.push(block);
            }
        }

        blocks
    }
}
