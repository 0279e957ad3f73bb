//! Byte offset to line/column mapping.

use rowan::TextSize;

/// Start offsets of every line in a source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        let bytes = source.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push(TextSize::from((i + 1) as u32)),
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => {
                    line_starts.push(TextSize::from((i + 1) as u32))
                }
                _ => {}
            }
            i += 1;
        }
        Self { line_starts }
    }

    /// 1-based line and 0-based character column of `offset`.
    pub fn line_col(&self, source: &str, offset: TextSize) -> (u32, u32) {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = usize::from(self.line_starts[line]);
        let end = usize::from(offset).min(source.len());
        let column = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        (line as u32 + 1, column as u32)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
