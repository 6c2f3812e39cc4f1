//! Home-screen content blocks.

use serde::{Deserialize, Serialize};

/// Minimum number of content blocks on the home screen.
pub const MIN_CONTENT_BLOCKS: usize = 1;

/// Maximum number of content blocks on the home screen.
pub const MAX_CONTENT_BLOCKS: usize = 5;

/// A user-authored unit of text or embedded markup on the home tab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentBlock {
    /// Block title, rendered above the block
    pub title: String,
    /// Short header line inside the block
    pub header: String,
    /// Paragraph text
    pub body: String,
    /// Whether `embed_markup` should be rendered
    pub embed: bool,
    /// Raw HTML (e.g. an iframe), only used when `embed` is set
    pub embed_markup: String,
}

impl ContentBlock {
    /// Creates a block with a title and body.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Returns a copy with the header set.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Returns a copy that embeds `markup`.
    pub fn with_embed(mut self, markup: impl Into<String>) -> Self {
        self.embed = true;
        self.embed_markup = markup.into();
        self
    }

    /// True if the embed is enabled and has markup.
    #[must_use]
    pub fn has_embed(&self) -> bool {
        self.embed && !self.embed_markup.trim().is_empty()
    }

    /// True if nothing in the block would be rendered.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
            && self.header.trim().is_empty()
            && self.body.trim().is_empty()
            && !self.has_embed()
    }
}

/// Resizes `blocks` to `count` (clamped to 1..=5), keeping existing entries by
/// index and appending blank blocks.
pub fn resize_blocks(mut blocks: Vec<ContentBlock>, count: usize) -> Vec<ContentBlock> {
    let count = count.clamp(MIN_CONTENT_BLOCKS, MAX_CONTENT_BLOCKS);
    blocks.resize_with(count, ContentBlock::default);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_preserves_by_index() {
        let blocks = vec![ContentBlock::new("About", "We help."), ContentBlock::new("Hours", "9-5")];

        let grown = resize_blocks(blocks.clone(), 4);
        assert_eq!(grown.len(), 4);
        assert_eq!(grown[0], blocks[0]);
        assert_eq!(grown[1], blocks[1]);
        assert!(grown[3].is_blank());

        let shrunk = resize_blocks(grown, 1);
        assert_eq!(shrunk, vec![blocks[0].clone()]);
    }

    #[test]
    fn test_resize_clamps() {
        assert_eq!(resize_blocks(Vec::new(), 0).len(), MIN_CONTENT_BLOCKS);
        assert_eq!(resize_blocks(Vec::new(), 12).len(), MAX_CONTENT_BLOCKS);
    }

    #[test]
    fn test_embed_requires_flag() {
        let mut block = ContentBlock::default();
        block.embed_markup = "<iframe></iframe>".to_string();
        assert!(!block.has_embed());
        assert!(block.is_blank());

        let block = block.with_embed("<iframe src=\"x\"></iframe>");
        assert!(block.has_embed());
        assert!(!block.is_blank());
    }
}
