//! Content blocks and the navigable sequence.

use oracle_core::stage::BlockHandle;
use serde::{Deserialize, Serialize};

/// One unit of on-screen content as the page declares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Handle the stage uses to address the block.
    pub handle: BlockHandle,
    /// Rendered text, if any.
    #[serde(default)]
    pub text: String,
    /// Whether the block holds an image or other embedded media.
    #[serde(default)]
    pub has_media: bool,
}

impl ContentBlock {
    /// Whether the block shows anything once whitespace is trimmed.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.has_media || !self.text.trim().is_empty()
    }
}

/// Filters `blocks` down to those with content, preserving order.
///
/// Runs once at setup; every index the controller handles is an index into
/// the returned list.
#[must_use]
pub fn navigable(blocks: Vec<ContentBlock>) -> Vec<BlockHandle> {
    blocks
        .into_iter()
        .filter(ContentBlock::has_content)
        .map(|block| block.handle)
        .collect()
}
