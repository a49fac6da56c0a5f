/*!
 * Overlap resolution.
 *
 * Blocks are swept in `(start, end)` order while an active list tracks the
 * blocks still on screen. Each block takes the first palette tag that no
 * active block holds. Overlap is end-exclusive: a block ending at T and one
 * starting at T never compete for a tag.
 */

use log::debug;
use super::block::Block;
use super::tags::{self, PositionTag, PALETTE};

/// Options that steer tag assignment
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolveOptions {
    /// Remove every position marker before assigning new tags
    pub clean: bool,
    /// Keep tags already present in the source instead of reassigning them
    pub ignore_existing: bool,
    /// Do not write a marker for blocks that end up with the default tag
    pub omit_default: bool,
}

/// Counters describing one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    /// Blocks that kept their source tag
    pub kept_existing: usize,
    /// Blocks that were given a free palette tag
    pub assigned: usize,
    /// Blocks that found the palette exhausted and took the last entry
    pub overflowed: usize,
    /// Largest number of blocks on screen at once
    pub max_concurrent: usize,
}

/// Sweep order: indices sorted by (start, end); ties keep input order
fn sweep_order(blocks: &[Block]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..blocks.len()).collect();
    order.sort_by_key(|&idx| (blocks[idx].start_ms, blocks[idx].end_ms));
    order
}

/// First palette tag not held by an active block, or the last entry when all are taken
fn first_free_tag(active: &[(u64, PositionTag)]) -> (PositionTag, bool) {
    PALETTE
        .iter()
        .copied()
        .find(|candidate| !active.iter().any(|(_, tag)| tag == candidate))
        .map(|tag| (tag, false))
        .unwrap_or((PALETTE[PALETTE.len() - 1], true))
}

/// Assign a position tag to every block and rewrite first-line markers.
///
/// The slice keeps its order; only `assigned_tag`, `keep_existing`,
/// `existing_tag` and the text of the blocks change.
pub fn resolve(blocks: &mut [Block], options: ResolveOptions) -> ResolveSummary {
    let mut summary = ResolveSummary::default();
    let mut active: Vec<(u64, PositionTag)> = Vec::new();

    for idx in sweep_order(blocks) {
        let block = &mut blocks[idx];

        active.retain(|(end_ms, _)| *end_ms > block.start_ms);

        block.existing_tag = block.text_lines.first().and_then(|line| tags::leading_tag(line));

        if options.clean {
            for line in block.text_lines.iter_mut() {
                *line = tags::strip_all_tags(line);
            }
        }

        let reusable = if options.clean || !options.ignore_existing { None } else { block.existing_tag };

        let tag = match reusable {
            Some(existing) => {
                block.keep_existing = true;
                summary.kept_existing += 1;
                existing
            }
            None => {
                let (tag, overflowed) = first_free_tag(&active);
                if overflowed {
                    debug!(
                        "Palette exhausted at {}; block {} falls back to {}",
                        Block::format_timestamp(block.start_ms),
                        block.original_order + 1,
                        tag
                    );
                    summary.overflowed += 1;
                }
                block.keep_existing = false;
                summary.assigned += 1;
                tag
            }
        };

        block.assigned_tag = Some(tag);
        active.push((block.end_ms, tag));
        summary.max_concurrent = summary.max_concurrent.max(active.len());
    }

    for block in blocks.iter_mut() {
        rewrite_first_line(block, options);
    }

    summary
}

/// Bring the first line's marker in line with the assigned tag
fn rewrite_first_line(block: &mut Block, options: ResolveOptions) {
    if block.keep_existing {
        return;
    }
    let Some(tag) = block.assigned_tag else {
        return;
    };
    let Some(first) = block.text_lines.first_mut() else {
        return;
    };

    *first = if options.omit_default && tag.is_default() {
        tags::strip_leading_tag(first).to_string()
    } else {
        tags::apply_tag(first, tag)
    };
}
