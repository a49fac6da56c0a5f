use super::block::Block;

// @module: SRT rendering in canonical order

/// Blocks in output order: (start, end, original order)
pub fn canonical_order(blocks: &[Block]) -> Vec<&Block> {
    let mut ordered: Vec<&Block> = blocks.iter().collect();
    ordered.sort_by_key(|block| (block.start_ms, block.end_ms, block.original_order));
    ordered
}

/// Render blocks as an SRT document.
///
/// A block keeps its source index when it had one; otherwise it is numbered
/// by its 1-based output position.
pub fn render_srt(blocks: &[Block]) -> String {
    let rendered: Vec<String> = canonical_order(blocks)
        .into_iter()
        .enumerate()
        .map(|(position, block)| {
            let index = block.source_index.map_or(position + 1, |idx| idx as usize);
            let mut lines = Vec::with_capacity(block.text_lines.len() + 2);
            lines.push(index.to_string());
            lines.push(block.format_range());
            lines.extend(block.text_lines.iter().cloned());
            lines.join("\n")
        })
        .collect();

    if rendered.is_empty() {
        return String::new();
    }

    let mut output = rendered.join("\n\n");
    output.push('\n');
    output
}
