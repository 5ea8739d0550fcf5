//! Finds where a block ends.
//!
//! Matching works on raw template text and only counts markers of the same
//! block kind: `{{#if` and `{{/if}}` for conditionals, `{{#each` and `{{/each}}`
//! for loops. Blocks of the other kind are invisible to it, so interleaving
//! an `#if` and an `#each` (instead of nesting them) can pair tags that don't
//! belong together.

/// Kind of block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    If,
    Each,
}

impl Block {
    /// Text that starts the opening tag, as seen by the matcher.
    pub fn open_marker(&self) -> &'static str {
        match self {
            Block::If => "{{#if",
            Block::Each => "{{#each",
        }
    }

    /// The exact closing tag.
    pub fn close_marker(&self) -> &'static str {
        match self {
            Block::If => "{{/if}}",
            Block::Each => "{{/each}}",
        }
    }

    /// Directive prefix of the trimmed opening tag.
    pub fn prefix(&self) -> &'static str {
        match self {
            Block::If => "#if ",
            Block::Each => "#each ",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Block::If => "if",
            Block::Each => "each",
        }
    }
}

/// Find the closing tag matching a block opened just before `from`.
///
/// Returns the offset of the closing tag, or `None` if the template
/// runs out before the block is closed.
pub fn find_block_end(source: &str, from: usize, block: Block) -> Option<usize> {
    let open = block.open_marker();
    let close = block.close_marker();

    // The opening tag was already seen.
    let mut depth = 1usize;
    let mut pos = from;
    // Opening markers never overlap closing ones, so the next one stays
    // valid until it's consumed.
    let mut next_open = find_from(source, pos, open);

    loop {
        let next_close = find_from(source, pos, close)?;

        match next_open {
            Some(open_at) if open_at < next_close => {
                depth += 1;
                pos = open_at + open.len();
                next_open = find_from(source, pos, open);
            }

            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(next_close);
                }
                pos = next_close + close.len();
            }
        }
    }
}

fn find_from(source: &str, pos: usize, marker: &str) -> Option<usize> {
    source[pos..].find(marker).map(|offset| pos + offset)
}

#[cfg(test)]
mod test {
    use super::*;

    fn end(source: &str, block: Block) -> Option<usize> {
        let from = source.find("}}").expect("open tag") + 2;
        find_block_end(source, from, block)
    }

    #[test]
    fn test_simple() {
        let source = "{{#if a}}x{{/if}}";
        assert_eq!(end(source, Block::If), Some(10));
    }

    #[test]
    fn test_nested_same_kind() {
        let source = "{{#if a}}{{#if b}}y{{/if}}z{{/if}}tail";
        assert_eq!(end(source, Block::If), Some(27));

        let source = "{{#each a}}{{#each b}}{{/each}}{{/each}}";
        assert_eq!(end(source, Block::Each), Some(31));
    }

    #[test]
    fn test_other_kind_is_invisible() {
        let source = "{{#if a}}{{#each b}}{{/if}}{{/each}}";
        assert_eq!(end(source, Block::If), Some(20));
    }

    #[test]
    fn test_siblings_after_last_open() {
        let source = "{{#if a}}{{#if b}}{{/if}}{{#if c}}{{/if}}{{/if}}{{/if}}";
        assert_eq!(end(source, Block::If), Some(41));

        let source = format!("{{{{#each a}}}}{}{{{{/each}}}}", "{{/if}}".repeat(100));
        assert_eq!(end(&source, Block::Each), Some(11 + 700));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(end("{{#if a}}never closed", Block::If), None);
        assert_eq!(end("{{#if a}}{{#if b}}{{/if}}", Block::If), None);
        assert_eq!(end("{{#each a}}{{/if}}", Block::Each), None);
        // Close tag with spaces isn't a marker.
        assert_eq!(end("{{#if a}}{{/if }}", Block::If), None);
    }
}
