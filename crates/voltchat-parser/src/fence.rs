//! Locates a ```` ```json ```` fenced block inside a prose reply.
//!
//! Models often wrap structured output in a Markdown code fence and add a
//! sentence or two around it. The scanner walks the reply line by line; the
//! first line that reads ```` ```json ```` opens the block and the next line
//! that reads ```` ``` ```` closes it. Surrounding whitespace on fence lines is
//! ignored. Only the first block is considered.

use winnow::{
    Parser as _,
    combinator::{opt, terminated},
    error::{ContextError, ErrMode},
    stream::{LocatingSlice, Location, Stream},
    token::take_while,
};

const OPEN_FENCE: &str = "```json";
const CLOSE_FENCE: &str = "```";

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// The content of a fenced block and where it starts in the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    content: &'a str,
    offset: usize,
}

impl<'a> FencedBlock<'a> {
    /// Text between the fence lines, excluding both fences.
    pub fn content(&self) -> &'a str {
        self.content
    }

    /// Byte offset of [`content`](Self::content) within the reply.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// One line without its terminator. The trailing `\n` is consumed if present.
fn line<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    terminated(take_while(0.., |c| c != '\n'), opt('\n')).parse_next(input)
}

/// Finds the first fenced JSON block in `text`.
///
/// Returns `None` when no opening fence exists or the block is never closed.
pub fn find_json_block(text: &str) -> Option<FencedBlock<'_>> {
    let mut input = LocatingSlice::new(text);

    loop {
        if input.eof_offset() == 0 {
            return None;
        }
        let opening = line.parse_next(&mut input).ok()?;
        if opening.trim() == OPEN_FENCE {
            break;
        }
    }

    let start = input.current_token_start();
    loop {
        if input.eof_offset() == 0 {
            return None;
        }
        let end = input.current_token_start();
        let candidate = line.parse_next(&mut input).ok()?;
        if candidate.trim() == CLOSE_FENCE {
            return Some(FencedBlock {
                content: &text[start..end],
                offset: start,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_block_between_prose() {
        let text = "Here you go:\n```json\n{\"a\": 1}\n```\nEnjoy.";
        let block = find_json_block(text).unwrap();

        assert_eq!(block.content(), "{\"a\": 1}\n");
        assert_eq!(&text[block.offset()..block.offset() + 8], "{\"a\": 1}");
    }

    #[test]
    fn test_closing_fence_at_end_without_newline() {
        let block = find_json_block("```json\n[1, 2]\n```").unwrap();
        assert_eq!(block.content(), "[1, 2]\n");
        assert_eq!(block.offset(), 8);
    }

    #[test]
    fn test_unterminated_block_is_ignored() {
        assert!(find_json_block("```json\n{\"a\": 1}\n").is_none());
    }

    #[test]
    fn test_other_languages_are_ignored() {
        assert!(find_json_block("```rust\nfn main() {}\n```").is_none());
        assert!(find_json_block("plain prose, no fences at all").is_none());
    }

    #[test]
    fn test_only_first_block_is_returned() {
        let text = "```json\n1\n```\n```json\n2\n```\n";
        assert_eq!(find_json_block(text).unwrap().content(), "1\n");
    }

    #[test]
    fn test_fence_lines_tolerate_whitespace_and_crlf() {
        let text = "intro\r\n  ```json  \r\n{}\r\n```\r\n";
        let block = find_json_block(text).unwrap();
        assert_eq!(block.content(), "{}\r\n");
    }

    #[test]
    fn test_empty_block() {
        let block = find_json_block("```json\n```\n").unwrap();
        assert_eq!(block.content(), "");
    }
}
