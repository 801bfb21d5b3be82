//! Documentation-block formatting for generated terms.
//!
//! Source comments arrive as free text, possibly concatenated from several
//! statements. The formatter collapses whitespace, honors the two-character
//! `\n` escape as a hard break, and wraps at the column limit, producing a
//! `/** ... */` block: closed inline when it stayed on one line, closed on
//! its own trailing line otherwise.

/// Column at which an over-long comment line wraps at the next whitespace.
pub const COMMENT_LENGTH_LIMIT: usize = 80;

/// Spaces per indent level in generated output.
pub const INDENT_STEP: usize = 4;

/// Continuation-line prefix inside a multi-line comment block.
const CONTINUATION: &str = " *  ";

/// Format raw comment text as a wrapped documentation block.
///
/// The block is emitted for indent level 1: continuation lines and the
/// trailing close carry one indent step themselves, while the first line is
/// indented by the caller.
pub fn format_comment(comment: &str) -> String {
    let mut buf = String::from("/** ");
    let mut pos = buf.len();
    let mut in_space = false;
    let mut single_line = true;

    let break_line = |buf: &mut String, pos: &mut usize, single_line: &mut bool| {
        buf.push('\n');
        buf.push_str(&" ".repeat(INDENT_STEP));
        buf.push_str(CONTINUATION);
        *pos = INDENT_STEP + CONTINUATION.len();
        *single_line = false;
    };

    let mut chars = comment.chars();
    while let Some(mut c) = chars.next() {
        // compress whitespace runs to a single space
        if c.is_whitespace() {
            if in_space {
                continue;
            }
            c = ' ';
            in_space = true;
        } else {
            in_space = false;
        }

        if c == '\\' {
            // only the `\n` escape is recognized; others are dropped
            if let Some('n') = chars.next() {
                break_line(&mut buf, &mut pos, &mut single_line);
            }
        } else {
            buf.push(c);
            pos += 1;
        }

        if pos > COMMENT_LENGTH_LIMIT && in_space {
            break_line(&mut buf, &mut pos, &mut single_line);
        }
    }

    if single_line {
        buf.push_str(" */");
    } else {
        buf.push('\n');
        buf.push_str(&" ".repeat(INDENT_STEP));
        buf.push_str(" */");
    }
    buf
}
