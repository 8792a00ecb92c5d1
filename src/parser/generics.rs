//! Lookahead that decides whether a `<` opens a generic argument list or is
//! the less-than operator.

use crate::lexer::tokens::{Token, TokenKind};

/// Checks whether a generic argument list starts at `start`.
///
/// Accepts `< item (, item)* ,? >` where an item is `identifier (. identifier)*`
/// optionally followed by its own nested list. Returns the index just past the
/// matching `>`, or `None` when the tokens cannot form such a list. Pure: the
/// parser re-runs it whenever it has to decide.
pub fn can_parse_generic_part(tokens: &[Token], start: usize) -> Option<usize> {
    let kind_at = |idx: usize| {
        tokens
            .get(idx)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    };

    if kind_at(start) != TokenKind::Less {
        return None;
    }
    let mut idx = start + 1;

    loop {
        if kind_at(idx) != TokenKind::Identifier {
            return None;
        }
        idx += 1;

        while kind_at(idx) == TokenKind::Dot {
            if kind_at(idx + 1) != TokenKind::Identifier {
                return None;
            }
            idx += 2;
        }

        if kind_at(idx) == TokenKind::Less {
            idx = can_parse_generic_part(tokens, idx)?;
        }

        match kind_at(idx) {
            TokenKind::Comma => {
                idx += 1;
                if kind_at(idx) == TokenKind::Greater {
                    return Some(idx + 1);
                }
            }
            TokenKind::Greater => return Some(idx + 1),
            _ => return None,
        }
    }
}
