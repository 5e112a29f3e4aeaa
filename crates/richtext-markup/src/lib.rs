//! # Richtext Markup
//!
//! Markup parsing for the richtext engine.
//!
//! This crate provides a tokenizer and a parse driver that work together
//! to turn an XML-like markup fragment into element and text events via a
//! sink interface. The fragment is a sequence of top-level siblings whose
//! tags must nest and balance; structural problems fail the parse instead
//! of producing a stream nobody can trust.

pub mod tokenizer;

use thiserror::Error;
use tracing::trace;

use crate::tokenizer::Token;

/// Errors that can occur during markup parsing.
///
/// All of these are fatal for the current parse. Events delivered to the
/// sink strictly before the error point are valid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("unterminated tag at offset {pos}")]
    UnterminatedTag { pos: usize },

    #[error("invalid character {ch:?} inside tag at offset {pos}")]
    InvalidTagCharacter { ch: char, pos: usize },

    #[error("empty tag name at offset {pos}")]
    EmptyTagName { pos: usize },

    #[error("mismatched close tag: expected </{expected}>, found </{found}>")]
    MismatchedCloseTag { expected: String, found: String },

    #[error("close tag </{name}> with no open element")]
    UnbalancedMarkup { name: String },

    #[error("element <{name}> left open at end of input")]
    UnclosedElement { name: String },
}

/// Result type for markup parsing operations.
pub type ParseResult<T> = Result<T, MarkupError>;

/// Trait for receiving element and text events during a parse.
///
/// Implemented by whatever consumes the document structure; the styled-run
/// builder in the `richtext` crate is the production implementation, and
/// tests use event recorders.
pub trait MarkupSink {
    /// Called when an element opens.
    fn start_element(&mut self, name: &str);

    /// Called when an element closes. Delivered only for balanced closes.
    fn end_element(&mut self, name: &str);

    /// Called with one maximal span of character data between tags.
    fn text(&mut self, data: &str);
}

/// Parse a markup fragment, delivering events to the sink.
///
/// Tokenizes the whole fragment first, then walks the tokens with an
/// open-element stack: a close tag must name the innermost open element,
/// a close with nothing open is unbalanced, and anything still open at end
/// of input is unclosed. Character tokens are coalesced so the sink sees
/// at most one `text` event between consecutive tag boundaries.
pub fn parse<S: MarkupSink>(markup: &str, mut sink: S) -> ParseResult<S> {
    let tokens = tokenizer::tokenize(markup)?;

    let mut open_elements: Vec<String> = Vec::new();
    let mut text_buffer = String::new();

    for token in tokens {
        match token {
            Token::Character(ch) => text_buffer.push(ch),
            Token::StartTag { name } => {
                flush_text(&mut text_buffer, &mut sink);
                trace!(%name, depth = open_elements.len(), "start element");
                sink.start_element(&name);
                open_elements.push(name);
            }
            Token::EndTag { name } => {
                flush_text(&mut text_buffer, &mut sink);
                match open_elements.last() {
                    None => return Err(MarkupError::UnbalancedMarkup { name }),
                    Some(open) if *open != name => {
                        return Err(MarkupError::MismatchedCloseTag {
                            expected: open.clone(),
                            found: name,
                        });
                    }
                    Some(_) => {}
                }
                open_elements.pop();
                trace!(%name, depth = open_elements.len(), "end element");
                sink.end_element(&name);
            }
            Token::Eof => {
                flush_text(&mut text_buffer, &mut sink);
                if let Some(name) = open_elements.pop() {
                    return Err(MarkupError::UnclosedElement { name });
                }
            }
        }
    }
    Ok(sink)
}

fn flush_text<S: MarkupSink>(buffer: &mut String, sink: &mut S) {
    if !buffer.is_empty() {
        let text = std::mem::take(buffer);
        sink.text(&text);
    }
}
