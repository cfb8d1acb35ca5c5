use super::document::{Block, Document, Item, Loop};
use super::traits::StructuredFile;
use std::io::{self, BufRead};
use thiserror::Error;

/// Name given to the block opened by a `global_` header.
pub const GLOBAL_BLOCK: &str = "global_";

#[derive(Debug, Error)]
pub enum CifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: CifParseErrorKind },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CifParseErrorKind {
    #[error("Data item found before the first 'data_' or 'global_' header")]
    OutsideBlock,
    #[error("Value '{0}' is not preceded by a tag")]
    UnexpectedValue(String),
    #[error("Tag '{0}' has no value")]
    MissingValue(String),
    #[error("'loop_' declares no tags")]
    EmptyLoop,
    #[error("Loop with {tags} tags has {values} values, which is not a multiple")]
    RaggedLoop { tags: usize, values: usize },
    #[error("Text field starting here is never closed by a line beginning with ';'")]
    UnterminatedTextField,
    #[error("Quoted value is never closed")]
    UnterminatedQuote,
    #[error("Unsupported construct '{0}'")]
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Global,
    Block(String),
    Loop,
    Tag(String),
    Value(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    line: usize,
}

fn parse_error(line: usize, kind: CifParseErrorKind) -> CifError {
    CifError::Parse { line, kind }
}

fn classify_bare(word: &str) -> Result<TokenKind, CifParseErrorKind> {
    if word.starts_with('_') {
        return Ok(TokenKind::Tag(word.to_string()));
    }
    let lower = word.to_ascii_lowercase();
    if lower.starts_with("data_") {
        return Ok(TokenKind::Block(word[5..].to_string()));
    }
    if lower == "loop_" {
        return Ok(TokenKind::Loop);
    }
    if lower == "global_" {
        return Ok(TokenKind::Global);
    }
    if lower.starts_with("save_") || lower == "stop_" {
        return Err(CifParseErrorKind::Unsupported(word.to_string()));
    }
    match word {
        "." | "?" => Ok(TokenKind::Value(String::new())),
        _ => Ok(TokenKind::Value(word.to_string())),
    }
}

fn tokenize_line(line: &str, line_num: usize, out: &mut Vec<Token>) -> Result<(), CifError> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if c == b'#' {
            break;
        }
        if c == b'\'' || c == b'"' {
            let start = i + 1;
            let mut j = start;
            let end = loop {
                if j >= bytes.len() {
                    return Err(parse_error(line_num, CifParseErrorKind::UnterminatedQuote));
                }
                if bytes[j] == c && bytes.get(j + 1).is_none_or(|n| n.is_ascii_whitespace()) {
                    break j;
                }
                j += 1;
            };
            out.push(Token {
                kind: TokenKind::Value(line[start..end].to_string()),
                line: line_num,
            });
            i = end + 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let kind = classify_bare(&line[start..i]).map_err(|k| parse_error(line_num, k))?;
        out.push(Token {
            kind,
            line: line_num,
        });
    }
    Ok(())
}

fn tokenize(reader: &mut impl BufRead) -> Result<Vec<Token>, CifError> {
    let mut tokens = Vec::new();
    let mut lines = reader.lines().enumerate();

    while let Some((idx, line_res)) = lines.next() {
        let line = line_res?;
        let line_num = idx + 1;

        if let Some(first) = line.strip_prefix(';') {
            let mut text = first.to_string();
            let mut closed = None;
            for (next_idx, next_res) in lines.by_ref() {
                let next = next_res?;
                if let Some(rest) = next.strip_prefix(';') {
                    closed = Some((next_idx + 1, rest.to_string()));
                    break;
                }
                text.push('\n');
                text.push_str(&next);
            }
            let Some((close_line, rest)) = closed else {
                return Err(parse_error(line_num, CifParseErrorKind::UnterminatedTextField));
            };
            tokens.push(Token {
                kind: TokenKind::Value(text.trim_start_matches('\n').to_string()),
                line: line_num,
            });
            tokenize_line(&rest, close_line, &mut tokens)?;
            continue;
        }

        tokenize_line(&line, line_num, &mut tokens)?;
    }
    Ok(tokens)
}

/// Where the items read so far belong.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Start,
    Global,
    Data,
}

fn current_block(doc: &mut Document, cursor: Cursor, line: usize) -> Result<&mut Block, CifError> {
    let block = match cursor {
        Cursor::Start => None,
        Cursor::Global => doc.global.as_mut(),
        Cursor::Data => doc.blocks.last_mut(),
    };
    block.ok_or_else(|| parse_error(line, CifParseErrorKind::OutsideBlock))
}

fn assemble(tokens: Vec<Token>) -> Result<Document, CifError> {
    let mut doc = Document::default();
    let mut cursor = Cursor::Start;
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        let line = token.line;
        match token.kind {
            // Repeated `global_` headers extend the same block.
            TokenKind::Global => {
                doc.global.get_or_insert_with(|| Block::new(GLOBAL_BLOCK));
                cursor = Cursor::Global;
            }
            TokenKind::Block(name) => {
                doc.blocks.push(Block::new(name));
                cursor = Cursor::Data;
            }
            TokenKind::Tag(tag) => {
                let block = current_block(&mut doc, cursor, line)?;
                let value = match iter.next() {
                    Some(Token {
                        kind: TokenKind::Value(v),
                        ..
                    }) => v,
                    _ => return Err(parse_error(line, CifParseErrorKind::MissingValue(tag))),
                };
                block.items.push(Item::Pair { tag, value });
            }
            TokenKind::Loop => {
                let mut tags = Vec::new();
                while let Some(TokenKind::Tag(_)) = iter.peek().map(|t| &t.kind) {
                    if let Some(Token {
                        kind: TokenKind::Tag(tag),
                        ..
                    }) = iter.next()
                    {
                        tags.push(tag);
                    }
                }
                if tags.is_empty() {
                    return Err(parse_error(line, CifParseErrorKind::EmptyLoop));
                }
                let mut values = Vec::new();
                while let Some(TokenKind::Value(_)) = iter.peek().map(|t| &t.kind) {
                    if let Some(Token {
                        kind: TokenKind::Value(value),
                        ..
                    }) = iter.next()
                    {
                        values.push(value);
                    }
                }
                if values.len() % tags.len() != 0 {
                    return Err(parse_error(
                        line,
                        CifParseErrorKind::RaggedLoop {
                            tags: tags.len(),
                            values: values.len(),
                        },
                    ));
                }
                current_block(&mut doc, cursor, line)?
                    .items
                    .push(Item::Loop(Loop { tags, values }));
            }
            TokenKind::Value(v) => {
                return Err(parse_error(line, CifParseErrorKind::UnexpectedValue(v)));
            }
        }
    }
    Ok(doc)
}

pub struct CifFile;

impl StructuredFile for CifFile {
    type Error = CifError;

    fn read_from(reader: &mut impl BufRead) -> Result<Document, Self::Error> {
        let tokens = tokenize(reader)?;
        assemble(tokens)
    }
}

impl CifFile {
    pub fn read_str(content: &str) -> Result<Document, CifError> {
        Self::read_from(&mut content.as_bytes())
    }
}
