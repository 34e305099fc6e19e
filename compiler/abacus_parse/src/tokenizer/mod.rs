//! Grammar-aware tokenizer.
//!
//! Wraps a [`Lexer`] preloaded with the fixed token shapes (numbers,
//! identifiers, parentheses, commas, spaces) and mirrors every operator and
//! function name the loaded plugins register. Whitespace is recognized so
//! that lexing stays total, then dropped from the output.

use abacus_diagnostic::{no_token_at, AbacusError, AbacusResult};
use abacus_ir::{Grammar, GrammarListener, SymbolKind};
use abacus_lexer_core::{sanitize, Lexer};
use tracing::{debug, warn};

use crate::{Token, TokenType};

const BASE_PATTERNS: [(&str, TokenType); 6] = [
    (" ", TokenType::Whitespace),
    (",", TokenType::Comma),
    (r"[0-9]*(\.[0-9]+)?", TokenType::Num),
    ("[a-zA-Z]+", TokenType::Variable),
    (r"\(", TokenType::OpenParen),
    (r"\)", TokenType::CloseParen),
];

fn token_type(kind: SymbolKind) -> TokenType {
    match kind {
        SymbolKind::Operator => TokenType::Op,
        SymbolKind::TreeValueOperator => TokenType::TreeValueOp,
        SymbolKind::Function => TokenType::Function,
        SymbolKind::TreeValueFunction => TokenType::TreeValueFunction,
    }
}

pub struct LexerTokenizer {
    lexer: Lexer<TokenType>,
}

impl Default for LexerTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexerTokenizer {
    pub fn new() -> Self {
        let mut lexer = Lexer::new();
        for (source, kind) in BASE_PATTERNS {
            if let Err(e) = lexer.register(source, kind) {
                warn!(source, error = %e, "base pattern rejected");
            }
        }
        LexerTokenizer { lexer }
    }

    /// Split `text` into tokens, dropping whitespace.
    ///
    /// Empty input yields no tokens; rejecting it is the parser's job.
    pub fn tokenize(&self, text: &str) -> AbacusResult<Vec<Token>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let Some(matches) = self.lexer.lex_all(text, 0, TokenType::by_priority) else {
            return Err(self.locate_failure(text));
        };
        Ok(matches
            .into_iter()
            .filter(|m| m.id != TokenType::Whitespace)
            .map(|m| Token::new(m.id, m.as_str(text)))
            .collect())
    }

    /// Whether the lexer currently knows `name` as `kind`.
    pub fn recognizes(&self, name: &str, kind: SymbolKind) -> bool {
        self.lexer.contains(&sanitize(name), &token_type(kind))
    }

    /// Re-walk the input to find the offset where lexing stopped.
    #[cold]
    fn locate_failure(&self, text: &str) -> AbacusError {
        let mut index = 0;
        while index < text.len() {
            match self.lexer.lex_one(text, index, TokenType::by_priority) {
                Some(m) if !m.is_empty() => index = m.end,
                _ => break,
            }
        }
        no_token_at(index)
    }
}

impl GrammarListener for LexerTokenizer {
    fn on_load(&mut self, grammar: &dyn Grammar) {
        let mut count = 0usize;
        for kind in SymbolKind::ALL {
            for name in grammar.names(kind) {
                if name.is_empty() {
                    warn!(?kind, "ignoring empty symbol name");
                    continue;
                }
                match self.lexer.register(&sanitize(&name), token_type(kind)) {
                    Ok(()) => count += 1,
                    Err(e) => warn!(name, error = %e, "symbol pattern rejected"),
                }
            }
        }
        debug!(count, "tokenizer mirrored grammar");
    }

    fn on_unload(&mut self, grammar: &dyn Grammar) {
        for kind in SymbolKind::ALL {
            for name in grammar.names(kind) {
                self.lexer.unregister(&sanitize(&name), &token_type(kind));
            }
        }
        debug!(remaining = self.lexer.len(), "tokenizer dropped grammar");
    }
}
