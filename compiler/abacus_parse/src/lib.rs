//! Abacus front end: text to [`TreeNode`].
//!
//! - [`LexerTokenizer`] turns text into [`Token`]s
//! - [`ShuntingYardParser`] turns tokens into a tree
//! - [`TreeBuilder`] pairs the two and keeps both in sync with the grammar
//!
//! Neither component knows any operator up front. They learn names and
//! precedences from the plugin registry through [`GrammarListener`], so the
//! same front end parses whatever the loaded plugins define.

mod parser;
mod token;
mod tokenizer;

use abacus_diagnostic::AbacusResult;
use abacus_ir::{Grammar, GrammarListener, TreeNode};

pub use parser::{ShuntingYardParser, UNARY_MINUS};
pub use token::{Token, TokenType};
pub use tokenizer::LexerTokenizer;

/// Tokenizer and parser behind one listener.
#[derive(Default)]
pub struct TreeBuilder {
    tokenizer: LexerTokenizer,
    parser: ShuntingYardParser,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokenizer(&self) -> &LexerTokenizer {
        &self.tokenizer
    }

    pub fn parser(&self) -> &ShuntingYardParser {
        &self.parser
    }

    pub fn tokenize(&self, text: &str) -> AbacusResult<Vec<Token>> {
        self.tokenizer.tokenize(text)
    }

    pub fn parse(&self, text: &str) -> AbacusResult<TreeNode> {
        let tokens = self.tokenizer.tokenize(text)?;
        self.parser.parse(tokens)
    }
}

impl GrammarListener for TreeBuilder {
    fn on_load(&mut self, grammar: &dyn Grammar) {
        self.tokenizer.on_load(grammar);
        self.parser.on_load(grammar);
    }

    fn on_unload(&mut self, grammar: &dyn Grammar) {
        self.tokenizer.on_unload(grammar);
        self.parser.on_unload(grammar);
    }
}
