//! Shunting-yard parser.
//!
//! Parsing happens in two passes:
//!
//! 1. [`ShuntingYardParser::to_postfix`] reorders the infix token stream into
//!    postfix. Every function name is preceded in the output by a
//!    function-end sentinel so the second pass knows where its arguments stop.
//! 2. [`ShuntingYardParser::build_tree`] walks the postfix sequence from the
//!    back, which is the same as walking it reversed: an operator pulls its
//!    operands (right first), a function pulls arguments until it meets its
//!    sentinel.
//!
//! The parser keeps its own copy of every operator's [`OperatorSpec`],
//! refreshed through [`GrammarListener`].

use abacus_diagnostic::{
    empty_expression, mismatched_parentheses, missing_operand, trailing_tokens,
    unknown_precedence, unterminated_call, AbacusError, AbacusResult,
};
use abacus_ir::{
    ensure_sufficient_stack, Associativity, Fixity, Grammar, GrammarListener, OperatorSpec,
    SymbolKind, TreeNode,
};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{Token, TokenType};

/// Lexeme the parser substitutes for a `-` that cannot be subtraction.
pub const UNARY_MINUS: &str = "`";

#[derive(Default)]
pub struct ShuntingYardParser {
    specs: FxHashMap<String, OperatorSpec>,
}

impl ShuntingYardParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn spec(&self, name: &str) -> AbacusResult<OperatorSpec> {
        self.specs
            .get(name)
            .copied()
            .ok_or_else(|| unknown_precedence(name))
    }

    /// Whether `previous` leaves the parser expecting an operand, in which
    /// case a `-` is negation rather than subtraction.
    fn expects_operand(&self, previous: Option<&Token>) -> bool {
        match previous {
            None => true,
            Some(token) => match token.kind {
                TokenType::OpenParen | TokenType::Comma => true,
                TokenType::Op | TokenType::TreeValueOp => !matches!(
                    self.specs.get(&token.lexeme),
                    Some(spec) if spec.fixity == Fixity::Postfix
                ),
                _ => false,
            },
        }
    }

    /// Reorder infix tokens into postfix.
    pub fn to_postfix(&self, tokens: Vec<Token>) -> AbacusResult<Vec<Token>> {
        let mut output: Vec<Token> = Vec::with_capacity(tokens.len() * 2);
        let mut stack: Vec<Token> = Vec::new();
        let mut previous: Option<Token> = None;

        for mut token in tokens {
            match token.kind {
                TokenType::Num | TokenType::Variable => output.push(token.clone()),
                TokenType::Function | TokenType::TreeValueFunction => {
                    output.push(Token::function_end());
                    stack.push(token.clone());
                }
                TokenType::Op | TokenType::TreeValueOp => {
                    if token.lexeme == "-" && self.expects_operand(previous.as_ref()) {
                        token = Token::new(TokenType::Op, UNARY_MINUS);
                    }
                    let spec = self.spec(&token.lexeme)?;
                    match spec.fixity {
                        Fixity::Postfix => output.push(token.clone()),
                        Fixity::Prefix => stack.push(token.clone()),
                        Fixity::Infix => {
                            self.pop_tighter(&spec, &mut stack, &mut output)?;
                            stack.push(token.clone());
                        }
                    }
                }
                TokenType::OpenParen => stack.push(token.clone()),
                TokenType::CloseParen | TokenType::Comma => {
                    loop {
                        match stack.pop() {
                            Some(top) if top.kind == TokenType::OpenParen => {
                                // a comma leaves the group open
                                if token.kind == TokenType::Comma {
                                    stack.push(top);
                                }
                                break;
                            }
                            Some(top) => output.push(top),
                            None => return Err(mismatched_parentheses()),
                        }
                    }
                }
                TokenType::InternalFunctionEnd | TokenType::Any | TokenType::Whitespace => {}
            }
            previous = Some(token);
        }

        while let Some(top) = stack.pop() {
            if !(top.kind.is_operator() || top.kind.is_function()) {
                return Err(mismatched_parentheses());
            }
            output.push(top);
        }
        trace!(postfix = ?output.iter().map(|t| t.lexeme.as_str()).collect::<Vec<_>>(), "to_postfix");
        Ok(output)
    }

    /// Move operators and functions that bind at least as tightly as an
    /// incoming infix operator from the stack to the output.
    fn pop_tighter(
        &self,
        incoming: &OperatorSpec,
        stack: &mut Vec<Token>,
        output: &mut Vec<Token>,
    ) -> AbacusResult<()> {
        while let Some(top) = stack.last() {
            if top.kind.is_operator() {
                let other = self.spec(&top.lexeme)?;
                if other.precedence < incoming.precedence
                    || (other.precedence == incoming.precedence
                        && incoming.associativity == Associativity::Right)
                {
                    break;
                }
            } else if !top.kind.is_function() {
                break;
            }
            if let Some(top) = stack.pop() {
                output.push(top);
            }
        }
        Ok(())
    }

    /// Build a tree from a postfix sequence, consuming it from the back.
    pub fn build_tree(&self, mut postfix: Vec<Token>) -> AbacusResult<TreeNode> {
        if postfix.is_empty() {
            return Err(empty_expression());
        }
        let tree = self.construct(&mut postfix)?;
        if !postfix.is_empty() {
            return Err(trailing_tokens(postfix.len()));
        }
        Ok(tree)
    }

    fn construct(&self, rest: &mut Vec<Token>) -> AbacusResult<TreeNode> {
        ensure_sufficient_stack(|| {
            let token = rest.pop().ok_or_else(empty_expression)?;
            match token.kind {
                TokenType::Num => Ok(TreeNode::number(token.lexeme)),
                TokenType::Variable => Ok(TreeNode::variable(token.lexeme)),
                TokenType::Op | TokenType::TreeValueOp => self.construct_operator(token, rest),
                TokenType::Function | TokenType::TreeValueFunction => {
                    let mut args = Vec::new();
                    loop {
                        match rest.last() {
                            Some(next) if next.kind == TokenType::InternalFunctionEnd => {
                                rest.pop();
                                break;
                            }
                            Some(_) => args.push(self.construct(rest)?),
                            None => return Err(unterminated_call(&token.lexeme)),
                        }
                    }
                    args.reverse();
                    Ok(if token.kind == TokenType::Function {
                        TreeNode::call(token.lexeme, args)
                    } else {
                        TreeNode::tree_value_call(token.lexeme, args)
                    })
                }
                _ => Err(AbacusError::Parse(format!("unexpected {token}"))),
            }
        })
    }

    fn construct_operator(&self, token: Token, rest: &mut Vec<Token>) -> AbacusResult<TreeNode> {
        let spec = self.spec(&token.lexeme)?;
        let tree_value = token.kind == TokenType::TreeValueOp;
        let operand = |rest: &mut Vec<Token>| match rest.last() {
            Some(next) if next.kind != TokenType::InternalFunctionEnd => self.construct(rest),
            _ => Err(missing_operand(&token.lexeme)),
        };
        if spec.fixity == Fixity::Infix {
            let right = operand(rest)?;
            let left = operand(rest)?;
            Ok(if tree_value {
                TreeNode::tree_value_binary(token.lexeme, left, right)
            } else {
                TreeNode::binary(token.lexeme, left, right)
            })
        } else {
            let child = operand(rest)?;
            Ok(if tree_value {
                TreeNode::tree_value_unary(token.lexeme, spec.fixity, child)
            } else {
                TreeNode::unary(token.lexeme, spec.fixity, child)
            })
        }
    }

    /// `to_postfix` followed by `build_tree`.
    pub fn parse(&self, tokens: Vec<Token>) -> AbacusResult<TreeNode> {
        if tokens.is_empty() {
            return Err(empty_expression());
        }
        let postfix = self.to_postfix(tokens)?;
        self.build_tree(postfix)
    }
}

impl GrammarListener for ShuntingYardParser {
    fn on_load(&mut self, grammar: &dyn Grammar) {
        for kind in [SymbolKind::Operator, SymbolKind::TreeValueOperator] {
            for name in grammar.names(kind) {
                if let Some(spec) = grammar.operator_spec(kind, &name) {
                    self.specs.insert(name, spec);
                }
            }
        }
        debug!(operators = self.specs.len(), "parser mirrored grammar");
    }

    fn on_unload(&mut self, _grammar: &dyn Grammar) {
        self.specs.clear();
    }
}
