//! Regex-dialect to NFA compilation.
//!
//! Each compiled [`Pattern`] owns an arena of [`PatternNode`]s addressed by
//! [`NodeId`]. Character-consuming nodes (`Value`, `Range`, `Any`) step to
//! their outputs when they match; `Link` nodes are epsilon transitions; the
//! single `End` node accepts and carries the pattern id.

use rustc_hash::FxHashSet;

/// Index of a node inside its pattern's arena.
pub type NodeId = usize;

/// What a node does with the next input character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind<T> {
    /// Matches exactly this character.
    Value(char),
    /// Matches any character in the inclusive range.
    Range(char, char),
    /// Matches any character.
    Any,
    /// Epsilon transition; never consumes.
    Link,
    /// Accepting state for the pattern `T`.
    End(T),
}

impl<T> NodeKind<T> {
    #[inline]
    pub fn matches(&self, c: char) -> bool {
        match self {
            NodeKind::Value(v) => *v == c,
            NodeKind::Range(lo, hi) => (*lo..=*hi).contains(&c),
            NodeKind::Any => true,
            NodeKind::Link | NodeKind::End(_) => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PatternNode<T> {
    pub kind: NodeKind<T>,
    outputs: Vec<NodeId>,
}

impl<T> PatternNode<T> {
    fn new(kind: NodeKind<T>) -> Self {
        PatternNode {
            kind,
            outputs: Vec::new(),
        }
    }

    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }
}

/// Reasons a pattern fails to compile.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("quantifier at {0} has nothing to repeat")]
    DanglingQuantifier(usize),
    #[error("empty alternative near {0}")]
    EmptyAlternative(usize),
    #[error("group opened at {0} is never closed")]
    UnclosedGroup(usize),
    #[error("unmatched ')' at {0}")]
    UnmatchedClose(usize),
    #[error("empty group at {0}")]
    EmptyGroup(usize),
    #[error("class opened at {0} is never closed")]
    UnclosedClass(usize),
    #[error("empty class at {0}")]
    EmptyClass(usize),
    #[error("invalid range at {0}")]
    InvalidRange(usize),
    #[error("escape at end of pattern")]
    TrailingEscape,
}

/// A compiled pattern.
#[derive(Clone, Debug)]
pub struct Pattern<T> {
    source: String,
    id: T,
    nodes: Vec<PatternNode<T>>,
    head: NodeId,
}

impl<T: Clone> Pattern<T> {
    /// Compile `source`, tagging its accepting state with `id`.
    pub fn compile(source: &str, id: T) -> Result<Self, PatternError> {
        let mut compiler = Compiler {
            chars: source.chars().collect(),
            index: 0,
            nodes: Vec::new(),
        };
        let body = compiler.parse_segment(false)?;
        let end = compiler.single(NodeKind::End(id.clone()));
        let chain = compiler.join(body, end);
        Ok(Pattern {
            source: source.to_string(),
            id,
            nodes: compiler.nodes,
            head: chain.head,
        })
    }
}

impl<T> Pattern<T> {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn id(&self) -> &T {
        &self.id
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn node(&self, id: NodeId) -> &PatternNode<T> {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add `node` and everything reachable from it through `Link` nodes.
    pub fn closure_into(&self, node: NodeId, set: &mut FxHashSet<NodeId>) {
        let mut work = vec![node];
        while let Some(id) = work.pop() {
            if !set.insert(id) {
                continue;
            }
            let node = &self.nodes[id];
            if matches!(node.kind, NodeKind::Link) {
                work.extend(node.outputs.iter().copied());
            }
        }
    }

    /// Add the closure of every output of `node`.
    pub fn outputs_into(&self, node: NodeId, set: &mut FxHashSet<NodeId>) {
        for &out in &self.nodes[node].outputs {
            self.closure_into(out, set);
        }
    }

    /// Whether the whole of `text` is accepted.
    pub fn is_match(&self, text: &str) -> bool {
        let mut current = FxHashSet::default();
        self.closure_into(self.head, &mut current);
        for c in text.chars() {
            let mut next = FxHashSet::default();
            for &id in &current {
                if self.nodes[id].kind.matches(c) {
                    self.outputs_into(id, &mut next);
                }
            }
            if next.is_empty() {
                return false;
            }
            current = next;
        }
        current
            .iter()
            .any(|&id| matches!(self.nodes[id].kind, NodeKind::End(_)))
    }
}

/// Escape every character the dialect treats specially, so `text` compiles
/// to a pattern matching exactly itself.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '.' | '[' | ']' | '(' | ')' | '|' | '*' | '+' | '?' | '-'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// A fragment under construction: entry node and exit node.
#[derive(Clone, Copy, Debug)]
struct Chain {
    head: NodeId,
    tail: NodeId,
}

struct Compiler<T> {
    chars: Vec<char>,
    index: usize,
    nodes: Vec<PatternNode<T>>,
}

impl<T> Compiler<T> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn push(&mut self, kind: NodeKind<T>) -> NodeId {
        self.nodes.push(PatternNode::new(kind));
        self.nodes.len() - 1
    }

    fn link(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from].outputs.push(to);
    }

    fn single(&mut self, kind: NodeKind<T>) -> Chain {
        let id = self.push(kind);
        Chain { head: id, tail: id }
    }

    fn join(&mut self, first: Option<Chain>, second: Chain) -> Chain {
        match first {
            None => second,
            Some(first) => {
                self.link(first.tail, second.head);
                Chain {
                    head: first.head,
                    tail: second.tail,
                }
            }
        }
    }

    /// Alternation: a fresh head fans out to every member, every member
    /// funnels into a fresh tail.
    fn combine(&mut self, members: Vec<Chain>) -> Chain {
        let head = self.push(NodeKind::Link);
        let tail = self.push(NodeKind::Link);
        for member in members {
            self.link(head, member.head);
            self.link(member.tail, tail);
        }
        Chain { head, tail }
    }

    fn quantify(&mut self, quantifier: char, chain: Chain) -> Chain {
        if quantifier == '+' {
            self.link(chain.tail, chain.head);
            return chain;
        }
        let head = self.push(NodeKind::Link);
        let tail = self.push(NodeKind::Link);
        self.link(head, chain.head);
        self.link(head, tail);
        self.link(chain.tail, tail);
        if quantifier == '*' {
            self.link(tail, head);
        }
        Chain { head, tail }
    }

    fn parse_literal(&mut self, class_start: Option<usize>) -> Result<char, PatternError> {
        let mut c = self.peek();
        if c == Some('\\') {
            self.index += 1;
            c = self.peek();
            if c.is_none() {
                return Err(PatternError::TrailingEscape);
            }
        }
        match c {
            Some(c) => {
                self.index += 1;
                Ok(c)
            }
            None => Err(PatternError::UnclosedClass(class_start.unwrap_or(self.index))),
        }
    }

    fn parse_class(&mut self) -> Result<Chain, PatternError> {
        let open = self.index;
        self.index += 1;
        let mut members: Vec<NodeKind<T>> = Vec::new();
        loop {
            match self.peek() {
                None => return Err(PatternError::UnclosedClass(open)),
                Some(']') => {
                    self.index += 1;
                    break;
                }
                Some('-') => {
                    let at = self.index;
                    self.index += 1;
                    let Some(NodeKind::Value(low)) = members.pop() else {
                        return Err(PatternError::InvalidRange(at));
                    };
                    let high = self.parse_literal(Some(open))?;
                    if high < low {
                        return Err(PatternError::InvalidRange(at));
                    }
                    members.push(NodeKind::Range(low, high));
                }
                Some(_) => {
                    let c = self.parse_literal(Some(open))?;
                    members.push(NodeKind::Value(c));
                }
            }
        }
        match members.len() {
            0 => Err(PatternError::EmptyClass(open)),
            1 => {
                let kind = members.remove(0);
                Ok(self.single(kind))
            }
            _ => {
                let chains = members.into_iter().map(|m| self.single(m)).collect();
                Ok(self.combine(chains))
            }
        }
    }

    /// Parse a sequence up to `)` or the end of input. `nested` segments
    /// start at `(` and must be closed.
    fn parse_segment(&mut self, nested: bool) -> Result<Option<Chain>, PatternError> {
        let open = self.index;
        if nested {
            self.index += 1;
        }
        let mut alternatives: Vec<Chain> = Vec::new();
        let mut full: Option<Chain> = None;
        let mut current: Option<Chain> = None;

        while let Some(c) = self.peek() {
            if c == ')' {
                break;
            }
            match c {
                '+' | '*' | '?' => {
                    let chain = current
                        .take()
                        .ok_or(PatternError::DanglingQuantifier(self.index))?;
                    let chain = self.quantify(c, chain);
                    full = Some(self.join(full, chain));
                    self.index += 1;
                }
                '|' => {
                    if let Some(chain) = current.take() {
                        full = Some(self.join(full, chain));
                    }
                    let branch = full
                        .take()
                        .ok_or(PatternError::EmptyAlternative(self.index))?;
                    alternatives.push(branch);
                    self.index += 1;
                    if self.peek().is_none() {
                        return Err(PatternError::EmptyAlternative(self.index));
                    }
                }
                _ => {
                    if let Some(chain) = current.take() {
                        full = Some(self.join(full, chain));
                    }
                    let chain = match c {
                        '(' => {
                            let start = self.index;
                            self.parse_segment(true)?
                                .ok_or(PatternError::EmptyGroup(start))?
                        }
                        '[' => self.parse_class()?,
                        '.' => {
                            self.index += 1;
                            self.single(NodeKind::Any)
                        }
                        _ => {
                            let c = self.parse_literal(None)?;
                            self.single(NodeKind::Value(c))
                        }
                    };
                    current = Some(chain);
                }
            }
        }

        if nested {
            if self.peek() != Some(')') {
                return Err(PatternError::UnclosedGroup(open));
            }
            self.index += 1;
        } else if self.peek() == Some(')') {
            return Err(PatternError::UnmatchedClose(self.index));
        }

        if let Some(chain) = current {
            full = Some(self.join(full, chain));
        }
        if !alternatives.is_empty() {
            let last = full.ok_or(PatternError::EmptyAlternative(self.index))?;
            alternatives.push(last);
            full = Some(self.combine(alternatives));
        }
        Ok(full)
    }
}
