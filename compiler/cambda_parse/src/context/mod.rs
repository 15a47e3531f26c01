//! Parse context: everything one parse touches.
//!
//! A [`ParseContext`] owns the arena, the interner and the scope chain. Nodes,
//! names and bindings from one context are meaningless in another; there is
//! no global state.

use cambda_ir::{
    ArenaError, Expr, ExprArena, ExprDisplay, ExprId, ExprKind, FnValue, Literal, Span,
    StringInterner, DEFAULT_NODE_CAPACITY,
};
use cambda_lexer_core::SourceBuffer;
use tracing::{debug, error};

use crate::{resolve, Binding, ParseError, Parser, ScopeChain};

/// Primitive functions bound in the global scope of every context.
pub const NATIVES: &[&str] = &["+", "-", "*", "/", "%", "not", "and", "or", "xor"];

/// Nodes each native occupies: one function value plus its literal.
const NODES_PER_NATIVE: usize = 2;

/// Parse context configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    /// Nodes available to parsed source, not counting natives.
    pub arena_capacity: usize,
    /// Bind [`NATIVES`] in the global scope.
    pub register_natives: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            arena_capacity: DEFAULT_NODE_CAPACITY,
            register_natives: true,
        }
    }
}

/// Owner of the arena, interner and scope chain of one parse.
#[derive(Clone, Debug)]
pub struct ParseContext {
    arena: ExprArena,
    interner: StringInterner,
    scopes: ScopeChain,
    config: ParseConfig,
}

impl ParseContext {
    /// Create a context and register natives if configured.
    pub fn new(config: ParseConfig) -> Self {
        let reserved = if config.register_natives {
            NATIVES.len() * NODES_PER_NATIVE
        } else {
            0
        };
        let mut context = ParseContext {
            arena: ExprArena::with_capacity(config.arena_capacity.saturating_add(reserved)),
            interner: StringInterner::new(),
            scopes: ScopeChain::new(),
            config,
        };
        context.register_natives();
        context
    }

    fn register_natives(&mut self) {
        if !self.config.register_natives {
            return;
        }
        for &text in NATIVES {
            if let Err(err) = self.register_native(text) {
                error!(native = text, %err, "failed to register native");
            }
        }
        debug!(count = NATIVES.len(), "natives registered");
    }

    fn register_native(&mut self, text: &str) -> Result<(), ArenaError> {
        let name = self.interner.register(text);
        let function = self.arena.alloc_fn(FnValue::Native { name })?;
        let value = self.arena.alloc_expr(Expr::new(
            ExprKind::Literal(Literal::Fn(function)),
            Span::DUMMY,
        ))?;
        *self.scopes.define(name) = Binding::Value(value);
        Ok(())
    }

    /// A parser over `source` that allocates into this context.
    pub fn parser<'ctx, 'src>(&'ctx mut self, source: &'src SourceBuffer) -> Parser<'ctx, 'src> {
        Parser::new(
            source,
            &mut self.arena,
            &mut self.interner,
            &mut self.scopes,
        )
    }

    /// Parse every top-level expression of `source`, stopping at the first
    /// error.
    ///
    /// Top-level `let`s are bound as they are parsed, so by the time this
    /// returns every root's definitions are visible. Use
    /// [`parse_and_resolve`](Self::parse_and_resolve) to check names in
    /// source order.
    pub fn parse(&mut self, source: &SourceBuffer) -> Result<Vec<ExprId>, ParseError> {
        let mut parser = self.parser(source);
        let mut roots = Vec::new();
        while let Some(root) = parser.next_expr()? {
            roots.push(root);
        }
        Ok(roots)
    }

    /// Parse and resolve each top-level expression before the next one is
    /// parsed, so a root only sees definitions that precede it.
    pub fn parse_and_resolve(&mut self, source: &SourceBuffer) -> Result<Vec<ExprId>, ParseError> {
        let mut parser = self.parser(source);
        let mut roots = Vec::new();
        while let Some(root) = parser.next_expr()? {
            parser.resolve(root)?;
            roots.push(root);
        }
        Ok(roots)
    }

    /// [`parse`](Self::parse) for a string.
    pub fn parse_str(&mut self, source: &str) -> Result<Vec<ExprId>, ParseError> {
        self.parse(&SourceBuffer::new(source))
    }

    /// Check names and callees under `root` against the scope chain.
    ///
    /// The chain holds every top-level definition parsed so far, including
    /// ones that come after `root` in the source.
    pub fn resolve(&mut self, root: ExprId) -> Result<(), ParseError> {
        resolve::resolve(&self.arena, &self.interner, &mut self.scopes, root)
    }

    /// Discard every node, name and binding, then re-register natives.
    ///
    /// A reset context parses identical source into an identical arena.
    pub fn reset(&mut self) {
        self.arena.reset();
        self.interner.reset();
        self.scopes.reset();
        self.register_natives();
        debug!("parse context reset");
    }

    #[inline]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    #[inline]
    pub fn scopes(&self) -> &ScopeChain {
        &self.scopes
    }

    #[inline]
    pub fn config(&self) -> ParseConfig {
        self.config
    }

    /// Print the tree under `root` with names resolved through this
    /// context's interner.
    pub fn display(&self, root: ExprId) -> ExprDisplay<'_, StringInterner> {
        ExprDisplay::new(&self.arena, &self.interner, root)
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new(ParseConfig::default())
    }
}
