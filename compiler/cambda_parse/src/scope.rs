//! Lexical scope chain.
//!
//! A stack of frames, each a [`HashTable`] from [`Name`] to [`Binding`]. The
//! bottom frame is the global scope and is never popped. Lookups walk from
//! the innermost frame outward, so inner definitions shadow outer ones.
//!
//! The parser and resolver only open frames through a closure-scoped helper
//! that pops on every exit path, so push/pop always nest.
//!
//! # Sections
//!
//! Like the arena, the chain can record a checkpoint. While one is open,
//! every `define` into a frame that existed at the checkpoint logs the slot's
//! previous contents; `pop_section` replays the log backwards, so a failed
//! top-level expression leaves earlier bindings exactly as they were. Frames
//! opened after the checkpoint are popped by their owners and need no log.

use cambda_ir::{ExprId, HashTable, Name};

/// What a name is bound to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Defined, value not known yet (zero value of a fresh slot).
    #[default]
    Pending,
    /// Bound to an expression by `let` or a native registration.
    Value(ExprId),
    /// Lambda parameter.
    Param,
}

/// Previous contents of a slot overwritten inside an open section.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Undo {
    frame: usize,
    hash: u64,
    previous: Option<Binding>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Checkpoint {
    /// Frames alive when the section opened.
    depth: usize,
    undo_len: usize,
}

/// Stack of scope frames; `frames[0]` is the global scope.
#[derive(Clone, Debug)]
pub struct ScopeChain {
    frames: Vec<HashTable<Binding>>,
    /// Cleared frames kept for reuse by `push`.
    spare: Vec<HashTable<Binding>>,
    undo: Vec<Undo>,
    sections: Vec<Checkpoint>,
}

impl ScopeChain {
    /// Create a chain holding only an empty global frame.
    pub fn new() -> Self {
        ScopeChain {
            frames: vec![HashTable::new()],
            spare: Vec::new(),
            undo: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Open a new innermost frame.
    pub fn push(&mut self) {
        let frame = self.spare.pop().unwrap_or_default();
        self.frames.push(frame);
        tracing::trace!(depth = self.frames.len(), "scope push");
    }

    /// Close the innermost frame. The global frame is never popped; returns
    /// `false` if only it remains.
    pub fn pop(&mut self) -> bool {
        if self.frames.len() <= 1 {
            return false;
        }
        if let Some(mut frame) = self.frames.pop() {
            frame.clear();
            self.spare.push(frame);
        }
        tracing::trace!(depth = self.frames.len(), "scope pop");
        true
    }

    /// Find the innermost binding of `name`.
    pub fn resolve(&self, name: Name) -> Option<Binding> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name.raw()).copied())
    }

    /// Get or create the slot for `name` in the innermost frame.
    ///
    /// A fresh slot holds [`Binding::Pending`].
    pub fn define(&mut self, name: Name) -> &mut Binding {
        let index = self.frames.len() - 1;
        let hash = name.raw();
        if self.sections.last().is_some_and(|section| index < section.depth) {
            self.undo.push(Undo {
                frame: index,
                hash,
                previous: self.frames[index].get(hash).copied(),
            });
        }
        self.frames[index].insert(hash)
    }

    /// Whether `name` is bound in the innermost frame itself.
    pub fn is_defined_locally(&self, name: Name) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.contains(name.raw()))
    }

    /// Number of frames, counting the global one.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    // ===== Sections =====

    /// Record a checkpoint.
    pub fn push_section(&mut self) {
        self.sections.push(Checkpoint {
            depth: self.frames.len(),
            undo_len: self.undo.len(),
        });
    }

    /// Restore every slot defined since the innermost checkpoint and drop the
    /// checkpoint. Returns `false` if no section is open.
    pub fn pop_section(&mut self) -> bool {
        let Some(checkpoint) = self.sections.pop() else {
            return false;
        };
        tracing::trace!(
            restored = self.undo.len() - checkpoint.undo_len,
            "scope section rolled back"
        );
        for entry in self.undo.drain(checkpoint.undo_len..).rev() {
            let Some(frame) = self.frames.get_mut(entry.frame) else {
                continue;
            };
            match entry.previous {
                Some(binding) => *frame.insert(entry.hash) = binding,
                None => {
                    frame.remove(entry.hash);
                }
            }
        }
        true
    }

    /// Drop the innermost checkpoint, keeping its bindings. Returns `false`
    /// if no section is open.
    pub fn commit_section(&mut self) -> bool {
        if self.sections.pop().is_none() {
            return false;
        }
        if self.sections.is_empty() {
            self.undo.clear();
        }
        true
    }

    /// Number of open sections.
    #[inline]
    pub fn section_depth(&self) -> usize {
        self.sections.len()
    }

    /// Drop every frame and binding, leaving an empty global frame.
    pub fn reset(&mut self) {
        self.frames.truncate(1);
        if let Some(global) = self.frames.first_mut() {
            global.clear();
        }
        self.spare.clear();
        self.undo.clear();
        self.sections.clear();
    }
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
