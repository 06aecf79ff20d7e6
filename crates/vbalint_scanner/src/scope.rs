//! Scope descriptors: how opener tokens start, close, and share scopes.
//!
//! This is pure data consumed by the external scope walker. For each token
//! kind that opens a lexical scope, a descriptor records which kinds start
//! the scope body, which kinds close it, whether a body start is mandatory,
//! and whether the scope may share its closer with sibling scopes (the way
//! consecutive `Case` blocks all end at one `End Select`).

use rustc_hash::{FxHashMap, FxHashSet};
use vbalint_tokens::TokenKind;

use crate::language::LanguageError;

/// Describes the lexical scope opened by one token kind.
#[derive(Debug, Clone)]
pub struct ScopeDescriptor {
    /// The token kind that opens the scope.
    pub opener: TokenKind,
    /// Token kinds that mark the start of the scope body.
    pub body_start: FxHashSet<TokenKind>,
    /// Token kinds that close the scope.
    pub closers: FxHashSet<TokenKind>,
    /// Whether a body-start token is mandatory. A strict scope with no body
    /// start is a structural anomaly for the walker to flag.
    pub strict: bool,
    /// Whether sibling scopes may terminate at the same closer.
    pub shared: bool,
    /// Token kinds that continue the same logical scope without re-opening
    /// it (`ElseIf` continuing an `If`).
    pub continuations: FxHashSet<TokenKind>,
}

impl ScopeDescriptor {
    /// Create a descriptor with empty sets, non-strict and unshared.
    pub fn new(opener: TokenKind) -> Self {
        Self {
            opener,
            body_start: FxHashSet::default(),
            closers: FxHashSet::default(),
            strict: false,
            shared: false,
            continuations: FxHashSet::default(),
        }
    }

    /// Mark the body-start token as mandatory.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Allow sibling scopes to share this scope's closer.
    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    /// Add a token kind that starts the scope body.
    pub fn starts_at(mut self, kind: TokenKind) -> Self {
        self.body_start.insert(kind);
        self
    }

    /// Add a token kind that closes the scope.
    pub fn closes_at(mut self, kind: TokenKind) -> Self {
        self.closers.insert(kind);
        self
    }

    /// Add a token kind that continues the scope.
    pub fn continues_with(mut self, kind: TokenKind) -> Self {
        self.continuations.insert(kind);
        self
    }
}

/// Lookup table of scope descriptors plus the precomputed end-scope union.
///
/// The union of every descriptor's closers is computed once at construction
/// so the walker can recognize any closing boundary in a single forward
/// scan without consulting each descriptor.
#[derive(Debug, Clone, Default)]
pub struct ScopeDescriptorTable {
    descriptors: FxHashMap<TokenKind, ScopeDescriptor>,
    end_scope: FxHashSet<TokenKind>,
}

impl ScopeDescriptorTable {
    /// Build the table, validating every descriptor.
    ///
    /// Fails if a descriptor has an empty closer set, or if a `shared`
    /// descriptor names no other opener in its continuation set (a shared
    /// closer with no sibling to share with is a data error).
    pub fn new(descriptors: Vec<ScopeDescriptor>) -> Result<Self, LanguageError> {
        let mut map = FxHashMap::default();
        let mut end_scope = FxHashSet::default();
        for descriptor in descriptors {
            if descriptor.closers.is_empty() {
                return Err(LanguageError::EmptyCloserSet(descriptor.opener));
            }
            end_scope.extend(descriptor.closers.iter().copied());
            map.insert(descriptor.opener, descriptor);
        }
        for descriptor in map.values() {
            if descriptor.shared {
                let has_sibling = descriptor
                    .continuations
                    .iter()
                    .any(|kind| *kind != descriptor.opener && map.contains_key(kind));
                if !has_sibling {
                    return Err(LanguageError::SharedWithoutSibling(descriptor.opener));
                }
            }
        }
        Ok(Self {
            descriptors: map,
            end_scope,
        })
    }

    /// Look up the descriptor for a scope-opening token kind.
    pub fn descriptor_for(&self, kind: TokenKind) -> Option<&ScopeDescriptor> {
        self.descriptors.get(&kind)
    }

    /// Whether this kind opens a scope.
    pub fn is_opener(&self, kind: TokenKind) -> bool {
        self.descriptors.contains_key(&kind)
    }

    /// The union of every descriptor's closers.
    pub fn end_scope_kinds(&self) -> &FxHashSet<TokenKind> {
        &self.end_scope
    }

    /// Whether this kind closes any scope.
    pub fn is_end_scope(&self, kind: TokenKind) -> bool {
        self.end_scope.contains(&kind)
    }

    /// The number of registered openers.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the table has no descriptors.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Iterate over all descriptors.
    pub fn iter(&self) -> impl Iterator<Item = &ScopeDescriptor> {
        self.descriptors.values()
    }
}
