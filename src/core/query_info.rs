//! Query context layout
//!
//! Several queries (or strands/frames of one query) can be searched at once
//! by concatenating them into a single query buffer. Each piece is a
//! context; a word pair whose first hit lies in an earlier context than the
//! second must not be extended as one alignment.

/// One context inside the concatenated query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextInfo {
    /// Offset of this context in the concatenated query
    pub query_offset: u32,
    /// Length of this context
    pub query_length: u32,
}

impl ContextInfo {
    #[inline]
    pub fn end(&self) -> u32 {
        self.query_offset + self.query_length
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryInfo {
    contexts: Vec<ContextInfo>,
}

impl QueryInfo {
    /// A query made of one context
    pub fn single(query_length: usize) -> Self {
        Self::from_lengths(&[query_length])
    }

    /// Contexts laid out back to back in the given order
    pub fn from_lengths(lengths: &[usize]) -> Self {
        let mut offset = 0u32;
        let contexts = lengths
            .iter()
            .map(|&len| {
                let ctx = ContextInfo {
                    query_offset: offset,
                    query_length: len as u32,
                };
                offset += len as u32;
                ctx
            })
            .collect();
        Self { contexts }
    }

    /// Sum of all context lengths
    pub fn total_length(&self) -> usize {
        self.contexts.last().map_or(0, |c| c.end() as usize)
    }

    pub fn num_contexts(&self) -> usize {
        self.contexts.len()
    }

    pub fn contexts(&self) -> &[ContextInfo] {
        &self.contexts
    }

    /// Context holding concatenated offset `query_offset` (binary search over
    /// context starts). Offsets past the end map to the last context.
    #[inline]
    pub fn context_of(&self, query_offset: u32) -> usize {
        self.contexts
            .partition_point(|c| c.query_offset <= query_offset)
            .saturating_sub(1)
    }

    #[inline]
    pub fn context_start(&self, context: usize) -> u32 {
        self.contexts[context].query_offset
    }

    /// True if `[start, start + len)` lies inside a single context
    pub fn within_one_context(&self, start: u32, len: u32) -> bool {
        let ctx = &self.contexts[self.context_of(start)];
        start >= ctx.query_offset && start + len <= ctx.end()
    }
}
