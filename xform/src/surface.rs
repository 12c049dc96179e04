//! Output surfaces of the drawing system and their transform marks.

/// Content stream currently targeted by drawing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Page number, starting from 1.
    Page(u32),
    /// Template (form XObject) id.
    Template(u32),
}

impl Surface {
    pub fn is_template(self) -> bool {
        matches!(self, Self::Template(_))
    }

    /// True if a scope opened on `self` cannot continue on `other`. A scope
    /// may span page breaks, it never crosses into or out of a template.
    pub fn conflicts_with(self, other: Surface) -> bool {
        match (self, other) {
            (Self::Page(_), Self::Page(_)) => false,
            _ => self != other,
        }
    }
}

/// Byte offsets into a surface buffer, one per open transform scope.
///
/// An offset is the buffer length right after the scope's `q`, moved to the
/// end of each `cm` written while it is the innermost mark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkStack(Vec<usize>);

impl MarkStack {
    pub fn push(&mut self, offset: usize) {
        self.0.push(offset);
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.0.pop()
    }

    pub fn peek(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Replace the innermost mark, returns false if the stack is empty.
    pub fn replace_top(&mut self, offset: usize) -> bool {
        match self.0.last_mut() {
            Some(top) => {
                *top = offset;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}
