//! The operand stack
//!
//! Top of stack is the end of the vector. Binary operators read the second
//! entry from the top as their left operand and the top as their right
//! operand, so `a b op` evaluates `a op b`.

use crate::eval::CalcError;
use crate::value::NumericValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    items: Vec<NumericValue>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, value: NumericValue) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Result<NumericValue, CalcError> {
        self.items.pop().ok_or(CalcError::EmptyStack {
            required: 1,
            available: 0,
        })
    }

    /// The top `n` values, oldest first, left in place
    pub fn peek(&self, n: usize) -> Result<&[NumericValue], CalcError> {
        let len = self.items.len();
        if len < n {
            return Err(CalcError::EmptyStack {
                required: n,
                available: len,
            });
        }
        Ok(&self.items[len - n..])
    }

    pub fn top(&self) -> Option<&NumericValue> {
        self.items.last()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Copy of the whole stack, bottom first
    pub fn snapshot(&self) -> Vec<NumericValue> {
        self.items.clone()
    }

    pub fn as_slice(&self) -> &[NumericValue] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NumericValue> {
        self.items.iter()
    }

    /// Replace the top `n` values with a single result
    pub fn replace_top(&mut self, n: usize, value: NumericValue) -> Result<(), CalcError> {
        self.peek(n)?;
        let keep = self.items.len() - n;
        self.items.truncate(keep);
        self.items.push(value);
        Ok(())
    }

    pub fn swap_top(&mut self) -> Result<(), CalcError> {
        let len = self.items.len();
        if len < 2 {
            return Err(CalcError::EmptyStack {
                required: 2,
                available: len,
            });
        }
        self.items.swap(len - 1, len - 2);
        Ok(())
    }

    pub(crate) fn replace_all(&mut self, items: Vec<NumericValue>) {
        self.items = items;
    }
}

impl From<Vec<NumericValue>> for Stack {
    fn from(items: Vec<NumericValue>) -> Self {
        Stack { items }
    }
}
