use super::Lit;

/// A `Vec` indexed by [`Lit`], with positive and negative literals of the
/// same variable placed next to each other.
#[derive(Debug, Clone, Default)]
pub struct LitVec<T>(Vec<T>);

impl<T> LitVec<T> {
    pub fn new() -> Self {
        LitVec(Vec::new())
    }
}

impl<T: Clone> LitVec<T> {
    /// Resize so that `l` is a valid index, filling new slots with `val`.
    pub fn expand(&mut self, l: Lit, val: T) {
        let len = lit_to_idx(l) + 1;
        if len > self.0.len() {
            self.0.resize(len, val);
        }
    }
}

fn lit_to_idx(lit: Lit) -> usize {
    let var_idx = (lit.var().get() as usize) * 2;
    var_idx + (lit.is_neg() as usize)
}

impl<T> std::ops::Index<Lit> for LitVec<T> {
    type Output = T;

    fn index(&self, index: Lit) -> &Self::Output {
        &self.0[lit_to_idx(index)]
    }
}

impl<T> std::ops::IndexMut<Lit> for LitVec<T> {
    fn index_mut(&mut self, index: Lit) -> &mut Self::Output {
        &mut self.0[lit_to_idx(index)]
    }
}
