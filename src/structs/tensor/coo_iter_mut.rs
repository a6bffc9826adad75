use super::coo::COOTensor;
use crate::structs::vec::SmallVec;
use crate::traits::{IdxType, RawParts, TensorIterMut, ValType};
use ndarray::Array1;

/// Mutable iterator over `(coordinate, &mut value)` pairs of a [`COOTensor`].
pub struct COOIterMut<'a, IT, VT>
where
    IT: 'a + IdxType,
    VT: 'a + ValType,
{
    indices: &'a SmallVec<Array1<IT>>,
    values: std::slice::IterMut<'a, VT>,
    pos: usize,
}

impl<'a, IT, VT> COOIterMut<'a, IT, VT>
where
    IT: 'a + IdxType,
    VT: 'a + ValType,
{
    pub(super) fn new(tensor: &'a mut COOTensor<IT, VT>) -> Self {
        // Safety: `tensor` is borrowed mutably for `'a`, so splitting that
        // borrow into a shared view of `indices` and an exclusive iterator
        // over `values` does not alias.
        let inner = unsafe { tensor.raw_parts_mut() };
        let values = inner
            .values
            .as_slice_mut()
            .expect("contiguous value storage")
            .iter_mut();
        Self {
            indices: &inner.indices,
            values,
            pos: 0,
        }
    }
}

impl<'a, IT, VT> TensorIterMut<'a, IT, VT> for COOIterMut<'a, IT, VT>
where
    IT: 'a + IdxType,
    VT: 'a + ValType,
{
}

impl<'a, IT, VT> Iterator for COOIterMut<'a, IT, VT>
where
    IT: 'a + IdxType,
    VT: 'a + ValType,
{
    type Item = (Vec<IT>, &'a mut VT);

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.values.next()?;
        let coord = self
            .indices
            .iter()
            .map(|mode| mode[self.pos].clone())
            .collect();
        self.pos += 1;
        Some((coord, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<'a, IT, VT> ExactSizeIterator for COOIterMut<'a, IT, VT>
where
    IT: 'a + IdxType,
    VT: 'a + ValType,
{
    fn len(&self) -> usize {
        self.values.len()
    }
}
