use std::collections::HashMap;

use super::{Label, Labels};
use ndarray::{ArrayBase, Data, Ix1};

/// A NdArray with discrete labels can act as labels
impl<L: Label, S: Data<Elem = L>> Labels for ArrayBase<S, Ix1> {
    type Elem = L;

    fn label_count(&self) -> HashMap<L, usize> {
        let mut map = HashMap::new();
        for label in self.iter() {
            *map.entry(label.clone()).or_insert(0) += 1;
        }
        map
    }
}
