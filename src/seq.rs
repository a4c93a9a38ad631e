use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::BuildHasher;

/// 已物化的集合，可以被任意次遍历，是所有视图的根数据来源。
///
/// 以引用方式包装（[`crate::wrap_ref`]）时，视图直接通过该接口遍历调用方的集合，不做拷贝。
pub trait Sequence {
    type Elem;

    /// 按集合自身顺序遍历全部元素。
    fn walk(&self) -> Box<dyn Iterator<Item = Self::Elem> + '_>;

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

macro_rules! impl_sequence {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<E: Clone> Sequence for $ty<E> {
                type Elem = E;

                fn walk(&self) -> Box<dyn Iterator<Item = E> + '_> {
                    Box::new(self.iter().cloned())
                }

                fn size(&self) -> usize {
                    self.len()
                }
            }
        )*
    };
}

impl_sequence!(Vec, VecDeque, LinkedList, BTreeSet);

impl<E: Clone> Sequence for [E] {
    type Elem = E;

    fn walk(&self) -> Box<dyn Iterator<Item = E> + '_> {
        Box::new(self.iter().cloned())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<E: Clone, const N: usize> Sequence for [E; N] {
    type Elem = E;

    fn walk(&self) -> Box<dyn Iterator<Item = E> + '_> {
        Box::new(self.iter().cloned())
    }

    fn size(&self) -> usize {
        N
    }
}

impl<E: Clone, S: BuildHasher> Sequence for HashSet<E, S> {
    type Elem = E;

    fn walk(&self) -> Box<dyn Iterator<Item = E> + '_> {
        Box::new(self.iter().cloned())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

// 映射按键值对展开
impl<K: Clone, V: Clone> Sequence for BTreeMap<K, V> {
    type Elem = (K, V);

    fn walk(&self) -> Box<dyn Iterator<Item = (K, V)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<K: Clone, V: Clone, S: BuildHasher> Sequence for HashMap<K, V, S> {
    type Elem = (K, V);

    fn walk(&self) -> Box<dyn Iterator<Item = (K, V)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    fn size(&self) -> usize {
        self.len()
    }
}
