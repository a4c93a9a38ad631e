use crate::cursor::{Cursor, Lookahead, SharedCursor};
use crate::seq::Sequence;
use crate::view::View;
use std::rc::Rc;

/// 根视图持有数据的方式
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Ownership {
    /// 视图持有独立的数据副本，与原集合的后续变化无关。
    Owned,
    /// 视图引用调用方的集合，零拷贝，借用检查保证集合比视图及其迭代器活得更久。
    Borrowed,
}

pub(crate) enum Storage<'a, E> {
    Owned(Rc<[E]>),
    Borrowed(&'a (dyn Sequence<Elem = E> + 'a)),
}

impl<E> Clone for Storage<'_, E> {
    fn clone(&self) -> Self {
        match self {
            Storage::Owned(data) => Storage::Owned(data.clone()),
            Storage::Borrowed(seq) => Storage::Borrowed(*seq),
        }
    }
}

impl<'a, E> Storage<'a, E> {
    pub(crate) fn ownership(&self) -> Ownership {
        match self {
            Storage::Owned(_) => Ownership::Owned,
            Storage::Borrowed(_) => Ownership::Borrowed,
        }
    }

    pub(crate) fn size(&self) -> usize {
        match self {
            Storage::Owned(data) => data.len(),
            Storage::Borrowed(seq) => seq.size(),
        }
    }
}

impl<'a, E: Clone + 'a> Storage<'a, E> {
    pub(crate) fn push(&self, visitor: &mut dyn FnMut(E)) {
        match self {
            Storage::Owned(data) => data.iter().for_each(|e| visitor(e.clone())),
            Storage::Borrowed(seq) => seq.walk().for_each(visitor),
        }
    }

    pub(crate) fn cursor(&self) -> Box<dyn Cursor<E> + 'a> {
        match self {
            Storage::Owned(data) => Box::new(SharedCursor::new(data.clone())),
            Storage::Borrowed(seq) => {
                let seq: &'a (dyn Sequence<Elem = E> + 'a) = *seq;
                Box::new(Lookahead::new(seq.walk()))
            }
        }
    }

    pub(crate) fn to_vec(&self) -> Vec<E> {
        match self {
            Storage::Owned(data) => data.to_vec(),
            Storage::Borrowed(seq) => seq.walk().collect(),
        }
    }
}

/// 以值的方式包装集合，视图持有独立的数据副本。
///
/// 任意可迭代的值都可以包装：`Vec`、数组字面量、[`crate::Progression`]等；
/// 映射会被展开为键值对序列，只有有序映射才保证顺序。
pub fn wrap<'a, C>(collection: C) -> View<'a, C::Item>
where
    C: IntoIterator,
    C::Item: Clone + 'a,
{
    View::realized(Storage::Owned(collection.into_iter().collect()))
}

/// 以引用的方式包装集合，视图不拷贝数据。
pub fn wrap_ref<'a, S>(collection: &'a S) -> View<'a, S::Elem>
where
    S: Sequence + 'a,
    S::Elem: Clone + 'a,
{
    View::realized(Storage::Borrowed(collection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Progression;
    use std::collections::{BTreeMap, HashMap, LinkedList};

    #[test]
    fn test_wrap_owned() {
        let view = wrap(vec![1, 2, 3]);
        assert!(view.is_realized());
        assert_eq!(view.ownership(), Some(Ownership::Owned));
        assert_eq!(view.evaluate(), vec![1, 2, 3]);
    }

    #[test]
    fn test_wrap_copy_is_independent() {
        let mut source = vec![1, 2, 3];
        let view = wrap(source.clone());
        source.push(4);
        source[0] = 100;
        assert_eq!(view.evaluate(), vec![1, 2, 3]);
    }

    #[test]
    fn test_wrap_ref() {
        let source = LinkedList::from([1, 2]);
        let view = wrap_ref(&source);
        assert_eq!(view.ownership(), Some(Ownership::Borrowed));
        assert_eq!(view.map(|i| i * 2).evaluate(), vec![2, 4]);
        assert_eq!(view.begin().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_wrap_literal() {
        assert_eq!(wrap([4, 5]).evaluate(), vec![4, 5]);
        assert_eq!(wrap(["a"]).size(), 1);
    }

    #[test]
    fn test_wrap_mapping() {
        let m = BTreeMap::from([(2, 'b'), (1, 'a')]);
        assert_eq!(wrap(m.clone()).evaluate(), vec![(1, 'a'), (2, 'b')]);
        assert_eq!(wrap_ref(&m).evaluate(), vec![(1, 'a'), (2, 'b')]);

        let h = HashMap::from([(1, 1), (2, 2), (3, 3)]);
        let mut pairs = wrap(h).evaluate();
        pairs.sort();
        assert_eq!(pairs, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_wrap_progression() {
        let r = Progression::up_to(1, 2);
        assert_eq!(wrap(r).map(|i| i * 2).evaluate(), vec![2]);
        assert_eq!(wrap_ref(&r).map(|i| i * 2).evaluate(), vec![2]);
        assert_eq!(wrap_ref(&r).ownership(), Some(Ownership::Borrowed));
    }

    #[test]
    fn test_storage_size() {
        let v = vec!['x'; 3];
        assert_eq!(Storage::<char>::Borrowed(&v).size(), 3);
        assert_eq!(Storage::<char>::Owned(Rc::from(v.clone())).size(), 3);
    }
}
