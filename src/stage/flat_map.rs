use crate::cursor::{Cursor, Lookahead};
use crate::err::ViewErr;
use crate::stage::{Stage, StageKind};
use crate::view::View;
use std::fmt;
use std::rc::Rc;

pub(crate) struct FlatMap<'a, E, F> {
    pub(crate) parent: View<'a, E>,
    pub(crate) f: Rc<F>,
}

impl<'a, E, G, F> Stage<'a, G::Item> for FlatMap<'a, E, F>
where
    E: Clone + 'a,
    G: IntoIterator + 'a,
    G::Item: Clone + 'a,
    G::IntoIter: 'a,
    F: Fn(E) -> G + 'a,
{
    fn kind(&self) -> StageKind {
        StageKind::FlatMap
    }

    fn push(&self, visitor: &mut dyn FnMut(G::Item)) {
        self.parent.push(&mut |e| (*self.f)(e).into_iter().for_each(&mut *visitor));
    }

    fn cursor(&self) -> Box<dyn Cursor<G::Item> + 'a> {
        Box::new(FlatMapCursor::new(self.parent.cursor(), self.f.clone()))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlatMap({:?})", self.parent)
    }
}

/// 持有当前父元素生成的子序列游标，子序列耗尽时推进父游标并重新生成，跳过空的子序列。
struct FlatMapCursor<'a, E, F, G: IntoIterator> {
    parent: Box<dyn Cursor<E> + 'a>,
    f: Rc<F>,
    inner: Option<Lookahead<G::IntoIter>>,
}

impl<'a, E, F, G> FlatMapCursor<'a, E, F, G>
where
    F: Fn(E) -> G,
    G: IntoIterator,
    G::Item: Clone,
{
    fn new(parent: Box<dyn Cursor<E> + 'a>, f: Rc<F>) -> Self {
        let mut cursor = FlatMapCursor { parent, f, inner: None };
        cursor.settle();
        cursor
    }

    fn settle(&mut self) {
        loop {
            if self.inner.as_ref().is_some_and(|inner| !inner.at_end()) {
                return;
            }
            if self.inner.is_some() {
                self.parent.advance();
            }
            if self.parent.at_end() {
                self.inner = None;
                return;
            }
            self.inner = Some(Lookahead::new((*self.f)(self.parent.current()).into_iter()));
        }
    }
}

impl<E, F, G> Cursor<G::Item> for FlatMapCursor<'_, E, F, G>
where
    F: Fn(E) -> G,
    G: IntoIterator,
    G::Item: Clone,
{
    fn at_end(&self) -> bool {
        self.inner.is_none()
    }

    fn current(&self) -> G::Item {
        match &self.inner {
            Some(inner) => inner.current(),
            None => ViewErr::AtEnd { op: "current" }.termination(),
        }
    }

    fn advance(&mut self) {
        if let Some(inner) = self.inner.as_mut() {
            inner.advance();
        }
        self.settle();
    }
}

#[cfg(test)]
mod tests {
    use crate::wrap;

    #[test]
    fn test_flat_map() {
        let view = wrap([1, 2, 3, 4, 5]).flat_map(|i| vec![i, i * 10]);
        let v = view.evaluate();
        assert_eq!(v.len(), 10);
        assert_eq!(v, vec![1, 10, 2, 20, 3, 30, 4, 40, 5, 50]);
        assert_eq!(view.begin().collect::<Vec<_>>(), v);
    }

    #[test]
    fn test_flat_map_skips_empty() {
        let view = wrap([0usize, 1, 0, 0, 2, 0]).flat_map(|n| std::iter::repeat_n(n, n));
        assert_eq!(view.evaluate(), vec![1, 2, 2]);
        assert_eq!(view.begin().collect::<Vec<_>>(), vec![1, 2, 2]);
    }

    #[test]
    fn test_flat_map_all_empty() {
        let view = wrap([1, 2]).flat_map(|_| Vec::<i32>::new());
        assert!(view.evaluate().is_empty());
        assert!(view.begin().at_end());
        assert!(wrap(Vec::<i32>::new()).flat_map(|i| vec![i]).begin().at_end());
    }

    #[test]
    fn test_flat_map_changes_type() {
        let view = wrap(["ab", "", "c"]).flat_map(|s| s.chars());
        assert_eq!(view.evaluate(), vec!['a', 'b', 'c']);
        assert_eq!(view.begin().collect::<String>(), "abc");
    }
}
