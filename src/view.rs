use crate::cursor::{Cursor, ViewIter};
use crate::input::{Ownership, Storage};
use crate::stage::flat_map::FlatMap;
use crate::stage::latch::{Countdown, KeepWhile, Pred, SkipUntil};
use crate::stage::zip::Zip;
use crate::stage::{Filter, Map, Stage, StageKind};
use log::trace;
use std::fmt;
use std::rc::Rc;

/// 惰性变换流水线中的一级。
///
/// 视图要么是已物化的根视图（持有数据，没有父视图），要么是派生视图（持有父视图、阶段类型和变换函数）。
/// 组合方法只构造新的派生视图，不做任何计算；直到调用终结操作（`evaluate`、`size`、`fold_left`等）
/// 或者拉取迭代器时才会遍历整条链。
///
/// 视图本身不可变，`clone`只复制共享句柄。跳过/保留这类带状态的阶段把状态放在每次遍历中，
/// 所以同一个视图可以被反复求值，也可以同时打开多个互不影响的迭代器。
pub struct View<'a, E> {
    node: Node<'a, E>,
}

enum Node<'a, E> {
    Realized(Storage<'a, E>),
    Derived(Rc<dyn Stage<'a, E> + 'a>),
}

impl<E> Clone for View<'_, E> {
    fn clone(&self) -> Self {
        let node = match &self.node {
            Node::Realized(storage) => Node::Realized(storage.clone()),
            Node::Derived(stage) => Node::Derived(stage.clone()),
        };
        View { node }
    }
}

impl<'a, E> View<'a, E> {
    pub(crate) fn realized(storage: Storage<'a, E>) -> Self {
        View { node: Node::Realized(storage) }
    }

    pub(crate) fn derived(stage: impl Stage<'a, E> + 'a) -> Self {
        View { node: Node::Derived(Rc::new(stage)) }
    }

    /// 是否为已物化的根视图
    pub fn is_realized(&self) -> bool {
        matches!(self.node, Node::Realized(_))
    }

    pub fn kind(&self) -> StageKind {
        match &self.node {
            Node::Realized(_) => StageKind::Root,
            Node::Derived(stage) => stage.kind(),
        }
    }

    /// 根视图的数据持有方式，派生视图返回`None`。
    pub fn ownership(&self) -> Option<Ownership> {
        match &self.node {
            Node::Realized(storage) => Some(storage.ownership()),
            Node::Derived(_) => None,
        }
    }

    pub(crate) fn storage(&self) -> Option<&Storage<'a, E>> {
        match &self.node {
            Node::Realized(storage) => Some(storage),
            Node::Derived(_) => None,
        }
    }
}

impl<'a, E: Clone + 'a> View<'a, E> {
    /// 只保留满足`pred`的元素。
    pub fn filter<F>(&self, pred: F) -> View<'a, E>
    where
        F: Fn(&E) -> bool + 'a,
    {
        View::derived(Filter { parent: self.clone(), pred: Rc::new(pred) })
    }

    /// 对每个元素应用`f`，一进一出。
    pub fn map<U, F>(&self, f: F) -> View<'a, U>
    where
        U: Clone + 'a,
        F: Fn(E) -> U + 'a,
    {
        View::derived(Map { parent: self.clone(), f: Rc::new(f) })
    }

    /// 每个元素生成一个有限子序列，按顺序展开。
    pub fn flat_map<G, F>(&self, f: F) -> View<'a, G::Item>
    where
        G: IntoIterator + 'a,
        G::Item: Clone + 'a,
        G::IntoIter: 'a,
        F: Fn(E) -> G + 'a,
    {
        View::derived(FlatMap { parent: self.clone(), f: Rc::new(f) })
    }

    /// 丢弃开头不满足`pred`的元素；一旦某个元素满足，它和其后的所有元素都保留，不再判断。
    pub fn skip_until<F>(&self, pred: F) -> View<'a, E>
    where
        F: Fn(&E) -> bool + 'a,
    {
        View::derived(SkipUntil { parent: self.clone(), trigger: Rc::new(Pred(pred)) })
    }

    /// 保留开头满足`pred`的元素；一旦某个元素不满足，它和其后的所有元素都被丢弃，即使之后又满足。
    pub fn keep_while<F>(&self, pred: F) -> View<'a, E>
    where
        F: Fn(&E) -> bool + 'a,
    {
        View::derived(KeepWhile { parent: self.clone(), trigger: Rc::new(Pred(pred)) })
    }

    /// 丢弃前`n`个元素，不足`n`个时全部丢弃。
    pub fn drop(&self, n: usize) -> View<'a, E> {
        View::derived(SkipUntil { parent: self.clone(), trigger: Rc::new(Countdown(n)) })
    }

    /// 按位置与另一个视图配对，长度取两者中较短的。
    pub fn zip<B: Clone + 'a>(&self, other: &View<'a, B>) -> View<'a, (E, B)> {
        View::derived(Zip { left: self.clone(), right: other.clone() })
    }

    /// 推送式遍历：每个存活的元素依次交给`visitor`。
    pub(crate) fn push(&self, visitor: &mut dyn FnMut(E)) {
        match &self.node {
            Node::Realized(storage) => storage.push(visitor),
            Node::Derived(stage) => stage.push(visitor),
        }
    }

    /// 终结操作的统一入口
    pub(crate) fn traverse(&self, visitor: &mut dyn FnMut(E)) {
        trace!("push traversal over {:?}", self);
        self.push(visitor);
    }

    pub(crate) fn cursor(&self) -> Box<dyn Cursor<E> + 'a> {
        match &self.node {
            Node::Realized(storage) => storage.cursor(),
            Node::Derived(stage) => stage.cursor(),
        }
    }

    /// 打开一个拉取迭代器。
    pub fn begin(&self) -> ViewIter<'a, E> {
        trace!("pull iterator over {:?}", self);
        ViewIter::new(self.cursor())
    }

    pub fn iter(&self) -> ViewIter<'a, E> {
        self.begin()
    }
}

/// 输出流水线的结构，例如`Map(Filter(Root[Owned; 5]))`，不要求元素实现`Debug`。
impl<E> fmt::Debug for View<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Node::Realized(storage) => write!(f, "Root[{:?}; {}]", storage.ownership(), storage.size()),
            Node::Derived(stage) => stage.describe(f),
        }
    }
}

impl<'a, E: Clone + 'a> IntoIterator for View<'a, E> {
    type Item = E;
    type IntoIter = ViewIter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

impl<'a, E: Clone + 'a> IntoIterator for &View<'a, E> {
    type Item = E;
    type IntoIter = ViewIter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Ownership, StageKind, wrap, wrap_ref};

    #[test]
    fn test_combinators_are_lazy() {
        let calls = std::cell::Cell::new(0);
        let view = wrap([1, 2, 3]).map(|i| {
            calls.set(calls.get() + 1);
            i + 1
        });
        let view = view.filter(|i| i % 2 == 0);
        assert_eq!(calls.get(), 0);
        assert_eq!(view.evaluate(), vec![2, 4]);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_kind_and_ownership() {
        let v = vec![1, 2, 3];
        let root = wrap_ref(&v);
        assert_eq!(root.kind(), StageKind::Root);
        assert_eq!(root.ownership(), Some(Ownership::Borrowed));
        assert_eq!(root.filter(|_| true).kind(), StageKind::Filter);
        assert_eq!(root.map(|i| i + 1).kind(), StageKind::Map);
        assert_eq!(root.flat_map(|i| vec![i]).kind(), StageKind::FlatMap);
        assert_eq!(root.skip_until(|_| true).kind(), StageKind::Skip);
        assert_eq!(root.drop(1).kind(), StageKind::Skip);
        assert_eq!(root.keep_while(|_| true).kind(), StageKind::Keep);
        assert_eq!(root.zip(&root).kind(), StageKind::Zip);
        assert_eq!(root.map(|i| i + 1).ownership(), None);
        assert!(!root.map(|i| i + 1).is_realized());
    }

    #[test]
    fn test_debug_shape() {
        let v = vec![1, 2, 3, 4, 5];
        let view = wrap(v.clone()).filter(|i| i % 2 == 0).map(|i| i * 2);
        assert_eq!(format!("{:?}", view), "Map(Filter(Root[Owned; 5]))");
        let zipped = view.zip(&wrap_ref(&v).drop(1));
        assert_eq!(format!("{:?}", zipped), "Zip(Map(Filter(Root[Owned; 5])), Skip(Root[Borrowed; 5]))");
    }

    #[test]
    fn test_parent_reused() {
        let root = wrap([1, 2, 3, 4]);
        let evens = root.filter(|i| i % 2 == 0);
        let odds = root.filter(|i| i % 2 != 0);
        assert_eq!(evens.evaluate(), vec![2, 4]);
        assert_eq!(odds.evaluate(), vec![1, 3]);
        assert_eq!(root.evaluate(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_into_iterator() {
        let view = wrap([1, 2, 3, 4, 5]).filter(|i| i % 2 == 0);
        let mut count = 0;
        let mut sum = 0;
        for i in &view {
            count += 1;
            sum += i;
        }
        assert_eq!(count, 2);
        assert_eq!(sum, 6);
        assert_eq!(view.into_iter().collect::<Vec<_>>(), vec![2, 4]);
    }
}
