use crate::err::ViewErr;
use crate::stage::{FoldLeft, Stage};
use crate::view::View;
use crate::ViewRes;
use std::iter::{Product, Sum};
use std::ops::{Add, Mul};

/// 终结操作：都会完整推送遍历一次整条链，只有`first`通过拉取迭代器在第一个元素处停止。
///
/// 空视图上的`reduce`/`first`/`last`/`min`/`max`返回`None`，对应的`try_*`版本返回[`ViewErr::Empty`]。
impl<'a, E: Clone + 'a> View<'a, E> {
    pub fn fold_left<T, G>(&self, init: T, mut g: G) -> T
    where
        G: FnMut(T, E) -> T,
    {
        let stage = FoldLeft { parent: self.clone() };
        let mut acc = Some(init);
        stage.push(&mut |e| acc = acc.take().map(|prev| g(prev, e)));
        match acc {
            Some(acc) => acc,
            None => unreachable!("accumulator is refilled after every element"),
        }
    }

    /// 以第一个元素为初值从左归约
    pub fn reduce<G>(&self, mut g: G) -> Option<E>
    where
        G: FnMut(E, E) -> E,
    {
        self.fold_left(None, |acc, e| match acc {
            None => Some(e),
            Some(acc) => Some(g(acc, e)),
        })
    }

    pub fn try_reduce<G>(&self, g: G) -> ViewRes<E>
    where
        G: FnMut(E, E) -> E,
    {
        self.reduce(g).ok_or(ViewErr::Empty { op: "reduce" })
    }

    pub fn for_each<G: FnMut(E)>(&self, mut g: G) {
        self.traverse(&mut g);
    }

    /// 空视图返回加法单位元
    pub fn sum(&self) -> E
    where
        E: Add<Output = E> + Sum<E>,
    {
        self.reduce(|s, e| s + e).unwrap_or_else(|| std::iter::empty::<E>().sum())
    }

    /// 空视图返回乘法单位元
    pub fn product(&self) -> E
    where
        E: Mul<Output = E> + Product<E>,
    {
        self.reduce(|p, e| p * e).unwrap_or_else(|| std::iter::empty::<E>().product())
    }

    pub fn first(&self) -> Option<E> {
        self.begin().next()
    }

    pub fn try_first(&self) -> ViewRes<E> {
        self.first().ok_or(ViewErr::Empty { op: "first" })
    }

    pub fn last(&self) -> Option<E> {
        self.fold_left(None, |_, e| Some(e))
    }

    pub fn try_last(&self) -> ViewRes<E> {
        self.last().ok_or(ViewErr::Empty { op: "last" })
    }

    /// 相等时保留先出现的元素
    pub fn min(&self) -> Option<E>
    where
        E: PartialOrd,
    {
        self.reduce(|m, e| if e < m { e } else { m })
    }

    pub fn try_min(&self) -> ViewRes<E>
    where
        E: PartialOrd,
    {
        self.min().ok_or(ViewErr::Empty { op: "min" })
    }

    /// 相等时保留先出现的元素
    pub fn max(&self) -> Option<E>
    where
        E: PartialOrd,
    {
        self.reduce(|m, e| if e > m { e } else { m })
    }

    pub fn try_max(&self) -> ViewRes<E>
    where
        E: PartialOrd,
    {
        self.max().ok_or(ViewErr::Empty { op: "max" })
    }

    pub fn size(&self) -> usize {
        self.fold_left(0, |n, _| n + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.begin().at_end()
    }

    /// 所有元素都满足`pred`时为真；出现第一个不满足的元素后不再调用`pred`，但仍遍历完整条链。
    pub fn for_all<G>(&self, pred: G) -> bool
    where
        G: Fn(&E) -> bool,
    {
        self.fold_left(true, |all, e| all && pred(&e))
    }
}
