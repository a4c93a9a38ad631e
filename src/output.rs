use crate::view::View;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, LinkedList, VecDeque};
use std::hash::Hash;

impl<'a, E: Clone + 'a> View<'a, E> {
    /// 求值为`Vec`。已物化的根视图直接返回其数据的副本。
    pub fn evaluate(&self) -> Vec<E> {
        if let Some(storage) = self.storage() {
            return storage.to_vec();
        }
        let mut out = Vec::new();
        self.evaluate_into(&mut out);
        out
    }

    pub fn as_sequence(&self) -> Vec<E> {
        self.evaluate()
    }

    pub fn as_deque(&self) -> VecDeque<E> {
        self.materialize()
    }

    pub fn as_list(&self) -> LinkedList<E> {
        self.materialize()
    }

    /// 逐个插入哈希集合，不保留顺序。与[`View::distinct`]不同，这里天然去除所有重复值。
    pub fn as_set(&self) -> FxHashSet<E>
    where
        E: Eq + Hash,
    {
        self.materialize()
    }

    pub fn as_ordered_set(&self) -> BTreeSet<E>
    where
        E: Ord,
    {
        self.materialize()
    }

    /// 求值到任意可扩展的容器
    pub fn materialize<C: Default + Extend<E>>(&self) -> C {
        let mut out = C::default();
        self.evaluate_into(&mut out);
        out
    }

    /// 将存活的元素追加到`sink`末尾，不清空`sink`原有内容。
    pub fn evaluate_into<S: Extend<E>>(&self, sink: &mut S) {
        self.traverse(&mut |e| sink.extend(std::iter::once(e)));
    }

    /// 求值后按`cmp`排序，不影响视图本身。
    pub fn sort_by<C>(&self, cmp: C) -> Vec<E>
    where
        C: FnMut(&E, &E) -> Ordering,
    {
        self.evaluate().into_iter().sorted_by(cmp).collect()
    }

    pub fn sorted(&self) -> Vec<E>
    where
        E: Ord,
    {
        self.sort_by(Ord::cmp)
    }

    /// 求值后去除**相邻**的重复元素，不是全局去重；需要全局去重时先排序。
    pub fn distinct_by<Q>(&self, mut eq: Q) -> Vec<E>
    where
        Q: FnMut(&E, &E) -> bool,
    {
        self.evaluate().into_iter().dedup_by(|a, b| eq(a, b)).collect()
    }

    pub fn distinct(&self) -> Vec<E>
    where
        E: PartialEq,
    {
        self.evaluate().into_iter().dedup().collect()
    }
}

/// 元素为二元组的视图才能求值为映射，键值类型可以转换为目标类型。
impl<'a, K, V> View<'a, (K, V)>
where
    K: Clone + 'a,
    V: Clone + 'a,
{
    /// 重复的键以后出现的值为准
    pub fn as_mapping<MK, MV>(&self) -> FxHashMap<MK, MV>
    where
        K: Into<MK>,
        V: Into<MV>,
        MK: Eq + Hash,
    {
        let mut out: FxHashMap<MK, MV> = FxHashMap::default();
        self.traverse(&mut |(k, v)| {
            out.insert(k.into(), v.into());
        });
        out
    }

    pub fn as_ordered_mapping<MK, MV>(&self) -> BTreeMap<MK, MV>
    where
        K: Into<MK>,
        V: Into<MV>,
        MK: Ord,
    {
        let mut out: BTreeMap<MK, MV> = BTreeMap::new();
        self.traverse(&mut |(k, v)| {
            out.insert(k.into(), v.into());
        });
        out
    }
}
