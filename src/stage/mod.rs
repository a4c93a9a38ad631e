pub(crate) mod flat_map;
pub(crate) mod latch;
pub(crate) mod zip;

use crate::cursor::Cursor;
use crate::view::View;
use std::fmt;
use std::rc::Rc;

/// 阶段类型
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum StageKind {
    /// 已物化的根视图
    Root,
    Filter,
    Map,
    FlatMap,
    /// `skip_until`和`drop`
    Skip,
    /// `keep_while`
    Keep,
    Zip,
    /// 归约时的直通阶段，累加由调用方的访问函数完成。
    FoldLeft,
}

/// 派生视图的一级，同时实现推送和拉取两种求值方式，二者必须产生相同的元素序列。
///
/// 仅在本crate内实现，变体集合是封闭的。
pub(crate) trait Stage<'a, E> {
    fn kind(&self) -> StageKind;

    /// 驱动父视图推送元素，经过本阶段的策略后交给`visitor`。
    fn push(&self, visitor: &mut dyn FnMut(E));

    /// 包装父视图的游标。
    fn cursor(&self) -> Box<dyn Cursor<E> + 'a>;

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/* **************************************** 过滤 **************************************** */

pub(crate) struct Filter<'a, E, F> {
    pub(crate) parent: View<'a, E>,
    pub(crate) pred: Rc<F>,
}

impl<'a, E, F> Stage<'a, E> for Filter<'a, E, F>
where
    E: Clone + 'a,
    F: Fn(&E) -> bool + 'a,
{
    fn kind(&self) -> StageKind {
        StageKind::Filter
    }

    fn push(&self, visitor: &mut dyn FnMut(E)) {
        self.parent.push(&mut |e| {
            if (*self.pred)(&e) {
                visitor(e)
            }
        });
    }

    fn cursor(&self) -> Box<dyn Cursor<E> + 'a> {
        Box::new(FilterCursor::new(self.parent.cursor(), self.pred.clone()))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind(), self.parent)
    }
}

struct FilterCursor<'a, E, F> {
    parent: Box<dyn Cursor<E> + 'a>,
    pred: Rc<F>,
}

impl<'a, E, F: Fn(&E) -> bool> FilterCursor<'a, E, F> {
    fn new(parent: Box<dyn Cursor<E> + 'a>, pred: Rc<F>) -> Self {
        let mut cursor = FilterCursor { parent, pred };
        cursor.settle();
        cursor
    }

    // 越过所有不满足条件的元素，使当前元素总是满足条件
    fn settle(&mut self) {
        while !self.parent.at_end() && !(*self.pred)(&self.parent.current()) {
            self.parent.advance();
        }
    }
}

impl<E, F: Fn(&E) -> bool> Cursor<E> for FilterCursor<'_, E, F> {
    fn at_end(&self) -> bool {
        self.parent.at_end()
    }

    fn current(&self) -> E {
        self.parent.current()
    }

    fn advance(&mut self) {
        self.parent.advance();
        self.settle();
    }
}

/* **************************************** 映射 **************************************** */

pub(crate) struct Map<'a, E, F> {
    pub(crate) parent: View<'a, E>,
    pub(crate) f: Rc<F>,
}

impl<'a, E, U, F> Stage<'a, U> for Map<'a, E, F>
where
    E: Clone + 'a,
    F: Fn(E) -> U + 'a,
{
    fn kind(&self) -> StageKind {
        StageKind::Map
    }

    fn push(&self, visitor: &mut dyn FnMut(U)) {
        self.parent.push(&mut |e| visitor((*self.f)(e)));
    }

    fn cursor(&self) -> Box<dyn Cursor<U> + 'a> {
        Box::new(MapCursor { parent: self.parent.cursor(), f: self.f.clone() })
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Map({:?})", self.parent)
    }
}

struct MapCursor<'a, E, F> {
    parent: Box<dyn Cursor<E> + 'a>,
    f: Rc<F>,
}

impl<E, U, F: Fn(E) -> U> Cursor<U> for MapCursor<'_, E, F> {
    fn at_end(&self) -> bool {
        self.parent.at_end()
    }

    // 每次取值都重新计算
    fn current(&self) -> U {
        (*self.f)(self.parent.current())
    }

    fn advance(&mut self) {
        self.parent.advance();
    }
}

/* **************************************** 归约 **************************************** */

/// 归约使用的直通阶段，由`fold_left`临时构造。
pub(crate) struct FoldLeft<'a, E> {
    pub(crate) parent: View<'a, E>,
}

impl<'a, E: Clone + 'a> Stage<'a, E> for FoldLeft<'a, E> {
    fn kind(&self) -> StageKind {
        StageKind::FoldLeft
    }

    fn push(&self, visitor: &mut dyn FnMut(E)) {
        self.parent.traverse(visitor);
    }

    fn cursor(&self) -> Box<dyn Cursor<E> + 'a> {
        self.parent.cursor()
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FoldLeft({:?})", self.parent)
    }
}
