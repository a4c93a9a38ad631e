use crate::err::ViewErr;
use crate::ViewRes;
use std::rc::Rc;

/// 拉取式游标，每一级视图的游标包装其父视图的游标。
///
/// 调用方保证只在`at_end()`为假时调用`current()`和`advance()`，越界检查统一由[`ViewIter`]完成。
pub(crate) trait Cursor<E> {
    fn at_end(&self) -> bool;
    fn current(&self) -> E;
    fn advance(&mut self);
}

/// 在普通迭代器上预取一个元素，提供游标语义。
pub(crate) struct Lookahead<I: Iterator> {
    iter: I,
    head: Option<I::Item>,
}

impl<I: Iterator> Lookahead<I> {
    pub(crate) fn new(mut iter: I) -> Self {
        let head = iter.next();
        Lookahead { iter, head }
    }
}

impl<I> Cursor<I::Item> for Lookahead<I>
where
    I: Iterator,
    I::Item: Clone,
{
    fn at_end(&self) -> bool {
        self.head.is_none()
    }

    fn current(&self) -> I::Item {
        match &self.head {
            Some(head) => head.clone(),
            None => ViewErr::AtEnd { op: "current" }.termination(),
        }
    }

    fn advance(&mut self) {
        self.head = self.iter.next();
    }
}

/// 自有数据根视图的游标，与视图共享同一份数据。
pub(crate) struct SharedCursor<E> {
    data: Rc<[E]>,
    pos: usize,
}

impl<E> SharedCursor<E> {
    pub(crate) fn new(data: Rc<[E]>) -> Self {
        SharedCursor { data, pos: 0 }
    }
}

impl<E: Clone> Cursor<E> for SharedCursor<E> {
    fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn current(&self) -> E {
        match self.data.get(self.pos) {
            Some(e) => e.clone(),
            None => ViewErr::AtEnd { op: "current" }.termination(),
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

/// 视图的外部迭代器。
///
/// 既可以按`at_end`/`current`/`advance`逐步驱动，也可以作为普通的[`Iterator`]使用，
/// 两种方式产生的元素序列与[`crate::View::evaluate`]完全一致。
pub struct ViewIter<'a, E> {
    cursor: Box<dyn Cursor<E> + 'a>,
}

impl<'a, E> ViewIter<'a, E> {
    pub(crate) fn new(cursor: Box<dyn Cursor<E> + 'a>) -> Self {
        ViewIter { cursor }
    }

    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// 当前元素，迭代器已到末尾时终止。
    pub fn current(&self) -> E {
        self.try_current().unwrap_or_else(|err| err.termination())
    }

    pub fn try_current(&self) -> ViewRes<E> {
        if self.cursor.at_end() { Err(ViewErr::AtEnd { op: "current" }) } else { Ok(self.cursor.current()) }
    }

    /// 前进一个元素，迭代器已到末尾时终止。
    pub fn advance(&mut self) {
        if self.cursor.at_end() {
            ViewErr::AtEnd { op: "advance" }.termination();
        }
        self.cursor.advance();
    }
}

impl<E> Iterator for ViewIter<'_, E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.at_end() {
            return None;
        }
        let e = self.cursor.current();
        self.cursor.advance();
        Some(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookahead() {
        let mut c = Lookahead::new(vec![1, 2].into_iter());
        assert!(!c.at_end());
        assert_eq!(c.current(), 1);
        assert_eq!(c.current(), 1);
        c.advance();
        assert_eq!(c.current(), 2);
        c.advance();
        assert!(c.at_end());
    }

    #[test]
    fn test_shared_cursor() {
        let data: Rc<[i32]> = Rc::from(vec![5, 6]);
        let mut a = SharedCursor::new(data.clone());
        let b = SharedCursor::new(data);
        a.advance();
        assert_eq!(a.current(), 6);
        assert_eq!(b.current(), 5);
        a.advance();
        assert!(a.at_end());
        assert!(!b.at_end());
    }

    #[test]
    fn test_view_iter_checked() {
        let mut it = ViewIter::<i32>::new(Box::new(Lookahead::new(std::iter::once(7))));
        assert_eq!(it.try_current(), Ok(7));
        it.advance();
        assert!(it.at_end());
        assert_eq!(it.try_current(), Err(ViewErr::AtEnd { op: "current" }));
        assert_eq!(it.next(), None);
    }

    #[test]
    #[should_panic(expected = "already at end")]
    fn test_view_iter_current_at_end() {
        let it = ViewIter::<i32>::new(Box::new(Lookahead::new(std::iter::empty::<i32>())));
        it.current();
    }

    #[test]
    #[should_panic(expected = "Call `advance`")]
    fn test_view_iter_advance_at_end() {
        let mut it = ViewIter::<i32>::new(Box::new(Lookahead::new(std::iter::empty::<i32>())));
        it.advance();
    }
}
