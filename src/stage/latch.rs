use crate::cursor::Cursor;
use crate::stage::{Stage, StageKind};
use crate::view::View;
use log::trace;
use std::fmt;
use std::rc::Rc;

/// 单次触发的判断条件。
///
/// `Scratch`是每次遍历私有的草稿状态，在遍历（或游标）开始时由`scratch()`重新生成，
/// 不保存在视图中。
pub(crate) trait Trigger<E> {
    type Scratch;

    fn scratch(&self) -> Self::Scratch;

    fn fire(&self, scratch: &mut Self::Scratch, e: &E) -> bool;
}

/// 普通谓词
pub(crate) struct Pred<F>(pub(crate) F);

impl<E, F: Fn(&E) -> bool> Trigger<E> for Pred<F> {
    type Scratch = ();

    fn scratch(&self) {}

    fn fire(&self, _: &mut (), e: &E) -> bool {
        (self.0)(e)
    }
}

/// 倒数计数：前`n`次为假，之后恒为真。
pub(crate) struct Countdown(pub(crate) usize);

impl<E> Trigger<E> for Countdown {
    type Scratch = usize;

    fn scratch(&self) -> usize {
        self.0
    }

    fn fire(&self, left: &mut usize, _: &E) -> bool {
        if *left == 0 {
            true
        } else {
            *left -= 1;
            false
        }
    }
}

/* **************************************** 跳过 **************************************** */

pub(crate) struct SkipUntil<'a, E, T> {
    pub(crate) parent: View<'a, E>,
    pub(crate) trigger: Rc<T>,
}

impl<'a, E, T> Stage<'a, E> for SkipUntil<'a, E, T>
where
    E: Clone + 'a,
    T: Trigger<E> + 'a,
    T::Scratch: 'a,
{
    fn kind(&self) -> StageKind {
        StageKind::Skip
    }

    fn push(&self, visitor: &mut dyn FnMut(E)) {
        let mut scratch = self.trigger.scratch();
        let mut passed = false;
        self.parent.push(&mut |e| {
            if !passed {
                if !self.trigger.fire(&mut scratch, &e) {
                    return;
                }
                trace!("skip latch passed");
                passed = true;
            }
            visitor(e);
        });
    }

    // 越过开头的整段后，剩余部分就是父游标本身，之后无条件前进
    fn cursor(&self) -> Box<dyn Cursor<E> + 'a> {
        let mut parent = self.parent.cursor();
        let mut scratch = self.trigger.scratch();
        while !parent.at_end() && !self.trigger.fire(&mut scratch, &parent.current()) {
            parent.advance();
        }
        parent
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind(), self.parent)
    }
}

/* **************************************** 保留 **************************************** */

pub(crate) struct KeepWhile<'a, E, T> {
    pub(crate) parent: View<'a, E>,
    pub(crate) trigger: Rc<T>,
}

impl<'a, E, T> Stage<'a, E> for KeepWhile<'a, E, T>
where
    E: Clone + 'a,
    T: Trigger<E> + 'a,
    T::Scratch: 'a,
{
    fn kind(&self) -> StageKind {
        StageKind::Keep
    }

    fn push(&self, visitor: &mut dyn FnMut(E)) {
        let mut scratch = self.trigger.scratch();
        let mut keeping = true;
        self.parent.push(&mut |e| {
            if !keeping {
                return;
            }
            if !self.trigger.fire(&mut scratch, &e) {
                trace!("keep latch closed");
                keeping = false;
                return;
            }
            visitor(e);
        });
    }

    fn cursor(&self) -> Box<dyn Cursor<E> + 'a> {
        Box::new(KeepCursor::new(self.parent.cursor(), self.trigger.clone()))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind(), self.parent)
    }
}

struct KeepCursor<'a, E, T: Trigger<E>> {
    parent: Box<dyn Cursor<E> + 'a>,
    trigger: Rc<T>,
    scratch: T::Scratch,
    closed: bool,
}

impl<'a, E, T: Trigger<E>> KeepCursor<'a, E, T> {
    fn new(parent: Box<dyn Cursor<E> + 'a>, trigger: Rc<T>) -> Self {
        let scratch = trigger.scratch();
        let mut cursor = KeepCursor { parent, trigger, scratch, closed: false };
        cursor.check();
        cursor
    }

    fn check(&mut self) {
        if !self.closed && !self.parent.at_end() && !self.trigger.fire(&mut self.scratch, &self.parent.current()) {
            self.closed = true;
        }
    }
}

impl<E, T: Trigger<E>> Cursor<E> for KeepCursor<'_, E, T> {
    fn at_end(&self) -> bool {
        self.closed || self.parent.at_end()
    }

    fn current(&self) -> E {
        self.parent.current()
    }

    // 关闭后永久停在末尾
    fn advance(&mut self) {
        if self.closed {
            return;
        }
        self.parent.advance();
        self.check();
    }
}
