use crate::cursor::Cursor;
use crate::stage::{Stage, StageKind};
use crate::view::View;
use std::fmt;

/// 两个视图按位置配对。两侧都以游标同步拉取，不缓存任何一侧。
pub(crate) struct Zip<'a, A, B> {
    pub(crate) left: View<'a, A>,
    pub(crate) right: View<'a, B>,
}

impl<'a, A, B> Stage<'a, (A, B)> for Zip<'a, A, B>
where
    A: Clone + 'a,
    B: Clone + 'a,
{
    fn kind(&self) -> StageKind {
        StageKind::Zip
    }

    fn push(&self, visitor: &mut dyn FnMut((A, B))) {
        let mut cursor = self.cursor();
        while !cursor.at_end() {
            visitor(cursor.current());
            cursor.advance();
        }
    }

    fn cursor(&self) -> Box<dyn Cursor<(A, B)> + 'a> {
        Box::new(ZipCursor { left: self.left.cursor(), right: self.right.cursor() })
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zip({:?}, {:?})", self.left, self.right)
    }
}

struct ZipCursor<'a, A, B> {
    left: Box<dyn Cursor<A> + 'a>,
    right: Box<dyn Cursor<B> + 'a>,
}

impl<A, B> Cursor<(A, B)> for ZipCursor<'_, A, B> {
    fn at_end(&self) -> bool {
        self.left.at_end() || self.right.at_end()
    }

    fn current(&self) -> (A, B) {
        (self.left.current(), self.right.current())
    }

    fn advance(&mut self) {
        self.left.advance();
        self.right.advance();
    }
}
