use crate::err::ViewErr;
use crate::seq::Sequence;
use crate::{Integer, ViewRes};

/// 等差数列：从`start`开始（包含），按`step`递进，直到`end`（不包含）。
///
/// 步长为正时正序生成，为负时逆序生成；起止方向与步长不一致时为空数列。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Progression {
    start: Integer,
    end: Integer,
    step: Integer,
}

impl Progression {
    pub fn new(start: Integer, end: Integer, step: Integer) -> ViewRes<Progression> {
        if step == 0 {
            Err(ViewErr::ZeroStep { start, end })
        } else {
            Ok(Progression { start, end, step })
        }
    }

    /// 步长为1的数列
    pub fn up_to(start: Integer, end: Integer) -> Progression {
        Progression { start, end, step: 1 }
    }

    pub fn is_empty(&self) -> bool {
        if self.step > 0 { self.start >= self.end } else { self.start <= self.end }
    }

    pub fn size(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.start.abs_diff(self.end).div_ceil(self.step.unsigned_abs()) as usize
        }
    }

    pub fn begin(&self) -> ProgressionIter {
        ProgressionIter { next: if self.is_empty() { None } else { Some(self.start) }, end: self.end, step: self.step }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProgressionIter {
    next: Option<Integer>,
    end: Integer,
    step: Integer,
}

impl ProgressionIter {
    pub fn at_end(&self) -> bool {
        self.next.is_none()
    }

    pub fn current(&self) -> Integer {
        match self.next {
            Some(value) => value,
            None => ViewErr::AtEnd { op: "current" }.termination(),
        }
    }

    pub fn advance(&mut self) {
        let Some(value) = self.next else { ViewErr::AtEnd { op: "advance" }.termination() };
        // 溢出即视为越过终点
        self.next = value
            .checked_add(self.step)
            .filter(|next| if self.step > 0 { *next < self.end } else { *next > self.end });
    }
}

impl Iterator for ProgressionIter {
    type Item = Integer;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.next?;
        self.advance();
        Some(value)
    }
}

impl IntoIterator for Progression {
    type Item = Integer;
    type IntoIter = ProgressionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

impl IntoIterator for &Progression {
    type Item = Integer;
    type IntoIter = ProgressionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

impl Sequence for Progression {
    type Elem = Integer;

    fn walk(&self) -> Box<dyn Iterator<Item = Integer> + '_> {
        Box::new(self.begin())
    }

    fn size(&self) -> usize {
        Progression::size(self)
    }

    fn is_empty(&self) -> bool {
        Progression::is_empty(self)
    }
}
