use crate::Integer;
use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum ViewErr {
    #[error("[Iterator] Call `{op}` on an iterator which is already at end")]
    AtEnd { op: &'static str },

    #[error("[Reduce] Call `{op}` on an empty view")]
    Empty { op: &'static str },

    #[error("[Progression] Step of progression `{start}..{end}` must not be zero")]
    ZeroStep { start: Integer, end: Integer },
}

impl ViewErr {
    /// 前置条件被破坏，属于调用方的编程错误，直接终止当前遍历。
    pub fn termination(self) -> ! {
        panic!("{}", self)
    }
}
