//! 惰性视图流水线：包装已有集合，链式组合过滤、映射、展开、跳过、保留、配对等变换，
//! 在终结操作或拉取迭代器时才真正求值。

mod cursor;
mod err;
mod input;
mod output;
mod range;
mod reduce;
mod seq;
mod stage;
mod sugar;
mod view;

pub use cursor::ViewIter;
pub use err::ViewErr;
pub use input::{Ownership, wrap, wrap_ref};
pub use range::{Progression, ProgressionIter};
pub use seq::Sequence;
pub use stage::StageKind;
pub use sugar::Sink;
pub use view::View;

/// 整数类型
pub type Integer = i64;

pub type ViewRes<T> = Result<T, ViewErr>;
