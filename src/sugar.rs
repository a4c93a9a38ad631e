//! 运算符形式的组合方法：`%`过滤，`*`映射，`/`归约，`>>`逐个访问或追加到容器，`+`配对。
//!
//! 运算符的闭包参数需要写明类型，例如`view % |i: &i32| i % 2 == 0`。

use crate::view::View;
use std::ops::{Add, Div, Mul, Rem, Shr};

impl<'a, E, F> Rem<F> for View<'a, E>
where
    E: Clone + 'a,
    F: Fn(&E) -> bool + 'a,
{
    type Output = View<'a, E>;

    fn rem(self, pred: F) -> View<'a, E> {
        self.filter(pred)
    }
}

impl<'a, E, U, F> Mul<F> for View<'a, E>
where
    E: Clone + 'a,
    U: Clone + 'a,
    F: Fn(E) -> U + 'a,
{
    type Output = View<'a, U>;

    fn mul(self, f: F) -> View<'a, U> {
        self.map(f)
    }
}

impl<'a, E, F> Div<F> for View<'a, E>
where
    E: Clone + 'a,
    F: FnMut(E, E) -> E,
{
    type Output = Option<E>;

    fn div(self, g: F) -> Option<E> {
        self.reduce(g)
    }
}

/// 访问后返回视图本身，便于继续链式调用。
impl<'a, E, F> Shr<F> for View<'a, E>
where
    E: Clone + 'a,
    F: FnMut(E),
{
    type Output = View<'a, E>;

    fn shr(self, g: F) -> View<'a, E> {
        self.for_each(g);
        self
    }
}

/// 追加目标，`view >> Sink(&mut out)`等价于`view.evaluate_into(&mut out)`。
pub struct Sink<'s, S>(pub &'s mut S);

impl<'a, E, S> Shr<Sink<'_, S>> for View<'a, E>
where
    E: Clone + 'a,
    S: Extend<E>,
{
    type Output = View<'a, E>;

    fn shr(self, sink: Sink<'_, S>) -> View<'a, E> {
        self.evaluate_into(sink.0);
        self
    }
}

impl<'a, A, B> Add<View<'a, B>> for View<'a, A>
where
    A: Clone + 'a,
    B: Clone + 'a,
{
    type Output = View<'a, (A, B)>;

    fn add(self, other: View<'a, B>) -> View<'a, (A, B)> {
        self.zip(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::Sink;
    use crate::wrap;

    #[test]
    fn test_operators() {
        let scale = |i: i32| if i < 4 { i * 10 } else { i };
        let even = |i: &i32| i % 2 == 0;
        let max = |m: i32, i: i32| m.max(i);

        assert_eq!(wrap([1, 2, 3, 4, 5]) * scale % even / max, Some(30));
        assert_eq!(wrap([1, 2, 3, 4, 5]) % even * scale / max, Some(20));
        assert_eq!(wrap(Vec::<i32>::new()) % even / max, None);
    }

    #[test]
    fn test_shr_for_each() {
        let mut seen = Vec::new();
        let view = wrap([1, 2]) >> |i: i32| seen.push(i);
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(view.size(), 2);
    }

    #[test]
    fn test_shr_sink_appends() {
        let mut out = vec![0];
        let big = |i: &i32| *i > 1;
        let view = wrap([1, 2, 3]) % big >> Sink(&mut out);
        assert_eq!(out, vec![0, 2, 3]);
        let _ = view >> Sink(&mut out);
        assert_eq!(out, vec![0, 2, 3, 2, 3]);
    }

    #[test]
    fn test_add_zip() {
        let zipped = wrap([1, 2, 3]) + wrap(['a', 'b']);
        assert_eq!(zipped.evaluate(), vec![(1, 'a'), (2, 'b')]);
    }
}
