use crate::pipe::Pipe;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::fmt::Debug;

/// 数值类型，数值序列的归约依赖于此。
pub trait Numeric: Copy + Default + 'static {
    /// 汇总统计使用的累加类型，比`Self`更宽，避免平均值溢出
    type Wide: Copy + Default + Debug + PartialEq;

    /// 累加，整数溢出时回绕
    fn add(self, other: Self) -> Self;

    fn add_wide(wide: Self::Wide, n: Self) -> Self::Wide;

    fn wide_to_f64(wide: Self::Wide) -> f64;

    /// 全序比较，浮点数按照`OrderedFloat`排序（NaN最大）
    fn order(&self, other: &Self) -> Ordering;
}

impl Numeric for f64 {
    type Wide = f64;

    fn add(self, other: Self) -> Self {
        self + other
    }

    fn add_wide(wide: f64, n: Self) -> f64 {
        wide + n
    }

    fn wide_to_f64(wide: f64) -> f64 {
        wide
    }

    fn order(&self, other: &Self) -> Ordering {
        OrderedFloat(*self).cmp(&OrderedFloat(*other))
    }
}

impl Numeric for i32 {
    type Wide = i64;

    fn add(self, other: Self) -> Self {
        self.wrapping_add(other)
    }

    fn add_wide(wide: i64, n: Self) -> i64 {
        wide.wrapping_add(n as i64)
    }

    fn wide_to_f64(wide: i64) -> f64 {
        wide as f64
    }

    fn order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Numeric for i64 {
    type Wide = i128;

    fn add(self, other: Self) -> Self {
        self.wrapping_add(other)
    }

    fn add_wide(wide: i128, n: Self) -> i128 {
        wide.wrapping_add(n as i128)
    }

    fn wide_to_f64(wide: i128) -> f64 {
        wide as f64
    }

    fn order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// 数值序列的汇总统计，`sum`以[`Numeric::Wide`]累加
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumStats<N: Numeric> {
    pub count: u64,
    pub sum: N::Wide,
    pub min: Option<N>,
    pub max: Option<N>,
}

impl<N: Numeric> NumStats<N> {
    fn accept(mut self, n: N) -> Self {
        self.count += 1;
        self.sum = N::add_wide(self.sum, n);
        self.min = Some(match self.min {
            Some(min) if min.order(&n) != Ordering::Greater => min,
            _ => n,
        });
        self.max = Some(match self.max {
            Some(max) if max.order(&n) != Ordering::Less => max,
            _ => n,
        });
        self
    }

    /// 平均值，空序列时为`None`
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 { None } else { Some(N::wide_to_f64(self.sum) / self.count as f64) }
    }
}

impl<N: Numeric> Default for NumStats<N> {
    fn default() -> Self {
        NumStats { count: 0, sum: N::Wide::default(), min: None, max: None }
    }
}

impl<N: Numeric> Pipe<'_, N> {
    pub fn sum(self) -> N {
        self.iter.fold(N::default(), N::add)
    }

    pub fn average(self) -> Option<f64> {
        self.statistics().average()
    }

    pub fn max(self) -> Option<N> {
        self.iter.max_by(N::order)
    }

    pub fn min(self) -> Option<N> {
        self.iter.min_by(N::order)
    }

    pub fn statistics(self) -> NumStats<N> {
        self.iter.fold(NumStats::default(), NumStats::accept)
    }
}
