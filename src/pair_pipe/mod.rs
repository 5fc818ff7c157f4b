mod source;
mod terminal;

use crate::pair::Pair;
use crate::pipe::{Deferred, Pipe};
use crate::step::Step;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use tracing::trace;

type PairIter<'a, K, V> = Box<dyn Iterator<Item = Pair<K, V>> + 'a>;

/// 键值对流水线
///
/// 中间操作消费当前流水线并返回新的流水线，不会拉取任何元素；终结操作消费流水线并触发求值。
/// 所有操作都以值接收`self`，已被消费的流水线无法再次使用：
///
/// ```compile_fail
/// use pairpipe::PairPipe;
///
/// let pipe = PairPipe::of(1, "a");
/// assert_eq!(1, pipe.count());
/// pipe.count();
/// ```
pub struct PairPipe<'a, K, V> {
    iter: PairIter<'a, K, V>,
    steps: Vec<Step>,
}

impl<'a, K: 'a, V: 'a> PairPipe<'a, K, V> {
    pub(crate) fn source(name: &'static str, iter: impl Iterator<Item = Pair<K, V>> + 'a) -> Self {
        PairPipe { iter: Box::new(iter), steps: vec![Step::Source(name)] }
    }

    fn then<RK, RV, I>(self, step: Step, wrap: impl FnOnce(PairIter<'a, K, V>) -> I) -> PairPipe<'a, RK, RV>
    where
        I: Iterator<Item = Pair<RK, RV>> + 'a,
    {
        let PairPipe { iter, mut steps } = self;
        steps.push(step);
        PairPipe { iter: Box::new(wrap(iter)), steps }
    }

    /// 构成流水线的步骤，第一个总是数据来源
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn describe(&self) -> String {
        self.steps.iter().join(" -> ")
    }

    /// 去重，保留首次出现的键值对
    pub fn distinct(self) -> Self
    where
        K: Eq + Hash + Clone,
        V: Eq + Hash + Clone,
    {
        let mut seen = FxHashSet::default();
        self.then(Step::Distinct, move |iter| iter.filter(move |pair| seen.insert(pair.clone())))
    }

    pub fn peek(self, mut action: impl FnMut(&K, &V) + 'a) -> Self {
        self.then(Step::Peek, move |iter| iter.inspect(move |pair| action(pair.key(), pair.value())))
    }

    pub fn skip(self, n: usize) -> Self {
        self.then(Step::Skip(n), |iter| iter.skip(n))
    }

    pub fn limit(self, max_size: usize) -> Self {
        self.then(Step::Limit(max_size), |iter| iter.take(max_size))
    }

    pub fn filter_key(self, mut predicate: impl FnMut(&K) -> bool + 'a) -> Self {
        self.then(Step::FilterKey, move |iter| iter.filter(move |pair| predicate(pair.key())))
    }

    pub fn filter_value(self, mut predicate: impl FnMut(&V) -> bool + 'a) -> Self {
        self.then(Step::FilterValue, move |iter| iter.filter(move |pair| predicate(pair.value())))
    }

    pub fn filter(self, mut predicate: impl FnMut(&K, &V) -> bool + 'a) -> Self {
        self.then(Step::Filter, move |iter| iter.filter(move |pair| predicate(pair.key(), pair.value())))
    }

    pub fn map_key<R: 'a>(self, mut mapper: impl FnMut(K) -> R + 'a) -> PairPipe<'a, R, V> {
        self.then(Step::MapKey, move |iter| {
            iter.map(move |pair| {
                let (key, value) = pair.into_tuple();
                Pair::new(mapper(key), value)
            })
        })
    }

    pub fn map_value<R: 'a>(self, mut mapper: impl FnMut(V) -> R + 'a) -> PairPipe<'a, K, R> {
        self.then(Step::MapValue, move |iter| {
            iter.map(move |pair| {
                let (key, value) = pair.into_tuple();
                Pair::new(key, mapper(value))
            })
        })
    }

    /// 将键值对映射为普通序列
    pub fn map<R: 'a>(self, mut mapper: impl FnMut(K, V) -> R + 'a) -> Pipe<'a, R> {
        Pipe::new(self.iter.map(move |pair| {
            let (key, value) = pair.into_tuple();
            mapper(key, value)
        }))
    }

    pub fn map_to_f64(self, mapper: impl FnMut(K, V) -> f64 + 'a) -> Pipe<'a, f64> {
        self.map(mapper)
    }

    pub fn map_to_i32(self, mapper: impl FnMut(K, V) -> i32 + 'a) -> Pipe<'a, i32> {
        self.map(mapper)
    }

    pub fn map_to_i64(self, mapper: impl FnMut(K, V) -> i64 + 'a) -> Pipe<'a, i64> {
        self.map(mapper)
    }

    /// 每个键值对展开为一组键值对，按遇到的顺序拼接
    pub fn flat_map<RK: 'a, RV: 'a, I>(self, mut mapper: impl FnMut(K, V) -> I + 'a) -> PairPipe<'a, RK, RV>
    where
        I: IntoIterator<Item = Pair<RK, RV>> + 'a,
        I::IntoIter: 'a,
    {
        self.then(Step::FlatMap, move |iter| {
            iter.flat_map(move |pair| {
                let (key, value) = pair.into_tuple();
                mapper(key, value)
            })
        })
    }

    pub fn flat_map_to_obj<R: 'a, I>(self, mut mapper: impl FnMut(K, V) -> I + 'a) -> Pipe<'a, R>
    where
        I: IntoIterator<Item = R> + 'a,
        I::IntoIter: 'a,
    {
        Pipe::new(self.iter.flat_map(move |pair| {
            let (key, value) = pair.into_tuple();
            mapper(key, value)
        }))
    }

    pub fn flat_map_to_f64<I>(self, mapper: impl FnMut(K, V) -> I + 'a) -> Pipe<'a, f64>
    where
        I: IntoIterator<Item = f64> + 'a,
        I::IntoIter: 'a,
    {
        self.flat_map_to_obj(mapper)
    }

    pub fn flat_map_to_i32<I>(self, mapper: impl FnMut(K, V) -> I + 'a) -> Pipe<'a, i32>
    where
        I: IntoIterator<Item = i32> + 'a,
        I::IntoIter: 'a,
    {
        self.flat_map_to_obj(mapper)
    }

    pub fn flat_map_to_i64<I>(self, mapper: impl FnMut(K, V) -> I + 'a) -> Pipe<'a, i64>
    where
        I: IntoIterator<Item = i64> + 'a,
        I::IntoIter: 'a,
    {
        self.flat_map_to_obj(mapper)
    }

    /// 按键排序（稳定排序）。首次拉取时会完整消费上游，上游必须有限。
    pub fn sorted_by_key(self, mut comparator: impl FnMut(&K, &K) -> Ordering + 'a) -> Self {
        self.then(Step::SortedByKey, move |iter| {
            Deferred::new(move || {
                let sorted = iter.sorted_by(|a, b| comparator(a.key(), b.key()));
                trace!(pairs = sorted.len(), "sorted pair pipe by key");
                sorted
            })
        })
    }

    /// 按值排序（稳定排序）。首次拉取时会完整消费上游，上游必须有限。
    pub fn sorted_by_value(self, mut comparator: impl FnMut(&V, &V) -> Ordering + 'a) -> Self {
        self.then(Step::SortedByValue, move |iter| {
            Deferred::new(move || {
                let sorted = iter.sorted_by(|a, b| comparator(a.value(), b.value()));
                trace!(pairs = sorted.len(), "sorted pair pipe by value");
                sorted
            })
        })
    }
}

impl<'a, K, V> IntoIterator for PairPipe<'a, K, V> {
    type Item = Pair<K, V>;
    type IntoIter = PairIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter
    }
}

impl<K, V> Debug for PairPipe<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairPipe").field("steps", &self.steps).finish_non_exhaustive()
    }
}
