use super::{PairIter, PairPipe};
use crate::collect::{drive, Collector};
use crate::pair::Pair;
use crate::pipe::Pipe;
use std::cmp::Ordering;
use tracing::trace;

/// 终结操作。
///
/// `max_by_*`在多个键值对并列最大时返回最后遇到的一个，`min_by_*`并列最小时返回最先遇到的一个。
impl<'a, K: 'a, V: 'a> PairPipe<'a, K, V> {
    fn evaluate(self, op: &'static str) -> PairIter<'a, K, V> {
        trace!(op, steps = %self.describe(), "evaluating pair pipe");
        self.iter
    }

    pub fn all_match(self, mut predicate: impl FnMut(&K, &V) -> bool) -> bool {
        self.evaluate("all_match").all(|pair| predicate(pair.key(), pair.value()))
    }

    pub fn any_match(self, mut predicate: impl FnMut(&K, &V) -> bool) -> bool {
        self.evaluate("any_match").any(|pair| predicate(pair.key(), pair.value()))
    }

    pub fn none_match(self, mut predicate: impl FnMut(&K, &V) -> bool) -> bool {
        !self.evaluate("none_match").any(|pair| predicate(pair.key(), pair.value()))
    }

    pub fn count(self) -> u64 {
        self.evaluate("count").count() as u64
    }

    pub fn keys(self) -> Pipe<'a, K> {
        Pipe::new(self.iter.map(Pair::into_key))
    }

    pub fn values(self) -> Pipe<'a, V> {
        Pipe::new(self.iter.map(Pair::into_value))
    }

    pub fn max_by_key(self, mut comparator: impl FnMut(&K, &K) -> Ordering) -> Option<Pair<K, V>> {
        self.evaluate("max_by_key").max_by(|a, b| comparator(a.key(), b.key()))
    }

    pub fn max_by_value(self, mut comparator: impl FnMut(&V, &V) -> Ordering) -> Option<Pair<K, V>> {
        self.evaluate("max_by_value").max_by(|a, b| comparator(a.value(), b.value()))
    }

    pub fn min_by_key(self, mut comparator: impl FnMut(&K, &K) -> Ordering) -> Option<Pair<K, V>> {
        self.evaluate("min_by_key").min_by(|a, b| comparator(a.key(), b.key()))
    }

    pub fn min_by_value(self, mut comparator: impl FnMut(&V, &V) -> Ordering) -> Option<Pair<K, V>> {
        self.evaluate("min_by_value").min_by(|a, b| comparator(a.value(), b.value()))
    }

    pub fn for_each(self, mut action: impl FnMut(K, V)) {
        self.evaluate("for_each").for_each(|pair| {
            let (key, value) = pair.into_tuple();
            action(key, value)
        })
    }

    /// 求值是顺序的，与`for_each`相同，总是按遇到的顺序执行
    pub fn for_each_ordered(self, action: impl FnMut(K, V)) {
        self.for_each(action)
    }

    /// 遇到第一个错误时停止，原样返回该错误，之前的副作用不会回滚
    pub fn try_for_each<E>(self, mut action: impl FnMut(K, V) -> Result<(), E>) -> Result<(), E> {
        self.evaluate("try_for_each").try_for_each(|pair| {
            let (key, value) = pair.into_tuple();
            action(key, value)
        })
    }

    pub fn collect<C: Collector<Pair<K, V>>>(self, collector: C) -> C::Output {
        drive(self.evaluate("collect"), collector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::{grouping_by_key, to_map, to_vec};
    use crate::err::PairErr;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    fn sample() -> PairPipe<'static, i32, &'static str> {
        PairPipe::of_pairs([(1, "a"), (2, "b"), (1, "a"), (3, "c")])
    }

    #[test]
    fn test_count_matches_keys_and_values() {
        assert_eq!(4, sample().count());
        assert_eq!(sample().count(), sample().keys().count() as u64);
        assert_eq!(sample().count(), sample().values().count() as u64);
    }

    #[test]
    fn test_keys_values_order() {
        assert_eq!(vec![1, 2, 1, 3], sample().keys().collect::<Vec<_>>());
        assert_eq!(vec!["a", "b", "a", "c"], sample().values().collect::<Vec<_>>());
    }

    #[test]
    fn test_quantifiers() {
        assert!(sample().all_match(|k, _| *k > 0));
        assert!(!sample().all_match(|k, _| *k > 1));
        assert!(sample().any_match(|_, v| *v == "c"));
        assert!(!sample().any_match(|_, v| *v == "z"));
        assert!(sample().none_match(|k, v| *k == 2 && *v == "a"));
        assert!(!sample().none_match(|k, _| *k == 3));
    }

    #[test]
    fn test_quantifiers_short_circuit() {
        let calls = Cell::new(0);
        let all = sample().all_match(|k, _| {
            calls.set(calls.get() + 1);
            *k == 1
        });
        assert!(!all);
        assert_eq!(2, calls.get());

        calls.set(0);
        assert!(sample().any_match(|k, _| {
            calls.set(calls.get() + 1);
            *k == 2
        }));
        assert_eq!(2, calls.get());

        calls.set(0);
        assert!(!sample().none_match(|_, _| {
            calls.set(calls.get() + 1);
            true
        }));
        assert_eq!(1, calls.get());
    }

    #[test]
    fn test_empty() {
        assert_eq!(None, PairPipe::<i32, i32>::empty().max_by_key(i32::cmp));
        assert_eq!(0, PairPipe::<i32, i32>::empty().count());
        assert!(PairPipe::<i32, i32>::empty().all_match(|_, _| false));
        assert!(!PairPipe::<i32, i32>::empty().any_match(|_, _| true));
        assert!(PairPipe::<i32, i32>::empty().none_match(|_, _| true));
    }

    #[test]
    fn test_max_min() {
        assert_eq!(Some(Pair::new(3, "c")), sample().max_by_key(i32::cmp));
        assert_eq!(Some(Pair::new(3, "c")), sample().max_by_value(|a, b| a.cmp(b)));
        assert_eq!(Some(Pair::new(1, "a")), sample().min_by_key(i32::cmp));
        assert_eq!(Some(Pair::new(1, "a")), sample().min_by_value(|a, b| a.cmp(b)));
    }

    #[test]
    fn test_max_min_tie_break() {
        let pipe = || PairPipe::of3(1, "first", 0, "x", 1, "last");
        assert_eq!(Some(Pair::new(1, "last")), pipe().max_by_key(i32::cmp));
        assert_eq!(Some(Pair::new(0, "x")), pipe().min_by_key(i32::cmp));
        assert_eq!(Some(Pair::new(1, "first")), pipe().min_by_key(|a, b| b.cmp(a)));
    }

    #[test]
    fn test_for_each() {
        let mut seen = Vec::new();
        sample().for_each(|k, v| seen.push(format!("{k}{v}")));
        assert_eq!(vec!["1a", "2b", "1a", "3c"], seen);

        let mut ordered = Vec::new();
        sample().sorted_by_key(|a, b| b.cmp(a)).for_each_ordered(|k, _| ordered.push(k));
        assert_eq!(vec![3, 2, 1, 1], ordered);
    }

    #[test]
    fn test_try_for_each_propagates_error() {
        let seen = RefCell::new(Vec::new());
        let res = sample().peek(|k, _| seen.borrow_mut().push(*k)).try_for_each(|k, v| {
            if k == 1 && v == "a" && seen.borrow().len() > 1 { Err(format!("stop at {k}")) } else { Ok(()) }
        });
        assert_eq!(Err("stop at 1".to_string()), res);
        assert_eq!(vec![1, 2, 1], seen.into_inner());
        assert_eq!(Ok::<(), ()>(()), sample().try_for_each(|_, _| Ok::<(), ()>(())));
    }

    #[test]
    fn test_collect_to_map() {
        let res = PairPipe::of2(1, "x", 2, "y").map_value(str::to_uppercase).collect(to_map()).unwrap();
        assert_eq!(HashMap::from([(1, "X".to_string()), (2, "Y".to_string())]), res);
        assert!(sample().collect(to_map()).is_err());
    }

    #[test]
    fn test_collect_to_map_stops_at_duplicate() {
        let pulled = Cell::new(0);
        let res = PairPipe::of_pairs([(1, "a"), (1, "b"), (2, "c"), (3, "d")])
            .peek(|_, _| pulled.set(pulled.get() + 1))
            .collect(to_map());
        assert_eq!(Err(PairErr::DuplicateKey { key: "1".to_string() }), res);
        assert_eq!(2, pulled.get());

        let endless = PairPipe::from_key_fn(0.., |n: &u32| n % 3).collect(to_map());
        assert_eq!(Err(PairErr::DuplicateKey { key: "0".to_string() }), endless);
    }

    #[test]
    fn test_keys_values_are_lazy() {
        let calls = Cell::new(0);
        let keys = sample().peek(|_, _| calls.set(calls.get() + 1)).keys();
        assert_eq!(0, calls.get());
        assert_eq!(vec![1, 2], keys.take(2).collect::<Vec<_>>());
        assert_eq!(2, calls.get());

        calls.set(0);
        let values = sample().peek(|_, _| calls.set(calls.get() + 1)).values();
        assert_eq!(0, calls.get());
        assert_eq!(4, values.count());
        assert_eq!(4, calls.get());
    }

    #[test]
    fn test_collect_other() {
        assert_eq!(4, sample().collect(to_vec()).len());
        assert_eq!(vec!["a", "a"], sample().collect(grouping_by_key())[&1]);
    }
}
