use super::PairPipe;
use crate::pair::Pair;

/// 构造流水线。提取函数都是惰性的，仅在终结操作拉取元素时调用。
impl<'a, K: 'a, V: 'a> PairPipe<'a, K, V> {
    /// 从映射构造，每个条目一个键值对，顺序与映射的迭代顺序一致
    pub fn from_map<M>(map: M) -> Self
    where
        M: IntoIterator<Item = (K, V)>,
        M::IntoIter: 'a,
    {
        Self::source("map", map.into_iter().map(Pair::from))
    }

    /// 从多值映射构造，每个(键, 值)出现一次产生一个键值对，重复的值会保留
    pub fn from_multi_map<M, C>(map: M) -> Self
    where
        M: IntoIterator<Item = (K, C)>,
        M::IntoIter: 'a,
        C: IntoIterator<Item = V>,
        C::IntoIter: 'a,
        K: Clone,
    {
        Self::source(
            "multi_map",
            map.into_iter().flat_map(|(key, values)| values.into_iter().map(move |value| Pair::new(key.clone(), value))),
        )
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = Pair<K, V>>,
        I::IntoIter: 'a,
    {
        Self::source("pairs", pairs.into_iter())
    }

    pub fn from_tuples<I>(tuples: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: 'a,
    {
        Self::source("tuples", tuples.into_iter().map(Pair::from))
    }

    /// 每个源元素分别提取键和值
    pub fn from_extractors<S: 'a, I>(
        source: I,
        mut key_fn: impl FnMut(&S) -> K + 'a,
        mut value_fn: impl FnMut(&S) -> V + 'a,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 'a,
    {
        Self::source("extractors", source.into_iter().map(move |s| Pair::new(key_fn(&s), value_fn(&s))))
    }

    /// 提取键，源元素本身作为值
    pub fn from_key_fn<I>(source: I, mut key_fn: impl FnMut(&V) -> K + 'a) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: 'a,
    {
        Self::source("key_fn", source.into_iter().map(move |value| Pair::new(key_fn(&value), value)))
    }

    /// 源元素本身作为键，提取值
    pub fn from_value_fn<I>(source: I, mut value_fn: impl FnMut(&K) -> V + 'a) -> Self
    where
        I: IntoIterator<Item = K>,
        I::IntoIter: 'a,
    {
        Self::source("value_fn", source.into_iter().map(move |key| {
            let value = value_fn(&key);
            Pair::new(key, value)
        }))
    }

    pub fn empty() -> Self {
        Self::source("of", std::iter::empty())
    }

    pub fn of(k1: K, v1: V) -> Self {
        Self::source("of", std::iter::once(Pair::new(k1, v1)))
    }

    pub fn of2(k1: K, v1: V, k2: K, v2: V) -> Self {
        Self::source("of", [Pair::new(k1, v1), Pair::new(k2, v2)].into_iter())
    }

    pub fn of3(k1: K, v1: V, k2: K, v2: V, k3: K, v3: V) -> Self {
        Self::source("of", [Pair::new(k1, v1), Pair::new(k2, v2), Pair::new(k3, v3)].into_iter())
    }

    pub fn of_pairs<const N: usize>(pairs: [(K, V); N]) -> Self {
        Self::source("of", pairs.into_iter().map(Pair::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;
    use std::cell::Cell;
    use std::collections::{BTreeMap, HashMap};

    fn tuples<K, V>(pipe: PairPipe<'_, K, V>) -> Vec<(K, V)> {
        pipe.into_iter().map(Pair::into_tuple).collect()
    }

    #[test]
    fn test_from_map() {
        let map = BTreeMap::from([(2, "b"), (1, "a")]);
        assert_eq!(vec![(&1, &"a"), (&2, &"b")], tuples(PairPipe::from_map(&map)));
        assert_eq!(vec![(1, "a"), (2, "b")], tuples(PairPipe::from_map(map)));

        let hash_map = HashMap::from([("x", 1), ("y", 2), ("z", 3)]);
        assert_eq!(6, PairPipe::from_map(hash_map).map_to_i32(|_, v| v).sum());
    }

    #[test]
    fn test_from_multi_map() {
        let multi_map = BTreeMap::from([(1, vec!["a", "a", "b"]), (2, vec![]), (3, vec!["c"])]);
        let pipe = PairPipe::from_multi_map(multi_map);
        assert_eq!(Step::Source("multi_map"), pipe.steps()[0]);
        assert_eq!(vec![(1, "a"), (1, "a"), (1, "b"), (3, "c")], tuples(pipe));
    }

    #[test]
    fn test_from_pairs_and_tuples() {
        assert_eq!(vec![(1, 'x')], tuples(PairPipe::from_pairs(vec![Pair::new(1, 'x')])));
        assert_eq!(vec![(1, 'x'), (2, 'y')], tuples(PairPipe::from_tuples("xy".chars().zip(1..).map(|(c, i)| (i, c)))));
    }

    #[test]
    fn test_from_extractors_is_lazy() {
        let calls = Cell::new(0);
        let words = vec!["apple", "kiwi", "banana"];
        let pipe = PairPipe::from_extractors(
            words,
            |w: &&str| {
                calls.set(calls.get() + 1);
                w.len()
            },
            |w: &&str| w.to_uppercase(),
        );
        assert_eq!(0, calls.get());
        assert_eq!(Some(Pair::new(4, "KIWI".to_string())), pipe.min_by_key(usize::cmp));
        assert_eq!(3, calls.get());
    }

    #[test]
    fn test_from_key_fn_value_is_identity() {
        let res = tuples(PairPipe::from_key_fn(vec!["aa", "b"], |w: &&str| w.len()));
        assert_eq!(vec![(2, "aa"), (1, "b")], res);
    }

    #[test]
    fn test_from_value_fn_key_is_identity() {
        let res = tuples(PairPipe::from_value_fn(1..=3, |n: &i32| n * n));
        assert_eq!(vec![(1, 1), (2, 4), (3, 9)], res);
    }

    #[test]
    fn test_literals() {
        assert_eq!(0, PairPipe::<u8, u8>::empty().count());
        assert_eq!(vec![(1, "a")], tuples(PairPipe::of(1, "a")));
        assert_eq!(vec![(1, "x"), (2, "y")], tuples(PairPipe::of2(1, "x", 2, "y")));
        assert_eq!(3, PairPipe::of3(1, 1, 2, 2, 3, 3).count());
        assert_eq!(5, PairPipe::of_pairs([(0, 0); 5]).count());
    }
}
