use crate::err::PairErr;
use crate::pair::Pair;
use crate::PairRes;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

/// 通用归约：`supply`创建累加器，`accumulate`逐个消费元素，`finish`产出结果。
pub trait Collector<T> {
    type Acc;
    type Output;

    fn supply(&mut self) -> Self::Acc;

    fn accumulate(&mut self, acc: &mut Self::Acc, item: T);

    /// 结果已确定时返回`true`，上游不再被拉取
    fn is_done(&self, _acc: &Self::Acc) -> bool {
        false
    }

    fn finish(self, acc: Self::Acc) -> Self::Output;
}

/// 驱动一个归约
pub(crate) fn drive<T, C>(items: impl Iterator<Item = T>, mut collector: C) -> C::Output
where
    C: Collector<T>,
{
    let mut acc = collector.supply();
    for item in items {
        collector.accumulate(&mut acc, item);
        if collector.is_done(&acc) {
            break;
        }
    }
    collector.finish(acc)
}

pub struct FnCollector<T, S, A, F> {
    supplier: S,
    accumulator: A,
    finisher: F,
    _item: PhantomData<fn(T)>,
}

impl<T, Acc, R, S, A, F> Collector<T> for FnCollector<T, S, A, F>
where
    S: FnMut() -> Acc,
    A: FnMut(&mut Acc, T),
    F: FnOnce(Acc) -> R,
{
    type Acc = Acc;
    type Output = R;

    fn supply(&mut self) -> Acc {
        (self.supplier)()
    }

    fn accumulate(&mut self, acc: &mut Acc, item: T) {
        (self.accumulator)(acc, item)
    }

    fn finish(self, acc: Acc) -> R {
        (self.finisher)(acc)
    }
}

/// 由三个函数组成归约
pub fn from_fns<T, Acc, R, S, A, F>(supplier: S, accumulator: A, finisher: F) -> FnCollector<T, S, A, F>
where
    S: FnMut() -> Acc,
    A: FnMut(&mut Acc, T),
    F: FnOnce(Acc) -> R,
{
    FnCollector { supplier, accumulator, finisher, _item: PhantomData }
}

pub struct ToVec;

impl<K, V> Collector<Pair<K, V>> for ToVec {
    type Acc = Vec<Pair<K, V>>;
    type Output = Vec<Pair<K, V>>;

    fn supply(&mut self) -> Self::Acc {
        Vec::new()
    }

    fn accumulate(&mut self, acc: &mut Self::Acc, item: Pair<K, V>) {
        acc.push(item);
    }

    fn finish(self, acc: Self::Acc) -> Self::Output {
        acc
    }
}

pub fn to_vec() -> ToVec {
    ToVec
}

/// 收集为`HashMap`，遇到第一个重复的键即停止，报告为[`PairErr::DuplicateKey`]。
pub struct ToMap;

impl<K, V> Collector<Pair<K, V>> for ToMap
where
    K: Eq + Hash + Debug,
{
    type Acc = (HashMap<K, V>, Option<K>);
    type Output = PairRes<HashMap<K, V>>;

    fn supply(&mut self) -> Self::Acc {
        (HashMap::new(), None)
    }

    fn accumulate(&mut self, (map, duplicate): &mut Self::Acc, item: Pair<K, V>) {
        let (key, value) = item.into_tuple();
        if map.contains_key(&key) {
            *duplicate = Some(key);
        } else {
            map.insert(key, value);
        }
    }

    fn is_done(&self, (_, duplicate): &Self::Acc) -> bool {
        duplicate.is_some()
    }

    fn finish(self, (map, duplicate): Self::Acc) -> Self::Output {
        match duplicate {
            Some(key) => Err(PairErr::DuplicateKey { key: format!("{key:?}") }),
            None => Ok(map),
        }
    }
}

pub fn to_map() -> ToMap {
    ToMap
}

pub struct ToMapMerging<M> {
    merge: M,
}

impl<K, V, M> Collector<Pair<K, V>> for ToMapMerging<M>
where
    K: Eq + Hash,
    M: FnMut(V, V) -> V,
{
    type Acc = HashMap<K, V>;
    type Output = HashMap<K, V>;

    fn supply(&mut self) -> Self::Acc {
        HashMap::new()
    }

    fn accumulate(&mut self, acc: &mut Self::Acc, item: Pair<K, V>) {
        let (key, value) = item.into_tuple();
        let merged = match acc.remove(&key) {
            Some(old) => (self.merge)(old, value),
            None => value,
        };
        acc.insert(key, merged);
    }

    fn finish(self, acc: Self::Acc) -> Self::Output {
        acc
    }
}

/// 收集为`HashMap`，重复的键使用`merge(旧值, 新值)`合并
pub fn to_map_merging<V, M: FnMut(V, V) -> V>(merge: M) -> ToMapMerging<M> {
    ToMapMerging { merge }
}

pub struct ToBTreeMap;

impl<K: Ord, V> Collector<Pair<K, V>> for ToBTreeMap {
    type Acc = BTreeMap<K, V>;
    type Output = BTreeMap<K, V>;

    fn supply(&mut self) -> Self::Acc {
        BTreeMap::new()
    }

    fn accumulate(&mut self, acc: &mut Self::Acc, item: Pair<K, V>) {
        let (key, value) = item.into_tuple();
        acc.insert(key, value);
    }

    fn finish(self, acc: Self::Acc) -> Self::Output {
        acc
    }
}

/// 收集为`BTreeMap`，重复的键保留最后的值
pub fn to_btree_map() -> ToBTreeMap {
    ToBTreeMap
}

pub struct GroupingByKey;

impl<K: Eq + Hash, V> Collector<Pair<K, V>> for GroupingByKey {
    type Acc = HashMap<K, Vec<V>>;
    type Output = HashMap<K, Vec<V>>;

    fn supply(&mut self) -> Self::Acc {
        HashMap::new()
    }

    fn accumulate(&mut self, acc: &mut Self::Acc, item: Pair<K, V>) {
        let (key, value) = item.into_tuple();
        acc.entry(key).or_default().push(value);
    }

    fn finish(self, acc: Self::Acc) -> Self::Output {
        acc
    }
}

/// 按键分组为多值映射，同一键的值保持遇到的顺序
pub fn grouping_by_key() -> GroupingByKey {
    GroupingByKey
}
