/// 普通惰性序列，键值对被拆解后的出口。
pub struct Pipe<'a, T> {
    pub(crate) iter: Box<dyn Iterator<Item = T> + 'a>,
}

impl<'a, T> Pipe<'a, T> {
    pub(crate) fn new(iter: impl Iterator<Item = T> + 'a) -> Self {
        Pipe { iter: Box::new(iter) }
    }
}

impl<T> Iterator for Pipe<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// 首次拉取时才构造内部迭代器，用于排序等需要一次性消费上游的操作。
pub(crate) struct Deferred<F, I> {
    init: Option<F>,
    iter: Option<I>,
}

impl<F, I> Deferred<F, I>
where
    F: FnOnce() -> I,
{
    pub(crate) fn new(init: F) -> Self {
        Deferred { init: Some(init), iter: None }
    }
}

impl<F, I> Iterator for Deferred<F, I>
where
    F: FnOnce() -> I,
    I: Iterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(init) = self.init.take() {
            self.iter = Some(init());
        }
        self.iter.as_mut()?.next()
    }
}
