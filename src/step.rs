use std::fmt::{Display, Formatter};

/// 流水线中的一个步骤，仅用于描述流水线的构成，不参与求值。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Step {
    /// 数据来源，例如`map`、`multi_map`、`of`
    Source(&'static str),
    Distinct,
    Peek,
    Skip(usize),
    Limit(usize),
    Filter,
    FilterKey,
    FilterValue,
    MapKey,
    MapValue,
    FlatMap,
    SortedByKey,
    SortedByValue,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Source(source) => write!(f, "source({source})"),
            Step::Distinct => f.write_str("distinct"),
            Step::Peek => f.write_str("peek"),
            Step::Skip(n) => write!(f, "skip({n})"),
            Step::Limit(n) => write!(f, "limit({n})"),
            Step::Filter => f.write_str("filter"),
            Step::FilterKey => f.write_str("filter_key"),
            Step::FilterValue => f.write_str("filter_value"),
            Step::MapKey => f.write_str("map_key"),
            Step::MapValue => f.write_str("map_value"),
            Step::FlatMap => f.write_str("flat_map"),
            Step::SortedByKey => f.write_str("sorted_by_key"),
            Step::SortedByValue => f.write_str("sorted_by_value"),
        }
    }
}
