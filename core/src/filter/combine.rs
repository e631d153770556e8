use super::ObjectFilter;

impl ObjectFilter {
    /// Conjunction with the trivial cases folded away: nested ANDs are flattened, `All` members
    /// and duplicates dropped, a `None` member absorbs the whole conjunction, a single member is
    /// returned as is and no members at all give `All`.
    pub fn and_optimized(filters: impl IntoIterator<Item = ObjectFilter>) -> ObjectFilter {
        let mut members = Vec::new();
        for filter in filters {
            match filter {
                ObjectFilter::All => {}
                ObjectFilter::None => return ObjectFilter::None,
                ObjectFilter::And(nested) => match ObjectFilter::and_optimized(nested) {
                    ObjectFilter::All => {}
                    ObjectFilter::None => return ObjectFilter::None,
                    ObjectFilter::And(flat) => push_unique_all(&mut members, flat),
                    other => push_unique(&mut members, other),
                },
                other => push_unique(&mut members, other),
            }
        }
        match members.len() {
            0 => ObjectFilter::All,
            1 => members.remove(0),
            _ => ObjectFilter::And(members),
        }
    }

    /// Dual of [`ObjectFilter::and_optimized`]: `None` is the identity, `All` absorbs, empty gives `None`.
    pub fn or_optimized(filters: impl IntoIterator<Item = ObjectFilter>) -> ObjectFilter {
        let mut members = Vec::new();
        for filter in filters {
            match filter {
                ObjectFilter::None => {}
                ObjectFilter::All => return ObjectFilter::All,
                ObjectFilter::Or(nested) => match ObjectFilter::or_optimized(nested) {
                    ObjectFilter::None => {}
                    ObjectFilter::All => return ObjectFilter::All,
                    ObjectFilter::Or(flat) => push_unique_all(&mut members, flat),
                    other => push_unique(&mut members, other),
                },
                other => push_unique(&mut members, other),
            }
        }
        match members.len() {
            0 => ObjectFilter::None,
            1 => members.remove(0),
            _ => ObjectFilter::Or(members),
        }
    }
}

fn push_unique(members: &mut Vec<ObjectFilter>, filter: ObjectFilter) {
    if !members.contains(&filter) {
        members.push(filter);
    }
}

fn push_unique_all(members: &mut Vec<ObjectFilter>, filters: Vec<ObjectFilter>) {
    for filter in filters {
        push_unique(members, filter);
    }
}
